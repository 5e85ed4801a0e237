use super::{animate, own_position, target, ATTACKING, RUNNING, WALKING};
use crate::{config::EnemyConfig, keys::TARGET, BehaviorNode, BehaviorResult, Context, PortSpec};
use cgmath::MetricSpace;
use log::debug;

/// Succeeds when the target is visible and within striking distance.
pub struct InAttackRange {
    attack_range: f32,
}

impl InAttackRange {
    pub fn new(config: &EnemyConfig) -> Self {
        Self {
            attack_range: config.attack_range,
        }
    }
}

impl BehaviorNode for InAttackRange {
    fn provided_ports(&self) -> Vec<PortSpec> {
        vec![PortSpec::new_in(*TARGET)]
    }

    fn tick(&mut self, ctx: &mut Context) -> BehaviorResult {
        if ctx.paused() {
            return BehaviorResult::Fail;
        }
        let Some(target) = target(ctx) else {
            return BehaviorResult::Fail;
        };
        let world = ctx.world();
        if world.is_hidden(target) {
            return BehaviorResult::Fail;
        }
        let in_range = own_position(ctx)
            .zip(world.position(target))
            .map(|(pos, target_pos)| pos.distance(target_pos) <= self.attack_range)
            .unwrap_or(false);
        if in_range {
            BehaviorResult::Success
        } else {
            BehaviorResult::Fail
        }
    }
}

/// Strikes the target once per `attack_interval` for as long as it is ticked.
///
/// The countdown lives in the node, so an attack pre-empted by another branch
/// resumes with whatever time had accumulated.
pub struct Attack {
    interval: f32,
    timer: f32,
}

impl Attack {
    pub fn new(config: &EnemyConfig) -> Self {
        Self {
            interval: config.attack_interval,
            timer: 0.,
        }
    }
}

impl BehaviorNode for Attack {
    fn provided_ports(&self) -> Vec<PortSpec> {
        vec![PortSpec::new_in(*TARGET)]
    }

    fn tick(&mut self, ctx: &mut Context) -> BehaviorResult {
        if ctx.paused() {
            return BehaviorResult::Running;
        }
        let Some(target) = target(ctx) else {
            return BehaviorResult::Fail;
        };
        let agent = ctx.agent();
        ctx.world_mut().stop(agent, true);
        animate(ctx, WALKING, false);
        animate(ctx, RUNNING, false);
        animate(ctx, ATTACKING, true);

        self.timer += ctx.delta();
        if self.timer >= self.interval {
            self.timer = 0.;
            let dead = ctx.world_mut().apply_damage(target);
            debug!("{:?} hit {:?} (dead: {})", agent, target, dead);
            if dead {
                ctx.clear(*TARGET);
                animate(ctx, ATTACKING, false);
                ctx.world_mut().stop(agent, false);
            }
        }
        BehaviorResult::Running
    }
}
