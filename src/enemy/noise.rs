use super::{animate, arrived, move_to, own_position, target, ATTACKING, RUNNING, WALKING};
use crate::{
    config::EnemyConfig,
    keys::{NOISE_LEVEL, NOISE_POSITION, TARGET},
    BehaviorNode, BehaviorResult, Context, PortSpec, Value,
};
use cgmath::MetricSpace;
use log::debug;

/// Decides whether a noise is worth investigating.
///
/// A noise carries `noiseLevel` world units. If a wall sits between the
/// agent and the source, only `noise_occlusion` of that range gets through.
/// Hunting a target always wins over noises.
pub struct HearNoise {
    occlusion: f32,
}

impl HearNoise {
    pub fn new(config: &EnemyConfig) -> Self {
        Self {
            occlusion: config.noise_occlusion,
        }
    }
}

impl BehaviorNode for HearNoise {
    fn provided_ports(&self) -> Vec<PortSpec> {
        vec![
            PortSpec::new_in(*TARGET),
            PortSpec::new_inout(*NOISE_LEVEL),
            PortSpec::new_out(*NOISE_POSITION),
        ]
    }

    fn tick(&mut self, ctx: &mut Context) -> BehaviorResult {
        if ctx.paused() {
            return BehaviorResult::Fail;
        }
        if target(ctx).is_some() {
            ctx.clear(*NOISE_LEVEL);
            return BehaviorResult::Fail;
        }

        if let Some(noise) = ctx.world().heard_noise(ctx.agent()) {
            ctx.set_shared(*NOISE_LEVEL, noise.level);
            ctx.set_shared(*NOISE_POSITION, noise.position);
        }

        let level = ctx.get(*NOISE_LEVEL).and_then(Value::as_float);
        let source = ctx.get(*NOISE_POSITION).and_then(Value::as_point);
        let (Some(level), Some(source), Some(pos)) = (level, source, own_position(ctx)) else {
            return BehaviorResult::Fail;
        };

        let distance = pos.distance(source);
        let audible = if distance > level {
            false
        } else if ctx.world().line_clear(pos, source) {
            true
        } else {
            distance <= level * self.occlusion
        };

        if audible {
            BehaviorResult::Success
        } else {
            debug!(
                "{:?} ignores noise at {:?} (distance {}, level {})",
                ctx.agent(),
                source,
                distance,
                level
            );
            ctx.clear(*NOISE_LEVEL);
            BehaviorResult::Fail
        }
    }
}

/// Walks to the noise source and forgets the noise on arrival.
pub struct GoToNoise {
    walk_speed: f32,
    arrive_epsilon: f32,
}

impl GoToNoise {
    pub fn new(config: &EnemyConfig) -> Self {
        Self {
            walk_speed: config.walk_speed,
            arrive_epsilon: config.arrive_epsilon,
        }
    }
}

impl BehaviorNode for GoToNoise {
    fn provided_ports(&self) -> Vec<PortSpec> {
        vec![PortSpec::new_in(*NOISE_POSITION)]
    }

    fn tick(&mut self, ctx: &mut Context) -> BehaviorResult {
        if ctx.paused() {
            return BehaviorResult::Running;
        }
        let Some(source) = ctx.get(*NOISE_POSITION).and_then(Value::as_point) else {
            return BehaviorResult::Fail;
        };

        move_to(ctx, source, self.walk_speed);
        animate(ctx, RUNNING, false);
        animate(ctx, ATTACKING, false);
        if arrived(ctx, self.arrive_epsilon) {
            ctx.clear(*NOISE_POSITION);
            ctx.clear(*NOISE_LEVEL);
            animate(ctx, WALKING, false);
            BehaviorResult::Success
        } else {
            animate(ctx, WALKING, true);
            BehaviorResult::Running
        }
    }
}
