use super::{animate, own_position, target, WALKING};
use crate::{
    config::EnemyConfig,
    keys::{LAST_KNOWN_POSITION, TARGET},
    world::Layer,
    BehaviorNode, BehaviorResult, Context, PortSpec,
};
use cgmath::MetricSpace;
use log::debug;
use std::cmp::Ordering;

/// Looks for a hostile inside the perception sphere.
///
/// Succeeds immediately while a target is already known. Otherwise the
/// nearest visible hostile becomes the target.
pub struct Sensing {
    fov_range: f32,
    layer: Layer,
}

impl Sensing {
    pub fn new(config: &EnemyConfig) -> Self {
        Self {
            fov_range: config.fov_range,
            layer: config.hostile_layer(),
        }
    }
}

impl BehaviorNode for Sensing {
    fn provided_ports(&self) -> Vec<PortSpec> {
        vec![PortSpec::new_inout(*TARGET)]
    }

    fn tick(&mut self, ctx: &mut Context) -> BehaviorResult {
        if ctx.paused() {
            return BehaviorResult::Fail;
        }
        if target(ctx).is_some() {
            return BehaviorResult::Success;
        }
        let Some(pos) = own_position(ctx) else {
            return BehaviorResult::Fail;
        };

        let agent = ctx.agent();
        let world = ctx.world();
        let nearest = world
            .overlap(pos, self.fov_range, self.layer)
            .into_iter()
            .filter(|id| *id != agent && !world.is_hidden(*id))
            .filter_map(|id| world.position(id).map(|p| (id, p.distance2(pos))))
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

        match nearest {
            Some((found, _)) => {
                debug!("{:?} spotted {:?}", agent, found);
                ctx.set_shared(*TARGET, found);
                animate(ctx, WALKING, true);
                BehaviorResult::Success
            }
            None => BehaviorResult::Fail,
        }
    }
}

/// Keeps an acquired target only while it stays in plain sight.
///
/// When the target hides, breaks line of sight or gets beyond `lose_range`,
/// its position is remembered as `lastKnownPosition` and the target is
/// dropped.
pub struct TrackTarget {
    lose_range: f32,
}

impl TrackTarget {
    pub fn new(config: &EnemyConfig) -> Self {
        Self {
            lose_range: config.lose_range,
        }
    }
}

impl BehaviorNode for TrackTarget {
    fn provided_ports(&self) -> Vec<PortSpec> {
        vec![
            PortSpec::new_in(*TARGET),
            PortSpec::new_out(*LAST_KNOWN_POSITION),
        ]
    }

    fn tick(&mut self, ctx: &mut Context) -> BehaviorResult {
        if ctx.paused() {
            return BehaviorResult::Fail;
        }
        let Some(target) = target(ctx) else {
            return BehaviorResult::Fail;
        };
        let Some(target_pos) = ctx.world().position(target) else {
            // Despawned
            ctx.clear(*TARGET);
            return BehaviorResult::Fail;
        };
        let Some(pos) = own_position(ctx) else {
            return BehaviorResult::Fail;
        };

        let world = ctx.world();
        let lost = world.is_hidden(target)
            || pos.distance(target_pos) > self.lose_range
            || !world.line_clear(pos, target_pos);

        if lost {
            debug!("{:?} lost {:?} at {:?}", ctx.agent(), target, target_pos);
            ctx.set_shared(*LAST_KNOWN_POSITION, target_pos);
            ctx.clear(*TARGET);
            BehaviorResult::Fail
        } else {
            BehaviorResult::Success
        }
    }
}
