use super::{animate, arrived, move_to, target, ATTACKING, RUNNING, WALKING};
use crate::{
    config::EnemyConfig,
    keys::{LAST_KNOWN_POSITION, TARGET},
    world::Point,
    BehaviorNode, BehaviorResult, Context, PortSpec, Value,
};
use log::debug;

/// Runs after the current target.
pub struct GoToTarget {
    run_speed: f32,
}

impl GoToTarget {
    pub fn new(config: &EnemyConfig) -> Self {
        Self {
            run_speed: config.run_speed,
        }
    }
}

impl BehaviorNode for GoToTarget {
    fn provided_ports(&self) -> Vec<PortSpec> {
        vec![PortSpec::new_in(*TARGET)]
    }

    fn tick(&mut self, ctx: &mut Context) -> BehaviorResult {
        if ctx.paused() {
            return BehaviorResult::Running;
        }
        let Some(target_pos) = target(ctx).and_then(|target| ctx.world().position(target)) else {
            return BehaviorResult::Fail;
        };
        move_to(ctx, target_pos, self.run_speed);
        animate(ctx, ATTACKING, false);
        animate(ctx, RUNNING, true);
        BehaviorResult::Running
    }
}

/// Walks to where a lost target was last seen and forgets the spot on
/// arrival.
pub struct GoToLastKnownPosition {
    walk_speed: f32,
    arrive_epsilon: f32,
}

impl GoToLastKnownPosition {
    pub fn new(config: &EnemyConfig) -> Self {
        Self {
            walk_speed: config.walk_speed,
            arrive_epsilon: config.arrive_epsilon,
        }
    }
}

impl BehaviorNode for GoToLastKnownPosition {
    fn provided_ports(&self) -> Vec<PortSpec> {
        vec![
            PortSpec::new_in(*TARGET),
            PortSpec::new_in(*LAST_KNOWN_POSITION),
        ]
    }

    fn tick(&mut self, ctx: &mut Context) -> BehaviorResult {
        if ctx.paused() {
            return BehaviorResult::Running;
        }
        if target(ctx).is_some() {
            return BehaviorResult::Fail;
        }
        let Some(destination) = ctx.get(*LAST_KNOWN_POSITION).and_then(Value::as_point) else {
            return BehaviorResult::Fail;
        };

        move_to(ctx, destination, self.walk_speed);
        animate(ctx, RUNNING, false);
        animate(ctx, ATTACKING, false);
        if arrived(ctx, self.arrive_epsilon) {
            debug!("{:?} searched {:?}", ctx.agent(), destination);
            ctx.clear(*LAST_KNOWN_POSITION);
            animate(ctx, WALKING, false);
            BehaviorResult::Success
        } else {
            animate(ctx, WALKING, true);
            BehaviorResult::Running
        }
    }
}

/// Walks a fixed loop of waypoints, pausing at each one.
///
/// The waypoint index only advances once the dwell time at the current
/// waypoint has passed. Patrolling never finishes.
pub struct Patrol {
    waypoints: Vec<Point>,
    walk_speed: f32,
    arrive_epsilon: f32,
    wait_time: f32,
    index: usize,
    waiting: Option<f32>,
}

impl Patrol {
    pub fn new(config: &EnemyConfig) -> Self {
        Self {
            waypoints: config.waypoints(),
            walk_speed: config.walk_speed,
            arrive_epsilon: config.arrive_epsilon,
            wait_time: config.patrol_wait,
            index: 0,
            waiting: None,
        }
    }
}

impl BehaviorNode for Patrol {
    fn provided_ports(&self) -> Vec<PortSpec> {
        vec![PortSpec::new_in(*LAST_KNOWN_POSITION)]
    }

    fn tick(&mut self, ctx: &mut Context) -> BehaviorResult {
        if ctx.paused() {
            return BehaviorResult::Running;
        }
        if ctx.get(*LAST_KNOWN_POSITION).is_some() {
            return BehaviorResult::Fail;
        }
        if self.waypoints.is_empty() {
            return BehaviorResult::Running;
        }

        if let Some(ref mut waited) = self.waiting {
            *waited += ctx.delta();
            if *waited >= self.wait_time {
                self.waiting = None;
                self.index = (self.index + 1) % self.waypoints.len();
                animate(ctx, WALKING, true);
            }
            return BehaviorResult::Running;
        }

        move_to(ctx, self.waypoints[self.index], self.walk_speed);
        animate(ctx, RUNNING, false);
        animate(ctx, ATTACKING, false);
        if arrived(ctx, self.arrive_epsilon) {
            self.waiting = Some(0.);
            animate(ctx, WALKING, false);
        } else {
            animate(ctx, WALKING, true);
        }
        BehaviorResult::Running
    }
}
