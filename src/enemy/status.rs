use super::{animate, ATTACKING, RUNNING, WALKING};
use crate::{
    keys::{LAST_KNOWN_POSITION, NOISE_POSITION, TARGET},
    BehaviorNode, BehaviorResult, Context,
};
use log::debug;

/// Succeeds while the host flags this agent as shot, dropping whatever it
/// was hunting. Lets the agent move again otherwise.
pub struct IsShot;

impl BehaviorNode for IsShot {
    fn tick(&mut self, ctx: &mut Context) -> BehaviorResult {
        if ctx.paused() {
            return BehaviorResult::Fail;
        }
        let agent = ctx.agent();
        if ctx.world().is_shot(agent) {
            let dropped = ctx.clear(*TARGET);
            ctx.clear(*LAST_KNOWN_POSITION);
            ctx.clear(*NOISE_POSITION);
            debug!("{:?} is shot (dropped target: {})", agent, dropped);
            BehaviorResult::Success
        } else {
            ctx.world_mut().stop(agent, false);
            BehaviorResult::Fail
        }
    }
}

/// Holds the agent in place with all motion animations off.
///
/// Never finishes: a sequence holding it stays `Running` until the host
/// resets the agent.
pub struct Shot;

impl BehaviorNode for Shot {
    fn tick(&mut self, ctx: &mut Context) -> BehaviorResult {
        if ctx.paused() {
            return BehaviorResult::Running;
        }
        let agent = ctx.agent();
        ctx.world_mut().stop(agent, true);
        animate(ctx, WALKING, false);
        animate(ctx, RUNNING, false);
        animate(ctx, ATTACKING, false);
        BehaviorResult::Running
    }
}
