//! Decision and action nodes of the stalking enemy, and its default
//! composition.
//!
//! Decisions run first in their branch and write what they learn into the
//! scope two levels up (see [`Context::set_shared`]), which in the default
//! composition is the root selector. Every branch below the root can
//! therefore read `target`, `lastKnownPosition` and the noise keys no matter
//! which branch wrote them.
//!
//! All nodes check the pause flag before anything else. A paused decision
//! fails and a paused action keeps running, and neither touches the world or
//! the blackboard.

mod combat;
mod movement;
mod noise;
mod perception;
mod status;

pub use self::{
    combat::{Attack, InAttackRange},
    movement::{GoToLastKnownPosition, GoToTarget, Patrol},
    noise::{GoToNoise, HearNoise},
    perception::{Sensing, TrackTarget},
    status::{IsShot, Shot},
};

use crate::{
    brain::Composition,
    config::EnemyConfig,
    error::LoadError,
    keys::TARGET,
    parser::{load, parse_source},
    registry::Registry,
    world::{AgentId, Point},
    BehaviorTree, Context, NodeId, Value,
};

pub const WALKING: &str = "walking";
pub const RUNNING: &str = "running";
pub const ATTACKING: &str = "attacking";

/// Priority list of the enemy's behaviors. The first branch that does not
/// fail owns the tick.
pub const DEFAULT_ENEMY_TREE: &str = r#"
tree main = Selector {
    # HearNoise fails while a target is known
    Sequence {
        HearNoise
        GoToNoise
    }
    Sequence {
        IsShot
        Shot
    }
    Sequence {
        InAttackRange
        Attack
    }
    chase
    GoToLastKnownPosition
    Patrol
}

tree chase = Sequence {
    Sensing
    TrackTarget
    GoToTarget
}
"#;

/// Builds an enemy tree from its config: the config's own `tree` source if it
/// has one, [`DEFAULT_ENEMY_TREE`] otherwise.
pub struct EnemyComposition {
    config: EnemyConfig,
    registry: Registry,
}

impl EnemyComposition {
    pub fn new(config: EnemyConfig) -> Self {
        Self {
            config,
            registry: Registry::default(),
        }
    }

    pub fn with_registry(config: EnemyConfig, registry: Registry) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &EnemyConfig {
        &self.config
    }
}

impl Composition for EnemyComposition {
    fn build(&self, tree: &mut BehaviorTree) -> Result<NodeId, LoadError> {
        let src = self.config.tree.as_deref().unwrap_or(DEFAULT_ENEMY_TREE);
        let source = parse_source(src)?;
        load(&source, &self.registry, &self.config, tree)
    }
}

fn target(ctx: &Context) -> Option<AgentId> {
    ctx.get(*TARGET).and_then(Value::as_agent)
}

fn own_position(ctx: &Context) -> Option<Point> {
    ctx.world().position(ctx.agent())
}

fn move_to(ctx: &mut Context, destination: Point, speed: f32) {
    let agent = ctx.agent();
    let world = ctx.world_mut();
    world.stop(agent, false);
    world.set_speed(agent, speed);
    world.set_destination(agent, destination);
}

fn arrived(ctx: &Context, epsilon: f32) -> bool {
    let agent = ctx.agent();
    let world = ctx.world();
    !world.path_pending(agent) && world.remaining_distance(agent) <= epsilon
}

fn animate(ctx: &mut Context, param: &str, value: bool) {
    let agent = ctx.agent();
    ctx.world_mut().set_bool(agent, param, value);
}
