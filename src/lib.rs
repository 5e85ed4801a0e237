//! # enemy-bt (Rust crate)
//!
//! A behavior tree runtime for game enemies, with blackboards scoped along
//! the tree.
//!
//!
//! ## Overview
//!
//! Every enemy owns a [`Brain`], which holds one [`BehaviorTree`].
//! The host game calls [`Brain::tick`] once per frame, and the tree is walked
//! from the root each time.
//! There are only two composite nodes:
//!
//! * `Sequence` ticks its children in order and stops at the first `Fail`.
//!   A `Running` child does *not* stop it; later siblings still get ticked.
//! * `Selector` (also spelled `Fallback`) ticks its children in order and
//!   returns the first result that is not `Fail`.
//!
//! Everything else is a leaf implementing [`BehaviorNode`].
//! Leaves never see the game engine directly. They talk to it through the
//! [`World`] traits, which the host implements.
//!
//!
//! ## How it looks like
//!
//! Build a brain for an agent from a config and tick it every frame.
//!
//! ```rust
//! use ::enemy_bt::{Brain, EnemyComposition, EnemyConfig, AgentId};
//!
//! let mut brain = Brain::new(AgentId(7));
//! brain.build(&EnemyComposition::new(EnemyConfig::default()))?;
//! assert!(brain.is_built());
//! # Ok::<(), enemy_bt::error::LoadError>(())
//! ```
//!
//! Ticking needs something implementing [`World`]:
//!
//! ```ignore
//! let result = brain.tick(&mut world, Frame::new(delta_seconds));
//! ```
//!
//! `tick` returns `None` until the brain is built.
//!
//!
//! ## Blackboard scoping
//!
//! Every node in the tree has its own blackboard.
//! Reading a key looks at the node's own blackboard first, then at its
//! parent's, and so on up to the root.
//! Clearing a key removes it from the nearest blackboard that has it, and
//! only from that one.
//!
//! [`Context::set`] writes to the ticking node itself.
//! [`Context::set_shared`] writes two levels up, which for a leaf directly
//! under a `Sequence` under the root `Selector` is the root.
//! That is how a decision in one branch hands its findings to the other
//! branches.
//!
//! [`BehaviorTree::reset_all`] empties every blackboard, keeping the shape of
//! the tree.
//!
//!
//! ## How to define your own node
//!
//! Implement [`BehaviorNode`].
//! Blackboard keys are [`Symbol`]s, interned strings that compare by address.
//! `Lazy` is re-exported from `once_cell` to cache them on first use.
//!
//! ```rust
//! use ::enemy_bt::{
//!     BehaviorNode, BehaviorResult, Context, Lazy, PortSpec, Symbol, Value,
//! };
//!
//! struct IsAlarmed;
//!
//! impl BehaviorNode for IsAlarmed {
//!     fn provided_ports(&self) -> Vec<PortSpec> {
//!         vec![PortSpec::new_in("alarm")]
//!     }
//!
//!     fn tick(&mut self, ctx: &mut Context) -> BehaviorResult {
//!         static ALARM: Lazy<Symbol> = Lazy::new(|| "alarm".into());
//!         if ctx.paused() {
//!             return BehaviorResult::Fail;
//!         }
//!         match ctx.get(*ALARM).and_then(Value::as_bool) {
//!             Some(true) => BehaviorResult::Success,
//!             _ => BehaviorResult::Fail,
//!         }
//!     }
//! }
//! ```
//!
//! `provided_ports` is optional. The loader uses it to warn about keys that
//! some node reads but no node writes.
//!
//! A node becomes available to tree sources once it is registered.
//! The constructor gets the enemy's [`EnemyConfig`].
//!
//! ```rust
//! # use ::enemy_bt::*;
//! # struct IsAlarmed;
//! # impl BehaviorNode for IsAlarmed { fn tick(&mut self, _: &mut Context) -> BehaviorResult { BehaviorResult::Fail }}
//! let mut registry = Registry::default();
//! registry.register("IsAlarmed", boxify(|_| IsAlarmed));
//! ```
//!
//!
//! ## The tree source format
//!
//! ```raw
//! # A line comment starts with a hash.
//! tree main = Selector {
//!     Sequence {
//!         IsShot
//!         Shot
//!     }
//!     chase
//!     Patrol
//! }
//!
//! tree chase = Sequence {
//!     Sensing
//!     TrackTarget
//!     GoToTarget
//! }
//! ```
//!
//! The tree named `main` is the root.
//! A node name that is not a composite and not registered refers to another
//! tree in the same source, and that tree is inlined in its place.
//! Inlined nodes take part in the scope chain of where they are inlined, so
//! the `chase` subtree above shares the root's blackboard.
//! A subtree that refers back to itself is a load error.
//!
//! [`DEFAULT_ENEMY_TREE`] is the stock enemy. In priority order it
//! investigates noise, reacts to being shot, attacks, chases, checks the last
//! known position and finally patrols.
//! An [`EnemyConfig`] can carry its own `tree` source to replace it.
//!
//! ```raw
//! tree = "tree" identifier "=" node
//!
//! node = identifier [ "{" node* "}" ]
//! ```

pub mod brain;
pub mod config;
mod context;
pub mod enemy;
pub mod error;
pub mod keys;
pub mod parser;
mod port;
mod registry;
mod symbol;
mod tree;
mod value;
pub mod world;

#[cfg(test)]
pub(crate) mod test_util;

pub use crate::{
    brain::{Brain, Composition},
    config::EnemyConfig,
    context::{Context, DataContext, NodeId, TickEnv},
    enemy::{EnemyComposition, DEFAULT_ENEMY_TREE},
    parser::{load, parse_file, parse_source},
    port::{PortSpec, PortType},
    registry::{boxify, Constructor, Registry},
    symbol::Symbol,
    tree::{BehaviorTree, NodeKind},
    value::{Blackboard, Value},
    world::{AgentId, Frame, Point, World},
};
pub use ::once_cell::sync::Lazy;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum BehaviorResult {
    Success,
    Fail,
    /// The node should keep running in the next tick
    Running,
}

pub trait BehaviorNode {
    /// Blackboard keys this node reads or writes.
    fn provided_ports(&self) -> Vec<PortSpec> {
        vec![]
    }

    fn tick(&mut self, ctx: &mut Context) -> BehaviorResult;
}
