use crate::{
    error::LoadError,
    world::{AgentId, Frame, World},
    BehaviorResult, BehaviorTree, NodeId, TickEnv,
};
use log::{info, warn};

/// Something that can lay out the nodes of a tree.
pub trait Composition {
    /// Adds the whole composition to the empty `tree` and returns its root.
    fn build(&self, tree: &mut BehaviorTree) -> Result<NodeId, LoadError>;
}

impl<F> Composition for F
where
    F: Fn(&mut BehaviorTree) -> Result<NodeId, LoadError>,
{
    fn build(&self, tree: &mut BehaviorTree) -> Result<NodeId, LoadError> {
        self(tree)
    }
}

/// Drives the behavior tree of one agent.
///
/// A brain starts out unbuilt. [`Brain::build`] lays out its tree exactly
/// once; from then on every [`Brain::tick`] walks the tree from the root.
pub struct Brain {
    agent: AgentId,
    tree: Option<BehaviorTree>,
}

impl Brain {
    pub fn new(agent: AgentId) -> Self {
        Self { agent, tree: None }
    }

    pub fn agent(&self) -> AgentId {
        self.agent
    }

    pub fn is_built(&self) -> bool {
        self.tree.is_some()
    }

    pub fn build(&mut self, composition: &dyn Composition) -> Result<NodeId, LoadError> {
        if self.tree.is_some() {
            return Err(LoadError::AlreadyBuilt);
        }
        let mut tree = BehaviorTree::new();
        let root = composition.build(&mut tree)?;
        info!("{:?}: built behavior tree ({} nodes)", self.agent, tree.len());
        self.tree = Some(tree);
        Ok(root)
    }

    pub fn tree(&self) -> Option<&BehaviorTree> {
        self.tree.as_ref()
    }

    pub fn tree_mut(&mut self) -> Option<&mut BehaviorTree> {
        self.tree.as_mut()
    }

    /// Evaluates the tree once. Returns `None` until the brain is built.
    pub fn tick(&mut self, world: &mut dyn World, frame: Frame) -> Option<BehaviorResult> {
        let Some(tree) = self.tree.as_mut() else {
            warn!("{:?}: tick before build", self.agent);
            return None;
        };
        let mut env = TickEnv {
            world,
            agent: self.agent,
            delta: frame.delta,
            paused: frame.paused,
        };
        Some(tree.evaluate(&mut env))
    }

    /// Forgets everything the tree has learned, keeping its shape.
    pub fn reset_all(&mut self) {
        if let Some(tree) = self.tree.as_mut() {
            tree.reset_all();
            info!("{:?}: behavior tree data reset", self.agent);
        }
    }
}
