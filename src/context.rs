use crate::{
    world::{AgentId, World},
    Blackboard, Symbol, Value,
};

/// Arena index of a node in a [`crate::BehaviorTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Per-node blackboards plus the parent links needed for scoped lookup.
///
/// Lookups start at the given node and walk towards the root, so a value set
/// on an ancestor is visible to its whole subtree until something closer
/// shadows or clears it.
#[derive(Default, Debug)]
pub struct DataContext {
    parents: Vec<Option<NodeId>>,
    boards: Vec<Blackboard>,
}

impl DataContext {
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// Allocates a slot for a new node. The parent link is fixed from here on.
    pub(crate) fn attach(&mut self, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.boards.len());
        self.parents.push(parent);
        self.boards.push(Blackboard::new());
        id
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parents.get(node.0).copied().flatten()
    }

    /// Walks up `levels` parents, stopping early at the root.
    pub fn ancestor(&self, node: NodeId, levels: usize) -> NodeId {
        let mut cur = node;
        for _ in 0..levels {
            match self.parent(cur) {
                Some(parent) => cur = parent,
                None => break,
            }
        }
        cur
    }

    fn scope_chain(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(node), move |cur| self.parent(*cur))
    }

    /// The blackboard of `node` alone, without its ancestors.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not belong to this context.
    pub fn local(&self, node: NodeId) -> &Blackboard {
        &self.boards[node.0]
    }

    /// Writes into the blackboard of `node` itself.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not belong to this context.
    pub fn set(&mut self, node: NodeId, key: impl Into<Symbol>, value: impl Into<Value>) {
        self.boards[node.0].insert(key.into(), value.into());
    }

    /// Nearest value for `key`, searching `node` first and then its ancestors.
    pub fn get(&self, node: NodeId, key: impl Into<Symbol>) -> Option<&Value> {
        let key = key.into();
        let holder = self
            .scope_chain(node)
            .find(|id| self.boards[id.0].contains_key(&key))?;
        self.boards[holder.0].get(&key)
    }

    /// Removes the nearest occurrence of `key`. Farther ancestors holding the
    /// same key are left alone.
    pub fn clear(&mut self, node: NodeId, key: impl Into<Symbol>) -> bool {
        let key = key.into();
        let holder = self
            .scope_chain(node)
            .find(|id| self.boards[id.0].contains_key(&key));
        match holder {
            Some(holder) => self.boards[holder.0].remove(&key).is_some(),
            None => false,
        }
    }

    /// Wipes only the blackboard of `node` itself.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not belong to this context.
    pub fn clear_local(&mut self, node: NodeId) {
        self.boards[node.0].clear();
    }
}

/// What the host hands to a tree for one tick.
pub struct TickEnv<'w> {
    pub world: &'w mut dyn World,
    pub agent: AgentId,
    pub delta: f32,
    pub paused: bool,
}

/// The view a leaf node gets of the tree and the world while it ticks.
pub struct Context<'a, 'w> {
    data: &'a mut DataContext,
    node: NodeId,
    env: &'a mut TickEnv<'w>,
}

impl<'a, 'w> Context<'a, 'w> {
    pub(crate) fn new(data: &'a mut DataContext, node: NodeId, env: &'a mut TickEnv<'w>) -> Self {
        Self { data, node, env }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn agent(&self) -> AgentId {
        self.env.agent
    }

    pub fn delta(&self) -> f32 {
        self.env.delta
    }

    pub fn paused(&self) -> bool {
        self.env.paused
    }

    pub fn world(&self) -> &(dyn World + 'w) {
        &*self.env.world
    }

    pub fn world_mut(&mut self) -> &mut (dyn World + 'w) {
        &mut *self.env.world
    }

    pub fn get(&self, key: impl Into<Symbol>) -> Option<&Value> {
        self.data.get(self.node, key)
    }

    /// Writes into this node's own blackboard.
    pub fn set(&mut self, key: impl Into<Symbol>, value: impl Into<Value>) {
        self.data.set(self.node, key, value);
    }

    /// Writes into the grandparent's blackboard, the scope shared by the
    /// sibling branches under it. Shallow trees clamp at the root.
    pub fn set_shared(&mut self, key: impl Into<Symbol>, value: impl Into<Value>) {
        let scope = self.data.ancestor(self.node, 2);
        self.data.set(scope, key, value);
    }

    pub fn clear(&mut self, key: impl Into<Symbol>) -> bool {
        self.data.clear(self.node, key)
    }
}
