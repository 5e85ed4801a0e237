use crate::{
    context::{Context, DataContext, NodeId, TickEnv},
    error::{AddChildError, AddChildResult},
    BehaviorNode, BehaviorResult, Symbol, Value,
};
use log::{trace, warn};

/// What a node does when evaluated.
pub enum NodeKind {
    /// AND over the children. Stops at the first `Fail` but keeps going past
    /// `Running`, so later siblings still get their tick.
    Sequence,
    /// Priority fallback. The first child that does not fail decides.
    Selector,
    Leaf(Box<dyn BehaviorNode>),
}

impl NodeKind {
    pub fn leaf(node: impl BehaviorNode + 'static) -> Self {
        Self::Leaf(Box::new(node))
    }

    fn default_name(&self) -> &'static str {
        match self {
            Self::Sequence => "Sequence",
            Self::Selector => "Selector",
            Self::Leaf(_) => "Leaf",
        }
    }
}

struct NodeSlot {
    name: String,
    kind: NodeKind,
    children: Vec<NodeId>,
    last_result: Option<BehaviorResult>,
}

/// A behavior tree stored as a flat arena.
///
/// Nodes refer to each other by [`NodeId`]; the parent links live in the
/// [`DataContext`] together with each node's blackboard. The shape can only
/// grow by attaching new nodes, and a node's parent never changes.
#[derive(Default)]
pub struct BehaviorTree {
    nodes: Vec<NodeSlot>,
    data: DataContext,
    root: Option<NodeId>,
}

impl BehaviorTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root(&mut self, kind: NodeKind) -> AddChildResult<NodeId> {
        let name = kind.default_name();
        self.add_named(None, name, kind)
    }

    pub fn add_child(&mut self, parent: NodeId, kind: NodeKind) -> AddChildResult<NodeId> {
        let name = kind.default_name();
        self.add_named(Some(parent), name, kind)
    }

    /// Attaches a node under `parent`, or as the root if `parent` is `None`.
    pub fn add_named(
        &mut self,
        parent: Option<NodeId>,
        name: impl Into<String>,
        kind: NodeKind,
    ) -> AddChildResult<NodeId> {
        match parent {
            None if self.root.is_some() => return Err(AddChildError::RootExists),
            Some(parent) => match self.nodes.get(parent.0) {
                None => return Err(AddChildError::UnknownParent),
                Some(NodeSlot {
                    kind: NodeKind::Leaf(_),
                    ..
                }) => return Err(AddChildError::LeafNode),
                Some(_) => (),
            },
            None => (),
        }

        let id = self.data.attach(parent);
        self.nodes.push(NodeSlot {
            name: name.into(),
            kind,
            children: vec![],
            last_result: None,
        });
        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.root = Some(id),
        }
        Ok(id)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.data.parent(node)
    }

    /// Direct children in evaluation order.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not belong to this tree.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Name the node was created with.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not belong to this tree.
    pub fn name(&self, node: NodeId) -> &str {
        &self.nodes[node.0].name
    }

    /// Result of the node's most recent evaluation, if it was reached at all.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not belong to this tree.
    pub fn last_result(&self, node: NodeId) -> Option<BehaviorResult> {
        self.nodes[node.0].last_result
    }

    pub fn data(&self) -> &DataContext {
        &self.data
    }

    pub fn set_data(&mut self, node: NodeId, key: impl Into<Symbol>, value: impl Into<Value>) {
        self.data.set(node, key, value);
    }

    pub fn get_data(&self, node: NodeId, key: impl Into<Symbol>) -> Option<&Value> {
        self.data.get(node, key)
    }

    pub fn clear_data(&mut self, node: NodeId, key: impl Into<Symbol>) -> bool {
        self.data.clear(node, key)
    }

    pub fn clear_local(&mut self, node: NodeId) {
        self.data.clear_local(node);
    }

    /// Node ids in pre-order, starting from the root.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut ret = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            ret.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev());
        }
        ret
    }

    /// Clears every node's blackboard. The shape and the leaves' own state
    /// are left as they are.
    pub fn reset_all(&mut self) {
        for id in self.preorder() {
            self.data.clear_local(id);
        }
    }

    /// Keys that some node reads but no node in this tree ever writes.
    pub fn unbound_inputs(&self) -> Vec<Symbol> {
        let ports: Vec<_> = self
            .nodes
            .iter()
            .filter_map(|slot| match &slot.kind {
                NodeKind::Leaf(node) => Some(node.provided_ports()),
                _ => None,
            })
            .flatten()
            .collect();
        let mut ret = vec![];
        for port in ports.iter().filter(|port| port.reads()) {
            let written = ports.iter().any(|p| p.key == port.key && p.writes());
            if !written && !ret.contains(&port.key) {
                ret.push(port.key);
            }
        }
        ret
    }

    /// Walks the whole tree once from the root.
    pub fn evaluate(&mut self, env: &mut TickEnv) -> BehaviorResult {
        match self.root {
            Some(root) => self.tick_node(root, env),
            None => {
                warn!("Evaluating a behavior tree without a root");
                BehaviorResult::Fail
            }
        }
    }

    fn tick_node(&mut self, id: NodeId, env: &mut TickEnv) -> BehaviorResult {
        let res = match self.nodes[id.0].kind {
            NodeKind::Sequence => self.tick_sequence(id, env),
            NodeKind::Selector => self.tick_selector(id, env),
            NodeKind::Leaf(_) => self.tick_leaf(id, env),
        };
        let slot = &mut self.nodes[id.0];
        trace!("{}#{}: {:?}", slot.name, id.0, res);
        slot.last_result = Some(res);
        res
    }

    fn tick_sequence(&mut self, id: NodeId, env: &mut TickEnv) -> BehaviorResult {
        let mut running = false;
        for i in 0..self.nodes[id.0].children.len() {
            let child = self.nodes[id.0].children[i];
            match self.tick_node(child, env) {
                BehaviorResult::Fail => return BehaviorResult::Fail,
                BehaviorResult::Running => running = true,
                BehaviorResult::Success => (),
            }
        }
        if running {
            BehaviorResult::Running
        } else {
            BehaviorResult::Success
        }
    }

    fn tick_selector(&mut self, id: NodeId, env: &mut TickEnv) -> BehaviorResult {
        for i in 0..self.nodes[id.0].children.len() {
            let child = self.nodes[id.0].children[i];
            match self.tick_node(child, env) {
                BehaviorResult::Fail => (),
                res => return res,
            }
        }
        BehaviorResult::Fail
    }

    fn tick_leaf(&mut self, id: NodeId, env: &mut TickEnv) -> BehaviorResult {
        let Self { nodes, data, .. } = self;
        match &mut nodes[id.0].kind {
            NodeKind::Leaf(node) => {
                let mut ctx = Context::new(data, id, env);
                node.tick(&mut ctx)
            }
            _ => BehaviorResult::Fail,
        }
    }
}
