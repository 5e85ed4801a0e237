use super::nom_parser::{parse_file, TreeDef, TreeSource};
use crate::{
    config::EnemyConfig, error::LoadError, BehaviorTree, NodeId, NodeKind, Registry,
};
use log::{info, warn};

/// Parses a whole tree source, rejecting anything left unparsed.
pub fn parse_source(src: &str) -> Result<TreeSource<'_>, LoadError> {
    let (rest, source) = parse_file(src).map_err(|e| LoadError::Parse(e.to_string()))?;
    if !rest.is_empty() {
        return Err(LoadError::Parse(rest.chars().take(40).collect()));
    }
    Ok(source)
}

/// Instantiates the `main` tree of `tree_source` into `tree` and returns
/// the new root.
///
/// A node name that is neither built in nor registered refers to another
/// tree in the same source, which is inlined in its place. Inlining keeps
/// the subtree's nodes in the parent's blackboard scope chain.
pub fn load(
    tree_source: &TreeSource<'_>,
    registry: &Registry,
    config: &EnemyConfig,
    tree: &mut BehaviorTree,
) -> Result<NodeId, LoadError> {
    let main = tree_source.find("main").ok_or(LoadError::MissingTree)?;

    let top = TreeStack {
        name: "main",
        parent: None,
    };

    let loader = Loader {
        tree_source,
        registry,
        config,
    };
    let root = loader.load_recurse(&main.root, None, tree, &top)?;

    info!("Loaded behavior tree with {} nodes", tree.len());
    for key in tree.unbound_inputs() {
        warn!("Blackboard key {:?} is read but never written", key);
    }
    Ok(root)
}

/// Subtree names currently being expanded, linked through the call stack.
/// A name that shows up twice means the source refers to itself.
struct TreeStack<'a, 'src> {
    name: &'src str,
    parent: Option<&'a TreeStack<'a, 'src>>,
}

impl<'a, 'src> TreeStack<'a, 'src> {
    fn find(&self, name: &str) -> bool {
        if self.name == name {
            true
        } else if let Some(parent) = self.parent {
            parent.find(name)
        } else {
            false
        }
    }
}

struct Loader<'a, 'src> {
    tree_source: &'a TreeSource<'src>,
    registry: &'a Registry,
    config: &'a EnemyConfig,
}

impl<'a, 'src> Loader<'a, 'src> {
    fn node_kind(&self, ty: &str) -> Option<NodeKind> {
        match ty {
            "Sequence" => Some(NodeKind::Sequence),
            "Selector" | "Fallback" => Some(NodeKind::Selector),
            _ => self.registry.build(ty, self.config).map(NodeKind::Leaf),
        }
    }

    fn load_recurse(
        &self,
        def: &TreeDef<'src>,
        parent: Option<NodeId>,
        tree: &mut BehaviorTree,
        parent_stack: &TreeStack,
    ) -> Result<NodeId, LoadError> {
        let Some(kind) = self.node_kind(def.ty) else {
            let subtree = self
                .tree_source
                .find(def.ty)
                .ok_or_else(|| LoadError::MissingNode(def.ty.to_owned()))?;

            if parent_stack.find(def.ty) {
                return Err(LoadError::InfiniteRecursion {
                    node: def.ty.to_owned(),
                });
            }
            if !def.children.is_empty() {
                return Err(LoadError::AddChildError(
                    crate::error::AddChildError::LeafNode,
                    def.ty.to_owned(),
                ));
            }
            let tree_stack = TreeStack {
                name: def.ty,
                parent: Some(parent_stack),
            };
            return self.load_recurse(&subtree.root, parent, tree, &tree_stack);
        };

        let parent_name = parent.map_or("<root>", |parent| tree.name(parent)).to_owned();
        let id = tree
            .add_named(parent, def.ty, kind)
            .map_err(|e| LoadError::AddChildError(e, parent_name))?;

        for child in &def.children {
            self.load_recurse(child, Some(id), tree, parent_stack)?;
        }

        Ok(id)
    }
}
