use std::fmt::{self, Display, Formatter};

#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum AddChildError {
    /// Leaf nodes cannot own children.
    LeafNode,
    /// The tree already has a root.
    RootExists,
    UnknownParent,
}

impl Display for AddChildError {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match self {
            Self::LeafNode => write!(fmt, "Attempted to add a child to a leaf node"),
            Self::RootExists => write!(fmt, "The tree already has a root node"),
            Self::UnknownParent => write!(fmt, "Parent node does not belong to this tree"),
        }
    }
}

impl std::error::Error for AddChildError {}

pub type AddChildResult<T> = Result<T, AddChildError>;

#[derive(Debug)]
#[non_exhaustive]
pub enum LoadError {
    /// The source text could not be parsed; carries the unparsed remainder.
    Parse(String),
    MissingTree,
    MissingNode(String),
    InfiniteRecursion { node: String },
    AddChildError(AddChildError, String),
    AlreadyBuilt,
}

impl Display for LoadError {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match self {
            Self::Parse(rest) => write!(fmt, "Parse error near {:?}", rest),
            Self::MissingTree => write!(fmt, "The main tree does not exist"),
            Self::MissingNode(node) => {
                write!(fmt, "Node type or subtree name not found {:?}", node)
            }
            Self::InfiniteRecursion { node } => {
                write!(fmt, "Subtree {:?} refers to itself", node)
            }
            Self::AddChildError(e, node) => {
                e.fmt(fmt)?;
                write!(fmt, " to {}", node)
            }
            Self::AlreadyBuilt => write!(fmt, "The behavior tree was already built"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::AddChildError(e, _) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Yaml(serde_yaml::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match self {
            Self::Yaml(e) => e.fmt(fmt),
            Self::Invalid(msg) => write!(fmt, "Invalid enemy config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Yaml(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err)
    }
}
