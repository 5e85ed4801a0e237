use crate::{
    world::{AgentId, Point},
    Symbol,
};
use std::collections::HashMap;

/// A value stored in a blackboard.
///
/// Blackboards in this crate hold a closed set of types instead of
/// `Box<dyn Any>`, so reading a key is a match instead of a downcast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Agent(AgentId),
    Point(Point),
    Bool(bool),
    Float(f32),
}

impl Value {
    pub fn as_agent(&self) -> Option<AgentId> {
        match self {
            Self::Agent(agent) => Some(*agent),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<Point> {
        match self {
            Self::Point(point) => Some(*point),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl From<AgentId> for Value {
    fn from(agent: AgentId) -> Self {
        Self::Agent(agent)
    }
}

impl From<Point> for Value {
    fn from(point: Point) -> Self {
        Self::Point(point)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Self::Float(f)
    }
}

/// Local key-value storage owned by a single node.
pub type Blackboard = HashMap<Symbol, Value>;
