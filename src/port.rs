use crate::Symbol;

/// Direction of data flow between a node and the blackboard.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PortType {
    Input,
    Output,
    InOut,
}

impl PortType {
    pub fn reads(self) -> bool {
        self != Self::Output
    }

    pub fn writes(self) -> bool {
        self != Self::Input
    }
}

/// Declares that a node touches a blackboard key.
///
/// Ports are not enforced while ticking; they only feed load-time checks
/// such as [`crate::BehaviorTree::unbound_inputs`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct PortSpec {
    pub ty: PortType,
    pub key: Symbol,
}

impl PortSpec {
    pub fn new(ty: PortType, key: impl Into<Symbol>) -> Self {
        Self {
            ty,
            key: key.into(),
        }
    }

    pub fn new_in(key: impl Into<Symbol>) -> Self {
        Self::new(PortType::Input, key)
    }

    pub fn new_out(key: impl Into<Symbol>) -> Self {
        Self::new(PortType::Output, key)
    }

    pub fn new_inout(key: impl Into<Symbol>) -> Self {
        Self::new(PortType::InOut, key)
    }

    pub fn reads(&self) -> bool {
        self.ty.reads()
    }

    pub fn writes(&self) -> bool {
        self.ty.writes()
    }
}
