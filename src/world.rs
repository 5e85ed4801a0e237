//! Capabilities the host simulation lends to the behavior tree.
//!
//! Nothing here is implemented by this crate. A game engine (or a test
//! double) implements these traits and passes itself into every tick through
//! [`crate::TickEnv`]. Every query is keyed by [`AgentId`], so one world
//! object can serve any number of agents.

use cgmath::Point3;

/// World-space position.
pub type Point = Point3<f32>;

/// Identity of an agent or any other tracked entity in the host world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub u32);

/// Bitmask selecting which classification layers a spatial query hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layer(pub u32);

impl Layer {
    pub fn contains(self, other: Layer) -> bool {
        self.0 & other.0 != 0
    }
}

/// A sound emitted somewhere in the world, as heard by one listener.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Noise {
    pub position: Point,
    /// How far the sound carries, in world units.
    pub level: f32,
}

pub trait Poses {
    /// Current position of `agent`, or `None` if it no longer exists.
    fn position(&self, agent: AgentId) -> Option<Point>;
}

pub trait Perception {
    /// Entities on `layer` inside the sphere of `radius` around `center`.
    fn overlap(&self, center: Point, radius: f32, layer: Layer) -> Vec<AgentId>;

    /// `true` if nothing on the obstruction layer lies between the two points.
    fn line_clear(&self, from: Point, to: Point) -> bool;

    /// `true` if `agent` is concealed (e.g. inside a locker).
    fn is_hidden(&self, agent: AgentId) -> bool;

    /// The sound `listener` should react to this tick, if any.
    fn heard_noise(&self, listener: AgentId) -> Option<Noise>;
}

pub trait Navigation {
    fn set_speed(&mut self, agent: AgentId, speed: f32);
    fn set_destination(&mut self, agent: AgentId, destination: Point);
    fn stop(&mut self, agent: AgentId, stopped: bool);
    fn remaining_distance(&self, agent: AgentId) -> f32;
    fn path_pending(&self, agent: AgentId) -> bool;
}

/// Fire-and-forget sink for animator parameters.
pub trait Animation {
    fn set_bool(&mut self, agent: AgentId, param: &str, value: bool);
}

pub trait AgentStatus {
    /// `true` while `agent` is incapacitated by a hit.
    fn is_shot(&self, agent: AgentId) -> bool;
}

pub trait Combat {
    /// Deals one unit of damage to `target`; returns whether it is now dead.
    fn apply_damage(&mut self, target: AgentId) -> bool;
}

/// Everything a tree may touch while ticking.
pub trait World: Poses + Perception + Navigation + Animation + AgentStatus + Combat {}

impl<T> World for T where T: Poses + Perception + Navigation + Animation + AgentStatus + Combat {}

/// Per-tick input from the host loop.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    /// Seconds elapsed since the previous tick.
    pub delta: f32,
    /// Simulation-wide pause flag.
    pub paused: bool,
}

impl Frame {
    pub fn new(delta: f32) -> Self {
        Self {
            delta,
            paused: false,
        }
    }

    pub fn paused() -> Self {
        Self {
            delta: 0.,
            paused: true,
        }
    }
}
