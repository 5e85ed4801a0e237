//! Blackboard keys shared by the enemy nodes.

use crate::{Lazy, Symbol};

/// The hostile currently being pursued.
pub static TARGET: Lazy<Symbol> = Lazy::new(|| "target".into());
/// Where the target was last seen before it was lost.
pub static LAST_KNOWN_POSITION: Lazy<Symbol> = Lazy::new(|| "lastKnownPosition".into());
pub static NOISE_POSITION: Lazy<Symbol> = Lazy::new(|| "noisePosition".into());
pub static NOISE_LEVEL: Lazy<Symbol> = Lazy::new(|| "noiseLevel".into());
