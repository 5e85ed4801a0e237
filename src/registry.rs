use crate::{
    config::EnemyConfig,
    enemy::{
        Attack, GoToLastKnownPosition, GoToNoise, GoToTarget, HearNoise, InAttackRange, IsShot,
        Patrol, Sensing, Shot, TrackTarget,
    },
    BehaviorNode,
};
use std::collections::HashMap;

pub type Constructor = Box<dyn Fn(&EnemyConfig) -> Box<dyn BehaviorNode>>;

pub fn boxify<T>(cons: impl (Fn(&EnemyConfig) -> T) + 'static) -> Constructor
where
    T: BehaviorNode + 'static,
{
    Box::new(move |config: &EnemyConfig| -> Box<dyn BehaviorNode> { Box::new(cons(config)) })
}

/// Maps leaf names used in tree sources to node constructors.
///
/// `Sequence`, `Selector` and `Fallback` are built into the loader and need
/// no entry here.
pub struct Registry {
    node_types: HashMap<String, Constructor>,
}

impl Default for Registry {
    /// A registry with every enemy node.
    fn default() -> Self {
        let mut ret = Self::empty();
        ret.register("IsShot", boxify(|_| IsShot));
        ret.register("Shot", boxify(|_| Shot));
        ret.register("InAttackRange", boxify(InAttackRange::new));
        ret.register("Attack", boxify(Attack::new));
        ret.register("Sensing", boxify(Sensing::new));
        ret.register("TrackTarget", boxify(TrackTarget::new));
        ret.register("GoToTarget", boxify(GoToTarget::new));
        ret.register("HearNoise", boxify(HearNoise::new));
        ret.register("GoToNoise", boxify(GoToNoise::new));
        ret.register("GoToLastKnownPosition", boxify(GoToLastKnownPosition::new));
        ret.register("Patrol", boxify(Patrol::new));
        ret
    }
}

impl Registry {
    pub fn empty() -> Self {
        Self {
            node_types: HashMap::new(),
        }
    }

    pub fn register(&mut self, type_name: impl ToString, constructor: Constructor) {
        self.node_types.insert(type_name.to_string(), constructor);
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.node_types.contains_key(type_name)
    }

    pub fn build(&self, type_name: &str, config: &EnemyConfig) -> Option<Box<dyn BehaviorNode>> {
        self.node_types
            .get(type_name)
            .map(|constructor| constructor(config))
    }
}
