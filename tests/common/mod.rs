#![allow(dead_code)]

use enemy_bt::{
    world::{AgentStatus, Animation, Combat, Layer, Navigation, Noise, Perception, Poses},
    AgentId, Point,
};
use cgmath::MetricSpace;
use std::collections::{HashMap, HashSet};

#[derive(Default, Debug, Clone)]
pub struct NavState {
    pub destination: Option<Point>,
    pub speed: f32,
    pub stopped: bool,
    pub pending: bool,
}

/// A scripted world: entities never move unless a test moves them.
#[derive(Default)]
pub struct MockWorld {
    pub positions: HashMap<AgentId, Point>,
    pub layers: HashMap<AgentId, Layer>,
    pub hidden: HashSet<AgentId>,
    /// Blocks every line of sight when set.
    pub wall: bool,
    pub noise: Option<Noise>,
    pub nav: HashMap<AgentId, NavState>,
    pub animator: HashMap<(AgentId, String), bool>,
    pub shot: HashSet<AgentId>,
    pub hp: HashMap<AgentId, u32>,
    pub hits: Vec<AgentId>,
}

impl MockWorld {
    pub fn spawn(&mut self, agent: AgentId, pos: Point, layer: Layer) {
        self.positions.insert(agent, pos);
        self.layers.insert(agent, layer);
    }

    pub fn destination(&self, agent: AgentId) -> Option<Point> {
        self.nav.get(&agent).and_then(|nav| nav.destination)
    }

    pub fn speed(&self, agent: AgentId) -> f32 {
        self.nav.get(&agent).map_or(0., |nav| nav.speed)
    }

    pub fn stopped(&self, agent: AgentId) -> bool {
        self.nav.get(&agent).map_or(false, |nav| nav.stopped)
    }

    pub fn anim(&self, agent: AgentId, param: &str) -> bool {
        self.animator
            .get(&(agent, param.to_owned()))
            .copied()
            .unwrap_or(false)
    }

    /// Teleports `agent` to its navigation destination.
    pub fn arrive(&mut self, agent: AgentId) {
        if let Some(dest) = self.destination(agent) {
            self.positions.insert(agent, dest);
        }
    }
}

impl Poses for MockWorld {
    fn position(&self, agent: AgentId) -> Option<Point> {
        self.positions.get(&agent).copied()
    }
}

impl Perception for MockWorld {
    fn overlap(&self, center: Point, radius: f32, layer: Layer) -> Vec<AgentId> {
        let mut hits: Vec<_> = self
            .positions
            .iter()
            .filter(|(id, pos)| {
                self.layers.get(*id).map_or(false, |l| l.contains(layer))
                    && pos.distance(center) <= radius
            })
            .map(|(id, _)| *id)
            .collect();
        hits.sort();
        hits
    }

    fn line_clear(&self, _from: Point, _to: Point) -> bool {
        !self.wall
    }

    fn is_hidden(&self, agent: AgentId) -> bool {
        self.hidden.contains(&agent)
    }

    fn heard_noise(&self, _listener: AgentId) -> Option<Noise> {
        self.noise
    }
}

impl Navigation for MockWorld {
    fn set_speed(&mut self, agent: AgentId, speed: f32) {
        self.nav.entry(agent).or_default().speed = speed;
    }

    fn set_destination(&mut self, agent: AgentId, destination: Point) {
        self.nav.entry(agent).or_default().destination = Some(destination);
    }

    fn stop(&mut self, agent: AgentId, stopped: bool) {
        self.nav.entry(agent).or_default().stopped = stopped;
    }

    fn remaining_distance(&self, agent: AgentId) -> f32 {
        match (self.position(agent), self.destination(agent)) {
            (Some(pos), Some(dest)) => pos.distance(dest),
            _ => 0.,
        }
    }

    fn path_pending(&self, agent: AgentId) -> bool {
        self.nav.get(&agent).map_or(false, |nav| nav.pending)
    }
}

impl Animation for MockWorld {
    fn set_bool(&mut self, agent: AgentId, param: &str, value: bool) {
        self.animator.insert((agent, param.to_owned()), value);
    }
}

impl AgentStatus for MockWorld {
    fn is_shot(&self, agent: AgentId) -> bool {
        self.shot.contains(&agent)
    }
}

impl Combat for MockWorld {
    fn apply_damage(&mut self, target: AgentId) -> bool {
        self.hits.push(target);
        let hp = self.hp.entry(target).or_insert(1);
        *hp = hp.saturating_sub(1);
        *hp == 0
    }
}
