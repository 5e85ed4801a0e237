//! Runs one enemy against a player walking in and out of its sight.
//!
//! `cargo run --example chase [config.yaml]`

use ::enemy_bt::{
    world::{AgentStatus, Animation, Combat, Layer, Navigation, Noise, Perception, Poses},
    AgentId, Brain, EnemyComposition, EnemyConfig, Frame, Point,
};
use cgmath::{InnerSpace, MetricSpace};
use std::{collections::HashMap, fs};

const ENEMY: AgentId = AgentId(1);
const PLAYER: AgentId = AgentId(2);

struct Body {
    pos: Point,
    destination: Option<Point>,
    speed: f32,
    stopped: bool,
}

impl Body {
    fn at(pos: Point) -> Self {
        Self {
            pos,
            destination: None,
            speed: 0.,
            stopped: false,
        }
    }

    fn step(&mut self, delta: f32) {
        let Some(dest) = self.destination.filter(|_| !self.stopped) else {
            return;
        };
        let offset = dest - self.pos;
        let step = self.speed * delta;
        if offset.magnitude() <= step {
            self.pos = dest;
        } else {
            self.pos += offset.normalize() * step;
        }
    }
}

struct Arena {
    bodies: HashMap<AgentId, Body>,
    player_hp: u32,
}

impl Poses for Arena {
    fn position(&self, agent: AgentId) -> Option<Point> {
        self.bodies.get(&agent).map(|body| body.pos)
    }
}

impl Perception for Arena {
    fn overlap(&self, center: Point, radius: f32, layer: Layer) -> Vec<AgentId> {
        if !layer.contains(Layer(1)) {
            return vec![];
        }
        self.position(PLAYER)
            .filter(|pos| pos.distance(center) <= radius)
            .map(|_| PLAYER)
            .into_iter()
            .collect()
    }

    fn line_clear(&self, _from: Point, _to: Point) -> bool {
        true
    }

    fn is_hidden(&self, _agent: AgentId) -> bool {
        false
    }

    fn heard_noise(&self, _listener: AgentId) -> Option<Noise> {
        None
    }
}

impl Navigation for Arena {
    fn set_speed(&mut self, agent: AgentId, speed: f32) {
        if let Some(body) = self.bodies.get_mut(&agent) {
            body.speed = speed;
        }
    }

    fn set_destination(&mut self, agent: AgentId, destination: Point) {
        if let Some(body) = self.bodies.get_mut(&agent) {
            body.destination = Some(destination);
        }
    }

    fn stop(&mut self, agent: AgentId, stopped: bool) {
        if let Some(body) = self.bodies.get_mut(&agent) {
            body.stopped = stopped;
        }
    }

    fn remaining_distance(&self, agent: AgentId) -> f32 {
        self.bodies
            .get(&agent)
            .and_then(|body| body.destination.map(|dest| dest.distance(body.pos)))
            .unwrap_or(0.)
    }

    fn path_pending(&self, _agent: AgentId) -> bool {
        false
    }
}

impl Animation for Arena {
    fn set_bool(&mut self, _agent: AgentId, _param: &str, _value: bool) {}
}

impl AgentStatus for Arena {
    fn is_shot(&self, _agent: AgentId) -> bool {
        false
    }
}

impl Combat for Arena {
    fn apply_damage(&mut self, _target: AgentId) -> bool {
        self.player_hp = self.player_hp.saturating_sub(1);
        println!("  player hit, hp {}", self.player_hp);
        self.player_hp == 0
    }
}

fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => EnemyConfig::from_yaml(&fs::read_to_string(path)?)?,
        None => EnemyConfig {
            waypoints: vec![[0., 0., 0.], [4., 0., 0.]],
            ..EnemyConfig::default()
        },
    };

    let mut arena = Arena {
        bodies: HashMap::new(),
        player_hp: 3,
    };
    arena.bodies.insert(ENEMY, Body::at(Point::new(0., 0., 0.)));
    arena.bodies.insert(PLAYER, Body::at(Point::new(12., 0., 0.)));

    let mut brain = Brain::new(ENEMY);
    brain.build(&EnemyComposition::new(config))?;

    let delta = 0.25;
    for frame in 0..80 {
        // The player strolls towards the enemy's patrol route.
        if let Some(player) = arena.bodies.get_mut(&PLAYER) {
            if player.pos.x > 2. {
                player.pos.x -= 0.1;
            }
        }

        let result = brain.tick(&mut arena, Frame::new(delta));
        if let Some(enemy) = arena.bodies.get_mut(&ENEMY) {
            enemy.step(delta);
            println!("{:3}: {:?} enemy at {:.2}", frame, result, enemy.pos.x);
        }
        if arena.player_hp == 0 {
            println!("player is down");
            arena.bodies.remove(&PLAYER);
            break;
        }
    }
    Ok(())
}
