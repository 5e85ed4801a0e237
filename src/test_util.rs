use crate::{
    world::{AgentId, AgentStatus, Animation, Combat, Layer, Navigation, Noise, Perception, Point, Poses},
    BehaviorNode, BehaviorResult, Context, TickEnv,
};
use std::{cell::RefCell, rc::Rc};

/// A world where nothing exists and every command is ignored.
pub(crate) struct NullWorld;

impl Poses for NullWorld {
    fn position(&self, _agent: AgentId) -> Option<Point> {
        None
    }
}

impl Perception for NullWorld {
    fn overlap(&self, _center: Point, _radius: f32, _layer: Layer) -> Vec<AgentId> {
        vec![]
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

impl Navigation for NullWorld {
    fn set_speed(&mut self, _agent: AgentId, _speed: f32) {}
    fn set_destination(&mut self, _agent: AgentId, _destination: Point) {}
    fn stop(&mut self, _agent: AgentId, _stopped: bool) {}

    fn remaining_distance(&self, _agent: AgentId) -> f32 {
        0.
    }

    fn path_pending(&self, _agent: AgentId) -> bool {
        false
    }
}

impl Animation for NullWorld {
    fn set_bool(&mut self, _agent: AgentId, _param: &str, _value: bool) {}
}

impl AgentStatus for NullWorld {
    fn is_shot(&self, _agent: AgentId) -> bool {
        false
    }
}

impl Combat for NullWorld {
    fn apply_damage(&mut self, _target: AgentId) -> bool {
        false
    }
}

pub(crate) fn env(world: &mut NullWorld) -> TickEnv {
    TickEnv {
        world,
        agent: AgentId(0),
        delta: 0.1,
        paused: false,
    }
}

pub(crate) type Log = Rc<RefCell<Vec<&'static str>>>;

/// Appends its label to a shared log and returns a fixed result.
pub(crate) struct Record {
    pub label: &'static str,
    pub result: BehaviorResult,
    pub log: Log,
}

impl Record {
    pub fn new(label: &'static str, result: BehaviorResult, log: &Log) -> Self {
        Self {
            label,
            result,
            log: log.clone(),
        }
    }
}

impl BehaviorNode for Record {
    fn tick(&mut self, _ctx: &mut Context) -> BehaviorResult {
        self.log.borrow_mut().push(self.label);
        self.result
    }
}
