mod common;

use common::MockWorld;
use enemy_bt::{
    enemy::{ATTACKING, RUNNING, WALKING},
    world::{Layer, Noise},
    AgentId, BehaviorResult, Brain, EnemyComposition, EnemyConfig, Frame, NodeId, Point, Symbol,
    Value,
};

const ENEMY: AgentId = AgentId(1);
const PLAYER: AgentId = AgentId(2);
const HOSTILE: Layer = Layer(1);
const NEUTRAL: Layer = Layer(2);

fn spawn_enemy(world: &mut MockWorld, config: EnemyConfig) -> anyhow::Result<(Brain, NodeId)> {
    world.spawn(ENEMY, Point::new(0., 0., 0.), NEUTRAL);
    let mut brain = Brain::new(ENEMY);
    let root = brain.build(&EnemyComposition::new(config))?;
    Ok((brain, root))
}

fn tick(brain: &mut Brain, world: &mut MockWorld, delta: f32) -> Option<BehaviorResult> {
    brain.tick(world, Frame::new(delta))
}

fn root_data(brain: &Brain, root: NodeId, key: &str) -> Option<Value> {
    brain.tree()?.get_data(root, key).copied()
}

#[test]
fn patrol_waits_at_each_waypoint() -> anyhow::Result<()> {
    let mut world = MockWorld::default();
    let config = EnemyConfig {
        waypoints: vec![[0., 0., 0.], [5., 0., 0.]],
        ..EnemyConfig::default()
    };
    let (mut brain, _) = spawn_enemy(&mut world, config)?;

    // Already standing on the first waypoint, so the dwell starts at once.
    assert_eq!(
        tick(&mut brain, &mut world, 0.25),
        Some(BehaviorResult::Running)
    );
    assert_eq!(world.destination(ENEMY), Some(Point::new(0., 0., 0.)));
    assert!(!world.anim(ENEMY, WALKING));

    for _ in 0..4 {
        assert_eq!(
            tick(&mut brain, &mut world, 0.25),
            Some(BehaviorResult::Running)
        );
        assert_eq!(world.destination(ENEMY), Some(Point::new(0., 0., 0.)));
    }

    tick(&mut brain, &mut world, 0.25);
    assert_eq!(world.destination(ENEMY), Some(Point::new(5., 0., 0.)));
    assert_eq!(world.speed(ENEMY), 2.);
    assert!(world.anim(ENEMY, WALKING));
    Ok(())
}

#[test]
fn sensing_shares_target_with_root() -> anyhow::Result<()> {
    let mut world = MockWorld::default();
    let (mut brain, root) = spawn_enemy(&mut world, EnemyConfig::default())?;
    world.spawn(PLAYER, Point::new(3., 0., 0.), HOSTILE);

    assert_eq!(
        tick(&mut brain, &mut world, 0.1),
        Some(BehaviorResult::Running)
    );
    let tree = brain.tree().unwrap();
    assert_eq!(
        tree.data().local(root).get(&Symbol::from("target")),
        Some(&Value::Agent(PLAYER))
    );
    assert_eq!(world.destination(ENEMY), Some(Point::new(3., 0., 0.)));
    assert_eq!(world.speed(ENEMY), 4.);
    assert!(world.anim(ENEMY, RUNNING));
    Ok(())
}

#[test]
fn sensing_ignores_far_and_hidden_hostiles() -> anyhow::Result<()> {
    let mut world = MockWorld::default();
    let (mut brain, root) = spawn_enemy(&mut world, EnemyConfig::default())?;
    world.spawn(PLAYER, Point::new(7., 0., 0.), HOSTILE);
    world.spawn(AgentId(3), Point::new(2., 0., 0.), HOSTILE);
    world.hidden.insert(AgentId(3));

    tick(&mut brain, &mut world, 0.1);
    assert_eq!(root_data(&brain, root, "target"), None);
    assert_eq!(world.destination(ENEMY), None);
    Ok(())
}

#[test]
fn attack_hits_once_per_interval() -> anyhow::Result<()> {
    let mut world = MockWorld::default();
    let (mut brain, root) = spawn_enemy(&mut world, EnemyConfig::default())?;
    world.spawn(PLAYER, Point::new(0.5, 0., 0.), HOSTILE);
    world.hp.insert(PLAYER, 3);

    // First tick acquires the target through the chase branch.
    tick(&mut brain, &mut world, 0.25);
    assert_eq!(root_data(&brain, root, "target"), Some(Value::Agent(PLAYER)));

    for _ in 0..3 {
        assert_eq!(
            tick(&mut brain, &mut world, 0.25),
            Some(BehaviorResult::Running)
        );
        assert!(world.hits.is_empty());
    }
    assert!(world.stopped(ENEMY));
    assert!(world.anim(ENEMY, ATTACKING));

    tick(&mut brain, &mut world, 0.25);
    assert_eq!(world.hits, vec![PLAYER]);

    for _ in 0..3 {
        tick(&mut brain, &mut world, 0.25);
    }
    assert_eq!(world.hits.len(), 1);
    tick(&mut brain, &mut world, 0.25);
    assert_eq!(world.hits.len(), 2);
    Ok(())
}

#[test]
fn killing_the_target_forgets_it() -> anyhow::Result<()> {
    let mut world = MockWorld::default();
    let config = EnemyConfig {
        attack_interval: 0.5,
        ..EnemyConfig::default()
    };
    let (mut brain, root) = spawn_enemy(&mut world, config)?;
    world.spawn(PLAYER, Point::new(0.5, 0., 0.), HOSTILE);

    for _ in 0..3 {
        tick(&mut brain, &mut world, 0.25);
    }
    assert_eq!(world.hits, vec![PLAYER]);
    assert_eq!(root_data(&brain, root, "target"), None);
    assert!(!world.stopped(ENEMY));
    assert!(!world.anim(ENEMY, ATTACKING));
    Ok(())
}

#[test]
fn occluded_noise_beyond_reach_is_ignored() -> anyhow::Result<()> {
    let mut world = MockWorld::default();
    let (mut brain, root) = spawn_enemy(&mut world, EnemyConfig::default())?;
    world.wall = true;
    world.noise = Some(Noise {
        position: Point::new(5., 0., 0.),
        level: 6.,
    });

    tick(&mut brain, &mut world, 0.1);
    assert_eq!(root_data(&brain, root, "noiseLevel"), None);
    assert_eq!(world.destination(ENEMY), None);
    Ok(())
}

#[test]
fn occluded_noise_within_reach_is_investigated() -> anyhow::Result<()> {
    let mut world = MockWorld::default();
    let (mut brain, root) = spawn_enemy(&mut world, EnemyConfig::default())?;
    world.wall = true;
    world.noise = Some(Noise {
        position: Point::new(3., 0., 0.),
        level: 6.,
    });

    assert_eq!(
        tick(&mut brain, &mut world, 0.1),
        Some(BehaviorResult::Running)
    );
    assert_eq!(root_data(&brain, root, "noiseLevel"), Some(Value::Float(6.)));
    assert_eq!(world.destination(ENEMY), Some(Point::new(3., 0., 0.)));
    assert_eq!(world.speed(ENEMY), 2.);

    world.noise = None;
    world.arrive(ENEMY);
    assert_eq!(
        tick(&mut brain, &mut world, 0.1),
        Some(BehaviorResult::Success)
    );
    assert_eq!(root_data(&brain, root, "noisePosition"), None);
    assert_eq!(root_data(&brain, root, "noiseLevel"), None);
    Ok(())
}

#[test]
fn lost_target_is_searched_at_last_known_position() -> anyhow::Result<()> {
    let mut world = MockWorld::default();
    let (mut brain, root) = spawn_enemy(&mut world, EnemyConfig::default())?;
    world.spawn(PLAYER, Point::new(0.5, 0., 0.), HOSTILE);
    tick(&mut brain, &mut world, 0.1);
    tick(&mut brain, &mut world, 0.1);
    assert!(world.anim(ENEMY, ATTACKING));

    world.hidden.insert(PLAYER);
    assert_eq!(
        tick(&mut brain, &mut world, 0.1),
        Some(BehaviorResult::Running)
    );
    assert_eq!(root_data(&brain, root, "target"), None);
    assert_eq!(
        root_data(&brain, root, "lastKnownPosition"),
        Some(Value::Point(Point::new(0.5, 0., 0.)))
    );
    assert_eq!(world.destination(ENEMY), Some(Point::new(0.5, 0., 0.)));
    assert_eq!(world.speed(ENEMY), 2.);
    assert!(!world.stopped(ENEMY));
    assert!(world.anim(ENEMY, WALKING));
    assert!(!world.anim(ENEMY, ATTACKING));

    world.arrive(ENEMY);
    assert_eq!(
        tick(&mut brain, &mut world, 0.1),
        Some(BehaviorResult::Success)
    );
    assert_eq!(root_data(&brain, root, "lastKnownPosition"), None);
    Ok(())
}

#[test]
fn target_beyond_lose_range_is_lost() -> anyhow::Result<()> {
    let mut world = MockWorld::default();
    let (mut brain, root) = spawn_enemy(&mut world, EnemyConfig::default())?;
    world.spawn(PLAYER, Point::new(3., 0., 0.), HOSTILE);
    tick(&mut brain, &mut world, 0.1);
    assert_eq!(root_data(&brain, root, "target"), Some(Value::Agent(PLAYER)));

    // Still inside lose_range, so the chase goes on.
    world.positions.insert(PLAYER, Point::new(8., 0., 0.));
    tick(&mut brain, &mut world, 0.1);
    assert_eq!(root_data(&brain, root, "target"), Some(Value::Agent(PLAYER)));

    world.positions.insert(PLAYER, Point::new(10., 0., 0.));
    tick(&mut brain, &mut world, 0.1);
    assert_eq!(root_data(&brain, root, "target"), None);
    assert_eq!(
        root_data(&brain, root, "lastKnownPosition"),
        Some(Value::Point(Point::new(10., 0., 0.)))
    );
    assert_eq!(world.destination(ENEMY), Some(Point::new(10., 0., 0.)));
    Ok(())
}

#[test]
fn target_behind_wall_is_lost() -> anyhow::Result<()> {
    let mut world = MockWorld::default();
    let (mut brain, root) = spawn_enemy(&mut world, EnemyConfig::default())?;
    world.spawn(PLAYER, Point::new(3., 0., 0.), HOSTILE);
    tick(&mut brain, &mut world, 0.1);

    world.wall = true;
    tick(&mut brain, &mut world, 0.1);
    assert_eq!(root_data(&brain, root, "target"), None);
    assert_eq!(
        root_data(&brain, root, "lastKnownPosition"),
        Some(Value::Point(Point::new(3., 0., 0.)))
    );
    assert_eq!(world.speed(ENEMY), 2.);
    Ok(())
}

#[test]
fn despawned_target_is_dropped() -> anyhow::Result<()> {
    let mut world = MockWorld::default();
    let (mut brain, root) = spawn_enemy(&mut world, EnemyConfig::default())?;
    world.spawn(PLAYER, Point::new(3., 0., 0.), HOSTILE);
    tick(&mut brain, &mut world, 0.1);

    world.positions.remove(&PLAYER);
    assert_eq!(
        tick(&mut brain, &mut world, 0.1),
        Some(BehaviorResult::Running)
    );
    assert_eq!(root_data(&brain, root, "target"), None);
    // Nothing to search for: the target never got out of sight.
    assert_eq!(root_data(&brain, root, "lastKnownPosition"), None);
    Ok(())
}

#[test]
fn patrol_yields_to_last_known_position() -> anyhow::Result<()> {
    let mut world = MockWorld::default();
    let config = EnemyConfig {
        waypoints: vec![[4., 0., 0.]],
        tree: Some("tree main = Sequence { Patrol }".to_owned()),
        ..EnemyConfig::default()
    };
    let (mut brain, root) = spawn_enemy(&mut world, config)?;
    if let Some(tree) = brain.tree_mut() {
        tree.set_data(root, "lastKnownPosition", Point::new(1., 0., 0.));
    }

    assert_eq!(
        tick(&mut brain, &mut world, 0.1),
        Some(BehaviorResult::Fail)
    );
    assert_eq!(world.destination(ENEMY), None);

    if let Some(tree) = brain.tree_mut() {
        tree.clear_data(root, "lastKnownPosition");
    }
    assert_eq!(
        tick(&mut brain, &mut world, 0.1),
        Some(BehaviorResult::Running)
    );
    assert_eq!(world.destination(ENEMY), Some(Point::new(4., 0., 0.)));
    Ok(())
}

#[test]
fn noise_is_ignored_while_hunting() -> anyhow::Result<()> {
    let mut world = MockWorld::default();
    let (mut brain, root) = spawn_enemy(&mut world, EnemyConfig::default())?;
    world.spawn(PLAYER, Point::new(3., 0., 0.), HOSTILE);
    tick(&mut brain, &mut world, 0.1);

    if let Some(tree) = brain.tree_mut() {
        tree.set_data(root, "noiseLevel", 4f32);
    }
    world.noise = Some(Noise {
        position: Point::new(-1., 0., 0.),
        level: 5.,
    });
    assert_eq!(
        tick(&mut brain, &mut world, 0.1),
        Some(BehaviorResult::Running)
    );
    assert_eq!(root_data(&brain, root, "noiseLevel"), None);
    assert_eq!(root_data(&brain, root, "noisePosition"), None);
    assert_eq!(world.destination(ENEMY), Some(Point::new(3., 0., 0.)));
    assert_eq!(world.speed(ENEMY), 4.);
    Ok(())
}

#[test]
fn clear_noise_beyond_its_level_is_ignored() -> anyhow::Result<()> {
    let mut world = MockWorld::default();
    let (mut brain, root) = spawn_enemy(&mut world, EnemyConfig::default())?;
    world.noise = Some(Noise {
        position: Point::new(7., 0., 0.),
        level: 6.,
    });

    tick(&mut brain, &mut world, 0.1);
    assert_eq!(root_data(&brain, root, "noiseLevel"), None);
    assert_eq!(world.destination(ENEMY), None);
    Ok(())
}

#[test]
fn noise_takes_priority_over_being_shot() -> anyhow::Result<()> {
    let mut world = MockWorld::default();
    let (mut brain, root) = spawn_enemy(&mut world, EnemyConfig::default())?;
    world.shot.insert(ENEMY);
    world.noise = Some(Noise {
        position: Point::new(3., 0., 0.),
        level: 6.,
    });

    assert_eq!(
        tick(&mut brain, &mut world, 0.1),
        Some(BehaviorResult::Running)
    );
    assert_eq!(root_data(&brain, root, "noiseLevel"), Some(Value::Float(6.)));
    assert_eq!(world.destination(ENEMY), Some(Point::new(3., 0., 0.)));
    assert!(!world.stopped(ENEMY));
    assert!(world.anim(ENEMY, WALKING));
    Ok(())
}

#[test]
fn being_shot_overrides_combat() -> anyhow::Result<()> {
    let mut world = MockWorld::default();
    let (mut brain, root) = spawn_enemy(&mut world, EnemyConfig::default())?;
    world.spawn(PLAYER, Point::new(0.5, 0., 0.), HOSTILE);
    tick(&mut brain, &mut world, 0.25);
    assert!(root_data(&brain, root, "target").is_some());

    world.shot.insert(ENEMY);
    for _ in 0..8 {
        assert_eq!(
            tick(&mut brain, &mut world, 0.25),
            Some(BehaviorResult::Running)
        );
    }
    assert_eq!(root_data(&brain, root, "target"), None);
    assert!(world.hits.is_empty());
    assert!(world.stopped(ENEMY));
    assert!(!world.anim(ENEMY, WALKING));
    assert!(!world.anim(ENEMY, RUNNING));
    assert!(!world.anim(ENEMY, ATTACKING));

    world.shot.clear();
    tick(&mut brain, &mut world, 0.25);
    assert!(!world.stopped(ENEMY));
    assert_eq!(root_data(&brain, root, "target"), Some(Value::Agent(PLAYER)));
    Ok(())
}

#[test]
fn paused_tick_has_no_side_effects() -> anyhow::Result<()> {
    let mut world = MockWorld::default();
    let config = EnemyConfig {
        waypoints: vec![[4., 0., 0.]],
        ..EnemyConfig::default()
    };
    let (mut brain, root) = spawn_enemy(&mut world, config)?;
    world.spawn(PLAYER, Point::new(0.5, 0., 0.), HOSTILE);
    world.noise = Some(Noise {
        position: Point::new(1., 0., 0.),
        level: 5.,
    });

    assert_eq!(
        brain.tick(&mut world, Frame::paused()),
        Some(BehaviorResult::Running)
    );
    assert!(world.nav.is_empty());
    assert!(world.animator.is_empty());
    assert!(world.hits.is_empty());
    assert!(brain.tree().unwrap().data().local(root).is_empty());
    Ok(())
}

#[test]
fn reset_all_forgets_blackboards() -> anyhow::Result<()> {
    let mut world = MockWorld::default();
    let (mut brain, root) = spawn_enemy(&mut world, EnemyConfig::default())?;
    world.spawn(PLAYER, Point::new(3., 0., 0.), HOSTILE);
    tick(&mut brain, &mut world, 0.1);
    let len = brain.tree().unwrap().len();

    brain.reset_all();
    assert_eq!(root_data(&brain, root, "target"), None);
    assert_eq!(brain.tree().unwrap().len(), len);
    Ok(())
}

#[test]
fn yaml_config_replaces_tree() -> anyhow::Result<()> {
    let config = EnemyConfig::from_yaml(
        r#"
walk_speed: 1.5
waypoints:
  - [2.0, 0.0, 0.0]
tree: |
  tree main = Fallback {
      Sequence { IsShot Shot }
      Patrol
  }
"#,
    )?;
    let mut world = MockWorld::default();
    let (mut brain, root) = spawn_enemy(&mut world, config)?;
    world.spawn(PLAYER, Point::new(1., 0., 0.), HOSTILE);

    assert_eq!(brain.tree().unwrap().children(root).len(), 2);
    assert_eq!(
        tick(&mut brain, &mut world, 0.1),
        Some(BehaviorResult::Running)
    );
    // No chase branch, so the player nearby goes unnoticed.
    assert_eq!(root_data(&brain, root, "target"), None);
    assert_eq!(world.destination(ENEMY), Some(Point::new(2., 0., 0.)));
    assert_eq!(world.speed(ENEMY), 1.5);
    Ok(())
}
