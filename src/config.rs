use crate::{
    error::ConfigError,
    world::{Layer, Point},
};
use serde::Deserialize;

/// Tuning knobs of one enemy type.
///
/// Every field has a default, so a YAML file only needs to list what it
/// changes:
///
/// ```yaml
/// fov_range: 12.0
/// waypoints:
///   - [0.0, 0.0, 0.0]
///   - [10.0, 0.0, 4.0]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Radius of the perception sphere used to spot hostiles.
    pub fov_range: f32,
    /// A target farther away than this is lost.
    pub lose_range: f32,
    pub attack_range: f32,
    pub walk_speed: f32,
    pub run_speed: f32,
    /// Seconds between two hits while attacking.
    pub attack_interval: f32,
    /// Seconds spent at each waypoint before moving on.
    pub patrol_wait: f32,
    /// Fraction of a noise's range that still carries through a wall.
    pub noise_occlusion: f32,
    /// Remaining path distance under which a destination counts as reached.
    pub arrive_epsilon: f32,
    /// Layer mask of the entities this enemy hunts.
    pub hostile_layer: u32,
    pub waypoints: Vec<[f32; 3]>,
    /// Composition source replacing [`crate::DEFAULT_ENEMY_TREE`].
    pub tree: Option<String>,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            fov_range: 6.,
            lose_range: 9.,
            attack_range: 1.,
            walk_speed: 2.,
            run_speed: 4.,
            attack_interval: 1.,
            patrol_wait: 1.,
            noise_occlusion: 0.6,
            arrive_epsilon: 0.1,
            hostile_layer: 1,
            waypoints: vec![],
            tree: None,
        }
    }
}

impl EnemyConfig {
    pub fn from_yaml(src: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("fov_range", self.fov_range),
            ("lose_range", self.lose_range),
            ("attack_range", self.attack_range),
            ("attack_interval", self.attack_interval),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, v)| !(*v > 0.)) {
            return Err(ConfigError::Invalid(format!("{} must be positive", name)));
        }
        if self.lose_range < self.fov_range {
            return Err(ConfigError::Invalid(
                "lose_range must not be smaller than fov_range".to_owned(),
            ));
        }
        if !(0. ..=1.).contains(&self.noise_occlusion) {
            return Err(ConfigError::Invalid(
                "noise_occlusion must be within 0..=1".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn hostile_layer(&self) -> Layer {
        Layer(self.hostile_layer)
    }

    pub fn waypoints(&self) -> Vec<Point> {
        self.waypoints.iter().map(|p| Point::from(*p)).collect()
    }
}
