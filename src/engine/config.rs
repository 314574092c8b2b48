//! Engine parameters.

use glam::DVec2;
use serde::Deserialize;

use crate::types::{
    DEFAULT_DESIRED_SPEED, DEFAULT_MAX_SPEED, DEFAULT_OBSTACLE_WEIGHT, DEFAULT_RELAXATION_TIME,
    DEFAULT_SENSING_RADIUS, DEFAULT_TARGET_TOLERANCE, DEFAULT_TARGET_WEIGHT, DEFAULT_WORLD_MAX,
    DEFAULT_WORLD_MIN, ForceError, WorldBounds,
};

/// Immutable per-tick parameter snapshot for the force engine.
///
/// Deserializable from a YAML parameter file (see [`crate::loaders::yaml`]);
/// missing fields fall back to the defaults below.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SocialForceConfig {
    /// Scale of the goal-attraction force.
    pub target_weight: f64,
    /// Walking speed (m/s) the goal term drives the velocity toward.
    pub desired_speed: f64,
    /// Time constant (seconds) of the goal term's velocity relaxation.
    pub relaxation_time: f64,
    /// Scale of each neighbor's repulsive force.
    pub obstacle_weight: f64,
    /// Neighbors farther than this from the agent are ignored (meters).
    pub sensing_radius: f64,
    /// Per-axis speed above which an instantaneous velocity estimate is
    /// rejected as a teleport (m/s).
    pub max_speed: f64,
    /// Arrival distance to the current target (meters).
    pub target_tolerance: f64,
    /// World bounds the integrated position is clamped to: [x, y] minimum.
    pub world_min: [f64; 2],
    /// World bounds: [x, y] maximum.
    pub world_max: [f64; 2],
    /// Neighbor ids excluded from sensing (the agent's own id is always
    /// excluded by the caller's neighbor snapshot).
    pub ignore: Vec<String>,
}

impl Default for SocialForceConfig {
    fn default() -> Self {
        Self {
            target_weight: DEFAULT_TARGET_WEIGHT,
            desired_speed: DEFAULT_DESIRED_SPEED,
            relaxation_time: DEFAULT_RELAXATION_TIME,
            obstacle_weight: DEFAULT_OBSTACLE_WEIGHT,
            sensing_radius: DEFAULT_SENSING_RADIUS,
            max_speed: DEFAULT_MAX_SPEED,
            target_tolerance: DEFAULT_TARGET_TOLERANCE,
            world_min: DEFAULT_WORLD_MIN,
            world_max: DEFAULT_WORLD_MAX,
            ignore: Vec::new(),
        }
    }
}

impl SocialForceConfig {
    pub fn world_bounds(&self) -> WorldBounds {
        WorldBounds::new(
            DVec2::new(self.world_min[0], self.world_min[1]),
            DVec2::new(self.world_max[0], self.world_max[1]),
        )
    }

    pub fn validate(&self) -> Result<(), ForceError> {
        let positive = [
            (self.sensing_radius, "sensing_radius"),
            (self.max_speed, "max_speed"),
            (self.target_tolerance, "target_tolerance"),
            (self.desired_speed, "desired_speed"),
            (self.relaxation_time, "relaxation_time"),
        ];
        for (value, name) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ForceError::InvalidParameter(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        let non_negative = [
            (self.target_weight, "target_weight"),
            (self.obstacle_weight, "obstacle_weight"),
        ];
        for (value, name) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ForceError::InvalidParameter(format!(
                    "{name} must be non-negative and finite, got {value}"
                )));
            }
        }
        if !self.world_bounds().is_valid() {
            return Err(ForceError::InvalidParameter(format!(
                "world bounds min {:?} must be strictly below max {:?}",
                self.world_min, self.world_max
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_plugin() {
        let cfg = SocialForceConfig::default();
        assert_eq!(cfg.target_weight, 1.15);
        assert_eq!(cfg.obstacle_weight, 1.5);
        assert_eq!(cfg.sensing_radius, 4.0);
        assert_eq!(cfg.max_speed, 15.0);
        assert_eq!(cfg.target_tolerance, 0.3);
        assert_eq!(cfg.desired_speed, 0.8);
        assert_eq!(cfg.relaxation_time, 0.5);
        cfg.validate().expect("defaults are valid");
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut cfg = SocialForceConfig::default();
        cfg.sensing_radius = 0.0;
        assert!(cfg.validate().is_err());

        let mut cfg = SocialForceConfig::default();
        cfg.target_weight = f64::NAN;
        assert!(cfg.validate().is_err());

        let mut cfg = SocialForceConfig::default();
        cfg.world_min = [4.0, 0.0];
        assert!(cfg.validate().is_err());

        let mut cfg = SocialForceConfig::default();
        cfg.relaxation_time = 0.0;
        assert!(cfg.validate().is_err());
    }
}
