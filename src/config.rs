//! Simulation configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::components::{Material, Rect};
use crate::error::{Result, SimError};

/// Longest step the integrator will take. Larger frame deltas (a stalled
/// window, a debugger pause) are clamped so bodies cannot skip past thin
/// obstacles.
pub const DEFAULT_MAX_DT: f32 = 0.05;
pub const DEFAULT_STEER_ACCELERATION: f32 = 60.0;
pub const DEFAULT_SPAWN: Rect = Rect::new(350.0, 200.0, 100.0, 100.0);
pub const DEFAULT_GROUND: Rect = Rect::new(200.0, 400.0, 800.0, 50.0);

/// Separation axis used when both overlaps are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisPriority {
    #[default]
    Horizontal,
    Vertical,
}

/// Where friction and elasticity act during collision response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrictionModel {
    /// Wall hits damp the reflected normal velocity by `1 - friction`;
    /// landing on top damps the sliding velocity.
    #[default]
    Damped,
    /// Elasticity alone scales the reflected normal velocity; friction
    /// only scales velocity along the contact face, on every side.
    Tangential,
}

/// What a held pointer does to the grabbed body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragPolicy {
    /// Pin the body under the pointer. Integration is suspended while held.
    Direct,
    /// Accelerate the body toward the pointer and let integration move it.
    #[default]
    Steer,
}

/// Velocity handed to a body when it is released.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThrowConfig {
    /// Multiplier on the pointer velocity at release.
    pub damping: f32,
    /// Upper bound on the injected speed.
    pub max_speed: f32,
}

impl Default for ThrowConfig {
    fn default() -> Self {
        Self {
            damping: 0.8,
            max_speed: 1500.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    pub policy: DragPolicy,
    /// Direct policy: skip a frame's move if the target overlaps an obstacle.
    pub veto_on_overlap: bool,
    /// Steer policy: acceleration toward the pointer, px/s².
    pub steer_acceleration: f32,
    /// Steer policy: keep applying gravity while the body is held.
    pub gravity_while_dragging: bool,
    /// `None` releases the body with whatever velocity it already has.
    pub throw: Option<ThrowConfig>,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            policy: DragPolicy::Steer,
            veto_on_overlap: true,
            steer_acceleration: DEFAULT_STEER_ACCELERATION,
            gravity_while_dragging: true,
            throw: None,
        }
    }
}

/// Top-level configuration, loadable from JSON. Every field has a default,
/// so a partial file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub mass: f32,
    pub material: Material,
    pub spawn: Rect,
    pub obstacles: Vec<Rect>,
    pub axis_priority: AxisPriority,
    pub friction_model: FrictionModel,
    pub max_dt: f32,
    pub drag: DragConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            material: Material::default(),
            spawn: DEFAULT_SPAWN,
            obstacles: vec![DEFAULT_GROUND],
            axis_priority: AxisPriority::default(),
            friction_model: FrictionModel::default(),
            max_dt: DEFAULT_MAX_DT,
            drag: DragConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        log::debug!(
            "loaded config from {}: {} obstacle(s), drag policy {:?}",
            path.as_ref().display(),
            config.obstacles.len(),
            config.drag.policy
        );
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_drag_policy(mut self, policy: DragPolicy) -> Self {
        self.drag.policy = policy;
        self
    }

    pub fn with_obstacles(mut self, obstacles: Vec<Rect>) -> Self {
        self.obstacles = obstacles;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(SimError::InvalidMass(self.mass));
        }
        self.material.validate()?;
        self.spawn.validate()?;
        for obstacle in &self.obstacles {
            obstacle.validate()?;
        }
        if !(self.max_dt.is_finite() && self.max_dt > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "max_dt must be > 0, got {}",
                self.max_dt
            )));
        }
        if !(self.drag.steer_acceleration.is_finite() && self.drag.steer_acceleration >= 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "steer_acceleration must be >= 0, got {}",
                self.drag.steer_acceleration
            )));
        }
        if let Some(throw) = &self.drag.throw {
            if !(throw.damping.is_finite() && throw.damping >= 0.0) {
                return Err(SimError::InvalidConfig(format!(
                    "throw damping must be >= 0, got {}",
                    throw.damping
                )));
            }
            if !(throw.max_speed.is_finite() && throw.max_speed >= 0.0) {
                return Err(SimError::InvalidConfig(format!(
                    "throw max_speed must be >= 0, got {}",
                    throw.max_speed
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_demo_scene() {
        let config = SimConfig::default();
        assert_eq!(config.spawn, Rect::new(350.0, 200.0, 100.0, 100.0));
        assert_eq!(config.obstacles, vec![Rect::new(200.0, 400.0, 800.0, 50.0)]);
        assert_eq!(config.axis_priority, AxisPriority::Horizontal);
        assert_eq!(config.drag.policy, DragPolicy::Steer);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{
            "axis_priority": "vertical",
            "drag": { "policy": "direct", "throw": { "damping": 0.5, "max_speed": 900.0 } },
            "material": { "gravity": 9.8 }
        }"#;
        let config = SimConfig::from_json_str(json).unwrap();
        assert_eq!(config.axis_priority, AxisPriority::Vertical);
        assert_eq!(config.drag.policy, DragPolicy::Direct);
        assert!(config.drag.veto_on_overlap);
        assert_eq!(config.material.gravity, 9.8);
        assert_eq!(config.material.max_velocity, 2000.0);
        assert_eq!(
            config.drag.throw,
            Some(ThrowConfig {
                damping: 0.5,
                max_speed: 900.0
            })
        );
        assert_eq!(config.spawn, DEFAULT_SPAWN);
    }

    #[test]
    fn pretty_json_reloads_identically() {
        let config = SimConfig::default().with_drag_policy(DragPolicy::Direct);
        let json = config.to_json_pretty().unwrap();
        assert_eq!(SimConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            SimConfig::from_json_str(r#"{ "mass": 0.0 }"#),
            Err(SimError::InvalidMass(_))
        ));
        assert!(matches!(
            SimConfig::from_json_str(r#"{ "max_dt": -1.0 }"#),
            Err(SimError::InvalidConfig(_))
        ));
        assert!(matches!(
            SimConfig::from_json_str(
                r#"{ "obstacles": [ { "x": 0, "y": 0, "width": 0, "height": 5 } ] }"#
            ),
            Err(SimError::InvalidExtent { .. })
        ));
        assert!(matches!(
            SimConfig::from_json_str(r#"{ "material": { "elasticity": 2.0 } }"#),
            Err(SimError::InvalidConfig(_))
        ));
        assert!(matches!(
            SimConfig::from_json_str("not json"),
            Err(SimError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            SimConfig::load("/nonexistent/tumble/config.json"),
            Err(SimError::Io(_))
        ));
    }
}
