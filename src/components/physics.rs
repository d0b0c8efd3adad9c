use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Gravity in px/s² pointing down the screen.
pub const DEFAULT_GRAVITY: f32 = 1280.0;
pub const DEFAULT_MAX_VELOCITY: f32 = 2000.0;
pub const DEFAULT_FRICTION: f32 = 0.02;
pub const DEFAULT_ELASTICITY: f32 = 0.02;
pub const DEFAULT_DRAG: f32 = 0.02;

/// Relative slack allowed above `max_velocity` before [`PhysicsState::cap_velocity`]
/// rescales.
pub const CAP_SLACK: f32 = 8.0 * f32::EPSILON;

/// Surface and motion coefficients used to build a [`PhysicsState`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Vertical acceleration, independent of mass.
    pub gravity: f32,
    /// Fraction of velocity lost on contact. 0.0 = ice, 1.0 = glue.
    pub friction: f32,
    /// Fraction of normal velocity reflected on impact. 0.0 = dead stop, 1.0 = perfect bounce.
    pub elasticity: f32,
    /// Quadratic air-drag coefficient.
    pub drag: f32,
    /// Speed limit applied after every step.
    pub max_velocity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            friction: DEFAULT_FRICTION,
            elasticity: DEFAULT_ELASTICITY,
            drag: DEFAULT_DRAG,
            max_velocity: DEFAULT_MAX_VELOCITY,
        }
    }
}

impl Material {
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction.clamp(0.0, 1.0);
        self
    }

    pub fn with_elasticity(mut self, elasticity: f32) -> Self {
        self.elasticity = elasticity.clamp(0.0, 1.0);
        self
    }

    pub fn with_drag(mut self, drag: f32) -> Self {
        self.drag = drag.max(0.0);
        self
    }

    pub fn validate(&self) -> Result<()> {
        let unit = |name: &str, v: f32| {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(SimError::InvalidConfig(format!("{name} must be in [0, 1], got {v}")))
            }
        };
        unit("friction", self.friction)?;
        unit("elasticity", self.elasticity)?;
        if !self.gravity.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "gravity must be finite, got {}",
                self.gravity
            )));
        }
        if !(self.drag.is_finite() && self.drag >= 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "drag must be >= 0, got {}",
                self.drag
            )));
        }
        if !(self.max_velocity.is_finite() && self.max_velocity > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "max_velocity must be > 0, got {}",
                self.max_velocity
            )));
        }
        Ok(())
    }
}

/// Per-body motion state. Acceleration is an accumulator: forces add to it
/// during a frame and the integrator clears it once the frame is committed.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsState {
    pub velocity: Vec2,
    pub acceleration: Vec2,
    mass: f32,
    pub gravity: f32,
    pub friction: f32,
    pub elasticity: f32,
    pub drag: f32,
    pub max_velocity: f32,
}

impl PhysicsState {
    /// Build a resting state. Fails if `mass` is not finite and positive,
    /// since every force is divided by it.
    pub fn new(mass: f32, material: Material) -> Result<Self> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimError::InvalidMass(mass));
        }
        material.validate()?;
        Ok(Self {
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            mass,
            gravity: material.gravity,
            friction: material.friction,
            elasticity: material.elasticity,
            drag: material.drag,
            max_velocity: material.max_velocity,
        })
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Free fall: the weight is `gravity * mass`, so the resulting
    /// acceleration does not depend on mass.
    pub fn apply_gravity(&mut self) {
        let weight = self.gravity * self.mass;
        self.acceleration.y += weight / self.mass;
    }

    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force / self.mass;
    }

    /// Add an acceleration directly, bypassing mass.
    pub fn apply_acceleration(&mut self, acceleration: Vec2) {
        self.acceleration += acceleration;
    }

    /// Quadratic air resistance, per axis: `-sign(v) * drag * v² / mass`.
    pub fn apply_drag(&mut self) {
        let v = self.velocity;
        let drag_force = -self.drag * v * v.abs();
        self.acceleration += drag_force / self.mass;
    }

    /// Rescale velocity to `max_velocity` when it is longer, keeping direction.
    ///
    /// The rescaled length can round a few ulps above the limit; speeds
    /// within [`CAP_SLACK`] of it are left alone so a second call is a no-op.
    pub fn cap_velocity(&mut self) {
        let speed = self.velocity.length();
        if speed > self.max_velocity * (1.0 + CAP_SLACK) {
            self.velocity *= self.max_velocity / speed;
        }
    }

    /// Zero velocity and acceleration. Mass and material are untouched.
    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
        self.acceleration = Vec2::ZERO;
    }
}
