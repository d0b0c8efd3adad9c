mod drag;
mod physics;
mod rect;

pub use drag::{DragPhase, DragState};
pub use physics::{
    Material, PhysicsState, DEFAULT_DRAG, DEFAULT_ELASTICITY, DEFAULT_FRICTION, DEFAULT_GRAVITY,
    DEFAULT_MAX_VELOCITY,
};
pub use rect::{overlap_depth, overlaps, Rect};

use glam::Vec2;
use hecs::Entity;

use crate::error::Result;

/// One simulated rectangle: its bounds, motion state and drag state, plus
/// the rectangle it returns to on reset.
#[derive(Debug, Clone)]
pub struct Body {
    pub rect: Rect,
    pub physics: PhysicsState,
    pub drag: DragState,
    spawn: Rect,
}

impl Body {
    /// A resting body at `spawn`. Validates the rectangle, mass and material.
    pub fn new(spawn: Rect, mass: f32, material: Material) -> Result<Self> {
        spawn.validate()?;
        Ok(Self {
            rect: spawn,
            physics: PhysicsState::new(mass, material)?,
            drag: DragState::default(),
            spawn,
        })
    }

    /// Back to the spawn rectangle with no motion and no drag in progress.
    /// Mass and material are kept.
    pub fn reset(&mut self) {
        self.rect = self.spawn;
        self.physics.stop();
        self.drag.reset();
    }
}

/// Face of an obstacle that a body ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Body came from the left and hit the obstacle's left face.
    Left,
    Right,
    /// Body landed on the obstacle's top face.
    Top,
    Bottom,
}

impl Side {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }
}

/// Human-readable label for logs and traces.
impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Top => "top",
            Side::Bottom => "bottom",
        };
        f.write_str(s)
    }
}

/// Diagnostic record of one resolved collision. Has no effect on the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionEvent {
    pub entity: Entity,
    pub obstacle_index: usize,
    pub obstacle: Rect,
    pub side: Side,
    /// Overlap along the separation axis before correction.
    pub depth: f32,
    pub velocity_before: Vec2,
    pub velocity_after: Vec2,
}

/// Marker: the body's last step ended resting on top of an obstacle.
pub struct Grounded;

/// Marker: pinned under the pointer by a direct drag this frame. Held
/// bodies are not integrated.
pub struct Held;

/// Marker: pulled toward the pointer by a steering drag this frame.
pub struct Steered;

/// Display name for a body, used by the CLI trace.
pub struct Name(pub String);
