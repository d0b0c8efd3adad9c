//! Drag-and-drop rigid boxes with gravity, air drag and axis-aligned
//! collision response against static obstacles.
//!
//! The crate is the per-frame physics core. A host (window, renderer, input
//! polling) owns a [`Simulation`], feeds it a frame delta and a
//! [`PointerInput`] every frame, and draws the rectangles it reads back.

pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod fsm;
pub mod scene;
pub mod simulation;
pub mod systems;

pub use components::{Body, CollisionEvent, Material, PhysicsState, Rect, Side};
pub use config::SimConfig;
pub use engine::input::PointerInput;
pub use error::{Result, SimError};
pub use simulation::Simulation;
