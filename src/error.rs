//! Error types for the simulation core

use thiserror::Error;

/// Errors raised while building or configuring a simulation.
///
/// Per-frame stepping never fails; these are construction-time problems.
#[derive(Debug, Error)]
pub enum SimError {
    /// Mass must be finite and strictly positive
    #[error("Invalid mass: {0} (must be finite and > 0)")]
    InvalidMass(f32),

    /// Rectangle with a non-positive or non-finite extent
    #[error("Invalid rectangle extent: {width} x {height}")]
    InvalidExtent { width: f32, height: f32 },

    /// Configuration value out of range
    #[error("Invalid simulation configuration: {0}")]
    InvalidConfig(String),

    /// Entity is not a body in this simulation
    #[error("Entity has no body: {0:?}")]
    NoSuchBody(hecs::Entity),

    /// Reading a configuration file failed
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration JSON did not parse
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for simulation operations
pub type Result<T> = std::result::Result<T, SimError>;
