//! Error types for the simulation core.

use thiserror::Error;

/// Failures a simulation step or construction can report.
///
/// None of these are retried; a failed `step` leaves the simulator untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// The velocity law reached or exceeded the speed of light
    #[error("velocity {v} reached the speed of light bound c = {c}")]
    VelocityBound { v: f32, c: f32 },

    /// The caller supplied a NaN or infinite time delta
    #[error("time delta must be finite, got {0}")]
    NonFiniteDelta(f32),

    /// The transform produced a NaN or infinite coordinate
    #[error("non-finite coordinate produced at index {index}")]
    NonFiniteOutput { index: usize },

    /// Parameters rejected at construction
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}
