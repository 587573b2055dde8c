//! Errors surfaced to callers of the simulation core
//!
//! Numerical edge cases (coincident bodies, an emptied system) are handled
//! inside the core and never show up here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// Rejected at construction or reset; no system is produced
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// `step` was called with a non-positive or non-finite timestep
    #[error("invalid timestep {0}: must be finite and greater than zero")]
    InvalidTimeStep(f64),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SimError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        SimError::InvalidConfiguration(msg.into())
    }
}
