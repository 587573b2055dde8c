//! Gravity Sim - planar N-body gravity core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (force field, RK4, merging, walls)
//! - `config`: Data-driven simulation parameters
//! - `error`: Failure signals surfaced to callers
//!
//! Rendering and UI are external: they read [`sim::BodySnapshot`]s and drive
//! the clock by calling [`sim::System::step`].

pub mod config;
pub mod error;
pub mod sim;

pub use config::{BoundaryPolicy, SimConfig};
pub use error::SimError;
pub use sim::{Body, BodySnapshot, ForceField, MergeEvent, System};

/// 2-D vector value type used for positions, velocities and accelerations
///
/// `Copy`, so every operation (`+`, `-`, `* s`, `dot`, `length`) yields a new
/// value and leaves its operands untouched.
pub type Vector2 = glam::DVec2;

/// Simulation defaults (the classic 500x500 cluster)
pub mod consts {
    /// Fixed simulation timestep
    pub const SIM_DT: f64 = 0.1;
    /// Square domain edge length
    pub const DOMAIN_SIZE: f64 = 500.0;
    /// Bodies spawned by default
    pub const BODY_COUNT: usize = 50;
    /// Mass of every freshly spawned body
    pub const INITIAL_MASS: f64 = 5.0;
    /// Gravitational constant
    pub const GRAVITY: f64 = 100.0;
    /// Spawn spread as a fraction of the smaller domain edge
    pub const SPAWN_SPREAD_FRACTION: f64 = 1.0 / 8.0;
}

/// Radius of a body with the given mass (unit density, `m^(1/3)`)
#[inline]
pub fn radius_for_mass(mass: f64) -> f64 {
    mass.cbrt()
}
