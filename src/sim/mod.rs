//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by index, ids never renumbered)
//! - No rendering or platform dependencies
//!
//! One step runs strictly in this order: integrate, merge, walls, clock.

pub mod body;
pub mod boundary;
pub mod collision;
pub mod force;
pub mod integrator;
pub mod state;
pub mod tick;

pub use body::{Body, BodySnapshot};
pub use boundary::{Wall, WallContact, apply_boundary, reflect_velocity, wall_contact, wrap_image};
pub use collision::{MergeEvent, check_hit, merge_into, resolve_collisions};
pub use force::{ForceField, MIN_SEPARATION};
pub use integrator::rk4_step;
pub use state::System;
