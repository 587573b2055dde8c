//! Fixed timestep simulation step
//!
//! Core loop that advances the system deterministically:
//! integrate, merge overlapping bodies, resolve walls, advance the clock.

use super::boundary::apply_boundary;
use super::collision::{MergeEvent, resolve_collisions};
use super::integrator::rk4_step;
use super::state::System;
use crate::error::SimError;

impl System {
    /// Advance the simulation by `dt`.
    ///
    /// An empty system is left untouched, clock included.
    pub fn step(&mut self, dt: f64) -> Result<Vec<MergeEvent>, SimError> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimError::InvalidTimeStep(dt));
        }
        if self.bodies.is_empty() {
            return Ok(Vec::new());
        }

        rk4_step(&mut self.bodies, &self.field, dt);

        let merges = resolve_collisions(&mut self.bodies);

        for body in &mut self.bodies {
            apply_boundary(body, self.boundary, self.width, self.height);
        }

        self.sim_time += dt;
        self.step_count += 1;

        if !merges.is_empty() {
            log::debug!(
                "t={:.2}: {} merge(s), {} bodies left",
                self.sim_time,
                merges.len(),
                self.bodies.len()
            );
        }

        Ok(merges)
    }

    /// Advance by the configured timestep
    pub fn tick(&mut self) -> Result<Vec<MergeEvent>, SimError> {
        self.step(self.dt)
    }
}
