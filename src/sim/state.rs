//! Simulation state and lifecycle
//!
//! [`System`] exclusively owns every body. Callers only ever get copies out
//! ([`BodySnapshot`]) and change state through `step`, `reset`, `restart` or
//! the configuration setters.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::{Body, BodySnapshot};
use super::boundary::{wall_contact, wrap_image};
use super::force::ForceField;
use crate::Vector2;
use crate::config::{BoundaryPolicy, SimConfig};
use crate::error::SimError;

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct System {
    /// Live bodies, in creation order
    pub(crate) bodies: Vec<Body>,
    pub(crate) width: f64,
    pub(crate) height: f64,
    pub(crate) field: ForceField,
    pub(crate) boundary: BoundaryPolicy,
    /// Simulated time
    pub(crate) sim_time: f64,
    /// Steps taken since the last reset
    pub(crate) step_count: u64,
    /// Default timestep for `tick`
    pub(crate) dt: f64,
    /// Seed actually used for the current placement
    seed: u64,
    /// Configuration applied on the next reset/restart
    config: SimConfig,
}

impl System {
    /// Build a system with bodies spawned from `config`
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let bodies = spawn_bodies(&config, seed);
        log::info!(
            "Initialized {} bodies ({} walls, seed {})",
            bodies.len(),
            config.boundary.as_str(),
            seed
        );
        Ok(Self::assemble(config, bodies, seed))
    }

    /// Build a system around caller-supplied bodies.
    ///
    /// Domain, gravity, timestep and policy come from `config`; its body
    /// count, mass and seed only matter for a later `restart`.
    pub fn from_bodies(config: SimConfig, bodies: Vec<Body>) -> Result<Self, SimError> {
        config.validate()?;

        let mut ids: Vec<u32> = bodies.iter().map(|b| b.id).collect();
        ids.sort_unstable();
        if let Some(pair) = ids.windows(2).find(|w| w[0] == w[1]) {
            return Err(SimError::config(format!("duplicate body id {}", pair[0])));
        }
        if let Some(bad) = bodies.iter().find(|b| !(b.mass().is_finite() && b.mass() > 0.0)) {
            return Err(SimError::config(format!(
                "body {} has non-positive mass {}",
                bad.id,
                bad.mass()
            )));
        }

        if let Some(bad) = bodies.iter().find(|b| !(b.pos.is_finite() && b.vel.is_finite())) {
            return Err(SimError::config(format!(
                "body {} has non-finite state: position {}, velocity {}",
                bad.id, bad.pos, bad.vel
            )));
        }

        let seed = config.seed.unwrap_or(0);
        Ok(Self::assemble(config, bodies, seed))
    }

    fn assemble(config: SimConfig, bodies: Vec<Body>, seed: u64) -> Self {
        Self {
            bodies,
            width: config.width,
            height: config.height,
            field: ForceField::new(config.gravity),
            boundary: config.boundary,
            sim_time: 0.0,
            step_count: 0,
            dt: config.dt,
            seed,
            config,
        }
    }

    /// Discard all state and rebuild from `config`.
    ///
    /// On error the current state is left untouched.
    pub fn reset(&mut self, config: SimConfig) -> Result<(), SimError> {
        *self = Self::new(config)?;
        Ok(())
    }

    /// Rebuild from the stored configuration, picking up any setter changes
    pub fn restart(&mut self) -> Result<(), SimError> {
        self.reset(self.config.clone())
    }

    /// Body count for the next reset
    pub fn set_body_count(&mut self, count: usize) {
        self.config.body_count = count;
    }

    /// Wall behaviour for the next reset
    pub fn set_boundary_policy(&mut self, policy: BoundaryPolicy) {
        self.config.boundary = policy;
    }

    /// Placement seed for the next reset
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.config.seed = seed;
    }

    /// Copies of every live body, in creation order
    pub fn bodies(&self) -> Vec<BodySnapshot> {
        self.bodies.iter().map(Body::snapshot).collect()
    }

    /// Opposite-side images of bodies straddling a wall, for drawing.
    /// Empty unless the policy is wraparound.
    pub fn wrap_ghosts(&self) -> Vec<BodySnapshot> {
        if self.boundary != BoundaryPolicy::Wraparound {
            return Vec::new();
        }
        self.bodies
            .iter()
            .filter_map(|b| {
                let contact = wall_contact(b.pos, b.radius(), self.width, self.height)?;
                let mut ghost = b.snapshot();
                ghost.position = wrap_image(b.pos, &contact, self.width, self.height);
                Some(ghost)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn gravity(&self) -> f64 {
        self.field.g
    }

    pub fn boundary_policy(&self) -> BoundaryPolicy {
        self.boundary
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Configuration the next reset will use
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(Body::mass).sum()
    }

    /// `sum m_i v_i`
    pub fn total_momentum(&self) -> Vector2 {
        self.bodies.iter().map(Body::momentum).sum()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies
            .iter()
            .map(|b| 0.5 * b.mass() * b.vel.length_squared())
            .sum()
    }

    pub fn potential_energy(&self) -> f64 {
        self.field.potential_energy(&self.bodies)
    }
}

/// Uniform placement in a square around the domain centre, at rest
fn spawn_bodies(config: &SimConfig, seed: u64) -> Vec<Body> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let center = Vector2::new(config.width / 2.0, config.height / 2.0);
    let spread = config.spawn_spread();

    // validate() keeps body_count within the u32 id range
    (0..config.body_count)
        .map(|i| {
            let offset = Vector2::new(
                rng.random_range(-spread..=spread),
                rng.random_range(-spread..=spread),
            );
            Body::at_rest(i as u32, center + offset, config.initial_mass)
        })
        .collect()
}
