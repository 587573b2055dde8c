//! Simulation configuration
//!
//! One engine, parameterized by data: body count, domain, gravity, mass,
//! timestep, wall behaviour and seed. Loaded from JSON or built in code.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

/// How bodies interact with the domain walls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Elastic reflection off the wall
    #[default]
    Bounce,
    /// Periodic domain: leave one side, reappear on the other
    Wraparound,
}

impl BoundaryPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryPolicy::Bounce => "bounce",
            BoundaryPolicy::Wraparound => "wraparound",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bounce" => Some(BoundaryPolicy::Bounce),
            "wraparound" | "wrap" | "periodic" => Some(BoundaryPolicy::Wraparound),
            _ => None,
        }
    }

    /// The other policy (the UI's bounce checkbox)
    pub fn toggled(&self) -> Self {
        match self {
            BoundaryPolicy::Bounce => BoundaryPolicy::Wraparound,
            BoundaryPolicy::Wraparound => BoundaryPolicy::Bounce,
        }
    }
}

/// Parameters a [`System`](crate::sim::System) is built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of bodies spawned on reset
    pub body_count: usize,
    /// Domain width
    pub width: f64,
    /// Domain height
    pub height: f64,
    /// Gravitational constant (negative values repel)
    pub gravity: f64,
    /// Mass of every spawned body
    pub initial_mass: f64,
    /// Timestep used by [`System::tick`](crate::sim::System::tick)
    pub dt: f64,
    /// Wall behaviour
    pub boundary: BoundaryPolicy,
    /// Placement seed; `None` draws a fresh one per reset
    pub seed: Option<u64>,
    /// Half-extent of the spawn square around the domain centre.
    /// Defaults to an eighth of the smaller edge.
    pub spawn_spread: Option<f64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            body_count: BODY_COUNT,
            width: DOMAIN_SIZE,
            height: DOMAIN_SIZE,
            gravity: GRAVITY,
            initial_mass: INITIAL_MASS,
            dt: SIM_DT,
            boundary: BoundaryPolicy::Bounce,
            seed: None,
            spawn_spread: None,
        }
    }
}

impl SimConfig {
    /// Default configuration with a fixed seed (reproducible placement)
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Check every field; the first violation wins
    pub fn validate(&self) -> Result<(), SimError> {
        if self.body_count == 0 {
            return Err(SimError::config("body_count must be greater than zero"));
        }
        if u32::try_from(self.body_count).is_err() {
            return Err(SimError::config(format!(
                "body_count {} exceeds the id range ({})",
                self.body_count,
                u32::MAX
            )));
        }
        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("initial_mass", self.initial_mass)?;
        positive("dt", self.dt)?;
        if !self.gravity.is_finite() {
            return Err(SimError::config(format!(
                "gravity must be finite, got {}",
                self.gravity
            )));
        }
        if let Some(spread) = self.spawn_spread {
            if !spread.is_finite() || spread < 0.0 {
                return Err(SimError::config(format!(
                    "spawn_spread must be finite and non-negative, got {spread}"
                )));
            }
        }
        Ok(())
    }

    /// Effective spawn half-extent
    pub fn spawn_spread(&self) -> f64 {
        self.spawn_spread
            .unwrap_or(self.width.min(self.height) * SPAWN_SPREAD_FRACTION)
    }

    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn positive(field: &str, value: f64) -> Result<(), SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::config(format!(
            "{field} must be finite and greater than zero, got {value}"
        )))
    }
}
