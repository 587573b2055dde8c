//! Point masses and their read-only snapshots

use serde::{Deserialize, Serialize};

use crate::{Vector2, radius_for_mass};

/// A point mass
///
/// Radius is derived from mass and cached. Mass is only ever changed through
/// [`Body::absorb_mass`], which recomputes the radius in the same call.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: u32,
    pub pos: Vector2,
    pub vel: Vector2,
    mass: f64,
    radius: f64,
}

impl Body {
    pub fn new(id: u32, pos: Vector2, vel: Vector2, mass: f64) -> Self {
        Self {
            id,
            pos,
            vel,
            mass,
            radius: radius_for_mass(mass),
        }
    }

    /// Body at rest
    pub fn at_rest(id: u32, pos: Vector2, mass: f64) -> Self {
        Self::new(id, pos, Vector2::ZERO, mass)
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn momentum(&self) -> Vector2 {
        self.vel * self.mass
    }

    /// Replace mass and velocity after a merge
    pub(crate) fn absorb_mass(&mut self, mass: f64, vel: Vector2) {
        self.mass = mass;
        self.radius = radius_for_mass(mass);
        self.vel = vel;
    }

    /// Copy out for renderers
    pub fn snapshot(&self) -> BodySnapshot {
        BodySnapshot {
            id: self.id,
            position: self.pos,
            velocity: self.vel,
            mass: self.mass,
            radius: self.radius,
        }
    }
}

/// Owned view of a live body, handed to rendering collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub id: u32,
    pub position: Vector2,
    pub velocity: Vector2,
    pub mass: f64,
    pub radius: f64,
}

impl BodySnapshot {
    /// Point one radius behind the body along its motion, for drawing traces.
    /// `None` when the body is at rest.
    pub fn trace_point(&self) -> Option<Vector2> {
        let speed = self.velocity.length();
        if speed == 0.0 {
            return None;
        }
        Some(self.position - self.velocity * (self.radius / speed))
    }
}
