//! Wall contact detection and response for the rectangular domain
//!
//! The domain spans `[0, width] x [0, height]`, with y growing downwards
//! (screen convention, so "top" is `y = 0`). Walls are checked in a fixed
//! order (left, right, top, bottom) and the first one touched wins; corners
//! get no special treatment.

use super::body::Body;
use crate::Vector2;
use crate::config::BoundaryPolicy;

/// One side of the domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
    Top,
    Bottom,
}

impl Wall {
    /// Unit normal pointing back into the domain
    pub fn inward_normal(self) -> Vector2 {
        match self {
            Wall::Left => Vector2::X,
            Wall::Right => Vector2::NEG_X,
            Wall::Top => Vector2::Y,
            Wall::Bottom => Vector2::NEG_Y,
        }
    }
}

/// A body touching or overlapping a wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallContact {
    pub wall: Wall,
    /// Inward unit normal of `wall`
    pub normal: Vector2,
}

/// First wall touched by a circle, if any
pub fn wall_contact(pos: Vector2, radius: f64, width: f64, height: f64) -> Option<WallContact> {
    let wall = if pos.x - radius <= 0.0 {
        Wall::Left
    } else if pos.x + radius >= width {
        Wall::Right
    } else if pos.y - radius <= 0.0 {
        Wall::Top
    } else if pos.y + radius >= height {
        Wall::Bottom
    } else {
        return None;
    };

    Some(WallContact {
        wall,
        normal: wall.inward_normal(),
    })
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vector2, normal: Vector2) -> Vector2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Position translated by the full domain extent across the contacted wall
pub fn wrap_image(pos: Vector2, contact: &WallContact, width: f64, height: f64) -> Vector2 {
    let n = contact.normal;
    match contact.wall {
        Wall::Left | Wall::Right => Vector2::new(pos.x + n.x * width, pos.y),
        Wall::Top | Wall::Bottom => Vector2::new(pos.x, pos.y + n.y * height),
    }
}

/// Resolve wall contact for one body under `policy`
///
/// Contact alone selects the correction, whatever the direction of motion.
/// A bounced body still overlapping its wall is reflected again on the next
/// call, and a wrapped body landing against the opposite wall is wrapped
/// again. Bounce leaves the position where integration put it.
///
/// Returns the contact that was resolved, if any.
pub fn apply_boundary(
    body: &mut Body,
    policy: BoundaryPolicy,
    width: f64,
    height: f64,
) -> Option<WallContact> {
    let contact = wall_contact(body.pos, body.radius(), width, height)?;

    match policy {
        BoundaryPolicy::Bounce => {
            body.vel = reflect_velocity(body.vel, contact.normal);
        }
        BoundaryPolicy::Wraparound => {
            body.pos = wrap_image(body.pos, &contact, width, height);
        }
    }

    log::trace!(
        "Body {} hit {:?} wall ({})",
        body.id,
        contact.wall,
        policy.as_str()
    );
    Some(contact)
}
