//! Classical fourth-order Runge-Kutta step for the whole body set
//!
//! State per body is (position, velocity); its derivative is
//! (velocity, acceleration). Every stage evaluates the force field on a
//! frozen copy of the positions, and bodies are only written back once all
//! four stages are done. Masses do not change during a step.

use super::body::Body;
use super::force::ForceField;
use crate::Vector2;

/// Stage increments: `dt * velocity` and `dt * acceleration` per body
struct Stage {
    dp: Vec<Vector2>,
    dv: Vec<Vector2>,
}

/// Scratch buffers reused across the four stages
struct Workspace<'a> {
    field: &'a ForceField,
    masses: Vec<f64>,
    pos: Vec<Vector2>,
    vel: Vec<Vector2>,
    acc: Vec<Vector2>,
}

impl Workspace<'_> {
    /// Evaluate the derivative at `(p0 + scale * dp, v0 + scale * dv)` and
    /// multiply it by `dt`
    fn stage(
        &mut self,
        p0: &[Vector2],
        v0: &[Vector2],
        prev: Option<(&Stage, f64)>,
        dt: f64,
    ) -> Stage {
        match prev {
            Some((k, scale)) => {
                for i in 0..p0.len() {
                    self.pos[i] = p0[i] + k.dp[i] * scale;
                    self.vel[i] = v0[i] + k.dv[i] * scale;
                }
            }
            None => {
                self.pos.copy_from_slice(p0);
                self.vel.copy_from_slice(v0);
            }
        }

        self.field.accumulate(&self.pos, &self.masses, &mut self.acc);

        Stage {
            dp: self.vel.iter().map(|v| *v * dt).collect(),
            dv: self.acc.iter().map(|a| *a * dt).collect(),
        }
    }
}

/// Advance every body by `dt` under `field`
pub fn rk4_step(bodies: &mut [Body], field: &ForceField, dt: f64) {
    let n = bodies.len();
    if n == 0 {
        return;
    }

    let p0: Vec<Vector2> = bodies.iter().map(|b| b.pos).collect();
    let v0: Vec<Vector2> = bodies.iter().map(|b| b.vel).collect();

    let mut ws = Workspace {
        field,
        masses: bodies.iter().map(|b| b.mass()).collect(),
        pos: vec![Vector2::ZERO; n],
        vel: vec![Vector2::ZERO; n],
        acc: vec![Vector2::ZERO; n],
    };

    let k1 = ws.stage(&p0, &v0, None, dt);
    let k2 = ws.stage(&p0, &v0, Some((&k1, 0.5)), dt);
    let k3 = ws.stage(&p0, &v0, Some((&k2, 0.5)), dt);
    let k4 = ws.stage(&p0, &v0, Some((&k3, 1.0)), dt);

    for (i, body) in bodies.iter_mut().enumerate() {
        body.pos = p0[i] + (k1.dp[i] + k2.dp[i] * 2.0 + k3.dp[i] * 2.0 + k4.dp[i]) / 6.0;
        body.vel = v0[i] + (k1.dv[i] + k2.dv[i] * 2.0 + k3.dv[i] * 2.0 + k4.dv[i]) / 6.0;
    }
}
