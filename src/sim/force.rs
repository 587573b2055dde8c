//! Newtonian gravity between every pair of bodies
//!
//! `a_i = sum_{j != i} G * m_j * (p_j - p_i) / |p_j - p_i|^3`
//!
//! Direct O(N^2) summation, each unordered pair visited once and applied
//! equal and opposite. This is the dominant cost of a step.

use super::body::Body;
use crate::Vector2;

/// Smallest separation fed into the inverse cube.
///
/// Coincident bodies have a zero displacement and therefore contribute zero
/// acceleration; nearly coincident ones get a large but finite pull.
pub const MIN_SEPARATION: f64 = 1e-6;

/// Gravitational acceleration field for a body set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceField {
    /// Gravitational constant
    pub g: f64,
}

impl ForceField {
    pub fn new(g: f64) -> Self {
        Self { g }
    }

    /// Acceleration of every body, index-aligned with `bodies`
    pub fn accelerations(&self, bodies: &[Body]) -> Vec<Vector2> {
        let positions: Vec<Vector2> = bodies.iter().map(|b| b.pos).collect();
        let masses: Vec<f64> = bodies.iter().map(|b| b.mass()).collect();
        let mut out = vec![Vector2::ZERO; bodies.len()];
        self.accumulate(&positions, &masses, &mut out);
        out
    }

    /// Write accelerations for the given positions and masses into `out`.
    ///
    /// All three slices are index-aligned. `out` is zeroed first.
    pub fn accumulate(&self, positions: &[Vector2], masses: &[f64], out: &mut [Vector2]) {
        debug_assert_eq!(positions.len(), masses.len());
        debug_assert_eq!(positions.len(), out.len());

        out.fill(Vector2::ZERO);

        let n = positions.len();
        for i in 0..n {
            let pi = positions[i];
            for j in (i + 1)..n {
                // i is pulled along +r, j along -r
                let r = positions[j] - pi;
                let dist = r.length().max(MIN_SEPARATION);
                let inv_d3 = 1.0 / (dist * dist * dist);

                out[i] += r * (self.g * masses[j] * inv_d3);
                out[j] -= r * (self.g * masses[i] * inv_d3);
            }
        }
    }

    /// Total pairwise potential energy, `-G m_i m_j / |r|`, using the same
    /// separation clamp as the force
    pub fn potential_energy(&self, bodies: &[Body]) -> f64 {
        let mut energy = 0.0;
        for (i, bi) in bodies.iter().enumerate() {
            for bj in &bodies[i + 1..] {
                let dist = (bj.pos - bi.pos).length().max(MIN_SEPARATION);
                energy -= self.g * bi.mass() * bj.mass() / dist;
            }
        }
        energy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(dist: f64, m1: f64, m2: f64) -> Vec<Body> {
        vec![
            Body::at_rest(0, Vector2::new(-dist / 2.0, 0.0), m1),
            Body::at_rest(1, Vector2::new(dist / 2.0, 0.0), m2),
        ]
    }

    #[test]
    fn test_reference_pair_magnitude() {
        // m = 5, G = 100, 10 apart: 100 * 5 / 10^2 = 5 toward the other body
        let bodies = vec![
            Body::at_rest(0, Vector2::new(0.0, 0.0), 5.0),
            Body::at_rest(1, Vector2::new(10.0, 0.0), 5.0),
        ];
        let acc = ForceField::new(100.0).accelerations(&bodies);

        assert!((acc[0].x - 5.0).abs() < 1e-12);
        assert_eq!(acc[0].y, 0.0);
        assert!((acc[1].x + 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_newton_third_law() {
        let bodies = pair(1.0, 2.0, 3.0);
        let acc = ForceField::new(0.1).accelerations(&bodies);

        let net = acc[0] * bodies[0].mass() + acc[1] * bodies[1].mass();
        assert!(net.length() < 1e-12, "net force not zero: {net:?}");
    }

    #[test]
    fn test_inverse_square() {
        let field = ForceField::new(1.0);
        let near = field.accelerations(&pair(1.0, 1.0, 1.0));
        let far = field.accelerations(&pair(2.0, 1.0, 1.0));

        let ratio = near[0].length() / far[0].length();
        assert!((ratio - 4.0).abs() < 1e-9, "expected 4x, got {ratio}");
    }

    #[test]
    fn test_negative_gravity_repels() {
        let bodies = pair(2.0, 1.0, 1.0);
        let acc = ForceField::new(-1.0).accelerations(&bodies);
        assert!(acc[0].x < 0.0);
        assert!(acc[1].x > 0.0);
    }

    #[test]
    fn test_superposition_of_three() {
        // Body in the middle of two equal masses feels nothing
        let bodies = vec![
            Body::at_rest(0, Vector2::new(-3.0, 0.0), 2.0),
            Body::at_rest(1, Vector2::new(0.0, 0.0), 1.0),
            Body::at_rest(2, Vector2::new(3.0, 0.0), 2.0),
        ];
        let acc = ForceField::new(10.0).accelerations(&bodies);
        assert!(acc[1].length() < 1e-12);
        assert!(acc[0].x > 0.0);
        assert!(acc[2].x < 0.0);
    }

    #[test]
    fn test_coincident_bodies_are_finite() {
        let bodies = vec![
            Body::at_rest(0, Vector2::new(5.0, 5.0), 1.0),
            Body::at_rest(1, Vector2::new(5.0, 5.0), 1.0),
        ];
        let acc = ForceField::new(100.0).accelerations(&bodies);
        assert_eq!(acc[0], Vector2::ZERO);
        assert_eq!(acc[1], Vector2::ZERO);
    }

    #[test]
    fn test_separation_clamp_bounds_acceleration() {
        let gap = MIN_SEPARATION / 1000.0;
        let bodies = pair(gap, 1.0, 1.0);
        let acc = ForceField::new(1.0).accelerations(&bodies);

        // Clamped: |a| = G m |r| / MIN_SEPARATION^3
        let expected = gap / MIN_SEPARATION.powi(3);
        assert!(acc[0].x.is_finite());
        assert!((acc[0].x - expected).abs() / expected < 1e-9);
    }

    #[test]
    fn test_empty_and_single() {
        let field = ForceField::new(1.0);
        assert!(field.accelerations(&[]).is_empty());

        let lone = vec![Body::at_rest(0, Vector2::new(1.0, 1.0), 3.0)];
        assert_eq!(field.accelerations(&lone), vec![Vector2::ZERO]);
        assert_eq!(field.potential_energy(&lone), 0.0);
    }

    #[test]
    fn test_potential_energy_pair() {
        let bodies = pair(2.0, 3.0, 4.0);
        let energy = ForceField::new(1.5).potential_energy(&bodies);
        assert!((energy + 1.5 * 3.0 * 4.0 / 2.0).abs() < 1e-12);
    }
}
