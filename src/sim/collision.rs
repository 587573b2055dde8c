//! Overlap detection and momentum-conserving merges
//!
//! Two bodies hit when their centres are closer than the sum of their radii.
//! The lower-index body absorbs the other: masses add, momentum is conserved,
//! position and id of the survivor are kept, and the radius is re-derived.

use super::body::Body;

/// Record of one merge, for logging and collaborators
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeEvent {
    /// Id of the body that survived
    pub survivor: u32,
    /// Id of the body that was removed
    pub absorbed: u32,
    /// Survivor's mass after the merge
    pub mass: f64,
}

/// Whether two bodies overlap. Symmetric in its arguments.
#[inline]
pub fn check_hit(a: &Body, b: &Body) -> bool {
    (a.pos - b.pos).length() < a.radius() + b.radius()
}

/// Fold `other` into `survivor`
///
/// `m' = m_a + m_b`, `v' = (v_a m_a + v_b m_b) / m'`. Position is unchanged.
pub fn merge_into(survivor: &mut Body, other: &Body) {
    let mass = survivor.mass() + other.mass();
    let vel = (survivor.momentum() + other.momentum()) / mass;
    survivor.absorb_mass(mass, vel);
}

/// Merge every overlapping pair in `bodies`, removing absorbed bodies.
///
/// For each survivor index `i` the scan restarts at `i + 1` after every merge.
/// Removing `j` shifts later bodies down, and the survivor has just grown, so
/// bodies already passed over may now overlap it; restarting checks them
/// again instead of skipping them. Order of the remaining bodies is kept.
pub fn resolve_collisions(bodies: &mut Vec<Body>) -> Vec<MergeEvent> {
    let mut events = Vec::new();

    let mut i = 0;
    while i < bodies.len() {
        let mut j = i + 1;
        while j < bodies.len() {
            if check_hit(&bodies[i], &bodies[j]) {
                let absorbed = bodies.remove(j);
                let survivor = &mut bodies[i];
                merge_into(survivor, &absorbed);

                log::debug!(
                    "Body {} absorbed body {} (mass {:.3})",
                    survivor.id,
                    absorbed.id,
                    survivor.mass()
                );
                events.push(MergeEvent {
                    survivor: survivor.id,
                    absorbed: absorbed.id,
                    mass: survivor.mass(),
                });

                j = i + 1;
            } else {
                j += 1;
            }
        }
        i += 1;
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vector2;
    use proptest::prelude::*;

    #[test]
    fn test_hit_threshold_is_strict() {
        // Centres exactly one radius sum apart: touching is not a hit
        let a = Body::at_rest(0, Vector2::new(0.0, 0.0), 8.0);
        let touching = 2.0 * a.radius();
        let b = Body::at_rest(1, Vector2::new(touching, 0.0), 8.0);
        assert!(!check_hit(&a, &b));

        let c = Body::at_rest(2, Vector2::new(touching - 1e-3, 0.0), 8.0);
        assert!(check_hit(&a, &c));
    }

    #[test]
    fn test_merge_conserves_momentum() {
        let mut a = Body::new(0, Vector2::new(1.0, 1.0), Vector2::new(2.0, 0.0), 3.0);
        let b = Body::new(1, Vector2::new(1.5, 1.0), Vector2::new(-1.0, 4.0), 5.0);
        let before = a.momentum() + b.momentum();

        merge_into(&mut a, &b);

        assert_eq!(a.mass(), 8.0);
        assert!((a.momentum() - before).length() < 1e-12);
        assert!((a.radius() - 2.0).abs() < 1e-12);
        assert_eq!(a.pos, Vector2::new(1.0, 1.0));
        assert_eq!(a.id, 0);
    }

    #[test]
    fn test_resolve_removes_absorbed_and_keeps_ids() {
        let mut bodies = vec![
            Body::at_rest(0, Vector2::new(0.0, 0.0), 1.0),
            Body::at_rest(1, Vector2::new(100.0, 0.0), 1.0),
            Body::at_rest(2, Vector2::new(0.5, 0.0), 1.0),
            Body::at_rest(3, Vector2::new(200.0, 0.0), 1.0),
        ];
        let events = resolve_collisions(&mut bodies);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].survivor, 0);
        assert_eq!(events[0].absorbed, 2);
        assert_eq!(events[0].mass, 2.0);
        let ids: Vec<u32> = bodies.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![0, 1, 3]);
    }

    #[test]
    fn test_chain_collapses_into_one() {
        // Tightly packed row: each merge grows body 0 enough to reach the next
        let mut bodies: Vec<Body> = (0..6)
            .map(|i| Body::at_rest(i, Vector2::new(i as f64 * 0.5, 0.0), 1.0))
            .collect();
        let events = resolve_collisions(&mut bodies);

        assert_eq!(bodies.len(), 1);
        assert_eq!(events.len(), 5);
        assert_eq!(bodies[0].id, 0);
        assert_eq!(bodies[0].mass(), 6.0);
    }

    #[test]
    fn test_rescans_after_survivor_grows() {
        // Body 1 does not touch body 0 at first (gap 2.05 > 1 + 1), but once
        // body 0 swallows body 2 (radius grows to 2) it does. A forward scan
        // that only moves on after a splice would never compare them again
        // this pass and leave 1 behind.
        let mut bodies = vec![
            Body::at_rest(0, Vector2::new(0.0, 0.0), 1.0),
            Body::at_rest(1, Vector2::new(2.05, 0.0), 1.0),
            Body::at_rest(2, Vector2::new(0.0, 0.5), 7.0),
        ];
        let events = resolve_collisions(&mut bodies);

        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0].mass(), 9.0);
        let absorbed: Vec<u32> = events.iter().map(|e| e.absorbed).collect();
        assert_eq!(absorbed, vec![2, 1]);
    }

    #[test]
    fn test_no_hits_is_untouched() {
        let mut bodies = vec![
            Body::at_rest(0, Vector2::new(0.0, 0.0), 1.0),
            Body::at_rest(1, Vector2::new(10.0, 0.0), 1.0),
        ];
        let snapshot = bodies.clone();
        assert!(resolve_collisions(&mut bodies).is_empty());
        assert_eq!(bodies, snapshot);
    }

    fn arb_body(id: u32) -> impl Strategy<Value = Body> {
        (
            -50.0..50.0f64,
            -50.0..50.0f64,
            -10.0..10.0f64,
            -10.0..10.0f64,
            0.01..100.0f64,
        )
            .prop_map(move |(x, y, vx, vy, m)| {
                Body::new(id, Vector2::new(x, y), Vector2::new(vx, vy), m)
            })
    }

    proptest! {
        #[test]
        fn prop_hit_is_symmetric(a in arb_body(0), b in arb_body(1)) {
            prop_assert_eq!(check_hit(&a, &b), check_hit(&b, &a));
        }

        #[test]
        fn prop_merge_momentum_law(a in arb_body(0), b in arb_body(1)) {
            let expected = a.momentum() + b.momentum();
            let mut merged = a.clone();
            merge_into(&mut merged, &b);

            let scale = (a.momentum().length() + b.momentum().length()).max(1.0);
            prop_assert!((merged.momentum() - expected).length() <= 1e-12 * scale);
            prop_assert!((merged.mass() - (a.mass() + b.mass())).abs() <= 1e-12 * merged.mass());
            prop_assert!((merged.radius() - merged.mass().cbrt()).abs() <= 1e-12);
            prop_assert_eq!(merged.pos, a.pos);
        }

        #[test]
        fn prop_resolve_conserves_mass_and_momentum(
            bodies in prop::collection::vec(arb_body(0), 0..12)
        ) {
            let mut bodies: Vec<Body> = bodies
                .into_iter()
                .enumerate()
                .map(|(i, mut b)| { b.id = i as u32; b })
                .collect();
            let mass: f64 = bodies.iter().map(|b| b.mass()).sum();
            let momentum: Vector2 = bodies.iter().map(|b| b.momentum()).sum();
            let count = bodies.len();

            let events = resolve_collisions(&mut bodies);

            prop_assert_eq!(bodies.len() + events.len(), count);
            let after_mass: f64 = bodies.iter().map(|b| b.mass()).sum();
            let after_momentum: Vector2 = bodies.iter().map(|b| b.momentum()).sum();
            prop_assert!((after_mass - mass).abs() <= 1e-9 * mass.max(1.0));
            prop_assert!((after_momentum - momentum).length() <= 1e-9 * mass.max(1.0) * 20.0);

            // Ids stay unique and in their original relative order
            let ids: Vec<u32> = bodies.iter().map(|b| b.id).collect();
            prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
