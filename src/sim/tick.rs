//! Fixed-interval simulation step
//!
//! One step, in order: move every qyut and bounce it off the viewport edges,
//! find overlapping pairs on the post-motion positions, reverse and count the
//! colliders, then drop every qyut that has worn out.

use super::collision::{find_collisions, resolve_collisions};
use super::state::{Qyut, SimParams};
use crate::Viewport;

/// Summary of what happened during a step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Colliding pairs found this step
    pub pairs: usize,
    /// Distinct qyuts that collided this step
    pub collided: usize,
    /// IDs removed for reaching the removal threshold
    pub removed: Vec<u32>,
}

/// Move a qyut one tick and reflect it off the viewport edges.
///
/// Each axis is handled on its own: leaving `[0, dimension - size]` flips
/// that axis's direction and clamps the position back into range.
pub fn move_qyut(qyut: &mut Qyut, viewport: Viewport, params: &SimParams) {
    let max = viewport.max_corner(params.size);
    let mut pos = qyut.pos + qyut.vel * params.speed;

    if pos.x < 0.0 || pos.x > max.x {
        qyut.vel.x = -qyut.vel.x;
        pos.x = pos.x.clamp(0.0, max.x);
    }
    if pos.y < 0.0 || pos.y > max.y {
        qyut.vel.y = -qyut.vel.y;
        pos.y = pos.y.clamp(0.0, max.y);
    }

    qyut.pos = pos;
    qyut.rotation += params.rotation_step;
}

/// Advance a set of qyuts by one tick, returning the next set
pub fn step(qyuts: &[Qyut], viewport: Viewport, params: &SimParams) -> Vec<Qyut> {
    step_with_report(qyuts, viewport, params).0
}

/// Advance a set of qyuts by one tick, also reporting collisions and removals
pub fn step_with_report(
    qyuts: &[Qyut],
    viewport: Viewport,
    params: &SimParams,
) -> (Vec<Qyut>, StepReport) {
    let mut next = qyuts.to_vec();

    // Motion first: collisions are tested on post-motion positions
    for qyut in &mut next {
        move_qyut(qyut, viewport, params);
    }

    let pairs = find_collisions(&next, params.size);
    let collided = resolve_collisions(&mut next, &pairs);

    let mut removed = Vec::new();
    next.retain(|q| {
        let keep = q.collision_count < params.removal_threshold;
        if !keep {
            removed.push(q.id);
        }
        keep
    });

    let report = StepReport {
        pairs: pairs.len(),
        collided,
        removed,
    };
    (next, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::is_colliding;
    use glam::Vec2;
    use proptest::prelude::*;

    const VP: Viewport = Viewport::new(800.0, 600.0);

    fn qyut(id: u32, x: f32, y: f32, dx: f32, dy: f32) -> Qyut {
        Qyut::new(id, Vec2::new(x, y), Vec2::new(dx, dy))
    }

    #[test]
    fn test_free_motion_and_rotation() {
        let params = SimParams::default();
        let next = step(&[qyut(1, 100.0, 100.0, 1.0, -1.0)], VP, &params);

        assert_eq!(next[0].pos, Vec2::new(110.0, 90.0));
        assert_eq!(next[0].vel, Vec2::new(1.0, -1.0));
        assert_eq!(next[0].rotation, 15.0);
        assert_eq!(next[0].collision_count, 0);
    }

    #[test]
    fn test_right_wall_clamps_and_reflects() {
        let params = SimParams::default();
        // One pixel past the right limit, heading right
        let start = qyut(1, VP.width - params.size + 1.0, 200.0, 1.0, 1.0);
        let next = step(&[start], VP, &params);

        assert_eq!(next[0].pos.x, VP.width - params.size);
        assert!(next[0].vel.x < 0.0);
        // Other axis untouched
        assert_eq!(next[0].pos.y, 210.0);
        assert_eq!(next[0].vel.y, 1.0);
    }

    #[test]
    fn test_bottom_left_corner_reflects_both_axes() {
        let params = SimParams::default();
        let next = step(&[qyut(1, 3.0, 4.0, -1.0, -1.0)], VP, &params);

        assert_eq!(next[0].pos, Vec2::ZERO);
        assert_eq!(next[0].vel, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_shrunken_viewport_pulls_qyut_back_in() {
        let params = SimParams::default();
        let start = qyut(1, 700.0, 500.0, 1.0, 1.0);
        let small = Viewport::new(400.0, 300.0);
        let next = step(&[start], small, &params);

        assert_eq!(next[0].pos, Vec2::new(320.0, 220.0));
        assert_eq!(next[0].vel, Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn test_viewport_smaller_than_qyut_pins_to_origin() {
        let params = SimParams::default();
        let tiny = Viewport::new(50.0, 30.0);
        let mut swarm = vec![qyut(1, 10.0, 5.0, 1.0, 1.0)];

        for n in 1..=4 {
            swarm = step(&swarm, tiny, &params);
            assert_eq!(swarm[0].pos, Vec2::ZERO);
            assert_eq!(swarm[0].rotation, params.rotation_step * n as f32);
        }
    }

    #[test]
    fn test_overlapping_pair_reverses_and_counts() {
        let params = SimParams::default();
        let a = qyut(1, 100.0, 100.0, 1.0, 1.0);
        let b = qyut(2, 150.0, 120.0, -1.0, 1.0);
        let (next, report) = step_with_report(&[a, b], VP, &params);

        assert_eq!(next[0].vel, Vec2::new(-1.0, -1.0));
        assert_eq!(next[1].vel, Vec2::new(1.0, -1.0));
        assert_eq!(next[0].collision_count, 1);
        assert_eq!(next[1].collision_count, 1);
        assert_eq!(report.pairs, 1);
        assert_eq!(report.collided, 2);
        assert!(report.removed.is_empty());
    }

    #[test]
    fn test_collision_uses_post_motion_positions() {
        let params = SimParams::default();
        // Exactly `size` apart before moving, 60 apart after
        let a = qyut(1, 100.0, 100.0, 1.0, 1.0);
        let b = qyut(2, 180.0, 100.0, -1.0, 1.0);
        assert!(!is_colliding(&a, &b, params.size));

        let next = step(&[a, b], VP, &params);
        assert_eq!(next[0].collision_count, 1);
        assert_eq!(next[1].collision_count, 1);
    }

    #[test]
    fn test_reaching_threshold_removes_same_step() {
        let params = SimParams::default();
        let mut a = qyut(1, 100.0, 100.0, 1.0, 1.0);
        let mut b = qyut(2, 120.0, 100.0, 1.0, 1.0);
        a.collision_count = 14;
        b.collision_count = 13;

        let (next, report) = step_with_report(&[a, b], VP, &params);
        assert_eq!(report.removed, vec![1]);
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].id, 2);
        assert_eq!(next[0].collision_count, 14);
    }

    #[test]
    fn test_over_threshold_input_is_pruned() {
        let params = SimParams::default();
        let mut worn = qyut(1, 300.0, 300.0, 1.0, 1.0);
        worn.collision_count = 20;

        let next = step(&[worn, qyut(2, 10.0, 10.0, 1.0, 1.0)], VP, &params);
        assert_eq!(next.iter().map(|q| q.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_step_is_pure() {
        let params = SimParams::default();
        let input = vec![qyut(1, 100.0, 100.0, 1.0, 1.0), qyut(2, 110.0, 100.0, -1.0, 1.0)];
        let copy = input.clone();
        let first = step(&input, VP, &params);
        let second = step(&input, VP, &params);

        assert_eq!(input, copy);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_set() {
        let (next, report) = step_with_report(&[], VP, &SimParams::default());
        assert!(next.is_empty());
        assert_eq!(report, StepReport::default());
    }

    fn arb_qyut(id: u32) -> impl Strategy<Value = Qyut> {
        (
            -50.0f32..900.0,
            -50.0f32..700.0,
            prop::bool::ANY,
            prop::bool::ANY,
            0u32..20,
        )
            .prop_map(move |(x, y, sx, sy, count)| {
                let mut q = qyut(
                    id,
                    x,
                    y,
                    if sx { 1.0 } else { -1.0 },
                    if sy { 1.0 } else { -1.0 },
                );
                q.collision_count = count;
                q
            })
    }

    fn arb_swarm() -> impl Strategy<Value = Vec<Qyut>> {
        (0usize..24).prop_flat_map(|n| {
            (0..n as u32)
                .map(|i| arb_qyut(i + 1))
                .collect::<Vec<_>>()
        })
    }

    fn arb_viewport() -> impl Strategy<Value = Viewport> {
        (1.0f32..1200.0, 1.0f32..900.0).prop_map(|(w, h)| Viewport::new(w, h))
    }

    proptest! {
        #[test]
        fn prop_positions_stay_in_bounds(swarm in arb_swarm(), vp in arb_viewport()) {
            let params = SimParams::default();
            let max = vp.max_corner(params.size);
            for q in step(&swarm, vp, &params) {
                prop_assert!(q.pos.x >= 0.0 && q.pos.x <= max.x);
                prop_assert!(q.pos.y >= 0.0 && q.pos.y <= max.y);
            }
        }

        #[test]
        fn prop_counts_rise_by_at_most_one(swarm in arb_swarm(), vp in arb_viewport()) {
            let params = SimParams::default();
            for q in step(&swarm, vp, &params) {
                let before = swarm.iter().find(|p| p.id == q.id).unwrap();
                prop_assert!(q.collision_count >= before.collision_count);
                prop_assert!(q.collision_count <= before.collision_count + 1);
            }
        }

        #[test]
        fn prop_worn_out_never_survive(swarm in arb_swarm(), vp in arb_viewport()) {
            let params = SimParams::default();
            let next = step(&swarm, vp, &params);
            for q in &swarm {
                if q.collision_count >= params.removal_threshold {
                    prop_assert!(next.iter().all(|n| n.id != q.id));
                }
            }
            prop_assert!(next.iter().all(|q| q.collision_count < params.removal_threshold));
        }

        #[test]
        fn prop_collision_test_symmetric(a in arb_qyut(1), b in arb_qyut(2)) {
            let size = SimParams::default().size;
            prop_assert_eq!(is_colliding(&a, &b, size), is_colliding(&b, &a, size));
        }

        #[test]
        fn prop_pairs_unique_and_never_self(swarm in arb_swarm()) {
            let pairs = find_collisions(&swarm, SimParams::default().size);
            for (n, &(i, j)) in pairs.iter().enumerate() {
                prop_assert!(i < j);
                prop_assert!(!pairs[n + 1..].contains(&(i, j)));
            }
            let expected = (0..swarm.len())
                .flat_map(|i| (i + 1..swarm.len()).map(move |j| (i, j)))
                .filter(|&(i, j)| is_colliding(&swarm[i], &swarm[j], SimParams::default().size))
                .count();
            prop_assert_eq!(pairs.len(), expected);
        }

        #[test]
        fn prop_directions_stay_unit_signs(swarm in arb_swarm(), vp in arb_viewport()) {
            for q in step(&swarm, vp, &SimParams::default()) {
                prop_assert_eq!(q.vel.x.abs(), 1.0);
                prop_assert_eq!(q.vel.y.abs(), 1.0);
            }
        }
    }
}
