//! Qyut-vs-qyut collision detection and response
//!
//! Qyuts collide when their squares overlap on both axes (strict AABB
//! test on corner positions). There is no mass or restitution: a hit simply
//! reverses both direction signs of both qyuts.

use super::state::Qyut;

/// Check whether two qyuts' squares overlap
#[inline]
pub fn is_colliding(a: &Qyut, b: &Qyut, size: f32) -> bool {
    (a.pos.x - b.pos.x).abs() < size && (a.pos.y - b.pos.y).abs() < size
}

/// Find every colliding pair as `(i, j)` indices with `i < j`.
///
/// Each unordered pair is tested exactly once, in row-major order.
pub fn find_collisions(qyuts: &[Qyut], size: f32) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..qyuts.len() {
        for j in (i + 1)..qyuts.len() {
            if is_colliding(&qyuts[i], &qyuts[j], size) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Apply collision response for the given pairs.
///
/// Every pair flips both direction components of both members, in pair
/// order. A qyut in an even number of pairs therefore keeps its heading.
/// Each qyut that appears in at least one pair gains exactly one collision
/// for the tick, however many pairs it was in.
///
/// Returns the number of distinct qyuts that collided.
pub fn resolve_collisions(qyuts: &mut [Qyut], pairs: &[(usize, usize)]) -> usize {
    // Staged counts for this tick, indexed like `qyuts`
    let mut staged: Vec<Option<u32>> = vec![None; qyuts.len()];

    for &(i, j) in pairs {
        qyuts[i].vel = -qyuts[i].vel;
        qyuts[j].vel = -qyuts[j].vel;

        for k in [i, j] {
            let bumped = qyuts[k].collision_count + 1;
            staged[k] = Some(staged[k].map_or(bumped, |s| s.max(bumped)));
        }
    }

    let mut collided = 0;
    for (q, count) in qyuts.iter_mut().zip(staged) {
        if let Some(count) = count {
            q.collision_count = count;
            collided += 1;
        }
    }
    collided
}
