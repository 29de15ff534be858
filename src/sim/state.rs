//! Simulation state and the qyut entity
//!
//! `SimState` is the single authoritative store of live qyuts. Only the
//! store creates qyuts and only the stepper mutates or removes them.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::tick::{StepReport, step_with_report};
use crate::Viewport;
use crate::consts::*;

/// Parameters that shape every step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// Side length of each qyut's square
    pub size: f32,
    /// Per-axis distance moved each tick
    pub speed: f32,
    /// Degrees of rotation added each tick
    pub rotation_step: f32,
    /// Collision count at which a qyut is removed
    pub removal_threshold: u32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            size: QYUT_SIZE,
            speed: QYUT_SPEED,
            rotation_step: ROTATION_STEP_DEG,
            removal_threshold: REMOVAL_THRESHOLD,
        }
    }
}

/// A bouncing qyut
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Qyut {
    pub id: u32,
    /// Bottom-left corner in plane coordinates (y up)
    pub pos: Vec2,
    /// Direction signs, each component +1 or -1 (scaled by speed each tick)
    pub vel: Vec2,
    /// Display rotation in degrees (never wraps)
    pub rotation: f32,
    /// Ticks in which this qyut collided with at least one other
    pub collision_count: u32,
}

impl Qyut {
    pub fn new(id: u32, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            pos,
            vel,
            rotation: 0.0,
            collision_count: 0,
        }
    }

    /// Centre of the qyut's square
    #[inline]
    pub fn center(&self, size: f32) -> Vec2 {
        self.pos + Vec2::splat(size / 2.0)
    }
}

/// Pick +1 or -1 with equal probability
fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    /// Seed the spawn RNG was created from
    pub seed: u64,
    /// Parameters used for spawning and stepping
    pub params: SimParams,
    /// Steps taken so far
    pub time_ticks: u64,
    /// Live qyuts (in spawn order)
    qyuts: Vec<Qyut>,
    /// Next entity ID
    next_id: u32,
    rng: Pcg32,
}

impl SimState {
    /// Create an empty state with the given seed
    pub fn new(seed: u64, params: SimParams) -> Self {
        Self {
            seed,
            params,
            time_ticks: 0,
            qyuts: Vec::new(),
            next_id: 1,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a qyut centred on a click, using the state's own RNG.
    ///
    /// `click` is in surface coordinates (y down). Returns the new id.
    pub fn spawn(&mut self, click: Vec2, surface_height: f32) -> u32 {
        // Work on a copy so `spawn_with` can borrow self mutably
        let mut rng = self.rng.clone();
        let id = self.spawn_with(click, surface_height, &mut rng);
        self.rng = rng;
        id
    }

    /// Spawn a qyut drawing its direction from `rng`
    pub fn spawn_with<R: Rng + ?Sized>(
        &mut self,
        click: Vec2,
        surface_height: f32,
        rng: &mut R,
    ) -> u32 {
        let half = self.params.size / 2.0;
        let pos = crate::screen_to_plane(click, surface_height) - Vec2::splat(half);
        let vel = Vec2::new(random_sign(rng), random_sign(rng));

        let id = self.next_entity_id();
        self.qyuts.push(Qyut::new(id, pos, vel));
        log::debug!("Spawned qyut {} at ({:.1}, {:.1}) heading {:?}", id, pos.x, pos.y, vel);
        id
    }

    /// Read-only view of the live qyuts
    pub fn snapshot(&self) -> &[Qyut] {
        &self.qyuts
    }

    /// Install a new set of qyuts
    pub fn replace(&mut self, qyuts: Vec<Qyut>) {
        self.qyuts = qyuts;
    }

    /// Run one step against the current viewport and install the result
    pub fn advance(&mut self, viewport: Viewport) -> StepReport {
        let (next, report) = step_with_report(&self.qyuts, viewport, &self.params);
        self.replace(next);
        self.time_ticks += 1;

        for id in &report.removed {
            log::info!("Qyut {} worn out after {} collisions", id, self.params.removal_threshold);
        }
        report
    }

    pub fn len(&self) -> usize {
        self.qyuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.qyuts.is_empty()
    }
}
