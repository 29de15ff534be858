//! Deterministic simulation module
//!
//! All simulation logic lives here. This module must be pure and deterministic:
//! - Viewport passed in every step, never cached
//! - Seeded or injected RNG only (used at spawn, never inside a step)
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{find_collisions, is_colliding, resolve_collisions};
pub use state::{Qyut, SimParams, SimState};
pub use tick::{StepReport, move_qyut, step, step_with_report};
