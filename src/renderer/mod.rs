//! Rendering module
//!
//! Reads the simulation snapshot and turns it into colored triangles. Nothing
//! here feeds back into simulation state.

pub mod frame;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use frame::build_frame;
pub use pipeline::{RenderInitError, RenderState};
pub use vertex::Vertex;

/// Which way a qyut's limbs are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimbPose {
    /// Limbs flush with the body
    Normal,
    /// Limbs pushed out; shown one collision before removal
    Retracted,
}

impl LimbPose {
    /// Pose for a qyut with `collision_count` under the given removal threshold
    pub fn for_count(collision_count: u32, removal_threshold: u32) -> Self {
        if collision_count + 1 >= removal_threshold {
            LimbPose::Retracted
        } else {
            LimbPose::Normal
        }
    }
}
