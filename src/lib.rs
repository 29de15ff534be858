//! Bouncing Qyuts - click to spawn, watch them bounce until they wear out
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, wall bounce, collisions, removal)
//! - `clock`: Fixed-interval tick scheduling with cancellation
//! - `app`: Single owner tying input, clock and simulation together
//! - `renderer`: Figure geometry and WebGPU pipeline
//! - `settings`: Tunable parameters and preferences

pub mod app;
pub mod clock;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::App;
pub use settings::Settings;

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Side length of every qyut's square (px)
    pub const QYUT_SIZE: f32 = 80.0;
    /// Distance moved per tick along each axis (px)
    pub const QYUT_SPEED: f32 = 10.0;
    /// Rotation added every tick (degrees)
    pub const ROTATION_STEP_DEG: f32 = 15.0;
    /// Collision count at which a qyut is removed
    pub const REMOVAL_THRESHOLD: u32 = 15;

    /// Tick interval of the simulation clock (ms)
    pub const TICK_INTERVAL_MS: u32 = 30;
    /// Maximum ticks run per frame to prevent spiral of death
    pub const MAX_CATCH_UP_TICKS: u32 = 8;
    /// Largest frame delta the clock accepts (seconds)
    pub const MAX_FRAME_DELTA: f32 = 0.25;
}

/// Current surface size, read fresh by the host every frame
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Largest valid corner position for a square of side `size`
    #[inline]
    pub fn max_corner(&self, size: f32) -> Vec2 {
        Vec2::new((self.width - size).max(0.0), (self.height - size).max(0.0))
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Convert a surface (screen) coordinate to the simulation plane.
///
/// Screen y grows downward; the plane's y grows up from the bottom edge.
#[inline]
pub fn screen_to_plane(screen: Vec2, surface_height: f32) -> Vec2 {
    Vec2::new(screen.x, surface_height - screen.y)
}
