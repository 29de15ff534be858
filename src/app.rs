//! Single owner of the simulation
//!
//! Input and the frame loop both go through `&mut App`, so a spawn can never
//! land in the middle of a tick's read-modify-write of the qyut set.

use glam::Vec2;

use crate::Viewport;
use crate::clock::TickClock;
use crate::settings::Settings;
use crate::sim::{Qyut, SimState, StepReport};

/// Result of one `App::update` call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameSummary {
    /// Ticks run this frame
    pub ticks: u32,
    /// Qyuts removed this frame
    pub removed: Vec<u32>,
    /// Distinct collisions summed over the frame's ticks
    pub collided: usize,
}

impl FrameSummary {
    fn absorb(&mut self, report: StepReport) {
        self.ticks += 1;
        self.collided += report.collided;
        self.removed.extend(report.removed);
    }
}

/// Simulation instance holding all state
pub struct App {
    pub settings: Settings,
    state: SimState,
    clock: TickClock,
}

impl App {
    pub fn new(settings: Settings, seed: u64) -> Self {
        let seed = settings.seed.unwrap_or(seed);
        log::info!(
            "Simulation initialized with seed {} (tick {} ms)",
            seed,
            settings.tick_interval_ms
        );
        Self {
            state: SimState::new(seed, settings.params),
            clock: TickClock::with_interval_ms(settings.tick_interval_ms),
            settings,
        }
    }

    /// Spawn a qyut at a click/touch point in surface coordinates.
    ///
    /// Returns the new id, or `None` once the app has been stopped.
    pub fn click(&mut self, x: f32, y: f32, surface_height: f32) -> Option<u32> {
        if self.clock.is_stopped() {
            return None;
        }
        Some(self.state.spawn(Vec2::new(x, y), surface_height))
    }

    /// Feed `dt` seconds of frame time and run whatever ticks are due
    pub fn update(&mut self, dt: f32, viewport: Viewport) -> FrameSummary {
        let mut summary = FrameSummary::default();
        for _ in 0..self.clock.advance(dt) {
            summary.absorb(self.state.advance(viewport));
        }
        summary
    }

    /// Stop ticking; no further mutation happens after this
    pub fn stop(&mut self) {
        self.clock.stop();
    }

    pub fn is_stopped(&self) -> bool {
        self.clock.is_stopped()
    }

    /// Live qyuts for rendering
    pub fn snapshot(&self) -> &[Qyut] {
        self.state.snapshot()
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }
}
