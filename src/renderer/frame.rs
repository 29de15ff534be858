//! Frame assembly from a simulation snapshot

use glam::Vec2;

use super::LimbPose;
use super::shapes::{dashed_frame, qyut_figure};
use super::vertex::{Vertex, colors};
use crate::Viewport;
use crate::settings::Settings;
use crate::sim::Qyut;

/// Idle figure spin rate (degrees per second)
const IDLE_SPIN_DEG_PER_SEC: f32 = 360.0;
/// Idle frame covers this fraction of the surface
const IDLE_FRAME_FILL: f32 = 0.9;

/// Build the vertices for one frame.
///
/// With nothing alive this draws the idle "click to start" figure instead.
/// `time` is seconds since startup and only drives the idle spin.
pub fn build_frame(qyuts: &[Qyut], viewport: Viewport, settings: &Settings, time: f64) -> Vec<Vertex> {
    let params = &settings.params;

    if qyuts.is_empty() {
        return if settings.show_idle_prompt {
            idle_prompt(viewport, params.size, settings.reduced_motion, time)
        } else {
            Vec::new()
        };
    }

    let mut vertices = Vec::new();
    for q in qyuts {
        let pose = LimbPose::for_count(q.collision_count, params.removal_threshold);
        vertices.extend(qyut_figure(q.center(params.size), params.size, q.rotation, pose));
    }
    vertices
}

fn idle_prompt(viewport: Viewport, size: f32, reduced_motion: bool, time: f64) -> Vec<Vertex> {
    let center = viewport.center();
    let half = Vec2::new(viewport.width, viewport.height) * IDLE_FRAME_FILL / 2.0;

    let mut vertices = dashed_frame(center - half, center + half, 4.0, 12.0, 8.0, colors::PROMPT_FRAME);

    let spin = if reduced_motion {
        0.0
    } else {
        ((time * IDLE_SPIN_DEG_PER_SEC as f64) % 360.0) as f32
    };
    vertices.extend(qyut_figure(center, size, spin, LimbPose::Normal));
    vertices
}
