//! Shape generation for 2D primitives
//!
//! Everything is built in plane coordinates (y up) and mapped to NDC by the
//! pipeline.

use glam::Vec2;
use std::f32::consts::PI;

use super::LimbPose;
use super::vertex::{Vertex, colors};

/// Limb length as a fraction of the qyut size
const LIMB_LENGTH: f32 = 0.35;
/// Limb (and core) thickness as a fraction of the qyut size
const LIMB_THICKNESS: f32 = 0.175;
/// How far retracted limbs are pushed out, as a fraction of the size
const RETRACT_OFFSET: f32 = 0.5;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a rectangle rotated by `angle` radians about its center
pub fn rotated_rect(center: Vec2, half_extents: Vec2, angle: f32, color: [f32; 4]) -> Vec<Vertex> {
    let rot = Vec2::from_angle(angle);
    let corner = |sx: f32, sy: f32| {
        let p = center + rot.rotate(Vec2::new(sx * half_extents.x, sy * half_extents.y));
        Vertex::new(p.x, p.y, color)
    };

    let (a, b, c, d) = (corner(-1.0, -1.0), corner(1.0, -1.0), corner(1.0, 1.0), corner(-1.0, 1.0));
    vec![a, b, c, a, c, d]
}

/// Generate vertices for a capsule (rect with rounded ends) along `axis`
pub fn capsule(
    center: Vec2,
    axis: Vec2,
    length: f32,
    thickness: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let radius = thickness / 2.0;
    let half_body = (length / 2.0 - radius).max(0.0);
    let axis = axis.normalize_or_zero();
    let angle = axis.y.atan2(axis.x);

    let mut vertices = rotated_rect(center, Vec2::new(half_body, radius), angle, color);
    vertices.extend(circle(center + axis * half_body, radius, color, segments));
    vertices.extend(circle(center - axis * half_body, radius, color, segments));
    vertices
}

/// Generate vertices for a qyut: four limbs around a core dot.
///
/// `rotation_deg` turns clockwise on screen, matching the display rotation
/// stored on each qyut.
pub fn qyut_figure(center: Vec2, size: f32, rotation_deg: f32, pose: LimbPose) -> Vec<Vertex> {
    let length = size * LIMB_LENGTH;
    let thickness = size * LIMB_THICKNESS;
    let offset = match pose {
        LimbPose::Normal => 0.0,
        LimbPose::Retracted => size * RETRACT_OFFSET,
    };
    // Limb centers sit flush with the square's edge, pushed out when retracted
    let reach = size / 2.0 - length / 2.0 + offset;

    // Screen clockwise is negative in a y-up plane
    let rot = Vec2::from_angle(-rotation_deg.to_radians());

    let mut vertices = Vec::new();
    for dir in [Vec2::Y, Vec2::NEG_X, Vec2::NEG_Y, Vec2::X] {
        let axis = rot.rotate(dir);
        vertices.extend(capsule(center + axis * reach, axis, length, thickness, colors::LIMB, 8));
    }
    vertices.extend(circle(center, thickness / 2.0, colors::CORE, 12));
    vertices
}

/// Generate vertices for a dashed rectangular outline between `min` and `max`
pub fn dashed_frame(
    min: Vec2,
    max: Vec2,
    thickness: f32,
    dash: f32,
    gap: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    let edges = [
        (Vec2::new(min.x, min.y), Vec2::new(max.x, min.y)),
        (Vec2::new(max.x, min.y), Vec2::new(max.x, max.y)),
        (Vec2::new(max.x, max.y), Vec2::new(min.x, max.y)),
        (Vec2::new(min.x, max.y), Vec2::new(min.x, min.y)),
    ];

    for (from, to) in edges {
        let span = to - from;
        let len = span.length();
        if len <= 0.0 || dash <= 0.0 {
            continue;
        }
        let dir = span / len;
        let angle = dir.y.atan2(dir.x);

        let mut t = 0.0;
        while t < len {
            let seg = dash.min(len - t);
            let mid = from + dir * (t + seg / 2.0);
            vertices.extend(rotated_rect(mid, Vec2::new(seg / 2.0, thickness / 2.0), angle, color));
            t += dash + gap.max(0.0);
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(vertices: &[Vertex]) -> (Vec2, Vec2) {
        vertices.iter().fold(
            (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
            |(lo, hi), v| {
                let p = Vec2::from(v.position);
                (lo.min(p), hi.max(p))
            },
        )
    }

    #[test]
    fn test_circle_vertex_count() {
        assert_eq!(circle(Vec2::ZERO, 5.0, colors::CORE, 16).len(), 48);
    }

    #[test]
    fn test_rotated_rect_quarter_turn_swaps_extents() {
        let verts = rotated_rect(Vec2::ZERO, Vec2::new(10.0, 2.0), PI / 2.0, colors::LIMB);
        let (lo, hi) = bounds(&verts);
        assert!((hi.x - 2.0).abs() < 1e-4 && (lo.x + 2.0).abs() < 1e-4);
        assert!((hi.y - 10.0).abs() < 1e-4 && (lo.y + 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_normal_figure_fits_its_square() {
        let center = Vec2::new(100.0, 100.0);
        let (lo, hi) = bounds(&qyut_figure(center, 80.0, 0.0, LimbPose::Normal));
        assert!(lo.x >= 60.0 - 1e-3 && lo.y >= 60.0 - 1e-3);
        assert!(hi.x <= 140.0 + 1e-3 && hi.y <= 140.0 + 1e-3);
    }

    #[test]
    fn test_retracted_limbs_reach_further() {
        let center = Vec2::ZERO;
        let (_, normal) = bounds(&qyut_figure(center, 80.0, 0.0, LimbPose::Normal));
        let (_, retracted) = bounds(&qyut_figure(center, 80.0, 0.0, LimbPose::Retracted));
        assert!((retracted.y - normal.y - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_dashed_frame_has_gaps() {
        let verts = dashed_frame(Vec2::ZERO, Vec2::new(100.0, 100.0), 4.0, 10.0, 10.0, colors::PROMPT_FRAME);
        // 5 dashes per edge, 6 vertices each
        assert_eq!(verts.len(), 4 * 5 * 6);
    }
}
