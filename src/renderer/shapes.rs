//! Triangle-list tessellation for 2D primitives
//!
//! Every function appends to an existing buffer so a frame can reuse its
//! vertex storage.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Segment count for a circle of the given radius
pub fn circle_segments(radius: f32) -> u32 {
    ((radius * 2.0) as u32).clamp(6, 48)
}

/// Filled circle as a triangle fan
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    out.reserve((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

/// Disc fading from `inner` at the center to `outer` at the rim
pub fn radial_glow(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    inner: [f32; 4],
    outer: [f32; 4],
    segments: u32,
) {
    out.reserve((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        out.push(Vertex::new(center.x, center.y, inner));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            outer,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            outer,
        ));
    }
}

/// Thick line segment as a quad. Degenerate segments emit nothing.
pub fn segment(out: &mut Vec<Vertex>, from: Vec2, to: Vec2, width: f32, color: [f32; 4]) {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return;
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width * 0.5);

    let a1 = from + perp;
    let b1 = from - perp;
    let a2 = to + perp;
    let b2 = to - perp;

    // Two triangles
    out.push(Vertex::new(a1.x, a1.y, color));
    out.push(Vertex::new(b1.x, b1.y, color));
    out.push(Vertex::new(a2.x, a2.y, color));

    out.push(Vertex::new(a2.x, a2.y, color));
    out.push(Vertex::new(b1.x, b1.y, color));
    out.push(Vertex::new(b2.x, b2.y, color));
}

/// Axis-aligned rectangle with separate top and bottom colors
pub fn rect_gradient(
    out: &mut Vec<Vertex>,
    min: Vec2,
    size: Vec2,
    top: [f32; 4],
    bottom: [f32; 4],
) {
    let max = min + size;
    out.push(Vertex::new(min.x, min.y, top));
    out.push(Vertex::new(max.x, min.y, top));
    out.push(Vertex::new(min.x, max.y, bottom));

    out.push(Vertex::new(min.x, max.y, bottom));
    out.push(Vertex::new(max.x, min.y, top));
    out.push(Vertex::new(max.x, max.y, bottom));
}

/// Convex polygon as a fan from the first point
pub fn polygon(out: &mut Vec<Vertex>, points: &[Vec2], color: [f32; 4]) {
    if points.len() < 3 {
        return;
    }
    let origin = points[0];
    for pair in points[1..].windows(2) {
        out.push(Vertex::new(origin.x, origin.y, color));
        out.push(Vertex::new(pair[0].x, pair[0].y, color));
        out.push(Vertex::new(pair[1].x, pair[1].y, color));
    }
}
