//! Shape factories - polygons placed directly in world space.
//!
//! Counter-clockwise vertex order throughout. Stars and pacman shapes are
//! concave; the SAT detector treats every polygon as convex, so their
//! collisions are resolved against the convex hull.

use std::f64::consts::TAU;

use crate::domain::error::EngineError;

use super::polygon::Polygon;
use super::vec2::Vec2;

/// Sides used to approximate a circle.
pub const CIRCLE_SIDES: usize = 32;

/// Axis-aligned rectangle centered at `center`.
pub fn rectangle(width: f64, height: f64, center: Vec2) -> Result<Polygon, EngineError> {
    let hw = width * 0.5;
    let hh = height * 0.5;
    Polygon::new(vec![
        center + Vec2::new(-hw, -hh),
        center + Vec2::new(hw, -hh),
        center + Vec2::new(hw, hh),
        center + Vec2::new(-hw, hh),
    ])
}

/// Regular n-gon with its first vertex on the +x axis.
pub fn regular_polygon(radius: f64, sides: usize, center: Vec2) -> Result<Polygon, EngineError> {
    let step = TAU / sides as f64;
    let vertices = (0..sides)
        .map(|i| center + Vec2::new(radius, 0.0).rotate(step * i as f64))
        .collect();
    Polygon::new(vertices)
}

pub fn circle(radius: f64, center: Vec2) -> Result<Polygon, EngineError> {
    regular_polygon(radius, CIRCLE_SIDES, center)
}

/// Star alternating between `outer` and `inner` radii, first tip pointing up.
pub fn star(points: usize, outer: f64, inner: f64, center: Vec2) -> Result<Polygon, EngineError> {
    let step = TAU / (points * 2) as f64;
    let vertices = (0..points * 2)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            center + Vec2::new(0.0, r).rotate(step * i as f64)
        })
        .collect();
    Polygon::new(vertices)
}

/// Circle with a wedge of `mouth` radians removed, opening toward +x.
pub fn pacman(radius: f64, mouth: f64, center: Vec2) -> Result<Polygon, EngineError> {
    let mouth = mouth.clamp(0.0, TAU);
    let arc = TAU - mouth;
    let segments = CIRCLE_SIDES;
    let mut vertices = Vec::with_capacity(segments + 2);
    vertices.push(center);
    for i in 0..=segments {
        let angle = mouth * 0.5 + arc * i as f64 / segments as f64;
        vertices.push(center + Vec2::new(radius, 0.0).rotate(angle));
    }
    Polygon::new(vertices)
}
