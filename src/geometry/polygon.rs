use crate::domain::error::EngineError;

use super::vec2::Vec2;

/// Areas below this are treated as degenerate when locating the centroid.
const AREA_EPSILON: f64 = 1e-12;

/// Ordered vertex loop in world coordinates.
///
/// Always holds at least 3 finite vertices; construction is the only way in,
/// so every `Polygon` the collision detector sees is well formed.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec2>,
}

impl Polygon {
    pub fn new(vertices: Vec<Vec2>) -> Result<Self, EngineError> {
        if vertices.len() < 3 {
            return Err(EngineError::DegeneratePolygon { vertices: vertices.len() });
        }
        if let Some(index) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(EngineError::NonFiniteVertex { index });
        }
        Ok(Self { vertices })
    }

    /// Build from a flat `[x0, y0, x1, y1, ...]` buffer (JS interop).
    pub fn from_flat(coords: &[f64]) -> Result<Self, EngineError> {
        if coords.len() % 2 != 0 {
            return Err(EngineError::OddCoordinateCount { len: coords.len() });
        }
        let vertices = coords
            .chunks_exact(2)
            .map(|c| Vec2::new(c[0], c[1]))
            .collect();
        Self::new(vertices)
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Fixed-length view; the vertex count can never drop below 3.
    #[inline]
    pub(crate) fn vertices_mut(&mut self) -> &mut [Vec2] {
        &mut self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false for a constructed polygon.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn to_flat(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.vertices.len() * 2);
        for v in &self.vertices {
            out.push(v.x);
            out.push(v.y);
        }
        out
    }

    /// Shoelace formula; positive for counter-clockwise loops.
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        let mut sum = 0.0;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            sum += a.cross(b);
        }
        sum * 0.5
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Area-weighted centroid. Falls back to the vertex mean when the loop
    /// encloses no area (collinear points).
    pub fn centroid(&self) -> Vec2 {
        let n = self.vertices.len();
        let area = self.signed_area();
        if area.abs() < AREA_EPSILON {
            let sum = self.vertices.iter().fold(Vec2::ZERO, |acc, v| acc + *v);
            return sum * (1.0 / n as f64);
        }

        let mut cx = 0.0;
        let mut cy = 0.0;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let cross = a.cross(b);
            cx += (a.x + b.x) * cross;
            cy += (a.y + b.y) * cross;
        }
        let k = 1.0 / (6.0 * area);
        Vec2::new(cx * k, cy * k)
    }

    pub fn translate(&mut self, delta: Vec2) {
        for v in self.vertices.iter_mut() {
            *v += delta;
        }
    }

    pub fn rotate(&mut self, angle: f64, pivot: Vec2) {
        for v in self.vertices.iter_mut() {
            *v = v.rotate_about(angle, pivot);
        }
    }

    /// Unit normal of every edge. Zero-length edges yield a zero normal and
    /// are skipped by the detector.
    pub fn edge_normals(&self) -> impl Iterator<Item = Vec2> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| {
            let edge = self.vertices[(i + 1) % n] - self.vertices[i];
            edge.perp().normalize()
        })
    }

    /// Project onto `axis` and return (min, max).
    pub fn project(&self, axis: Vec2) -> (f64, f64) {
        let first = self.vertices[0].dot(axis);
        self.vertices[1..]
            .iter()
            .fold((first, first), |(lo, hi), v| {
                let p = v.dot(axis);
                (lo.min(p), hi.max(p))
            })
    }

    /// Axis-aligned bounding box as (min corner, max corner).
    pub fn aabb(&self) -> (Vec2, Vec2) {
        let first = self.vertices[0];
        self.vertices[1..].iter().fold((first, first), |(lo, hi), v| {
            (
                Vec2::new(lo.x.min(v.x), lo.y.min(v.y)),
                Vec2::new(hi.x.max(v.x), hi.y.max(v.y)),
            )
        })
    }
}
