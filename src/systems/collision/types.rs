use crate::geometry::Vec2;

/// Result of testing two polygons for overlap
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionInfo {
    /// Did the interiors overlap?
    pub collided: bool,
    /// Unit axis of least overlap, pointing from the first polygon toward
    /// the second. Zero when not collided.
    pub axis: Vec2,
    /// Overlap along `axis` (0 when not collided)
    pub depth: f64,
}

impl CollisionInfo {
    #[inline]
    pub fn none() -> Self {
        Self {
            collided: false,
            axis: Vec2::zero(),
            depth: 0.0,
        }
    }
}
