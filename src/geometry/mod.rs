//! Geometry - 2D vectors and world-space polygons.

mod polygon;
pub mod shapes;
mod vec2;

pub use polygon::Polygon;
pub use vec2::Vec2;
