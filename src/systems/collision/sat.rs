use crate::geometry::{Polygon, Vec2};

use super::types::CollisionInfo;

/// Separating Axis Theorem test for two convex polygons.
///
/// An axis whose projections overlap by `epsilon` or less separates the
/// polygons, so edges that merely touch do not collide.
pub fn find_collision(a: &Polygon, b: &Polygon, epsilon: f64) -> CollisionInfo {
    if !aabb_overlap(a, b, epsilon) {
        return CollisionInfo::none();
    }

    let mut best_depth = f64::INFINITY;
    let mut best_axis = Vec2::zero();

    for axis in a.edge_normals().chain(b.edge_normals()) {
        // Zero-length edge
        if axis == Vec2::ZERO {
            continue;
        }

        let (min_a, max_a) = a.project(axis);
        let (min_b, max_b) = b.project(axis);
        let depth = (max_a - min_b).min(max_b - min_a);
        if depth <= epsilon {
            return CollisionInfo::none();
        }

        if depth < best_depth {
            best_depth = depth;
            best_axis = axis;
        }
    }

    if !best_depth.is_finite() {
        return CollisionInfo::none();
    }

    // Point from A toward B
    if (b.centroid() - a.centroid()).dot(best_axis) < 0.0 {
        best_axis = -best_axis;
    }

    CollisionInfo {
        collided: true,
        axis: best_axis,
        depth: best_depth,
    }
}

fn aabb_overlap(a: &Polygon, b: &Polygon, epsilon: f64) -> bool {
    let (lo_a, hi_a) = a.aabb();
    let (lo_b, hi_b) = b.aabb();
    hi_a.x - lo_b.x > epsilon
        && hi_b.x - lo_a.x > epsilon
        && hi_a.y - lo_b.y > epsilon
        && hi_b.y - lo_a.y > epsilon
}
