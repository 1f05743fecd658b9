//! Collision detection - convex polygon overlap via SAT
//!
//! Pure geometry: no bodies, no policies. The contact registry decides what
//! an overlap means.

mod sat;
mod types;

pub use sat::find_collision;
pub use types::CollisionInfo;
