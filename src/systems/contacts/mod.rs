//! Contacts - collision responses bound to body pairs
//!
//! Each handler watches one pair. After integration the pair goes through
//! the SAT detector and, depending on the rule's trigger, the rule gets to
//! react: bounce, destroy one or both bodies, or spin the target.

mod policies;
mod registry;

pub use policies::{Bounce, DestroyBoth, DestroyOne, Rotate, Target};
pub use registry::{CollisionHandler, CollisionRegistry, ContactId};

use crate::domain::body::Body;
use crate::domain::config::SceneConfig;
use crate::systems::collision::CollisionInfo;

/// When a handler hands an overlapping pair to its rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Trigger {
    /// Only on the tick the pair starts overlapping.
    #[default]
    RisingEdge,
    /// Every tick the pair overlaps.
    WhileTouching,
}

/// Reaction to two bodies overlapping.
pub trait CollisionRule {
    fn name(&self) -> &'static str {
        "custom collision"
    }

    fn trigger(&self) -> Trigger {
        Trigger::RisingEdge
    }

    /// React to the overlap. `info.axis` points from `a` toward `b`.
    /// Returns whether the rule fired; only fired resolutions count toward
    /// the handler's `fire_count`.
    fn resolve(
        &self,
        a: &mut Body,
        b: &mut Body,
        info: &CollisionInfo,
        config: &SceneConfig,
    ) -> bool;
}

impl<F> CollisionRule for F
where
    F: Fn(&mut Body, &mut Body, &CollisionInfo) -> bool,
{
    fn resolve(
        &self,
        a: &mut Body,
        b: &mut Body,
        info: &CollisionInfo,
        _config: &SceneConfig,
    ) -> bool {
        self(a, b, info)
    }
}
