//! Forces - per-tick velocity updates driven by registered rules
//!
//! A rule is bound to an ordered set of bodies when it is registered. Each
//! tick every live creator hands its bodies to the rule; a creator whose
//! bodies have been removed goes inert and is never applied again.

mod registry;
mod rules;

pub use registry::{ForceCreator, ForceId, ForceRegistry};
pub use rules::{Drag, NewtonianGravity, Spring, UniformGravity};

use crate::domain::body::Body;
use crate::domain::config::SceneConfig;

/// A velocity update over a fixed set of bodies.
pub trait ForceRule {
    /// Short label for logs and errors.
    fn name(&self) -> &'static str {
        "custom force"
    }

    /// Exact number of bodies the rule acts on, or `None` for any non-empty set.
    fn arity(&self) -> Option<usize> {
        None
    }

    /// Mutate the bodies' velocities for one step of length `dt`.
    /// `bodies` is in registration order.
    fn apply(&self, bodies: &mut [&mut Body], dt: f64, config: &SceneConfig);
}

impl<F> ForceRule for F
where
    F: Fn(&mut [&mut Body], f64),
{
    fn apply(&self, bodies: &mut [&mut Body], dt: f64, _config: &SceneConfig) {
        self(bodies, dt)
    }
}
