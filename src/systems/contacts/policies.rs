use crate::domain::body::Body;
use crate::domain::config::SceneConfig;
use crate::systems::collision::CollisionInfo;

use super::{CollisionRule, Trigger};

/// Which body of a handler's pair a one-sided rule acts on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Target {
    First,
    #[default]
    Second,
}

impl Target {
    fn pick<'a>(self, a: &'a mut Body, b: &'a mut Body) -> &'a mut Body {
        match self {
            Target::First => a,
            Target::Second => b,
        }
    }
}

/// Impulse-based elastic collision.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounce {
    /// Overrides the bodies' own elasticities when set.
    pub elasticity: Option<f64>,
}

impl Bounce {
    fn restitution(&self, a: &Body, b: &Body, config: &SceneConfig) -> f64 {
        if let Some(e) = self.elasticity {
            return e;
        }
        match (a.is_immovable(), b.is_immovable()) {
            (true, false) => b.elasticity(),
            (false, true) => a.elasticity(),
            _ => config.restitution.combine(a.elasticity(), b.elasticity()),
        }
    }
}

impl CollisionRule for Bounce {
    fn name(&self) -> &'static str {
        "bounce"
    }

    fn trigger(&self) -> Trigger {
        Trigger::WhileTouching
    }

    fn resolve(
        &self,
        a: &mut Body,
        b: &mut Body,
        info: &CollisionInfo,
        config: &SceneConfig,
    ) -> bool {
        let (inv_a, inv_b) = (a.inverse_mass(), b.inverse_mass());
        let inv_sum = inv_a + inv_b;
        if inv_sum == 0.0 {
            return false;
        }

        let n = info.axis;
        let approach = (b.velocity() - a.velocity()).dot(n);
        // Separating pairs keep their velocity
        let fired = approach < 0.0;
        if fired {
            let e = self.restitution(a, b, config);
            let j = -(1.0 + e) * approach / inv_sum;

            let va = (a.velocity() - n * (j * inv_a)).clamp_length(config.max_speed);
            let vb = (b.velocity() + n * (j * inv_b)).clamp_length(config.max_speed);
            a.set_velocity(va);
            b.set_velocity(vb);
        }

        // Resolve the overlap, split by inverse mass
        let push = n * (info.depth / inv_sum);
        a.translate(-(push * inv_a));
        b.translate(push * inv_b);
        fired
    }
}

/// Mark one body of the pair for removal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DestroyOne {
    pub target: Target,
}

impl CollisionRule for DestroyOne {
    fn name(&self) -> &'static str {
        "destroy one"
    }

    fn resolve(
        &self,
        a: &mut Body,
        b: &mut Body,
        _info: &CollisionInfo,
        _config: &SceneConfig,
    ) -> bool {
        self.target.pick(a, b).remove();
        true
    }
}

/// Mark both bodies for removal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DestroyBoth;

impl CollisionRule for DestroyBoth {
    fn name(&self) -> &'static str {
        "destroy both"
    }

    fn resolve(
        &self,
        a: &mut Body,
        b: &mut Body,
        _info: &CollisionInfo,
        _config: &SceneConfig,
    ) -> bool {
        a.remove();
        b.remove();
        true
    }
}

/// Spin the target body about its centroid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotate {
    pub target: Target,
    /// Radians, counter-clockwise.
    pub angle: f64,
}

impl CollisionRule for Rotate {
    fn name(&self) -> &'static str {
        "rotate"
    }

    fn resolve(
        &self,
        a: &mut Body,
        b: &mut Body,
        _info: &CollisionInfo,
        _config: &SceneConfig,
    ) -> bool {
        self.target.pick(a, b).rotate_by(self.angle);
        true
    }
}
