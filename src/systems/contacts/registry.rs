use tracing::{debug, trace, warn};

use crate::domain::config::SceneConfig;
use crate::domain::error::EngineError;
use crate::spatial::{BodyArena, BodyHandle};
use crate::systems::collision::find_collision;

use super::{CollisionRule, Trigger};

/// Position of a handler in its registry, in registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContactId(pub usize);

/// A collision rule watching one ordered pair of bodies.
pub struct CollisionHandler {
    rule: Box<dyn CollisionRule>,
    a: BodyHandle,
    b: BodyHandle,
    /// Overlap state as of the last evaluated tick
    touching: bool,
    inert: bool,
    fire_count: u64,
}

impl CollisionHandler {
    #[inline]
    pub fn name(&self) -> &'static str {
        self.rule.name()
    }

    #[inline]
    pub fn bodies(&self) -> (BodyHandle, BodyHandle) {
        (self.a, self.b)
    }

    #[inline]
    pub fn is_touching(&self) -> bool {
        self.touching
    }

    #[inline]
    pub fn is_inert(&self) -> bool {
        self.inert
    }

    /// Resolutions that changed something.
    #[inline]
    pub fn fire_count(&self) -> u64 {
        self.fire_count
    }
}

#[derive(Default)]
pub struct CollisionRegistry {
    handlers: Vec<CollisionHandler>,
}

impl CollisionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Watch the pair `(a, b)`. Both must be live, unremoved and distinct.
    pub fn register(
        &mut self,
        arena: &BodyArena,
        rule: Box<dyn CollisionRule>,
        a: BodyHandle,
        b: BodyHandle,
    ) -> Result<ContactId, EngineError> {
        for handle in [a, b] {
            match arena.get(handle) {
                Some(body) if !body.is_removed() => {}
                _ => return Err(EngineError::UnknownBody(handle)),
            }
        }
        if a == b {
            return Err(EngineError::DuplicateBody(a));
        }

        let id = ContactId(self.handlers.len());
        debug!(rule = rule.name(), %a, %b, id = id.0, "collision registered");
        self.handlers.push(CollisionHandler {
            rule,
            a,
            b,
            touching: false,
            inert: false,
            fire_count: 0,
        });
        Ok(id)
    }

    /// Test every live pair once, in registration order, and let the rules
    /// react. Returns how many resolutions changed something.
    ///
    /// Removal marks made by one handler are visible to the handlers after
    /// it in the same pass.
    pub fn evaluate_all(&mut self, arena: &mut BodyArena, config: &SceneConfig) -> usize {
        let mut fired = 0;
        for handler in self.handlers.iter_mut().filter(|h| !h.inert) {
            let Some((a, b)) = arena.get_pair_mut(handler.a, handler.b) else {
                warn!(rule = handler.rule.name(), "collision lost a body, going inert");
                handler.inert = true;
                continue;
            };
            if a.is_removed() || b.is_removed() {
                debug!(rule = handler.rule.name(), "collision body removed, going inert");
                handler.inert = true;
                continue;
            }

            let info = find_collision(a.polygon(), b.polygon(), config.collision_epsilon);
            if !info.collided {
                handler.touching = false;
                continue;
            }

            let rising = !handler.touching;
            handler.touching = true;
            let fire = match handler.rule.trigger() {
                Trigger::RisingEdge => rising,
                Trigger::WhileTouching => true,
            };
            if fire && handler.rule.resolve(a, b, &info, config) {
                handler.fire_count += 1;
                fired += 1;
                trace!(
                    rule = handler.rule.name(),
                    a = %handler.a,
                    b = %handler.b,
                    depth = info.depth,
                    "collision resolved"
                );
            }
        }
        fired
    }

    pub fn get(&self, id: ContactId) -> Option<&CollisionHandler> {
        self.handlers.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CollisionHandler> {
        self.handlers.iter()
    }

    /// Drop handlers that can never fire again. Ids of later handlers shift.
    pub fn prune_inert(&mut self) -> usize {
        let before = self.handlers.len();
        self.handlers.retain(|h| !h.inert);
        before - self.handlers.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.handlers.iter().filter(|h| !h.inert).count()
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::body::Body;
    use crate::geometry::{shapes, Vec2};
    use crate::systems::collision::CollisionInfo;
    use crate::systems::contacts::{Bounce, DestroyBoth, DestroyOne};

    fn square(x: f64, y: f64, tag: &str) -> Body {
        Body::new(shapes::rectangle(2.0, 2.0, Vec2::new(x, y)).unwrap(), 1.0, tag).unwrap()
    }

    #[test]
    fn register_requires_two_live_distinct_bodies() {
        let mut arena = BodyArena::new();
        let a = arena.insert(square(0.0, 0.0, "a"));
        let b = arena.insert(square(5.0, 0.0, "b"));
        let mut contacts = CollisionRegistry::new();

        assert_eq!(
            contacts.register(&arena, Box::new(DestroyBoth), a, a).unwrap_err(),
            EngineError::DuplicateBody(a)
        );
        arena.get_mut(b).unwrap().remove();
        assert_eq!(
            contacts.register(&arena, Box::new(DestroyBoth), a, b).unwrap_err(),
            EngineError::UnknownBody(b)
        );
        assert!(contacts.is_empty());
    }

    #[test]
    fn rising_edge_fires_once_per_overlap_episode() {
        let mut arena = BodyArena::new();
        let a = arena.insert(square(0.0, 0.0, "a"));
        let b = arena.insert(square(1.5, 0.0, "b"));
        let mut contacts = CollisionRegistry::new();
        let noop = |_: &mut Body, _: &mut Body, _: &CollisionInfo| true;
        let id = contacts.register(&arena, Box::new(noop), a, b).unwrap();
        let cfg = SceneConfig::default();

        assert_eq!(contacts.evaluate_all(&mut arena, &cfg), 1);
        assert_eq!(contacts.evaluate_all(&mut arena, &cfg), 0);
        assert!(contacts.get(id).unwrap().is_touching());

        arena.get_mut(b).unwrap().set_centroid(Vec2::new(10.0, 0.0));
        assert_eq!(contacts.evaluate_all(&mut arena, &cfg), 0);
        assert!(!contacts.get(id).unwrap().is_touching());

        arena.get_mut(b).unwrap().set_centroid(Vec2::new(1.0, 0.0));
        assert_eq!(contacts.evaluate_all(&mut arena, &cfg), 1);
        assert_eq!(contacts.get(id).unwrap().fire_count(), 2);
    }

    #[test]
    fn while_touching_counts_only_effective_bounces() {
        let mut arena = BodyArena::new();
        let a = arena.insert(square(0.0, 0.0, "a").with_velocity(Vec2::new(1.0, 0.0)));
        let b = arena.insert(square(1.5, 0.0, "b"));
        let mut contacts = CollisionRegistry::new();
        let id = contacts.register(&arena, Box::new(Bounce::default()), a, b).unwrap();
        let cfg = SceneConfig::default();

        assert_eq!(contacts.evaluate_all(&mut arena, &cfg), 1);
        // Velocities swapped and the pair pushed apart: the next pass is a no-op.
        assert_eq!(arena.get(b).unwrap().velocity(), Vec2::new(1.0, 0.0));
        assert_eq!(contacts.evaluate_all(&mut arena, &cfg), 0);
        assert_eq!(contacts.get(id).unwrap().fire_count(), 1);
    }

    #[test]
    fn removal_earlier_in_the_pass_disarms_later_handlers() {
        let mut arena = BodyArena::new();
        let hopper = arena.insert(square(0.0, 0.0, "hopper"));
        let bone = arena.insert(square(1.5, 0.0, "bone"));
        let mut contacts = CollisionRegistry::new();
        contacts
            .register(&arena, Box::new(DestroyOne::default()), hopper, bone)
            .unwrap();
        let later = contacts
            .register(&arena, Box::new(DestroyBoth), hopper, bone)
            .unwrap();

        assert_eq!(contacts.evaluate_all(&mut arena, &SceneConfig::default()), 1);
        assert!(arena.get(bone).unwrap().is_removed());
        assert!(!arena.get(hopper).unwrap().is_removed());
        assert!(contacts.get(later).unwrap().is_inert());
        assert_eq!(contacts.active_count(), 1);
    }

    #[test]
    fn freed_body_makes_handler_inert() {
        let mut arena = BodyArena::new();
        let a = arena.insert(square(0.0, 0.0, "a"));
        let b = arena.insert(square(1.5, 0.0, "b"));
        let mut contacts = CollisionRegistry::new();
        let id = contacts.register(&arena, Box::new(DestroyBoth), a, b).unwrap();

        arena.free(b);
        assert_eq!(contacts.evaluate_all(&mut arena, &SceneConfig::default()), 0);
        assert!(contacts.get(id).unwrap().is_inert());
        assert_eq!(contacts.prune_inert(), 1);
    }
}
