use tracing::{debug, warn};

use crate::domain::config::SceneConfig;
use crate::domain::error::EngineError;
use crate::spatial::{BodyArena, BodyHandle};

use super::ForceRule;

/// Position of a creator in its registry, in registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ForceId(pub usize);

/// A rule bound to the bodies it acts on.
pub struct ForceCreator {
    rule: Box<dyn ForceRule>,
    bodies: Vec<BodyHandle>,
    inert: bool,
}

impl ForceCreator {
    #[inline]
    pub fn name(&self) -> &'static str {
        self.rule.name()
    }

    #[inline]
    pub fn bodies(&self) -> &[BodyHandle] {
        &self.bodies
    }

    /// True once any of its bodies has left the scene.
    #[inline]
    pub fn is_inert(&self) -> bool {
        self.inert
    }
}

#[derive(Default)]
pub struct ForceRegistry {
    creators: Vec<ForceCreator>,
}

impl ForceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `rule` to `bodies`. Every handle must be live and distinct, and
    /// the count must match the rule's arity when it has one.
    pub fn register(
        &mut self,
        arena: &BodyArena,
        rule: Box<dyn ForceRule>,
        bodies: Vec<BodyHandle>,
    ) -> Result<ForceId, EngineError> {
        if bodies.is_empty() {
            return Err(EngineError::EmptyBodySet);
        }
        if let Some(expected) = rule.arity() {
            if bodies.len() != expected {
                return Err(EngineError::WrongBodyCount {
                    rule: rule.name(),
                    expected,
                    got: bodies.len(),
                });
            }
        }
        for (i, &handle) in bodies.iter().enumerate() {
            match arena.get(handle) {
                Some(body) if !body.is_removed() => {}
                _ => return Err(EngineError::UnknownBody(handle)),
            }
            if bodies[..i].contains(&handle) {
                return Err(EngineError::DuplicateBody(handle));
            }
        }

        let id = ForceId(self.creators.len());
        debug!(rule = rule.name(), bodies = bodies.len(), id = id.0, "force registered");
        self.creators.push(ForceCreator { rule, bodies, inert: false });
        Ok(id)
    }

    /// Run every live creator once, in registration order. Returns how many
    /// were applied.
    pub fn apply_all(&mut self, arena: &mut BodyArena, dt: f64, config: &SceneConfig) -> usize {
        let mut applied = 0;
        for creator in self.creators.iter_mut().filter(|c| !c.inert) {
            let Some(mut bodies) = arena.get_disjoint_mut(&creator.bodies) else {
                warn!(rule = creator.rule.name(), "force lost a body, going inert");
                creator.inert = true;
                continue;
            };
            if bodies.iter().any(|b| b.is_removed()) {
                debug!(rule = creator.rule.name(), "force body removed, going inert");
                creator.inert = true;
                continue;
            }
            creator.rule.apply(&mut bodies, dt, config);
            applied += 1;
        }
        applied
    }

    pub fn get(&self, id: ForceId) -> Option<&ForceCreator> {
        self.creators.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ForceCreator> {
        self.creators.iter()
    }

    /// Drop creators that can never fire again. Ids of later creators shift.
    pub fn prune_inert(&mut self) -> usize {
        let before = self.creators.len();
        self.creators.retain(|c| !c.inert);
        before - self.creators.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.creators.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.creators.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.creators.iter().filter(|c| !c.inert).count()
    }

    pub fn clear(&mut self) {
        self.creators.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::body::Body;
    use crate::geometry::{shapes, Vec2};
    use crate::systems::forces::{NewtonianGravity, UniformGravity};

    fn body(x: f64) -> Body {
        Body::new(shapes::rectangle(1.0, 1.0, Vec2::new(x, 0.0)).unwrap(), 1.0, "b").unwrap()
    }

    #[test]
    fn register_validates_bodies_and_arity() {
        let mut arena = BodyArena::new();
        let a = arena.insert(body(0.0));
        let b = arena.insert(body(5.0));
        let mut forces = ForceRegistry::new();

        assert_eq!(
            forces.register(&arena, Box::new(UniformGravity { g: 1.0 }), vec![]).unwrap_err(),
            EngineError::EmptyBodySet
        );
        assert!(matches!(
            forces.register(&arena, Box::new(NewtonianGravity { g: 1.0 }), vec![a]),
            Err(EngineError::WrongBodyCount { expected: 2, got: 1, .. })
        ));
        assert_eq!(
            forces.register(&arena, Box::new(NewtonianGravity { g: 1.0 }), vec![a, a]).unwrap_err(),
            EngineError::DuplicateBody(a)
        );

        arena.free(b);
        assert_eq!(
            forces.register(&arena, Box::new(NewtonianGravity { g: 1.0 }), vec![a, b]).unwrap_err(),
            EngineError::UnknownBody(b)
        );
        assert!(forces.is_empty());
    }

    #[test]
    fn creator_goes_inert_when_a_body_is_removed() {
        let mut arena = BodyArena::new();
        let a = arena.insert(body(0.0));
        let b = arena.insert(body(5.0));
        let mut forces = ForceRegistry::new();
        let id = forces
            .register(&arena, Box::new(NewtonianGravity { g: 1.0 }), vec![a, b])
            .unwrap();
        let cfg = SceneConfig::default();

        assert_eq!(forces.apply_all(&mut arena, 0.1, &cfg), 1);

        arena.get_mut(b).unwrap().remove();
        let before = arena.get(a).unwrap().velocity();
        assert_eq!(forces.apply_all(&mut arena, 0.1, &cfg), 0);
        assert!(forces.get(id).unwrap().is_inert());
        assert_eq!(arena.get(a).unwrap().velocity(), before);

        assert_eq!(forces.prune_inert(), 1);
        assert_eq!(forces.active_count(), 0);
    }

    #[test]
    fn closures_are_rules() {
        let mut arena = BodyArena::new();
        let a = arena.insert(body(0.0));
        let mut forces = ForceRegistry::new();
        let kick = |bodies: &mut [&mut Body], dt: f64| {
            for b in bodies.iter_mut() {
                b.set_velocity(Vec2::new(dt, 0.0));
            }
        };
        forces.register(&arena, Box::new(kick), vec![a]).unwrap();
        forces.apply_all(&mut arena, 0.25, &SceneConfig::default());
        assert_eq!(arena.get(a).unwrap().velocity(), Vec2::new(0.25, 0.0));
        assert_eq!(forces.iter().next().unwrap().name(), "custom force");
    }
}
