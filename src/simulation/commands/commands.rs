use tracing::debug;

use crate::domain::body::Body;
use crate::domain::error::EngineError;
use crate::spatial::BodyHandle;
use crate::systems::contacts::{Bounce, ContactId, DestroyBoth, DestroyOne, Rotate, Target};
use crate::systems::forces::{Drag, ForceId, NewtonianGravity, Spring, UniformGravity};

use super::SceneCore;

pub(super) fn add_body(scene: &mut SceneCore, body: Body) -> BodyHandle {
    let tag = body.tag().to_owned();
    let handle = scene.arena.insert(body);
    scene.order.push(handle);
    debug!(%handle, tag = %tag, index = scene.order.len() - 1, "body added");
    handle
}

pub(super) fn remove_body(scene: &mut SceneCore, handle: BodyHandle) -> Result<(), EngineError> {
    let body = scene.require_body_mut(handle)?;
    if !body.is_removed() {
        body.remove();
        debug!(%handle, "body marked for removal");
    }
    Ok(())
}

pub(super) fn clear(scene: &mut SceneCore) {
    debug!(bodies = scene.order.len(), "scene cleared");
    scene.arena.clear();
    scene.order.clear();
    scene.forces.clear();
    scene.contacts.clear();
    scene.tick_count = 0;
    scene.elapsed = 0.0;
    scene.perf_stats.reset();
}

// === FORCES ===

pub(super) fn add_gravity(
    scene: &mut SceneCore,
    g: f64,
    body: BodyHandle,
) -> Result<ForceId, EngineError> {
    scene.add_force(UniformGravity { g }, &[body])
}

pub(super) fn add_newtonian_gravity(
    scene: &mut SceneCore,
    g: f64,
    a: BodyHandle,
    b: BodyHandle,
) -> Result<ForceId, EngineError> {
    scene.add_force(NewtonianGravity { g }, &[a, b])
}

pub(super) fn add_spring(
    scene: &mut SceneCore,
    k: f64,
    a: BodyHandle,
    b: BodyHandle,
) -> Result<ForceId, EngineError> {
    scene.add_force(Spring { k }, &[a, b])
}

pub(super) fn add_drag(
    scene: &mut SceneCore,
    gamma: f64,
    body: BodyHandle,
) -> Result<ForceId, EngineError> {
    scene.add_force(Drag { gamma }, &[body])
}

// === COLLISIONS ===

pub(super) fn add_bounce(
    scene: &mut SceneCore,
    a: BodyHandle,
    b: BodyHandle,
    elasticity: Option<f64>,
) -> Result<ContactId, EngineError> {
    if let Some(e) = elasticity {
        if !e.is_finite() || e < 0.0 {
            return Err(EngineError::InvalidElasticity(e));
        }
    }
    scene.add_collision(a, b, Bounce { elasticity })
}

pub(super) fn add_destroy_one(
    scene: &mut SceneCore,
    a: BodyHandle,
    b: BodyHandle,
) -> Result<ContactId, EngineError> {
    scene.add_collision(a, b, DestroyOne { target: Target::Second })
}

pub(super) fn add_destroy_both(
    scene: &mut SceneCore,
    a: BodyHandle,
    b: BodyHandle,
) -> Result<ContactId, EngineError> {
    scene.add_collision(a, b, DestroyBoth)
}

pub(super) fn add_rotating(
    scene: &mut SceneCore,
    a: BodyHandle,
    b: BodyHandle,
    angle: f64,
) -> Result<ContactId, EngineError> {
    scene.add_collision(a, b, Rotate { target: Target::Second, angle })
}
