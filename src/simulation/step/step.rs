use tracing::debug;

use crate::domain::error::EngineError;

use super::{PhaseClock, SceneCore};

pub(super) fn tick(scene: &mut SceneCore, dt: f64) -> Result<(), EngineError> {
    if !dt.is_finite() || dt < 0.0 {
        return Err(EngineError::InvalidTimeStep(dt));
    }

    let perf_on = scene.perf_enabled;
    if perf_on {
        scene.perf_stats.reset();
    }
    let mut clock = perf_on.then(PhaseClock::start);

    // === FORCES ===
    let applied = scene.forces.apply_all(&mut scene.arena, dt, &scene.config);
    if let Some(clock) = clock.as_mut() {
        scene.perf_stats.forces_ms = clock.lap();
    }

    // === INTEGRATE ===
    integrate(scene, dt);
    if let Some(clock) = clock.as_mut() {
        scene.perf_stats.integrate_ms = clock.lap();
    }

    // === COLLISIONS ===
    // Sees post-integration positions; removals are only marked here.
    let fired = scene.contacts.evaluate_all(&mut scene.arena, &scene.config);
    if let Some(clock) = clock.as_mut() {
        scene.perf_stats.collisions_ms = clock.lap();
    }

    // === COMPACT ===
    let removed = compact(scene);
    if let Some(clock) = clock.as_mut() {
        scene.perf_stats.compact_ms = clock.lap();
    }

    scene.tick_count += 1;
    scene.elapsed += dt;

    if let Some(clock) = clock {
        let stats = &mut scene.perf_stats;
        stats.tick_ms = clock.total();
        stats.body_count = scene.order.len() as u32;
        stats.bodies_removed = removed as u32;
        stats.forces_applied = applied as u32;
        stats.collisions_fired = fired as u32;
        stats.active_forces = scene.forces.active_count() as u32;
        stats.active_collisions = scene.contacts.active_count() as u32;
    }
    Ok(())
}

fn integrate(scene: &mut SceneCore, dt: f64) {
    for &handle in &scene.order {
        if let Some(body) = scene.arena.get_mut(handle) {
            if !body.is_removed() {
                body.integrate(dt);
            }
        }
    }
}

/// Free every body marked for removal. Survivors keep their relative order.
fn compact(scene: &mut SceneCore) -> usize {
    let arena = &mut scene.arena;
    let before = scene.order.len();
    scene.order.retain(|&handle| match arena.get(handle).map(|b| b.is_removed()) {
        Some(true) => {
            arena.free(handle);
            false
        }
        Some(false) => true,
        None => false,
    });

    let removed = before - scene.order.len();
    if removed > 0 {
        debug!(removed, remaining = scene.order.len(), "bodies compacted");
    }
    removed
}
