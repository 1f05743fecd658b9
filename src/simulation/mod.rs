//! Scene - bodies plus the rules that move and collide them
//!
//! Every tick runs four phases in a fixed order:
//! forces -> integrate -> collisions -> compact
//!
//! Bodies marked for removal during a tick stay readable until the compact
//! phase frees them, so rules never see a dangling body mid-tick.

use crate::domain::body::Body;
use crate::domain::config::SceneConfig;
use crate::domain::error::EngineError;
use crate::spatial::{BodyArena, BodyHandle};
use crate::systems::collision::find_collision;
use crate::systems::contacts::{CollisionRegistry, CollisionRule, ContactId};
use crate::systems::forces::{ForceId, ForceRegistry, ForceRule};

#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use facade::Scene;
pub use perf_stats::PerfStats;

use perf_stats::PhaseClock;

/// The simulation scene
pub struct SceneCore {
    arena: BodyArena,
    /// Live handles in insertion order; indices into this are the public
    /// body indices.
    order: Vec<BodyHandle>,
    forces: ForceRegistry,
    contacts: CollisionRegistry,
    config: SceneConfig,

    // State
    tick_count: u64,
    elapsed: f64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl Default for SceneCore {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneCore {
    /// Empty scene with default tunables
    pub fn new() -> Self {
        init::create_scene_core(SceneConfig::default())
    }

    pub fn with_config(config: SceneConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(init::create_scene_core(config))
    }

    /// Build from camelCase JSON; missing fields take defaults.
    pub fn from_config_json(json: &str) -> Result<Self, EngineError> {
        Ok(init::create_scene_core(SceneConfig::from_json(json)?))
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SceneConfig) -> Result<(), EngineError> {
        settings::set_config(self, config)
    }

    /// Completed ticks since creation or the last `clear`
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Simulated seconds since creation or the last `clear`
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Enable or disable per-tick perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last tick perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === BODIES ===

    /// Append a body; it takes the next index.
    pub fn add_body(&mut self, body: Body) -> BodyHandle {
        commands::add_body(self, body)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.arena.get(handle)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.arena.get_mut(handle)
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.arena.contains(handle)
    }

    /// Handle of the body at `index` in insertion order.
    /// Indices shift down when an earlier body is compacted away.
    pub fn handle_at(&self, index: usize) -> Result<BodyHandle, EngineError> {
        self.order
            .get(index)
            .copied()
            .ok_or(EngineError::IndexOutOfRange { index, len: self.order.len() })
    }

    pub fn body_at(&self, index: usize) -> Result<&Body, EngineError> {
        let handle = self.handle_at(index)?;
        self.require_body(handle)
    }

    pub fn body_count(&self) -> usize {
        self.order.len()
    }

    /// Bodies in index order, including ones marked for removal this tick.
    pub fn bodies(&self) -> impl Iterator<Item = &Body> + '_ {
        self.order.iter().filter_map(move |h| self.arena.get(*h))
    }

    pub fn handles(&self) -> &[BodyHandle] {
        &self.order
    }

    /// First body with `tag` that is not marked for removal.
    pub fn find_by_tag(&self, tag: &str) -> Option<BodyHandle> {
        self.tagged(tag).next()
    }

    pub fn handles_with_tag(&self, tag: &str) -> Vec<BodyHandle> {
        self.tagged(tag).collect()
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.find_by_tag(tag).is_some()
    }

    /// Whether the two bodies overlap right now, by the same test and
    /// epsilon the collision phase uses. Game code reads this for scoring
    /// without registering a rule.
    pub fn colliding(&self, a: BodyHandle, b: BodyHandle) -> Result<bool, EngineError> {
        let (a, b) = (self.require_body(a)?, self.require_body(b)?);
        Ok(find_collision(a.polygon(), b.polygon(), self.config.collision_epsilon).collided)
    }

    /// Mark for removal; the body is freed at the end of the next tick.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<(), EngineError> {
        commands::remove_body(self, handle)
    }

    /// Drop every body and rule.
    pub fn clear(&mut self) {
        commands::clear(self)
    }

    // === RULES ===

    pub fn forces(&self) -> &ForceRegistry {
        &self.forces
    }

    pub fn contacts(&self) -> &CollisionRegistry {
        &self.contacts
    }

    pub fn add_force<R>(&mut self, rule: R, bodies: &[BodyHandle]) -> Result<ForceId, EngineError>
    where
        R: ForceRule + 'static,
    {
        self.forces.register(&self.arena, Box::new(rule), bodies.to_vec())
    }

    /// `v.y -= g*dt` on `body` every tick
    pub fn add_gravity(&mut self, g: f64, body: BodyHandle) -> Result<ForceId, EngineError> {
        commands::add_gravity(self, g, body)
    }

    pub fn add_newtonian_gravity(
        &mut self,
        g: f64,
        a: BodyHandle,
        b: BodyHandle,
    ) -> Result<ForceId, EngineError> {
        commands::add_newtonian_gravity(self, g, a, b)
    }

    pub fn add_spring(
        &mut self,
        k: f64,
        a: BodyHandle,
        b: BodyHandle,
    ) -> Result<ForceId, EngineError> {
        commands::add_spring(self, k, a, b)
    }

    pub fn add_drag(&mut self, gamma: f64, body: BodyHandle) -> Result<ForceId, EngineError> {
        commands::add_drag(self, gamma, body)
    }

    pub fn add_collision<R>(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
        rule: R,
    ) -> Result<ContactId, EngineError>
    where
        R: CollisionRule + 'static,
    {
        self.contacts.register(&self.arena, Box::new(rule), a, b)
    }

    /// Elastic bounce; `None` derives the coefficient from the bodies.
    pub fn add_bounce(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
        elasticity: Option<f64>,
    ) -> Result<ContactId, EngineError> {
        commands::add_bounce(self, a, b, elasticity)
    }

    /// Remove `b` the first time it touches `a`
    pub fn add_destroy_one(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
    ) -> Result<ContactId, EngineError> {
        commands::add_destroy_one(self, a, b)
    }

    pub fn add_destroy_both(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
    ) -> Result<ContactId, EngineError> {
        commands::add_destroy_both(self, a, b)
    }

    /// Rotate `b` by `angle` each time it starts touching `a`
    pub fn add_rotating(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
        angle: f64,
    ) -> Result<ContactId, EngineError> {
        commands::add_rotating(self, a, b, angle)
    }

    // === STEPPING ===

    /// Advance the scene by `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> Result<(), EngineError> {
        step::tick(self, dt)
    }

    fn tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = BodyHandle> + 'a {
        self.order.iter().copied().filter(move |h| {
            self.arena
                .get(*h)
                .is_some_and(|b| !b.is_removed() && b.tag() == tag)
        })
    }

    pub(crate) fn require_body(&self, handle: BodyHandle) -> Result<&Body, EngineError> {
        self.arena.get(handle).ok_or(EngineError::UnknownBody(handle))
    }

    pub(crate) fn require_body_mut(
        &mut self,
        handle: BodyHandle,
    ) -> Result<&mut Body, EngineError> {
        self.arena.get_mut(handle).ok_or(EngineError::UnknownBody(handle))
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
