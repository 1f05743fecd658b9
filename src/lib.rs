//! Hopper Engine - 2D rigid-body physics for the browser
//!
//! Architecture:
//! - geometry/    - Vectors, polygons, shape builders
//! - domain/      - Bodies, config, errors
//! - spatial/     - Generation-counted body storage
//! - systems/     - Collision detection, force and collision rules
//! - simulation/  - Scene orchestration and the wasm facade

pub mod geometry;
pub mod domain;
pub mod spatial;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"Hopper physics engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use domain::body::{Body, RenderInfo};
pub use domain::config::{RestitutionPolicy, SceneConfig};
pub use domain::error::EngineError;
pub use geometry::{shapes, Polygon, Vec2};
pub use simulation::{PerfStats, Scene, SceneCore};
pub use spatial::BodyHandle;
pub use systems::collision::{find_collision, CollisionInfo};
pub use systems::contacts::{CollisionRule, Trigger};
pub use systems::forces::ForceRule;
