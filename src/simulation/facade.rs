use wasm_bindgen::prelude::*;

use crate::domain::body::Body;
use crate::domain::error::EngineError;
use crate::geometry::{shapes, Polygon, Vec2};
use crate::spatial::BodyHandle;

use super::perf_stats::PerfStats;
use super::SceneCore;

fn js_err(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// JS-facing scene. Body handles cross the boundary as `u64` (BigInt).
#[wasm_bindgen]
pub struct Scene {
    core: SceneCore,
}

impl Scene {
    /// Native access to the wrapped scene
    pub fn core(&self) -> &SceneCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut SceneCore {
        &mut self.core
    }

    fn body(&self, handle: u64) -> Result<&Body, JsValue> {
        self.core.require_body(BodyHandle::from_bits(handle)).map_err(js_err)
    }

    fn body_mut(&mut self, handle: u64) -> Result<&mut Body, JsValue> {
        self.core.require_body_mut(BodyHandle::from_bits(handle)).map_err(js_err)
    }

    fn spawn(
        &mut self,
        polygon: Result<Polygon, EngineError>,
        mass: f64,
        tag: &str,
    ) -> Result<u64, JsValue> {
        let body = Body::new(polygon.map_err(js_err)?, mass, tag).map_err(js_err)?;
        Ok(self.core.add_body(body).to_bits())
    }
}

#[wasm_bindgen]
impl Scene {
    /// Create an empty scene with default tunables
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { core: SceneCore::new() }
    }

    #[wasm_bindgen(js_name = fromConfigJson)]
    pub fn from_config_json(json: &str) -> Result<Scene, JsValue> {
        let core = SceneCore::from_config_json(json).map_err(js_err)?;
        Ok(Self { core })
    }

    pub fn config_json(&self) -> String {
        self.core.config().to_json()
    }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> usize {
        self.core.body_count()
    }

    #[wasm_bindgen(getter)]
    pub fn tick_count(&self) -> u64 {
        self.core.tick_count()
    }

    /// Enable or disable per-tick perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last tick perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    // === BODY CREATION ===

    /// Polygon from flat `[x0, y0, x1, y1, ...]` world coordinates.
    /// An odd-length buffer is rejected.
    pub fn add_polygon(&mut self, coords: &[f64], mass: f64, tag: &str) -> Result<u64, JsValue> {
        self.spawn(Polygon::from_flat(coords), mass, tag)
    }

    pub fn add_rectangle(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        mass: f64,
        tag: &str,
    ) -> Result<u64, JsValue> {
        self.spawn(shapes::rectangle(width, height, Vec2::new(x, y)), mass, tag)
    }

    pub fn add_circle(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        mass: f64,
        tag: &str,
    ) -> Result<u64, JsValue> {
        self.spawn(shapes::circle(radius, Vec2::new(x, y)), mass, tag)
    }

    pub fn add_star(
        &mut self,
        x: f64,
        y: f64,
        points: u32,
        outer: f64,
        inner: f64,
        mass: f64,
        tag: &str,
    ) -> Result<u64, JsValue> {
        self.spawn(shapes::star(points as usize, outer, inner, Vec2::new(x, y)), mass, tag)
    }

    /// Circle with a wedge cut out, mouth centered on +x
    pub fn add_pacman(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        mouth: f64,
        mass: f64,
        tag: &str,
    ) -> Result<u64, JsValue> {
        self.spawn(shapes::pacman(radius, mouth, Vec2::new(x, y)), mass, tag)
    }

    /// Mark for removal; freed at the end of the next tick
    pub fn remove_body(&mut self, handle: u64) -> Result<(), JsValue> {
        self.core.remove_body(BodyHandle::from_bits(handle)).map_err(js_err)
    }

    /// Drop every body and rule
    pub fn clear(&mut self) {
        self.core.clear();
    }

    // === LOOKUPS ===

    pub fn handle_at(&self, index: usize) -> Result<u64, JsValue> {
        self.core.handle_at(index).map(BodyHandle::to_bits).map_err(js_err)
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<u64> {
        self.core.find_by_tag(tag).map(BodyHandle::to_bits)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.core.contains_tag(tag)
    }

    pub fn contains(&self, handle: u64) -> bool {
        self.core.contains(BodyHandle::from_bits(handle))
    }

    /// Do the two bodies overlap right now? No rule needs to be registered.
    pub fn colliding(&self, a: u64, b: u64) -> Result<bool, JsValue> {
        self.core
            .colliding(BodyHandle::from_bits(a), BodyHandle::from_bits(b))
            .map_err(js_err)
    }

    // === BODY STATE ===

    pub fn centroid_x(&self, handle: u64) -> Result<f64, JsValue> {
        Ok(self.body(handle)?.centroid().x)
    }

    pub fn centroid_y(&self, handle: u64) -> Result<f64, JsValue> {
        Ok(self.body(handle)?.centroid().y)
    }

    pub fn set_centroid(&mut self, handle: u64, x: f64, y: f64) -> Result<(), JsValue> {
        self.body_mut(handle)?.set_centroid(Vec2::new(x, y));
        Ok(())
    }

    pub fn rotation(&self, handle: u64) -> Result<f64, JsValue> {
        Ok(self.body(handle)?.rotation())
    }

    pub fn set_rotation(&mut self, handle: u64, radians: f64) -> Result<(), JsValue> {
        self.body_mut(handle)?.set_rotation(radians);
        Ok(())
    }

    pub fn velocity_x(&self, handle: u64) -> Result<f64, JsValue> {
        Ok(self.body(handle)?.velocity().x)
    }

    pub fn velocity_y(&self, handle: u64) -> Result<f64, JsValue> {
        Ok(self.body(handle)?.velocity().y)
    }

    pub fn set_velocity(&mut self, handle: u64, vx: f64, vy: f64) -> Result<(), JsValue> {
        self.body_mut(handle)?.set_velocity(Vec2::new(vx, vy));
        Ok(())
    }

    /// Radians per second, counter-clockwise
    pub fn angular_velocity(&self, handle: u64) -> Result<f64, JsValue> {
        Ok(self.body(handle)?.angular_velocity())
    }

    pub fn set_angular_velocity(&mut self, handle: u64, omega: f64) -> Result<(), JsValue> {
        self.body_mut(handle)?.set_angular_velocity(omega);
        Ok(())
    }

    pub fn elasticity(&self, handle: u64) -> Result<f64, JsValue> {
        Ok(self.body(handle)?.elasticity())
    }

    pub fn set_elasticity(&mut self, handle: u64, elasticity: f64) -> Result<(), JsValue> {
        self.body_mut(handle)?.set_elasticity(elasticity).map_err(js_err)
    }

    pub fn mass(&self, handle: u64) -> Result<f64, JsValue> {
        Ok(self.body(handle)?.mass())
    }

    pub fn set_mass(&mut self, handle: u64, mass: f64) -> Result<(), JsValue> {
        self.body_mut(handle)?.set_mass(mass).map_err(js_err)
    }

    pub fn tag(&self, handle: u64) -> Result<String, JsValue> {
        Ok(self.body(handle)?.tag().to_owned())
    }

    pub fn set_tag(&mut self, handle: u64, tag: &str) -> Result<(), JsValue> {
        self.body_mut(handle)?.set_tag(tag);
        Ok(())
    }

    pub fn score(&self, handle: u64) -> Result<f64, JsValue> {
        Ok(self.body(handle)?.score())
    }

    pub fn set_score(&mut self, handle: u64, score: f64) -> Result<(), JsValue> {
        self.body_mut(handle)?.set_score(score);
        Ok(())
    }

    // === RENDER METADATA ===

    /// Packed 0xAARRGGBB
    pub fn color(&self, handle: u64) -> Result<u32, JsValue> {
        Ok(self.body(handle)?.render().color)
    }

    pub fn set_color(&mut self, handle: u64, color: u32) -> Result<(), JsValue> {
        self.body_mut(handle)?.render_mut().color = color;
        Ok(())
    }

    pub fn texture(&self, handle: u64) -> Result<Option<String>, JsValue> {
        Ok(self.body(handle)?.render().texture.clone())
    }

    pub fn set_texture(&mut self, handle: u64, path: Option<String>) -> Result<(), JsValue> {
        self.body_mut(handle)?.render_mut().texture = path;
        Ok(())
    }

    /// Sprite size for textured bodies
    pub fn set_dimensions(&mut self, handle: u64, width: f64, height: f64) -> Result<(), JsValue> {
        self.body_mut(handle)?.render_mut().dimensions = Some(Vec2::new(width, height));
        Ok(())
    }

    /// World-space vertices as flat `[x0, y0, x1, y1, ...]`
    pub fn vertices(&self, handle: u64) -> Result<Vec<f64>, JsValue> {
        Ok(self.body(handle)?.polygon().to_flat())
    }

    /// Vertex count of every body in index order; pairs with `all_vertices`.
    pub fn vertex_counts(&self) -> Vec<u32> {
        self.core.bodies().map(|b| b.polygon().len() as u32).collect()
    }

    /// Every body's flat vertices, concatenated in index order
    pub fn all_vertices(&self) -> Vec<f64> {
        self.core
            .bodies()
            .flat_map(|b| b.polygon().vertices().iter().flat_map(|v| [v.x, v.y]))
            .collect()
    }

    // === RULES ===

    pub fn add_gravity(&mut self, g: f64, body: u64) -> Result<(), JsValue> {
        self.core.add_gravity(g, BodyHandle::from_bits(body)).map_err(js_err)?;
        Ok(())
    }

    pub fn add_newtonian_gravity(&mut self, g: f64, a: u64, b: u64) -> Result<(), JsValue> {
        self.core
            .add_newtonian_gravity(g, BodyHandle::from_bits(a), BodyHandle::from_bits(b))
            .map_err(js_err)?;
        Ok(())
    }

    pub fn add_spring(&mut self, k: f64, a: u64, b: u64) -> Result<(), JsValue> {
        self.core
            .add_spring(k, BodyHandle::from_bits(a), BodyHandle::from_bits(b))
            .map_err(js_err)?;
        Ok(())
    }

    pub fn add_drag(&mut self, gamma: f64, body: u64) -> Result<(), JsValue> {
        self.core.add_drag(gamma, BodyHandle::from_bits(body)).map_err(js_err)?;
        Ok(())
    }

    /// `elasticity` of `undefined` derives the coefficient from the bodies
    pub fn add_bounce(&mut self, a: u64, b: u64, elasticity: Option<f64>) -> Result<(), JsValue> {
        self.core
            .add_bounce(BodyHandle::from_bits(a), BodyHandle::from_bits(b), elasticity)
            .map_err(js_err)?;
        Ok(())
    }

    /// Remove `b` the first time it touches `a`
    pub fn add_destroy_one(&mut self, a: u64, b: u64) -> Result<(), JsValue> {
        self.core
            .add_destroy_one(BodyHandle::from_bits(a), BodyHandle::from_bits(b))
            .map_err(js_err)?;
        Ok(())
    }

    pub fn add_destroy_both(&mut self, a: u64, b: u64) -> Result<(), JsValue> {
        self.core
            .add_destroy_both(BodyHandle::from_bits(a), BodyHandle::from_bits(b))
            .map_err(js_err)?;
        Ok(())
    }

    pub fn add_rotating(&mut self, a: u64, b: u64, angle: f64) -> Result<(), JsValue> {
        self.core
            .add_rotating(BodyHandle::from_bits(a), BodyHandle::from_bits(b), angle)
            .map_err(js_err)?;
        Ok(())
    }

    // === STEPPING ===

    /// Advance the scene by `dt` seconds
    pub fn tick(&mut self, dt: f64) -> Result<(), JsValue> {
        self.core.tick(dt).map_err(js_err)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
