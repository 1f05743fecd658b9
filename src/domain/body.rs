use crate::geometry::{Polygon, Vec2};

use super::error::EngineError;

/// Render-layer metadata carried alongside a body. Never read by physics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderInfo {
    /// Packed 0xAARRGGBB.
    pub color: u32,
    /// Image path the renderer should draw instead of the polygon.
    pub texture: Option<String>,
    /// Sprite size; the polygon is the physics shape, not the sprite.
    pub dimensions: Option<Vec2>,
}

/// Rigid Body - moves as a single unit
#[derive(Clone, Debug)]
pub struct Body {
    // === Shape ===
    /// Vertices relative to the centroid at rotation 0
    local: Vec<Vec2>,
    /// World-space polygon, always derived from `local`, `centroid`, `rotation`
    world: Polygon,

    // === Physics State ===
    centroid: Vec2,
    /// Rotation angle (radians)
    rotation: f64,
    velocity: Vec2,
    /// Radians per second
    angular_velocity: f64,
    /// Positive; `Body::IMMOVABLE` for static geometry
    mass: f64,
    /// Coefficient of restitution used by bounce collisions
    elasticity: f64,

    // Accumulated since the last integration
    force: Vec2,
    impulse: Vec2,

    // === Game metadata ===
    tag: String,
    score: f64,
    render: RenderInfo,

    removed: bool,
}

impl Body {
    /// Infinite mass: ignores forces and impulses.
    pub const IMMOVABLE: f64 = f64::INFINITY;

    /// Create a body from a world-space polygon.
    ///
    /// The polygon's area centroid becomes the body's centroid and its
    /// current orientation becomes rotation 0.
    pub fn new(polygon: Polygon, mass: f64, tag: impl Into<String>) -> Result<Self, EngineError> {
        validate_mass(mass)?;
        let centroid = polygon.centroid();
        let local = polygon.vertices().iter().map(|v| *v - centroid).collect();

        Ok(Self {
            local,
            world: polygon,
            centroid,
            rotation: 0.0,
            velocity: Vec2::zero(),
            angular_velocity: 0.0,
            mass,
            elasticity: 1.0,
            force: Vec2::zero(),
            impulse: Vec2::zero(),
            tag: tag.into(),
            score: 0.0,
            render: RenderInfo::default(),
            removed: false,
        })
    }

    pub fn with_elasticity(mut self, elasticity: f64) -> Result<Self, EngineError> {
        self.set_elasticity(elasticity)?;
        Ok(self)
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    pub fn with_render_info(mut self, render: RenderInfo) -> Self {
        self.render = render;
        self
    }

    // === Getters ===

    #[inline]
    pub fn polygon(&self) -> &Polygon {
        &self.world
    }

    #[inline]
    pub fn centroid(&self) -> Vec2 {
        self.centroid
    }

    #[inline]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// 0 for immovable bodies.
    #[inline]
    pub fn inverse_mass(&self) -> f64 {
        if self.is_immovable() {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    #[inline]
    pub fn is_immovable(&self) -> bool {
        self.mass.is_infinite()
    }

    #[inline]
    pub fn elasticity(&self) -> f64 {
        self.elasticity
    }

    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[inline]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[inline]
    pub fn render(&self) -> &RenderInfo {
        &self.render
    }

    #[inline]
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    // === Mutators ===

    pub fn set_centroid(&mut self, centroid: Vec2) {
        self.centroid = centroid;
        self.refresh_world();
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.set_centroid(self.centroid + delta);
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
        self.refresh_world();
    }

    /// Rotate about the centroid.
    pub fn rotate_by(&mut self, angle: f64) {
        self.set_rotation(self.rotation + angle);
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: f64) {
        self.angular_velocity = angular_velocity;
    }

    pub fn set_mass(&mut self, mass: f64) -> Result<(), EngineError> {
        validate_mass(mass)?;
        self.mass = mass;
        Ok(())
    }

    pub fn set_elasticity(&mut self, elasticity: f64) -> Result<(), EngineError> {
        if !elasticity.is_finite() || elasticity < 0.0 {
            return Err(EngineError::InvalidElasticity(elasticity));
        }
        self.elasticity = elasticity;
        Ok(())
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
    }

    pub fn set_score(&mut self, score: f64) {
        self.score = score;
    }

    pub fn render_mut(&mut self) -> &mut RenderInfo {
        &mut self.render
    }

    /// Mark for removal. The owning scene frees the body at the end of the
    /// next tick; until then it stays readable.
    pub fn remove(&mut self) {
        self.removed = true;
    }

    /// Continuous force, applied over the next integration step.
    pub fn add_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Instantaneous momentum change, applied on the next integration step.
    pub fn add_impulse(&mut self, impulse: Vec2) {
        self.impulse += impulse;
    }

    /// Advance position and rotation by `dt` using the current velocity.
    pub fn integrate(&mut self, dt: f64) {
        let inv_mass = self.inverse_mass();
        self.velocity += (self.force * dt + self.impulse) * inv_mass;
        self.force = Vec2::zero();
        self.impulse = Vec2::zero();

        self.centroid += self.velocity * dt;
        self.rotation += self.angular_velocity * dt;
        self.refresh_world();
    }

    fn refresh_world(&mut self) {
        let (sin, cos) = self.rotation.sin_cos();
        let centroid = self.centroid;
        // `local` and `world` always have the same vertex count.
        for (dst, p) in self.world.vertices_mut().iter_mut().zip(&self.local) {
            *dst = Vec2::new(
                centroid.x + p.x * cos - p.y * sin,
                centroid.y + p.x * sin + p.y * cos,
            );
        }
    }
}

fn validate_mass(mass: f64) -> Result<(), EngineError> {
    if mass.is_nan() || mass <= 0.0 {
        return Err(EngineError::InvalidMass(mass));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::shapes;

    fn square_at(center: Vec2) -> Body {
        Body::new(shapes::rectangle(2.0, 2.0, center).unwrap(), 1.0, "Box").unwrap()
    }

    #[test]
    fn new_takes_centroid_from_polygon() {
        let body = square_at(Vec2::new(5.0, 7.0));
        assert!((body.centroid() - Vec2::new(5.0, 7.0)).length() < 1e-12);
        assert_eq!(body.rotation(), 0.0);
        assert_eq!(body.tag(), "Box");
        assert!(!body.is_removed());
    }

    #[test]
    fn rejects_bad_mass() {
        let poly = shapes::rectangle(1.0, 1.0, Vec2::zero()).unwrap();
        for mass in [0.0, -1.0, f64::NAN, f64::NEG_INFINITY] {
            assert!(Body::new(poly.clone(), mass, "x").is_err(), "mass {mass}");
        }
        assert!(Body::new(poly, Body::IMMOVABLE, "wall").unwrap().is_immovable());
    }

    #[test]
    fn set_centroid_moves_every_vertex() {
        let mut body = square_at(Vec2::zero());
        body.set_centroid(Vec2::new(10.0, -3.0));
        let (lo, hi) = body.polygon().aabb();
        assert!((lo - Vec2::new(9.0, -4.0)).length() < 1e-12);
        assert!((hi - Vec2::new(11.0, -2.0)).length() < 1e-12);
    }

    #[test]
    fn rotation_is_about_the_centroid_and_does_not_drift() {
        let mut body = square_at(Vec2::new(3.0, 3.0));
        let original = body.polygon().clone();
        for _ in 0..1000 {
            body.rotate_by(std::f64::consts::TAU / 1000.0);
        }
        assert!((body.centroid() - Vec2::new(3.0, 3.0)).length() < 1e-12);
        for (a, b) in body.polygon().vertices().iter().zip(original.vertices()) {
            assert!((*a - *b).length() < 1e-9);
        }
    }

    #[test]
    fn integrate_uses_velocity_and_accumulators() {
        let mut body = square_at(Vec2::zero()).with_velocity(Vec2::new(1.0, 0.0));
        body.add_impulse(Vec2::new(0.0, 2.0));
        body.integrate(0.5);
        assert_eq!(body.velocity(), Vec2::new(1.0, 2.0));
        assert!((body.centroid() - Vec2::new(0.5, 1.0)).length() < 1e-12);

        // Accumulators are consumed.
        body.integrate(0.5);
        assert_eq!(body.velocity(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn immovable_ignores_force() {
        let poly = shapes::rectangle(1.0, 1.0, Vec2::zero()).unwrap();
        let mut wall = Body::new(poly, Body::IMMOVABLE, "Wall").unwrap();
        wall.add_force(Vec2::new(1e9, 1e9));
        wall.integrate(1.0);
        assert_eq!(wall.velocity(), Vec2::zero());
        assert_eq!(wall.inverse_mass(), 0.0);
    }

    #[test]
    fn elasticity_must_be_non_negative() {
        let mut body = square_at(Vec2::zero());
        assert_eq!(body.set_elasticity(-0.1), Err(EngineError::InvalidElasticity(-0.1)));
        assert!(body.set_elasticity(0.0).is_ok());
        assert_eq!(body.elasticity(), 0.0);
    }
}
