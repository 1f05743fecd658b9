use crate::domain::body::Body;
use crate::domain::config::SceneConfig;
use super::ForceRule;

/// Constant downward acceleration: `v.y -= g * dt`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformGravity {
    pub g: f64,
}

impl ForceRule for UniformGravity {
    fn name(&self) -> &'static str {
        "uniform gravity"
    }

    fn apply(&self, bodies: &mut [&mut Body], dt: f64, _config: &SceneConfig) {
        for body in bodies.iter_mut() {
            if body.is_immovable() {
                continue;
            }
            let mut v = body.velocity();
            v.y -= self.g * dt;
            body.set_velocity(v);
        }
    }
}

/// Pairwise inverse-square attraction `F = G·m1·m2 / r²`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NewtonianGravity {
    pub g: f64,
}

impl ForceRule for NewtonianGravity {
    fn name(&self) -> &'static str {
        "newtonian gravity"
    }

    fn arity(&self) -> Option<usize> {
        Some(2)
    }

    fn apply(&self, bodies: &mut [&mut Body], dt: f64, config: &SceneConfig) {
        let [a, b] = bodies else {
            return;
        };

        // Pull from an infinite mass is unbounded; neither side moves.
        if a.is_immovable() || b.is_immovable() {
            return;
        }

        let d = b.centroid() - a.centroid();
        let r = d.length();
        if r < config.min_attraction_distance || r == 0.0 {
            return;
        }

        let dir = d * (1.0 / r);
        let force = self.g * a.mass() * b.mass() / (r * r);

        let dv_a = dir * (force / a.mass() * dt);
        let dv_b = dir * (force / b.mass() * dt);
        let (va, vb) = (a.velocity(), b.velocity());
        a.set_velocity(va + dv_a);
        b.set_velocity(vb - dv_b);
    }
}

/// Hooke spring between two centroids with zero rest length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    pub k: f64,
}

impl ForceRule for Spring {
    fn name(&self) -> &'static str {
        "spring"
    }

    fn arity(&self) -> Option<usize> {
        Some(2)
    }

    fn apply(&self, bodies: &mut [&mut Body], dt: f64, _config: &SceneConfig) {
        let [a, b] = bodies else {
            return;
        };

        let force = (b.centroid() - a.centroid()) * self.k;
        let va = a.velocity() + force * (a.inverse_mass() * dt);
        let vb = b.velocity() - force * (b.inverse_mass() * dt);
        a.set_velocity(va);
        b.set_velocity(vb);
    }
}

/// Linear drag `F = -gamma·v`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drag {
    pub gamma: f64,
}

impl ForceRule for Drag {
    fn name(&self) -> &'static str {
        "drag"
    }

    fn apply(&self, bodies: &mut [&mut Body], dt: f64, _config: &SceneConfig) {
        for body in bodies.iter_mut() {
            // Large gamma*dt would flip the velocity; stop at zero instead.
            let k = (self.gamma * dt * body.inverse_mass()).clamp(0.0, 1.0);
            let v = body.velocity();
            body.set_velocity(v - v * k);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{shapes, Vec2};

    fn body_at(x: f64, y: f64, mass: f64) -> Body {
        Body::new(shapes::rectangle(1.0, 1.0, Vec2::new(x, y)).unwrap(), mass, "b").unwrap()
    }

    #[test]
    fn gravity_subtracts_g_dt() {
        let mut b = body_at(0.0, 100.0, 1.0);
        let mut wall = body_at(0.0, 0.0, Body::IMMOVABLE);
        UniformGravity { g: 500.0 }.apply(&mut [&mut b, &mut wall], 0.1, &SceneConfig::default());
        assert!((b.velocity().y + 50.0).abs() < 1e-9);
        assert_eq!(wall.velocity(), Vec2::zero());
    }

    #[test]
    fn newtonian_equal_masses_is_momentum_neutral() {
        let mut a = body_at(-5.0, 0.0, 3.0);
        let mut b = body_at(5.0, 0.0, 3.0);
        NewtonianGravity { g: 10.0 }.apply(&mut [&mut a, &mut b], 0.5, &SceneConfig::default());

        // F = 10*3*3/100 = 0.9, dv = F/m*dt = 0.15
        assert!((a.velocity() - Vec2::new(0.15, 0.0)).length() < 1e-12);
        assert!((a.velocity() + b.velocity()).length() < 1e-12);
    }

    #[test]
    fn newtonian_skips_near_coincident_bodies() {
        let mut a = body_at(0.0, 0.0, 1.0);
        let mut b = body_at(0.0, 0.0, 1.0);
        NewtonianGravity { g: 1e6 }.apply(&mut [&mut a, &mut b], 1.0, &SceneConfig::default());
        assert_eq!(a.velocity(), Vec2::zero());
        assert_eq!(b.velocity(), Vec2::zero());
    }

    #[test]
    fn newtonian_never_moves_immovable_bodies() {
        let mut sun = body_at(0.0, 0.0, Body::IMMOVABLE);
        let mut rock = body_at(10.0, 0.0, 1.0);
        NewtonianGravity { g: 1.0 }.apply(&mut [&mut sun, &mut rock], 1.0, &SceneConfig::default());
        assert_eq!(sun.velocity(), Vec2::zero());
        assert!(rock.velocity().is_finite());
    }

    #[test]
    fn spring_pulls_toward_anchor() {
        let mut anchor = body_at(0.0, 0.0, Body::IMMOVABLE);
        let mut bob = body_at(2.0, 0.0, 2.0);
        Spring { k: 4.0 }.apply(&mut [&mut anchor, &mut bob], 0.5, &SceneConfig::default());
        // F = -8 on bob, dv = -8/2*0.5 = -2
        assert!((bob.velocity() - Vec2::new(-2.0, 0.0)).length() < 1e-12);
        assert_eq!(anchor.velocity(), Vec2::zero());
    }

    #[test]
    fn drag_never_reverses_velocity() {
        let mut b = body_at(0.0, 0.0, 1.0).with_velocity(Vec2::new(10.0, 0.0));
        Drag { gamma: 1000.0 }.apply(&mut [&mut b], 1.0, &SceneConfig::default());
        assert_eq!(b.velocity(), Vec2::zero());

        let mut c = body_at(0.0, 0.0, 2.0).with_velocity(Vec2::new(10.0, 0.0));
        Drag { gamma: 1.0 }.apply(&mut [&mut c], 1.0, &SceneConfig::default());
        assert!((c.velocity().x - 5.0).abs() < 1e-12);
    }
}
