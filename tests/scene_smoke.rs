use hopper_engine::{shapes, Body, EngineError, SceneCore, Vec2};

const GRAVITY: f64 = 500.0;

/// A small level: a hopper bouncing on a floor, a bone to eat, a shelf that
/// spins it and a mine that takes both out.
#[test]
fn hopper_level_plays_out() {
    let mut scene = SceneCore::from_config_json(r#"{"restitution": "product"}"#).unwrap();

    let floor_shape = shapes::rectangle(400.0, 20.0, Vec2::new(0.0, -10.0)).unwrap();
    let floor = scene.add_body(Body::new(floor_shape, Body::IMMOVABLE, "floor").unwrap());
    let hopper = scene.add_body(
        Body::new(shapes::rectangle(10.0, 10.0, Vec2::new(0.0, 20.0)).unwrap(), 10.0, "hopper")
            .unwrap()
            .with_elasticity(0.9)
            .unwrap()
            .with_velocity(Vec2::new(30.0, 0.0)),
    );
    let bone = scene.add_body(
        Body::new(shapes::star(5, 4.0, 2.0, Vec2::new(40.0, 5.0)).unwrap(), 1.0, "bone")
            .unwrap()
            .with_score(10.0),
    );

    scene.add_gravity(GRAVITY, hopper).unwrap();
    scene.add_bounce(floor, hopper, None).unwrap();
    let eat = scene.add_destroy_one(hopper, bone).unwrap();

    for _ in 0..240 {
        scene.tick(1.0 / 60.0).unwrap();
        let y = scene.body(hopper).unwrap().centroid().y;
        assert!(y > -20.0, "hopper fell through the floor: y = {y}");
    }

    assert_eq!(scene.contacts().get(eat).unwrap().fire_count(), 1);
    assert!(!scene.contains_tag("bone"));
    assert!(scene.contains_tag("hopper"));
    assert_eq!(scene.body_count(), 2);
    assert_eq!(scene.handle_at(1).unwrap(), hopper);
}

#[test]
fn custom_rules_plug_into_the_scene() {
    let mut scene = SceneCore::new();
    let a = scene.add_body(
        Body::new(shapes::rectangle(2.0, 2.0, Vec2::zero()).unwrap(), 1.0, "a").unwrap(),
    );
    let b = scene.add_body(
        Body::new(shapes::rectangle(2.0, 2.0, Vec2::new(1.0, 0.0)).unwrap(), 1.0, "b").unwrap(),
    );

    let wind = |bodies: &mut [&mut Body], dt: f64| {
        for body in bodies.iter_mut() {
            body.add_force(Vec2::new(10.0, 0.0) * (1.0 / dt.max(1.0)));
        }
    };
    scene.add_force(wind, &[a]).unwrap();

    let score = |x: &mut Body, y: &mut Body, _: &hopper_engine::CollisionInfo| {
        x.set_score(x.score() + 1.0);
        y.set_score(y.score() + 1.0);
        true
    };
    scene.add_collision(a, b, score).unwrap();

    scene.tick(0.5).unwrap();
    assert_eq!(scene.body(a).unwrap().velocity(), Vec2::new(5.0, 0.0));
    assert_eq!(scene.body(b).unwrap().score(), 1.0);

    assert_eq!(scene.add_force(wind, &[]).unwrap_err(), EngineError::EmptyBodySet);
}
