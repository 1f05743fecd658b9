use hopper_engine::Scene;

#[test]
fn angular_velocity_spins_bodies_through_the_facade() {
    let mut scene = Scene::new();
    let wheel = scene.add_circle(0.0, 0.0, 5.0, 1.0, "wheel").unwrap();
    assert_eq!(scene.angular_velocity(wheel).unwrap(), 0.0);

    scene.set_angular_velocity(wheel, 2.0).unwrap();
    scene.tick(0.25).unwrap();
    assert!((scene.rotation(wheel).unwrap() - 0.5).abs() < 1e-12);
    assert_eq!(scene.angular_velocity(wheel).unwrap(), 2.0);
}

#[test]
fn colliding_answers_without_a_rule() {
    let mut scene = Scene::new();
    let hopper = scene.add_rectangle(0.0, 0.0, 10.0, 10.0, 1.0, "hopper").unwrap();
    let portal = scene
        .add_polygon(&[3.0, -2.0, 9.0, -2.0, 9.0, 2.0, 3.0, 2.0], f64::INFINITY, "portal")
        .unwrap();
    let bone = scene.add_star(40.0, 0.0, 5, 4.0, 2.0, 1.0, "bone").unwrap();

    assert!(scene.colliding(hopper, portal).unwrap());
    assert!(!scene.colliding(hopper, bone).unwrap());

    scene.set_centroid(hopper, 38.0, 0.0).unwrap();
    assert!(scene.colliding(bone, hopper).unwrap());
    assert!(!scene.colliding(hopper, portal).unwrap());
}
