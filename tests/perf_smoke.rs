use hopper_engine::Scene;

#[test]
fn perf_smoke_tick() {
    let mut scene = Scene::new();
    scene.enable_perf_metrics(true);
    let ground = scene
        .add_rectangle(0.0, -50.0, 2000.0, 100.0, f64::INFINITY, "ground")
        .unwrap();
    for i in 0..64 {
        let x = (i % 16) as f64 * 10.0;
        let y = 20.0 + (i / 16) as f64 * 10.0;
        let ball = scene.add_circle(x, y, 3.0, 1.0, "ball").unwrap();
        scene.add_gravity(500.0, ball).unwrap();
        scene.add_bounce(ground, ball, Some(0.8)).unwrap();
    }
    for _ in 0..10 {
        scene.tick(1.0 / 60.0).unwrap();
    }
    let stats = scene.get_perf_stats();
    assert!(stats.tick_ms() >= 0.0);
    assert_eq!(stats.body_count(), 65);
    assert_eq!(stats.forces_applied(), 64);
    assert_eq!(stats.active_collisions(), 64);
}
