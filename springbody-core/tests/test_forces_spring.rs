//! Long-run behaviour of the damped spring

use glam::Vec2;
use springbody_core::tests::test_helpers::spring_body;
use springbody_core::Body;

#[test]
fn test_underdamped_spring_overshoots_then_settles() {
    // zeta = 4 / (2 * sqrt(30)) ~ 0.37
    let mut body = spring_body(1.0, 30.0, 4.0, Vec2::new(15.0, 0.0));
    let mut min_x = f32::MAX;

    for _ in 0..10_000 {
        body.tick(0.001).unwrap();
        min_x = min_x.min(body.position_x());
    }

    assert!(min_x < -1.0, "underdamped spring should overshoot, min x was {}", min_x);
    assert!(body.position().length() < 1e-3);
    assert!(body.velocity().length() < 1e-3);
}

#[test]
fn test_overdamped_spring_converges_without_overshoot() {
    // zeta = 10 / (2 * sqrt(1)) = 5
    let mut body = spring_body(1.0, 1.0, 10.0, Vec2::new(15.0, 0.0));
    let mut previous = body.position_x();

    for _ in 0..5_000 {
        body.tick(0.01).unwrap();
        let x = body.position_x();
        assert!(x <= previous, "overdamped approach must be monotonic");
        assert!(x >= 0.0, "overdamped approach must not cross equilibrium");
        previous = x;
    }

    assert!(body.position_x() < 0.2);
}

#[test]
fn test_converges_to_offset_equilibrium() {
    let mut body = spring_body(1.0, 30.0, 6.0, Vec2::new(-4.0, 9.0));
    body.set_spring_equilibrium_position(2.0, -3.0).unwrap();

    for _ in 0..1_200 {
        body.tick(1.0 / 120.0).unwrap();
    }

    assert!((body.position() - Vec2::new(2.0, -3.0)).length() < 1e-3);
}

#[test]
fn test_damped_speed_stays_bounded_where_explicit_euler_grows() {
    let dt = 1.0 / 30.0;
    let (k, c) = (30.0, 0.1);
    let mut body = spring_body(1.0, k, c, Vec2::new(15.0, 0.0));

    let mut speeds = Vec::new();
    for _ in 0..600 {
        body.tick(dt).unwrap();
        speeds.push(body.velocity().length());
    }
    let early = speeds[..60].iter().cloned().fold(0.0, f32::max);
    let late = speeds[540..].iter().cloned().fold(0.0, f32::max);
    assert!(late < early, "damped speed grew from {} to {}", early, late);

    // Same system, position updated from the old velocity
    let (mut x, mut v) = (15.0f32, 0.0f32);
    let mut explicit_late = 0.0f32;
    for i in 0..600 {
        let a = -k * x - c * v;
        x += v * dt;
        v += a * dt;
        if i >= 540 {
            explicit_late = explicit_late.max(v.abs());
        }
    }
    assert!(explicit_late > early * 10.0);
}

#[test]
fn test_gravity_sag_balances_spring() {
    // Rest where k * x = m * g: 20 * x = 2 * 10
    let mut body = Body::new()
        .with_mass(2.0)
        .and_then(|b| b.with_spring(20.0, Vec2::ZERO))
        .and_then(|b| b.with_gravity(Vec2::new(0.0, -10.0)))
        .and_then(|b| b.with_drag(8.0))
        .unwrap();

    for _ in 0..1_200 {
        body.tick(1.0 / 120.0).unwrap();
    }

    assert!((body.position_y() - -1.0).abs() < 1e-3);
    assert!(body.acceleration().length() < 1e-2);
}
