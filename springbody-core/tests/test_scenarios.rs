//! Scenario files run headless through the driver

use glam::Vec2;
use springbody_core::tests::test_helpers::{
    approx_eq_vec2, load_scenario, results_approx_equal, run_scenario_file,
};
use springbody_core::{
    run_scenario, run_scenario_source, BodyConfig, BodyError, ConfigError, RunOptions,
    RuntimeError,
};

fn options(steps: usize, dt: f32) -> RunOptions {
    RunOptions {
        steps,
        dt,
        sample_every: 1,
    }
}

#[test]
fn test_demo_scenario_loads() {
    let config = load_scenario("demo.toml").expect("Failed to load scenario");
    assert_eq!(config.position, [15.0, 0.0]);
    assert_eq!(config.velocity, [0.0, 120.0]);
    assert_eq!(config.gravity_acceleration, [0.0, -9.81]);
    assert_eq!(config.driver, Default::default());

    let body = config.build_body().unwrap();
    assert_eq!(body.spring_rate(), 30.0);
    assert_eq!(body.drag(), 4.0);
}

#[test]
fn test_free_flight_is_linear() {
    let result = run_scenario_file("free_flight.toml", options(120, 1.0 / 60.0))
        .expect("Failed to run scenario");

    assert_eq!(result.samples.len(), 121);
    let last = result.samples.last().unwrap();
    assert!((last.time - 2.0).abs() < 1e-4);
    assert!(approx_eq_vec2(last.position, Vec2::new(7.0, -6.0), 1e-3));
    assert_eq!(last.velocity, Vec2::new(3.0, -4.0));
}

#[test]
fn test_hanging_weight_settles_below_anchor() {
    let result = run_scenario_file("hanging_weight.toml", options(600, 1.0 / 60.0))
        .expect("Failed to run scenario");

    // 5 + m * g / k = 5 - 2 * 10 / 20
    assert!(approx_eq_vec2(result.body.position(), Vec2::new(0.0, 4.0), 1e-3));
    assert_eq!(result.recoveries, 0);
}

#[test]
fn test_stiff_scenario_recovers_once() {
    let result = run_scenario_file("stiff.toml", options(10, 1.0 / 60.0))
        .expect("Failed to run scenario");

    assert_eq!(result.recoveries, 1);
    assert_eq!(result.body.position(), Vec2::ZERO);
    assert!(result
        .samples
        .iter()
        .all(|s| s.position.is_finite() && s.velocity.is_finite()));
}

#[test]
fn test_large_dt_is_clamped_to_max_timestep() {
    let config = BodyConfig::default();
    let result = run_scenario(&config, options(30, 1.0)).unwrap();
    let last = result.samples.last().unwrap();
    assert!((last.time - 1.0).abs() < 1e-4, "30 clamped steps of 1/30 s");
}

#[test]
fn test_sample_interval() {
    let config = BodyConfig::default();
    let result = run_scenario(
        &config,
        RunOptions {
            steps: 25,
            dt: 0.01,
            sample_every: 10,
        },
    )
    .unwrap();

    let steps: Vec<_> = result.samples.iter().map(|s| s.step).collect();
    assert_eq!(steps, vec![0, 10, 20, 25]);
}

#[test]
fn test_zero_sample_interval_is_rejected() {
    let err = run_scenario(
        &BodyConfig::default(),
        RunOptions {
            sample_every: 0,
            ..RunOptions::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, RuntimeError::ZeroSampleInterval));
}

#[test]
fn test_invalid_scenario_is_rejected() {
    let err = run_scenario_file("bad_drag.toml", RunOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Config(ConfigError::Body(BodyError::InvalidDrag(_)))
    ));

    let err = run_scenario_source("[driver]\nmax_timestep = 0.0", RunOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Config(ConfigError::InvalidMaxTimestep(_))
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = run_scenario_file("does_not_exist.toml", RunOptions::default()).unwrap_err();
    assert!(matches!(err, RuntimeError::Config(ConfigError::Io(_))));
}

#[test]
fn test_scenario_runs_are_deterministic() {
    let source = r#"
mass = 1.5
spring_rate = 45.0
drag = 2.0
position = [-12.0, 8.0]
velocity = [60.0, -30.0]
gravity_acceleration = [0.5, -9.81]
"#;

    let results: Vec<_> = (0..5)
        .map(|_| run_scenario_source(source, options(2_000, 1.0 / 240.0)).expect("Run failed"))
        .collect();

    for i in 1..results.len() {
        assert!(
            results_approx_equal(&results[0], &results[i], 0.0),
            "Run {} should match run 0",
            i
        );
    }
}
