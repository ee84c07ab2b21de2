use crate::config::{BodyConfig, ConfigError};
use crate::driver::PhysicsDriver;
use crate::engine::{Body, BodyError};
use glam::Vec2;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Body(#[from] BodyError),
    #[error("sample interval must be at least 1")]
    ZeroSampleInterval,
}

/// How long and how finely to run a scenario
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOptions {
    pub steps: usize,
    pub dt: f32,
    /// Record a sample every this many steps
    pub sample_every: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            steps: 300,
            dt: 1.0 / 60.0,
            sample_every: 1,
        }
    }
}

/// Body state at a point in simulated time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub step: usize,
    pub time: f32,
    pub position: Vec2,
    pub velocity: Vec2,
}

impl Sample {
    fn of(step: usize, time: f32, body: &Body) -> Self {
        Self {
            step,
            time,
            position: body.position(),
            velocity: body.velocity(),
        }
    }
}

/// Final result of running a scenario
#[derive(Debug)]
pub struct SimulationResult {
    pub samples: Vec<Sample>,
    pub body: Body,
    pub recoveries: u64,
}

/// Main entry point: parse a TOML scenario and run it
pub fn run_scenario_source(source: &str, options: RunOptions) -> Result<SimulationResult, RuntimeError> {
    let config = BodyConfig::from_toml_str(source)?;
    run_scenario(&config, options)
}

/// Step a scenario at a fixed dt through the physics driver
///
/// Steps larger than the scenario's `max_timestep` are clamped and diverging
/// steps are reset, exactly as in the interactive viewer.
pub fn run_scenario(config: &BodyConfig, options: RunOptions) -> Result<SimulationResult, RuntimeError> {
    if options.sample_every == 0 {
        return Err(RuntimeError::ZeroSampleInterval);
    }
    config.validate()?;

    let mut body = config.build_body()?;
    let mut driver = PhysicsDriver::new(config.driver.max_timestep);
    let mut samples = vec![Sample::of(0, 0.0, &body)];
    let mut time = 0.0;

    for step in 1..=options.steps {
        let outcome = driver.advance(&mut body, options.dt)?;
        time += outcome.timestep();
        if step % options.sample_every == 0 || step == options.steps {
            samples.push(Sample::of(step, time, &body));
        }
    }

    tracing::debug!(
        steps = options.steps,
        recoveries = driver.recoveries(),
        "scenario finished"
    );

    Ok(SimulationResult {
        samples,
        body,
        recoveries: driver.recoveries(),
    })
}
