//! Damped spring-and-gravity point mass in 2D.
//!
//! The [`Body`] holds position, velocity and force parameters and is stepped
//! with semi-implicit Euler. Host-side helpers for driving it from a wall
//! clock, sharing it between threads, tracking pointer drags and validating
//! user-edited parameters live alongside it.

pub mod config;
pub mod driver;
pub mod engine;
pub mod gesture;
pub mod integrator;
pub mod params;
pub mod runtime;
pub mod shared;

pub use config::{BodyConfig, ConfigError, DriverConfig};
pub use driver::{PhysicsDriver, StepOutcome, DEFAULT_MAX_TIMESTEP};
pub use engine::{Body, BodyError};
pub use glam::Vec2;
pub use gesture::DragGesture;
pub use params::{round_display, Parameter, ParameterError, ParameterPolicy, DEFAULT_MAX_DRAG};
pub use runtime::{
    run_scenario, run_scenario_source, RunOptions, RuntimeError, Sample, SimulationResult,
};
pub use shared::SharedBody;
