//! Scenario configuration loaded from TOML.
//!
//! A scenario gives the body's initial state and parameters plus the host
//! driver settings. Every key is optional; missing keys fall back to the
//! demo defaults (unit mass on a `k = 30` spring with drag 4 under earth
//! gravity, starting at rest at the origin).
//!
//! ```toml
//! mass = 1.0
//! spring_rate = 30.0
//! drag = 4.0
//! position = [15.0, 0.0]
//! velocity = [0.0, 0.0]
//! spring_equilibrium_position = [0.0, 0.0]
//! gravity_acceleration = [0.0, -9.81]
//!
//! [driver]
//! max_timestep = 0.0333
//! max_drag = 80.0
//! ```

use crate::driver::DEFAULT_MAX_TIMESTEP;
use crate::engine::{Body, BodyError};
use crate::params::{ParameterPolicy, DEFAULT_MAX_DRAG};
use glam::Vec2;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid scenario: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid body parameters: {0}")]
    Body(#[from] BodyError),
    #[error("max_timestep must be positive and finite, got {0}")]
    InvalidMaxTimestep(f32),
    #[error("max_drag must be non-negative and finite, got {0}")]
    InvalidMaxDrag(f32),
    #[error("drag {drag} exceeds max_drag {max_drag}")]
    DragAboveLimit { drag: f32, max_drag: f32 },
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BodyConfig {
    pub mass: f32,
    pub spring_rate: f32,
    pub drag: f32,
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    pub spring_equilibrium_position: [f32; 2],
    pub gravity_acceleration: [f32; 2],
    pub driver: DriverConfig,
}

/// Settings for the host loop rather than the body itself
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    pub max_timestep: f32,
    pub max_drag: f32,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            spring_rate: 30.0,
            drag: 4.0,
            position: [0.0, 0.0],
            velocity: [0.0, 0.0],
            spring_equilibrium_position: [0.0, 0.0],
            gravity_acceleration: [0.0, -9.81],
            driver: DriverConfig::default(),
        }
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            max_timestep: DEFAULT_MAX_TIMESTEP,
            max_drag: DEFAULT_MAX_DRAG,
        }
    }
}

impl BodyConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::info!(path = %path.display(), "loaded scenario");
        Ok(config)
    }

    /// Check that the scenario builds a valid body and driver
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build_body()?;
        let max_timestep = self.driver.max_timestep;
        if !(max_timestep.is_finite() && max_timestep > 0.0) {
            return Err(ConfigError::InvalidMaxTimestep(max_timestep));
        }
        let max_drag = self.driver.max_drag;
        if !(max_drag.is_finite() && max_drag >= 0.0) {
            return Err(ConfigError::InvalidMaxDrag(max_drag));
        }
        if self.drag > max_drag {
            return Err(ConfigError::DragAboveLimit {
                drag: self.drag,
                max_drag,
            });
        }
        Ok(())
    }

    pub fn build_body(&self) -> Result<Body, BodyError> {
        Body::from_config(self)
    }

    pub fn policy(&self) -> ParameterPolicy {
        ParameterPolicy {
            max_drag: self.driver.max_drag,
        }
    }
}

impl Body {
    pub fn from_config(config: &BodyConfig) -> Result<Self, BodyError> {
        Body::new()
            .with_position(Vec2::from_array(config.position))
            .with_velocity(Vec2::from_array(config.velocity))
            .with_mass(config.mass)?
            .with_spring(
                config.spring_rate,
                Vec2::from_array(config.spring_equilibrium_position),
            )?
            .with_gravity(Vec2::from_array(config.gravity_acceleration))?
            .with_drag(config.drag)
    }
}
