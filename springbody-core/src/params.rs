//! Host-side validation of user-edited parameters
//!
//! Text typed into a parameter field is parsed and checked against a
//! [`ParameterPolicy`] before it reaches the [`Body`]. Text that fails stays
//! with the host (flagged in the UI) and the body keeps its previous value.

use crate::engine::{Body, BodyError};
use std::fmt;
use thiserror::Error;

/// Upper bound on drag offered to users
pub const DEFAULT_MAX_DRAG: f32 = 80.0;

/// Fraction digits shown for parameter and state values
pub const DISPLAY_FRACTION_DIGITS: i32 = 4;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("{param}: '{text}' is not a number")]
    Unparsable { param: Parameter, text: String },
    #[error("{param}: {value} is out of range")]
    OutOfRange { param: Parameter, value: f32 },
    #[error(transparent)]
    Body(#[from] BodyError),
}

/// A scalar the user can edit directly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Mass,
    SpringRate,
    Drag,
    GravityX,
    GravityY,
}

impl Parameter {
    pub const ALL: [Parameter; 5] = [
        Parameter::Mass,
        Parameter::SpringRate,
        Parameter::Drag,
        Parameter::GravityX,
        Parameter::GravityY,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Parameter::Mass => "mass",
            Parameter::SpringRate => "spring rate",
            Parameter::Drag => "drag",
            Parameter::GravityX => "gravity x",
            Parameter::GravityY => "gravity y",
        }
    }

    pub fn read(&self, body: &Body) -> f32 {
        match self {
            Parameter::Mass => body.mass(),
            Parameter::SpringRate => body.spring_rate(),
            Parameter::Drag => body.drag(),
            Parameter::GravityX => body.gravity_acceleration_x(),
            Parameter::GravityY => body.gravity_acceleration_y(),
        }
    }

    pub fn apply(&self, body: &mut Body, value: f32) -> Result<(), BodyError> {
        tracing::debug!(param = self.label(), value, "applying parameter");
        match self {
            Parameter::Mass => body.set_mass(value),
            Parameter::SpringRate => body.set_spring_rate(value),
            Parameter::Drag => body.set_drag(value),
            Parameter::GravityX => body.set_gravity_acceleration_x(value),
            Parameter::GravityY => body.set_gravity_acceleration_y(value),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Caller-side limits applied on top of the Body's own invariants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterPolicy {
    pub max_drag: f32,
}

impl Default for ParameterPolicy {
    fn default() -> Self {
        Self {
            max_drag: DEFAULT_MAX_DRAG,
        }
    }
}

impl ParameterPolicy {
    pub fn validate(&self, param: Parameter, value: f32) -> Result<f32, ParameterError> {
        let valid = match param {
            Parameter::Mass => value > 0.0 && value.is_finite(),
            Parameter::SpringRate => value >= 0.0 && value.is_finite(),
            Parameter::Drag => (0.0..=self.max_drag).contains(&value),
            Parameter::GravityX | Parameter::GravityY => value.is_finite(),
        };
        if valid {
            Ok(value)
        } else {
            Err(ParameterError::OutOfRange { param, value })
        }
    }

    /// Parse user-entered text and check it against this policy
    pub fn parse(&self, param: Parameter, text: &str) -> Result<f32, ParameterError> {
        let value: f32 = text
            .trim()
            .parse()
            .map_err(|_| ParameterError::Unparsable {
                param,
                text: text.to_string(),
            })?;
        self.validate(param, value)
    }

    /// Parse, validate and apply in one go; the body is untouched on error
    pub fn apply_text(&self, body: &mut Body, param: Parameter, text: &str) -> Result<f32, ParameterError> {
        let value = self.parse(param, text)?;
        param.apply(body, value)?;
        Ok(value)
    }
}

/// Round a value to [`DISPLAY_FRACTION_DIGITS`] for display
pub fn round_display(value: f32) -> f32 {
    let scale = 10f64.powi(DISPLAY_FRACTION_DIGITS);
    ((value as f64 * scale).round() / scale) as f32
}
