use crate::integrator::step;
use glam::Vec2;
use thiserror::Error;

/// Error raised when a parameter or timestep would break a Body invariant
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BodyError {
    #[error("mass must be positive and finite, got {0}")]
    InvalidMass(f32),
    #[error("spring rate must be non-negative and finite, got {0}")]
    InvalidSpringRate(f32),
    #[error("drag must be non-negative and finite, got {0}")]
    InvalidDrag(f32),
    #[error("{name} must be finite, got {value}")]
    NonFiniteParameter { name: &'static str, value: f32 },
    #[error("timestep must be a non-negative number, got {0}")]
    InvalidTimestep(f32),
}

/// A point mass on a damped spring under constant gravity
///
/// Position and velocity are state and may hold any value, including
/// non-finite ones after a diverging step. The force parameters are guarded:
/// their setters reject values that would make the acceleration undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    position: Vec2,
    velocity: Vec2,
    mass: f32,
    spring_rate: f32,
    spring_equilibrium_position: Vec2,
    gravity_acceleration: Vec2,
    drag: f32,
}

impl Default for Body {
    fn default() -> Self {
        Self::new()
    }
}

impl Body {
    /// Unit mass at rest at the origin, with every force disabled
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            mass: 1.0,
            spring_rate: 0.0,
            spring_equilibrium_position: Vec2::ZERO,
            gravity_acceleration: Vec2::ZERO,
            drag: 0.0,
        }
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.set_position(position.x, position.y);
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.set_velocity(velocity.x, velocity.y);
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Result<Self, BodyError> {
        self.set_mass(mass)?;
        Ok(self)
    }

    pub fn with_spring(mut self, rate: f32, equilibrium: Vec2) -> Result<Self, BodyError> {
        self.set_spring_rate(rate)?;
        self.set_spring_equilibrium_position(equilibrium.x, equilibrium.y)?;
        Ok(self)
    }

    pub fn with_gravity(mut self, gravity: Vec2) -> Result<Self, BodyError> {
        self.set_gravity_acceleration(gravity.x, gravity.y)?;
        Ok(self)
    }

    pub fn with_drag(mut self, drag: f32) -> Result<Self, BodyError> {
        self.set_drag(drag)?;
        Ok(self)
    }

    /// Advance position and velocity by one step of `timestep` seconds
    ///
    /// The step itself is never clamped and non-finite results are kept;
    /// callers poll [`Body::has_finite_pos_vel`] afterwards.
    pub fn tick(&mut self, timestep: f32) -> Result<(), BodyError> {
        if timestep.is_nan() || timestep < 0.0 {
            return Err(BodyError::InvalidTimestep(timestep));
        }
        if timestep == 0.0 {
            return Ok(());
        }
        step(self, timestep);
        Ok(())
    }

    /// Acceleration from spring, gravity and drag at the current state
    pub fn acceleration(&self) -> Vec2 {
        // F = -k * x
        let spring_force = (self.position - self.spring_equilibrium_position) * -self.spring_rate;
        let drag_force = self.velocity * -self.drag;

        spring_force / self.mass + self.gravity_acceleration + drag_force / self.mass
    }

    pub fn has_finite_pos_vel(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    /// Put the body back at the origin, at rest
    pub fn reset_motion(&mut self) {
        self.position = Vec2::ZERO;
        self.velocity = Vec2::ZERO;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn position_x(&self) -> f32 {
        self.position.x
    }

    pub fn position_y(&self) -> f32 {
        self.position.y
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, y);
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn velocity_x(&self) -> f32 {
        self.velocity.x
    }

    pub fn velocity_y(&self) -> f32 {
        self.velocity.y
    }

    pub fn set_velocity(&mut self, x: f32, y: f32) {
        self.velocity = Vec2::new(x, y);
    }

    pub(crate) fn advance(&mut self, velocity: Vec2, position: Vec2) {
        self.velocity = velocity;
        self.position = position;
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn set_mass(&mut self, mass: f32) -> Result<(), BodyError> {
        if !(mass.is_finite() && mass > 0.0) {
            tracing::debug!(mass, "rejected mass");
            return Err(BodyError::InvalidMass(mass));
        }
        self.mass = mass;
        Ok(())
    }

    pub fn spring_rate(&self) -> f32 {
        self.spring_rate
    }

    pub fn set_spring_rate(&mut self, rate: f32) -> Result<(), BodyError> {
        if !(rate.is_finite() && rate >= 0.0) {
            tracing::debug!(rate, "rejected spring rate");
            return Err(BodyError::InvalidSpringRate(rate));
        }
        self.spring_rate = rate;
        Ok(())
    }

    pub fn spring_equilibrium_position(&self) -> Vec2 {
        self.spring_equilibrium_position
    }

    pub fn set_spring_equilibrium_position(&mut self, x: f32, y: f32) -> Result<(), BodyError> {
        let x = finite("spring equilibrium x", x)?;
        let y = finite("spring equilibrium y", y)?;
        self.spring_equilibrium_position = Vec2::new(x, y);
        Ok(())
    }

    pub fn gravity_acceleration(&self) -> Vec2 {
        self.gravity_acceleration
    }

    pub fn gravity_acceleration_x(&self) -> f32 {
        self.gravity_acceleration.x
    }

    pub fn gravity_acceleration_y(&self) -> f32 {
        self.gravity_acceleration.y
    }

    pub fn set_gravity_acceleration(&mut self, x: f32, y: f32) -> Result<(), BodyError> {
        let x = finite("gravity x", x)?;
        let y = finite("gravity y", y)?;
        self.gravity_acceleration = Vec2::new(x, y);
        Ok(())
    }

    pub fn set_gravity_acceleration_x(&mut self, x: f32) -> Result<(), BodyError> {
        self.gravity_acceleration.x = finite("gravity x", x)?;
        Ok(())
    }

    pub fn set_gravity_acceleration_y(&mut self, y: f32) -> Result<(), BodyError> {
        self.gravity_acceleration.y = finite("gravity y", y)?;
        Ok(())
    }

    pub fn drag(&self) -> f32 {
        self.drag
    }

    /// No upper bound is enforced here; hosts apply their own limit
    pub fn set_drag(&mut self, drag: f32) -> Result<(), BodyError> {
        if !(drag.is_finite() && drag >= 0.0) {
            tracing::debug!(drag, "rejected drag");
            return Err(BodyError::InvalidDrag(drag));
        }
        self.drag = drag;
        Ok(())
    }
}

fn finite(name: &'static str, value: f32) -> Result<f32, BodyError> {
    if value.is_finite() {
        Ok(value)
    } else {
        tracing::debug!(name, value, "rejected non-finite parameter");
        Err(BodyError::NonFiniteParameter { name, value })
    }
}
