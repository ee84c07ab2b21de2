//! Wall-clock physics driver
//!
//! Turns irregular elapsed times into bounded ticks and applies the
//! divergence failsafe: when a step leaves non-finite position or velocity,
//! the body is put back at the origin at rest.

use crate::engine::{Body, BodyError};
use crate::shared::SharedBody;
use std::time::Instant;

/// Largest step the driver will hand to [`Body::tick`], in seconds
pub const DEFAULT_MAX_TIMESTEP: f32 = 1.0 / 30.0;

/// What happened during one driver step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    Stepped { timestep: f32 },
    /// The step diverged and the body was reset
    Recovered { timestep: f32 },
}

impl StepOutcome {
    pub fn timestep(&self) -> f32 {
        match self {
            Self::Stepped { timestep } | Self::Recovered { timestep } => *timestep,
        }
    }

    pub fn recovered(&self) -> bool {
        matches!(self, Self::Recovered { .. })
    }
}

#[derive(Debug, Clone)]
pub struct PhysicsDriver {
    max_timestep: f32,
    last_tick: Option<Instant>,
    recoveries: u64,
}

impl Default for PhysicsDriver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TIMESTEP)
    }
}

impl PhysicsDriver {
    pub fn new(max_timestep: f32) -> Self {
        Self {
            max_timestep: max_timestep.max(0.0),
            last_tick: None,
            recoveries: 0,
        }
    }

    pub fn max_timestep(&self) -> f32 {
        self.max_timestep
    }

    /// Number of divergence resets performed so far
    pub fn recoveries(&self) -> u64 {
        self.recoveries
    }

    /// Clamp an elapsed time into `[0, max_timestep]`
    pub fn clamp_timestep(&self, elapsed: f32) -> f32 {
        if elapsed.is_nan() {
            return self.max_timestep;
        }
        elapsed.clamp(0.0, self.max_timestep)
    }

    /// Tick `body` by the clamped `elapsed` seconds, resetting it on divergence
    pub fn advance(&mut self, body: &mut Body, elapsed: f32) -> Result<StepOutcome, BodyError> {
        let timestep = self.clamp_timestep(elapsed);
        body.tick(timestep)?;

        if body.has_finite_pos_vel() {
            return Ok(StepOutcome::Stepped { timestep });
        }

        self.recoveries += 1;
        tracing::warn!(
            timestep,
            mass = body.mass(),
            spring_rate = body.spring_rate(),
            drag = body.drag(),
            "body diverged, resetting to origin"
        );
        body.reset_motion();
        Ok(StepOutcome::Recovered { timestep })
    }

    /// Tick by the time since the previous call
    ///
    /// The first call after construction or [`PhysicsDriver::pause`] steps
    /// by the full `max_timestep`.
    pub fn advance_at(&mut self, body: &mut Body, now: Instant) -> Result<StepOutcome, BodyError> {
        let elapsed = self.elapsed_since_last(now);
        self.advance(body, elapsed)
    }

    /// Same as [`PhysicsDriver::advance_at`] but under the shared body's lock
    pub fn advance_shared(&mut self, body: &SharedBody, now: Instant) -> Result<StepOutcome, BodyError> {
        let elapsed = self.elapsed_since_last(now);
        body.with(|body| self.advance(body, elapsed))
    }

    /// Forget the previous tick time so a resume does not replay the pause
    pub fn pause(&mut self) {
        self.last_tick = None;
    }

    fn elapsed_since_last(&mut self, now: Instant) -> f32 {
        let elapsed = match self.last_tick {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => f32::INFINITY,
        };
        self.last_tick = Some(now);
        elapsed
    }
}
