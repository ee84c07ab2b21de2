//! Pointer drag tracking
//!
//! While the user drags the body, the host writes the pointer position
//! straight into it and, once per display frame, a velocity estimated from
//! how far the pointer moved since the previous frame. Releasing the pointer
//! throws the body with the last estimate.

use glam::Vec2;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct DragGesture {
    current: Vec2,
    previous: Vec2,
    last_frame: Instant,
}

impl DragGesture {
    pub fn begin(position: Vec2, now: Instant) -> Self {
        Self {
            current: position,
            previous: position,
            last_frame: now,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.current
    }

    pub fn move_to(&mut self, position: Vec2) {
        self.current = position;
    }

    /// Velocity over the frame ending at `now`; starts a new frame
    pub fn frame(&mut self, now: Instant) -> Vec2 {
        let velocity = self.velocity_at(now);
        self.previous = self.current;
        self.last_frame = now;
        velocity
    }

    /// Throw velocity when the pointer is released at `now`
    pub fn release(self, now: Instant) -> Vec2 {
        self.velocity_at(now)
    }

    fn velocity_at(&self, now: Instant) -> Vec2 {
        let dt = now.saturating_duration_since(self.last_frame).as_secs_f32();
        if dt <= 0.0 {
            return Vec2::ZERO;
        }
        let velocity = (self.current - self.previous) / dt;
        if velocity.is_finite() {
            velocity
        } else {
            Vec2::ZERO
        }
    }
}
