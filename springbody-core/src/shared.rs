//! A Body shared between independent drivers
//!
//! A host usually runs a physics loop that ticks the body, a render loop
//! that reads it, and a pointer gesture that writes position and velocity
//! directly. [`SharedBody`] serializes those through one lock so every
//! operation is observed whole.

use crate::engine::{Body, BodyError};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Default)]
pub struct SharedBody {
    inner: Arc<Mutex<Body>>,
}

impl SharedBody {
    pub fn new(body: Body) -> Self {
        Self {
            inner: Arc::new(Mutex::new(body)),
        }
    }

    /// Run `f` with exclusive access to the body
    pub fn with<R>(&self, f: impl FnOnce(&mut Body) -> R) -> R {
        f(&mut self.lock())
    }

    /// Copy of the whole body taken under a single lock
    pub fn snapshot(&self) -> Body {
        *self.lock()
    }

    pub fn tick(&self, timestep: f32) -> Result<(), BodyError> {
        self.lock().tick(timestep)
    }

    pub fn set_position(&self, x: f32, y: f32) {
        self.lock().set_position(x, y);
    }

    pub fn set_velocity(&self, x: f32, y: f32) {
        self.lock().set_velocity(x, y);
    }

    pub fn replace(&self, body: Body) {
        *self.lock() = body;
    }

    fn lock(&self) -> MutexGuard<'_, Body> {
        // Each Body write stores a whole pair, so poisoned data is still usable
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
