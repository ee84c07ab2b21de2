use crate::engine::Body;

/// Step the body forward by dt using semi-implicit Euler integration
pub fn step(body: &mut Body, dt: f32) {
    // Acceleration from the pre-step state
    let acceleration = body.acceleration();

    // Semi-implicit Euler: v += a*dt, then x += v*dt with the new v
    let velocity = body.velocity() + acceleration * dt;
    let position = body.position() + velocity * dt;

    body.advance(velocity, position);
}
