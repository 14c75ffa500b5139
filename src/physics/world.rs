//! The physics world: gravity integration over registered bodies

use glam::{Quat, Vec3};

use super::body::RigidBody;

/// Handle to a body in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyHandle(usize);

/// Owns every rigid body of one session.
///
/// Bodies are never removed; a session ends by dropping the whole world.
#[derive(Debug)]
pub struct World {
    pub gravity: Vec3,
    iterations: u32,
    bodies: Vec<RigidBody>,
}

impl World {
    /// `iterations` subdivides each [`step`](World::step) call into that
    /// many integration substeps.
    pub fn new(gravity: Vec3, iterations: u32) -> Self {
        Self {
            gravity,
            iterations: iterations.max(1),
            bodies: Vec::new(),
        }
    }

    /// Register a body and return its handle
    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        self.bodies.push(body);
        BodyHandle(self.bodies.len() - 1)
    }

    pub fn body(&self, handle: BodyHandle) -> &RigidBody {
        &self.bodies[handle.0]
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> &mut RigidBody {
        &mut self.bodies[handle.0]
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Advance every dynamic body by `dt`, subdivided into the configured
    /// number of substeps. Kinematic bodies are left untouched.
    pub fn step(&mut self, dt: f32) {
        let h = dt / self.iterations as f32;
        for _ in 0..self.iterations {
            for body in &mut self.bodies {
                if body.is_kinematic() {
                    continue;
                }
                body.velocity += self.gravity * h;
                body.position += body.velocity * h;
                if body.angular_velocity != Vec3::ZERO {
                    let spin = Quat::from_scaled_axis(body.angular_velocity * h);
                    body.orientation = (spin * body.orientation).normalize();
                }
            }
        }
    }
}
