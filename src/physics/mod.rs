//! Rigid-body physics for the falling off-cuts
//!
//! Deliberately small: bodies are boxes, kinematic bodies (mass 0) are
//! moved by the simulation, dynamic bodies integrate gravity. Contact
//! resolution is out of scope; off-cuts simply fall out of frame.

pub mod body;
pub mod world;

pub use body::{BoxShape, RigidBody};
pub use world::{BodyHandle, World};
