//! WebGPU rendering module
//!
//! Draws the scene as instanced, Lambert-shaded boxes under an
//! orthographic camera.

pub mod pipeline;
pub mod vertex;

pub use pipeline::RenderState;
