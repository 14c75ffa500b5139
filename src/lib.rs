//! Stack Drop - a 3D block-stacking timing game
//!
//! Core modules:
//! - `sim`: Deterministic game logic (turn resolution, per-frame motion/sync)
//! - `scene`: Retained box visuals consumed by the renderer
//! - `physics`: Rigid bodies for the falling off-cuts
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Persisted display preferences

pub mod physics;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, shared with the physics step)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Footprint of the foundation layer (world units)
    pub const ORIGINAL_BOX_SIZE: f32 = 2.0;
    /// Uniform height of every layer
    pub const BOX_HEIGHT: f32 = 0.5;
    /// Score awarded for a perfectly aligned drop
    pub const POINT_VALUE: f64 = 5.0;

    /// Sliding speed of the active layer (units/second)
    pub const SLIDE_SPEED: f32 = 9.0;
    /// Off-stage coordinate where each new layer enters
    pub const SPAWN_OFFSET: f32 = -10.0;

    /// Downward gravity applied to off-cuts
    pub const GRAVITY_Y: f32 = -10.0;
    /// Integration substeps per physics step
    pub const SOLVER_ITERATIONS: u32 = 40;
    /// Mass given to spawned off-cuts (placed layers are kinematic)
    pub const OFFCUT_MASS: f32 = 5.0;

    /// Camera height above the second-to-top layer
    pub const CAMERA_BASE_Y: f32 = 4.0;
    /// Width of the orthographic view volume (world units)
    pub const VIEW_WIDTH: f32 = 10.0;

    /// Delay before the page reloads after a miss (milliseconds)
    pub const GAME_OVER_RELOAD_MS: i32 = 2000;
}
