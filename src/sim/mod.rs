//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable registries (layers and off-cuts are appended, never removed)
//! - No rendering or platform dependencies

pub mod axis;
pub mod state;
pub mod tick;
pub mod turn;

pub use axis::Axis;
pub use state::{Block, GameEvent, GamePhase, GameState, OffCut};
pub use tick::{TickInput, tick};
pub use turn::{CutPlan, TurnOutcome, cut_geometry, kept_percent, resolve_turn};
