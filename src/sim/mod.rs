//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only (autoplayer)
//! - No rendering, audio or platform dependencies; collaborators learn
//!   what happened from `GameEvent`s

pub mod autoplay;
pub mod color;
pub mod drop;
pub mod footprint;
pub mod mover;
pub mod progression;
pub mod state;
pub mod tick;

pub use autoplay::{AutoplayConfig, Autoplayer};
pub use color::{ColorCycler, PALETTE, TOTAL_COLOURS};
pub use drop::{DropOutcome, apply_growth, overlap, resolve};
pub use footprint::{Axis, Footprint};
pub use mover::{MovingBlock, slide_offset};
pub use progression::{DropReport, Progression};
pub use state::{CameraRig, GameEvent, GamePhase, GameState, Halo, PlacedBlock};
pub use tick::{TickInput, TickResult, start_game, tick};
