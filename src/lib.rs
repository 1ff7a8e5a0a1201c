//! Stack Tower - A falling-block stacking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (overlap resolution, progression, colours)
//! - `game`: Fixed-timestep driver wiring the simulation to its collaborators
//! - `frontend`: Rendering/physics/audio/HUD collaborator port
//! - `platform`: Browser/native platform abstraction (logging, storage)
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod frontend;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::{HighScoreStore, MemoryHighScore, StoredHighScore};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one logical update per frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the driver will try to catch up on
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Block defaults
    pub const BLOCK_WIDTH: f32 = 1.0;
    pub const BLOCK_HEIGHT: f32 = 0.25;
    /// Peak excursion of the sliding block from the world origin
    pub const BLOCK_BOUNDS: f32 = 1.5;
    /// Elevation of the base block's centre
    pub const BASE_ELEVATION: f32 = BLOCK_WIDTH + BLOCK_HEIGHT / 2.0;

    /// Size difference still counted as a perfect drop
    pub const TOLERANCE: f32 = 0.05;
    /// Consecutive perfect drops needed for a growth bonus
    pub const PERFECT_BONUS: u32 = 8;
    /// Amount a block grows on the bonus
    pub const PERFECT_INCREASE: f32 = 0.1;

    /// Slide speed (phase units per second)
    pub const TILE_START_SPEED: f32 = 1.5;
    pub const TILE_SPEED_INCREASE: f32 = 0.01;

    /// Mass handed to physics for fragments and the toppling block
    pub const DEBRIS_MASS: f32 = 5.0;

    /// Colour fade per spawn and the level that triggers the next hue
    pub const FADE_STEP: f32 = 0.1;
    pub const FADE_THRESHOLD: f32 = 0.5;

    /// Perfect halo
    pub const HALO_SCALE: f32 = 1.1;
    pub const HALO_START_ALPHA: f32 = 0.5;
    pub const HALO_FADE_RATE: f32 = 1.0;
    pub const HALO_MIN_ALPHA: f32 = 0.1;

    /// Camera rig
    pub const CAMERA_START: [f32; 3] = [-1.0, 3.0, -1.0];
    pub const CAMERA_START_ZOOM: f32 = 1.5;
    pub const CAMERA_MAX_ZOOM: f32 = 10.0;
    pub const CAMERA_ZOOM_RATE: f32 = 0.5;
    /// Game-over orbit speed (degrees/s)
    pub const CAMERA_ORBIT_SPEED: f32 = 25.0;
}
