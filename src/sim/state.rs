//! Game state and core simulation types
//!
//! Everything the tick handler mutates lives in `GameState`; presentation-only
//! state (halo, camera) rides along but never feeds back into gameplay.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::color::ColorCycler;
use super::footprint::{Axis, Footprint};
use super::mover::MovingBlock;
use super::progression::Progression;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing ticking
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, camera drifting
    GameOver,
}

/// A block frozen into the tower
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedBlock {
    pub footprint: Footprint,
    pub color: Vec3,
}

/// Fading highlight under a perfectly placed block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Halo {
    pub center: Vec2,
    pub size: Vec2,
    pub elevation: f32,
    pub alpha: f32,
}

impl Halo {
    /// Halo on the top face of `top`
    pub fn over(top: &Footprint, tuning: &Tuning) -> Self {
        Self {
            center: top.center,
            size: top.size * HALO_SCALE,
            elevation: tuning.elevation(top.level) + tuning.block_height / 2.0,
            alpha: HALO_START_ALPHA,
        }
    }

    /// Fade; returns false once the halo should be removed
    pub fn fade(&mut self, dt: f32) -> bool {
        self.alpha -= HALO_FADE_RATE * dt;
        self.alpha >= HALO_MIN_ALPHA
    }
}

/// Camera placement handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    /// Position before orbiting
    pub base: Vec3,
    /// Orthographic size
    pub zoom: f32,
    /// Rotation about the world Y axis (radians)
    pub orbit: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            base: Vec3::from_array(CAMERA_START),
            zoom: CAMERA_START_ZOOM,
            orbit: 0.0,
        }
    }
}

impl CameraRig {
    /// World position, orbit applied
    pub fn position(&self) -> Vec3 {
        Quat::from_rotation_y(self.orbit) * self.base
    }

    /// Follow the tower up by `height`
    pub fn raise(&mut self, height: f32) {
        self.base.y += height;
    }

    /// Game-over drift: zoom out towards the cap and optionally orbit
    pub fn drift(&mut self, dt: f32, orbit: bool) {
        if self.zoom < CAMERA_MAX_ZOOM {
            self.zoom += CAMERA_ZOOM_RATE * dt;
        }
        if orbit {
            self.orbit += CAMERA_ORBIT_SPEED.to_radians() * dt;
        }
    }
}

/// Notifications for the rendering/physics/audio/HUD collaborators
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// All tower blocks and debris from the previous run should go
    TowerCleared,
    BlockPlaced {
        footprint: Footprint,
        color: Vec3,
        elevation: f32,
    },
    MovingBlockSpawned {
        footprint: Footprint,
        axis: Axis,
        color: Vec3,
        elevation: f32,
    },
    /// The moving block was consumed by a drop
    MovingBlockRemoved,
    /// Severed overhang, handed to physics
    DebrisSpawned {
        footprint: Footprint,
        color: Vec3,
        elevation: f32,
        mass: f32,
    },
    /// Missed block falling off the tower
    Toppled {
        footprint: Footprint,
        color: Vec3,
        elevation: f32,
        mass: f32,
    },
    PerfectHalo(Halo),
    /// Index into the note bank
    PlayNote(usize),
    CameraMoved(CameraRig),
    ScoreChanged(u32),
    PhaseChanged(GamePhase),
    GameOver { score: u32 },
}

/// Complete game state (single owner: the tick handler)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Placed blocks, base first
    pub tower: Vec<PlacedBlock>,
    pub moving: Option<MovingBlock>,
    /// Axis for the next spawned moving block
    pub next_axis: Axis,
    pub progression: Progression,
    pub colors: ColorCycler,
    /// Simulation tick counter (Playing only)
    pub time_ticks: u64,
    /// Whether the game-over camera orbits
    pub camera_orbit: bool,
    #[serde(skip)]
    pub halo: Option<Halo>,
    #[serde(skip)]
    pub camera: CameraRig,
    /// Pending collaborator notifications
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl GameState {
    /// A fresh state sitting in the menu
    pub fn new(tuning: Tuning) -> Self {
        Self {
            phase: GamePhase::Menu,
            tower: Vec::new(),
            moving: None,
            next_axis: Axis::X,
            progression: Progression::new(&tuning),
            colors: ColorCycler::new(&tuning),
            time_ticks: 0,
            camera_orbit: true,
            halo: None,
            camera: CameraRig::default(),
            events: Vec::new(),
            tuning,
        }
    }

    /// Current top of the tower
    pub fn top(&self) -> Option<&PlacedBlock> {
        self.tower.last()
    }

    /// Current stacking level (0 = only the base block)
    pub fn level(&self) -> u32 {
        self.top().map(|b| b.footprint.level).unwrap_or(0)
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::debug!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
            self.emit(GameEvent::PhaseChanged(phase));
        }
    }

    /// Freeze a block onto the tower
    pub(crate) fn place_block(&mut self, footprint: Footprint, color: Vec3) {
        let elevation = self.tuning.elevation(footprint.level);
        self.tower.push(PlacedBlock { footprint, color });
        self.emit(GameEvent::BlockPlaced {
            footprint,
            color,
            elevation,
        });
    }

    /// Spawn the next moving block above the current top
    pub(crate) fn spawn_moving_block(&mut self) {
        let Some(top) = self.top().map(|b| b.footprint) else {
            return;
        };
        let color = self.colors.on_new_block_spawn();
        let axis = self.next_axis;
        self.next_axis = axis.flipped();

        let moving = MovingBlock::spawn(&top, axis, color);
        self.emit(GameEvent::MovingBlockSpawned {
            footprint: moving.footprint,
            axis,
            color,
            elevation: self.tuning.elevation(moving.footprint.level),
        });
        self.moving = Some(moving);
    }
}
