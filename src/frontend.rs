//! Collaborator port
//!
//! The simulation never touches meshes, rigid bodies, speakers or widgets.
//! `Game` translates simulation events into calls on a `Frontend`, which a
//! platform layer implements. Every method defaults to a no-op.

use glam::{Vec2, Vec3};

use crate::audio::{AudioManager, SoundEffect};
use crate::sim::{Axis, CameraRig, Footprint, Halo};

/// Everything needed to materialise a block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockVisual {
    pub footprint: Footprint,
    pub color: Vec3,
    /// World `y` of the block centre
    pub elevation: f32,
}

impl BlockVisual {
    /// Centre in world space
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.footprint.center.x,
            self.elevation,
            self.footprint.center.y,
        )
    }

    /// Scale in world space
    pub fn scale(&self) -> Vec3 {
        Vec3::new(
            self.footprint.width(),
            self.footprint.height,
            self.footprint.depth(),
        )
    }
}

/// Rendering, physics, audio and HUD collaborators
pub trait Frontend {
    // === Rendering ===
    /// Destroy every tower block and piece of debris
    fn clear_tower(&mut self) {}
    fn show_block(&mut self, _block: &BlockVisual) {}
    fn show_moving_block(&mut self, _block: &BlockVisual, _axis: Axis) {}
    fn move_moving_block(&mut self, _center: Vec2) {}
    fn remove_moving_block(&mut self) {}
    fn show_halo(&mut self, _halo: &Halo) {}
    fn set_camera(&mut self, _camera: &CameraRig) {}

    // === Physics ===
    /// Severed fragment starts falling
    fn drop_debris(&mut self, _block: &BlockVisual, _mass: f32) {}
    /// Missed block starts falling
    fn topple(&mut self, _block: &BlockVisual, _mass: f32) {}

    // === Audio ===
    fn play_sound(&mut self, _effect: SoundEffect) {}

    // === HUD ===
    fn set_score_text(&mut self, _text: &str) {}
    fn set_high_score_text(&mut self, _text: &str) {}
    fn set_high_score_visible(&mut self, _visible: bool) {}
    fn set_play_button(&mut self, _visible: bool, _label: &str) {}
}

/// Frontend for headless runs: keeps a HUD model, logs the rest, plays sound
/// through `AudioManager`
#[derive(Default)]
pub struct HeadlessFrontend {
    pub audio: AudioManager,
    pub score_text: String,
    pub high_score_text: String,
    pub high_score_visible: bool,
    /// Play button label, `None` while hidden
    pub play_button: Option<String>,
    /// Placed blocks since the last clear
    pub blocks: usize,
    /// Fragments handed to physics since the last clear
    pub debris: usize,
}

impl HeadlessFrontend {
    pub fn new(audio: AudioManager) -> Self {
        Self {
            audio,
            ..Default::default()
        }
    }
}

impl Frontend for HeadlessFrontend {
    fn clear_tower(&mut self) {
        self.blocks = 0;
        self.debris = 0;
    }

    fn show_block(&mut self, block: &BlockVisual) {
        self.blocks += 1;
        log::debug!(
            "Block {:.3} x {:.3} at {:?}",
            block.footprint.width(),
            block.footprint.depth(),
            block.position()
        );
    }

    fn drop_debris(&mut self, block: &BlockVisual, mass: f32) {
        self.debris += 1;
        log::debug!("Debris {:?} (mass {mass})", block.scale());
    }

    fn topple(&mut self, block: &BlockVisual, mass: f32) {
        log::debug!("Toppled block at {:?} (mass {mass})", block.position());
    }

    fn play_sound(&mut self, effect: SoundEffect) {
        self.audio.play(effect);
    }

    fn set_score_text(&mut self, text: &str) {
        self.score_text = text.to_string();
    }

    fn set_high_score_text(&mut self, text: &str) {
        self.high_score_text = text.to_string();
    }

    fn set_high_score_visible(&mut self, visible: bool) {
        self.high_score_visible = visible;
    }

    fn set_play_button(&mut self, visible: bool, label: &str) {
        self.play_button = visible.then(|| label.to_string());
    }
}
