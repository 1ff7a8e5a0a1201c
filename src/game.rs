//! Game driver
//!
//! Owns the simulation, runs it at a fixed timestep, buffers one-shot input
//! and forwards events to the frontend and the high-score store.

use crate::audio::SoundEffect;
use crate::consts::*;
use crate::frontend::{BlockVisual, Frontend};
use crate::highscores::{HighScoreStore, high_score_label};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, TickResult, tick};
use crate::tuning::Tuning;

/// Play button labels
pub const PLAY_LABEL: &str = "Play";
pub const REPLAY_LABEL: &str = "Again?";

/// Game instance holding all state
pub struct Game<S: HighScoreStore, F: Frontend> {
    pub state: GameState,
    pub store: S,
    pub frontend: F,
    settings: Settings,
    accumulator: f32,
    /// One-shot input waiting for the next fixed step
    input: TickInput,
}

impl<S: HighScoreStore, F: Frontend> Game<S, F> {
    /// Create a game sitting in the menu and draw the initial HUD
    pub fn new(tuning: Tuning, settings: Settings, store: S, frontend: F) -> Self {
        let mut state = GameState::new(tuning);
        state.camera_orbit = settings.effective_camera_orbit();

        let mut game = Self {
            state,
            store,
            frontend,
            settings,
            accumulator: 0.0,
            input: TickInput::default(),
        };
        let label = high_score_label(game.store.get());
        game.frontend.set_high_score_text(&label);
        game.frontend.set_high_score_visible(true);
        game.frontend.set_play_button(true, PLAY_LABEL);
        game
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Start (or restart) a run immediately
    ///
    /// Returns false if a run is already in progress.
    pub fn start_game(&mut self) -> bool {
        if self.state.phase == GamePhase::Playing {
            log::debug!("Start ignored while playing");
            return false;
        }
        self.tick(0.0, TickInput::START);
        true
    }

    /// Run exactly one simulation tick with the given input
    pub fn tick(&mut self, dt: f32, input: TickInput) -> TickResult {
        let result = tick(&mut self.state, &input, dt);
        if let Some(center) = result.moving_position {
            self.frontend.move_moving_block(center);
        }
        self.flush_events();
        result
    }

    /// Queue a drop for the next fixed step
    pub fn press_action(&mut self) {
        self.input.action = true;
    }

    /// Queue a start for the next fixed step
    pub fn press_start(&mut self) {
        self.input.start = true;
    }

    /// Advance by a frame's worth of time in fixed steps
    ///
    /// Returns the result of every step taken.
    pub fn update(&mut self, frame_dt: f32) -> Vec<TickResult> {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut results = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input;
            // Clear one-shot inputs once consumed
            self.input = TickInput::default();
            results.push(self.tick(SIM_DT, input));
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        results
    }

    /// Hand pending simulation events to the collaborators
    fn flush_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::TowerCleared => self.frontend.clear_tower(),
                GameEvent::BlockPlaced {
                    footprint,
                    color,
                    elevation,
                } => self.frontend.show_block(&BlockVisual {
                    footprint,
                    color,
                    elevation,
                }),
                GameEvent::MovingBlockSpawned {
                    footprint,
                    axis,
                    color,
                    elevation,
                } => self.frontend.show_moving_block(
                    &BlockVisual {
                        footprint,
                        color,
                        elevation,
                    },
                    axis,
                ),
                GameEvent::MovingBlockRemoved => self.frontend.remove_moving_block(),
                GameEvent::DebrisSpawned {
                    footprint,
                    color,
                    elevation,
                    mass,
                } => {
                    self.frontend.drop_debris(
                        &BlockVisual {
                            footprint,
                            color,
                            elevation,
                        },
                        mass,
                    );
                    self.frontend.play_sound(SoundEffect::Slice);
                }
                GameEvent::Toppled {
                    footprint,
                    color,
                    elevation,
                    mass,
                } => {
                    self.frontend.topple(
                        &BlockVisual {
                            footprint,
                            color,
                            elevation,
                        },
                        mass,
                    );
                    self.frontend.play_sound(SoundEffect::Topple);
                }
                GameEvent::PerfectHalo(halo) => {
                    if self.settings.effective_halo() {
                        self.frontend.show_halo(&halo);
                    }
                }
                GameEvent::PlayNote(index) => {
                    self.frontend.play_sound(SoundEffect::PerfectNote(index))
                }
                GameEvent::CameraMoved(camera) => self.frontend.set_camera(&camera),
                GameEvent::ScoreChanged(score) => {
                    self.frontend.set_score_text(&score.to_string())
                }
                GameEvent::PhaseChanged(phase) => self.show_phase(phase),
                GameEvent::GameOver { score } => self.record_score(score),
            }
        }
    }

    fn show_phase(&mut self, phase: GamePhase) {
        match phase {
            GamePhase::Menu => {
                self.frontend.set_play_button(true, PLAY_LABEL);
                self.frontend.set_high_score_visible(true);
            }
            GamePhase::Playing => {
                self.frontend.set_play_button(false, PLAY_LABEL);
                self.frontend.set_high_score_visible(false);
            }
            GamePhase::GameOver => {
                self.frontend.set_play_button(true, REPLAY_LABEL);
                self.frontend.set_high_score_visible(true);
            }
        }
    }

    fn record_score(&mut self, score: u32) {
        log::info!("Game over with score {score}");
        if self.store.submit(score) {
            log::info!("New high score: {score}");
            self.frontend.set_high_score_text(&high_score_label(score));
            self.frontend.play_sound(SoundEffect::HighScore);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::HeadlessFrontend;
    use crate::highscores::MemoryHighScore;

    fn game(best: u32) -> Game<MemoryHighScore, HeadlessFrontend> {
        Game::new(
            Tuning::default(),
            Settings::default(),
            MemoryHighScore { best },
            HeadlessFrontend::default(),
        )
    }

    fn miss<F: Frontend>(g: &mut Game<MemoryHighScore, F>) {
        if let Some(m) = g.state.moving.as_mut() {
            *m.axis.of_mut(&mut m.footprint.center) = 10.0;
        }
        g.tick(SIM_DT, TickInput::ACTION);
    }

    #[test]
    fn test_initial_hud() {
        let g = game(7);
        assert_eq!(g.frontend.high_score_text, "Hi:7");
        assert!(g.frontend.high_score_visible);
        assert_eq!(g.frontend.play_button.as_deref(), Some(PLAY_LABEL));
        assert_eq!(g.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_start_hides_menu() {
        let mut g = game(0);
        assert!(g.start_game());
        assert_eq!(g.phase(), GamePhase::Playing);
        assert_eq!(g.frontend.play_button, None);
        assert!(!g.frontend.high_score_visible);
        assert_eq!(g.frontend.score_text, "0");
        assert_eq!(g.frontend.blocks, 1);
        assert!(!g.start_game());
    }

    #[test]
    fn test_game_over_records_high_score() {
        let mut g = game(0);
        g.start_game();
        // Two perfect drops
        for _ in 0..2 {
            g.tick(SIM_DT, TickInput::ACTION);
        }
        assert_eq!(g.frontend.score_text, "2");
        miss(&mut g);
        assert_eq!(g.phase(), GamePhase::GameOver);
        assert_eq!(g.store.best, 2);
        assert_eq!(g.frontend.high_score_text, "Hi:2");
        assert_eq!(g.frontend.play_button.as_deref(), Some(REPLAY_LABEL));
    }

    #[test]
    fn test_lower_score_keeps_record() {
        let mut g = game(50);
        g.start_game();
        miss(&mut g);
        assert_eq!(g.store.best, 50);
        assert_eq!(g.frontend.high_score_text, "Hi:50");
    }

    #[test]
    fn test_update_runs_fixed_steps() {
        let mut g = game(0);
        g.press_start();
        let results = g.update(SIM_DT * 3.5);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].phase_changed, Some(GamePhase::Playing));
        // Start was consumed by the first step only
        assert!(results[1].moving_position.is_some());

        // Long frames are clamped
        let results = g.update(5.0);
        assert!(results.len() <= MAX_SUBSTEPS as usize);
    }

    #[test]
    fn test_action_consumed_once() {
        let mut g = game(0);
        g.start_game();
        g.press_action();
        let results = g.update(SIM_DT * 4.0 + 1e-4);
        let drops = results.iter().filter(|r| r.drop.is_some()).count();
        assert_eq!(drops, 1);
    }

    /// Counts every collaborator call
    #[derive(Default)]
    struct Recorder {
        cleared: usize,
        shown: usize,
        spawned: usize,
        removed: usize,
        halos: usize,
        topples: usize,
        sounds: Vec<SoundEffect>,
    }

    impl Frontend for Recorder {
        fn clear_tower(&mut self) {
            self.cleared += 1;
        }
        fn show_block(&mut self, _block: &BlockVisual) {
            self.shown += 1;
        }
        fn show_moving_block(&mut self, _block: &BlockVisual, _axis: crate::sim::Axis) {
            self.spawned += 1;
        }
        fn remove_moving_block(&mut self) {
            self.removed += 1;
        }
        fn show_halo(&mut self, _halo: &crate::sim::Halo) {
            self.halos += 1;
        }
        fn topple(&mut self, _block: &BlockVisual, _mass: f32) {
            self.topples += 1;
        }
        fn play_sound(&mut self, effect: SoundEffect) {
            self.sounds.push(effect);
        }
    }

    #[test]
    fn test_autoplayed_session() {
        use crate::sim::{AutoplayConfig, Autoplayer};

        let mut g = Game::new(
            Tuning::default(),
            Settings::default(),
            MemoryHighScore::default(),
            Recorder::default(),
        );
        let mut bot = Autoplayer::new(AutoplayConfig {
            seed: 3,
            auto_restart: false,
            ..Default::default()
        });

        let mut best = 0;
        for _ in 0..3 {
            g.start_game();
            let mut ticks = 0;
            while g.phase() == GamePhase::Playing && ticks < 60 * 60 {
                let input = bot.decide(&g.state);
                g.tick(SIM_DT, input);
                ticks += 1;
            }
            if g.phase() == GamePhase::Playing {
                miss(&mut g);
            }
            best = best.max(g.state.progression.score);
            // Base block plus one per successful drop
            assert_eq!(g.state.tower.len() as u32, g.state.progression.score + 1);
        }

        let f = &g.frontend;
        assert_eq!(f.cleared, 3);
        assert_eq!(f.spawned, f.removed);
        assert_eq!(f.topples, 3);
        assert!(f.shown >= 3);
        assert_eq!(g.store.best, best);
        let notes = f
            .sounds
            .iter()
            .filter(|s| matches!(s, SoundEffect::PerfectNote(_)))
            .count();
        assert_eq!(notes, f.halos);
        assert_eq!(
            f.sounds.iter().filter(|s| **s == SoundEffect::Topple).count(),
            f.topples
        );
    }

    #[test]
    fn test_reduced_motion_hides_halo() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let mut g = Game::new(
            Tuning::default(),
            settings,
            MemoryHighScore::default(),
            Recorder::default(),
        );
        g.start_game();
        g.tick(SIM_DT, TickInput::ACTION);
        assert!(g.state.halo.is_some());
        assert_eq!(g.frontend.halos, 0);
        assert_eq!(g.frontend.sounds, vec![SoundEffect::PerfectNote(0)]);
    }

    #[test]
    fn test_reduced_motion_stops_orbit() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let mut g = Game::new(
            Tuning::default(),
            settings,
            MemoryHighScore::default(),
            HeadlessFrontend::default(),
        );
        g.start_game();
        miss(&mut g);
        g.update(1.0 / 20.0);
        assert_eq!(g.state.camera.orbit, 0.0);
        assert!(g.state.camera.zoom > CAMERA_START_ZOOM);
    }
}
