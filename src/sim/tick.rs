//! Simulation tick
//!
//! One logical update per call: either the moving block slides, or the
//! player's action drops it and the outcome is folded into the state.

use glam::{Vec2, Vec3};

use super::drop::{DropOutcome, apply_growth, resolve};
use super::footprint::{Axis, Footprint};
use super::state::{CameraRig, GameEvent, GamePhase, GameState, Halo};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Drop the moving block (any key / tap)
    pub action: bool,
    /// Start or restart a run (play button)
    pub start: bool,
}

impl TickInput {
    pub const ACTION: Self = Self {
        action: true,
        start: false,
    };
    pub const START: Self = Self {
        action: false,
        start: true,
    };
}

/// What a tick did
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickResult {
    /// New moving block centre, if it slid this tick
    pub moving_position: Option<Vec2>,
    /// Outcome, if a drop was resolved this tick
    pub drop: Option<DropOutcome>,
    /// New phase, if it changed this tick
    pub phase_changed: Option<GamePhase>,
}

/// Reset every per-run piece of state and begin playing
pub fn start_game(state: &mut GameState) {
    let tuning = state.tuning.clone();

    state.tower.clear();
    state.moving = None;
    state.halo = None;
    state.time_ticks = 0;
    state.progression = super::progression::Progression::new(&tuning);
    state.colors.reset();
    state.camera = CameraRig::default();
    state.emit(GameEvent::TowerCleared);
    state.emit(GameEvent::CameraMoved(state.camera));

    let base = Footprint::new(
        Vec2::ZERO,
        Vec2::splat(tuning.block_width),
        tuning.block_height,
        0,
    );
    let color = state.colors.current;
    state.place_block(base, color);

    state.next_axis = Axis::X;
    state.spawn_moving_block();

    state.emit(GameEvent::ScoreChanged(0));
    state.set_phase(GamePhase::Playing);
    log::info!("Game started");
}

/// Advance the game state by one timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> TickResult {
    let mut result = TickResult::default();
    let phase_before = state.phase;

    match state.phase {
        GamePhase::Menu | GamePhase::GameOver if input.start => {
            start_game(state);
        }
        GamePhase::Menu => {
            if input.action {
                log::debug!("Action ignored in menu");
            }
        }
        GamePhase::GameOver => {
            state.camera.drift(dt, state.camera_orbit);
            state.emit(GameEvent::CameraMoved(state.camera));
        }
        GamePhase::Playing => {
            if input.start {
                log::debug!("Start ignored while playing");
            }
            state.time_ticks += 1;

            if input.action {
                result.drop = drop_block(state);
            } else if let Some(moving) = state.moving.as_mut() {
                let pos = moving.advance(dt, state.progression.speed, state.tuning.bounds);
                log::trace!("Moving block at ({:.3}, {:.3})", pos.x, pos.y);
                result.moving_position = Some(pos);
            }

            update_halo(state, dt);
        }
    }

    if state.phase != phase_before {
        result.phase_changed = Some(state.phase);
    }
    result
}

/// Resolve the player's drop against the top of the tower
fn drop_block(state: &mut GameState) -> Option<DropOutcome> {
    let mut moving = state.moving.take()?;
    let Some(top) = state.top().map(|b| b.footprint) else {
        state.moving = Some(moving);
        return None;
    };
    let tuning = state.tuning.clone();

    let outcome = resolve(&top, &moving.footprint, moving.axis, tuning.tolerance);
    moving.reset_phase();
    let report = state.progression.on_drop(&outcome, &tuning);
    state.emit(GameEvent::MovingBlockRemoved);

    // Outcome as placed, growth included
    let mut landed = outcome;
    match outcome {
        DropOutcome::Miss { overlap } => {
            log::info!(
                "Missed (overlap {:.3} x {:.3}), final score {}",
                overlap.x,
                overlap.y,
                state.progression.score
            );
            let footprint = moving.footprint;
            state.emit(GameEvent::Toppled {
                footprint,
                color: moving.color,
                elevation: tuning.elevation(footprint.level),
                mass: tuning.debris_mass,
            });
            state.halo = None;
            state.set_phase(GamePhase::GameOver);
            state.emit(GameEvent::GameOver {
                score: state.progression.score,
            });
            return Some(outcome);
        }
        DropOutcome::Perfect { mut placed } => {
            log::debug!(
                "Perfect drop #{} at level {}",
                report.note.map_or(0, |n| n + 1),
                placed.level
            );
            if let Some(note) = report.note {
                state.emit(GameEvent::PlayNote(note));
            }
            let halo = Halo::over(&top, &tuning);
            state.halo = Some(halo);
            state.emit(GameEvent::PerfectHalo(halo));

            if report.growth {
                apply_growth(
                    &mut placed,
                    moving.axis,
                    tuning.perfect_increase,
                    tuning.block_width,
                );
                log::info!(
                    "Growth bonus: block now {:.2} x {:.2}",
                    placed.width(),
                    placed.depth()
                );
                landed = DropOutcome::Perfect { placed };
            }
            state.place_block(placed, moving.color);
        }
        DropOutcome::Partial { placed, fragment } => {
            log::debug!(
                "Sliced to {:.3} x {:.3} at level {}",
                placed.width(),
                placed.depth(),
                placed.level
            );
            if let Some(fragment) = fragment {
                let color: Vec3 = state.colors.current;
                state.emit(GameEvent::DebrisSpawned {
                    footprint: fragment,
                    color,
                    elevation: tuning.elevation(fragment.level),
                    mass: tuning.debris_mass,
                });
            }
            state.place_block(placed, moving.color);
        }
    }

    state.camera.raise(tuning.block_height);
    state.emit(GameEvent::CameraMoved(state.camera));
    state.emit(GameEvent::ScoreChanged(state.progression.score));
    state.spawn_moving_block();

    Some(landed)
}

fn update_halo(state: &mut GameState, dt: f32) {
    if let Some(halo) = state.halo.as_mut() {
        if !halo.fade(dt) {
            state.halo = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn playing() -> GameState {
        let mut state = GameState::default();
        tick(&mut state, &TickInput::START, SIM_DT);
        state
    }

    /// Line the moving block up over the top with `offset` on its axis
    fn aim(state: &mut GameState, offset: f32) {
        let top = state.top().unwrap().footprint;
        let moving = state.moving.as_mut().unwrap();
        moving.footprint.center = top.center;
        *moving.axis.of_mut(&mut moving.footprint.center) += offset;
    }

    #[test]
    fn test_menu_ignores_action() {
        let mut state = GameState::default();
        let result = tick(&mut state, &TickInput::ACTION, SIM_DT);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(result, TickResult::default());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_start_builds_base_and_moving_block() {
        let mut state = GameState::default();
        let result = tick(&mut state, &TickInput::START, SIM_DT);
        assert_eq!(result.phase_changed, Some(GamePhase::Playing));
        assert_eq!(state.tower.len(), 1);

        let base = state.top().unwrap();
        assert_eq!(base.footprint.size, Vec2::splat(BLOCK_WIDTH));
        assert_eq!(base.color, Vec3::new(1.0, 0.0, 0.0));

        let moving = state.moving.as_ref().unwrap();
        assert_eq!(moving.axis, Axis::X);
        assert_eq!(moving.footprint.level, 1);
        assert!((moving.color.x - 0.9).abs() < 1e-5);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::TowerCleared));
        assert!(events.contains(&GameEvent::PhaseChanged(GamePhase::Playing)));
    }

    #[test]
    fn test_slide_follows_sine() {
        let mut state = playing();
        let mut expected_phase = 0.0;
        for _ in 0..30 {
            let result = tick(&mut state, &TickInput::default(), SIM_DT);
            expected_phase += SIM_DT * TILE_START_SPEED;
            let pos = result.moving_position.unwrap();
            assert!((pos.x - expected_phase.sin() * BLOCK_BOUNDS).abs() < 1e-4);
            assert_eq!(pos.y, 0.0);
        }
    }

    #[test]
    fn test_perfect_drop() {
        let mut state = playing();
        aim(&mut state, 0.03);
        let result = tick(&mut state, &TickInput::ACTION, SIM_DT);
        let outcome = result.drop.unwrap();
        assert!(outcome.is_perfect());

        let top = state.top().unwrap().footprint;
        assert_eq!(top.size, Vec2::ONE);
        assert_eq!(top.center, Vec2::ZERO);
        assert_eq!(state.progression.score, 1);
        assert_eq!(state.progression.perfect_streak, 1);
        assert!(state.halo.is_some());

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::PlayNote(0)));
        assert!(events.iter().any(|e| matches!(e, GameEvent::PerfectHalo(_))));
    }

    #[test]
    fn test_partial_drop_spawns_debris() {
        let mut state = playing();
        aim(&mut state, 0.6);
        let outcome = tick(&mut state, &TickInput::ACTION, SIM_DT).drop.unwrap();
        assert!(matches!(outcome, DropOutcome::Partial { .. }));

        let top = state.top().unwrap().footprint;
        assert!((top.width() - 0.4).abs() < 1e-5);
        assert_eq!(state.progression.perfect_streak, 0);

        let events = state.drain_events();
        let debris = events.iter().find_map(|e| match e {
            GameEvent::DebrisSpawned { footprint, mass, .. } => Some((*footprint, *mass)),
            _ => None,
        });
        let (fragment, mass) = debris.expect("debris event");
        assert!((fragment.width() - 0.6).abs() < 1e-5);
        assert_eq!(mass, DEBRIS_MASS);

        // Next block is the new top's size, sliding on Z
        let moving = state.moving.as_ref().unwrap();
        assert_eq!(moving.axis, Axis::Z);
        assert_eq!(moving.footprint.size, top.size);
        assert_eq!(moving.footprint.center.x, top.center.x);
        assert_eq!(moving.phase, 0.0);
    }

    #[test]
    fn test_miss_ends_game() {
        let mut state = playing();
        aim(&mut state, 0.6);
        tick(&mut state, &TickInput::ACTION, SIM_DT);
        let speed = state.progression.speed;
        state.drain_events();

        aim(&mut state, 1.2);
        let result = tick(&mut state, &TickInput::ACTION, SIM_DT);
        assert!(result.drop.unwrap().is_miss());
        assert_eq!(result.phase_changed, Some(GamePhase::GameOver));
        assert_eq!(state.progression.score, 1);
        assert_eq!(state.progression.speed, speed);
        assert!(state.moving.is_none());
        assert_eq!(state.tower.len(), 2);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GameOver { score: 1 }));
        assert!(events.iter().any(|e| matches!(e, GameEvent::Toppled { .. })));
    }

    #[test]
    fn test_game_over_only_drifts() {
        let mut state = playing();
        aim(&mut state, 2.0);
        tick(&mut state, &TickInput::ACTION, SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);

        let tower = state.tower.clone();
        let zoom = state.camera.zoom;
        let result = tick(&mut state, &TickInput::ACTION, SIM_DT);
        assert_eq!(result.drop, None);
        assert_eq!(state.tower, tower);
        assert!(state.camera.zoom > zoom);
    }

    #[test]
    fn test_restart_reinitialises() {
        let mut state = playing();
        for _ in 0..3 {
            aim(&mut state, 0.0);
            tick(&mut state, &TickInput::ACTION, SIM_DT);
        }
        aim(&mut state, 5.0);
        tick(&mut state, &TickInput::ACTION, SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);

        let result = tick(&mut state, &TickInput::START, SIM_DT);
        assert_eq!(result.phase_changed, Some(GamePhase::Playing));
        assert_eq!(state.progression.score, 0);
        assert_eq!(state.progression.speed, TILE_START_SPEED);
        assert_eq!(state.tower.len(), 1);
        assert_eq!(state.colors.index, 0);
        assert_eq!(state.moving.as_ref().unwrap().axis, Axis::X);
        assert_eq!(state.camera.zoom, CAMERA_START_ZOOM);
    }

    #[test]
    fn test_start_ignored_while_playing() {
        let mut state = playing();
        aim(&mut state, 0.0);
        tick(&mut state, &TickInput::ACTION, SIM_DT);
        let result = tick(&mut state, &TickInput::START, SIM_DT);
        assert_eq!(result.phase_changed, None);
        assert_eq!(state.progression.score, 1);
    }

    #[test]
    fn test_axis_alternates() {
        let mut state = playing();
        let mut axes = Vec::new();
        for i in 0..6 {
            axes.push(state.moving.as_ref().unwrap().axis);
            // Alternate perfect and partial drops
            aim(&mut state, if i % 2 == 0 { 0.0 } else { 0.1 });
            tick(&mut state, &TickInput::ACTION, SIM_DT);
        }
        assert_eq!(
            axes,
            vec![Axis::X, Axis::Z, Axis::X, Axis::Z, Axis::X, Axis::Z]
        );
    }

    #[test]
    fn test_growth_capped_at_block_width() {
        let mut state = playing();
        // Shrink the tower first
        aim(&mut state, 0.3);
        tick(&mut state, &TickInput::ACTION, SIM_DT);
        let narrow = state.top().unwrap().footprint.width();
        assert!((narrow - 0.7).abs() < 1e-5);

        let mut growths = 0;
        for _ in 0..64 {
            aim(&mut state, 0.0);
            let before = state.top().unwrap().footprint.size;
            tick(&mut state, &TickInput::ACTION, SIM_DT);
            let after = state.top().unwrap().footprint.size;
            if after != before {
                growths += 1;
            }
            assert!(after.x <= BLOCK_WIDTH && after.y <= BLOCK_WIDTH);
        }
        // 8 bonuses; X grows on X-axis bonuses only, capped at 1.0
        assert!(growths > 0);
        assert_eq!(state.top().unwrap().footprint.width(), BLOCK_WIDTH);
        assert_eq!(state.progression.score, 65);
    }

    #[test]
    fn test_eighth_perfect_plays_top_note() {
        let mut state = playing();
        let mut notes = Vec::new();
        for _ in 0..PERFECT_BONUS {
            aim(&mut state, 0.0);
            tick(&mut state, &TickInput::ACTION, SIM_DT);
            notes.extend(state.drain_events().into_iter().filter_map(|e| match e {
                GameEvent::PlayNote(n) => Some(n),
                _ => None,
            }));
        }
        // The streak resets on the bonus, the note still counts it
        assert_eq!(notes, (0..PERFECT_BONUS as usize).collect::<Vec<_>>());
        assert_eq!(state.progression.perfect_streak, 0);
    }

    #[test]
    fn test_halo_expires() {
        let mut state = playing();
        aim(&mut state, 0.0);
        tick(&mut state, &TickInput::ACTION, SIM_DT);
        assert!(state.halo.is_some());
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.halo.is_none());
    }
}
