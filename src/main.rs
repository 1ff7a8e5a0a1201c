//! Stack Tower entry point
//!
//! Natively this runs attract-mode games headless: the autoplayer drives the
//! simulation, the high score is persisted to the data directory.
//!
//! Usage: `stack-tower [games] [seed]` (seed also read from `STACK_TOWER_SEED`)

#[cfg(not(target_arch = "wasm32"))]
use anyhow::Context;

#[cfg(not(target_arch = "wasm32"))]
use stack_tower::{
    Game, HighScoreStore, Settings, StoredHighScore, Tuning,
    audio::AudioManager,
    consts::SIM_DT,
    frontend::HeadlessFrontend,
    sim::{AutoplayConfig, Autoplayer, GamePhase},
};

/// Give up on a run that outlasts this many ticks (ten minutes)
#[cfg(not(target_arch = "wasm32"))]
const MAX_TICKS_PER_GAME: u64 = 60 * 60 * 10;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    stack_tower::platform::init_logging();
    log::info!("Stack Tower (native) starting...");

    let mut args = std::env::args().skip(1);
    let games: u32 = match args.next() {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("invalid game count {arg:?}"))?,
        None => 3,
    };
    let seed: u64 = match args.next().or_else(|| std::env::var("STACK_TOWER_SEED").ok()) {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("invalid seed {arg:?}"))?,
        None => std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default(),
    };

    let settings = Settings::load();
    let tuning = Tuning::load();
    let store = StoredHighScore::load();
    let frontend = HeadlessFrontend::new(AudioManager::from_settings(&settings));
    let mut game = Game::new(tuning, settings, store, frontend);

    let mut bot = Autoplayer::new(AutoplayConfig {
        seed,
        auto_restart: false,
        ..Default::default()
    });
    log::info!("Autoplaying {games} game(s) with seed {seed}");

    for run in 1..=games {
        game.start_game();
        let mut ticks = 0;
        while game.phase() == GamePhase::Playing && ticks < MAX_TICKS_PER_GAME {
            let input = bot.decide(&game.state);
            game.tick(SIM_DT, input);
            ticks += 1;
        }
        log::info!(
            "Run {run}: score {} after {:.1}s, {} debris",
            game.state.progression.score,
            ticks as f32 * SIM_DT,
            game.frontend.debris
        );
    }

    log::info!("Best score: {}", game.store.get());
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host embeds the library directly
}
