//! High score persistence
//!
//! A single integer, persisted to LocalStorage on web and to the data
//! directory on native.

use crate::platform::storage::Storage;

/// Persistence collaborator for the best score
pub trait HighScoreStore {
    fn get(&self) -> u32;
    fn set(&mut self, score: u32);

    /// Store `score` if it beats the current best. Returns true on a new record.
    fn submit(&mut self, score: u32) -> bool {
        if score > self.get() {
            self.set(score);
            true
        } else {
            false
        }
    }
}

/// In-process store (tests, attract mode)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryHighScore {
    pub best: u32,
}

impl HighScoreStore for MemoryHighScore {
    fn get(&self) -> u32 {
        self.best
    }

    fn set(&mut self, score: u32) {
        self.best = score;
    }
}

/// Store backed by platform storage
#[derive(Debug, Clone)]
pub struct StoredHighScore {
    storage: Storage,
    best: u32,
}

impl StoredHighScore {
    /// Storage key
    const STORAGE_KEY: &'static str = "stack_tower_highscore";

    /// Load from the default platform storage
    pub fn load() -> Self {
        Self::load_from(Storage::new())
    }

    /// Load from a specific storage; unreadable or garbled values count as 0
    pub fn load_from(storage: Storage) -> Self {
        let best = match storage.read(Self::STORAGE_KEY) {
            Ok(Some(text)) => match text.trim().parse::<u32>() {
                Ok(best) => {
                    log::info!("Loaded high score {best}");
                    best
                }
                Err(e) => {
                    log::warn!("Ignoring corrupt high score {text:?}: {e}");
                    0
                }
            },
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Could not read high score: {e:#}");
                0
            }
        };
        Self { storage, best }
    }
}

impl HighScoreStore for StoredHighScore {
    fn get(&self) -> u32 {
        self.best
    }

    fn set(&mut self, score: u32) {
        self.best = score;
        match self.storage.write(Self::STORAGE_KEY, &score.to_string()) {
            Ok(()) => log::info!("High score saved ({score})"),
            Err(e) => log::warn!("Could not save high score: {e:#}"),
        }
    }
}

/// HUD label for a high score
pub fn high_score_label(best: u32) -> String {
    format!("Hi:{best}")
}
