//! Game settings and preferences
//!
//! Persisted separately from the high score in platform storage.

use serde::{Deserialize, Serialize};

use crate::platform::storage::Storage;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Perfect-drop note volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no game-over camera orbit, no halo flash)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "stack_tower_settings";

    /// Whether the game-over camera should orbit (respects reduced_motion)
    pub fn effective_camera_orbit(&self) -> bool {
        !self.reduced_motion
    }

    /// Whether perfect drops flash a halo (respects reduced_motion)
    pub fn effective_halo(&self) -> bool {
        !self.reduced_motion
    }

    /// Load settings from the default platform storage
    pub fn load() -> Self {
        Self::load_from(&Storage::new())
    }

    pub fn load_from(storage: &Storage) -> Self {
        match storage.read(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable settings: {e}");
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read settings: {e:#}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion() {
        let s = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!s.effective_camera_orbit());
        assert!(!s.effective_halo());
        assert!(Settings::default().effective_camera_orbit());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s: Settings = serde_json::from_str(r#"{ "muted": true }"#).unwrap();
        assert!(s.muted);
        assert_eq!(s.master_volume, 0.8);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_from_storage() {
        use std::time::{SystemTime, UNIX_EPOCH};

        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("stack_tower_settings_{nanos}"));
        let storage = Storage::in_dir(&dir);

        assert_eq!(Settings::load_from(&storage), Settings::default());
        let s = Settings {
            reduced_motion: true,
            sfx_volume: 0.25,
            ..Default::default()
        };
        storage
            .write(Settings::STORAGE_KEY, &serde_json::to_string(&s).unwrap())
            .unwrap();
        assert_eq!(Settings::load_from(&storage), s);

        storage.write(Settings::STORAGE_KEY, "{ not json").unwrap();
        assert_eq!(Settings::load_from(&storage), Settings::default());

        let _ = std::fs::remove_dir_all(dir);
    }
}
