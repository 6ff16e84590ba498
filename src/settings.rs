//! Player settings
//!
//! Persisted separately from the leaderboard in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::highscores::DEFAULT_NAME;
use crate::sim::Difficulty;

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Spawn rate level used for new and running games
    pub difficulty: Difficulty,
    /// Name pre-filled in the high score prompt
    pub player_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            player_name: DEFAULT_NAME.to_string(),
        }
    }
}

impl Settings {
    /// Apply a difficulty by name (from the selector); unknown names are refused
    pub fn set_difficulty_name(&mut self, name: &str) -> Result<(), ConfigError> {
        self.difficulty = name.parse()?;
        Ok(())
    }

    /// Parse persisted JSON. Missing fields take defaults, an unknown level is an error.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dino_dodge_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.difficulty, Difficulty::Easy);
        assert_eq!(settings.player_name, "Anonymous");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings = Settings::from_json(r#"{"difficulty":"hard"}"#).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.player_name, "Anonymous");
    }

    #[test]
    fn test_unknown_stored_level_is_error() {
        assert!(Settings::from_json(r#"{"difficulty":"brutal"}"#).is_err());
    }

    #[test]
    fn test_set_difficulty_name() {
        let mut settings = Settings::default();
        settings.set_difficulty_name("medium").unwrap();
        assert_eq!(settings.difficulty, Difficulty::Medium);
        assert!(settings.set_difficulty_name("bogus").is_err());
        assert_eq!(settings.difficulty, Difficulty::Medium);
    }
}
