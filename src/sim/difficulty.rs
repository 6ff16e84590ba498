//! Difficulty levels and their spawn rates

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::TICKS_PER_SECOND;
use crate::error::ConfigError;

/// Selectable difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Probability of a spawn attempt succeeding on any one tick
    pub fn spawn_probability(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.003,
            Difficulty::Medium => 0.008,
            Difficulty::Hard => 0.015,
        }
    }

    /// Expected obstacles per second at the nominal tick rate
    pub fn expected_spawns_per_second(&self) -> f32 {
        self.spawn_probability() * TICKS_PER_SECOND as f32
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_table() {
        assert_eq!(Difficulty::Easy.spawn_probability(), 0.003);
        assert_eq!(Difficulty::Medium.spawn_probability(), 0.008);
        assert_eq!(Difficulty::Hard.spawn_probability(), 0.015);
        assert!((Difficulty::Hard.expected_spawns_per_second() - 0.9).abs() < 1e-5);
    }

    #[test]
    fn test_parse_levels() {
        for level in Difficulty::ALL {
            assert_eq!(level.as_str().parse::<Difficulty>(), Ok(level));
            assert_eq!(level.display_name().parse::<Difficulty>(), Ok(level));
        }
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        let err = "nightmare".parse::<Difficulty>().unwrap_err();
        assert_eq!(err, ConfigError::UnknownDifficulty("nightmare".into()));
        assert!("".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        assert!(serde_json::from_str::<Difficulty>("\"extreme\"").is_err());
    }
}
