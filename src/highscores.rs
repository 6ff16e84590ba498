//! High score leaderboard
//!
//! Persisted to LocalStorage, keeps the top 5 named scores. A fresh board
//! is seeded with demo entries so there is something to beat.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Maximum number of entries to keep
pub const MAX_ENTRIES: usize = 5;

/// Name recorded when the player leaves the prompt empty
pub const DEFAULT_NAME: &str = "Anonymous";

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
}

/// Top-score leaderboard, sorted descending by score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dino_dodge_leaderboard";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Board shown before anyone has played
    pub fn with_demo_scores() -> Self {
        let entries = [
            ("CyberPilot", 500),
            ("DinoHunter", 350),
            ("TruckMaster", 200),
            ("SpeedRacer", 150),
            ("RoadWarrior", 100),
        ]
        .into_iter()
        .map(|(name, score)| LeaderboardEntry {
            name: name.to_string(),
            score,
        })
        .collect();
        Self { entries }
    }

    /// Check if a score would earn a place on the board
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a score; returns the rank achieved (1-indexed) or None if it
    /// didn't qualify. Ties rank below existing entries.
    pub fn add(&mut self, name: &str, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let name = name.trim();
        let entry = LeaderboardEntry {
            name: if name.is_empty() {
                DEFAULT_NAME.to_string()
            } else {
                name.to_string()
            },
            score,
        };

        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_ENTRIES);

        log::info!("Leaderboard: {} ranked #{} with {}", self.entries[pos].name, pos + 1, score);
        Some(pos + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Load the board from LocalStorage, seeding demo scores on first run (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<Leaderboard>(&json) {
                    Ok(board) => {
                        log::info!("Loaded {} leaderboard entries", board.entries.len());
                        return board;
                    }
                    Err(e) => log::warn!("Discarding unreadable leaderboard: {}", e),
                }
            }
        }

        log::info!("No leaderboard found, seeding demo scores");
        let board = Self::with_demo_scores();
        board.save();
        board
    }

    /// Save the board to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Leaderboard saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::with_demo_scores()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

/// Final score of the run that just ended, waiting for a name.
///
/// Only the latest run can be submitted: a new game or a reset withdraws
/// the offer, and a non-qualifying game over replaces it with nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingHighScore {
    score: Option<u32>,
}

impl PendingHighScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update from an engine event
    pub fn observe(&mut self, event: &GameEvent, board: &Leaderboard) {
        match *event {
            GameEvent::GameOver { score } => {
                self.score = board.qualifies(score).then_some(score);
            }
            GameEvent::Started | GameEvent::Reset => self.score = None,
            GameEvent::Paused | GameEvent::ObstacleAvoided { .. } => {}
        }
    }

    pub fn get(&self) -> Option<u32> {
        self.score
    }

    /// Remove the pending score for submission
    pub fn take(&mut self) -> Option<u32> {
        self.score.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        assert!(!Leaderboard::new().qualifies(0));
        assert!(Leaderboard::new().qualifies(10));
    }

    #[test]
    fn test_full_board_needs_to_beat_last() {
        let board = Leaderboard::with_demo_scores();
        assert!(!board.qualifies(100));
        assert!(board.qualifies(110));
    }

    #[test]
    fn test_add_sorts_and_truncates() {
        let mut board = Leaderboard::with_demo_scores();
        assert_eq!(board.add("Rex", 360), Some(2));
        assert_eq!(board.entries.len(), MAX_ENTRIES);
        let scores: Vec<u32> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![500, 360, 350, 200, 150]);
        assert_eq!(board.entries[1].name, "Rex");
        assert_eq!(board.top_score(), Some(500));
    }

    #[test]
    fn test_tie_ranks_below_existing() {
        let mut board = Leaderboard::new();
        board.add("First", 50);
        assert_eq!(board.add("Second", 50), Some(2));
    }

    #[test]
    fn test_blank_name_becomes_anonymous() {
        let mut board = Leaderboard::new();
        board.add("   ", 30);
        assert_eq!(board.entries[0].name, DEFAULT_NAME);
    }

    #[test]
    fn test_rejected_score_leaves_board_unchanged() {
        let mut board = Leaderboard::with_demo_scores();
        let before = board.clone();
        assert_eq!(board.add("Slowpoke", 20), None);
        assert_eq!(board, before);
    }

    #[test]
    fn test_json_roundtrip_shape() {
        let board = Leaderboard::with_demo_scores();
        let json = serde_json::to_string(&board).unwrap();
        assert!(json.contains("\"CyberPilot\""));
        let back: Leaderboard = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }

    #[test]
    fn test_pending_score_only_for_latest_run() {
        let board = Leaderboard::with_demo_scores();
        let mut pending = PendingHighScore::new();

        pending.observe(&GameEvent::GameOver { score: 400 }, &board);
        assert_eq!(pending.get(), Some(400));

        // Prompt skipped, new game started and lost at 0
        pending.observe(&GameEvent::Reset, &board);
        pending.observe(&GameEvent::Started, &board);
        assert_eq!(pending.get(), None);
        pending.observe(&GameEvent::GameOver { score: 0 }, &board);
        assert_eq!(pending.take(), None);
    }

    #[test]
    fn test_non_qualifying_game_over_clears_pending() {
        let board = Leaderboard::with_demo_scores();
        let mut pending = PendingHighScore::new();
        pending.observe(&GameEvent::GameOver { score: 400 }, &board);
        pending.observe(&GameEvent::GameOver { score: 50 }, &board);
        assert_eq!(pending.get(), None);
    }

    #[test]
    fn test_pending_survives_pause_and_scoring_events() {
        let board = Leaderboard::new();
        let mut pending = PendingHighScore::new();
        pending.observe(&GameEvent::GameOver { score: 30 }, &board);
        pending.observe(&GameEvent::Paused, &board);
        pending.observe(&GameEvent::ObstacleAvoided { score: 10 }, &board);
        assert_eq!(pending.take(), Some(30));
        assert_eq!(pending.get(), None);
    }
}
