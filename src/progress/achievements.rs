//! Achievement unlocking
//!
//! A pure check run after every recorded attempt: compares the freshly
//! updated counters against the unlock thresholds and reports identifiers
//! that are crossed but not yet held. Unlocks are monotonic; an identifier
//! is granted at most once, ever.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::store::ProgressState;

/// Milestone identifiers, persisted in kebab-case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Achievement {
    Beginner,
    PracticeExpert,
    TerminalMaster,
    StreakRookie,
    StreakExpert,
    StreakMaster,
}

impl Achievement {
    /// Display title for the unlock notification.
    pub fn title(&self) -> &'static str {
        match self {
            Achievement::Beginner => "Beginner",
            Achievement::PracticeExpert => "Practice Expert",
            Achievement::TerminalMaster => "Terminal Master",
            Achievement::StreakRookie => "Streak Rookie",
            Achievement::StreakExpert => "Streak Expert",
            Achievement::StreakMaster => "Streak Master",
        }
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Unlock table: (threshold over some counter, identifier), in the order
/// notifications are shown.
const THRESHOLDS: [(fn(&ProgressState) -> u32, u32, Achievement); 6] = [
    (|s| s.total_exercises, 10, Achievement::Beginner),
    (|s| s.total_exercises, 50, Achievement::PracticeExpert),
    (|s| s.total_exercises, 100, Achievement::TerminalMaster),
    (|s| s.streak, 5, Achievement::StreakRookie),
    (|s| s.streak, 10, Achievement::StreakExpert),
    (|s| s.best_streak, 20, Achievement::StreakMaster),
];

/// Identifiers newly crossed by the current counters and not yet held.
///
/// Thresholds use `>=` so a crossing is still detected even if a counter
/// ever moves by more than one.
pub fn newly_unlocked(state: &ProgressState) -> Vec<Achievement> {
    THRESHOLDS
        .iter()
        .filter(|(counter, min, ach)| counter(state) >= *min && !state.achievements.contains(ach))
        .map(|&(_, _, ach)| ach)
        .collect()
}
