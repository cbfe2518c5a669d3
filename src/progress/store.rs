//! Durable progress tracking
//!
//! Maintains:
//! - Aggregate counters (attempts, correct answers, streaks)
//! - Per-category and per-command tallies
//! - Unlocked achievements (insertion order)
//! - The wrong-answer registry, replayed until answered correctly
//!
//! State lives in a single JSON file under the data directory and is
//! rewritten in full after every mutation. A missing or unreadable file is
//! replaced by zeroed defaults; the unreadable case is warned about, since
//! it silently discards prior progress.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::achievements::{self, Achievement};

const PROGRESS_FILE: &str = "progress.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write progress file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode progress: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Attempt tally for one category or command.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Tally {
    pub total: u32,
    pub correct: u32,
}

/// One entry in the wrong-answer registry.
///
/// The accepted answers are a denormalized copy so the entry can be
/// replayed and displayed without re-joining the catalog.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WrongEntry {
    pub category: String,
    pub command: String,
    pub question: String,
    pub answers: Vec<String>,
    pub wrong_count: u32,
    pub last_wrong: DateTime<Local>,
    pub last_user_answer: String,
}

/// The complete persisted progress record.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressState {
    pub total_exercises: u32,
    pub correct_answers: u32,
    pub streak: u32,
    pub best_streak: u32,
    pub categories_completed: BTreeMap<String, Tally>,
    pub commands_practiced: BTreeMap<String, Tally>,
    pub last_practice: Option<DateTime<Local>>,
    pub achievements: Vec<Achievement>,
    pub wrong_answers: BTreeMap<String, WrongEntry>,
}

/// Summary counters for the menu and stats screens.
#[derive(Clone, Debug)]
pub struct Stats {
    pub total: u32,
    pub correct: u32,
    pub accuracy: f64,
    pub streak: u32,
    pub best_streak: u32,
    pub achievements: Vec<Achievement>,
}

/// Composite registry key for one exercise.
pub fn wrong_key(category: &str, command: &str, question: &str) -> String {
    format!("{}::{}::{}", category, command, question)
}

/// Owns the progress state and its on-disk file.
///
/// Single-writer: one interactive session at a time. Every mutating call
/// either saves itself or (for `record_wrong_answer`) is covered by the
/// `record_attempt` save of the same outcome.
#[derive(Debug)]
pub struct ProgressStore {
    path: PathBuf,
    state: ProgressState,
}

impl ProgressStore {
    /// Open the store under `data_dir`, creating the directory if needed.
    ///
    /// A missing progress file yields zeroed defaults; an unreadable or
    /// corrupt one does too, after a warning.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(data_dir)?;
        let path = data_dir.join(PROGRESS_FILE);
        let state = Self::load_or_default(&path);
        Ok(ProgressStore { path, state })
    }

    fn load_or_default(path: &Path) -> ProgressState {
        if !path.exists() {
            return ProgressState::default();
        }
        match fs::read_to_string(path).map_err(|e| e.to_string()).and_then(|content| {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        }) {
            Ok(state) => state,
            Err(e) => {
                eprintln!("⚠ Could not read progress file: {} (starting fresh)", e);
                ProgressState::default()
            }
        }
    }

    /// Write the full state back to disk.
    pub fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.state)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Record one judged attempt. The single mutation path for all
    /// practice modes.
    ///
    /// Updates the counters, streaks, tallies and `last_practice`, runs
    /// the achievement check, then saves. Returns the achievements newly
    /// unlocked by this attempt so the caller can announce them.
    pub fn record_attempt(
        &mut self,
        category: &str,
        command: &str,
        correct: bool,
    ) -> Result<Vec<Achievement>, StoreError> {
        let state = &mut self.state;
        state.total_exercises += 1;
        if correct {
            state.correct_answers += 1;
            state.streak += 1;
            state.best_streak = state.best_streak.max(state.streak);
        } else {
            state.streak = 0;
        }

        let cat = state.categories_completed.entry(category.to_string()).or_default();
        cat.total += 1;
        if correct {
            cat.correct += 1;
        }

        let cmd = state.commands_practiced.entry(command.to_string()).or_default();
        cmd.total += 1;
        if correct {
            cmd.correct += 1;
        }

        state.last_practice = Some(Local::now());

        let unlocked = achievements::newly_unlocked(state);
        state.achievements.extend(&unlocked);

        self.save()?;
        Ok(unlocked)
    }

    /// Record an incorrect or skipped submission in the registry.
    ///
    /// First miss for a key inserts an entry with `wrong_count` 1; repeat
    /// misses increment the same entry in place and overwrite its
    /// timestamp and last answer. Does not save by itself: call it right
    /// before the `record_attempt(false)` of the same outcome so that
    /// save covers both.
    pub fn record_wrong_answer(
        &mut self,
        category: &str,
        command: &str,
        question: &str,
        answers: &[String],
        user_answer: &str,
    ) {
        let key = wrong_key(category, command, question);
        let now = Local::now();
        self.state
            .wrong_answers
            .entry(key)
            .and_modify(|entry| {
                entry.wrong_count += 1;
                entry.last_wrong = now;
                entry.last_user_answer = user_answer.to_string();
            })
            .or_insert_with(|| WrongEntry {
                category: category.to_string(),
                command: command.to_string(),
                question: question.to_string(),
                answers: answers.to_vec(),
                wrong_count: 1,
                last_wrong: now,
                last_user_answer: user_answer.to_string(),
            });
    }

    /// Remove a mastered entry from the registry; no-op if absent.
    pub fn remove_wrong_answer(&mut self, key: &str) -> Result<(), StoreError> {
        self.state.wrong_answers.remove(key);
        self.save()
    }

    /// Explicit user reset of the whole registry.
    pub fn clear_wrong_answers(&mut self) -> Result<(), StoreError> {
        self.state.wrong_answers.clear();
        self.save()
    }

    /// Registry entries with their keys, sorted by `wrong_count`
    /// descending. Ties break by key ascending (the map's iteration
    /// order, kept by the stable sort), so the replay order is
    /// deterministic.
    pub fn wrong_exercises(&self) -> Vec<(&str, &WrongEntry)> {
        let mut entries: Vec<(&str, &WrongEntry)> = self
            .state
            .wrong_answers
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        entries.sort_by(|a, b| b.1.wrong_count.cmp(&a.1.wrong_count));
        entries
    }

    /// Summary counters. Accuracy is 0 when nothing has been attempted.
    pub fn stats(&self) -> Stats {
        let state = &self.state;
        let accuracy = if state.total_exercises == 0 {
            0.0
        } else {
            state.correct_answers as f64 / state.total_exercises as f64 * 100.0
        };
        Stats {
            total: state.total_exercises,
            correct: state.correct_answers,
            accuracy,
            streak: state.streak,
            best_streak: state.best_streak,
            achievements: state.achievements.clone(),
        }
    }

    /// Read access to the full state (per-category breakdowns etc.).
    pub fn state(&self) -> &ProgressState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open_store(dir: &tempfile::TempDir) -> ProgressStore {
        ProgressStore::open(dir.path()).unwrap()
    }

    #[test]
    fn test_attempt_aggregation() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);

        store.record_attempt("file_operations", "ls", true).unwrap();
        store.record_attempt("file_operations", "ls", false).unwrap();
        store.record_attempt("network", "curl", true).unwrap();

        let stats = store.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.correct, 2);
        assert!((stats.accuracy - 200.0 / 3.0).abs() < 1e-9);

        let state = store.state();
        assert_eq!(state.categories_completed["file_operations"].total, 2);
        assert_eq!(state.categories_completed["file_operations"].correct, 1);
        assert_eq!(state.commands_practiced["curl"].total, 1);
        assert_eq!(state.commands_practiced["curl"].correct, 1);
        assert!(state.last_practice.is_some());
    }

    #[test]
    fn test_accuracy_is_zero_without_attempts() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);
        assert_eq!(store.stats().accuracy, 0.0);
    }

    #[test]
    fn test_streak_resets_then_climbs() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);

        for _ in 0..3 {
            store.record_attempt("c", "ls", true).unwrap();
        }
        assert_eq!(store.stats().streak, 3);
        assert_eq!(store.stats().best_streak, 3);

        store.record_attempt("c", "ls", false).unwrap();
        assert_eq!(store.stats().streak, 0);
        assert_eq!(store.stats().best_streak, 3);

        store.record_attempt("c", "ls", true).unwrap();
        assert_eq!(store.stats().streak, 1);
        // best_streak never decreases
        assert_eq!(store.stats().best_streak, 3);
    }

    #[test]
    fn test_achievement_unlocked_exactly_once() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);

        let mut unlocks = Vec::new();
        for _ in 0..12 {
            unlocks.extend(store.record_attempt("c", "ls", false).unwrap());
        }

        let beginners = unlocks
            .iter()
            .filter(|a| **a == Achievement::Beginner)
            .count();
        assert_eq!(beginners, 1);
        let held = &store.state().achievements;
        assert_eq!(
            held.iter().filter(|a| **a == Achievement::Beginner).count(),
            1
        );
    }

    #[test]
    fn test_streak_achievement_order() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);

        let mut unlocks = Vec::new();
        for _ in 0..10 {
            unlocks.extend(store.record_attempt("c", "ls", true).unwrap());
        }
        // total 10 and streak 10 both crossed; announcement follows table order
        assert_eq!(
            unlocks,
            vec![
                Achievement::StreakRookie,
                Achievement::Beginner,
                Achievement::StreakExpert
            ]
        );
    }

    #[test]
    fn test_wrong_entry_increment_in_place() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);
        let answers = vec!["ls -a".to_string(), "ls -A".to_string()];

        store.record_wrong_answer("c", "ls", "q", &answers, "ls -l");
        store.record_attempt("c", "ls", false).unwrap();
        {
            let key = wrong_key("c", "ls", "q");
            let entry = &store.state().wrong_answers[&key];
            assert_eq!(entry.wrong_count, 1);
            assert_eq!(entry.last_user_answer, "ls -l");
        }

        store.record_wrong_answer("c", "ls", "q", &answers, "ls -b");
        store.record_attempt("c", "ls", false).unwrap();
        let key = wrong_key("c", "ls", "q");
        assert_eq!(store.state().wrong_answers.len(), 1);
        let entry = &store.state().wrong_answers[&key];
        assert_eq!(entry.wrong_count, 2);
        assert_eq!(entry.last_user_answer, "ls -b");
    }

    #[test]
    fn test_remove_and_clear_registry() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);
        let answers = vec!["pwd".to_string()];

        store.record_wrong_answer("c", "pwd", "q1", &answers, "x");
        store.record_wrong_answer("c", "pwd", "q2", &answers, "y");

        let key = wrong_key("c", "pwd", "q1");
        store.remove_wrong_answer(&key).unwrap();
        assert_eq!(store.state().wrong_answers.len(), 1);

        // removing an absent key is a no-op
        store.remove_wrong_answer(&key).unwrap();
        assert_eq!(store.state().wrong_answers.len(), 1);

        store.clear_wrong_answers().unwrap();
        assert!(store.state().wrong_answers.is_empty());
    }

    #[test]
    fn test_wrong_exercises_sorted_by_count_then_key() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);
        let answers = vec!["x".to_string()];

        store.record_wrong_answer("c", "b_cmd", "q", &answers, "w");
        store.record_wrong_answer("c", "a_cmd", "q", &answers, "w");
        store.record_wrong_answer("c", "z_cmd", "q", &answers, "w");
        store.record_wrong_answer("c", "z_cmd", "q", &answers, "w");

        let ordered = store.wrong_exercises();
        let counts: Vec<u32> = ordered.iter().map(|(_, e)| e.wrong_count).collect();
        assert_eq!(counts, vec![2, 1, 1]);
        // ties in key order
        assert_eq!(ordered[0].1.command, "z_cmd");
        assert_eq!(ordered[1].1.command, "a_cmd");
        assert_eq!(ordered[2].1.command, "b_cmd");
    }

    #[test]
    fn test_state_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let mut store = open_store(&dir);
            store.record_wrong_answer("c", "ls", "q", &["ls -a".to_string()], "ls -l");
            store.record_attempt("c", "ls", false).unwrap();
            store.record_attempt("c", "ls", true).unwrap();
        }

        let store = open_store(&dir);
        let stats = store.stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.correct, 1);
        assert_eq!(store.state().wrong_answers.len(), 1);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(PROGRESS_FILE), "{not json").unwrap();

        let store = open_store(&dir);
        assert_eq!(store.stats().total, 0);
        assert!(store.state().wrong_answers.is_empty());
    }

    #[test]
    fn test_legacy_file_without_registry() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(PROGRESS_FILE),
            r#"{"total_exercises": 4, "correct_answers": 2, "streak": 1, "best_streak": 2}"#,
        )
        .unwrap();

        let store = open_store(&dir);
        assert_eq!(store.stats().total, 4);
        assert!(store.state().wrong_answers.is_empty());
    }
}
