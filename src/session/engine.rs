//! Interactive session loop
//!
//! One engine drives all three practice modes; the differences live in the
//! `SessionPlan` it consumes (item order and whether a correct answer also
//! removes a registry entry). Per exercise the engine reads lines until it
//! sees a control word or a judged submission:
//!
//! - `quit` or end of input aborts the run
//! - `skip` counts as a miss, reveals the answer and advances
//! - `hint` shows the command and examples, then re-prompts (no attempt)
//! - empty input re-prompts (no attempt)
//! - anything else is judged as exactly one attempt

use std::error::Error;
use std::io;

use crate::cli::display::Display;
use crate::matcher;
use crate::progress::ProgressStore;
use crate::session::source::{SessionItem, SessionPlan};

/// Reads one line of user input. Implemented by the terminal prompt and by
/// scripted input in tests. `Ok(None)` means end of input.
pub trait AnswerSource {
    fn read_answer(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Result of one session run.
#[derive(Clone, Debug, Default)]
pub struct SessionReport {
    /// Judged submissions plus skips.
    pub attempted: u32,
    pub correct: u32,
    /// Registry entries cleared (review mode).
    pub removed: u32,
    /// Registry entries left after the run (review mode).
    pub remaining: usize,
    pub review: bool,
    pub aborted: bool,
}

impl SessionReport {
    /// In-run accuracy, 0 when nothing was attempted.
    pub fn accuracy(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            self.correct as f64 / self.attempted as f64 * 100.0
        }
    }
}

enum Control {
    Quit,
    Skip,
    Hint,
    Empty,
    Submission(String),
}

fn parse_input(line: &str) -> Control {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Control::Empty;
    }
    match trimmed.to_lowercase().as_str() {
        "quit" => Control::Quit,
        "skip" => Control::Skip,
        "hint" => Control::Hint,
        _ => Control::Submission(trimmed.to_string()),
    }
}

/// Drives one run over a `SessionPlan`, judging answers and recording
/// every attempt in the progress store.
pub struct SessionEngine<'a, I: AnswerSource> {
    store: &'a mut ProgressStore,
    display: &'a Display,
    input: &'a mut I,
}

impl<'a, I: AnswerSource> SessionEngine<'a, I> {
    pub fn new(store: &'a mut ProgressStore, display: &'a Display, input: &'a mut I) -> Self {
        SessionEngine {
            store,
            display,
            input,
        }
    }

    /// Run the whole plan. Returns the session report; `quit` or end of
    /// input ends the run early with `aborted` set.
    pub fn run(&mut self, plan: &SessionPlan) -> Result<SessionReport, Box<dyn Error>> {
        let mut report = SessionReport {
            review: plan.review,
            ..SessionReport::default()
        };

        self.display.session_intro(&plan.title, plan.review)?;

        let total = plan.items.len();
        'run: for (i, item) in plan.items.iter().enumerate() {
            self.display.question(i + 1, total, item, plan.review)?;

            loop {
                let line = match self.input.read_answer("\n💻 Your answer: ")? {
                    Some(line) => line,
                    None => {
                        report.aborted = true;
                        break 'run;
                    }
                };

                match parse_input(&line) {
                    Control::Quit => {
                        report.aborted = true;
                        break 'run;
                    }
                    Control::Empty => continue,
                    Control::Hint => {
                        self.display.hint(&item.command, &item.examples)?;
                        continue;
                    }
                    Control::Skip => {
                        report.attempted += 1;
                        self.display.skipped(&item.answers[0])?;
                        self.record_miss(item, "(skipped)")?;
                        break;
                    }
                    Control::Submission(text) => {
                        report.attempted += 1;
                        if matcher::matches(&text, &item.answers) {
                            let removed = self.remove_from_registry(item)?;
                            if removed {
                                report.removed += 1;
                            }
                            self.display.correct(removed)?;
                            report.correct += 1;
                            let unlocked =
                                self.store
                                    .record_attempt(&item.category_id, &item.command, true)?;
                            self.display.achievements(&unlocked)?;
                        } else {
                            self.display.incorrect(&item.answers, plan.review)?;
                            self.record_miss(item, &text)?;
                        }
                        break;
                    }
                }
            }

            self.display.divider()?;
        }

        if plan.review {
            report.remaining = self.store.wrong_exercises().len();
        }
        self.display
            .session_summary(&report, self.store.stats().streak)?;
        Ok(report)
    }

    /// Failure bookkeeping shared by wrong submissions and skips: the
    /// registry entry first, then the attempt whose save covers both.
    fn record_miss(&mut self, item: &SessionItem, user_answer: &str) -> Result<(), Box<dyn Error>> {
        self.store.record_wrong_answer(
            &item.category_id,
            &item.command,
            &item.question,
            &item.answers,
            user_answer,
        );
        let unlocked = self
            .store
            .record_attempt(&item.category_id, &item.command, false)?;
        self.display.achievements(&unlocked)?;
        Ok(())
    }

    fn remove_from_registry(&mut self, item: &SessionItem) -> Result<bool, Box<dyn Error>> {
        if let Some(key) = &item.registry_key {
            self.store.remove_wrong_answer(key)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::wrong_key;
    use std::collections::VecDeque;
    use tempfile::tempdir;

    struct ScriptedInput {
        lines: VecDeque<String>,
    }

    impl ScriptedInput {
        fn new(lines: &[&str]) -> Self {
            ScriptedInput {
                lines: lines.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    impl AnswerSource for ScriptedInput {
        fn read_answer(&mut self, _prompt: &str) -> io::Result<Option<String>> {
            Ok(self.lines.pop_front())
        }
    }

    fn item(question: &str, answers: &[&str]) -> SessionItem {
        SessionItem {
            category_id: "file_operations".to_string(),
            category_name: "File Operations".to_string(),
            command: "ls".to_string(),
            description: Some("List directory contents".to_string()),
            examples: vec!["ls".to_string(), "ls -la".to_string()],
            question: question.to_string(),
            answers: answers.iter().map(|s| s.to_string()).collect(),
            registry_key: None,
            wrong_count: 0,
        }
    }

    fn plan(items: Vec<SessionItem>, review: bool) -> SessionPlan {
        SessionPlan {
            title: "test".to_string(),
            review,
            items,
        }
    }

    fn run_plan(store: &mut ProgressStore, plan: &SessionPlan, lines: &[&str]) -> SessionReport {
        let display = Display::simple().unwrap();
        let mut input = ScriptedInput::new(lines);
        let mut engine = SessionEngine::new(store, &display, &mut input);
        engine.run(plan).unwrap()
    }

    #[test]
    fn test_correct_submission_with_extra_whitespace() {
        let dir = tempdir().unwrap();
        let mut store = ProgressStore::open(dir.path()).unwrap();
        let p = plan(vec![item("hidden files", &["ls -a", "ls -A", "ls --all"])], false);

        let report = run_plan(&mut store, &p, &["ls   -a"]);

        assert_eq!(report.attempted, 1);
        assert_eq!(report.correct, 1);
        assert!(!report.aborted);
        let stats = store.stats();
        assert_eq!(stats.correct, 1);
        assert_eq!(stats.streak, 1);
        assert!(store.state().wrong_answers.is_empty());
    }

    #[test]
    fn test_wrong_submission_creates_registry_entry() {
        let dir = tempdir().unwrap();
        let mut store = ProgressStore::open(dir.path()).unwrap();
        let p = plan(vec![item("hidden files", &["ls -a"])], false);

        let report = run_plan(&mut store, &p, &["ls -l"]);

        assert_eq!(report.attempted, 1);
        assert_eq!(report.correct, 0);
        assert_eq!(store.stats().streak, 0);
        let key = wrong_key("file_operations", "ls", "hidden files");
        let entry = &store.state().wrong_answers[&key];
        assert_eq!(entry.wrong_count, 1);
        assert_eq!(entry.last_user_answer, "ls -l");
    }

    #[test]
    fn test_repeat_miss_increments_same_entry() {
        let dir = tempdir().unwrap();
        let mut store = ProgressStore::open(dir.path()).unwrap();
        let p = plan(vec![item("hidden files", &["ls -a"])], false);

        run_plan(&mut store, &p, &["ls -l"]);
        run_plan(&mut store, &p, &["ls -x"]);

        let key = wrong_key("file_operations", "ls", "hidden files");
        assert_eq!(store.state().wrong_answers.len(), 1);
        let entry = &store.state().wrong_answers[&key];
        assert_eq!(entry.wrong_count, 2);
        assert_eq!(entry.last_user_answer, "ls -x");
    }

    #[test]
    fn test_skip_follows_the_miss_path() {
        let dir = tempdir().unwrap();
        let mut store = ProgressStore::open(dir.path()).unwrap();
        let p = plan(vec![item("hidden files", &["ls -a"])], false);

        let report = run_plan(&mut store, &p, &["SKIP"]);

        assert_eq!(report.attempted, 1);
        assert_eq!(report.correct, 0);
        assert_eq!(store.stats().total, 1);
        let key = wrong_key("file_operations", "ls", "hidden files");
        assert_eq!(store.state().wrong_answers[&key].last_user_answer, "(skipped)");
    }

    #[test]
    fn test_hint_and_empty_are_not_attempts() {
        let dir = tempdir().unwrap();
        let mut store = ProgressStore::open(dir.path()).unwrap();
        let p = plan(vec![item("hidden files", &["ls -a"])], false);

        let report = run_plan(&mut store, &p, &["hint", "", "  ", "ls -a"]);

        assert_eq!(report.attempted, 1);
        assert_eq!(report.correct, 1);
        assert_eq!(store.stats().total, 1);
    }

    #[test]
    fn test_quit_aborts_without_recording() {
        let dir = tempdir().unwrap();
        let mut store = ProgressStore::open(dir.path()).unwrap();
        let p = plan(
            vec![item("q1", &["ls -a"]), item("q2", &["pwd"])],
            false,
        );

        let report = run_plan(&mut store, &p, &["ls -a", "quit"]);

        assert!(report.aborted);
        assert_eq!(report.attempted, 1);
        assert_eq!(store.stats().total, 1);
    }

    #[test]
    fn test_end_of_input_aborts() {
        let dir = tempdir().unwrap();
        let mut store = ProgressStore::open(dir.path()).unwrap();
        let p = plan(vec![item("q1", &["ls -a"])], false);

        let report = run_plan(&mut store, &p, &[]);

        assert!(report.aborted);
        assert_eq!(report.attempted, 0);
        assert_eq!(store.stats().total, 0);
    }

    #[test]
    fn test_review_mode_removes_entry_on_correct() {
        let dir = tempdir().unwrap();
        let mut store = ProgressStore::open(dir.path()).unwrap();
        let answers = vec!["ls -a".to_string()];
        store.record_wrong_answer("file_operations", "ls", "hidden files", &answers, "ls -l");
        store.record_attempt("file_operations", "ls", false).unwrap();

        let key = wrong_key("file_operations", "ls", "hidden files");
        let mut it = item("hidden files", &["ls -a"]);
        it.registry_key = Some(key.clone());
        it.wrong_count = 1;
        let p = plan(vec![it], true);

        let report = run_plan(&mut store, &p, &["ls -a"]);

        assert_eq!(report.removed, 1);
        assert_eq!(report.remaining, 0);
        assert!(store.state().wrong_answers.is_empty());
        assert_eq!(store.stats().correct, 1);
    }

    #[test]
    fn test_review_mode_keeps_entry_on_miss() {
        let dir = tempdir().unwrap();
        let mut store = ProgressStore::open(dir.path()).unwrap();
        let answers = vec!["ls -a".to_string()];
        store.record_wrong_answer("file_operations", "ls", "hidden files", &answers, "ls -l");
        store.record_attempt("file_operations", "ls", false).unwrap();

        let key = wrong_key("file_operations", "ls", "hidden files");
        let mut it = item("hidden files", &["ls -a"]);
        it.registry_key = Some(key.clone());
        it.wrong_count = 1;
        let p = plan(vec![it], true);

        let report = run_plan(&mut store, &p, &["ls -l"]);

        assert_eq!(report.removed, 0);
        assert_eq!(report.remaining, 1);
        assert_eq!(store.state().wrong_answers[&key].wrong_count, 2);
    }

    #[test]
    fn test_report_accuracy() {
        let report = SessionReport {
            attempted: 4,
            correct: 3,
            ..SessionReport::default()
        };
        assert!((report.accuracy() - 75.0).abs() < 1e-9);
        assert_eq!(SessionReport::default().accuracy(), 0.0);
    }
}
