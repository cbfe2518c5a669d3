//! Terminal rendering and UI
//!
//! Features:
//! - Banner, main menu and help screens
//! - Per-question prompts with colored feedback
//! - Statistics view with per-category accuracy bars
//! - Wrong-answer notebook listing
//!
//! All color and layout decisions live here; nothing in this module
//! affects grading or progress tracking.

use crossterm::{
    cursor, execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::collections::BTreeMap;
use std::io::{self, stdout, Write};

use crate::catalog::Catalog;
use crate::progress::{Achievement, Stats, Tally, WrongEntry};
use crate::session::source::SessionItem;
use crate::session::SessionReport;

const RULE: &str = "════════════════════════════════════════════════════════════";
const THIN_RULE: &str = "────────────────────────────────────────────────────────────";

/// Terminal display manager.
pub struct Display {
    /// When false, skip screen clearing (used by scripted runs and tests).
    clear_screen: bool,
}

impl Display {
    /// Interactive display that clears the screen between views.
    pub fn new() -> io::Result<Self> {
        Ok(Display { clear_screen: true })
    }

    /// Plain mode: no screen clearing, output only appended. Used in
    /// tests and when stdout is not a terminal.
    pub fn simple() -> io::Result<Self> {
        Ok(Display {
            clear_screen: false,
        })
    }

    fn line(&self, color: Color, text: &str) -> io::Result<()> {
        let mut stdout = stdout();
        execute!(
            stdout,
            SetForegroundColor(color),
            Print(text),
            ResetColor,
            Print("\n")
        )?;
        Ok(())
    }

    /// Clear screen and move the cursor home.
    pub fn clear(&self) -> io::Result<()> {
        if !self.clear_screen {
            return Ok(());
        }
        let mut stdout = stdout();
        execute!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        Ok(())
    }

    /// Startup banner.
    pub fn banner(&self) -> io::Result<()> {
        let banner = r#"
╔════════════════════════════════════════════════════════════╗
║                                                            ║
║   ████████ ███████ ██████  ███    ███                      ║
║      ██    ██      ██   ██ ████  ████                      ║
║      ██    █████   ██████  ██ ████ ██                      ║
║      ██    ██      ██   ██ ██  ██  ██                      ║
║      ██    ███████ ██   ██ ██      ██  TRAINER             ║
║                                                            ║
║        🖥️  Terminal command practice drills  🖥️             ║
║                                                            ║
╚════════════════════════════════════════════════════════════╝"#;
        self.line(Color::Cyan, banner)
    }

    /// Main menu: progress summary, category list and mode shortcuts.
    pub fn menu(&self, catalog: &Catalog, stats: &Stats, wrong_count: usize) -> io::Result<()> {
        let mut stdout = stdout();

        execute!(
            stdout,
            SetForegroundColor(Color::Yellow),
            Print("\n📊 Your progress: "),
            ResetColor,
            Print(format!(
                "{} exercises | {:.1}% accuracy | streak {} | best streak {}\n",
                stats.total, stats.accuracy, stats.streak, stats.best_streak
            ))
        )?;

        if !stats.achievements.is_empty() {
            let names: Vec<&str> = stats.achievements.iter().map(|a| a.title()).collect();
            execute!(
                stdout,
                SetForegroundColor(Color::Yellow),
                Print("🏆 Achievements: "),
                ResetColor,
                Print(format!("{}\n", names.join(", ")))
            )?;
        }

        self.line(Color::DarkGrey, RULE)?;
        self.line(Color::White, "\n📚 Pick a module:\n")?;

        for (i, cat) in catalog.categories().iter().enumerate() {
            execute!(
                stdout,
                Print("  "),
                SetForegroundColor(Color::Cyan),
                Print(format!("[{}]", i + 1)),
                ResetColor,
                Print(format!(" {} {:<24}", cat.icon, cat.name)),
                SetForegroundColor(Color::DarkGrey),
                Print(format!("({} commands)\n", cat.commands.len())),
                ResetColor
            )?;
        }

        self.line(Color::DarkGrey, RULE)?;
        let wrong_label = if wrong_count > 0 {
            format!(" ({} questions)", wrong_count)
        } else {
            String::new()
        };

        execute!(
            stdout,
            SetForegroundColor(Color::Green),
            Print("\n  [a]"),
            ResetColor,
            Print(" 📖 Command reference\n"),
            SetForegroundColor(Color::Green),
            Print("  [r]"),
            ResetColor,
            Print(" 🎲 Random practice\n"),
            SetForegroundColor(Color::Green),
            Print("  [w]"),
            ResetColor,
            Print(" 📕 Review notebook"),
            SetForegroundColor(Color::Red),
            Print(format!("{}\n", wrong_label)),
            ResetColor,
            SetForegroundColor(Color::Green),
            Print("  [s]"),
            ResetColor,
            Print(" 📈 Detailed statistics\n"),
            SetForegroundColor(Color::Green),
            Print("  [h]"),
            ResetColor,
            Print(" ❓ Help\n"),
            SetForegroundColor(Color::Green),
            Print("  [q]"),
            ResetColor,
            Print(" 🚪 Quit\n\n")
        )?;
        Ok(())
    }

    /// Session header with the control-word reminder.
    pub fn session_intro(&self, title: &str, review: bool) -> io::Result<()> {
        self.clear()?;
        self.line(Color::Cyan, &format!("\n{}\n", title))?;
        if review {
            self.line(Color::DarkGrey, "Answer correctly to remove a question from the notebook")?;
        }
        self.line(
            Color::DarkGrey,
            "Type 'hint' for a hint, 'skip' to skip, 'quit' to leave\n",
        )?;
        self.line(Color::DarkGrey, RULE)
    }

    /// One exercise prompt.
    pub fn question(
        &self,
        num: usize,
        total: usize,
        item: &SessionItem,
        review: bool,
    ) -> io::Result<()> {
        let mut stdout = stdout();

        execute!(
            stdout,
            Print("\n"),
            SetForegroundColor(Color::Yellow),
            Print(format!("Question {}/{}", num, total)),
            ResetColor,
            SetForegroundColor(Color::DarkGrey),
            Print(format!(" [{}]", item.category_name)),
            ResetColor
        )?;
        if review && item.wrong_count > 0 {
            execute!(
                stdout,
                SetForegroundColor(Color::Red),
                Print(format!(" (missed {}x)", item.wrong_count)),
                ResetColor
            )?;
        }

        execute!(
            stdout,
            Print("\n"),
            SetForegroundColor(Color::DarkGrey),
            Print("Command: "),
            ResetColor,
            Print(&item.command)
        )?;
        if let Some(desc) = &item.description {
            execute!(stdout, Print(format!(" - {}", desc)))?;
        }

        execute!(
            stdout,
            Print("\n\n"),
            SetForegroundColor(Color::Cyan),
            Print("❓ Question: "),
            ResetColor,
            Print(format!("{}\n", item.question))
        )?;
        Ok(())
    }

    /// Hint: command name plus up to two example invocations.
    pub fn hint(&self, command: &str, examples: &[String]) -> io::Result<()> {
        self.line(
            Color::Yellow,
            &format!("\n💡 Hint: the command starts with '{}'", command),
        )?;
        if !examples.is_empty() {
            let shown: Vec<&str> = examples.iter().take(2).map(|s| s.as_str()).collect();
            self.line(
                Color::DarkGrey,
                &format!("   Examples: {}", shown.join(", ")),
            )?;
        }
        Ok(())
    }

    /// Reveal after a skip.
    pub fn skipped(&self, canonical: &str) -> io::Result<()> {
        self.line(
            Color::Yellow,
            &format!("\n⏭️  Skipped. Correct answer: {}", canonical),
        )
    }

    /// Success feedback; notes the notebook removal in review mode.
    pub fn correct(&self, removed_from_registry: bool) -> io::Result<()> {
        if removed_from_registry {
            self.line(Color::Green, "\n✅ Correct! Removed from the notebook")
        } else {
            self.line(Color::Green, "\n✅ Correct!")
        }
    }

    /// Failure feedback with the canonical answer and any alternates.
    pub fn incorrect(&self, answers: &[String], review: bool) -> io::Result<()> {
        if review {
            self.line(Color::Red, "\n❌ Wrong again, keep at it!")?;
        } else {
            self.line(Color::Red, "\n❌ Wrong")?;
        }
        self.line(Color::Yellow, &format!("   Correct answer: {}", answers[0]))?;
        if answers.len() > 1 {
            let rest: Vec<&str> = answers[1..].iter().map(|s| s.as_str()).collect();
            self.line(
                Color::DarkGrey,
                &format!("   Also accepted: {}", rest.join(", ")),
            )?;
        }
        Ok(())
    }

    /// Unlock notifications, one per newly granted achievement.
    pub fn achievements(&self, unlocked: &[Achievement]) -> io::Result<()> {
        for ach in unlocked {
            self.line(
                Color::Yellow,
                &format!("\n🏆 Achievement unlocked: {}!", ach.title()),
            )?;
        }
        Ok(())
    }

    /// Separator between questions.
    pub fn divider(&self) -> io::Result<()> {
        self.line(Color::DarkGrey, THIN_RULE)
    }

    /// End-of-session report.
    pub fn session_summary(&self, report: &SessionReport, streak: u32) -> io::Result<()> {
        if report.aborted {
            self.line(Color::Yellow, "\nSession ended early.")?;
        } else if report.review {
            self.line(Color::Green, "\n📕 Review practice complete!")?;
        } else {
            self.line(Color::Green, "\n🎉 Practice complete!")?;
        }

        println!(
            "This round: {:.1}% ({}/{}) | streak: {}",
            report.accuracy(),
            report.correct,
            report.attempted,
            streak
        );
        if report.review {
            println!(
                "Cleared {} question(s) from the notebook, {} remaining",
                report.removed, report.remaining
            );
        }
        Ok(())
    }

    /// Full command reference listing.
    pub fn all_commands(&self, catalog: &Catalog) -> io::Result<()> {
        self.clear()?;
        self.line(Color::Cyan, "\n📖 Command Reference\n")?;

        let mut stdout = stdout();
        for cat in catalog.categories() {
            execute!(
                stdout,
                Print("\n"),
                SetForegroundColor(Color::Yellow),
                Print(format!("{} {}\n", cat.icon, cat.name)),
                ResetColor,
                SetForegroundColor(Color::DarkGrey),
                Print(format!("{}\n", THIN_RULE)),
                ResetColor
            )?;
            for cmd in &cat.commands {
                execute!(
                    stdout,
                    Print("  "),
                    SetForegroundColor(Color::Green),
                    Print(format!("{:<12}", cmd.command)),
                    ResetColor,
                    Print(format!(" {}\n", cmd.description))
                )?;
            }
        }
        stdout.flush()?;
        Ok(())
    }

    /// Help screen.
    pub fn help(&self) -> io::Result<()> {
        self.clear()?;
        let help = r#"
╔════════════════════════════════════════════════════════════╗
║                        ❓ Help                             ║
╠════════════════════════════════════════════════════════════╣
║                                                            ║
║  📝 How to practice                                        ║
║  1. Pick a category (or random practice) from the menu     ║
║  2. Read the question, type the command you'd run          ║
║  3. You are told whether it matched, and see the answer    ║
║  4. Several spellings of a command can count as correct    ║
║                                                            ║
║  📕 Review notebook                                        ║
║  • Missed questions land in the notebook automatically     ║
║  • Press [w] in the main menu to open it                   ║
║  • Answer a question correctly there to remove it          ║
║  • Most-missed questions are asked first                   ║
║                                                            ║
║  💡 During a session                                       ║
║  • 'hint' shows the command and example invocations        ║
║  • 'skip' gives up on the current question                 ║
║  • 'quit' returns to the menu                              ║
║  • Extra whitespace is ignored; flag order matters         ║
║                                                            ║
║  🏆 Achievements                                           ║
║  • Beginner / Practice Expert / Terminal Master:           ║
║    10 / 50 / 100 exercises completed                       ║
║  • Streak Rookie / Expert / Master:                        ║
║    5 / 10 / 20 correct answers in a row                    ║
║                                                            ║
╚════════════════════════════════════════════════════════════╝"#;
        self.line(Color::Cyan, help)
    }

    /// Detailed statistics with per-category accuracy bars.
    pub fn stats_detail(
        &self,
        stats: &Stats,
        categories: &BTreeMap<String, Tally>,
        catalog: &Catalog,
    ) -> io::Result<()> {
        self.clear()?;
        self.line(Color::Cyan, "\n📈 Detailed Statistics\n")?;
        self.line(Color::DarkGrey, RULE)?;

        self.line(Color::Yellow, "\nOverall")?;
        println!("  Exercises:   {}", stats.total);
        println!("  Correct:     {}", stats.correct);
        println!("  Accuracy:    {:.1}%", stats.accuracy);
        println!("  Streak:      {}", stats.streak);
        println!("  Best streak: {}", stats.best_streak);

        if !stats.achievements.is_empty() {
            self.line(Color::Yellow, "\n🏆 Achievements")?;
            for ach in &stats.achievements {
                println!("  • {}", ach.title());
            }
        }

        if !categories.is_empty() {
            self.line(Color::Yellow, "\nBy category")?;
            for (id, tally) in categories {
                let name = catalog
                    .category(id)
                    .map(|c| c.name.as_str())
                    .unwrap_or(id.as_str());
                let acc = if tally.total > 0 {
                    tally.correct as f64 / tally.total as f64 * 100.0
                } else {
                    0.0
                };
                let filled = (acc / 5.0) as usize;
                let bar: String = "█".repeat(filled) + &"░".repeat(20 - filled.min(20));
                println!(
                    "  {:<24} [{}] {:.0}% ({}/{})",
                    name, bar, acc, tally.correct, tally.total
                );
            }
        }
        Ok(())
    }

    /// Wrong-answer notebook listing with its action menu.
    pub fn review_list(&self, entries: &[(&str, &WrongEntry)], catalog: &Catalog) -> io::Result<()> {
        self.clear()?;
        self.line(Color::Cyan, "\n📕 Review Notebook\n")?;
        self.line(Color::DarkGrey, RULE)?;

        if entries.is_empty() {
            self.line(Color::Green, "\n🎉 The notebook is empty. Nicely done!")?;
            return Ok(());
        }

        println!("\n{} question(s) to review\n", entries.len());

        let mut stdout = stdout();
        for (i, (_, entry)) in entries.iter().enumerate() {
            let cat_name = catalog
                .category(&entry.category)
                .map(|c| c.name.as_str())
                .unwrap_or(entry.category.as_str());
            execute!(
                stdout,
                Print("  "),
                SetForegroundColor(Color::Cyan),
                Print(format!("{}.", i + 1)),
                ResetColor,
                Print(format!(" [{}] ", cat_name)),
                SetForegroundColor(Color::Green),
                Print(&entry.command),
                ResetColor,
                Print(format!(" - {}\n", entry.question)),
                Print("     "),
                SetForegroundColor(Color::Red),
                Print(format!("missed {}x", entry.wrong_count)),
                ResetColor,
                Print(" | correct answer: "),
                SetForegroundColor(Color::Yellow),
                Print(format!("{}\n", entry.answers[0])),
                ResetColor
            )?;
            if !entry.last_user_answer.is_empty() {
                execute!(
                    stdout,
                    Print("     last answer: "),
                    SetForegroundColor(Color::DarkGrey),
                    Print(format!("{}\n", entry.last_user_answer)),
                    ResetColor
                )?;
            }
            println!();
        }

        self.line(Color::DarkGrey, THIN_RULE)?;
        execute!(
            stdout,
            SetForegroundColor(Color::Green),
            Print("\n  [p]"),
            ResetColor,
            Print(" Practice these questions\n"),
            SetForegroundColor(Color::Green),
            Print("  [c]"),
            ResetColor,
            Print(" Clear the notebook\n"),
            SetForegroundColor(Color::Green),
            Print("  [Enter]"),
            ResetColor,
            Print(" Back to the main menu\n")
        )?;
        Ok(())
    }

    /// One-off notices (confirmations, invalid choices).
    pub fn notice(&self, color: Color, text: &str) -> io::Result<()> {
        self.line(color, text)
    }
}
