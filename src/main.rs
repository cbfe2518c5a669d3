//! TermTrainer - interactive terminal command drills
//!
//! Presents short "produce the command that does X" questions, judges the
//! typed answer against the accepted forms, and tracks mastery over time:
//! totals, streaks, achievements and a wrong-answer notebook that
//! resurfaces missed questions until they are answered correctly.

mod catalog;
mod cli;
mod matcher;
mod progress;
mod session;

use clap::Parser;
use crossterm::style::Color;
use rand::thread_rng;
use std::error::Error;
use std::path::PathBuf;

use catalog::Catalog;
use cli::display::Display;
use cli::input::LineInput;
use progress::ProgressStore;
use session::{SessionEngine, SessionPlan};

const RETURN_PROMPT: &str = "\nPress Enter to return to the main menu...";

#[derive(Parser, Debug)]
#[command(name = "TermTrainer")]
#[command(about = "Terminal command practice drills with progress tracking")]
struct Args {
    /// Data directory for progress state (default: ~/.termtrainer)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// External command catalog (JSON); the builtin database when omitted
    #[arg(short, long)]
    commands: Option<PathBuf>,

    /// Number of questions in a random practice round
    #[arg(short = 'n', long, default_value = "10")]
    count: usize,
}

fn data_dir(args: &Args) -> Result<PathBuf, Box<dyn Error>> {
    if let Some(dir) = &args.data_dir {
        return Ok(dir.clone());
    }
    let home = dirs::home_dir().ok_or("could not determine the home directory")?;
    Ok(home.join(".termtrainer"))
}

/// Load the catalog from `--commands` when given, with a builtin fallback.
fn load_catalog(args: &Args) -> Result<Catalog, Box<dyn Error>> {
    if let Some(path) = &args.commands {
        match Catalog::load(path) {
            Ok(catalog) => return Ok(catalog),
            Err(e) => {
                eprintln!(
                    "⚠ Could not load {}: {} (using builtin catalog)",
                    path.display(),
                    e
                );
            }
        }
    }
    Ok(Catalog::builtin()?)
}

fn run_session(
    store: &mut ProgressStore,
    display: &Display,
    input: &mut LineInput,
    plan: &SessionPlan,
) -> Result<(), Box<dyn Error>> {
    if plan.items.is_empty() {
        display.notice(Color::Yellow, "No exercises here yet")?;
        input.pause(RETURN_PROMPT)?;
        return Ok(());
    }

    let mut engine = SessionEngine::new(store, display, input);
    engine.run(plan)?;

    input.pause(RETURN_PROMPT)?;
    Ok(())
}

/// The review notebook view with its practice / clear actions.
fn review_notebook(
    catalog: &Catalog,
    store: &mut ProgressStore,
    display: &Display,
    input: &mut LineInput,
) -> Result<(), Box<dyn Error>> {
    {
        let entries = store.wrong_exercises();
        display.review_list(&entries, catalog)?;
        if entries.is_empty() {
            input.pause(RETURN_PROMPT)?;
            return Ok(());
        }
    }

    let choice = match input.read_line("\nChoose > ")? {
        Some(c) => c.trim().to_lowercase(),
        None => return Ok(()),
    };

    match choice.as_str() {
        "p" => {
            let plan = session::review_plan(store, catalog);
            run_session(store, display, input, &plan)?;
        }
        "c" => {
            let confirm = input.read_line("Really clear the notebook? (y/n) > ")?;
            if confirm.as_deref().map(str::trim) == Some("y") {
                store.clear_wrong_answers()?;
                display.notice(Color::Green, "\n✅ Notebook cleared")?;
                input.pause(RETURN_PROMPT)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let catalog = load_catalog(&args)?;
    let mut store = ProgressStore::open(&data_dir(&args)?)?;
    let display = Display::new()?;
    let mut input = LineInput::new();

    loop {
        display.clear()?;
        display.banner()?;
        display.menu(&catalog, &store.stats(), store.wrong_exercises().len())?;

        let choice = match input.read_line("Choose > ")? {
            Some(c) => c.trim().to_lowercase(),
            None => break,
        };

        match choice.as_str() {
            "q" => break,
            "a" => {
                display.all_commands(&catalog)?;
                input.pause(RETURN_PROMPT)?;
            }
            "r" => {
                let plan = session::random_plan(&catalog, args.count, &mut thread_rng());
                run_session(&mut store, &display, &mut input, &plan)?;
            }
            "w" => review_notebook(&catalog, &mut store, &display, &mut input)?,
            "s" => {
                display.stats_detail(
                    &store.stats(),
                    &store.state().categories_completed,
                    &catalog,
                )?;
                input.pause(RETURN_PROMPT)?;
            }
            "h" => {
                display.help()?;
                input.pause(RETURN_PROMPT)?;
            }
            "" => continue,
            other => {
                let plan = other.parse::<usize>().ok().and_then(|n| {
                    let id = &catalog.categories().get(n.checked_sub(1)?)?.id;
                    session::category_plan(&catalog, id, &mut thread_rng())
                });
                match plan {
                    Some(plan) => run_session(&mut store, &display, &mut input, &plan)?,
                    None => {
                        display.notice(Color::Red, "Invalid choice, try again")?;
                        input.pause("Press Enter to continue...")?;
                    }
                }
            }
        }
    }

    println!("\n👋 Bye! Keep practicing those commands!");
    Ok(())
}
