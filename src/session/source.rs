//! Exercise sources for a practice run
//!
//! A session consumes a `SessionPlan`: an ordered list of items drawn from
//! one of three sources. Category and random plans are shuffled once at
//! build time; the review plan keeps the registry's wrong-count order so
//! the most-missed items surface first.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::Catalog;
use crate::progress::ProgressStore;

/// One exercise as presented during a session.
#[derive(Clone, Debug)]
pub struct SessionItem {
    pub category_id: String,
    pub category_name: String,
    pub command: String,
    pub description: Option<String>,
    pub examples: Vec<String>,
    pub question: String,
    pub answers: Vec<String>,
    /// Registry key, set when replaying from the wrong-answer registry.
    /// A correct answer removes that entry.
    pub registry_key: Option<String>,
    /// How often this item has been missed (review plans only).
    pub wrong_count: u32,
}

/// An ordered run of exercises plus the replay policy.
#[derive(Clone, Debug)]
pub struct SessionPlan {
    pub title: String,
    pub review: bool,
    pub items: Vec<SessionItem>,
}

/// All exercises under one category, shuffled. `None` for an unknown id.
pub fn category_plan(catalog: &Catalog, category_id: &str, rng: &mut impl Rng) -> Option<SessionPlan> {
    let category = catalog.category(category_id)?;

    let mut items: Vec<SessionItem> = category
        .commands
        .iter()
        .flat_map(|cmd| {
            cmd.exercises.iter().map(move |ex| SessionItem {
                category_id: category.id.clone(),
                category_name: category.name.clone(),
                command: cmd.command.clone(),
                description: Some(cmd.description.clone()),
                examples: cmd.examples.clone(),
                question: ex.question.clone(),
                answers: ex.answers.clone(),
                registry_key: None,
                wrong_count: 0,
            })
        })
        .collect();
    items.shuffle(rng);

    Some(SessionPlan {
        title: format!("{} {} - Practice", category.icon, category.name),
        review: false,
        items,
    })
}

/// A uniform sample of `count` exercises across the whole catalog.
pub fn random_plan(catalog: &Catalog, count: usize, rng: &mut impl Rng) -> SessionPlan {
    let mut items: Vec<SessionItem> = catalog
        .categories()
        .iter()
        .flat_map(|cat| {
            cat.commands.iter().flat_map(move |cmd| {
                cmd.exercises.iter().map(move |ex| SessionItem {
                    category_id: cat.id.clone(),
                    category_name: cat.name.clone(),
                    command: cmd.command.clone(),
                    description: Some(cmd.description.clone()),
                    examples: cmd.examples.clone(),
                    question: ex.question.clone(),
                    answers: ex.answers.clone(),
                    registry_key: None,
                    wrong_count: 0,
                })
            })
        })
        .collect();

    // Shuffle everything, keep the first `count`: a sample without
    // replacement.
    items.shuffle(rng);
    items.truncate(count);

    SessionPlan {
        title: format!("🎲 Random Practice ({} questions)", items.len()),
        review: false,
        items,
    }
}

/// The wrong-answer registry, most-missed first. Answers come from the
/// denormalized entry; examples and the category name are re-resolved
/// from the catalog when still present.
pub fn review_plan(store: &ProgressStore, catalog: &Catalog) -> SessionPlan {
    let items: Vec<SessionItem> = store
        .wrong_exercises()
        .into_iter()
        .map(|(key, entry)| {
            let category_name = catalog
                .category(&entry.category)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| entry.category.clone());
            let cmd = catalog.command(&entry.category, &entry.command);
            SessionItem {
                category_id: entry.category.clone(),
                category_name,
                command: entry.command.clone(),
                description: cmd.map(|c| c.description.clone()),
                examples: cmd.map(|c| c.examples.clone()).unwrap_or_default(),
                question: entry.question.clone(),
                answers: entry.answers.clone(),
                registry_key: Some(key.to_string()),
                wrong_count: entry.wrong_count,
            }
        })
        .collect();

    SessionPlan {
        title: format!("📕 Review Practice ({} questions)", items.len()),
        review: true,
        items,
    }
}
