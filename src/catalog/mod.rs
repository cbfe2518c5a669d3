//! Exercise catalog: categories, commands and their exercises
//!
//! The catalog is read-only reference data. It is loaded once at startup,
//! either from an external JSON file or from the builtin database embedded
//! in the binary, then shared by reference into the session layer.

use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Builtin command database, embedded at compile time.
const BUILTIN_DB: &str = include_str!("../../data/commands.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate category id '{0}'")]
    DuplicateCategory(String),
    #[error("exercise '{question}' has no accepted answers")]
    EmptyAnswers { question: String },
}

/// One practice question with its accepted answers.
///
/// The first answer is the canonical form shown to the user; the rest are
/// alternate spellings that also count as correct.
#[derive(Clone, Debug, Deserialize)]
pub struct Exercise {
    pub question: String,
    pub answers: Vec<String>,
}

/// A command (or shell operator) with usage examples and exercises.
#[derive(Clone, Debug, Deserialize)]
pub struct CommandSpec {
    pub command: String,
    pub description: String,
    pub examples: Vec<String>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

/// A named group of related commands, the unit of category practice.
#[derive(Clone, Debug, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub commands: Vec<CommandSpec>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    categories: Vec<Category>,
}

/// Immutable, id-indexed command catalog.
#[derive(Debug)]
pub struct Catalog {
    categories: Vec<Category>,
    index: FxHashMap<String, usize>,
}

impl Catalog {
    /// Load the catalog from an external JSON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load the builtin command database.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_DB)
    }

    fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;

        let mut index = FxHashMap::default();
        for (i, cat) in file.categories.iter().enumerate() {
            if index.insert(cat.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateCategory(cat.id.clone()));
            }
            for cmd in &cat.commands {
                for ex in &cmd.exercises {
                    if ex.answers.is_empty() {
                        return Err(CatalogError::EmptyAnswers {
                            question: ex.question.clone(),
                        });
                    }
                }
            }
        }

        Ok(Catalog {
            categories: file.categories,
            index,
        })
    }

    /// All categories, in catalog order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by id.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.index.get(id).map(|&i| &self.categories[i])
    }

    /// Look up a command within a category.
    pub fn command(&self, category_id: &str, command_id: &str) -> Option<&CommandSpec> {
        self.category(category_id)?
            .commands
            .iter()
            .find(|c| c.command == command_id)
    }

    /// Total number of exercises across all categories.
    pub fn exercise_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| &c.commands)
            .map(|c| c.exercises.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_parses() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.categories().is_empty());
        assert!(catalog.exercise_count() > 0);
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::builtin().unwrap();
        let cat = catalog.category("file_operations").unwrap();
        assert_eq!(cat.name, "File Operations");

        let cmd = catalog.command("file_operations", "ls").unwrap();
        assert!(!cmd.examples.is_empty());
        assert!(catalog.command("file_operations", "nope").is_none());
        assert!(catalog.category("nope").is_none());
    }

    #[test]
    fn test_rejects_empty_answer_list() {
        let json = r#"{"categories": [{"id": "c", "name": "C", "icon": "x",
            "commands": [{"command": "ls", "description": "d", "examples": [],
            "exercises": [{"question": "q", "answers": []}]}]}]}"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::EmptyAnswers { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_category() {
        let json = r#"{"categories": [
            {"id": "c", "name": "A", "icon": "x", "commands": []},
            {"id": "c", "name": "B", "icon": "y", "commands": []}]}"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::DuplicateCategory(_))
        ));
    }
}
