//! CLI Interface: User input and terminal rendering
//!
//! # Components
//! - `input.rs`: Line-based prompting on stdin
//! - `display.rs`: Terminal rendering and UI

pub mod display;
pub mod input;
