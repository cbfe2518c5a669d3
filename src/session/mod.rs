//! Session Management: exercise sources and the interactive run loop
//!
//! # Components
//! - `source.rs`: SessionPlan builders (category, random, review)
//! - `engine.rs`: SessionEngine state machine and SessionReport

pub mod engine;
pub mod source;

pub use engine::{AnswerSource, SessionEngine, SessionReport};
pub use source::{category_plan, random_plan, review_plan, SessionPlan};
