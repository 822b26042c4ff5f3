//! Placeholder handling for template bodies
//!
//! This module contains the substitution components:
//! - `scanner`: Finds placeholder occurrences in a body
//! - `resolver`: Maps placeholder paths to concrete values
//! - `engine`: Rewrites bodies with resolved values

pub mod engine;
pub mod resolver;
pub mod scanner;

use crate::constants::tokens::{NUMBER_SUFFIX, TEXT_PREFIX, TEXT_SUFFIX};

pub use engine::{BodySink, FileSink, MemorySink, SubstitutionEngine, WriteMode};
pub use resolver::{generate_random_string, SettingsResolver, ValueResolver};
pub use scanner::scan;

/// Syntactic form a placeholder was written in.
///
/// `Number` sorts before `Text` so the quoted numeric form of a path is
/// rewritten before its bare text form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlaceholderKind {
    /// `"$(mcp.<path>)(number)"`, quotes included
    Number,
    /// `$(mcp.<path>)`
    Text,
}

/// One placeholder occurrence, identified by path and kind.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Placeholder {
    pub path: String,
    pub kind: PlaceholderKind,
}

impl Placeholder {
    pub fn new(path: impl Into<String>, kind: PlaceholderKind) -> Self {
        Self { path: path.into(), kind }
    }

    pub fn text(path: impl Into<String>) -> Self {
        Self::new(path, PlaceholderKind::Text)
    }

    pub fn number(path: impl Into<String>) -> Self {
        Self::new(path, PlaceholderKind::Number)
    }

    /// The exact literal this placeholder occupies in a body.
    pub fn pattern(&self) -> String {
        match self.kind {
            PlaceholderKind::Text => format!("{TEXT_PREFIX}{}{TEXT_SUFFIX}", self.path),
            PlaceholderKind::Number => {
                format!("\"{TEXT_PREFIX}{}{TEXT_SUFFIX}{NUMBER_SUFFIX}\"", self.path)
            }
        }
    }
}
