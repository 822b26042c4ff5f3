/// Handles argument parsing and the CLI entry point.
pub mod cli;

/// Defines custom error types.
pub mod error;

/// Constants shared across modules.
pub mod constants;

/// Extension traits for standard library types.
pub mod ext;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// Settings document parsing and path lookup.
pub mod settings;

/// Placeholder scanning, resolution and substitution.
pub mod placeholder;

/// Selects build files by containing folder suffix.
pub mod filter;

/// Zip backups.
pub mod archive;

/// Build orchestration.
pub mod pipeline;
