use super::{scan, Placeholder, PlaceholderKind, ValueResolver};
use crate::error::Result;
use crate::ioutils::{read_file, write_file};
use clap::ValueEnum;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// When a substituted body is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum WriteMode {
    /// Persist after every placeholder path has been applied.
    #[default]
    PerPlaceholder,
    /// Persist once, after the whole body has been substituted.
    Once,
}

impl Display for WriteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WriteMode::PerPlaceholder => "per-placeholder",
            WriteMode::Once => "once",
        };
        write!(f, "{s}")
    }
}

/// Destination for intermediate and final substituted bodies.
pub trait BodySink {
    fn persist(&mut self, body: &str) -> Result<()>;
}

/// Overwrites a file on every persist.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl BodySink for FileSink {
    fn persist(&mut self, body: &str) -> Result<()> {
        log::trace!("Writing {}", self.path.display());
        write_file(body, &self.path)
    }
}

/// Keeps every persisted body in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub snapshots: Vec<String>,
}

impl BodySink for MemorySink {
    fn persist(&mut self, body: &str) -> Result<()> {
        self.snapshots.push(body.to_string());
        Ok(())
    }
}

/// Rewrites placeholder occurrences with resolved values.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstitutionEngine {
    write_mode: WriteMode,
}

impl SubstitutionEngine {
    pub fn new(write_mode: WriteMode) -> Self {
        Self { write_mode }
    }

    /// Substitutes `placeholders` in `body` and returns the result.
    ///
    /// Paths are processed in sorted order. Each path is resolved exactly once,
    /// and every path is resolved before the body is touched, so an unresolvable
    /// path fails without anything reaching `sink`. For a single path the quoted
    /// numeric form is replaced before the text form. Values are inserted
    /// literally.
    pub fn apply(
        &self,
        body: &str,
        placeholders: &BTreeSet<Placeholder>,
        resolver: &dyn ValueResolver,
        sink: &mut dyn BodySink,
    ) -> Result<String> {
        let mut by_path: BTreeMap<&str, Vec<PlaceholderKind>> = BTreeMap::new();
        for placeholder in placeholders {
            by_path.entry(placeholder.path.as_str()).or_default().push(placeholder.kind);
        }

        let resolved = by_path
            .into_iter()
            .map(|(path, kinds)| -> Result<_> { Ok((path, resolver.resolve(path)?, kinds)) })
            .collect::<Result<Vec<_>>>()?;

        let mut current = body.to_string();
        for (path, value, kinds) in &resolved {
            for kind in kinds {
                let pattern = Placeholder::new(*path, *kind).pattern();
                current = current.replace(&pattern, value);
            }
            log::debug!("Applied placeholder [{path}]");

            if self.write_mode == WriteMode::PerPlaceholder {
                sink.persist(&current)?;
            }
        }

        if self.write_mode == WriteMode::Once && !resolved.is_empty() {
            sink.persist(&current)?;
        }

        Ok(current)
    }

    /// Scans a file and substitutes its placeholders in place.
    ///
    /// Returns the number of placeholders applied. Files without placeholders
    /// are left untouched.
    pub fn apply_to_file<P: AsRef<Path>>(
        &self,
        path: P,
        resolver: &dyn ValueResolver,
    ) -> Result<usize> {
        let path = path.as_ref();
        let body = read_file(path)?;
        let placeholders = scan(&body);
        if placeholders.is_empty() {
            return Ok(0);
        }

        log::debug!("Substituting {} placeholder(s) in {}", placeholders.len(), path.display());
        let mut sink = FileSink::new(path);
        self.apply(&body, &placeholders, resolver, &mut sink)?;
        Ok(placeholders.len())
    }
}
