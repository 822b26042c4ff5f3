use crate::constants::{SECRET_CHARSET, SECRET_LENGTH, SECRET_SENTINEL};
use crate::error::{Error, Result};
use crate::settings::{json_kind, SettingsDocument};
use rand::Rng;
use serde_json::Value;

/// Maps a placeholder path to the text that replaces it.
pub trait ValueResolver {
    /// Resolves `path` (relative to `placeholder.data`) to its replacement.
    fn resolve(&self, path: &str) -> Result<String>;
}

/// Resolves placeholders against a parsed settings document.
pub struct SettingsResolver<'a> {
    settings: &'a SettingsDocument,
}

impl<'a> SettingsResolver<'a> {
    pub fn new(settings: &'a SettingsDocument) -> Self {
        Self { settings }
    }
}

impl ValueResolver for SettingsResolver<'_> {
    fn resolve(&self, path: &str) -> Result<String> {
        let full_path = SettingsDocument::data_path(path);
        let value = self.settings.get_by_path(&full_path)?;

        let text = match value {
            Value::String(s) if s == SECRET_SENTINEL => {
                log::debug!("Generating secret for [{path}]");
                return generate_random_string(SECRET_LENGTH);
            }
            Value::String(s) => s.clone(),
            // Keeps the source spelling, e.g. `1.50` or `1e3`.
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => {
                return Err(not_scalar(&full_path, json_kind(value)))
            }
        };
        Ok(text)
    }
}

fn not_scalar(path: &str, found: &'static str) -> Error {
    log::error!("Value at path [{path}] is {found} and cannot be substituted");
    Error::NotScalar { path: path.to_string(), found }
}

/// Generates a random alphanumeric string of `length` characters.
///
/// Characters are drawn uniformly from `[A-Za-z0-9]` using the thread-local
/// CSPRNG.
pub fn generate_random_string(length: usize) -> Result<String> {
    if length == 0 {
        return Err(Error::InvalidLength { length });
    }

    let mut rng = rand::rng();
    Ok((0..length)
        .map(|_| SECRET_CHARSET[rng.random_range(0..SECRET_CHARSET.len())] as char)
        .collect())
}
