use std::path::Path;

use crate::error::{Error, Result};

/// Extension trait for Path to provide convenient string conversion methods
pub trait PathExt {
    /// Converts a path to a string slice, returning an error if the path contains invalid Unicode characters.
    ///
    /// # Examples
    /// ```
    /// use mcpacker::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("test");
    /// assert_eq!(path.to_str_checked().unwrap(), "test");
    /// ```
    fn to_str_checked(&self) -> Result<&str>;

    /// Name of the folder that directly contains this path, if any.
    ///
    /// # Examples
    /// ```
    /// use mcpacker::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("built/servers/lobby-a/server.properties");
    /// assert_eq!(path.folder_name().unwrap(), Some("lobby-a"));
    /// assert_eq!(Path::new("alone.txt").folder_name().unwrap(), None);
    /// ```
    ///
    /// Fails if the folder name is not valid Unicode.
    fn folder_name(&self) -> Result<Option<&str>>;

    /// Relative path rendered with `/` separators, as zip entries expect.
    fn to_entry_name(&self) -> Result<String>;
}

impl PathExt for Path {
    fn to_str_checked(&self) -> Result<&str> {
        self.to_str()
            .ok_or_else(|| Error::InvalidUnicodePath { path: self.display().to_string() })
    }

    fn folder_name(&self) -> Result<Option<&str>> {
        match self.parent().and_then(Path::file_name) {
            Some(name) => Path::new(name).to_str_checked().map(Some),
            None => Ok(None),
        }
    }

    fn to_entry_name(&self) -> Result<String> {
        let parts = self
            .components()
            .map(|c| Path::new(c.as_os_str()).to_str_checked())
            .collect::<Result<Vec<_>>>()?;
        Ok(parts.join("/"))
    }
}
