use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to walk directory. Original error: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Failed to write archive. Original error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Failed to parse settings document. Original error: {0}")]
    SettingsParse(#[from] serde_json::Error),

    /// The settings body is valid JSON but its root is not an object.
    #[error("Settings document root must be an object, found {found}.")]
    SettingsRootNotObject { found: &'static str },

    #[error("Settings document must contain a 'placeholder' section.")]
    MissingPlaceholderSection,

    /// A path walked through a node that is not an object.
    #[error("Invalid structure for path '{path}': expected an object at key '{segment}'.")]
    InvalidStructure { segment: String, path: String },

    #[error("Path '{path}' not found in settings document.")]
    PathNotFound { path: String },

    /// The leaf exists but has no textual form (object, array or null).
    #[error("Value at path '{path}' is {found}, expected a string, number or boolean.")]
    NotScalar { path: String, found: &'static str },

    #[error("Random string length must be positive, got {length}.")]
    InvalidLength { length: usize },

    #[error("Path '{path}' contains invalid Unicode characters.")]
    InvalidUnicodePath { path: String },

    #[error("The provided path is not a directory: '{path}'.")]
    NotADirectory { path: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias for Results with the crate error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
