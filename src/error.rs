use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Invalid path provided by the user.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// The tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(String),
}

/// Reasons a file cannot be shown in the viewer.
///
/// These are terminal for a single viewer instance only; the browser keeps running.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file too large ({size} bytes, max {limit} bytes)")]
    TooLarge { size: u64, limit: u64 },

    #[error("binary file")]
    Binary,

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Highlighter failures. Never shown to the user; the viewer falls back to plain text.
#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("syntax highlighting failed: {0}")]
    Syntect(#[from] syntect::Error),

    #[error("no syntax definition for {0}")]
    NoSyntax(String),
}
