//! Core error definitions for the Jarvis crew layer.
//!
//! Every Jarvis crate returns [`JarvisResult`] so that failures from the
//! configuration loader, the tool registry, the crew builder and the crew
//! runtime travel through one error type.
//!
//! # Main types
//!
//! - [`JarvisError`] — Unified error enum for all Jarvis subsystems.
//! - [`JarvisResult`] — Convenience alias for `Result<T, JarvisError>`.

// --- Error types ---

/// Top-level error type for the Jarvis crew layer.
///
/// Each variant corresponds to a subsystem that can produce errors.
#[derive(Debug, thiserror::Error)]
pub enum JarvisError {
    /// An error in configuration parsing or validation.
    #[error("Config error: {0}")]
    Config(String),

    /// An error raised while selecting or describing tools.
    #[error("Tool error: {0}")]
    Tool(String),

    /// A crew failed validation (missing agent, empty task list, ...).
    #[error("Crew error: {0}")]
    Crew(String),

    /// The crew runtime rejected or failed a kickoff.
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// An error from an outbound HTTP request to the crew service.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A TOML config file could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`JarvisError`].
pub type JarvisResult<T> = Result<T, JarvisError>;

impl JarvisError {
    /// Short, stable label for the failing subsystem, used in logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            JarvisError::Config(_) => "config",
            JarvisError::Tool(_) => "tool",
            JarvisError::Crew(_) => "crew",
            JarvisError::Runtime(_) => "runtime",
            JarvisError::Http(_) => "http",
            JarvisError::Json(_) => "json",
            JarvisError::Toml(_) => "toml",
            JarvisError::Io(_) => "io",
        }
    }
}
