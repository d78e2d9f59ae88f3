//! Application error types with rich context
//!
//! User-facing validation failures are not errors: they are reported as
//! [`FieldError`](crate::validation::FieldError) values. This type covers the
//! infrastructure around the form layer (config files, replay scripts, the
//! browser host).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(#[from] toml::de::Error),

    // ─────────────────────────────────────────────────────────────
    // Replay Script Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Replay script error on line {line}: {message}")]
    Script { line: usize, message: String },

    // ─────────────────────────────────────────────────────────────
    // Browser Host Errors
    // ─────────────────────────────────────────────────────────────
    #[error("DOM error: {message}")]
    Dom { message: String },

    #[error("Element not registered: {kind} #{id}")]
    UnknownElement { kind: &'static str, id: u32 },

    #[error("Clipboard error: {message}")]
    Clipboard { message: String },

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn script(line: usize, message: impl Into<String>) -> Self {
        Self::Script {
            line,
            message: message.into(),
        }
    }

    pub fn dom(message: impl Into<String>) -> Self {
        Self::Dom {
            message: message.into(),
        }
    }

    pub fn unknown_element(kind: &'static str, id: u32) -> Self {
        Self::UnknownElement { kind, id }
    }

    pub fn clipboard(message: impl Into<String>) -> Self {
        Self::Clipboard {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    ///
    /// Host-side failures only ever leave a stale UI element behind, so the
    /// page keeps running after them.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Dom { .. } | Error::UnknownElement { .. } | Error::Clipboard { .. }
        )
    }

    /// Check if this error should abort the CLI
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::ConfigNotFound { .. } | Error::ConfigInvalid(_) | Error::Script { .. }
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::dom("textarea could not be created");
        assert_eq!(err.to_string(), "DOM error: textarea could not be created");

        let err = Error::unknown_element("field", 7);
        assert_eq!(err.to_string(), "Element not registered: field #7");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Value>("[hints").unwrap_err();
        let err: Error = toml_err.into();
        assert!(matches!(err, Error::ConfigInvalid(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_error_is_recoverable() {
        assert!(Error::dom("detached").is_recoverable());
        assert!(Error::clipboard("denied").is_recoverable());
        assert!(!Error::script(3, "bad json").is_recoverable());
    }

    #[test]
    fn test_script_error_mentions_line() {
        let err = Error::script(12, "unknown step");
        assert!(err.to_string().contains("line 12"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_context_preserves_error() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "nope",
        ));
        let err = result.context("reading config").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
