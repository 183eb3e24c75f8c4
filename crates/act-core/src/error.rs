//! Error types for the ACT application.

use std::time::Duration;
use thiserror::Error;

/// A shared error type for configuration, storage, and wiring failures.
///
/// Scene generation has its own taxonomy in [`GenerationError`]; those
/// errors are absorbed by the provider and never surface here.
#[derive(Error, Debug, Clone)]
pub enum ActError {
    #[error("{entity_type} not found: '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    #[error("IO error: {message}")]
    Io { message: String },

    /// A file or payload that could not be encoded or decoded.
    #[error("{format} error: {message}")]
    Serialization { format: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ActError {
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<std::io::Error> for ActError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<serde_json::Error> for ActError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ActError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ActError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for ActError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, ActError>`.
pub type Result<T> = std::result::Result<T, ActError>;

/// Everything that can go wrong while producing a scene.
///
/// The scene provider collapses every variant into a usable fallback scene;
/// the store only ever sees one when a [`crate::scene::SceneSource`] other
/// than the provider chooses to report it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// Transport failure or non-success HTTP status (including rate limiting).
    #[error("Network failure: {message}")]
    NetworkFailure {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
        retry_after: Option<Duration>,
    },

    /// The far end answered, but nothing usable could be extracted.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The catalog has no entry for the requested mode (nor for solo).
    #[error("No catalog entry for mode '{0}'")]
    NoMatchingCatalogEntry(String),

    /// No generative service is configured (for example, no API key).
    #[error("Generative service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Unknown generation error: {0}")]
    Unknown(String),
}

impl GenerationError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkFailure {
            status_code: None,
            message: message.into(),
            is_retryable: false,
            retry_after: None,
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Whether a later attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::NetworkFailure { is_retryable, .. } => *is_retryable,
            _ => false,
        }
    }

    /// Returns true for HTTP 429 responses.
    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            Self::NetworkFailure {
                status_code: Some(429),
                ..
            }
        )
    }

    /// Server-suggested wait before the next attempt, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::NetworkFailure { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion_keeps_message() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ActError = io.into();
        match err {
            ActError::Io { message } => assert_eq!(message, "gone"),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err: ActError = parse_err.into();
        assert!(matches!(err, ActError::Serialization { ref format, .. } if format == "JSON"));
    }

    #[test]
    fn test_rate_limited_is_detected() {
        let err = GenerationError::NetworkFailure {
            status_code: Some(429),
            message: "slow down".into(),
            is_retryable: true,
            retry_after: Some(Duration::from_secs(3)),
        };
        assert!(err.is_rate_limited());
        assert!(err.is_retryable());
        assert_eq!(err.retry_after(), Some(Duration::from_secs(3)));
        assert!(!GenerationError::malformed("x").is_retryable());
        assert_eq!(GenerationError::network("down").retry_after(), None);
    }
}
