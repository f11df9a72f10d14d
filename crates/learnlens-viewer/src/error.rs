//! Error types for the LearnLens viewer.
//!
//! This module defines the error hierarchy for viewer operations: configuration
//! loading, topic submission, and the learning path request. Navigation and quiz
//! guards are not errors; they surface as outcome values instead.

use std::path::PathBuf;

/// A specialized `Result` type for viewer operations.
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Message shown to the learner whenever a learning path request fails.
pub const LINK_INTERRUPTED_MESSAGE: &str =
    "Learning path link interrupted. Resubmit the topic to try again.";

/// Errors that can occur while driving the viewer.
///
/// Variants carry an actionable suggestion where the user can do something
/// about the failure.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid JSON syntax in configuration file.
    #[error("Invalid JSON in config file '{path}': {message}\n\nSuggestion: Validate your learnlens.json with a JSON linter")]
    ConfigParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Description of the parse error.
        message: String,
    },

    /// Configuration validation failed.
    #[error("Invalid configuration: {message}\n\nSuggestion: {suggestion}")]
    ConfigValidationError {
        /// Description of the validation failure.
        message: String,
        /// Actionable suggestion for the user.
        suggestion: String,
    },

    // ========================================================================
    // Submission Errors
    // ========================================================================
    /// The topic was empty after trimming.
    #[error("Topic must not be empty\n\nSuggestion: Enter a subject to learn, e.g. 'Docker'")]
    EmptyTopic,

    /// A learning path request is already pending.
    #[error("A learning path is already being generated\n\nSuggestion: Wait for the current request to finish")]
    RequestInFlight,

    // ========================================================================
    // Transport Errors
    // ========================================================================
    /// The generation request failed or returned a non-success status.
    ///
    /// The display text is the same for every cause; `cause`
    /// is kept for logs.
    #[error("Learning path link interrupted. Resubmit the topic to try again.")]
    LinkInterrupted {
        /// What went wrong underneath.
        cause: TransportCause,
    },

    /// The backend answered successfully but the path held no modules.
    #[error("The generated learning path for '{topic}' has no modules\n\nSuggestion: Try a broader topic or a different level")]
    EmptyPath {
        /// Topic echoed back by the backend.
        topic: String,
    },
}

/// Underlying cause of a [`ViewerError::LinkInterrupted`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCause {
    /// The request never produced a response (connection refused, DNS, ...).
    Network(String),
    /// The backend answered with a non-success HTTP status.
    Status(u16),
    /// The response body was not a learning path.
    Decode(String),
    /// A local path source could not be read.
    Source(String),
}

impl std::fmt::Display for TransportCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(detail) => write!(f, "network: {detail}"),
            Self::Status(code) => write!(f, "status {code}"),
            Self::Decode(detail) => write!(f, "decode: {detail}"),
            Self::Source(detail) => write!(f, "source: {detail}"),
        }
    }
}

impl ViewerError {
    /// Creates a new `ConfigParseError` with the given path and message.
    #[must_use]
    pub fn config_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new `ConfigValidationError` with the given message and suggestion.
    #[must_use]
    pub fn config_validation(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::ConfigValidationError {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Creates a new `LinkInterrupted` error.
    #[must_use]
    pub const fn link_interrupted(cause: TransportCause) -> Self {
        Self::LinkInterrupted { cause }
    }

    /// Creates a new `EmptyPath` error.
    #[must_use]
    pub fn empty_path(topic: impl Into<String>) -> Self {
        Self::EmptyPath {
            topic: topic.into(),
        }
    }

    /// Returns `true` if this error ends a request in the `Failed` state.
    ///
    /// Submission guards (`EmptyTopic`, `RequestInFlight`) reject before any
    /// request starts and never reach the learner as a failure message.
    #[must_use]
    pub const fn is_request_failure(&self) -> bool {
        matches!(
            self,
            Self::LinkInterrupted { .. } | Self::EmptyPath { .. }
        )
    }

    /// Returns `true` if the learner can carry on after this error.
    ///
    /// Configuration errors stop the viewer before a session starts.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::ConfigParseError { .. } | Self::ConfigValidationError { .. }
        )
    }
}
