//! Unified error types for ev-advisor.
//!
//! The library distinguishes dataset ingestion failures from report
//! generation failures, keeping path and column context attached so CLI
//! messages stay actionable.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for ev-advisor operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AdvisorError {
    /// Errors while loading or decoding the registration dataset
    #[error("Failed to load dataset: {context}")]
    Dataset {
        context: String,
        #[source]
        source: DatasetErrorKind,
    },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific dataset error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DatasetErrorKind {
    #[error("CSV decoding error: {0}")]
    Csv(String),

    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    #[error("Dataset has no header row")]
    MissingHeader,
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("JSON serialization failed: {0}")]
    JsonSerialization(String),

    #[error("Output format not supported for this operation: {0}")]
    UnsupportedFormat(String),
}

/// Convenient Result type for ev-advisor operations
pub type Result<T> = std::result::Result<T, AdvisorError>;

impl AdvisorError {
    /// Create a dataset error with context
    pub fn dataset(context: impl Into<String>, source: DatasetErrorKind) -> Self {
        Self::Dataset {
            context: context.into(),
            source,
        }
    }

    /// Create a report error with context
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<std::io::Error> for AdvisorError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<csv::Error> for AdvisorError {
    fn from(err: csv::Error) -> Self {
        Self::dataset(
            "CSV decoding",
            DatasetErrorKind::Csv(err.to_string()),
        )
    }
}

impl From<serde_json::Error> for AdvisorError {
    fn from(err: serde_json::Error) -> Self {
        Self::report(
            "JSON serialization",
            ReportErrorKind::JsonSerialization(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context,
/// creating a chain that shows the path through the code.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (lazy evaluation).
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<AdvisorError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: AdvisorError, new_ctx: &str) -> AdvisorError {
    match err {
        AdvisorError::Dataset {
            context: existing,
            source,
        } => AdvisorError::Dataset {
            context: chain_context(new_ctx, &existing),
            source,
        },
        AdvisorError::Report {
            context: existing,
            source,
        } => AdvisorError::Report {
            context: chain_context(new_ctx, &existing),
            source,
        },
        AdvisorError::Io {
            path,
            message,
            source,
        } => AdvisorError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        AdvisorError::Config(msg) => AdvisorError::Config(chain_context(new_ctx, &msg)),
        AdvisorError::Validation(msg) => AdvisorError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
