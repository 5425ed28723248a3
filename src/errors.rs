//! Structured error handling for the Clinsight runtime
//!
//! All fallible operations in the crate funnel through [`ClinsightError`]
//! so the web layer can map failures onto HTTP status codes in one place.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Main error type for the Clinsight runtime
#[derive(Error, Debug)]
pub enum ClinsightError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database operation failed: {operation} - {source}")]
    Database {
        operation: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Authentication error: {message}")]
    Auth { message: String },

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Model error: {model} - {message}")]
    Model { model: String, message: String },

    #[error("Mutex lock failed: {resource}")]
    MutexPoisoned { resource: String },

    #[error("I/O operation failed: {operation}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Resource not found: {resource} - {id}")]
    NotFound { resource: String, id: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Type alias for Result with ClinsightError
pub type ClinsightResult<T> = Result<T, ClinsightError>;

impl ClinsightError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a database error
    pub fn database(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Database {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Create a serialization error
    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }

    /// Create an authentication error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a model error
    pub fn model(model: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Model {
            model: model.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl IntoResponse for ClinsightError {
    fn into_response(self) -> Response {
        let status = match self {
            ClinsightError::Config { .. }
            | ClinsightError::Serialization { .. }
            | ClinsightError::Validation { .. } => StatusCode::BAD_REQUEST,
            ClinsightError::Auth { .. } => StatusCode::UNAUTHORIZED,
            ClinsightError::NotFound { .. } => StatusCode::NOT_FOUND,
            // Default to 500 for server-side failures
            ClinsightError::Database { .. }
            | ClinsightError::Model { .. }
            | ClinsightError::MutexPoisoned { .. }
            | ClinsightError::Io { .. }
            | ClinsightError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = axum::Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Helper trait for safe mutex operations
///
/// Returns a proper error on a poisoned lock instead of panicking.
pub trait SafeLock<T: ?Sized> {
    /// Safely lock a mutex, returning a ClinsightError on poison
    fn safe_lock(&self) -> ClinsightResult<std::sync::MutexGuard<'_, T>>;
}

impl<T: ?Sized> SafeLock<T> for std::sync::Mutex<T> {
    fn safe_lock(&self) -> ClinsightResult<std::sync::MutexGuard<'_, T>> {
        self.lock().map_err(|_| ClinsightError::MutexPoisoned {
            resource: "generic_mutex".to_string(),
        })
    }
}

/// Convert from sled errors
impl From<sled::Error> for ClinsightError {
    fn from(err: sled::Error) -> Self {
        ClinsightError::database("sled_operation", err)
    }
}

/// Convert from serde_json errors
impl From<serde_json::Error> for ClinsightError {
    fn from(err: serde_json::Error) -> Self {
        ClinsightError::serialization("json_operation", err)
    }
}

/// Convert from std::io errors
impl From<std::io::Error> for ClinsightError {
    fn from(err: std::io::Error) -> Self {
        ClinsightError::io("io_operation", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = ClinsightError::config("Missing configuration file");
        assert!(config_err.to_string().contains("Configuration error"));

        let validation_err = ClinsightError::validation("Glucose", "field is required");
        assert!(validation_err.to_string().contains("Glucose"));
    }

    #[test]
    fn test_error_chaining() {
        use std::error::Error;

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err = ClinsightError::io("reading model artifact", io_err);

        assert!(err.source().is_some());
        assert!(err.to_string().contains("I/O operation failed"));
    }
}
