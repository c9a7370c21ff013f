/**
 * Backend Error Types
 *
 * This module defines the error taxonomy for the hub. Each variant carries
 * the failure-isolation contract it participates in:
 *
 * - `Protocol` errors are answered with a direct error reply and the
 *   connection stays open.
 * - `Delivery` errors mark one broken peer; the hub schedules a deferred
 *   disconnect for it and never surfaces the failure to other recipients.
 * - `ConnectionFatal` errors terminate exactly one connection.
 * - `Storage` errors are returned to the REST caller as a structured
 *   failure response.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Hub-specific error types
///
/// Each variant maps to a recovery path; see the module docs for the
/// isolation contract per variant.
#[derive(Debug, Error)]
pub enum HubError {
    /// Malformed inbound frame (e.g. invalid JSON)
    #[error("Protocol error: {message}")]
    Protocol {
        /// Human-readable error message
        message: String,
    },

    /// Send to a single peer failed during fan-out or a direct reply
    #[error("Delivery error: {message}")]
    Delivery {
        /// Human-readable error message
        message: String,
    },

    /// Unrecoverable failure while servicing one connection
    #[error("Connection error: {message}")]
    ConnectionFatal {
        /// Human-readable error message
        message: String,
    },

    /// Persistence gateway failure
    #[error("Storage error: {message}")]
    Storage {
        /// Human-readable error message
        message: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HubError {
    /// Create a new protocol error
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Create a new delivery error
    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery {
            message: message.into(),
        }
    }

    /// Create a new connection-fatal error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::ConnectionFatal {
            message: message.into(),
        }
    }

    /// Create a new storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// Only `Protocol` maps to a client error; everything else that reaches
    /// an HTTP response is a server-side failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Protocol { .. } => StatusCode::BAD_REQUEST,
            Self::Delivery { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConnectionFatal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::Protocol { message }
            | Self::Delivery { message }
            | Self::ConnectionFatal { message }
            | Self::Storage { message } => message.clone(),
            Self::Serialization(err) => err.to_string(),
        }
    }
}
