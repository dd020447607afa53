//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps ledger errors to HTTP status codes and returns JSON error bodies
//! with a machine-readable code — the client relies on the code to place a
//! failure in the seal error taxonomy, so codes are part of the wire
//! contract.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use sakshi_ledger::BroadcastError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g. "INSUFFICIENT_FUNDS").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional context, present only for client errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`].
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed — bad signature, fee mismatch, malformed
    /// envelope (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Submitter cannot cover the submission fee (402).
    #[error("insufficient funds for {address}: required {required}, available {available}")]
    InsufficientFunds {
        /// The refused submitter address.
        address: String,
        /// The fee the submission required.
        required: u64,
        /// The submitter's current balance.
        available: u64,
    },

    /// Transaction already known (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Endpoint disabled by configuration (403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Internal server error (500). Message is logged, not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status and machine-readable code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::InsufficientFunds { .. } => {
                (StatusCode::PAYMENT_REQUIRED, "INSUFFICIENT_FUNDS")
            }
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        let details = match &self {
            Self::InsufficientFunds {
                address,
                required,
                available,
            } => Some(serde_json::json!({
                "address": address,
                "required": required,
                "available": available,
            })),
            _ => None,
        };

        if matches!(self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<BroadcastError> for AppError {
    fn from(err: BroadcastError) -> Self {
        match err {
            BroadcastError::InsufficientFunds {
                address,
                required,
                available,
            } => Self::InsufficientFunds {
                address,
                required,
                available,
            },
            BroadcastError::DuplicateTransaction(id) => {
                Self::Conflict(format!("duplicate transaction {id}"))
            }
            BroadcastError::InvalidSignature(_)
            | BroadcastError::FeeMismatch { .. }
            | BroadcastError::Malformed(_) => Self::Validation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_error_mapping() {
        let err: AppError = BroadcastError::InsufficientFunds {
            address: "0xabc".into(),
            required: 10,
            available: 0,
        }
        .into();
        assert!(matches!(err, AppError::InsufficientFunds { .. }));

        let err: AppError = BroadcastError::InvalidSignature("bad".into()).into();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn status_codes() {
        let (status, code) = AppError::InsufficientFunds {
            address: "0xabc".into(),
            required: 10,
            available: 0,
        }
        .status_and_code();
        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert_eq!(code, "INSUFFICIENT_FUNDS");

        let (status, _) = AppError::NotFound("x".into()).status_and_code();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
