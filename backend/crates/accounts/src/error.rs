//! Accounts Error Types
//!
//! This module provides accounts-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Accounts-specific result type alias
pub type AccountsResult<T> = Result<T, AccountsError>;

/// Accounts-specific error variants
#[derive(Debug, Error)]
pub enum AccountsError {
    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Email already exists
    #[error("Email already exists")]
    EmailTaken,

    /// User name already exists
    #[error("Username already exists")]
    UserNameTaken,

    /// Invalid credentials (unknown identity or wrong password,
    /// deliberately indistinguishable to the caller)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Identity/origin pair is temporarily banned
    #[error("Account temporarily banned due to multiple failed login attempts")]
    Banned,

    /// Account is deactivated
    #[error("Account is deactivated")]
    AccountDeactivated,

    /// Request validation error
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountsError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountsError::UserNotFound => StatusCode::NOT_FOUND,
            AccountsError::EmailTaken | AccountsError::UserNameTaken => StatusCode::CONFLICT,
            AccountsError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AccountsError::Banned => StatusCode::LOCKED,
            AccountsError::AccountDeactivated => StatusCode::FORBIDDEN,
            AccountsError::Validation(_) => StatusCode::BAD_REQUEST,
            AccountsError::Database(_) | AccountsError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountsError::UserNotFound => ErrorKind::NotFound,
            AccountsError::EmailTaken | AccountsError::UserNameTaken => ErrorKind::Conflict,
            AccountsError::InvalidCredentials => ErrorKind::Unauthorized,
            AccountsError::Banned => ErrorKind::Locked,
            AccountsError::AccountDeactivated => ErrorKind::Forbidden,
            AccountsError::Validation(_) => ErrorKind::BadRequest,
            AccountsError::Database(_) | AccountsError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AccountsError::Database(e) => {
                tracing::error!(error = %e, "Accounts database error");
            }
            AccountsError::Internal(msg) => {
                tracing::error!(message = %msg, "Accounts internal error");
            }
            AccountsError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AccountsError::Banned => {
                tracing::warn!("Login attempt on banned identity/origin pair");
            }
            _ => {
                tracing::debug!(error = %self, "Accounts error");
            }
        }
    }
}

impl IntoResponse for AccountsError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AccountsError {
    fn from(err: AppError) -> Self {
        AccountsError::Internal(err.to_string())
    }
}
