use std::{error::Error, fmt};

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
#[cfg(feature = "backend")]
use {
    axum::{
        response::{IntoResponse, Response},
        Json,
    },
    http::StatusCode,
};

/// Placeholder inner error for routes whose only failures are infrastructural
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ThisError)]
#[error("nothing")]
pub struct Nothing;

/// Shape/range failures collected before any persistence access happens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub error_messages: Vec<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error_messages.join(", "))
    }
}

impl Error for ValidationError {}

/// Error type returned by route handlers and the model layer. `T` is the
/// route's typed error (declared with `response_error!`); everything else the
/// persistence plumbing can throw is folded into the remaining variants and
/// surfaced to callers as an opaque failure.
#[cfg(feature = "backend")]
#[derive(Debug, ThisError)]
pub enum ServerError<T: Error> {
    #[error("{inner}")]
    Inner { code: StatusCode, inner: T },

    #[error("validation failed: {inner}")]
    Validation { inner: ValidationError },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("database pool error: {message}")]
    Pool { message: String },

    #[error("{message}")]
    Other { message: String },
}

#[cfg(feature = "backend")]
impl<T: Error> From<ValidationError> for ServerError<T> {
    fn from(inner: ValidationError) -> Self {
        Self::Validation { inner }
    }
}

#[cfg(feature = "backend")]
impl<T: Error> From<deadpool_sqlite::InteractError> for ServerError<T> {
    fn from(err: deadpool_sqlite::InteractError) -> Self {
        Self::Pool {
            message: format!("interact: {err}"),
        }
    }
}

#[cfg(feature = "backend")]
impl<T: Error> From<deadpool_sqlite::PoolError> for ServerError<T> {
    fn from(err: deadpool_sqlite::PoolError) -> Self {
        Self::Pool {
            message: format!("pool: {err}"),
        }
    }
}

#[cfg(feature = "backend")]
impl From<ServerError<Nothing>> for deadpool_sqlite::HookError {
    fn from(err: ServerError<Nothing>) -> Self {
        Self::Message(err.to_string())
    }
}

// Typed errors keep their status code and serialized body; infrastructure
// failures are logged server-side and reach the caller as a bare 500
#[cfg(feature = "backend")]
impl<T> IntoResponse for ServerError<T>
where
    T: Error + Serialize,
{
    fn into_response(self) -> Response {
        use ServerError::*;
        match self {
            Inner { code, inner } => (code, Json(inner)).into_response(),
            Validation { inner } => (StatusCode::BAD_REQUEST, Json(inner)).into_response(),
            err => {
                tracing::error!("{err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
                    .into_response()
            },
        }
    }
}

/// Build a `ServerError::Other` from format args
#[cfg(feature = "backend")]
#[macro_export]
macro_rules! other_error {
    ($($arg:tt)*) => {
        $crate::api::error::ServerError::Other { message: format!($($arg)*) }
    };
}
