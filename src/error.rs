use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlx::error::ErrorKind;
use thiserror::Error;

use crate::config::ConfigError;
use crate::date_format::DateFormatError;

/// Failure of a single repository statement.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("record not found")]
    NotFound,
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("connection failure: {0}")]
    ConnectionFailure(String),
    #[error("{0}")]
    Unknown(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => RepoError::NotFound,
            sqlx::Error::Database(db) => {
                // SQLSTATE classes 08 (connection), 28 (auth) and 3D (unknown catalog)
                // come back from the server while a session is being opened.
                let code = db.code().map(|c| c.into_owned()).unwrap_or_default();
                if code.starts_with("08") || code.starts_with("28") || code.starts_with("3D") {
                    return RepoError::ConnectionFailure(db.message().to_string());
                }
                match db.kind() {
                    ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation => {
                        RepoError::ConstraintViolation(db.message().to_string())
                    }
                    _ => RepoError::Unknown(db.message().to_string()),
                }
            }
            e @ (sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed) => RepoError::ConnectionFailure(e.to_string()),
            other => RepoError::Unknown(other.to_string()),
        }
    }
}

/// Everything a handler can fail with, mapped to a status code and JSON body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 404 carrying the body to send verbatim.
    #[error("not found")]
    NotFound(serde_json::Value),
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Date(#[from] DateFormatError),
}

impl ApiError {
    pub fn not_found_message(message: &str) -> Self {
        ApiError::NotFound(json!({ "message": message }))
    }

    pub fn not_found_empty() -> Self {
        ApiError::NotFound(json!({}))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(body) => (StatusCode::NOT_FOUND, body),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "message": msg })),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": other.to_string() }),
            ),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeout_is_a_connection_failure() {
        let err = RepoError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, RepoError::ConnectionFailure(_)));
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            RepoError::from(sqlx::Error::RowNotFound),
            RepoError::NotFound
        ));
    }

    #[test]
    fn status_codes() {
        let cases = [
            (ApiError::not_found_empty(), StatusCode::NOT_FOUND),
            (ApiError::BadRequest("bad".into()), StatusCode::BAD_REQUEST),
            (
                ApiError::Repo(RepoError::ConnectionFailure("down".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::Repo(RepoError::ConstraintViolation("dup".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::Config(ConfigError::Missing("SYSTEM_NAME")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
