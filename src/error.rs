use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Realm sent back with every failed login challenge.
pub const LOGIN_REALM: &str = r#"Basic realm="Login required!""#;

/// Errors raised by the persistence layer.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0} already exists")]
    Conflict(&'static str),

    #[error("{0} field exceeds the stored length")]
    Invalid(&'static str),

    #[error(transparent)]
    Backend(#[from] sqlx::Error),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Unauthorized(&'static str),

    /// Failed login. Missing credentials, unknown name and wrong password all
    /// render identically.
    #[error("Could not verify")]
    BadCredentials,

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict(_) => ApiError::Conflict(e.to_string()),
            RepoError::Invalid(_) => ApiError::BadRequest(e.to_string()),
            RepoError::Backend(inner) => ApiError::Internal(anyhow::Error::new(inner)),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) | ApiError::BadCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                "Internal error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        match self {
            ApiError::BadCredentials => {
                (status, [(header::WWW_AUTHENTICATE, LOGIN_REALM)], body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}
