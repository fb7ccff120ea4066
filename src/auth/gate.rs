use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use super::jwt::JwtKeys;
use crate::{error::ApiError, state::AppState, users::repo_types::User};

pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// Identity resolved by [`require_token`] for the current request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Middleware in front of every protected route. Verifies the
/// `x-access-token` header, re-resolves the embedded `public_id` against the
/// credential store and only then hands the request to `next`.
pub async fn require_token(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(ACCESS_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .ok_or_else(|| {
            warn!(uri = %req.uri(), "request without access token");
            ApiError::Unauthorized("Token is missing")
        })?;

    let claims = JwtKeys::from_ref(&state).verify(&token).map_err(|e| {
        warn!(error = %e, "access token rejected");
        ApiError::Unauthorized("Token is invalid")
    })?;

    let user = state
        .users
        .get_by_public_id(claims.public_id)
        .await?
        .ok_or_else(|| {
            warn!(public_id = %claims.public_id, "token for unknown user");
            ApiError::Unauthorized("Token is invalid")
        })?;

    debug!(public_id = %user.public_id, "request authenticated");
    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // absent means the route was mounted without the gate
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(ApiError::Unauthorized("Token is missing"))
    }
}
