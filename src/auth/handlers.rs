use axum::{
    extract::{FromRef, State},
    http::HeaderMap,
    Json,
};
use serde::Serialize;
use tracing::{info, instrument, warn};

use super::{basic, gate::CurrentUser, jwt::JwtKeys, password::verify_password};
use crate::{error::ApiError, state::AppState, users::repo_types::UserView};

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// GET /login with HTTP Basic credentials.
#[instrument(skip(state, headers))]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, ApiError> {
    let Some(creds) = basic::from_headers(&headers) else {
        warn!("login without usable basic credentials");
        return Err(ApiError::BadCredentials);
    };

    let Some(user) = state.users.get_by_name(&creds.username).await? else {
        warn!(name = %creds.username, "login for unknown user");
        return Err(ApiError::BadCredentials);
    };

    if !verify_password(&creds.password, &user.password_hash)? {
        warn!(public_id = %user.public_id, "login with wrong password");
        return Err(ApiError::BadCredentials);
    }

    let token = JwtKeys::from_ref(&state).issue(user.public_id)?;
    info!(public_id = %user.public_id, "user logged in");
    Ok(Json(TokenResponse { token }))
}

/// GET /me: the identity the gate resolved for this request.
#[instrument(skip_all)]
pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserView> {
    Json(user.into())
}
