use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{CreateUserRequest, DeletedCount, UpdateUserRequest},
    repo_types::{NewUser, UserView},
};
use crate::{
    auth::{gate::require_token, gate::CurrentUser, password::hash_password},
    error::ApiError,
    extract::{ApiJson, ApiPath},
    state::AppState,
};

pub fn user_routes(state: &AppState) -> Router<AppState> {
    let gate = middleware::from_fn_with_state(state.clone(), require_token);
    Router::new()
        .route(
            "/user",
            get(list_users)
                .delete(delete_all_users)
                .route_layer(gate.clone())
                // registration stays open; added after the gate so it is not wrapped
                .post(create_user),
        )
        .route(
            "/user/:public_id",
            get(get_user)
                .put(update_user)
                .delete(delete_user)
                .route_layer(gate),
        )
}

#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    let password_hash = hash_password(&payload.password)?;
    let user = state
        .users
        .insert(NewUser {
            public_id: Uuid::new_v4(),
            name: payload.name,
            password_hash,
            admin: false,
        })
        .await?;

    info!(public_id = %user.public_id, "user registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip_all, fields(caller = %caller.public_id))]
pub async fn list_users(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<Vec<UserView>>, ApiError> {
    let users = state.users.list_all().await?;
    Ok(Json(users.into_iter().map(UserView::from).collect()))
}

#[instrument(skip(state, caller), fields(caller = %caller.public_id))]
pub async fn get_user(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiPath(public_id): ApiPath<Uuid>,
) -> Result<Json<UserView>, ApiError> {
    let user = state
        .users
        .get_by_public_id(public_id)
        .await?
        .ok_or(ApiError::NotFound("user"))?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, caller, payload), fields(caller = %caller.public_id))]
pub async fn update_user(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiPath(public_id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateUserRequest>,
) -> Result<Json<UserView>, ApiError> {
    let user = state
        .users
        .update_name(public_id, &payload.name)
        .await?
        .ok_or(ApiError::NotFound("user"))?;
    info!(%public_id, name = %user.name, "user renamed");
    Ok(Json(user.into()))
}

#[instrument(skip(state, caller), fields(caller = %caller.public_id))]
pub async fn delete_user(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiPath(public_id): ApiPath<Uuid>,
) -> Result<Json<UserView>, ApiError> {
    let user = state
        .users
        .delete(public_id)
        .await?
        .ok_or(ApiError::NotFound("user"))?;
    info!(%public_id, "user deleted");
    Ok(Json(user.into()))
}

#[instrument(skip_all, fields(caller = %caller.public_id))]
pub async fn delete_all_users(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<DeletedCount>, ApiError> {
    let deleted = state.users.delete_all().await?;
    info!(deleted, "all users deleted");
    Ok(Json(DeletedCount { deleted }))
}
