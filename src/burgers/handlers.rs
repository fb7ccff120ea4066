use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::repo_types::{Burger, BurgerFields};
use crate::{
    auth::gate::{require_token, CurrentUser},
    error::ApiError,
    extract::{ApiJson, ApiPath},
    state::AppState,
};

pub fn burger_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/burger", get(list_burgers).post(create_burger))
        .route(
            "/burger/:id",
            get(get_burger).put(update_burger).delete(delete_burger),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token))
}

#[instrument(skip(state, caller), fields(caller = %caller.public_id))]
pub async fn create_burger(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiJson(fields): ApiJson<BurgerFields>,
) -> Result<(StatusCode, Json<Burger>), ApiError> {
    let burger = state.burgers.insert(fields).await?;
    info!(id = burger.id, name = %burger.name, "burger created");
    Ok((StatusCode::CREATED, Json(burger)))
}

#[instrument(skip_all, fields(caller = %caller.public_id))]
pub async fn list_burgers(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<Vec<Burger>>, ApiError> {
    Ok(Json(state.burgers.list_all().await?))
}

#[instrument(skip(state, caller), fields(caller = %caller.public_id))]
pub async fn get_burger(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Burger>, ApiError> {
    state
        .burgers
        .get(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("burger"))
}

#[instrument(skip(state, caller), fields(caller = %caller.public_id))]
pub async fn update_burger(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(fields): ApiJson<BurgerFields>,
) -> Result<Json<Burger>, ApiError> {
    let burger = state
        .burgers
        .update(id, fields)
        .await?
        .ok_or(ApiError::NotFound("burger"))?;
    info!(id, "burger updated");
    Ok(Json(burger))
}

#[instrument(skip(state, caller), fields(caller = %caller.public_id))]
pub async fn delete_burger(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Burger>, ApiError> {
    let burger = state
        .burgers
        .delete(id)
        .await?
        .ok_or(ApiError::NotFound("burger"))?;
    info!(id, "burger deleted");
    Ok(Json(burger))
}
