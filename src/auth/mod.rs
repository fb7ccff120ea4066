pub mod basic;
pub mod gate;
pub mod handlers;
pub mod jwt;
pub mod password;

use crate::state::AppState;
use axum::{middleware, routing::get, Router};

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new().route("/login", get(handlers::login)).route(
        "/me",
        get(handlers::me)
            .route_layer(middleware::from_fn_with_state(state.clone(), gate::require_token)),
    )
}
