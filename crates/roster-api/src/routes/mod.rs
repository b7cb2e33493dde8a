//! API routes

mod health;
mod users;

use axum::Router;

use crate::state::AppState;

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(users::routes())
        .with_state(state)
}
