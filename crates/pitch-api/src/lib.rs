pub mod challenges;
pub mod error;
pub mod middleware;
pub mod service;
pub mod state;
pub mod users;
pub mod videos;

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};

use crate::state::AppState;

/// All entity routes plus `/health`, wrapped in the request-context layer.
/// Transport layers (CORS, tracing) are added by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/users", post(users::create_user))
        .route("/users/", post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/challenge", post(challenges::create_challenge))
        .route("/challenge/", post(challenges::create_challenge))
        .route(
            "/challenge/{id}",
            get(challenges::get_challenge)
                .put(challenges::update_challenge)
                .delete(challenges::delete_challenge),
        )
        .route("/video", post(videos::create_video))
        .route("/video/", post(videos::create_video))
        .route(
            "/video/{id}",
            get(videos::get_video)
                .put(videos::update_video)
                .delete(videos::delete_video),
        )
        .route("/health", get(health))
        .layer(axum::middleware::from_fn(middleware::request_context))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
