use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
};

use pitch_types::api::{CreateUserRequest, UpdateUserRequest, UpdatedUser, UserRecord};
use pitch_types::envelope::Envelope;
use pitch_types::models::RequestContext;

use crate::error::{ApiError, run_blocking};
use crate::state::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<Envelope<String>>, ApiError> {
    let Json(req) = payload?;
    let envelope = run_blocking(move || state.users.create(&ctx, &req)).await?;
    Ok(Json(envelope))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Json<Envelope<UserRecord>>, ApiError> {
    let envelope = run_blocking(move || state.users.select(&ctx, &id)).await?;
    Ok(Json(envelope))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(ctx): Extension<RequestContext>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<Envelope<UpdatedUser>>, ApiError> {
    let Json(req) = payload?;
    let envelope = run_blocking(move || state.users.update(&ctx, &id, &req)).await?;
    Ok(Json(envelope))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let envelope = run_blocking(move || state.users.delete(&ctx, &id)).await?;
    Ok(Json(envelope))
}
