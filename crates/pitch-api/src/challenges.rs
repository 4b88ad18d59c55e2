use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
};

use pitch_types::api::{
    ChallengeRecord, CreateChallengeRequest, UpdateChallengeRequest, UpdatedChallenge,
};
use pitch_types::envelope::Envelope;
use pitch_types::models::RequestContext;

use crate::error::{ApiError, run_blocking};
use crate::state::AppState;

pub async fn create_challenge(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    payload: Result<Json<CreateChallengeRequest>, JsonRejection>,
) -> Result<Json<Envelope<String>>, ApiError> {
    let Json(req) = payload?;
    let envelope = run_blocking(move || state.challenges.create(&ctx, &req)).await?;
    Ok(Json(envelope))
}

pub async fn get_challenge(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Json<Envelope<ChallengeRecord>>, ApiError> {
    let envelope = run_blocking(move || state.challenges.select(&ctx, &id)).await?;
    Ok(Json(envelope))
}

pub async fn update_challenge(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(ctx): Extension<RequestContext>,
    payload: Result<Json<UpdateChallengeRequest>, JsonRejection>,
) -> Result<Json<Envelope<UpdatedChallenge>>, ApiError> {
    let Json(req) = payload?;
    let envelope = run_blocking(move || state.challenges.update(&ctx, &id, &req)).await?;
    Ok(Json(envelope))
}

pub async fn delete_challenge(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let envelope = run_blocking(move || state.challenges.delete(&ctx, &id)).await?;
    Ok(Json(envelope))
}
