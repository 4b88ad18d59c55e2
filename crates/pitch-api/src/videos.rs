use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
};

use pitch_types::api::{CreateVideoRequest, UpdateVideoRequest, UpdatedVideo, VideoRecord};
use pitch_types::envelope::Envelope;
use pitch_types::models::RequestContext;

use crate::error::{ApiError, run_blocking};
use crate::state::AppState;

pub async fn create_video(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    payload: Result<Json<CreateVideoRequest>, JsonRejection>,
) -> Result<Json<Envelope<String>>, ApiError> {
    let Json(req) = payload?;
    let envelope = run_blocking(move || state.videos.create(&ctx, &req)).await?;
    Ok(Json(envelope))
}

pub async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Json<Envelope<VideoRecord>>, ApiError> {
    let envelope = run_blocking(move || state.videos.select(&ctx, &id)).await?;
    Ok(Json(envelope))
}

pub async fn update_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(ctx): Extension<RequestContext>,
    payload: Result<Json<UpdateVideoRequest>, JsonRejection>,
) -> Result<Json<Envelope<UpdatedVideo>>, ApiError> {
    let Json(req) = payload?;
    let envelope = run_blocking(move || state.videos.update(&ctx, &id, &req)).await?;
    Ok(Json(envelope))
}

pub async fn delete_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let envelope = run_blocking(move || state.videos.delete(&ctx, &id)).await?;
    Ok(Json(envelope))
}
