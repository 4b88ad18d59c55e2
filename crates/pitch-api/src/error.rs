use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pitch_db::RepoError;
use pitch_types::api::ErrorBody;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid Request")]
    BadRequest(#[from] JsonRejection),

    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::BadRequest(rejection) => {
                warn!("Rejected request body: {}", rejection.body_text());
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            Self::Repo(err) if err.is_not_found() => (StatusCode::NOT_FOUND, err.to_string()),
            Self::Repo(err) => {
                error!("Repository failure: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            Self::Join(err) => {
                error!("spawn_blocking join error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Run a synchronous repository call off the async runtime.
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, RepoError> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(f).await??)
}
