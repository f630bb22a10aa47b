use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use emotes_core::emote::EmoteError;
use emotes_core::storage::{
    emote_error_to_status_code, repository_error_to_status_code, EmoteRepositoryError,
};

pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        let code = if let Some(repo_error) = self.0.downcast_ref::<EmoteRepositoryError>() {
            repository_error_to_status_code(repo_error)
        } else if let Some(emote_error) = self.0.downcast_ref::<EmoteError>() {
            emote_error_to_status_code(emote_error)
        } else if let Some(rejection) = self.0.downcast_ref::<JsonRejection>() {
            rejection.status().as_u16()
        } else {
            500
        };

        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        tracing::warn!(status = %status_code, error = %self.0, "API error");

        // Repository failures render in their structured form.
        if let Some(repo_error) = self.0.downcast_ref::<EmoteRepositoryError>() {
            return (status_code, Json(repo_error.to_structured())).into_response();
        }

        (status_code, self.0.to_string()).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
