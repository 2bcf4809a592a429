//! API error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use super::types::Envelope;
use crate::error::FeedError;

/// Wrapper that renders a [`FeedError`] as an error envelope
#[derive(Debug)]
pub struct ApiError(pub FeedError);

impl From<FeedError> for ApiError {
    fn from(err: FeedError) -> Self {
        Self(err)
    }
}

pub fn status_for(err: &FeedError) -> StatusCode {
    match err {
        FeedError::Validation(_) => StatusCode::BAD_REQUEST,
        FeedError::NotFound(_) => StatusCode::NOT_FOUND,
        FeedError::Dependency(_) => StatusCode::BAD_GATEWAY,
        FeedError::Config(_) | FeedError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if self.0.is_client_fault() {
            warn!(code = self.0.code(), "{}", self.0);
        } else {
            error!(code = self.0.code(), "{}", self.0);
        }

        let body: Envelope<()> = Envelope::failure(self.0.code(), self.0.public_message());
        (status, Json(body)).into_response()
    }
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;
