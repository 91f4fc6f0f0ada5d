//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use mxgrid_domain::error::MxError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`MxError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(MxError);

impl From<MxError> for ApiError {
    fn from(err: MxError) -> Self {
        Self(err)
    }
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            MxError::InvalidArgument(_)
            | MxError::InvalidTemplate(_)
            | MxError::MissingField(_)
            | MxError::RecordKind { .. } => StatusCode::BAD_REQUEST,
            MxError::ContainerNotFound(_)
            | MxError::TileNotFound { .. }
            | MxError::ProcessNotFound { .. } => StatusCode::NOT_FOUND,
            MxError::InsufficientTileIds { .. } | MxError::Source(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            MxError::InvalidArgument(err) => err.to_string(),
            MxError::InvalidTemplate(err) => err.to_string(),
            MxError::MissingField(err) => err.to_string(),
            MxError::ContainerNotFound(err) => err.to_string(),
            err @ (MxError::RecordKind { .. }
            | MxError::TileNotFound { .. }
            | MxError::ProcessNotFound { .. }) => err.to_string(),
            err @ (MxError::InsufficientTileIds { .. } | MxError::Source(_)) => {
                tracing::error!(
                    error = %err,
                    cause = ?std::error::Error::source(err),
                    "internal error"
                );
                "internal server error".to_string()
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
