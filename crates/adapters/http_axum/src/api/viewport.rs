//! Window resize intake.
//!
//! Clients report their window size here; the redraw itself runs later in
//! the debounced resize loop.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use mxgrid_app::ports::{DataSource, LayoutEngine, ViewerLauncher};
use mxgrid_domain::error::MxError;
use mxgrid_domain::grid::Viewport;

use crate::error::ApiError;
use crate::state::AppState;

pub enum UpdateResponse {
    Accepted,
}

impl IntoResponse for UpdateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted => StatusCode::ACCEPTED.into_response(),
        }
    }
}

/// `POST /api/viewport`
pub async fn update<L, D, V>(
    State(state): State<AppState<L, D, V>>,
    Json(window): Json<Viewport>,
) -> Result<UpdateResponse, ApiError>
where
    L: LayoutEngine + Send + Sync + 'static,
    D: DataSource + Send + Sync + 'static,
    V: ViewerLauncher + Send + Sync + 'static,
{
    window.validate()?;
    state
        .resize_tx
        .send(window)
        .await
        .map_err(MxError::source)?;
    Ok(UpdateResponse::Accepted)
}
