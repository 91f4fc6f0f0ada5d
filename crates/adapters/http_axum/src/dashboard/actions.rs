//! Tile action buttons (PRG).

use std::str::FromStr;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};

use mxgrid_app::ports::{DataSource, LayoutEngine, ViewerLauncher};
use mxgrid_domain::id::{ContainerId, TileId};
use mxgrid_domain::viewer::ViewerAction;

use crate::error::ApiError;
use crate::state::AppState;

/// Response from the action form handler.
pub enum TriggerResponse {
    /// Redirect to the viewer URL.
    Redirect(Redirect),
}

impl IntoResponse for TriggerResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(redirect) => redirect.into_response(),
        }
    }
}

/// `POST /grids/{container}/tiles/{tile}/actions/{action}`
pub async fn trigger<L, D, V>(
    State(state): State<AppState<L, D, V>>,
    Path((container, tile, action)): Path<(String, u32, String)>,
) -> Result<TriggerResponse, ApiError>
where
    L: LayoutEngine + Send + Sync + 'static,
    D: DataSource + Send + Sync + 'static,
    V: ViewerLauncher + Send + Sync + 'static,
{
    let container = ContainerId::from_str(&container)?;
    let action = ViewerAction::from_str(&action)?;
    let request = state.assembler.trigger_action(
        &container,
        TileId::new(tile),
        action,
        state.launcher.as_ref(),
    )?;
    Ok(TriggerResponse::Redirect(Redirect::to(&request.url())))
}
