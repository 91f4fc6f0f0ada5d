//! JSON handlers for grid snapshots.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use mxgrid_app::ports::{DataSource, LayoutEngine, ViewerLauncher};
use mxgrid_domain::grid::Grid;
use mxgrid_domain::id::ContainerId;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Grid>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Grid>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/grids`
pub async fn list<L, D, V>(State(state): State<AppState<L, D, V>>) -> ListResponse
where
    L: LayoutEngine + Send + Sync + 'static,
    D: DataSource + Send + Sync + 'static,
    V: ViewerLauncher + Send + Sync + 'static,
{
    ListResponse::Ok(Json(state.assembler.grids()))
}

/// `GET /api/grids/{container}`
pub async fn get<L, D, V>(
    State(state): State<AppState<L, D, V>>,
    Path(container): Path<String>,
) -> Result<GetResponse, ApiError>
where
    L: LayoutEngine + Send + Sync + 'static,
    D: DataSource + Send + Sync + 'static,
    V: ViewerLauncher + Send + Sync + 'static,
{
    let container = ContainerId::from_str(&container)?;
    let grid = state.assembler.grid(&container)?;
    Ok(GetResponse::Ok(Json(grid)))
}
