//! Object viewer — the page tile actions open.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use mxgrid_app::ports::{DataSource, LayoutEngine, ViewerLauncher};
use mxgrid_domain::viewer::{ViewerAction, ViewerRequest};

use crate::error::ApiError;
use crate::state::AppState;

/// Query string of a viewer URL.
#[derive(Debug, Deserialize)]
pub struct ViewerQuery {
    pub action: String,
    pub timeperiod: String,
    pub process_name: String,
}

/// `GET /object_viewer/?action=…&timeperiod=…&process_name=…`
///
/// # Errors
///
/// Returns `400` for an unknown action, or the data source error.
pub async fn show<L, D, V>(
    State(state): State<AppState<L, D, V>>,
    Query(query): Query<ViewerQuery>,
) -> Result<Json<serde_json::Value>, ApiError>
where
    L: LayoutEngine + Send + Sync + 'static,
    D: DataSource + Send + Sync + 'static,
    V: ViewerLauncher + Send + Sync + 'static,
{
    let action = ViewerAction::from_str(&query.action)?;
    let request = ViewerRequest::new(action, query.timeperiod, query.process_name);
    let payload = state.source.object_view(&request).await?;
    Ok(Json(payload))
}
