//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod grids;
#[allow(clippy::missing_errors_doc)]
pub mod viewport;

use axum::Router;
use axum::routing::{get, post};

use mxgrid_app::ports::{DataSource, LayoutEngine, ViewerLauncher};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<L, D, V>() -> Router<AppState<L, D, V>>
where
    L: LayoutEngine + Send + Sync + 'static,
    D: DataSource + Send + Sync + 'static,
    V: ViewerLauncher + Send + Sync + 'static,
{
    Router::new()
        .route("/grids", get(grids::list::<L, D, V>))
        .route("/grids/{container}", get(grids::get::<L, D, V>))
        .route("/viewport", post(viewport::update::<L, D, V>))
}
