//! Server-side rendered HTML dashboard (no JavaScript).

#[allow(clippy::missing_errors_doc)]
pub mod actions;
pub mod home;
#[allow(clippy::missing_errors_doc)]
pub mod processes;

use axum::Router;
use axum::routing::{get, post};

use mxgrid_app::ports::{DataSource, LayoutEngine, ViewerLauncher};

use crate::state::AppState;

/// Build the dashboard sub-router for SSR HTML pages.
pub fn routes<L, D, V>() -> Router<AppState<L, D, V>>
where
    L: LayoutEngine + Send + Sync + 'static,
    D: DataSource + Send + Sync + 'static,
    V: ViewerLauncher + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(home::index::<L, D, V>))
        .route(
            "/grids/{container}/tiles/{tile}/actions/{action}",
            post(actions::trigger::<L, D, V>),
        )
        .route(
            "/processes/{process}/actions/{action}",
            post(processes::command::<L, D, V>),
        )
}
