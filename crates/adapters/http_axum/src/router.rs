//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use mxgrid_app::ports::{DataSource, LayoutEngine, ViewerLauncher};
use mxgrid_domain::viewer::VIEWER_PATH;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Merges API routes under `/api`, the object viewer and dashboard routes
/// at `/`. Includes a [`TraceLayer`] that logs each HTTP request/response at
/// the `DEBUG` level using the `tracing` ecosystem.
pub fn build<L, D, V>(state: AppState<L, D, V>) -> Router
where
    L: LayoutEngine + Send + Sync + 'static,
    D: DataSource + Send + Sync + 'static,
    V: ViewerLauncher + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route(VIEWER_PATH, get(crate::viewer::show::<L, D, V>))
        .nest("/api", crate::api::routes())
        .merge(crate::dashboard::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
