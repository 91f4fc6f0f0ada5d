//! # mxgridd — MX dashboard daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`mxgrid.toml` plus env overrides)
//! - Initialize structured logging
//! - Construct the layout engine and data source (adapters)
//! - Assemble every dashboard grid once at startup
//! - Run the debounced resize loop that redraws all grids
//! - Build the axum router and serve until SIGINT
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use mxgrid_adapter_http_axum::state::AppState;
use mxgrid_adapter_layout::TilesLayoutEngine;
use mxgrid_adapter_mock::MockDataSource;
use mxgrid_app::assembler::GridAssembler;
use mxgrid_app::launcher::TracingViewerLauncher;
use mxgrid_app::ports::DataSource;
use mxgrid_app::resize::run_resize_loop;
use mxgrid_app::services::dashboard_service::{DashboardService, page_containers};
use mxgrid_domain::record::Hierarchy;

use crate::config::Config;

const RESIZE_QUEUE: usize = 64;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Data source
    let source = Arc::new(match config.hierarchy() {
        Some(hierarchy) => MockDataSource::new(hierarchy.trees),
        None => MockDataSource::default(),
    });
    let hierarchy = Hierarchy::new(source.trees().await?);
    hierarchy.validate()?;

    // Layout
    let layout = TilesLayoutEngine::new(config.window(), config.layout.cell_padding)
        .with_containers(page_containers(&hierarchy));
    let assembler = Arc::new(GridAssembler::new(layout));

    // Grids
    let service = DashboardService::new(Arc::clone(&assembler), Arc::clone(&source))
        .with_jobs_per_process(config.jobs_per_process()?);
    let report = service.initialize(&hierarchy).await;
    if !report.is_clean() {
        tracing::warn!(
            failed = report.failures.len(),
            "dashboard started with missing grids"
        );
    }

    // Resize loop
    let (resize_tx, resize_rx) = mpsc::channel(RESIZE_QUEUE);
    let relayout = Arc::clone(&assembler);
    let resize_task = tokio::spawn(run_resize_loop(
        resize_rx,
        config.resize_debounce(),
        move |window| {
            relayout.relayout_all(window);
        },
    ));

    // HTTP
    let state = AppState::new(assembler, source, Arc::new(TracingViewerLauncher), resize_tx);
    let app = mxgrid_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "mxgridd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router (and its sender) is dropped once serving stops, which
    // closes the resize stream.
    let redraws = resize_task.await?;
    tracing::info!(redraws, "mxgridd stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
