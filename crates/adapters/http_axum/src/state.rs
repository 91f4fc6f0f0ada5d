//! Shared application state for axum handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use mxgrid_app::assembler::GridAssembler;
use mxgrid_app::ports::{DataSource, LayoutEngine};
use mxgrid_app::services::process_service::ProcessService;
use mxgrid_domain::grid::Viewport;

/// Application state shared across all axum handlers.
///
/// Generic over the layout engine, data source and viewer launcher to avoid
/// dynamic dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone` — only the `Arc` wrappers and the
/// channel sender are cloned.
pub struct AppState<L, D, V> {
    /// Grids built at startup, redrawn on resize.
    pub assembler: Arc<GridAssembler<L>>,
    /// Source of viewer payloads.
    pub source: Arc<D>,
    /// Runs process commands against the same assembler and source.
    pub processes: Arc<ProcessService<L, D>>,
    /// Receives tile action requests.
    pub launcher: Arc<V>,
    /// Feeds the debounced resize loop.
    pub resize_tx: mpsc::Sender<Viewport>,
}

impl<L, D, V> Clone for AppState<L, D, V> {
    fn clone(&self) -> Self {
        Self {
            assembler: Arc::clone(&self.assembler),
            source: Arc::clone(&self.source),
            processes: Arc::clone(&self.processes),
            launcher: Arc::clone(&self.launcher),
            resize_tx: self.resize_tx.clone(),
        }
    }
}

impl<L: LayoutEngine, D: DataSource, V> AppState<L, D, V> {
    /// Create a new application state from pre-wrapped `Arc` components.
    pub fn new(
        assembler: Arc<GridAssembler<L>>,
        source: Arc<D>,
        launcher: Arc<V>,
        resize_tx: mpsc::Sender<Viewport>,
    ) -> Self {
        let processes = Arc::new(ProcessService::new(
            Arc::clone(&assembler),
            Arc::clone(&source),
        ));
        Self {
            assembler,
            source,
            processes,
            launcher,
            resize_tx,
        }
    }
}
