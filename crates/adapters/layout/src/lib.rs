//! # mxgrid-adapter-layout
//!
//! In-process implementation of the [`LayoutEngine`] port.
//!
//! ## Cell math
//!
//! Cells are square. For a container `width` pixels wide, `cols` columns and
//! `padding` pixels between cells (and around the edges):
//!
//! ```text
//! cell = (width - padding * (cols + 1)) / cols
//! ```
//!
//! A rect spanning `w × h` cells at `(x, y)` covers the cells and the
//! padding between them, but not the outer padding.
//!
//! ## Dependency rule
//!
//! Depends on `mxgrid-app` (port traits) and `mxgrid-domain` only.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use mxgrid_app::ports::LayoutEngine;
use mxgrid_domain::grid::{PixelRect, Placement, Viewport};
use mxgrid_domain::id::{ContainerId, TileId};
use mxgrid_domain::template::{CellRect, Template};

/// Padding between cells when not configured.
pub const DEFAULT_CELL_PADDING: u32 = 10;

#[derive(Debug, Default, Clone)]
struct Container {
    active: Vec<TileId>,
    frame: Vec<Placement>,
    redraws: u64,
}

#[derive(Debug)]
struct State {
    window: Viewport,
    containers: BTreeMap<ContainerId, Container>,
}

/// Layout engine holding the containers of one page.
#[derive(Debug)]
pub struct TilesLayoutEngine {
    cell_padding: u32,
    state: Mutex<State>,
}

impl TilesLayoutEngine {
    #[must_use]
    pub fn new(window: Viewport, cell_padding: u32) -> Self {
        Self {
            cell_padding,
            state: Mutex::new(State {
                window,
                containers: BTreeMap::new(),
            }),
        }
    }

    /// Register the given containers on the page.
    #[must_use]
    pub fn with_containers(self, containers: impl IntoIterator<Item = ContainerId>) -> Self {
        for container in containers {
            self.add_container(container);
        }
        self
    }

    /// Register a container. Registering it again keeps its current state.
    pub fn add_container(&self, container: ContainerId) {
        self.lock().containers.entry(container).or_default();
    }

    #[must_use]
    pub fn window(&self) -> Viewport {
        self.lock().window
    }

    /// Side of one square cell for `width` pixels and `cols` columns.
    #[must_use]
    pub fn cell_size(&self, width: u32, cols: usize) -> u32 {
        let Ok(cols) = u32::try_from(cols) else {
            return 0;
        };
        if cols == 0 {
            return 0;
        }
        let gutters = self.cell_padding.saturating_mul(cols.saturating_add(1));
        width.saturating_sub(gutters) / cols
    }

    /// Tile ids currently active in `container`.
    #[must_use]
    pub fn active_tiles(&self, container: &ContainerId) -> Vec<TileId> {
        self.lock()
            .containers
            .get(container)
            .map(|state| state.active.clone())
            .unwrap_or_default()
    }

    /// Placements painted by the last redraw of `container`.
    #[must_use]
    pub fn frame(&self, container: &ContainerId) -> Vec<Placement> {
        self.lock()
            .containers
            .get(container)
            .map(|state| state.frame.clone())
            .unwrap_or_default()
    }

    /// Number of repaints `container` went through.
    #[must_use]
    pub fn redraw_count(&self, container: &ContainerId) -> u64 {
        self.lock()
            .containers
            .get(container)
            .map_or(0, |state| state.redraws)
    }

    fn place(&self, rect: &CellRect, cell: u32) -> PixelRect {
        let step = cell.saturating_add(self.cell_padding);
        let span = |cells: usize| {
            let cells = u32::try_from(cells).unwrap_or(u32::MAX);
            cells
                .saturating_mul(cell)
                .saturating_add(cells.saturating_sub(1).saturating_mul(self.cell_padding))
        };
        let offset = |cells: usize| {
            let cells = u32::try_from(cells).unwrap_or(u32::MAX);
            self.cell_padding.saturating_add(cells.saturating_mul(step))
        };
        PixelRect {
            left: offset(rect.x),
            top: offset(rect.y),
            width: span(rect.width),
            height: span(rect.height),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for TilesLayoutEngine {
    fn default() -> Self {
        Self::new(Viewport::new(1280, 800), DEFAULT_CELL_PADDING)
    }
}

impl LayoutEngine for TilesLayoutEngine {
    fn viewport(&self, container: &ContainerId) -> Option<Viewport> {
        let state = self.lock();
        state
            .containers
            .contains_key(container)
            .then_some(state.window)
    }

    fn set_window(&self, window: Viewport) {
        self.lock().window = window;
    }

    fn resize(&self, viewport: Viewport, template: &Template, num_cols: usize) -> Vec<PixelRect> {
        let cell = self.cell_size(viewport.width, num_cols);
        template
            .rects()
            .iter()
            .map(|rect| self.place(rect, cell))
            .collect()
    }

    fn update_tiles(&self, container: &ContainerId, ids: &[TileId]) {
        let mut state = self.lock();
        let Some(entry) = state.containers.get_mut(container) else {
            tracing::warn!(%container, "update_tiles on unknown container");
            return;
        };
        let removed = entry.active.iter().filter(|id| !ids.contains(*id)).count();
        entry.active = ids.to_vec();
        entry.frame.retain(|placement| ids.contains(&placement.tile_id));
        tracing::trace!(%container, active = ids.len(), removed, "tiles updated");
    }

    fn redraw(&self, container: &ContainerId, placements: &[Placement], force: bool) {
        let mut state = self.lock();
        let Some(entry) = state.containers.get_mut(container) else {
            tracing::warn!(%container, "redraw on unknown container");
            return;
        };
        if !force && entry.frame == placements {
            return;
        }
        entry.frame = placements
            .iter()
            .filter(|placement| entry.active.contains(&placement.tile_id))
            .copied()
            .collect();
        entry.redraws += 1;
    }
}
