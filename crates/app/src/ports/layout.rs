//! Layout engine port — the grid/tile library the dashboard draws with.
//!
//! The core never computes pixel positions itself: it hands the engine a
//! template and a column count and gets back one rectangle per template
//! rect, then asks the engine to reconcile tile ids and repaint.

use mxgrid_domain::grid::{PixelRect, Placement, Viewport};
use mxgrid_domain::id::{ContainerId, TileId};
use mxgrid_domain::template::Template;

/// Grid sizing, tile placement and redraw.
pub trait LayoutEngine {
    /// Resolve a container on the page, returning its current size.
    ///
    /// `None` means the page has no such container.
    fn viewport(&self, container: &ContainerId) -> Option<Viewport>;

    /// Apply a new window size to every container.
    fn set_window(&self, window: Viewport);

    /// Compute the pixel rectangle of every template rect, in template order.
    fn resize(&self, viewport: Viewport, template: &Template, num_cols: usize) -> Vec<PixelRect>;

    /// Make `ids` the active tile set of `container`, dropping any other.
    fn update_tiles(&self, container: &ContainerId, ids: &[TileId]);

    /// Repaint a container. `force` repaints even when nothing moved.
    fn redraw(&self, container: &ContainerId, placements: &[Placement], force: bool);
}
