//! Grid — a template bound to a page container, with its tiles and the
//! pixel placements of the last layout pass.

use serde::{Deserialize, Serialize};

use crate::error::{ArgumentError, MxError};
use crate::id::{ContainerId, GridId, TileId};
use crate::template::Template;
use crate::tile::Tile;
use crate::time::{Timestamp, now};

/// Pixel size of a container or of the browser window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Reject a window nothing can be laid out in.
    ///
    /// # Errors
    ///
    /// Returns [`MxError::InvalidArgument`] when the width is zero.
    pub fn validate(&self) -> Result<(), MxError> {
        if self.width == 0 {
            return Err(ArgumentError::ZeroViewportWidth.into());
        }
        Ok(())
    }
}

/// A rectangle in pixels, relative to its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    #[must_use]
    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }
}

/// Where a tile ended up after a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub tile_id: TileId,
    pub rect: PixelRect,
}

/// A grid assembled into a container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    pub id: GridId,
    pub container: ContainerId,
    pub template: Template,
    pub tiles: Vec<Tile>,
    pub placements: Vec<Placement>,
    /// Set while the layout no longer matches the tiles.
    pub dirty: bool,
    pub built_at: Timestamp,
    pub redrawn_at: Option<Timestamp>,
}

impl Grid {
    /// Bind tiles to a template; the grid starts dirty.
    #[must_use]
    pub fn new(container: ContainerId, template: Template, tiles: Vec<Tile>) -> Self {
        Self {
            id: GridId::new(),
            container,
            template,
            tiles,
            placements: Vec::new(),
            dirty: true,
            built_at: now(),
            redrawn_at: None,
        }
    }

    /// Column count used for every resize: the template's, never inferred.
    #[must_use]
    pub fn resize_columns(&self) -> usize {
        self.template.num_cols()
    }

    #[must_use]
    pub fn tile_ids(&self) -> Vec<TileId> {
        self.tiles.iter().map(|tile| tile.id).collect()
    }

    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.id == id)
    }

    /// Record a finished layout pass.
    pub fn mark_drawn(&mut self, placements: Vec<Placement>) {
        self.placements = placements;
        self.dirty = false;
        self.redrawn_at = Some(now());
    }

    /// Total pixel height covered by the tiles.
    #[must_use]
    pub fn content_height(&self) -> u32 {
        self.placements
            .iter()
            .map(|placement| placement.rect.bottom())
            .max()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn handle(&self) -> GridHandle {
        GridHandle {
            id: self.id,
            container: self.container.clone(),
            tile_ids: self.tile_ids(),
        }
    }
}

/// What `assemble` hands back: which grid was built and which ids it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridHandle {
    pub id: GridId,
    pub container: ContainerId,
    pub tile_ids: Vec<TileId>,
}
