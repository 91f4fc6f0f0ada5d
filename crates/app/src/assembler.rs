//! Grid assembler — binds a template, a tile builder and a record into a
//! container through the layout engine.
//!
//! The assembler keeps the last grid built for every container, with the
//! builder and record it came from. Assembling a container again replaces
//! its grid wholesale, and the layout engine is told the new active tile
//! set, so nothing from the previous build leaks.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use mxgrid_domain::error::{ArgumentError, ContainerNotFoundError, MxError};
use mxgrid_domain::grid::{Grid, GridHandle, Placement, Viewport};
use mxgrid_domain::id::{ContainerId, TileId, take_tile_ids};
use mxgrid_domain::record::{Process, Record};
use mxgrid_domain::template::Template;
use mxgrid_domain::tile::Tile;
use mxgrid_domain::viewer::{ViewerAction, ViewerRequest};

use crate::builders::TileBuilder;
use crate::ports::{LayoutEngine, ViewerLauncher};

struct Entry {
    grid: Grid,
    builder: TileBuilder,
    record: Record,
}

#[derive(Default)]
struct Registry {
    grids: BTreeMap<ContainerId, Entry>,
    order: Vec<ContainerId>,
}

impl Registry {
    fn insert(&mut self, entry: Entry) -> Option<Entry> {
        let container = entry.grid.container.clone();
        let previous = self.grids.insert(container.clone(), entry);
        if previous.is_none() {
            self.order.push(container);
        }
        previous
    }
}

/// Builds and keeps the grids of every container.
pub struct GridAssembler<L> {
    layout: L,
    registry: Mutex<Registry>,
}

impl<L: LayoutEngine> GridAssembler<L> {
    pub fn new(layout: L) -> Self {
        Self {
            layout,
            registry: Mutex::new(Registry::default()),
        }
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// Build the grid of `container` from `template`, filling every tile with
    /// `builder` applied to the shared `record`.
    ///
    /// # Errors
    ///
    /// - [`MxError::ContainerNotFound`] when the layout engine has no such container
    /// - [`MxError::InsufficientTileIds`] when the template has more rects than ids
    /// - any builder error ([`MxError::RecordKind`], [`MxError::MissingField`], …)
    ///
    /// On error the previous grid of the container, if any, is kept.
    pub fn assemble(
        &self,
        container: ContainerId,
        template: Template,
        builder: TileBuilder,
        record: &Record,
    ) -> Result<GridHandle, MxError> {
        let viewport = self.layout.viewport(&container).ok_or_else(|| {
            ContainerNotFoundError {
                id: container.to_string(),
            }
        })?;
        let ids = take_tile_ids(template.required_tiles())?;
        let tiles = ids
            .iter()
            .map(|&id| {
                let mut tile = Tile::new(id);
                builder.build(record, &mut tile)?;
                Ok(tile)
            })
            .collect::<Result<Vec<_>, MxError>>()?;

        let mut grid = Grid::new(container, template, tiles);
        self.draw(&mut grid, viewport);
        let handle = grid.handle();

        tracing::debug!(
            container = %handle.container,
            builder = builder.name(),
            tiles = handle.tile_ids.len(),
            "grid assembled"
        );
        let entry = Entry {
            grid,
            builder,
            record: record.clone(),
        };
        if self.lock().insert(entry).is_some() {
            tracing::debug!(container = %handle.container, "previous grid replaced");
        }
        Ok(handle)
    }

    /// Apply a new window size and redraw every assembled grid.
    ///
    /// Returns the number of grids redrawn. Grids whose container vanished
    /// from the layout engine are skipped.
    pub fn relayout_all(&self, window: Viewport) -> usize {
        self.layout.set_window(window);
        let mut registry = self.lock();
        let mut redrawn = 0;
        for Entry { grid, .. } in registry.grids.values_mut() {
            let Some(viewport) = self.layout.viewport(&grid.container) else {
                tracing::warn!(
                    container = %grid.container,
                    "container disappeared, skipping redraw"
                );
                continue;
            };
            grid.dirty = true;
            self.draw(grid, viewport);
            redrawn += 1;
        }
        tracing::debug!(
            width = window.width,
            height = window.height,
            redrawn,
            "grids relaid out"
        );
        redrawn
    }

    /// Snapshot of the grid currently held by `container`.
    ///
    /// # Errors
    ///
    /// Returns [`MxError::ContainerNotFound`] when nothing was assembled there.
    pub fn grid(&self, container: &ContainerId) -> Result<Grid, MxError> {
        self.lock()
            .grids
            .get(container)
            .map(|entry| entry.grid.clone())
            .ok_or_else(|| {
                ContainerNotFoundError {
                    id: container.to_string(),
                }
                .into()
            })
    }

    /// Snapshots of every grid, in first-assembly order.
    pub fn grids(&self) -> Vec<Grid> {
        let registry = self.lock();
        registry
            .order
            .iter()
            .filter_map(|container| registry.grids.get(container))
            .map(|entry| entry.grid.clone())
            .collect()
    }

    /// Rebuild every grid that was filled from `process`, with its new values.
    ///
    /// Each grid keeps its template and builder. Returns the number of grids
    /// rebuilt.
    ///
    /// # Errors
    ///
    /// Returns the first assembly error; grids already rebuilt stay rebuilt.
    pub fn refresh_process(&self, process: &Process) -> Result<usize, MxError> {
        let targets: Vec<(ContainerId, Template, TileBuilder)> = {
            let registry = self.lock();
            registry
                .order
                .iter()
                .filter_map(|container| registry.grids.get(container))
                .filter(|entry| {
                    matches!(
                        &entry.record,
                        Record::Process(held) if held.process_name == process.process_name
                    )
                })
                .map(|entry| {
                    (
                        entry.grid.container.clone(),
                        entry.grid.template.clone(),
                        entry.builder,
                    )
                })
                .collect()
        };

        let record = Record::from(process.clone());
        for (container, template, builder) in &targets {
            self.assemble(container.clone(), template.clone(), *builder, &record)?;
        }
        tracing::debug!(
            process = %process.process_name,
            rebuilt = targets.len(),
            "process grids refreshed"
        );
        Ok(targets.len())
    }

    /// Hand the viewer request of a tile action to `launcher`.
    ///
    /// # Errors
    ///
    /// - [`MxError::ContainerNotFound`] when nothing was assembled in `container`
    /// - [`MxError::TileNotFound`] when the grid has no such tile
    /// - [`MxError::InvalidArgument`] when the tile carries no such action
    pub fn trigger_action(
        &self,
        container: &ContainerId,
        tile_id: TileId,
        action: ViewerAction,
        launcher: &impl ViewerLauncher,
    ) -> Result<ViewerRequest, MxError> {
        let grid = self.grid(container)?;
        let tile = grid.tile(tile_id).ok_or_else(|| MxError::TileNotFound {
            container: container.to_string(),
            tile: tile_id.get(),
        })?;
        let (request, preset) = tile
            .action(action)
            .ok_or_else(|| ArgumentError::UnknownAction(action.to_string()))?;
        launcher.open(request, preset);
        Ok(request.clone())
    }

    fn draw(&self, grid: &mut Grid, viewport: Viewport) {
        let rects = self
            .layout
            .resize(viewport, &grid.template, grid.resize_columns());
        let ids = grid.tile_ids();
        self.layout.update_tiles(&grid.container, &ids);
        let placements: Vec<Placement> = ids
            .into_iter()
            .zip(rects)
            .map(|(tile_id, rect)| Placement { tile_id, rect })
            .collect();
        self.layout.redraw(&grid.container, &placements, true);
        grid.mark_drawn(placements);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
