//! # mxgrid-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `LayoutEngine` — container lookup, cell math, tile reconciliation, redraw
//!   - `ViewerLauncher` — open a viewer window for a job action
//!   - `DataSource` — trees, process entries, job records, viewer payloads
//! - Provide the reusable core:
//!   - `TileBuilder` — fills a tile from a tree, process or job record
//!   - `GridAssembler` — binds template + builder + record into a container
//!   - `DashboardService` — walks the hierarchy and assembles every grid
//! - Provide **in-process infrastructure** that doesn't need IO
//!   (resize debouncer, tracing viewer launcher)
//!
//! ## Dependency rule
//! Depends on `mxgrid-domain` only (plus `tokio` for channels and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod assembler;
pub mod builders;
pub mod launcher;
pub mod ports;
pub mod resize;
pub mod services;

#[cfg(test)]
mod testing;
