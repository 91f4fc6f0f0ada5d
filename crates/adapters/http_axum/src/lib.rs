//! # mxgrid-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **server-side-rendered HTML dashboard** that works with
//!   **zero JavaScript**: every grid is laid out with absolutely positioned
//!   tiles computed by the layout engine
//! - Serve a **JSON API** for grid snapshots (`/api/grids`) and window
//!   resize intake (`/api/viewport`)
//! - Serve the **object viewer** (`/object_viewer/`) that tile actions open
//! - Map HTTP requests into application calls (driving adapter) and
//!   application results into HTTP responses (JSON or HTML)
//!
//! ## Tile actions
//! Action buttons are `<form>` elements that POST to
//! `/grids/{container}/tiles/{tile}/actions/{action}`. The handler hands the
//! request to the viewer launcher and redirects to the viewer URL.
//!
//! ## Dependency rule
//! Depends on `mxgrid-app` (port traits, assembler) and `mxgrid-domain`
//! (types used in request/response mapping). Never leaks axum types into
//! the domain.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod state;
pub mod viewer;
