//! # mxgrid-domain
//!
//! Pure domain model for the mxgrid operations dashboard.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the displayed **records**: trees, processes and jobs
//! - Define **templates** (row patterns describing tile spans) and the
//!   generator for job/process info grids
//! - Define **tiles** (ordered content blocks) and **grids** (a template
//!   bound to a container plus its tiles and placements)
//! - Define **viewer requests** built by job tiles
//! - Define **process commands** posted by process tiles
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod command;
pub mod grid;
pub mod record;
pub mod template;
pub mod tile;
pub mod viewer;
