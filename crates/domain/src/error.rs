//! Common error types used across the workspace.
//!
//! Each failure mode has its own typed source error; [`MxError`] wraps them
//! via `#[from]` so layers can propagate with `?`.

use std::error::Error;

/// Top-level error for grid assembly and everything feeding into it.
#[derive(Debug, thiserror::Error)]
pub enum MxError {
    #[error("invalid argument")]
    InvalidArgument(#[from] ArgumentError),

    #[error("invalid template")]
    InvalidTemplate(#[from] TemplateError),

    #[error("container not found")]
    ContainerNotFound(#[from] ContainerNotFoundError),

    #[error("template requires {required} tiles but only {available} ids are available")]
    InsufficientTileIds { required: usize, available: usize },

    #[error("tile {tile} not found in {container}")]
    TileNotFound { container: String, tile: u32 },

    #[error("process {process} not found")]
    ProcessNotFound { process: String },

    #[error("malformed record")]
    MissingField(#[from] MissingFieldError),

    #[error("builder {builder} expects a {expected} record, got {found}")]
    RecordKind {
        builder: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("data source error")]
    Source(#[source] Box<dyn Error + Send + Sync>),
}

/// Rejected caller-supplied arguments.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("tile count must not be negative, got {0}")]
    NegativeTileCount(i64),

    #[error("container id must not be empty")]
    EmptyContainerId,

    #[error("process {process} appears more than once in tree {tree}")]
    DuplicateProcess { tree: String, process: String },

    #[error("unknown action {0}")]
    UnknownAction(String),

    #[error("trigger interval must not be empty")]
    EmptyInterval,

    #[error("viewport width must be non-zero")]
    ZeroViewportWidth,
}

/// Reasons a set of template rows cannot be parsed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("row {row} has length {actual}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("row {row} has {actual} cells, expected {expected}")]
    CellCount {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("cell {cell:?} in row {row} must be a single character")]
    WideCell { row: usize, cell: String },
}

/// The requested container is not present on the page.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("container {id} not found")]
pub struct ContainerNotFoundError {
    pub id: String,
}

/// A record handed to a builder lacks a required value.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("{record} is missing required field {field}")]
pub struct MissingFieldError {
    pub record: &'static str,
    pub field: &'static str,
}

impl MxError {
    /// Wrap an arbitrary data-source failure.
    pub fn source(err: impl Error + Send + Sync + 'static) -> Self {
        Self::Source(Box::new(err))
    }
}
