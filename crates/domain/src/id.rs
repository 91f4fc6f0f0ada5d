//! Typed identifiers: UUID-backed grid ids, page container names and the
//! fixed tile-id pool.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ArgumentError, MxError};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(uuid::Uuid);

        impl Default for $name {
            fn default() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_id!(
    /// Unique identifier for one build of a [`Grid`](crate::grid::Grid).
    ///
    /// Rebuilding a container yields a fresh id.
    GridId
);

/// Name of a page placeholder a grid is laid out into
/// (e.g. `grid-header-TreeSite`, `grid-info-SiteDaily`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerId(String);

impl ContainerId {
    /// Wrap a container name.
    ///
    /// # Errors
    ///
    /// Returns [`MxError::InvalidArgument`] when `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, MxError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ArgumentError::EmptyContainerId.into());
        }
        Ok(Self(name))
    }

    /// Container holding the header grid of a tree or process.
    #[must_use]
    pub fn header(name: &str) -> Self {
        Self(format!("grid-header-{name}"))
    }

    /// Container holding the info grid of a tree or process.
    #[must_use]
    pub fn info(name: &str) -> Self {
        Self(format!("grid-info-{name}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ContainerId {
    type Err = MxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Identifier of a tile, unique within its grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(u32);

impl TileId {
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TileId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Number of ids in [`TILE_ID_POOL`].
pub const TILE_ID_POOL_SIZE: usize = 31;

/// Ordered ids every grid draws from, first to last.
pub const TILE_ID_POOL: [TileId; TILE_ID_POOL_SIZE] = {
    let mut pool = [TileId(0); TILE_ID_POOL_SIZE];
    let mut i = 0;
    let mut id = 1;
    while i < TILE_ID_POOL_SIZE {
        pool[i] = TileId(id);
        i += 1;
        id += 1;
    }
    pool
};

/// Take the first `count` ids of the pool.
///
/// # Errors
///
/// Returns [`MxError::InsufficientTileIds`] when `count` exceeds the pool.
pub fn take_tile_ids(count: usize) -> Result<&'static [TileId], MxError> {
    TILE_ID_POOL
        .get(..count)
        .ok_or(MxError::InsufficientTileIds {
            required: count,
            available: TILE_ID_POOL_SIZE,
        })
}
