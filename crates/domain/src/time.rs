//! Timestamps attached to grid builds.

use chrono::{DateTime, Utc};

/// UTC timestamp recorded when a grid is (re)built or redrawn.
pub type Timestamp = DateTime<Utc>;

/// Current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}
