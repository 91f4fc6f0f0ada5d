//! Viewer port — opens a pop-up viewer for a job action.

use mxgrid_domain::viewer::{ViewerRequest, WindowPreset};

/// Opens viewer windows. Fire-and-forget: nothing is awaited or returned.
pub trait ViewerLauncher {
    fn open(&self, request: &ViewerRequest, preset: WindowPreset);
}
