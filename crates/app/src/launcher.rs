//! In-process viewer launcher that records opens through `tracing`.

use mxgrid_domain::viewer::{ViewerRequest, WindowPreset};

use crate::ports::ViewerLauncher;

/// Logs every viewer open. Used when the actual window is opened by the
/// client following the viewer URL.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingViewerLauncher;

impl ViewerLauncher for TracingViewerLauncher {
    fn open(&self, request: &ViewerRequest, preset: WindowPreset) {
        tracing::info!(
            action = %request.action,
            process = %request.process_name,
            timeperiod = %request.timeperiod,
            features = %preset.features(),
            url = %request.url(),
            "opening viewer"
        );
    }
}
