//! Data source port — where trees, processes and jobs come from.

use std::future::Future;

use mxgrid_domain::command::ProcessCommand;
use mxgrid_domain::error::MxError;
use mxgrid_domain::record::{Job, Process, Tree};
use mxgrid_domain::viewer::ViewerRequest;

/// Supplies the records the dashboard displays.
pub trait DataSource {
    /// All trees, in display order.
    fn trees(&self) -> impl Future<Output = Result<Vec<Tree>, MxError>> + Send;

    /// Current entry of a scheduled process.
    fn process_entry(
        &self,
        process_name: &str,
    ) -> impl Future<Output = Result<Process, MxError>> + Send;

    /// Apply an operator command to a process and return its updated entry.
    fn apply_command(
        &self,
        process_name: &str,
        command: &ProcessCommand,
    ) -> impl Future<Output = Result<Process, MxError>> + Send;

    /// A job record of a process.
    fn job_record(&self, process_name: &str) -> impl Future<Output = Result<Job, MxError>> + Send;

    /// Payload shown by the viewer window for `request`.
    fn object_view(
        &self,
        request: &ViewerRequest,
    ) -> impl Future<Output = Result<serde_json::Value, MxError>> + Send;
}
