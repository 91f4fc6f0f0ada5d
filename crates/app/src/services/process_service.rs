//! Process service — operator commands on scheduled processes.

use std::sync::Arc;

use mxgrid_domain::command::ProcessCommand;
use mxgrid_domain::error::MxError;
use mxgrid_domain::record::Process;

use crate::assembler::GridAssembler;
use crate::ports::{DataSource, LayoutEngine};

/// Result of a command: the process as the data source now reports it.
#[derive(Debug)]
pub struct CommandOutcome {
    pub process: Process,
    /// Grids rebuilt to show the new values.
    pub refreshed: usize,
}

/// Runs process commands and keeps the displayed grids in step.
pub struct ProcessService<L, D> {
    assembler: Arc<GridAssembler<L>>,
    source: Arc<D>,
}

impl<L: LayoutEngine, D: DataSource> ProcessService<L, D> {
    pub fn new(assembler: Arc<GridAssembler<L>>, source: Arc<D>) -> Self {
        Self { assembler, source }
    }

    /// Apply `command` to `process_name`, then rebuild the grids showing it.
    ///
    /// # Errors
    ///
    /// Returns the data source error, or an assembly error from the rebuild.
    pub async fn execute(
        &self,
        process_name: &str,
        command: &ProcessCommand,
    ) -> Result<CommandOutcome, MxError> {
        let process = self.source.apply_command(process_name, command).await?;
        process.validate()?;
        let refreshed = self.assembler.refresh_process(&process)?;
        tracing::info!(
            process = %process.process_name,
            action = %command.action(),
            refreshed,
            "process command applied"
        );
        Ok(CommandOutcome { process, refreshed })
    }
}
