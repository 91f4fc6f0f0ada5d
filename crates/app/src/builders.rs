//! Tile content builders.
//!
//! A builder fills one freshly created tile from a record. It only appends
//! content blocks (and, for jobs, sets the tile category); it never mutates
//! the record and never opens anything. Action blocks carry the viewer
//! request so the caller decides when to launch it; process controls carry
//! the command target they post to.

use mxgrid_domain::command::{CommandTarget, ProcessAction};
use mxgrid_domain::error::MxError;
use mxgrid_domain::record::{Job, Process, Record, Tree};
use mxgrid_domain::tile::{ContentBlock, JobKey, Tile};
use mxgrid_domain::viewer::{ViewerAction, ViewerRequest};

/// Name of the job-selection checkbox.
pub const BATCH_PROCESSING: &str = "batch_processing";
/// Name of the trigger-frequency text input.
pub const INTERVAL_INPUT: &str = "interval";

const INTERVAL_SIZE: u16 = 8;
const INTERVAL_MAX_LENGTH: u16 = 32;

/// Which content a tile receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileBuilder {
    HeaderTree,
    HeaderProcess,
    InfoProcess,
    InfoJob,
}

impl TileBuilder {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::HeaderTree => "header_tree",
            Self::HeaderProcess => "header_process",
            Self::InfoProcess => "info_process",
            Self::InfoJob => "info_job",
        }
    }

    /// Record kind this builder accepts.
    #[must_use]
    pub fn expects(self) -> &'static str {
        match self {
            Self::HeaderTree => "Tree",
            Self::HeaderProcess | Self::InfoProcess => "Process",
            Self::InfoJob => "Job",
        }
    }

    /// Append this builder's content to `tile`.
    ///
    /// # Errors
    ///
    /// Returns [`MxError::RecordKind`] when `record` is not the kind this
    /// builder expects, or [`MxError::MissingField`] when a required field
    /// of the record is empty. The tile is left untouched on error.
    pub fn build(self, record: &Record, tile: &mut Tile) -> Result<(), MxError> {
        match (self, record) {
            (Self::HeaderTree, Record::Tree(tree)) => {
                tree.validate()?;
                header_tree(tree, tile);
            }
            (Self::HeaderProcess, Record::Process(process)) => {
                process.validate()?;
                header_process(process, tile);
            }
            (Self::InfoProcess, Record::Process(process)) => {
                process.validate()?;
                info_process(process, tile);
            }
            (Self::InfoJob, Record::Job(job)) => {
                job.validate()?;
                info_job(job, tile);
            }
            _ => {
                return Err(MxError::RecordKind {
                    builder: self.name(),
                    expected: self.expects(),
                    found: record.kind(),
                });
            }
        }
        Ok(())
    }
}

/// Render a list the way tiles display it: `[a, b]`, or `[]` when empty.
#[must_use]
pub fn format_list(items: &[String]) -> String {
    format!("[{}]", items.join(", "))
}

fn header_tree(tree: &Tree, tile: &mut Tile) {
    tile.append_pair("Tree Name", tree.tree_name.as_str());
    tile.append_pair("Dependent On", format_list(&tree.dependent_on));
    tile.append_pair("Dependant Trees", format_list(&tree.dependant_trees));
}

fn header_process(process: &Process, tile: &mut Tile) {
    tile.append_pair(
        "Trigger On/Alive",
        format!("{}/{}", process.is_on, process.is_alive),
    );
    tile.append_pair("Process Name", process.process_name.as_str());
    tile.append_pair("Next Timeperiod", process.next_timeperiod.as_str());
    tile.append_pair("Next Run In", process.next_run_in.as_str());
    tile.append_pair(
        "Reprocessing Queue",
        format_list(&process.reprocessing_queue),
    );
    tile.append(ContentBlock::Command {
        caption: "Trigger Now".to_string(),
        target: CommandTarget::new(process.process_name.as_str(), ProcessAction::TriggerNow),
    });
    let (caption, toggle) = if process.is_on {
        ("Deactivate Trigger", ProcessAction::DeactivateTrigger)
    } else {
        ("Activate Trigger", ProcessAction::ActivateTrigger)
    };
    tile.append(ContentBlock::Command {
        caption: caption.to_string(),
        target: CommandTarget::new(process.process_name.as_str(), toggle),
    });
}

fn info_process(process: &Process, tile: &mut Tile) {
    tile.append_pair("Process Name", process.process_name.as_str());
    tile.append_pair("Time Qualifier", process.time_qualifier.as_str());
    tile.append_pair("State Machine", process.state_machine.as_str());
    tile.append_pair("Blocking type", process.blocking_type.as_str());
    tile.append_pair(
        "Run On Active Timeperiod",
        process.run_on_active_timeperiod.to_string(),
    );
    tile.append(ContentBlock::text("Trigger Frequency"));
    tile.append(ContentBlock::TextInput {
        name: INTERVAL_INPUT.to_string(),
        value: process.trigger_frequency.clone(),
        size: INTERVAL_SIZE,
        max_length: INTERVAL_MAX_LENGTH,
        target: CommandTarget::new(
            process.process_name.as_str(),
            ProcessAction::ChangeInterval,
        ),
    });
}

fn info_job(job: &Job, tile: &mut Tile) {
    tile.set_category(job.state.as_str());
    tile.append(ContentBlock::Checkbox {
        name: BATCH_PROCESSING.to_string(),
        value: JobKey {
            process_name: job.process_name.clone(),
            timeperiod: job.timeperiod.clone(),
        },
    });
    tile.append(ContentBlock::text(format!(
        "p/t: {}/{}",
        job.process_name, tile.id
    )));
    tile.append(ContentBlock::text(format!("timeperiod: {}", job.timeperiod)));
    tile.append(ContentBlock::text(format!("state: {}", job.state)));
    tile.append(ContentBlock::text(format!("#fails: {}", job.num_failed)));
    tile.append(ContentBlock::action(
        "Get Uow",
        ViewerRequest::new(
            ViewerAction::GetUow,
            job.timeperiod.as_str(),
            job.process_name.as_str(),
        ),
    ));
    tile.append(ContentBlock::action(
        "View Log",
        ViewerRequest::new(
            ViewerAction::GetLog,
            job.timeperiod.as_str(),
            job.process_name.as_str(),
        ),
    ));
}
