//! Records displayed on the dashboard: trees, processes and jobs.
//!
//! A [`Tree`] groups scheduled processes; a [`Process`] is a recurring
//! scheduled unit; a [`Job`] is one execution of a process for a time period.
//! [`Record`] is the tagged union tile builders dispatch on.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::command::ProcessCommand;
use crate::error::{ArgumentError, MissingFieldError, MxError};

/// Top-level grouping of related processes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub tree_name: String,
    /// Trees this tree depends on.
    #[serde(default)]
    pub dependent_on: Vec<String>,
    /// Trees depending on this tree.
    #[serde(default)]
    pub dependant_trees: Vec<String>,
    /// Owned processes, in display order.
    #[serde(default)]
    pub processes: Vec<String>,
}

impl Tree {
    /// Create a tree with no dependencies.
    #[must_use]
    pub fn new(tree_name: impl Into<String>, processes: Vec<String>) -> Self {
        Self {
            tree_name: tree_name.into(),
            dependent_on: Vec::new(),
            dependant_trees: Vec::new(),
            processes,
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`MxError::MissingField`] when `tree_name` is empty, and
    /// [`MxError::InvalidArgument`] when a process name repeats.
    pub fn validate(&self) -> Result<(), MxError> {
        if self.tree_name.is_empty() {
            return Err(MissingFieldError {
                record: "Tree",
                field: "tree_name",
            }
            .into());
        }
        let mut seen = HashSet::new();
        for process in &self.processes {
            if !seen.insert(process.as_str()) {
                return Err(ArgumentError::DuplicateProcess {
                    tree: self.tree_name.clone(),
                    process: process.clone(),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// A named, recurring scheduled unit and its trigger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub process_name: String,
    pub is_on: bool,
    pub is_alive: bool,
    pub next_timeperiod: String,
    pub next_run_in: String,
    pub reprocessing_queue: Vec<String>,
    pub time_qualifier: String,
    pub state_machine: String,
    pub blocking_type: String,
    pub run_on_active_timeperiod: bool,
    /// Trigger interval as text, e.g. `every 600 sec`.
    pub trigger_frequency: String,
}

impl Process {
    /// Create a builder for constructing a [`Process`].
    #[must_use]
    pub fn builder() -> ProcessBuilder {
        ProcessBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`MxError::MissingField`] for the first displayed text field
    /// that is empty. Only the reprocessing queue may be empty.
    pub fn validate(&self) -> Result<(), MxError> {
        let required = [
            ("process_name", &self.process_name),
            ("next_timeperiod", &self.next_timeperiod),
            ("next_run_in", &self.next_run_in),
            ("time_qualifier", &self.time_qualifier),
            ("state_machine", &self.state_machine),
            ("blocking_type", &self.blocking_type),
            ("trigger_frequency", &self.trigger_frequency),
        ];
        match required.into_iter().find(|(_, value)| value.is_empty()) {
            Some((field, _)) => Err(MissingFieldError {
                record: "Process",
                field,
            }
            .into()),
            None => Ok(()),
        }
    }

    /// Apply an operator command to this entry.
    ///
    /// Triggering a run leaves the entry as it is; the scheduler picks the
    /// run up on its own.
    pub fn apply(&mut self, command: &ProcessCommand) {
        match command {
            ProcessCommand::ChangeInterval { interval } => {
                self.trigger_frequency.clone_from(interval);
            }
            ProcessCommand::TriggerNow => {}
            ProcessCommand::ActivateTrigger => self.is_on = true,
            ProcessCommand::DeactivateTrigger => self.is_on = false,
        }
    }
}

/// Step-by-step builder for [`Process`].
#[derive(Debug, Default)]
pub struct ProcessBuilder {
    process_name: Option<String>,
    is_on: bool,
    is_alive: bool,
    next_timeperiod: Option<String>,
    next_run_in: Option<String>,
    reprocessing_queue: Vec<String>,
    time_qualifier: Option<String>,
    state_machine: Option<String>,
    blocking_type: Option<String>,
    run_on_active_timeperiod: bool,
    trigger_frequency: Option<String>,
}

impl ProcessBuilder {
    #[must_use]
    pub fn process_name(mut self, name: impl Into<String>) -> Self {
        self.process_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn is_on(mut self, is_on: bool) -> Self {
        self.is_on = is_on;
        self
    }

    #[must_use]
    pub fn is_alive(mut self, is_alive: bool) -> Self {
        self.is_alive = is_alive;
        self
    }

    #[must_use]
    pub fn next_timeperiod(mut self, timeperiod: impl Into<String>) -> Self {
        self.next_timeperiod = Some(timeperiod.into());
        self
    }

    #[must_use]
    pub fn next_run_in(mut self, countdown: impl Into<String>) -> Self {
        self.next_run_in = Some(countdown.into());
        self
    }

    #[must_use]
    pub fn reprocess(mut self, timeperiod: impl Into<String>) -> Self {
        self.reprocessing_queue.push(timeperiod.into());
        self
    }

    #[must_use]
    pub fn time_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.time_qualifier = Some(qualifier.into());
        self
    }

    #[must_use]
    pub fn state_machine(mut self, kind: impl Into<String>) -> Self {
        self.state_machine = Some(kind.into());
        self
    }

    #[must_use]
    pub fn blocking_type(mut self, policy: impl Into<String>) -> Self {
        self.blocking_type = Some(policy.into());
        self
    }

    #[must_use]
    pub fn run_on_active_timeperiod(mut self, flag: bool) -> Self {
        self.run_on_active_timeperiod = flag;
        self
    }

    #[must_use]
    pub fn trigger_frequency(mut self, frequency: impl Into<String>) -> Self {
        self.trigger_frequency = Some(frequency.into());
        self
    }

    /// Consume the builder, validate, and return a [`Process`].
    ///
    /// # Errors
    ///
    /// Returns [`MxError::MissingField`] if any displayed field other than
    /// the reprocessing queue was not provided.
    pub fn build(self) -> Result<Process, MxError> {
        let process = Process {
            process_name: self.process_name.unwrap_or_default(),
            is_on: self.is_on,
            is_alive: self.is_alive,
            next_timeperiod: self.next_timeperiod.unwrap_or_default(),
            next_run_in: self.next_run_in.unwrap_or_default(),
            reprocessing_queue: self.reprocessing_queue,
            time_qualifier: self.time_qualifier.unwrap_or_default(),
            state_machine: self.state_machine.unwrap_or_default(),
            blocking_type: self.blocking_type.unwrap_or_default(),
            run_on_active_timeperiod: self.run_on_active_timeperiod,
            trigger_frequency: self.trigger_frequency.unwrap_or_default(),
        };
        process.validate()?;
        Ok(process)
    }
}

/// Lifecycle state of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    #[default]
    #[serde(rename = "state_embryo")]
    Embryo,
    #[serde(rename = "state_in_progress")]
    InProgress,
    #[serde(rename = "state_final_run")]
    FinalRun,
    #[serde(rename = "state_processed")]
    Processed,
    #[serde(rename = "state_skipped")]
    Skipped,
}

impl JobState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Embryo => "state_embryo",
            Self::InProgress => "state_in_progress",
            Self::FinalRun => "state_final_run",
            Self::Processed => "state_processed",
            Self::Skipped => "state_skipped",
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scheduled execution of a process for a time period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub process_name: String,
    pub timeperiod: String,
    pub state: JobState,
    pub num_failed: u32,
}

impl Job {
    #[must_use]
    pub fn new(
        process_name: impl Into<String>,
        timeperiod: impl Into<String>,
        state: JobState,
        num_failed: u32,
    ) -> Self {
        Self {
            process_name: process_name.into(),
            timeperiod: timeperiod.into(),
            state,
            num_failed,
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`MxError::MissingField`] when `process_name` or `timeperiod`
    /// is empty.
    pub fn validate(&self) -> Result<(), MxError> {
        if self.process_name.is_empty() {
            return Err(MissingFieldError {
                record: "Job",
                field: "process_name",
            }
            .into());
        }
        if self.timeperiod.is_empty() {
            return Err(MissingFieldError {
                record: "Job",
                field: "timeperiod",
            }
            .into());
        }
        Ok(())
    }
}

/// Any record a tile can be built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Record {
    Tree(Tree),
    Process(Process),
    Job(Job),
}

impl Record {
    /// Name of the variant, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Tree(_) => "Tree",
            Self::Process(_) => "Process",
            Self::Job(_) => "Job",
        }
    }
}

impl From<Tree> for Record {
    fn from(tree: Tree) -> Self {
        Self::Tree(tree)
    }
}

impl From<Process> for Record {
    fn from(process: Process) -> Self {
        Self::Process(process)
    }
}

impl From<Job> for Record {
    fn from(job: Job) -> Self {
        Self::Job(job)
    }
}

/// The ordered set of trees a dashboard is initialized from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hierarchy {
    pub trees: Vec<Tree>,
}

impl Hierarchy {
    #[must_use]
    pub fn new(trees: Vec<Tree>) -> Self {
        Self { trees }
    }

    /// Validate every tree.
    ///
    /// # Errors
    ///
    /// Returns the first tree validation failure.
    pub fn validate(&self) -> Result<(), MxError> {
        self.trees.iter().try_for_each(Tree::validate)
    }
}
