//! # mxgrid-adapter-mock
//!
//! Deterministic data source used for demonstration and tests.
//!
//! ## Provided data
//!
//! | Tree | Processes |
//! |------|-----------|
//! | `TreeSite` | `SiteYearly`, `SiteMonthly`, `SiteDaily`, `SiteHourly` |
//! | `TreeAlert` | `AlertDaily` |
//!
//! Every process entry and job record carries the same fixed values; only
//! the process name changes. Viewer payloads report that nothing is related.
//!
//! Process commands are kept in memory, shared by every clone, and later
//! entries reflect them. Nothing survives a restart.
//!
//! ## Dependency rule
//!
//! Depends on `mxgrid-app` (port traits) and `mxgrid-domain` only.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use mxgrid_app::ports::DataSource;
use mxgrid_domain::command::ProcessCommand;
use mxgrid_domain::error::MxError;
use mxgrid_domain::record::{Job, JobState, Process, Tree};
use mxgrid_domain::viewer::{ViewerAction, ViewerRequest};

pub const MOCK_TIMEPERIOD: &str = "2019098822";
pub const MOCK_NEXT_RUN_IN: &str = "25:10";
pub const MOCK_TRIGGER_FREQUENCY: &str = "every 600 sec";
pub const MOCK_NUM_FAILED: u32 = 10;

/// Data source returning fixed records.
#[derive(Debug, Clone)]
pub struct MockDataSource {
    trees: Vec<Tree>,
    updated: Arc<Mutex<HashMap<String, Process>>>,
}

impl Default for MockDataSource {
    fn default() -> Self {
        Self::new(vec![
            Tree::new(
                "TreeSite",
                ["SiteYearly", "SiteMonthly", "SiteDaily", "SiteHourly"]
                    .map(String::from)
                    .to_vec(),
            ),
            Tree::new("TreeAlert", vec!["AlertDaily".to_string()]),
        ])
    }
}

impl MockDataSource {
    /// Serve `trees` instead of the built-in hierarchy.
    #[must_use]
    pub fn new(trees: Vec<Tree>) -> Self {
        Self {
            trees,
            updated: Arc::default(),
        }
    }

    /// Fixed process entry for `process_name`.
    ///
    /// # Errors
    ///
    /// Returns [`MxError::MissingField`] when `process_name` is empty.
    pub fn process(process_name: &str) -> Result<Process, MxError> {
        Process::builder()
            .process_name(process_name)
            .is_on(true)
            .is_alive(true)
            .next_timeperiod(MOCK_TIMEPERIOD)
            .next_run_in(MOCK_NEXT_RUN_IN)
            .time_qualifier("_hourly")
            .state_machine("descrete")
            .blocking_type("blocking_children")
            .run_on_active_timeperiod(false)
            .trigger_frequency(MOCK_TRIGGER_FREQUENCY)
            .build()
    }

    /// Fixed job record for `process_name`.
    ///
    /// # Errors
    ///
    /// Returns [`MxError::MissingField`] when `process_name` is empty.
    pub fn job(process_name: &str) -> Result<Job, MxError> {
        let job = Job::new(
            process_name,
            MOCK_TIMEPERIOD,
            JobState::InProgress,
            MOCK_NUM_FAILED,
        );
        job.validate()?;
        Ok(job)
    }

    #[must_use]
    pub fn view(request: &ViewerRequest) -> serde_json::Value {
        let response = match request.action {
            ViewerAction::GetUow => "no related unit_of_work",
            ViewerAction::GetLog => "no related uow log",
        };
        serde_json::json!({ "response": response })
    }

    fn entry(&self, process_name: &str) -> Result<Process, MxError> {
        let updated = self.updated.lock().unwrap_or_else(PoisonError::into_inner);
        match updated.get(process_name) {
            Some(process) => Ok(process.clone()),
            None => Self::process(process_name),
        }
    }

    fn knows(&self, process_name: &str) -> bool {
        self.trees
            .iter()
            .any(|tree| tree.processes.iter().any(|name| name == process_name))
    }

    fn apply(&self, process_name: &str, command: &ProcessCommand) -> Result<Process, MxError> {
        if !self.knows(process_name) {
            return Err(MxError::ProcessNotFound {
                process: process_name.to_string(),
            });
        }
        let mut process = self.entry(process_name)?;
        process.apply(command);
        self.updated
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(process_name.to_string(), process.clone());
        tracing::info!(
            process = process_name,
            action = %command.action(),
            is_on = process.is_on,
            trigger_frequency = %process.trigger_frequency,
            "mock process updated"
        );
        Ok(process)
    }
}

impl DataSource for MockDataSource {
    fn trees(&self) -> impl Future<Output = Result<Vec<Tree>, MxError>> + Send {
        let trees = self.trees.clone();
        async { Ok(trees) }
    }

    fn process_entry(
        &self,
        process_name: &str,
    ) -> impl Future<Output = Result<Process, MxError>> + Send {
        let result = self.entry(process_name);
        async { result }
    }

    fn apply_command(
        &self,
        process_name: &str,
        command: &ProcessCommand,
    ) -> impl Future<Output = Result<Process, MxError>> + Send {
        let result = self.apply(process_name, command);
        async { result }
    }

    fn job_record(&self, process_name: &str) -> impl Future<Output = Result<Job, MxError>> + Send {
        let result = Self::job(process_name);
        async { result }
    }

    fn object_view(
        &self,
        request: &ViewerRequest,
    ) -> impl Future<Output = Result<serde_json::Value, MxError>> + Send {
        let payload = Self::view(request);
        async { Ok(payload) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_serve_two_trees_in_order() {
        let source = MockDataSource::default();

        let trees = source.trees().await.unwrap();

        let names: Vec<&str> = trees.iter().map(|tree| tree.tree_name.as_str()).collect();
        assert_eq!(names, vec!["TreeSite", "TreeAlert"]);
        assert_eq!(
            trees[0].processes,
            vec!["SiteYearly", "SiteMonthly", "SiteDaily", "SiteHourly"]
        );
        assert!(trees[0].dependent_on.is_empty());
    }

    #[tokio::test]
    async fn should_return_fixed_process_entry() {
        let source = MockDataSource::default();

        let process = source.process_entry("SiteDaily").await.unwrap();

        assert_eq!(process.process_name, "SiteDaily");
        assert!(process.is_on && process.is_alive);
        assert_eq!(process.next_timeperiod, "2019098822");
        assert_eq!(process.next_run_in, "25:10");
        assert!(process.reprocessing_queue.is_empty());
        assert_eq!(process.time_qualifier, "_hourly");
        assert_eq!(process.state_machine, "descrete");
        assert_eq!(process.blocking_type, "blocking_children");
        assert!(!process.run_on_active_timeperiod);
        assert_eq!(process.trigger_frequency, "every 600 sec");
    }

    #[tokio::test]
    async fn should_return_in_progress_job_with_failures() {
        let source = MockDataSource::default();

        let job = source.job_record("AlertDaily").await.unwrap();

        assert_eq!(job.process_name, "AlertDaily");
        assert_eq!(job.timeperiod, "2019098822");
        assert_eq!(job.state, JobState::InProgress);
        assert_eq!(job.num_failed, 10);
    }

    #[tokio::test]
    async fn should_reject_empty_process_name() {
        let source = MockDataSource::default();

        assert!(matches!(
            source.job_record("").await,
            Err(MxError::MissingField(_))
        ));
        assert!(matches!(
            source.process_entry("").await,
            Err(MxError::MissingField(_))
        ));
    }

    #[tokio::test]
    async fn should_serve_changed_interval_to_every_clone() {
        let source = MockDataSource::default();
        let shared = source.clone();
        let command = ProcessCommand::ChangeInterval {
            interval: "every 30 sec".to_string(),
        };

        let updated = source.apply_command("SiteDaily", &command).await.unwrap();

        assert_eq!(updated.trigger_frequency, "every 30 sec");
        let entry = shared.process_entry("SiteDaily").await.unwrap();
        assert_eq!(entry.trigger_frequency, "every 30 sec");
        let untouched = shared.process_entry("SiteHourly").await.unwrap();
        assert_eq!(untouched.trigger_frequency, MOCK_TRIGGER_FREQUENCY);
    }

    #[tokio::test]
    async fn should_toggle_trigger_and_keep_it_across_commands() {
        let source = MockDataSource::default();

        source
            .apply_command("AlertDaily", &ProcessCommand::DeactivateTrigger)
            .await
            .unwrap();
        let triggered = source
            .apply_command("AlertDaily", &ProcessCommand::TriggerNow)
            .await
            .unwrap();

        assert!(!triggered.is_on);
        let reactivated = source
            .apply_command("AlertDaily", &ProcessCommand::ActivateTrigger)
            .await
            .unwrap();
        assert!(reactivated.is_on);
    }

    #[tokio::test]
    async fn should_reject_command_for_unknown_process() {
        let source = MockDataSource::default();

        let result = source
            .apply_command("Nowhere", &ProcessCommand::TriggerNow)
            .await;

        assert!(matches!(
            result,
            Err(MxError::ProcessNotFound { process }) if process == "Nowhere"
        ));
    }

    #[tokio::test]
    async fn should_answer_viewer_requests_per_action() {
        let source = MockDataSource::default();
        let uow = ViewerRequest::new(ViewerAction::GetUow, "2019098822", "SiteDaily");
        let log = ViewerRequest::new(ViewerAction::GetLog, "2019098822", "SiteDaily");

        assert_eq!(
            source.object_view(&uow).await.unwrap(),
            serde_json::json!({ "response": "no related unit_of_work" })
        );
        assert_eq!(
            source.object_view(&log).await.unwrap()["response"],
            "no related uow log"
        );
    }
}
