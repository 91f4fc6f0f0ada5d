//! Dashboard service — one-time initialization of every grid.
//!
//! Walks the tree → process → job hierarchy in order and assembles:
//!
//! 1. the header grid of the tree,
//! 2. the header grid of each of its processes,
//! 3. for each process, the tree's info grid from the process entry, then
//!    the process's info grid from a job record, `jobs_per_process` times.
//!
//! Steps 3 rebuild the same containers on every iteration, so the last
//! process (and last job) wins. Rebuilds are kept and reported.

use std::collections::HashSet;
use std::sync::Arc;

use mxgrid_domain::error::MxError;
use mxgrid_domain::id::ContainerId;
use mxgrid_domain::record::{Hierarchy, Record};
use mxgrid_domain::template::Template;

use crate::assembler::GridAssembler;
use crate::builders::TileBuilder;
use crate::ports::{DataSource, LayoutEngine};

/// Number of job tiles built per process when not configured.
pub const DEFAULT_JOBS_PER_PROCESS: usize = 10;

/// Every container the dashboard page holds for `hierarchy`, in page order.
///
/// Each tree and each process gets a header and an info container.
#[must_use]
pub fn page_containers(hierarchy: &Hierarchy) -> Vec<ContainerId> {
    let mut containers = Vec::new();
    for tree in &hierarchy.trees {
        containers.push(ContainerId::header(&tree.tree_name));
        containers.extend(tree.processes.iter().map(|process| ContainerId::header(process)));
        containers.push(ContainerId::info(&tree.tree_name));
        containers.extend(tree.processes.iter().map(|process| ContainerId::info(process)));
    }
    containers
}

/// A grid that could not be built.
#[derive(Debug)]
pub struct GridFailure {
    pub container: ContainerId,
    pub error: MxError,
}

/// Outcome of [`DashboardService::initialize`].
#[derive(Debug, Default)]
pub struct InitReport {
    /// Successful `assemble` calls, rebuilds included.
    pub built: usize,
    pub failures: Vec<GridFailure>,
    /// Containers assembled more than once, in order of first rebuild.
    pub rebuilt: Vec<ContainerId>,
}

impl InitReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Builds the dashboard grids from a data source.
pub struct DashboardService<L, D> {
    assembler: Arc<GridAssembler<L>>,
    source: Arc<D>,
    jobs_per_process: usize,
}

impl<L: LayoutEngine, D: DataSource> DashboardService<L, D> {
    pub fn new(assembler: Arc<GridAssembler<L>>, source: Arc<D>) -> Self {
        Self {
            assembler,
            source,
            jobs_per_process: DEFAULT_JOBS_PER_PROCESS,
        }
    }

    #[must_use]
    pub fn with_jobs_per_process(mut self, jobs_per_process: usize) -> Self {
        self.jobs_per_process = jobs_per_process;
        self
    }

    /// Load the hierarchy from the data source.
    ///
    /// # Errors
    ///
    /// Returns the data source error, or the first tree validation failure.
    pub async fn load_hierarchy(&self) -> Result<Hierarchy, MxError> {
        let hierarchy = Hierarchy::new(self.source.trees().await?);
        hierarchy.validate()?;
        Ok(hierarchy)
    }

    /// Assemble every grid of `hierarchy`.
    ///
    /// A failing grid never stops the walk; it is recorded in the report.
    pub async fn initialize(&self, hierarchy: &Hierarchy) -> InitReport {
        let mut run = Run::default();

        for tree in &hierarchy.trees {
            let header = ContainerId::header(&tree.tree_name);
            if let Err(err) = tree.validate() {
                run.fail(header, err);
                continue;
            }
            self.build(
                &mut run,
                header,
                Template::header(),
                TileBuilder::HeaderTree,
                Ok(Record::from(tree.clone())),
            );

            for process in &tree.processes {
                let entry = self.source.process_entry(process).await;
                self.build(
                    &mut run,
                    ContainerId::header(process),
                    Template::header(),
                    TileBuilder::HeaderProcess,
                    entry.map(Record::from),
                );
            }

            let process_template = Template::info(tree.processes.len());
            let job_template = Template::info(self.jobs_per_process);
            for process in &tree.processes {
                let entry = self.source.process_entry(process).await;
                self.build(
                    &mut run,
                    ContainerId::info(&tree.tree_name),
                    process_template.clone(),
                    TileBuilder::InfoProcess,
                    entry.map(Record::from),
                );

                for _ in 0..self.jobs_per_process {
                    let job = self.source.job_record(process).await;
                    self.build(
                        &mut run,
                        ContainerId::info(process),
                        job_template.clone(),
                        TileBuilder::InfoJob,
                        job.map(Record::from),
                    );
                }
            }
        }

        tracing::info!(
            built = run.report.built,
            failed = run.report.failures.len(),
            rebuilt = run.report.rebuilt.len(),
            "dashboard initialized"
        );
        run.report
    }

    fn build(
        &self,
        run: &mut Run,
        container: ContainerId,
        template: Template,
        builder: TileBuilder,
        record: Result<Record, MxError>,
    ) {
        run.visit(&container);
        let result = record.and_then(|record| {
            self.assembler
                .assemble(container.clone(), template, builder, &record)
        });
        match result {
            Ok(_) => run.report.built += 1,
            Err(err) => run.fail(container, err),
        }
    }
}

#[derive(Default)]
struct Run {
    seen: HashSet<ContainerId>,
    report: InitReport,
}

impl Run {
    fn visit(&mut self, container: &ContainerId) {
        if !self.seen.insert(container.clone()) && !self.report.rebuilt.contains(container) {
            tracing::warn!(
                %container,
                "container rebuilt during initialization, last build wins"
            );
            self.report.rebuilt.push(container.clone());
        }
    }

    fn fail(&mut self, container: ContainerId, error: MxError) {
        tracing::error!(
            %container,
            error = %error,
            cause = ?std::error::Error::source(&error),
            "failed to build grid"
        );
        self.report.failures.push(GridFailure { container, error });
    }
}
