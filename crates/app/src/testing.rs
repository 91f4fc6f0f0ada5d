//! Test doubles shared by the unit tests of this crate.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use mxgrid_domain::command::ProcessCommand;
use mxgrid_domain::error::MxError;
use mxgrid_domain::grid::{PixelRect, Placement, Viewport};
use mxgrid_domain::id::{ContainerId, TileId};
use mxgrid_domain::record::{Job, JobState, Process, Tree};
use mxgrid_domain::template::Template;
use mxgrid_domain::viewer::{ViewerRequest, WindowPreset};

use crate::ports::{DataSource, LayoutEngine, ViewerLauncher};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutCall {
    SetWindow(Viewport),
    Resize(usize),
    UpdateTiles(ContainerId, Vec<TileId>),
    Redraw(ContainerId, usize, bool),
}

/// Layout engine knowing a fixed set of containers, recording every call.
pub struct RecordingLayout {
    containers: Mutex<HashMap<ContainerId, Viewport>>,
    pub calls: Mutex<Vec<LayoutCall>>,
}

impl RecordingLayout {
    pub fn with_containers(names: &[&str]) -> Self {
        let containers = names
            .iter()
            .map(|name| (ContainerId::new(*name).unwrap(), Viewport::new(1000, 800)))
            .collect();
        Self {
            containers: Mutex::new(containers),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn remove(&self, name: &str) {
        self.containers
            .lock()
            .unwrap()
            .remove(&ContainerId::new(name).unwrap());
    }

    pub fn calls(&self) -> Vec<LayoutCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl LayoutEngine for RecordingLayout {
    fn viewport(&self, container: &ContainerId) -> Option<Viewport> {
        self.containers.lock().unwrap().get(container).copied()
    }

    fn set_window(&self, window: Viewport) {
        for viewport in self.containers.lock().unwrap().values_mut() {
            *viewport = window;
        }
        self.calls.lock().unwrap().push(LayoutCall::SetWindow(window));
    }

    fn resize(&self, _viewport: Viewport, template: &Template, num_cols: usize) -> Vec<PixelRect> {
        self.calls.lock().unwrap().push(LayoutCall::Resize(num_cols));
        template
            .rects()
            .iter()
            .map(|rect| PixelRect {
                left: u32::try_from(rect.x).unwrap() * 10,
                top: u32::try_from(rect.y).unwrap() * 10,
                width: u32::try_from(rect.width).unwrap() * 10,
                height: u32::try_from(rect.height).unwrap() * 10,
            })
            .collect()
    }

    fn update_tiles(&self, container: &ContainerId, ids: &[TileId]) {
        self.calls
            .lock()
            .unwrap()
            .push(LayoutCall::UpdateTiles(container.clone(), ids.to_vec()));
    }

    fn redraw(&self, container: &ContainerId, placements: &[Placement], force: bool) {
        self.calls.lock().unwrap().push(LayoutCall::Redraw(
            container.clone(),
            placements.len(),
            force,
        ));
    }
}

/// Viewer launcher remembering what it was asked to open.
#[derive(Default)]
pub struct RecordingLauncher {
    pub opened: Mutex<Vec<(ViewerRequest, WindowPreset)>>,
}

impl ViewerLauncher for RecordingLauncher {
    fn open(&self, request: &ViewerRequest, preset: WindowPreset) {
        self.opened.lock().unwrap().push((request.clone(), preset));
    }
}

/// A fully populated process entry.
pub fn fixed_process(process_name: &str) -> Process {
    Process::builder()
        .process_name(process_name)
        .is_on(true)
        .next_timeperiod("2019098822")
        .next_run_in("25:10")
        .time_qualifier("_daily")
        .state_machine("discrete")
        .blocking_type("blocking_children")
        .trigger_frequency("every 600 sec")
        .build()
        .unwrap()
}

/// One tree of two processes; commands update an in-memory copy.
#[derive(Default)]
pub struct FixedSource {
    pub broken_process: Option<&'static str>,
    pub processes: Mutex<HashMap<String, Process>>,
}

impl FixedSource {
    pub fn broken(process_name: &'static str) -> Self {
        Self {
            broken_process: Some(process_name),
            ..Self::default()
        }
    }

    fn entry(&self, process_name: &str) -> Result<Process, MxError> {
        if self.broken_process == Some(process_name) {
            return Err(MxError::source(std::io::Error::other("backend down")));
        }
        Ok(self
            .processes
            .lock()
            .unwrap()
            .get(process_name)
            .cloned()
            .unwrap_or_else(|| fixed_process(process_name)))
    }
}

impl DataSource for FixedSource {
    fn trees(&self) -> impl Future<Output = Result<Vec<Tree>, MxError>> + Send {
        async {
            Ok(vec![Tree::new(
                "TreeSite",
                vec!["SiteDaily".to_string(), "SiteHourly".to_string()],
            )])
        }
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
        let result = self.entry(process_name).map(|mut process| {
            process.apply(command);
            self.processes
                .lock()
                .unwrap()
                .insert(process_name.to_string(), process.clone());
            process
        });
        async { result }
    }

    fn job_record(&self, process_name: &str) -> impl Future<Output = Result<Job, MxError>> + Send {
        let job = Job::new(process_name, "2019098822", JobState::InProgress, 10);
        async { Ok(job) }
    }

    fn object_view(
        &self,
        _request: &ViewerRequest,
    ) -> impl Future<Output = Result<serde_json::Value, MxError>> + Send {
        async { Ok(serde_json::Value::Null) }
    }
}
