//! Process controls: interval input, trigger now and trigger toggle (PRG).

use std::str::FromStr;

use axum::extract::{Form, Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

use mxgrid_app::ports::{DataSource, LayoutEngine, ViewerLauncher};
use mxgrid_domain::command::{ProcessAction, ProcessCommand};

use crate::error::ApiError;
use crate::state::AppState;

/// Fields a process control form may post.
#[derive(Debug, Default, Deserialize)]
pub struct CommandForm {
    /// Only sent by the interval input.
    pub interval: Option<String>,
}

/// Response from the process command handler.
pub enum CommandResponse {
    /// Redirect back to the dashboard.
    Redirect(Redirect),
}

impl IntoResponse for CommandResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(redirect) => redirect.into_response(),
        }
    }
}

/// `POST /processes/{process}/actions/{action}`
pub async fn command<L, D, V>(
    State(state): State<AppState<L, D, V>>,
    Path((process, action)): Path<(String, String)>,
    Form(form): Form<CommandForm>,
) -> Result<CommandResponse, ApiError>
where
    L: LayoutEngine + Send + Sync + 'static,
    D: DataSource + Send + Sync + 'static,
    V: ViewerLauncher + Send + Sync + 'static,
{
    let action = ProcessAction::from_str(&action)?;
    let command = ProcessCommand::new(action, form.interval.as_deref())?;
    state.processes.execute(&process, &command).await?;
    Ok(CommandResponse::Redirect(Redirect::to("/")))
}
