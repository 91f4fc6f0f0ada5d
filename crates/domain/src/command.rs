//! Operator commands on a process: change its trigger interval, run it now,
//! or switch its trigger on and off.

use std::fmt;
use std::str::FromStr;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use crate::error::{ArgumentError, MxError};

const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Which command a process control posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessAction {
    #[serde(rename = "action_change_interval")]
    ChangeInterval,
    #[serde(rename = "action_trigger_now")]
    TriggerNow,
    #[serde(rename = "action_activate_trigger")]
    ActivateTrigger,
    #[serde(rename = "action_deactivate_trigger")]
    DeactivateTrigger,
}

impl ProcessAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ChangeInterval => "action_change_interval",
            Self::TriggerNow => "action_trigger_now",
            Self::ActivateTrigger => "action_activate_trigger",
            Self::DeactivateTrigger => "action_deactivate_trigger",
        }
    }
}

impl fmt::Display for ProcessAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessAction {
    type Err = MxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "action_change_interval" => Ok(Self::ChangeInterval),
            "action_trigger_now" => Ok(Self::TriggerNow),
            "action_activate_trigger" => Ok(Self::ActivateTrigger),
            "action_deactivate_trigger" => Ok(Self::DeactivateTrigger),
            other => Err(ArgumentError::UnknownAction(other.to_string()).into()),
        }
    }
}

/// A validated command, ready to apply to a process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessCommand {
    ChangeInterval { interval: String },
    TriggerNow,
    ActivateTrigger,
    DeactivateTrigger,
}

impl ProcessCommand {
    /// Build the command for `action`; only interval changes read `interval`.
    ///
    /// # Errors
    ///
    /// Returns [`MxError::InvalidArgument`] when an interval change carries
    /// no interval, or only whitespace.
    pub fn new(action: ProcessAction, interval: Option<&str>) -> Result<Self, MxError> {
        Ok(match action {
            ProcessAction::ChangeInterval => {
                let interval = interval.map(str::trim).unwrap_or_default();
                if interval.is_empty() {
                    return Err(ArgumentError::EmptyInterval.into());
                }
                Self::ChangeInterval {
                    interval: interval.to_string(),
                }
            }
            ProcessAction::TriggerNow => Self::TriggerNow,
            ProcessAction::ActivateTrigger => Self::ActivateTrigger,
            ProcessAction::DeactivateTrigger => Self::DeactivateTrigger,
        })
    }

    #[must_use]
    pub fn action(&self) -> ProcessAction {
        match self {
            Self::ChangeInterval { .. } => ProcessAction::ChangeInterval,
            Self::TriggerNow => ProcessAction::TriggerNow,
            Self::ActivateTrigger => ProcessAction::ActivateTrigger,
            Self::DeactivateTrigger => ProcessAction::DeactivateTrigger,
        }
    }
}

/// Where a process control posts to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandTarget {
    pub process_name: String,
    pub action: ProcessAction,
}

impl CommandTarget {
    #[must_use]
    pub fn new(process_name: impl Into<String>, action: ProcessAction) -> Self {
        Self {
            process_name: process_name.into(),
            action,
        }
    }

    /// Form action path, with the process name escaped as a path segment.
    #[must_use]
    pub fn path(&self) -> String {
        format!(
            "/processes/{}/actions/{}",
            utf8_percent_encode(&self.process_name, PATH_SEGMENT),
            self.action.as_str()
        )
    }
}
