//! Viewer requests — what a job tile asks the viewer window to show.

use std::fmt;
use std::str::FromStr;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use crate::error::{ArgumentError, MxError};

/// Path the viewer window is opened on.
pub const VIEWER_PATH: &str = "/object_viewer/";

// Characters jQuery's `$.param` leaves unescaped; spaces become `+`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Encode one query value the way `$.param` does.
fn encode_value(value: &str) -> String {
    // `%` itself is escaped, so every `%20` left here was a space.
    utf8_percent_encode(value, QUERY_VALUE)
        .to_string()
        .replace("%20", "+")
}

/// What the viewer should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewerAction {
    /// The unit of work behind a job.
    #[serde(rename = "action_get_uow")]
    GetUow,
    /// The processing log of a job.
    #[serde(rename = "action_get_log")]
    GetLog,
}

impl ViewerAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetUow => "action_get_uow",
            Self::GetLog => "action_get_log",
        }
    }

    /// Window size the action opens with.
    #[must_use]
    pub fn preset(self) -> WindowPreset {
        match self {
            Self::GetUow => WindowPreset::OBJECT_VIEWER,
            Self::GetLog => WindowPreset::LOG_VIEWER,
        }
    }
}

impl fmt::Display for ViewerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewerAction {
    type Err = MxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "action_get_uow" => Ok(Self::GetUow),
            "action_get_log" => Ok(Self::GetLog),
            other => Err(ArgumentError::UnknownAction(other.to_string()).into()),
        }
    }
}

/// Size and position of a viewer window, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowPreset {
    pub width: u32,
    pub height: u32,
    pub screen_x: u32,
    pub screen_y: u32,
}

impl WindowPreset {
    pub const OBJECT_VIEWER: Self = Self {
        width: 400,
        height: 350,
        screen_x: 400,
        screen_y: 200,
    };

    pub const LOG_VIEWER: Self = Self {
        width: 720,
        height: 480,
        screen_x: 400,
        screen_y: 200,
    };

    /// Window feature string in the `window.open` format.
    #[must_use]
    pub fn features(&self) -> String {
        format!(
            "width={},height={},screenX={},screenY={},scrollbars=1",
            self.width, self.height, self.screen_x, self.screen_y
        )
    }
}

/// Parameters of a viewer window.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewerRequest {
    pub action: ViewerAction,
    pub timeperiod: String,
    pub process_name: String,
}

impl ViewerRequest {
    #[must_use]
    pub fn new(
        action: ViewerAction,
        timeperiod: impl Into<String>,
        process_name: impl Into<String>,
    ) -> Self {
        Self {
            action,
            timeperiod: timeperiod.into(),
            process_name: process_name.into(),
        }
    }

    /// URL the viewer window opens, with `$.param`-encoded query parameters.
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "{VIEWER_PATH}?action={}&timeperiod={}&process_name={}",
            self.action.as_str(),
            encode_value(&self.timeperiod),
            encode_value(&self.process_name),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_viewer_url_with_query_parameters() {
        let request = ViewerRequest::new(ViewerAction::GetUow, "2019098822", "SiteDaily");
        assert_eq!(
            request.url(),
            "/object_viewer/?action=action_get_uow&timeperiod=2019098822&process_name=SiteDaily"
        );
    }

    #[test]
    fn should_escape_reserved_characters_in_url() {
        let request = ViewerRequest::new(ViewerAction::GetLog, "2019 09", "a&b=c");
        assert_eq!(
            request.url(),
            "/object_viewer/?action=action_get_log&timeperiod=2019+09&process_name=a%26b%3Dc"
        );
    }

    #[test]
    fn should_encode_query_values_like_jquery_param() {
        let cases = [
            ("it's (done)!", "it's+(done)!"),
            ("a*b~c", "a*b~c"),
            ("100% + \"x\"", "100%25+%2B+%22x%22"),
            ("a/b?c#d", "a%2Fb%3Fc%23d"),
            ("caf\u{e9}", "caf%C3%A9"),
        ];
        for (raw, encoded) in cases {
            assert_eq!(encode_value(raw), encoded, "encoding {raw:?}");
        }
    }

    #[test]
    fn should_pick_window_preset_per_action() {
        assert_eq!(ViewerAction::GetUow.preset().width, 400);
        assert_eq!(ViewerAction::GetUow.preset().height, 350);
        assert_eq!(ViewerAction::GetLog.preset().width, 720);
        assert_eq!(ViewerAction::GetLog.preset().height, 480);
    }

    #[test]
    fn should_format_window_features() {
        assert_eq!(
            WindowPreset::OBJECT_VIEWER.features(),
            "width=400,height=350,screenX=400,screenY=200,scrollbars=1"
        );
    }

    #[test]
    fn should_parse_known_actions_and_reject_others() {
        assert_eq!(
            "action_get_log".parse::<ViewerAction>().unwrap(),
            ViewerAction::GetLog
        );
        assert!(matches!(
            "action_trigger_now".parse::<ViewerAction>(),
            Err(MxError::InvalidArgument(ArgumentError::UnknownAction(_)))
        ));
    }

    #[test]
    fn should_serialize_request_with_action_wire_name() {
        let request = ViewerRequest::new(ViewerAction::GetLog, "2019098822", "SiteDaily");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["action"], "action_get_log");
        assert_eq!(json["process_name"], "SiteDaily");
    }
}
