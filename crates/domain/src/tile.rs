//! Tiles — rectangular display units holding ordered content blocks.
//!
//! Content is structured rather than markup, so each rendering target
//! decides how a block looks.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::command::CommandTarget;
use crate::id::TileId;
use crate::viewer::{ViewerAction, ViewerRequest, WindowPreset};

/// Value carried by a job selection checkbox.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobKey {
    pub process_name: String,
    pub timeperiod: String,
}

impl fmt::Display for JobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ process_name: '{}', timeperiod: '{}' }}",
            self.process_name, self.timeperiod
        )
    }
}

/// One entry of a tile's content area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text line (label or value).
    Text { text: String },
    /// Selection checkbox for batch operations.
    Checkbox { name: String, value: JobKey },
    /// Editable single-line text field, submitted to `target`.
    TextInput {
        name: String,
        value: String,
        size: u16,
        max_length: u16,
        target: CommandTarget,
    },
    /// Button that opens a viewer window.
    Action {
        caption: String,
        request: ViewerRequest,
        preset: WindowPreset,
    },
    /// Button posting a process command.
    Command {
        caption: String,
        target: CommandTarget,
    },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Action block whose window preset follows the request's action.
    pub fn action(caption: impl Into<String>, request: ViewerRequest) -> Self {
        let preset = request.action.preset();
        Self::Action {
            caption: caption.into(),
            request,
            preset,
        }
    }

    /// Text shown for the block, whatever its kind.
    #[must_use]
    pub fn caption(&self) -> String {
        match self {
            Self::Text { text } => text.clone(),
            Self::Checkbox { value, .. } => value.to_string(),
            Self::TextInput { value, .. } => value.clone(),
            Self::Action { caption, .. } | Self::Command { caption, .. } => caption.clone(),
        }
    }
}

/// A tile: identifier, content and an optional styling category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub category: Option<String>,
    pub content: Vec<ContentBlock>,
}

impl Tile {
    #[must_use]
    pub fn new(id: TileId) -> Self {
        Self {
            id,
            category: None,
            content: Vec::new(),
        }
    }

    pub fn append(&mut self, block: ContentBlock) {
        self.content.push(block);
    }

    /// Append a label/value pair as two text blocks.
    pub fn append_pair(&mut self, label: &str, value: impl Into<String>) {
        self.content.push(ContentBlock::text(label));
        self.content.push(ContentBlock::text(value));
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = Some(category.into());
    }

    /// Viewer request of the first action block with the given action.
    #[must_use]
    pub fn action(&self, action: ViewerAction) -> Option<(&ViewerRequest, WindowPreset)> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::Action {
                request, preset, ..
            } if request.action == action => Some((request, *preset)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_append_pairs_in_order() {
        let mut tile = Tile::new(TileId::new(1));
        tile.append_pair("Tree Name", "TreeSite");
        let captions: Vec<String> = tile.content.iter().map(ContentBlock::caption).collect();
        assert_eq!(captions, vec!["Tree Name", "TreeSite"]);
    }

    #[test]
    fn should_format_job_key_like_checkbox_value() {
        let key = JobKey {
            process_name: "SiteDaily".to_string(),
            timeperiod: "2019098822".to_string(),
        };
        assert_eq!(
            key.to_string(),
            "{ process_name: 'SiteDaily', timeperiod: '2019098822' }"
        );
    }

    #[test]
    fn should_find_action_by_kind() {
        let mut tile = Tile::new(TileId::new(2));
        tile.append(ContentBlock::action(
            "View Log",
            ViewerRequest::new(ViewerAction::GetLog, "2019098822", "SiteDaily"),
        ));

        let (request, preset) = tile.action(ViewerAction::GetLog).unwrap();
        assert_eq!(request.process_name, "SiteDaily");
        assert_eq!(preset, WindowPreset::LOG_VIEWER);
        assert!(tile.action(ViewerAction::GetUow).is_none());
    }

    #[test]
    fn should_tag_content_blocks_in_json() {
        let json = serde_json::to_value(ContentBlock::text("Process Name")).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["text"], "Process Name");
    }
}
