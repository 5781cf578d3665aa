use serde::{Deserialize, Serialize};

use crate::component::{Alignment, ComponentId};
use crate::error::Result;
use crate::geometry::Dp;
use crate::region::Region;

/// Discrete user intent forwarded by the editor chrome.
///
/// Decodes from tagged JSON, e.g. `{"command":"set_padding","id":1,"padding":60}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    AddComponent {
        name: String,
    },
    SelectComponent {
        #[serde(default)]
        id: Option<ComponentId>,
    },
    SetRegion {
        id: ComponentId,
        region: Region,
    },
    SetSize {
        id: ComponentId,
        #[serde(default)]
        width: Option<Dp>,
        #[serde(default)]
        height: Option<Dp>,
    },
    SetOpacity {
        id: ComponentId,
        value: f32,
    },
    SetAlignment {
        id: ComponentId,
        alignment: Alignment,
    },
    SetPadding {
        id: ComponentId,
        padding: Dp,
    },
    ToggleVisible {
        id: ComponentId,
    },
    ToggleLock {
        id: ComponentId,
    },
    SetDevice {
        device_id: String,
    },
    SetZoom {
        value: f32,
    },
    ResetZoom,
    TogglePreviewMode,
}

impl Command {
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::AddComponent { .. } => "add_component",
            Command::SelectComponent { .. } => "select_component",
            Command::SetRegion { .. } => "set_region",
            Command::SetSize { .. } => "set_size",
            Command::SetOpacity { .. } => "set_opacity",
            Command::SetAlignment { .. } => "set_alignment",
            Command::SetPadding { .. } => "set_padding",
            Command::ToggleVisible { .. } => "toggle_visible",
            Command::ToggleLock { .. } => "toggle_lock",
            Command::SetDevice { .. } => "set_device",
            Command::SetZoom { .. } => "set_zoom",
            Command::ResetZoom => "reset_zoom",
            Command::TogglePreviewMode => "toggle_preview_mode",
        }
    }

    /// Component the command edits, if any.
    pub fn target(&self) -> Option<ComponentId> {
        match self {
            Command::SetRegion { id, .. }
            | Command::SetSize { id, .. }
            | Command::SetOpacity { id, .. }
            | Command::SetAlignment { id, .. }
            | Command::SetPadding { id, .. }
            | Command::ToggleVisible { id }
            | Command::ToggleLock { id } => Some(*id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    UnknownComponent,
    Locked,
    UnknownDevice,
}

/// Result of applying one command. Nothing here is an error: rejected
/// commands are simply no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandOutcome {
    Added(ComponentId),
    Applied { clamped: bool },
    Unchanged,
    Ignored(IgnoreReason),
}

impl CommandOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, CommandOutcome::Added(_) | CommandOutcome::Applied { .. })
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, CommandOutcome::Ignored(_))
    }
}
