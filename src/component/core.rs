use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Dp;
use crate::region::Region;

pub const MIN_COMPONENT_WIDTH: Dp = 96.0;
pub const MIN_COMPONENT_HEIGHT: Dp = 64.0;
pub const MIN_OPACITY: f32 = 0.2;
pub const MAX_OPACITY: f32 = 1.0;
pub const MIN_PADDING: Dp = 0.0;
pub const MAX_PADDING: Dp = 64.0;

pub const DEFAULT_WIDTH: Dp = 240.0;
pub const DEFAULT_HEIGHT: Dp = 96.0;
pub const DEFAULT_OPACITY: f32 = 1.0;
pub const DEFAULT_PADDING: Dp = 16.0;

/// Stable identifier of a placed component. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(u64);

impl ComponentId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic id source; the first id handed out is 1.
#[derive(Debug, Clone)]
pub struct ComponentIdSequence {
    next: u64,
}

impl ComponentIdSequence {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> ComponentId {
        let id = ComponentId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }

    pub fn peek(&self) -> ComponentId {
        ComponentId(self.next)
    }
}

impl Default for ComponentIdSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Horizontal anchoring of a component inside its band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Start,
    #[default]
    Center,
    End,
}

/// One abstract UI element placed on the canvas.
///
/// Fields are public for reading; edits go through the session so the
/// constraint engine can keep every value inside its legal range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanvasComponent {
    pub id: ComponentId,
    pub name: String,
    pub region: Region,
    pub width: Dp,
    pub height: Dp,
    pub opacity: f32,
    pub visible: bool,
    pub locked: bool,
    pub alignment: Alignment,
    pub padding: Dp,
}

impl CanvasComponent {
    pub fn new(id: ComponentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            region: Region::Middle,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            opacity: DEFAULT_OPACITY,
            visible: true,
            locked: false,
            alignment: Alignment::default(),
            padding: DEFAULT_PADDING,
        }
    }
}
