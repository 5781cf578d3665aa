use serde::Serialize;

use crate::component::{CanvasComponent, ComponentId};
use crate::device::DeviceProfile;
use crate::error::Result;
use crate::projector::CanvasProjection;

/// Read-only view handed to the renderer: everything it needs to draw the
/// canvas without recomputing geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanvasSnapshot {
    pub components: Vec<CanvasComponent>,
    pub selected_id: Option<ComponentId>,
    pub device: DeviceProfile,
    pub zoom: f32,
    pub preview_mode: bool,
    pub projection: CanvasProjection,
}

impl CanvasSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Content hash of the serialised snapshot; equal states hash equally.
    pub fn fingerprint(&self) -> Result<blake3::Hash> {
        let bytes = serde_json::to_vec(self)?;
        Ok(blake3::hash(&bytes))
    }

    pub fn selected(&self) -> Option<&CanvasComponent> {
        let id = self.selected_id?;
        self.components.iter().find(|component| component.id == id)
    }
}
