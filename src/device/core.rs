use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{CanvasError, Result};
use crate::geometry::{Dp, Size};

/// Identifier of the profile the editor opens with.
pub const DEFAULT_DEVICE_ID: &str = "standard_1080p";

/// Coarse form-factor bucket shown next to the device label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    Compact,
    Phone,
    Large,
}

/// Immutable virtual screen description. Width and height are in
/// device-independent units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceProfile {
    pub id: String,
    pub label: String,
    /// Logical resolution as shown in the device picker, e.g. `411 x 891`.
    pub logical_size: String,
    pub description: String,
    pub class: DeviceClass,
    pub width: u32,
    pub height: u32,
}

impl DeviceProfile {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let id = id.into();
        if width == 0 || height == 0 {
            return Err(CanvasError::InvalidDevice {
                id,
                reason: format!("dimensions must be non-zero, got {width}x{height}"),
            });
        }
        Ok(Self {
            logical_size: format!("{width} x {height}"),
            id,
            label: label.into(),
            description: String::new(),
            class: DeviceClass::Phone,
            width,
            height,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_logical_size(mut self, logical_size: impl Into<String>) -> Self {
        self.logical_size = logical_size.into();
        self
    }

    pub fn with_class(mut self, class: DeviceClass) -> Self {
        self.class = class;
        self
    }

    pub fn width_dp(&self) -> Dp {
        self.width as Dp
    }

    pub fn height_dp(&self) -> Dp {
        self.height as Dp
    }

    pub fn size(&self) -> Size {
        Size::new(self.width_dp(), self.height_dp())
    }
}

struct BuiltinDevice {
    id: &'static str,
    label: &'static str,
    logical_size: &'static str,
    description: &'static str,
    class: DeviceClass,
    width: u32,
    height: u32,
}

const BUILTIN_DEVICES: &[BuiltinDevice] = &[
    BuiltinDevice {
        id: "small_720p",
        label: "Small 720p",
        logical_size: "360 x 720",
        description: "Entry-level handsets",
        class: DeviceClass::Compact,
        width: 360,
        height: 720,
    },
    BuiltinDevice {
        id: "standard_1080p",
        label: "Standard 1080p",
        logical_size: "411 x 891",
        description: "Most handsets",
        class: DeviceClass::Phone,
        width: 411,
        height: 891,
    },
    BuiltinDevice {
        id: "large_2k",
        label: "Large 2K",
        logical_size: "480 x 960",
        description: "Tablets and large screens",
        class: DeviceClass::Large,
        width: 480,
        height: 960,
    },
];

impl BuiltinDevice {
    fn to_profile(&self) -> DeviceProfile {
        DeviceProfile {
            id: self.id.to_string(),
            label: self.label.to_string(),
            logical_size: self.logical_size.to_string(),
            description: self.description.to_string(),
            class: self.class,
            width: self.width,
            height: self.height,
        }
    }
}

/// Ordered set of device profiles the session can switch between.
#[derive(Debug, Clone)]
pub struct DeviceCatalog {
    profiles: Vec<Arc<DeviceProfile>>,
    default_index: usize,
}

impl DeviceCatalog {
    /// Catalog of the built-in virtual devices, defaulting to [`DEFAULT_DEVICE_ID`].
    pub fn builtin() -> Self {
        let profiles: Vec<_> = BUILTIN_DEVICES
            .iter()
            .map(|device| Arc::new(device.to_profile()))
            .collect();
        let default_index = profiles
            .iter()
            .position(|profile| profile.id == DEFAULT_DEVICE_ID)
            .unwrap_or(0);
        Self {
            profiles,
            default_index,
        }
    }

    /// Build a catalog from custom profiles. The first profile becomes the default.
    pub fn from_profiles(profiles: impl IntoIterator<Item = DeviceProfile>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut collected = Vec::new();
        for profile in profiles {
            if !seen.insert(profile.id.clone()) {
                return Err(CanvasError::InvalidDevice {
                    id: profile.id,
                    reason: "duplicate id in catalog".to_string(),
                });
            }
            collected.push(Arc::new(profile));
        }
        if collected.is_empty() {
            return Err(CanvasError::EmptyCatalog);
        }
        Ok(Self {
            profiles: collected,
            default_index: 0,
        })
    }

    pub fn with_default(mut self, id: &str) -> Result<Self> {
        self.default_index = self
            .profiles
            .iter()
            .position(|profile| profile.id == id)
            .ok_or_else(|| CanvasError::DeviceNotFound(id.to_string()))?;
        Ok(self)
    }

    pub fn default_profile(&self) -> Arc<DeviceProfile> {
        Arc::clone(&self.profiles[self.default_index])
    }

    pub fn get(&self, id: &str) -> Option<Arc<DeviceProfile>> {
        self.profiles
            .iter()
            .find(|profile| profile.id == id)
            .map(Arc::clone)
    }

    pub fn require(&self, id: &str) -> Result<Arc<DeviceProfile>> {
        self.get(id)
            .ok_or_else(|| CanvasError::DeviceNotFound(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<DeviceProfile>> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for DeviceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
