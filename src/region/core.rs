use serde::{Deserialize, Serialize};

use crate::device::DeviceProfile;

/// Lower bound applied to every band height.
pub const MIN_REGION_HEIGHT: u32 = 96;

/// Vertical band of the device screen a component belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Top,
    Middle,
    Bottom,
}

impl Region {
    /// Bands in top-to-bottom order.
    pub const ALL: [Region; 3] = [Region::Top, Region::Middle, Region::Bottom];

    pub fn index(self) -> usize {
        match self {
            Region::Top => 0,
            Region::Middle => 1,
            Region::Bottom => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Region::Top => "top",
            Region::Middle => "middle",
            Region::Bottom => "bottom",
        }
    }
}

/// Height share of each band, in whole percent of the device height.
///
/// Integer percentages keep the floor exact (`891 * 24 / 100 == 213`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegionRatios {
    pub top: u32,
    pub middle: u32,
    pub bottom: u32,
}

impl RegionRatios {
    /// Ratios used by the canvas editor.
    pub const EDITOR: Self = Self {
        top: 24,
        middle: 52,
        bottom: 24,
    };

    /// Ratios used by the property panel's miniature preview.
    pub const PROPERTY_PREVIEW: Self = Self {
        top: 28,
        middle: 46,
        bottom: 26,
    };

    pub fn percent(&self, region: Region) -> u32 {
        match region {
            Region::Top => self.top,
            Region::Middle => self.middle,
            Region::Bottom => self.bottom,
        }
    }

    pub fn ratio(&self, region: Region) -> f32 {
        self.percent(region) as f32 / 100.0
    }
}

impl Default for RegionRatios {
    fn default() -> Self {
        Self::EDITOR
    }
}

/// Band geometry in unscaled device units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegionBand {
    pub region: Region,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl RegionBand {
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }
}

/// Splits a device's vertical space into the three bands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionPartitioner {
    ratios: RegionRatios,
}

impl RegionPartitioner {
    pub fn new(ratios: RegionRatios) -> Self {
        Self { ratios }
    }

    pub fn ratios(&self) -> RegionRatios {
        self.ratios
    }

    pub fn region_height(&self, region: Region, device: &DeviceProfile) -> u32 {
        let share = u64::from(device.height) * u64::from(self.ratios.percent(region)) / 100;
        (share as u32).max(MIN_REGION_HEIGHT)
    }

    /// Regions never narrow the device.
    pub fn available_width(&self, device: &DeviceProfile) -> u32 {
        device.width
    }

    /// Bands stacked top to bottom. With the height floor applied on very short
    /// devices the last band may extend past the device height.
    pub fn bands(&self, device: &DeviceProfile) -> [RegionBand; 3] {
        let mut y = 0u32;
        Region::ALL.map(|region| {
            let height = self.region_height(region, device);
            let band = RegionBand {
                region,
                y,
                width: self.available_width(device),
                height,
            };
            y = y.saturating_add(height);
            band
        })
    }
}
