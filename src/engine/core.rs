use serde::Serialize;

use crate::component::{
    Alignment, CanvasComponent, MAX_OPACITY, MAX_PADDING, MIN_COMPONENT_HEIGHT,
    MIN_COMPONENT_WIDTH, MIN_OPACITY, MIN_PADDING,
};
use crate::device::DeviceProfile;
use crate::geometry::Dp;
use crate::region::{Region, RegionPartitioner};

/// Closed interval of legal values for one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: f32,
    pub max: f32,
}

impl Bounds {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Coerce `value` into the interval. Non-finite input yields `None` so
    /// callers can leave the attribute untouched.
    pub fn clamp(&self, value: f32) -> Option<f32> {
        if !value.is_finite() {
            return None;
        }
        Some(value.max(self.min).min(self.max))
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Legal ranges for every editable attribute of one component on one device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentLimits {
    pub width: Bounds,
    pub height: Bounds,
    pub padding: Bounds,
    pub opacity: Bounds,
}

impl ComponentLimits {
    pub fn admits(&self, component: &CanvasComponent) -> bool {
        self.width.contains(component.width)
            && self.height.contains(component.height)
            && self.padding.contains(component.padding)
            && self.opacity.contains(component.opacity)
    }
}

/// What an update did to its component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Adjustment {
    /// At least one attribute now holds a different value.
    pub changed: bool,
    /// A requested or dependent value was coerced into its legal range.
    pub clamped: bool,
}

impl Adjustment {
    fn merge(self, other: Adjustment) -> Adjustment {
        Adjustment {
            changed: self.changed || other.changed,
            clamped: self.clamped || other.clamped,
        }
    }
}

pub const PADDING_BOUNDS: Bounds = Bounds::new(MIN_PADDING, MAX_PADDING);
pub const OPACITY_BOUNDS: Bounds = Bounds::new(MIN_OPACITY, MAX_OPACITY);

/// Clamping rules for component edits.
///
/// Every update leaves the touched attributes inside their legal range;
/// invalid requests degrade to the nearest legal value and nothing errors.
/// Lock and id checks belong to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstraintEngine {
    partitioner: RegionPartitioner,
}

impl ConstraintEngine {
    pub fn new(partitioner: RegionPartitioner) -> Self {
        Self { partitioner }
    }

    pub fn partitioner(&self) -> &RegionPartitioner {
        &self.partitioner
    }

    /// `max(96, device.width - 2 * padding)`.
    pub fn max_width(device: &DeviceProfile, padding: Dp) -> Dp {
        (device.width_dp() - 2.0 * padding).max(MIN_COMPONENT_WIDTH)
    }

    /// Band height of `region`, already floored at 96.
    pub fn max_height(&self, device: &DeviceProfile, region: Region) -> Dp {
        self.partitioner.region_height(region, device) as Dp
    }

    pub fn width_bounds(device: &DeviceProfile, padding: Dp) -> Bounds {
        Bounds::new(MIN_COMPONENT_WIDTH, Self::max_width(device, padding))
    }

    pub fn height_bounds(&self, device: &DeviceProfile, region: Region) -> Bounds {
        Bounds::new(MIN_COMPONENT_HEIGHT, self.max_height(device, region))
    }

    pub fn limits(&self, component: &CanvasComponent, device: &DeviceProfile) -> ComponentLimits {
        ComponentLimits {
            width: Self::width_bounds(device, component.padding),
            height: self.height_bounds(device, component.region),
            padding: PADDING_BOUNDS,
            opacity: OPACITY_BOUNDS,
        }
    }

    /// Size bounds are evaluated lazily, so no reflow happens here.
    pub fn set_region(&self, component: &mut CanvasComponent, region: Region) -> Adjustment {
        let changed = component.region != region;
        component.region = region;
        Adjustment {
            changed,
            clamped: false,
        }
    }

    pub fn set_size(
        &self,
        component: &mut CanvasComponent,
        device: &DeviceProfile,
        width: Option<Dp>,
        height: Option<Dp>,
    ) -> Adjustment {
        let mut outcome = Adjustment::default();
        if let Some(requested) = width {
            let bounds = Self::width_bounds(device, component.padding);
            outcome = outcome.merge(assign(&mut component.width, requested, bounds));
        }
        if let Some(requested) = height {
            let bounds = self.height_bounds(device, component.region);
            outcome = outcome.merge(assign(&mut component.height, requested, bounds));
        }
        outcome
    }

    pub fn set_opacity(&self, component: &mut CanvasComponent, value: f32) -> Adjustment {
        assign(&mut component.opacity, value, OPACITY_BOUNDS)
    }

    pub fn set_alignment(
        &self,
        component: &mut CanvasComponent,
        alignment: Alignment,
    ) -> Adjustment {
        let changed = component.alignment != alignment;
        component.alignment = alignment;
        Adjustment {
            changed,
            clamped: false,
        }
    }

    /// Clamp padding, then shrink the width if the new padding leaves less
    /// room. Width is never grown back when padding decreases.
    pub fn set_padding(
        &self,
        component: &mut CanvasComponent,
        device: &DeviceProfile,
        padding: Dp,
    ) -> Adjustment {
        let outcome = assign(&mut component.padding, padding, PADDING_BOUNDS);
        let limit = Self::max_width(device, component.padding);
        if component.width > limit {
            component.width = limit;
            return Adjustment {
                changed: true,
                clamped: true,
            };
        }
        outcome
    }

    pub fn toggle_visible(&self, component: &mut CanvasComponent) -> Adjustment {
        component.visible = !component.visible;
        Adjustment {
            changed: true,
            clamped: false,
        }
    }

    /// Flips the lock only; current values are not re-validated.
    pub fn toggle_lock(&self, component: &mut CanvasComponent) -> Adjustment {
        component.locked = !component.locked;
        Adjustment {
            changed: true,
            clamped: false,
        }
    }

    /// Pull every attribute back into its legal range for `device`.
    pub fn revalidate(
        &self,
        component: &mut CanvasComponent,
        device: &DeviceProfile,
    ) -> Adjustment {
        let before = component.clone();
        let sanitize = |value: f32, bounds: Bounds| bounds.clamp(value).unwrap_or(bounds.min);

        component.padding = sanitize(component.padding, PADDING_BOUNDS);
        component.opacity = sanitize(component.opacity, OPACITY_BOUNDS);
        component.width = sanitize(component.width, Self::width_bounds(device, component.padding));
        component.height = sanitize(
            component.height,
            self.height_bounds(device, component.region),
        );

        let changed = *component != before;
        Adjustment {
            changed,
            clamped: changed,
        }
    }
}

fn assign(slot: &mut f32, requested: f32, bounds: Bounds) -> Adjustment {
    let Some(value) = bounds.clamp(requested) else {
        return Adjustment::default();
    };
    let changed = *slot != value;
    *slot = value;
    Adjustment {
        changed,
        clamped: value != requested,
    }
}
