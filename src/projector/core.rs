use serde::Serialize;

use crate::component::{Alignment, CanvasComponent, ComponentId};
use crate::device::DeviceProfile;
use crate::engine::ConstraintEngine;
use crate::geometry::{Dp, Point, Rect, Size};
use crate::region::Region;

/// Vertical gap between stacked components of the same band, before zoom.
pub const REGION_ITEM_SPACING: Dp = 8.0;

/// Render-ready geometry of one visible component, already scaled by zoom.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedComponent {
    pub id: ComponentId,
    pub region: Region,
    /// Position in the component list; higher layers draw on top.
    pub layer: usize,
    pub rect: Rect,
    pub opacity: f32,
    pub alignment: Alignment,
    pub selected: bool,
    pub locked: bool,
    /// The rect extends past its band or the canvas edge.
    pub overflow: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectedBand {
    pub region: Region,
    pub rect: Rect,
}

/// Full projection of the canvas for one state of the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanvasProjection {
    pub canvas: Size,
    pub zoom: f32,
    pub bands: Vec<ProjectedBand>,
    pub components: Vec<ProjectedComponent>,
}

impl CanvasProjection {
    pub fn get(&self, id: ComponentId) -> Option<&ProjectedComponent> {
        self.components.iter().find(|entry| entry.id == id)
    }

    pub fn band(&self, region: Region) -> Option<&ProjectedBand> {
        self.bands.iter().find(|band| band.region == region)
    }

    /// Top-most component under `point` (canvas coordinates, zoom applied).
    pub fn hit_test(&self, point: Point) -> Option<ComponentId> {
        self.components
            .iter()
            .filter(|entry| entry.rect.contains(point))
            .max_by_key(|entry| entry.layer)
            .map(|entry| entry.id)
    }
}

/// Maps components to canvas geometry. Never mutates its inputs, so the same
/// state always projects to the same geometry.
pub struct CanvasProjector<'a> {
    engine: &'a ConstraintEngine,
    device: &'a DeviceProfile,
    zoom: f32,
}

impl<'a> CanvasProjector<'a> {
    pub fn new(engine: &'a ConstraintEngine, device: &'a DeviceProfile, zoom: f32) -> Self {
        Self {
            engine,
            device,
            zoom,
        }
    }

    pub fn project(
        &self,
        components: &[CanvasComponent],
        selected: Option<ComponentId>,
    ) -> CanvasProjection {
        let band_layout = self.engine.partitioner().bands(self.device);
        let band_rects = band_layout.map(|band| {
            Rect::new(0.0, band.y as Dp, band.width as Dp, band.height as Dp)
        });
        let mut cursors = band_rects.map(|rect| rect.y);

        let canvas_width = self.device.width_dp();
        let mut projected = Vec::new();

        for (layer, component) in components.iter().enumerate() {
            if !component.visible {
                continue;
            }

            let slot = component.region.index();
            let band = band_rects[slot];
            let width = component
                .width
                .min(ConstraintEngine::max_width(self.device, component.padding));
            let height = component.height;
            let x = match component.alignment {
                Alignment::Start => component.padding,
                Alignment::Center => (canvas_width - width) / 2.0,
                Alignment::End => canvas_width - component.padding - width,
            };
            let y = cursors[slot];
            cursors[slot] = y + height + REGION_ITEM_SPACING;

            let rect = Rect::new(x, y, width, height);
            let overflow =
                rect.bottom() > band.bottom() || rect.x < 0.0 || rect.right() > canvas_width;

            projected.push(ProjectedComponent {
                id: component.id,
                region: component.region,
                layer,
                rect: rect.scaled(self.zoom),
                opacity: component.opacity,
                alignment: component.alignment,
                selected: selected == Some(component.id),
                locked: component.locked,
                overflow,
            });
        }

        let bands = Region::ALL
            .iter()
            .zip(band_rects)
            .map(|(region, rect)| ProjectedBand {
                region: *region,
                rect: rect.scaled(self.zoom),
            })
            .collect();

        CanvasProjection {
            canvas: Size::new(canvas_width * self.zoom, self.device.height_dp() * self.zoom),
            zoom: self.zoom,
            bands,
            components: projected,
        }
    }
}
