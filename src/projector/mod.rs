//! Canvas layout projector: visible components to zoomed canvas geometry.

mod core;

pub use self::core::{
    CanvasProjection, CanvasProjector, ProjectedBand, ProjectedComponent, REGION_ITEM_SPACING,
};
