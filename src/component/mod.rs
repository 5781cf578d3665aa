//! Component model: the placed elements and their editable attributes.

mod core;

pub use self::core::{
    Alignment, CanvasComponent, ComponentId, ComponentIdSequence, DEFAULT_HEIGHT,
    DEFAULT_OPACITY, DEFAULT_PADDING, DEFAULT_WIDTH, MAX_OPACITY, MAX_PADDING,
    MIN_COMPONENT_HEIGHT, MIN_COMPONENT_WIDTH, MIN_OPACITY, MIN_PADDING,
};
