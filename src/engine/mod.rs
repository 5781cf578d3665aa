//! Constraint engine: legal ranges and clamped updates for component edits.

mod core;

pub use self::core::{
    Adjustment, Bounds, ComponentLimits, ConstraintEngine, OPACITY_BOUNDS, PADDING_BOUNDS,
};
