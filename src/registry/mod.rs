//! Change tracking between successive canvas projections.

mod core;

pub use self::core::{GeometryRegistry, GeometryState};
