//! Virtual device catalog.
//!
//! Profiles are immutable and handed out as `Arc`s so the session can hold
//! the active device by reference while the catalog stays the owner.

mod core;

pub use self::core::{DEFAULT_DEVICE_ID, DeviceCatalog, DeviceClass, DeviceProfile};
