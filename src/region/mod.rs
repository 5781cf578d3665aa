//! Region partitioner: Top/Middle/Bottom bands with fixed height ratios.

mod core;

pub use self::core::{MIN_REGION_HEIGHT, Region, RegionBand, RegionPartitioner, RegionRatios};
