//! Core data models for region classification.

pub mod outcome;
pub mod point;
pub mod region;

pub use outcome::Classification;
pub use point::{CoordOrder, CoordValue, Point};
pub use region::{Region, RegionRecord};
