//! Atlas - point-in-polygon region classification
//!
//! Resolves which administrative district or user-drawn boundary contains a
//! coordinate. Regions are supplied per request as plain data; storage,
//! transport and rendering belong to the caller.

pub mod config;
pub mod error;
pub mod models;
pub mod pip;

pub use error::ClassifyError;
pub use models::{Classification, CoordOrder, CoordValue, Point, Region, RegionRecord};
pub use pip::{classify_against_custom, classify_against_named, contains, Classifier};
