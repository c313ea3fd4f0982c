//! Point-in-Polygon (PIP) region classification.
//!
//! Resolves which named district or custom boundary contains a point,
//! with an optional R-tree backed catalog for repeated lookups.

mod catalog;
mod classifier;
pub(crate) mod ray;

pub use catalog::{CatalogCache, RegionCatalog};
pub use classifier::{classify_against_custom, classify_against_named, Classifier, MatchPolicy};
pub use ray::{contains, contains_with, BoundaryRule};
