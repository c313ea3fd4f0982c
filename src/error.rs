//! Error types returned by the classifier.

use thiserror::Error;

/// Why a classification could not be carried out.
///
/// Kept separate from [`crate::models::Classification::NoMatch`] so callers can
/// tell "searched and found nothing" from "the input data was bad".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// The query point was missing or malformed
    #[error("invalid input point: {0}")]
    InvalidInput(String),

    /// A region cannot form a valid simple polygon
    #[error("invalid region '{name}': {reason}")]
    InvalidRegion { name: String, reason: String },
}

impl ClassifyError {
    pub(crate) fn invalid_region(name: &str, reason: impl Into<String>) -> Self {
        ClassifyError::InvalidRegion {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClassifyError>;
