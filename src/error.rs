//!
//! Error types of alignment calls
//!
use thiserror::Error;

/// Errors returned by single-pair and batch alignment calls.
#[derive(Debug, Error)]
pub enum AlignError {
    /// Input shapes are incompatible
    /// (class counts differ, `n2 > n1`, empty sequences, ragged rows, ...)
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// A row of `name` is not a probability distribution
    #[error("invalid distribution in {name} row {row}: {reason}")]
    InvalidDistribution {
        name: &'static str,
        row: usize,
        reason: String,
    },

    /// Batch element `index` failed
    #[error("batch element {index}: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<AlignError>,
    },

    /// Worker pool for the batch could not be created
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl AlignError {
    /// Wrap the error of `index`-th element of a batch.
    pub fn in_element(self, index: usize) -> AlignError {
        AlignError::Element {
            index,
            source: Box::new(self),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AlignError>;
