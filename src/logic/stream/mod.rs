//! Stream Module - Sliding Window Rule Detector
//!
//! Purely reactive: no learning, nothing persisted. Every `add_data` call is
//! a function of the current window, the rule registry and the new record.
//!
//! - `comparator`: per-feature change scoring (default: relative change)
//! - `window`: bounded history + rule registry
//! - `shared`: single-writer wrapper for concurrent callers

pub mod comparator;
pub mod window;
pub mod shared;

#[cfg(test)]
mod tests;

pub use comparator::{FeatureComparator, RelativeChange};
pub use window::{FeatureConfig, FeatureRule, WindowDetector, WindowStatus};
pub use shared::SharedWindowDetector;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// A rule names a feature the detector or record does not know
    FeatureNotFound(String),
}

impl std::fmt::Display for StreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamError::FeatureNotFound(name) => write!(f, "feature not found: {}", name),
        }
    }
}

impl std::error::Error for StreamError {}
