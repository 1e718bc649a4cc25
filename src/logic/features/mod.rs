//! Features Module - Record Capability Set
//!
//! Both engines (tree induction and the stream detector) only ever see
//! records through [`FeatureRecord`]. Concrete record types live next to it.

pub mod layout;
pub mod ecu;


pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION, LayoutInfo, layout_hash};
pub use ecu::{EcuRecord, RecordError};

// ============================================================================
// FEATURE RECORD TRAIT
// ============================================================================

/// Capability set every data point must satisfy.
///
/// Records are immutable once built. Feature values are integers; the label is
/// the ground truth for training data and `false` when unknown.
pub trait FeatureRecord {
    /// Number of features exposed by this record
    fn feature_count(&self) -> usize;

    /// Value at `index`. Indices past `feature_count()` read as 0.
    fn feature_value(&self, index: usize) -> i64;

    /// Name at `index`. Indices past `feature_count()` read as "".
    fn feature_name(&self, index: usize) -> &str;

    /// Ground-truth anomaly label
    fn is_anomaly(&self) -> bool;

    /// Linear name lookup
    fn feature_index(&self, name: &str) -> Option<usize> {
        (0..self.feature_count()).find(|&i| self.feature_name(i) == name)
    }
}

impl<T: FeatureRecord + ?Sized> FeatureRecord for &T {
    fn feature_count(&self) -> usize {
        (**self).feature_count()
    }

    fn feature_value(&self, index: usize) -> i64 {
        (**self).feature_value(index)
    }

    fn feature_name(&self, index: usize) -> &str {
        (**self).feature_name(index)
    }

    fn is_anomaly(&self) -> bool {
        (**self).is_anomaly()
    }
}

impl<T: FeatureRecord + ?Sized> FeatureRecord for Box<T> {
    fn feature_count(&self) -> usize {
        (**self).feature_count()
    }

    fn feature_value(&self, index: usize) -> i64 {
        (**self).feature_value(index)
    }

    fn feature_name(&self, index: usize) -> &str {
        (**self).feature_name(index)
    }

    fn is_anomaly(&self) -> bool {
        (**self).is_anomaly()
    }
}
