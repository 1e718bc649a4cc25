//! Feature Comparators
//!
//! A comparator scores the change between two consecutive values of one
//! feature. Rule-style comparators return 0.0 or 1.0.

use crate::logic::features::FeatureRecord;

pub trait FeatureComparator: Send + Sync {
    /// Score the step from `prev` to `current`
    fn compare(&self, prev: f64, current: f64) -> f64;

    /// Called with the newest record before any rule of the tick is scored.
    /// Comparators that depend on shared context refresh it here.
    fn observe(&self, _current: &dyn FeatureRecord) {}
}

/// Relative change `|current - prev| / |prev|`; from zero, any move scores 1.0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelativeChange;

impl FeatureComparator for RelativeChange {
    fn compare(&self, prev: f64, current: f64) -> f64 {
        if prev == 0.0 {
            if current == 0.0 {
                return 0.0;
            }
            return 1.0;
        }
        ((current - prev) / prev).abs()
    }
}

impl<F> FeatureComparator for F
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    fn compare(&self, prev: f64, current: f64) -> f64 {
        self(prev, current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_change() {
        let c = RelativeChange;
        assert_eq!(c.compare(0.0, 0.0), 0.0);
        assert_eq!(c.compare(0.0, 5.0), 1.0);
        assert_eq!(c.compare(1000.0, 1000.0), 0.0);
        assert_eq!(c.compare(1000.0, 3000.0), 2.0);
        assert_eq!(c.compare(1000.0, 500.0), 0.5);
        assert_eq!(c.compare(-100.0, -150.0), 0.5);
    }

    #[test]
    fn test_closure_comparator() {
        let absolute = |prev: f64, current: f64| (current - prev).abs() / 100.0;
        assert_eq!(absolute.compare(100.0, 150.0), 0.5);
    }
}
