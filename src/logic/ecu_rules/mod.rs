//! ECU Rules - physical constraints for the stream detector
//!
//! RPM and speed limits depend on the engaged gear. Both comparators share one
//! [`GearContext`], refreshed from the newest record before a tick is scored.
//!
//! - `rules`: limits and constants
//! - `comparators`: RPM / Gear / Speed comparators

pub mod rules;
pub mod comparators;

#[cfg(test)]
mod tests;

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use crate::logic::features::FeatureRecord;
use crate::logic::stream::{FeatureConfig, WindowDetector};

pub use comparators::{GearComparator, RpmComparator, SpeedComparator};

// ============================================================================
// SHARED GEAR CONTEXT
// ============================================================================

/// Gear engaged during the current tick. Clones share the same value.
#[derive(Debug, Clone, Default)]
pub struct GearContext {
    gear: Arc<AtomicI64>,
}

impl GearContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, gear: i64) {
        self.gear.store(gear, Ordering::Relaxed);
    }

    pub fn get(&self) -> i64 {
        self.gear.load(Ordering::Relaxed)
    }

    /// Copy the record's `gear` feature, if it has one
    pub fn update_from(&self, record: &dyn FeatureRecord) {
        if let Some(index) = record.feature_index(rules::GEAR_FEATURE) {
            self.set(record.feature_value(index));
        }
    }
}

// ============================================================================
// DETECTOR SETUP
// ============================================================================

/// rpm / gear / speed rules sharing one gear context
pub fn ecu_feature_configs(threshold: f64) -> Vec<FeatureConfig> {
    let context = GearContext::new();

    vec![
        FeatureConfig::new("rpm", threshold).with_comparator(RpmComparator::new(context.clone())),
        FeatureConfig::new("gear", threshold).with_comparator(GearComparator),
        FeatureConfig::new("speed", threshold).with_comparator(SpeedComparator::new(context)),
    ]
}

/// Window detector preloaded with the ECU rules
pub fn ecu_window_detector<R: FeatureRecord>(window_size: usize, threshold: f64) -> WindowDetector<R> {
    let mut detector = WindowDetector::new(window_size);
    for config in ecu_feature_configs(threshold) {
        detector.add_feature_config(config);
    }
    detector
}
