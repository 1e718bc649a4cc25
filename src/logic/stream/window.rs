//! Window Detector - bounded history + per-feature rules
//!
//! Cold start: until the window holds `window_size` records every call
//! returns `Ok(false)`. After that the two newest records are compared for
//! every registered rule; one score above its threshold flags the tick.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::logic::features::FeatureRecord;

use super::comparator::{FeatureComparator, RelativeChange};
use super::StreamError;

/// Smallest usable window: one previous record plus the current one
pub const MIN_WINDOW_SIZE: usize = 2;

// ============================================================================
// RULE CONFIGURATION
// ============================================================================

/// Registration request; a missing comparator means [`RelativeChange`]
#[derive(Clone)]
pub struct FeatureConfig {
    pub name: String,
    pub threshold: f64,
    pub comparator: Option<Arc<dyn FeatureComparator>>,
}

impl FeatureConfig {
    pub fn new(name: &str, threshold: f64) -> Self {
        Self {
            name: name.to_string(),
            threshold,
            comparator: None,
        }
    }

    pub fn with_comparator<C: FeatureComparator + 'static>(mut self, comparator: C) -> Self {
        self.comparator = Some(Arc::new(comparator));
        self
    }
}

impl std::fmt::Debug for FeatureConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureConfig")
            .field("name", &self.name)
            .field("threshold", &self.threshold)
            .field("comparator", &self.comparator.as_ref().map(|_| "custom").unwrap_or("default"))
            .finish()
    }
}

/// Registered rule (comparator always resolved)
#[derive(Clone)]
pub struct FeatureRule {
    pub name: String,
    pub threshold: f64,
    pub comparator: Arc<dyn FeatureComparator>,
}

impl std::fmt::Debug for FeatureRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureRule")
            .field("name", &self.name)
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

impl From<FeatureConfig> for FeatureRule {
    fn from(config: FeatureConfig) -> Self {
        Self {
            name: config.name,
            threshold: config.threshold,
            comparator: config.comparator.unwrap_or_else(|| Arc::new(RelativeChange)),
        }
    }
}

// ============================================================================
// STATUS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowStatus {
    pub current_size: usize,
    pub required_size: usize,
    pub is_ready: bool,
    pub fill_percent: f32,
    pub rule_count: usize,
}

// ============================================================================
// WINDOW DETECTOR
// ============================================================================

pub struct WindowDetector<R> {
    window_size: usize,
    history: VecDeque<R>,
    rules: BTreeMap<String, FeatureRule>,
}

impl<R: FeatureRecord> WindowDetector<R> {
    pub fn new(window_size: usize) -> Self {
        if window_size < MIN_WINDOW_SIZE {
            log::warn!(
                "Window size {} too small, using {}",
                window_size,
                MIN_WINDOW_SIZE
            );
        }
        let window_size = window_size.max(MIN_WINDOW_SIZE);

        Self {
            window_size,
            history: VecDeque::with_capacity(window_size + 1),
            rules: BTreeMap::new(),
        }
    }

    /// Register or overwrite the rule for `config.name`
    pub fn add_feature_config(&mut self, config: FeatureConfig) {
        let rule = FeatureRule::from(config);
        log::debug!("Rule registered: {} (threshold {})", rule.name, rule.threshold);
        self.rules.insert(rule.name.clone(), rule);
    }

    /// Update an existing rule's threshold; unknown names leave the registry untouched
    pub fn set_threshold(&mut self, name: &str, threshold: f64) -> Result<(), StreamError> {
        let rule = self
            .rules
            .get_mut(name)
            .ok_or_else(|| StreamError::FeatureNotFound(name.to_string()))?;
        rule.threshold = threshold;
        Ok(())
    }

    /// Append `record` and decide whether this tick is anomalous.
    ///
    /// The record stays in the window even when detection fails.
    pub fn add_data(&mut self, record: R) -> Result<bool, StreamError> {
        self.history.push_back(record);
        while self.history.len() > self.window_size {
            self.history.pop_front();
        }

        if self.history.len() < self.window_size {
            return Ok(false);
        }

        self.detect_anomaly()
    }

    fn detect_anomaly(&self) -> Result<bool, StreamError> {
        let len = self.history.len();
        let current = &self.history[len - 1];
        let prev = &self.history[len - 2];

        // Resolve every rule first so a missing feature is always reported
        let mut resolved = Vec::with_capacity(self.rules.len());
        for (name, rule) in &self.rules {
            let index = current
                .feature_index(name)
                .ok_or_else(|| StreamError::FeatureNotFound(name.clone()))?;
            resolved.push((rule, index));
        }

        for (rule, _) in &resolved {
            rule.comparator.observe(current);
        }

        for (rule, index) in resolved {
            let score = rule.comparator.compare(
                prev.feature_value(index) as f64,
                current.feature_value(index) as f64,
            );

            if score > rule.threshold {
                log::debug!(
                    "Anomaly on {}: score {:.3} > threshold {:.3}",
                    rule.name,
                    score,
                    rule.threshold
                );
                return Ok(true);
            }
        }

        Ok(false)
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn is_ready(&self) -> bool {
        self.history.len() >= self.window_size
    }

    pub fn threshold(&self, name: &str) -> Option<f64> {
        self.rules.get(name).map(|rule| rule.threshold)
    }

    pub fn rule_names(&self) -> Vec<String> {
        self.rules.keys().cloned().collect()
    }

    /// Drop history, keep rules
    pub fn reset(&mut self) {
        self.history.clear();
    }

    pub fn status(&self) -> WindowStatus {
        WindowStatus {
            current_size: self.history.len(),
            required_size: self.window_size,
            is_ready: self.is_ready(),
            fill_percent: (self.history.len() as f32 / self.window_size as f32 * 100.0).min(100.0),
            rule_count: self.rules.len(),
        }
    }
}
