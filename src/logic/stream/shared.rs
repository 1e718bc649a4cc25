//! Shared Window Detector
//!
//! Interleaved appends would corrupt window ordering, so every operation runs
//! under one mutex. Clones share the same detector.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::logic::features::FeatureRecord;

use super::window::{FeatureConfig, WindowDetector, WindowStatus};
use super::StreamError;

pub struct SharedWindowDetector<R> {
    inner: Arc<Mutex<WindowDetector<R>>>,
}

impl<R> Clone for SharedWindowDetector<R> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<R: FeatureRecord> SharedWindowDetector<R> {
    pub fn new(detector: WindowDetector<R>) -> Self {
        Self { inner: Arc::new(Mutex::new(detector)) }
    }

    pub fn add_feature_config(&self, config: FeatureConfig) {
        self.inner.lock().add_feature_config(config);
    }

    pub fn set_threshold(&self, name: &str, threshold: f64) -> Result<(), StreamError> {
        self.inner.lock().set_threshold(name, threshold)
    }

    pub fn add_data(&self, record: R) -> Result<bool, StreamError> {
        self.inner.lock().add_data(record)
    }

    pub fn threshold(&self, name: &str) -> Option<f64> {
        self.inner.lock().threshold(name)
    }

    pub fn status(&self) -> WindowStatus {
        self.inner.lock().status()
    }

    pub fn reset(&self) {
        self.inner.lock().reset();
    }
}

impl<R: FeatureRecord> From<WindowDetector<R>> for SharedWindowDetector<R> {
    fn from(detector: WindowDetector<R>) -> Self {
        Self::new(detector)
    }
}
