//! Evaluation - accuracy and confusion matrix on labelled records

use serde::{Deserialize, Serialize};

use crate::logic::features::FeatureRecord;

use super::node::Node;

/// Percentage (0-100) of records whose prediction matches the label.
/// An empty test set scores 0.
pub fn accuracy<R: FeatureRecord>(node: &Node, test_set: &[R]) -> f64 {
    if test_set.is_empty() {
        log::warn!("Accuracy requested on an empty test set");
        return 0.0;
    }

    let correct = test_set
        .iter()
        .filter(|record| node.predict(*record) == record.is_anomaly())
        .count();

    correct as f64 / test_set.len() as f64 * 100.0
}

/// Prediction outcome counts, "positive" meaning anomaly
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positive: usize,
    pub true_negative: usize,
    pub false_positive: usize,
    pub false_negative: usize,
}

impl ConfusionMatrix {
    pub fn evaluate<R: FeatureRecord>(node: &Node, test_set: &[R]) -> Self {
        let mut matrix = Self::default();
        for record in test_set {
            matrix.record(node.predict(record), record.is_anomaly());
        }
        matrix
    }

    pub fn record(&mut self, predicted: bool, actual: bool) {
        match (predicted, actual) {
            (true, true) => self.true_positive += 1,
            (false, false) => self.true_negative += 1,
            (true, false) => self.false_positive += 1,
            (false, true) => self.false_negative += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.true_positive + self.true_negative + self.false_positive + self.false_negative
    }

    /// Percentage, same scale as [`accuracy`]
    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positive + self.true_negative, self.total()) * 100.0
    }

    pub fn precision(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_positive)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_negative)
    }

    pub fn f1(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}
