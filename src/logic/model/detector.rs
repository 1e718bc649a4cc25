//! Detector Interface
//!
//! Callers that only need "is this record anomalous" depend on
//! [`AnomalyDetector`], not on the tree.

use std::path::Path;

use crate::logic::features::{FeatureRecord, LayoutInfo};
use crate::logic::tree::{accuracy, ConfusionMatrix, Node};

use super::document::ModelDocument;
use super::storage;
use super::ModelError;

// ============================================================================
// DETECTOR TRAIT
// ============================================================================

pub trait AnomalyDetector {
    fn predict(&self, record: &dyn FeatureRecord) -> bool;
}

// ============================================================================
// DECISION TREE MODEL
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionTreeModel {
    root: Node,
}

impl DecisionTreeModel {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    /// Load a model file trained on the current ECU layout. Bare tree
    /// files are accepted too.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        Ok(Self::new(storage::load_tree(path, &LayoutInfo::current())?))
    }

    pub fn from_document(doc: &ModelDocument, layout: &LayoutInfo) -> Result<Self, ModelError> {
        Ok(Self::new(doc.tree_for(layout)?))
    }

    pub fn to_document(&self, layout: &LayoutInfo, max_depth: usize, training_samples: usize) -> Result<ModelDocument, ModelError> {
        ModelDocument::new(&self.root, layout, max_depth, training_samples)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn accuracy<R: FeatureRecord>(&self, test_set: &[R]) -> f64 {
        accuracy(&self.root, test_set)
    }

    pub fn confusion<R: FeatureRecord>(&self, test_set: &[R]) -> ConfusionMatrix {
        ConfusionMatrix::evaluate(&self.root, test_set)
    }
}

impl AnomalyDetector for DecisionTreeModel {
    fn predict(&self, record: &dyn FeatureRecord) -> bool {
        self.root.predict(record)
    }
}

impl From<Node> for DecisionTreeModel {
    fn from(root: Node) -> Self {
        Self::new(root)
    }
}
