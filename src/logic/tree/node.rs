//! Tree Node
//!
//! A node is either a leaf carrying a fixed prediction or an internal split
//! that owns exactly two children. Trees are built once and then only read.

use crate::logic::features::FeatureRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        prediction: bool,
    },
    Internal {
        feature: usize,
        threshold: i64,
        /// value <= threshold
        left: Box<Node>,
        /// value > threshold
        right: Box<Node>,
    },
}

impl Node {
    pub fn leaf(prediction: bool) -> Self {
        Node::Leaf { prediction }
    }

    pub fn internal(feature: usize, threshold: i64, left: Node, right: Node) -> Self {
        Node::Internal {
            feature,
            threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Walk from this node to a leaf. O(depth), never mutates.
    pub fn predict<R: FeatureRecord + ?Sized>(&self, record: &R) -> bool {
        let mut node = self;
        loop {
            match node {
                Node::Leaf { prediction } => return *prediction,
                Node::Internal { feature, threshold, left, right } => {
                    node = if record.feature_value(*feature) <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    /// Edges on the longest root-to-leaf path (a lone leaf has depth 0)
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    pub fn node_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => 1 + left.node_count() + right.node_count(),
        }
    }
}

/// Free-function form of [`Node::predict`]
pub fn predict<R: FeatureRecord + ?Sized>(node: &Node, record: &R) -> bool {
    node.predict(record)
}
