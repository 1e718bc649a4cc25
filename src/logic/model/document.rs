//! Tree Documents
//!
//! `NodeDocument` mirrors the tagged tree with flat fields (`IsLeaf`,
//! `Prediction`, `Feature`, `Threshold`, `Left`, `Right`; children null on
//! leaves), the layout of legacy bare tree files.
//! `ModelDocument` wraps a tree with layout, provenance and a checksum.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::logic::features::layout::hash_names;
use crate::logic::features::LayoutInfo;
use crate::logic::tree::Node;

use super::ModelError;

/// Current model document format
pub const MODEL_FORMAT_VERSION: u32 = 1;

// ============================================================================
// NODE DOCUMENT
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NodeDocument {
    pub feature: usize,
    pub threshold: i64,
    pub left: Option<Box<NodeDocument>>,
    pub right: Option<Box<NodeDocument>>,
    pub is_leaf: bool,
    pub prediction: bool,
}

/// Tree → document
pub fn serialize(node: &Node) -> NodeDocument {
    match node {
        Node::Leaf { prediction } => NodeDocument {
            is_leaf: true,
            prediction: *prediction,
            ..Default::default()
        },
        Node::Internal { feature, threshold, left, right } => NodeDocument {
            feature: *feature,
            threshold: *threshold,
            left: Some(Box::new(serialize(left))),
            right: Some(Box::new(serialize(right))),
            is_leaf: false,
            prediction: false,
        },
    }
}

/// Document → tree. Any malformed node rejects the whole document.
pub fn deserialize(doc: &NodeDocument) -> Result<Node, ModelError> {
    decode_at(doc, "root")
}

fn decode_at(doc: &NodeDocument, path: &str) -> Result<Node, ModelError> {
    if doc.is_leaf {
        if doc.left.is_some() || doc.right.is_some() {
            return Err(ModelError::MalformedNode(format!("leaf at {} has children", path)));
        }
        return Ok(Node::leaf(doc.prediction));
    }

    let (left, right) = match (&doc.left, &doc.right) {
        (Some(left), Some(right)) => (left, right),
        _ => {
            return Err(ModelError::MalformedNode(format!(
                "internal node at {} is missing a child",
                path
            )))
        }
    };

    Ok(Node::internal(
        doc.feature,
        doc.threshold,
        decode_at(left, &format!("{}.left", path))?,
        decode_at(right, &format!("{}.right", path))?,
    ))
}

/// Hex SHA-256 of the compact JSON of a tree document
pub fn checksum(root: &NodeDocument) -> Result<String, ModelError> {
    let bytes = serde_json::to_vec(root)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

// ============================================================================
// MODEL DOCUMENT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDocument {
    pub format_version: u32,
    pub id: String,
    pub feature_version: u8,
    pub feature_names: Vec<String>,
    pub layout_hash: u32,
    pub max_depth: usize,
    pub training_samples: usize,
    pub created_at: DateTime<Utc>,
    pub checksum: String,
    pub root: NodeDocument,
}

impl ModelDocument {
    pub fn new(
        tree: &Node,
        layout: &LayoutInfo,
        max_depth: usize,
        training_samples: usize,
    ) -> Result<Self, ModelError> {
        let root = serialize(tree);
        let checksum = checksum(&root)?;

        Ok(Self {
            format_version: MODEL_FORMAT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            feature_version: layout.version,
            feature_names: layout.feature_names.clone(),
            layout_hash: layout.hash,
            max_depth,
            training_samples,
            created_at: Utc::now(),
            checksum,
            root,
        })
    }

    /// Format version, checksum and internal layout consistency
    pub fn verify(&self) -> Result<(), ModelError> {
        if self.format_version != MODEL_FORMAT_VERSION {
            return Err(ModelError::UnsupportedVersion(self.format_version));
        }

        let actual = checksum(&self.root)?;
        if actual != self.checksum {
            return Err(ModelError::ChecksumMismatch {
                expected: self.checksum.clone(),
                actual,
            });
        }

        let names_hash = hash_names(
            self.feature_version,
            self.feature_names.iter().map(String::as_str),
        );
        if names_hash != self.layout_hash {
            return Err(ModelError::LayoutMismatch {
                expected_hash: self.layout_hash,
                actual_hash: names_hash,
            });
        }

        Ok(())
    }

    /// Verified tree, provided it was trained on `layout`
    pub fn tree_for(&self, layout: &LayoutInfo) -> Result<Node, ModelError> {
        self.verify()?;

        if self.layout_hash != layout.hash {
            return Err(ModelError::LayoutMismatch {
                expected_hash: layout.hash,
                actual_hash: self.layout_hash,
            });
        }

        deserialize(&self.root)
    }

    pub fn layout(&self) -> LayoutInfo {
        LayoutInfo {
            version: self.feature_version,
            hash: self.layout_hash,
            feature_names: self.feature_names.clone(),
        }
    }
}
