//! Model Module - Tree persistence and detector interface
//!
//! - `document`: lossless tree ⇄ document conversion, versioned model document
//! - `storage`: JSON model files
//! - `detector`: `AnomalyDetector` trait + decision tree implementation
//!
//! # Failure Strategy
//! A document that fails to decode yields no tree at all - no partial models.

pub mod document;
pub mod storage;
pub mod detector;


pub use document::{deserialize, serialize, ModelDocument, NodeDocument, MODEL_FORMAT_VERSION};
pub use storage::{load_model, load_tree, save_model};
pub use detector::{AnomalyDetector, DecisionTreeModel};

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug)]
pub enum ModelError {
    IoError(std::io::Error),
    SerializationError(serde_json::Error),
    /// Internal node missing a child
    MalformedNode(String),
    ChecksumMismatch {
        expected: String,
        actual: String,
    },
    LayoutMismatch {
        expected_hash: u32,
        actual_hash: u32,
    },
    UnsupportedVersion(u32),
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::IoError(e) => write!(f, "IO Error: {}", e),
            ModelError::SerializationError(e) => write!(f, "Serialization Error: {}", e),
            ModelError::MalformedNode(msg) => write!(f, "Malformed tree node: {}", msg),
            ModelError::ChecksumMismatch { expected, actual } => {
                write!(f, "Model checksum mismatch: expected {}, got {}", expected, actual)
            }
            ModelError::LayoutMismatch { expected_hash, actual_hash } => {
                write!(f, "Model layout mismatch: expected {:08x}, got {:08x}", expected_hash, actual_hash)
            }
            ModelError::UnsupportedVersion(v) => write!(f, "Unsupported model format version {}", v),
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::IoError(e) => Some(e),
            ModelError::SerializationError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ModelError {
    fn from(err: std::io::Error) -> Self {
        ModelError::IoError(err)
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::SerializationError(err)
    }
}
