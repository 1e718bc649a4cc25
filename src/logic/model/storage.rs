use std::fs;
use std::path::Path;

use crate::logic::features::LayoutInfo;
use crate::logic::tree::Node;

use super::document::{deserialize, ModelDocument, NodeDocument};
use super::ModelError;

/// Save model document to disk (pretty JSON)
pub fn save_model(model: &ModelDocument, path: &Path) -> Result<(), ModelError> {
    // Ensure directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_vec_pretty(model)?;
    fs::write(path, json)?;

    log::info!(
        "Saved model {} ({} training samples) to {}",
        model.id,
        model.training_samples,
        path.display()
    );
    Ok(())
}

/// Load model document from disk with integrity checks
pub fn load_model(path: &Path) -> Result<ModelDocument, ModelError> {
    let data = fs::read(path)?;
    let model: ModelDocument = serde_json::from_slice(&data)?;
    verified(model, path)
}

fn verified(model: ModelDocument, path: &Path) -> Result<ModelDocument, ModelError> {
    model.verify()?;

    log::info!(
        "Loaded model {} (format v{}, layout {:08x}) from {}",
        model.id,
        model.format_version,
        model.layout_hash,
        path.display()
    );
    Ok(model)
}

/// Load a bare tree document (no metadata, no checksum)
pub fn import_tree(path: &Path) -> Result<Node, ModelError> {
    let data = fs::read(path)?;
    let doc: NodeDocument = serde_json::from_slice(&data)?;
    deserialize(&doc)
}

/// Tree from either a model document or a bare tree document. Bare trees
/// are recognised by a top-level `IsLeaf` and skip checksum/layout checks.
pub fn load_tree(path: &Path, layout: &LayoutInfo) -> Result<Node, ModelError> {
    let data = fs::read(path)?;
    let value: serde_json::Value = serde_json::from_slice(&data)?;

    if value.get("IsLeaf").is_some() {
        log::warn!("{} is a bare tree document, no integrity checks applied", path.display());
        let doc: NodeDocument = serde_json::from_value(value)?;
        return deserialize(&doc);
    }

    let model: ModelDocument = serde_json::from_value(value)?;
    verified(model, path)?.tree_for(layout)
}
