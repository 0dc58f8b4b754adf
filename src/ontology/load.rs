use std::fs;

use anyhow::{Context, Result};
use log::info;

use super::tree::ConceptTree;

/// Reads and flattens an ontology document. Runs on a background thread; any
/// failure surfaces as an error with no partial tree escaping.
pub fn load_concept_tree(path: &str) -> Result<ConceptTree> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read ontology document {path}"))?;

    let tree = ConceptTree::from_json(&raw)
        .with_context(|| format!("failed to parse ontology document {path}"))?;

    info!(
        "loaded {path}: {} concepts, max depth {}",
        tree.node_count(),
        tree.max_level()
    );

    Ok(tree)
}
