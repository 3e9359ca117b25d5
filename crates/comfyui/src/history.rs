//! Typed view of ComfyUI history entries.
//!
//! `GET /history/{prompt_id}` returns a JSON map keyed by prompt ID.
//! Each entry carries an `outputs` map from node ID to that node's
//! produced artifacts. This module deserializes the slice of the
//! payload the batch driver needs -- the image descriptors.

use std::collections::BTreeMap;

use serde::Deserialize;

/// A finished job's entry in the server history.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    /// Artifacts per output node, keyed by node ID.
    ///
    /// A `BTreeMap` keeps node-id order stable so "first image" is a
    /// deterministic choice.
    #[serde(default)]
    pub outputs: BTreeMap<String, NodeOutput>,
}

/// Artifacts produced by a single output node.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeOutput {
    /// Image descriptors; absent for nodes that produce no images.
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

/// Reference to one generated image on the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageRef {
    pub filename: String,
    #[serde(default)]
    pub subfolder: String,
    /// Storage-type tag, `"output"` unless the server says otherwise.
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
}

fn default_kind() -> String {
    "output".to_string()
}

impl HistoryEntry {
    /// First image descriptor across all output nodes, in node-id
    /// order. `None` when the job finished without producing images.
    pub fn first_image(&self) -> Option<&ImageRef> {
        self.outputs
            .values()
            .flat_map(|node| node.images.iter())
            .next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_history_entry_with_images() {
        let json = serde_json::json!({
            "outputs": {
                "11": {
                    "images": [
                        {"filename": "focal_00001_.png", "subfolder": "", "type": "output"}
                    ]
                }
            }
        });
        let entry: HistoryEntry = serde_json::from_value(json).unwrap();
        let image = entry.first_image().unwrap();
        assert_eq!(image.filename, "focal_00001_.png");
        assert_eq!(image.subfolder, "");
        assert_eq!(image.kind, "output");
    }

    #[test]
    fn missing_subfolder_and_type_get_defaults() {
        let json = serde_json::json!({
            "outputs": {
                "11": {"images": [{"filename": "a.png"}]}
            }
        });
        let entry: HistoryEntry = serde_json::from_value(json).unwrap();
        let image = entry.first_image().unwrap();
        assert_eq!(image.subfolder, "");
        assert_eq!(image.kind, "output");
    }

    #[test]
    fn entry_without_images_has_no_first_image() {
        let json = serde_json::json!({
            "outputs": {
                "9": {"latents": [{"filename": "latent.bin"}]}
            }
        });
        let entry: HistoryEntry = serde_json::from_value(json).unwrap();
        assert!(entry.first_image().is_none());
    }

    #[test]
    fn empty_entry_parses() {
        let entry: HistoryEntry = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(entry.first_image().is_none());
    }

    #[test]
    fn first_image_follows_node_id_order() {
        let json = serde_json::json!({
            "outputs": {
                "20": {"images": [{"filename": "second.png"}]},
                "11": {"images": [{"filename": "first.png"}]}
            }
        });
        let entry: HistoryEntry = serde_json::from_value(json).unwrap();
        assert_eq!(entry.first_image().unwrap().filename, "first.png");
    }
}
