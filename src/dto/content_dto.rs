use serde::{Deserialize, Serialize};

use crate::model::content::Content;

/// Body for a full-section update. The payload shape depends on the section,
/// so it stays opaque here; the service deserializes it into the matching
/// typed bundle.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSectionRequest {
    pub content: serde_json::Value,
}

/// Body for adding or editing a single list item (service or project).
#[derive(Debug, Clone, Deserialize)]
pub struct ItemRequest {
    pub item: serde_json::Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionResponse {
    pub success: bool,
    pub content: Content,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentListResponse {
    pub content: Vec<Content>,
}
