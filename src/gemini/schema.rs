use serde::Deserialize;
use serde_json::{Value, json};

use crate::types::{GroundingMetadata, RawSetData};

pub fn build_prompt(set_number: &str) -> String {
    format!(
        "COMPLETE INVENTORY SCAN: Fetch the 100% full list of parts for LEGO set {set_number}.

MANDATORY DATA FOR EACH PART:
1. Part Name & Color.
2. Quantity in this set.
3. Design ID (e.g., 3001 for a 2x4 brick) - CRITICAL for images.
4. Element ID (e.g., 4113233 for a specific red 2x4 brick).

Return ALL parts. DO NOT TRUNCATE. Use BrickLink as the source of truth."
    )
}

pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "theme": { "type": "STRING" },
            "totalParts": { "type": "NUMBER" },
            "parts": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "color": { "type": "STRING" },
                        "quantity": { "type": "NUMBER" },
                        "description": { "type": "STRING" },
                        "designId": { "type": "STRING", "description": "The shape ID, e.g. 3001" },
                        "elementId": { "type": "STRING", "description": "The color-specific ID, e.g. 4113233" }
                    },
                    "required": ["name", "color", "quantity", "description", "designId", "elementId"]
                }
            }
        },
        "required": ["name", "theme", "totalParts", "parts"]
    })
}

pub fn request_body(set_number: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": build_prompt(set_number) }] }],
        "tools": [{ "google_search": {} }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema()
        }
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<ContentPart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentPart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, `None` when there is none.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    pub fn grounding(&self) -> Option<GroundingMetadata> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.clone())
    }
}

/// Parses the model's text into a set record.
///
/// Grounded answers sometimes arrive wrapped in a markdown code fence, which
/// is stripped before parsing.
pub fn parse_set_data(text: &str) -> Result<RawSetData, serde_json::Error> {
    let trimmed = text.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);
    serde_json::from_str(unfenced.trim())
}
