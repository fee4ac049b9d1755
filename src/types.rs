use serde::{Deserialize, Deserializer, Serialize};
use tabled::Tabled;

/// One distinct part type inside a set, tracked by required vs. collected count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: String,
    pub name: String,
    pub color: String,
    pub description: String,
    #[serde(default)]
    pub design_id: String,
    #[serde(default)]
    pub element_id: String,
    pub quantity: u32,
    pub collected: u32,
    pub image_url: String,
}

impl Part {
    pub fn is_complete(&self) -> bool {
        self.collected >= self.quantity
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalUrl {
    pub title: String,
    pub uri: String,
}

/// One owned set. The set owns its parts exclusively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrickSet {
    pub id: String,
    pub number: String,
    pub name: String,
    pub theme: String,
    pub total_parts: u32,
    pub image_url: String,
    pub parts: Vec<Part>,
    /// Milliseconds since the unix epoch.
    pub last_modified: i64,
    #[serde(default)]
    pub external_urls: Vec<ExternalUrl>,
}

impl BrickSet {
    pub fn find_part(&self, part_id: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.id == part_id)
    }

    pub fn progress(&self) -> Progress {
        let (collected, required) = self
            .parts
            .iter()
            .fold((0u64, 0u64), |(c, r), p| {
                (c + p.collected as u64, r + p.quantity as u64)
            });
        Progress {
            collected,
            required,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub collected: u64,
    pub required: u64,
}

impl Progress {
    pub fn percent(&self) -> u8 {
        if self.required == 0 {
            return 0;
        }
        ((self.collected * 100) / self.required).min(100) as u8
    }

    pub fn is_complete(&self) -> bool {
        self.required > 0 && self.collected >= self.required
    }
}

/// The whole application state, persisted as one blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub sets: Vec<BrickSet>,
    pub active_set_id: Option<String>,
    #[serde(default)]
    pub is_searching: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl AppState {
    pub fn active_set(&self) -> Option<&BrickSet> {
        let active_id = self.active_set_id.as_deref()?;
        self.sets.iter().find(|s| s.id == active_id)
    }

    pub fn find_set(&self, set_id: &str) -> Option<&BrickSet> {
        self.sets.iter().find(|s| s.id == set_id)
    }
}

/// Loosely typed set record as returned by the fetch collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSetData {
    pub name: String,
    pub theme: String,
    #[serde(default, deserialize_with = "deserialize_optional_count")]
    pub total_parts: Option<u32>,
    pub parts: Vec<RawPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPart {
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(deserialize_with = "deserialize_count")]
    pub quantity: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub design_id: String,
    #[serde(default)]
    pub element_id: String,
    /// Ignored on normalization, progress always starts at zero.
    #[serde(default)]
    pub collected: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebReference>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebReference {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub uri: String,
}

/// What a fetch collaborator hands back: the set record plus any provenance.
#[derive(Debug, Clone)]
pub struct FetchedSet {
    pub data: RawSetData,
    pub grounding: Option<GroundingMetadata>,
}

#[derive(Tabled)]
pub struct SetTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub number: String,
    pub name: String,
    pub theme: String,
    pub parts: u32,
    pub progress: String,
}

#[derive(Tabled)]
pub struct PartTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub name: String,
    pub color: String,
    pub element: String,
    pub collected: String,
    pub done: String,
}

// The service schema declares counts as plain numbers, so accept floats and
// clamp anything negative to zero.
fn deserialize_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(clamp_count(value))
}

fn deserialize_optional_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.map(clamp_count))
}

fn clamp_count(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}
