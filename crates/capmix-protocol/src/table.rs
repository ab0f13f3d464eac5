use crate::color::Rgb;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Client request for a freshly mixed table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRequest {
    pub table_width: f32,
    pub table_height: f32,
    pub caps_diameter: f32,
    #[serde(default)]
    pub iterations: Option<u64>,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// One cap placed on one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub diameter: f32,
    #[serde(with = "crate::color::serde_hex")]
    pub color: Rgb,
    pub type_id: u32,
}

/// A complete generated table, as written to disk by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    pub cost: u64,
    pub fingerprint: String,
    pub placements: Vec<Placement>,
}

/// Frames sent back over the WebSocket, tagged by `action`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ServerMessage {
    #[serde(rename_all = "camelCase")]
    NewTable {
        table_id: String,
        generated_at: String,
        cost: u64,
        fingerprint: String,
        data: Vec<Placement>,
    },
    Progress {
        step: u64,
        cost: u64,
        temperature: f64,
    },
    Error {
        message: String,
    },
}

/// Content hash of a placement list, stable across serialization details.
pub fn layout_fingerprint(placements: &[Placement]) -> String {
    let mut hasher = Sha256::new();
    for p in placements {
        hasher.update(p.id.to_le_bytes());
        hasher.update(p.color);
        hasher.update(p.type_id.to_le_bytes());
    }
    hex::encode(hasher.finalize())
}
