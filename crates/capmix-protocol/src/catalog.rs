use crate::color::Rgb;
use serde::{Deserialize, Serialize};

/// One entry of a cap catalog file (`caps.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapRecord {
    #[serde(with = "crate::color::serde_hex")]
    pub color: Rgb,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub type_id: u32,
}
