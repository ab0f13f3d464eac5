use crate::core_types::{color_key, ColorKey};
use crate::error::{CapResult, CapmixError};
use capmix_protocol::catalog::CapRecord;
use capmix_protocol::color::Rgb;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A colored, categorized cap. Caps are interchangeable except for these
/// attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cap {
    pub color: Rgb,
    pub type_id: u32,
    pub label: String,
}

impl Cap {
    #[inline(always)]
    pub fn key(&self) -> ColorKey {
        color_key(self.color)
    }
}

impl From<CapRecord> for Cap {
    fn from(record: CapRecord) -> Self {
        Self {
            color: record.color,
            type_id: record.type_id,
            label: record.label,
        }
    }
}

/// The candidate caps available for one table.
#[derive(Debug, Clone)]
pub struct CapPool {
    caps: Vec<Cap>,
}

impl CapPool {
    pub fn new(caps: Vec<Cap>) -> CapResult<Self> {
        if caps.is_empty() {
            return Err(CapmixError::Validation("cap pool is empty".to_string()));
        }
        Ok(Self { caps })
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CapResult<Self> {
        let content = fs::read_to_string(path)?;
        let records: Vec<CapRecord> = serde_json::from_str(&content)?;
        Self::new(records.into_iter().map(Cap::from).collect())
    }

    pub fn len(&self) -> usize {
        self.caps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caps.is_empty()
    }

    pub fn caps(&self) -> &[Cap] {
        &self.caps
    }

    /// Seeded shuffle fixing the participating prefix for one run.
    pub fn shuffled(&self, seed: u64) -> Vec<Cap> {
        let mut caps = self.caps.clone();
        let mut rng = fastrand::Rng::with_seed(seed);
        rng.shuffle(&mut caps);
        caps
    }
}
