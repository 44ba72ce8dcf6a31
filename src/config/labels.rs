//! Label taxonomy loaded from the dataset's `config.json`.
//!
//! Label order in the file defines the label index written into label and
//! instance rasters. The taxonomy is immutable once loaded and is passed by
//! reference to every decoder.
use crate::error::{Result, VistasError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Label rasters store indices as `u8`, so at most 256 labels are addressable.
pub const MAX_LABELS: usize = 256;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    #[serde(rename = "readable")]
    pub readable_name: String,
    pub color: [u8; 3],
    #[serde(rename = "instances")]
    pub has_instances: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct LabelConfig {
    pub labels: Vec<Label>,
}

impl LabelConfig {
    pub fn new(labels: Vec<Label>) -> Result<Self> {
        let config = Self { labels };
        config.validate()?;
        Ok(config)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Label> {
        self.labels.get(index)
    }

    /// `(index, label)` pairs in taxonomy order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Label)> {
        self.labels.iter().enumerate()
    }

    /// Reverse lookup from display colour to label index.
    ///
    /// Used to recover indices from palette PNGs that were expanded to RGB on
    /// decode. When two labels share a colour the first one wins.
    pub fn index_by_color(&self) -> HashMap<[u8; 3], u8> {
        let mut lookup = HashMap::with_capacity(self.labels.len());
        for (index, label) in self.iter() {
            // validate() keeps index below MAX_LABELS
            lookup.entry(label.color).or_insert(index as u8);
        }
        lookup
    }

    fn validate(&self) -> Result<()> {
        if self.labels.len() > MAX_LABELS {
            return Err(VistasError::malformed(
                "label config",
                format!(
                    "{} labels exceed the {MAX_LABELS} addressable by 8-bit rasters",
                    self.labels.len()
                ),
            ));
        }
        Ok(())
    }
}

/// Parse a taxonomy from JSON text. `source` names the input in errors.
pub fn parse_label_config(json: &str, source: &str) -> Result<LabelConfig> {
    let config: LabelConfig = serde_json::from_str(json)
        .map_err(|e| VistasError::malformed(format!("label config {source}"), e))?;
    config.validate()?;
    Ok(config)
}

pub fn load_label_config(path: &Path) -> Result<LabelConfig> {
    let data = fs::read_to_string(path).map_err(|e| VistasError::missing(path, e))?;
    let config = parse_label_config(&data, &path.display().to_string())?;
    log::debug!("loaded {} labels from {}", config.len(), path.display());
    Ok(config)
}
