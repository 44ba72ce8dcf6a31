//! Panoptic annotation sidecar (`panoptic_2018.json` style).
//!
//! Only the fields the toolkit reads are modelled; anything else in the file
//! (`images`, `info`, per-segment `iscrowd`, ...) is ignored on parse.
use crate::error::{Result, VistasError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentInfo {
    pub id: u32,
    pub category_id: u32,
    /// Declared pixel count.
    pub area: u64,
    /// `[x, y, width, height]`
    pub bbox: [u32; 4],
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub supercategory: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isthing: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<[u8; 3]>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ImageAnnotation {
    pub image_id: String,
    #[serde(default)]
    pub file_name: Option<String>,
    pub segments_info: Vec<SegmentInfo>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PanopticMetadata {
    pub annotations: Vec<ImageAnnotation>,
    pub categories: Vec<Category>,
}

impl PanopticMetadata {
    pub fn index(&self) -> PanopticIndex<'_> {
        PanopticIndex::new(self)
    }
}

/// Lookups by image id and by category id.
///
/// Later duplicates of the same key replace earlier ones.
#[derive(Debug)]
pub struct PanopticIndex<'a> {
    annotations: HashMap<&'a str, &'a ImageAnnotation>,
    categories: HashMap<u32, &'a Category>,
}

impl<'a> PanopticIndex<'a> {
    pub fn new(metadata: &'a PanopticMetadata) -> Self {
        let annotations = metadata
            .annotations
            .iter()
            .map(|a| (a.image_id.as_str(), a))
            .collect();
        let categories = metadata.categories.iter().map(|c| (c.id, c)).collect();
        Self {
            annotations,
            categories,
        }
    }

    pub fn annotation(&self, image_id: &str) -> Result<&'a ImageAnnotation> {
        self.annotations.get(image_id).copied().ok_or_else(|| {
            VistasError::malformed(
                "panoptic metadata",
                format!("no annotation for image {image_id}"),
            )
        })
    }

    pub fn category(&self, category_id: u32) -> Result<&'a Category> {
        self.categories.get(&category_id).copied().ok_or_else(|| {
            VistasError::malformed(
                "panoptic metadata",
                format!("unknown category id {category_id}"),
            )
        })
    }

    pub fn image_count(&self) -> usize {
        self.annotations.len()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}

pub fn parse_panoptic_metadata(json: &str, source: &str) -> Result<PanopticMetadata> {
    serde_json::from_str(json)
        .map_err(|e| VistasError::malformed(format!("panoptic metadata {source}"), e))
}

pub fn load_panoptic_metadata(path: &Path) -> Result<PanopticMetadata> {
    let data = fs::read_to_string(path).map_err(|e| VistasError::missing(path, e))?;
    let metadata = parse_panoptic_metadata(&data, &path.display().to_string())?;
    log::debug!(
        "loaded {} panoptic annotations and {} categories from {}",
        metadata.annotations.len(),
        metadata.categories.len(),
        path.display()
    );
    Ok(metadata)
}
