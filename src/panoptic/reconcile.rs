//! Cross-check between the ids visible in a panoptic raster and the
//! segments its annotation declares.
//!
//! Every nonzero id in the raster must have exactly one declared segment and
//! every declared segment must cover at least one pixel. The check returns
//! the full reconciliation rather than stopping at the first mismatch, so a
//! caller can report all of it; [`SegmentReconciliation::into_result`] turns
//! any mismatch into a fatal [`VistasError::Integrity`].
use super::codec::VOID_ID;
use super::metadata::SegmentInfo;
use crate::error::{Result, VistasError};
use crate::image::IdRaster;
use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedSegment {
    pub info: SegmentInfo,
    /// Pixels carrying this id in the raster.
    pub pixel_count: u64,
}

impl MatchedSegment {
    pub fn area_matches(&self) -> bool {
        self.info.area == self.pixel_count
    }
}

/// Raster id with no declared segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrphanId {
    pub id: u32,
    pub pixel_count: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentReconciliation {
    /// Ids found on both sides, ascending.
    pub matched: Vec<MatchedSegment>,
    /// Raster ids without metadata, ascending.
    pub missing_metadata: Vec<OrphanId>,
    /// Declared segments with zero pixels, ascending.
    pub unused_metadata: Vec<SegmentInfo>,
    /// Ids declared more than once, ascending.
    pub duplicate_metadata: Vec<u32>,
}

impl SegmentReconciliation {
    pub fn is_consistent(&self) -> bool {
        self.missing_metadata.is_empty()
            && self.unused_metadata.is_empty()
            && self.duplicate_metadata.is_empty()
    }

    /// Matched segments whose declared area disagrees with the pixel count.
    pub fn area_mismatches(&self) -> impl Iterator<Item = &MatchedSegment> {
        self.matched.iter().filter(|m| !m.area_matches())
    }

    pub fn summary(&self) -> String {
        let mut parts = vec![format!("{} matched", self.matched.len())];
        if !self.missing_metadata.is_empty() {
            parts.push(format!(
                "ids without metadata [{}]",
                join_ids(self.missing_metadata.iter().map(|o| o.id))
            ));
        }
        if !self.unused_metadata.is_empty() {
            parts.push(format!(
                "declared segments without pixels [{}]",
                join_ids(self.unused_metadata.iter().map(|s| s.id))
            ));
        }
        if !self.duplicate_metadata.is_empty() {
            parts.push(format!(
                "ids declared more than once [{}]",
                join_ids(self.duplicate_metadata.iter().copied())
            ));
        }
        parts.join("; ")
    }

    pub fn into_result(self, image_id: &str) -> Result<Self> {
        if self.is_consistent() {
            Ok(self)
        } else {
            Err(VistasError::Integrity {
                image_id: image_id.to_string(),
                summary: self.summary(),
            })
        }
    }
}

fn join_ids(ids: impl Iterator<Item = u32>) -> String {
    ids.map(|id| id.to_string()).collect::<Vec<_>>().join(", ")
}

/// Pixel count per nonzero id, ascending by id.
pub fn count_segment_pixels(ids: &IdRaster) -> BTreeMap<u32, u64> {
    let mut counts = BTreeMap::new();
    for &id in ids.data.iter().filter(|&&id| id != VOID_ID) {
        *counts.entry(id).or_insert(0u64) += 1;
    }
    counts
}

pub fn reconcile_segments(ids: &IdRaster, segments: &[SegmentInfo]) -> SegmentReconciliation {
    let mut declared: BTreeMap<u32, &SegmentInfo> = BTreeMap::new();
    let mut duplicate_metadata = Vec::new();
    for segment in segments {
        match declared.entry(segment.id) {
            Entry::Vacant(slot) => {
                slot.insert(segment);
            }
            Entry::Occupied(_) => duplicate_metadata.push(segment.id),
        }
    }
    duplicate_metadata.sort_unstable();
    duplicate_metadata.dedup();

    let mut matched = Vec::new();
    let mut missing_metadata = Vec::new();
    for (id, pixel_count) in count_segment_pixels(ids) {
        match declared.remove(&id) {
            Some(info) => matched.push(MatchedSegment {
                info: info.clone(),
                pixel_count,
            }),
            None => missing_metadata.push(OrphanId { id, pixel_count }),
        }
    }

    let unused_metadata = declared.into_values().cloned().collect();

    SegmentReconciliation {
        matched,
        missing_metadata,
        unused_metadata,
        duplicate_metadata,
    }
}
