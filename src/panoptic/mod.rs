pub mod codec;
pub mod metadata;
pub mod reconcile;

pub use self::codec::{
    decode_panoptic_id, decode_panoptic_ids, encode_panoptic_id, encode_panoptic_ids,
    MAX_PANOPTIC_ID, VOID_ID,
};
pub use self::metadata::{
    load_panoptic_metadata, parse_panoptic_metadata, Category, ImageAnnotation, PanopticIndex,
    PanopticMetadata, SegmentInfo,
};
pub use self::reconcile::{
    count_segment_pixels, reconcile_segments, MatchedSegment, OrphanId, SegmentReconciliation,
};

use crate::error::Result;
use crate::image::PanopticRaster;
use serde::Serialize;

/// One matched segment joined with its category, as printed by the demo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentRecord {
    pub id: u32,
    pub category_id: u32,
    pub category_name: String,
    pub supercategory: String,
    pub area: u64,
    pub pixel_count: u64,
    pub bbox: [u32; 4],
}

/// Decode `raster`, reconcile it against the annotation of `image_id` and
/// join every matched segment with its category.
///
/// Integrity mismatches and unknown category ids are both fatal.
pub fn verify_image(
    raster: &PanopticRaster,
    index: &PanopticIndex<'_>,
    image_id: &str,
) -> Result<(SegmentReconciliation, Vec<SegmentRecord>)> {
    let annotation = index.annotation(image_id)?;
    let ids = decode_panoptic_ids(raster);
    let reconciliation =
        reconcile_segments(&ids, &annotation.segments_info).into_result(image_id)?;

    for m in reconciliation.area_mismatches() {
        log::warn!(
            "segment {} of {image_id}: declared area {} but {} pixels in raster",
            m.info.id,
            m.info.area,
            m.pixel_count
        );
    }

    let records = reconciliation
        .matched
        .iter()
        .map(|m| {
            let category = index.category(m.info.category_id)?;
            Ok(SegmentRecord {
                id: m.info.id,
                category_id: category.id,
                category_name: category.name.clone(),
                supercategory: category.supercategory.clone(),
                area: m.info.area,
                pixel_count: m.pixel_count,
                bbox: m.info.bbox,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    log::info!(
        "panoptic check for {image_id}: {}",
        reconciliation.summary()
    );
    Ok((reconciliation, records))
}
