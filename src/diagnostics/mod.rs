//! Serializable summary of one demo run.
pub mod timing;

pub use self::timing::{elapsed_ms, StageTiming, TimingBreakdown};

use crate::config::LabelConfig;
use crate::panoptic::{SegmentReconciliation, SegmentRecord};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelListing {
    pub index: usize,
    pub name: String,
    pub readable_name: String,
    pub color: [u8; 3],
    pub has_instances: bool,
}

impl LabelListing {
    pub fn from_config(labels: &LabelConfig) -> Vec<Self> {
        labels
            .iter()
            .map(|(index, l)| Self {
                index,
                name: l.name.clone(),
                readable_name: l.readable_name.clone(),
                color: l.color,
                has_instances: l.has_instances,
            })
            .collect()
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub image_id: String,
    pub width: usize,
    pub height: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoReport {
    pub input: InputDescriptor,
    pub labels: Vec<LabelListing>,
    /// Pixels where the label file and the instance file's label channel differ.
    pub label_channel_mismatches: usize,
    pub segments: Vec<SegmentRecord>,
    pub reconciliation: SegmentReconciliation,
    pub figure: PathBuf,
    pub timings: TimingBreakdown,
}

/// `"{readable:>30} ({index:2}): {name:<40} has instances: {flag}"` per label.
pub fn format_label_listing(labels: &[LabelListing]) -> String {
    let mut out = format!("There are {} labels in the config file\n", labels.len());
    for l in labels {
        let _ = writeln!(
            out,
            "{:>30} ({:2}): {:<40} has instances: {}",
            l.readable_name, l.index, l.name, l.has_instances
        );
    }
    out
}

/// `"segment {id:8}: label {supercategory:<40}, area {area:6}, bbox [..]"` per segment.
pub fn format_segment_listing(segments: &[SegmentRecord]) -> String {
    let mut out = String::from("Panoptic segments:\n\n");
    for s in segments {
        let [x, y, w, h] = s.bbox;
        let _ = writeln!(
            out,
            "segment {:8}: label {:<40}, area {:6}, bbox [{x}, {y}, {w}, {h}]",
            s.id, s.supercategory, s.area
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Label;

    #[test]
    fn label_listing_is_aligned() {
        let labels = LabelConfig::new(vec![Label {
            name: "animal--bird".into(),
            readable_name: "Bird".into(),
            color: [165, 42, 42],
            has_instances: true,
        }])
        .unwrap();
        let text = format_label_listing(&LabelListing::from_config(&labels));
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("There are 1 labels in the config file"));
        let line = lines.next().unwrap();
        assert!(line.starts_with(&format!("{:>30} ( 0): animal--bird", "Bird")), "{line}");
        assert!(line.ends_with("has instances: true"));
    }

    #[test]
    fn segment_listing_shows_bbox() {
        let record = SegmentRecord {
            id: 5,
            category_id: 1,
            category_name: "car".into(),
            supercategory: "object--vehicle--car".into(),
            area: 12,
            pixel_count: 12,
            bbox: [1, 2, 3, 4],
        };
        let text = format_segment_listing(&[record]);
        assert!(text.contains("segment        5: label object--vehicle--car"));
        assert!(text.contains("area     12, bbox [1, 2, 3, 4]"));
    }
}
