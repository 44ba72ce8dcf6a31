#![doc = include_str!("../README.md")]

pub mod colormap;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod instance;
pub mod panoptic;
pub mod pipeline;
pub mod visualize;

// --- High-level re-exports -------------------------------------------------

pub use crate::colormap::apply_color_map;
pub use crate::config::{Label, LabelConfig, RuntimeConfig};
pub use crate::error::{Result, VistasError};
pub use crate::instance::split_instances;
pub use crate::panoptic::{
    decode_panoptic_id, decode_panoptic_ids, encode_panoptic_id, reconcile_segments,
    SegmentReconciliation,
};
pub use crate::pipeline::Demo;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use vistas_toolkit::prelude::*;
///
/// let labels = LabelConfig::new(vec![
///     Label { name: "road".into(), readable_name: "Road".into(), color: [128, 64, 128], has_instances: false },
///     Label { name: "car".into(), readable_name: "Car".into(), color: [0, 0, 142], has_instances: true },
/// ])
/// .unwrap();
///
/// let packed = Raster::from_rows(&[[1u16 * 256 + 3, 0]]).unwrap();
/// let (label_channel, instance_ids) = split_instances(&packed);
/// let colored = apply_color_map(&label_channel, &labels).unwrap();
///
/// assert_eq!(instance_ids.data, vec![3, 0]);
/// assert_eq!(colored.data, vec![[0, 0, 142], [128, 64, 128]]);
/// ```
pub mod prelude {
    pub use crate::image::{IdRaster, InstanceRaster, LabelRaster, PanopticRaster, Raster};
    pub use crate::{
        apply_color_map, decode_panoptic_ids, reconcile_segments, split_instances, Label,
        LabelConfig, SegmentReconciliation,
    };
}
