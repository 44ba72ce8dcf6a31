//! Split packed instance rasters into label and instance-id channels.
use crate::image::{InstanceIdRaster, InstanceRaster, LabelRaster};

/// Packing factor between the label and instance channels.
pub const INSTANCE_BASE: u16 = 256;

/// `(label, instance_id)` for one packed value.
#[inline]
pub fn split_value(value: u16) -> (u8, u8) {
    ((value / INSTANCE_BASE) as u8, (value % INSTANCE_BASE) as u8)
}

#[inline]
pub fn pack_value(label: u8, instance_id: u8) -> u16 {
    u16::from(label) * INSTANCE_BASE + u16::from(instance_id)
}

/// Split every pixel into `value / 256` (label) and `value % 256` (instance).
pub fn split_instances(raster: &InstanceRaster) -> (LabelRaster, InstanceIdRaster) {
    (
        raster.map(|v| split_value(v).0),
        raster.map(|v| split_value(v).1),
    )
}
