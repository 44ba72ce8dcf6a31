//! Segment ids packed little-endian into the RGB channels of a panoptic PNG.
use crate::error::{Result, VistasError};
use crate::image::{IdRaster, PanopticRaster};

/// Pixels with this id belong to no segment.
pub const VOID_ID: u32 = 0;
/// Largest id representable in three 8-bit channels.
pub const MAX_PANOPTIC_ID: u32 = (1 << 24) - 1;

/// `r + 256 * g + 65536 * b`
#[inline]
pub fn decode_panoptic_id(rgb: [u8; 3]) -> u32 {
    let [r, g, b] = rgb;
    u32::from(r) | u32::from(g) << 8 | u32::from(b) << 16
}

/// Inverse of [`decode_panoptic_id`]; `None` above [`MAX_PANOPTIC_ID`].
#[inline]
pub fn encode_panoptic_id(id: u32) -> Option<[u8; 3]> {
    if id > MAX_PANOPTIC_ID {
        return None;
    }
    let [r, g, b, _] = id.to_le_bytes();
    Some([r, g, b])
}

pub fn decode_panoptic_ids(raster: &PanopticRaster) -> IdRaster {
    raster.map(decode_panoptic_id)
}

pub fn encode_panoptic_ids(ids: &IdRaster) -> Result<PanopticRaster> {
    let mut data = Vec::with_capacity(ids.data.len());
    for &id in &ids.data {
        let rgb = encode_panoptic_id(id).ok_or_else(|| {
            VistasError::malformed(
                "panoptic id raster",
                format!("id {id} does not fit in 24 bits"),
            )
        })?;
        data.push(rgb);
    }
    PanopticRaster::from_vec(ids.w, ids.h, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Raster;

    #[test]
    fn decode_matches_channel_formula() {
        for rgb in [[0, 0, 0], [1, 0, 0], [0, 1, 0], [0, 0, 1], [12, 34, 56], [255, 255, 255]] {
            let [r, g, b] = rgb.map(u32::from);
            assert_eq!(decode_panoptic_id(rgb), r + 256 * g + 65536 * b);
        }
    }

    #[test]
    fn encode_inverts_decode_below_24_bits() {
        for id in [0, 1, 255, 256, 65535, 65536, 1_234_567, MAX_PANOPTIC_ID] {
            let rgb = encode_panoptic_id(id).unwrap();
            assert_eq!(decode_panoptic_id(rgb), id);
        }
        assert_eq!(encode_panoptic_id(MAX_PANOPTIC_ID + 1), None);
    }

    #[test]
    fn raster_decode_is_elementwise() {
        let pan = Raster::from_rows(&[[[5u8, 0, 0], [0, 1, 0]], [[0, 0, 0], [1, 1, 1]]]).unwrap();
        let ids = decode_panoptic_ids(&pan);
        assert_eq!(ids.to_rows(), vec![vec![5, 256], vec![0, 65793]]);
        assert_eq!(encode_panoptic_ids(&ids).unwrap(), pan);
    }

    #[test]
    fn oversized_id_cannot_be_encoded() {
        let ids = Raster::from_rows(&[[1u32 << 24]]).unwrap();
        assert!(encode_panoptic_ids(&ids).is_err());
    }
}
