//! Owned row-major raster (stride == width) over any `Copy` pixel type.
//!
//! The dataset rasters are all instances of this one container:
//! label indices (`u8`), packed instance values (`u16`), decoded panoptic ids
//! (`u32`) and RGB triples (`[u8; 3]`).
use super::traits::RasterView;
use crate::error::{Result, VistasError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster<P> {
    /// Width in pixels
    pub w: usize,
    /// Height in pixels
    pub h: usize,
    /// Backing storage in row-major order
    pub data: Vec<P>,
}

/// Per-pixel semantic label index.
pub type LabelRaster = Raster<u8>;
/// Per-pixel `label_index * 256 + instance_id`.
pub type InstanceRaster = Raster<u16>;
/// Per-pixel instance id (low byte of an `InstanceRaster`).
pub type InstanceIdRaster = Raster<u8>;
/// Per-pixel RGB triple.
pub type ColorRaster = Raster<[u8; 3]>;
/// Panoptic PNG content: ids packed into RGB.
pub type PanopticRaster = Raster<[u8; 3]>;
/// Decoded panoptic segment ids; 0 is void.
pub type IdRaster = Raster<u32>;

impl<P: Copy + Default> Raster<P> {
    /// Construct a default-filled raster of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![P::default(); w * h],
        }
    }
}

impl<P: Copy> Raster<P> {
    /// Wrap existing row-major pixels, checking the length against `w × h`.
    pub fn from_vec(w: usize, h: usize, data: Vec<P>) -> Result<Self> {
        if data.len() != w * h {
            return Err(VistasError::malformed(
                "raster buffer",
                format!("{} pixels for a {w}x{h} raster", data.len()),
            ));
        }
        Ok(Self { w, h, data })
    }

    /// Build from nested rows; all rows must have equal length.
    pub fn from_rows<R: AsRef<[P]>>(rows: &[R]) -> Result<Self> {
        let h = rows.len();
        let w = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(w * h);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != w {
                return Err(VistasError::malformed(
                    "raster rows",
                    format!("row {y} has {} pixels, expected {w}", row.len()),
                ));
            }
            data.extend_from_slice(row);
        }
        Ok(Self { w, h, data })
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> P {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: P) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Apply `f` to every pixel, keeping the shape.
    pub fn map<Q, F: FnMut(P) -> Q>(&self, f: F) -> Raster<Q> {
        Raster {
            w: self.w,
            h: self.h,
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    /// Rows as owned vectors, mostly useful for assertions.
    pub fn to_rows(&self) -> Vec<Vec<P>> {
        self.rows().map(<[P]>::to_vec).collect()
    }
}

impl<P: Copy> RasterView for Raster<P> {
    type Pixel = P;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[P] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}
