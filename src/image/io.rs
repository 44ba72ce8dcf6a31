//! I/O helpers for dataset rasters and JSON.
//!
//! - `load_rgb_image`: base photograph as 8-bit RGB.
//! - `load_label_raster`: label PNG into per-pixel label indices.
//! - `load_instance_raster`: 16-bit instance PNG into packed `u16` values.
//! - `load_panoptic_raster`: 24-bit panoptic PNG into RGB triples.
//! - `save_color_raster`: write an RGB raster to disk.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ColorRaster, InstanceRaster, LabelRaster, PanopticRaster, Raster};
use crate::config::LabelConfig;
use crate::error::{Result, VistasError};
use image::{DynamicImage, ImageError, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Open and decode any supported image, separating unreadable files from
/// undecodable content.
pub fn open_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|e| match e {
        ImageError::IoError(io) => VistasError::missing(path, io),
        other => VistasError::malformed(format!("image {}", path.display()), other),
    })
}

pub fn load_rgb_image(path: &Path) -> Result<RgbImage> {
    Ok(open_image(path)?.into_rgb8())
}

/// Load a label PNG as label indices.
///
/// Single-channel files carry indices directly; 16-bit ones must stay below
/// 256. Palette files come out of
/// the decoder expanded to RGB; those are mapped back through the label
/// colours, and a colour outside the taxonomy is malformed data.
pub fn load_label_raster(path: &Path, labels: &LabelConfig) -> Result<LabelRaster> {
    let context = || format!("label raster {}", path.display());
    match open_image(path)? {
        DynamicImage::ImageLuma8(img) => {
            let (w, h) = (img.width() as usize, img.height() as usize);
            Raster::from_vec(w, h, img.into_raw())
        }
        DynamicImage::ImageLumaA8(img) => {
            let (w, h) = (img.width() as usize, img.height() as usize);
            Raster::from_vec(w, h, img.pixels().map(|p| p.0[0]).collect())
        }
        DynamicImage::ImageLuma16(img) => {
            let (w, h) = (img.width() as usize, img.height() as usize);
            let mut data = Vec::with_capacity(w * h);
            for (x, y, px) in img.enumerate_pixels() {
                let index = u8::try_from(px.0[0]).map_err(|_| {
                    VistasError::malformed(
                        context(),
                        format!("label value {} at ({x}, {y}) does not fit 8 bits", px.0[0]),
                    )
                })?;
                data.push(index);
            }
            Raster::from_vec(w, h, data)
        }
        img @ (DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_)) => {
            let rgb = img.into_rgb8();
            let lookup = labels.index_by_color();
            let (w, h) = (rgb.width() as usize, rgb.height() as usize);
            let mut data = Vec::with_capacity(w * h);
            for (x, y, px) in rgb.enumerate_pixels() {
                let index = lookup.get(&px.0).copied().ok_or_else(|| {
                    VistasError::malformed(
                        context(),
                        format!("colour {:?} at ({x}, {y}) is not a label colour", px.0),
                    )
                })?;
                data.push(index);
            }
            Raster::from_vec(w, h, data)
        }
        other => Err(VistasError::malformed(
            context(),
            format!("unsupported pixel layout {:?}", other.color()),
        )),
    }
}

/// Load an instance PNG. 8-bit files are widened without rescaling so the
/// `label * 256 + instance` packing survives.
pub fn load_instance_raster(path: &Path) -> Result<InstanceRaster> {
    match open_image(path)? {
        DynamicImage::ImageLuma16(img) => {
            let (w, h) = (img.width() as usize, img.height() as usize);
            Raster::from_vec(w, h, img.into_raw())
        }
        DynamicImage::ImageLuma8(img) => {
            let (w, h) = (img.width() as usize, img.height() as usize);
            Raster::from_vec(w, h, img.into_raw().into_iter().map(u16::from).collect())
        }
        other => Err(VistasError::malformed(
            format!("instance raster {}", path.display()),
            format!("expected 16-bit grayscale, got {:?}", other.color()),
        )),
    }
}

pub fn load_panoptic_raster(path: &Path) -> Result<PanopticRaster> {
    match open_image(path)? {
        DynamicImage::ImageLuma16(img) => {
            let (w, h) = (img.width() as usize, img.height() as usize);
            let mut data = Vec::with_capacity(w * h);
            for (x, y, px) in img.enumerate_pixels() {
                let index = u8::try_from(px.0[0]).map_err(|_| {
                    VistasError::malformed(
                        context(),
                        format!("label value {} at ({x}, {y}) does not fit 8 bits", px.0[0]),
                    )
                })?;
                data.push(index);
            }
            Raster::from_vec(w, h, data)
        }
        img @ (DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_)) => {
            Ok(color_raster_from_image(&img.into_rgb8()))
        }
        other => Err(VistasError::malformed(
            format!("panoptic raster {}", path.display()),
            format!("expected 8-bit RGB, got {:?}", other.color()),
        )),
    }
}

pub fn color_raster_from_image(img: &RgbImage) -> ColorRaster {
    Raster {
        w: img.width() as usize,
        h: img.height() as usize,
        data: img.pixels().map(|p| p.0).collect(),
    }
}

pub fn color_raster_to_image(raster: &ColorRaster) -> RgbImage {
    RgbImage::from_fn(raster.w as u32, raster.h as u32, |x, y| {
        image::Rgb(raster.get(x as usize, y as usize))
    })
}

pub fn save_color_raster(raster: &ColorRaster, path: &Path) -> Result<()> {
    save_rgb_image(&color_raster_to_image(raster), path)
}

pub fn save_rgb_image(img: &RgbImage, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    img.save(path)?;
    Ok(())
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| VistasError::malformed(format!("JSON for {}", path.display()), e))?;
    fs::write(path, json).map_err(|e| VistasError::write(path, e))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| VistasError::write(parent, e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Label;
    use image::{GrayImage, ImageBuffer, Luma, Rgb};

    fn two_labels() -> LabelConfig {
        let label = |name: &str, color| Label {
            name: name.into(),
            readable_name: name.into(),
            color,
            has_instances: false,
        };
        LabelConfig::new(vec![label("road", [128, 64, 128]), label("sky", [70, 130, 180])])
            .unwrap()
    }

    #[test]
    fn gray_label_png_keeps_indices() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.png");
        GrayImage::from_fn(3, 2, |x, y| Luma([(x + y) as u8]))
            .save(&path)
            .unwrap();

        let raster = load_label_raster(&path, &two_labels()).unwrap();
        assert_eq!(raster.to_rows(), vec![vec![0, 1, 2], vec![1, 2, 3]]);
    }

    #[test]
    fn rgb_label_png_maps_colours_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.png");
        RgbImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgb([70, 130, 180])
            } else {
                Rgb([128, 64, 128])
            }
        })
        .save(&path)
        .unwrap();

        let raster = load_label_raster(&path, &two_labels()).unwrap();
        assert_eq!(raster.data, vec![1, 0]);
    }

    #[test]
    fn rgb_label_png_with_unknown_colour_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.png");
        RgbImage::from_pixel(1, 1, Rgb([1, 2, 3])).save(&path).unwrap();

        let err = load_label_raster(&path, &two_labels()).unwrap_err();
        assert!(matches!(err, VistasError::MalformedData { .. }), "{err}");
    }

    #[test]
    fn sixteen_bit_label_png_keeps_small_indices() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.png");
        let img: ImageBuffer<Luma<u16>, Vec<u16>> =
            ImageBuffer::from_raw(3, 1, vec![0, 1, 255]).unwrap();
        img.save(&path).unwrap();

        let raster = load_label_raster(&path, &two_labels()).unwrap();
        assert_eq!(raster.data, vec![0, 1, 255]);
    }

    #[test]
    fn sixteen_bit_label_above_255_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.png");
        let img: ImageBuffer<Luma<u16>, Vec<u16>> =
            ImageBuffer::from_raw(2, 1, vec![1, 300]).unwrap();
        img.save(&path).unwrap();

        let err = load_label_raster(&path, &two_labels()).unwrap_err();
        assert!(matches!(err, VistasError::MalformedData { .. }), "{err}");
        assert!(err.to_string().contains("label value 300 at (1, 0)"), "{err}");
    }

    #[test]
    fn sixteen_bit_instances_are_not_rescaled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("instances.png");
        let img: ImageBuffer<Luma<u16>, Vec<u16>> =
            ImageBuffer::from_raw(2, 1, vec![19 * 256 + 3, 0]).unwrap();
        img.save(&path).unwrap();

        let raster = load_instance_raster(&path).unwrap();
        assert_eq!(raster.data, vec![19 * 256 + 3, 0]);
    }

    #[test]
    fn missing_image_is_missing_file() {
        let err = load_panoptic_raster(Path::new("/nonexistent/pan.png")).unwrap_err();
        assert!(matches!(err, VistasError::MissingFile { .. }), "{err}");
    }

    #[test]
    fn colour_raster_survives_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.png");
        let raster = Raster::from_rows(&[[[1u8, 2, 3], [4, 5, 6]]]).unwrap();
        save_color_raster(&raster, &path).unwrap();
        assert_eq!(load_panoptic_raster(&path).unwrap(), raster);
    }
}
