//! Paint label-indexed rasters with the taxonomy's display colours.
use crate::config::LabelConfig;
use crate::error::{Result, VistasError};
use crate::image::{ColorRaster, LabelRaster, Raster};

/// Map every pixel holding label index `i` to `labels[i].color`.
///
/// An index outside the taxonomy fails fast and names the first offending
/// pixel.
pub fn apply_color_map(raster: &LabelRaster, labels: &LabelConfig) -> Result<ColorRaster> {
    let palette: Vec<[u8; 3]> = labels.labels.iter().map(|l| l.color).collect();
    let mut data = Vec::with_capacity(raster.data.len());
    for (i, &index) in raster.data.iter().enumerate() {
        let color = palette.get(usize::from(index)).copied().ok_or_else(|| {
            VistasError::malformed(
                "label raster",
                format!(
                    "label index {index} at ({}, {}) outside taxonomy of {} labels",
                    i % raster.w.max(1),
                    i / raster.w.max(1),
                    palette.len()
                ),
            )
        })?;
        data.push(color);
    }
    Ok(Raster {
        w: raster.w,
        h: raster.h,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Label;

    fn labels(colors: &[[u8; 3]]) -> LabelConfig {
        let labels = colors
            .iter()
            .enumerate()
            .map(|(i, &color)| Label {
                name: format!("label-{i}"),
                readable_name: format!("Label {i}"),
                color,
                has_instances: false,
            })
            .collect();
        LabelConfig::new(labels).unwrap()
    }

    #[test]
    fn checker_two_by_two() {
        let raster = Raster::from_rows(&[[0u8, 1], [1, 0]]).unwrap();
        let colored = apply_color_map(&raster, &labels(&[[255, 0, 0], [0, 255, 0]])).unwrap();
        assert_eq!(
            colored.to_rows(),
            vec![
                vec![[255, 0, 0], [0, 255, 0]],
                vec![[0, 255, 0], [255, 0, 0]],
            ]
        );
    }

    #[test]
    fn every_pixel_takes_its_label_colour() {
        let taxonomy = labels(&[[10, 20, 30], [40, 50, 60], [70, 80, 90]]);
        let raster = Raster::from_vec(5, 3, (0..15u8).map(|v| v % 3).collect()).unwrap();
        let colored = apply_color_map(&raster, &taxonomy).unwrap();
        for y in 0..raster.h {
            for x in 0..raster.w {
                let index = usize::from(raster.get(x, y));
                assert_eq!(colored.get(x, y), taxonomy.labels[index].color);
            }
        }
    }

    #[test]
    fn index_outside_taxonomy_fails() {
        let raster = Raster::from_rows(&[[0u8, 0], [0, 7]]).unwrap();
        let err = apply_color_map(&raster, &labels(&[[1, 1, 1]])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("label index 7 at (1, 1)"), "{msg}");
    }

    #[test]
    fn empty_raster_maps_to_empty() {
        let raster: LabelRaster = Raster::new(0, 0);
        let colored = apply_color_map(&raster, &labels(&[])).unwrap();
        assert!(colored.data.is_empty());
    }
}
