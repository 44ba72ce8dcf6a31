//! Compose the side-by-side comparison figure.
//!
//! Panels are fitted into equal cells of a fixed grid on a white canvas, each
//! cell topped by a band holding its title in a 5×7 bitmap font. The layout
//! (titles and pixel rectangles) is also written as JSON next to the PNG.
pub mod font;

use crate::config::FigureConfig;
use crate::error::{Result, VistasError};
use crate::image::io::{color_raster_to_image, save_rgb_image, write_json_file};
use crate::image::{ColorRaster, InstanceIdRaster};
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const FIGURE_ROWS: u32 = 3;
pub const FIGURE_COLS: u32 = 2;

/// Height of the title band above every cell.
pub const TITLE_BAND: u32 = font::CHAR_H + 5;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const TITLE_INK: Rgb<u8> = Rgb([40, 40, 40]);

#[derive(Clone, Debug)]
pub struct Panel {
    pub title: String,
    /// `None` leaves the cell blank.
    pub image: Option<RgbImage>,
    /// Label rasters are scaled with nearest-neighbour so colours stay exact.
    pub smooth: bool,
}

impl Panel {
    pub fn photo(title: impl Into<String>, image: RgbImage) -> Self {
        Self {
            title: title.into(),
            image: Some(image),
            smooth: true,
        }
    }

    pub fn raster(title: impl Into<String>, image: RgbImage) -> Self {
        Self {
            title: title.into(),
            image: Some(image),
            smooth: false,
        }
    }

    pub fn blank() -> Self {
        Self {
            title: String::new(),
            image: None,
            smooth: false,
        }
    }
}

/// Every panel of the demo figure, in reading order.
#[derive(Clone, Debug)]
pub struct DemoPanels {
    pub base_image: RgbImage,
    pub labels: ColorRaster,
    pub instance_ids: InstanceIdRaster,
    pub instance_labels: ColorRaster,
    pub panoptic: ColorRaster,
}

impl DemoPanels {
    pub fn into_panels(self) -> Vec<Panel> {
        vec![
            Panel::photo("Base image", self.base_image),
            Panel::raster("Labels", color_raster_to_image(&self.labels)),
            Panel::raster("Instance IDs", instance_id_image(&self.instance_ids)),
            Panel::raster(
                "Labels from instance file (identical to labels above)",
                color_raster_to_image(&self.instance_labels),
            ),
            Panel::raster("Labels from panoptic", color_raster_to_image(&self.panoptic)),
            Panel::blank(),
        ]
    }
}

/// Instance ids as grayscale stretched so the largest id is white.
pub fn instance_id_image(ids: &InstanceIdRaster) -> RgbImage {
    let max = ids.data.iter().copied().max().unwrap_or(0).max(1);
    RgbImage::from_fn(ids.w as u32, ids.h as u32, |x, y| {
        let v = u32::from(ids.get(x as usize, y as usize)) * 255 / u32::from(max);
        Rgb([v as u8; 3])
    })
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelPlacement {
    pub title: String,
    pub row: u32,
    pub col: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub blank: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigureLayout {
    pub width: u32,
    pub height: u32,
    pub rows: u32,
    pub cols: u32,
    pub panels: Vec<PanelPlacement>,
}

#[derive(Clone, Debug)]
pub struct Figure {
    pub canvas: RgbImage,
    pub layout: FigureLayout,
}

impl Figure {
    /// Write the PNG and its `.layout.json` sidecar.
    pub fn save(&self, path: &Path) -> Result<()> {
        save_rgb_image(&self.canvas, path)?;
        write_json_file(&layout_path(path), &self.layout)?;
        log::info!(
            "saved {}x{} figure to {}",
            self.layout.width,
            self.layout.height,
            path.display()
        );
        Ok(())
    }
}

pub fn layout_path(figure: &Path) -> PathBuf {
    let mut name = figure.file_stem().unwrap_or_default().to_os_string();
    name.push(".layout.json");
    figure.with_file_name(name)
}

/// Largest size with the source aspect ratio that fits in the cell.
fn fit_size(w: u32, h: u32, cell_w: u32, cell_h: u32) -> (u32, u32) {
    if w == 0 || h == 0 {
        return (0, 0);
    }
    let scale = f64::min(f64::from(cell_w) / f64::from(w), f64::from(cell_h) / f64::from(h));
    let fw = ((f64::from(w) * scale).round() as u32).clamp(1, cell_w.max(1));
    let fh = ((f64::from(h) * scale).round() as u32).clamp(1, cell_h.max(1));
    (fw, fh)
}

pub fn compose_figure(
    panels: &[Panel],
    rows: u32,
    cols: u32,
    cfg: &FigureConfig,
) -> Result<Figure> {
    let (width, height) = cfg.canvas_size(rows, cols)?;
    let capacity = rows.checked_mul(cols).unwrap_or(u32::MAX) as usize;
    if panels.len() > capacity {
        return Err(VistasError::malformed(
            "figure",
            format!("{} panels do not fit a {rows}x{cols} grid", panels.len()),
        ));
    }
    let FigureConfig {
        cell_width,
        cell_height,
        margin,
    } = *cfg;
    let mut canvas = RgbImage::from_pixel(width, height, BACKGROUND);
    let mut placements = Vec::with_capacity(panels.len());

    for (i, panel) in panels.iter().enumerate() {
        let (row, col) = (i as u32 / cols, i as u32 % cols);
        let cell_x = margin + col * (cell_width + margin);
        let title_y = margin + row * (TITLE_BAND + cell_height + margin);
        let cell_y = title_y + TITLE_BAND;
        font::draw_text(
            &mut canvas,
            cell_x,
            title_y + (TITLE_BAND - font::CHAR_H) / 2,
            &panel.title,
            cell_width,
            TITLE_INK,
        );

        let Some(image) = &panel.image else {
            placements.push(PanelPlacement {
                title: panel.title.clone(),
                row,
                col,
                x: cell_x,
                y: cell_y,
                width: 0,
                height: 0,
                blank: true,
            });
            continue;
        };

        let (fw, fh) = fit_size(image.width(), image.height(), cell_width, cell_height);
        let x = cell_x + cell_width.saturating_sub(fw) / 2;
        let y = cell_y + cell_height.saturating_sub(fh) / 2;
        if fw > 0 && fh > 0 {
            let filter = if panel.smooth {
                FilterType::Triangle
            } else {
                FilterType::Nearest
            };
            let scaled = imageops::resize(image, fw, fh, filter);
            imageops::replace(&mut canvas, &scaled, i64::from(x), i64::from(y));
        }
        log::debug!("panel {i} '{}' at ({x}, {y}) size {fw}x{fh}", panel.title);
        placements.push(PanelPlacement {
            title: panel.title.clone(),
            row,
            col,
            x,
            y,
            width: fw,
            height: fh,
            blank: false,
        });
    }

    Ok(Figure {
        canvas,
        layout: FigureLayout {
            width,
            height,
            rows,
            cols,
            panels: placements,
        },
    })
}
