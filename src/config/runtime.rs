use crate::error::{Result, VistasError};
use crate::visualize::{FIGURE_COLS, FIGURE_ROWS, TITLE_BAND};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Sample shown when no runtime config is given.
pub const DEFAULT_IMAGE_ID: &str = "M2kh294N9c72sICO990Uew";

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Directory holding `config.json` and the split folders.
    pub dataset_root: PathBuf,
    /// Label taxonomy, relative to `dataset_root` unless absolute.
    pub config_path: PathBuf,
    /// Split folder, e.g. `training` or `validation`.
    pub split: String,
    pub image_id: String,
    /// Panoptic annotation file name inside `<split>/panoptic/`.
    pub panoptic_json: String,
    /// Composed figure; a `.layout.json` sidecar is written next to it.
    pub output: PathBuf,
    pub report_json: Option<PathBuf>,
    pub figure: FigureConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            dataset_root: PathBuf::from("."),
            config_path: PathBuf::from("config.json"),
            split: "training".to_string(),
            image_id: DEFAULT_IMAGE_ID.to_string(),
            panoptic_json: "panoptic_2018.json".to_string(),
            output: PathBuf::from("MVD_plot.png"),
            report_json: None,
            figure: FigureConfig::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub cell_width: u32,
    pub cell_height: u32,
    /// Blank border around every cell, in pixels.
    pub margin: u32,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            cell_width: 800,
            cell_height: 600,
            margin: 24,
        }
    }
}

/// Largest canvas side accepted for the composed figure.
pub const MAX_CANVAS_SIDE: u32 = 1 << 15;

impl FigureConfig {
    /// Check the cell sizes against the fixed demo grid.
    pub fn validate(&self) -> Result<()> {
        self.canvas_size(FIGURE_ROWS, FIGURE_COLS).map(|_| ())
    }

    /// Canvas `(width, height)` for a `rows × cols` grid.
    ///
    /// Cells must be nonempty and each side at most [`MAX_CANVAS_SIDE`].
    pub fn canvas_size(&self, rows: u32, cols: u32) -> Result<(u32, u32)> {
        if self.cell_width == 0 || self.cell_height == 0 {
            return Err(VistasError::malformed(
                "figure config",
                format!(
                    "cell size {}x{} must be nonzero",
                    self.cell_width, self.cell_height
                ),
            ));
        }
        // side = n * cell + (n + 1) * margin
        let side = |n: u32, cell: u32| {
            n.checked_mul(cell)?
                .checked_add(n.checked_add(1)?.checked_mul(self.margin)?)
                .filter(|&v| v <= MAX_CANVAS_SIDE)
        };
        let width = side(cols, self.cell_width);
        let height = self
            .cell_height
            .checked_add(TITLE_BAND)
            .and_then(|row| side(rows, row));
        match (width, height) {
            (Some(w), Some(h)) => Ok((w, h)),
            _ => Err(VistasError::malformed(
                "figure config",
                format!(
                    "{rows}x{cols} grid of {}x{} cells with margin {} exceeds {MAX_CANVAS_SIDE} px",
                    self.cell_width, self.cell_height, self.margin
                ),
            )),
        }
    }
}

/// Resolved locations of every input file for one sample.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SamplePaths {
    pub label_config: PathBuf,
    pub base_image: PathBuf,
    pub labels: PathBuf,
    pub instances: PathBuf,
    pub panoptic: PathBuf,
    pub panoptic_json: PathBuf,
}

impl RuntimeConfig {
    pub fn sample_paths(&self) -> SamplePaths {
        let split = self.dataset_root.join(&self.split);
        let id = &self.image_id;
        SamplePaths {
            label_config: self.dataset_root.join(&self.config_path),
            base_image: split.join("images").join(format!("{id}.jpg")),
            labels: split.join("labels").join(format!("{id}.png")),
            instances: split.join("instances").join(format!("{id}.png")),
            panoptic: split.join("panoptic").join(format!("{id}.png")),
            panoptic_json: split.join("panoptic").join(&self.panoptic_json),
        }
    }
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig> {
    let contents = fs::read_to_string(path).map_err(|e| VistasError::missing(path, e))?;
    let config: RuntimeConfig = serde_json::from_str(&contents)
        .map_err(|e| VistasError::malformed(format!("runtime config {}", path.display()), e))?;
    config.figure.validate()?;
    Ok(config)
}
