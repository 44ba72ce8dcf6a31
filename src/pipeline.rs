//! The demo flow for one dataset sample:
//! load → decode → visualize → verify panoptic metadata.
//!
//! Every failure propagates; a panoptic integrity mismatch is fatal.
use crate::colormap::apply_color_map;
use crate::config::{load_label_config, LabelConfig, RuntimeConfig};
use crate::diagnostics::{elapsed_ms, DemoReport, InputDescriptor, LabelListing, TimingBreakdown};
use crate::error::{Result, VistasError};
use crate::image::io::{
    load_instance_raster, load_label_raster, load_panoptic_raster, load_rgb_image,
    write_json_file,
};
use crate::image::{LabelRaster, RasterView};
use crate::instance::split_instances;
use crate::panoptic::{load_panoptic_metadata, verify_image};
use crate::visualize::{compose_figure, DemoPanels, FIGURE_COLS, FIGURE_ROWS};
use log::{debug, info, warn};
use std::time::Instant;

pub struct Demo {
    config: RuntimeConfig,
}

impl Demo {
    pub fn new(config: RuntimeConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<DemoReport> {
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();
        let paths = self.config.sample_paths();
        let image_id = self.config.image_id.as_str();
        debug!("Demo::run start image_id={image_id} paths={paths:?}");

        let labels: LabelConfig =
            timings.time("load_label_config", || load_label_config(&paths.label_config))?;

        let (base_image, label_raster, instance_raster, panoptic_raster) =
            timings.time("load_rasters", || -> Result<_> {
                Ok((
                    load_rgb_image(&paths.base_image)?,
                    load_label_raster(&paths.labels, &labels)?,
                    load_instance_raster(&paths.instances)?,
                    load_panoptic_raster(&paths.panoptic)?,
                ))
            })?;

        for (name, w, h) in [
            ("instance", instance_raster.width(), instance_raster.height()),
            ("panoptic", panoptic_raster.width(), panoptic_raster.height()),
        ] {
            if (w, h) != (label_raster.w, label_raster.h) {
                return Err(VistasError::malformed(
                    format!("{name} raster for {image_id}"),
                    format!(
                        "{w}x{h} does not match label raster {}x{}",
                        label_raster.w, label_raster.h
                    ),
                ));
            }
        }
        if (base_image.width() as usize, base_image.height() as usize)
            != (label_raster.w, label_raster.h)
        {
            warn!(
                "base image {}x{} differs from label raster {}x{}",
                base_image.width(),
                base_image.height(),
                label_raster.w,
                label_raster.h
            );
        }

        let (instance_labels, instance_ids) =
            timings.time("split_instances", || split_instances(&instance_raster));
        let label_channel_mismatches = count_mismatches(&label_raster, &instance_labels);
        if label_channel_mismatches > 0 {
            warn!(
                "{label_channel_mismatches} pixels differ between label file and instance labels"
            );
        }

        let (colored_labels, colored_instance_labels) =
            timings.time("apply_color_map", || -> Result<_> {
                Ok((
                    apply_color_map(&label_raster, &labels)?,
                    apply_color_map(&instance_labels, &labels)?,
                ))
            })?;

        let panels = DemoPanels {
            base_image,
            labels: colored_labels,
            instance_ids,
            instance_labels: colored_instance_labels,
            panoptic: panoptic_raster.clone(),
        };
        timings.time("compose_figure", || -> Result<()> {
            let figure = compose_figure(
                &panels.into_panels(),
                FIGURE_ROWS,
                FIGURE_COLS,
                &self.config.figure,
            )?;
            figure.save(&self.config.output)
        })?;

        let metadata = timings.time("load_panoptic_metadata", || {
            load_panoptic_metadata(&paths.panoptic_json)
        })?;
        let index = metadata.index();
        debug!(
            "indexed {} images and {} categories",
            index.image_count(),
            index.category_count()
        );
        let (reconciliation, segments) = timings.time("verify_panoptic", || {
            verify_image(&panoptic_raster, &index, image_id)
        })?;

        timings.total_ms = elapsed_ms(total_start);
        let report = DemoReport {
            input: InputDescriptor {
                image_id: image_id.to_string(),
                width: label_raster.w,
                height: label_raster.h,
            },
            labels: LabelListing::from_config(&labels),
            label_channel_mismatches,
            segments,
            reconciliation,
            figure: self.config.output.clone(),
            timings,
        };

        if let Some(path) = &self.config.report_json {
            write_json_file(path, &report)?;
            info!("report written to {}", path.display());
        }
        info!(
            "Demo::run done image_id={image_id} segments={} total_ms={:.3}",
            report.segments.len(),
            report.timings.total_ms
        );
        Ok(report)
    }
}

fn count_mismatches(a: &LabelRaster, b: &LabelRaster) -> usize {
    a.data.iter().zip(&b.data).filter(|(x, y)| x != y).count()
}
