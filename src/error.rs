//! Error kinds reported by the loaders, decoders and the segment cross-check.
//!
//! Three failure classes are kept apart so callers can tell them apart:
//! a file that cannot be opened, data that does not parse or has the wrong
//! shape, and a panoptic annotation whose segments disagree with its raster.
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum VistasError {
    /// A required input file could not be opened or read.
    #[error("missing file {}: {source}", .path.display())]
    MissingFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Input was readable but did not have the expected content.
    #[error("malformed {context}: {detail}")]
    MalformedData { context: String, detail: String },

    /// Encoding or writing an output image failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Writing an output file failed.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Panoptic raster and its segment metadata disagree.
    #[error("panoptic integrity check failed for image {image_id}: {summary}")]
    Integrity { image_id: String, summary: String },
}

pub type Result<T> = std::result::Result<T, VistasError>;

impl VistasError {
    pub fn missing(path: &Path, source: io::Error) -> Self {
        Self::MissingFile {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn malformed(context: impl Into<String>, detail: impl ToString) -> Self {
        Self::MalformedData {
            context: context.into(),
            detail: detail.to_string(),
        }
    }

    pub fn write(path: &Path, source: io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_input() {
        let err = VistasError::missing(
            Path::new("training/labels/a.png"),
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(
            err.to_string(),
            "missing file training/labels/a.png: not found"
        );

        let err = VistasError::malformed("label config config.json", "expected `labels`");
        assert_eq!(
            err.to_string(),
            "malformed label config config.json: expected `labels`"
        );
    }
}
