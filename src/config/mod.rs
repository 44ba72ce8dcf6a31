pub mod labels;
pub mod runtime;

pub use self::labels::{load_label_config, parse_label_config, Label, LabelConfig, MAX_LABELS};
pub use self::runtime::{load_config, FigureConfig, RuntimeConfig, SamplePaths, MAX_CANVAS_SIDE};
