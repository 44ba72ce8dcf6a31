pub mod synthetic_dataset;
