use std::env;
use std::path::Path;
use vistas_toolkit::config::{load_config, RuntimeConfig};
use vistas_toolkit::diagnostics::{format_label_listing, format_segment_listing};
use vistas_toolkit::{Demo, Result};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

/// `vistas_demo [runtime.json]`; without an argument every path takes its
/// default relative to the working directory.
fn run() -> Result<()> {
    let config = match env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => RuntimeConfig::default(),
    };

    let report = Demo::new(config).run()?;

    print!("{}", format_label_listing(&report.labels));
    println!();
    println!("Saved figure to {}", report.figure.display());
    println!();
    print!("{}", format_segment_listing(&report.segments));
    println!(
        "\nAll {} panoptic segments match their metadata",
        report.reconciliation.matched.len()
    );
    Ok(())
}
