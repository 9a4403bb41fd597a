//! Cleans the stroke dataset of the project this binary was built from.
//!
//! Without `STROKE_PREPROCESS_CONFIG`, the project root is the crate directory
//! captured at compile time (`CARGO_MANIFEST_DIR`), so a copied binary still
//! reads and writes under the build tree it came from.

use std::env;
use std::path::Path;

use env_logger::{Builder, Env};
use log::{debug, info, LevelFilter};

use stroke_preprocess::config::CONFIG_ENV;
use stroke_preprocess::monitor::RunMonitor;
use stroke_preprocess::{run, PreprocessConfig, PreprocessError};

fn load_config() -> Result<PreprocessConfig, PreprocessError> {
    match env::var_os(CONFIG_ENV) {
        Some(path) => {
            info!("reading config from {:?}", path);
            PreprocessConfig::from_json_file(path)
        }
        None => Ok(PreprocessConfig::for_project(Path::new(env!("CARGO_MANIFEST_DIR")))),
    }
}

#[tokio::main]
async fn main() -> Result<(), PreprocessError> {
    let env = Env::new().filter("STROKE_LOG");
    Builder::new()
        .filter(Some("stroke_preprocess"), LevelFilter::Info)
        .parse_env(env)
        .init();

    let monitor = RunMonitor::start();
    let config = load_config()?;
    debug!("config {:#?}", config);

    println!("Loading data from: {}", config.input_path.display());

    run(&config).await?;

    match &config.output_path {
        Some(output) => println!("Preprocessing complete. Clean data saved to: {}", output.display()),
        None => println!("Preprocessing complete. No output path configured."),
    }

    info!("time elapsed: {:?}", monitor.elapsed());
    if let Some(delta) = monitor.memory_delta() {
        info!("memory used: {} bytes", delta);
    }

    Ok(())
}
