/*
    transit-separator
    Oct - 16 - 2026
 */

use std::path::PathBuf;

use transit_separator::config::{Config, DEFAULT_CONFIG_FILE};
use transit_separator::pipeline;
use transit_separator::plotting::{NoopRenderer, SvgRenderer};
use transit_separator::SeparatorError;

fn main() -> Result<(), SeparatorError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    log::info!("using configuration {}", config_path.display());
    let config = Config::from_file(&config_path)?;

    let summary = if config.plot.enabled {
        let stem = config
            .input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("light_curve");
        let mut renderer = SvgRenderer::new(
            &config.output_dir.join(&config.plot.directory),
            stem,
            config.plot.pause,
        )?;
        pipeline::run(&config, &mut renderer)?
    } else {
        pipeline::run(&config, &mut NoopRenderer)?
    };

    log::info!(
        "done: {} written, {} skipped",
        summary.persisted(),
        summary.skipped()
    );
    Ok(())
}

