//! Rollbook CLI - batch photographed pages into PDFs
//!
//! Takes no arguments. Settings come from `rollbook.json` in the working
//! directory when present, otherwise from the built-in defaults. Set
//! `RUST_LOG` to change log verbosity (default `info`).

use std::path::Path;

use anyhow::{Context, Result};
use rollbook_core::{run, RunConfig};

/// Settings file looked up in the working directory.
const CONFIG_FILE: &str = "rollbook.json";

/// Load settings from `path`, falling back to defaults if it does not exist.
fn load_config(path: &Path) -> Result<RunConfig> {
    if !path.exists() {
        log::debug!("{} not found, using defaults", path.display());
        return Ok(RunConfig::default());
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("invalid settings in {}", path.display()))?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config(Path::new(CONFIG_FILE))?;
    log::debug!("{:?}", config);

    let summary = run(&config).context("run aborted")?;

    if !summary.flagged.is_empty() {
        log::warn!("{} page(s) need a manual orientation check:", summary.flagged.len());
        for path in &summary.flagged {
            log::warn!("  {}", path.display());
        }
    }
    log::info!("Wrote {} PDF file(s)", summary.outputs.len());
    Ok(())
}
