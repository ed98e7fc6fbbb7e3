//! `ident config`: print the effective configuration as TOML.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::load_config;

/// Print the configuration `inspect` would use.
pub fn execute(config: Option<PathBuf>) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let stdout = std::io::stdout();
    run(config.as_deref(), &cwd, &mut stdout.lock())
}

/// Write the effective configuration to `out`.
pub fn run<W: Write>(config: Option<&Path>, search_dir: &Path, out: &mut W) -> anyhow::Result<()> {
    let config = load_config(config, search_dir)?;
    let text = config.to_toml_string()?;
    out.write_all(text.as_bytes())?;
    Ok(())
}
