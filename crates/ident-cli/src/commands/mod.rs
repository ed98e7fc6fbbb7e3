//! Subcommand implementations

pub mod config;
pub mod inspect;

use std::path::Path;

use anyhow::Context;
use ident_core::IdentConfig;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "ident.toml";

/// Load the effective configuration.
///
/// An explicit path must exist. Otherwise `ident.toml` in `search_dir` is
/// used if present, and the built-in defaults if not.
pub fn load_config(explicit: Option<&Path>, search_dir: &Path) -> anyhow::Result<IdentConfig> {
    if let Some(path) = explicit {
        return IdentConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    let discovered = search_dir.join(DEFAULT_CONFIG_FILE);
    if discovered.is_file() {
        return IdentConfig::load(&discovered)
            .with_context(|| format!("Failed to load config from {}", discovered.display()));
    }

    tracing::debug!("no config file, using defaults");
    Ok(IdentConfig::default())
}
