//! `ident inspect`: identify a fixture and print its help report.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use ident_core::Identifier;
use termcolor::{StandardStream, WriteColor};

use super::load_config;
use crate::fixture;
use crate::output::resolve_color_choice;
use crate::report::{HelpReport, ReportOptions};

/// Arguments of `ident inspect`
#[derive(Debug, Clone, Default)]
pub struct InspectArgs {
    /// Fixture file
    pub file: PathBuf,
    /// Explicit config file
    pub config: Option<PathBuf>,
    /// Leave out members common to every foreign base object
    pub hide_common: bool,
    /// Override the configured expansion depth
    pub max_depth: Option<usize>,
    /// `auto`, `always` or `never`
    pub color: Option<String>,
}

/// Run the command against stdout.
pub fn execute(args: InspectArgs) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let choice = resolve_color_choice(args.color.as_deref());
    let mut stdout = StandardStream::stdout(choice);
    run(&args, &cwd, &mut stdout)
}

/// Run the command, writing the report to `out`.
///
/// `search_dir` is where `ident.toml` is looked for when no config file is
/// given.
pub fn run<W: WriteColor>(args: &InspectArgs, search_dir: &Path, out: &mut W) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref(), search_dir)?;
    if let Some(depth) = args.max_depth {
        config.max_depth = depth;
    }

    let value = fixture::load(&args.file)
        .with_context(|| format!("Failed to load fixture {}", args.file.display()))?;

    let identifier = Identifier::new(&config);
    let record = identifier.identify(&value);
    tracing::debug!(name = %record.name, children = record.children.len(), "identified fixture");

    let options = ReportOptions {
        hide_common: args.hide_common,
    };
    HelpReport::new(&identifier, options).render(out, &value, &record)?;
    out.flush()?;
    Ok(())
}
