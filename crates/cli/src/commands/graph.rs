use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use depweight_core::config::AnalyzerConfig;
use depweight_core::render::{render_dot, Label};
use tracing::info;

use crate::commands::util::{compute_from_manifest, filter_standard};

#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// Package manifest (JSON or YAML) listing every package and its imports.
    #[arg(long)]
    pub manifest: PathBuf,

    /// Root package ids.
    #[arg(required = true)]
    pub roots: Vec<String>,

    /// Print standard library packages too.
    #[arg(long, default_value_t = false)]
    pub std: bool,

    /// Node label template, e.g. "{{.ID}} ({{.ImportCount}})".
    #[arg(long)]
    pub format: Option<String>,

    /// Fail when an import is missing from the manifest instead of treating it as a leaf.
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}

/// Print the dependency graph of the roots as a dot digraph.
pub fn graph_command(args: &GraphArgs, config: &AnalyzerConfig, out: &mut dyn Write) -> Result<()> {
    let format = args.format.as_deref().unwrap_or(&config.graph.label_format);
    let label = Label::parse(format).context("Invalid format string")?;

    let result = compute_from_manifest(&args.manifest, &args.roots, args.strict)?;
    let result = filter_standard(result, args.std, &config.graph)?;
    info!(packages = result.len(), "rendering dependency graph");

    render_dot(&result, &label, out).context("Failed to write graph")?;
    Ok(())
}
