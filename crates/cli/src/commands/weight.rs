use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use depweight_core::config::AnalyzerConfig;
use depweight_core::services::{aggregate, attribute_to_graph, NmTool, WeightReport};
use depweight_core::util::sha256_file;
use tracing::info;

use crate::commands::util::{compute_from_manifest, filter_standard};

#[derive(Args, Debug, Clone)]
pub struct WeightArgs {
    /// Compiled binary to measure.
    pub binary: PathBuf,

    /// Emit JSON instead of human-readable text.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Only list the N largest packages (totals still cover every package).
    #[arg(long)]
    pub limit: Option<usize>,

    /// Restrict output to packages reachable from `--root` in this manifest.
    #[arg(long, requires = "roots")]
    pub manifest: Option<PathBuf>,

    /// Root package id for `--manifest` (repeatable).
    #[arg(long = "root", requires = "manifest")]
    pub roots: Vec<String>,

    /// Keep standard library packages when filtering by manifest.
    #[arg(long, default_value_t = false)]
    pub std: bool,

    /// Skip hashing the binary (no hash in the report).
    #[arg(long, default_value_t = false)]
    pub skip_hash: bool,
}

/// Print how many bytes of the binary each package accounts for.
pub fn weight_command(args: &WeightArgs, config: &AnalyzerConfig, out: &mut dyn Write) -> Result<()> {
    let tool = NmTool::from_config(&config.nm);
    let symbols = tool
        .symbols(&args.binary)
        .with_context(|| format!("Failed to read symbols from {}", args.binary.display()))?;

    let mut weights = aggregate(&symbols);
    if let Some(manifest) = &args.manifest {
        let graph = compute_from_manifest(manifest, &args.roots, false)?;
        let graph = filter_standard(graph, args.std, &config.graph)?;
        weights = attribute_to_graph(&weights, &graph);
    }
    info!(symbols = symbols.len(), packages = weights.len(), "aggregated package sizes");

    let hash = if args.skip_hash { None } else { Some(sha256_file(&args.binary)?) };
    let mut report = WeightReport::new(&args.binary, hash, weights);
    if let Some(limit) = args.limit.or(config.weight.limit) {
        report.packages.truncate(limit);
    }

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    writeln!(out, "Binary: {}", report.binary)?;
    if let Some(hash) = &report.binary_hash {
        writeln!(out, "SHA-256: {hash}")?;
    }
    writeln!(out, "Total size: {}", report.total_size)?;
    writeln!(out, "Packages:")?;
    if report.packages.is_empty() {
        writeln!(out, "(none)")?;
        return Ok(());
    }
    for weight in &report.packages {
        writeln!(out, "{:>12} {:>8}  {}", weight.size, weight.symbols, weight.display_name())?;
    }

    Ok(())
}
