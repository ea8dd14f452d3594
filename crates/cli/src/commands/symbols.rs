use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use depweight_core::config::AnalyzerConfig;
use depweight_core::services::NmTool;

#[derive(Args, Debug, Clone)]
pub struct SymbolsArgs {
    /// Compiled binary to inspect.
    pub binary: PathBuf,

    /// Only show symbols of this package.
    #[arg(long)]
    pub package: Option<String>,

    /// Emit JSON instead of human-readable text.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// List attributed symbols in symbol-table order.
pub fn symbols_command(args: &SymbolsArgs, config: &AnalyzerConfig, out: &mut dyn Write) -> Result<()> {
    let symbols = NmTool::from_config(&config.nm)
        .symbols(&args.binary)
        .with_context(|| format!("Failed to read symbols from {}", args.binary.display()))?;

    let selected: Vec<_> = symbols
        .iter()
        .filter(|s| args.package.as_deref().map_or(true, |p| s.package() == p))
        .collect();

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&selected)?)?;
        return Ok(());
    }

    for symbol in selected {
        writeln!(
            out,
            "{:016x} {:>10} {} {} {}",
            symbol.address,
            symbol.size,
            symbol.code,
            symbol.package(),
            symbol.name
        )?;
    }
    Ok(())
}
