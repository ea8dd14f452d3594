use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use depweight::commands::{
    graph_command, std_list_command, symbols_command, weight_command, GraphArgs, SymbolsArgs,
    WeightArgs,
};
use depweight::load_config;
use depweight::logging::{init_tracing, LogLevel};

/// Package size attribution and dependency graphs for compiled Go binaries.
///
/// This CLI is a thin wrapper around `depweight-core`; all substantive logic
/// lives in the library.
#[derive(Parser, Debug)]
#[command(name = "depweight", version = depweight_core::version(), about = "Package size and dependency analysis", long_about = None)]
struct Cli {
    /// Config file (JSON or YAML). Defaults to depweight.{json,yaml,yml} in the current directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log verbosity on stderr; RUST_LOG overrides it.
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the package dependency graph of the given roots in dot notation.
    Graph(GraphArgs),

    /// Report per-package binary size from the binary's symbol table.
    Weight(WeightArgs),

    /// List the symbols of a binary with their owning package.
    Symbols(SymbolsArgs),

    /// List the packages treated as standard library.
    StdList {
        /// Emit JSON instead of one id per line.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level);

    let config = load_config(cli.config.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Graph(args) => graph_command(args, &config, &mut out)?,
        Command::Weight(args) => weight_command(args, &config, &mut out)?,
        Command::Symbols(args) => symbols_command(args, &config, &mut out)?,
        Command::StdList { json } => std_list_command(&config, *json, &mut out)?,
    }

    Ok(())
}
