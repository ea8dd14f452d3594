use std::io::Write;

use anyhow::Result;
use depweight_core::config::AnalyzerConfig;

use crate::commands::util::standard_set_for;

/// List the packages treated as standard library, sorted.
pub fn std_list_command(config: &AnalyzerConfig, json: bool, out: &mut dyn Write) -> Result<()> {
    let standard = standard_set_for(&config.graph)?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&standard)?)?;
        return Ok(());
    }

    for node in standard.sorted() {
        writeln!(out, "{}", node.id)?;
    }
    Ok(())
}
