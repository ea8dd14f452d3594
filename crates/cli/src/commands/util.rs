use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use depweight_core::config::{AnalyzerConfig, GraphConfig};
use depweight_core::graph::{compute, load_standard_set, standard_set, GraphResult, Manifest};
use tracing::debug;

/// Load the config named on the command line, else one discovered in the
/// current directory, else the defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<AnalyzerConfig> {
    if let Some(path) = explicit {
        return AnalyzerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    let cwd = env::current_dir().context("Failed to get current directory")?;
    match AnalyzerConfig::discover(&cwd).context("Failed to load config")? {
        Some((path, config)) => {
            debug!(path = %path.display(), "loaded config");
            Ok(config)
        }
        None => Ok(AnalyzerConfig::default()),
    }
}

/// The configured standard package list, or the bundled one.
pub fn standard_set_for(config: &GraphConfig) -> Result<GraphResult> {
    match &config.std_list {
        Some(path) => load_standard_set(path)
            .with_context(|| format!("Failed to read standard package list {}", path.display())),
        None => Ok(standard_set()),
    }
}

/// Compute the closure of `roots` over the packages listed in `manifest`.
///
/// Unless `strict` is set, imports missing from the manifest become leaf
/// packages.
pub fn compute_from_manifest(manifest: &Path, roots: &[String], strict: bool) -> Result<GraphResult> {
    let resolver = Manifest::load(manifest)
        .with_context(|| format!("Failed to load manifest {}", manifest.display()))?
        .into_resolver()
        .with_context(|| format!("Invalid manifest {}", manifest.display()))?
        .unknown_as_leaf(!strict);

    compute(roots, &resolver).context("Failed to compute dependency graph")
}

/// Apply the standard-library filter unless it is disabled.
pub fn filter_standard(result: GraphResult, keep_std: bool, config: &GraphConfig) -> Result<GraphResult> {
    if keep_std || config.include_std {
        return Ok(result);
    }
    let standard = standard_set_for(config)?;
    Ok(result.subtract(&standard))
}
