//! Per-package size totals computed from a parsed symbol table.

use std::collections::HashMap;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::graph::GraphResult;
use crate::symbols::Symbol;

/// Display name for symbols without a package qualifier.
pub const UNATTRIBUTED: &str = "(unattributed)";

/// Total size charged to one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageWeight {
    /// Package import path; empty for unqualified symbols.
    pub package: String,
    pub size: i64,
    pub symbols: usize,
}

impl PackageWeight {
    pub fn display_name(&self) -> &str {
        if self.package.is_empty() {
            UNATTRIBUTED
        } else {
            &self.package
        }
    }
}

/// Sum symbol sizes by package path, largest first (ties by package name).
///
/// Sums saturate at `i64::MAX`.
pub fn aggregate(symbols: &[Symbol]) -> Vec<PackageWeight> {
    let mut totals: HashMap<String, (i64, usize)> = HashMap::new();
    for symbol in symbols {
        let entry = totals.entry(symbol.package()).or_default();
        entry.0 = entry.0.saturating_add(symbol.size);
        entry.1 += 1;
    }

    let mut weights: Vec<PackageWeight> = totals
        .into_iter()
        .map(|(package, (size, symbols))| PackageWeight { package, size, symbols })
        .collect();
    weights.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.package.cmp(&b.package)));
    weights
}

/// Keep only weights of packages present in `graph`, preserving order.
pub fn attribute_to_graph(weights: &[PackageWeight], graph: &GraphResult) -> Vec<PackageWeight> {
    weights.iter().filter(|w| graph.contains(&w.package)).cloned().collect()
}

pub fn total_size(weights: &[PackageWeight]) -> i64 {
    weights.iter().fold(0i64, |total, w| total.saturating_add(w.size))
}

/// Serializable summary of one `weight` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightReport {
    pub binary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary_hash: Option<String>,
    pub generated_at: String,
    /// depweight version that produced the report.
    #[serde(default)]
    pub tool_version: String,
    pub total_size: i64,
    pub packages: Vec<PackageWeight>,
}

impl WeightReport {
    pub fn new(binary: &Path, binary_hash: Option<String>, packages: Vec<PackageWeight>) -> Self {
        Self {
            binary: binary.display().to_string(),
            binary_hash,
            generated_at: Utc::now().to_rfc3339(),
            tool_version: crate::version().to_string(),
            total_size: total_size(&packages),
            packages,
        }
    }
}
