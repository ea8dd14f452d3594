use std::path::Path;

use super::{GraphResult, PackageNode};

/// Standard library package ids bundled with the Go toolchain, one per line.
pub const STANDARD_PACKAGES: &str = include_str!("../../data/std_packages.txt");

/// The standard library as a graph result, for use as the right-hand side of
/// [`super::subtract`]. Nodes carry no imports.
pub fn standard_set() -> GraphResult {
    parse_standard_list(STANDARD_PACKAGES)
}

/// Parse a newline-separated package list. Blank lines and lines starting
/// with `#` are ignored.
pub fn parse_standard_list(body: &str) -> GraphResult {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PackageNode::new)
        .collect()
}

/// Load a replacement standard list, e.g. from `go list std` of a specific
/// toolchain version.
pub fn load_standard_set(path: &Path) -> std::io::Result<GraphResult> {
    Ok(parse_standard_list(&std::fs::read_to_string(path)?))
}
