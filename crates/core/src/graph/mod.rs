//! Package dependency graph.
//!
//! A [`GraphResult`] is one computed dependency universe: a map from package
//! id to [`PackageNode`]. Imports are stored by id, so a node may refer to a
//! package that is not part of the snapshot (for example after
//! [`subtract`]). Such dangling imports are expected and are skipped by
//! [`GraphResult::edges`].
//!
//! Every operation returns a fresh result; none mutates its inputs.

mod compute;
mod standard;

pub use compute::{compute, ImportResolver, Manifest, ManifestError, MapResolver, ResolveError};
pub use standard::{load_standard_set, parse_standard_list, standard_set, STANDARD_PACKAGES};

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// One package and the ids it imports, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageNode {
    pub id: String,
    #[serde(default)]
    pub imports: Vec<String>,
}

impl PackageNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), imports: Vec::new() }
    }

    pub fn with_imports<I, S>(id: impl Into<String>, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { id: id.into(), imports: imports.into_iter().map(Into::into).collect() }
    }
}

/// Snapshot of packages keyed by id.
///
/// Storage is unordered; [`GraphResult::sorted`] provides the presentation
/// order. Serializes as the sorted list of nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<PackageNode>", from = "Vec<PackageNode>")]
pub struct GraphResult {
    nodes: HashMap<String, PackageNode>,
}

impl GraphResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, replacing any node with the same id.
    pub fn insert(&mut self, node: PackageNode) -> Option<PackageNode> {
        self.nodes.insert(node.id.clone(), node)
    }

    pub fn get(&self, id: &str) -> Option<&PackageNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in storage order, which is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = &PackageNode> {
        self.nodes.values()
    }

    /// Nodes ordered by id, strictly increasing.
    pub fn sorted(&self) -> Vec<&PackageNode> {
        let mut nodes: Vec<&PackageNode> = self.nodes.values().collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        nodes
    }

    /// Every node of `self` whose id is absent from `other`.
    pub fn subtract(&self, other: &GraphResult) -> GraphResult {
        self.nodes
            .values()
            .filter(|node| !other.contains(&node.id))
            .cloned()
            .collect()
    }

    /// Every node of either result. Nodes present in both get the imports of
    /// `self` followed by those of `other` not already listed.
    pub fn union(&self, other: &GraphResult) -> GraphResult {
        let mut merged = self.clone();
        for node in other.nodes.values() {
            match merged.nodes.get_mut(&node.id) {
                Some(existing) => {
                    let mut seen: HashSet<String> = existing.imports.iter().cloned().collect();
                    for import in &node.imports {
                        if seen.insert(import.clone()) {
                            existing.imports.push(import.clone());
                        }
                    }
                }
                None => {
                    merged.insert(node.clone());
                }
            }
        }
        merged
    }

    /// `(src, dst)` pairs where both ends are in the result, following the
    /// sorted node order and each node's import order.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        let mut edges = Vec::new();
        for src in self.sorted() {
            for dst in &src.imports {
                if self.contains(dst) {
                    edges.push((src.id.as_str(), dst.as_str()));
                }
            }
        }
        edges
    }
}

/// Nodes of `a` whose id is absent from `b`.
pub fn subtract(a: &GraphResult, b: &GraphResult) -> GraphResult {
    a.subtract(b)
}

impl FromIterator<PackageNode> for GraphResult {
    fn from_iter<I: IntoIterator<Item = PackageNode>>(iter: I) -> Self {
        let mut result = GraphResult::new();
        for node in iter {
            result.insert(node);
        }
        result
    }
}

impl From<Vec<PackageNode>> for GraphResult {
    fn from(nodes: Vec<PackageNode>) -> Self {
        nodes.into_iter().collect()
    }
}

impl From<GraphResult> for Vec<PackageNode> {
    fn from(result: GraphResult) -> Self {
        let mut nodes: Vec<PackageNode> = result.nodes.into_values().collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        nodes
    }
}
