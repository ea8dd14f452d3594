use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::{GraphResult, PackageNode};
use crate::util::DocumentFormat;

/// Source of each package's direct imports.
///
/// The graph layer does not know where dependency data comes from (a build
/// tool query, a manifest file, a test fixture); it only asks for one
/// package's imports at a time.
pub trait ImportResolver {
    type Error;

    fn imports(&self, id: &str) -> Result<Vec<String>, Self::Error>;
}

impl<R: ImportResolver + ?Sized> ImportResolver for &R {
    type Error = R::Error;

    fn imports(&self, id: &str) -> Result<Vec<String>, Self::Error> {
        (**self).imports(id)
    }
}

/// Build the transitive closure of packages reachable from `roots`.
///
/// Each id is resolved at most once, so import cycles and self imports
/// terminate. The first resolver error aborts the computation and is
/// returned unchanged.
pub fn compute<I, S, R>(roots: I, resolver: &R) -> Result<GraphResult, R::Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    R: ImportResolver + ?Sized,
{
    let mut result = GraphResult::new();
    let mut pending: VecDeque<String> =
        roots.into_iter().map(|root| root.as_ref().to_string()).collect();
    let root_count = pending.len();

    while let Some(id) = pending.pop_front() {
        if result.contains(&id) {
            continue;
        }
        let imports = resolver.imports(&id)?;
        pending.extend(imports.iter().filter(|dep| !result.contains(dep)).cloned());
        result.insert(PackageNode { id, imports });
    }

    debug!(roots = root_count, packages = result.len(), "computed dependency closure");
    Ok(result)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("unknown package: {0}")]
    UnknownPackage(String),
}

/// In-memory resolver over a fixed id -> imports table.
///
/// Unknown ids are an error unless [`MapResolver::unknown_as_leaf`] is set,
/// in which case they resolve to a package without imports.
#[derive(Debug, Clone, Default)]
pub struct MapResolver {
    packages: HashMap<String, Vec<String>>,
    unknown_as_leaf: bool,
}

impl MapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<I, S>(&mut self, id: impl Into<String>, imports: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.packages.insert(id.into(), imports.into_iter().map(Into::into).collect());
        self
    }

    pub fn unknown_as_leaf(mut self, enabled: bool) -> Self {
        self.unknown_as_leaf = enabled;
        self
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl ImportResolver for MapResolver {
    type Error = ResolveError;

    fn imports(&self, id: &str) -> Result<Vec<String>, ResolveError> {
        match self.packages.get(id) {
            Some(imports) => Ok(imports.clone()),
            None if self.unknown_as_leaf => {
                debug!(package = id, "package not in manifest; treating as leaf");
                Ok(Vec::new())
            }
            None => Err(ResolveError::UnknownPackage(id.to_string())),
        }
    }
}

/// Package list on disk, JSON or YAML:
///
/// ```yaml
/// packages:
///   - id: example.com/app
///     imports: [example.com/app/internal/db, fmt]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub packages: Vec<PackageNode>,
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse manifest JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse manifest YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("package {0} is listed more than once")]
    DuplicatePackage(String),
}

impl Manifest {
    /// Load a manifest, choosing the format from the extension (JSON when the
    /// extension is not a YAML one).
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let body = std::fs::read_to_string(path)
            .map_err(|source| ManifestError::Io { path: path.to_path_buf(), source })?;
        match DocumentFormat::from_path(path).unwrap_or(DocumentFormat::Json) {
            DocumentFormat::Json => Self::from_json_str(&body),
            DocumentFormat::Yaml => Self::from_yaml_str(&body),
        }
    }

    pub fn from_json_str(body: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn from_yaml_str(body: &str) -> Result<Self, ManifestError> {
        Ok(serde_yaml::from_str(body)?)
    }

    /// Build a resolver, rejecting duplicate ids.
    pub fn into_resolver(self) -> Result<MapResolver, ManifestError> {
        let mut resolver = MapResolver::new();
        for node in self.packages {
            if resolver.packages.contains_key(&node.id) {
                return Err(ManifestError::DuplicatePackage(node.id));
            }
            resolver.packages.insert(node.id, node.imports);
        }
        Ok(resolver)
    }
}
