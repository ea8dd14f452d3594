pub mod nm;
pub mod weight;

pub use nm::{NmError, NmTool, FAKE_NM_ENV, NM_BIN_ENV};
pub use weight::{aggregate, attribute_to_graph, PackageWeight, WeightReport};
