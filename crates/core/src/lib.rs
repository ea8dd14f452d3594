//! depweight-core
//!
//! Core library for attributing a compiled Go binary's size to the packages
//! that produced it, and for computing and filtering package dependency
//! graphs.
//!
//! All substantive logic lives here so it is fully testable and reusable from
//! multiple frontends; the `depweight` CLI is a thin wrapper.

pub mod config;
pub mod graph;
pub mod render;
pub mod services;
pub mod symbols;
pub mod util;

/// Returns the library version as encoded at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
