//! depweight CLI library.
//!
//! Command implementations live here (rather than in `main.rs`) so tests can
//! call them directly and capture their output.

pub mod commands;
pub mod logging;

pub use commands::util::load_config;
