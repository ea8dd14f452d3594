pub mod graph;
pub mod std_list;
pub mod symbols;
pub mod util;
pub mod weight;

pub use graph::*;
pub use std_list::*;
pub use symbols::*;
pub use util::*;
pub use weight::*;
