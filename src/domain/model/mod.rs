pub mod graph;
pub mod package;

pub use graph::*;
pub use package::*;
