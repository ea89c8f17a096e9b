//! Campaign progression: the branch map, mid-nodes and scene sequencing.

pub mod encounters;
pub mod nodes;
pub mod types;

pub use encounters::*;
pub use nodes::*;
pub use types::*;
