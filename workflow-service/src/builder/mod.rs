// Job graph construction
// Key normalization, step constructors and the two-tier job builder

pub mod graph;
pub mod normalize;
pub mod steps;

pub use graph::{build_workflow, JobGraphBuilder};
pub use normalize::normalize_key;
