//! Community detection module

pub mod dynamic;
pub mod metrics;
pub mod propagation;
pub mod scan;

use serde::{Deserialize, Serialize};

pub use dynamic::{
    affected_vertices_delta_screening, affected_vertices_frontier, run_dynamic_delta_screening,
    run_dynamic_frontier,
};
pub use propagation::{run, run_par, VertexHooks};
pub use scan::ScanScratch;

/// Result of a label-propagation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropagationResult {
    /// Community id per vertex key; community ids are vertex keys of
    /// original members
    pub membership: Vec<u32>,

    /// Number of passes actually performed
    pub iterations: usize,

    /// Mean wall-clock seconds per repetition
    pub time: f32,
}
