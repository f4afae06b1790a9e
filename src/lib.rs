//! Core library functions for label-propagation community detection
//!
//! Implements the RAK label-propagation kernel over a weighted compressed
//! graph: a static convergence loop plus two incremental variants
//! (delta-screening and frontier) that restrict work to vertices affected
//! by an edge-update batch.

pub mod community;
pub mod config;
pub mod error;
pub mod graph;

pub use community::{
    run, run_dynamic_delta_screening, run_dynamic_frontier, run_par, PropagationResult,
};
pub use config::{PropagationOptions, UpdateStrategy};
pub use error::{Error, Result};
pub use graph::{CompressedGraph, GraphBuilder};
