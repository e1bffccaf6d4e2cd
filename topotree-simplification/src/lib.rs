//! Contour tree simplification
//!
//! This crate computes a branch decomposition of a contour tree by
//! repeatedly peeling off the least important leaf branch:
//! - Pluggable importance functions (persistence, hypervolume)
//! - Priority driven simplification producing a total removal order
//! - Replay of a stored order under top-k or weight threshold cuts

pub mod importance;
pub mod persistence;
pub mod hyper_volume;
pub mod simplify_ct;

pub use importance::*;
pub use persistence::*;
pub use hyper_volume::*;
pub use simplify_ct::*;
