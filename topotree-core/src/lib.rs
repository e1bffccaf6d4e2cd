//! Core data structures and traits for topotree
//!
//! This crate provides the fundamental types shared by the branch
//! decomposition engine and the file formats, including contour trees,
//! branches, the mesh topology provider and essential traits.

pub mod contour_tree;
pub mod branch;
pub mod order;
pub mod mesh;
pub mod traits;
pub mod error;

pub use contour_tree::*;
pub use branch::*;
pub use order::*;
pub use mesh::*;
pub use traits::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::Point3;

/// Common result type for topotree operations
pub type Result<T> = std::result::Result<T, Error>;
