//! I/O operations for contour tree decompositions and scalar meshes
//!
//! This crate reads and writes the files exchanged with the contour tree
//! builder and with rendering tools:
//! - Removal orders (`.order.dat` count sidecar + `.order.bin` payload)
//! - Triangulated surfaces with one scalar value per vertex

pub mod order;
pub mod scalar_mesh;
pub mod error;

pub use error::*;
pub use order::{order_paths, read_order, write_order};
pub use scalar_mesh::{parse_scalar_mesh, ScalarMeshReader};

use std::path::Path;
use topotree_core::{Result, TriMesh};

/// Trait for reading scalar meshes from files
pub trait MeshReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriMesh>;
}
