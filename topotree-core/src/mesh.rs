//! Triangulated surface carrying a per-vertex scalar field

use crate::{Error, Result, ScalarDomain};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A triangle mesh with one scalar value per vertex.
///
/// Only the vertex adjacency is used for topology; positions and partition
/// ids are kept as read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriMesh {
    pub vertices: Vec<Point3f>,
    pub fn_vals: Vec<f32>,
    pub faces: Vec<[u32; 3]>,
    pub partitions: Vec<i32>,
    adjacency: Vec<BTreeSet<u32>>,
    max_star: usize,
}

impl TriMesh {
    /// Create a mesh from vertices, their scalar values and triangles.
    ///
    /// `partitions` holds one id per face; pass an empty vector when the
    /// source has none.
    pub fn new(
        vertices: Vec<Point3f>,
        fn_vals: Vec<f32>,
        faces: Vec<[u32; 3]>,
        partitions: Vec<i32>,
    ) -> Result<Self> {
        if vertices.len() != fn_vals.len() {
            return Err(Error::InvalidData(format!(
                "{} vertices but {} scalar values",
                vertices.len(),
                fn_vals.len()
            )));
        }
        if !partitions.is_empty() && partitions.len() != faces.len() {
            return Err(Error::InvalidData(format!(
                "{} faces but {} partition ids",
                faces.len(),
                partitions.len()
            )));
        }

        let nv = vertices.len();
        let mut adjacency = vec![BTreeSet::new(); nv];
        for (fi, face) in faces.iter().enumerate() {
            if face.iter().any(|&v| v as usize >= nv) {
                return Err(Error::InvalidData(format!(
                    "Face {} {:?} references a vertex outside 0..{}",
                    fi, face, nv
                )));
            }
            let [v1, v2, v3] = *face;
            adjacency[v1 as usize].extend([v2, v3]);
            adjacency[v2 as usize].extend([v1, v3]);
            adjacency[v3 as usize].extend([v1, v2]);
        }
        for (v, adj) in adjacency.iter_mut().enumerate() {
            // degenerate triangles would otherwise make a vertex its own neighbour
            adj.remove(&(v as u32));
        }

        let max_star = adjacency.iter().map(BTreeSet::len).max().unwrap_or(0);
        let partitions = if partitions.is_empty() {
            vec![0; faces.len()]
        } else {
            partitions
        };

        Ok(Self {
            vertices,
            fn_vals,
            faces,
            partitions,
            adjacency,
            max_star,
        })
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Neighbour set of a vertex
    pub fn neighbors(&self, v: u32) -> &BTreeSet<u32> {
        &self.adjacency[v as usize]
    }
}

impl ScalarDomain for TriMesh {
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn max_degree(&self) -> usize {
        self.max_star
    }

    fn star(&self, v: u32) -> Vec<u32> {
        self.adjacency[v as usize].iter().copied().collect()
    }

    fn function_value(&self, v: u32) -> f32 {
        self.fn_vals[v as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_quad() -> TriMesh {
        TriMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![2.0, 1.0, 1.0, 5.0],
            vec![[0, 1, 2], [0, 2, 3]],
            Vec::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_adjacency() {
        let mesh = make_quad();
        assert_eq!(mesh.star(0), vec![1, 2, 3]);
        assert_eq!(mesh.star(1), vec![0, 2]);
        assert_eq!(mesh.star(3), vec![0, 2]);
        assert_eq!(mesh.max_degree(), 3);
        assert_eq!(mesh.partitions, vec![0, 0]);
    }

    #[test]
    fn test_total_order() {
        let mesh = make_quad();
        assert!(mesh.less_than(1, 2));
        assert!(!mesh.less_than(2, 1));
        assert!(mesh.less_than(2, 0));
        assert!(!mesh.less_than(3, 3));
        assert_eq!(mesh.sorted_vertices(), vec![1, 2, 0, 3]);
    }

    #[test]
    fn test_invalid_face() {
        let result = TriMesh::new(
            vec![Point3::origin(); 3],
            vec![0.0; 3],
            vec![[0, 1, 3]],
            Vec::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_scalar_count_mismatch() {
        let result = TriMesh::new(vec![Point3::origin(); 3], vec![0.0; 2], Vec::new(), Vec::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_degenerate_face() {
        let mesh = TriMesh::new(
            vec![Point3::origin(); 2],
            vec![0.0, 1.0],
            vec![[0, 0, 1]],
            vec![7],
        )
        .unwrap();
        assert_eq!(mesh.star(0), vec![1]);
        assert_eq!(mesh.max_degree(), 1);
    }
}
