//! Scalar mesh text format
//!
//! Whitespace separated tokens:
//! - a header token (ignored)
//! - `vertex_count triangle_count`
//! - `vertex_count` records of `x y z scalar`
//! - `triangle_count` records of `partition v1 v2 v3` with 0-based indices

use crate::error::{open, IoError};
use crate::MeshReader;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use topotree_core::{Point3, Result, ScalarDomain, TriMesh};
use tracing::debug;

pub struct ScalarMeshReader;

impl MeshReader for ScalarMeshReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriMesh> {
        let path = path.as_ref();
        let mut content = String::new();
        open(path)?.read_to_string(&mut content)?;
        let mesh = parse_scalar_mesh(&content)?;
        debug!(
            "loaded {}: {} vertices, {} triangles, max degree {}",
            path.display(),
            mesh.vertex_count(),
            mesh.face_count(),
            mesh.max_degree()
        );
        Ok(mesh)
    }
}

/// Parse a scalar mesh from the text format described in the module docs
pub fn parse_scalar_mesh(content: &str) -> Result<TriMesh> {
    let mut tokens = content.split_whitespace();
    next_token::<String>(&mut tokens, "header")?;
    let nv: usize = next_token(&mut tokens, "vertex count")?;
    let nt: usize = next_token(&mut tokens, "triangle count")?;

    let mut vertices = Vec::with_capacity(nv);
    let mut fn_vals = Vec::with_capacity(nv);
    for _ in 0..nv {
        let x: f32 = next_token(&mut tokens, "vertex x")?;
        let y: f32 = next_token(&mut tokens, "vertex y")?;
        let z: f32 = next_token(&mut tokens, "vertex z")?;
        let f: f32 = next_token(&mut tokens, "vertex scalar")?;
        vertices.push(Point3::new(x, y, z));
        fn_vals.push(f);
    }

    let mut faces = Vec::with_capacity(nt);
    let mut partitions = Vec::with_capacity(nt);
    for _ in 0..nt {
        partitions.push(next_token::<i32>(&mut tokens, "triangle partition")?);
        faces.push([
            next_token(&mut tokens, "triangle vertex")?,
            next_token(&mut tokens, "triangle vertex")?,
            next_token(&mut tokens, "triangle vertex")?,
        ]);
    }

    TriMesh::new(vertices, fn_vals, faces, partitions)
}

fn next_token<'a, T: FromStr>(
    tokens: &mut impl Iterator<Item = &'a str>,
    what: &str,
) -> std::result::Result<T, IoError> {
    let token = tokens.next().ok_or_else(|| IoError::ParseError {
        message: format!("unexpected end of input, expected {}", what),
    })?;
    token.parse().map_err(|_| IoError::ParseError {
        message: format!("invalid {}: {:?}", what, token),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use topotree_core::Error;

    const QUAD: &str = "TRI
4 2
0.0 0.0 0.0 2.0
1.0 0.0 0.0 1.0
1.0 1.0 0.0 4.0
0.0 1.0 0.0 3.0
0 0 1 2
1 0 2 3
";

    #[test]
    fn test_parse_quad() {
        let mesh = parse_scalar_mesh(QUAD).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.partitions, vec![0, 1]);
        assert_eq!(mesh.function_value(2), 4.0);
        assert_eq!(mesh.star(0), vec![1, 2, 3]);
        assert_eq!(mesh.max_degree(), 3);
        assert_eq!(mesh.sorted_vertices(), vec![1, 0, 3, 2]);
    }

    #[test]
    fn test_truncated_input() {
        let err = parse_scalar_mesh("TRI\n2 1\n0 0 0 1\n").unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
        assert!(format!("{err}").contains("vertex x"));
    }

    #[test]
    fn test_non_numeric_token() {
        let err = parse_scalar_mesh("TRI\n1 0\n0 0 zero 1\n").unwrap_err();
        assert!(format!("{err}").contains("vertex z"));
    }

    #[test]
    fn test_out_of_range_index() {
        let input = "TRI\n3 1\n0 0 0 0\n1 0 0 1\n0 1 0 2\n0 0 1 5\n";
        assert!(parse_scalar_mesh(input).is_err());
    }

    #[test]
    fn test_read_file() {
        let path = std::env::temp_dir().join(format!("topotree_quad_{}.txt", std::process::id()));
        std::fs::write(&path, QUAD).unwrap();
        let mesh = ScalarMeshReader::read_mesh(&path).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        let _ = std::fs::remove_file(&path);

        assert!(ScalarMeshReader::read_mesh(&path).is_err());
    }
}
