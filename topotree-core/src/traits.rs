//! Core traits for topotree

/// A scalar field sampled on the vertices of a mesh, together with the
/// vertex adjacency needed to build a contour tree from it.
pub trait ScalarDomain {
    /// Number of vertices
    fn vertex_count(&self) -> usize;

    /// Largest number of neighbours of any vertex
    fn max_degree(&self) -> usize;

    /// Neighbours of vertex `v`, in ascending index order
    fn star(&self, v: u32) -> Vec<u32>;

    /// Scalar value at vertex `v`
    fn function_value(&self, v: u32) -> f32;

    /// Total order over vertices: by scalar value, ties broken by index
    fn less_than(&self, v1: u32, v2: u32) -> bool {
        let (f1, f2) = (self.function_value(v1), self.function_value(v2));
        f1 < f2 || (f1 == f2 && v1 < v2)
    }

    /// All vertices sorted by [`ScalarDomain::less_than`]
    fn sorted_vertices(&self) -> Vec<u32> {
        let mut vertices: Vec<u32> = (0..self.vertex_count() as u32).collect();
        vertices.sort_by(|&a, &b| {
            self.function_value(a)
                .total_cmp(&self.function_value(b))
                .then(a.cmp(&b))
        });
        vertices
    }
}
