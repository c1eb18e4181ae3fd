/// An ordered triple of vertex payloads.
///
/// Winding is counter-clockwise for front faces.
#[derive(Clone, Debug, PartialEq)]
pub struct Triangle<V> {
    pub a: V,
    pub b: V,
    pub c: V,
}

impl<V> Triangle<V> {
    pub fn new(a: V, b: V, c: V) -> Self {
        Self { a, b, c }
    }
}

/// An indexed triangle mesh.
///
/// Each consecutive index triple names one triangle. The caller owns the mesh; the
/// pipeline borrows it read-only for the duration of a submission.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh<V> {
    pub vertices: Vec<V>,
    pub indices: Vec<u32>,
}

impl<V> Mesh<V> {
    /// Create a mesh from raw vertex and index lists.
    ///
    /// # Panics
    ///
    /// Panics if there are fewer than 3 vertices, the index count is not a multiple of 3,
    /// or any index is out of range.
    pub fn new(vertices: Vec<V>, indices: Vec<u32>) -> Self {
        assert!(vertices.len() >= 3, "A mesh requires at least 3 vertices");
        assert_eq!(
            indices.len() % 3,
            0,
            "Mesh indices must form whole triangles"
        );
        assert!(
            indices.iter().all(|&i| (i as usize) < vertices.len()),
            "Mesh index out of range"
        );

        Self { vertices, indices }
    }

    /// The number of triangles the index list describes.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
