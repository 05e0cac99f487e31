//! Triangle mesh snapshot handed over by a mesh provider.

use glam::Vec3;

use crate::error::{ArVfxError, Result};

/// Area of the triangle (p0, p1, p2).
#[must_use]
pub fn triangle_area(p0: Vec3, p1: Vec3, p2: Vec3) -> f32 {
    (p1 - p0).cross(p2 - p0).length() * 0.5
}

/// An indexed triangle mesh.
///
/// Every index is checked against the vertex count on construction, so the
/// samplers can index without bounds surprises.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates a mesh from positions, per-vertex normals, and triangles.
    ///
    /// `normals` may be empty; otherwise it must have one entry per vertex.
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Result<Self> {
        if !normals.is_empty() && normals.len() != positions.len() {
            return Err(ArVfxError::SizeMismatch {
                expected: positions.len(),
                actual: normals.len(),
            });
        }

        for (triangle, indices) in triangles.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= positions.len()) {
                return Err(ArVfxError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count: positions.len(),
                });
            }
        }

        Ok(Self {
            positions,
            normals,
            triangles,
        })
    }

    /// Creates a mesh from a flat index list, three indices per triangle.
    pub fn from_indices(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: &[u32]) -> Result<Self> {
        if indices.len() % 3 != 0 {
            return Err(ArVfxError::MalformedIndices(indices.len()));
        }
        let triangles = indices
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Self::new(positions, normals, triangles)
    }

    /// Returns the vertex positions.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Returns the per-vertex normals (empty if the mesh carries none).
    #[must_use]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Returns whether per-vertex normals are present.
    #[must_use]
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    /// Returns the triangles.
    #[must_use]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of triangles.
    #[must_use]
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Returns the three corner positions of triangle `i`.
    #[must_use]
    pub fn triangle(&self, i: usize) -> [Vec3; 3] {
        let [a, b, c] = self.triangles[i];
        [
            self.positions[a as usize],
            self.positions[b as usize],
            self.positions[c as usize],
        ]
    }

    /// Returns the area of triangle `i`.
    #[must_use]
    pub fn triangle_area(&self, i: usize) -> f32 {
        let [p0, p1, p2] = self.triangle(i);
        triangle_area(p0, p1, p2)
    }

    /// Returns the unit face normal of triangle `i` (zero for degenerate triangles).
    #[must_use]
    pub fn face_normal(&self, i: usize) -> Vec3 {
        let [p0, p1, p2] = self.triangle(i);
        (p1 - p0).cross(p2 - p0).normalize_or_zero()
    }

    /// Returns the total surface area.
    #[must_use]
    pub fn surface_area(&self) -> f32 {
        (0..self.num_triangles()).map(|i| self.triangle_area(i)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_positions() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_quad_area_and_normal() {
        let mesh = Mesh::new(quad_positions(), Vec::new(), vec![[0, 1, 2], [0, 2, 3]]).unwrap();
        assert_eq!(mesh.num_triangles(), 2);
        assert!((mesh.triangle_area(0) - 0.5).abs() < 1e-6);
        assert!((mesh.surface_area() - 1.0).abs() < 1e-6);
        assert_eq!(mesh.face_normal(1), Vec3::Z);
        assert!(!mesh.has_normals());
    }

    #[test]
    fn test_index_out_of_range() {
        let err = Mesh::new(quad_positions(), Vec::new(), vec![[0, 1, 2], [0, 2, 4]]).unwrap_err();
        match err {
            ArVfxError::IndexOutOfRange {
                triangle,
                index,
                vertex_count,
            } => {
                assert_eq!(triangle, 1);
                assert_eq!(index, 4);
                assert_eq!(vertex_count, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_normal_count_mismatch() {
        let err = Mesh::new(quad_positions(), vec![Vec3::Z; 3], vec![[0, 1, 2]]).unwrap_err();
        assert!(matches!(
            err,
            ArVfxError::SizeMismatch {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_from_flat_indices() {
        let mesh = Mesh::from_indices(quad_positions(), vec![Vec3::Z; 4], &[0, 1, 2, 0, 2, 3]).unwrap();
        assert_eq!(mesh.triangles(), &[[0, 1, 2], [0, 2, 3]]);
        assert!(mesh.has_normals());

        let err = Mesh::from_indices(quad_positions(), Vec::new(), &[0, 1]).unwrap_err();
        assert!(matches!(err, ArVfxError::MalformedIndices(2)));
    }

    #[test]
    fn test_degenerate_face_normal_is_zero() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::X * 2.0];
        let mesh = Mesh::new(positions, Vec::new(), vec![[0, 1, 2]]).unwrap();
        assert_eq!(mesh.face_normal(0), Vec3::ZERO);
        assert!(mesh.triangle_area(0).abs() < 1e-6);
    }

    #[test]
    fn test_triangle_area_matches_corners() {
        let mesh = Mesh::new(quad_positions(), Vec::new(), vec![[0, 1, 2], [0, 2, 3]]).unwrap();
        let [p0, p1, p2] = mesh.triangle(1);
        assert_eq!(mesh.triangle_area(1), triangle_area(p0, p1, p2));
        assert!((triangle_area(Vec3::ZERO, Vec3::X * 2.0, Vec3::Y) - 1.0).abs() < 1e-6);
    }
}
