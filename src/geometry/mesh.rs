use glam::Vec3;

use crate::geometry::error::GeometryError;

/// Largest vertex count addressable with u16 indices.
pub const MAX_VERTICES: usize = 65536;

/// CPU-side mesh arrays as the generators emit them: flat position/normal
/// triples, rgba color quadruples, and two u16 index streams (triangle
/// list for fill, line list for wireframe).
#[derive(Debug)]
pub struct Mesh {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub colors: Vec<f32>,
    pub fill_indices: Vec<u16>,
    pub edge_indices: Vec<u16>,
}

impl Mesh {
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices * 3),
            normals: Vec::with_capacity(vertices * 3),
            colors: Vec::with_capacity(vertices * 4),
            fill_indices: Vec::new(),
            edge_indices: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3, color: [f32; 4]) {
        self.positions.extend_from_slice(&position.to_array());
        self.normals.extend_from_slice(&normal.to_array());
        self.colors.extend_from_slice(&color);
    }
}

/// Fails if a planned vertex count would not fit the u16 index range.
pub fn check_vertex_budget(vertices: usize) -> Result<(), GeometryError> {
    if vertices > MAX_VERTICES {
        return Err(GeometryError::TooManyVertices {
            vertices,
            max: MAX_VERTICES,
        });
    }
    Ok(())
}

/// Structural invariants every generator output must satisfy. Test-only.
#[cfg(test)]
pub fn assert_mesh_valid(mesh: &Mesh) {
    let n = mesh.vertex_count();
    assert_eq!(mesh.positions.len(), n * 3);
    assert_eq!(mesh.normals.len(), n * 3);
    assert_eq!(mesh.colors.len(), n * 4);
    assert_eq!(mesh.fill_indices.len() % 3, 0);
    assert_eq!(mesh.edge_indices.len() % 2, 0);
    for &i in mesh.fill_indices.iter().chain(&mesh.edge_indices) {
        assert!((i as usize) < n, "index {} out of range {}", i, n);
    }
    for chunk in mesh.normals.chunks(3) {
        let len = Vec3::from_slice(chunk).length();
        assert!((len - 1.0).abs() < 1e-5, "normal length {}", len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_budget_limits() {
        assert!(check_vertex_budget(MAX_VERTICES).is_ok());
        assert!(matches!(
            check_vertex_budget(MAX_VERTICES + 1),
            Err(GeometryError::TooManyVertices { .. })
        ));
    }

    #[test]
    fn push_vertex_keeps_arrays_parallel() {
        let mut mesh = Mesh::with_capacity(2);
        mesh.push_vertex(Vec3::X, Vec3::Y, [1.0, 0.5, 0.0, 1.0]);
        mesh.push_vertex(Vec3::Z, Vec3::X, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(mesh.vertex_count(), 2);
        assert_mesh_valid(&mesh);
    }
}
