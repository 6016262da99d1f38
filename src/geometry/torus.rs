use std::f32::consts::TAU;

use glam::Vec3;

use crate::geometry::error::GeometryError;
use crate::geometry::mesh::{Mesh, check_vertex_budget};

#[derive(Clone, Copy, PartialEq)]
pub struct TorusParams {
    pub major_segments: u32,
    pub minor_segments: u32,
    pub major_radius: f32,
    pub minor_radius: f32,
}

impl Default for TorusParams {
    fn default() -> Self {
        Self {
            major_segments: 64,
            minor_segments: 32,
            major_radius: 100.0,
            minor_radius: 10.0,
        }
    }
}

/// Samples a torus as a `(major+1) x (minor+1)` vertex grid. The grid is
/// not wrapped: the last ring and last tube vertex duplicate the first, so
/// the seam carries its own vertices instead of reusing indices.
pub fn generate(params: &TorusParams) -> Result<Mesh, GeometryError> {
    let TorusParams {
        major_segments,
        minor_segments,
        major_radius,
        minor_radius,
    } = *params;

    if major_segments == 0 || minor_segments == 0 {
        return Err(GeometryError::ZeroSegments);
    }
    let vertex_count = (major_segments as usize + 1) * (minor_segments as usize + 1);
    check_vertex_budget(vertex_count)?;

    let mut mesh = Mesh::with_capacity(vertex_count);

    for i in 0..=major_segments {
        let theta = i as f32 / major_segments as f32 * TAU;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for j in 0..=minor_segments {
            let phi = j as f32 / minor_segments as f32 * TAU;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let ring = major_radius + minor_radius * cos_phi;
            let position = Vec3::new(ring * cos_theta, ring * sin_theta, minor_radius * sin_phi);
            // Analytic tube normal, not averaged from faces.
            let normal = Vec3::new(cos_phi * cos_theta, cos_phi * sin_theta, sin_phi);

            // Brightness varies with the tube angle only, which makes the
            // banding run along the tube.
            let brightness = (1.1 + 0.4 * sin_phi).min(1.0);
            let color = [brightness, brightness * 0.9, brightness * 0.1, 1.0];

            mesh.push_vertex(position, normal, color);

            if i < major_segments && j < minor_segments {
                let a = (i * (minor_segments + 1) + j) as u16;
                let b = a + minor_segments as u16 + 1;
                mesh.edge_indices.extend_from_slice(&[a, a + 1]);
                mesh.edge_indices.extend_from_slice(&[a, b]);
                mesh.fill_indices.extend_from_slice(&[a, a + 1, b]);
                mesh.fill_indices.extend_from_slice(&[a + 1, b + 1, b]);
            }
        }
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::mesh::assert_mesh_valid;

    #[test]
    fn vertex_and_index_counts() {
        let mesh = generate(&TorusParams::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 65 * 33);
        assert_eq!(mesh.fill_indices.len(), 64 * 32 * 6);
        assert_eq!(mesh.edge_indices.len(), 64 * 32 * 4);
        assert_mesh_valid(&mesh);
    }

    #[test]
    fn positions_stay_in_bounding_annulus() {
        let params = TorusParams::default();
        let mesh = generate(&params).unwrap();
        let outer = params.major_radius + params.minor_radius;
        let inner = params.major_radius - params.minor_radius;
        for chunk in mesh.positions.chunks(3) {
            let d = Vec3::from_slice(chunk).length();
            assert!(d <= outer + 1e-3 && d >= inner - 1e-3, "distance {}", d);
        }
    }

    #[test]
    fn small_torus_scenario() {
        let mesh = generate(&TorusParams {
            major_segments: 4,
            minor_segments: 4,
            major_radius: 10.0,
            minor_radius: 2.0,
        })
        .unwrap();
        assert_eq!(mesh.vertex_count(), 25);
        // 4*4 cells, two triangles per cell.
        assert_eq!(mesh.fill_indices.len() / 3, 32);
        for chunk in mesh.positions.chunks(3) {
            let d = Vec3::from_slice(chunk).length();
            assert!((8.0 - 1e-4..=12.0 + 1e-4).contains(&d));
        }
        assert_mesh_valid(&mesh);
    }

    #[test]
    fn seam_duplicates_first_ring() {
        let params = TorusParams::default();
        let mesh = generate(&params).unwrap();
        let stride = (params.minor_segments as usize + 1) * 3;
        let first = &mesh.positions[..stride];
        let last = &mesh.positions[mesh.positions.len() - stride..];
        for (a, b) in first.iter().zip(last) {
            assert!((a - b).abs() < 1e-3);
        }
    }

    #[test]
    fn rejects_zero_segments() {
        let err = generate(&TorusParams {
            major_segments: 0,
            ..TorusParams::default()
        })
        .unwrap_err();
        assert_eq!(err, GeometryError::ZeroSegments);
    }

    #[test]
    fn rejects_oversized_grid() {
        let err = generate(&TorusParams {
            major_segments: 300,
            minor_segments: 300,
            ..TorusParams::default()
        })
        .unwrap_err();
        assert!(matches!(err, GeometryError::TooManyVertices { .. }));
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generate(&TorusParams::default()).unwrap();
        let b = generate(&TorusParams::default()).unwrap();
        assert_eq!(a.positions, b.positions);
        assert_eq!(a.normals, b.normals);
        assert_eq!(a.colors, b.colors);
        assert_eq!(a.fill_indices, b.fill_indices);
        assert_eq!(a.edge_indices, b.edge_indices);
    }
}
