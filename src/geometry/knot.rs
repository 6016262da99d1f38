use std::f32::consts::TAU;

use glam::Vec3;

use crate::geometry::error::GeometryError;
use crate::geometry::mesh::{Mesh, check_vertex_budget};

#[derive(Clone, Copy, PartialEq)]
pub struct KnotParams {
    pub knot_segments: u32,
    pub tube_segments: u32,
    /// Radius of the circle the knot winds around.
    pub ring_radius: f32,
    /// Amplitude of the winding excursion.
    pub wave_radius: f32,
    pub p: u32,
    pub q: u32,
    pub tube_radius: f32,
}

impl Default for KnotParams {
    fn default() -> Self {
        Self {
            knot_segments: 512,
            tube_segments: 12,
            ring_radius: 100.0,
            wave_radius: 25.0,
            p: 7,
            q: 3,
            tube_radius: 7.0,
        }
    }
}

/// Sweeps a circular tube along a (p,q) torus-knot curve.
///
/// The cross-section plane is rotated only by the q*t azimuth rather than
/// a full Frenet frame. That introduces a slight twist at high curvature;
/// it is a deliberate simplification, kept for visual compatibility.
pub fn generate(params: &KnotParams) -> Result<Mesh, GeometryError> {
    let KnotParams {
        knot_segments,
        tube_segments,
        ring_radius,
        wave_radius,
        p,
        q,
        tube_radius,
    } = *params;

    if knot_segments == 0 || tube_segments == 0 {
        return Err(GeometryError::ZeroSegments);
    }
    let vertex_count = (knot_segments as usize + 1) * (tube_segments as usize + 1);
    check_vertex_budget(vertex_count)?;

    let mut mesh = Mesh::with_capacity(vertex_count);
    let p = p as f32;
    let q = q as f32;

    for i in 0..=knot_segments {
        let t = i as f32 / knot_segments as f32 * TAU;
        let (sin_qt, cos_qt) = (q * t).sin_cos();
        let (sin_pt, cos_pt) = (p * t).sin_cos();

        let center = Vec3::new(
            (ring_radius + wave_radius * cos_pt) * cos_qt,
            (ring_radius + wave_radius * cos_pt) * sin_qt,
            wave_radius * sin_pt,
        );

        for j in 0..=tube_segments {
            let phi = j as f32 / tube_segments as f32 * TAU;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let radial = Vec3::new(cos_phi * cos_qt, cos_phi * sin_qt, sin_phi);
            mesh.push_vertex(center + tube_radius * radial, radial, {
                let brightness = (0.9 + 0.4 * sin_phi).min(1.0);
                [brightness, brightness * 0.4, brightness * 0.9, 1.0]
            });

            if i < knot_segments && j < tube_segments {
                let a = (i * (tube_segments + 1) + j) as u16;
                let b = a + tube_segments as u16 + 1;
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
        let mesh = generate(&KnotParams::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 513 * 13);
        assert_eq!(mesh.fill_indices.len(), 512 * 12 * 6);
        assert_eq!(mesh.edge_indices.len(), 512 * 12 * 4);
        assert_mesh_valid(&mesh);
    }

    #[test]
    fn seam_duplicates_first_ring() {
        // p and q are integers, so t=0 and t=2pi land on the same curve
        // point and the closing ring repeats the opening one.
        let params = KnotParams::default();
        let mesh = generate(&params).unwrap();
        let stride = (params.tube_segments as usize + 1) * 3;
        let first = &mesh.positions[..stride];
        let last = &mesh.positions[mesh.positions.len() - stride..];
        for (a, b) in first.iter().zip(last) {
            assert!((a - b).abs() < 1e-2);
        }
    }

    #[test]
    fn positions_stay_near_the_ring() {
        let params = KnotParams::default();
        let mesh = generate(&params).unwrap();
        let reach = params.ring_radius + params.wave_radius + params.tube_radius;
        for chunk in mesh.positions.chunks(3) {
            assert!(Vec3::from_slice(chunk).length() <= reach + 1e-3);
        }
    }

    #[test]
    fn rejects_zero_segments() {
        let err = generate(&KnotParams {
            tube_segments: 0,
            ..KnotParams::default()
        })
        .unwrap_err();
        assert_eq!(err, GeometryError::ZeroSegments);
    }

    #[test]
    fn rejects_oversized_grid() {
        let err = generate(&KnotParams {
            knot_segments: 8000,
            tube_segments: 12,
            ..KnotParams::default()
        })
        .unwrap_err();
        assert!(matches!(err, GeometryError::TooManyVertices { .. }));
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generate(&KnotParams::default()).unwrap();
        let b = generate(&KnotParams::default()).unwrap();
        assert_eq!(a.positions, b.positions);
        assert_eq!(a.fill_indices, b.fill_indices);
    }
}
