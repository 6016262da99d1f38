use glam::Vec3;

use crate::geometry::error::GeometryError;
use crate::geometry::mesh::Mesh;

/// Depth 6 would need 24 * 4^6 = 98304 vertices, past the u16 index range.
pub const MAX_DEPTH: u32 = 5;

/// Vertices a given subdivision depth produces: 8 seed triangles, a 4-way
/// split per level, 3 private vertices per leaf.
pub fn vertex_count_for_depth(depth: u32) -> usize {
    24 * 4usize.pow(depth)
}

/// Builds a unit sphere by recursively subdividing the 8 triangles of an
/// octahedron, pushing every midpoint back onto the sphere. Leaves do not
/// share vertices; each triangle owns its three, so normals stay exact at
/// the cost of memory.
pub fn generate(depth: u32) -> Result<Mesh, GeometryError> {
    if depth > MAX_DEPTH {
        return Err(GeometryError::DepthOutOfRange {
            depth,
            max: MAX_DEPTH,
        });
    }

    let mut mesh = Mesh::with_capacity(vertex_count_for_depth(depth));

    let v0 = Vec3::X;
    let v1 = -Vec3::X;
    let v2 = Vec3::Y;
    let v3 = -Vec3::Y;
    let v4 = Vec3::Z;
    let v5 = -Vec3::Z;

    let seeds = [
        [v0, v2, v4],
        [v2, v1, v4],
        [v1, v3, v4],
        [v3, v0, v4],
        [v2, v0, v5],
        [v1, v2, v5],
        [v3, v1, v5],
        [v0, v3, v5],
    ];

    for [a, b, c] in seeds {
        subdivide(&mut mesh, a, b, c, depth);
    }

    Ok(mesh)
}

fn subdivide(mesh: &mut Mesh, a: Vec3, b: Vec3, c: Vec3, depth: u32) {
    if depth == 0 {
        push_leaf(mesh, a, b, c);
        return;
    }

    let ab = a.midpoint(b).normalize();
    let ac = a.midpoint(c).normalize();
    let bc = b.midpoint(c).normalize();

    subdivide(mesh, a, ab, ac, depth - 1);
    subdivide(mesh, ab, b, bc, depth - 1);
    subdivide(mesh, bc, c, ac, depth - 1);
    subdivide(mesh, ab, bc, ac, depth - 1);
}

fn push_leaf(mesh: &mut Mesh, a: Vec3, b: Vec3, c: Vec3) {
    // Index of the first vertex this leaf adds; leaves are indexed in
    // strict emission order.
    let index = mesh.vertex_count() as u16;

    for v in [a, b, c] {
        // Unit sphere centered at the origin: the position doubles as the
        // normal, and maps onto rgb directly.
        let color = [
            (v.x + 1.0) / 2.0,
            (v.y + 1.0) / 2.0,
            (v.z + 1.0) / 2.0,
            1.0,
        ];
        mesh.push_vertex(v, v, color);
    }

    mesh.fill_indices
        .extend_from_slice(&[index, index + 1, index + 2]);
    mesh.edge_indices.extend_from_slice(&[index, index + 1]);
    mesh.edge_indices.extend_from_slice(&[index + 1, index + 2]);
    mesh.edge_indices.extend_from_slice(&[index + 2, index]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::mesh::assert_mesh_valid;

    #[test]
    fn depth_zero_is_the_octahedron() {
        let mesh = generate(0).unwrap();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.fill_indices.len() / 3, 8);
        assert_eq!(mesh.edge_indices.len() / 2, 24);
        assert_mesh_valid(&mesh);
    }

    #[test]
    fn vertex_counts_grow_fourfold() {
        for depth in 0..=3 {
            let mesh = generate(depth).unwrap();
            assert_eq!(mesh.vertex_count(), vertex_count_for_depth(depth));
            assert_eq!(mesh.fill_indices.len(), mesh.vertex_count());
        }
    }

    #[test]
    fn depth_one_scenario() {
        let mesh = generate(1).unwrap();
        assert_eq!(mesh.vertex_count(), 96);
        // Normals are the positions on a unit sphere.
        assert_eq!(mesh.positions, mesh.normals);
        assert_mesh_valid(&mesh);
    }

    #[test]
    fn all_vertices_on_the_unit_sphere() {
        let mesh = generate(3).unwrap();
        for chunk in mesh.positions.chunks(3) {
            let d = Vec3::from_slice(chunk).length();
            assert!((d - 1.0).abs() < 1e-5, "radius {}", d);
        }
    }

    #[test]
    fn colors_map_positions_into_unit_cube() {
        let mesh = generate(2).unwrap();
        for (pos, col) in mesh.positions.chunks(3).zip(mesh.colors.chunks(4)) {
            for k in 0..3 {
                assert!((col[k] - (pos[k] + 1.0) / 2.0).abs() < 1e-6);
            }
            assert_eq!(col[3], 1.0);
        }
    }

    #[test]
    fn rejects_excessive_depth() {
        let err = generate(MAX_DEPTH + 1).unwrap_err();
        assert_eq!(
            err,
            GeometryError::DepthOutOfRange {
                depth: 6,
                max: MAX_DEPTH
            }
        );
    }

    #[test]
    fn max_depth_fits_u16_indices() {
        let mesh = generate(MAX_DEPTH).unwrap();
        assert_eq!(mesh.vertex_count(), 24576);
        assert_mesh_valid(&mesh);
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generate(4).unwrap();
        let b = generate(4).unwrap();
        assert_eq!(a.positions, b.positions);
        assert_eq!(a.edge_indices, b.edge_indices);
    }
}
