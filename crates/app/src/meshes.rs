//! Hand-built meshes the primitive library does not cover: flat-shaded
//! Platonic solids for the gems and the topper core, and the point-cloud
//! mesh behind the starfield.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

/// Golden ratio, for the icosahedron vertex table.
const PHI: f32 = 1.618_034;

/// Flat-shaded octahedron of the given circumradius.
pub fn octahedron(radius: f32) -> Mesh {
    const VERTS: [Vec3; 6] = [
        Vec3::X,
        Vec3::NEG_X,
        Vec3::Y,
        Vec3::NEG_Y,
        Vec3::Z,
        Vec3::NEG_Z,
    ];
    const FACES: [[usize; 3]; 8] = [
        [0, 2, 4],
        [4, 2, 1],
        [1, 2, 5],
        [5, 2, 0],
        [0, 4, 3],
        [4, 1, 3],
        [1, 5, 3],
        [5, 0, 3],
    ];
    faceted(&VERTS, &FACES, radius)
}

/// Flat-shaded icosahedron of the given circumradius; the faceted crystal
/// core of the topper.
pub fn icosahedron(radius: f32) -> Mesh {
    const VERTS: [Vec3; 12] = [
        Vec3::new(-1.0, PHI, 0.0),
        Vec3::new(1.0, PHI, 0.0),
        Vec3::new(-1.0, -PHI, 0.0),
        Vec3::new(1.0, -PHI, 0.0),
        Vec3::new(0.0, -1.0, PHI),
        Vec3::new(0.0, 1.0, PHI),
        Vec3::new(0.0, -1.0, -PHI),
        Vec3::new(0.0, 1.0, -PHI),
        Vec3::new(PHI, 0.0, -1.0),
        Vec3::new(PHI, 0.0, 1.0),
        Vec3::new(-PHI, 0.0, -1.0),
        Vec3::new(-PHI, 0.0, 1.0),
    ];
    const FACES: [[usize; 3]; 20] = [
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];
    faceted(&VERTS, &FACES, radius)
}

/// Build a flat-shaded triangle mesh from a vertex table and a face list.
/// Vertices are duplicated per face so every facet keeps its own normal.
fn faceted(verts: &[Vec3], faces: &[[usize; 3]], radius: f32) -> Mesh {
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(faces.len() * 3);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(faces.len() * 3);
    let mut indices: Vec<u32> = Vec::with_capacity(faces.len() * 3);

    for face in faces {
        let [a, b, c] = face.map(|i| verts[i].normalize() * radius);
        let normal = (b - a).cross(c - a).normalize();
        for p in [a, b, c] {
            indices.push(positions.len() as u32);
            positions.push(p.to_array());
            normals.push(normal.to_array());
        }
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// Point-cloud mesh from raw positions, one render point per entry.
pub fn point_cloud(points: Vec<[f32; 3]>) -> Mesh {
    let mut mesh = Mesh::new(
        PrimitiveTopology::PointList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, points);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::mesh::VertexAttributeValues;

    fn positions_and_normals(mesh: &Mesh) -> (Vec<Vec3>, Vec<Vec3>) {
        let Some(VertexAttributeValues::Float32x3(pos)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("positions missing");
        };
        let Some(VertexAttributeValues::Float32x3(norm)) =
            mesh.attribute(Mesh::ATTRIBUTE_NORMAL)
        else {
            panic!("normals missing");
        };
        (
            pos.iter().map(|p| Vec3::from_array(*p)).collect(),
            norm.iter().map(|n| Vec3::from_array(*n)).collect(),
        )
    }

    #[test]
    fn test_octahedron_on_circumsphere() {
        let (positions, _) = positions_and_normals(&octahedron(0.2));
        assert_eq!(positions.len(), 24);
        for p in positions {
            assert!((p.length() - 0.2).abs() < 1e-5);
        }
    }

    #[test]
    fn test_icosahedron_on_circumsphere() {
        let (positions, _) = positions_and_normals(&icosahedron(0.8));
        assert_eq!(positions.len(), 60);
        for p in positions {
            assert!((p.length() - 0.8).abs() < 1e-5);
        }
    }

    #[test]
    fn test_facet_normals_point_outward() {
        for mesh in [octahedron(1.0), icosahedron(1.0)] {
            let (positions, normals) = positions_and_normals(&mesh);
            for tri in positions.chunks(3).zip(normals.chunks(3)) {
                let centroid = (tri.0[0] + tri.0[1] + tri.0[2]) / 3.0;
                assert!(
                    tri.1[0].dot(centroid) > 0.0,
                    "inward-facing facet at {centroid:?}"
                );
            }
        }
    }

    #[test]
    fn test_point_cloud_keeps_every_point() {
        let mesh = point_cloud(vec![[0.0, 1.0, 2.0], [3.0, 4.0, 5.0]]);
        let Some(VertexAttributeValues::Float32x3(pos)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("positions missing");
        };
        assert_eq!(pos.len(), 2);
        assert_eq!(pos[1], [3.0, 4.0, 5.0]);
    }
}
