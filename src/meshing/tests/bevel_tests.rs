use approx::assert_relative_eq;
use cgmath::{EuclideanSpace, InnerSpace, Vector3};
use test_case::test_case;

use super::Cells;
use crate::config::WorldSettings;
use crate::error::{Result, TerrainError};
use crate::meshing::{
    bevel::{synthesize, BevelParams},
    cell_block::CellBlock,
    ChunkMesh,
};
use crate::voxels::{cell::VoxelCell, coords::GridCoordinate, generator::TerrainGenerator};

const SIZE: Vector3<i32> = Vector3 { x: 8, y: 3, z: 8 };

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn params(bevel: f32) -> BevelParams {
    BevelParams {
        bevel,
        materials_count: 2,
        max_vertices: 64000,
        max_indices: 64000,
    }
}

fn mesh_at_origin(cells: &Cells, params: &BevelParams) -> Result<ChunkMesh> {
    let min = GridCoordinate::new(0, 0, 0);
    let block = CellBlock::capture(cells, min, SIZE);
    synthesize(&block, min, SIZE, params)
}

/// Sum of area-weighted normals and enclosed volume of a triangle soup.
fn closure(mesh: &ChunkMesh) -> (Vector3<f32>, f32) {
    let mut area = Vector3::new(0.0, 0.0, 0.0);
    let mut volume = 0.0;
    for sub_mesh in &mesh.sub_meshes {
        for [a, b, c] in mesh.triangles(sub_mesh) {
            let (p0, p1, p2) = (a.position(), b.position(), c.position());
            area += (p1 - p0).cross(p2 - p0);
            volume += p0.to_vec().dot(p1.to_vec().cross(p2.to_vec())) / 6.0;
        }
    }
    (area, volume)
}

fn assert_unit_normals(mesh: &ChunkMesh) {
    for vertex in &mesh.vertices {
        assert_relative_eq!(vertex.normal().magnitude(), 1.0, epsilon = 1e-4);
    }
}

#[test]
fn empty_space_has_no_geometry() {
    let mesh = mesh_at_origin(&Cells::default(), &params(0.1)).unwrap();
    assert!(mesh.is_empty());
    assert!(mesh.vertices.is_empty());
    assert_eq!(mesh.sub_meshes.len(), 2);
    assert!(mesh.sub_meshes.iter().all(|s| s.index_count == 0));
}

#[test_case(0.1, 0.945_333 ; "thin bevel")]
#[test_case(0.25, 0.708_333 ; "wide bevel")]
fn single_block_is_a_closed_bevelled_box(bevel: f32, expected_volume: f32) {
    init_logger();
    let cells = Cells::default().with(1, 1, 1, VoxelCell::solid(1));
    let mesh = mesh_at_origin(&cells, &params(bevel)).unwrap();

    assert_eq!(mesh.triangle_count(), 44);
    assert_eq!(mesh.sub_meshes[0].index_count, 44 * 3);
    assert_eq!(mesh.sub_meshes[1].index_count, 0);

    let (area, volume) = closure(&mesh);
    assert_relative_eq!(area.magnitude(), 0.0, epsilon = 1e-4);
    assert_relative_eq!(volume, expected_volume, epsilon = 1e-3);
    assert_unit_normals(&mesh);

    for vertex in &mesh.vertices {
        let p = vertex.position();
        for axis in [p.x, p.y, p.z] {
            assert!((1.0 - 1e-5..=2.0 + 1e-5).contains(&axis), "{:?}", p);
        }
    }
}

#[test]
fn normals_point_away_from_the_block() {
    let cells = Cells::default().with(1, 1, 1, VoxelCell::solid(1));
    let mesh = mesh_at_origin(&cells, &params(0.1)).unwrap();
    let center = cgmath::Point3::new(1.5, 1.5, 1.5);
    for [a, b, c] in mesh.triangles(&mesh.sub_meshes[0]) {
        let centroid = (a.position().to_vec() + b.position().to_vec() + c.position().to_vec()) / 3.0;
        let outwards = centroid - center.to_vec();
        assert!(a.normal().dot(outwards) > 0.0, "{:?}", a);
    }
}

#[test]
fn neighbouring_blocks_merge_into_one_surface() {
    let cells = Cells::default()
        .with(1, 1, 1, VoxelCell::solid(1))
        .with(2, 1, 1, VoxelCell::solid(1));
    let mesh = mesh_at_origin(&cells, &params(0.1)).unwrap();

    assert_eq!(mesh.triangle_count(), 76);
    let (area, volume) = closure(&mesh);
    assert_relative_eq!(area.magnitude(), 0.0, epsilon = 1e-4);
    assert_relative_eq!(volume, 1.925_333, epsilon = 1e-3);
}

#[test]
fn each_material_gets_its_own_skin() {
    let cells = Cells::default()
        .with(1, 1, 1, VoxelCell::solid(1))
        .with(2, 1, 1, VoxelCell::solid(2));
    let mesh = mesh_at_origin(&cells, &params(0.1)).unwrap();

    assert_eq!(mesh.sub_meshes.len(), 2);
    assert_eq!(mesh.sub_meshes[0].material_id, 1);
    assert_eq!(mesh.sub_meshes[1].material_id, 2);
    assert_eq!(mesh.sub_meshes[0].index_count, 44 * 3);
    assert_eq!(mesh.sub_meshes[1].index_start, 44 * 3);
    assert_eq!(mesh.sub_meshes[1].index_count, 44 * 3);
}

#[test]
fn material_zero_is_never_meshed() {
    let cells = Cells::default().with(
        1,
        1,
        1,
        VoxelCell {
            mask: crate::voxels::corner::CornerMask::ALL,
            ..VoxelCell::EMPTY
        },
    );
    assert!(mesh_at_origin(&cells, &params(0.1)).unwrap().is_empty());
}

#[test_case(100, 64000, "vertex", 100 ; "vertex buffer")]
#[test_case(64000, 60, "index", 60 ; "index buffer")]
fn buffer_bounds_are_enforced(max_vertices: usize, max_indices: usize, kind: &str, limit: usize) {
    let cells = Cells::default().with(1, 1, 1, VoxelCell::solid(1));
    let params = BevelParams {
        max_vertices,
        max_indices,
        ..params(0.1)
    };
    match mesh_at_origin(&cells, &params) {
        Err(TerrainError::MeshCapacityExceeded { kind: k, limit: l }) => {
            assert_eq!(k, kind);
            assert_eq!(l, limit);
        }
        other => panic!("expected a capacity error, got {:?}", other.map(|m| m.triangle_count())),
    }
}

#[test]
fn byte_views_cover_the_buffers() {
    let cells = Cells::default().with(3, 0, 3, VoxelCell::solid(2));
    let mesh = mesh_at_origin(&cells, &params(0.1)).unwrap();
    assert_eq!(mesh.vertex_bytes().len(), mesh.vertices.len() * 24);
    assert_eq!(mesh.index_bytes().len(), mesh.indices.len() * 4);
}

#[test_case(0, 0 ; "origin")]
#[test_case(8, -16 ; "negative z")]
#[test_case(-24, 40 ; "far away")]
fn generated_chunks_stay_inside_their_bounds(x: i32, z: i32) {
    init_logger();
    let generator = TerrainGenerator::new(WorldSettings::default());
    let min = GridCoordinate::new(x, 0, z);
    let block = CellBlock::capture(&generator, min, SIZE);
    let params = BevelParams {
        materials_count: generator.settings().materials_count,
        ..params(0.1)
    };
    let mesh = synthesize(&block, min, SIZE, &params).unwrap();

    assert!(!mesh.is_empty());
    assert_eq!(mesh.sub_meshes.len(), params.materials_count as usize);
    assert_unit_normals(&mesh);
    let lo = -0.1 - 1e-4;
    for vertex in &mesh.vertices {
        let p = vertex.position();
        assert!(p.x >= lo && p.x <= SIZE.x as f32 - 0.1 + 1e-4, "{:?}", p);
        assert!(p.y >= lo && p.y <= SIZE.y as f32 - 0.1 + 1e-4, "{:?}", p);
        assert!(p.z >= lo && p.z <= SIZE.z as f32 - 0.1 + 1e-4, "{:?}", p);
    }
}
