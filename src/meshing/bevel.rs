//! # Bevel Synthesis
//!
//! Converts per-material cell occupancy into a bevelled, flat-shaded surface.
//!
//! ## Algorithm
//!
//! The lattice is offset by half a cell: the unit cube visited at cell `p`
//! has the eight cells `p - 1 ..= p` as its corners, so cube corner `(1,1,1)`
//! is `p` itself. Instead of triangulating that cube directly, it is split
//! into seven thin sub-regions hugging the faces, edges and corner the cube
//! shares with `p`:
//!
//! * three face strips (left, near, bottom), `2 * bevel` thick
//! * three edge blocks (left-bottom, left-near, near-bottom)
//! * one corner block (left-near-bottom)
//!
//! Each sub-region looks up the standard marching-cubes table with a case
//! index built only from the corners that matter to it, and the resulting
//! edge-midpoint triangles are stretched into the region's bounds. Where a
//! face strip produces a flat wall, the edge and corner blocks produce the
//! chamfers between walls, which gives the rounded look and keeps the surface
//! closed across neighbouring cells.
//!
//! Every material is meshed independently, so touching blocks of different
//! materials each get a complete skin and never share coplanar faces.

use cgmath::{Point3, Vector3};
use log::debug;
use web_time::Instant;

use crate::error::Result;
use crate::voxels::coords::GridCoordinate;

use super::cell_block::{CellBlock, Occupancy};
use super::mesh::{ChunkMesh, MeshBuilder};
use super::tables::{EDGE_MIDPOINTS, TRIANGLES};

// Case bits of the marching-cubes corners grouped by the cube face or edge
// they lie on. Left/right is x, bottom/top is y, near/far is z.
const LEFT: u8 = 0x99;
const RIGHT: u8 = 0x66;
const BOTTOM: u8 = 0x33;
const TOP: u8 = 0xCC;
const NEAR: u8 = 0x0F;
const FAR: u8 = 0xF0;

const LEFT_BOTTOM: u8 = LEFT & BOTTOM;
const RIGHT_BOTTOM: u8 = RIGHT & BOTTOM;
const LEFT_TOP: u8 = LEFT & TOP;
const RIGHT_TOP: u8 = RIGHT & TOP;
const LEFT_NEAR: u8 = LEFT & NEAR;
const RIGHT_NEAR: u8 = RIGHT & NEAR;
const LEFT_FAR: u8 = LEFT & FAR;
const RIGHT_FAR: u8 = RIGHT & FAR;
const NEAR_BOTTOM: u8 = NEAR & BOTTOM;
const FAR_BOTTOM: u8 = FAR & BOTTOM;
const NEAR_TOP: u8 = NEAR & TOP;
const FAR_TOP: u8 = FAR & TOP;

/// Solidity of the 2x2x2 cells around a lattice cube, indexed `[x][y][z]`.
type Corners = [[[bool; 2]; 2]; 2];

/// Parameters of one synthesis run.
pub struct BevelParams {
    /// Half-width of the rounded strip along every cell edge.
    pub bevel: f32,
    /// Materials `1..=materials_count` each get a sub-mesh.
    pub materials_count: u32,
    /// Vertex buffer bound.
    pub max_vertices: usize,
    /// Index buffer bound.
    pub max_indices: usize,
}

/// Builds the bevelled mesh for the cells `[min, min + size)`.
///
/// # Arguments
/// * `block` - Cached cells of the chunk, padded by one cell on every side
/// * `min` - World coordinate of the chunk's min corner
/// * `size` - Extent of the chunk in cells
/// * `params` - Bevel width, material count and buffer bounds
///
/// # Returns
/// The mesh in chunk-local coordinates with one sub-mesh per material, or
/// [`crate::TerrainError::MeshCapacityExceeded`] when the geometry does not fit.
pub(crate) fn synthesize(
    block: &CellBlock,
    min: GridCoordinate,
    size: Vector3<i32>,
    params: &BevelParams,
) -> Result<ChunkMesh> {
    let start = Instant::now();
    let mut builder = MeshBuilder::new(params.max_vertices, params.max_indices);

    for material_id in 1..=params.materials_count {
        builder.begin_sub_mesh(material_id);
        let occupancy = block.occupancy(material_id);
        if occupancy.is_empty() {
            continue;
        }
        for y in 0..size.y {
            for z in 0..size.z {
                for x in 0..size.x {
                    let p = min + Vector3::new(x, y, z);
                    let corners = sample_corners(&occupancy, p);
                    let local = Point3::new(x as f32, y as f32, z as f32);
                    emit_cell(&mut builder, &corners, local, params.bevel)?;
                }
            }
        }
    }

    let mesh = builder.finish();
    debug!(
        "Bevel mesh at {:?}: {} triangles in {:?}",
        min,
        mesh.triangle_count(),
        start.elapsed()
    );
    Ok(mesh)
}

fn sample_corners(occupancy: &Occupancy<'_>, p: GridCoordinate) -> Corners {
    let mut corners = [[[false; 2]; 2]; 2];
    for (dx, plane) in corners.iter_mut().enumerate() {
        for (dy, row) in plane.iter_mut().enumerate() {
            for (dz, corner) in row.iter_mut().enumerate() {
                let q = p + Vector3::new(dx as i32 - 1, dy as i32 - 1, dz as i32 - 1);
                *corner = occupancy.is_solid(q);
            }
        }
    }
    corners
}

fn emit_cell(builder: &mut MeshBuilder, c: &Corners, cell: Point3<f32>, bevel: f32) -> Result<()> {
    let thin = 2.0 * bevel;
    let wide = 1.0 - 2.0 * bevel;
    let pick = |solid: bool, bits: u8| if solid { bits } else { 0 };

    // face strips
    emit_region(
        builder,
        cell + Vector3::new(-bevel, bevel, bevel),
        Vector3::new(thin, wide, wide),
        pick(c[1][1][1], RIGHT) | pick(c[0][1][1], LEFT),
    )?;
    emit_region(
        builder,
        cell + Vector3::new(bevel, bevel, -bevel),
        Vector3::new(wide, wide, thin),
        pick(c[1][1][1], FAR) | pick(c[1][1][0], NEAR),
    )?;
    emit_region(
        builder,
        cell + Vector3::new(bevel, -bevel, bevel),
        Vector3::new(wide, thin, wide),
        pick(c[1][1][1], TOP) | pick(c[1][0][1], BOTTOM),
    )?;

    // edge blocks
    emit_region(
        builder,
        cell + Vector3::new(-bevel, -bevel, bevel),
        Vector3::new(thin, thin, wide),
        pick(c[0][0][1], LEFT_BOTTOM)
            | pick(c[1][0][1], RIGHT_BOTTOM)
            | pick(c[0][1][1], LEFT_TOP)
            | pick(c[1][1][1], RIGHT_TOP),
    )?;
    emit_region(
        builder,
        cell + Vector3::new(-bevel, bevel, -bevel),
        Vector3::new(thin, wide, thin),
        pick(c[0][1][0], LEFT_NEAR)
            | pick(c[1][1][0], RIGHT_NEAR)
            | pick(c[0][1][1], LEFT_FAR)
            | pick(c[1][1][1], RIGHT_FAR),
    )?;
    emit_region(
        builder,
        cell + Vector3::new(bevel, -bevel, -bevel),
        Vector3::new(wide, thin, thin),
        pick(c[1][0][0], NEAR_BOTTOM)
            | pick(c[1][0][1], FAR_BOTTOM)
            | pick(c[1][1][0], NEAR_TOP)
            | pick(c[1][1][1], FAR_TOP),
    )?;

    // corner block
    emit_region(
        builder,
        cell + Vector3::new(-bevel, -bevel, -bevel),
        Vector3::new(thin, thin, thin),
        corner_case(c),
    )
}

/// Case index with one bit per lattice corner, in marching-cubes numbering.
fn corner_case(c: &Corners) -> u8 {
    const ORDER: [(usize, usize, usize); 8] = [
        (0, 0, 0),
        (1, 0, 0),
        (1, 1, 0),
        (0, 1, 0),
        (0, 0, 1),
        (1, 0, 1),
        (1, 1, 1),
        (0, 1, 1),
    ];
    let mut case = 0;
    for (bit, &(x, y, z)) in ORDER.iter().enumerate() {
        if c[x][y][z] {
            case |= 1 << bit;
        }
    }
    case
}

fn emit_region(builder: &mut MeshBuilder, min: Point3<f32>, size: Vector3<f32>, case: u8) -> Result<()> {
    let place = |edge: i8| {
        let unit = EDGE_MIDPOINTS[edge as usize];
        min + Vector3::new(unit[0] * size.x, unit[1] * size.y, unit[2] * size.z)
    };

    for triangle in TRIANGLES[case as usize].chunks_exact(3) {
        if triangle[0] < 0 {
            break;
        }
        // the table winds towards the solid side; swap to face outwards
        builder.push_triangle(place(triangle[0]), place(triangle[2]), place(triangle[1]))?;
    }
    Ok(())
}
