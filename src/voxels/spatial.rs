//! # Spatial Module
//!
//! Terrain queries used to place things on the ground, and the physics query
//! interface the terrain core expects its host to provide.
//!
//! ## Queries
//!
//! * [`find_surface_cell_mid_under`] - the walkable surface point under a position
//! * [`cell_with_floor_near`] - the nearest standable ground-level cell, found
//!   by walking a square spiral outwards
//! * [`sample_spawn_cell`] - a random standable cell at some distance from an
//!   origin, driven by a caller-owned seeded generator

use std::f32::consts::TAU;

use cgmath::{Point2, Point3, Vector3};
use fastrand::Rng;

use super::coords::GridCoordinate;
use super::field::TerrainSource;

/// Returns the middle of the surface cell under `position`.
///
/// Scans upward from ground level (y = 0) in the column containing
/// `position` until the mask is no longer solid. The result is horizontally
/// centred in that cell; vertically it sits on the cell floor when the cell is
/// empty, or halfway up when it is a ramp.
///
/// The scan terminates for any terrain with a finite solid column, which
/// holds for generated terrain and any finite set of edits.
pub fn find_surface_cell_mid_under<T: TerrainSource>(source: &T, position: Point3<f32>) -> Point3<f32> {
    let mut cell = GridCoordinate::new(position.x.floor() as i32, 0, position.z.floor() as i32);
    while source.mask_at(cell).is_full() {
        cell.y += 1;
    }
    let lift = if source.mask_at(cell).is_empty() { 0.0 } else { 0.5 };
    Point3::new(cell.x as f32 + 0.5, cell.y as f32 + lift, cell.z as f32 + 0.5)
}

/// Walks the horizontal grid in a square spiral around a centre.
///
/// The centre comes first, then each ring of Chebyshev radius 1, 2, ... in
/// turn, so the first `(2r + 1)^2` items cover exactly the cells within
/// radius `r`.
#[derive(Clone, Debug)]
pub struct SquareSpiral {
    center: Point2<i32>,
    current: Point2<i32>,
}

impl SquareSpiral {
    /// Starts a spiral at `center`.
    pub fn new(center: Point2<i32>) -> Self {
        SquareSpiral {
            center,
            current: center,
        }
    }
}

impl Iterator for SquareSpiral {
    type Item = Point2<i32>;

    fn next(&mut self) -> Option<Point2<i32>> {
        let item = self.current;
        let d = self.current - self.center;
        if d.y < d.x && d.y > -d.x {
            self.current.y += 1;
        } else if d.y >= d.x && d.y > -d.x {
            self.current.x -= 1;
        } else if d.y > d.x && d.y <= -d.x {
            self.current.y -= 1;
        } else {
            self.current.x += 1;
        }
        Some(item)
    }
}

/// Finds a ground-level cell near `p` that a character can stand in.
///
/// Columns are visited in spiral order around `p`. A column qualifies when its
/// y = 0 cell is empty, or when that cell is solid and the cell above it is
/// empty (the top of an obstacle).
///
/// # Returns
/// The standable cell, or `None` if no column within `max_radius` qualifies.
pub fn cell_with_floor_near<T: TerrainSource>(
    source: &T,
    p: GridCoordinate,
    max_radius: i32,
) -> Option<GridCoordinate> {
    let side = (2 * max_radius.max(0) + 1) as usize;
    SquareSpiral::new(Point2::new(p.x, p.z))
        .take(side * side)
        .find_map(|column| {
            let ground = GridCoordinate::new(column.x, 0, column.y);
            let mask = source.mask_at(ground);
            if mask.is_empty() {
                return Some(ground);
            }
            let above = ground + Vector3::new(0, 1, 0);
            (mask.is_full() && source.mask_at(above).is_empty()).then_some(above)
        })
}

/// Picks a standable cell at a random bearing and distance from `origin`.
///
/// # Arguments
/// * `source` - The terrain to search
/// * `rng` - Caller-owned generator; the same seed gives the same cell
/// * `origin` - Centre of the sampling ring
/// * `distance_range` - Inclusive-exclusive bounds of the sampled distance
/// * `max_radius` - How far around the sampled point to look for ground
pub fn sample_spawn_cell<T: TerrainSource>(
    source: &T,
    rng: &mut Rng,
    origin: Point3<f32>,
    distance_range: (f32, f32),
    max_radius: i32,
) -> Option<GridCoordinate> {
    let angle = rng.f32() * TAU;
    let (near, far) = distance_range;
    let distance = near + rng.f32() * (far - near);
    let proposed = origin + Vector3::new(angle.cos(), 0.0, -angle.sin()) * distance;
    let cell = GridCoordinate::new(
        proposed.x.floor() as i32,
        proposed.y.floor() as i32,
        proposed.z.floor() as i32,
    );
    cell_with_floor_near(source, cell, max_radius)
}

/// Collision layers understood by [`SpatialQuery`] implementations.
pub mod layer_mask {
    /// Static geometry, including terrain colliders.
    pub const DEFAULT: u32 = 1;
    /// Player characters.
    pub const PLAYER: u32 = 1 << 21;
    /// Enemies.
    pub const ENEMY: u32 = 1 << 22;
    /// Every layer above.
    pub const ALL: u32 = DEFAULT | PLAYER | ENEMY;
}

/// Result of a sweep or ray cast.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CastHit {
    /// Distance travelled before the hit.
    pub distance: f32,
    /// Surface normal at the hit point.
    pub normal: Vector3<f32>,
}

/// Physics queries provided by the host engine.
///
/// The terrain core materializes the colliders these queries run against but
/// does not implement them; movement and behaviour code consume this trait.
pub trait SpatialQuery {
    /// Whether an axis-aligned box overlaps anything on the given layers.
    fn check_box(&self, center: Point3<f32>, half_extents: Vector3<f32>, layer_mask: u32) -> bool;

    /// Sweeps a sphere along `direction` for up to `distance`.
    fn cast_sphere(
        &self,
        position: Point3<f32>,
        radius: f32,
        direction: Vector3<f32>,
        distance: f32,
        layer_mask: u32,
    ) -> Option<CastHit>;

    /// Casts a ray from `position` towards `target`.
    fn cast_ray(&self, position: Point3<f32>, target: Point3<f32>, layer_mask: u32) -> Option<CastHit>;
}
