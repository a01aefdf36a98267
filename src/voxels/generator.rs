//! # Terrain Generator Module
//!
//! Procedural source of the voxel field. Every query is a pure function of the
//! world settings and the coordinate, so the generated layer is never stored
//! and may be evaluated from any thread.
//!
//! ## Landscape Model
//!
//! The terrain is 2.5D: all noise channels are sampled in the x/z plane only.
//!
//! * y < 0 is always solid bedrock
//! * y = 0 is solid where the height channel exceeds the obstacle threshold
//! * y = 1 is solid where the same sample exceeds the stricter peak threshold
//! * y > 1 is always empty
//!
//! Empty ground cells next to a solid one may become ramps (see
//! [`TerrainGenerator::mask_at`]), which is what makes the landscape walkable
//! between the two solid layers.
//!
//! ## Noise Channels
//!
//! Three seeded simplex channels are used: height (`seed`), material
//! (`seed + 113`) and resource (`seed + 117`). Samples are remapped from
//! `[-1, 1]` to `[0, 1]` before any threshold comparison. The ramp lottery uses
//! an integer hash of the seed and the column instead of a noise channel, so
//! neighbouring columns are uncorrelated.

use noise::{NoiseFn, Simplex};

use crate::config::WorldSettings;

use super::cell::VoxelCell;
use super::coords::GridCoordinate;
use super::corner::CornerMask;
use super::field::TerrainSource;

const MATERIAL_SEED_OFFSET: u32 = 113;
const RESOURCE_SEED_OFFSET: u32 = 117;

/// Deterministic procedural terrain.
pub struct TerrainGenerator {
    settings: WorldSettings,
    height: Simplex,
    materials: Simplex,
    resources: Simplex,
}

impl TerrainGenerator {
    /// Creates a generator for the given world settings.
    ///
    /// # Arguments
    /// * `settings` - Seed, frequencies and thresholds of the landscape
    ///
    /// # Returns
    /// A generator whose output depends only on `settings` and the queried coordinate.
    pub fn new(settings: WorldSettings) -> Self {
        TerrainGenerator {
            height: Simplex::new(settings.seed),
            materials: Simplex::new(settings.seed.wrapping_add(MATERIAL_SEED_OFFSET)),
            resources: Simplex::new(settings.seed.wrapping_add(RESOURCE_SEED_OFFSET)),
            settings,
        }
    }

    /// The settings this generator was built from.
    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    /// Occupancy of a cell.
    ///
    /// Follows the rough landscape, except that an empty ground cell which wins
    /// the per-column ramp lottery (`slope_chance`) runs the ramp detector: it
    /// becomes a wedge rising towards a solid horizontal neighbour when the cell
    /// on the opposite side is empty and nothing sits on top of the solid
    /// neighbour. Sides are tried in the order left, right, near, far.
    pub fn mask_at(&self, p: GridCoordinate) -> CornerMask {
        let rough = self.rough_landscape(p);
        if p.y == 0 && rough.is_empty() && hash01(self.settings.seed, p.x, p.z) < self.settings.slope_chance {
            return self.ramp_at(p);
        }
        rough
    }

    /// Surface material of a cell; zero unless the rough landscape is solid there.
    pub fn material_id_at(&self, p: GridCoordinate) -> u32 {
        if self.rough_landscape(p).is_full() {
            self.material_id_in_space(p)
        } else {
            0
        }
    }

    /// Resource carried by a cell; zero unless solid and the resource channel
    /// falls below `resource_chance`.
    ///
    /// A resource reuses the cell's material id as its identifier, so ores look
    /// like the rock they are embedded in.
    pub fn resource_id_at(&self, p: GridCoordinate) -> u32 {
        if self.rough_landscape(p).is_full() {
            let f = sample01(&self.resources, p, self.settings.resources_frequency);
            if f < self.settings.resource_chance {
                return self.material_id_in_space(p);
            }
        }
        0
    }

    fn material_id_in_space(&self, p: GridCoordinate) -> u32 {
        let count = self.settings.materials_count.max(1);
        let f = sample01(&self.materials, p, self.settings.materials_frequency);
        ((f * count as f64).floor() as u32 + 1).min(count)
    }

    fn rough_landscape(&self, p: GridCoordinate) -> CornerMask {
        let solid = match p.y {
            y if y < 0 => true,
            0 => sample01(&self.height, p, self.settings.height_frequency) > self.settings.obstacle_threshold,
            1 => sample01(&self.height, p, self.settings.height_frequency) > self.settings.peak_threshold,
            _ => false,
        };
        if solid {
            CornerMask::ALL
        } else {
            CornerMask::NONE
        }
    }

    fn ramp_at(&self, p: GridCoordinate) -> CornerMask {
        let sides = [
            (-1, 0, CornerMask::LEFT),
            (1, 0, CornerMask::RIGHT),
            (0, -1, CornerMask::NEAR),
            (0, 1, CornerMask::FAR),
        ];
        for (dx, dz, ramp) in sides {
            let high = self.rough_landscape(GridCoordinate::new(p.x + dx, p.y, p.z + dz));
            if !high.is_full() {
                continue;
            }
            let low = self.rough_landscape(GridCoordinate::new(p.x - dx, p.y, p.z - dz));
            let above_high = self.rough_landscape(GridCoordinate::new(p.x + dx, p.y + 1, p.z + dz));
            if low.is_empty() && above_high.is_empty() {
                return ramp;
            }
        }
        CornerMask::NONE
    }
}

impl TerrainSource for TerrainGenerator {
    fn cell_at(&self, p: GridCoordinate) -> VoxelCell {
        VoxelCell {
            mask: self.mask_at(p),
            material_id: self.material_id_at(p),
            resource_id: self.resource_id_at(p),
            object_id: 0,
        }
    }

    fn mask_at(&self, p: GridCoordinate) -> CornerMask {
        TerrainGenerator::mask_at(self, p)
    }
}

/// Samples a noise channel in the horizontal plane, remapped to `[0, 1]`.
fn sample01(noise: &Simplex, p: GridCoordinate, frequency: f64) -> f64 {
    let raw = noise.get([p.x as f64 * frequency, p.z as f64 * frequency]);
    ((raw + 1.0) * 0.5).clamp(0.0, 1.0)
}

/// Uniform value in `[0, 1]` derived from the seed and a column.
fn hash01(seed: u32, x: i32, z: i32) -> f64 {
    let n = (seed as i32)
        .wrapping_mul(374_761_393)
        .wrapping_add(x.wrapping_mul(668_265_263))
        .wrapping_add(z.wrapping_mul(1_274_126_177));
    let n = (n ^ (n >> 13)).wrapping_mul(1_911_520_717);
    let n = n ^ (n >> 16);
    (n as u32) as f64 / u32::MAX as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::field::TerrainSource;
    use test_case::test_case;

    fn generator() -> TerrainGenerator {
        TerrainGenerator::new(WorldSettings::default())
    }

    #[test]
    fn output_is_deterministic() {
        let a = generator();
        let b = generator();
        for x in -16..16 {
            for z in -16..16 {
                for y in -1..3 {
                    let p = GridCoordinate::new(x, y, z);
                    assert_eq!(a.cell_at(p), b.cell_at(p));
                    assert_eq!(a.mask_at(p), a.mask_at(p));
                }
            }
        }
    }

    #[test]
    fn seed_changes_terrain() {
        let a = generator();
        let b = TerrainGenerator::new(WorldSettings {
            seed: 4242,
            ..WorldSettings::default()
        });
        let differs = (0..32)
            .flat_map(|x| (0..32).map(move |z| GridCoordinate::new(x, 0, z)))
            .any(|p| a.mask_at(p) != b.mask_at(p));
        assert!(differs);
    }

    #[test_case(-1, CornerMask::ALL)]
    #[test_case(-7, CornerMask::ALL)]
    #[test_case(2, CornerMask::NONE)]
    #[test_case(9, CornerMask::NONE)]
    fn layers_outside_the_landscape_are_fixed(y: i32, expected: CornerMask) {
        let generator = generator();
        for x in -8..8 {
            for z in -8..8 {
                assert_eq!(generator.mask_at(GridCoordinate::new(x, y, z)), expected);
            }
        }
    }

    #[test]
    fn materials_only_on_solid_cells() {
        let generator = generator();
        let count = generator.settings().materials_count;
        for x in -16..16 {
            for z in -16..16 {
                for y in -1..3 {
                    let p = GridCoordinate::new(x, y, z);
                    let cell = generator.cell_at(p);
                    if cell.mask.is_full() {
                        assert!((1..=count).contains(&cell.material_id));
                    } else {
                        assert_eq!(cell.material_id, 0);
                        assert_eq!(cell.resource_id, 0);
                    }
                    assert_eq!(cell.object_id, 0);
                }
            }
        }
    }

    #[test]
    fn resources_reuse_material_ids() {
        let generator = TerrainGenerator::new(WorldSettings {
            resource_chance: 1.0,
            ..WorldSettings::default()
        });
        let p = GridCoordinate::new(3, -1, 5);
        assert_eq!(generator.resource_id_at(p), generator.material_id_at(p));
        assert_ne!(generator.resource_id_at(p), 0);
    }

    #[test]
    fn no_ramps_without_slope_chance() {
        let generator = TerrainGenerator::new(WorldSettings {
            slope_chance: 0.0,
            ..WorldSettings::default()
        });
        for x in -32..32 {
            for z in -32..32 {
                let mask = generator.mask_at(GridCoordinate::new(x, 0, z));
                assert!(mask == CornerMask::NONE || mask == CornerMask::ALL);
            }
        }
    }

    #[test]
    fn ramps_lean_on_solid_ground() {
        let generator = TerrainGenerator::new(WorldSettings {
            slope_chance: 1.0,
            ..WorldSettings::default()
        });
        let mut ramps = 0;
        for x in -32..32 {
            for z in -32..32 {
                let p = GridCoordinate::new(x, 0, z);
                let (dx, dz) = match generator.mask_at(p) {
                    CornerMask::LEFT => (-1, 0),
                    CornerMask::RIGHT => (1, 0),
                    CornerMask::NEAR => (0, -1),
                    CornerMask::FAR => (0, 1),
                    CornerMask::NONE | CornerMask::ALL => continue,
                    other => panic!("unexpected mask {:?} at {:?}", other, p),
                };
                ramps += 1;
                assert!(generator.mask_at(GridCoordinate::new(x + dx, 0, z + dz)).is_full());
                assert!(!generator.mask_at(GridCoordinate::new(x - dx, 0, z - dz)).is_full());
                assert!(generator.mask_at(GridCoordinate::new(x + dx, 1, z + dz)).is_empty());
            }
        }
        assert!(ramps > 0);
    }

    #[test]
    fn hash_is_unit_interval() {
        for x in -50..50 {
            let h = hash01(7, x, -x * 3);
            assert!((0.0..=1.0).contains(&h));
        }
    }
}
