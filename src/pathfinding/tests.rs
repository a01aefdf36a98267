use std::cell::Cell;
use std::collections::HashMap;

use test_case::test_case;

use super::astar::chebyshev;
use super::*;
use crate::config::WorldSettings;
use crate::voxels::cell::VoxelCell;
use crate::voxels::corner::CornerMask;
use crate::voxels::field::TerrainSource;
use crate::voxels::generator::TerrainGenerator;
use crate::voxels::spatial::cell_with_floor_near;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Bedrock below y = 0, air above, with a few overridden cells.
struct Grid(HashMap<GridCoordinate, CornerMask>);

impl Grid {
    fn new(cells: &[((i32, i32, i32), CornerMask)]) -> Self {
        Grid(
            cells
                .iter()
                .map(|&((x, y, z), mask)| (GridCoordinate::new(x, y, z), mask))
                .collect(),
        )
    }
}

impl TerrainSource for Grid {
    fn cell_at(&self, p: GridCoordinate) -> VoxelCell {
        let mask = self.0.get(&p).copied().unwrap_or(if p.y < 0 {
            CornerMask::ALL
        } else {
            CornerMask::NONE
        });
        VoxelCell { mask, ..VoxelCell::EMPTY }
    }
}

fn cell(x: i32, y: i32, z: i32) -> GridCoordinate {
    GridCoordinate::new(x, y, z)
}

fn assert_connected(path: &[GridCoordinate]) {
    for pair in path.windows(2) {
        assert_eq!(chebyshev(pair[0], pair[1]), 1.0, "{:?} -> {:?}", pair[0], pair[1]);
    }
}

#[test]
fn straight_line_on_flat_ground() {
    init_logger();
    let grid = Grid::new(&[]);
    let walker = SlopeWalker::with_radius(&grid, cell(0, 0, 0), 10);

    let path = find_path(&walker, cell(0, 0, 0), cell(4, 0, 0)).unwrap();
    let expected: Vec<_> = (0..=4).map(|x| cell(x, 0, 0)).collect();
    assert_eq!(path, expected);
}

#[test]
fn walks_around_a_wall() {
    init_logger();
    let wall = cell(2, 0, 0);
    let grid = Grid::new(&[((2, 0, 0), CornerMask::ALL)]);
    let walker = SlopeWalker::with_radius(&grid, cell(0, 0, 0), 10);

    let path = find_path(&walker, cell(0, 0, 0), cell(4, 0, 0)).unwrap();
    assert_eq!(path.first(), Some(&cell(0, 0, 0)));
    assert_eq!(path.last(), Some(&cell(4, 0, 0)));
    assert!(!path.contains(&wall));
    assert!(path.iter().all(|p| p.y == 0));
    assert_eq!(path.len(), 5);
    assert_connected(&path);
}

#[test]
fn diagonal_never_cuts_a_solid_corner() {
    let grid = Grid::new(&[((1, 0, 0), CornerMask::ALL)]);
    let walker = SlopeWalker::with_radius(&grid, cell(0, 0, 0), 10);

    let steps = walker.possible_steps(cell(0, 0, 0));
    assert!(!steps.contains(&cell(1, 0, 1)));
    assert!(!steps.contains(&cell(1, 0, -1)));
    assert!(steps.contains(&cell(-1, 0, 1)));
    assert!(steps.contains(&cell(-1, 0, -1)));
}

#[test]
fn climbs_onto_a_block_by_ramp() {
    init_logger();
    let grid = Grid::new(&[((1, 0, 0), CornerMask::RIGHT), ((2, 0, 0), CornerMask::ALL)]);
    let walker = SlopeWalker::with_radius(&grid, cell(0, 0, 0), 10);

    let path = find_path(&walker, cell(0, 0, 0), cell(2, 1, 0)).unwrap();
    assert_eq!(path, vec![cell(0, 0, 0), cell(1, 0, 0), cell(2, 1, 0)]);
}

#[test]
fn descends_a_block_by_ramp() {
    init_logger();
    let grid = Grid::new(&[((1, 0, 0), CornerMask::RIGHT), ((2, 0, 0), CornerMask::ALL)]);
    let walker = SlopeWalker::with_radius(&grid, cell(2, 1, 0), 10);

    let path = find_path(&walker, cell(2, 1, 0), cell(0, 0, 0)).unwrap();
    assert_eq!(path, vec![cell(2, 1, 0), cell(1, 0, 0), cell(0, 0, 0)]);
}

#[test]
fn ramp_rising_towards_the_walker_is_not_entered() {
    let grid = Grid::new(&[((1, 0, 0), CornerMask::LEFT)]);
    let walker = SlopeWalker::with_radius(&grid, cell(0, 0, 0), 10);

    assert!(!walker.possible_steps(cell(0, 0, 0)).contains(&cell(1, 0, 0)));
    assert!(walker.possible_steps(cell(2, 0, 0)).contains(&cell(1, 0, 0)));
}

#[test]
fn bare_ledge_cannot_be_climbed() {
    init_logger();
    let grid = Grid::new(&[((1, 0, 0), CornerMask::ALL)]);
    let walker = SlopeWalker::with_radius(&grid, cell(0, 0, 0), 4);

    assert!(walker.is_standable(cell(1, 1, 0)));
    assert_eq!(find_path(&walker, cell(0, 0, 0), cell(1, 1, 0)), None);
}

#[test]
fn enclosed_goal_is_unreachable() {
    init_logger();
    let mut walls = Vec::new();
    for dx in -1..=1 {
        for dz in -1..=1 {
            if dx != 0 || dz != 0 {
                walls.push(((4 + dx, 0, 4 + dz), CornerMask::ALL));
            }
        }
    }
    let grid = Grid::new(&walls);
    let walker = SlopeWalker::with_radius(&grid, cell(0, 0, 0), 8);

    let mut path = vec![cell(9, 9, 9)];
    assert!(!find_path_into(&walker, cell(0, 0, 0), cell(4, 0, 4), &mut path));
    assert!(path.is_empty());
}

#[test_case(cell(0, 0, 0), cell(0, 0, 0) ; "start inside a block")]
#[test_case(cell(3, 2, 3), cell(0, 0, 0) ; "floating start")]
#[test_case(cell(3, 0, 3), cell(0, 0, 0) ; "solid goal")]
#[test_case(cell(3, 0, 3), cell(20, 0, 0) ; "goal outside the search box")]
fn invalid_endpoints_fail_without_searching(from: GridCoordinate, to: GridCoordinate) {
    let grid = Grid::new(&[((0, 0, 0), CornerMask::ALL)]);
    let walker = SlopeWalker::with_radius(&grid, cell(3, 0, 3), 10);
    assert_eq!(find_path(&walker, from, to), None);
}

/// Flat-ground provider that counts how often it is expanded.
struct Counting {
    expansions: Cell<usize>,
}

impl StepProvider for Counting {
    fn is_valid_from(&self, _: GridCoordinate) -> bool {
        true
    }

    fn is_valid_to(&self, _: GridCoordinate) -> bool {
        true
    }

    fn possible_steps(&self, p: GridCoordinate) -> Vec<GridCoordinate> {
        self.expansions.set(self.expansions.get() + 1);
        vec![p + cgmath::Vector3::new(1, 0, 0), p + cgmath::Vector3::new(-1, 0, 0)]
    }
}

#[test]
fn start_equal_to_goal_needs_no_expansion() {
    let provider = Counting {
        expansions: Cell::new(0),
    };
    let p = cell(5, 0, -3);
    assert_eq!(find_path(&provider, p, p), Some(vec![p]));
    assert_eq!(provider.expansions.get(), 0);
}

#[test]
fn buffer_is_reused() {
    let provider = Counting {
        expansions: Cell::new(0),
    };
    let mut path = vec![cell(7, 7, 7); 3];
    assert!(find_path_into(&provider, cell(0, 0, 0), cell(3, 0, 0), &mut path));
    assert_eq!(path, vec![cell(0, 0, 0), cell(1, 0, 0), cell(2, 0, 0), cell(3, 0, 0)]);
    assert_eq!(provider.expansions.get(), 3);
}

#[test_case(1337, 0.5 ; "default seed")]
#[test_case(7, 0.9 ; "many ramps")]
#[test_case(42, 0.0 ; "no ramps")]
fn generated_paths_stay_on_standable_ground(seed: u32, slope_chance: f64) {
    init_logger();
    let terrain = TerrainGenerator::new(WorldSettings {
        seed,
        slope_chance,
        ..WorldSettings::default()
    });
    let start = cell_with_floor_near(&terrain, cell(0, 0, 0), 4).unwrap();
    let walker = SlopeWalker::with_radius(&terrain, start, 16);

    let mut found = 0;
    for goal in [cell(6, 0, 6), cell(-5, 0, 3), cell(2, 0, -7)] {
        let goal = cell_with_floor_near(&terrain, goal, 3).unwrap();
        if !walker.is_standable(goal) {
            continue;
        }
        if let Some(path) = find_path(&walker, start, goal) {
            found += 1;
            assert_eq!(path.first(), Some(&start));
            assert_eq!(path.last(), Some(&goal));
            assert!(path.iter().all(|&p| walker.is_standable(p)), "{:?}", path);
            assert_connected(&path);
        }
    }
    log::debug!("seed {}: {} paths found", seed, found);
}
