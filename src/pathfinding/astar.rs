//! # A* Search
//!
//! Best-first path search over any [`StepProvider`].
//!
//! ## Costs
//!
//! * Edge cost: Euclidean length of the step
//! * Heuristic: Chebyshev distance to the goal, which never overestimates
//!   the Euclidean cost of a 26-connected walk
//!
//! ## Lists
//!
//! The open list is a vector kept sorted by `distance + heuristic`. New and
//! improved entries are inserted after every entry with an equal score, so
//! among equal candidates the one found first is expanded first. The closed
//! list maps each expanded cell to the node it was reached through, which is
//! what the final path is traced back along. The start cell's closed entry is
//! never replaced.

use std::collections::HashMap;

use log::{debug, warn};
use web_time::Instant;

use crate::voxels::coords::GridCoordinate;

use super::StepProvider;

#[derive(Copy, Clone, Debug)]
struct Node {
    p: GridCoordinate,
    previous: GridCoordinate,
    distance: f32,
    heuristic: f32,
}

impl Node {
    fn score(&self) -> f32 {
        self.distance + self.heuristic
    }
}

/// Searches for a path from `from` to `to`.
///
/// # Returns
/// The cells of the path, both endpoints included, or `None` if either
/// endpoint is invalid for `provider` or the goal cannot be reached.
///
/// # Examples
///
/// ```
/// use voxel_terrain::pathfinding::{find_path, SlopeWalker};
/// use voxel_terrain::voxels::{generator::TerrainGenerator, coords::GridCoordinate};
/// use voxel_terrain::config::WorldSettings;
///
/// let terrain = TerrainGenerator::new(WorldSettings::default());
/// let start = GridCoordinate::new(0, 5, 0);
/// let walker = SlopeWalker::with_radius(&terrain, start, 10);
/// // floating start cells are rejected without searching
/// assert!(find_path(&walker, start, start).is_none());
/// ```
pub fn find_path<P: StepProvider>(
    provider: &P,
    from: GridCoordinate,
    to: GridCoordinate,
) -> Option<Vec<GridCoordinate>> {
    let mut path = Vec::new();
    find_path_into(provider, from, to, &mut path).then_some(path)
}

/// Searches for a path, writing it into a caller-owned buffer.
///
/// The buffer is always cleared first, so on failure it is left empty.
///
/// # Returns
/// `true` if a path was found.
pub fn find_path_into<P: StepProvider>(
    provider: &P,
    from: GridCoordinate,
    to: GridCoordinate,
    path: &mut Vec<GridCoordinate>,
) -> bool {
    path.clear();

    if !provider.is_valid_from(from) || !provider.is_valid_to(to) {
        return false;
    }

    if from == to {
        path.push(from);
        return true;
    }

    let start = Instant::now();
    let mut open = vec![Node {
        p: from,
        previous: from,
        distance: 0.0,
        heuristic: 0.0,
    }];
    let mut closed: HashMap<GridCoordinate, Node> = HashMap::new();

    while !open.is_empty() {
        let current = open.remove(0);

        match closed.get_mut(&current.p) {
            None => {
                closed.insert(current.p, current);
                if current.p == to {
                    let found = trace_back(&closed, from, to, path);
                    debug!(
                        "Path {:?} -> {:?}: {} cells, {} expanded, {:?}",
                        from,
                        to,
                        path.len(),
                        closed.len(),
                        start.elapsed()
                    );
                    return found;
                }
            }
            Some(existing) if current.p != from && current.score() < existing.score() => {
                *existing = current;
            }
            Some(_) => continue,
        }

        for step in provider.possible_steps(current.p) {
            if step == current.p {
                continue;
            }
            let candidate = Node {
                p: step,
                previous: current.p,
                distance: current.distance + step_length(current.p, step),
                heuristic: chebyshev(step, to),
            };
            match open.iter().position(|node| node.p == step) {
                None => insert_sorted(&mut open, candidate),
                Some(index) if candidate.score() < open[index].score() => {
                    open.remove(index);
                    insert_sorted(&mut open, candidate);
                }
                Some(_) => {}
            }
        }
    }

    debug!(
        "No path {:?} -> {:?}: {} expanded, {:?}",
        from,
        to,
        closed.len(),
        start.elapsed()
    );
    false
}

fn insert_sorted(open: &mut Vec<Node>, node: Node) {
    let index = open.partition_point(|other| other.score() <= node.score());
    open.insert(index, node);
}

fn trace_back(
    closed: &HashMap<GridCoordinate, Node>,
    from: GridCoordinate,
    to: GridCoordinate,
    path: &mut Vec<GridCoordinate>,
) -> bool {
    let mut cursor = to;
    path.push(cursor);
    while cursor != from {
        match closed.get(&cursor) {
            Some(node) if path.len() <= closed.len() => {
                cursor = node.previous;
                path.push(cursor);
            }
            _ => {
                warn!("Broken predecessor chain at {:?}", cursor);
                path.clear();
                return false;
            }
        }
    }
    path.reverse();
    true
}

fn step_length(a: GridCoordinate, b: GridCoordinate) -> f32 {
    let d = b - a;
    ((d.x * d.x + d.y * d.y + d.z * d.z) as f32).sqrt()
}

/// Largest per-axis difference between two cells.
pub fn chebyshev(a: GridCoordinate, b: GridCoordinate) -> f32 {
    let d = b - a;
    d.x.abs().max(d.y.abs()).max(d.z.abs()) as f32
}
