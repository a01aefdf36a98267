use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::*;
use crate::voxels::cell::VoxelCell;


fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Everything a [`RecordingSink`] has seen, shared with the test body.
#[derive(Default)]
struct Ledger {
    next_handle: u64,
    visual: HashMap<u64, VisualChunk>,
    physical: HashMap<u64, PhysicalChunk>,
    visual_created: usize,
    visual_destroyed: usize,
    physical_created: usize,
    physical_destroyed: usize,
}

impl Ledger {
    fn live_visual_at(&self, position: ChunkPosition) -> Vec<&VisualChunk> {
        self.visual.values().filter(|c| c.position == position).collect()
    }

    fn live_physical_at(&self, position: ChunkPosition) -> Vec<&PhysicalChunk> {
        self.physical.values().filter(|c| c.position == position).collect()
    }
}

/// Sink that keeps every live chunk and panics on unknown handles.
#[derive(Clone, Default)]
struct RecordingSink {
    ledger: Rc<RefCell<Ledger>>,
}

impl ChunkSink for RecordingSink {
    type Visual = u64;
    type Physical = u64;

    fn create_visual(&mut self, chunk: VisualChunk) -> u64 {
        let mut ledger = self.ledger.borrow_mut();
        ledger.next_handle += 1;
        let handle = ledger.next_handle;
        ledger.visual_created += 1;
        ledger.visual.insert(handle, chunk);
        handle
    }

    fn destroy_visual(&mut self, handle: u64) {
        let mut ledger = self.ledger.borrow_mut();
        assert!(ledger.visual.remove(&handle).is_some(), "unknown visual handle {}", handle);
        ledger.visual_destroyed += 1;
    }

    fn create_physical(&mut self, chunk: PhysicalChunk) -> u64 {
        let mut ledger = self.ledger.borrow_mut();
        ledger.next_handle += 1;
        let handle = ledger.next_handle;
        ledger.physical_created += 1;
        ledger.physical.insert(handle, chunk);
        handle
    }

    fn destroy_physical(&mut self, handle: u64) {
        let mut ledger = self.ledger.borrow_mut();
        assert!(ledger.physical.remove(&handle).is_some(), "unknown physical handle {}", handle);
        ledger.physical_destroyed += 1;
    }
}

/// Empty space with a handful of explicit cells.
#[derive(Default)]
struct Cells(HashMap<GridCoordinate, VoxelCell>);

impl Cells {
    fn with(mut self, x: i32, y: i32, z: i32, cell: VoxelCell) -> Self {
        self.0.insert(GridCoordinate::new(x, y, z), cell);
        self
    }
}

impl TerrainSource for Cells {
    fn cell_at(&self, p: GridCoordinate) -> VoxelCell {
        self.0.get(&p).copied().unwrap_or_default()
    }
}

/// Collision prefab 1 for blocks and 2 for ramps rising to +x.
fn collision_prefabs() -> ChunkPrefabs {
    let mut collision = vec![None; 16];
    collision[0xF] = Some(1);
    collision[0xC] = Some(2);
    collision[0x5] = Some(99);
    ChunkPrefabs {
        collision,
        ..ChunkPrefabs::default()
    }
}

fn build_settings() -> ChunkBuildSettings {
    ChunkBuildSettings::new(&EngineSettings::default(), collision_prefabs())
}

fn point(x: f32, z: f32) -> Point3<f32> {
    Point3::new(x, 0.0, z)
}
