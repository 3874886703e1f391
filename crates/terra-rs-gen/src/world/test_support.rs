//! Shared fixtures for the world tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use terra_rs_world::{BlockState, ChunkPos, MemoryWorldStore};

use super::TerrainWorld;
use crate::biome::{BiomeId, BiomeSource};
use crate::config::WorldConfig;

pub(crate) const STONE: BlockState = BlockState::of(1);
pub(crate) const GRASS: BlockState = BlockState::of(2);
pub(crate) const WATER: BlockState = BlockState::of(9);

pub(crate) type TestWorld = TerrainWorld<Arc<MemoryWorldStore>>;

/// Biome source that always answers `biome` and counts its calls.
#[derive(Clone)]
pub(crate) struct CountingBiomeSource {
    pub biome: BiomeId,
    pub calls: Arc<AtomicUsize>,
}

impl CountingBiomeSource {
    pub fn new(biome: BiomeId) -> Self {
        Self {
            biome,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl BiomeSource for CountingBiomeSource {
    fn biome_at(&self, _x: i32, _z: i32) -> BiomeId {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.biome
    }
}

/// Empty chunks for every `(x, z)` in `min..=max`.
pub(crate) fn grid_store(min: i32, max: i32) -> Arc<MemoryWorldStore> {
    let store = Arc::new(MemoryWorldStore::default());
    for x in min..=max {
        for z in min..=max {
            store.insert_empty(ChunkPos::new(x, z));
        }
    }
    store
}

pub(crate) fn world_on(
    store: Arc<MemoryWorldStore>,
    config: WorldConfig,
    source: CountingBiomeSource,
) -> TestWorld {
    TerrainWorld::new("test", config, store, source)
}

/// A default-configured world over a square grid of empty chunks.
pub(crate) fn grid_world(min: i32, max: i32) -> (Arc<MemoryWorldStore>, TestWorld) {
    let store = grid_store(min, max);
    let world = world_on(store.clone(), WorldConfig::default(), CountingBiomeSource::new(0));
    (store, world)
}
