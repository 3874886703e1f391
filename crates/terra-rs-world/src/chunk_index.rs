//! Block-to-chunk resolution over a [`WorldStore`].

use crate::chunk::ChunkRef;
use crate::coords::ChunkPos;
use crate::store::WorldStore;

/// Maps world coordinates to chunks and loads them straight from the store.
///
/// Nothing is cached here.
pub struct ChunkIndex<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: WorldStore + ?Sized> ChunkIndex<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Chunk containing the block column `(x, z)`.
    pub fn resolve(x: i32, z: i32) -> ChunkPos {
        ChunkPos::from_block(x, z)
    }

    /// Ask the store for a chunk. `None` if it is not loaded.
    pub fn load_direct(&self, pos: ChunkPos) -> Option<ChunkRef> {
        self.store.load_chunk(pos)
    }

    /// Load the 2x2 block of chunks anchored at `top_left`, indexed `dx | (dz << 1)`.
    pub fn load_four(&self, top_left: ChunkPos) -> [Option<ChunkRef>; 4] {
        let mut chunks: [Option<ChunkRef>; 4] = Default::default();
        for dx in 0..=1 {
            for dz in 0..=1 {
                chunks[(dx | (dz << 1)) as usize] =
                    self.load_direct(top_left.offset(dx, dz));
            }
        }
        chunks
    }
}
