//! In-memory [`WorldStore`] for tooling and tests.
//!
//! Keeps every chunk in a map and records the side effects requested by the
//! generation layer so callers can inspect them afterwards.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};

use tracing::trace;

use crate::block::BlockState;
use crate::chunk::{Chunk, ChunkRef};
use crate::coords::{BlockPos, ChunkPos};
use crate::store::{NotifyFlags, WorldStore};

/// A recorded block change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockChange {
    pub pos: BlockPos,
    pub old: BlockState,
    pub new: BlockState,
    pub flags: NotifyFlags,
}

/// World store backed by a `HashMap`.
pub struct MemoryWorldStore {
    min_y: i32,
    height: i32,
    chunks: RwLock<HashMap<ChunkPos, ChunkRef>>,
    loads: AtomicUsize,
    light_rechecks: Mutex<Vec<BlockPos>>,
    changes: Mutex<Vec<BlockChange>>,
}

impl Default for MemoryWorldStore {
    fn default() -> Self {
        Self::new(0, 256)
    }
}

impl MemoryWorldStore {
    /// Create an empty store whose chunks cover `[min_y, min_y + height)`.
    pub fn new(min_y: i32, height: i32) -> Self {
        Self {
            min_y,
            height,
            chunks: RwLock::new(HashMap::new()),
            loads: AtomicUsize::new(0),
            light_rechecks: Mutex::new(Vec::new()),
            changes: Mutex::new(Vec::new()),
        }
    }

    /// An empty chunk with this store's vertical range (not inserted).
    pub fn empty_chunk(&self, pos: ChunkPos) -> Chunk {
        Chunk::new(pos, self.min_y, self.height)
    }

    /// Insert (or replace) a chunk and return its handle.
    pub fn insert_chunk(&self, chunk: Chunk) -> ChunkRef {
        let pos = chunk.pos();
        let handle = chunk.into_ref();
        self.chunks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(pos, handle.clone());
        handle
    }

    /// Insert an empty chunk at `pos` and return its handle.
    pub fn insert_empty(&self, pos: ChunkPos) -> ChunkRef {
        self.insert_chunk(self.empty_chunk(pos))
    }

    /// Drop a chunk from the store.
    pub fn unload_chunk(&self, pos: ChunkPos) -> Option<ChunkRef> {
        self.chunks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&pos)
    }

    /// Handle of a stored chunk, without counting it as a load.
    pub fn chunk(&self, pos: ChunkPos) -> Option<ChunkRef> {
        self.chunks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&pos)
            .cloned()
    }

    /// Number of `load_chunk` calls so far, including misses.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    /// Positions passed to `recheck_light`, in call order.
    pub fn light_rechecks(&self) -> Vec<BlockPos> {
        self.light_rechecks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Block change notifications, in call order.
    pub fn changes(&self) -> Vec<BlockChange> {
        self.changes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Forget all recorded side effects and the load counter.
    pub fn clear_records(&self) {
        self.loads.store(0, Ordering::Relaxed);
        self.light_rechecks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.changes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl WorldStore for MemoryWorldStore {
    fn load_chunk(&self, pos: ChunkPos) -> Option<ChunkRef> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        let chunk = self.chunk(pos);
        if chunk.is_none() {
            trace!("chunk {pos} is not loaded");
        }
        chunk
    }

    fn notify_block_changed(
        &self,
        pos: BlockPos,
        old: BlockState,
        new: BlockState,
        flags: NotifyFlags,
    ) {
        self.changes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(BlockChange {
                pos,
                old,
                new,
                flags,
            });
    }

    fn recheck_light(&self, pos: BlockPos) {
        self.light_rechecks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ChunkRefExt;

    #[test]
    fn load_counts_hits_and_misses() {
        let store = MemoryWorldStore::default();
        store.insert_empty(ChunkPos::new(0, 0));
        assert!(store.load_chunk(ChunkPos::new(0, 0)).is_some());
        assert!(store.load_chunk(ChunkPos::new(5, 5)).is_none());
        assert_eq!(store.load_count(), 2);
        // Direct inspection is not a load.
        assert!(store.chunk(ChunkPos::new(0, 0)).is_some());
        assert_eq!(store.load_count(), 2);
    }

    #[test]
    fn loaded_handle_shares_data() {
        let store = MemoryWorldStore::new(-64, 384);
        let handle = store.insert_empty(ChunkPos::new(1, 2));
        handle
            .write_chunk()
            .set_block(0, -60, 0, BlockState::of(7));
        let loaded = store.load_chunk(ChunkPos::new(1, 2)).unwrap();
        assert_eq!(loaded.read_chunk().block(0, -60, 0), BlockState::of(7));
        assert_eq!(loaded.read_chunk().min_y(), -64);
    }

    #[test]
    fn records_side_effects() {
        let store = MemoryWorldStore::default();
        let pos = BlockPos::new(1, 2, 3);
        store.recheck_light(pos);
        store.notify_block_changed(
            pos,
            BlockState::AIR,
            BlockState::of(1),
            NotifyFlags::SEND_TO_CLIENTS,
        );
        assert_eq!(store.light_rechecks(), vec![pos]);
        assert_eq!(store.changes().len(), 1);
        assert_eq!(store.changes()[0].new, BlockState::of(1));

        store.clear_records();
        assert!(store.light_rechecks().is_empty());
        assert!(store.changes().is_empty());
    }

    #[test]
    fn unload_removes_chunk() {
        let store = MemoryWorldStore::default();
        store.insert_empty(ChunkPos::new(0, 0));
        assert!(store.unload_chunk(ChunkPos::new(0, 0)).is_some());
        assert!(store.load_chunk(ChunkPos::new(0, 0)).is_none());
    }
}
