use terra_rs_world::{BlockPos, BlockState, ChunkRef, ChunkRefExt, NotifyFlags, WorldStore};
use tracing::trace;

use super::{local_xz, TerrainWorld};

fn read_block(handle: &ChunkRef, x: i32, y: i32, z: i32) -> BlockState {
    let (lx, lz) = local_xz(x, z);
    handle.read_chunk().block(lx, y, lz)
}

impl<S: WorldStore> TerrainWorld<S> {
    /// Block at `(x, y, z)`. Unreachable positions read as air.
    pub fn material(&self, x: i32, y: i32, z: i32) -> BlockState {
        match self.chunk_at(x, y, z) {
            Some(handle) => read_block(&handle, x, y, z),
            None => BlockState::AIR,
        }
    }

    /// Write a block. Writes to unreachable positions are dropped.
    ///
    /// The host is told about every real change. Light is rechecked only
    /// when the light emission or opacity at the position changed.
    pub fn set_block(&self, x: i32, y: i32, z: i32, state: BlockState) {
        let Some(handle) = self.chunk_at(x, y, z) else {
            trace!("dropped write of {state:?} at {x} {y} {z}: chunk not reachable");
            return;
        };
        let (lx, lz) = local_xz(x, z);
        let Some(old) = handle.write_chunk().set_block(lx, y, lz, state) else {
            return;
        };
        if old == state {
            return;
        }

        let pos = BlockPos::new(x, y, z);
        if old.light_opacity() != state.light_opacity()
            || old.light_emission() != state.light_emission()
        {
            self.store.recheck_light(pos);
        }
        self.store
            .notify_block_changed(pos, old, state, NotifyFlags::SEND_TO_CLIENTS);
    }

    /// Whether `(x, y, z)` is air. Unreachable positions count as empty.
    pub fn is_empty(&self, x: i32, y: i32, z: i32) -> bool {
        match self.chunk_at(x, y, z) {
            Some(handle) => read_block(&handle, x, y, z).is_air(),
            None => true,
        }
    }

    /// Whether the chunk holding `(x, y, z)` is reachable.
    pub fn is_loaded(&self, x: i32, y: i32, z: i32) -> bool {
        self.chunk_at(x, y, z).is_some()
    }

    pub fn light_level(&self, x: i32, y: i32, z: i32) -> u8 {
        self.store.light_level(BlockPos::new(x, y, z))
    }
}
