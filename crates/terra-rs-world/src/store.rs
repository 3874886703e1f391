//! The host world store interface.

use std::sync::Arc;

use crate::block::BlockState;
use crate::chunk::ChunkRef;
use crate::coords::{BlockPos, ChunkPos};

/// Flags passed along with a block change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NotifyFlags(pub u8);

impl NotifyFlags {
    /// Update neighbouring blocks.
    pub const BLOCK_UPDATE: NotifyFlags = NotifyFlags(1);
    /// Send the change to clients without updating neighbours.
    pub const SEND_TO_CLIENTS: NotifyFlags = NotifyFlags(2);
    /// Do not re-render on the client.
    pub const NO_RERENDER: NotifyFlags = NotifyFlags(4);

    pub const fn contains(self, other: NotifyFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for NotifyFlags {
    type Output = NotifyFlags;

    fn bitor(self, rhs: NotifyFlags) -> NotifyFlags {
        NotifyFlags(self.0 | rhs.0)
    }
}

/// Chunk storage and world-level side effects provided by the host.
///
/// All calls are synchronous; a load either returns a chunk or `None`.
pub trait WorldStore {
    /// Load (or fetch the already loaded) chunk at `pos`.
    fn load_chunk(&self, pos: ChunkPos) -> Option<ChunkRef>;

    /// A block was changed by the generation layer.
    fn notify_block_changed(
        &self,
        pos: BlockPos,
        old: BlockState,
        new: BlockState,
        flags: NotifyFlags,
    );

    /// Light around `pos` must be recomputed.
    fn recheck_light(&self, pos: BlockPos);

    /// Combined block and sky light at `pos`, as if it were day.
    fn light_level(&self, pos: BlockPos) -> u8 {
        let _ = pos;
        15
    }
}

impl<S: WorldStore + ?Sized> WorldStore for &S {
    fn load_chunk(&self, pos: ChunkPos) -> Option<ChunkRef> {
        (**self).load_chunk(pos)
    }

    fn notify_block_changed(
        &self,
        pos: BlockPos,
        old: BlockState,
        new: BlockState,
        flags: NotifyFlags,
    ) {
        (**self).notify_block_changed(pos, old, new, flags)
    }

    fn recheck_light(&self, pos: BlockPos) {
        (**self).recheck_light(pos)
    }

    fn light_level(&self, pos: BlockPos) -> u8 {
        (**self).light_level(pos)
    }
}

impl<S: WorldStore + ?Sized> WorldStore for Arc<S> {
    fn load_chunk(&self, pos: ChunkPos) -> Option<ChunkRef> {
        (**self).load_chunk(pos)
    }

    fn notify_block_changed(
        &self,
        pos: BlockPos,
        old: BlockState,
        new: BlockState,
        flags: NotifyFlags,
    ) {
        (**self).notify_block_changed(pos, old, new, flags)
    }

    fn recheck_light(&self, pos: BlockPos) {
        (**self).recheck_light(pos)
    }

    fn light_level(&self, pos: BlockPos) -> u8 {
        (**self).light_level(pos)
    }
}
