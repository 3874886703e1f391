//! Chunk columns and shared chunk handles.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::block::BlockState;
use crate::coords::{ChunkPos, CHUNK_SHIFT, SECTION_HEIGHT};
use crate::section::VerticalSection;

/// Number of columns in a chunk.
pub const COLUMN_COUNT: usize = 16 * 16;

/// A chunk as handed out by a [`WorldStore`](crate::store::WorldStore).
///
/// The store owns the chunk; holders of a `ChunkRef` only borrow it for as
/// long as they keep the handle.
pub type ChunkRef = Arc<RwLock<Chunk>>;

/// Lock helpers that recover from a poisoned lock instead of panicking.
pub trait ChunkRefExt {
    fn read_chunk(&self) -> RwLockReadGuard<'_, Chunk>;
    fn write_chunk(&self) -> RwLockWriteGuard<'_, Chunk>;
}

impl ChunkRefExt for ChunkRef {
    fn read_chunk(&self) -> RwLockReadGuard<'_, Chunk> {
        self.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_chunk(&self) -> RwLockWriteGuard<'_, Chunk> {
        self.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A full chunk column: optional vertical sections plus per-column metadata.
#[derive(Debug, Clone)]
pub struct Chunk {
    pos: ChunkPos,
    /// Section index (`y >> 4`) of `sections[0]`.
    min_section: i32,
    sections: Vec<Option<VerticalSection>>,
    /// First Y above the highest block with non-zero light opacity, per column (`lx*16 + lz`).
    height_map: [i32; COLUMN_COUNT],
    /// Saved biome id per column (`lx*16 + lz`).
    biomes: [u8; COLUMN_COUNT],
}

#[inline]
fn column_index(lx: usize, lz: usize) -> usize {
    debug_assert!(lx < 16 && lz < 16);
    lx * 16 + lz
}

impl Chunk {
    /// An all-air chunk covering `[min_y, min_y + height)`.
    ///
    /// `min_y` and `height` are rounded outwards to whole sections.
    pub fn new(pos: ChunkPos, min_y: i32, height: i32) -> Self {
        let min_section = min_y >> CHUNK_SHIFT;
        let max_section = (min_y + height - 1) >> CHUNK_SHIFT;
        let count = (max_section - min_section + 1).max(0) as usize;
        Self {
            pos,
            min_section,
            sections: (0..count).map(|_| None).collect(),
            height_map: [min_y; COLUMN_COUNT],
            biomes: [0; COLUMN_COUNT],
        }
    }

    /// Wrap this chunk in a shared handle.
    pub fn into_ref(self) -> ChunkRef {
        Arc::new(RwLock::new(self))
    }

    pub fn pos(&self) -> ChunkPos {
        self.pos
    }

    /// Lowest Y covered by the section slots.
    pub fn min_y(&self) -> i32 {
        self.min_section * SECTION_HEIGHT
    }

    /// One past the highest Y covered by the section slots.
    pub fn max_y(&self) -> i32 {
        (self.min_section + self.sections.len() as i32) * SECTION_HEIGHT
    }

    fn slot(&self, y: i32) -> Option<usize> {
        let idx = (y >> CHUNK_SHIFT) - self.min_section;
        (idx >= 0 && (idx as usize) < self.sections.len()).then_some(idx as usize)
    }

    /// Section covering world Y `y`, if present.
    pub fn section(&self, y: i32) -> Option<&VerticalSection> {
        self.slot(y).and_then(|idx| self.sections[idx].as_ref())
    }

    /// Mutable section covering world Y `y`, if present.
    pub fn section_mut(&mut self, y: i32) -> Option<&mut VerticalSection> {
        self.slot(y).and_then(|idx| self.sections[idx].as_mut())
    }

    /// All section slots, bottom to top.
    pub fn sections(&self) -> &[Option<VerticalSection>] {
        &self.sections
    }

    /// Present sections, bottom to top.
    pub fn sections_mut(&mut self) -> impl Iterator<Item = &mut VerticalSection> {
        self.sections.iter_mut().flatten()
    }

    /// Block at in-chunk `lx`/`lz` and world `y`. Missing sections read as air.
    pub fn block(&self, lx: usize, y: i32, lz: usize) -> BlockState {
        match self.section(y) {
            Some(section) => section.get(lx, (y & 0xF) as usize, lz),
            None => BlockState::AIR,
        }
    }

    /// Write a block, creating the section if needed.
    ///
    /// Returns the previous state, or `None` when `y` is outside the chunk.
    /// Writing air into a missing section allocates nothing.
    pub fn set_block(&mut self, lx: usize, y: i32, lz: usize, state: BlockState) -> Option<BlockState> {
        let idx = self.slot(y)?;
        let slot = &mut self.sections[idx];
        if slot.is_none() && state.is_air() {
            return Some(BlockState::AIR);
        }
        let section = slot.get_or_insert_with(|| VerticalSection::new(y & !0xF));
        Some(section.set(lx, (y & 0xF) as usize, lz, state))
    }

    /// Height map value for a column.
    pub fn height(&self, lx: usize, lz: usize) -> i32 {
        self.height_map[column_index(lx, lz)]
    }

    pub fn set_height(&mut self, lx: usize, lz: usize, y: i32) {
        self.height_map[column_index(lx, lz)] = y;
    }

    /// Recompute every column's height map value from the block data.
    pub fn recalculate_height_map(&mut self) {
        let min_y = self.min_y();
        for lx in 0..16 {
            for lz in 0..16 {
                let top = (min_y..self.max_y())
                    .rev()
                    .find(|&y| self.block(lx, y, lz).light_opacity() > 0)
                    .map(|y| y + 1)
                    .unwrap_or(min_y);
                self.height_map[column_index(lx, lz)] = top;
            }
        }
    }

    /// Saved biome ids of all columns (`lx*16 + lz`).
    pub fn saved_biomes(&self) -> &[u8; COLUMN_COUNT] {
        &self.biomes
    }

    /// Saved biome id for a column.
    pub fn saved_biome(&self, lx: usize, lz: usize) -> u8 {
        self.biomes[column_index(lx, lz)]
    }

    pub fn set_saved_biome(&mut self, lx: usize, lz: usize, biome: u8) {
        self.biomes[column_index(lx, lz)] = biome;
    }

    /// Set the saved biome of every column.
    pub fn fill_saved_biomes(&mut self, biome: u8) {
        self.biomes.fill(biome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STONE: BlockState = BlockState::of(1);

    #[test]
    fn new_chunk_has_no_sections() {
        let chunk = Chunk::new(ChunkPos::new(2, -3), 0, 256);
        assert_eq!(chunk.sections().len(), 16);
        assert!(chunk.sections().iter().all(Option::is_none));
        assert_eq!(chunk.min_y(), 0);
        assert_eq!(chunk.max_y(), 256);
        assert_eq!(chunk.block(3, 100, 4), BlockState::AIR);
    }

    #[test]
    fn negative_min_y() {
        let chunk = Chunk::new(ChunkPos::new(0, 0), -64, 384);
        assert_eq!(chunk.sections().len(), 24);
        assert_eq!(chunk.min_y(), -64);
        assert_eq!(chunk.max_y(), 320);
    }

    #[test]
    fn set_block_allocates_section() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0), 0, 256);
        assert_eq!(chunk.set_block(1, 40, 2, STONE), Some(BlockState::AIR));
        let section = chunk.section(40).unwrap();
        assert_eq!(section.y_origin(), 32);
        assert_eq!(chunk.block(1, 40, 2), STONE);
    }

    #[test]
    fn air_write_does_not_allocate() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0), 0, 256);
        assert_eq!(chunk.set_block(1, 40, 2, BlockState::AIR), Some(BlockState::AIR));
        assert!(chunk.section(40).is_none());
    }

    #[test]
    fn out_of_range_write_is_rejected() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0), 0, 256);
        assert_eq!(chunk.set_block(0, 256, 0, STONE), None);
        assert_eq!(chunk.set_block(0, -1, 0, STONE), None);
    }

    #[test]
    fn height_map_recalculation() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0), 0, 256);
        for y in 0..=63 {
            chunk.set_block(4, y, 5, STONE);
        }
        // Water absorbs some light, so it counts for the height map.
        chunk.set_block(4, 64, 5, BlockState::of(9));
        // Glass lets all light through and does not.
        chunk.set_block(4, 70, 5, BlockState::of(20));
        chunk.recalculate_height_map();
        assert_eq!(chunk.height(4, 5), 65);
        assert_eq!(chunk.height(0, 0), 0);
    }

    #[test]
    fn saved_biomes() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0), 0, 256);
        chunk.fill_saved_biomes(4);
        chunk.set_saved_biome(15, 0, 7);
        assert_eq!(chunk.saved_biome(0, 0), 4);
        assert_eq!(chunk.saved_biome(15, 0), 7);
    }

    #[test]
    fn shared_handle_roundtrip() {
        let handle = Chunk::new(ChunkPos::new(1, 1), 0, 256).into_ref();
        handle.write_chunk().set_block(0, 0, 0, STONE);
        assert_eq!(handle.read_chunk().block(0, 0, 0), STONE);
        assert_eq!(handle.read_chunk().pos(), ChunkPos::new(1, 1));
    }
}
