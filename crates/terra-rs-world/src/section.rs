//! Dense 16x16x16 block storage.

use crate::block::BlockState;
use crate::coords::SECTION_HEIGHT;

/// Number of blocks in one section.
pub const SECTION_VOLUME: usize = 16 * 16 * 16;

/// A 16x16x16 cube of block states starting at `y_origin`.
///
/// Blocks are stored in XZY order, `(x*16 + z)*16 + y`, so a column of one
/// section is contiguous in memory.
#[derive(Clone)]
pub struct VerticalSection {
    y_origin: i32,
    blocks: Box<[BlockState]>,
    non_air: u16,
}

impl std::fmt::Debug for VerticalSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerticalSection")
            .field("y_origin", &self.y_origin)
            .field("non_air", &self.non_air)
            .finish()
    }
}

#[inline]
fn block_index(x: usize, y: usize, z: usize) -> usize {
    debug_assert!(x < 16 && y < 16 && z < 16);
    (x * 16 + z) * 16 + y
}

impl VerticalSection {
    /// An all-air section. `y_origin` must be a multiple of 16.
    pub fn new(y_origin: i32) -> Self {
        debug_assert_eq!(y_origin.rem_euclid(SECTION_HEIGHT), 0);
        Self {
            y_origin,
            blocks: vec![BlockState::AIR; SECTION_VOLUME].into_boxed_slice(),
            non_air: 0,
        }
    }

    /// A section filled entirely with a single block.
    pub fn new_filled(y_origin: i32, state: BlockState) -> Self {
        let mut section = Self::new(y_origin);
        if !state.is_air() {
            section.blocks.fill(state);
            section.non_air = SECTION_VOLUME as u16;
        }
        section
    }

    /// World Y of the section's lowest layer.
    pub fn y_origin(&self) -> i32 {
        self.y_origin
    }

    /// Whether every block in the section is air.
    pub fn is_empty(&self) -> bool {
        self.non_air == 0
    }

    /// Block at local coordinates, each in `[0, 15]`.
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> BlockState {
        self.blocks[block_index(x, y, z)]
    }

    /// Replace the block at local coordinates, returning the previous state.
    pub fn set(&mut self, x: usize, y: usize, z: usize, state: BlockState) -> BlockState {
        let slot = &mut self.blocks[block_index(x, y, z)];
        let old = std::mem::replace(slot, state);
        match (old.is_air(), state.is_air()) {
            (true, false) => self.non_air += 1,
            (false, true) => self.non_air -= 1,
            _ => {}
        }
        old
    }
}
