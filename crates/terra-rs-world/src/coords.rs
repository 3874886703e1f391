//! Block and chunk coordinates.
//!
//! Chunk coordinates are derived from block coordinates with an arithmetic
//! right shift, which floors towards negative infinity (`-1 >> 4 == -1`).

use serde::{Deserialize, Serialize};

/// Horizontal size of a chunk, in blocks.
pub const CHUNK_SIZE: i32 = 16;

/// Height of a vertical section, in blocks.
pub const SECTION_HEIGHT: i32 = 16;

/// Number of bits to shift a block coordinate by to get its chunk/section index.
pub const CHUNK_SHIFT: i32 = 4;

/// Mask selecting the in-chunk offset of a block coordinate.
pub const LOCAL_MASK: i32 = 0xF;

/// Position of a chunk in chunk units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk containing the block column `(block_x, block_z)`.
    pub const fn from_block(block_x: i32, block_z: i32) -> Self {
        Self {
            x: block_x >> CHUNK_SHIFT,
            z: block_z >> CHUNK_SHIFT,
        }
    }

    /// The chunk `dx` chunks east and `dz` chunks south of this one.
    pub const fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// World X of the chunk's first column.
    pub const fn block_x(self) -> i32 {
        self.x * CHUNK_SIZE
    }

    /// World Z of the chunk's first column.
    pub const fn block_z(self) -> i32 {
        self.z * CHUNK_SIZE
    }

    /// World X of the chunk's center column.
    pub const fn block_x_center(self) -> i32 {
        self.block_x() + CHUNK_SIZE / 2
    }

    /// World Z of the chunk's center column.
    pub const fn block_z_center(self) -> i32 {
        self.block_z() + CHUNK_SIZE / 2
    }
}

impl std::fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.x, self.z)
    }
}

/// Position of a single block in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn chunk(self) -> ChunkPos {
        ChunkPos::from_block(self.x, self.z)
    }

    /// Offset within the owning chunk, each component in `[0, 15]`.
    pub const fn local(self) -> (usize, usize, usize) {
        (
            (self.x & LOCAL_MASK) as usize,
            (self.y & LOCAL_MASK) as usize,
            (self.z & LOCAL_MASK) as usize,
        )
    }

    /// Index of the vertical section covering this block (`y >> 4`).
    pub const fn section_index(self) -> i32 {
        self.y >> CHUNK_SHIFT
    }
}

impl std::fmt::Display for BlockPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
