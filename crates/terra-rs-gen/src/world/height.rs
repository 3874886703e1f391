use terra_rs_world::{BlockPos, ChunkRefExt, WorldStore};

use super::{local_xz, TerrainWorld};

impl<S: WorldStore> TerrainWorld<S> {
    /// First Y above the top light-blocking block of a column, or `-1` when
    /// the chunk is not reachable.
    ///
    /// Starts from the chunk's height map and walks up past any blocks that
    /// still block light; the host's height map can lag behind block writes.
    /// A corrected column gets one light recheck at the corrected height.
    pub fn highest_block_y(&self, x: i32, z: i32) -> i32 {
        let Some(handle) = self.chunk_at(x, self.config.world.depth, z) else {
            return -1;
        };
        let (lx, lz) = local_xz(x, z);
        let cap = self.height_cap();

        let (y, corrected) = {
            let chunk = handle.read_chunk();
            let start = chunk.height(lx, lz);
            let mut y = start;
            while y < cap && chunk.block(lx, y, lz).blocks_light() {
                y += 1;
            }
            (y, y != start)
        };

        if corrected {
            self.store.recheck_light(BlockPos::new(x, y, z));
        }
        y
    }

    /// One above the highest solid block of a column, or `-1`.
    pub fn solid_height(&self, x: i32, z: i32) -> i32 {
        let top = self.highest_block_y(x, z);
        (1..top)
            .rev()
            .find(|&y| self.material(x, y, z).is_solid())
            .map_or(-1, |y| y + 1)
    }

    /// One above the highest liquid block of a column, or `-1`.
    ///
    /// Scanning steps over air and decorations and stops at the first solid
    /// block, so liquid buried under solid ground is not found.
    pub fn liquid_height(&self, x: i32, z: i32) -> i32 {
        let top = self.highest_block_y(x, z);
        for y in (1..top).rev() {
            let block = self.material(x, y, z);
            if block.is_liquid() {
                return y + 1;
            }
            if block.is_solid() {
                return -1;
            }
        }
        -1
    }
}
