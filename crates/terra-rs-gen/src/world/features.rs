use rand::RngCore;
use terra_rs_world::{BlockPos, ChunkPos, WorldStore};
use tracing::trace;

use super::TerrainWorld;
use crate::trees::TreeType;

impl<S: WorldStore> TerrainWorld<S> {
    /// Grow a tree of the given type with its base at `(x, y, z)`.
    pub fn place_tree(&self, tree: TreeType, rng: &mut dyn RngCore, x: i32, y: i32, z: i32) -> bool {
        self.trees.place(tree, self, rng, BlockPos::new(x, y, z))
    }

    pub fn place_dungeon(&self, rng: &mut dyn RngCore, x: i32, y: i32, z: i32) -> bool {
        self.structures
            .place_dungeon(self, rng, BlockPos::new(x, y, z))
    }

    /// Let the enabled structure generators plan around `chunk`.
    ///
    /// Villages are only planned on a dry run, since planning them places
    /// nothing but still decides where they go.
    pub fn prepare_default_structures(&self, chunk: ChunkPos, dry: bool) {
        trace!("preparing structures around {chunk} (dry: {dry})");
        self.structures
            .prepare_all(self, &self.config.structures, chunk, dry);
    }

    /// Place the enabled structures for the window anchored at `chunk`.
    /// Returns whether a village was placed.
    pub fn place_default_structures(&self, rng: &mut dyn RngCore, chunk: ChunkPos) -> bool {
        self.structures
            .place_all(self, &self.config.structures, rng, chunk)
    }
}
