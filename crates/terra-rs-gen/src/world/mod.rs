//! The world as seen by terrain population.
//!
//! [`TerrainWorld`] wraps a host [`WorldStore`] and routes every block access
//! through the population window. Its behaviour is split by concern:
//!
//! - `population`: starting and ending the window
//! - `access`: reading and writing single blocks
//! - `height`: column height queries
//! - `replace`: the biome block replacement pass
//! - `features`: trees, structures and dungeons
//!
//! A `TerrainWorld` is driven by a single generation worker. The window is
//! only mutated through `&mut self`, so generators, which get a
//! `&dyn LocalWorld`, cannot start or end population themselves.

mod access;
mod features;
mod height;
mod population;
mod replace;

#[cfg(test)]
pub(crate) mod test_support;

use terra_rs_world::{BlockState, ChunkIndex, ChunkRef, ChunkRefExt, WorldStore};

use crate::biome::{Biome, BiomeConfig, BiomeIds, BiomeRegistry, BiomeSource};
use crate::config::WorldConfig;
use crate::error::GenError;
use crate::structures::StructureRegistry;
use crate::trees::TreeRegistry;
use crate::window::PopulationWindow;

/// Block-level world access for generators.
pub trait LocalWorld {
    fn name(&self) -> &str;
    fn seed(&self) -> u64;
    /// Generation stops below this Y.
    fn height_cap(&self) -> i32;

    fn material(&self, x: i32, y: i32, z: i32) -> BlockState;
    fn set_block(&self, x: i32, y: i32, z: i32, state: BlockState);
    fn is_empty(&self, x: i32, y: i32, z: i32) -> bool;
    fn is_loaded(&self, x: i32, y: i32, z: i32) -> bool;

    fn highest_block_y(&self, x: i32, z: i32) -> i32;
    fn solid_height(&self, x: i32, z: i32) -> i32;
    fn liquid_height(&self, x: i32, z: i32) -> i32;

    fn light_level(&self, x: i32, y: i32, z: i32) -> u8;
    fn biome(&self, x: i32, z: i32) -> Option<&Biome>;
}

/// A world being populated, on top of a host chunk store.
pub struct TerrainWorld<S> {
    name: String,
    config: WorldConfig,
    store: S,
    biomes: BiomeRegistry,
    biome_source: Box<dyn BiomeSource>,
    window: PopulationWindow,
    trees: TreeRegistry,
    structures: StructureRegistry,
}

impl<S: WorldStore> TerrainWorld<S> {
    pub fn new(
        name: impl Into<String>,
        config: WorldConfig,
        store: S,
        biome_source: impl BiomeSource + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            config,
            store,
            biomes: BiomeRegistry::default(),
            biome_source: Box::new(biome_source),
            window: PopulationWindow::new(),
            trees: TreeRegistry::new(),
            structures: StructureRegistry::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn biomes(&self) -> &BiomeRegistry {
        &self.biomes
    }

    pub fn trees_mut(&mut self) -> &mut TreeRegistry {
        &mut self.trees
    }

    pub fn structures_mut(&mut self) -> &mut StructureRegistry {
        &mut self.structures
    }

    /// Register a biome. Registering one with replacement settings turns the
    /// replacement pass on.
    pub fn register_biome(
        &mut self,
        config: BiomeConfig,
        requested: BiomeIds,
    ) -> Result<BiomeIds, GenError> {
        let has_replacement = config.replaced_blocks.has_replace_settings();
        let ids = self.biomes.register(config, requested)?;
        if has_replacement {
            self.config.population.biome_configs_have_replacement = true;
        }
        Ok(ids)
    }

    fn index(&self) -> ChunkIndex<'_, S> {
        ChunkIndex::new(&self.store)
    }

    /// Chunk containing `(x, y, z)`, subject to the window policy.
    fn chunk_at(&self, x: i32, y: i32, z: i32) -> Option<ChunkRef> {
        self.window.lookup(x, y, z, &self.index(), &self.config)
    }

    /// Biome calculated by the biome source for a column.
    pub fn calculated_biome(&self, x: i32, z: i32) -> Option<&Biome> {
        self.biomes
            .biome_by_id_or_none(self.biome_source.biome_at(x, z))
    }

    /// Biome stored in the chunk for a column. Ignores the window.
    pub fn saved_biome(&self, x: i32, z: i32) -> Option<&Biome> {
        let handle = self.index().load_direct(ChunkIndex::<S>::resolve(x, z))?;
        let (lx, lz) = local_xz(x, z);
        let saved = handle.read_chunk().saved_biome(lx, lz);
        self.biomes.biome_by_saved_id(saved as u16)
    }

    /// Saved or calculated biome, as configured.
    pub fn biome(&self, x: i32, z: i32) -> Option<&Biome> {
        if self.config.population.using_saved_biomes {
            self.saved_biome(x, z)
        } else {
            self.calculated_biome(x, z)
        }
    }

    pub fn height_cap(&self) -> i32 {
        self.config.world.height_cap
    }
}

impl<S: WorldStore> LocalWorld for TerrainWorld<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn seed(&self) -> u64 {
        self.config.world.seed
    }

    fn height_cap(&self) -> i32 {
        TerrainWorld::height_cap(self)
    }

    fn material(&self, x: i32, y: i32, z: i32) -> BlockState {
        TerrainWorld::material(self, x, y, z)
    }

    fn set_block(&self, x: i32, y: i32, z: i32, state: BlockState) {
        TerrainWorld::set_block(self, x, y, z, state)
    }

    fn is_empty(&self, x: i32, y: i32, z: i32) -> bool {
        TerrainWorld::is_empty(self, x, y, z)
    }

    fn is_loaded(&self, x: i32, y: i32, z: i32) -> bool {
        TerrainWorld::is_loaded(self, x, y, z)
    }

    fn highest_block_y(&self, x: i32, z: i32) -> i32 {
        TerrainWorld::highest_block_y(self, x, z)
    }

    fn solid_height(&self, x: i32, z: i32) -> i32 {
        TerrainWorld::solid_height(self, x, z)
    }

    fn liquid_height(&self, x: i32, z: i32) -> i32 {
        TerrainWorld::liquid_height(self, x, z)
    }

    fn light_level(&self, x: i32, y: i32, z: i32) -> u8 {
        TerrainWorld::light_level(self, x, y, z)
    }

    fn biome(&self, x: i32, z: i32) -> Option<&Biome> {
        TerrainWorld::biome(self, x, z)
    }
}

/// In-chunk column coordinates of a world position.
#[inline]
pub(crate) fn local_xz(x: i32, z: i32) -> (usize, usize) {
    ((x & 15) as usize, (z & 15) as usize)
}
