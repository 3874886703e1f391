use terra_rs_world::{ChunkIndex, ChunkPos, ChunkRef, ChunkRefExt, WorldStore};
use tracing::debug;

use super::TerrainWorld;
use crate::biome::Biome;
use crate::error::GenError;

impl<S: WorldStore> TerrainWorld<S> {
    /// Apply biome block replacements to the four chunks anchored at `origin`.
    ///
    /// Does nothing, and asks nothing of the biome source, unless some biome
    /// has replacement settings.
    pub fn replace_blocks(&self, origin: ChunkPos) -> Result<(), GenError> {
        if !self.config.population.biome_configs_have_replacement {
            return Ok(());
        }
        let index = ChunkIndex::new(&self.store);
        let chunks = self
            .window
            .chunk_cache(origin, &index, &self.config)?;
        for handle in chunks.iter().flatten() {
            self.replace_blocks_in_chunk(handle);
        }
        Ok(())
    }

    fn replace_blocks_in_chunk(&self, handle: &ChunkRef) {
        let mut chunk = handle.write_chunk();
        let pos = chunk.pos();
        let (start_x, start_z) = (pos.block_x(), pos.block_z());
        let saved_biomes = *chunk.saved_biomes();
        let mut replaced = 0usize;

        for section in chunk.sections_mut() {
            let y_origin = section.y_origin();
            for lx in 0..16 {
                for lz in 0..16 {
                    let biome = if self.config.population.using_saved_biomes {
                        self.biomes
                            .biome_by_saved_id(saved_biomes[lx * 16 + lz] as u16)
                    } else {
                        self.biomes.biome_by_id_or_none(
                            self.biome_source
                                .biome_at(start_x + lx as i32, start_z + lz as i32),
                        )
                    };
                    let Some(biome) = biome.filter(|b| has_replacements(b)) else {
                        continue;
                    };
                    let table = &biome.config().replaced_blocks;

                    for ly in 0..16 {
                        let block = section.get(lx, ly, lz);
                        let Some(column) = table.column(block.block_id()) else {
                            continue;
                        };
                        let y = y_origin + ly as i32;
                        if y < 0 {
                            continue;
                        }
                        // Columns only extend as far as their highest entry.
                        let Some(&target) = column.get(y as usize) else {
                            break;
                        };
                        if let Some(target) = target {
                            if target.block_id() != block.block_id() {
                                section.set(lx, ly, lz, target);
                                replaced += 1;
                            }
                        }
                    }
                }
            }
        }

        debug!("replaced {replaced} blocks in chunk {pos}");
    }
}

fn has_replacements(biome: &Biome) -> bool {
    biome.config().replaced_blocks.has_replace_settings()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use terra_rs_world::{BlockState, ChunkPos, ChunkRefExt, MemoryWorldStore};

    use super::*;
    use crate::biome::{BiomeConfig, BiomeIds};
    use crate::config::WorldConfig;
    use crate::replace::ReplacementTable;
    use crate::world::test_support::*;

    const PLAINS: u16 = 1;

    /// Stone turns into grass below Y 64.
    fn stone_to_grass() -> BiomeConfig {
        let mut table = ReplacementTable::new();
        table.add(STONE.block_id(), GRASS, 0..64);
        BiomeConfig::new("Plains").with_replacements(table)
    }

    fn world_with(
        store: Arc<MemoryWorldStore>,
        source: CountingBiomeSource,
        config: BiomeConfig,
    ) -> TestWorld {
        let mut world = world_on(store, WorldConfig::default(), source);
        world
            .register_biome(config, BiomeIds::new(PLAINS))
            .unwrap();
        world
    }

    fn fill(store: &MemoryWorldStore, chunk: ChunkPos, blocks: &[(usize, i32, usize, BlockState)]) {
        let handle = store.chunk(chunk).unwrap();
        let mut chunk = handle.write_chunk();
        for &(lx, y, lz, state) in blocks {
            chunk.set_block(lx, y, lz, state);
        }
    }

    fn block(store: &MemoryWorldStore, chunk: ChunkPos, lx: usize, y: i32, lz: usize) -> BlockState {
        store.chunk(chunk).unwrap().read_chunk().block(lx, y, lz)
    }

    #[test]
    fn replaces_only_inside_the_height_range() {
        let store = grid_store(0, 1);
        let source = CountingBiomeSource::new(PLAINS);
        let mut world = world_with(store.clone(), source, stone_to_grass());
        let origin = ChunkPos::new(0, 0);
        fill(&store, origin, &[(1, 30, 1, STONE), (1, 70, 1, STONE), (2, 30, 2, GRASS)]);
        fill(&store, ChunkPos::new(1, 1), &[(5, 5, 5, STONE)]);

        world.start_population(origin).unwrap();
        world.replace_blocks(origin).unwrap();
        world.end_population().unwrap();

        assert_eq!(block(&store, origin, 1, 30, 1), GRASS);
        assert_eq!(block(&store, origin, 1, 70, 1), STONE);
        assert_eq!(block(&store, origin, 2, 30, 2), GRASS);
        assert_eq!(block(&store, ChunkPos::new(1, 1), 5, 5, 5), GRASS);
        // The pass writes sections directly; the host hears nothing.
        assert!(store.changes().is_empty());
    }

    #[test]
    fn disabled_pass_asks_no_biomes() {
        let store = grid_store(0, 1);
        let source = CountingBiomeSource::new(PLAINS);
        let mut world = world_with(store.clone(), source.clone(), BiomeConfig::new("Plains"));
        assert!(!world.config().population.biome_configs_have_replacement);
        fill(&store, ChunkPos::new(0, 0), &[(1, 30, 1, STONE)]);

        world.start_population(ChunkPos::new(0, 0)).unwrap();
        world.replace_blocks(ChunkPos::new(0, 0)).unwrap();

        assert_eq!(source.calls(), 0);
        assert_eq!(block(&store, ChunkPos::new(0, 0), 1, 30, 1), STONE);
    }

    #[test]
    fn biome_source_is_asked_per_column_of_each_section() {
        let store = grid_store(0, 1);
        let source = CountingBiomeSource::new(PLAINS);
        let world = world_with(store.clone(), source.clone(), stone_to_grass());
        fill(&store, ChunkPos::new(0, 0), &[(0, 3, 0, STONE), (0, 40, 0, STONE)]);

        world.replace_blocks(ChunkPos::new(0, 0)).unwrap();
        // Two sections in one chunk, the other three chunks are empty.
        assert_eq!(source.calls(), 2 * 256);
    }

    #[test]
    fn unknown_biome_leaves_the_column_alone() {
        let store = grid_store(0, 1);
        let source = CountingBiomeSource::new(7);
        let world = world_with(store.clone(), source, stone_to_grass());
        fill(&store, ChunkPos::new(0, 0), &[(1, 30, 1, STONE)]);

        world.replace_blocks(ChunkPos::new(0, 0)).unwrap();
        assert_eq!(block(&store, ChunkPos::new(0, 0), 1, 30, 1), STONE);
    }

    #[test]
    fn saved_biomes_come_from_the_chunk() {
        let store = grid_store(0, 1);
        let source = CountingBiomeSource::new(0);
        let mut config = WorldConfig::default();
        config.population.using_saved_biomes = true;
        let mut world = world_on(store.clone(), config, source.clone());
        world
            .register_biome(stone_to_grass(), BiomeIds::new(PLAINS))
            .unwrap();

        let origin = ChunkPos::new(0, 0);
        fill(&store, origin, &[(1, 30, 1, STONE), (2, 30, 2, STONE)]);
        {
            let handle = store.chunk(origin).unwrap();
            handle.write_chunk().set_saved_biome(1, 1, PLAINS as u8);
        }

        world.replace_blocks(origin).unwrap();
        assert_eq!(block(&store, origin, 1, 30, 1), GRASS);
        assert_eq!(block(&store, origin, 2, 30, 2), STONE);
        assert_eq!(source.calls(), 0);
    }

    #[test]
    fn same_id_target_keeps_the_block() {
        let store = grid_store(0, 1);
        let mut table = ReplacementTable::new();
        table.add(STONE.block_id(), BlockState::new(STONE.block_id(), 3), 0..64);
        let config = BiomeConfig::new("Plains").with_replacements(table);
        let world = world_with(store.clone(), CountingBiomeSource::new(PLAINS), config);
        fill(&store, ChunkPos::new(0, 0), &[(1, 30, 1, STONE)]);

        world.replace_blocks(ChunkPos::new(0, 0)).unwrap();
        assert_eq!(block(&store, ChunkPos::new(0, 0), 1, 30, 1), STONE);
    }

    #[test]
    fn short_column_ends_the_section_column() {
        const DIRT: BlockState = BlockState::of(3);
        let store = grid_store(0, 1);
        let mut table = ReplacementTable::new();
        table.add(STONE.block_id(), GRASS, 0..20);
        table.add(DIRT.block_id(), GRASS, 0..64);
        let config = BiomeConfig::new("Plains").with_replacements(table);
        let world = world_with(store.clone(), CountingBiomeSource::new(PLAINS), config);
        let origin = ChunkPos::new(0, 0);
        fill(
            &store,
            origin,
            &[
                (1, 10, 1, STONE),
                (1, 25, 1, STONE),
                (1, 26, 1, DIRT),
                (2, 26, 2, DIRT),
            ],
        );

        world.replace_blocks(origin).unwrap();
        assert_eq!(block(&store, origin, 1, 10, 1), GRASS);
        // Stone at 25 is past its column, so the rest of the section column
        // is skipped, dirt included.
        assert_eq!(block(&store, origin, 1, 25, 1), STONE);
        assert_eq!(block(&store, origin, 1, 26, 1), DIRT);
        assert_eq!(block(&store, origin, 2, 26, 2), GRASS);
    }

    #[test]
    fn mismatched_window_is_rejected() {
        let store = grid_store(0, 3);
        let mut world = world_with(store, CountingBiomeSource::new(PLAINS), stone_to_grass());
        world.start_population(ChunkPos::new(0, 0)).unwrap();
        let err = world.replace_blocks(ChunkPos::new(2, 2)).unwrap_err();
        assert!(matches!(err, GenError::WindowMismatch { .. }));
    }

    #[test]
    fn mismatched_window_without_bounds_check_uses_a_temporary_cache() {
        let store = grid_store(0, 3);
        let mut config = WorldConfig::default();
        config.population.bounds_check = false;
        let mut world = world_on(store.clone(), config, CountingBiomeSource::new(PLAINS));
        world
            .register_biome(stone_to_grass(), BiomeIds::new(PLAINS))
            .unwrap();
        fill(&store, ChunkPos::new(2, 2), &[(0, 0, 0, STONE)]);

        world.start_population(ChunkPos::new(0, 0)).unwrap();
        world.replace_blocks(ChunkPos::new(2, 2)).unwrap();
        assert_eq!(block(&store, ChunkPos::new(2, 2), 0, 0, 0), GRASS);
        assert_eq!(world.population_window().origin(), Some(ChunkPos::new(0, 0)));
    }
}
