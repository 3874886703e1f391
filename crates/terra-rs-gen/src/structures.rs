//! Default structure dispatch.
//!
//! Structure layouts are provided by the host. This module only decides which
//! generators run, in which order, and whether they run at all.

use std::collections::BTreeMap;

use rand::RngCore;
use terra_rs_world::{BlockPos, ChunkPos};

use crate::config::StructuresSection;
use crate::feature::Feature;
use crate::world::LocalWorld;

/// The built-in structure families, in placement order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StructureKind {
    Stronghold,
    Mineshaft,
    Village,
    RareBuilding,
    NetherFortress,
    OceanMonument,
}

impl StructureKind {
    pub const ALL: [StructureKind; 6] = [
        StructureKind::Stronghold,
        StructureKind::Mineshaft,
        StructureKind::Village,
        StructureKind::RareBuilding,
        StructureKind::NetherFortress,
        StructureKind::OceanMonument,
    ];
}

/// A structure family's generator.
pub trait StructureGenerator {
    /// Work out which structures start near `chunk`, without placing blocks.
    fn prepare(&self, world: &dyn LocalWorld, chunk: ChunkPos) {
        let _ = (world, chunk);
    }

    /// Place the parts of prepared structures that fall inside the
    /// population window anchored at `chunk`. Returns whether anything was placed.
    fn generate(&self, world: &dyn LocalWorld, rng: &mut dyn RngCore, chunk: ChunkPos) -> bool;
}

/// Structure generators keyed by kind, plus the dungeon feature.
#[derive(Default)]
pub struct StructureRegistry {
    generators: BTreeMap<StructureKind, Box<dyn StructureGenerator>>,
    dungeon: Option<Box<dyn Feature>>,
}

impl StructureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: StructureKind, generator: Box<dyn StructureGenerator>) {
        self.generators.insert(kind, generator);
    }

    pub fn set_dungeon(&mut self, dungeon: Box<dyn Feature>) {
        self.dungeon = Some(dungeon);
    }

    pub fn contains(&self, kind: StructureKind) -> bool {
        self.generators.contains_key(&kind)
    }

    /// Run `prepare` for every enabled kind. Villages are only prepared on a
    /// dry run.
    pub fn prepare_all(
        &self,
        world: &dyn LocalWorld,
        enabled: &StructuresSection,
        chunk: ChunkPos,
        dry: bool,
    ) {
        for (&kind, generator) in &self.generators {
            if !enabled.is_enabled(kind) || (kind == StructureKind::Village && !dry) {
                continue;
            }
            generator.prepare(world, chunk);
        }
    }

    /// Run `generate` for every enabled kind. Returns whether a village was placed.
    pub fn place_all(
        &self,
        world: &dyn LocalWorld,
        enabled: &StructuresSection,
        rng: &mut dyn RngCore,
        chunk: ChunkPos,
    ) -> bool {
        let mut village_placed = false;
        for (&kind, generator) in &self.generators {
            if !enabled.is_enabled(kind) {
                continue;
            }
            let placed = generator.generate(world, rng, chunk);
            if kind == StructureKind::Village {
                village_placed = placed;
            }
        }
        village_placed
    }

    /// Place a dungeon at `pos`, if a dungeon feature is registered.
    pub fn place_dungeon(&self, world: &dyn LocalWorld, rng: &mut dyn RngCore, pos: BlockPos) -> bool {
        match &self.dungeon {
            Some(dungeon) => dungeon.place(world, rng, pos),
            None => false,
        }
    }
}
