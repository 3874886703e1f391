//! Biome registry and id allocation.
//!
//! Each registered biome carries a generation id (what the biome generator
//! produces) and a saved id (what ends up in chunk data). Ids handed out for
//! custom biomes come from a [`BiomeIdAllocator`] owned by the registry.

use std::collections::{BTreeMap, HashMap};

use tracing::info;

use crate::error::GenError;
use crate::replace::ReplacementTable;

pub type BiomeId = u16;

/// Total number of biome generation ids.
pub const MAX_BIOMES_COUNT: BiomeId = 1024;

/// Number of ids that fit in chunk biome data.
pub const MAX_SAVED_BIOMES_COUNT: BiomeId = 255;

/// Ids below this are reserved for the built-in biomes.
pub const DEFAULT_BIOME_COUNT: BiomeId = 40;

/// Generation and saved id of a biome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BiomeIds {
    pub generation_id: BiomeId,
    pub saved_id: BiomeId,
}

impl BiomeIds {
    /// Ids of a biome that is saved under its own generation id.
    pub const fn new(id: BiomeId) -> Self {
        Self {
            generation_id: id,
            saved_id: id,
        }
    }

    pub const fn with_saved_id(generation_id: BiomeId, saved_id: BiomeId) -> Self {
        Self {
            generation_id,
            saved_id,
        }
    }

    /// Whether the biome is saved as a different biome.
    pub const fn is_virtual(self) -> bool {
        self.generation_id != self.saved_id
    }
}

impl std::fmt::Display for BiomeIds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_virtual() {
            write!(f, "{}=>{}", self.generation_id, self.saved_id)
        } else {
            write!(f, "{}", self.generation_id)
        }
    }
}

/// Settings of one biome that the generation layer consumes.
#[derive(Debug, Clone)]
pub struct BiomeConfig {
    pub name: String,
    pub replaced_blocks: ReplacementTable,
}

impl BiomeConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            replaced_blocks: ReplacementTable::new(),
        }
    }

    pub fn with_replacements(mut self, table: ReplacementTable) -> Self {
        self.replaced_blocks = table;
        self
    }
}

/// A registered biome.
#[derive(Debug, Clone)]
pub struct Biome {
    ids: BiomeIds,
    config: BiomeConfig,
}

impl Biome {
    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn ids(&self) -> BiomeIds {
        self.ids
    }

    pub fn config(&self) -> &BiomeConfig {
        &self.config
    }

    /// Whether the biome was registered above the built-in id range.
    pub fn is_custom(&self) -> bool {
        self.ids.generation_id >= DEFAULT_BIOME_COUNT
    }
}

impl std::fmt::Display for Biome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.name(), self.ids)
    }
}

/// Calculates the biome of a world column (the biome generator).
pub trait BiomeSource {
    fn biome_at(&self, x: i32, z: i32) -> BiomeId;
}

impl<F: Fn(i32, i32) -> BiomeId> BiomeSource for F {
    fn biome_at(&self, x: i32, z: i32) -> BiomeId {
        self(x, z)
    }
}

/// Hands out increasing biome ids up to a limit.
#[derive(Debug, Clone)]
pub struct BiomeIdAllocator {
    next: BiomeId,
    limit: BiomeId,
}

impl BiomeIdAllocator {
    pub fn new(first_free: BiomeId, limit: BiomeId) -> Self {
        Self {
            next: first_free,
            limit,
        }
    }

    /// Next unused id, or `None` once the limit is reached.
    pub fn allocate(&mut self) -> Option<BiomeId> {
        if self.next >= self.limit {
            return None;
        }
        let id = self.next;
        self.next += 1;
        Some(id)
    }

    /// The id the next call to `allocate` would return.
    pub fn peek(&self) -> BiomeId {
        self.next
    }
}

/// All biomes of one world, by generation id, saved id and name.
pub struct BiomeRegistry {
    biomes: BTreeMap<BiomeId, Biome>,
    by_saved_id: HashMap<BiomeId, BiomeId>,
    by_name: HashMap<String, BiomeId>,
    allocator: BiomeIdAllocator,
}

impl Default for BiomeRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_BIOME_COUNT)
    }
}

impl BiomeRegistry {
    /// Create an empty registry whose allocator starts at `first_free_id`.
    pub fn new(first_free_id: BiomeId) -> Self {
        Self {
            biomes: BTreeMap::new(),
            by_saved_id: HashMap::new(),
            by_name: HashMap::new(),
            allocator: BiomeIdAllocator::new(first_free_id, MAX_BIOMES_COUNT),
        }
    }

    pub fn max_biomes_count(&self) -> BiomeId {
        MAX_BIOMES_COUNT
    }

    pub fn max_saved_biomes_count(&self) -> BiomeId {
        MAX_SAVED_BIOMES_COUNT
    }

    /// Allocate an id that no registered biome uses.
    pub fn free_biome_id(&mut self) -> Result<BiomeId, GenError> {
        loop {
            match self.allocator.allocate() {
                Some(id) if self.biomes.contains_key(&id) => continue,
                Some(id) => return Ok(id),
                None => {
                    return Err(GenError::BiomeIdsExhausted {
                        limit: MAX_BIOMES_COUNT,
                    })
                }
            }
        }
    }

    /// Register a biome, preferring the requested ids.
    ///
    /// When the requested generation id is taken or out of range, a free one is
    /// allocated. A non-virtual biome is then saved under the allocated id.
    pub fn register(&mut self, config: BiomeConfig, requested: BiomeIds) -> Result<BiomeIds, GenError> {
        if self.by_name.contains_key(&config.name) {
            return Err(GenError::DuplicateBiome(config.name));
        }

        let requested_id = requested.generation_id;
        let generation_id =
            if requested_id < MAX_BIOMES_COUNT && !self.biomes.contains_key(&requested_id) {
                requested_id
            } else {
                self.free_biome_id()?
            };
        if generation_id != requested_id {
            info!(
                "Asked to register {} with id {}, but succeeded with id {}",
                config.name, requested_id, generation_id
            );
        }

        let saved_id = if requested.is_virtual() {
            requested.saved_id
        } else {
            generation_id
        };
        let ids = BiomeIds::with_saved_id(generation_id, saved_id);

        self.by_saved_id.entry(saved_id).or_insert(generation_id);
        self.by_name.insert(config.name.clone(), generation_id);
        self.biomes.insert(generation_id, Biome { ids, config });
        Ok(ids)
    }

    pub fn biome_by_id(&self, id: BiomeId) -> Result<&Biome, GenError> {
        self.biome_by_id_or_none(id)
            .ok_or(GenError::BiomeIdNotFound(id))
    }

    pub fn biome_by_id_or_none(&self, id: BiomeId) -> Option<&Biome> {
        self.biomes.get(&id)
    }

    /// Biome stored in chunk data under `saved_id`.
    pub fn biome_by_saved_id(&self, saved_id: BiomeId) -> Option<&Biome> {
        self.by_saved_id
            .get(&saved_id)
            .and_then(|id| self.biomes.get(id))
    }

    pub fn biome_by_name(&self, name: &str) -> Result<&Biome, GenError> {
        self.by_name
            .get(name)
            .and_then(|id| self.biomes.get(id))
            .ok_or_else(|| GenError::BiomeNameNotFound {
                name: name.to_string(),
                known: self.biomes.values().map(|b| b.name().to_string()).collect(),
            })
    }

    /// Whether any registered biome defines a block replacement.
    pub fn has_any_replacement(&self) -> bool {
        self.biomes
            .values()
            .any(|b| b.config.replaced_blocks.has_replace_settings())
    }

    /// Registered biomes in generation id order.
    pub fn iter(&self) -> impl Iterator<Item = &Biome> {
        self.biomes.values()
    }

    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }
}
