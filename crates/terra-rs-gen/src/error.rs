//! Generation-layer errors.
//!
//! Missing chunks, missing sections and out-of-range coordinates are not
//! errors; they degrade to air, no-ops, or `-1`.

use terra_rs_world::ChunkPos;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error(
        "chunk {requested} is already being populated (window at {active}); \
         another generator may be poking in unloaded chunks, set \
         population.bounds_check = false to disable this error"
    )]
    AlreadyPopulating { active: ChunkPos, requested: ChunkPos },

    #[error(
        "no chunk is being populated; another generator may be poking in \
         unloaded chunks, set population.bounds_check = false to disable this error"
    )]
    NotPopulating,

    #[error("population window is anchored at {active}, not at {requested}")]
    WindowMismatch { active: ChunkPos, requested: ChunkPos },

    #[error("biome with id {0} not found")]
    BiomeIdNotFound(u16),

    #[error("biome {name:?} not found, known biomes: {known:?}")]
    BiomeNameNotFound { name: String, known: Vec<String> },

    #[error("no free biome id below {limit}")]
    BiomeIdsExhausted { limit: u16 },

    #[error("biome {0:?} is already registered")]
    DuplicateBiome(String),

    #[error("unknown tree type: {0}")]
    UnknownTreeType(String),

    #[error("invalid world config: {0}")]
    InvalidConfig(String),
}
