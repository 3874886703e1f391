//! Terrain population: the population window, height queries, block access,
//! biome block replacement and feature dispatch on top of a host chunk store.

pub mod biome;
pub mod config;
pub mod error;
pub mod feature;
pub mod replace;
pub mod structures;
pub mod trees;
pub mod window;
pub mod world;

pub use biome::{Biome, BiomeConfig, BiomeId, BiomeIds, BiomeRegistry, BiomeSource};
pub use config::WorldConfig;
pub use error::GenError;
pub use feature::Feature;
pub use replace::ReplacementTable;
pub use structures::{StructureGenerator, StructureKind, StructureRegistry};
pub use trees::{TreeRegistry, TreeType};
pub use window::{PopulationWindow, PopulationWindowState};
pub use world::{LocalWorld, TerrainWorld};
