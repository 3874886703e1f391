use serde::Deserialize;
use std::path::Path;

use terra_rs_world::coords::SECTION_HEIGHT;

use crate::error::GenError;
use crate::structures::StructureKind;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorldConfig {
    #[serde(default)]
    pub world: WorldSection,
    #[serde(default)]
    pub population: PopulationSection,
    #[serde(default)]
    pub structures: StructuresSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorldSection {
    #[serde(default)]
    pub seed: u64,
    /// Lowest Y that generation may touch.
    #[serde(default)]
    pub depth: i32,
    /// One past the highest Y that generation may touch.
    #[serde(default = "default_height")]
    pub height: i32,
    /// Upper bound for the height map correction in `highest_block_y`.
    #[serde(default = "default_height")]
    pub height_cap: i32,
}

fn default_height() -> i32 {
    256
}

impl Default for WorldSection {
    fn default() -> Self {
        Self {
            seed: 0,
            depth: 0,
            height: default_height(),
            height_cap: default_height(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PopulationSection {
    /// Fail on start/end misuse and deny reads outside the 2x2 window.
    #[serde(default = "default_true")]
    pub bounds_check: bool,
    /// Read biomes from chunk data instead of the biome generator.
    #[serde(default)]
    pub using_saved_biomes: bool,
    /// Whether any biome defines block replacements.
    #[serde(default)]
    pub biome_configs_have_replacement: bool,
}

fn default_true() -> bool {
    true
}

impl Default for PopulationSection {
    fn default() -> Self {
        Self {
            bounds_check: true,
            using_saved_biomes: false,
            biome_configs_have_replacement: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StructuresSection {
    #[serde(default = "default_true")]
    pub strongholds: bool,
    #[serde(default = "default_true")]
    pub mineshafts: bool,
    #[serde(default = "default_true")]
    pub villages: bool,
    #[serde(default = "default_true")]
    pub rare_buildings: bool,
    #[serde(default = "default_true")]
    pub nether_fortresses: bool,
    #[serde(default = "default_true")]
    pub ocean_monuments: bool,
}

impl Default for StructuresSection {
    fn default() -> Self {
        Self {
            strongholds: true,
            mineshafts: true,
            villages: true,
            rare_buildings: true,
            nether_fortresses: true,
            ocean_monuments: true,
        }
    }
}

impl StructuresSection {
    pub fn is_enabled(&self, kind: StructureKind) -> bool {
        match kind {
            StructureKind::Stronghold => self.strongholds,
            StructureKind::Mineshaft => self.mineshafts,
            StructureKind::Village => self.villages,
            StructureKind::RareBuilding => self.rare_buildings,
            StructureKind::NetherFortress => self.nether_fortresses,
            StructureKind::OceanMonument => self.ocean_monuments,
        }
    }
}

impl WorldConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the vertical bounds describe a non-empty, section-aligned range.
    pub fn validate(&self) -> Result<(), GenError> {
        let world = &self.world;
        if world.height <= world.depth {
            return Err(GenError::InvalidConfig(format!(
                "world height {} must be above world depth {}",
                world.height, world.depth
            )));
        }
        if world.depth.rem_euclid(SECTION_HEIGHT) != 0 {
            return Err(GenError::InvalidConfig(format!(
                "world depth {} is not a multiple of {SECTION_HEIGHT}",
                world.depth
            )));
        }
        if world.height_cap > world.height {
            return Err(GenError::InvalidConfig(format!(
                "height cap {} exceeds world height {}",
                world.height_cap, world.height
            )));
        }
        Ok(())
    }

    /// Whether `y` lies in `[depth, height)`.
    pub fn in_vertical_bounds(&self, y: i32) -> bool {
        y >= self.world.depth && y < self.world.height
    }
}
