//! Block states and the static block property table.
//!
//! A [`BlockState`] is a numeric block id plus a 4-bit data value. Everything
//! the generation layer needs to know about a block (solidity, liquid-ness,
//! light behaviour) is looked up from the id. Unknown ids default to a solid,
//! fully opaque, non-emitting block.

use serde::{Deserialize, Serialize};

/// Light opacity of a block that lets no light through.
pub const FULLY_OPAQUE: u8 = 255;

/// Classification of a block's material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    Air,
    Liquid,
    /// Occupies space but does not stop movement or light (flowers, torches).
    Decoration,
    Solid,
}

/// Properties for a single block id.
#[derive(Debug, Clone)]
pub struct BlockInfo {
    pub id: u16,
    /// Namespaced block identifier, e.g. `"minecraft:stone"`.
    pub name: &'static str,
    pub kind: MaterialKind,
    /// Light level emitted by the block, `0..=15`.
    pub light_emission: u8,
    /// How much light the block absorbs, `0..=255`.
    pub light_opacity: u8,
}

/// A block id plus its data value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockState {
    id: u16,
    data: u8,
}

impl Default for BlockState {
    fn default() -> Self {
        Self::AIR
    }
}

impl BlockState {
    pub const AIR: BlockState = BlockState { id: 0, data: 0 };

    pub const fn new(id: u16, data: u8) -> Self {
        Self {
            id,
            data: data & 0xF,
        }
    }

    /// A state with data value 0.
    pub const fn of(id: u16) -> Self {
        Self { id, data: 0 }
    }

    /// Look up the default state of a block by name.
    pub fn by_name(name: &str) -> Option<Self> {
        BLOCK_DATA
            .iter()
            .find(|info| info.name == name)
            .map(|info| Self::of(info.id))
    }

    /// The block id, used as the key into replacement tables.
    pub const fn block_id(self) -> u16 {
        self.id
    }

    pub const fn data(self) -> u8 {
        self.data
    }

    /// Property table entry for this block, or `None` for unknown ids.
    pub fn info(self) -> Option<&'static BlockInfo> {
        block_info(self.id)
    }

    fn kind(self) -> MaterialKind {
        self.info().map(|info| info.kind).unwrap_or(MaterialKind::Solid)
    }

    pub fn is_air(self) -> bool {
        self.id == 0
    }

    pub fn is_liquid(self) -> bool {
        self.kind() == MaterialKind::Liquid
    }

    pub fn is_solid(self) -> bool {
        self.kind() == MaterialKind::Solid
    }

    /// Whether the material stops light, as used by height map maintenance.
    pub fn blocks_light(self) -> bool {
        self.is_solid()
    }

    pub fn light_emission(self) -> u8 {
        self.info().map(|info| info.light_emission).unwrap_or(0)
    }

    pub fn light_opacity(self) -> u8 {
        self.info()
            .map(|info| info.light_opacity)
            .unwrap_or(FULLY_OPAQUE)
    }
}

impl std::fmt::Display for BlockState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.info() {
            Some(info) if self.data == 0 => write!(f, "{}", info.name),
            Some(info) => write!(f, "{}:{}", info.name, self.data),
            None => write!(f, "{}:{}", self.id, self.data),
        }
    }
}

/// Look up the property table entry for a block id.
pub fn block_info(id: u16) -> Option<&'static BlockInfo> {
    BLOCK_DATA
        .binary_search_by_key(&id, |info| info.id)
        .ok()
        .map(|idx| &BLOCK_DATA[idx])
}

// Helper macro to reduce boilerplate in the data array.
macro_rules! block {
    ($id:expr, $name:expr, $kind:ident, $opacity:expr) => {
        block!($id, $name, $kind, $opacity, 0)
    };
    ($id:expr, $name:expr, $kind:ident, $opacity:expr, $emission:expr) => {
        BlockInfo {
            id: $id,
            name: $name,
            kind: MaterialKind::$kind,
            light_emission: $emission,
            light_opacity: $opacity,
        }
    };
}

/// Block property table, sorted by id.
static BLOCK_DATA: &[BlockInfo] = &[
    block!(0, "minecraft:air", Air, 0),
    block!(1, "minecraft:stone", Solid, 255),
    block!(2, "minecraft:grass", Solid, 255),
    block!(3, "minecraft:dirt", Solid, 255),
    block!(4, "minecraft:cobblestone", Solid, 255),
    block!(5, "minecraft:planks", Solid, 255),
    block!(6, "minecraft:sapling", Decoration, 0),
    block!(7, "minecraft:bedrock", Solid, 255),
    block!(8, "minecraft:flowing_water", Liquid, 3),
    block!(9, "minecraft:water", Liquid, 3),
    block!(10, "minecraft:flowing_lava", Liquid, 0, 15),
    block!(11, "minecraft:lava", Liquid, 0, 15),
    block!(12, "minecraft:sand", Solid, 255),
    block!(13, "minecraft:gravel", Solid, 255),
    block!(14, "minecraft:gold_ore", Solid, 255),
    block!(15, "minecraft:iron_ore", Solid, 255),
    block!(16, "minecraft:coal_ore", Solid, 255),
    block!(17, "minecraft:log", Solid, 255),
    block!(18, "minecraft:leaves", Solid, 1),
    block!(20, "minecraft:glass", Solid, 0),
    block!(24, "minecraft:sandstone", Solid, 255),
    block!(31, "minecraft:tallgrass", Decoration, 0),
    block!(32, "minecraft:deadbush", Decoration, 0),
    block!(37, "minecraft:yellow_flower", Decoration, 0),
    block!(38, "minecraft:red_flower", Decoration, 0),
    block!(39, "minecraft:brown_mushroom", Decoration, 0, 1),
    block!(40, "minecraft:red_mushroom", Decoration, 0),
    block!(48, "minecraft:mossy_cobblestone", Solid, 255),
    block!(49, "minecraft:obsidian", Solid, 255),
    block!(50, "minecraft:torch", Decoration, 0, 14),
    block!(52, "minecraft:mob_spawner", Solid, 0),
    block!(54, "minecraft:chest", Solid, 0),
    block!(56, "minecraft:diamond_ore", Solid, 255),
    block!(73, "minecraft:redstone_ore", Solid, 255),
    block!(78, "minecraft:snow_layer", Decoration, 0),
    block!(79, "minecraft:ice", Solid, 3),
    block!(80, "minecraft:snow", Solid, 255),
    block!(81, "minecraft:cactus", Solid, 0),
    block!(82, "minecraft:clay", Solid, 255),
    block!(83, "minecraft:reeds", Decoration, 0),
    block!(86, "minecraft:pumpkin", Solid, 255),
    block!(87, "minecraft:netherrack", Solid, 255),
    block!(88, "minecraft:soul_sand", Solid, 255),
    block!(89, "minecraft:glowstone", Solid, 255, 15),
    block!(91, "minecraft:lit_pumpkin", Solid, 255, 15),
    block!(97, "minecraft:monster_egg", Solid, 255),
    block!(98, "minecraft:stonebrick", Solid, 255),
    block!(99, "minecraft:brown_mushroom_block", Solid, 255),
    block!(100, "minecraft:red_mushroom_block", Solid, 255),
    block!(106, "minecraft:vine", Decoration, 0),
    block!(110, "minecraft:mycelium", Solid, 255),
    block!(111, "minecraft:waterlily", Decoration, 0),
    block!(112, "minecraft:nether_brick", Solid, 255),
    block!(121, "minecraft:end_stone", Solid, 255),
    block!(127, "minecraft:cocoa", Decoration, 0),
    block!(129, "minecraft:emerald_ore", Solid, 255),
    block!(159, "minecraft:stained_hardened_clay", Solid, 255),
    block!(161, "minecraft:leaves2", Solid, 1),
    block!(162, "minecraft:log2", Solid, 255),
    block!(168, "minecraft:prismarine", Solid, 255),
    block!(169, "minecraft:sea_lantern", Solid, 255, 15),
    block!(172, "minecraft:hardened_clay", Solid, 255),
    block!(174, "minecraft:packed_ice", Solid, 255),
    block!(175, "minecraft:double_plant", Decoration, 0),
    block!(179, "minecraft:red_sandstone", Solid, 255),
];
