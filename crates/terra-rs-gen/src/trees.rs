//! Tree type dispatch.
//!
//! Tree shapes are provided by the host as [`Feature`]s registered per
//! [`TreeType`]. Several types may share one generator.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use rand::RngCore;
use terra_rs_world::BlockPos;
use tracing::warn;

use crate::error::GenError;
use crate::feature::{Feature, RandomChoice};
use crate::world::LocalWorld;

/// Tree types that biome configurations can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TreeType {
    Tree,
    BigTree,
    Forest,
    Birch,
    TallBirch,
    HugeMushroom,
    HugeRedMushroom,
    HugeBrownMushroom,
    SwampTree,
    Taiga1,
    Taiga2,
    JungleTree,
    GroundBush,
    CocoaTree,
    Acacia,
    DarkOak,
    HugeTaiga1,
    HugeTaiga2,
}

impl TreeType {
    pub const ALL: [TreeType; 18] = [
        TreeType::Tree,
        TreeType::BigTree,
        TreeType::Forest,
        TreeType::Birch,
        TreeType::TallBirch,
        TreeType::HugeMushroom,
        TreeType::HugeRedMushroom,
        TreeType::HugeBrownMushroom,
        TreeType::SwampTree,
        TreeType::Taiga1,
        TreeType::Taiga2,
        TreeType::JungleTree,
        TreeType::GroundBush,
        TreeType::CocoaTree,
        TreeType::Acacia,
        TreeType::DarkOak,
        TreeType::HugeTaiga1,
        TreeType::HugeTaiga2,
    ];

    /// Name as written in biome configurations.
    pub fn name(self) -> &'static str {
        match self {
            TreeType::Tree => "Tree",
            TreeType::BigTree => "BigTree",
            TreeType::Forest => "Forest",
            TreeType::Birch => "Birch",
            TreeType::TallBirch => "TallBirch",
            TreeType::HugeMushroom => "HugeMushroom",
            TreeType::HugeRedMushroom => "HugeRedMushroom",
            TreeType::HugeBrownMushroom => "HugeBrownMushroom",
            TreeType::SwampTree => "SwampTree",
            TreeType::Taiga1 => "Taiga1",
            TreeType::Taiga2 => "Taiga2",
            TreeType::JungleTree => "JungleTree",
            TreeType::GroundBush => "GroundBush",
            TreeType::CocoaTree => "CocoaTree",
            TreeType::Acacia => "Acacia",
            TreeType::DarkOak => "DarkOak",
            TreeType::HugeTaiga1 => "HugeTaiga1",
            TreeType::HugeTaiga2 => "HugeTaiga2",
        }
    }
}

impl std::fmt::Display for TreeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TreeType {
    type Err = GenError;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TreeType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GenError::UnknownTreeType(s.to_string()))
    }
}

/// Tree generators keyed by tree type.
#[derive(Default)]
pub struct TreeRegistry {
    generators: BTreeMap<TreeType, Arc<dyn Feature>>,
}

impl TreeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the generator for a tree type, returning the one it replaces.
    pub fn register(&mut self, tree: TreeType, generator: Arc<dyn Feature>) -> Option<Arc<dyn Feature>> {
        self.generators.insert(tree, generator)
    }

    /// Make `tree` use the generator already registered for `target`.
    pub fn register_alias(&mut self, tree: TreeType, target: TreeType) -> bool {
        match self.generators.get(&target).cloned() {
            Some(generator) => {
                self.generators.insert(tree, generator);
                true
            }
            None => false,
        }
    }

    /// Make `tree` pick between the generators of `first` and `second` at random.
    pub fn register_either(&mut self, tree: TreeType, first: TreeType, second: TreeType) -> bool {
        let (Some(a), Some(b)) = (
            self.generators.get(&first).cloned(),
            self.generators.get(&second).cloned(),
        ) else {
            return false;
        };
        self.generators
            .insert(tree, Arc::new(RandomChoice::new(a, b)));
        true
    }

    pub fn contains(&self, tree: TreeType) -> bool {
        self.generators.contains_key(&tree)
    }

    /// Registered tree types, in declaration order.
    pub fn types(&self) -> impl Iterator<Item = TreeType> + '_ {
        self.generators.keys().copied()
    }

    /// Place a tree. A type without a generator places nothing.
    pub fn place(
        &self,
        tree: TreeType,
        world: &dyn LocalWorld,
        rng: &mut dyn RngCore,
        pos: BlockPos,
    ) -> bool {
        match self.generators.get(&tree) {
            Some(generator) => generator.place(world, rng, pos),
            None => {
                warn!("no generator registered for tree type {tree}");
                false
            }
        }
    }
}
