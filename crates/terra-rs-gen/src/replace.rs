//! Per-biome block replacement tables.

use std::ops::Range;

use terra_rs_world::BlockState;

/// Height-indexed replacement targets for one source block id.
pub type ReplacementColumn = Vec<Option<BlockState>>;

/// Maps a source block id to the block that replaces it at each absolute Y.
///
/// A column shorter than the world means "no replacement" above its end.
#[derive(Debug, Clone, Default)]
pub struct ReplacementTable {
    /// Indexed by source block id.
    columns: Vec<Option<ReplacementColumn>>,
}

impl ReplacementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace blocks with id `from` by `to` for every Y in `ys`.
    ///
    /// Negative heights cannot be indexed and are ignored.
    pub fn add(&mut self, from: u16, to: BlockState, ys: Range<i32>) -> &mut Self {
        let start = ys.start.max(0) as usize;
        let end = ys.end.max(0) as usize;
        if start >= end {
            return self;
        }
        let column = self.column_entry(from);
        if column.len() < end {
            column.resize(end, None);
        }
        column[start..end].fill(Some(to));
        self
    }

    /// Install a complete column for `from`, replacing any existing one.
    pub fn set_column(&mut self, from: u16, column: ReplacementColumn) -> &mut Self {
        *self.column_entry(from) = column;
        self
    }

    fn column_entry(&mut self, from: u16) -> &mut ReplacementColumn {
        let idx = from as usize;
        if self.columns.len() <= idx {
            self.columns.resize(idx + 1, None);
        }
        self.columns[idx].get_or_insert_with(Vec::new)
    }

    /// Replacement column for a source block id.
    #[inline]
    pub fn column(&self, from: u16) -> Option<&[Option<BlockState>]> {
        self.columns.get(from as usize)?.as_deref()
    }

    /// Whether any source id has a non-empty column.
    pub fn has_replace_settings(&self) -> bool {
        self.columns
            .iter()
            .flatten()
            .any(|column| !column.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STONE: u16 = 1;
    const GRASS: BlockState = BlockState::of(2);

    #[test]
    fn empty_table_has_no_settings() {
        let table = ReplacementTable::new();
        assert!(!table.has_replace_settings());
        assert!(table.column(STONE).is_none());
    }

    #[test]
    fn add_fills_range_only() {
        let mut table = ReplacementTable::new();
        table.add(STONE, GRASS, 10..20);
        let column = table.column(STONE).unwrap();
        assert_eq!(column.len(), 20);
        assert_eq!(column[9], None);
        assert_eq!(column[10], Some(GRASS));
        assert_eq!(column[19], Some(GRASS));
        assert!(table.has_replace_settings());
    }

    #[test]
    fn later_ranges_override_earlier_ones() {
        let mut table = ReplacementTable::new();
        table
            .add(STONE, GRASS, 0..64)
            .add(STONE, BlockState::of(3), 32..40);
        let column = table.column(STONE).unwrap();
        assert_eq!(column[31], Some(GRASS));
        assert_eq!(column[32], Some(BlockState::of(3)));
        assert_eq!(column[40], Some(GRASS));
        assert_eq!(column.len(), 64);
    }

    #[test]
    fn negative_and_empty_ranges_are_ignored() {
        let mut table = ReplacementTable::new();
        table.add(STONE, GRASS, -16..0);
        table.add(STONE, GRASS, 5..5);
        assert!(table.column(STONE).is_none());
        assert!(!table.has_replace_settings());
    }

    #[test]
    fn empty_column_is_not_a_setting() {
        let mut table = ReplacementTable::new();
        table.set_column(STONE, Vec::new());
        assert!(table.column(STONE).is_some());
        assert!(!table.has_replace_settings());
    }

    #[test]
    fn unrelated_ids_have_no_column() {
        let mut table = ReplacementTable::new();
        table.add(12, GRASS, 0..10);
        assert!(table.column(11).is_none());
        assert!(table.column(500).is_none());
    }
}
