// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The index correction table mapping data indices to grid cells.

use smallvec::SmallVec;

/// One remap entry: every index at or past `visual_threshold` shifts by
/// `correction` grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrectionEntry {
    /// Visual index the correction takes effect at.
    pub visual_threshold: i64,
    /// Number of cells skipped there.
    pub correction: i64,
}

/// A small ordered remap between *actual* (data) indices and *visual*
/// (grid-cell) indices.
///
/// A calendar view may leave cells without backing data: leading blanks
/// before the first day of a month, or a skip run where an alternate
/// calendar omits days. The table holds at most two entries (one for the
/// leading offset, one for a skip run), kept ascending by threshold.
///
/// [`actual_to_visual`](Self::actual_to_visual) applies each entry whose
/// threshold the running index has reached;
/// [`visual_to_actual`](Self::visual_to_actual) un-applies them in reverse
/// order, and is the exact inverse for every visual index that names a real
/// cell. Visual indices inside a blank run have no preimage; converting one
/// yields the index of a nearby cell (leading blanks map below zero, which
/// callers clamp).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexCorrectionTable {
    entries: SmallVec<[CorrectionEntry; 2]>,
}

impl IndexCorrectionTable {
    /// An empty table; the identity mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shifts the whole collection `offset` cells into the grid (leading
    /// blanks). Replaces any previous leading offset.
    pub fn set_leading_offset(&mut self, offset: usize) {
        self.entries.retain(|entry| entry.visual_threshold != 0);
        if offset > 0 {
            self.entries.push(CorrectionEntry {
                visual_threshold: 0,
                correction: offset as i64,
            });
        }
        self.entries.sort_by_key(|entry| entry.visual_threshold);
    }

    /// Skips `skipped` cells starting at `visual_index`. Replaces any
    /// previous skip run.
    pub fn set_skip(&mut self, visual_index: usize, skipped: usize) {
        debug_assert!(visual_index > 0, "a skip at zero is a leading offset");
        self.entries.retain(|entry| entry.visual_threshold == 0);
        if skipped > 0 {
            self.entries.push(CorrectionEntry {
                visual_threshold: visual_index as i64,
                correction: skipped as i64,
            });
        }
        self.entries.sort_by_key(|entry| entry.visual_threshold);
    }

    /// Removes all corrections.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns `true` if the table is the identity mapping.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maps a data index to its grid cell.
    #[must_use]
    pub fn actual_to_visual(&self, actual_index: i64) -> i64 {
        let mut visual = actual_index;
        for entry in &self.entries {
            if visual >= entry.visual_threshold {
                visual += entry.correction;
            }
        }
        visual
    }

    /// Maps a grid cell back to its data index; the inverse of
    /// [`actual_to_visual`](Self::actual_to_visual) for cells with backing
    /// data.
    #[must_use]
    pub fn visual_to_actual(&self, visual_index: i64) -> i64 {
        let mut actual = visual_index;
        for entry in self.entries.iter().rev() {
            if actual >= entry.visual_threshold {
                actual -= entry.correction;
            }
        }
        actual
    }
}

#[cfg(test)]
mod tests {
    use super::IndexCorrectionTable;

    fn month_with_skip() -> IndexCorrectionTable {
        // Three leading blanks, then a two-cell skip at visual index 10.
        let mut table = IndexCorrectionTable::new();
        table.set_leading_offset(3);
        table.set_skip(10, 2);
        table
    }

    #[test]
    fn worked_example_from_both_directions() {
        let table = month_with_skip();
        assert_eq!(table.actual_to_visual(0), 3);
        // Actual 8 crosses the skip: 8 + 3 leading, then + 2 skipped.
        assert_eq!(table.actual_to_visual(8), 13);
        assert_eq!(table.visual_to_actual(3), 0);
        assert_eq!(table.visual_to_actual(13), 8);
    }

    #[test]
    fn round_trip_holds_for_every_actual_index() {
        let table = month_with_skip();
        for actual in 0..200 {
            let visual = table.actual_to_visual(actual);
            assert_eq!(
                table.visual_to_actual(visual),
                actual,
                "round trip failed at actual {actual}"
            );
        }
    }

    #[test]
    fn entries_stay_ordered_regardless_of_set_order() {
        let mut table = IndexCorrectionTable::new();
        table.set_skip(10, 2);
        table.set_leading_offset(3);
        assert_eq!(table, month_with_skip());
    }

    #[test]
    fn replacing_an_entry_does_not_accumulate() {
        let mut table = IndexCorrectionTable::new();
        table.set_leading_offset(5);
        table.set_leading_offset(3);
        assert_eq!(table.actual_to_visual(0), 3);

        table.set_skip(10, 4);
        table.set_skip(10, 2);
        assert_eq!(table.actual_to_visual(8), 13);
    }

    #[test]
    fn empty_table_is_the_identity() {
        let table = IndexCorrectionTable::new();
        assert!(table.is_empty());
        for index in [0, 1, 7, 100] {
            assert_eq!(table.actual_to_visual(index), index);
            assert_eq!(table.visual_to_actual(index), index);
        }
    }

    #[test]
    fn clearing_an_offset_by_zero_removes_the_entry() {
        let mut table = IndexCorrectionTable::new();
        table.set_leading_offset(3);
        table.set_leading_offset(0);
        assert!(table.is_empty());
    }

    #[test]
    fn leading_blanks_invert_below_zero() {
        let mut table = IndexCorrectionTable::new();
        table.set_leading_offset(3);
        // Cells before the first day have no data; the inverse lands below
        // zero so callers can clamp.
        assert!(table.visual_to_actual(0) < 0);
    }
}
