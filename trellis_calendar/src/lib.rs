// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trellis_calendar --heading-base-level=0

//! Trellis Calendar: fixed-grid layout for calendar-style collection views.
//!
//! [`CalendarLayout`] lays a non-grouped collection into a fixed
//! rows-by-columns grid whose cells exactly fill the viewport, like the
//! month view of a calendar. Because every cell is uniform, placement and
//! estimation are exact; no running averages are involved.
//!
//! The interesting part is sparseness: a calendar month rarely starts on
//! the first cell of its row, and some calendars omit days entirely. An
//! [`IndexCorrectionTable`] records a leading offset and at most one skip
//! run, mapping each *actual* (data) index to its *visual* (grid-cell)
//! index and back. All row and column math runs in visual space; indices
//! convert back at the API boundary.
//!
//! ```rust
//! use trellis_calendar::IndexCorrectionTable;
//!
//! // A month whose first day falls on the fourth column.
//! let mut table = IndexCorrectionTable::new();
//! table.set_leading_offset(3);
//! assert_eq!(table.actual_to_visual(0), 3);
//! assert_eq!(table.visual_to_actual(3), 0);
//! ```

mod correction;
mod strategy;

pub use correction::{CorrectionEntry, IndexCorrectionTable};
pub use strategy::CalendarLayout;

#[cfg(test)]
pub(crate) mod testing;
