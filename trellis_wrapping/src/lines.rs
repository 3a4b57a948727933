// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The 2D line decomposition every wrapping computation is built on.

use kurbo::Rect;

use trellis_core::{GroupHeaderStrategy, LayoutDataProvider};

use crate::WrappingLayout;

/// Hard ceiling on stacking lines, guarding against degenerate (for example
/// infinite) window constraints.
const MAX_STACKING_LINES: f64 = 50000.0;

/// An index-in-group split into grid coordinates.
///
/// For `index` in a group laid out `lines_per_stack` per line:
/// `virtualizing_line * lines_per_stack + stacking_line == index`, with
/// `0 <= stacking_line < lines_per_stack`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineInfo {
    /// How many cells fit per line along the stacking axis.
    pub lines_per_stack: usize,
    /// Which line along the virtualizing axis the index falls on.
    pub virtualizing_line: usize,
    /// Position within that line, along the stacking axis.
    pub stacking_line: usize,
}

impl<P: LayoutDataProvider> WrappingLayout<P> {
    /// How many cells fit per line within `window`, after padding and any
    /// parallel header reservation; at least 1, capped by the configured
    /// maximum and an absolute ceiling.
    #[must_use]
    pub fn max_stacking_line(&self, window: Rect) -> usize {
        debug_assert!(
            (!self.base.is_grouping() || self.header_size.is_some()) && self.cell_size_set,
            "line math requires a cell size (and a header size when grouped)"
        );
        let ax = self.base.axes();

        let mut available = ax.cross_extent(window);
        available -= ax.cross_size(self.base.group_padding_at_start())
            + ax.cross_size(self.base.group_padding_at_end());
        if self.base.group_header_strategy() == GroupHeaderStrategy::Parallel {
            available -= self.header_cross();
        }
        available = available.max(0.0);

        // The window may be infinite, so stay in floating point until the
        // ceiling has been applied.
        let mut lines = available / ax.cross_size(self.cell_size);
        lines = lines.max(1.0);
        if let Some(cap) = self.max_rows_or_columns {
            lines = lines.min(cap as f64);
        }
        lines = lines.min(MAX_STACKING_LINES);

        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "clamped into [1, 50000] above"
        )]
        let lines = lines as usize;
        lines
    }

    /// Splits `index_in_group` into grid coordinates within `window`.
    #[must_use]
    pub fn line_info(&self, window: Rect, index_in_group: usize) -> LineInfo {
        let lines_per_stack = self.max_stacking_line(window);
        LineInfo {
            lines_per_stack,
            virtualizing_line: index_in_group / lines_per_stack,
            stacking_line: index_in_group % lines_per_stack,
        }
    }

    /// Stacking-axis origin of a cell on `stacking_line`: padding, any
    /// parallel header, then whole cells.
    pub(crate) fn item_stacking_position(&self, stacking_line: usize) -> f64 {
        debug_assert!(self.cell_size_set, "stacking positions require a cell size");
        let ax = self.base.axes();
        let mut position = stacking_line as f64 * ax.cross_size(self.cell_size);
        position += ax.cross_size(self.base.group_padding_at_start());
        if self.base.group_header_strategy() == GroupHeaderStrategy::Parallel {
            debug_assert!(self.header_size.is_some(), "parallel layout without a header size");
            position += self.header_cross();
        }
        position
    }

    /// Rough cell capacity of a window, rounding partial rows and columns
    /// up. Zero until a usable cell size is known.
    #[must_use]
    pub fn items_per_page(&self, window: Rect) -> f64 {
        if !self.cell_size_set
            || !(self.cell_size.width > 0.0)
            || !(self.cell_size.height > 0.0)
            || !self.cell_size.width.is_finite()
            || !self.cell_size.height.is_finite()
        {
            return 0.0;
        }
        let rows = (window.height() / self.cell_size.height).ceil();
        let cols = (window.width() / self.cell_size.width).ceil();
        rows * cols
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use trellis_core::Orientation;

    use crate::WrappingLayout;
    use crate::testing::StubData;

    fn grid() -> WrappingLayout<StubData> {
        let mut layout = WrappingLayout::new(StubData::flat(100));
        layout.set_virtualization_direction(Orientation::Vertical);
        layout.set_item_width(Some(100.0));
        layout.set_item_height(Some(50.0));
        layout
    }

    #[test]
    fn decomposition_identity_holds_for_all_indices() {
        let layout = grid();
        let window = Rect::new(0.0, 0.0, 300.0, 600.0);
        for index in 0..100 {
            let info = layout.line_info(window, index);
            assert_eq!(info.lines_per_stack, 3);
            assert_eq!(
                info.virtualizing_line * info.lines_per_stack + info.stacking_line,
                index,
                "decomposition must reassemble the index"
            );
            assert!(info.stacking_line < info.lines_per_stack);
        }
    }

    #[test]
    fn three_wide_vertical_grid_decomposes_index_seven() {
        let layout = grid();
        let window = Rect::new(0.0, 0.0, 300.0, 600.0);
        let info = layout.line_info(window, 7);
        assert_eq!(info.virtualizing_line, 2);
        assert_eq!(info.stacking_line, 1);
        // Origin follows directly: one cell across, two lines down.
        assert_eq!(layout.item_stacking_position(info.stacking_line), 100.0);
    }

    #[test]
    fn max_stacking_line_floors_and_clamps() {
        let mut layout = grid();

        // 3.9 columns floor to 3.
        assert_eq!(layout.max_stacking_line(Rect::new(0.0, 0.0, 390.0, 600.0)), 3);
        // A window narrower than one cell still yields one line.
        assert_eq!(layout.max_stacking_line(Rect::new(0.0, 0.0, 40.0, 600.0)), 1);
        // The explicit maximum wins over the window.
        layout.set_maximum_rows_or_columns(Some(2));
        assert_eq!(layout.max_stacking_line(Rect::new(0.0, 0.0, 390.0, 600.0)), 2);
        // An infinite window hits the absolute ceiling.
        layout.set_maximum_rows_or_columns(None);
        let infinite = Rect::new(0.0, 0.0, f64::INFINITY, 600.0);
        assert_eq!(layout.max_stacking_line(infinite), 50000);
    }

    #[test]
    fn items_per_page_rounds_partial_lines_up() {
        let layout = grid();
        // 2.5 columns, 4.4 rows -> 3 * 5.
        assert_eq!(layout.items_per_page(Rect::new(0.0, 0.0, 250.0, 220.0)), 15.0);
    }
}
