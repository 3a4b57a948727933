// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The calendar strategy: a fixed rows-by-columns grid over a sparse index
//! remap.

use kurbo::{Insets, Point, Rect, Size};

use trellis_core::{
    BoundaryEdges, DataSourceError, ElementId, ElementKind, EstimationReference, IndexSearchHint,
    LayoutDataProvider, LayoutReference, LayoutStrategy, NavigationAction, Orientation,
    PointSearchResult, ReferenceIdentity, RegularSnapPoints, StrategyBase, clamp_index, floor_div,
};

use crate::IndexCorrectionTable;

/// Fixed-grid calendar layout over a virtualized, non-grouped collection.
///
/// Every cell is uniform and the grid is `rows x columns`, so placement and
/// estimation are exact. The twist is sparseness: some visual cells have no
/// backing data (leading blanks before the first day, skip runs for
/// alternate calendars), described by an [`IndexCorrectionTable`]. All
/// row/column math runs in visual-index space and converts back at the
/// edges.
///
/// The cell size is derived from the viewport so the grid exactly fills it,
/// never below a configured minimum;
/// [`set_viewport_size`](Self::set_viewport_size) and
/// [`set_item_minimum_size`](Self::set_item_minimum_size) report whether the
/// cell actually changed so hosts can avoid spurious remeasure loops.
#[derive(Debug)]
pub struct CalendarLayout<P> {
    provider: P,
    base: StrategyBase,
    rows: usize,
    columns: usize,
    viewport_size: Size,
    minimum_cell_size: Size,
    cell_size: Size,
    cell_size_set: bool,
    correction: IndexCorrectionTable,
}

impl<P> CalendarLayout<P> {
    /// Creates a calendar layout over `provider` with vertical
    /// virtualization and a 1x1 grid.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            base: StrategyBase::new(),
            rows: 1,
            columns: 1,
            viewport_size: Size::ZERO,
            minimum_cell_size: Size::ZERO,
            cell_size: Size::new(1.0, 1.0),
            cell_size_set: false,
            correction: IndexCorrectionTable::new(),
        }
    }

    /// Sets the scroll direction. Must not change once queries have begun.
    pub fn set_virtualization_direction(&mut self, orientation: Orientation) {
        self.base.set_virtualization_direction(orientation);
    }

    /// Sets the padding around the grid.
    pub fn set_group_padding(&mut self, padding: Insets) {
        self.base.set_group_padding(padding);
    }

    /// Sets the grid shape. Dimensions are clamped to at least one cell,
    /// and the cell size is rederived from the viewport.
    pub fn set_grid_dimensions(&mut self, rows: usize, columns: usize) {
        self.rows = rows.max(1);
        self.columns = columns.max(1);
        self.recompute_cell_size();
    }

    /// Sets the viewport the grid must exactly fill. Returns `true` when
    /// the derived cell size changed and a remeasure is needed.
    #[must_use]
    pub fn set_viewport_size(&mut self, viewport: Size) -> bool {
        self.viewport_size = viewport;
        self.recompute_cell_size()
    }

    /// Sets the floor for the derived cell size. Returns `true` when the
    /// cell size changed and a remeasure is needed.
    #[must_use]
    pub fn set_item_minimum_size(&mut self, minimum: Size) -> bool {
        self.minimum_cell_size = minimum;
        self.recompute_cell_size()
    }

    /// The remap between data indices and grid cells.
    #[must_use]
    pub fn index_correction_table(&self) -> &IndexCorrectionTable {
        &self.correction
    }

    /// Mutable access to the remap, for the host to describe leading blanks
    /// and skip runs.
    pub fn index_correction_table_mut(&mut self) -> &mut IndexCorrectionTable {
        &mut self.correction
    }

    /// The current cell size. Meaningful once a viewport or minimum is set.
    #[must_use]
    pub const fn cell_size(&self) -> Size {
        self.cell_size
    }

    /// Shared access to the data provider.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable access to the data provider.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Cells per line along the stacking axis: columns when scrolling
    /// vertically, rows when scrolling horizontally.
    #[must_use]
    pub fn stacking_lines(&self) -> usize {
        match self.base.virtualization_direction() {
            Orientation::Vertical => self.columns,
            Orientation::Horizontal => self.rows,
        }
    }

    /// Derives the cell size that exactly fills the viewport, floored at
    /// the configured minimum and at 1x1. Returns whether it changed.
    fn recompute_cell_size(&mut self) -> bool {
        let mut cell = Size::new(
            self.viewport_size.width / self.columns as f64,
            self.viewport_size.height / self.rows as f64,
        );
        if !cell.width.is_finite() {
            cell.width = 0.0;
        }
        if !cell.height.is_finite() {
            cell.height = 0.0;
        }
        cell.width = cell.width.max(self.minimum_cell_size.width).max(1.0);
        cell.height = cell.height.max(self.minimum_cell_size.height).max(1.0);

        let changed = cell != self.cell_size;
        self.cell_size = cell;
        self.cell_size_set = self.cell_size_set
            || self.viewport_size.width > 0.0
            || self.viewport_size.height > 0.0
            || self.minimum_cell_size.width > 0.0
            || self.minimum_cell_size.height > 0.0;
        changed
    }
}

impl<P: LayoutDataProvider> CalendarLayout<P> {
    /// Exact bounds of the cell backing `actual_index`.
    fn cell_bounds(&self, actual_index: i64) -> Rect {
        let ax = self.base.axes();
        let lines = self.stacking_lines() as i64;
        debug_assert!(lines > 0, "grid dimensions degenerated");

        let visual = self.correction.actual_to_visual(actual_index);
        let virtualizing_line = visual.div_euclid(lines);
        let stacking_line = visual.rem_euclid(lines);

        let main = ax.main_size(self.base.group_padding_at_start())
            + virtualizing_line as f64 * ax.main_size(self.cell_size);
        let cross = ax.cross_size(self.base.group_padding_at_start())
            + stacking_line as f64 * ax.cross_size(self.cell_size);
        Rect::from_origin_size(ax.point(main, cross), self.cell_size)
    }

    /// Smallest actual index whose cell is at or past `visual`.
    fn actual_at_or_after_visual(&self, visual: i64) -> i64 {
        let mut actual = self.correction.visual_to_actual(visual);
        // Corrections are tiny (a leading run and one skip), so these walks
        // terminate after at most a few steps.
        while actual > 0 && self.correction.actual_to_visual(actual - 1) >= visual {
            actual -= 1;
        }
        while self.correction.actual_to_visual(actual) < visual {
            actual += 1;
        }
        actual
    }

    /// Largest actual index whose cell is at or before `visual`.
    fn actual_at_or_before_visual(&self, visual: i64) -> i64 {
        let mut actual = self.correction.visual_to_actual(visual);
        while self.correction.actual_to_visual(actual) > visual {
            actual -= 1;
        }
        while self.correction.actual_to_visual(actual + 1) <= visual {
            actual += 1;
        }
        actual
    }

    /// Number of grid cells spanned by the collection, blanks included.
    fn visual_cell_count(&self, total_items: usize) -> i64 {
        if total_items == 0 {
            return 0;
        }
        self.correction.actual_to_visual(total_items as i64 - 1) + 1
    }
}

impl<P: LayoutDataProvider> LayoutStrategy for CalendarLayout<P> {
    fn element_measure_size(&self, kind: ElementKind, _index: Option<usize>, _window: Rect) -> Size {
        debug_assert!(kind == ElementKind::Item, "calendars have no group headers");
        if self.cell_size_set {
            self.cell_size
        } else {
            Size::new(f64::INFINITY, f64::INFINITY)
        }
    }

    fn element_bounds(
        &mut self,
        element: ElementId,
        _measured_size: Size,
        _reference: &LayoutReference,
        _window: Rect,
    ) -> Result<Rect, DataSourceError> {
        // Uniform cells make placement exact; the reference is not needed.
        debug_assert!(
            element.kind() == ElementKind::Item,
            "calendars have no group headers"
        );
        Ok(self.cell_bounds(element.index() as i64))
    }

    fn element_arrange_bounds(
        &self,
        element: ElementId,
        bounds: Rect,
        _window: Rect,
        _final_size: Size,
    ) -> Result<Rect, DataSourceError> {
        // Cells arrange exactly where they measured. Placeholder cells
        // (indices past the item count) are parked far offscreen by the
        // host, so only real indices are checked.
        let total_items = self.provider.total_item_count()?;
        if element.index() < total_items {
            debug_assert!(
                bounds == self.cell_bounds(element.index() as i64),
                "arrange bounds diverged from measured cell bounds"
            );
        }
        Ok(bounds)
    }

    fn should_continue_filling_up_space(
        &self,
        element: ElementId,
        reference: &LayoutReference,
        window: Rect,
    ) -> Result<bool, DataSourceError> {
        let ax = self.base.axes();
        let lines = self.stacking_lines() as i64;

        if reference.relation == ReferenceIdentity::Myself {
            return Ok(true);
        }

        let visual = self.correction.actual_to_visual(element.index() as i64);
        let stacking_line = visual.rem_euclid(lines);

        let result = if reference.relation == ReferenceIdentity::BeforeMe {
            if stacking_line == 0 {
                // Opening a new line.
                ax.main_end(window) > ax.main_end(reference.bounds)
            } else {
                ax.main_end(window) > ax.main_origin(reference.bounds)
            }
        } else if stacking_line == lines - 1 {
            // Closing the previous line.
            ax.main_origin(window) < ax.main_origin(reference.bounds)
        } else {
            ax.main_origin(window)
                < ax.main_origin(reference.bounds) + ax.main_size(self.cell_size)
        };
        Ok(result)
    }

    fn position_of_first_element(&self) -> Point {
        self.base.position_of_first_element()
    }

    fn estimate_element_index(
        &mut self,
        kind: ElementKind,
        _header_reference: &EstimationReference,
        _container_reference: &EstimationReference,
        window: Rect,
    ) -> Result<(usize, Rect), DataSourceError> {
        debug_assert!(kind == ElementKind::Item, "calendars have no group headers");
        let total_items = self.provider.total_item_count()?;
        debug_assert!(total_items > 0, "cannot estimate an index with no items");

        let ax = self.base.axes();
        let lines = self.stacking_lines() as i64;
        let distance = (ax.main_origin(window)
            - ax.main_size(self.base.group_padding_at_start()))
        .max(0.0);
        let virtualizing_line = floor_div(distance, ax.main_size(self.cell_size));

        // First cell of the line, skipping blanks forward.
        let candidate = self.actual_at_or_after_visual(virtualizing_line * lines);
        let actual = clamp_index(candidate, total_items);
        Ok((actual, self.cell_bounds(actual as i64)))
    }

    fn estimate_element_bounds(
        &mut self,
        element: ElementId,
        _header_reference: &EstimationReference,
        _container_reference: &EstimationReference,
        _window: Rect,
    ) -> Result<Rect, DataSourceError> {
        debug_assert!(
            element.kind() == ElementKind::Item,
            "calendars have no group headers"
        );
        Ok(self.cell_bounds(element.index() as i64))
    }

    fn estimate_panel_extent(
        &mut self,
        _last_header_reference: &EstimationReference,
        _last_container_reference: &EstimationReference,
        _window: Rect,
    ) -> Result<Size, DataSourceError> {
        let total_items = self.provider.total_item_count()?;
        let ax = self.base.axes();
        let lines = self.stacking_lines();

        let cell_count = self.visual_cell_count(total_items);
        #[allow(clippy::cast_sign_loss, reason = "cell counts are non-negative")]
        let virtualizing_lines = (cell_count as usize).div_ceil(lines);

        let main = ax.main_size(self.base.group_padding_at_start())
            + virtualizing_lines as f64 * ax.main_size(self.cell_size)
            + ax.main_size(self.base.group_padding_at_end());
        let cross = ax.cross_size(self.base.group_padding_at_start())
            + lines as f64 * ax.cross_size(self.cell_size)
            + ax.cross_size(self.base.group_padding_at_end());
        Ok(ax.size(main, cross))
    }

    fn estimate_index_from_point(
        &self,
        _requesting_insertion_index: bool,
        point: Point,
        _reference: &EstimationReference,
        _window: Rect,
    ) -> Result<PointSearchResult, DataSourceError> {
        let total_items = self.provider.total_item_count()?;
        debug_assert!(total_items > 0, "cannot look up a point with no items");

        let ax = self.base.axes();
        let lines = self.stacking_lines() as i64;

        let main_distance =
            (ax.main_pos(point) - ax.main_size(self.base.group_padding_at_start())).max(0.0);
        let cross_distance =
            (ax.cross_pos(point) - ax.cross_size(self.base.group_padding_at_start())).max(0.0);

        let virtualizing_line = floor_div(main_distance, ax.main_size(self.cell_size));
        let stacking_line =
            floor_div(cross_distance, ax.cross_size(self.cell_size)).clamp(0, lines - 1);

        let visual = virtualizing_line * lines + stacking_line;
        let actual = clamp_index(self.correction.visual_to_actual(visual), total_items);
        Ok(PointSearchResult {
            hint: IndexSearchHint::Exact,
            element: ElementId::Item(actual),
        })
    }

    fn target_from_navigation_action(
        &self,
        element: ElementId,
        action: NavigationAction,
        _window: Rect,
        _item_index_hint: Option<usize>,
    ) -> Result<ElementId, DataSourceError> {
        debug_assert!(
            element.kind() == ElementKind::Item,
            "calendars have no group headers"
        );
        let total_items = self.provider.total_item_count()?;
        debug_assert!(element.index() < total_items, "navigation from an out-of-range cell");

        let lines = self.stacking_lines() as i64;
        let step = action.step() as i64;
        let delta = if action.is_along(self.base.virtualization_direction()) {
            step * lines
        } else {
            step
        };

        // Step in visual space, then land on the nearest real cell in the
        // step's direction (skip runs have no data to focus).
        let visual = self.correction.actual_to_visual(element.index() as i64);
        let target_visual = visual + delta;
        let target = if step > 0 {
            self.actual_at_or_after_visual(target_visual)
        } else {
            self.actual_at_or_before_visual(target_visual)
        };
        Ok(ElementId::Item(clamp_index(target, total_items)))
    }

    fn is_index_layout_boundary(
        &self,
        element: ElementId,
        _window: Rect,
    ) -> Result<BoundaryEdges, DataSourceError> {
        debug_assert!(
            element.kind() == ElementKind::Item,
            "calendars have no group headers"
        );
        let total_items = self.provider.total_item_count()?;
        let lines = self.stacking_lines() as i64;

        let visual = self.correction.actual_to_visual(element.index() as i64);
        let cell_count = self.visual_cell_count(total_items);

        let first_stacking_line = visual.rem_euclid(lines) == 0;
        let last_stacking_line =
            (visual + 1).rem_euclid(lines) == 0 || element.index() + 1 == total_items;
        let first_virtualizing_line = visual < lines;
        let last_virtualizing_line = visual + lines >= cell_count;

        let mut edges = BoundaryEdges::empty();
        match self.base.virtualization_direction() {
            Orientation::Vertical => {
                if first_stacking_line {
                    edges |= BoundaryEdges::LEFT;
                }
                if last_stacking_line {
                    edges |= BoundaryEdges::RIGHT;
                }
                if first_virtualizing_line {
                    edges |= BoundaryEdges::TOP;
                }
                if last_virtualizing_line {
                    edges |= BoundaryEdges::BOTTOM;
                }
            }
            Orientation::Horizontal => {
                if first_stacking_line {
                    edges |= BoundaryEdges::TOP;
                }
                if last_stacking_line {
                    edges |= BoundaryEdges::BOTTOM;
                }
                if first_virtualizing_line {
                    edges |= BoundaryEdges::LEFT;
                }
                if last_virtualizing_line {
                    edges |= BoundaryEdges::RIGHT;
                }
            }
        }
        Ok(edges)
    }

    fn regular_snap_points(&self) -> Option<RegularSnapPoints> {
        let ax = self.base.axes();
        Some(RegularSnapPoints {
            near_offset: ax.main_size(self.base.group_padding_at_start()),
            far_offset: ax.main_size(self.base.group_padding_at_end()),
            spacing: if self.cell_size_set {
                ax.main_size(self.cell_size)
            } else {
                0.0
            },
        })
    }

    fn has_irregular_snap_points(&self, _kind: ElementKind) -> bool {
        false
    }

    fn has_snap_point_on_element(&self, _element: ElementId) -> Result<bool, DataSourceError> {
        Ok(false)
    }

    fn needs_special_item(&self) -> bool {
        !self.cell_size_set
    }

    fn needs_special_group(&self) -> bool {
        false
    }

    fn register_special_container_size(&mut self, item_index: usize, desired_size: Size) {
        debug_assert!(
            item_index == self.special_item_index(),
            "only the seeding item registers a special size"
        );
        // The first realized cell seeds the minimum; the viewport still
        // dominates once known.
        self.minimum_cell_size = Size::new(
            desired_size.width.max(1.0),
            desired_size.height.max(1.0),
        );
        let _ = self.recompute_cell_size();
    }

    fn register_special_header_size(&mut self, _group_index: usize, _desired_size: Size) {
        debug_assert!(false, "calendars have no group headers");
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};

    use trellis_core::{
        BoundaryEdges, ElementId, ElementKind, EstimationReference, LayoutReference,
        LayoutStrategy, NavigationAction, Orientation,
    };

    use super::CalendarLayout;
    use crate::testing::StubData;

    fn window() -> Rect {
        Rect::new(0.0, 0.0, 700.0, 600.0)
    }

    /// A month-like grid: 7 columns, 6 rows, 100x100 cells, three leading
    /// blanks.
    fn month(total_days: usize) -> CalendarLayout<StubData> {
        let mut layout = CalendarLayout::new(StubData::flat(total_days));
        layout.set_virtualization_direction(Orientation::Vertical);
        layout.set_grid_dimensions(6, 7);
        assert!(layout.set_viewport_size(Size::new(700.0, 600.0)));
        layout.index_correction_table_mut().set_leading_offset(3);
        layout
    }

    #[test]
    fn viewport_sizing_reports_remeasure_only_on_change() {
        let mut layout = CalendarLayout::new(StubData::flat(30));
        layout.set_grid_dimensions(6, 7);

        assert!(layout.set_viewport_size(Size::new(700.0, 600.0)));
        assert_eq!(layout.cell_size(), Size::new(100.0, 100.0));

        // Same viewport again: no remeasure churn.
        assert!(!layout.set_viewport_size(Size::new(700.0, 600.0)));

        // A minimum above the derived size takes over.
        assert!(layout.set_item_minimum_size(Size::new(120.0, 100.0)));
        assert_eq!(layout.cell_size(), Size::new(120.0, 100.0));
    }

    #[test]
    fn bounds_skip_leading_blanks() {
        let mut layout = month(30);
        // Day 0 lands three cells in: row 0, column 3.
        let bounds = layout
            .element_bounds(
                ElementId::Item(0),
                Size::new(100.0, 100.0),
                &LayoutReference::myself(ElementKind::Item, Rect::ZERO),
                window(),
            )
            .unwrap();
        assert_eq!(bounds.origin(), Point::new(300.0, 0.0));

        // Day 4 wraps to the second row.
        let bounds = layout
            .element_bounds(
                ElementId::Item(4),
                Size::new(100.0, 100.0),
                &LayoutReference::myself(ElementKind::Item, Rect::ZERO),
                window(),
            )
            .unwrap();
        assert_eq!(bounds.origin(), Point::new(0.0, 100.0));
    }

    #[test]
    fn arrange_equals_measure_for_valid_cells() {
        let mut layout = month(30);
        let measured = layout
            .element_bounds(
                ElementId::Item(10),
                Size::new(100.0, 100.0),
                &LayoutReference::myself(ElementKind::Item, Rect::ZERO),
                window(),
            )
            .unwrap();
        let arranged = layout
            .element_arrange_bounds(ElementId::Item(10), measured, window(), Size::new(700.0, 600.0))
            .unwrap();
        assert_eq!(arranged, measured);

        // Placeholder cells pass through untouched.
        let parked = Rect::new(-10000.0, -10000.0, -9900.0, -9900.0);
        let arranged = layout
            .element_arrange_bounds(ElementId::Item(99), parked, window(), Size::new(700.0, 600.0))
            .unwrap();
        assert_eq!(arranged, parked);
    }

    #[test]
    fn extent_counts_blank_cells() {
        let mut layout = month(30);
        let extent = layout
            .estimate_panel_extent(
                &EstimationReference::none(),
                &EstimationReference::none(),
                window(),
            )
            .unwrap();
        // 30 days + 3 blanks = 33 cells; ceil(33 / 7) = 5 rows.
        assert_eq!(extent.height, 500.0);
        assert_eq!(extent.width, 700.0);
    }

    #[test]
    fn index_estimation_anchors_the_window_line() {
        let mut layout = month(30);
        // Window two rows down: first cell of row 2 is visual 14, day 11.
        let scan = Rect::new(0.0, 200.0, 700.0, 800.0);
        let (index, bounds) = layout
            .estimate_element_index(
                ElementKind::Item,
                &EstimationReference::none(),
                &EstimationReference::none(),
                scan,
            )
            .unwrap();
        assert_eq!(index, 11);
        assert_eq!(bounds.origin(), Point::new(0.0, 200.0));

        // At the very top the leading blanks skip forward to day 0.
        let scan = Rect::new(0.0, 0.0, 700.0, 600.0);
        let (index, _) = layout
            .estimate_element_index(
                ElementKind::Item,
                &EstimationReference::none(),
                &EstimationReference::none(),
                scan,
            )
            .unwrap();
        assert_eq!(index, 0);
    }

    #[test]
    fn point_lookup_maps_through_the_correction_table() {
        let layout = month(30);
        // Row 1, column 2: visual 9, day 6.
        let result = layout
            .estimate_index_from_point(
                false,
                Point::new(250.0, 150.0),
                &EstimationReference::none(),
                window(),
            )
            .unwrap();
        assert_eq!(result.element, ElementId::Item(6));
    }

    #[test]
    fn navigation_steps_in_visual_space() {
        let layout = month(30);

        // Right moves one day.
        let target = layout
            .target_from_navigation_action(ElementId::Item(0), NavigationAction::Right, window(), None)
            .unwrap();
        assert_eq!(target, ElementId::Item(1));

        // Down moves a whole week.
        let target = layout
            .target_from_navigation_action(ElementId::Item(0), NavigationAction::Down, window(), None)
            .unwrap();
        assert_eq!(target, ElementId::Item(7));

        // Up from the first row clamps into the leading blanks and lands on
        // day 0.
        let target = layout
            .target_from_navigation_action(ElementId::Item(5), NavigationAction::Up, window(), None)
            .unwrap();
        assert_eq!(target, ElementId::Item(0));
    }

    #[test]
    fn navigation_skips_a_skip_run() {
        let mut layout = month(30);
        // Two skipped cells at visual index 10 (between day 6 and day 7).
        layout.index_correction_table_mut().set_skip(10, 2);

        let target = layout
            .target_from_navigation_action(ElementId::Item(6), NavigationAction::Right, window(), None)
            .unwrap();
        assert_eq!(target, ElementId::Item(7));

        let target = layout
            .target_from_navigation_action(ElementId::Item(7), NavigationAction::Left, window(), None)
            .unwrap();
        assert_eq!(target, ElementId::Item(6));
    }

    #[test]
    fn boundary_edges_in_visual_space() {
        let layout = month(30);

        // Day 0 sits on the top edge but not the left one (three blanks
        // before it).
        let edges = layout
            .is_index_layout_boundary(ElementId::Item(0), window())
            .unwrap();
        assert!(edges.contains(BoundaryEdges::TOP));
        assert!(!edges.contains(BoundaryEdges::LEFT));

        // Day 4 opens the second row.
        let edges = layout
            .is_index_layout_boundary(ElementId::Item(4), window())
            .unwrap();
        assert!(edges.contains(BoundaryEdges::LEFT));

        // The last day sits on the bottom edge.
        let edges = layout
            .is_index_layout_boundary(ElementId::Item(29), window())
            .unwrap();
        assert!(edges.contains(BoundaryEdges::RIGHT | BoundaryEdges::BOTTOM));
    }

    #[test]
    fn snap_points_are_regular_rows() {
        let layout = month(30);
        let snap = layout.regular_snap_points().unwrap();
        assert_eq!(snap.spacing, 100.0);
        assert!(!layout.has_irregular_snap_points(ElementKind::Item));
    }

    #[test]
    fn seeding_sets_the_minimum_cell_size() {
        let mut layout = CalendarLayout::new(StubData::flat(30));
        layout.set_grid_dimensions(6, 7);
        assert!(layout.needs_special_item());

        layout.register_special_container_size(0, Size::new(90.0, 80.0));
        assert!(!layout.needs_special_item());
        assert_eq!(layout.cell_size(), Size::new(90.0, 80.0));

        // The viewport dominates once it is known.
        assert!(layout.set_viewport_size(Size::new(700.0, 600.0)));
        assert_eq!(layout.cell_size(), Size::new(100.0, 100.0));
    }
}
