// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The wrapping strategy: configuration, cell sizing, exact placement, and
//! fill decisions.

use kurbo::{Insets, Point, Rect, Size};
use tracing::debug;

use trellis_core::{
    BoundaryEdges, DataSourceError, ElementId, ElementKind, EstimationReference,
    GroupHeaderStrategy, LayoutDataProvider, LayoutReference, LayoutStrategy, NavigationAction,
    Orientation, PointSearchResult, ReferenceIdentity, RegularSnapPoints, SizeAverages,
    StrategyBase,
};

/// Cached end positions of every group, so grouped extent queries avoid an
/// O(groups) walk per pass. Stale whenever the group count, the line count,
/// or the cell size changes.
#[derive(Debug, Clone, Default)]
pub(crate) struct GroupCache {
    /// Cumulative end position of each group, by group index.
    pub(crate) end_positions: Vec<f64>,
    pub(crate) stacking_lines: usize,
    pub(crate) cell_size: Size,
}

/// N-per-line wrapping grid layout over a virtualized collection, with
/// optional group headers.
///
/// Owns the host's [`LayoutDataProvider`] and is driven through the
/// [`LayoutStrategy`] trait. All cells share one size, fixed either by
/// [`set_item_width`](Self::set_item_width)/[`set_item_height`](Self::set_item_height)
/// or by the first realized item.
#[derive(Debug)]
pub struct WrappingLayout<P> {
    pub(crate) provider: P,
    pub(crate) base: StrategyBase,
    pub(crate) cell_size: Size,
    pub(crate) cell_size_set: bool,
    pub(crate) header_sizes: SizeAverages,
    /// Desired size of the first realized header. Parallel layouts reserve
    /// this much stacking-axis space beside every group.
    pub(crate) header_size: Option<Size>,
    pub(crate) max_rows_or_columns: Option<usize>,
    pub(crate) item_width: Option<f64>,
    pub(crate) item_height: Option<f64>,
    pub(crate) group_cache: GroupCache,
}

impl<P> WrappingLayout<P> {
    /// Creates a wrapping layout over `provider` with vertical
    /// virtualization, no grouping, and no cell size.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            base: StrategyBase::new(),
            cell_size: Size::new(1.0, 1.0),
            cell_size_set: false,
            header_sizes: SizeAverages::new(),
            header_size: None,
            max_rows_or_columns: None,
            item_width: None,
            item_height: None,
            group_cache: GroupCache::default(),
        }
    }

    /// Sets the scroll direction. Must not change once queries have begun.
    pub fn set_virtualization_direction(&mut self, orientation: Orientation) {
        self.base.set_virtualization_direction(orientation);
    }

    /// Sets how group headers participate in layout.
    pub fn set_group_header_strategy(&mut self, strategy: GroupHeaderStrategy) {
        self.base.set_group_header_strategy(strategy);
    }

    /// Sets the padding around each group.
    pub fn set_group_padding(&mut self, padding: Insets) {
        self.base.set_group_padding(padding);
    }

    /// Caps the number of stacking lines regardless of how many cells the
    /// window could fit. `None` removes the cap; non-positive values are
    /// ignored.
    pub fn set_maximum_rows_or_columns(&mut self, maximum: Option<usize>) {
        self.max_rows_or_columns = maximum.filter(|&m| m > 0);
    }

    /// Fixes the cell width from panel configuration. Clearing it (or
    /// passing a non-positive value) sends the next pass back through the
    /// seeding item; the caller is responsible for invalidating measure.
    pub fn set_item_width(&mut self, width: Option<f64>) {
        self.item_width = width.filter(|w| w.is_finite() && *w > 0.0);
        if let Some(width) = self.item_width {
            self.cell_size.width = width;
        }
        self.cell_size_set = self.item_width.is_some() && self.item_height.is_some();
    }

    /// Fixes the cell height from panel configuration. Same contract as
    /// [`set_item_width`](Self::set_item_width).
    pub fn set_item_height(&mut self, height: Option<f64>) {
        self.item_height = height.filter(|h| h.is_finite() && *h > 0.0);
        if let Some(height) = self.item_height {
            self.cell_size.height = height;
        }
        self.cell_size_set = self.item_width.is_some() && self.item_height.is_some();
    }

    /// Drops the cached per-group positions. Call when the grouping of the
    /// backing data changes shape; line-count and cell-size changes are
    /// detected automatically.
    pub fn invalidate_group_cache(&mut self) {
        debug!("invalidating wrapping group location cache");
        self.group_cache = GroupCache::default();
    }

    /// The current cell size. Meaningful once configured or seeded.
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

    /// Stacking-axis extent of the stored header size, or zero when no
    /// header has been realized.
    pub(crate) fn header_cross(&self) -> f64 {
        self.header_size
            .map_or(0.0, |size| self.base.axes().cross_size(size))
    }

    /// Virtualizing-axis header extent to assume where none was observed:
    /// the running average, seeded by the first header.
    pub(crate) fn average_header_extent(&self) -> f64 {
        if self.header_sizes.has_samples() {
            self.header_sizes.average()
        } else if let Some(size) = self.header_size {
            self.base.axes().main_size(size)
        } else {
            debug_assert!(false, "header extent queried before a header was seeded");
            0.0
        }
    }
}

impl<P: LayoutDataProvider> WrappingLayout<P> {
    /// Exact bounds for an item placed against `reference`.
    fn container_bounds(
        &mut self,
        _index_in_items: usize,
        index_in_group: usize,
        reference: &LayoutReference,
        window: Rect,
    ) -> Rect {
        let ax = self.base.axes();
        debug_assert!(
            self.cell_size_set && (!self.base.is_grouping() || self.header_size.is_some()),
            "placement requires a cell size (and a header size when grouped)"
        );

        let line = self.line_info(window, index_in_group);
        let cell_main = ax.main_size(self.cell_size);

        let main_origin = if !self.base.is_grouping() {
            // Non-grouped placement is exact; the reference is not needed.
            ax.main_size(self.base.group_padding_at_start())
                + line.virtualizing_line as f64 * cell_main
        } else if reference.kind == ElementKind::GroupHeader {
            debug_assert!(
                reference.relation != ReferenceIdentity::Myself,
                "an item cannot reference itself as a header"
            );
            match reference.relation {
                ReferenceIdentity::BeforeMe => {
                    debug_assert!(
                        index_in_group == 0,
                        "only a group's first item may be placed from its header"
                    );
                    let mut origin = ax.main_origin(reference.bounds);
                    if self.base.group_header_strategy() == GroupHeaderStrategy::Inline {
                        origin += ax.main_extent(reference.bounds);
                    }
                    origin
                }
                // Last item of a group about to be created behind us.
                ReferenceIdentity::AfterMe | ReferenceIdentity::Myself => {
                    ax.main_origin(reference.bounds)
                        - cell_main
                        - self.base.distance_between_groups()
                }
            }
        } else {
            match reference.relation {
                ReferenceIdentity::BeforeMe if line.stacking_line == 0 => {
                    // Starting a new line: advance one cell.
                    ax.main_origin(reference.bounds) + cell_main
                }
                ReferenceIdentity::AfterMe
                    if line.stacking_line == line.lines_per_stack - 1 =>
                {
                    // Ending the previous line: recede one cell.
                    ax.main_origin(reference.bounds) - cell_main
                }
                // Same line: share the reference's position.
                _ => ax.main_origin(reference.bounds),
            }
        };

        Rect::from_origin_size(
            ax.point(main_origin, self.item_stacking_position(line.stacking_line)),
            self.cell_size,
        )
    }

    /// Exact bounds for a group header placed against `reference`.
    fn header_bounds(
        &mut self,
        group_index: usize,
        desired_size: Size,
        reference: &LayoutReference,
    ) -> Rect {
        let ax = self.base.axes();
        let distance_between_groups = self.base.distance_between_groups();

        debug_assert!(
            self.base.is_grouping() && self.header_size.is_some(),
            "header placement requires grouping and a seeded header size"
        );

        self.header_sizes
            .register(group_index, ax.main_size(desired_size));

        let main_origin = if reference.kind == ElementKind::GroupHeader {
            match reference.relation {
                // No better location was known; keep the estimated one.
                ReferenceIdentity::Myself => ax.main_origin(reference.bounds),
                ReferenceIdentity::BeforeMe => {
                    ax.main_end(reference.bounds) + distance_between_groups
                }
                ReferenceIdentity::AfterMe => {
                    ax.main_origin(reference.bounds)
                        - ax.main_size(desired_size)
                        - distance_between_groups
                }
            }
        } else {
            debug_assert!(
                reference.relation != ReferenceIdentity::Myself,
                "a header cannot reference itself as an item"
            );
            if reference.relation == ReferenceIdentity::BeforeMe {
                let origin = match self.base.group_header_strategy() {
                    GroupHeaderStrategy::Parallel => match reference.header_bounds {
                        None => {
                            // Forward generation from a container should
                            // always carry its group's header bounds.
                            debug_assert!(false, "parallel reference item without header bounds");
                            ax.main_end(reference.bounds)
                        }
                        Some(header) => {
                            // The new group starts past both the last
                            // container and that group's own header.
                            ax.main_end(reference.bounds).max(ax.main_end(header))
                        }
                    },
                    _ => ax.main_end(reference.bounds),
                };
                origin + distance_between_groups
            } else {
                match self.base.group_header_strategy() {
                    GroupHeaderStrategy::Parallel => match reference.header_bounds {
                        // Left-aligned with the group's first item.
                        None => ax.main_origin(reference.bounds),
                        // Leave room for the next group's header.
                        Some(header) => ax
                            .main_origin(reference.bounds)
                            .min(ax.main_origin(header) - ax.main_size(desired_size)),
                    },
                    _ => ax.main_origin(reference.bounds) - ax.main_size(desired_size),
                }
            }
        };

        ax.rect(
            main_origin,
            ax.cross_size(self.base.group_padding_at_start()),
            ax.main_size(desired_size),
            ax.cross_size(desired_size),
        )
    }

    /// The in-group index of an item, or the flat index when ungrouped.
    pub(crate) fn index_in_group(&self, item_index: usize) -> Result<usize, DataSourceError> {
        if self.base.is_grouping() {
            Ok(self.provider.group_from_item(item_index)?.index_in_group)
        } else {
            Ok(item_index)
        }
    }
}

impl<P: LayoutDataProvider> LayoutStrategy for WrappingLayout<P> {
    fn element_measure_size(&self, kind: ElementKind, index: Option<usize>, window: Rect) -> Size {
        let ax = self.base.axes();
        let padding_cross = ax.cross_size(self.base.group_padding_at_start())
            + ax.cross_size(self.base.group_padding_at_end());
        let cross = (ax.cross_extent(window) - padding_cross).max(0.0);
        let mut size = ax.size(f64::INFINITY, cross);

        match kind {
            ElementKind::Item => {
                if let Some(width) = self.item_width {
                    size.width = width;
                }
                if let Some(height) = self.item_height {
                    size.height = height;
                }
                // Everything but the seeding probe measures at the cell.
                if self.cell_size_set && index.is_some() {
                    size = self.cell_size;
                }
            }
            ElementKind::GroupHeader => {
                if self.base.group_header_strategy() == GroupHeaderStrategy::Parallel
                    && index.is_some()
                {
                    if let Some(header_size) = self.header_size {
                        size = ax.size(ax.main_size(size), ax.cross_size(header_size));
                    }
                }
            }
        }

        size
    }

    fn element_bounds(
        &mut self,
        element: ElementId,
        measured_size: Size,
        reference: &LayoutReference,
        window: Rect,
    ) -> Result<Rect, DataSourceError> {
        match element {
            ElementId::Item(index) => {
                let index_in_group = self.index_in_group(index)?;
                Ok(self.container_bounds(index, index_in_group, reference, window))
            }
            ElementId::GroupHeader(group_index) => {
                Ok(self.header_bounds(group_index, measured_size, reference))
            }
        }
    }

    fn element_arrange_bounds(
        &self,
        element: ElementId,
        bounds: Rect,
        _window: Rect,
        final_size: Size,
    ) -> Result<Rect, DataSourceError> {
        let ax = self.base.axes();
        let result = match element {
            ElementId::Item(_) => {
                // By arrange time there is always a cell size; every item
                // gets exactly one cell.
                debug_assert!(self.cell_size_set, "arrange before the cell size was set");
                Rect::from_origin_size(bounds.origin(), self.cell_size)
            }
            ElementId::GroupHeader(_) => {
                if self.base.group_header_strategy() == GroupHeaderStrategy::Inline {
                    let padding_cross = ax.cross_size(self.base.group_padding_at_start())
                        + ax.cross_size(self.base.group_padding_at_end());
                    let cross = (ax.cross_size(final_size) - padding_cross).max(0.0);
                    ax.rect(
                        ax.main_origin(bounds),
                        ax.cross_origin(bounds),
                        ax.main_extent(bounds),
                        cross,
                    )
                } else {
                    debug_assert!(self.header_size.is_some(), "arrange before a header was seeded");
                    let cross = ax.cross_extent(bounds).max(self.header_cross());
                    ax.rect(
                        ax.main_origin(bounds),
                        ax.cross_origin(bounds),
                        ax.main_extent(bounds),
                        cross,
                    )
                }
            }
        };
        Ok(result)
    }

    fn should_continue_filling_up_space(
        &self,
        element: ElementId,
        reference: &LayoutReference,
        window: Rect,
    ) -> Result<bool, DataSourceError> {
        let ax = self.base.axes();

        if reference.relation == ReferenceIdentity::Myself {
            return Ok(true);
        }

        let result = match element {
            ElementId::GroupHeader(_) => {
                if reference.relation == ReferenceIdentity::BeforeMe {
                    // A new header to the right of the reference.
                    ax.main_end(window) > ax.main_end(reference.bounds)
                } else {
                    // Backward group creation keys off the current group's
                    // header, not a container inside it.
                    debug_assert!(
                        reference.kind == ElementKind::GroupHeader,
                        "backward header generation requires a header reference"
                    );
                    ax.main_origin(window) < ax.main_origin(reference.bounds)
                }
            }
            ElementId::Item(index) => {
                let index_in_group = self.index_in_group(index)?;
                let line = self.line_info(window, index_in_group);

                if reference.relation == ReferenceIdentity::BeforeMe {
                    if line.stacking_line == 0 {
                        if reference.kind == ElementKind::GroupHeader
                            && self.base.group_header_strategy() == GroupHeaderStrategy::Parallel
                        {
                            // Laid out under a parallel header: if the header
                            // was worth creating, so is this item.
                            ax.main_end(window) > ax.main_origin(reference.bounds)
                        } else {
                            // Opening a new line: room past the reference?
                            ax.main_end(window) > ax.main_end(reference.bounds)
                        }
                    } else {
                        ax.main_end(window) > ax.main_origin(reference.bounds)
                    }
                } else if reference.kind == ElementKind::GroupHeader {
                    // Last item of the group before the referenced header.
                    ax.main_origin(window) <= ax.main_origin(reference.bounds)
                } else if line.stacking_line == line.lines_per_stack - 1 {
                    // Closing the previous line.
                    ax.main_origin(window) < ax.main_origin(reference.bounds)
                } else {
                    ax.main_origin(window)
                        < ax.main_origin(reference.bounds) + ax.main_size(self.cell_size)
                }
            }
        };

        Ok(result)
    }

    fn position_of_first_element(&self) -> Point {
        self.base.position_of_first_element()
    }

    fn estimate_element_index(
        &mut self,
        kind: ElementKind,
        header_reference: &EstimationReference,
        container_reference: &EstimationReference,
        window: Rect,
    ) -> Result<(usize, Rect), DataSourceError> {
        match kind {
            ElementKind::Item => {
                self.estimate_item_index_from_window(header_reference, container_reference, window)
            }
            ElementKind::GroupHeader => {
                self.estimate_group_index_from_window(header_reference, window)
            }
        }
    }

    fn estimate_element_bounds(
        &mut self,
        element: ElementId,
        header_reference: &EstimationReference,
        container_reference: &EstimationReference,
        window: Rect,
    ) -> Result<Rect, DataSourceError> {
        match element {
            ElementId::Item(index) => self.estimate_container_location(
                index,
                header_reference,
                container_reference,
                window,
            ),
            ElementId::GroupHeader(index) => {
                self.estimate_header_location(index, header_reference, container_reference, window)
            }
        }
    }

    fn estimate_panel_extent(
        &mut self,
        last_header_reference: &EstimationReference,
        last_container_reference: &EstimationReference,
        window: Rect,
    ) -> Result<Size, DataSourceError> {
        if self.base.is_grouping() {
            self.estimate_grouped_extent(last_header_reference, last_container_reference, window)
        } else {
            self.estimate_non_grouped_extent(window)
        }
    }

    fn estimate_index_from_point(
        &self,
        requesting_insertion_index: bool,
        point: Point,
        reference: &EstimationReference,
        window: Rect,
    ) -> Result<PointSearchResult, DataSourceError> {
        self.index_from_point(requesting_insertion_index, point, reference, window)
    }

    fn target_from_navigation_action(
        &self,
        element: ElementId,
        action: NavigationAction,
        window: Rect,
        item_index_hint: Option<usize>,
    ) -> Result<ElementId, DataSourceError> {
        self.navigation_target(element, action, window, item_index_hint)
    }

    fn is_index_layout_boundary(
        &self,
        element: ElementId,
        window: Rect,
    ) -> Result<BoundaryEdges, DataSourceError> {
        // Only queried for non-grouped scenarios.
        debug_assert!(
            element.kind() == ElementKind::Item,
            "layout boundaries are only defined for items"
        );
        let total_items = self.provider.total_item_count()?;
        let max_line = self.max_stacking_line(window);
        let index = element.index();

        let first_stacking_line = index % max_line == 0;
        let last_stacking_line = (index + 1) % max_line == 0 || index + 1 == total_items;
        let first_virtualizing_line = index < max_line;
        let last_virtualizing_line = index + max_line >= total_items;

        // When virtualizing vertically the stacking axis runs horizontally.
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
        if self.base.is_grouping() {
            return None;
        }
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
        // Grouped grids snap to both headers and containers.
        self.base.is_grouping()
    }

    fn has_snap_point_on_element(&self, element: ElementId) -> Result<bool, DataSourceError> {
        Ok(self.has_irregular_snap_points(element.kind()))
    }

    fn needs_special_item(&self) -> bool {
        !self.cell_size_set
    }

    fn needs_special_group(&self) -> bool {
        self.base.is_grouping() && self.header_size.is_none()
    }

    fn register_special_container_size(&mut self, item_index: usize, desired_size: Size) {
        debug_assert!(
            item_index == self.special_item_index(),
            "only the seeding item registers a special size"
        );
        // The cell never collapses below 1x1.
        let desired = Size::new(desired_size.width.max(1.0), desired_size.height.max(1.0));
        if self.item_width.is_none() {
            self.cell_size.width = desired.width;
        }
        if self.item_height.is_none() {
            self.cell_size.height = desired.height;
        }
        self.cell_size_set = true;
    }

    fn register_special_header_size(&mut self, group_index: usize, desired_size: Size) {
        debug_assert!(
            group_index == self.special_group_index(),
            "only the seeding group registers a special size"
        );
        let desired = Size::new(desired_size.width.max(1.0), desired_size.height.max(1.0));
        self.header_size = Some(desired);
        self.header_sizes
            .register(group_index, self.base.axes().main_size(desired));
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};

    use trellis_core::{
        BoundaryEdges, ElementId, ElementKind, GroupHeaderStrategy, LayoutReference,
        LayoutStrategy, Orientation,
    };

    use super::WrappingLayout;
    use crate::testing::StubData;

    fn window() -> Rect {
        Rect::new(0.0, 0.0, 300.0, 600.0)
    }

    fn flat_grid(count: usize) -> WrappingLayout<StubData> {
        let mut layout = WrappingLayout::new(StubData::flat(count));
        layout.set_virtualization_direction(Orientation::Vertical);
        layout.set_item_width(Some(100.0));
        layout.set_item_height(Some(50.0));
        layout
    }

    fn grouped_grid(groups: &[usize], strategy: GroupHeaderStrategy) -> WrappingLayout<StubData> {
        let mut layout = WrappingLayout::new(StubData::grouped(groups));
        layout.set_virtualization_direction(Orientation::Vertical);
        layout.set_group_header_strategy(strategy);
        layout.set_item_width(Some(100.0));
        layout.set_item_height(Some(50.0));
        layout.register_special_header_size(0, Size::new(300.0, 20.0));
        layout
    }

    #[test]
    fn ungrouped_placement_is_exact_from_line_math() {
        let mut layout = flat_grid(100);
        // Index 7 in a 3-wide vertical grid: line 2, column 1.
        let reference = LayoutReference::myself(ElementKind::Item, Rect::ZERO);
        let bounds = layout
            .element_bounds(ElementId::Item(7), Size::new(100.0, 50.0), &reference, window())
            .unwrap();
        assert_eq!(bounds.origin(), Point::new(100.0, 100.0));
        assert_eq!(bounds.size(), Size::new(100.0, 50.0));
    }

    #[test]
    fn grouped_sibling_placement_walks_lines() {
        let layout_window = window();
        let mut layout = grouped_grid(&[9, 9], GroupHeaderStrategy::Inline);

        // Item 2 sits at the end of group 0's first line.
        let reference_bounds = Rect::new(200.0, 20.0, 300.0, 70.0);

        // Item 3 opens a new line: advance one cell along the scroll axis.
        let next_line = layout
            .element_bounds(
                ElementId::Item(3),
                Size::new(100.0, 50.0),
                &LayoutReference::before(ElementKind::Item, reference_bounds),
                layout_window,
            )
            .unwrap();
        assert_eq!(next_line.origin(), Point::new(0.0, 70.0));

        // Item 1 placed backward from item 2 shares its line.
        let same_line = layout
            .element_bounds(
                ElementId::Item(1),
                Size::new(100.0, 50.0),
                &LayoutReference::after(ElementKind::Item, reference_bounds),
                layout_window,
            )
            .unwrap();
        assert_eq!(same_line.origin(), Point::new(100.0, 20.0));

        // Item 2 placed backward from item 3 closes the previous line.
        let previous_line = layout
            .element_bounds(
                ElementId::Item(2),
                Size::new(100.0, 50.0),
                &LayoutReference::after(ElementKind::Item, next_line),
                layout_window,
            )
            .unwrap();
        assert_eq!(previous_line.origin().y, 20.0);
    }

    #[test]
    fn first_item_of_group_starts_past_inline_header() {
        let mut layout = grouped_grid(&[9, 9], GroupHeaderStrategy::Inline);
        let header = Rect::new(0.0, 100.0, 300.0, 120.0);
        let bounds = layout
            .element_bounds(
                ElementId::Item(9),
                Size::new(100.0, 50.0),
                &LayoutReference::before(ElementKind::GroupHeader, header),
                window(),
            )
            .unwrap();
        assert_eq!(bounds.origin(), Point::new(0.0, 120.0));
    }

    #[test]
    fn measure_size_returns_cell_once_set() {
        let layout = flat_grid(100);
        let size = layout.element_measure_size(ElementKind::Item, Some(5), window());
        assert_eq!(size, Size::new(100.0, 50.0));

        // With only a width configured there is no cell yet, so the seeding
        // probe measures unconstrained along the scroll axis.
        let mut partial = WrappingLayout::new(StubData::flat(10));
        partial.set_virtualization_direction(Orientation::Vertical);
        partial.set_item_width(Some(100.0));
        let probe = partial.element_measure_size(ElementKind::Item, None, window());
        assert_eq!(probe.width, 100.0);
        assert!(probe.height.is_infinite());
    }

    #[test]
    fn arrange_gives_items_exactly_one_cell() {
        let layout = flat_grid(100);
        let arranged = layout
            .element_arrange_bounds(
                ElementId::Item(4),
                Rect::new(100.0, 100.0, 160.0, 130.0),
                window(),
                Size::new(300.0, 600.0),
            )
            .unwrap();
        assert_eq!(arranged, Rect::new(100.0, 100.0, 200.0, 150.0));
    }

    #[test]
    fn cell_size_seeds_from_first_item_and_clamps_to_one() {
        let mut layout = WrappingLayout::new(StubData::flat(10));
        layout.set_virtualization_direction(Orientation::Vertical);
        assert!(layout.needs_special_item());

        layout.register_special_container_size(0, Size::new(80.0, 0.0));
        assert!(!layout.needs_special_item());
        assert_eq!(layout.cell_size(), Size::new(80.0, 1.0));
    }

    #[test]
    fn clearing_an_item_dimension_requires_reseeding() {
        let mut layout = flat_grid(10);
        assert!(!layout.needs_special_item());
        layout.set_item_height(None);
        assert!(layout.needs_special_item());
    }

    #[test]
    fn fill_decisions_cover_line_positions() {
        let mut layout = flat_grid(100);
        let fill_window = Rect::new(0.0, 0.0, 300.0, 100.0);

        // Item 3 opens a new line; its reference line ends inside the window.
        let line_end = LayoutReference::before(ElementKind::Item, Rect::new(200.0, 0.0, 300.0, 50.0));
        assert!(layout
            .should_continue_filling_up_space(ElementId::Item(3), &line_end, fill_window)
            .unwrap());

        // Mid-line items continue while the reference's origin is in view.
        let mid_line = LayoutReference::before(ElementKind::Item, Rect::new(0.0, 60.0, 100.0, 110.0));
        assert!(layout
            .should_continue_filling_up_space(ElementId::Item(4), &mid_line, fill_window)
            .unwrap());

        // A new line past the window's far edge does not.
        let past = LayoutReference::before(ElementKind::Item, Rect::new(200.0, 60.0, 300.0, 110.0));
        assert!(!layout
            .should_continue_filling_up_space(ElementId::Item(6), &past, fill_window)
            .unwrap());
    }

    #[test]
    fn boundary_edges_for_vertical_grid() {
        let layout = flat_grid(8);
        // 3-wide grid over 8 items: last line holds indices 6, 7.
        let edges = layout
            .is_index_layout_boundary(ElementId::Item(0), window())
            .unwrap();
        assert!(edges.contains(BoundaryEdges::LEFT | BoundaryEdges::TOP));
        assert!(!edges.contains(BoundaryEdges::BOTTOM));

        let edges = layout
            .is_index_layout_boundary(ElementId::Item(7), window())
            .unwrap();
        assert!(edges.contains(BoundaryEdges::RIGHT | BoundaryEdges::BOTTOM));
        assert!(!edges.contains(BoundaryEdges::LEFT));

        let edges = layout
            .is_index_layout_boundary(ElementId::Item(5), window())
            .unwrap();
        assert!(edges.contains(BoundaryEdges::RIGHT | BoundaryEdges::BOTTOM));
    }

    #[test]
    fn snap_points_regular_when_ungrouped_and_irregular_when_grouped() {
        let layout = flat_grid(10);
        let snap = layout.regular_snap_points().unwrap();
        assert_eq!(snap.spacing, 50.0);
        assert!(!layout.has_irregular_snap_points(ElementKind::Item));

        let grouped = grouped_grid(&[3, 3], GroupHeaderStrategy::Inline);
        assert!(grouped.regular_snap_points().is_none());
        assert!(grouped.has_irregular_snap_points(ElementKind::Item));
        assert!(grouped.has_irregular_snap_points(ElementKind::GroupHeader));
    }
}
