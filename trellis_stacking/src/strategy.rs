// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stacking strategy: configuration, exact placement, and fill
//! decisions.

use kurbo::{Insets, Point, Rect, Size};

use trellis_core::{
    BoundaryEdges, DataSourceError, ElementId, ElementKind, EstimationReference,
    GroupHeaderStrategy, LayoutDataProvider, LayoutReference, LayoutStrategy, NavigationAction,
    Orientation, PointSearchResult, ReferenceIdentity, RegularSnapPoints, SizeAverages,
    StrategyBase,
};

/// 1D stacking layout over a virtualized collection, with optional group
/// headers.
///
/// Owns the host's [`LayoutDataProvider`] and is driven through the
/// [`LayoutStrategy`] trait. Configure orientation, header strategy, and
/// padding before the first pass; running averages persist across passes.
#[derive(Debug)]
pub struct StackingLayout<P> {
    pub(crate) provider: P,
    pub(crate) base: StrategyBase,
    pub(crate) container_sizes: SizeAverages,
    pub(crate) header_sizes: SizeAverages,
    /// Desired size of the first realized header. Parallel layouts reserve
    /// this much stacking-axis space beside every group.
    pub(crate) header_size: Option<Size>,
    /// Furthest stacking-axis edge produced this pass; feeds extent
    /// estimation.
    pub(crate) furthest_cross_extent: f64,
}

impl<P> StackingLayout<P> {
    /// Creates a stacking layout over `provider` with vertical
    /// virtualization, no grouping, and no padding.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            base: StrategyBase::new(),
            container_sizes: SizeAverages::new(),
            header_sizes: SizeAverages::new(),
            header_size: None,
            furthest_cross_extent: 0.0,
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

    /// Stacking-axis space reserved beside items by a parallel header.
    pub(crate) fn parallel_header_cross(&self) -> f64 {
        if self.base.group_header_strategy() == GroupHeaderStrategy::Parallel {
            self.header_cross()
        } else {
            0.0
        }
    }

    /// Exact bounds for an item placed against `reference`.
    fn container_bounds(
        &mut self,
        index_in_items: usize,
        index_in_group: usize,
        desired_size: Size,
        reference: &LayoutReference,
    ) -> Rect {
        let ax = self.base.axes();
        debug_assert!(
            !self.base.is_grouping() || self.header_size.is_some(),
            "grouped placement requires a seeded header size"
        );

        self.container_sizes
            .register(index_in_items, ax.main_size(desired_size));

        let main_origin = if reference.kind == ElementKind::GroupHeader {
            debug_assert!(
                reference.relation != ReferenceIdentity::Myself,
                "an item cannot reference itself as a header"
            );
            match reference.relation {
                ReferenceIdentity::BeforeMe => {
                    // This item opens its group right after the header.
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
                        - ax.main_size(desired_size)
                        - self.base.distance_between_groups()
                }
            }
        } else {
            match reference.relation {
                ReferenceIdentity::BeforeMe => ax.main_end(reference.bounds),
                ReferenceIdentity::AfterMe => {
                    ax.main_origin(reference.bounds) - ax.main_size(desired_size)
                }
                ReferenceIdentity::Myself => ax.main_origin(reference.bounds),
            }
        };

        let mut cross_origin = ax.cross_size(self.base.group_padding_at_start());
        cross_origin += self.parallel_header_cross();

        ax.rect(
            main_origin,
            cross_origin,
            ax.main_size(desired_size),
            ax.cross_size(desired_size),
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
                    GroupHeaderStrategy::Parallel => {
                        match reference.header_bounds {
                            // Forward generation from a container should
                            // always carry its group's header bounds.
                            None => {
                                debug_assert!(false, "parallel reference item without header bounds");
                                ax.main_end(reference.bounds)
                            }
                            Some(header) => {
                                // The new group starts past both the last
                                // container and that group's own header.
                                ax.main_end(reference.bounds).max(ax.main_end(header))
                            }
                        }
                    }
                    _ => ax.main_end(reference.bounds),
                };
                origin + distance_between_groups
            } else {
                match self.base.group_header_strategy() {
                    GroupHeaderStrategy::Parallel => match reference.header_bounds {
                        // Left-aligned with the group's first item.
                        None => ax.main_origin(reference.bounds),
                        // Leave room for the next group's header.
                        Some(header) => ax.main_origin(reference.bounds).min(
                            ax.main_origin(header) - ax.main_size(desired_size),
                        ),
                    },
                    _ => ax.main_origin(reference.bounds) - ax.main_size(desired_size),
                }
            }
        };

        let cross_origin = ax.cross_size(self.base.group_padding_at_start());

        // The cross extent is not constrained here; arrange widens it.
        ax.rect(
            main_origin,
            cross_origin,
            ax.main_size(desired_size),
            ax.cross_size(desired_size),
        )
    }
}

impl<P: LayoutDataProvider> LayoutStrategy for StackingLayout<P> {
    fn begin_measure(&mut self) {
        self.furthest_cross_extent = 0.0;
    }

    fn element_measure_size(&self, kind: ElementKind, index: Option<usize>, window: Rect) -> Size {
        let ax = self.base.axes();
        let padding_cross = ax.cross_size(self.base.group_padding_at_start())
            + ax.cross_size(self.base.group_padding_at_end());
        let mut cross = (ax.cross_extent(window) - padding_cross).max(0.0);

        // A parallel header only gets the space items will reserve for it;
        // the seeding probe measures unconstrained.
        if kind == ElementKind::GroupHeader
            && index.is_some()
            && self.base.group_header_strategy() == GroupHeaderStrategy::Parallel
        {
            if let Some(header_size) = self.header_size {
                cross = ax.cross_size(header_size);
            }
        }

        ax.size(f64::INFINITY, cross)
    }

    fn element_bounds(
        &mut self,
        element: ElementId,
        measured_size: Size,
        reference: &LayoutReference,
        _window: Rect,
    ) -> Result<Rect, DataSourceError> {
        let bounds = match element {
            ElementId::Item(index) => {
                let index_in_group = if self.base.is_grouping() {
                    self.provider.group_from_item(index)?.index_in_group
                } else {
                    index
                };
                self.container_bounds(index, index_in_group, measured_size, reference)
            }
            ElementId::GroupHeader(group_index) => {
                self.header_bounds(group_index, measured_size, reference)
            }
        };

        let ax = self.base.axes();
        self.furthest_cross_extent = self.furthest_cross_extent.max(ax.cross_end(bounds));

        Ok(bounds)
    }

    fn element_arrange_bounds(
        &self,
        element: ElementId,
        bounds: Rect,
        window: Rect,
        final_size: Size,
    ) -> Result<Rect, DataSourceError> {
        let ax = self.base.axes();
        let cross = match element {
            ElementId::Item(_) => {
                // Give the item at least the window constraint so one
                // oversized container does not change the alignment of its
                // siblings, but never more than the final arranged size
                // (the window may be infinite when the panel is
                // misconfigured).
                let mut cross = ax.cross_extent(bounds).max(ax.cross_extent(window));
                cross = cross.min(ax.cross_size(final_size));
                cross -= self.parallel_header_cross();
                cross -= ax.cross_size(self.base.group_padding_at_start())
                    + ax.cross_size(self.base.group_padding_at_end());
                cross.max(0.0)
            }
            ElementId::GroupHeader(_) => {
                if self.base.group_header_strategy() == GroupHeaderStrategy::Inline {
                    // Inline headers stretch across the panel.
                    let mut cross = ax.cross_extent(window).min(ax.cross_size(final_size));
                    cross -= ax.cross_size(self.base.group_padding_at_start())
                        + ax.cross_size(self.base.group_padding_at_end());
                    cross.max(0.0)
                } else {
                    let reserved = self.header_cross();
                    ax.cross_extent(bounds).max(reserved)
                }
            }
        };

        Ok(ax.rect(
            ax.main_origin(bounds),
            ax.cross_origin(bounds),
            ax.main_extent(bounds),
            cross,
        ))
    }

    fn should_continue_filling_up_space(
        &self,
        element: ElementId,
        reference: &LayoutReference,
        window: Rect,
    ) -> Result<bool, DataSourceError> {
        let ax = self.base.axes();
        let requesting_header = element.kind() == ElementKind::GroupHeader;

        let result = match reference.relation {
            ReferenceIdentity::Myself => true,
            ReferenceIdentity::BeforeMe => {
                if reference.kind == ElementKind::GroupHeader
                    && self.base.group_header_strategy() == GroupHeaderStrategy::Parallel
                    && !requesting_header
                {
                    // The first item sits beside its parallel header, so it
                    // exists as soon as the header's near edge is in view.
                    ax.main_end(window) >= ax.main_origin(reference.bounds)
                } else {
                    ax.main_end(window) >= ax.main_end(reference.bounds)
                }
            }
            ReferenceIdentity::AfterMe => {
                ax.main_origin(window) <= ax.main_origin(reference.bounds)
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
            ElementId::Item(index) => {
                self.estimate_container_location(index, header_reference, container_reference)
            }
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
            self.estimate_non_grouped_extent(last_container_reference, window)
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
        _window: Rect,
    ) -> Result<BoundaryEdges, DataSourceError> {
        // Only queried for non-grouped scenarios.
        debug_assert!(
            element.kind() == ElementKind::Item,
            "layout boundaries are only defined for items"
        );
        let total_items = self.provider.total_item_count()?;
        let index = element.index();

        let mut edges = BoundaryEdges::empty();
        match self.base.virtualization_direction() {
            Orientation::Horizontal => {
                edges |= BoundaryEdges::TOP | BoundaryEdges::BOTTOM;
                if index == 0 {
                    edges |= BoundaryEdges::LEFT;
                }
                if index + 1 == total_items {
                    edges |= BoundaryEdges::RIGHT;
                }
            }
            Orientation::Vertical => {
                edges |= BoundaryEdges::LEFT | BoundaryEdges::RIGHT;
                if index == 0 {
                    edges |= BoundaryEdges::TOP;
                }
                if index + 1 == total_items {
                    edges |= BoundaryEdges::BOTTOM;
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
            spacing: self.container_sizes.average(),
        })
    }

    fn has_irregular_snap_points(&self, kind: ElementKind) -> bool {
        if !self.base.is_grouping() {
            return false;
        }
        match kind {
            ElementKind::Item => true,
            ElementKind::GroupHeader => {
                self.base.group_header_strategy() == GroupHeaderStrategy::Inline
            }
        }
    }

    fn has_snap_point_on_element(&self, element: ElementId) -> Result<bool, DataSourceError> {
        Ok(self.has_irregular_snap_points(element.kind()))
    }

    fn needs_special_item(&self) -> bool {
        !self.container_sizes.has_samples()
    }

    fn needs_special_group(&self) -> bool {
        self.base.is_grouping() && self.header_size.is_none()
    }

    fn register_special_container_size(&mut self, item_index: usize, desired_size: Size) {
        debug_assert!(
            item_index == self.special_item_index(),
            "only the seeding item registers a special size"
        );
        let extent = self.base.axes().main_size(desired_size);
        self.container_sizes.register(item_index, extent);
    }

    fn register_special_header_size(&mut self, group_index: usize, desired_size: Size) {
        debug_assert!(
            group_index == self.special_group_index(),
            "only the seeding group registers a special size"
        );
        self.header_size = Some(desired_size);
        let extent = self.base.axes().main_size(desired_size);
        self.header_sizes.register(group_index, extent);
    }
}
