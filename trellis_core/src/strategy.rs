// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-facing strategy trait.

use kurbo::{Point, Rect, Size};

use crate::{
    BoundaryEdges, DataSourceError, ElementId, ElementKind, EstimationReference, LayoutReference,
    NavigationAction, PointSearchResult, RegularSnapPoints,
};

/// The surface a virtualizing panel drives during measure, arrange, and
/// estimation passes.
///
/// Exactly one strategy is active per pass. The host realizes elements,
/// feeds their references back in for exact placement, and asks the strategy
/// to extrapolate everything it has not realized. Implementations are not
/// thread-safe; the owning panel serializes passes with
/// [`begin_measure`](Self::begin_measure)/[`end_measure`](Self::end_measure).
///
/// Operations that consult the host's data provider return
/// `Result<_, DataSourceError>`; any such failure aborts the operation with
/// no partial result.
pub trait LayoutStrategy {
    /// Brackets the start of a measure pass, resetting per-pass accumulators.
    fn begin_measure(&mut self) {}

    /// Brackets the end of a measure pass.
    fn end_measure(&mut self) {}

    /// The size to measure an element with.
    ///
    /// `index` is `None` for the seeding probe measured before any size
    /// information is known (see [`needs_special_item`](Self::needs_special_item)).
    fn element_measure_size(&self, kind: ElementKind, index: Option<usize>, window: Rect) -> Size;

    /// Exactly places an element relative to an already-placed neighbor,
    /// returning its bounds.
    ///
    /// As a side effect the element's virtualizing-axis extent is registered
    /// into the strategy's running averages.
    fn element_bounds(
        &mut self,
        element: ElementId,
        measured_size: Size,
        reference: &LayoutReference,
        window: Rect,
    ) -> Result<Rect, DataSourceError>;

    /// The bounds to arrange an element in, given the bounds measurement
    /// produced and the panel's final size.
    fn element_arrange_bounds(
        &self,
        element: ElementId,
        bounds: Rect,
        window: Rect,
        final_size: Size,
    ) -> Result<Rect, DataSourceError>;

    /// Whether generation should continue past `reference` to realize
    /// `element`, given the window still being filled.
    fn should_continue_filling_up_space(
        &self,
        element: ElementId,
        reference: &LayoutReference,
        window: Rect,
    ) -> Result<bool, DataSourceError>;

    /// Where the very first element of the panel is placed.
    fn position_of_first_element(&self) -> Point;

    /// Estimates which element of `kind` should anchor the given window,
    /// returning the index and its estimated bounds.
    fn estimate_element_index(
        &mut self,
        kind: ElementKind,
        header_reference: &EstimationReference,
        container_reference: &EstimationReference,
        window: Rect,
    ) -> Result<(usize, Rect), DataSourceError>;

    /// Estimates the bounds of an unrealized element from the supplied
    /// anchors.
    fn estimate_element_bounds(
        &mut self,
        element: ElementId,
        header_reference: &EstimationReference,
        container_reference: &EstimationReference,
        window: Rect,
    ) -> Result<Rect, DataSourceError>;

    /// Estimates the total scrollable extent of the panel from the last
    /// realized anchors.
    fn estimate_panel_extent(
        &mut self,
        last_header_reference: &EstimationReference,
        last_container_reference: &EstimationReference,
        window: Rect,
    ) -> Result<Size, DataSourceError>;

    /// Estimates the element (or, when `requesting_insertion_index`, the
    /// insertion slot) closest to `point`.
    fn estimate_index_from_point(
        &self,
        requesting_insertion_index: bool,
        point: Point,
        reference: &EstimationReference,
        window: Rect,
    ) -> Result<PointSearchResult, DataSourceError>;

    /// Resolves a directional navigation action from `element` to the next
    /// focus target, promoting or demoting between items and group headers
    /// at group boundaries.
    ///
    /// `item_index_hint` carries the item the user came from when focus
    /// traverses a header, so re-entering a group can preserve the previous
    /// column; strategies without columns ignore it.
    fn target_from_navigation_action(
        &self,
        element: ElementId,
        action: NavigationAction,
        window: Rect,
        item_index_hint: Option<usize>,
    ) -> Result<ElementId, DataSourceError>;

    /// Which layout boundaries the element sits on. Only meaningful for
    /// ungrouped collections.
    fn is_index_layout_boundary(
        &self,
        element: ElementId,
        window: Rect,
    ) -> Result<BoundaryEdges, DataSourceError>;

    /// Evenly spaced snap points, when the layout has them.
    fn regular_snap_points(&self) -> Option<RegularSnapPoints>;

    /// Whether elements of `kind` contribute irregular snap points.
    fn has_irregular_snap_points(&self, kind: ElementKind) -> bool;

    /// Whether an irregular snap point lies on this specific element.
    fn has_snap_point_on_element(&self, element: ElementId) -> Result<bool, DataSourceError>;

    /// Whether a seeding item must be realized before estimation is possible.
    fn needs_special_item(&self) -> bool;

    /// Whether a seeding group header must be realized before estimation is
    /// possible.
    fn needs_special_group(&self) -> bool;

    /// Index of the item to realize as the seed.
    fn special_item_index(&self) -> usize {
        0
    }

    /// Index of the group whose header to realize as the seed.
    fn special_group_index(&self) -> usize {
        0
    }

    /// Seeds the container running average (and any derived cell size) with
    /// the first realized item's desired size.
    fn register_special_container_size(&mut self, item_index: usize, desired_size: Size);

    /// Seeds the header running average and stored header size with the
    /// first realized header's desired size.
    fn register_special_header_size(&mut self, group_index: usize, desired_size: Size);
}
