// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index, bounds, and extent estimation over unrealized regions.
//!
//! Estimation extrapolates from a realized anchor using running averages.
//! It is intentionally approximate: the goal is an anchor close enough for
//! exact placement to take over, and a total extent stable enough that the
//! viewport does not jitter as averages refine.

use kurbo::{Point, Rect, Size};
use tracing::trace;

use trellis_core::{
    DataSourceError, ElementId, EstimationReference, GroupHeaderStrategy, IndexSearchHint,
    LayoutDataProvider, PointSearchResult, RelativePosition, clamp_index, floor_div,
    remaining_count,
};

use crate::StackingLayout;

/// The anchor estimation starts from: an item index, its bounds, and how the
/// anchor's own extent shifts the first item (inline headers only).
struct Anchor {
    item_index: usize,
    rect: Rect,
    header_adjustment: f64,
    is_header: bool,
}

impl<P: LayoutDataProvider> StackingLayout<P> {
    /// Picks the estimation anchor. When both a header and a container
    /// anchor are supplied, the header wins and item counting starts at its
    /// group's first item.
    fn resolve_anchor(
        &self,
        header_reference: &EstimationReference,
        container_reference: &EstimationReference,
    ) -> Result<Anchor, DataSourceError> {
        let ax = self.base.axes();
        match header_reference.index {
            None => Ok(Anchor {
                item_index: container_reference.index.unwrap_or(0),
                rect: container_reference.bounds,
                header_adjustment: 0.0,
                is_header: false,
            }),
            Some(group_index) => {
                let range = self.provider.group_from_index(group_index)?;
                let mut header_extent = ax.main_extent(header_reference.bounds);
                if header_extent <= 0.0 {
                    header_extent = self.header_sizes.average();
                }
                let header_adjustment =
                    if self.base.group_header_strategy() == GroupHeaderStrategy::Inline {
                        header_extent
                    } else {
                        0.0
                    };
                Ok(Anchor {
                    item_index: range.first_item,
                    rect: header_reference.bounds,
                    header_adjustment,
                    is_header: true,
                })
            }
        }
    }

    /// Stacking-axis origin shared by every estimated item rect.
    fn estimated_item_cross_origin(&self) -> f64 {
        let ax = self.base.axes();
        self.parallel_header_cross() + ax.cross_size(self.base.group_padding_at_start())
    }

    /// Estimates which item should anchor `window`, walking
    /// `floor(distance / average)` items from the reference.
    pub(crate) fn estimate_item_index_from_window(
        &self,
        header_reference: &EstimationReference,
        container_reference: &EstimationReference,
        window: Rect,
    ) -> Result<(usize, Rect), DataSourceError> {
        let total_items = self.provider.total_item_count()?;
        debug_assert!(total_items > 0, "cannot estimate an item index with no items");

        let ax = self.base.axes();
        let anchor = self.resolve_anchor(header_reference, container_reference)?;
        let mut reference_point = ax.main_origin(anchor.rect);
        let average = self.container_sizes.average();

        let item_delta = match ax.reference_direction(anchor.rect, window) {
            RelativePosition::Before => {
                // Count items from past the inline header, if any.
                reference_point += anchor.header_adjustment;
                let distance = ax.main_origin(window) - reference_point;
                if distance > 0.0 {
                    floor_div(distance, average)
                } else {
                    0
                }
            }
            RelativePosition::After => {
                let distance = ax.main_end(window) - reference_point;
                if distance < 0.0 && !anchor.is_header {
                    floor_div(distance, average)
                } else {
                    // Estimating backwards from a header clamps to that
                    // group's first item.
                    0
                }
            }
            RelativePosition::Inside => 0,
        };

        let target_index = clamp_index(anchor.item_index as i64 + item_delta, total_items);
        let item_delta = target_index as i64 - anchor.item_index as i64;
        let calculated_position = reference_point + item_delta as f64 * average;

        let target_rect = ax.rect(
            calculated_position,
            self.estimated_item_cross_origin(),
            average,
            0.0,
        );
        Ok((target_index, target_rect))
    }

    /// Estimates which group header should anchor `window` by walking group
    /// extents forward or backward from the reference header.
    ///
    /// The forward walk advances a candidate position one group at a time,
    /// stepping back if a large group overshoots the window entirely.
    pub(crate) fn estimate_group_index_from_window(
        &self,
        header_reference: &EstimationReference,
        window: Rect,
    ) -> Result<(usize, Rect), DataSourceError> {
        let total_groups = self.provider.total_group_count()?;
        debug_assert!(total_groups > 0, "cannot estimate a group index with no groups");

        let ax = self.base.axes();
        let average_header = self.header_sizes.average();
        let reference_header_extent = if ax.main_extent(header_reference.bounds) > 0.0 {
            ax.main_extent(header_reference.bounds)
        } else {
            average_header
        };

        let near_edge = ax.main_origin(window);
        let far_edge = ax.main_end(window);
        debug_assert!(near_edge <= far_edge, "window is inverted");

        let mut calculated_position = ax.main_origin(header_reference.bounds);
        let mut target_group = header_reference.index.unwrap_or(0);

        if calculated_position + reference_header_extent < near_edge {
            // The reference header is before the window; walk forward. A
            // candidate is accepted only if it does not overshoot the
            // window, otherwise the previous group keeps the anchor.
            let items_in_group = self.provider.group_from_index(target_group)?.item_count;
            let mut candidate_position = calculated_position
                + self.virtualized_group_extent(items_in_group as f64, reference_header_extent);

            while target_group + 1 < total_groups {
                if far_edge < candidate_position {
                    // That group was big; it already covers the window.
                    break;
                } else if candidate_position + average_header < near_edge {
                    target_group += 1;
                    calculated_position = candidate_position;
                    let items = self.provider.group_from_index(target_group)?.item_count;
                    candidate_position = calculated_position
                        + self.virtualized_group_extent(items as f64, average_header);
                } else {
                    // This header lands in the window.
                    target_group += 1;
                    calculated_position = candidate_position;
                    break;
                }
            }
        } else if far_edge < calculated_position {
            // The reference header is past the window; walk backward until
            // we re-enter it (or run out of groups).
            while target_group > 0 {
                target_group -= 1;
                let items = self.provider.group_from_index(target_group)?.item_count;
                calculated_position -=
                    self.virtualized_group_extent(items as f64, average_header);
                if calculated_position <= far_edge {
                    break;
                }
            }
        }

        let main_extent = if Some(target_group) == header_reference.index {
            reference_header_extent
        } else {
            average_header
        };
        let target_rect = ax.rect(
            calculated_position,
            ax.cross_size(self.base.group_padding_at_start()),
            main_extent,
            self.header_cross(),
        );
        Ok((target_group, target_rect))
    }

    /// Estimates the bounds of the unrealized item `target_index`.
    pub(crate) fn estimate_container_location(
        &self,
        target_index: usize,
        header_reference: &EstimationReference,
        container_reference: &EstimationReference,
    ) -> Result<Rect, DataSourceError> {
        let total_items = self.provider.total_item_count()?;
        debug_assert!(total_items > 0, "cannot place an item with no items");
        debug_assert!(target_index < total_items, "target item index out of range");

        let ax = self.base.axes();
        let anchor = self.resolve_anchor(header_reference, container_reference)?;

        // Estimating backwards from a header clamps to the group's first
        // item.
        let target_index = if anchor.is_header {
            target_index.max(anchor.item_index)
        } else {
            target_index
        };

        let reference_point = ax.main_origin(anchor.rect) + anchor.header_adjustment;
        let average = self.container_sizes.average();
        let item_delta = target_index as i64 - anchor.item_index as i64;

        Ok(ax.rect(
            reference_point + item_delta as f64 * average,
            self.estimated_item_cross_origin(),
            average,
            0.0,
        ))
    }

    /// Estimates the bounds of the unrealized header `target_group`.
    pub(crate) fn estimate_header_location(
        &self,
        target_group: usize,
        header_reference: &EstimationReference,
        container_reference: &EstimationReference,
        _window: Rect,
    ) -> Result<Rect, DataSourceError> {
        let total_items = self.provider.total_item_count()?;
        let total_groups = self.provider.total_group_count()?;
        debug_assert!(total_groups > 0, "cannot place a header with no groups");
        debug_assert!(target_group < total_groups, "target group index out of range");

        let ax = self.base.axes();
        let average_header = self.header_sizes.average();
        let reference_header_extent = if ax.main_extent(header_reference.bounds) > 0.0 {
            ax.main_extent(header_reference.bounds)
        } else {
            average_header
        };
        let reference_group = header_reference.index.unwrap_or(0);

        let calculated_position;
        if target_group == reference_group || target_group == reference_group + 1 {
            // Adjacent header: a realized container in the reference group
            // gives a better estimate than group-size averages.
            let range = self.provider.group_from_index(reference_group)?;
            let container_in_group = container_reference.index.is_some_and(|index| {
                range.first_item <= index && index < range.first_item + range.item_count
            });

            if container_in_group {
                let container_index = container_reference.index.unwrap_or(0);
                let average = self.container_sizes.average();
                let reference_item_extent = if ax.main_extent(container_reference.bounds) > 0.0 {
                    ax.main_extent(container_reference.bounds)
                } else {
                    average
                };
                let index_in_group = container_index - range.first_item;
                let item_reference = ax.main_origin(container_reference.bounds);

                if target_group == reference_group {
                    // The header immediately before our item.
                    let mut position = item_reference - index_in_group as f64 * average;
                    if self.base.group_header_strategy() == GroupHeaderStrategy::Inline {
                        position -= reference_header_extent;
                    }
                    calculated_position = position;
                } else {
                    // The header immediately after our item: the item we
                    // know about, then the rest of its group by average.
                    let remaining_in_group =
                        range.item_count.saturating_sub(index_in_group + 1);
                    calculated_position = item_reference
                        + reference_item_extent
                        + remaining_in_group as f64 * average;
                }
            } else {
                let mut position = ax.main_origin(header_reference.bounds);
                if target_group == reference_group + 1 {
                    position += self
                        .virtualized_group_extent(range.item_count as f64, reference_header_extent);
                }
                calculated_position = position;
            }
        } else {
            let reference_point = ax.main_origin(header_reference.bounds);
            let relative_position = if reference_group < target_group {
                RelativePosition::Before
            } else {
                RelativePosition::After
            };

            let first_item = self.provider.group_from_index(reference_group)?.first_item;
            let remaining_groups = remaining_count(reference_group, total_groups, relative_position);
            let remaining_items = remaining_count(first_item, total_items, relative_position);

            if remaining_groups > 0 {
                let average_items_per_group = remaining_items as f64 / remaining_groups as f64;
                let average_group_extent = self.average_group_extent(average_items_per_group);
                let group_delta = target_group as i64 - reference_group as i64;
                calculated_position = reference_point + average_group_extent * group_delta as f64;
            } else {
                calculated_position = reference_point;
            }
        }

        let main_extent = if target_group == reference_group {
            reference_header_extent
        } else {
            average_header
        };
        Ok(ax.rect(
            calculated_position,
            ax.cross_size(self.base.group_padding_at_start()),
            main_extent,
            self.header_cross(),
        ))
    }

    /// Extent of an ungrouped panel: the realized tail exactly, the rest by
    /// average.
    pub(crate) fn estimate_non_grouped_extent(
        &self,
        container_reference: &EstimationReference,
        _window: Rect,
    ) -> Result<Size, DataSourceError> {
        let total_items = self.provider.total_item_count()?;
        let ax = self.base.axes();
        let reference_index = container_reference.index.unwrap_or(0);

        // Containers are variable size, so everything past the last realized
        // one goes by the running average.
        let mut distance = 0.0;
        if total_items > reference_index + 1 {
            distance =
                self.average_extent_of_items((total_items - (reference_index + 1)) as f64);
        }

        let main = distance
            + ax.main_end(container_reference.bounds)
            + ax.main_size(self.base.group_padding_at_end());

        trace!(total_items, reference_index, main, "estimated ungrouped extent");
        Ok(ax.size(main, self.furthest_cross_extent))
    }

    /// Extent of a grouped panel: exact to the end of the reference group,
    /// then remaining groups at the average group extent.
    pub(crate) fn estimate_grouped_extent(
        &self,
        header_reference: &EstimationReference,
        container_reference: &EstimationReference,
        _window: Rect,
    ) -> Result<Size, DataSourceError> {
        debug_assert!(
            self.base.is_grouping() && self.header_size.is_some(),
            "grouped extent estimation requires grouping and a seeded header"
        );

        let total_items = self.provider.total_item_count()?;
        let total_groups = self.provider.total_group_count()?;
        let ax = self.base.axes();

        let average_header = self.header_sizes.average();
        let reference_header_extent = if ax.main_extent(header_reference.bounds) > 0.0 {
            ax.main_extent(header_reference.bounds)
        } else {
            average_header
        };

        let reference_group = header_reference.index.unwrap_or(0);
        let range = self.provider.group_from_index(reference_group)?;

        let mut reference_point;
        let container_usable = container_reference
            .index
            .is_some_and(|index| index >= range.first_item);
        if container_usable {
            // A realized item in the group pins the estimate better than the
            // header alone: finish its group by average, then make sure the
            // group's header does not stick out past that.
            let container_index = container_reference.index.unwrap_or(0);
            debug_assert!(
                container_index < range.first_item + range.item_count,
                "container reference outside its group"
            );
            reference_point = ax.main_end(container_reference.bounds);

            let index_in_group = container_index - range.first_item;
            let items_left = range.item_count.saturating_sub(index_in_group + 1);
            reference_point += self.container_sizes.average() * items_left as f64;

            let header_end = ax.main_origin(header_reference.bounds) + reference_header_extent;
            if header_end > reference_point {
                reference_point = header_end;
            }

            reference_point += ax.main_size(self.base.group_padding_at_end());
        } else {
            // No realized item here; the whole group goes by counts and
            // averages. The group extent includes padding at both ends, but
            // the header position already absorbed the leading padding.
            reference_point = ax.main_origin(header_reference.bounds)
                + self.virtualized_group_extent(range.item_count as f64, reference_header_extent);
            reference_point -= ax.main_size(self.base.group_padding_at_start());
        }

        let remaining_groups =
            remaining_count(reference_group + 1, total_groups, RelativePosition::Before);
        let remaining_items = remaining_count(
            range.first_item + range.item_count,
            total_items,
            RelativePosition::Before,
        );
        if remaining_groups > 0 {
            let average_items_per_group = remaining_items as f64 / remaining_groups as f64;
            reference_point +=
                remaining_groups as f64 * self.average_group_extent(average_items_per_group);
        }

        trace!(
            total_groups,
            reference_group,
            extent = reference_point,
            "estimated grouped extent"
        );
        Ok(ax.size(reference_point, self.furthest_cross_extent))
    }

    /// Estimates the item (or insertion slot) closest to `point` by dividing
    /// its distance from the reference by the average container extent.
    pub(crate) fn index_from_point(
        &self,
        requesting_insertion_index: bool,
        point: Point,
        reference: &EstimationReference,
        _window: Rect,
    ) -> Result<PointSearchResult, DataSourceError> {
        let total_items = self.provider.total_item_count()?;
        debug_assert!(total_items > 0, "cannot look up a point with no items");

        let ax = self.base.axes();
        let reference_index = reference.index.unwrap_or(0);
        let near_edge = ax.main_origin(reference.bounds);
        let far_edge = ax.main_end(reference.bounds);
        let position = ax.main_pos(point);
        let average = self.container_sizes.average();

        let (hint, raw_index) = if position < near_edge && reference_index > 0 {
            // Items before the reference end at its near edge.
            let delta = floor_div(position - near_edge, average);
            (IndexSearchHint::SearchBackwards, reference_index as i64 + delta)
        } else if position > far_edge && reference_index + 1 < total_items {
            // Items after the reference start at its far edge.
            let delta = floor_div(position - far_edge, average);
            (IndexSearchHint::SearchForwards, reference_index as i64 + 1 + delta)
        } else {
            (IndexSearchHint::Exact, reference_index as i64)
        };

        let mut index = clamp_index(raw_index, total_items);

        if requesting_insertion_index && hint == IndexSearchHint::Exact {
            // Past the midpoint of the container under the point, insert at
            // the next index.
            if position - near_edge >= ax.main_extent(reference.bounds) / 2.0 {
                index += 1;
            }
        }

        Ok(PointSearchResult {
            hint,
            element: ElementId::Item(index),
        })
    }

    /// Extent of a group holding `items_in_group` items under a header of
    /// `header_extent`, including the inter-group distance.
    ///
    /// Parallel headers run beside their items, so the group is as long as
    /// the larger of the two; inline headers prepend to it.
    pub(crate) fn virtualized_group_extent(
        &self,
        items_in_group: f64,
        header_extent: f64,
    ) -> f64 {
        let mut result = self.average_extent_of_items(items_in_group);
        match self.base.group_header_strategy() {
            GroupHeaderStrategy::Parallel => result = result.max(header_extent),
            GroupHeaderStrategy::Inline => result += header_extent,
            GroupHeaderStrategy::None => {
                debug_assert!(false, "group extent queried on an ungrouped layout");
            }
        }
        result + self.base.distance_between_groups()
    }

    pub(crate) fn average_group_extent(&self, average_items_per_group: f64) -> f64 {
        self.virtualized_group_extent(average_items_per_group, self.header_sizes.average())
    }

    pub(crate) fn average_extent_of_items(&self, item_count: f64) -> f64 {
        if item_count > 0.0 {
            self.container_sizes.average() * item_count
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};

    use trellis_core::{
        DataSourceError, ElementId, ElementKind, EstimationReference, GroupHeaderStrategy,
        IndexSearchHint, LayoutStrategy, Orientation,
    };

    use crate::StackingLayout;
    use crate::testing::{StubData, UnavailableData};

    fn seeded_flat(count: usize, extent: f64) -> StackingLayout<StubData> {
        let mut layout = StackingLayout::new(StubData::flat(count));
        layout.set_virtualization_direction(Orientation::Vertical);
        layout.register_special_container_size(0, Size::new(200.0, extent));
        layout
    }

    #[test]
    fn item_index_estimation_at_exact_average_boundaries() {
        let mut layout = seeded_flat(100, 10.0);
        let anchor = EstimationReference::new(0, Rect::new(0.0, 0.0, 200.0, 10.0));

        // Window near edge at exactly 5 average extents.
        let window = Rect::new(0.0, 50.0, 200.0, 150.0);
        let (index, rect) = layout
            .estimate_element_index(ElementKind::Item, &EstimationReference::none(), &anchor, window)
            .unwrap();
        assert_eq!(index, 5);
        assert_eq!(rect.y0, 50.0);

        // Just short of the boundary lands one item earlier.
        let window = Rect::new(0.0, 49.9, 200.0, 150.0);
        let (index, _) = layout
            .estimate_element_index(ElementKind::Item, &EstimationReference::none(), &anchor, window)
            .unwrap();
        assert_eq!(index, 4);
    }

    #[test]
    fn item_index_estimation_clamps_to_collection() {
        let mut layout = seeded_flat(8, 10.0);
        let anchor = EstimationReference::new(0, Rect::new(0.0, 0.0, 200.0, 10.0));
        let window = Rect::new(0.0, 500.0, 200.0, 600.0);
        let (index, _) = layout
            .estimate_element_index(ElementKind::Item, &EstimationReference::none(), &anchor, window)
            .unwrap();
        assert_eq!(index, 7);
    }

    #[test]
    fn backward_estimation_from_header_clamps_to_group_start() {
        let mut layout = StackingLayout::new(StubData::grouped(&[4, 4]));
        layout.set_virtualization_direction(Orientation::Vertical);
        layout.set_group_header_strategy(GroupHeaderStrategy::Inline);
        layout.register_special_container_size(0, Size::new(200.0, 10.0));
        layout.register_special_header_size(0, Size::new(200.0, 20.0));

        // Header of group 1 sits past the window; estimating an item
        // backwards from it stays at the group's first item.
        let header = EstimationReference::new(1, Rect::new(0.0, 300.0, 200.0, 320.0));
        let window = Rect::new(0.0, 0.0, 200.0, 100.0);
        let (index, _) = layout
            .estimate_element_index(ElementKind::Item, &header, &EstimationReference::none(), window)
            .unwrap();
        assert_eq!(index, 4);
    }

    #[test]
    fn container_location_walks_average_extents() {
        let mut layout = seeded_flat(100, 10.0);
        let anchor = EstimationReference::new(2, Rect::new(0.0, 20.0, 200.0, 30.0));
        let bounds = layout
            .estimate_element_bounds(
                ElementId::Item(7),
                &EstimationReference::none(),
                &anchor,
                Rect::new(0.0, 0.0, 200.0, 100.0),
            )
            .unwrap();
        assert_eq!(bounds.y0, 70.0);
        assert_eq!(bounds.height(), 10.0);
    }

    #[test]
    fn ungrouped_extent_combines_realized_tail_and_average() {
        let mut layout = seeded_flat(100, 10.0);
        // Last realized: item 9 ending at 100.
        let last = EstimationReference::new(9, Rect::new(0.0, 90.0, 200.0, 100.0));
        let extent = layout
            .estimate_panel_extent(
                &EstimationReference::none(),
                &last,
                Rect::new(0.0, 0.0, 200.0, 600.0),
            )
            .unwrap();
        // 90 unrealized items at the average of 10, past the realized 100.
        assert_eq!(extent.height, 1000.0);
    }

    #[test]
    fn grouped_extent_prefers_container_anchor() {
        let mut layout = StackingLayout::new(StubData::grouped(&[10, 10]));
        layout.set_virtualization_direction(Orientation::Vertical);
        layout.set_group_header_strategy(GroupHeaderStrategy::Inline);
        layout.register_special_container_size(0, Size::new(200.0, 10.0));
        layout.register_special_header_size(0, Size::new(200.0, 20.0));

        let header = EstimationReference::new(0, Rect::new(0.0, 0.0, 200.0, 20.0));
        // Item 4 realized, ending at 70.
        let container = EstimationReference::new(4, Rect::new(0.0, 60.0, 200.0, 70.0));
        let extent = layout
            .estimate_panel_extent(&header, &container, Rect::new(0.0, 0.0, 200.0, 600.0))
            .unwrap();
        // 5 items left in group 0 (70 + 50 = 120), then one remaining group:
        // 10 items * 10 + header 20 = 120. Total 240.
        assert_eq!(extent.height, 240.0);
    }

    #[test]
    fn group_index_estimation_walks_forward_over_groups() {
        let mut layout = StackingLayout::new(StubData::grouped(&[5, 5, 5, 5]));
        layout.set_virtualization_direction(Orientation::Vertical);
        layout.set_group_header_strategy(GroupHeaderStrategy::Inline);
        layout.register_special_container_size(0, Size::new(200.0, 10.0));
        layout.register_special_header_size(0, Size::new(200.0, 20.0));

        // Each group: 5 * 10 + 20 header = 70.
        let header = EstimationReference::new(0, Rect::new(0.0, 0.0, 200.0, 20.0));
        let window = Rect::new(0.0, 150.0, 200.0, 220.0);
        let (group, rect) = layout
            .estimate_element_index(
                ElementKind::GroupHeader,
                &header,
                &EstimationReference::none(),
                window,
            )
            .unwrap();
        assert_eq!(group, 2);
        assert_eq!(rect.y0, 140.0);
    }

    #[test]
    fn adjacent_header_estimate_uses_realized_container() {
        let mut layout = StackingLayout::new(StubData::grouped(&[5, 5]));
        layout.set_virtualization_direction(Orientation::Vertical);
        layout.set_group_header_strategy(GroupHeaderStrategy::Inline);
        layout.register_special_container_size(0, Size::new(200.0, 10.0));
        layout.register_special_header_size(0, Size::new(200.0, 20.0));

        let header = EstimationReference::new(0, Rect::new(0.0, 0.0, 200.0, 20.0));
        // Item 2 of group 0 realized at 40..50.
        let container = EstimationReference::new(2, Rect::new(0.0, 40.0, 200.0, 50.0));

        // The next group's header: the known item end plus two average
        // items.
        let bounds = layout
            .estimate_element_bounds(
                ElementId::GroupHeader(1),
                &header,
                &container,
                Rect::new(0.0, 0.0, 200.0, 600.0),
            )
            .unwrap();
        assert_eq!(bounds.y0, 70.0);
    }

    #[test]
    fn point_lookup_divides_by_average_extent() {
        let layout = seeded_flat(100, 10.0);
        let reference = EstimationReference::new(10, Rect::new(0.0, 100.0, 200.0, 110.0));
        let window = Rect::new(0.0, 0.0, 200.0, 600.0);

        // Inside the reference.
        let result = layout
            .estimate_index_from_point(false, Point::new(10.0, 105.0), &reference, window)
            .unwrap();
        assert_eq!(result.hint, IndexSearchHint::Exact);
        assert_eq!(result.element, ElementId::Item(10));

        // Forward: 25 units past the far edge is two items over.
        let result = layout
            .estimate_index_from_point(false, Point::new(10.0, 135.0), &reference, window)
            .unwrap();
        assert_eq!(result.hint, IndexSearchHint::SearchForwards);
        assert_eq!(result.element, ElementId::Item(13));

        // Backward, exactly one average before the near edge.
        let result = layout
            .estimate_index_from_point(false, Point::new(10.0, 90.0), &reference, window)
            .unwrap();
        assert_eq!(result.hint, IndexSearchHint::SearchBackwards);
        assert_eq!(result.element, ElementId::Item(9));
    }

    #[test]
    fn insertion_lookup_rounds_up_past_the_midpoint() {
        let layout = seeded_flat(100, 10.0);
        let reference = EstimationReference::new(10, Rect::new(0.0, 100.0, 200.0, 110.0));
        let window = Rect::new(0.0, 0.0, 200.0, 600.0);

        let result = layout
            .estimate_index_from_point(true, Point::new(10.0, 104.9), &reference, window)
            .unwrap();
        assert_eq!(result.element, ElementId::Item(10));

        let result = layout
            .estimate_index_from_point(true, Point::new(10.0, 105.0), &reference, window)
            .unwrap();
        assert_eq!(result.element, ElementId::Item(11));
    }

    #[test]
    fn provider_failure_aborts_estimation() {
        let mut layout = StackingLayout::new(UnavailableData);
        let err = layout
            .estimate_panel_extent(
                &EstimationReference::none(),
                &EstimationReference::new(0, Rect::new(0.0, 0.0, 10.0, 10.0)),
                Rect::new(0.0, 0.0, 200.0, 600.0),
            )
            .unwrap_err();
        assert_eq!(err, DataSourceError::Unavailable);
    }
}
