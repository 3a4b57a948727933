// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index, bounds, and extent estimation over unrealized regions.
//!
//! Ungrouped grids are fully determined by the line decomposition, so their
//! "estimates" are exact. Grouped grids extrapolate line deltas from an
//! anchor and keep a per-group cumulative extent cache so panel-extent
//! queries do not walk every group each pass.

use kurbo::{Point, Rect, Size};
use tracing::trace;

use trellis_core::{
    DataSourceError, ElementId, EstimationReference, GroupHeaderStrategy, IndexSearchHint,
    LayoutDataProvider, PointSearchResult, RelativePosition, are_close, clamp_index, floor_div,
};

use crate::WrappingLayout;
use crate::strategy::GroupCache;

/// The anchor grouped estimation starts from.
struct Anchor {
    item_index: usize,
    /// Index-in-group the line decomposition runs on. Zero for header
    /// anchors; for container anchors the flat index stands in (an accepted
    /// approximation; grouped estimates are corrected by exact placement).
    index_in_group: usize,
    rect: Rect,
    /// Resolved virtualizing-axis extent of the anchor header.
    header_extent: f64,
    is_header: bool,
}

impl<P: LayoutDataProvider> WrappingLayout<P> {
    fn resolve_anchor(
        &self,
        header_reference: &EstimationReference,
        container_reference: &EstimationReference,
    ) -> Result<Anchor, DataSourceError> {
        let ax = self.base.axes();
        match header_reference.index {
            None => {
                let item_index = container_reference.index.unwrap_or(0);
                Ok(Anchor {
                    item_index,
                    index_in_group: item_index,
                    rect: container_reference.bounds,
                    header_extent: 0.0,
                    is_header: false,
                })
            }
            Some(group_index) => {
                let range = self.provider.group_from_index(group_index)?;
                let mut header_extent = ax.main_extent(header_reference.bounds);
                if header_extent <= 0.0 {
                    header_extent = self.average_header_extent();
                }
                Ok(Anchor {
                    item_index: range.first_item,
                    index_in_group: 0,
                    rect: header_reference.bounds,
                    header_extent,
                    is_header: true,
                })
            }
        }
    }

    /// Estimates which item should anchor `window`.
    pub(crate) fn estimate_item_index_from_window(
        &self,
        header_reference: &EstimationReference,
        container_reference: &EstimationReference,
        window: Rect,
    ) -> Result<(usize, Rect), DataSourceError> {
        let total_items = self.provider.total_item_count()?;
        debug_assert!(total_items > 0, "cannot estimate an item index with no items");
        let max_stacking_lines = self.max_stacking_line(window);
        let ax = self.base.axes();
        let cell_main = ax.main_size(self.cell_size);

        if !self.base.is_grouping() {
            // Exact: whole virtualizing lines from the content start.
            debug_assert!(self.cell_size_set, "estimation requires a cell size");
            let distance_from_start = (ax.main_origin(window)
                - ax.main_size(self.base.group_padding_at_start()))
            .max(0.0);
            let line_distance = floor_div(distance_from_start, cell_main);
            let target_index =
                clamp_index(line_distance * max_stacking_lines as i64, total_items);

            let line = self.line_info(window, target_index);
            let main = line.virtualizing_line as f64 * cell_main
                + ax.main_size(self.base.group_padding_at_start());
            let rect = Rect::from_origin_size(
                ax.point(main, self.item_stacking_position(line.stacking_line)),
                self.cell_size,
            );
            return Ok((target_index, rect));
        }

        let anchor = self.resolve_anchor(header_reference, container_reference)?;
        let mut reference_point = ax.main_origin(anchor.rect);
        let item_extent = cell_main.max(1.0);
        let header_adjustment =
            if anchor.is_header && self.base.group_header_strategy() == GroupHeaderStrategy::Inline
            {
                anchor.header_extent
            } else {
                0.0
            };

        let lines_delta = match ax.reference_direction(anchor.rect, window) {
            RelativePosition::Before => {
                // Count lines from past the inline header, if any.
                reference_point += header_adjustment;
                let distance = ax.main_origin(window) - reference_point;
                if distance > 0.0 {
                    floor_div(distance, item_extent)
                } else {
                    0
                }
            }
            RelativePosition::After => {
                let distance = ax.main_end(window) - reference_point;
                if distance < 0.0 && !anchor.is_header {
                    floor_div(distance, item_extent)
                } else {
                    // Estimating backwards from a header clamps to that
                    // group's first item.
                    0
                }
            }
            RelativePosition::Inside => 0,
        };

        let (target_index, target_stacking_line, calculated_position) = if lines_delta != 0 {
            let reference_line = self.line_info(window, anchor.index_in_group);
            // Whole lines of items, landing on the first cell of the target
            // line.
            let raw_target = anchor.item_index as i64
                + max_stacking_lines as i64 * lines_delta
                - reference_line.stacking_line as i64;
            let target_index = clamp_index(raw_target, total_items);

            // In case the index was clipped, re-derive the line offset.
            let target_index_in_group = (target_index as i64 - anchor.item_index as i64
                + anchor.index_in_group as i64)
                .max(0);
            #[allow(
                clippy::cast_sign_loss,
                reason = "clamped non-negative on the previous line"
            )]
            let target_line = self.line_info(window, target_index_in_group as usize);
            let lines_delta =
                target_line.virtualizing_line as i64 - reference_line.virtualizing_line as i64;
            (
                target_index,
                target_line.stacking_line,
                reference_point + lines_delta as f64 * item_extent,
            )
        } else {
            let line = self.line_info(window, anchor.index_in_group);
            (anchor.item_index, line.stacking_line, reference_point)
        };

        let rect = Rect::from_origin_size(
            ax.point(
                calculated_position,
                self.item_stacking_position(target_stacking_line),
            ),
            self.cell_size,
        );
        Ok((target_index, rect))
    }

    /// Estimates which group header should anchor `window` by walking group
    /// extents forward or backward from the reference header.
    pub(crate) fn estimate_group_index_from_window(
        &self,
        header_reference: &EstimationReference,
        window: Rect,
    ) -> Result<(usize, Rect), DataSourceError> {
        let total_items = self.provider.total_item_count()?;
        let total_groups = self.provider.total_group_count()?;
        debug_assert!(total_groups > 0, "cannot estimate a group index with no groups");

        let ax = self.base.axes();
        let max_stacking_lines = if total_items > 0 {
            self.max_stacking_line(window)
        } else {
            1
        };

        let average_header = self.average_header_extent();
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
            // The reference header is before the window; walk forward,
            // accepting a candidate only if it does not overshoot.
            let items = self.provider.group_from_index(target_group)?.item_count;
            let mut candidate_position = calculated_position
                + self.virtualized_group_extent(items, max_stacking_lines, reference_header_extent);

            while target_group + 1 < total_groups {
                if far_edge < candidate_position {
                    // That group was big; it already covers the window.
                    break;
                } else if candidate_position + average_header < near_edge {
                    target_group += 1;
                    calculated_position = candidate_position;
                    let items = self.provider.group_from_index(target_group)?.item_count;
                    candidate_position = calculated_position
                        + self.virtualized_group_extent(items, max_stacking_lines, average_header);
                } else {
                    // This header lands in the window.
                    target_group += 1;
                    calculated_position = candidate_position;
                    break;
                }
            }
        } else if far_edge < calculated_position {
            // The reference header is past the window; walk backward.
            while target_group > 0 {
                target_group -= 1;
                let items = self.provider.group_from_index(target_group)?.item_count;
                calculated_position -=
                    self.virtualized_group_extent(items, max_stacking_lines, average_header);
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
        let rect = ax.rect(
            calculated_position,
            ax.cross_size(self.base.group_padding_at_start()),
            main_extent,
            self.header_cross(),
        );
        Ok((target_group, rect))
    }

    /// Estimates the bounds of the unrealized item `target_index`.
    pub(crate) fn estimate_container_location(
        &self,
        target_index: usize,
        header_reference: &EstimationReference,
        container_reference: &EstimationReference,
        window: Rect,
    ) -> Result<Rect, DataSourceError> {
        let total_items = self.provider.total_item_count()?;
        debug_assert!(total_items > 0, "cannot place an item with no items");
        debug_assert!(target_index < total_items, "target item index out of range");
        debug_assert!(self.cell_size_set, "estimation requires a cell size");

        let ax = self.base.axes();
        let cell_main = ax.main_size(self.cell_size);
        let target_index = clamp_index(target_index as i64, total_items);

        if !self.base.is_grouping() {
            let line = self.line_info(window, target_index);
            debug_assert!(line.lines_per_stack > 0, "line decomposition degenerated");
            let main = line.virtualizing_line as f64 * cell_main
                + ax.main_size(self.base.group_padding_at_start());
            return Ok(Rect::from_origin_size(
                ax.point(main, self.item_stacking_position(line.stacking_line)),
                self.cell_size,
            ));
        }

        let anchor = self.resolve_anchor(header_reference, container_reference)?;
        // Estimating backwards from a header clamps to the group's first
        // item; the inline header only adjusts when counting forward.
        let header_adjustment = if anchor.is_header
            && self.base.group_header_strategy() == GroupHeaderStrategy::Inline
            && target_index >= anchor.item_index
        {
            anchor.header_extent
        } else {
            0.0
        };
        let target_index = if anchor.is_header {
            target_index.max(anchor.item_index)
        } else {
            target_index
        };

        let reference_point = ax.main_origin(anchor.rect) + header_adjustment;
        let target_index_in_group = (target_index as i64 - anchor.item_index as i64
            + anchor.index_in_group as i64)
            .max(0);
        #[allow(
            clippy::cast_sign_loss,
            reason = "clamped non-negative on the previous line"
        )]
        let target_line = self.line_info(window, target_index_in_group as usize);
        let reference_line = self.line_info(window, anchor.index_in_group);
        let lines_delta =
            target_line.virtualizing_line as i64 - reference_line.virtualizing_line as i64;

        Ok(Rect::from_origin_size(
            ax.point(
                reference_point + lines_delta as f64 * cell_main,
                self.item_stacking_position(target_line.stacking_line),
            ),
            self.cell_size,
        ))
    }

    /// Estimates the bounds of the unrealized header `target_group`.
    pub(crate) fn estimate_header_location(
        &self,
        target_group: usize,
        header_reference: &EstimationReference,
        container_reference: &EstimationReference,
        window: Rect,
    ) -> Result<Rect, DataSourceError> {
        let total_items = self.provider.total_item_count()?;
        let total_groups = self.provider.total_group_count()?;
        debug_assert!(total_groups > 0, "cannot place a header with no groups");
        debug_assert!(target_group < total_groups, "target group index out of range");

        let ax = self.base.axes();
        let cell_main = ax.main_size(self.cell_size);
        let max_stacking_lines = if total_items > 0 {
            self.max_stacking_line(window)
        } else {
            1
        };
        let average_header = self.average_header_extent();
        let reference_header_extent = if ax.main_extent(header_reference.bounds) > 0.0 {
            ax.main_extent(header_reference.bounds)
        } else {
            average_header
        };
        let reference_group = header_reference.index.unwrap_or(0);

        let calculated_position;
        if target_group == reference_group || target_group == reference_group + 1 {
            // Adjacent header: a realized container in the reference group
            // gives a better estimate than group-extent averages.
            let range = self.provider.group_from_index(reference_group)?;
            let container_in_group = container_reference.index.is_some_and(|index| {
                range.first_item <= index && index < range.first_item + range.item_count
            });

            if container_in_group {
                let container_index = container_reference.index.unwrap_or(0);
                let item_index_in_group = container_index - range.first_item;
                let item_reference = ax.main_origin(container_reference.bounds);

                if target_group == reference_group {
                    // The header immediately before our item: back up to the
                    // group's first line.
                    let lines_delta = -((item_index_in_group / max_stacking_lines) as i64);
                    let mut position = item_reference + lines_delta as f64 * cell_main;
                    if self.base.group_header_strategy() == GroupHeaderStrategy::Inline {
                        position -= reference_header_extent;
                    }
                    calculated_position = position;
                } else {
                    // The header immediately after our item: forward to the
                    // group's last line, then the inter-group gap.
                    let lines_delta = ((range.item_count - 1) / max_stacking_lines) as i64
                        - (item_index_in_group / max_stacking_lines) as i64;
                    calculated_position = item_reference
                        + lines_delta as f64 * cell_main
                        + self.base.distance_between_groups();
                }
            } else {
                let mut position = ax.main_origin(header_reference.bounds);
                if target_group == reference_group + 1 {
                    position += self.virtualized_group_extent(
                        range.item_count,
                        max_stacking_lines,
                        reference_header_extent,
                    );
                }
                calculated_position = position;
            }
        } else {
            // Walk group extents from the reference header, spending the
            // reference's actual size on the first forward step.
            let mut position = ax.main_origin(header_reference.bounds);
            let mut current_group = reference_group;

            if current_group < target_group {
                let items = self.provider.group_from_index(reference_group)?.item_count;
                position += self.virtualized_group_extent(
                    items,
                    max_stacking_lines,
                    reference_header_extent,
                );
                current_group += 1;
            }
            while current_group < target_group {
                let items = self.provider.group_from_index(current_group)?.item_count;
                position +=
                    self.virtualized_group_extent(items, max_stacking_lines, average_header);
                current_group += 1;
            }
            while current_group > target_group {
                let items = self.provider.group_from_index(current_group)?.item_count;
                position -=
                    self.virtualized_group_extent(items, max_stacking_lines, average_header);
                current_group -= 1;
            }
            calculated_position = position;
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

    /// Extent of an ungrouped grid: uniform cells make this exact.
    pub(crate) fn estimate_non_grouped_extent(
        &self,
        window: Rect,
    ) -> Result<Size, DataSourceError> {
        let total_items = self.provider.total_item_count()?;
        debug_assert!(self.cell_size_set, "extent estimation requires a cell size");
        let ax = self.base.axes();

        let max_stacking_line = self.max_stacking_line(window);
        debug_assert!(max_stacking_line > 0, "line decomposition degenerated");

        let main = self.virtualized_extent_of_items(total_items, max_stacking_line)
            + ax.main_size(self.base.group_padding_at_start())
            + ax.main_size(self.base.group_padding_at_end());
        let cross = self.item_stacking_position(max_stacking_line.min(total_items))
            + ax.cross_size(self.base.group_padding_at_end());
        Ok(ax.size(main, cross))
    }

    /// Extent of a grouped grid, from the cumulative group cache corrected
    /// by where the reference group actually landed.
    pub(crate) fn estimate_grouped_extent(
        &mut self,
        header_reference: &EstimationReference,
        _container_reference: &EstimationReference,
        window: Rect,
    ) -> Result<Size, DataSourceError> {
        let total_items = self.provider.total_item_count()?;
        let total_groups = self.provider.total_group_count()?;
        debug_assert!(total_groups > 0, "grouped extent requires groups");
        let ax = self.base.axes();

        let reference_header_extent = if ax.main_extent(header_reference.bounds) > 0.0 {
            ax.main_extent(header_reference.bounds)
        } else {
            self.average_header_extent()
        };
        let max_stacking_lines = if total_items > 0 {
            self.max_stacking_line(window)
        } else {
            1
        };

        self.ensure_group_cache(max_stacking_lines)?;

        let reference_group = header_reference.index.unwrap_or(0);
        let item_count = self.provider.group_from_index(reference_group)?.item_count;

        // Where the reference group really ends, from its realized header
        // (net of the leading padding the header position absorbed).
        let reference_point = ax.main_origin(header_reference.bounds)
            - ax.main_size(self.base.group_padding_at_start());
        let end_of_current_group = reference_point
            + self.virtualized_group_extent(
                item_count,
                max_stacking_lines,
                reference_header_extent,
            );

        // The cache predicted both this group's end and the last group's
        // end. Shift the cached total by how far reality has drifted from
        // the prediction here; the unrealized tail keeps its estimate. This
        // is a correction, not a recomputation; exactness would require
        // realizing every group.
        debug_assert!(
            !self.group_cache.end_positions.is_empty(),
            "group cache empty after ensure"
        );
        let mut estimated_extent = self.group_cache.end_positions.last().copied().unwrap_or(0.0);
        let predicted_end = self
            .group_cache
            .end_positions
            .get(reference_group)
            .copied()
            .unwrap_or(0.0);
        estimated_extent += end_of_current_group - predicted_end;

        let cross = if total_items > 0 {
            self.item_stacking_position(max_stacking_lines.min(total_items))
                + ax.cross_size(self.base.group_padding_at_end())
        } else {
            debug_assert!(self.header_size.is_some(), "grouped extent before a header was seeded");
            self.header_cross() + ax.cross_size(self.base.group_padding_at_end())
        };

        Ok(ax.size(estimated_extent, cross))
    }

    /// Rebuilds the cumulative per-group end positions when the group
    /// count, line count, or cell size has changed since they were cached.
    fn ensure_group_cache(&mut self, max_stacking_lines: usize) -> Result<(), DataSourceError> {
        let group_count = self.provider.total_group_count()?;
        let cache = &self.group_cache;
        let stale = group_count != cache.end_positions.len()
            || max_stacking_lines != cache.stacking_lines
            || !are_close(self.cell_size.width, cache.cell_size.width)
            || !are_close(self.cell_size.height, cache.cell_size.height);
        if !stale {
            return Ok(());
        }

        trace!(group_count, max_stacking_lines, "rebuilding group location cache");
        let average_header = self.average_header_extent();
        let mut end_positions = Vec::with_capacity(group_count);
        let mut accumulated = 0.0;
        for group_index in 0..group_count {
            let items = self.provider.group_from_index(group_index)?.item_count;
            accumulated +=
                self.virtualized_group_extent(items, max_stacking_lines, average_header);
            end_positions.push(accumulated);
        }

        self.group_cache = GroupCache {
            end_positions,
            stacking_lines: max_stacking_lines,
            cell_size: self.cell_size,
        };
        Ok(())
    }

    /// Estimates the cell (or insertion slot) under `point` with plain cell
    /// arithmetic around the reference.
    pub(crate) fn index_from_point(
        &self,
        requesting_insertion_index: bool,
        point: Point,
        reference: &EstimationReference,
        window: Rect,
    ) -> Result<PointSearchResult, DataSourceError> {
        debug_assert!(self.cell_size_set, "point lookup requires a cell size");
        let ax = self.base.axes();
        let stacking_lines = self.max_stacking_line(window) as i64;
        debug_assert!(stacking_lines > 0, "line decomposition degenerated");

        // When grouping, work in indices relative to the reference's group.
        let (reference_item_index, total_items) = if self.base.is_grouping() {
            let info = self
                .provider
                .group_from_item(reference.index.unwrap_or(0))?;
            (info.index_in_group, info.item_count)
        } else {
            (
                reference.index.unwrap_or(0),
                self.provider.total_item_count()?,
            )
        };
        let reference_rect = reference.bounds;
        let total = total_items as i64;
        let reference_index = reference_item_index as i64;

        #[allow(
            clippy::cast_possible_truncation,
            reason = "cell deltas are window-bounded; truncation toward zero is the intended rounding"
        )]
        let mut virtualizing_diff = ((ax.main_pos(point) - ax.main_origin(reference_rect))
            / ax.main_size(self.cell_size)) as i64;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "cell deltas are window-bounded; truncation toward zero is the intended rounding"
        )]
        let stacking_diff = ((ax.cross_pos(point) - ax.cross_origin(reference_rect))
            / ax.cross_size(self.cell_size)) as i64;

        // Lock the stacking move into the reference's line.
        let line_position = reference_index % stacking_lines;
        let stacking_diff =
            stacking_diff.clamp(-line_position, (stacking_lines - 1) - line_position);

        // Dragging off the panel boundary pins to the first or last line.
        if reference_index + virtualizing_diff * stacking_lines < 0 {
            virtualizing_diff = -reference_index / stacking_lines;
        } else if reference_index - line_position + virtualizing_diff * stacking_lines > total - 1
        {
            virtualizing_diff = (total - 1 - (reference_index - line_position)) / stacking_lines;
        }

        let mut point_index = reference_index + virtualizing_diff * stacking_lines + stacking_diff;
        if point_index > total {
            // Try the previous line.
            let upper = reference_index + (virtualizing_diff - 1) * stacking_lines + stacking_diff;
            if upper > 0 {
                point_index = upper;
            }
        }

        let mut element_index = point_index.min(total).max(0);

        if requesting_insertion_index {
            #[allow(
                clippy::cast_sign_loss,
                reason = "clamped non-negative above"
            )]
            let line = self.line_info(window, element_index as usize);
            let line_start = self.item_stacking_position(line.stacking_line);
            // Past the midpoint of the cell under the point, insert at the
            // next index.
            if ax.cross_pos(point) - line_start >= ax.cross_size(self.cell_size) / 2.0 {
                element_index += 1;
            }
        }

        // Back to flat indices.
        if self.base.is_grouping() {
            let group_start = reference.index.unwrap_or(0) as i64 - reference_index;
            element_index += group_start;
        }

        #[allow(clippy::cast_sign_loss, reason = "clamped non-negative above")]
        let element_index = element_index.max(0) as usize;
        Ok(PointSearchResult {
            hint: IndexSearchHint::Exact,
            element: ElementId::Item(element_index),
        })
    }

    /// Extent of a group holding `items_in_group` items, including the
    /// inter-group distance.
    pub(crate) fn virtualized_group_extent(
        &self,
        items_in_group: usize,
        max_stacking_line: usize,
        header_extent: f64,
    ) -> f64 {
        let mut result = self.virtualized_extent_of_items(items_in_group, max_stacking_line);
        match self.base.group_header_strategy() {
            GroupHeaderStrategy::Parallel => result = result.max(header_extent),
            GroupHeaderStrategy::Inline => result += header_extent,
            GroupHeaderStrategy::None => {
                debug_assert!(false, "group extent queried on an ungrouped layout");
            }
        }
        result + self.base.distance_between_groups()
    }

    /// Whole virtualizing lines needed for `item_count` cells, as an extent.
    pub(crate) fn virtualized_extent_of_items(
        &self,
        item_count: usize,
        max_stacking_line: usize,
    ) -> f64 {
        debug_assert!(
            self.cell_size_set || item_count == 0,
            "item extents require a cell size"
        );
        debug_assert!(max_stacking_line > 0, "line decomposition degenerated");
        if item_count == 0 {
            return 0.0;
        }
        let virtualizing_lines = item_count.div_ceil(max_stacking_line);
        virtualizing_lines as f64 * self.base.axes().main_size(self.cell_size)
    }
}
