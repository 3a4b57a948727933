// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard navigation over a wrapping grid.
//!
//! In-order neighbors sit on the same line, so cross-orientation actions
//! step the flat index ±1; along-orientation actions jump a whole line.
//! Group boundaries promote/demote between items and headers, and an item
//! index hint threads through header traversal so re-entering a group
//! preserves the user's column.

use kurbo::Rect;

use trellis_core::{
    DataSourceError, ElementId, ElementKind, GroupRange, LayoutDataProvider, NavigationAction,
    clamp_index,
};

use crate::WrappingLayout;

fn contains(range: &GroupRange, item_index: usize) -> bool {
    range.first_item <= item_index && item_index < range.first_item + range.item_count
}

impl<P: LayoutDataProvider> WrappingLayout<P> {
    pub(crate) fn navigation_target(
        &self,
        element: ElementId,
        action: NavigationAction,
        window: Rect,
        item_index_hint: Option<usize>,
    ) -> Result<ElementId, DataSourceError> {
        debug_assert!(
            element.kind() == ElementKind::Item || self.base.is_grouping(),
            "header navigation while ungrouped"
        );

        let total_items = self.provider.total_item_count()?;
        let total_groups = self.provider.total_group_count()?;
        let max_line_length = self.max_stacking_line(window);
        let index = element.index();
        let along = action.is_along(self.base.virtualization_direction());
        let step = action.step() as i64;
        let mut hint = item_index_hint;

        let target = match element {
            ElementId::Item(_) => {
                debug_assert!(index < total_items, "navigation from an out-of-range item");
                if !along {
                    // In-order neighbor on the same line.
                    clamp_index(index as i64 + step, total_items)
                } else if !self.base.is_grouping() {
                    // Jump a whole line, staying in the same column.
                    let next = index as i64 + step * max_line_length as i64;
                    if next >= 0 && next < total_items as i64 {
                        #[allow(clippy::cast_sign_loss, reason = "bounds-checked above")]
                        let next = next as usize;
                        next
                    } else {
                        index
                    }
                } else {
                    self.next_line_item_with_grouping(index, step, max_line_length)?
                }
            }
            ElementId::GroupHeader(_) => {
                debug_assert!(index < total_groups, "navigation from an out-of-range group");
                // In-order navigation out of a header is not trying to hold
                // a column, so the hint does not apply.
                if !along {
                    hint = None;
                }
                clamp_index(index as i64 + step, total_groups)
            }
        };

        if self.base.is_grouping() {
            match element {
                ElementId::Item(_) => {
                    if let Some(header) =
                        self.header_target_for_item_navigation(index, target, step, max_line_length)?
                    {
                        return Ok(ElementId::GroupHeader(header));
                    }
                    Ok(ElementId::Item(target))
                }
                ElementId::GroupHeader(_) => {
                    if let Some(item) = self.item_target_for_header_navigation(
                        index,
                        target,
                        step,
                        max_line_length,
                        hint,
                    )? {
                        return Ok(ElementId::Item(item));
                    }
                    Ok(ElementId::GroupHeader(target))
                }
            }
        } else {
            Ok(ElementId::Item(target))
        }
    }

    /// Resolves "move one line up/down" for a grouped grid: within the
    /// group when the target line exists, otherwise into the nearest
    /// non-empty neighboring group at the same column.
    pub(crate) fn next_line_item_with_grouping(
        &self,
        current_item: usize,
        step: i64,
        max_line_length: usize,
    ) -> Result<usize, DataSourceError> {
        debug_assert!(self.base.is_grouping(), "grouped line navigation while ungrouped");
        debug_assert!(step == 1 || step == -1, "line steps move one line at a time");

        let total_groups = self.provider.total_group_count()?;
        let info = self.provider.group_from_item(current_item)?;
        let line_length = max_line_length as i64;

        let target_index_in_group = info.index_in_group as i64 + line_length * step;

        if target_index_in_group >= 0
            && target_index_in_group / line_length <= (info.item_count as i64 - 1) / line_length
        {
            // The target line exists in this group.
            let group_start = (current_item - info.index_in_group) as i64;
            let clamped = target_index_in_group.min(info.item_count as i64 - 1);
            #[allow(clippy::cast_sign_loss, reason = "line index is non-negative here")]
            let target = (clamped + group_start) as usize;
            return Ok(target);
        }

        // Walk to the nearest non-empty group in the step direction and map
        // to the same column there.
        let column = (info.index_in_group % max_line_length) as i64;
        let mut group_index = info.group_index as i64;
        while 0 <= group_index + step && group_index + step < total_groups as i64 {
            group_index += step;
            #[allow(clippy::cast_sign_loss, reason = "loop condition keeps the index in range")]
            let range = self.provider.group_from_index(group_index as usize)?;
            if range.item_count > 0 {
                let count = range.item_count as i64;
                let column_offset = if step == 1 {
                    0
                } else {
                    // Land on the neighbor's last line.
                    count % line_length - count
                };
                let target_in_group = (count - 1).min(column - column_offset);
                #[allow(clippy::cast_sign_loss, reason = "clamped into the group above")]
                let target = (target_in_group + range.first_item as i64).max(0) as usize;
                return Ok(target);
            }
        }

        Ok(current_item)
    }

    /// Decides whether an item line-step should land on a header instead.
    fn header_target_for_item_navigation(
        &self,
        current_item: usize,
        target_item: usize,
        step: i64,
        max_line_length: usize,
    ) -> Result<Option<usize>, DataSourceError> {
        if step == 0 {
            return Ok(None);
        }

        let current = self.provider.group_from_item(current_item)?;

        if current_item == target_item {
            // The step was clamped at a collection edge.
            let line_in_group = current.index_in_group / max_line_length;
            let lines_in_group = current.item_count.div_ceil(max_line_length);
            debug_assert!(lines_in_group > 0, "an occupied group has at least one line");

            let in_first_line = line_in_group == 0;
            let in_first_group_with_items = current_item == current.index_in_group;
            if in_first_line && in_first_group_with_items && step < 0 {
                // Backing out of the first line lands on the group's header.
                return Ok(Some(current.group_index));
            }

            let total_groups = self.provider.total_group_count()?;
            let total_items = self.provider.total_item_count()?;
            let in_last_line = line_in_group + 1 == lines_in_group;
            let in_last_group_with_items =
                current_item == total_items - current.item_count + current.index_in_group;
            if in_last_line
                && in_last_group_with_items
                && step > 0
                && current.group_index + 1 < total_groups
            {
                return Ok(Some(current.group_index + 1));
            }
            return Ok(None);
        }

        let target = self.provider.group_from_item(target_item)?;
        if current.group_index != target.group_index {
            // Step to the adjacent group's header rather than the target's,
            // so headers of empty groups are not skipped.
            let header = if step < 0 {
                current.group_index
            } else {
                current.group_index + 1
            };
            return Ok(Some(header));
        }
        Ok(None)
    }

    /// Decides whether a header step should land on an item instead,
    /// consulting the item index hint to restore the user's column.
    fn item_target_for_header_navigation(
        &self,
        current_group: usize,
        target_group: usize,
        step: i64,
        max_line_length: usize,
        item_index_hint: Option<usize>,
    ) -> Result<Option<usize>, DataSourceError> {
        if step == 0 {
            return Ok(None);
        }

        let total_items = self.provider.total_item_count()?;
        let current = self.provider.group_from_index(current_group)?;
        let in_last_group_with_items =
            current.item_count > 0 && total_items == current.first_item + current.item_count;

        if current_group == target_group && in_last_group_with_items && step > 0 {
            // Forward from the last populated group's header enters its
            // items.
            let target = match item_index_hint {
                Some(hint) if contains(&current, hint) => hint,
                Some(hint) => self.next_line_item_with_grouping(hint, step, max_line_length)?,
                None => current.first_item,
            };
            return Ok(Some(target));
        }

        if current_group != target_group {
            let target = self.provider.group_from_index(target_group)?;
            if target_group < current_group && target.item_count > 0 {
                // Backward over a boundary into the previous group.
                let item = match item_index_hint {
                    Some(hint) if contains(&target, hint) => hint,
                    Some(hint) => self.next_line_item_with_grouping(hint, step, max_line_length)?,
                    None => target.first_item + target.item_count - 1,
                };
                return Ok(Some(item));
            }
            if target_group > current_group && current.item_count > 0 {
                // Forward from a header enters its own group's items first.
                let item = match item_index_hint {
                    Some(hint) if contains(&current, hint) => hint,
                    Some(hint) => self.next_line_item_with_grouping(hint, step, max_line_length)?,
                    None => current.first_item,
                };
                return Ok(Some(item));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Size};

    use trellis_core::{
        ElementId, GroupHeaderStrategy, LayoutStrategy, NavigationAction, Orientation,
    };

    use crate::WrappingLayout;
    use crate::testing::StubData;

    fn grid_window() -> Rect {
        Rect::new(0.0, 0.0, 300.0, 600.0)
    }

    fn single_column_window() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 600.0)
    }

    fn grouped_grid(groups: &[usize]) -> WrappingLayout<StubData> {
        let mut layout = WrappingLayout::new(StubData::grouped(groups));
        layout.set_virtualization_direction(Orientation::Vertical);
        layout.set_group_header_strategy(GroupHeaderStrategy::Inline);
        layout.set_item_width(Some(100.0));
        layout.set_item_height(Some(50.0));
        layout.register_special_header_size(0, Size::new(300.0, 20.0));
        layout
    }

    #[test]
    fn down_in_single_column_grid_lands_on_next_group_header() {
        // Two groups of 3 in a single-column grid: Down from item 2
        // (group 0's last) must land on group 1's header, not item 3.
        let layout = grouped_grid(&[3, 3]);
        let target = layout
            .target_from_navigation_action(
                ElementId::Item(2),
                NavigationAction::Down,
                single_column_window(),
                None,
            )
            .unwrap();
        assert_eq!(target, ElementId::GroupHeader(1));
    }

    #[test]
    fn cross_axis_step_moves_in_order() {
        let layout = grouped_grid(&[6, 6]);
        let target = layout
            .target_from_navigation_action(
                ElementId::Item(1),
                NavigationAction::Right,
                grid_window(),
                None,
            )
            .unwrap();
        assert_eq!(target, ElementId::Item(2));

        let target = layout
            .target_from_navigation_action(
                ElementId::Item(1),
                NavigationAction::Left,
                grid_window(),
                None,
            )
            .unwrap();
        assert_eq!(target, ElementId::Item(0));
    }

    #[test]
    fn down_jumps_a_line_within_a_group() {
        let layout = grouped_grid(&[6, 6]);
        // Item 1 (line 0, column 1) -> item 4 (line 1, column 1).
        let target = layout
            .target_from_navigation_action(
                ElementId::Item(1),
                NavigationAction::Down,
                grid_window(),
                None,
            )
            .unwrap();
        assert_eq!(target, ElementId::Item(4));
    }

    #[test]
    fn ungrouped_line_jump_preserves_column() {
        let mut layout = WrappingLayout::new(StubData::flat(30));
        layout.set_virtualization_direction(Orientation::Vertical);
        layout.set_item_width(Some(100.0));
        layout.set_item_height(Some(50.0));

        let target = layout
            .target_from_navigation_action(
                ElementId::Item(4),
                NavigationAction::Down,
                grid_window(),
                None,
            )
            .unwrap();
        assert_eq!(target, ElementId::Item(7));

        let target = layout
            .target_from_navigation_action(
                ElementId::Item(4),
                NavigationAction::Up,
                grid_window(),
                None,
            )
            .unwrap();
        assert_eq!(target, ElementId::Item(1));
    }

    #[test]
    fn hint_restores_column_when_reentering_a_group() {
        let layout = grouped_grid(&[6, 6]);

        // Up from group 1's header with a hint of item 4 (column 1 of group
        // 0) restores that exact item.
        let target = layout
            .target_from_navigation_action(
                ElementId::GroupHeader(1),
                NavigationAction::Up,
                grid_window(),
                Some(4),
            )
            .unwrap();
        assert_eq!(target, ElementId::Item(4));

        // Down from group 1's header with a hint from group 0 carries the
        // column into group 1's first line.
        let target = layout
            .target_from_navigation_action(
                ElementId::GroupHeader(1),
                NavigationAction::Down,
                grid_window(),
                Some(4),
            )
            .unwrap();
        assert_eq!(target, ElementId::Item(7));
    }

    #[test]
    fn without_hint_header_traversal_uses_group_edges() {
        let layout = grouped_grid(&[6, 6]);

        let target = layout
            .target_from_navigation_action(
                ElementId::GroupHeader(1),
                NavigationAction::Up,
                grid_window(),
                None,
            )
            .unwrap();
        assert_eq!(target, ElementId::Item(5));

        let target = layout
            .target_from_navigation_action(
                ElementId::GroupHeader(0),
                NavigationAction::Down,
                grid_window(),
                None,
            )
            .unwrap();
        assert_eq!(target, ElementId::Item(0));
    }

    #[test]
    fn cross_axis_out_of_header_ignores_hint() {
        let layout = grouped_grid(&[6, 6]);
        // Right out of a header is in-order traversal; the hint must not
        // drag focus to a column.
        let target = layout
            .target_from_navigation_action(
                ElementId::GroupHeader(1),
                NavigationAction::Right,
                grid_window(),
                Some(4),
            )
            .unwrap();
        // In-order forward from header 1 enters group 1's first item.
        assert_eq!(target, ElementId::Item(6));
    }

    #[test]
    fn empty_groups_are_not_skipped() {
        let layout = grouped_grid(&[3, 0, 3]);

        let target = layout
            .target_from_navigation_action(
                ElementId::Item(2),
                NavigationAction::Down,
                single_column_window(),
                None,
            )
            .unwrap();
        assert_eq!(target, ElementId::GroupHeader(1));

        let target = layout
            .target_from_navigation_action(
                ElementId::GroupHeader(1),
                NavigationAction::Down,
                single_column_window(),
                None,
            )
            .unwrap();
        assert_eq!(target, ElementId::GroupHeader(2));
    }
}
