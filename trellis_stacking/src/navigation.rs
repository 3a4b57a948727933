// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard navigation across items and group headers.
//!
//! A flat ±1 step along the orientation, with promotion/demotion between
//! items and headers at group boundaries so traversal passes through each
//! header exactly once per boundary, including headers of empty groups.

use kurbo::Rect;

use trellis_core::{
    DataSourceError, ElementId, LayoutDataProvider, NavigationAction, clamp_index,
};

use crate::StackingLayout;

impl<P: LayoutDataProvider> StackingLayout<P> {
    pub(crate) fn navigation_target(
        &self,
        element: ElementId,
        action: NavigationAction,
        _window: Rect,
        _item_index_hint: Option<usize>,
    ) -> Result<ElementId, DataSourceError> {
        let total = match element {
            ElementId::Item(_) => self.provider.total_item_count()?,
            ElementId::GroupHeader(_) => {
                debug_assert!(self.base.is_grouping(), "header navigation while ungrouped");
                self.provider.total_group_count()?
            }
        };
        let index = element.index();
        debug_assert!(index < total, "navigation from an out-of-range element");

        // Only actions along the layout orientation move through a stack.
        let step: i64 = if action.is_along(self.base.virtualization_direction()) {
            action.step() as i64
        } else {
            0
        };
        let target = clamp_index(index as i64 + step, total);

        if self.base.is_grouping() {
            match element {
                ElementId::Item(_) => {
                    if let Some(header) =
                        self.header_target_for_item_navigation(index, target, step)?
                    {
                        return Ok(ElementId::GroupHeader(header));
                    }
                    Ok(ElementId::Item(target))
                }
                ElementId::GroupHeader(_) => {
                    if let Some(item) =
                        self.item_target_for_header_navigation(index, target, step)?
                    {
                        return Ok(ElementId::Item(item));
                    }
                    Ok(ElementId::GroupHeader(target))
                }
            }
        } else {
            Ok(ElementId::Item(target))
        }
    }

    /// Decides whether an item-to-item step should land on a header instead.
    fn header_target_for_item_navigation(
        &self,
        current_item: usize,
        target_item: usize,
        step: i64,
    ) -> Result<Option<usize>, DataSourceError> {
        if step == 0 {
            return Ok(None);
        }

        let current = self.provider.group_from_item(current_item)?;

        if current_item == target_item {
            // The step was clamped at a collection edge.
            if current_item == 0 && step < 0 {
                // Backing out of the first item lands on its group's header.
                return Ok(Some(current.group_index));
            }

            let total_groups = self.provider.total_group_count()?;
            let total_items = self.provider.total_item_count()?;

            // Going forward from the last item of the last group with items
            // continues into the next (item-less) group's header.
            let in_last_group_with_items =
                current_item == total_items - current.item_count + current.index_in_group;
            if in_last_group_with_items && step > 0 && current.group_index + 1 < total_groups {
                return Ok(Some(current.group_index + 1));
            }
            return Ok(None);
        }

        let target = self.provider.group_from_item(target_item)?;
        if current.group_index != target.group_index {
            // Crossing a group boundary visits the header in between. Going
            // forward, step to the adjacent group rather than the target's,
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

    /// Decides whether a header-to-header step should land on an item
    /// instead.
    fn item_target_for_header_navigation(
        &self,
        current_group: usize,
        target_group: usize,
        step: i64,
    ) -> Result<Option<usize>, DataSourceError> {
        if step == 0 {
            return Ok(None);
        }

        let total_items = self.provider.total_item_count()?;
        let current = self.provider.group_from_index(current_group)?;
        let in_last_group_with_items = current.item_count > 0
            && total_items == current.first_item + current.item_count;

        if current_group == target_group && in_last_group_with_items && step > 0 {
            // Forward from the last populated group's header enters its
            // items.
            return Ok(Some(current.first_item));
        }

        if current_group != target_group {
            let target = self.provider.group_from_index(target_group)?;
            if target_group < current_group && target.item_count > 0 {
                // Backward over a boundary lands on the previous group's
                // last item.
                return Ok(Some(target.first_item + target.item_count - 1));
            }
            if target_group > current_group && current.item_count > 0 {
                // Forward from a header enters its own group's items first.
                return Ok(Some(current.first_item));
            }
        }
        Ok(None)
    }
}
