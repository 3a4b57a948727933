// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared configuration state and spatial helpers for layout strategies.

use kurbo::{Insets, Point, Size};

use crate::{Axes, Orientation, RelativePosition};

/// How group headers participate in layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupHeaderStrategy {
    /// The collection is ungrouped; there are no headers.
    #[default]
    None,
    /// Each header occupies its own line along the virtualizing axis, ahead
    /// of its group's items.
    Inline,
    /// Each header floats beside its group's first line, consuming
    /// stacking-axis space instead of virtualizing-axis space.
    Parallel,
}

/// Counts the elements that remain between a reference index and one end of
/// the collection, given where the reference sits relative to the window.
///
/// A reference before the window leaves `total - reference_index` elements
/// ahead of it; a reference after the window leaves `reference_index`
/// elements behind it; a reference inside the window leaves nothing to
/// extrapolate over. Serves both remaining-items and remaining-groups
/// queries.
#[must_use]
pub fn remaining_count(reference_index: usize, total: usize, position: RelativePosition) -> usize {
    match position {
        RelativePosition::Before => total.saturating_sub(reference_index),
        RelativePosition::After => reference_index,
        RelativePosition::Inside => 0,
    }
}

/// Configuration shared by every layout strategy: orientation, group header
/// strategy, and group padding bookkeeping.
///
/// Strategies embed one of these and express all geometry through its
/// resolved [`Axes`]. Configuration happens once per layout-pass series;
/// the orientation must not change once queries have begun.
#[derive(Debug, Clone, Default)]
pub struct StrategyBase {
    axes: Axes,
    header_strategy: GroupHeaderStrategy,
    group_padding: Insets,
}

impl StrategyBase {
    /// Creates a base with vertical virtualization, no grouping, and no
    /// padding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scroll direction, re-resolving the axis accessors.
    pub fn set_virtualization_direction(&mut self, orientation: Orientation) {
        self.axes = Axes::new(orientation);
    }

    /// The configured scroll direction.
    #[must_use]
    pub const fn virtualization_direction(&self) -> Orientation {
        self.axes.orientation()
    }

    /// The resolved axis accessors.
    #[must_use]
    pub const fn axes(&self) -> Axes {
        self.axes
    }

    /// Sets how group headers participate in layout.
    pub fn set_group_header_strategy(&mut self, strategy: GroupHeaderStrategy) {
        self.header_strategy = strategy;
    }

    /// The configured group header strategy.
    #[must_use]
    pub const fn group_header_strategy(&self) -> GroupHeaderStrategy {
        self.header_strategy
    }

    /// Returns `true` when the collection is grouped.
    #[must_use]
    pub fn is_grouping(&self) -> bool {
        self.header_strategy != GroupHeaderStrategy::None
    }

    /// Sets the padding around each group (and, when ungrouped, around the
    /// whole panel).
    pub fn set_group_padding(&mut self, padding: Insets) {
        self.group_padding = padding;
    }

    /// The configured group padding.
    #[must_use]
    pub const fn group_padding(&self) -> Insets {
        self.group_padding
    }

    /// The leading padding edges, reduced to a [`Size`].
    #[must_use]
    pub const fn group_padding_at_start(&self) -> Size {
        Size::new(self.group_padding.x0, self.group_padding.y0)
    }

    /// The trailing padding edges, reduced to a [`Size`].
    #[must_use]
    pub const fn group_padding_at_end(&self) -> Size {
        Size::new(self.group_padding.x1, self.group_padding.y1)
    }

    /// Virtualizing-axis gap applied between adjacent groups: the sum of the
    /// leading and trailing padding along that axis.
    #[must_use]
    pub fn distance_between_groups(&self) -> f64 {
        self.axes.main_size(self.group_padding_at_start())
            + self.axes.main_size(self.group_padding_at_end())
    }

    /// Where the very first element of the panel is placed.
    #[must_use]
    pub fn position_of_first_element(&self) -> Point {
        let padding = self.group_padding_at_start();
        Point::new(padding.width, padding.height)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Insets, Point, Size};

    use super::{GroupHeaderStrategy, StrategyBase, remaining_count};
    use crate::{Orientation, RelativePosition};

    #[test]
    fn padding_reduces_to_start_and_end_sizes() {
        let mut base = StrategyBase::new();
        base.set_group_padding(Insets::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(base.group_padding_at_start(), Size::new(1.0, 2.0));
        assert_eq!(base.group_padding_at_end(), Size::new(3.0, 4.0));
        assert_eq!(base.position_of_first_element(), Point::new(1.0, 2.0));
    }

    #[test]
    fn distance_between_groups_follows_orientation() {
        let mut base = StrategyBase::new();
        base.set_group_padding(Insets::new(1.0, 2.0, 3.0, 4.0));

        base.set_virtualization_direction(Orientation::Vertical);
        assert_eq!(base.distance_between_groups(), 6.0);

        base.set_virtualization_direction(Orientation::Horizontal);
        assert_eq!(base.distance_between_groups(), 4.0);
    }

    #[test]
    fn grouping_follows_header_strategy() {
        let mut base = StrategyBase::new();
        assert!(!base.is_grouping());
        base.set_group_header_strategy(GroupHeaderStrategy::Inline);
        assert!(base.is_grouping());
        base.set_group_header_strategy(GroupHeaderStrategy::Parallel);
        assert!(base.is_grouping());
    }

    #[test]
    fn remaining_count_by_relative_position() {
        assert_eq!(remaining_count(3, 10, RelativePosition::Before), 7);
        assert_eq!(remaining_count(3, 10, RelativePosition::After), 3);
        assert_eq!(remaining_count(3, 10, RelativePosition::Inside), 0);
        assert_eq!(remaining_count(12, 10, RelativePosition::Before), 0);
    }
}
