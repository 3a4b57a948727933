// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation, lookup, and snap-point types shared by the strategies.

use crate::{ElementId, Orientation};

/// A directional keyboard navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    /// Move left.
    Left,
    /// Move right.
    Right,
    /// Move up.
    Up,
    /// Move down.
    Down,
}

impl NavigationAction {
    /// Returns `true` if the action moves along the given scroll direction.
    #[must_use]
    pub const fn is_along(self, orientation: Orientation) -> bool {
        match orientation {
            Orientation::Horizontal => matches!(self, Self::Left | Self::Right),
            Orientation::Vertical => matches!(self, Self::Up | Self::Down),
        }
    }

    /// `-1` for the backward directions (left/up), `+1` for the forward ones.
    #[must_use]
    pub const fn step(self) -> isize {
        match self {
            Self::Left | Self::Up => -1,
            Self::Right | Self::Down => 1,
        }
    }
}

/// How confident a point lookup is about the index it returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSearchHint {
    /// The returned element lies under the point.
    Exact,
    /// The point is before the reference; the estimate may need backward
    /// refinement.
    SearchBackwards,
    /// The point is past the reference; the estimate may need forward
    /// refinement.
    SearchForwards,
}

/// Result of [`LayoutStrategy::estimate_index_from_point`](crate::LayoutStrategy::estimate_index_from_point).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointSearchResult {
    /// Confidence in the returned element.
    pub hint: IndexSearchHint,
    /// The element (or insertion slot) closest to the point.
    pub element: ElementId,
}

/// Evenly spaced scroll-stop offsets along the virtualizing axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegularSnapPoints {
    /// Offset of the first snap point from the near content edge.
    pub near_offset: f64,
    /// Offset of the last snap point from the far content edge.
    pub far_offset: f64,
    /// Distance between consecutive snap points.
    pub spacing: f64,
}

bitflags::bitflags! {
    /// The window edges an element's cell touches within the overall layout.
    ///
    /// Hosts use this to decide when focus should leave the panel instead of
    /// moving within it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BoundaryEdges: u8 {
        /// The element sits on the left layout boundary.
        const LEFT = 1 << 0;
        /// The element sits on the top layout boundary.
        const TOP = 1 << 1;
        /// The element sits on the right layout boundary.
        const RIGHT = 1 << 2;
        /// The element sits on the bottom layout boundary.
        const BOTTOM = 1 << 3;
    }
}

#[cfg(test)]
mod tests {
    use super::NavigationAction;
    use crate::Orientation;

    #[test]
    fn action_alignment_and_step() {
        assert!(NavigationAction::Up.is_along(Orientation::Vertical));
        assert!(!NavigationAction::Up.is_along(Orientation::Horizontal));
        assert!(NavigationAction::Left.is_along(Orientation::Horizontal));
        assert_eq!(NavigationAction::Left.step(), -1);
        assert_eq!(NavigationAction::Down.step(), 1);
    }
}
