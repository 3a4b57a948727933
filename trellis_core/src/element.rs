// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element identities and the reference types used for placement and
//! estimation.

use kurbo::Rect;

/// Which kind of element a query is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// An item container, addressed by flat item index.
    Item,
    /// A group header, addressed by group index.
    GroupHeader,
}

/// A realized (or about-to-be-realized) element: an item addressed by its
/// flat index, or a group header addressed by its group index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    /// Item container with flat index `0..item_count`.
    Item(usize),
    /// Group header with group index `0..group_count`.
    GroupHeader(usize),
}

impl ElementId {
    /// The element's kind tag.
    #[must_use]
    pub const fn kind(self) -> ElementKind {
        match self {
            Self::Item(_) => ElementKind::Item,
            Self::GroupHeader(_) => ElementKind::GroupHeader,
        }
    }

    /// The element's index within its kind's index space.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Item(index) | Self::GroupHeader(index) => index,
        }
    }
}

/// Where a placement reference sits relative to the element being placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceIdentity {
    /// The reference *is* the element being placed (re-placement).
    Myself,
    /// The reference comes earlier in layout order; the new element extends
    /// the layout forward.
    BeforeMe,
    /// The reference comes later in layout order; the new element extends
    /// the layout backward.
    AfterMe,
}

/// Where an already-placed rectangle sits relative to a window along the
/// virtualizing axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativePosition {
    /// Entirely before the window's near edge.
    Before,
    /// Overlapping the window.
    Inside,
    /// Entirely past the window's far edge.
    After,
}

/// A realized neighbor used for **exact** placement of an adjacent element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutReference {
    /// Relation of the reference to the element being placed.
    pub relation: ReferenceIdentity,
    /// Whether the reference is an item container or a group header.
    pub kind: ElementKind,
    /// The reference's bounds.
    pub bounds: Rect,
    /// Bounds of the reference's group header, when the reference is an item
    /// and that header has been realized. Parallel header placement consults
    /// this to keep headers and their items from overlapping.
    pub header_bounds: Option<Rect>,
}

impl LayoutReference {
    /// A reference to the element itself, for re-placement at known bounds.
    #[must_use]
    pub const fn myself(kind: ElementKind, bounds: Rect) -> Self {
        Self {
            relation: ReferenceIdentity::Myself,
            kind,
            bounds,
            header_bounds: None,
        }
    }

    /// A reference earlier in layout order.
    #[must_use]
    pub const fn before(kind: ElementKind, bounds: Rect) -> Self {
        Self {
            relation: ReferenceIdentity::BeforeMe,
            kind,
            bounds,
            header_bounds: None,
        }
    }

    /// A reference later in layout order.
    #[must_use]
    pub const fn after(kind: ElementKind, bounds: Rect) -> Self {
        Self {
            relation: ReferenceIdentity::AfterMe,
            kind,
            bounds,
            header_bounds: None,
        }
    }

    /// Attaches the bounds of the reference's group header.
    #[must_use]
    pub const fn with_header_bounds(mut self, header_bounds: Rect) -> Self {
        self.header_bounds = Some(header_bounds);
        self
    }
}

/// An anchor element used only to extrapolate over unrealized regions.
///
/// Unlike [`LayoutReference`], an estimation reference does not claim
/// adjacency: estimation math divides distances by running averages to jump
/// an arbitrary number of elements. `index` is `None` when no anchor of this
/// kind is available (for example no realized header).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimationReference {
    /// The anchor's index in its kind's index space, or `None` for no anchor.
    pub index: Option<usize>,
    /// The anchor's bounds. Meaningless when `index` is `None`.
    pub bounds: Rect,
}

impl EstimationReference {
    /// An anchor at `index` with the given bounds.
    #[must_use]
    pub const fn new(index: usize, bounds: Rect) -> Self {
        Self {
            index: Some(index),
            bounds,
        }
    }

    /// The absent anchor.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            index: None,
            bounds: Rect::ZERO,
        }
    }
}

/// Group placement of an item, as reported by
/// [`LayoutDataProvider::group_from_item`](crate::LayoutDataProvider::group_from_item).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupInfo {
    /// Index of the containing group.
    pub group_index: usize,
    /// The item's position within that group.
    pub index_in_group: usize,
    /// Number of items in that group.
    pub item_count: usize,
}

/// Item span of a group, as reported by
/// [`LayoutDataProvider::group_from_index`](crate::LayoutDataProvider::group_from_index).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupRange {
    /// Flat index of the group's first item.
    pub first_item: usize,
    /// Number of items in the group.
    pub item_count: usize,
}

#[cfg(test)]
mod tests {
    use super::{ElementId, ElementKind};

    #[test]
    fn element_id_projections() {
        assert_eq!(ElementId::Item(4).kind(), ElementKind::Item);
        assert_eq!(ElementId::GroupHeader(2).kind(), ElementKind::GroupHeader);
        assert_eq!(ElementId::Item(4).index(), 4);
        assert_eq!(ElementId::GroupHeader(2).index(), 2);
    }
}
