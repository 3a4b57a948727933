// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trellis_stacking --heading-base-level=0

//! Trellis Stacking: 1D list layout for virtualized collection views.
//!
//! [`StackingLayout`] lays items out one after another along the
//! virtualizing axis, like a stack panel, while only the elements near the
//! viewport are realized. Grouped collections interleave group headers
//! either [inline](trellis_core::GroupHeaderStrategy::Inline) (the header
//! takes its own slice of the scroll axis) or
//! [parallel](trellis_core::GroupHeaderStrategy::Parallel) (the header
//! floats beside its group, consuming stacking-axis space).
//!
//! Placement of a realized element is exact relative to an already-placed
//! neighbor; everything else (where an unrealized item lives, where a group
//! far offscreen begins, how large the whole panel is) is extrapolated from
//! running averages of the extents observed so far. The averages refine as
//! more elements are realized, and the estimation rules are chosen so the
//! viewport does not jitter while they do.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use trellis_core::{
//!     ElementId, ElementKind, GroupInfo, GroupRange, LayoutDataProvider, LayoutReference,
//!     LayoutStrategy,
//! };
//! use trellis_stacking::StackingLayout;
//!
//! struct Flat(usize);
//!
//! impl LayoutDataProvider for Flat {
//!     fn total_item_count(&self) -> Result<usize, trellis_core::DataSourceError> {
//!         Ok(self.0)
//!     }
//!     fn total_group_count(&self) -> Result<usize, trellis_core::DataSourceError> {
//!         Ok(0)
//!     }
//!     fn group_from_item(&self, _: usize) -> Result<GroupInfo, trellis_core::DataSourceError> {
//!         unreachable!("ungrouped")
//!     }
//!     fn group_from_index(&self, _: usize) -> Result<GroupRange, trellis_core::DataSourceError> {
//!         unreachable!("ungrouped")
//!     }
//! }
//!
//! let mut layout = StackingLayout::new(Flat(100));
//! let window = Rect::new(0.0, 0.0, 200.0, 600.0);
//!
//! // Realize item 0, then place item 1 right after it.
//! let first = layout
//!     .element_bounds(
//!         ElementId::Item(0),
//!         Size::new(200.0, 40.0),
//!         &LayoutReference::myself(ElementKind::Item, Rect::new(0.0, 0.0, 200.0, 40.0)),
//!         window,
//!     )
//!     .unwrap();
//! let second = layout
//!     .element_bounds(
//!         ElementId::Item(1),
//!         Size::new(200.0, 40.0),
//!         &LayoutReference::before(ElementKind::Item, first),
//!         window,
//!     )
//!     .unwrap();
//! assert_eq!(second.y0, 40.0);
//! ```

mod estimation;
mod navigation;
mod strategy;

pub use strategy::StackingLayout;

#[cfg(test)]
pub(crate) mod testing;
