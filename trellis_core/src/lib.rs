// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trellis_core --heading-base-level=0

//! Trellis Core: shared primitives for virtualized collection layout.
//!
//! This crate provides the common vocabulary for the Trellis layout
//! strategies (`trellis_stacking`, `trellis_wrapping`, `trellis_calendar`):
//! a virtualizing panel realizes only the elements near its viewport, places
//! each one exactly relative to an already-placed neighbor, and estimates the
//! position of everything else from running averages.
//!
//! The core concepts are:
//!
//! - [`Orientation`] and [`Axes`]: the scroll direction, resolved once into
//!   an accessor object exposing *main* (virtualizing) and *cross*
//!   (stacking) components of points, sizes, and rectangles, so strategy
//!   math is written once for both orientations.
//! - [`ElementId`]: an item (flat index) or a group header (group index).
//! - [`LayoutReference`]: a realized neighbor plus its relation
//!   ([`ReferenceIdentity`]) to the element being placed, the input to
//!   **exact** placement.
//! - [`EstimationReference`]: an anchor used only to extrapolate over
//!   unrealized regions.
//! - [`SizeAverages`]: a fixed-capacity circular accumulator of observed
//!   extents, read wherever an exact size is unavailable.
//! - [`LayoutDataProvider`]: the host's item/group count source. Its queries
//!   are the one recoverable failure in a pass ([`DataSourceError`]).
//! - [`StrategyBase`]: orientation, [`GroupHeaderStrategy`], and group
//!   padding bookkeeping embedded by every strategy.
//! - [`LayoutStrategy`]: the host-facing trait the three strategies
//!   implement, covering measure/arrange sizing, exact placement, index and
//!   extent estimation, point lookup, keyboard navigation, snap points, and
//!   average seeding.
//!
//! This crate deliberately does **not** know about widgets, templates, or
//! any particular UI framework. Host panels are responsible for deciding
//! which indices to realize, binding content to them, and routing input; the
//! strategies only answer geometric questions about indices.

mod averages;
mod axis;
mod base;
mod element;
mod provider;
mod query;
mod strategy;
mod util;

pub use averages::SizeAverages;
pub use axis::{Axes, Orientation};
pub use base::{GroupHeaderStrategy, StrategyBase, remaining_count};
pub use element::{
    ElementId, ElementKind, EstimationReference, GroupInfo, GroupRange, LayoutReference,
    ReferenceIdentity, RelativePosition,
};
pub use provider::{DataSourceError, LayoutDataProvider};
pub use query::{
    BoundaryEdges, IndexSearchHint, NavigationAction, PointSearchResult, RegularSnapPoints,
};
pub use strategy::LayoutStrategy;
pub use util::{are_close, clamp_index, floor_div};
