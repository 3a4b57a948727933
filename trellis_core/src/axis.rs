// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Orientation and the resolved axis accessor object.

use kurbo::{Point, Rect, Size};

use crate::RelativePosition;

/// Scroll direction of a virtualizing panel.
///
/// The orientation selects which geometric field pair is *virtualizing*
/// (along the scroll direction, called *main* here) and which is
/// *stacking* (perpendicular, called *cross*). It is resolved once per
/// strategy configuration and must not change between layout queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// The panel scrolls horizontally; the main axis is `x`.
    Horizontal,
    /// The panel scrolls vertically; the main axis is `y`.
    #[default]
    Vertical,
}

/// Axis accessors resolved from an [`Orientation`].
///
/// Every strategy computation is expressed through these accessors so a
/// single algorithm serves both horizontal and vertical layouts. An [`Axes`]
/// is constructed once when the virtualization direction is configured and
/// then copied around freely.
///
/// Getters project a main (virtualizing) or cross (stacking) component out
/// of a [`Point`], [`Size`], or [`Rect`]; the constructors go the other way,
/// assembling a geometric value from main/cross parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Axes {
    orientation: Orientation,
}

impl Axes {
    /// Resolves the accessors for `orientation`.
    #[must_use]
    pub const fn new(orientation: Orientation) -> Self {
        Self { orientation }
    }

    /// Returns the orientation these accessors were resolved from.
    #[must_use]
    pub const fn orientation(self) -> Orientation {
        self.orientation
    }

    /// The point's coordinate along the virtualizing axis.
    #[must_use]
    pub const fn main_pos(self, point: Point) -> f64 {
        match self.orientation {
            Orientation::Horizontal => point.x,
            Orientation::Vertical => point.y,
        }
    }

    /// The point's coordinate along the stacking axis.
    #[must_use]
    pub const fn cross_pos(self, point: Point) -> f64 {
        match self.orientation {
            Orientation::Horizontal => point.y,
            Orientation::Vertical => point.x,
        }
    }

    /// The size's extent along the virtualizing axis.
    #[must_use]
    pub const fn main_size(self, size: Size) -> f64 {
        match self.orientation {
            Orientation::Horizontal => size.width,
            Orientation::Vertical => size.height,
        }
    }

    /// The size's extent along the stacking axis.
    #[must_use]
    pub const fn cross_size(self, size: Size) -> f64 {
        match self.orientation {
            Orientation::Horizontal => size.height,
            Orientation::Vertical => size.width,
        }
    }

    /// The rectangle's origin along the virtualizing axis.
    #[must_use]
    pub const fn main_origin(self, rect: Rect) -> f64 {
        match self.orientation {
            Orientation::Horizontal => rect.x0,
            Orientation::Vertical => rect.y0,
        }
    }

    /// The rectangle's origin along the stacking axis.
    #[must_use]
    pub const fn cross_origin(self, rect: Rect) -> f64 {
        match self.orientation {
            Orientation::Horizontal => rect.y0,
            Orientation::Vertical => rect.x0,
        }
    }

    /// The rectangle's extent along the virtualizing axis.
    #[must_use]
    pub fn main_extent(self, rect: Rect) -> f64 {
        match self.orientation {
            Orientation::Horizontal => rect.width(),
            Orientation::Vertical => rect.height(),
        }
    }

    /// The rectangle's extent along the stacking axis.
    #[must_use]
    pub fn cross_extent(self, rect: Rect) -> f64 {
        match self.orientation {
            Orientation::Horizontal => rect.height(),
            Orientation::Vertical => rect.width(),
        }
    }

    /// The rectangle's far edge along the virtualizing axis
    /// (`main_origin + main_extent`).
    #[must_use]
    pub fn main_end(self, rect: Rect) -> f64 {
        self.main_origin(rect) + self.main_extent(rect)
    }

    /// The rectangle's far edge along the stacking axis.
    #[must_use]
    pub fn cross_end(self, rect: Rect) -> f64 {
        self.cross_origin(rect) + self.cross_extent(rect)
    }

    /// Builds a [`Point`] from main/cross coordinates.
    #[must_use]
    pub const fn point(self, main: f64, cross: f64) -> Point {
        match self.orientation {
            Orientation::Horizontal => Point::new(main, cross),
            Orientation::Vertical => Point::new(cross, main),
        }
    }

    /// Builds a [`Size`] from main/cross extents.
    #[must_use]
    pub const fn size(self, main: f64, cross: f64) -> Size {
        match self.orientation {
            Orientation::Horizontal => Size::new(main, cross),
            Orientation::Vertical => Size::new(cross, main),
        }
    }

    /// Builds a [`Rect`] from a main/cross origin and main/cross extents.
    #[must_use]
    pub fn rect(self, main_origin: f64, cross_origin: f64, main_extent: f64, cross_extent: f64) -> Rect {
        Rect::from_origin_size(
            self.point(main_origin, cross_origin),
            self.size(main_extent, cross_extent),
        )
    }

    /// Classifies where `reference` sits relative to `window` along the
    /// virtualizing axis.
    ///
    /// [`RelativePosition::Before`] if the reference's far edge precedes the
    /// window's near edge, [`RelativePosition::After`] if the window's far
    /// edge precedes the reference's near edge, [`RelativePosition::Inside`]
    /// otherwise.
    #[must_use]
    pub fn reference_direction(self, reference: Rect, window: Rect) -> RelativePosition {
        if self.main_end(reference) < self.main_origin(window) {
            RelativePosition::Before
        } else if self.main_end(window) < self.main_origin(reference) {
            RelativePosition::After
        } else {
            RelativePosition::Inside
        }
    }
}
