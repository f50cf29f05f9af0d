// Copyright 2025 the UI Presets Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the bounds tracker: handles, options, and cached bounds.

use kurbo::{Point, Rect, Size};

/// Identifier for a tracked region (generational).
///
/// Handles outlive their regions safely: once a region is unregistered, every
/// operation taking its old handle is a no-op.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct RegionId(pub(crate) u32, pub(crate) u32);

impl RegionId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Identifier for an enter/exit listener attached to a region.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ListenerId(pub(crate) u64);

bitflags::bitflags! {
    /// Options controlling how a region is queried.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct RegionOptions: u8 {
        /// Only measure when the region's node is the topmost node under the pointer;
        /// otherwise the query soft-fails and the region keeps its state.
        const TOP_MOST_ONLY       = 0b0000_0001;
        /// Measure against raw absolute Y instead of subtracting the screen root's top inset.
        const IGNORE_SCREEN_INSET = 0b0000_0010;
        /// Skip queries (freezing state) while the node is not visible.
        const CONSIDER_VISIBILITY = 0b0000_0100;
    }
}

impl Default for RegionOptions {
    fn default() -> Self {
        Self::CONSIDER_VISIBILITY
    }
}

impl RegionOptions {
    /// Require the region's node to be topmost under the pointer.
    #[must_use]
    pub fn top_most_only(mut self) -> Self {
        self |= Self::TOP_MOST_ONLY;
        self
    }

    /// Do not subtract the screen root's top inset.
    #[must_use]
    pub fn ignore_screen_inset(mut self) -> Self {
        self |= Self::IGNORE_SCREEN_INSET;
        self
    }

    /// Keep querying while the node is hidden.
    #[must_use]
    pub fn ignore_visibility(mut self) -> Self {
        self.remove(Self::CONSIDER_VISIBILITY);
        self
    }
}

/// Edge-triggered containment transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// The pointer entered the region (false → true).
    Enter,
    /// The pointer left the region (true → false).
    Exit,
}

/// Corners and size of a region as measured by its most recent query.
///
/// Corners are absolute screen pixels; the top edge already has the screen
/// inset removed unless [`RegionOptions::IGNORE_SCREEN_INSET`] is set.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundsLayout {
    /// Top-left corner.
    pub top_left: Point,
    /// Top-right corner.
    pub top_right: Point,
    /// Bottom-left corner.
    pub bottom_left: Point,
    /// Bottom-right corner.
    pub bottom_right: Point,
    /// Width and height.
    pub size: Size,
}

impl BoundsLayout {
    /// Layout of an axis-aligned rectangle.
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            top_left: Point::new(rect.x0, rect.y0),
            top_right: Point::new(rect.x1, rect.y0),
            bottom_left: Point::new(rect.x0, rect.y1),
            bottom_right: Point::new(rect.x1, rect.y1),
            size: rect.size(),
        }
    }

    /// The rectangle spanned by the corners.
    pub fn rect(&self) -> Rect {
        Rect::from_points(self.top_left, self.bottom_right)
    }

    /// Returns `true` if no query has measured this region yet (or it measured as empty).
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
