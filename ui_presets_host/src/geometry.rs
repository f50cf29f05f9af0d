// Copyright 2025 the UI Presets Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry snapshots reported by the host and the containment test shared by presets.

use kurbo::{Point, Rect, Size, Vec2};

/// Resolved geometry of a host node, as of the current frame.
///
/// Positions and sizes are absolute screen pixels after the host has applied
/// all of its layout and scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeGeometry {
    /// Absolute position of the node's top-left corner.
    pub absolute_position: Point,
    /// Absolute size of the node.
    pub absolute_size: Size,
    /// Whether the node is currently visible.
    pub visible: bool,
    /// Pivot of the node as a fraction of its size (`0..1` on both axes).
    pub anchor: Vec2,
}

impl NodeGeometry {
    /// Create a visible snapshot with a top-left pivot.
    pub fn new(absolute_position: Point, absolute_size: Size) -> Self {
        Self {
            absolute_position,
            absolute_size,
            visible: true,
            anchor: Vec2::ZERO,
        }
    }

    /// Set the pivot fraction.
    #[must_use]
    pub fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the visibility flag.
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Absolute rectangle covered by the node.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.absolute_position, self.absolute_size)
    }
}

impl Default for NodeGeometry {
    fn default() -> Self {
        Self::new(Point::ZERO, Size::ZERO)
    }
}

/// The top-level UI container a node is measured against.
///
/// `absolute_position.y` is the top inset reserved by host chrome (for example a
/// title or system bar); `absolute_size` is the usable viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScreenRoot {
    /// Absolute origin of the screen root.
    pub absolute_position: Point,
    /// Absolute size of the screen root.
    pub absolute_size: Size,
}

impl ScreenRoot {
    /// Create a screen root with the given top inset and viewport size.
    pub fn new(top_inset: f64, absolute_size: Size) -> Self {
        Self {
            absolute_position: Point::new(0.0, top_inset),
            absolute_size,
        }
    }
}

/// Boundary-inclusive containment: points on any edge count as inside.
///
/// This differs from [`Rect::contains`], which excludes the right and bottom edges.
/// `rect` is expected to be normalized (`x0 <= x1`, `y0 <= y1`).
pub fn contains_inclusive(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Clamp a scalar coming from host geometry: NaN and negative values become `0.0`.
pub fn sanitize(v: f64) -> f64 {
    if v.is_nan() || v < 0.0 { 0.0 } else { v }
}

/// Apply [`sanitize`] to every edge of `rect`, then normalize it.
pub fn sanitize_rect(rect: Rect) -> Rect {
    let x0 = sanitize(rect.x0);
    let y0 = sanitize(rect.y0);
    Rect::new(x0, y0, sanitize(rect.x1).max(x0), sanitize(rect.y1).max(y0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inclusive_edges() {
        let r = Rect::new(100.0, 100.0, 150.0, 120.0);
        assert!(contains_inclusive(r, Point::new(100.0, 100.0)));
        assert!(contains_inclusive(r, Point::new(150.0, 120.0)));
        assert!(!contains_inclusive(r, Point::new(150.01, 110.0)));
        assert!(!contains_inclusive(r, Point::new(120.0, 99.99)));
        // kurbo's half-open test disagrees on the far edge.
        assert!(!r.contains(Point::new(150.0, 120.0)));
    }

    #[test]
    fn sanitize_clamps_nan_and_negatives() {
        assert_eq!(sanitize(f64::NAN), 0.0);
        assert_eq!(sanitize(-3.0), 0.0);
        assert_eq!(sanitize(4.5), 4.5);
        assert_eq!(sanitize(f64::INFINITY), f64::INFINITY);

        let r = sanitize_rect(Rect::new(-5.0, f64::NAN, 10.0, -1.0));
        assert_eq!(r, Rect::new(0.0, 0.0, 10.0, 0.0));
    }

    #[test]
    fn node_rect_uses_position_and_size() {
        let g = NodeGeometry::new(Point::new(3.0, 4.0), Size::new(10.0, 20.0));
        assert_eq!(g.rect(), Rect::new(3.0, 4.0, 13.0, 24.0));
        assert!(g.visible);
        assert!(!g.with_visible(false).visible);
    }
}
