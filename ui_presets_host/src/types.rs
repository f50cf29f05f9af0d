// Copyright 2025 the UI Presets Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability traits implemented by the host UI engine.

use alloc::vec::Vec;

use kurbo::Point;

use crate::geometry::{NodeGeometry, ScreenRoot};

/// Geometry queries over host nodes identified by `K`.
pub trait GeometrySource<K> {
    /// Current geometry of `node`, or `None` if the node no longer exists or is not attached.
    fn geometry(&self, node: &K) -> Option<NodeGeometry>;

    /// Nearest screen-root ancestor of `node`, or `None` if it has not been parented yet.
    fn screen_root(&self, node: &K) -> Option<ScreenRoot>;
}

/// Access to the current pointer location.
pub trait PointerSource {
    /// Pointer position in absolute screen pixels, or `None` when unavailable
    /// (for example, no mouse on a touch-only device).
    fn pointer_position(&self) -> Option<Point>;
}

/// Host hit testing.
pub trait HitTestSource<K> {
    /// Nodes under `point`, ordered topmost first.
    fn nodes_at_point(&self, point: Point) -> Vec<K>;
}

/// All per-query capabilities in one bound.
///
/// Blanket-implemented for every type providing geometry, pointer, and hit-test
/// access, so hosts usually write one adapter and pass it by reference.
pub trait Host<K>: GeometrySource<K> + PointerSource + HitTestSource<K> {}

impl<K, T> Host<K> for T where T: GeometrySource<K> + PointerSource + HitTestSource<K> {}

/// Opaque token for a bound per-frame slot, returned by [`FrameTick::bind`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TickBinding(pub u64);

/// Per-frame callback registration.
///
/// The host invokes the bound slot once per rendered frame, ordered by
/// `priority` (lower runs first). What the slot does is decided by the caller
/// that bound it; the host only schedules it.
pub trait FrameTick {
    /// Bind a named slot at `priority`.
    fn bind(&mut self, name: &'static str, priority: i32) -> TickBinding;

    /// Release a previously bound slot. Unknown bindings are ignored.
    fn unbind(&mut self, binding: TickBinding);
}
