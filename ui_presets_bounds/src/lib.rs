// Copyright 2025 the UI Presets Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! UI Presets Bounds: per-frame pointer bounds tracking with enter/exit events.
//!
//! A [`BoundsTracker`] keeps a registry of host nodes ("regions") and, once per frame,
//! asks the host where each node is and where the pointer is. When the pointer's
//! containment in a region flips, the region's enter or exit listeners run.
//!
//! - Regions are addressed by generational [`RegionId`] handles; stale handles are inert.
//! - [`RegionOptions`] controls top-most gating, screen-inset handling, and visibility.
//! - Every successful query refreshes the region's [`BoundsLayout`].
//! - Queries that cannot measure (hidden node, no screen root, no pointer, …) report
//!   `false` without changing state; [`BoundsTracker::try_query`] returns the
//!   [`QueryError`] instead.
//!
//! ## Frame loop
//!
//! [`BoundsTracker::attach`] binds a slot named [`SWEEP_SLOT_NAME`] at
//! [`SWEEP_PRIORITY`] on the host's [`FrameTick`](ui_presets_host::FrameTick). The
//! host calls [`BoundsTracker::sweep`] from that slot with its
//! [`Host`](ui_presets_host::Host) adapter; the returned [`SweepReport`] lists the
//! transitions of the tick.
//!
//! ## Hidden regions
//!
//! With [`RegionOptions::CONSIDER_VISIBILITY`] (the default) a hidden node freezes its
//! region: no query runs, so hiding a hovered node does not fire exit. The exit fires on
//! the first query after it becomes visible again with the pointer elsewhere.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod tracker;
mod types;

pub use error::{QueryError, TrackerError};
pub use tracker::{BoundsTracker, SWEEP_PRIORITY, SWEEP_SLOT_NAME, SweepReport};
pub use types::{BoundsLayout, Edge, ListenerId, RegionId, RegionOptions};
