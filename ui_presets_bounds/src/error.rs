// Copyright 2025 the UI Presets Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Soft-failure reasons and registry misuse errors.

/// Why a query could not measure its region this tick.
///
/// None of these change the region's containment state; [`BoundsTracker::query`]
/// reports them as "not contained" and logs them.
///
/// [`BoundsTracker::query`]: crate::BoundsTracker::query
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The handle refers to a region that was unregistered.
    #[error("region handle is stale")]
    Stale,
    /// The host no longer reports geometry for the region's node.
    #[error("node has no geometry; it was destroyed or is not attached")]
    Detached,
    /// The node is hidden and the region considers visibility.
    #[error("node is not visible")]
    Hidden,
    /// No screen-root ancestor exists and the screen inset is not ignored.
    #[error("a screen root ancestor is required to measure the screen inset")]
    NoScreenRoot,
    /// The host has no pointer position.
    #[error("pointer position unavailable")]
    NoPointer,
    /// With [`RegionOptions::TOP_MOST_ONLY`], the hit stack is empty or another node is first.
    ///
    /// [`RegionOptions::TOP_MOST_ONLY`]: crate::RegionOptions::TOP_MOST_ONLY
    #[error("node is not the topmost node under the pointer")]
    NotTopmost,
}

/// Misuse of the tracker's frame-tick lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    /// [`BoundsTracker::attach`](crate::BoundsTracker::attach) was called while already bound.
    #[error("tracker is already attached to a frame tick")]
    AlreadyAttached,
}
