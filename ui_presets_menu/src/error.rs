// Copyright 2025 the UI Presets Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reasons a menu could not be opened or redrawn.

/// Why a [`MenuSystem`](crate::MenuSystem) operation produced no layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MenuError {
    /// The handle refers to a menu that was removed.
    #[error("menu handle is stale")]
    Stale,
    /// The host reports no geometry for the trigger node.
    #[error("trigger node has no geometry")]
    Detached,
    /// The menu has no active items, so there is nothing to draw.
    #[error("menu has no active items")]
    NoActiveItems,
    /// The viewport has no room for a single row of items.
    #[error("no room for a single row of menu items")]
    NoRoom,
}
