// Copyright 2025 the UI Presets Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! UI Presets Menu: adaptive context-menu layout next to a trigger node.
//!
//! The crate splits a context menu into three layers:
//!
//! - [`compute_layout`]: a pure grid solver. Given the trigger rectangle, its pivot, the
//!   viewport, a fractional item size, and the items, it returns a [`MenuLayoutResult`]
//!   with the container rectangle and a container-local rectangle per active item.
//! - [`TextFitProbe`]: a resumable search for a common label size, stepped once per host
//!   frame so the host never blocks on text measurement.
//! - [`ContextMenu`] and [`MenuSystem`]: item bookkeeping per trigger, and the shared
//!   Closed/Open/Destroyed state machine with optional single-open exclusivity.
//!
//! Geometry comes from the host through [`ui_presets_host::GeometrySource`]; nothing in
//! this crate renders.
//!
//! ## Layout at a glance
//!
//! Menus prefer to grow down and to the right of the trigger. A trigger in the lower half
//! of the viewport flips the menu upward (bottom aligned with the trigger), and one in the
//! right half flips it to the left. Rows are limited by the space available in the chosen
//! direction and extra items spill into more columns, filled column by column
//! ([`MenuGrid`]).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod grid;
mod layout;
mod menu;
mod text_fit;

pub use error::MenuError;
pub use grid::MenuGrid;
pub use layout::{
    ItemPlacement, MenuLayoutRequest, MenuLayoutResult, compute_layout, item_cell,
    normalize_fraction,
};
pub use menu::{Activation, ContextMenu, MenuId, MenuItem, MenuState, MenuSystem};
pub use text_fit::{
    FitStep, MIN_TEXT_SIZE, START_TEXT_SIZE, TEXT_SIZE_STEP, TextFitProbe, TextMeasure,
    TextSizingMode,
};
