// Copyright 2025 the UI Presets Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! UI Presets Host: the capability contract between widget presets and a host UI engine.
//!
//! ## Overview
//!
//! The preset crates never own a scene graph. Everything they need from the host is
//! reached through a handful of small traits, keyed by a host-chosen node identifier `K`:
//!
//! - [`GeometrySource`]: resolved absolute position/size, visibility, and pivot of a node,
//!   plus the nearest [`ScreenRoot`] ancestor.
//! - [`PointerSource`]: the current pointer location, if any.
//! - [`HitTestSource`]: the ordered stack of nodes under a screen point, topmost first.
//! - [`FrameTick`]: registration of a per-frame callback slot with a priority.
//!
//! [`Host`] is implemented automatically for any type that provides the first three,
//! so most hosts implement a single adapter struct and pass `&adapter` everywhere.
//!
//! ## Geometry
//!
//! All geometry is expressed with [`kurbo`] types in absolute screen-pixel space.
//! [`NodeGeometry::rect`] turns a snapshot into a [`kurbo::Rect`], and
//! [`contains_inclusive`] performs the boundary-inclusive containment test used for
//! hover detection (kurbo's own `Rect::contains` is half-open).
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use ui_presets_host::contains_inclusive;
//!
//! let r = Rect::new(10.0, 10.0, 20.0, 20.0);
//! assert!(contains_inclusive(r, Point::new(20.0, 20.0)));
//! assert!(!contains_inclusive(r, Point::new(20.5, 20.0)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod geometry;
mod types;

pub use geometry::{NodeGeometry, ScreenRoot, contains_inclusive, sanitize, sanitize_rect};
pub use types::{FrameTick, GeometrySource, HitTestSource, Host, PointerSource, TickBinding};
