// Copyright 2025 the UI Presets Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adaptive grid layout for a context menu anchored next to its trigger.
//!
//! [`compute_layout`] is a pure function: the same request always yields the same
//! result, and nothing is mutated. Callers apply [`MenuLayoutResult`] to their own
//! rendering.
//!
//! ## Placement rules
//!
//! - Each item cell is `ceil(fraction * trigger size)`; zero fraction components count as `1`.
//! - A trigger in the lower half of the viewport grows the menu upward, otherwise downward.
//! - As many rows as fit in the available height are used; overflow spills into more columns.
//! - A trigger in the right half of the viewport places the menu to its left, otherwise
//!   flush with its right edge.
//! - Items fill columns top to bottom (column-major).
//!
//! A zero viewport has no halves, so the menu grows downward and rightward.

use alloc::vec::Vec;
use core::num::NonZeroUsize;

use kurbo::{Point, Rect, Size, Vec2};
use smallvec::SmallVec;
use ui_presets_host::{sanitize, sanitize_rect};

use crate::grid::MenuGrid;

/// Inputs of [`compute_layout`].
#[derive(Clone, Copy, Debug)]
pub struct MenuLayoutRequest<'a, I> {
    /// Absolute rectangle of the trigger node.
    pub trigger_rect: Rect,
    /// Pivot of the trigger as a fraction of its size.
    pub trigger_anchor: Vec2,
    /// Size of the screen root the menu is drawn into.
    pub viewport: Size,
    /// Item cell size as a fraction of the trigger size. Zero components count as `1`.
    pub item_fraction: Vec2,
    /// Item handles with their active flags, in display order.
    pub items: &'a [(I, bool)],
}

/// Where one item goes, relative to the container's top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemPlacement<I> {
    /// The item's handle.
    pub item: I,
    /// Container-local rectangle.
    pub rect: Rect,
}

/// Output of [`compute_layout`].
#[derive(Clone, Debug, PartialEq)]
pub struct MenuLayoutResult<I> {
    /// Absolute rectangle of the menu container.
    pub container: Rect,
    /// Rows per column.
    pub rows: usize,
    /// Number of columns.
    pub columns: usize,
    /// Placed items, column-major.
    pub items: Vec<ItemPlacement<I>>,
    /// Size of one item cell.
    pub cell: Size,
    /// Whether the menu grows upward from the trigger.
    pub grows_upward: bool,
    /// Whether the menu sits to the left of the trigger.
    pub grows_leftward: bool,
    /// Common label text size, if the menu has one cached.
    pub text_size: Option<f64>,
}

impl<I> MenuLayoutResult<I> {
    /// The result for a menu without active items.
    pub fn empty() -> Self {
        Self {
            container: Rect::ZERO,
            rows: 0,
            columns: 0,
            items: Vec::new(),
            cell: Size::ZERO,
            grows_upward: false,
            grows_leftward: false,
            text_size: None,
        }
    }

    /// Returns `true` if no item was placed; callers skip drawing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Replace zero (or invalid) fraction components with `1`.
pub fn normalize_fraction(fraction: Vec2) -> Vec2 {
    let fix = |v: f64| if v > 0.0 && v.is_finite() { v } else { 1.0 };
    Vec2::new(fix(fraction.x), fix(fraction.y))
}

/// Size of one item cell for a trigger of size `trigger`.
pub fn item_cell(trigger: Size, fraction: Vec2) -> Size {
    let fraction = normalize_fraction(fraction);
    Size::new(
        sanitize(fraction.x * trigger.width),
        sanitize(fraction.y * trigger.height),
    )
    .ceil()
}

/// Pack the active items of `request` into a grid next to the trigger.
///
/// ```rust
/// use kurbo::{Rect, Size, Vec2};
/// use ui_presets_menu::{MenuLayoutRequest, compute_layout};
///
/// let items: Vec<(u32, bool)> = (0..10).map(|i| (i, true)).collect();
/// let layout = compute_layout(&MenuLayoutRequest {
///     trigger_rect: Rect::new(100.0, 100.0, 150.0, 120.0),
///     trigger_anchor: Vec2::ZERO,
///     viewport: Size::new(800.0, 150.0),
///     item_fraction: Vec2::new(1.0, 1.0),
///     items: &items,
/// });
/// // The trigger sits in the lower half, so the 100px above it hold 5 rows.
/// assert!(layout.grows_upward);
/// assert_eq!((layout.rows, layout.columns), (5, 2));
/// assert_eq!(layout.container.size(), Size::new(100.0, 100.0));
/// ```
pub fn compute_layout<I: Clone>(request: &MenuLayoutRequest<'_, I>) -> MenuLayoutResult<I> {
    let active: SmallVec<[&I; 16]> = request
        .items
        .iter()
        .filter(|(_, active)| *active)
        .map(|(item, _)| item)
        .collect();
    if active.is_empty() {
        tracing::trace!("no active menu items; nothing to lay out");
        return MenuLayoutResult::empty();
    }
    let count = active.len();

    let fraction = normalize_fraction(request.item_fraction);
    let trigger = sanitize_rect(request.trigger_rect);
    let anchor = Vec2::new(sanitize(request.trigger_anchor.x), sanitize(request.trigger_anchor.y));
    let viewport = Size::new(sanitize(request.viewport.width), sanitize(request.viewport.height));

    let cell = item_cell(trigger.size(), fraction);
    let top = ceil(trigger.y0 - trigger.height() * anchor.y);
    let left = trigger.x0 - ceil(trigger.width() * anchor.x);

    let grows_upward = viewport.height > 0.0 && trigger.y0 > viewport.height / 2.0;
    let available = if grows_upward {
        top
    } else {
        viewport.height - top
    };
    let available = available.max(0.0);

    let rows = if cell.height > 0.0 {
        fitting_rows(available, cell.height).min(count)
    } else {
        count
    };
    let columns = if rows == 0 || rows >= count {
        1
    } else {
        count.div_ceil(rows)
    };

    let container_size = Size::new(columns as f64 * cell.width, rows as f64 * cell.height);

    let grows_leftward = viewport.width > 0.0 && left > viewport.width / 2.0;
    let x = if grows_leftward {
        left - container_size.width
    } else {
        left + trigger.width()
    };
    let y = if grows_upward {
        // Keep the last row level with the trigger's bottom edge.
        top - (container_size.height - ceil(cell.height / fraction.y))
    } else {
        top
    };
    let container = Rect::from_origin_size(Point::new(x, y), container_size);

    let items = match NonZeroUsize::new(rows) {
        Some(rows) => {
            let grid = MenuGrid::new(rows, count.min(rows.get() * columns));
            active
                .iter()
                .take(grid.len())
                .enumerate()
                .map(|(i, item)| ItemPlacement {
                    item: (*item).clone(),
                    rect: grid.cell_rect(i, cell),
                })
                .collect()
        }
        None => {
            tracing::debug!(count, available, "no room for a single menu row");
            Vec::new()
        }
    };

    tracing::trace!(rows, columns, grows_upward, grows_leftward, "menu layout computed");
    MenuLayoutResult {
        container,
        rows,
        columns,
        items,
        cell,
        grows_upward,
        grows_leftward,
        text_size: None,
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Both operands are non-negative; the cast floors and saturates."
)]
fn fitting_rows(available: f64, item_height: f64) -> usize {
    (available / item_height) as usize
}

/// `ceil` through kurbo so `no_std` builds pick up its `libm` fallback.
fn ceil(v: f64) -> f64 {
    Vec2::new(v, v).ceil().x
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn request(items: &[(u32, bool)], viewport: Size) -> MenuLayoutRequest<'_, u32> {
        MenuLayoutRequest {
            trigger_rect: Rect::new(100.0, 100.0, 150.0, 120.0),
            trigger_anchor: Vec2::ZERO,
            viewport,
            item_fraction: Vec2::new(1.0, 1.0),
            items,
        }
    }

    fn active(n: u32) -> Vec<(u32, bool)> {
        (0..n).map(|i| (i, true)).collect()
    }

    #[test]
    fn five_items_stack_in_one_column() {
        let items = active(5);
        let layout = compute_layout(&request(&items, Size::new(800.0, 600.0)));

        assert_eq!(layout.rows, 5);
        assert_eq!(layout.columns, 1);
        assert!(!layout.grows_upward);
        assert!(!layout.grows_leftward);
        assert_eq!(layout.container, Rect::new(150.0, 100.0, 200.0, 200.0));
        for (p, expected) in layout.items.iter().zip(0_u32..) {
            assert_eq!(p.item, expected);
            assert_eq!(p.rect.origin(), Point::new(0.0, f64::from(expected) * 20.0));
        }
    }

    #[test]
    fn short_viewport_grows_upward_and_spills() {
        let items = active(10);
        let layout = compute_layout(&request(&items, Size::new(800.0, 150.0)));

        // Top 100 is below half of 150, so only the 100px above the trigger count.
        assert!(layout.grows_upward);
        assert_eq!((layout.rows, layout.columns), (5, 2));
        assert_eq!(layout.container, Rect::new(150.0, 20.0, 250.0, 120.0));
        assert_eq!(layout.items.len(), 10);
        assert_eq!(layout.items[5].rect.origin(), Point::new(50.0, 0.0));
        assert_eq!(layout.items[9].rect.origin(), Point::new(50.0, 80.0));
    }

    #[test]
    fn short_viewport_fits_five_items_in_one_column() {
        let items = active(5);
        let layout = compute_layout(&request(&items, Size::new(800.0, 150.0)));

        assert!(layout.grows_upward);
        assert_eq!((layout.rows, layout.columns), (5, 1));
        assert_eq!(layout.container.size(), Size::new(50.0, 100.0));
        assert_eq!(layout.items[4].rect.origin(), Point::new(0.0, 80.0));
    }

    #[test]
    fn downward_spill_fills_columns() {
        let items = active(10);
        let mut req = request(&items, Size::new(800.0, 150.0));
        req.trigger_rect = Rect::new(100.0, 20.0, 150.0, 40.0);
        let layout = compute_layout(&req);

        // 130px below the top edge hold 6 rows; the second column is partial.
        assert!(!layout.grows_upward);
        assert_eq!((layout.rows, layout.columns), (6, 2));
        assert_eq!(layout.container, Rect::new(150.0, 20.0, 250.0, 140.0));
        assert_eq!(layout.items.len(), 10);
        // Column-major: item 6 starts the second column.
        assert_eq!(layout.items[6].rect.origin(), Point::new(50.0, 0.0));
        assert_eq!(layout.items[9].rect.origin(), Point::new(50.0, 60.0));
    }

    #[test]
    fn no_active_items_is_empty() {
        let items = vec![(1_u32, false), (2, false)];
        let layout = compute_layout(&request(&items, Size::new(800.0, 600.0)));

        assert!(layout.is_empty());
        assert_eq!((layout.rows, layout.columns), (0, 0));
        assert_eq!(layout.container, Rect::ZERO);
    }

    #[test]
    fn inactive_items_are_skipped() {
        let items = vec![(1_u32, true), (2, false), (3, true)];
        let layout = compute_layout(&request(&items, Size::new(800.0, 600.0)));

        let placed: Vec<u32> = layout.items.iter().map(|p| p.item).collect();
        assert_eq!(placed, vec![1, 3]);
        assert_eq!(layout.items[1].rect.origin(), Point::new(0.0, 20.0));
    }

    #[test]
    fn zero_fraction_behaves_like_one() {
        let items = active(4);
        let mut zero = request(&items, Size::new(800.0, 600.0));
        zero.item_fraction = Vec2::ZERO;
        let one = request(&items, Size::new(800.0, 600.0));

        assert_eq!(compute_layout(&zero), compute_layout(&one));
    }

    #[test]
    fn lower_half_trigger_grows_upward() {
        let items = active(3);
        let mut req = request(&items, Size::new(800.0, 600.0));
        req.trigger_rect = Rect::new(100.0, 500.0, 150.0, 520.0);
        let layout = compute_layout(&req);

        assert!(layout.grows_upward);
        assert_eq!(layout.rows, 3);
        // Bottom of the container lines up with the trigger's bottom edge.
        assert_eq!(layout.container.y1, 520.0);
        assert_eq!(layout.container.y0, 460.0);
    }

    #[test]
    fn right_half_trigger_places_menu_to_the_left() {
        let items = active(2);
        let mut req = request(&items, Size::new(800.0, 600.0));
        req.trigger_rect = Rect::new(600.0, 100.0, 650.0, 120.0);
        let layout = compute_layout(&req);

        assert!(layout.grows_leftward);
        assert_eq!(layout.container.x1, 600.0);
        assert_eq!(layout.container.x0, 550.0);
    }

    #[test]
    fn fractional_cells_round_up() {
        let items = active(2);
        let mut req = request(&items, Size::new(800.0, 600.0));
        req.item_fraction = Vec2::new(0.4, 0.33);
        let layout = compute_layout(&req);

        assert_eq!(layout.cell, Size::new(20.0, 7.0));
        assert_eq!(layout.container.size(), Size::new(20.0, 14.0));
    }

    #[test]
    fn anchor_shifts_trigger_origin() {
        let items = active(1);
        let mut req = request(&items, Size::new(800.0, 600.0));
        req.trigger_anchor = Vec2::new(0.5, 0.5);
        let layout = compute_layout(&req);

        // top = ceil(100 - 10) and left = 100 - ceil(25); menu sits at left + width.
        assert_eq!(layout.container.origin(), Point::new(125.0, 90.0));
    }

    #[test]
    fn no_room_yields_zero_rows_and_one_column() {
        let items = active(3);
        let mut req = request(&items, Size::new(800.0, 210.0));
        req.item_fraction = Vec2::new(1.0, 6.0);
        let layout = compute_layout(&req);

        // 110px below the trigger cannot hold one 120px cell.
        assert!(!layout.grows_upward);
        assert_eq!(layout.rows, 0);
        assert_eq!(layout.columns, 1);
        assert!(layout.is_empty(), "nothing is placed without a row");
        assert_eq!(layout.container.height(), 0.0);
        assert_eq!(layout.container.width(), 50.0);
    }

    #[test]
    fn zero_viewport_defaults_down_and_right() {
        let items = active(3);
        let layout = compute_layout(&request(&items, Size::ZERO));

        assert!(!layout.grows_upward);
        assert!(!layout.grows_leftward);
        assert_eq!(layout.rows, 0, "no vertical space in an empty viewport");
        assert_eq!(layout.container.origin(), Point::new(150.0, 100.0));
    }

    #[test]
    fn zero_height_trigger_places_every_item_in_one_column() {
        let items = active(4);
        let mut req = request(&items, Size::new(800.0, 600.0));
        req.trigger_rect = Rect::new(100.0, 100.0, 150.0, 100.0);
        let layout = compute_layout(&req);

        assert_eq!((layout.rows, layout.columns), (4, 1));
        assert_eq!(layout.items.len(), 4);
    }

    #[test]
    fn invalid_geometry_is_clamped() {
        let items = active(2);
        let mut req = request(&items, Size::new(f64::NAN, -600.0));
        req.trigger_rect = Rect::new(-50.0, f64::NAN, 20.0, 20.0);
        let layout = compute_layout(&req);

        assert!(!layout.grows_upward);
        assert!(!layout.grows_leftward);
        assert!(layout.container.origin().x.is_finite());
        assert!(layout.container.origin().y.is_finite());
    }
}
