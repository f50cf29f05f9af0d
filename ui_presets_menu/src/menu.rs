// Copyright 2025 the UI Presets Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Context menus and the open/close state machine shared between them.
//!
//! A [`ContextMenu`] owns the items shown for one trigger node. A [`MenuSystem`]
//! owns many menus and decides which are open:
//!
//! - [`MenuSystem::activate`] toggles a menu (the host calls it on a secondary click).
//! - With [`MenuSystem::only_single_context`] on, opening a menu closes every other one.
//! - [`MenuSystem::trigger_moved`] recomputes the layout of an open menu.
//! - Removing a menu is final: its handle reports [`MenuState::Destroyed`].

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Size, Vec2};
use smallvec::SmallVec;
use ui_presets_host::GeometrySource;

use crate::error::MenuError;
use crate::layout::{MenuLayoutRequest, MenuLayoutResult, compute_layout, item_cell};
use crate::text_fit::{TextFitProbe, TextMeasure, TextSizingMode};

/// One entry of a [`ContextMenu`].
#[derive(Clone, Debug, PartialEq)]
pub struct MenuItem<I> {
    /// Caller-chosen handle, returned in layout placements.
    pub handle: I,
    /// Label text used for text fitting.
    pub label: String,
    /// Inactive items are kept but neither laid out nor measured.
    pub active: bool,
}

/// Items and sizing settings of a menu attached to a trigger node `K`.
///
/// Any change to the item list, the item fraction, or the sizing mode drops the
/// cached label size; it is recomputed on demand with [`ContextMenu::text_fit_probe`]
/// or [`ContextMenu::update_text_size`].
#[derive(Clone, Debug)]
pub struct ContextMenu<K, I> {
    trigger: K,
    items: Vec<MenuItem<I>>,
    item_fraction: Vec2,
    sizing: TextSizingMode,
    text_size: Option<f64>,
}

impl<K, I: PartialEq> ContextMenu<K, I> {
    /// Create an empty menu for `trigger` with full-size cells.
    pub fn new(trigger: K) -> Self {
        Self {
            trigger,
            items: Vec::new(),
            item_fraction: Vec2::new(1.0, 1.0),
            sizing: TextSizingMode::default(),
            text_size: None,
        }
    }

    /// Builder: set the item cell size as a fraction of the trigger size.
    #[must_use]
    pub fn with_item_fraction(mut self, fraction: Vec2) -> Self {
        self.item_fraction = fraction;
        self
    }

    /// Builder: set the text sizing mode.
    #[must_use]
    pub fn with_text_sizing(mut self, sizing: TextSizingMode) -> Self {
        self.sizing = sizing;
        self
    }

    /// Builder: append several active items at once.
    #[must_use]
    pub fn with_items<S: Into<String>>(mut self, items: impl IntoIterator<Item = (I, S)>) -> Self {
        self.items
            .extend(items.into_iter().map(|(handle, label)| MenuItem {
                handle,
                label: label.into(),
                active: true,
            }));
        self.text_size = None;
        self
    }

    /// Trigger node of this menu.
    pub fn trigger(&self) -> &K {
        &self.trigger
    }

    /// Append an active item.
    pub fn add_item(&mut self, handle: I, label: impl Into<String>) {
        self.items.push(MenuItem {
            handle,
            label: label.into(),
            active: true,
        });
        self.text_size = None;
    }

    /// Remove the first item with `handle`. Returns `false` if there is none.
    pub fn remove_item(&mut self, handle: &I) -> bool {
        let Some(index) = self.items.iter().position(|item| item.handle == *handle) else {
            return false;
        };
        self.items.remove(index);
        self.text_size = None;
        true
    }

    /// Activate or deactivate an item. Returns `false` if there is none with `handle`.
    pub fn set_item_active(&mut self, handle: &I, active: bool) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.handle == *handle) else {
            return false;
        };
        if item.active != active {
            item.active = active;
            self.text_size = None;
        }
        true
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
        self.text_size = None;
    }

    /// All items in display order.
    pub fn items(&self) -> &[MenuItem<I>] {
        &self.items
    }

    /// Active items in display order.
    pub fn active_items(&self) -> impl Iterator<Item = &MenuItem<I>> + '_ {
        self.items.iter().filter(|item| item.active)
    }

    /// Item cell size as a fraction of the trigger size.
    pub fn item_fraction(&self) -> Vec2 {
        self.item_fraction
    }

    /// Set the item cell fraction. Zero components are treated as `1` at layout time.
    pub fn set_item_fraction(&mut self, fraction: Vec2) {
        self.item_fraction = fraction;
        self.text_size = None;
    }

    /// Current text sizing mode.
    pub fn text_sizing(&self) -> TextSizingMode {
        self.sizing
    }

    /// Change the text sizing mode.
    pub fn set_text_sizing(&mut self, sizing: TextSizingMode) {
        self.sizing = sizing;
        self.text_size = None;
    }

    /// Cached common label size, if computed since the last change.
    pub fn text_size(&self) -> Option<f64> {
        self.text_size
    }

    /// Store a label size, typically the result of a finished [`TextFitProbe`].
    pub fn set_text_size(&mut self, size: f64) {
        self.text_size = Some(size);
    }

    /// Start a cooperative text-fit search over the active labels.
    ///
    /// `trigger_size` is the trigger's absolute size; cells are derived from it with
    /// the item fraction.
    pub fn text_fit_probe(&self, trigger_size: Size) -> TextFitProbe {
        TextFitProbe::new(
            self.active_items().map(|item| item.label.clone()),
            item_cell(trigger_size, self.item_fraction),
        )
    }

    /// Resolve the label size immediately and cache it.
    ///
    /// `base_text_size` is the trigger's own text size, used by [`TextSizingMode::Scaled`].
    pub fn update_text_size(
        &mut self,
        trigger_size: Size,
        base_text_size: f64,
        measure: &impl TextMeasure,
    ) -> f64 {
        let size = match self.sizing.scaled_size(base_text_size) {
            Some(size) => size,
            None => self.text_fit_probe(trigger_size).run_to_completion(measure),
        };
        self.text_size = Some(size);
        size
    }

    /// Lay out the active items against the trigger's current geometry.
    pub fn draw<G: GeometrySource<K>>(&self, host: &G) -> Result<MenuLayoutResult<I>, MenuError>
    where
        I: Clone,
    {
        let geometry = host.geometry(&self.trigger).ok_or(MenuError::Detached)?;
        let viewport = match host.screen_root(&self.trigger) {
            Some(root) => root.absolute_size,
            None => {
                tracing::debug!("trigger has no screen root; using the downward/rightward layout");
                Size::ZERO
            }
        };

        if self.active_items().next().is_none() {
            return Err(MenuError::NoActiveItems);
        }
        let items: SmallVec<[(I, bool); 16]> = self
            .items
            .iter()
            .map(|item| (item.handle.clone(), item.active))
            .collect();
        let mut layout = compute_layout(&MenuLayoutRequest {
            trigger_rect: geometry.rect(),
            trigger_anchor: geometry.anchor,
            viewport,
            item_fraction: self.item_fraction,
            items: &items,
        });
        if layout.is_empty() {
            return Err(MenuError::NoRoom);
        }
        layout.text_size = self.text_size;
        Ok(layout)
    }
}

/// Handle of a menu inside a [`MenuSystem`] (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct MenuId(u32, u32);

impl MenuId {
    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Lifecycle state of a menu.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuState {
    /// Registered but not shown.
    Closed,
    /// Shown.
    Open,
    /// Removed; the handle is inert.
    Destroyed,
}

/// Outcome of [`MenuSystem::activate`].
#[derive(Clone, Debug, PartialEq)]
pub enum Activation<I> {
    /// The menu opened with this layout.
    Opened {
        /// Layout to apply.
        layout: MenuLayoutResult<I>,
        /// Menus closed to keep only one open.
        closed: SmallVec<[MenuId; 2]>,
    },
    /// The menu was open and is now closed.
    Closed,
}

#[derive(Clone, Debug)]
struct Slot<K, I> {
    generation: u32,
    menu: ContextMenu<K, I>,
    open: bool,
}

/// Registry of context menus with single-open exclusivity.
///
/// ```rust
/// use kurbo::{Point, Size};
/// use ui_presets_host::{GeometrySource, NodeGeometry, ScreenRoot};
/// use ui_presets_menu::{Activation, ContextMenu, MenuState, MenuSystem};
///
/// struct Screen;
/// impl GeometrySource<&'static str> for Screen {
///     fn geometry(&self, _node: &&'static str) -> Option<NodeGeometry> {
///         Some(NodeGeometry::new(Point::new(100.0, 100.0), Size::new(50.0, 20.0)))
///     }
///     fn screen_root(&self, _node: &&'static str) -> Option<ScreenRoot> {
///         Some(ScreenRoot::new(0.0, Size::new(800.0, 600.0)))
///     }
/// }
///
/// let mut menus = MenuSystem::new();
/// let file = menus.insert(ContextMenu::new("file").with_items([(1, "Open"), (2, "Save")]));
///
/// let Ok(Activation::Opened { layout, .. }) = menus.activate(file, &Screen) else {
///     panic!("menu should open");
/// };
/// assert_eq!(layout.rows, 2);
/// assert_eq!(menus.state(file), MenuState::Open);
///
/// // A second activation toggles it closed.
/// assert_eq!(menus.activate(file, &Screen), Ok(Activation::Closed));
/// ```
#[derive(Clone, Debug)]
pub struct MenuSystem<K, I> {
    slots: Vec<Option<Slot<K, I>>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    only_single_context: bool,
}

impl<K, I: Clone + PartialEq> Default for MenuSystem<K, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, I: Clone + PartialEq> MenuSystem<K, I> {
    /// Create an empty registry with single-open exclusivity on.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            only_single_context: true,
        }
    }

    /// Whether opening a menu closes every other open menu.
    pub fn only_single_context(&self) -> bool {
        self.only_single_context
    }

    /// Turn single-open exclusivity on or off. Already open menus stay open.
    pub fn set_only_single_context(&mut self, only_single: bool) {
        self.only_single_context = only_single;
    }

    /// Take ownership of a menu. It starts closed.
    pub fn insert(&mut self, menu: ContextMenu<K, I>) -> MenuId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            (idx, generation)
        } else {
            self.slots.push(None);
            self.generations.push(1);
            (self.slots.len() - 1, 1)
        };
        self.slots[idx] = Some(Slot {
            generation,
            menu,
            open: false,
        });
        #[allow(
            clippy::cast_possible_truncation,
            reason = "MenuId uses 32-bit indices."
        )]
        let id = MenuId(idx as u32, generation);
        tracing::trace!(menu = ?id, "menu inserted");
        id
    }

    /// Destroy a menu and hand it back. `None` if it was already removed.
    pub fn remove(&mut self, id: MenuId) -> Option<ContextMenu<K, I>> {
        self.slot(id)?;
        let slot = self.slots[id.idx()].take()?;
        self.free_list.push(id.idx());
        tracing::trace!(menu = ?id, "menu removed");
        Some(slot.menu)
    }

    /// Lifecycle state of a menu.
    pub fn state(&self, id: MenuId) -> MenuState {
        match self.slot(id) {
            Some(slot) if slot.open => MenuState::Open,
            Some(_) => MenuState::Closed,
            None => MenuState::Destroyed,
        }
    }

    /// The menu behind `id`.
    pub fn menu(&self, id: MenuId) -> Option<&ContextMenu<K, I>> {
        self.slot(id).map(|slot| &slot.menu)
    }

    /// Mutable access to the menu behind `id`.
    ///
    /// Edits do not redraw an open menu; call [`MenuSystem::trigger_moved`] to refresh it.
    pub fn menu_mut(&mut self, id: MenuId) -> Option<&mut ContextMenu<K, I>> {
        self.slot_mut(id).map(|slot| &mut slot.menu)
    }

    /// Toggle a menu: open it if closed, close it if open.
    ///
    /// Opening computes the layout from the trigger's geometry. If that fails the menu
    /// stays closed and no other menu is touched.
    pub fn activate<G: GeometrySource<K>>(
        &mut self,
        id: MenuId,
        host: &G,
    ) -> Result<Activation<I>, MenuError> {
        let slot = self.slot(id).ok_or(MenuError::Stale)?;
        if slot.open {
            self.close(id);
            return Ok(Activation::Closed);
        }

        let layout = slot.menu.draw(host).inspect_err(|err| {
            tracing::debug!(menu = ?id, %err, "menu not opened");
        })?;

        let closed = if self.only_single_context {
            self.close_others(id)
        } else {
            SmallVec::new()
        };
        if let Some(slot) = self.slot_mut(id) {
            slot.open = true;
        }
        tracing::trace!(menu = ?id, closed = closed.len(), "menu opened");
        Ok(Activation::Opened { layout, closed })
    }

    /// Close a menu. Returns `false` if it was not open.
    pub fn close(&mut self, id: MenuId) -> bool {
        match self.slot_mut(id) {
            Some(slot) if slot.open => {
                slot.open = false;
                true
            }
            _ => false,
        }
    }

    /// Close every open menu and return their handles.
    pub fn close_all(&mut self) -> SmallVec<[MenuId; 2]> {
        self.close_matching(|_| true)
    }

    /// Redraw an open menu after its trigger moved.
    ///
    /// Closed or stale menus return `None`. A menu whose trigger can no longer be laid
    /// out stays open and also returns `None`.
    pub fn trigger_moved<G: GeometrySource<K>>(
        &mut self,
        id: MenuId,
        host: &G,
    ) -> Option<MenuLayoutResult<I>> {
        let slot = self.slot(id).filter(|slot| slot.open)?;
        match slot.menu.draw(host) {
            Ok(layout) => Some(layout),
            Err(err) => {
                tracing::debug!(menu = ?id, %err, "open menu not redrawn");
                None
            }
        }
    }

    /// Handles of all open menus.
    pub fn open_menus(&self) -> impl Iterator<Item = MenuId> + '_ {
        self.ids().filter(|id| self.state(*id) == MenuState::Open)
    }

    /// Handles of all menus, in slot order.
    pub fn ids(&self) -> impl Iterator<Item = MenuId> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "MenuId uses 32-bit indices."
            )]
            slot.as_ref().map(|s| MenuId(i as u32, s.generation))
        })
    }

    /// Number of menus.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    /// Returns `true` if no menus are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shutdown: destroy every menu.
    pub fn teardown(&mut self) {
        let ids: SmallVec<[MenuId; 8]> = self.ids().collect();
        for id in ids {
            self.remove(id);
        }
    }

    fn close_others(&mut self, keep: MenuId) -> SmallVec<[MenuId; 2]> {
        self.close_matching(|id| id != keep)
    }

    fn close_matching(&mut self, mut pred: impl FnMut(MenuId) -> bool) -> SmallVec<[MenuId; 2]> {
        let open: SmallVec<[MenuId; 2]> = self.open_menus().filter(|id| pred(*id)).collect();
        for id in &open {
            self.close(*id);
        }
        open
    }

    fn slot(&self, id: MenuId) -> Option<&Slot<K, I>> {
        self.slots
            .get(id.idx())
            .and_then(|s| s.as_ref())
            .filter(|s| s.generation == id.1)
    }

    fn slot_mut(&mut self, id: MenuId) -> Option<&mut Slot<K, I>> {
        self.slots
            .get_mut(id.idx())
            .and_then(|s| s.as_mut())
            .filter(|s| s.generation == id.1)
    }
}

impl<K: PartialEq, I: Clone + PartialEq> MenuSystem<K, I> {
    /// Host destruction hook: destroy every menu triggered by `node`.
    pub fn trigger_destroyed(&mut self, node: &K) -> usize {
        let doomed: SmallVec<[MenuId; 2]> = self
            .ids()
            .filter(|id| self.menu(*id).is_some_and(|m| m.trigger() == node))
            .collect();
        for id in &doomed {
            self.remove(*id);
        }
        doomed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeMap;
    use kurbo::Point;
    use ui_presets_host::{NodeGeometry, ScreenRoot};

    #[derive(Default)]
    struct Screen {
        nodes: BTreeMap<u32, NodeGeometry>,
        viewport: Option<Size>,
    }

    impl Screen {
        fn with_triggers(triggers: &[(u32, Point)]) -> Self {
            let mut screen = Self {
                viewport: Some(Size::new(800.0, 600.0)),
                ..Self::default()
            };
            for (node, pos) in triggers {
                screen
                    .nodes
                    .insert(*node, NodeGeometry::new(*pos, Size::new(50.0, 20.0)));
            }
            screen
        }
    }

    impl GeometrySource<u32> for Screen {
        fn geometry(&self, node: &u32) -> Option<NodeGeometry> {
            self.nodes.get(node).copied()
        }

        fn screen_root(&self, _node: &u32) -> Option<ScreenRoot> {
            self.viewport.map(|size| ScreenRoot::new(0.0, size))
        }
    }

    /// Every label fits up to 30pt.
    struct UpTo30;

    impl TextMeasure for UpTo30 {
        fn fits(&self, _text: &str, font_size: f64, _cell: Size) -> bool {
            font_size <= 30.0
        }
    }

    fn menu(trigger: u32, n: u8) -> ContextMenu<u32, u8> {
        ContextMenu::new(trigger).with_items((0..n).map(|i| (i, "item")))
    }

    fn opened(a: Result<Activation<u8>, MenuError>) -> MenuLayoutResult<u8> {
        match a {
            Ok(Activation::Opened { layout, .. }) => layout,
            other => panic!("expected the menu to open, got {other:?}"),
        }
    }

    #[test]
    fn activate_toggles_open_and_closed() {
        let screen = Screen::with_triggers(&[(1, Point::new(100.0, 100.0))]);
        let mut menus = MenuSystem::new();
        let id = menus.insert(menu(1, 5));
        assert_eq!(menus.state(id), MenuState::Closed);

        let layout = opened(menus.activate(id, &screen));
        assert_eq!(layout.container.size(), Size::new(50.0, 100.0));
        assert_eq!(menus.state(id), MenuState::Open);

        assert_eq!(menus.activate(id, &screen), Ok(Activation::Closed));
        assert_eq!(menus.state(id), MenuState::Closed);
    }

    #[test]
    fn opening_one_closes_the_other() {
        let screen = Screen::with_triggers(&[
            (1, Point::new(100.0, 100.0)),
            (2, Point::new(300.0, 100.0)),
        ]);
        let mut menus = MenuSystem::new();
        let a = menus.insert(menu(1, 2));
        let b = menus.insert(menu(2, 2));

        opened(menus.activate(a, &screen));
        match menus.activate(b, &screen) {
            Ok(Activation::Opened { closed, .. }) => assert_eq!(closed.as_slice(), &[a]),
            other => panic!("expected b to open, got {other:?}"),
        }
        assert_eq!(menus.state(a), MenuState::Closed);
        assert_eq!(menus.state(b), MenuState::Open);
    }

    #[test]
    fn exclusivity_can_be_turned_off() {
        let screen = Screen::with_triggers(&[
            (1, Point::new(100.0, 100.0)),
            (2, Point::new(300.0, 100.0)),
        ]);
        let mut menus = MenuSystem::new();
        menus.set_only_single_context(false);
        let a = menus.insert(menu(1, 2));
        let b = menus.insert(menu(2, 2));

        opened(menus.activate(a, &screen));
        opened(menus.activate(b, &screen));
        assert_eq!(menus.open_menus().count(), 2);
        assert_eq!(menus.close_all().len(), 2);
        assert_eq!(menus.open_menus().count(), 0);
    }

    #[test]
    fn menu_without_active_items_stays_closed() {
        let screen = Screen::with_triggers(&[
            (1, Point::new(100.0, 100.0)),
            (2, Point::new(300.0, 100.0)),
        ]);
        let mut menus = MenuSystem::new();
        let open = menus.insert(menu(1, 1));
        let empty = menus.insert(menu(2, 1));
        menus.menu_mut(empty).unwrap().set_item_active(&0, false);

        opened(menus.activate(open, &screen));
        assert_eq!(menus.activate(empty, &screen), Err(MenuError::NoActiveItems));
        assert_eq!(menus.state(empty), MenuState::Closed);
        assert_eq!(menus.state(open), MenuState::Open, "failed open leaves others alone");
    }

    #[test]
    fn detached_trigger_does_not_open() {
        let screen = Screen::default();
        let mut menus = MenuSystem::new();
        let id = menus.insert(menu(7, 3));
        assert_eq!(menus.activate(id, &screen), Err(MenuError::Detached));
        assert_eq!(menus.state(id), MenuState::Closed);
    }

    #[test]
    fn missing_screen_root_uses_default_direction() {
        let mut screen = Screen::with_triggers(&[(1, Point::new(700.0, 500.0))]);
        screen.viewport = None;
        let mut menus = MenuSystem::new();
        let id = menus.insert(menu(1, 2));
        // No viewport means no room below, so nothing can be placed.
        assert_eq!(menus.activate(id, &screen), Err(MenuError::NoRoom));
        assert_eq!(menus.state(id), MenuState::Closed);

        let layout = menus
            .menu(id)
            .unwrap()
            .draw(&Screen::with_triggers(&[(1, Point::new(700.0, 500.0))]))
            .unwrap();
        assert!(layout.grows_upward && layout.grows_leftward);
    }

    #[test]
    fn trigger_moved_redraws_only_open_menus() {
        let mut screen = Screen::with_triggers(&[(1, Point::new(100.0, 100.0))]);
        let mut menus = MenuSystem::new();
        let id = menus.insert(menu(1, 3));
        assert!(menus.trigger_moved(id, &screen).is_none(), "closed menus are not drawn");

        opened(menus.activate(id, &screen));
        screen
            .nodes
            .insert(1, NodeGeometry::new(Point::new(600.0, 100.0), Size::new(50.0, 20.0)));
        let layout = menus.trigger_moved(id, &screen).unwrap();
        assert!(layout.grows_leftward);
        assert_eq!(layout.container.x1, 600.0);
    }

    #[test]
    fn removed_menus_are_destroyed() {
        let screen = Screen::with_triggers(&[(1, Point::new(100.0, 100.0))]);
        let mut menus = MenuSystem::new();
        let id = menus.insert(menu(1, 3));
        assert!(menus.remove(id).is_some());
        assert!(menus.remove(id).is_none(), "second remove is a no-op");
        assert_eq!(menus.state(id), MenuState::Destroyed);
        assert_eq!(menus.activate(id, &screen), Err(MenuError::Stale));
        assert!(!menus.close(id));

        let reused = menus.insert(menu(1, 1));
        assert_ne!(reused, id);
        assert_eq!(menus.state(id), MenuState::Destroyed);
    }

    #[test]
    fn trigger_destroyed_and_teardown() {
        let mut menus = MenuSystem::new();
        menus.insert(menu(1, 1));
        menus.insert(menu(1, 2));
        let other = menus.insert(menu(2, 1));

        assert_eq!(menus.trigger_destroyed(&1), 2);
        assert_eq!(menus.len(), 1);
        assert_eq!(menus.state(other), MenuState::Closed);

        menus.teardown();
        assert!(menus.is_empty());
        assert_eq!(menus.state(other), MenuState::Destroyed);
    }

    #[test]
    fn item_edits_invalidate_text_size() {
        let trigger = Size::new(50.0, 20.0);
        let mut m = menu(1, 2);
        assert_eq!(m.update_text_size(trigger, 14.0, &UpTo30), 22.5);
        assert_eq!(m.text_size(), Some(22.5));

        m.add_item(9, "more");
        assert_eq!(m.text_size(), None, "adding drops the cache");
        m.set_text_size(22.5);
        assert!(m.set_item_active(&9, true), "no change, cache kept");
        assert_eq!(m.text_size(), Some(22.5));
        m.set_item_active(&9, false);
        assert_eq!(m.text_size(), None, "deactivating drops the cache");
        m.set_text_size(22.5);
        assert!(m.remove_item(&9));
        assert_eq!(m.text_size(), None, "removing drops the cache");
        assert!(!m.remove_item(&9));

        m.set_text_sizing(TextSizingMode::Scaled(2.0));
        assert_eq!(m.update_text_size(trigger, 14.0, &UpTo30), 28.0);
    }

    #[test]
    fn layout_carries_cached_text_size() {
        let screen = Screen::with_triggers(&[(1, Point::new(100.0, 100.0))]);
        let mut m = menu(1, 2);
        assert_eq!(m.draw(&screen).unwrap().text_size, None);
        m.set_text_size(12.0);
        assert_eq!(m.draw(&screen).unwrap().text_size, Some(12.0));
    }

    #[test]
    fn probe_measures_active_labels_in_item_cells() {
        let mut m = ContextMenu::new(1_u32)
            .with_item_fraction(Vec2::new(0.5, 0.0))
            .with_items([(1_u8, "Cut"), (2, "Copy")]);
        m.set_item_active(&1, false);
        let probe = m.text_fit_probe(Size::new(50.0, 20.0));
        assert_eq!(probe.cell(), Size::new(25.0, 20.0));
        assert_eq!(probe.run_to_completion(&UpTo30), 22.5);
    }
}
