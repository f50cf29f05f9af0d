// Copyright 2025 the UI Presets Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region registry, per-region query, and the per-frame sweep.

use alloc::{boxed::Box, vec::Vec};
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use smallvec::SmallVec;
use ui_presets_host::{FrameTick, Host, NodeGeometry, ScreenRoot, TickBinding, contains_inclusive};

use crate::error::{QueryError, TrackerError};
use crate::types::{BoundsLayout, Edge, ListenerId, RegionId, RegionOptions};

/// Priority of the sweep slot: just after the host's input stage (100).
pub const SWEEP_PRIORITY: i32 = 105;

/// Name of the sweep slot bound by [`BoundsTracker::attach`].
pub const SWEEP_SLOT_NAME: &str = "ui_presets.bounds_sweep";

struct Listener {
    id: ListenerId,
    edge: Edge,
    callback: Box<dyn FnMut() + Send>,
}

impl core::fmt::Debug for Listener {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id)
            .field("edge", &self.edge)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
struct Region<K> {
    generation: u32,
    node: K,
    active: bool,
    options: RegionOptions,
    last_bounds: BoundsLayout,
    within_bounds: bool,
    listeners: Vec<Listener>,
}

impl<K> Region<K> {
    fn new(generation: u32, node: K, active: bool, options: RegionOptions) -> Self {
        Self {
            generation,
            node,
            active,
            options,
            last_bounds: BoundsLayout::default(),
            within_bounds: false,
            listeners: Vec::new(),
        }
    }

    /// Store the new containment state and notify listeners if it changed.
    fn transition(&mut self, inside: bool) -> Option<Edge> {
        if inside == self.within_bounds {
            return None;
        }
        self.within_bounds = inside;
        let edge = if inside { Edge::Enter } else { Edge::Exit };
        for listener in self.listeners.iter_mut().filter(|l| l.edge == edge) {
            (listener.callback)();
        }
        Some(edge)
    }
}

/// Outcome of one [`BoundsTracker::sweep`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Regions that were measured this tick.
    pub queried: usize,
    /// Active regions whose query soft-failed (hidden, detached, covered, …).
    pub skipped: usize,
    /// Enter/exit transitions in sweep order.
    pub transitions: Vec<(RegionId, Edge)>,
}

/// Registry of tracked regions, polled once per frame.
///
/// ## Usage
///
/// - [`BoundsTracker::register`] a host node to obtain a [`RegionId`].
/// - Subscribe with [`BoundsTracker::on_enter`] / [`BoundsTracker::on_exit`], or read
///   [`SweepReport::transitions`].
/// - [`BoundsTracker::attach`] binds a slot on the host's [`FrameTick`]; the host then calls
///   [`BoundsTracker::sweep`] from that slot every frame.
/// - [`BoundsTracker::query`] can also be called directly for on-demand checks.
/// - [`BoundsTracker::teardown`] unbinds and clears everything at shutdown.
///
/// Containment state changes only inside a query, and listeners fire only on
/// transitions, so enter and exit always alternate starting with enter.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Point, Size};
/// use ui_presets_bounds::BoundsTracker;
/// use ui_presets_host::{GeometrySource, HitTestSource, NodeGeometry, PointerSource, ScreenRoot};
///
/// struct OneButton {
///     pointer: Point,
/// }
///
/// impl GeometrySource<u32> for OneButton {
///     fn geometry(&self, _node: &u32) -> Option<NodeGeometry> {
///         Some(NodeGeometry::new(Point::new(100.0, 100.0), Size::new(50.0, 20.0)))
///     }
///     fn screen_root(&self, _node: &u32) -> Option<ScreenRoot> {
///         Some(ScreenRoot::new(0.0, Size::new(800.0, 600.0)))
///     }
/// }
/// impl PointerSource for OneButton {
///     fn pointer_position(&self) -> Option<Point> {
///         Some(self.pointer)
///     }
/// }
/// impl HitTestSource<u32> for OneButton {
///     fn nodes_at_point(&self, _point: Point) -> Vec<u32> {
///         vec![7]
///     }
/// }
///
/// let mut tracker = BoundsTracker::new();
/// let region = tracker.register(7_u32, true);
///
/// let host = OneButton { pointer: Point::new(120.0, 110.0) };
/// let report = tracker.sweep(&host);
/// assert_eq!(report.transitions.len(), 1);
/// assert!(tracker.in_bounds(region));
/// ```
pub struct BoundsTracker<K> {
    /// slots
    regions: Vec<Option<Region<K>>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    by_node: HashMap<K, RegionId>,
    binding: Option<TickBinding>,
    next_listener: u64,
}

impl<K> core::fmt::Debug for BoundsTracker<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.regions.len();
        let alive = self.regions.iter().filter(|r| r.is_some()).count();
        f.debug_struct("BoundsTracker")
            .field("regions_total", &total)
            .field("regions_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("binding", &self.binding)
            .finish_non_exhaustive()
    }
}

impl<K: Clone + Eq + Hash> Default for BoundsTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Eq + Hash> BoundsTracker<K> {
    /// Create an empty, unattached tracker.
    pub fn new() -> Self {
        Self {
            regions: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            by_node: HashMap::new(),
            binding: None,
            next_listener: 0,
        }
    }

    /// Track `node` with default [`RegionOptions`].
    pub fn register(&mut self, node: K, active_on_start: bool) -> RegionId {
        self.register_with(node, RegionOptions::default(), active_on_start)
    }

    /// Track `node` with explicit options.
    ///
    /// A node has at most one region. Registering a node that is already tracked
    /// logs a warning and returns the existing handle unchanged.
    pub fn register_with(
        &mut self,
        node: K,
        options: RegionOptions,
        active_on_start: bool,
    ) -> RegionId {
        if let Some(&existing) = self.by_node.get(&node)
            && self.is_alive(existing)
        {
            tracing::warn!(region = ?existing, "node is already tracked; keeping the existing region");
            return existing;
        }

        let region = Region::new(0, node.clone(), active_on_start, options);
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.regions[idx] = Some(Region { generation, ..region });
            #[allow(
                clippy::cast_possible_truncation,
                reason = "RegionId uses 32-bit indices."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.regions.push(Some(Region { generation, ..region }));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "RegionId uses 32-bit indices."
            )]
            ((self.regions.len() - 1) as u32, generation)
        };
        let id = RegionId::new(idx, generation);
        self.by_node.insert(node, id);
        tracing::trace!(region = ?id, active = active_on_start, "registered region");
        id
    }

    /// Stop tracking a region and release its listeners.
    ///
    /// Returns `false` (and does nothing) if the handle is already stale.
    pub fn unregister(&mut self, id: RegionId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let Some(region) = self.regions[id.idx()].take() else {
            return false;
        };
        if self.by_node.get(&region.node) == Some(&id) {
            self.by_node.remove(&region.node);
        }
        self.free_list.push(id.idx());
        tracing::trace!(region = ?id, "unregistered region");
        true
    }

    /// Host destruction hook: unregister the region tracking `node`, if any.
    pub fn node_destroyed(&mut self, node: &K) -> bool {
        match self.by_node.get(node).copied() {
            Some(id) => self.unregister(id),
            None => false,
        }
    }

    /// Include or exclude a region from subsequent sweeps. No query is issued.
    ///
    /// Returns `false` for stale handles.
    pub fn set_active(&mut self, id: RegionId, active: bool) -> bool {
        match self.region_mut(id) {
            Some(r) => {
                r.active = active;
                true
            }
            None => false,
        }
    }

    /// Replace a region's options. Takes effect on the next query.
    pub fn set_options(&mut self, id: RegionId, options: RegionOptions) -> bool {
        match self.region_mut(id) {
            Some(r) => {
                r.options = options;
                true
            }
            None => false,
        }
    }

    /// Subscribe to false → true transitions of a region.
    ///
    /// Listeners are `Send` so a tracker can live behind a mutex shared across threads.
    pub fn on_enter(
        &mut self,
        id: RegionId,
        f: impl FnMut() + Send + 'static,
    ) -> Option<ListenerId> {
        self.add_listener(id, Edge::Enter, Box::new(f))
    }

    /// Subscribe to true → false transitions of a region.
    pub fn on_exit(
        &mut self,
        id: RegionId,
        f: impl FnMut() + Send + 'static,
    ) -> Option<ListenerId> {
        self.add_listener(id, Edge::Exit, Box::new(f))
    }

    /// Drop a single listener. Returns `false` if either handle is stale.
    pub fn remove_listener(&mut self, id: RegionId, listener: ListenerId) -> bool {
        let Some(region) = self.region_mut(id) else {
            return false;
        };
        let before = region.listeners.len();
        region.listeners.retain(|l| l.id != listener);
        region.listeners.len() != before
    }

    /// Measure a region against the current pointer and fire enter/exit on transitions.
    ///
    /// Soft failures (see [`QueryError`]) are logged and reported as `false`
    /// without touching the region's containment state.
    pub fn query<H: Host<K>>(&mut self, id: RegionId, host: &H) -> bool {
        match self.query_inner(id, host) {
            Ok((inside, _)) => inside,
            Err(err) => {
                log_soft_failure(id, err);
                false
            }
        }
    }

    /// Like [`BoundsTracker::query`], but reports why a measurement was skipped.
    pub fn try_query<H: Host<K>>(&mut self, id: RegionId, host: &H) -> Result<bool, QueryError> {
        self.query_inner(id, host).map(|(inside, _)| inside)
    }

    /// Query every active region once. Called by the host from the bound frame slot.
    ///
    /// A failing region never blocks the others.
    pub fn sweep<H: Host<K>>(&mut self, host: &H) -> SweepReport {
        // Snapshot so the slot vector is not borrowed across queries.
        let snapshot: SmallVec<[RegionId; 16]> = self.active_ids().collect();
        let mut report = SweepReport::default();
        for id in snapshot {
            match self.query_inner(id, host) {
                Ok((_, edge)) => {
                    report.queried += 1;
                    if let Some(edge) = edge {
                        report.transitions.push((id, edge));
                    }
                }
                Err(QueryError::Stale) => {}
                Err(err) => {
                    report.skipped += 1;
                    log_soft_failure(id, err);
                }
            }
        }
        tracing::trace!(
            queried = report.queried,
            skipped = report.skipped,
            transitions = report.transitions.len(),
            "bounds sweep"
        );
        report
    }

    /// Bind the sweep slot on the host's frame tick.
    pub fn attach(&mut self, tick: &mut impl FrameTick) -> Result<TickBinding, TrackerError> {
        if self.binding.is_some() {
            return Err(TrackerError::AlreadyAttached);
        }
        let binding = tick.bind(SWEEP_SLOT_NAME, SWEEP_PRIORITY);
        self.binding = Some(binding);
        Ok(binding)
    }

    /// Unbind the sweep slot. Returns `false` if the tracker was not attached.
    pub fn detach(&mut self, tick: &mut impl FrameTick) -> bool {
        match self.binding.take() {
            Some(binding) => {
                tick.unbind(binding);
                true
            }
            None => false,
        }
    }

    /// Shutdown: unbind from the frame tick and unregister every region.
    pub fn teardown(&mut self, tick: &mut impl FrameTick) {
        self.detach(tick);
        self.clear();
    }

    /// Unregister every region. Outstanding handles become stale.
    pub fn clear(&mut self) {
        let ids: Vec<RegionId> = self.ids().collect();
        for id in ids {
            self.unregister(id);
        }
    }
}

impl<K> BoundsTracker<K> {
    /// Returns true if `id` refers to a registered region.
    pub fn is_alive(&self, id: RegionId) -> bool {
        self.regions
            .get(id.idx())
            .and_then(|r| r.as_ref())
            .is_some_and(|r| r.generation == id.1)
    }

    /// Last containment state of a region; `false` for stale handles.
    pub fn in_bounds(&self, id: RegionId) -> bool {
        self.region(id).is_some_and(|r| r.within_bounds)
    }

    /// Bounds measured by the region's most recent successful query.
    pub fn bounds(&self, id: RegionId) -> Option<BoundsLayout> {
        self.region(id).map(|r| r.last_bounds)
    }

    /// Whether a region participates in sweeps.
    pub fn is_active(&self, id: RegionId) -> Option<bool> {
        self.region(id).map(|r| r.active)
    }

    /// Options of a live region.
    pub fn options(&self, id: RegionId) -> Option<RegionOptions> {
        self.region(id).map(|r| r.options)
    }

    /// Host node tracked by a live region.
    pub fn node(&self, id: RegionId) -> Option<&K> {
        self.region(id).map(|r| &r.node)
    }

    /// Whether the sweep slot is currently bound.
    pub fn is_attached(&self) -> bool {
        self.binding.is_some()
    }

    /// Number of registered regions.
    pub fn len(&self) -> usize {
        self.regions.len() - self.free_list.len()
    }

    /// Returns `true` if no regions are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate handles of all registered regions in slot order.
    pub fn ids(&self) -> impl Iterator<Item = RegionId> + '_ {
        self.regions
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.as_ref().map(|r| slot_id(i, r.generation)))
    }

    fn active_ids(&self) -> impl Iterator<Item = RegionId> + '_ {
        self.regions
            .iter()
            .enumerate()
            .filter_map(|(i, r)| match r {
                Some(r) if r.active => Some(slot_id(i, r.generation)),
                _ => None,
            })
    }

    fn region(&self, id: RegionId) -> Option<&Region<K>> {
        self.regions
            .get(id.idx())
            .and_then(|r| r.as_ref())
            .filter(|r| r.generation == id.1)
    }

    fn region_mut(&mut self, id: RegionId) -> Option<&mut Region<K>> {
        self.regions
            .get_mut(id.idx())
            .and_then(|r| r.as_mut())
            .filter(|r| r.generation == id.1)
    }

    fn add_listener(
        &mut self,
        id: RegionId,
        edge: Edge,
        callback: Box<dyn FnMut() + Send>,
    ) -> Option<ListenerId> {
        let listener = ListenerId(self.next_listener);
        let region = self.region_mut(id)?;
        region.listeners.push(Listener {
            id: listener,
            edge,
            callback,
        });
        self.next_listener += 1;
        Some(listener)
    }
}

impl<K: PartialEq> BoundsTracker<K> {
    fn query_inner<H: Host<K>>(
        &mut self,
        id: RegionId,
        host: &H,
    ) -> Result<(bool, Option<Edge>), QueryError> {
        let region = self.region_mut(id).ok_or(QueryError::Stale)?;
        let geometry = host.geometry(&region.node).ok_or(QueryError::Detached)?;
        let options = region.options;

        // Hidden regions keep their last bounds and state; hiding never reads as an exit.
        if options.contains(RegionOptions::CONSIDER_VISIBILITY) && !geometry.visible {
            return Err(QueryError::Hidden);
        }

        let root = host.screen_root(&region.node);
        if root.is_none() && !options.contains(RegionOptions::IGNORE_SCREEN_INSET) {
            return Err(QueryError::NoScreenRoot);
        }

        let pointer = host.pointer_position().ok_or(QueryError::NoPointer)?;

        // An empty or occluded hit stack leaves bounds and state as they were.
        if options.contains(RegionOptions::TOP_MOST_ONLY)
            && host.nodes_at_point(pointer).first() != Some(&region.node)
        {
            return Err(QueryError::NotTopmost);
        }

        let rect = measured_rect(&geometry, root.as_ref(), options);
        let inside = contains_inclusive(rect, pointer);

        region.last_bounds = BoundsLayout::from_rect(rect);
        Ok((inside, region.transition(inside)))
    }
}

/// Absolute rect of a node, with the screen root's top inset removed unless ignored.
fn measured_rect(geometry: &NodeGeometry, root: Option<&ScreenRoot>, options: RegionOptions) -> Rect {
    let left = geometry.absolute_position.x;
    let top = match root {
        Some(root) if !options.contains(RegionOptions::IGNORE_SCREEN_INSET) => {
            geometry.absolute_position.y - root.absolute_position.y
        }
        _ => geometry.absolute_position.y,
    };
    Rect::from_origin_size(Point::new(left, top), geometry.absolute_size)
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "RegionId uses 32-bit indices."
)]
#[inline]
fn slot_id(idx: usize, generation: u32) -> RegionId {
    RegionId::new(idx as u32, generation)
}

fn log_soft_failure(id: RegionId, err: QueryError) {
    match err {
        QueryError::Detached | QueryError::NoScreenRoot => {
            tracing::warn!(region = ?id, %err, "bounds query skipped");
        }
        QueryError::Stale
        | QueryError::Hidden
        | QueryError::NoPointer
        | QueryError::NotTopmost => {
            tracing::debug!(region = ?id, %err, "bounds query skipped");
        }
    }
}
