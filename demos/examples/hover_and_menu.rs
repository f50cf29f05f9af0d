// Copyright 2025 the UI Presets Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover tracking and a context menu driven by a scripted frame loop.
//!
//! This example shows how to combine:
//! - `ui_presets_host` traits implemented by a tiny in-memory "engine",
//! - `ui_presets_bounds` for enter/exit events on two buttons,
//! - `ui_presets_menu` for opening a context menu on one of them, fitting its
//!   label text over several frames, and redrawing it when the trigger moves.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p ui_presets_demos --example hover_and_menu`

use std::collections::BTreeMap;

use kurbo::{Point, Size, Vec2};
use tracing_subscriber::EnvFilter;
use ui_presets_bounds::{BoundsTracker, RegionOptions, SWEEP_SLOT_NAME};
use ui_presets_host::{
    FrameTick, GeometrySource, HitTestSource, NodeGeometry, PointerSource, ScreenRoot, TickBinding,
};
use ui_presets_menu::{Activation, ContextMenu, FitStep, MenuSystem, TextMeasure};

/// Height reserved by the engine's title bar.
const TOP_INSET: f64 = 36.0;

/// Scene nodes, in paint order (later is on top).
#[derive(Debug, Default)]
struct Engine {
    nodes: BTreeMap<&'static str, NodeGeometry>,
    order: Vec<&'static str>,
    pointer: Option<Point>,
    slots: Vec<(&'static str, i32, TickBinding)>,
    next_binding: u64,
}

impl Engine {
    fn add(&mut self, name: &'static str, pos: Point, size: Size) {
        self.nodes.insert(name, NodeGeometry::new(pos, size));
        self.order.push(name);
    }
}

impl GeometrySource<&'static str> for Engine {
    fn geometry(&self, node: &&'static str) -> Option<NodeGeometry> {
        self.nodes.get(node).copied()
    }

    fn screen_root(&self, node: &&'static str) -> Option<ScreenRoot> {
        self.nodes
            .contains_key(node)
            .then(|| ScreenRoot::new(TOP_INSET, Size::new(800.0, 600.0)))
    }
}

impl PointerSource for Engine {
    fn pointer_position(&self) -> Option<Point> {
        self.pointer
    }
}

impl HitTestSource<&'static str> for Engine {
    fn nodes_at_point(&self, point: Point) -> Vec<&'static str> {
        // Pointer coordinates exclude the title bar.
        let inset = Vec2::new(0.0, TOP_INSET);
        self.order
            .iter()
            .rev()
            .filter(|name| {
                self.nodes
                    .get(*name)
                    .is_some_and(|g| ui_presets_host::contains_inclusive(g.rect() - inset, point))
            })
            .copied()
            .collect()
    }
}

impl FrameTick for Engine {
    fn bind(&mut self, name: &'static str, priority: i32) -> TickBinding {
        self.next_binding += 1;
        let binding = TickBinding(self.next_binding);
        self.slots.push((name, priority, binding));
        self.slots.sort_by_key(|(_, priority, _)| *priority);
        binding
    }

    fn unbind(&mut self, binding: TickBinding) {
        self.slots.retain(|(_, _, b)| *b != binding);
    }
}

/// Pretend glyphs are 0.6 em wide.
struct Glyphs;

impl TextMeasure for Glyphs {
    fn fits(&self, text: &str, font_size: f64, cell: Size) -> bool {
        text.chars().count() as f64 * font_size * 0.6 <= cell.width && font_size <= cell.height
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    tracing::info!("starting hover and menu demo");

    let mut engine = Engine::default();
    // Positions include the title bar.
    engine.add("save", Point::new(100.0, 136.0), Size::new(120.0, 30.0));
    engine.add("badge", Point::new(200.0, 130.0), Size::new(30.0, 20.0));

    let mut tracker = BoundsTracker::new();
    let save = tracker.register("save", true);
    let badge = tracker.register_with("badge", RegionOptions::default().top_most_only(), true);
    tracker.on_enter(save, || println!("  save: enter"));
    tracker.on_exit(save, || println!("  save: exit"));
    tracker.on_enter(badge, || println!("  badge: enter"));
    tracker.on_exit(badge, || println!("  badge: exit"));
    if let Err(err) = tracker.attach(&mut engine) {
        eprintln!("could not bind the sweep: {err}");
        return;
    }

    let mut menus = MenuSystem::new();
    let menu = menus.insert(
        ContextMenu::new("save")
            .with_item_fraction(Vec2::new(1.0, 0.8))
            .with_items([(1, "Save"), (2, "Save as…"), (3, "Export"), (4, "Revert")]),
    );
    let mut probe = menus
        .menu(menu)
        .map(|m| m.text_fit_probe(Size::new(120.0, 30.0)));

    let path = [
        Point::new(10.0, 10.0),
        Point::new(150.0, 110.0),
        Point::new(210.0, 100.0),
        // Nothing is hit here, so the top-most-only badge is not measured and holds its state.
        Point::new(400.0, 300.0),
    ];
    for (frame, pointer) in path.into_iter().enumerate() {
        println!("frame {frame}: pointer at ({:.0}, {:.0})", pointer.x, pointer.y);
        engine.pointer = Some(pointer);

        // The engine runs every bound slot in priority order.
        let slots: Vec<&'static str> = engine.slots.iter().map(|(name, ..)| *name).collect();
        for slot in slots {
            if slot == SWEEP_SLOT_NAME {
                let report = tracker.sweep(&engine);
                println!("  sweep: {report:?}");
            }
        }

        // Text fitting advances one size step per frame.
        if let Some(p) = probe.as_mut()
            && let FitStep::Ready(size) = p.step(&Glyphs)
        {
            println!("  label size resolved: {size}");
            if let Some(m) = menus.menu_mut(menu) {
                m.set_text_size(size);
            }
            probe = None;
        }

        // Secondary click on the second frame.
        if frame == 1 {
            match menus.activate(menu, &engine) {
                Ok(Activation::Opened { layout, .. }) => {
                    println!(
                        "  menu opened: {}x{} at {:?}",
                        layout.rows, layout.columns, layout.container
                    );
                }
                Ok(Activation::Closed) => println!("  menu closed"),
                Err(err) => println!("  menu not opened: {err}"),
            }
        }
    }

    // The trigger moves to the right half of the screen; the open menu flips left.
    if let Some(node) = engine.nodes.get_mut("save") {
        node.absolute_position = Point::new(600.0, 136.0);
    }
    if let Some(layout) = menus.trigger_moved(menu, &engine) {
        println!(
            "menu redrawn: {:?} (leftward: {}, text size: {:?})",
            layout.container, layout.grows_leftward, layout.text_size
        );
    }

    // Finishing the search without yielding is also possible.
    if let Some(m) = menus.menu_mut(menu) {
        let size = m.update_text_size(Size::new(120.0, 30.0), 14.0, &Glyphs);
        println!("label size after a blocking fit: {size}");
    }

    tracker.teardown(&mut engine);
    menus.teardown();
    println!("bound slots after teardown: {}", engine.slots.len());
}
