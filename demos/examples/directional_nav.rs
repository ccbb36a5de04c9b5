// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Driving the directional resolver over a small page.
//!
//! This example builds a nav cache for a toy page — a header row of links, a
//! content column, and a nested sub-document — then walks it with d-pad
//! moves and finishes with a touch-style point query.
//!
//! Run:
//! - `cargo run -p overstory_demos --example directional_nav`

use std::collections::HashMap;

use kurbo::Rect;
use overstory_nav::NavSession;
use overstory_nav_cache::{Direction, NavRect, NavTree, Node, NodeId};
use smallvec::smallvec;

/// A link node: layout hands us float world-space boxes.
fn link(bounds: Rect) -> Node {
    let bounds = NavRect::from_rect(bounds);
    Node {
        bounds,
        rects: smallvec![bounds],
        ..Node::default()
    }
}

fn name<'a>(id: Option<NodeId>, labels: &'a HashMap<NodeId, &'a str>) -> &'a str {
    match id {
        Some(id) => labels.get(&id).copied().unwrap_or("?"),
        None => "(no move)",
    }
}

fn main() {
    let mut tree = NavTree::new(NavRect::new(0, 0, 480, 320));
    let mut labels: HashMap<NodeId, &str> = HashMap::new();

    // Header row.
    let home = tree.add_node(NavTree::ROOT, link(Rect::new(10.0, 10.0, 90.0, 34.0)));
    let docs = tree.add_node(NavTree::ROOT, link(Rect::new(110.0, 10.0, 190.0, 34.0)));
    let about = tree.add_node(NavTree::ROOT, link(Rect::new(210.0, 10.0, 290.0, 34.0)));
    labels.insert(home, "home");
    labels.insert(docs, "docs");
    labels.insert(about, "about");

    // Content column under the first header link.
    let article = tree.add_node(NavTree::ROOT, link(Rect::new(10.0, 60.0, 200.0, 84.0)));
    let comments = tree.add_node(NavTree::ROOT, link(Rect::new(10.0, 110.0, 200.0, 134.0)));
    labels.insert(article, "article");
    labels.insert(comments, "comments");

    // A nested sub-document (an embedded ad or widget) on the right.
    let widget_view = NavRect::new(240, 60, 460, 200);
    let widget = tree.add_frame(NavTree::ROOT, widget_view, widget_view);
    tree.add_node(
        NavTree::ROOT,
        Node {
            bounds: widget_view,
            child_frame: Some(widget),
            ..Node::default()
        },
    );
    let widget_link = tree.add_node(widget, link(Rect::new(260.0, 80.0, 440.0, 104.0)));
    let widget_more = tree.add_node(widget, link(Rect::new(260.0, 130.0, 440.0, 154.0)));
    labels.insert(widget_link, "widget:link");
    labels.insert(widget_more, "widget:more");

    tree.finish().expect("cache invariants hold");

    // Seed the cursor on the first header link.
    tree.set_cursor(home);
    let mut session = NavSession::new();
    session.history_mut().set_nav_bounds(tree.node(home).bounds);
    session.enable_trace();

    // Walk the header, then let repeated presses wander down through the
    // content and the embedded widget.
    for direction in [
        Direction::Right,
        Direction::Right,
        Direction::Down,
        Direction::Down,
        Direction::Left,
    ] {
        let winner = session.move_cursor(&mut tree, direction);
        println!(
            "{:?}\t-> {}",
            direction,
            name(winner, &labels)
        );
        if let Some(trace) = session.trace() {
            let rejected = trace.rejections().count();
            println!("\t   ({rejected} candidates rejected this move)");
        }
    }
    session.reset_gesture();

    // Touch input goes through the point resolver instead.
    let finger = NavRect::new(300, 85, 340, 125);
    match session.hit_test(&tree, finger) {
        Some(hit) => println!(
            "touch {:?}\t-> {} at {:?}",
            finger.center(),
            name(Some(hit.node), &labels),
            hit.point
        ),
        None => println!("touch missed"),
    }
}
