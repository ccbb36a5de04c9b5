// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point-based resolvers for touch and pointer input.
//!
//! Structurally similar to the directional resolver but history-free: given
//! a query rectangle (a touch area, or a 1×1 rect for a pointer), find the
//! candidate under it and a representative point to use as the synthetic
//! interaction location.

use overstory_nav_cache::{FrameId, NavRect, NavTree, NodeId};

/// Result of a point query: the chosen node and the point to synthesize the
/// interaction at. The owning frame is [`NodeId::frame`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PointHit {
    /// The chosen node.
    pub node: NodeId,
    /// Representative interaction point, in root coordinates.
    pub point: (i32, i32),
}

/// Find the best candidate under `query`.
///
/// A *direct hit* — the query's center inside one of a node's navigable
/// rectangles — takes absolute precedence, preferring the most specific
/// (smallest enclosing) node when several overlap. Failing that, the nearest
/// candidate by center-to-center distance wins, with "inside the query"
/// strictly preferred over "merely intersecting it".
pub fn find_best_at(tree: &NavTree, query: NavRect) -> Option<PointHit> {
    let mut state = BestAt {
        query,
        center: query.center(),
        best: i64::MAX,
        inside: false,
        direct: None,
        result: None,
    };
    best_at_in(tree, NavTree::ROOT, &mut state);
    if let Some(node) = state.direct {
        return Some(PointHit {
            node,
            point: state.center,
        });
    }
    state.result.map(|(node, point)| PointHit { node, point })
}

struct BestAt {
    query: NavRect,
    center: (i32, i32),
    best: i64,
    inside: bool,
    direct: Option<NodeId>,
    result: Option<(NodeId, (i32, i32))>,
}

fn best_at_in(tree: &NavTree, frame: FrameId, state: &mut BestAt) {
    let (cx, cy) = state.center;
    let query_width = state.query.width();
    for id in tree.node_ids(frame) {
        let node = tree.node(id);
        if node.disabled() || node.is_document() {
            continue;
        }
        for &part in &node.rects {
            if !part.intersects(state.query) {
                continue;
            }
            if part.contains_point(cx, cy) {
                match state.direct {
                    None => state.direct = Some(id),
                    Some(direct) => {
                        // A rect inside the earlier hit's box is more
                        // specific, so it takes over.
                        if tree.node(direct).bounds.contains(part) {
                            state.direct = Some(id);
                        }
                    }
                }
            }
            if state.direct.is_some() {
                // Distances no longer matter once any direct hit exists.
                break;
            }
            // Shrink the query toward its center for rects much smaller than
            // it, so a fat touch area does not smear across tiny targets.
            let mut both = state.query;
            let smaller = part.width().min(part.height()) - query_width;
            let inset = smaller.min(query_width) >> 1;
            if inset > 1 {
                both = both.inflate(1 - inset);
            }
            let both = both.intersect(part);
            if both.is_empty() {
                continue;
            }
            let test_inside = state.query.contains(part);
            if state.inside && !test_inside {
                continue;
            }
            let (tx, ty) = part.center();
            let dx = i64::from(tx - cx);
            let dy = i64::from(ty - cy);
            let distance = dx * dx + dy * dy;
            if (!state.inside && test_inside) || state.best > distance {
                state.best = distance;
                state.inside = test_inside;
                state.result = Some((id, both.center()));
            }
        }
    }
    for &child in tree.frame(frame).children() {
        best_at_in(tree, child, state);
    }
}

/// Coarse variant of [`find_best_at`] over the nodes' hit bounds.
///
/// Every candidate whose hit box intersects the query competes on
/// center-to-center distance alone; the synthetic point is the center of the
/// winner's first navigable rectangle.
pub fn find_best_hit_at(tree: &NavTree, query: NavRect) -> Option<PointHit> {
    let mut best = i64::MAX;
    let mut result = None;
    best_hit_at_in(tree, NavTree::ROOT, query, &mut best, &mut result);
    result.map(|(node, point)| PointHit { node, point })
}

fn best_hit_at_in(
    tree: &NavTree,
    frame: FrameId,
    query: NavRect,
    best: &mut i64,
    result: &mut Option<(NodeId, (i32, i32))>,
) {
    let (cx, cy) = query.center();
    for id in tree.node_ids(frame) {
        let node = tree.node(id);
        if node.disabled() || node.is_document() {
            continue;
        }
        if !node.hit_bounds.intersects(query) {
            continue;
        }
        let Some(first) = node.rects.first() else {
            continue;
        };
        let (tx, ty) = node.hit_bounds.center();
        let dx = i64::from(tx - cx);
        let dy = i64::from(ty - cy);
        let distance = dx * dx + dy * dy;
        if *best <= distance {
            continue;
        }
        *best = distance;
        *result = Some((id, first.center()));
    }
    for &child in tree.frame(frame).children() {
        best_hit_at_in(tree, child, query, best, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overstory_nav_cache::{Node, NodeFlags};
    use smallvec::smallvec;

    fn link(bounds: NavRect) -> Node {
        Node {
            bounds,
            rects: smallvec![bounds],
            ..Node::default()
        }
    }

    fn touch(cx: i32, cy: i32, radius: i32) -> NavRect {
        NavRect::new(cx - radius, cy - radius, cx + radius, cy + radius)
    }

    #[test]
    fn direct_hit_takes_precedence_over_nearer_neighbors() {
        let mut tree = NavTree::new(NavRect::new(0, 0, 300, 300));
        // A neighbor whose center is very close to the query center, but
        // which the center does not fall inside.
        let _near = tree.add_node(NavTree::ROOT, link(NavRect::new(52, 40, 70, 60)));
        let hit = tree.add_node(NavTree::ROOT, link(NavRect::new(0, 0, 51, 300)));
        tree.finish().unwrap();
        let result = find_best_at(&tree, touch(50, 50, 10)).unwrap();
        assert_eq!(result.node, hit);
        assert_eq!(result.point, (50, 50));
    }

    #[test]
    fn overlapping_direct_hits_prefer_the_most_specific_node() {
        let mut tree = NavTree::new(NavRect::new(0, 0, 300, 300));
        let outer = tree.add_node(NavTree::ROOT, link(NavRect::new(0, 0, 200, 200)));
        let inner = tree.add_node(NavTree::ROOT, link(NavRect::new(40, 40, 60, 60)));
        tree.finish().unwrap();
        let result = find_best_at(&tree, touch(50, 50, 5)).unwrap();
        assert_eq!(result.node, inner);
        let _ = outer;
    }

    #[test]
    fn inside_the_query_beats_merely_intersecting() {
        let mut tree = NavTree::new(NavRect::new(0, 0, 300, 300));
        // A target clipping the touch area's edge, center nearest.
        let grazing = tree.add_node(NavTree::ROOT, link(NavRect::new(30, 40, 46, 56)));
        // A target fully inside the touch area, center farther out.
        let contained = tree.add_node(NavTree::ROOT, link(NavRect::new(58, 58, 64, 64)));
        tree.finish().unwrap();
        let result = find_best_at(&tree, touch(50, 50, 15)).unwrap();
        assert_eq!(result.node, contained);
        assert_ne!(result.node, grazing);
    }

    #[test]
    fn misses_everything_returns_none() {
        let mut tree = NavTree::new(NavRect::new(0, 0, 300, 300));
        tree.add_node(NavTree::ROOT, link(NavRect::new(200, 200, 220, 220)));
        tree.finish().unwrap();
        assert_eq!(find_best_at(&tree, touch(20, 20, 5)), None);
    }

    #[test]
    fn disabled_nodes_are_transparent_to_point_queries() {
        let mut tree = NavTree::new(NavRect::new(0, 0, 300, 300));
        tree.add_node(
            NavTree::ROOT,
            Node {
                flags: NodeFlags::DISABLED,
                ..link(NavRect::new(40, 40, 60, 60))
            },
        );
        tree.finish().unwrap();
        assert_eq!(find_best_at(&tree, touch(50, 50, 5)), None);
    }

    #[test]
    fn point_queries_reach_into_nested_frames() {
        let mut tree = NavTree::new(NavRect::new(0, 0, 300, 300));
        let child = tree.add_frame(
            NavTree::ROOT,
            NavRect::new(100, 100, 250, 250),
            NavRect::new(100, 100, 250, 250),
        );
        tree.add_node(
            NavTree::ROOT,
            Node {
                bounds: NavRect::new(100, 100, 250, 250),
                child_frame: Some(child),
                ..Node::default()
            },
        );
        let inner = tree.add_node(child, link(NavRect::new(120, 120, 160, 160)));
        tree.finish().unwrap();
        let result = find_best_at(&tree, touch(130, 130, 5)).unwrap();
        assert_eq!(result.node, inner);
        assert_eq!(result.node.frame(), child);
    }

    #[test]
    fn coarse_hit_uses_hit_bounds_and_first_rect_center() {
        let mut tree = NavTree::new(NavRect::new(0, 0, 300, 300));
        let rect = NavRect::new(40, 40, 80, 60);
        let id = tree.add_node(
            NavTree::ROOT,
            Node {
                bounds: rect,
                // The hit box is padded beyond the visible rect.
                hit_bounds: rect.inflate(10),
                rects: smallvec![rect],
                ..Node::default()
            },
        );
        tree.finish().unwrap();
        // The query touches only the padded hit box.
        let result = find_best_hit_at(&tree, touch(35, 50, 3)).unwrap();
        assert_eq!(result.node, id);
        assert_eq!(result.point, rect.center());
        // The precise resolver does not see the padding.
        assert_eq!(find_best_at(&tree, touch(35, 50, 3)), None);
    }
}
