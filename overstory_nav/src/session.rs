// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The navigation session: history plus cursor bookkeeping around the
//! stateless resolvers.

use overstory_nav_cache::{Direction, NavRect, NavTree, NodeId};

use crate::history::History;
use crate::hit::{PointHit, find_best_at, find_best_hit_at};
use crate::resolve::run_query;
use crate::trace::Trace;

/// One input consumer's navigation state.
///
/// There is no global "currently focused frame" anywhere in Overstory; a
/// `NavSession` carries the [`History`] and optional [`Trace`] explicitly,
/// and every query takes the [`NavTree`] snapshot it should run against.
/// Hosts typically keep one session per top-level view.
///
/// [`NavSession::move_cursor`] is the full per-keypress pipeline: prime the
/// history from the current cursor, resolve the direction, gap-fill, record
/// the visit, advance the anchor, and move the tree's cursor. Call
/// [`NavSession::reset_gesture`] when a discrete input gesture ends (for
/// example on key release) so the visited sets start fresh.
#[derive(Clone, Debug, Default)]
pub struct NavSession {
    history: History,
    trace: Option<Trace>,
}

impl NavSession {
    /// Create a session with empty history and no tracing.
    pub fn new() -> Self {
        Self::default()
    }

    /// The session's history.
    #[inline]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Mutable access to the history, for hosts that seed the anchor from an
    /// initial focus.
    #[inline]
    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// Start recording per-query diagnostics.
    pub fn enable_trace(&mut self) {
        if self.trace.is_none() {
            self.trace = Some(Trace::new());
        }
    }

    /// Stop recording diagnostics and drop the current trace.
    pub fn disable_trace(&mut self) {
        self.trace = None;
    }

    /// The diagnostics recorded by the most recent query, when tracing is
    /// enabled.
    pub fn trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }

    /// Move the cursor one step in `direction`.
    ///
    /// Returns the node that received the cursor, or `None` when no eligible
    /// candidate exists. The history is always primed for the move; the
    /// cursor, the anchor bounds, and the visited sets only advance on
    /// success.
    pub fn move_cursor(&mut self, tree: &mut NavTree, direction: Direction) -> Option<NodeId> {
        let anchor = tree.cursor();
        let anchor_bounds = anchor.map(|id| tree.node(id).bounds);
        self.history
            .set_working(direction, anchor_bounds, tree.view_bounds());
        if let Some(trace) = self.trace.as_mut() {
            trace.begin_query();
        }
        let best = run_query(
            tree,
            &self.history,
            direction,
            anchor,
            self.trace.as_mut(),
        );
        let winner = best.node?;
        self.history.add_visited(winner, direction);
        self.history.set_nav_bounds(best.bounds);
        tree.set_cursor(winner);
        if let Some(trace) = self.trace.as_mut() {
            trace.choose(winner);
        }
        Some(winner)
    }

    /// Resolve `direction` from the current cursor without mutating the
    /// history or the tree.
    ///
    /// Repeated peeks in the same direction return the same candidate.
    pub fn peek(&self, tree: &NavTree, direction: Direction) -> Option<NodeId> {
        let anchor = tree.cursor();
        let anchor_bounds = anchor.map(|id| tree.node(id).bounds);
        let mut history = self.history.clone();
        history.set_working(direction, anchor_bounds, tree.view_bounds());
        run_query(tree, &history, direction, anchor, None).node
    }

    /// Forget the per-gesture visited sets.
    pub fn reset_gesture(&mut self) {
        self.history.reset_gesture();
    }

    /// Point query over the precise navigable rectangles; see
    /// [`find_best_at`].
    pub fn hit_test(&self, tree: &NavTree, query: NavRect) -> Option<PointHit> {
        find_best_at(tree, query)
    }

    /// Coarse point query over the padded hit bounds; see
    /// [`find_best_hit_at`].
    pub fn hit_test_coarse(&self, tree: &NavTree, query: NavRect) -> Option<PointHit> {
        find_best_hit_at(tree, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::RejectReason;
    use overstory_nav_cache::{NavTree, Node};
    use smallvec::smallvec;

    fn link(bounds: NavRect) -> Node {
        Node {
            bounds,
            rects: smallvec![bounds],
            ..Node::default()
        }
    }

    /// A 2×2 grid of links with the cursor seeded on the top-left cell.
    fn grid() -> (NavTree, [NodeId; 4]) {
        let mut tree = NavTree::new(NavRect::new(0, 0, 300, 300));
        let a = tree.add_node(NavTree::ROOT, link(NavRect::new(0, 0, 50, 20)));
        let b = tree.add_node(NavTree::ROOT, link(NavRect::new(70, 0, 120, 20)));
        let c = tree.add_node(NavTree::ROOT, link(NavRect::new(0, 40, 50, 60)));
        let d = tree.add_node(NavTree::ROOT, link(NavRect::new(70, 40, 120, 60)));
        tree.finish().unwrap();
        tree.set_cursor(a);
        (tree, [a, b, c, d])
    }

    #[test]
    fn move_cursor_walks_the_grid_and_updates_state() {
        let (mut tree, [a, b, _c, d]) = grid();
        let mut session = NavSession::new();
        session.history_mut().set_nav_bounds(tree.node(a).bounds);

        assert_eq!(session.move_cursor(&mut tree, Direction::Right), Some(b));
        assert_eq!(tree.cursor(), Some(b));
        assert_eq!(session.history().nav_bounds(), tree.node(b).bounds);

        assert_eq!(session.move_cursor(&mut tree, Direction::Down), Some(d));
        assert_eq!(tree.cursor(), Some(d));
    }

    #[test]
    fn failed_moves_leave_everything_unchanged() {
        let (mut tree, [a, ..]) = grid();
        let mut session = NavSession::new();
        session.history_mut().set_nav_bounds(tree.node(a).bounds);
        // Nothing lies to the left of the first column.
        assert_eq!(session.move_cursor(&mut tree, Direction::Left), None);
        assert_eq!(tree.cursor(), Some(a));
    }

    #[test]
    fn peek_is_idempotent_and_does_not_move() {
        let (mut tree, [a, b, ..]) = grid();
        let mut session = NavSession::new();
        session.history_mut().set_nav_bounds(tree.node(a).bounds);
        let first = session.peek(&tree, Direction::Right);
        let second = session.peek(&tree, Direction::Right);
        assert_eq!(first, Some(b));
        assert_eq!(first, second);
        assert_eq!(tree.cursor(), Some(a));
        // The real move agrees with the peek.
        assert_eq!(session.move_cursor(&mut tree, Direction::Right), Some(b));
    }

    #[test]
    fn reset_gesture_clears_the_visited_sets() {
        let (mut tree, [a, b, ..]) = grid();
        let mut session = NavSession::new();
        session.history_mut().set_nav_bounds(tree.node(a).bounds);
        assert_eq!(session.move_cursor(&mut tree, Direction::Right), Some(b));
        // Within the gesture, the winner cannot be re-chosen rightward.
        assert!(!session.history().check_visited(b, Direction::Right));
        session.reset_gesture();
        assert!(session.history().check_visited(b, Direction::Right));
    }

    #[test]
    fn trace_records_rejections_and_the_winner() {
        let (mut tree, [_a, b, c, _d]) = grid();
        let mut session = NavSession::new();
        session.enable_trace();
        let winner = session.move_cursor(&mut tree, Direction::Right);
        assert_eq!(winner, Some(b));
        let trace = session.trace().unwrap();
        assert_eq!(trace.chosen(), Some(b));
        // The cell below the anchor is not rightward; it was rejected with a
        // directional reason.
        assert!(trace.rejection(c).is_some());
    }

    #[test]
    fn trace_reports_the_anchor_rejection_reason() {
        let (mut tree, [a, ..]) = grid();
        let mut session = NavSession::new();
        session.enable_trace();
        session.move_cursor(&mut tree, Direction::Right);
        let trace = session.trace().unwrap();
        assert_eq!(trace.rejection(a), Some(RejectReason::IsAnchor));
    }
}
