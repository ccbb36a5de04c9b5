// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-query navigation state: the anchor, the working corridor, and the
//! per-direction visited sets.

use hashbrown::HashSet;

use overstory_nav_cache::{Axis, Direction, NavRect, NodeId};

/// State carried across a run of navigation moves.
///
/// The resolver scores candidates against three pieces of context held here:
///
/// - `nav_bounds`, the rectangle of the current anchor (the element the
///   cursor sits on), which defines the "umbra" — the cross-axis shadow a
///   candidate must overlap to count as being in the same row or column;
/// - the *working* extents, an envelope accumulated over a run of moves
///   along one axis, which biases repeated moves toward staying in the same
///   visual column or row even when individual anchors wobble;
/// - per-direction visited sets, which keep a single gesture from bouncing
///   between the same two elements.
///
/// Call [`History::set_working`] before each directional query and
/// [`History::add_visited`] after each successful move; the session type in
/// this crate does both.
#[derive(Clone, Debug)]
pub struct History {
    nav_bounds: NavRect,
    prior_bounds: NavRect,
    last_direction: Option<Direction>,
    direction_change: bool,
    /// y extents of the working envelope, used for horizontal moves.
    min_working_horizontal: i32,
    max_working_horizontal: i32,
    /// x extents of the working envelope, used for vertical moves.
    min_working_vertical: i32,
    max_working_vertical: i32,
    visited: [HashSet<NodeId>; Direction::COUNT],
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            nav_bounds: NavRect::ZERO,
            prior_bounds: NavRect::ZERO,
            last_direction: None,
            direction_change: false,
            min_working_horizontal: 0,
            max_working_horizontal: 0,
            min_working_vertical: 0,
            max_working_vertical: 0,
            visited: [
                HashSet::new(),
                HashSet::new(),
                HashSet::new(),
                HashSet::new(),
            ],
        }
    }

    /// Bounds of the current anchor.
    #[inline]
    pub fn nav_bounds(&self) -> NavRect {
        self.nav_bounds
    }

    /// Replace the anchor bounds directly.
    ///
    /// Hosts use this to seed the history from an initial focus, and the
    /// session uses it to advance the anchor to each move's winner.
    #[inline]
    pub fn set_nav_bounds(&mut self, bounds: NavRect) {
        self.nav_bounds = bounds;
    }

    /// The anchor bounds as of the previous move; consumed by the
    /// gap-filling search.
    #[inline]
    pub fn prior_bounds(&self) -> NavRect {
        self.prior_bounds
    }

    /// Whether the most recent move changed movement axis.
    #[inline]
    pub fn direction_change(&self) -> bool {
        self.direction_change
    }

    /// Lower y extent of the working envelope (horizontal moves).
    #[inline]
    pub fn min_working_horizontal(&self) -> i32 {
        self.min_working_horizontal
    }

    /// Upper y extent of the working envelope (horizontal moves).
    #[inline]
    pub fn max_working_horizontal(&self) -> i32 {
        self.max_working_horizontal
    }

    /// Lower x extent of the working envelope (vertical moves).
    #[inline]
    pub fn min_working_vertical(&self) -> i32 {
        self.min_working_vertical
    }

    /// Upper x extent of the working envelope (vertical moves).
    #[inline]
    pub fn max_working_vertical(&self) -> i32 {
        self.max_working_vertical
    }

    /// Prime the history for a move in `direction`.
    ///
    /// Records the previous anchor as [`History::prior_bounds`], adopts
    /// `anchor` (when present) as the new anchor, and maintains the working
    /// envelope: reset from the anchor when the movement axis changes,
    /// accumulated (min/max union with the anchor's cross-axis extents)
    /// while the axis holds, then pinned inside `view_bounds`.
    pub fn set_working(
        &mut self,
        direction: Direction,
        anchor: Option<NavRect>,
        view_bounds: NavRect,
    ) {
        let change = self
            .last_direction
            .is_none_or(|last| last.axis() != direction.axis());
        self.direction_change = self
            .last_direction
            .is_some_and(|last| last.axis() != direction.axis());
        self.last_direction = Some(direction);
        self.prior_bounds = self.nav_bounds;
        if let Some(anchor) = anchor {
            self.nav_bounds = anchor;
        }
        let nav = self.nav_bounds;
        match direction.axis() {
            Axis::Vertical => {
                if change {
                    self.min_working_vertical = nav.min_x;
                    self.max_working_vertical = nav.max_x;
                } else {
                    self.min_working_vertical = self.min_working_vertical.min(nav.min_x);
                    self.max_working_vertical = self.max_working_vertical.max(nav.max_x);
                }
                self.min_working_vertical = self.min_working_vertical.max(view_bounds.min_x);
                self.max_working_vertical = self.max_working_vertical.min(view_bounds.max_x);
            }
            Axis::Horizontal => {
                if change {
                    self.min_working_horizontal = nav.min_y;
                    self.max_working_horizontal = nav.max_y;
                } else {
                    self.min_working_horizontal = self.min_working_horizontal.min(nav.min_y);
                    self.max_working_horizontal = self.max_working_horizontal.max(nav.max_y);
                }
                self.min_working_horizontal = self.min_working_horizontal.max(view_bounds.min_y);
                self.max_working_horizontal = self.max_working_horizontal.min(view_bounds.max_y);
            }
        }
    }

    /// Whether `node` may still be chosen when moving in `direction`.
    #[inline]
    pub fn check_visited(&self, node: NodeId, direction: Direction) -> bool {
        !self.visited[direction.index()].contains(&node)
    }

    /// Record that `node` was chosen by a move in `direction`.
    #[inline]
    pub fn add_visited(&mut self, node: NodeId, direction: Direction) {
        self.visited[direction.index()].insert(node);
    }

    /// Forget the visited sets at the end of a discrete input gesture.
    pub fn reset_gesture(&mut self) {
        for set in &mut self.visited {
            set.clear();
        }
    }

    /// Forget everything, including the anchor and the working envelope.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overstory_nav_cache::NavTree;

    const VIEW: NavRect = NavRect::new(0, 0, 1000, 1000);

    #[test]
    fn working_extents_reset_on_axis_change_and_accumulate_on_runs() {
        let mut h = History::new();
        h.set_working(Direction::Down, Some(NavRect::new(10, 0, 50, 20)), VIEW);
        assert_eq!(h.min_working_vertical(), 10);
        assert_eq!(h.max_working_vertical(), 50);

        // Same axis: the envelope widens to cover the new anchor.
        h.set_working(Direction::Down, Some(NavRect::new(0, 30, 40, 50)), VIEW);
        assert_eq!(h.min_working_vertical(), 0);
        assert_eq!(h.max_working_vertical(), 50);
        assert!(!h.direction_change());

        // Axis change: horizontal extents restart from the anchor.
        h.set_working(Direction::Right, Some(NavRect::new(0, 30, 40, 50)), VIEW);
        assert!(h.direction_change());
        assert_eq!(h.min_working_horizontal(), 30);
        assert_eq!(h.max_working_horizontal(), 50);
    }

    #[test]
    fn working_extents_pin_to_view_bounds() {
        let mut h = History::new();
        h.set_working(
            Direction::Down,
            Some(NavRect::new(-50, 0, 2000, 20)),
            VIEW,
        );
        assert_eq!(h.min_working_vertical(), 0);
        assert_eq!(h.max_working_vertical(), 1000);
    }

    #[test]
    fn prior_bounds_lag_one_move_behind() {
        let mut h = History::new();
        h.set_working(Direction::Down, Some(NavRect::new(0, 0, 10, 10)), VIEW);
        assert_eq!(h.prior_bounds(), NavRect::ZERO);
        h.set_working(Direction::Down, Some(NavRect::new(0, 20, 10, 30)), VIEW);
        assert_eq!(h.prior_bounds(), NavRect::new(0, 0, 10, 10));
    }

    #[test]
    fn visited_sets_are_per_direction_and_reset_per_gesture() {
        let tree = NavTree::new(VIEW);
        let node = tree.document_id(NavTree::ROOT);
        let mut h = History::new();
        assert!(h.check_visited(node, Direction::Down));
        h.add_visited(node, Direction::Down);
        assert!(!h.check_visited(node, Direction::Down));
        assert!(h.check_visited(node, Direction::Up));
        h.reset_gesture();
        assert!(h.check_visited(node, Direction::Down));
    }

    #[test]
    fn first_move_initializes_without_flagging_a_direction_change() {
        let mut h = History::new();
        h.set_working(Direction::Left, Some(NavRect::new(5, 5, 10, 10)), VIEW);
        assert!(!h.direction_change());
        assert_eq!(h.min_working_horizontal(), 5);
        assert_eq!(h.max_working_horizontal(), 10);
    }
}
