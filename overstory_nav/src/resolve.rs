// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directional traversal: the core resolver walk, the common eligibility
//! steps, the tie retry, and the gap-filling search.

use overstory_nav_cache::{Axis, Direction, FrameId, NavRect, NavTree, Node, NodeId};

use crate::history::History;
use crate::score::{Candidate, Outcome, compare, containership};
use crate::trace::{RejectReason, Trace};

/// How many tie rescans a single query may spend.
///
/// A rescan can never trigger another rescan, so recursion depth is already
/// bounded; this budget additionally bounds the total work on adversarial
/// layouts where exact ties are common. When it runs out, the provisional
/// winner of each remaining tie stands.
pub(crate) const RETRY_BUDGET: u32 = 16;

/// Resolve a directional move against `tree`.
///
/// `history` must have been primed for this move with
/// [`History::set_working`]; `anchor` is the node the cursor currently sits
/// on, if any. Returns the node that should receive the cursor, or `None`
/// when no eligible candidate exists (the caller leaves focus unchanged).
///
/// This is the stateless entry point: neither the tree nor the history is
/// mutated. [`NavSession::move_cursor`][crate::NavSession::move_cursor]
/// wraps it with the history and cursor bookkeeping most hosts want.
pub fn resolve_direction(
    tree: &NavTree,
    history: &History,
    direction: Direction,
    anchor: Option<NodeId>,
) -> Option<NodeId> {
    run_query(tree, history, direction, anchor, None).node
}

pub(crate) fn run_query(
    tree: &NavTree,
    history: &History,
    direction: Direction,
    anchor: Option<NodeId>,
    trace: Option<&mut Trace>,
) -> Candidate {
    let mut walk = Walk {
        tree,
        history,
        direction,
        anchor,
        trace,
        retry_budget: RETRY_BUDGET,
    };
    let mut best = Candidate::EMPTY;
    walk.frame_directional(NavTree::ROOT, None, &mut best);
    if best.node.is_some() && !history.prior_bounds().is_empty() {
        walk.check_between(&mut best);
    }
    best
}

/// Outcome of scoring one sub-rectangle against the running best.
enum PartOutcome {
    Reject(RejectReason),
    Take,
    /// The comparison was undecided between two non-area nodes: take the
    /// candidate, but rescan earlier nodes against it, since a smaller-scope
    /// match earlier in document order may now be preferable.
    TakeRetry,
}

/// One directional query in flight.
struct Walk<'a> {
    tree: &'a NavTree,
    history: &'a History,
    direction: Direction,
    anchor: Option<NodeId>,
    trace: Option<&'a mut Trace>,
    retry_budget: u32,
}

impl Walk<'_> {
    fn note(&mut self, node: NodeId, reason: RejectReason) {
        if let Some(trace) = self.trace.as_deref_mut() {
            trace.reject(node, reason);
        }
    }

    /// Walk `frame`'s nodes in document order, recursing into nested frames,
    /// merging every eligible candidate into `best`.
    ///
    /// `limit` caps the walk to node indices below it; `None` walks the whole
    /// frame and enables the tie retry.
    fn frame_directional(&mut self, frame: FrameId, limit: Option<u32>, best: &mut Candidate) {
        let tree = self.tree;
        let original = *best;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Frame arenas use 32-bit indices by design."
        )]
        let count = tree.frame(frame).nodes().len() as u32;
        let end = limit.unwrap_or(count).min(count);
        for index in 0..end {
            let Some(id) = tree.node_id(frame, index) else {
                break;
            };
            let node = tree.node(id);
            if let Some(child) = node.child_frame {
                // A frame node is never directly selectable; its nested
                // document is searched in its place.
                if tree.valid_document(child) {
                    self.frame_directional(child, None, best);
                }
                continue;
            }
            let mut test = Candidate::EMPTY;
            if let Err(reason) = self.frame_node_common(&mut test, id, node, best, &original) {
                self.note(id, reason);
                continue;
            }
            if !self.history.check_visited(id, self.direction) {
                self.note(id, RejectReason::AlreadyVisited);
                continue;
            }
            for &part in &node.rects {
                test.bounds = part;
                if let Some(reason) = test.set_direction(self.direction, self.history) {
                    self.note(id, reason);
                    continue;
                }
                match self.frame_part_common(&mut test, node, best) {
                    PartOutcome::Reject(reason) => self.note(id, reason),
                    PartOutcome::Take => *best = test,
                    PartOutcome::TakeRetry => {
                        if limit.is_none() && self.retry_budget > 0 {
                            self.retry_budget -= 1;
                            let mut inner = test;
                            self.frame_directional(frame, Some(index), &mut inner);
                            if let Some(winner) = inner.node {
                                if self.history.check_visited(winner, self.direction) {
                                    *best = inner;
                                    continue;
                                }
                            }
                        }
                        *best = test;
                    }
                }
            }
        }
    }

    /// Whole-node eligibility and structural precedence, shared by every
    /// sub-rectangle of `node`.
    fn frame_node_common(
        &mut self,
        test: &mut Candidate,
        id: NodeId,
        node: &Node,
        best: &mut Candidate,
        original: &Candidate,
    ) -> Result<(), RejectReason> {
        let tree = self.tree;
        test.node = Some(id);
        test.bounds = node.bounds;
        if node.disabled() {
            return Err(RejectReason::Disabled);
        }
        if node.is_document() {
            return Err(RejectReason::Document);
        }
        if !tree.scrolled_bounds().intersects(node.bounds) {
            return Err(RejectReason::OffScreen);
        }
        if Some(id) == self.anchor {
            return Err(RejectReason::IsAnchor);
        }
        let anchor_node = self.anchor.map(|a| tree.node(a));
        test.cursor_child = node.group == anchor_node.and_then(|a| a.group);
        let Some(best_id) = best.node else {
            return Ok(());
        };
        let best_node = tree.node(best_id);
        // Prefer candidates sharing the anchor's immediate parent.
        if let Some(anchor_id) = self.anchor {
            let anchor_parent = parent_key(anchor_id, tree.node(anchor_id));
            let test_parent = parent_key(id, node);
            let best_parent = parent_key(best_id, best_node);
            if anchor_parent.is_some() && test_parent != best_parent {
                if best_parent == anchor_parent {
                    return Err(RejectReason::AnchorParentPreferred);
                }
                if test_parent == anchor_parent {
                    return Ok(());
                }
            }
        }
        // A node never displaces its own parent from the best slot, and a
        // parent always displaces its child.
        if id.frame() == best_id.frame() {
            if node.parent == Some(best_id.index()) {
                return Err(RejectReason::ChildOfBest);
            }
            if best_node.parent == Some(id.index()) {
                return Ok(());
            }
        }
        match containership(test, node, best, best_node) {
            1 => {
                // The best encloses this more specific candidate: drop it and
                // let the part scoring adopt the candidate outright.
                best.node = None;
                return Ok(());
            }
            -1 => return Err(RejectReason::EnclosesBest),
            _ => {}
        }
        if let Some(original_id) = original.node {
            if containership(test, node, original, tree.node(original_id)) == -1 {
                return Err(RejectReason::EnclosesPriorBest);
            }
        }
        Ok(())
    }

    /// Score one sub-rectangle (already set up for the direction) against
    /// the running best.
    fn frame_part_common(
        &self,
        test: &mut Candidate,
        node: &Node,
        best: &Candidate,
    ) -> PartOutcome {
        let tree = self.tree;
        let anchor_node = self.anchor.map(|a| tree.node(a));
        if let Some(anchor) = anchor_node {
            // Focus never moves to something that swallows the current
            // selection.
            if test.bounds.contains(anchor.bounds) {
                return PartOutcome::Reject(RejectReason::EnclosesAnchor);
            }
        }
        test.set_distances();
        let Some(best_id) = best.node else {
            return PartOutcome::Take;
        };
        let best_node = tree.node(best_id);
        match compare(
            test,
            best,
            node,
            best_node,
            anchor_node,
            self.history.direction_change(),
        ) {
            Outcome::Reject(reason) => PartOutcome::Reject(reason),
            Outcome::Prefer => PartOutcome::Take,
            Outcome::Undecided => {
                if node.is_area() || best_node.is_area() {
                    PartOutcome::Take
                } else {
                    PartOutcome::TakeRetry
                }
            }
        }
    }

    /// The gap-filling search: when the winner leaves a visual gap against
    /// the previous anchor, look for a stepping-stone candidate inside the
    /// gap, probing the requested direction first and the remaining
    /// directions as fallbacks.
    fn check_between(&self, best: &mut Candidate) -> bool {
        let tree = self.tree;
        let prior = self.history.prior_bounds();
        let best_rect = best.bounds;
        let mut test = Candidate::EMPTY;
        for check in self.direction.cycle() {
            let Some(edges) = between_rect(check, best_rect, prior) else {
                continue;
            };
            let clip = tree.scrolled_bounds().intersect(edges);
            if clip.is_empty() {
                continue;
            }
            self.find_closest(&mut test, NavTree::ROOT, check, clip);
            if test.node.is_none() {
                continue;
            }
            if check == self.direction {
                break;
            }
        }
        if test.node.is_none() {
            return false;
        }
        *best = test;
        true
    }

    /// Constrained nearest search inside `clip`, scored by distance from the
    /// gap's leading edge.
    fn find_closest(&self, best: &mut Candidate, frame: FrameId, check: Direction, clip: NavRect) {
        let tree = self.tree;
        for id in tree.node_ids(frame) {
            let node = tree.node(id);
            if let Some(child) = node.child_frame {
                if tree.valid_document(child) {
                    self.find_closest(best, child, check, clip);
                }
                continue;
            }
            if node.is_document() || node.no_second_chance() {
                continue;
            }
            if !node.navigable(clip) {
                continue;
            }
            if !self.history.check_visited(id, self.direction) {
                continue;
            }
            for &part in &node.rects {
                if !clip.intersects(part) {
                    continue;
                }
                let mut fitted = part;
                if !clip.contains(fitted) {
                    // Stretch across the clip on the cross axis; a part that
                    // still escapes the clip is not a stepping stone.
                    match check.axis() {
                        Axis::Vertical => {
                            fitted.min_x = clip.min_x;
                            fitted.max_x = clip.max_x;
                        }
                        Axis::Horizontal => {
                            fitted.min_y = clip.min_y;
                            fitted.max_y = clip.max_y;
                        }
                    }
                    if !clip.contains(fitted) {
                        continue;
                    }
                }
                let distance = match check {
                    Direction::Left => clip.max_x - part.min_x,
                    Direction::Right => part.max_x - clip.min_x,
                    Direction::Up => clip.max_y - part.min_y,
                    Direction::Down => part.max_y - clip.min_y,
                };
                if distance < best.distance {
                    best.node = Some(id);
                    best.distance = distance;
                    best.bounds = part;
                    // Fill in the direction data for the caller; eligibility
                    // was already decided by the clip test.
                    let _ = best.set_direction(check, self.history);
                }
            }
        }
    }
}

fn parent_key(id: NodeId, node: &Node) -> Option<(FrameId, u32)> {
    node.parent.map(|parent| (id.frame(), parent))
}

/// The synthetic clip spanning the gap between the previous anchor and the
/// winner's rectangle, or `None` when the winner does not lie past the prior
/// bounds in `direction`.
fn between_rect(direction: Direction, best: NavRect, prior: NavRect) -> Option<NavRect> {
    match direction.axis() {
        Axis::Vertical => {
            let top = if direction == Direction::Up {
                best.max_y
            } else {
                prior.max_y
            };
            let bottom = if direction == Direction::Up {
                prior.min_y
            } else {
                best.min_y
            };
            if bottom - top < 0 {
                return None;
            }
            let left = prior.min_x.min(best.min_x);
            let right = prior.max_x.max(best.max_x);
            Some(NavRect::new(left, top, right, bottom))
        }
        Axis::Horizontal => {
            let left = if direction == Direction::Left {
                best.max_x
            } else {
                prior.max_x
            };
            let right = if direction == Direction::Left {
                prior.min_x
            } else {
                best.min_x
            };
            if right - left < 0 {
                return None;
            }
            let top = prior.min_y.min(best.min_y);
            let bottom = prior.max_y.max(best.max_y);
            Some(NavRect::new(left, top, right, bottom))
        }
    }
}
