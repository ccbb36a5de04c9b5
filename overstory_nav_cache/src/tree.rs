// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The frame arena: cache construction, validation, and selection state.

use alloc::vec::Vec;
use core::fmt;

use crate::frame::{Frame, SlotState};
use crate::geom::NavRect;
use crate::node::{FrameId, Node, NodeFlags, NodeId};

/// Error produced by [`NavTree::finish`] when the builder input violates a
/// cache invariant.
///
/// These conditions are programming errors in the upstream cache builder;
/// the resolver itself never fails.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// A selectable node has no navigable sub-rectangles.
    EmptyNavigableRects(NodeId),
    /// A frame node's child link points at a frame that does not exist or
    /// that belongs to a different parent.
    DanglingChildFrame(NodeId),
    /// A non-root frame is not referenced by exactly one frame node.
    UnlinkedFrame(FrameId),
    /// A frame's cursor or focus slot points at a missing or disabled node.
    BadSlotIndex(FrameId),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyNavigableRects(node) => write!(
                f,
                "selectable node {}/{} has no navigable rects",
                node.frame.0, node.index
            ),
            Self::DanglingChildFrame(node) => write!(
                f,
                "frame node {}/{} links a missing or foreign child frame",
                node.frame.0, node.index
            ),
            Self::UnlinkedFrame(frame) => write!(
                f,
                "frame {} is not referenced by exactly one frame node",
                frame.0
            ),
            Self::BadSlotIndex(frame) => write!(
                f,
                "frame {} has a cursor or focus slot pointing at a missing or disabled node",
                frame.0
            ),
        }
    }
}

impl core::error::Error for BuildError {}

/// An immutable-per-query snapshot of a page's navigable elements.
///
/// Frames live in an arena addressed by [`FrameId`]; the root is always
/// [`NavTree::ROOT`]. All rectangles, in every frame, are expressed in the
/// root frame's coordinate space — nested-frame offsets are baked in by the
/// upstream cache builder.
///
/// The tree is rebuilt wholesale on each layout pass: create it with
/// [`NavTree::new`], populate it with [`NavTree::add_frame`] /
/// [`NavTree::add_node`], then call [`NavTree::finish`] before querying.
///
/// ## Example
///
/// ```rust
/// use overstory_nav_cache::{NavRect, NavTree, Node};
/// use smallvec::smallvec;
///
/// let mut tree = NavTree::new(NavRect::new(0, 0, 320, 240));
/// let link = tree.add_node(
///     NavTree::ROOT,
///     Node {
///         bounds: NavRect::new(10, 10, 90, 30),
///         rects: smallvec![NavRect::new(10, 10, 90, 30)],
///         ..Node::default()
///     },
/// );
/// tree.finish().unwrap();
///
/// tree.set_cursor(link);
/// assert_eq!(tree.cursor(), Some(link));
/// ```
#[derive(Clone, Debug)]
pub struct NavTree {
    frames: Vec<Frame>,
    view_bounds: NavRect,
    scrolled_bounds: NavRect,
}

impl NavTree {
    /// The root frame of every tree.
    pub const ROOT: FrameId = FrameId(0);

    /// Create a tree whose root frame covers `view_bounds`.
    ///
    /// The root frame's document node is inserted automatically; its content
    /// bounds start out equal to the view bounds and can be widened with
    /// [`NavTree::set_contents`].
    pub fn new(view_bounds: NavRect) -> Self {
        let mut root = Frame::new(view_bounds, view_bounds);
        root.nodes.push(document_node(view_bounds));
        Self {
            frames: alloc::vec![root],
            view_bounds,
            scrolled_bounds: view_bounds,
        }
    }

    /// The root view bounds.
    #[inline]
    pub fn view_bounds(&self) -> NavRect {
        self.view_bounds
    }

    /// The currently visible, scrolled portion of the document.
    ///
    /// Candidates outside this rectangle are rejected by the resolver.
    /// Defaults to the view bounds; the host updates it per scroll.
    #[inline]
    pub fn scrolled_bounds(&self) -> NavRect {
        self.scrolled_bounds
    }

    /// Set the currently visible, scrolled portion of the document.
    #[inline]
    pub fn set_scrolled_bounds(&mut self, bounds: NavRect) {
        self.scrolled_bounds = bounds;
    }

    /// Set the content bounds of `frame` (and the bounds of its document
    /// node, which always mirror them).
    pub fn set_contents(&mut self, frame: FrameId, contents: NavRect) {
        let f = &mut self.frames[frame.idx()];
        f.contents = contents;
        f.nodes[0].bounds = contents;
        f.nodes[0].hit_bounds = contents;
    }

    /// Add a nested frame under `parent`.
    ///
    /// `local_view_bounds` is the frame's viewport placed in root-space
    /// coordinates; it is clipped against the root during [`NavTree::finish`].
    /// The child's document node is inserted automatically. Link the frame to
    /// a node in the parent by setting [`Node::child_frame`] on that node.
    pub fn add_frame(
        &mut self,
        parent: FrameId,
        local_view_bounds: NavRect,
        contents: NavRect,
    ) -> FrameId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Frame arenas use 32-bit indices by design."
        )]
        let id = FrameId(self.frames.len() as u32);
        let mut frame = Frame::new(local_view_bounds, contents);
        frame.parent = Some(parent);
        frame.nodes.push(document_node(contents));
        self.frames.push(frame);
        self.frames[parent.idx()].children.push(id);
        id
    }

    /// Append a node to `frame`'s document-order list.
    pub fn add_node(&mut self, frame: FrameId, node: Node) -> NodeId {
        let nodes = &mut self.frames[frame.idx()].nodes;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Frame arenas use 32-bit indices by design."
        )]
        let id = NodeId {
            frame,
            index: nodes.len() as u32,
        };
        nodes.push(node);
        id
    }

    /// Finalize the cache: clip nested view bounds against the root, resolve
    /// frame-node back links, normalize hit bounds, and validate the cache
    /// invariants.
    ///
    /// Must be called once after construction, before the tree is queried.
    pub fn finish(&mut self) -> Result<(), BuildError> {
        // Clip every nested frame's viewport against the root's.
        let root_view = self.frames[Self::ROOT.idx()].local_view_bounds;
        for frame in &mut self.frames {
            frame.view_bounds = if frame.parent.is_some() {
                frame.local_view_bounds.intersect(root_view)
            } else {
                frame.local_view_bounds
            };
            frame.frame_node = None;
        }

        // Resolve frame-node back links and check child-frame wiring.
        for fi in 0..self.frames.len() {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Frame arenas use 32-bit indices by design."
            )]
            let fid = FrameId(fi as u32);
            for ni in 0..self.frames[fi].nodes.len() {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "Frame arenas use 32-bit indices by design."
                )]
                let nid = NodeId {
                    frame: fid,
                    index: ni as u32,
                };
                let Some(child) = self.frames[fi].nodes[ni].child_frame else {
                    continue;
                };
                let valid = self
                    .frames
                    .get(child.idx())
                    .is_some_and(|c| c.parent == Some(fid));
                if !valid {
                    return Err(BuildError::DanglingChildFrame(nid));
                }
                if self.frames[child.idx()].frame_node.is_some() {
                    // Two frame nodes claiming the same child.
                    return Err(BuildError::UnlinkedFrame(child));
                }
                self.frames[child.idx()].frame_node = Some(nid.index);
            }
        }

        for (fi, frame) in self.frames.iter_mut().enumerate() {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Frame arenas use 32-bit indices by design."
            )]
            let fid = FrameId(fi as u32);
            if frame.parent.is_some() && frame.frame_node.is_none() {
                return Err(BuildError::UnlinkedFrame(fid));
            }
            for (ni, node) in frame.nodes.iter_mut().enumerate() {
                if node.hit_bounds.is_empty() {
                    node.hit_bounds = node.bounds;
                }
                let selectable = !node.disabled()
                    && !node.is_document()
                    && node.child_frame.is_none();
                if selectable && node.rects.is_empty() {
                    #[allow(
                        clippy::cast_possible_truncation,
                        reason = "Frame arenas use 32-bit indices by design."
                    )]
                    let nid = NodeId {
                        frame: fid,
                        index: ni as u32,
                    };
                    return Err(BuildError::EmptyNavigableRects(nid));
                }
            }
            for slot in [frame.cursor, frame.focus] {
                if let SlotState::At(index) = slot {
                    let ok = frame
                        .nodes
                        .get(index as usize)
                        .is_some_and(|n| !n.disabled());
                    if !ok {
                        return Err(BuildError::BadSlotIndex(fid));
                    }
                }
            }
        }
        Ok(())
    }

    /// Access a frame.
    #[inline]
    pub fn frame(&self, id: FrameId) -> &Frame {
        &self.frames[id.idx()]
    }

    /// Access a node.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.frames[id.frame.idx()].nodes[id.index as usize]
    }

    /// The identifier of `frame`'s synthetic document node.
    #[inline]
    pub fn document_id(&self, frame: FrameId) -> NodeId {
        NodeId { frame, index: 0 }
    }

    /// Identifiers of `frame`'s nodes, in document order.
    pub fn node_ids(&self, frame: FrameId) -> impl Iterator<Item = NodeId> + '_ {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Frame arenas use 32-bit indices by design."
        )]
        let count = self.frames[frame.idx()].nodes.len() as u32;
        (0..count).map(move |index| NodeId { frame, index })
    }

    /// Look up a node id by frame and document-order position.
    pub fn node_id(&self, frame: FrameId, index: u32) -> Option<NodeId> {
        ((index as usize) < self.frames[frame.idx()].nodes.len())
            .then_some(NodeId { frame, index })
    }

    /// Whether `frame` is usable as a recursion target: it has a document
    /// node and a non-empty clipped viewport.
    #[inline]
    pub fn valid_document(&self, frame: FrameId) -> bool {
        !self.frames[frame.idx()].view_bounds.is_empty()
    }

    /// The current cursor node, descending through frame nodes into nested
    /// frames.
    pub fn cursor(&self) -> Option<NodeId> {
        self.descend_slot(|f| f.cursor)
    }

    /// The current focus node, descending through frame nodes into nested
    /// frames.
    pub fn focus(&self) -> Option<NodeId> {
        self.descend_slot(|f| f.focus)
    }

    fn descend_slot(&self, slot: impl Fn(&Frame) -> SlotState) -> Option<NodeId> {
        let mut frame = Self::ROOT;
        loop {
            let index = slot(self.frame(frame)).index()?;
            let id = NodeId { frame, index };
            match self.node(id).child_frame {
                Some(child) => frame = child,
                None => return Some(id),
            }
        }
    }

    /// Point the cursor at `id`, updating every ancestor frame's cursor slot
    /// so the path from the root stays coherent.
    ///
    /// Returns `false` (leaving the tree unchanged) when `id` is disabled or
    /// out of range.
    pub fn set_cursor(&mut self, id: NodeId) -> bool {
        self.set_slot(id, true)
    }

    /// Point the focus at `id`, updating ancestor frames like
    /// [`NavTree::set_cursor`].
    pub fn set_focus(&mut self, id: NodeId) -> bool {
        self.set_slot(id, false)
    }

    fn set_slot(&mut self, id: NodeId, cursor: bool) -> bool {
        let valid = self
            .frames
            .get(id.frame.idx())
            .and_then(|f| f.nodes.get(id.index as usize))
            .is_some_and(|n| !n.disabled());
        if !valid {
            return false;
        }
        let mut frame = id.frame;
        let mut index = id.index;
        loop {
            let f = &mut self.frames[frame.idx()];
            if cursor {
                f.cursor = SlotState::At(index);
            } else {
                f.focus = SlotState::At(index);
            }
            match (f.parent, f.frame_node) {
                (Some(parent), Some(frame_node)) => {
                    frame = parent;
                    index = frame_node;
                }
                _ => return true,
            }
        }
    }

    /// Clear the cursor along its current path, marking each frame on the
    /// path as explicitly cleared. Frames that never held the cursor keep
    /// their uninitialized state.
    pub fn clear_cursor(&mut self) {
        let mut frame = Self::ROOT;
        loop {
            let Some(index) = self.frames[frame.idx()].cursor.index() else {
                return;
            };
            self.frames[frame.idx()].cursor = SlotState::Cleared;
            let id = NodeId { frame, index };
            match self.node(id).child_frame {
                Some(child) => frame = child,
                None => return,
            }
        }
    }

    /// The deepest frame whose clipped viewport contains the point, or `None`
    /// when the point is outside the root.
    pub fn frame_at(&self, x: i32, y: i32) -> Option<FrameId> {
        self.frame_at_in(Self::ROOT, x, y)
    }

    fn frame_at_in(&self, frame: FrameId, x: i32, y: i32) -> Option<FrameId> {
        if !self.frame(frame).view_bounds.contains_point(x, y) {
            return None;
        }
        let mut result = frame;
        for &child in &self.frame(frame).children {
            if let Some(hit) = self.frame_at_in(child, x, y) {
                result = hit;
            }
        }
        Some(result)
    }
}

fn document_node(bounds: NavRect) -> Node {
    Node {
        bounds,
        hit_bounds: bounds,
        flags: NodeFlags::DOCUMENT,
        ..Node::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn simple_node(bounds: NavRect) -> Node {
        Node {
            bounds,
            rects: smallvec![bounds],
            ..Node::default()
        }
    }

    #[test]
    fn root_frame_has_document_node() {
        let tree = NavTree::new(NavRect::new(0, 0, 100, 100));
        let doc = tree.frame(NavTree::ROOT).document();
        assert!(doc.is_document());
        assert!(doc.rects.is_empty());
    }

    #[test]
    fn finish_rejects_selectable_nodes_without_rects() {
        let mut tree = NavTree::new(NavRect::new(0, 0, 100, 100));
        let id = tree.add_node(
            NavTree::ROOT,
            Node {
                bounds: NavRect::new(0, 0, 10, 10),
                ..Node::default()
            },
        );
        assert_eq!(tree.finish(), Err(BuildError::EmptyNavigableRects(id)));
    }

    #[test]
    fn finish_rejects_unlinked_child_frames() {
        let mut tree = NavTree::new(NavRect::new(0, 0, 100, 100));
        let child = tree.add_frame(
            NavTree::ROOT,
            NavRect::new(10, 10, 60, 60),
            NavRect::new(10, 10, 60, 60),
        );
        assert_eq!(tree.finish(), Err(BuildError::UnlinkedFrame(child)));
    }

    #[test]
    fn finish_wires_frame_nodes_and_clips_views() {
        let mut tree = NavTree::new(NavRect::new(0, 0, 100, 100));
        let child = tree.add_frame(
            NavTree::ROOT,
            NavRect::new(50, 50, 150, 150),
            NavRect::new(50, 50, 150, 150),
        );
        tree.add_node(
            NavTree::ROOT,
            Node {
                bounds: NavRect::new(50, 50, 100, 100),
                child_frame: Some(child),
                ..Node::default()
            },
        );
        tree.finish().unwrap();
        assert_eq!(tree.frame(child).view_bounds(), NavRect::new(50, 50, 100, 100));
    }

    #[test]
    fn cursor_path_descends_into_frames() {
        let mut tree = NavTree::new(NavRect::new(0, 0, 100, 100));
        let child = tree.add_frame(
            NavTree::ROOT,
            NavRect::new(20, 20, 80, 80),
            NavRect::new(20, 20, 80, 80),
        );
        tree.add_node(
            NavTree::ROOT,
            Node {
                bounds: NavRect::new(20, 20, 80, 80),
                child_frame: Some(child),
                ..Node::default()
            },
        );
        let inner = tree.add_node(child, simple_node(NavRect::new(30, 30, 50, 40)));
        tree.finish().unwrap();

        assert!(tree.set_cursor(inner));
        assert_eq!(tree.cursor(), Some(inner));
        // The root frame's slot points at the frame node on the path.
        assert_eq!(tree.frame(NavTree::ROOT).cursor(), SlotState::At(1));

        tree.clear_cursor();
        assert_eq!(tree.cursor(), None);
        assert_eq!(tree.frame(NavTree::ROOT).cursor(), SlotState::Cleared);
        assert_eq!(tree.frame(child).cursor(), SlotState::Cleared);
    }

    #[test]
    fn set_cursor_refuses_disabled_nodes() {
        let mut tree = NavTree::new(NavRect::new(0, 0, 100, 100));
        let id = tree.add_node(
            NavTree::ROOT,
            Node {
                bounds: NavRect::new(0, 0, 10, 10),
                rects: smallvec![NavRect::new(0, 0, 10, 10)],
                flags: NodeFlags::DISABLED,
                ..Node::default()
            },
        );
        tree.finish().unwrap();
        assert!(!tree.set_cursor(id));
        assert_eq!(tree.cursor(), None);
    }

    #[test]
    fn frame_at_returns_deepest_containing_frame() {
        let mut tree = NavTree::new(NavRect::new(0, 0, 100, 100));
        let child = tree.add_frame(
            NavTree::ROOT,
            NavRect::new(40, 40, 90, 90),
            NavRect::new(40, 40, 90, 90),
        );
        tree.add_node(
            NavTree::ROOT,
            Node {
                bounds: NavRect::new(40, 40, 90, 90),
                child_frame: Some(child),
                ..Node::default()
            },
        );
        tree.finish().unwrap();
        assert_eq!(tree.frame_at(10, 10), Some(NavTree::ROOT));
        assert_eq!(tree.frame_at(50, 50), Some(child));
        assert_eq!(tree.frame_at(200, 200), None);
    }

    #[test]
    fn hit_bounds_default_to_bounds() {
        let mut tree = NavTree::new(NavRect::new(0, 0, 100, 100));
        let id = tree.add_node(NavTree::ROOT, simple_node(NavRect::new(5, 5, 20, 20)));
        tree.finish().unwrap();
        assert_eq!(tree.node(id).hit_bounds, NavRect::new(5, 5, 20, 20));
    }
}
