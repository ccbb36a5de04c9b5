// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-document navigable sets.

use alloc::vec::Vec;

use crate::geom::NavRect;
use crate::node::{FrameId, Node};

/// Cursor/focus slot state for a frame.
///
/// The cache distinguishes "never set" from "explicitly cleared" so that
/// hosts can tell whether a frame has participated in navigation at all.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SlotState {
    /// The slot has never been set.
    #[default]
    Uninitialized,
    /// The slot was set at some point and then explicitly cleared.
    Cleared,
    /// The slot points at the node with this index.
    At(u32),
}

impl SlotState {
    /// The node index, when the slot is set.
    #[inline]
    pub const fn index(self) -> Option<u32> {
        match self {
            Self::At(index) => Some(index),
            _ => None,
        }
    }
}

/// One document's (or sub-document's) navigable set.
///
/// Nodes are stored in document order; index 0 is always the synthetic
/// document node. Nested sub-documents hang off frame nodes via
/// [`Node::child_frame`] and live in the owning [`NavTree`] arena.
///
/// [`NavTree`]: crate::NavTree
#[derive(Clone, Debug)]
pub struct Frame {
    pub(crate) nodes: Vec<Node>,
    pub(crate) children: Vec<FrameId>,
    pub(crate) parent: Option<FrameId>,
    /// Index (in the parent frame) of the frame node that stands for this
    /// frame; resolved during cache finalization.
    pub(crate) frame_node: Option<u32>,
    pub(crate) local_view_bounds: NavRect,
    pub(crate) view_bounds: NavRect,
    pub(crate) contents: NavRect,
    pub(crate) cursor: SlotState,
    pub(crate) focus: SlotState,
}

impl Frame {
    pub(crate) fn new(local_view_bounds: NavRect, contents: NavRect) -> Self {
        Self {
            nodes: Vec::new(),
            children: Vec::new(),
            parent: None,
            frame_node: None,
            local_view_bounds,
            view_bounds: local_view_bounds,
            contents,
            cursor: SlotState::Uninitialized,
            focus: SlotState::Uninitialized,
        }
    }

    /// Nodes in document order. Index 0 is the synthetic document node.
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Nested frames, in the order their frame nodes appear.
    #[inline]
    pub fn children(&self) -> &[FrameId] {
        &self.children
    }

    /// The owning frame, or `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<FrameId> {
        self.parent
    }

    /// The frame's visible bounds, clipped against the root during
    /// finalization. All coordinates are in the root frame's space.
    #[inline]
    pub fn view_bounds(&self) -> NavRect {
        self.view_bounds
    }

    /// The frame's full content bounds.
    #[inline]
    pub fn contents(&self) -> NavRect {
        self.contents
    }

    /// Current cursor slot.
    #[inline]
    pub fn cursor(&self) -> SlotState {
        self.cursor
    }

    /// Current focus slot.
    #[inline]
    pub fn focus(&self) -> SlotState {
        self.focus
    }

    /// Whether the frame holds nothing beyond its document node.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() < 2
    }

    /// The synthetic document node.
    #[inline]
    pub fn document(&self) -> &Node {
        &self.nodes[0]
    }
}
