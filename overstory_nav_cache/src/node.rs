// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Candidate records: node identifiers, flags, and per-node geometry.

use smallvec::SmallVec;

use crate::geom::NavRect;

/// Identifier for a frame in a [`NavTree`][crate::NavTree] arena.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct FrameId(pub(crate) u32);

impl FrameId {
    #[inline(always)]
    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Identifier for a node: the owning frame plus the node's position in that
/// frame's document-order list.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId {
    pub(crate) frame: FrameId,
    pub(crate) index: u32,
}

impl NodeId {
    /// The frame this node belongs to.
    #[inline]
    pub const fn frame(self) -> FrameId {
        self.frame
    }

    /// Position within the owning frame's document-order node list.
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }
}

/// Opaque sibling-group handle.
///
/// Hosts assign the same `GroupId` to nodes that belong to one structural
/// cluster (for example, the cells of a table or the links of a menu); the
/// resolver prefers staying within the anchor's group when geometry alone
/// cannot decide. The host owns the meaning and lifecycle of individual
/// values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupId(pub u64);

bitflags::bitflags! {
    /// Node flags controlling navigation eligibility.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node can never receive the cursor.
        const DISABLED = 0b0000_0001;
        /// Node is an image-map region, hit-tested independently of the
        /// element that visually contains it.
        const AREA = 0b0000_0010;
        /// Node is excluded from the gap-filling second-chance search.
        const NO_SECOND_CHANCE = 0b0000_0100;
        /// Synthetic per-frame document node (always index 0, never
        /// directly selectable).
        const DOCUMENT = 0b0000_1000;
    }
}

/// One candidate navigation target.
///
/// Nodes are built in bulk when the cache is rebuilt from layout and are
/// immutable for the duration of a navigation query. All rectangles are in
/// the root frame's coordinate space.
#[derive(Clone, Debug)]
pub struct Node {
    /// The element's overall box.
    pub bounds: NavRect,
    /// Rectangle used by the coarse point resolver. Empty means "same as
    /// `bounds`"; cache finalization normalizes it.
    pub hit_bounds: NavRect,
    /// Navigable sub-rectangles. An element may be visually fragmented
    /// (wrapped inline content); each rect is tested independently. Never
    /// empty for a selectable node.
    pub rects: SmallVec<[NavRect; 1]>,
    /// Eligibility flags.
    pub flags: NodeFlags,
    /// Ordering priority; see the resolver's tab-order rule.
    pub tab_index: i32,
    /// Index of the enclosing node within the same frame, if any.
    pub parent: Option<u32>,
    /// Sibling-group handle, if the host assigned one.
    pub group: Option<GroupId>,
    /// Present only on frame nodes: the nested frame this node stands for.
    pub child_frame: Option<FrameId>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            bounds: NavRect::ZERO,
            hit_bounds: NavRect::ZERO,
            rects: SmallVec::new(),
            flags: NodeFlags::empty(),
            tab_index: 0,
            parent: None,
            group: None,
            child_frame: None,
        }
    }
}

impl Node {
    /// Whether the node is flagged disabled.
    #[inline]
    pub fn disabled(&self) -> bool {
        self.flags.contains(NodeFlags::DISABLED)
    }

    /// Whether the node is an image-map area region.
    #[inline]
    pub fn is_area(&self) -> bool {
        self.flags.contains(NodeFlags::AREA)
    }

    /// Whether the node sits out the gap-filling second-chance search.
    #[inline]
    pub fn no_second_chance(&self) -> bool {
        self.flags.contains(NodeFlags::NO_SECOND_CHANCE)
    }

    /// Whether this is a frame's synthetic document node.
    #[inline]
    pub fn is_document(&self) -> bool {
        self.flags.contains(NodeFlags::DOCUMENT)
    }

    /// Whether the node can participate in navigation within `clip`.
    #[inline]
    pub fn navigable(&self, clip: NavRect) -> bool {
        !self.disabled() && self.bounds.intersects(clip)
    }

    /// Whether some sub-rectangle of `self` lies inside a sub-rectangle of
    /// `other`.
    ///
    /// Used to confirm whole-box containment at the sub-rectangle level
    /// before the resolver substitutes a more specific candidate for a
    /// containing one.
    pub fn part_rects_contains(&self, other: &Self) -> bool {
        for outer in &self.rects {
            for inner in &other.rects {
                if inner.contains(*outer) {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn node_with_rects(rects: &[NavRect]) -> Node {
        Node {
            bounds: rects
                .iter()
                .fold(NavRect::ZERO, |acc, r| acc.union(*r)),
            rects: rects.iter().copied().collect(),
            ..Node::default()
        }
    }

    #[test]
    fn part_rects_contains_checks_individual_rects() {
        let small = node_with_rects(&[NavRect::new(10, 10, 20, 20)]);
        let big = node_with_rects(&[NavRect::new(0, 0, 100, 100)]);
        assert!(small.part_rects_contains(&big));
        assert!(!big.part_rects_contains(&small));
    }

    #[test]
    fn part_rects_contains_handles_fragmented_nodes() {
        let fragmented = node_with_rects(&[
            NavRect::new(0, 0, 200, 10),
            NavRect::new(0, 10, 50, 20),
        ]);
        let inner = node_with_rects(&[NavRect::new(5, 12, 20, 18)]);
        assert!(inner.part_rects_contains(&fragmented));
    }

    #[test]
    fn document_nodes_have_no_rects() {
        let doc = Node {
            flags: NodeFlags::DOCUMENT,
            ..Node::default()
        };
        assert!(doc.is_document());
        assert!(doc.rects.is_empty());
        assert!(!doc.part_rects_contains(&doc));
    }

    #[test]
    fn navigable_requires_enabled_and_on_clip() {
        let clip = NavRect::new(0, 0, 100, 100);
        let mut n = Node {
            bounds: NavRect::new(10, 10, 20, 20),
            rects: smallvec![NavRect::new(10, 10, 20, 20)],
            ..Node::default()
        };
        assert!(n.navigable(clip));
        n.flags |= NodeFlags::DISABLED;
        assert!(!n.navigable(clip));
        n.flags = NodeFlags::empty();
        n.bounds = NavRect::new(200, 200, 220, 220);
        assert!(!n.navigable(clip));
    }
}
