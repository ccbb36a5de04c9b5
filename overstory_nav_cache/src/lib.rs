// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overstory Nav Cache: the navigable-element snapshot consumed by the
//! spatial-navigation resolver.
//!
//! A browser engine (or any host with a 2D document) rebuilds this cache once
//! per layout pass from its live tree: one [`Frame`] per document or nested
//! sub-document, one [`Node`] per candidate navigation target. The cache is
//! position-independent — it carries only rectangles, flags, and structural
//! links, never live layout objects — so the resolver in `overstory_nav` can
//! run against it without touching the layout tree.
//!
//! The pieces:
//!
//! - [`NavRect`] / [`Direction`]: integer device-pixel geometry. Scoring is
//!   integer end to end so tie-breaking is bit-exact across platforms; hosts
//!   in floating-point world space convert at the boundary from
//!   [`kurbo::Rect`].
//! - [`Node`]: one candidate — overall bounds, per-fragment navigable
//!   rectangles, eligibility [`NodeFlags`], tab order, parent and
//!   [`GroupId`] links, and (for frame nodes) a [`Node::child_frame`] link.
//! - [`Frame`]: one document's nodes in document order, with index 0 always a
//!   synthetic document node, plus cursor/focus [`SlotState`] slots.
//! - [`NavTree`]: the arena owning every frame, the scrolled viewport, and
//!   the build/validation entry points.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use overstory_nav_cache::{NavRect, NavTree, Node};
//! use smallvec::smallvec;
//!
//! // Layout hands us float world-space boxes; the cache stores pixels.
//! let view = NavRect::from_rect(Rect::new(0.0, 0.0, 320.0, 240.0));
//! let mut tree = NavTree::new(view);
//!
//! let bounds = NavRect::from_rect(Rect::new(10.0, 10.0, 90.0, 30.0));
//! let link = tree.add_node(
//!     NavTree::ROOT,
//!     Node {
//!         bounds,
//!         rects: smallvec![bounds],
//!         ..Node::default()
//!     },
//! );
//! tree.finish().unwrap();
//!
//! assert_eq!(tree.node(link).bounds, NavRect::new(10, 10, 90, 30));
//! ```
//!
//! ## Coordinate space
//!
//! Every rectangle in the tree — including those of nodes inside nested
//! frames — is expressed in the root frame's coordinate space. The upstream
//! cache builder applies nested-frame offsets while flattening, which is what
//! lets a directional query cross frame boundaries without any per-frame
//! transform bookkeeping.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for
//!   floating-point math in dependencies.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod frame;
mod geom;
mod node;
mod tree;

pub use frame::{Frame, SlotState};
pub use geom::{Axis, Direction, NavRect};
pub use node::{FrameId, GroupId, Node, NodeFlags, NodeId};
pub use tree::{BuildError, NavTree};
