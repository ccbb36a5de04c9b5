// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overstory Nav: the directional spatial-navigation resolver.
//!
//! Given a [`NavTree`][overstory_nav_cache::NavTree] snapshot of a page's
//! navigable elements and a requested
//! [`Direction`][overstory_nav_cache::Direction], this crate computes
//! which element should receive focus next. It is the d-pad/trackball half
//! of a focus system: history-aware, oscillation-free, and biased toward
//! coherent rows and columns rather than raw nearest-neighbor hops. A
//! sibling point-based resolver ([`find_best_at`] / [`find_best_hit_at`])
//! serves touch and pointer input over the same cache.
//!
//! The moving parts:
//!
//! - [`History`]: the anchor bounds, a working corridor accumulated over a
//!   run of same-axis moves, and per-gesture visited sets.
//! - [`resolve_direction`]: the stateless traversal — walks the frame tree
//!   in document order, recursing into nested frames, rejecting ineligible
//!   candidates and scoring the rest through an ordered tie-break ladder
//!   where structure (tab order, grouping, containment, corridors) outranks
//!   pixel distance.
//! - [`NavSession`]: the per-view wrapper that owns the history, runs the
//!   gap-filling search, and keeps the tree's cursor in sync.
//! - [`Trace`] / [`RejectReason`]: opt-in per-query diagnostics, kept out of
//!   the immutable cache.
//!
//! ## Minimal example
//!
//! Two links stacked vertically; pressing down moves between them:
//!
//! ```rust
//! use overstory_nav::NavSession;
//! use overstory_nav_cache::{Direction, NavRect, NavTree, Node};
//! use smallvec::smallvec;
//!
//! let mut tree = NavTree::new(NavRect::new(0, 0, 320, 240));
//! let top = NavRect::new(10, 10, 90, 30);
//! let bottom = NavRect::new(10, 50, 90, 70);
//! let first = tree.add_node(
//!     NavTree::ROOT,
//!     Node {
//!         bounds: top,
//!         rects: smallvec![top],
//!         ..Node::default()
//!     },
//! );
//! let second = tree.add_node(
//!     NavTree::ROOT,
//!     Node {
//!         bounds: bottom,
//!         rects: smallvec![bottom],
//!         ..Node::default()
//!     },
//! );
//! tree.finish().unwrap();
//! tree.set_cursor(first);
//!
//! let mut session = NavSession::new();
//! session.history_mut().set_nav_bounds(top);
//!
//! assert_eq!(session.move_cursor(&mut tree, Direction::Down), Some(second));
//! assert_eq!(tree.cursor(), Some(second));
//! // Nothing below the last link: focus stays put.
//! assert_eq!(session.move_cursor(&mut tree, Direction::Down), None);
//! ```
//!
//! ## Determinism
//!
//! Scoring is integer end to end: distances are device pixels, overlap
//! fractions are 16.16 fixed point ([`Fixed`]). The tie-break ladder depends
//! on a stable ordering rather than absolute precision, so identical caches
//! produce identical moves on every platform.
//!
//! ## Concurrency
//!
//! Everything here is synchronous and single-threaded. A query only reads
//! the tree; the session mutates its own history and the tree's cursor
//! between queries. Rebuilding the cache must not race a query — the usual
//! single-writer discipline, owned by the caller.
//!
//! ## Features
//!
//! - `std` (default) / `libm`: forwarded to `overstory_nav_cache` for
//!   `kurbo` support in `std` and `no_std` builds respectively.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod history;
mod hit;
mod resolve;
mod score;
mod session;
mod trace;

pub use history::History;
pub use hit::{PointHit, find_best_at, find_best_hit_at};
pub use resolve::resolve_direction;
pub use score::{FIXED_ONE, Fixed};
pub use session::NavSession;
pub use trace::{RejectReason, Trace};
