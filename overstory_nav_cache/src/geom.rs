// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer navigation geometry: rectangles and movement directions.

use kurbo::Rect;

/// Axis-aligned rectangle with integer (device-pixel) edges.
///
/// Edges are stored as min/max corners; the rectangle covers the half-open
/// span `[min, max)` on each axis, matching how layout engines report pixel
/// boxes. A rectangle is empty when `max <= min` on either axis.
///
/// All navigation scoring runs on these integer rectangles so that the
/// resolver's tie-break ordering is bit-exact across platforms. Hosts whose
/// layout lives in floating-point world space can convert at the boundary
/// with [`NavRect::from_rect`] / [`NavRect::to_rect`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NavRect {
    /// Minimum x (left edge).
    pub min_x: i32,
    /// Minimum y (top edge).
    pub min_y: i32,
    /// Maximum x (right edge).
    pub max_x: i32,
    /// Maximum y (bottom edge).
    pub max_y: i32,
}

impl NavRect {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create a rectangle from min/max corners.
    #[inline(always)]
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create a rectangle from origin and size.
    #[inline]
    pub const fn from_xywh(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self::new(x, y, x + w, y + h)
    }

    /// Width of the rectangle (may be negative for inverted rectangles).
    #[inline(always)]
    pub const fn width(self) -> i32 {
        self.max_x - self.min_x
    }

    /// Height of the rectangle (may be negative for inverted rectangles).
    #[inline(always)]
    pub const fn height(self) -> i32 {
        self.max_y - self.min_y
    }

    /// Whether the rectangle has no area (including inverted rectangles).
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.max_x <= self.min_x || self.max_y <= self.min_y
    }

    /// Whether two rectangles overlap with positive area.
    ///
    /// Sharing an edge does not count as intersecting; the half-open pixel
    /// spans of abutting rectangles are disjoint.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }

    /// The intersection of two rectangles, or [`NavRect::ZERO`] when they are
    /// disjoint.
    #[inline]
    pub fn intersect(self, other: Self) -> Self {
        let out = Self::new(
            self.min_x.max(other.min_x),
            self.min_y.max(other.min_y),
            self.max_x.min(other.max_x),
            self.max_y.min(other.max_y),
        );
        if out.is_empty() { Self::ZERO } else { out }
    }

    /// The smallest rectangle enclosing both rectangles.
    ///
    /// Empty operands are ignored, so unioning a rect with [`NavRect::ZERO`]
    /// returns the rect unchanged.
    #[inline]
    pub fn union(self, other: Self) -> Self {
        if other.is_empty() {
            return self;
        }
        if self.is_empty() {
            return other;
        }
        Self::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// Whether `other` lies entirely within this rectangle (edges inclusive).
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.min_x <= other.min_x
            && self.max_x >= other.max_x
            && self.min_y <= other.min_y
            && self.max_y >= other.max_y
    }

    /// Whether the point lies within the rectangle's half-open pixel span.
    #[inline]
    pub const fn contains_point(self, x: i32, y: i32) -> bool {
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }

    /// Center of the rectangle, truncating toward the min corner.
    #[inline]
    pub const fn center(self) -> (i32, i32) {
        (
            self.min_x + (self.width() >> 1),
            self.min_y + (self.height() >> 1),
        )
    }

    /// Grow (or, for negative `d`, shrink) the rectangle by `d` on every side.
    #[inline]
    pub const fn inflate(self, d: i32) -> Self {
        Self::new(
            self.min_x - d,
            self.min_y - d,
            self.max_x + d,
            self.max_y + d,
        )
    }

    /// Translate the rectangle by `(dx, dy)`.
    #[inline]
    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.min_x + dx,
            self.min_y + dy,
            self.max_x + dx,
            self.max_y + dy,
        )
    }

    /// Convert from a [`kurbo::Rect`], rounding each edge to the nearest pixel.
    #[inline]
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(
            round_coord(rect.x0),
            round_coord(rect.y0),
            round_coord(rect.x1),
            round_coord(rect.y1),
        )
    }

    /// Convert to a [`kurbo::Rect`].
    #[inline]
    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.min_x),
            f64::from(self.min_y),
            f64::from(self.max_x),
            f64::from(self.max_y),
        )
    }
}

impl From<Rect> for NavRect {
    #[inline]
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}

impl From<NavRect> for Rect {
    #[inline]
    fn from(rect: NavRect) -> Self {
        rect.to_rect()
    }
}

/// Round half away from zero without relying on `std`/`libm` float intrinsics.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Navigation coordinates are device pixels well inside i32 range."
)]
#[inline]
fn round_coord(v: f64) -> i32 {
    if v < 0.0 { (v - 0.5) as i32 } else { (v + 0.5) as i32 }
}

/// Direction of a spatial navigation request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Move toward smaller x.
    Left,
    /// Move toward larger x.
    Right,
    /// Move toward smaller y.
    Up,
    /// Move toward larger y.
    Down,
}

/// Movement axis of a [`Direction`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left/right movement.
    Horizontal,
    /// Up/down movement.
    Vertical,
}

impl Direction {
    /// Number of directions.
    pub const COUNT: usize = 4;

    /// All directions, in the order used for per-direction tables.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    /// Stable index for per-direction tables.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Up => 2,
            Self::Down => 3,
        }
    }

    /// The movement axis of this direction.
    #[inline]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Up | Self::Down => Axis::Vertical,
        }
    }

    /// All four directions, starting with `self` and wrapping in table order.
    ///
    /// This is the probe order of the gap-filling search: the requested
    /// direction first, then the remaining ones as fallbacks.
    #[inline]
    pub fn cycle(self) -> impl Iterator<Item = Self> {
        let start = self.index();
        (0..Self::COUNT).map(move |i| Self::ALL[(start + i) & (Self::COUNT - 1)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersects_is_strict_on_shared_edges() {
        let a = NavRect::new(0, 0, 10, 10);
        let b = NavRect::new(10, 0, 20, 10);
        assert!(!a.intersects(b));
        assert!(a.intersects(NavRect::new(9, 0, 20, 10)));
    }

    #[test]
    fn intersect_normalizes_disjoint_to_zero() {
        let a = NavRect::new(0, 0, 10, 10);
        let b = NavRect::new(20, 20, 30, 30);
        assert_eq!(a.intersect(b), NavRect::ZERO);
        assert_eq!(
            a.intersect(NavRect::new(5, 5, 30, 30)),
            NavRect::new(5, 5, 10, 10)
        );
    }

    #[test]
    fn union_ignores_empty_operands() {
        let a = NavRect::new(0, 0, 10, 10);
        assert_eq!(a.union(NavRect::ZERO), a);
        assert_eq!(NavRect::ZERO.union(a), a);
        assert_eq!(
            a.union(NavRect::new(20, 20, 30, 30)),
            NavRect::new(0, 0, 30, 30)
        );
    }

    #[test]
    fn containment_and_points() {
        let a = NavRect::new(0, 0, 10, 10);
        assert!(a.contains(NavRect::new(2, 2, 8, 8)));
        assert!(a.contains(a));
        assert!(!a.contains(NavRect::new(2, 2, 12, 8)));
        assert!(a.contains_point(0, 0));
        assert!(!a.contains_point(10, 10));
    }

    #[test]
    fn center_truncates_like_integer_halving() {
        assert_eq!(NavRect::new(0, 0, 5, 5).center(), (2, 2));
        assert_eq!(NavRect::new(-4, -4, 0, 0).center(), (-2, -2));
    }

    #[test]
    fn kurbo_round_trip() {
        let r = NavRect::from_rect(kurbo::Rect::new(0.4, 0.6, 10.5, 19.9));
        assert_eq!(r, NavRect::new(0, 1, 11, 20));
        assert_eq!(r.to_rect(), kurbo::Rect::new(0.0, 1.0, 11.0, 20.0));
        let n = NavRect::from_rect(kurbo::Rect::new(-0.6, -0.4, -0.2, 3.0));
        assert_eq!(n, NavRect::new(-1, 0, 0, 3));
    }

    #[test]
    fn direction_cycle_starts_at_self() {
        let order: alloc::vec::Vec<_> = Direction::Up.cycle().collect();
        assert_eq!(
            order,
            alloc::vec![
                Direction::Up,
                Direction::Down,
                Direction::Left,
                Direction::Right
            ]
        );
        assert_eq!(Direction::Left.axis(), Axis::Horizontal);
        assert_eq!(Direction::Down.axis(), Axis::Vertical);
    }
}
