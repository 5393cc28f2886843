//! Primitives for working with geometries.
//!
//! This module contains the core types [`Point`], [`Size`], [`Rectangle`] and [`Padding`].
//! All of them work in logical pixels on an `i32` grid, with the origin (0, 0) at the
//! top left of the coordinate space and y increasing downwards.

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A type for representing a point on a display or screen.
///
/// Implements [`PartialEq`], so you can compare it directly with
/// another Point. You can also directly add and subtract `Point`s,
/// as they implement [`Add`] and [`Sub`] on themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// The `Point`'s X-coordinate.
    pub x: i32,
    /// The `Point`'s Y-coordinate.
    pub y: i32,
}

impl Point {
    /// Creates a new Point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Creates a new Point at the origin.
    pub const fn zeroed() -> Self {
        Self::new(0, 0)
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other
    }
}

impl Neg for Point {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A type for representing the size of an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// The width of the area.
    pub width: i32,
    /// The height of the area.
    pub height: i32,
}

impl Size {
    /// Creates a new Size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Creates a new Size with all fields set to zero.
    pub const fn zeroed() -> Self {
        Self::new(0, 0)
    }

    /// Returns true if the area of this size is zero or negative.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Returns the area of the size (width * height).
    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }
}

impl From<(i32, i32)> for Size {
    fn from((width, height): (i32, i32)) -> Self {
        Self::new(width, height)
    }
}

/// Space reserved on each edge of a rectangle.
///
/// Nodes reserve padding for their decorations: a window reserves its
/// border width on every edge, a tabbed container reserves the height
/// of its title bar on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    #[allow(missing_docs)]
    pub top: i32,
    #[allow(missing_docs)]
    pub bottom: i32,
    #[allow(missing_docs)]
    pub left: i32,
    #[allow(missing_docs)]
    pub right: i32,
}

impl Padding {
    /// Creates a new Padding.
    pub const fn new(top: i32, bottom: i32, left: i32, right: i32) -> Self {
        Self { top, bottom, left, right }
    }

    /// Creates a Padding with the same amount on every edge.
    pub const fn uniform(amount: i32) -> Self {
        Self::new(amount, amount, amount, amount)
    }

    /// Creates a Padding that only reserves space on top.
    pub const fn top(amount: i32) -> Self {
        Self::new(amount, 0, 0, 0)
    }

    /// Creates a Padding with nothing reserved.
    pub const fn zeroed() -> Self {
        Self::uniform(0)
    }
}

/// A type for representing a 2D rectangular space, anchored to a
/// Point on the coordinate space.
///
/// Rectangles take their gravity from the top-left corner, that is,
/// any increase is an offset to the right or downwards.
///
/// _Note:_ The Default impl returns Rectangle {0, 0, 0, 0}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rectangle {
    /// The point that the Rectangle is anchored to.
    pub point: Point,
    /// The size of the Rectangle.
    pub size: Size,
}

impl Rectangle {
    /// Constructs a new `Rectangle`.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rectangle {
            point: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Creates a new Rectangle of the given `size`, anchored at the origin (0, 0)
    pub const fn from_size(size: Size) -> Self {
        Rectangle {
            point: Point::zeroed(),
            size,
        }
    }

    /// Convenience function for constructing a `Rectangle` with all fields
    /// set to zero.
    pub const fn zeroed() -> Self {
        Rectangle::new(0, 0, 0, 0)
    }

    /// Returns true if the Rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// The x coordinate one past the right edge.
    pub fn right(&self) -> i32 {
        self.point.x + self.size.width
    }

    /// The y coordinate one past the bottom edge.
    pub fn bottom(&self) -> i32 {
        self.point.y + self.size.height
    }

    /// Check whether this Rectangle encloses another Rectangle.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tiledeco::types::Rectangle;
    ///
    /// let original = Rectangle::new(0, 0, 200, 100);
    ///
    /// let new = Rectangle::new(2, 2, 75, 50);
    ///
    /// assert!(original.contains(&new));
    /// ```
    pub fn contains(&self, other: &Self) -> bool {
        other.point.x >= self.point.x
            && other.point.y >= self.point.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Check whether this Rectangle contains a certain point.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tiledeco::types::{Rectangle, Point};
    ///
    /// let original = Rectangle::new(0, 0, 200, 100);
    ///
    /// assert!(original.contains_point(Point::new(50, 50)));
    /// assert!(!original.contains_point(Point::new(200, 50)));
    /// ```
    pub fn contains_point(&self, pt: Point) -> bool {
        let wrange = self.point.x..self.right();
        let hrange = self.point.y..self.bottom();

        wrange.contains(&pt.x) && hrange.contains(&pt.y)
    }

    /// Check whether this Rectangle overlaps with `other`.
    pub fn overlaps_with(&self, other: &Self) -> bool {
        !(self.point.x >= other.right()
            || self.right() <= other.point.x
            || self.point.y >= other.bottom()
            || self.bottom() <= other.point.y)
    }

    /// Returns the rectangle moved by `delta`.
    #[must_use]
    pub fn translate(&self, delta: Point) -> Self {
        Rectangle {
            point: self.point + delta,
            size: self.size,
        }
    }

    /// Shrinks the rectangle by the given padding, never below zero size.
    #[must_use]
    pub fn shrink(&self, pad: Padding) -> Self {
        Rectangle::new(
            self.point.x + pad.left,
            self.point.y + pad.top,
            (self.size.width - pad.left - pad.right).max(0),
            (self.size.height - pad.top - pad.bottom).max(0),
        )
    }

    /// Grows the rectangle by the given padding.
    #[must_use]
    pub fn grow(&self, pad: Padding) -> Self {
        Rectangle::new(
            self.point.x - pad.left,
            self.point.y - pad.top,
            self.size.width + pad.left + pad.right,
            self.size.height + pad.top + pad.bottom,
        )
    }

    /// The smallest rectangle covering both `self` and `other`.
    ///
    /// Empty rectangles do not contribute.
    #[must_use]
    pub fn union_bounds(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }

        let x = self.point.x.min(other.point.x);
        let y = self.point.y.min(other.point.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());

        Rectangle::new(x, y, right - x, bottom - y)
    }

    /// Splits a Rectangle into `n` parts vertically, each part
    /// covering a region of the original Rectangle, from left.
    ///
    /// The last part absorbs whatever width is left over by the division.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tiledeco::types::Rectangle;
    ///
    /// let original = Rectangle::new(0, 0, 201, 100);
    ///
    /// let new_geoms = original.split_vert_n(2);
    ///
    /// assert_eq!(new_geoms, vec![
    ///     Rectangle::new(0, 0, 100, 100),
    ///     Rectangle::new(100, 0, 101, 100),
    /// ]);
    /// ```
    #[must_use]
    pub fn split_vert_n(&self, n: usize) -> Vec<Self> {
        if n == 0 {
            return Vec::new();
        }

        let new_width = self.size.width / n as i32;

        let mut ret: Vec<Self> = (0..n)
            .map(|i| {
                Rectangle::new(
                    self.point.x + (i as i32 * new_width),
                    self.point.y,
                    new_width,
                    self.size.height,
                )
            })
            .collect();

        if let Some(last) = ret.last_mut() {
            last.size.width = self.right() - last.point.x;
        }

        ret
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rectangle_shrink_grow() {
        let rect = Rectangle::new(10, 10, 100, 50);
        let pad = Padding::new(24, 2, 2, 2);

        let inner = rect.shrink(pad);
        assert_eq!(inner, Rectangle::new(12, 34, 96, 24));
        assert_eq!(inner.grow(pad), rect);

        // never shrinks past zero
        let tiny = Rectangle::new(0, 0, 3, 3).shrink(Padding::uniform(4));
        assert!(tiny.is_empty());
    }

    #[test]
    fn test_rectangle_union_bounds() {
        let a = Rectangle::new(0, 0, 10, 10);
        let b = Rectangle::new(20, 5, 10, 10);

        assert_eq!(a.union_bounds(&b), Rectangle::new(0, 0, 30, 15));
        assert_eq!(a.union_bounds(&Rectangle::zeroed()), a);
    }

    #[test]
    fn test_rectangle_overlap() {
        let a = Rectangle::new(0, 0, 10, 10);

        assert!(a.overlaps_with(&Rectangle::new(5, 5, 10, 10)));
        // touching edges do not overlap
        assert!(!a.overlaps_with(&Rectangle::new(10, 0, 10, 10)));
    }

    #[test]
    fn test_split_vert_n_remainder() {
        let parts = Rectangle::new(0, 0, 100, 20).split_vert_n(3);

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], Rectangle::new(0, 0, 33, 20));
        assert_eq!(parts[1], Rectangle::new(33, 0, 33, 20));
        assert_eq!(parts[2], Rectangle::new(66, 0, 34, 20));

        assert!(Rectangle::new(0, 0, 100, 20).split_vert_n(0).is_empty());
    }
}
