//! Unions of rectangles, for hit-testing and damage tracking.

use std::ops::BitOrAssign;

use super::types::{Point, Rectangle};

/// A union of rectangles.
///
/// A Region keeps a minimal set of rectangles: a rectangle already covered
/// by one in the region is never added, and adding a rectangle drops every
/// existing one it covers. Empty rectangles are ignored.
///
/// # Example
///
/// ```rust
/// use tiledeco::core::Region;
/// use tiledeco::types::{Point, Rectangle};
///
/// let mut region = Region::new();
/// region |= Rectangle::new(0, 0, 10, 10);
/// region |= Rectangle::new(2, 2, 4, 4); // already covered
///
/// assert_eq!(region.rects().len(), 1);
/// assert!(region.contains_point(Point::new(5, 5)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    rects: Vec<Rectangle>,
}

impl Region {
    /// Creates a new, empty Region.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the region covers nothing.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// The rectangles making up the region.
    pub fn rects(&self) -> &[Rectangle] {
        &self.rects
    }

    /// Adds a rectangle to the region.
    pub fn add_rect(&mut self, rect: Rectangle) {
        if rect.is_empty() || self.contains_rect(&rect) {
            return;
        }

        self.rects.retain(|r| !rect.contains(r));
        self.rects.push(rect);
    }

    /// Adds every rectangle of `other` to the region.
    pub fn union(&mut self, other: &Region) {
        for rect in &other.rects {
            self.add_rect(*rect);
        }
    }

    /// Check whether any rectangle of the region contains `pt`.
    pub fn contains_point(&self, pt: Point) -> bool {
        self.rects.iter().any(|r| r.contains_point(pt))
    }

    /// Check whether a single rectangle of the region covers `rect` entirely.
    ///
    /// This is conservative: a rectangle only covered by several pieces
    /// of the region together is not reported as contained.
    pub fn contains_rect(&self, rect: &Rectangle) -> bool {
        self.rects.iter().any(|r| r.contains(rect))
    }

    /// The smallest rectangle covering the whole region.
    pub fn bounds(&self) -> Rectangle {
        self.rects
            .iter()
            .fold(Rectangle::zeroed(), |acc, r| acc.union_bounds(r))
    }

    /// Returns the region moved by `delta`.
    #[must_use]
    pub fn translate(&self, delta: Point) -> Self {
        Self {
            rects: self.rects.iter().map(|r| r.translate(delta)).collect(),
        }
    }

    /// Removes everything from the region.
    pub fn clear(&mut self) {
        self.rects.clear()
    }
}

impl From<Rectangle> for Region {
    fn from(rect: Rectangle) -> Self {
        let mut region = Region::new();
        region.add_rect(rect);
        region
    }
}

impl FromIterator<Rectangle> for Region {
    fn from_iter<I: IntoIterator<Item = Rectangle>>(iter: I) -> Self {
        let mut region = Region::new();
        for rect in iter {
            region.add_rect(rect);
        }
        region
    }
}

impl BitOrAssign<Rectangle> for Region {
    fn bitor_assign(&mut self, rect: Rectangle) {
        self.add_rect(rect)
    }
}

impl BitOrAssign<&Region> for Region {
    fn bitor_assign(&mut self, other: &Region) {
        self.union(other)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_region_dedupe() {
        let mut region = Region::new();

        region |= Rectangle::new(2, 2, 4, 4);
        region |= Rectangle::new(20, 0, 4, 4);
        // swallows the first rectangle but not the second
        region |= Rectangle::new(0, 0, 10, 10);

        assert_eq!(
            region.rects(),
            &[Rectangle::new(20, 0, 4, 4), Rectangle::new(0, 0, 10, 10)]
        );

        region |= Rectangle::new(0, 0, 0, 10);
        assert_eq!(region.rects().len(), 2);
    }

    #[test]
    fn test_region_queries() {
        let region: Region = [Rectangle::new(0, 0, 10, 2), Rectangle::new(0, 8, 10, 2)]
            .into_iter()
            .collect();

        assert!(region.contains_point(Point::new(0, 0)));
        assert!(region.contains_point(Point::new(9, 9)));
        assert!(!region.contains_point(Point::new(5, 5)));

        assert!(region.contains_rect(&Rectangle::new(1, 0, 5, 2)));
        assert!(!region.contains_rect(&Rectangle::new(0, 0, 10, 10)));

        assert_eq!(region.bounds(), Rectangle::new(0, 0, 10, 10));
        assert_eq!(
            region.translate(Point::new(5, 5)).bounds(),
            Rectangle::new(5, 5, 10, 10)
        );
    }

    #[test]
    fn test_region_union() {
        let mut a = Region::from(Rectangle::new(0, 0, 5, 5));
        let b = Region::from(Rectangle::new(10, 10, 5, 5));

        a |= &b;
        assert_eq!(a.rects().len(), 2);
        assert!(a.contains_point(Point::new(12, 12)));

        a.clear();
        assert!(a.is_empty());
        assert_eq!(a.bounds(), Rectangle::zeroed());
    }
}
