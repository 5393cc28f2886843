//! Drawable shape descriptors.
//!
//! Decorations are built out of two kinds of shape: plain rectangles and
//! annulus sectors (the rounded corners). Both can report the rectangle they
//! cover and test whether a point hits them.

use std::f32::consts::{FRAC_PI_2, PI};

use super::types::{Point, Rectangle};

/// How far outside a sector's rings a point may lie and still hit it.
///
/// This matches the antialiasing epsilon used when sectors are drawn, so
/// the partially covered edge pixels still accept input.
pub const HIT_MARGIN: f32 = 0.4;

/// Tolerance used to absorb floating point error when rounding bounds.
const BOUNDS_EPSILON: f32 = 1e-3;

/// A filled ring segment between two radii and two angles.
///
/// Angles are in radians, with 0 along +x and increasing counter-clockwise
/// as seen on screen. Since screen y grows downwards, the top-left quadrant
/// of the center spans `[π/2, π]` and the bottom-right spans `[3π/2, 2π]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    /// The center of the ring.
    pub center: Point,
    /// The inner radius. Points closer than this to the center are not covered.
    pub inner_radius: i32,
    /// The outer radius.
    pub outer_radius: i32,
    /// The start of the angular range.
    pub theta_a: f32,
    /// The end of the angular range.
    pub theta_b: f32,
}

impl Sector {
    /// Creates a new Sector.
    pub fn new(center: Point, inner_radius: i32, outer_radius: i32, theta_a: f32, theta_b: f32) -> Self {
        Self {
            center,
            inner_radius,
            outer_radius,
            theta_a,
            theta_b,
        }
    }

    /// Creates a quarter ring spanning the quadrant that starts at `theta_a`.
    pub fn quadrant(center: Point, inner_radius: i32, outer_radius: i32, theta_a: f32) -> Self {
        Self::new(center, inner_radius, outer_radius, theta_a, theta_a + FRAC_PI_2)
    }

    /// The angle of `pt` around the center, in `[0, 2π]`.
    pub fn angle_of(&self, pt: Point) -> f32 {
        let dx = (pt.x - self.center.x) as f32;
        let dy = (pt.y - self.center.y) as f32;

        dy.atan2(-dx) + PI
    }

    /// Check whether `pt` lies on the sector, within [`HIT_MARGIN`] of its rings.
    pub fn contains_point(&self, pt: Point) -> bool {
        let dx = (pt.x - self.center.x) as f32;
        let dy = (pt.y - self.center.y) as f32;
        let dist = (dx * dx + dy * dy).sqrt();

        if dist > self.outer_radius as f32 + HIT_MARGIN
            || dist < self.inner_radius as f32 - HIT_MARGIN
        {
            return false;
        }

        let angle = self.angle_of(pt);
        angle >= self.theta_a && angle <= self.theta_b
    }

    /// The smallest rectangle covering the sector.
    ///
    /// Computed from the ring endpoints at both angles plus every axis
    /// crossing of the outer ring that falls inside the angular range.
    pub fn bounds(&self) -> Rectangle {
        let direction = |theta: f32| (theta.cos(), -theta.sin());

        let mut points = Vec::with_capacity(9);

        for radius in [self.inner_radius, self.outer_radius] {
            for theta in [self.theta_a, self.theta_b] {
                points.push((radius as f32, direction(theta)));
            }
        }

        for quarter in 0..=4 {
            let theta = quarter as f32 * FRAC_PI_2;
            if theta >= self.theta_a - BOUNDS_EPSILON && theta <= self.theta_b + BOUNDS_EPSILON {
                points.push((self.outer_radius as f32, direction(theta)));
            }
        }

        let (cx, cy) = (self.center.x as f32, self.center.y as f32);
        let (mut min_x, mut min_y) = (f32::MAX, f32::MAX);
        let (mut max_x, mut max_y) = (f32::MIN, f32::MIN);

        for (radius, (dx, dy)) in points {
            let (x, y) = (cx + radius * dx, cy + radius * dy);
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        let x = (min_x + BOUNDS_EPSILON).floor() as i32;
        let y = (min_y + BOUNDS_EPSILON).floor() as i32;
        let right = (max_x - BOUNDS_EPSILON).ceil() as i32;
        let bottom = (max_y - BOUNDS_EPSILON).ceil() as i32;

        Rectangle::new(x, y, right - x, bottom - y)
    }

    /// Returns the sector moved by `delta`.
    #[must_use]
    pub fn translate(&self, delta: Point) -> Self {
        Self {
            center: self.center + delta,
            ..*self
        }
    }
}

/// A single drawable piece of a decoration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// A filled rectangle.
    Rect(Rectangle),
    /// A filled annulus sector.
    Sector(Sector),
}

impl Shape {
    /// The smallest rectangle covering the shape.
    pub fn bounds(&self) -> Rectangle {
        match self {
            Shape::Rect(rect) => *rect,
            Shape::Sector(sector) => sector.bounds(),
        }
    }

    /// Check whether `pt` hits the shape.
    pub fn contains_point(&self, pt: Point) -> bool {
        match self {
            Shape::Rect(rect) => rect.contains_point(pt),
            Shape::Sector(sector) => sector.contains_point(pt),
        }
    }

    /// Returns the shape moved by `delta`.
    #[must_use]
    pub fn translate(&self, delta: Point) -> Self {
        match self {
            Shape::Rect(rect) => Shape::Rect(rect.translate(delta)),
            Shape::Sector(sector) => Shape::Sector(sector.translate(delta)),
        }
    }
}
