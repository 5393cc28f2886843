//! The border composer.
//!
//! Given the size of a decorated window, a border width, a corner radius and
//! the set of outer corners, [`Border::compute`] lays out the shapes a
//! border is drawn with: four edge rectangles, and one quarter ring for each
//! outer corner. Corners that are not outer stay square, meeting the
//! border of the neighbouring window.
//!
//! Everything here is in surface-local coordinates, with the top left of
//! the decorated rectangle at (0, 0).

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Mat4;

use crate::core::{Region, Sector, Shape};
use crate::render::Renderer;
use crate::types::{Color, Corners, Point, Rectangle, Size};

/// The input of the border composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BorderSpec {
    /// The size of the decorated rectangle.
    pub size: Size,
    /// The border width.
    pub border_width: i32,
    /// The radius of rounded corners.
    pub corner_radius: i32,
    /// Which corners are rounded.
    pub outer_corners: Corners,
}

/// The colors a border is drawn with.
///
/// The right and bottom edges have their own color, so that one of them
/// can show where the next window will be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderColors {
    /// Every piece but the right and bottom edges.
    pub all: Color,
    /// The right edge.
    pub right: Color,
    /// The bottom edge.
    pub bottom: Color,
}

impl BorderColors {
    /// The same color everywhere.
    pub fn uniform(color: Color) -> Self {
        Self {
            all: color,
            right: color,
            bottom: color,
        }
    }
}

/// The four edges of a border.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub left: Rectangle,
    pub right: Rectangle,
    pub top: Rectangle,
    pub bottom: Rectangle,
}

impl Edges {
    /// The edges as an array, in left, right, top, bottom order.
    pub fn as_array(&self) -> [Rectangle; 4] {
        [self.left, self.right, self.top, self.bottom]
    }
}

/// The laid out shapes of a border, and the region they cover.
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    spec: BorderSpec,
    edges: Edges,
    sectors: Vec<(Corners, Sector)>,
    region: Region,
}

impl Border {
    /// Lays out the border described by `spec`.
    ///
    /// The corner radius is clamped to half the smaller side. Edges are
    /// shortened by the radius only at the ends whose corner is outer, so
    /// the edges and corner rings never overlap.
    pub fn compute(spec: BorderSpec) -> Self {
        let BorderSpec {
            size: Size { width, height },
            border_width: bw,
            corner_radius,
            outer_corners,
        } = spec;

        let r = corner_radius.min(width / 2).min(height / 2).max(0);
        let inset = |corner: Corners| if r > 0 && outer_corners.contains(corner) { r } else { 0 };

        let span = |start: i32, end: i32| (end - start).max(0);

        let (tl, tr) = (inset(Corners::TOP_LEFT), inset(Corners::TOP_RIGHT));
        let (bl, br) = (inset(Corners::BOTTOM_LEFT), inset(Corners::BOTTOM_RIGHT));

        let edges = Edges {
            left: Rectangle::new(0, tl, bw, span(tl, height - bl)),
            right: Rectangle::new(width - bw, tr, bw, span(tr, height - br)),
            top: Rectangle::new(tl, 0, span(tl, width - tr), bw),
            bottom: Rectangle::new(bl, height - bw, span(bl, width - br), bw),
        };

        let inner = (r - bw).max(0);
        let sectors: Vec<(Corners, Sector)> = if r == 0 {
            Vec::new()
        } else {
            [
                (Corners::TOP_LEFT, Point::new(r, r), FRAC_PI_2),
                (Corners::TOP_RIGHT, Point::new(width - r, r), 0.0),
                (Corners::BOTTOM_LEFT, Point::new(r, height - r), PI),
                (Corners::BOTTOM_RIGHT, Point::new(width - r, height - r), 3.0 * FRAC_PI_2),
            ]
            .into_iter()
            .filter(|(corner, _, _)| outer_corners.contains(*corner))
            .map(|(corner, center, theta)| (corner, Sector::quadrant(center, inner, r, theta)))
            .collect()
        };

        let mut region: Region = edges.as_array().into_iter().collect();
        for (_, sector) in &sectors {
            region |= sector.bounds();
        }

        Self {
            spec,
            edges,
            sectors,
            region,
        }
    }

    /// The spec the border was laid out from.
    pub fn spec(&self) -> &BorderSpec {
        &self.spec
    }

    /// The four edge rectangles.
    pub fn edges(&self) -> &Edges {
        &self.edges
    }

    /// The ring of every outer corner.
    pub fn sectors(&self) -> impl Iterator<Item = &Sector> {
        self.sectors.iter().map(|(_, sector)| sector)
    }

    /// The ring drawn at `corner`, if it is outer.
    pub fn sector(&self, corner: Corners) -> Option<&Sector> {
        self.sectors
            .iter()
            .find(|(c, _)| *c == corner)
            .map(|(_, sector)| sector)
    }

    /// Every shape of the border.
    pub fn shapes(&self) -> Vec<Shape> {
        self.edges
            .as_array()
            .into_iter()
            .map(Shape::Rect)
            .chain(self.sectors().copied().map(Shape::Sector))
            .collect()
    }

    /// The union of the bounds of every shape.
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Check whether `pt` hits one of the shapes exactly.
    pub fn contains_point(&self, pt: Point) -> bool {
        self.shapes().iter().any(|shape| shape.contains_point(pt))
    }

    /// Draws the border with its top left corner at `origin`.
    pub fn render(&self, renderer: &mut dyn Renderer, colors: BorderColors, origin: Point, transform: &Mat4) {
        let Edges {
            left,
            right,
            top,
            bottom,
        } = self.edges;

        for (rect, color) in [
            (left, colors.all),
            (right, colors.right),
            (top, colors.all),
            (bottom, colors.bottom),
        ] {
            if !rect.is_empty() {
                renderer.draw_rect(rect.translate(origin), color, transform);
            }
        }

        for sector in self.sectors() {
            renderer.draw_sector(&sector.translate(origin), colors.all, transform);
        }
    }
}
