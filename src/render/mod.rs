//! The drawing contract between decorations and the rendering backend.
//!
//! Decorations never talk to a GPU themselves. They describe what to draw
//! through the three primitives of [`Renderer`]: filled rectangles, filled
//! annulus sectors and text labels, which are rasterized once into a
//! [`LabelTexture`] and then drawn as often as needed.
//!
//! What decorations expose back to the host is split into small capability
//! traits: [`Mappable`], [`HitTest`] and [`Renderable`], bundled together as
//! a [`Surface`] that can be placed in the [`Scene`].

use glam::Mat4;

use crate::core::Sector;
use crate::types::{Color, Point, Rectangle, Size};

mod scene;

pub use scene::Scene;

/// A handle to a rasterized text label, owned by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelTexture {
    /// Renderer-specific id of the texture.
    pub id: u64,
    /// The size of the rasterized text.
    pub size: Size,
}

/// The drawing backend.
///
/// All coordinates are in output-local logical pixels; `transform`
/// maps them to the framebuffer.
pub trait Renderer {
    /// Fills `rect` with `color`.
    fn draw_rect(&mut self, rect: Rectangle, color: Color, transform: &Mat4);

    /// Fills the annulus sector with `color`.
    fn draw_sector(&mut self, sector: &Sector, color: Color, transform: &Mat4);

    /// Rasterizes `text` into a texture no larger than `max`.
    fn rasterize_label(&mut self, text: &str, font: &str, color: Color, max: Size) -> LabelTexture;

    /// Draws a previously rasterized label with its top left corner at `at`.
    fn draw_label(&mut self, label: &LabelTexture, at: Point, transform: &Mat4);

    /// Hands a label the caller will not draw again back to the renderer.
    fn release_label(&mut self, label: LabelTexture) {
        let _ = label;
    }
}

/// Something that may or may not currently be shown.
pub trait Mappable {
    /// Returns true if the surface is shown.
    fn is_mapped(&self) -> bool;

    /// The size of the surface.
    fn size(&self) -> Size;

    /// Stops showing the surface for good.
    fn unmap(&mut self);
}

/// Something that can accept pointer input.
pub trait HitTest {
    /// Returns true if the surface-local point `(x, y)` hits the surface.
    fn accepts_input(&self, x: i32, y: i32) -> bool;
}

/// Something that can draw itself.
pub trait Renderable {
    /// Draws the surface with its top left corner at `origin`.
    ///
    /// This takes `&mut self` since surfaces may cache rasterized content.
    fn render(&mut self, renderer: &mut dyn Renderer, origin: Point, transform: &Mat4);
}

/// A decoration surface that can be placed in a [`Scene`].
pub trait Surface: Mappable + HitTest + Renderable {
    /// Where the surface sits, in output-local coordinates.
    fn offset(&self) -> Point;
}
