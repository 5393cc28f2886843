//! Basic core types used throughout this crate at a high level.

pub mod geometry;

pub use geometry::*;

bitflags! {

/// Bitmask over the four corners of a rectangle.
///
/// A corner is set when it lies on the outer boundary of the whole
/// tiling tree, and is therefore drawn rounded.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Corners: u8 {
    /// The top left corner.
    const TOP_LEFT     = 1 << 0;
    /// The top right corner.
    const TOP_RIGHT    = 1 << 1;
    /// The bottom left corner.
    const BOTTOM_LEFT  = 1 << 2;
    /// The bottom right corner.
    const BOTTOM_RIGHT = 1 << 3;

    /// Both top corners.
    const TOP    = Self::TOP_LEFT.bits() | Self::TOP_RIGHT.bits();
    /// Both bottom corners.
    const BOTTOM = Self::BOTTOM_LEFT.bits() | Self::BOTTOM_RIGHT.bits();
    /// Both left corners.
    const LEFT   = Self::TOP_LEFT.bits() | Self::BOTTOM_LEFT.bits();
    /// Both right corners.
    const RIGHT  = Self::TOP_RIGHT.bits() | Self::BOTTOM_RIGHT.bits();
    /// Every corner.
    const ALL    = Self::TOP.bits() | Self::BOTTOM.bits();
}
}

impl Corners {
    /// No corner at all.
    pub const NONE: Corners = Corners::empty();
}

/// A representation of a color, following the RGBA model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(u32);

impl Color {
    /// Creates the Color from a 32-bit `0xRRGGBBAA` integer.
    pub const fn from_hex(hex: u32) -> Self {
        Self(hex)
    }

    /// Expresses the Color as a hex string.
    pub fn as_string(&self) -> String {
        format!("{:#010x}", self.as_u32())
    }

    /// Returns the (R, G, B) values of the Color
    /// as bytes.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let (r, g, b, _) = self.rgba();
        (r, g, b)
    }

    /// Returns the (R, G, B, A) values of the Color
    /// as bytes.
    pub fn rgba(&self) -> (u8, u8, u8, u8) {
        let [r, g, b, a] = u32::to_be_bytes(self.0);
        (r, g, b, a)
    }

    /// Returns the (R, G, B, A) components of the Color
    /// as proportions of max intensity (255.0).
    pub fn rgba_f32(&self) -> (f32, f32, f32, f32) {
        let (r, g, b, a) = self.rgba();

        (
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Returns the color as a u32.
    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Color {
    fn from(from: u32) -> Self {
        Self::from_hex(from)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_corner_groups() {
        assert_eq!(Corners::LEFT | Corners::RIGHT, Corners::ALL);
        assert_eq!(Corners::TOP | Corners::BOTTOM, Corners::ALL);
        assert_eq!(Corners::LEFT & Corners::TOP, Corners::TOP_LEFT);
        assert!(Corners::NONE.is_empty());
        assert_eq!(Corners::default(), Corners::NONE);
    }

    #[test]
    fn test_color_channels() {
        let color = Color::from_hex(0x4c7899ff);

        assert_eq!(color.rgba(), (0x4c, 0x78, 0x99, 0xff));
        assert_eq!(color.rgb(), (0x4c, 0x78, 0x99));
        assert_eq!(color.as_string(), "0x4c7899ff");

        let (_, _, _, a) = color.rgba_f32();
        assert_eq!(a, 1.0);
    }
}
