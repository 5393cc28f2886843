//! This module contains the core primitives used within tiledeco:
//! geometry, shapes, regions and signals.

/// Drawable shape descriptors.
pub mod shape;
/// Unions of rectangles.
pub mod region;
/// Per-event subscriber lists.
pub mod signal;
/// Basic types used throughout tiledeco.
pub mod types;

pub use region::Region;
pub use shape::{Sector, Shape};
pub use signal::{Connection, Signal};
