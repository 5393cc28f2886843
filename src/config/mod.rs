//! Types for configuring decorations.
//!
//! The central type is [`DecorationConfig`], built with the
//! [`DecorationConfigBuilder`] and checked with
//! [`validate`](DecorationConfig::validate). Every section implements
//! [`ConfigSection`], so values can be looked up by name.

mod deco;
mod section;

#[doc(inline)]
pub use deco::*;
pub use section::ConfigSection;
