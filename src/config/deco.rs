use strum::{Display, EnumIs};
use strum_macros::EnumIter;
use tiledeco_macro::ConfigSection;

use crate::types::Color;
use crate::{DecoError::InvalidConfig, Result};

use super::ConfigSection;

/// The named color channels of one color set.
///
/// Window borders are drawn with `child_border`, and the edge that shows
/// where the next window will be placed is drawn with `indicator`.
/// Title bars use `border`, `background` and `text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ConfigSection)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecorationColors {
    /// The border of title bars and tabs.
    #[key]
    pub border: Color,
    /// The background of title bars and tabs.
    #[key]
    pub background: Color,
    /// The text of title bars and tabs.
    #[key]
    pub text: Color,
    /// The window border edge indicating the next split direction.
    #[key]
    pub indicator: Color,
    /// The window border.
    #[key]
    pub child_border: Color,
}

impl DecorationColors {
    const fn from_hex(border: u32, background: u32, text: u32, indicator: u32, child_border: u32) -> Self {
        Self {
            border: Color::from_hex(border),
            background: Color::from_hex(background),
            text: Color::from_hex(text),
            indicator: Color::from_hex(indicator),
            child_border: Color::from_hex(child_border),
        }
    }
}

/// Which of the three color sets a decoration is currently drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIs, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ColorSet {
    /// The node is the active node.
    Focused,
    /// The node is not active, but an active node lies beneath it.
    FocusedInactive,
    /// The node has nothing to do with the active node.
    Unfocused,
}

/// The three color sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ConfigSection)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorSets {
    #[allow(missing_docs)]
    #[subsection]
    pub focused: DecorationColors,
    #[allow(missing_docs)]
    #[subsection]
    pub focused_inactive: DecorationColors,
    #[allow(missing_docs)]
    #[subsection]
    pub unfocused: DecorationColors,
}

impl ColorSets {
    /// Returns the colors of the given set.
    pub fn get(&self, set: ColorSet) -> &DecorationColors {
        match set {
            ColorSet::Focused => &self.focused,
            ColorSet::FocusedInactive => &self.focused_inactive,
            ColorSet::Unfocused => &self.unfocused,
        }
    }
}

impl Default for ColorSets {
    fn default() -> Self {
        Self {
            focused: DecorationColors::from_hex(0x4c7899ff, 0x285577ff, 0xffffffff, 0x2e9ef4ff, 0x285577ff),
            focused_inactive: DecorationColors::from_hex(0x333333ff, 0x5f676aff, 0xffffffff, 0x484e50ff, 0x5f676aff),
            unfocused: DecorationColors::from_hex(0x333333ff, 0x222222ff, 0x888888ff, 0x292d2eff, 0x222222ff),
        }
    }
}

/// The decoration configuration.
///
/// `DecorationConfig` provides a `validate` method that ensures its
/// invariants are upheld. It can also run user-defined code to check
/// any additional invariants the host needs.
///
/// # Construction
///
/// To build a DecorationConfig, use the [`DecorationConfigBuilder`] type.
///
/// # Example
///
/// ```rust
/// use tiledeco::config::{DecorationConfig, no_checks};
///
/// // create a default config that upholds all invariants
/// let config = DecorationConfig::new();
///
/// config.validate(no_checks).expect("invalid config");
/// ```
#[derive(Debug, Clone, PartialEq, ConfigSection)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct DecorationConfig {
    /// The width of window borders, in pixels.
    #[key]
    border_width: i32,
    /// The radius of rounded outer corners, in pixels.
    #[key]
    border_radius: i32,
    /// Whether tabbed containers show a title bar.
    #[key]
    title_bar: bool,
    /// The height of title bars, in pixels.
    #[key]
    title_bar_height: i32,
    /// The font title bar labels are drawn with.
    #[key]
    title_font: String,
    /// The color sets.
    #[subsection]
    colors: ColorSets,
}

/// A const function that simply returns Ok. Pass this into validate if you have no
/// user-defined checks to run.
pub const fn no_checks(_: &DecorationConfig) -> Result<()> {
    Ok(())
}

impl DecorationConfig {
    /// Returns the default construction, which upholds every invariant.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a [`DecorationConfigBuilder`] to build your Config with the
    /// 'builder' idiom.
    pub fn builder() -> DecorationConfigBuilder {
        DecorationConfigBuilder::new()
    }

    /// Checks the configuration to verify that all invariants are upheld.
    ///
    /// Additional code to check host-specific invariants can be passed
    /// in as `checks`. If you have none, pass in [`no_checks`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use tiledeco::DecorationConfig;
    /// use tiledeco::DecoError::InvalidConfig;
    ///
    /// let config = DecorationConfig::new();
    ///
    /// let res = config.validate(|cfg: &DecorationConfig| {
    ///     if cfg.border_width() > 10 {
    ///         Err(InvalidConfig("borders too thick".into()))
    ///     } else {
    ///         Ok(())
    ///     }
    /// });
    /// assert!(res.is_ok());
    /// ```
    pub fn validate<F>(&self, checks: F) -> Result<()>
    where
        F: FnOnce(&DecorationConfig) -> Result<()>,
    {
        if self.border_width < 0 {
            return Err(InvalidConfig("border_width is negative".into()));
        }
        if self.border_radius < 0 {
            return Err(InvalidConfig("border_radius is negative".into()));
        }
        if self.title_bar && self.title_bar_height <= 0 {
            return Err(InvalidConfig("title_bar_height must be positive".into()));
        }
        if self.title_font.trim().is_empty() {
            return Err(InvalidConfig("title_font is empty".into()));
        }
        checks(self)?;
        Ok(())
    }

    /// The width of window borders, in pixels.
    pub fn border_width(&self) -> i32 {
        self.border_width
    }

    /// The radius of rounded outer corners, in pixels.
    pub fn border_radius(&self) -> i32 {
        self.border_radius
    }

    /// Whether tabbed containers show a title bar.
    pub fn title_bar(&self) -> bool {
        self.title_bar
    }

    /// The height of title bars, in pixels.
    pub fn title_bar_height(&self) -> i32 {
        self.title_bar_height
    }

    /// The font title bar labels are drawn with.
    pub fn title_font(&self) -> &str {
        &self.title_font
    }

    /// All three color sets.
    pub fn colors(&self) -> &ColorSets {
        &self.colors
    }

    /// The colors of one color set.
    pub fn color_set(&self, set: ColorSet) -> &DecorationColors {
        self.colors.get(set)
    }
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            border_width: 2,
            border_radius: 6,
            title_bar: true,
            title_bar_height: 24,
            title_font: String::from("sans-serif 10"),
            colors: ColorSets::default(),
        }
    }
}

/// A helper type to construct a [`DecorationConfig`].
///
/// # Example
///
/// ```rust
/// use tiledeco::config::{DecorationConfigBuilder, no_checks};
///
/// let config = DecorationConfigBuilder::new()
///     .border_width(4)
///     .title_bar(false)
///     .finish(no_checks)
///     .expect("invalid config");
///
/// assert_eq!(config.border_width(), 4);
/// ```
#[derive(Debug, Default)]
pub struct DecorationConfigBuilder {
    inner: DecorationConfig,
}

impl DecorationConfigBuilder {
    /// Creates a new `DecorationConfigBuilder`.
    pub fn new() -> Self {
        Self {
            inner: DecorationConfig::default(),
        }
    }

    /// Sets the border width, in pixels.
    pub fn border_width(mut self, border_width: i32) -> Self {
        self.inner.border_width = border_width;
        self
    }

    /// Sets the corner radius, in pixels.
    pub fn border_radius(mut self, border_radius: i32) -> Self {
        self.inner.border_radius = border_radius;
        self
    }

    /// Sets whether tabbed containers show a title bar.
    pub fn title_bar(mut self, title_bar: bool) -> Self {
        self.inner.title_bar = title_bar;
        self
    }

    /// Sets the title bar height, in pixels.
    pub fn title_bar_height(mut self, title_bar_height: i32) -> Self {
        self.inner.title_bar_height = title_bar_height;
        self
    }

    /// Sets the title font.
    pub fn title_font<S: Into<String>>(mut self, title_font: S) -> Self {
        self.inner.title_font = title_font.into();
        self
    }

    /// Sets all three color sets.
    pub fn colors(mut self, colors: ColorSets) -> Self {
        self.inner.colors = colors;
        self
    }

    /// Sets one color set.
    pub fn color_set(mut self, set: ColorSet, colors: DecorationColors) -> Self {
        match set {
            ColorSet::Focused => self.inner.colors.focused = colors,
            ColorSet::FocusedInactive => self.inner.colors.focused_inactive = colors,
            ColorSet::Unfocused => self.inner.colors.unfocused = colors,
        }
        self
    }

    /// Finishes Config construction, validates it and returns
    /// a completed config if validation is successful.
    ///
    /// You can supply an additional `check` to run
    /// additional code to validate your config.
    pub fn finish<F>(self, check: F) -> Result<DecorationConfig>
    where
        F: FnOnce(&DecorationConfig) -> Result<()>,
    {
        let config = self.inner;
        config.validate(check)?;
        Ok(config)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use strum::IntoEnumIterator;

    #[test]
    fn test_default_is_valid() {
        DecorationConfig::new()
            .validate(no_checks)
            .expect("default config is invalid");
    }

    #[test]
    fn test_builder_rejects_invalid() {
        assert!(DecorationConfig::builder().border_width(-1).finish(no_checks).is_err());
        assert!(DecorationConfig::builder().border_radius(-3).finish(no_checks).is_err());
        assert!(DecorationConfig::builder().title_font("  ").finish(no_checks).is_err());

        // a zero bar height only matters with title bars on
        assert!(DecorationConfig::builder().title_bar_height(0).finish(no_checks).is_err());
        assert!(
            DecorationConfig::builder()
                .title_bar(false)
                .title_bar_height(0)
                .finish(no_checks)
                .is_ok()
        );
    }

    #[test]
    fn test_user_checks_run() {
        let res = DecorationConfig::builder()
            .border_width(12)
            .finish(|cfg| {
                if cfg.border_width() > 10 {
                    Err(InvalidConfig("too thick".into()))
                } else {
                    Ok(())
                }
            });

        assert!(matches!(res, Err(InvalidConfig(_))));
    }

    #[test]
    fn test_section_introspection() {
        let config = DecorationConfig::builder()
            .border_radius(9)
            .finish(no_checks)
            .expect("invalid config");

        assert_eq!(config.get_key_static::<i32>("border_radius"), Some(&9));
        assert!(config.get_key_static::<bool>("border_radius").is_none());
        assert!(config.get_key("colors").is_none());
        assert!(config.keys().contains(&"title_font"));

        let focused = config
            .subsection("colors")
            .and_then(|colors| colors.subsection("focused"))
            .expect("no focused colors");
        let border = focused
            .get_key("child_border")
            .and_then(|v| v.downcast_ref::<Color>());

        assert_eq!(border, Some(&config.colors().focused.child_border));
    }

    #[test]
    fn test_color_set_lookup() {
        let config = DecorationConfig::new();

        for set in ColorSet::iter() {
            assert_eq!(config.color_set(set), config.colors().get(set));
        }
        assert_eq!(ColorSet::FocusedInactive.to_string(), "focused_inactive");
    }
}
