//! The tab bar composer.
//!
//! A [`TabBar`] keeps one entry per child of a tabbed container, in child
//! order. Each entry remembers the label it was last drawn with, so that a
//! label is only rasterized again when something it depends on changed:
//! its text, the font, the text color or the width it has to fit in.

use glam::Mat4;
use tracing::trace;

use crate::config::DecorationColors;
use crate::render::{LabelTexture, Renderer};
use crate::types::{Color, Point, Rectangle, Size};

/// Horizontal space kept free on both sides of a label.
pub const LABEL_PADDING: i32 = 4;

/// Everything a rasterized label depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LabelKey {
    text: String,
    font: String,
    color: Color,
    width: i32,
}

#[derive(Debug, Clone)]
struct CachedLabel {
    key: LabelKey,
    texture: LabelTexture,
}

#[derive(Debug, Clone)]
struct TabEntry {
    title: String,
    label: Option<CachedLabel>,
}

impl TabEntry {
    fn new(title: String) -> Self {
        Self { title, label: None }
    }
}

/// The tabs of a tabbed container.
#[derive(Debug, Clone, Default)]
pub struct TabBar {
    entries: Vec<TabEntry>,
    /// Textures no entry draws anymore, handed back on the next render.
    retired: Vec<LabelTexture>,
}

impl TabBar {
    /// Creates a new TabBar with no tabs.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of tabs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no tabs.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The title of every tab, in order.
    pub fn titles(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.title.as_str()).collect()
    }

    /// The number of tabs with a rasterized label.
    pub fn cached_labels(&self) -> usize {
        self.entries.iter().filter(|e| e.label.is_some()).count()
    }

    fn check_index(&self, index: usize, len: usize) {
        if index >= len {
            fatal!("tab index {} out of bounds for {} tabs", index, len);
        }
    }

    /// Replaces every tab with one per title.
    pub fn rebuild<I, S>(&mut self, titles: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.invalidate_all();
        self.entries = titles
            .into_iter()
            .map(|t| TabEntry::new(t.into()))
            .collect();
    }

    /// Sets the title of the tab at `index`.
    ///
    /// The label is rasterized again on the next render.
    pub fn update_title<S: Into<String>>(&mut self, index: usize, title: S) {
        self.check_index(index, self.len());
        self.entries[index].title = title.into();
    }

    /// Inserts a tab at `index`, shifting later tabs back.
    pub fn insert<S: Into<String>>(&mut self, index: usize, title: S) {
        self.check_index(index, self.len() + 1);
        self.entries.insert(index, TabEntry::new(title.into()));
    }

    /// Removes the tab at `index`, returning its title.
    pub fn remove(&mut self, index: usize) -> String {
        self.check_index(index, self.len());
        let entry = self.entries.remove(index);
        if let Some(label) = entry.label {
            self.retired.push(label.texture);
        }
        entry.title
    }

    /// Exchanges the tabs at `a` and `b`, labels included.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.check_index(a.max(b), self.len());
        self.entries.swap(a, b);
    }

    /// Drops every rasterized label.
    pub fn invalidate_all(&mut self) {
        let retired = self
            .entries
            .iter_mut()
            .filter_map(|e| e.label.take())
            .map(|label| label.texture);
        self.retired.extend(retired);
    }

    /// Splits `bar` into one equal-width rectangle per tab.
    ///
    /// The last tab absorbs the remainder.
    pub fn layout(&self, bar: Rectangle) -> Vec<Rectangle> {
        bar.split_vert_n(self.len())
    }

    /// Draws the tabs into `bar`.
    ///
    /// `colors` holds the colors of every tab, in order.
    pub fn render(
        &mut self,
        renderer: &mut dyn Renderer,
        bar: Rectangle,
        font: &str,
        colors: &[DecorationColors],
        transform: &Mat4,
    ) {
        for texture in self.retired.drain(..) {
            renderer.release_label(texture);
        }

        if colors.len() != self.entries.len() {
            fatal!("got colors for {} tabs, have {}", colors.len(), self.entries.len());
        }

        let rects = self.layout(bar);
        let last = self.entries.len().saturating_sub(1);

        for (i, (entry, rect)) in self.entries.iter_mut().zip(rects).enumerate() {
            let colors = &colors[i];

            renderer.draw_rect(rect, colors.background, transform);
            if i != last {
                let separator = Rectangle::new(rect.right() - 1, rect.point.y, 1, rect.size.height);
                renderer.draw_rect(separator, colors.border, transform);
            }

            let width = (rect.size.width - 2 * LABEL_PADDING).max(0);
            let key = LabelKey {
                text: entry.title.clone(),
                font: font.to_string(),
                color: colors.text,
                width,
            };

            let stale = entry.label.as_ref().is_none_or(|label| label.key != key);
            if stale {
                trace!("rasterizing label for tab {}", i);
                let texture = renderer.rasterize_label(
                    &key.text,
                    font,
                    key.color,
                    Size::new(width, rect.size.height),
                );
                if let Some(old) = entry.label.replace(CachedLabel { key, texture }) {
                    renderer.release_label(old.texture);
                }
            }

            if let Some(label) = &entry.label {
                let at = Point::new(
                    rect.point.x + LABEL_PADDING,
                    rect.point.y + (rect.size.height - label.texture.size.height) / 2,
                );
                renderer.draw_label(&label.texture, at, transform);
            }
        }
    }
}
