use std::collections::BTreeSet;

use crate::coords::{Matrix, Rect, Vec2};
use crate::paint::Paint;

use super::{Id, StyleKey, StyleValue, Styles, Tag, Transforms};

/// Per-call options for builder functions: styles, transforms, id and tags.
///
/// Options are stored on the primitive and never interpreted by the graph
/// beyond id/tag indexing.
///
/// ```
/// use tableau_engine::paint::Color;
/// use tableau_engine::scene::opts;
///
/// let o = opts().fill(Color::BLUE).translate(10.0, 10.0).id("hello");
/// assert_eq!(o.id.as_ref().map(|id| id.as_str()), Some("hello"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub styles: Styles,
    pub transforms: Transforms,
    pub id: Option<Id>,
    pub tags: BTreeSet<Tag>,
}

/// Shorthand for `Options::default()`.
#[inline]
pub fn opts() -> Options {
    Options::default()
}

impl Options {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    // ── styles ────────────────────────────────────────────────────────────

    pub fn style(mut self, key: StyleKey, value: StyleValue) -> Self {
        self.styles.insert(key, value);
        self
    }

    pub fn fill(self, paint: impl Into<Paint>) -> Self {
        self.style(StyleKey::Fill, StyleValue::Paint(paint.into()))
    }

    pub fn stroke(self, width: f64, paint: impl Into<Paint>) -> Self {
        self.style(StyleKey::Stroke, StyleValue::Stroke { width, paint: paint.into() })
    }

    pub fn font(self, name: impl Into<String>) -> Self {
        self.style(StyleKey::Font, StyleValue::Name(name.into()))
    }

    pub fn font_size(self, size: f64) -> Self {
        self.style(StyleKey::FontSize, StyleValue::Number(size))
    }

    /// `left`, `center` or `right`; not checked here.
    pub fn text_align(self, align: impl Into<String>) -> Self {
        self.style(StyleKey::TextAlign, StyleValue::Name(align.into()))
    }

    pub fn hidden(self, hidden: bool) -> Self {
        self.style(StyleKey::Hidden, StyleValue::Bool(hidden))
    }

    pub fn scissor(self, clip: Rect) -> Self {
        self.style(StyleKey::Scissor, StyleValue::Rect(clip))
    }

    // ── transforms ────────────────────────────────────────────────────────

    pub fn translate(mut self, x: f64, y: f64) -> Self {
        self.transforms.translate = Some(Vec2::new(x, y));
        self
    }

    /// Rotation in radians around `pin` (or the local origin).
    pub fn rotate(mut self, radians: f64) -> Self {
        self.transforms.rotate = Some(radians);
        self
    }

    pub fn scale(mut self, sx: f64, sy: f64) -> Self {
        self.transforms.scale = Some(Vec2::new(sx, sy));
        self
    }

    pub fn pin(mut self, x: f64, y: f64) -> Self {
        self.transforms.pin = Some(Vec2::new(x, y));
        self
    }

    /// Explicit local matrix; overrides the other transform kinds.
    pub fn matrix(mut self, m: Matrix) -> Self {
        self.transforms.matrix = Some(m);
        self
    }

    // ── addressing ────────────────────────────────────────────────────────

    pub fn id(mut self, id: impl Into<Id>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<Tag>) -> Self {
        self.tags.insert(tag.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;

    #[test]
    fn fluent_calls_accumulate() {
        let o = opts()
            .fill(Color::BLUE)
            .stroke(2.0, Color::BLACK)
            .translate(5.0, 5.0)
            .rotate(1.0)
            .tag("a")
            .tag("b")
            .tag("a");
        assert_eq!(o.styles.len(), 2);
        assert_eq!(o.transforms.translate, Some(Vec2::new(5.0, 5.0)));
        assert_eq!(o.transforms.rotate, Some(1.0));
        assert_eq!(o.tags.len(), 2);
        assert!(!o.is_empty());
        assert!(opts().is_empty());
    }

    #[test]
    fn later_style_wins() {
        let o = opts().font_size(10.0).font_size(14.0);
        assert_eq!(o.styles.get(StyleKey::FontSize), Some(&StyleValue::Number(14.0)));
    }
}
