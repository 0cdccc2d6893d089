use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::shapes::{
    arc::Arc, circle::Circle, ellipse::Ellipse, group::Group, line::Line, path::Path, quad::Quad,
    rect::Rectangle, rounded_rect::RoundedRectangle, scene_ref::SceneRef, sector::Sector,
    text::Text, triangle::Triangle, Shape,
};
use super::{Data, InvalidData, StyleSet};

/// Primitive type tag. Fixed for the lifetime of a primitive.
///
/// This is the registry: every operation on untyped data dispatches
/// through here to the matching [`Shape`] implementation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Group,
    Arc,
    Circle,
    Ellipse,
    Line,
    Path,
    Quad,
    Rect,
    RoundedRect,
    SceneRef,
    Sector,
    Text,
    Triangle,
}

/// Binds `$S` to the shape type registered for `$kind` and evaluates `$body`.
macro_rules! with_shape {
    ($kind:expr, $S:ident => $body:expr) => {
        match $kind {
            Kind::Group => { type $S = Group; $body }
            Kind::Arc => { type $S = Arc; $body }
            Kind::Circle => { type $S = Circle; $body }
            Kind::Ellipse => { type $S = Ellipse; $body }
            Kind::Line => { type $S = Line; $body }
            Kind::Path => { type $S = Path; $body }
            Kind::Quad => { type $S = Quad; $body }
            Kind::Rect => { type $S = Rectangle; $body }
            Kind::RoundedRect => { type $S = RoundedRectangle; $body }
            Kind::SceneRef => { type $S = SceneRef; $body }
            Kind::Sector => { type $S = Sector; $body }
            Kind::Text => { type $S = Text; $body }
            Kind::Triangle => { type $S = Triangle; $body }
        }
    };
}

impl Kind {
    pub const ALL: [Kind; 13] = [
        Kind::Group,
        Kind::Arc,
        Kind::Circle,
        Kind::Ellipse,
        Kind::Line,
        Kind::Path,
        Kind::Quad,
        Kind::Rect,
        Kind::RoundedRect,
        Kind::SceneRef,
        Kind::Sector,
        Kind::Text,
        Kind::Triangle,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Kind::Group => "group",
            Kind::Arc => "arc",
            Kind::Circle => "circle",
            Kind::Ellipse => "ellipse",
            Kind::Line => "line",
            Kind::Path => "path",
            Kind::Quad => "quad",
            Kind::Rect => "rect",
            Kind::RoundedRect => "rounded_rect",
            Kind::SceneRef => "scene_ref",
            Kind::Sector => "sector",
            Kind::Text => "text",
            Kind::Triangle => "triangle",
        }
    }

    /// Canonical data shape, as shown in error messages.
    pub fn expected(self) -> &'static str {
        with_shape!(self, S => S::EXPECTED)
    }

    /// Parses and validates untyped data into a typed payload.
    pub fn parse(self, raw: &Value) -> Result<Data, InvalidData> {
        with_shape!(self, S => S::from_value(raw).map(Data::from))
    }

    /// Non-panicking verification of untyped data.
    pub fn verify(self, raw: &Value) -> Result<(), InvalidData> {
        with_shape!(self, S => S::verify(raw))
    }

    /// Canonical form of accepted data; idempotent.
    pub fn normalize(self, raw: &Value) -> Result<Value, InvalidData> {
        with_shape!(self, S => S::normalize(raw))
    }

    /// Strict verification.
    ///
    /// # Panics
    /// Panics with the offending value and the expected shape when `raw`
    /// is not valid for this kind.
    pub fn expect_valid(self, raw: &Value) -> Data {
        with_shape!(self, S => S::expect_valid(raw).into())
    }

    pub fn valid_styles(self) -> StyleSet {
        with_shape!(self, S => S::valid_styles())
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::scene::StyleKey;

    #[test]
    fn serde_name_matches_display() {
        for kind in Kind::ALL {
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.name()));
        }
    }

    #[test]
    fn dispatch_reaches_each_type() {
        let samples = [
            (Kind::Group, json!([1, 2])),
            (Kind::Arc, json!([10, 0, 1])),
            (Kind::Circle, json!(4)),
            (Kind::Ellipse, json!([4, 2])),
            (Kind::Line, json!([[0, 0], [1, 1]])),
            (Kind::Path, json!([["move_to", 0, 0], ["line_to", 1, 1]])),
            (Kind::Quad, json!([[0, 0], [1, 0], [1, 1], [0, 1]])),
            (Kind::Rect, json!([4, 2])),
            (Kind::RoundedRect, json!([4, 2, 1])),
            (Kind::SceneRef, json!("hud")),
            (Kind::Sector, json!([10, 0, 1])),
            (Kind::Text, json!("hi")),
            (Kind::Triangle, json!([[0, 0], [1, 0], [0, 1]])),
        ];
        for (kind, raw) in samples {
            let data = kind.parse(&raw).unwrap_or_else(|e| panic!("{kind}: {e}"));
            assert_eq!(data.kind(), kind);
            let canonical = kind.normalize(&raw).unwrap();
            assert_eq!(kind.normalize(&canonical).unwrap(), canonical);
        }
    }

    #[test]
    fn wrong_kind_is_invalid_data() {
        let err = Kind::Line.verify(&json!("hud")).unwrap_err();
        assert_eq!(err.kind, Kind::Line);
        assert_eq!(err.expected, Kind::Line.expected());
    }

    #[test]
    #[should_panic(expected = "invalid circle data")]
    fn expect_valid_is_strict() {
        Kind::Circle.expect_valid(&json!({"r": 3}));
    }

    #[test]
    fn style_sets() {
        assert_eq!(Kind::Group.valid_styles(), StyleSet::All);
        assert!(Kind::Text.valid_styles().contains(StyleKey::Font));
        assert!(!Kind::Line.valid_styles().contains(StyleKey::Fill));
    }
}
