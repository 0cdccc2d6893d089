use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::coords::Vec2;

use super::shapes::{
    arc::Arc, circle::Circle, ellipse::Ellipse, group::Group, line::Line, path::Path, quad::Quad,
    rect::Rectangle, rounded_rect::RoundedRectangle, scene_ref::SceneRef, sector::Sector,
    text::Text, triangle::Triangle, Shape,
};
use super::{InvalidData, Kind, Styles, Uid};

/// Typed payload of a primitive. The variant is the primitive's type.
///
/// Serializes as `{"type": kind, "data": canonical}`; deserializing runs the
/// type's verification, so malformed payloads never load.
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    Group(Group),
    Arc(Arc),
    Circle(Circle),
    Ellipse(Ellipse),
    Line(Line),
    Path(Path),
    Quad(Quad),
    Rect(Rectangle),
    RoundedRect(RoundedRectangle),
    SceneRef(SceneRef),
    Sector(Sector),
    Text(Text),
    Triangle(Triangle),
}

/// Binds `$s` to the shape inside `$data` and evaluates `$body`.
macro_rules! each_shape {
    ($data:expr, $s:ident => $body:expr) => {
        match $data {
            Data::Group($s) => $body,
            Data::Arc($s) => $body,
            Data::Circle($s) => $body,
            Data::Ellipse($s) => $body,
            Data::Line($s) => $body,
            Data::Path($s) => $body,
            Data::Quad($s) => $body,
            Data::Rect($s) => $body,
            Data::RoundedRect($s) => $body,
            Data::SceneRef($s) => $body,
            Data::Sector($s) => $body,
            Data::Text($s) => $body,
            Data::Triangle($s) => $body,
        }
    };
}

/// Generic helper so `each_shape!` can reach associated functions through a value.
#[inline]
fn filter_for<S: Shape>(_: &S, styles: &Styles) -> Styles {
    S::filter_styles(styles)
}

impl Data {
    pub fn kind(&self) -> Kind {
        match self {
            Data::Group(_) => Kind::Group,
            Data::Arc(_) => Kind::Arc,
            Data::Circle(_) => Kind::Circle,
            Data::Ellipse(_) => Kind::Ellipse,
            Data::Line(_) => Kind::Line,
            Data::Path(_) => Kind::Path,
            Data::Quad(_) => Kind::Quad,
            Data::Rect(_) => Kind::Rect,
            Data::RoundedRect(_) => Kind::RoundedRect,
            Data::SceneRef(_) => Kind::SceneRef,
            Data::Sector(_) => Kind::Sector,
            Data::Text(_) => Kind::Text,
            Data::Triangle(_) => Kind::Triangle,
        }
    }

    pub fn validate(&self) -> Result<(), InvalidData> {
        each_shape!(self, s => s.validate())
    }

    /// Canonical untyped form.
    pub fn to_value(&self) -> Value {
        each_shape!(self, s => s.to_value())
    }

    pub fn filter_styles(&self, styles: &Styles) -> Styles {
        each_shape!(self, s => filter_for(s, styles))
    }

    /// Point test in local coordinates with the default line tolerance.
    pub fn contains_point(&self, p: Vec2) -> bool {
        each_shape!(self, s => s.contains_point(p))
    }

    /// Like [`contains_point`](Self::contains_point) with an explicit
    /// tolerance for lines.
    pub fn contains_point_with(&self, p: Vec2, line_tolerance: f64) -> bool {
        match self {
            Data::Line(line) => line.contains_point_within(p, line_tolerance),
            other => other.contains_point(p),
        }
    }

    #[inline]
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Data::Group(g) => Some(g),
            _ => None,
        }
    }

    /// Child uids for groups, empty for every other type.
    #[inline]
    pub fn children(&self) -> &[Uid] {
        self.as_group().map(|g| g.children.as_slice()).unwrap_or(&[])
    }
}

macro_rules! data_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Data {
                #[inline]
                fn from(s: $ty) -> Self {
                    Data::$variant(s)
                }
            }
        )*
    };
}

data_from!(
    Group(Group),
    Arc(Arc),
    Circle(Circle),
    Ellipse(Ellipse),
    Line(Line),
    Path(Path),
    Quad(Quad),
    Rect(Rectangle),
    RoundedRect(RoundedRectangle),
    SceneRef(SceneRef),
    Sector(Sector),
    Text(Text),
    Triangle(Triangle),
);

#[derive(Serialize, Deserialize)]
struct WireData {
    #[serde(rename = "type")]
    kind: Kind,
    data: Value,
}

impl Serialize for Data {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireData { kind: self.kind(), data: self.to_value() }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Data {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireData::deserialize(deserializer)?;
        wire.kind.parse(&wire.data).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::paint::Color;
    use crate::scene::{StyleKey, StyleValue};

    #[test]
    fn serializes_as_tagged_canonical_form() {
        let data = Data::from(Circle::from(3.0));
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({"type": "circle", "data": [[0.0, 0.0], 3.0]})
        );
    }

    #[test]
    fn deserializing_verifies_payload() {
        let ok: Data = serde_json::from_value(json!({"type": "text", "data": "hi"})).unwrap();
        assert_eq!(ok, Data::Text(Text::from("hi")));
        let bad = serde_json::from_value::<Data>(json!({"type": "arc", "data": [1, 2]}));
        assert!(bad.unwrap_err().to_string().contains("invalid arc data"));
    }

    #[test]
    fn group_styles_pass_through() {
        let styles: Styles = [
            (StyleKey::Fill, StyleValue::Paint(Color::RED.into())),
            (StyleKey::Font, StyleValue::Name("mono".into())),
        ]
        .into_iter()
        .collect();
        assert_eq!(Data::Group(Group::default()).filter_styles(&styles), styles);
        assert_eq!(Data::Line(Line::from(((0.0, 0.0), (1.0, 1.0)))).filter_styles(&styles).len(), 0);
        assert_eq!(Data::Circle(Circle::from(1.0)).filter_styles(&styles).len(), 1);
    }

    #[test]
    fn line_tolerance_is_adjustable() {
        let line = Data::Line(Line::from(((0.0, 0.0), (10.0, 0.0))));
        let p = Vec2::new(5.0, 3.0);
        assert!(!line.contains_point(p));
        assert!(line.contains_point_with(p, 4.0));
    }
}
