use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::coords::Rect;
use crate::paint::Paint;

/// Closed style vocabulary.
///
/// Styles are inherited down the tree: a value set on a group applies to
/// every descendant that does not set the same key itself. Each primitive
/// type honors a subset (see [`StyleSet`]).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleKey {
    Fill,
    Stroke,
    Font,
    FontSize,
    LineHeight,
    TextAlign,
    TextBase,
    Cap,
    Join,
    MiterLimit,
    Hidden,
    Scissor,
    Input,
}

/// Value stored under a [`StyleKey`]. Not interpreted by the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleValue {
    Paint(Paint),
    Stroke { width: f64, paint: Paint },
    Number(f64),
    Name(String),
    Bool(bool),
    Rect(Rect),
}

impl StyleValue {
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            StyleValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match *self {
            StyleValue::Number(n) => Some(n),
            _ => None,
        }
    }
}

/// Styles honored by a primitive type.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StyleSet {
    /// Every key passes (groups forward everything for inheritance).
    All,
    Only(&'static [StyleKey]),
}

impl StyleSet {
    #[inline]
    pub fn contains(self, key: StyleKey) -> bool {
        match self {
            StyleSet::All => true,
            StyleSet::Only(keys) => keys.contains(&key),
        }
    }
}

use StyleKey::*;

pub(crate) const SHAPE_STYLES: &[StyleKey] = &[Hidden, Scissor, Input, Fill, Stroke];
pub(crate) const ARC_STYLES: &[StyleKey] = &[Hidden, Scissor, Input, Fill, Stroke, Cap];
pub(crate) const LINE_STYLES: &[StyleKey] = &[Hidden, Scissor, Input, Stroke, Cap];
pub(crate) const PATH_STYLES: &[StyleKey] = &[Hidden, Scissor, Input, Fill, Stroke, Cap, Join, MiterLimit];
pub(crate) const TEXT_STYLES: &[StyleKey] =
    &[Hidden, Scissor, Input, Fill, Font, FontSize, LineHeight, TextAlign, TextBase];
pub(crate) const SCENE_REF_STYLES: &[StyleKey] = &[Hidden, Scissor, Input];

/// Explicit style map of one primitive (or inherited set during a walk).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Styles(BTreeMap<StyleKey, StyleValue>);

impl Styles {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn get(&self, key: StyleKey) -> Option<&StyleValue> {
        self.0.get(&key)
    }

    #[inline]
    pub fn insert(&mut self, key: StyleKey, value: StyleValue) -> Option<StyleValue> {
        self.0.insert(key, value)
    }

    #[inline]
    pub fn remove(&mut self, key: StyleKey) -> Option<StyleValue> {
        self.0.remove(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleKey, &StyleValue)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }

    /// Returns `self` with every entry of `overrides` written on top.
    pub fn merged(&self, overrides: &Styles) -> Styles {
        let mut out = self.clone();
        out.0.extend(overrides.0.iter().map(|(k, v)| (*k, v.clone())));
        out
    }

    /// Keeps only the keys in `set`.
    pub fn project(&self, set: StyleSet) -> Styles {
        match set {
            StyleSet::All => self.clone(),
            StyleSet::Only(_) => Styles(
                self.0
                    .iter()
                    .filter(|(k, _)| set.contains(**k))
                    .map(|(k, v)| (*k, v.clone()))
                    .collect(),
            ),
        }
    }

    /// `hidden: true` anywhere in this (effective) set.
    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.get(StyleKey::Hidden).and_then(StyleValue::as_bool).unwrap_or(false)
    }
}

impl FromIterator<(StyleKey, StyleValue)> for Styles {
    fn from_iter<I: IntoIterator<Item = (StyleKey, StyleValue)>>(iter: I) -> Self {
        Styles(iter.into_iter().collect())
    }
}
