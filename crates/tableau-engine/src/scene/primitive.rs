use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coords::{Matrix, Vec2};

use super::{Data, Id, Kind, Options, SceneError, Styles, Tag, Transforms, Uid};

/// One addressable node of a [`Graph`](super::Graph).
///
/// `uid` and the data's [`Kind`] are fixed once the primitive exists.
/// `styles` and `transforms` hold only what was set explicitly on this
/// node; inherited values are resolved during a walk.
///
/// Updates are functional: they consume the primitive and return the
/// updated value, which the caller writes back through
/// [`Graph::modify`](super::Graph::modify).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PrimitiveWire", into = "PrimitiveWire")]
pub struct Primitive {
    pub(crate) uid: Uid,
    pub(crate) data: Data,
    pub(crate) styles: Styles,
    pub(crate) transforms: Transforms,
    pub(crate) id: Option<Id>,
    pub(crate) tags: BTreeSet<Tag>,
}

impl Primitive {
    /// Validated construction. Only the graph allocates uids.
    pub(crate) fn new(uid: Uid, data: Data, options: Options) -> Result<Self, SceneError> {
        data.validate()?;
        let empty = Primitive {
            uid,
            data,
            styles: Styles::new(),
            transforms: Transforms::default(),
            id: None,
            tags: BTreeSet::new(),
        };
        empty.merge(options)
    }

    #[inline]
    pub fn uid(&self) -> Uid {
        self.uid
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        self.data.kind()
    }

    #[inline]
    pub fn data(&self) -> &Data {
        &self.data
    }

    #[inline]
    pub fn styles(&self) -> &Styles {
        &self.styles
    }

    #[inline]
    pub fn transforms(&self) -> &Transforms {
        &self.transforms
    }

    #[inline]
    pub fn id(&self) -> Option<&Id> {
        self.id.as_ref()
    }

    #[inline]
    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    #[inline]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.as_str() == tag)
    }

    /// Child uids for groups, empty otherwise.
    #[inline]
    pub fn children(&self) -> &[Uid] {
        self.data.children()
    }

    /// Replaces the data with a value of the same kind and merges `options`.
    pub fn update(self, data: impl Into<Data>, options: Options) -> Result<Self, SceneError> {
        let data = data.into();
        if data.kind() != self.kind() {
            return Err(SceneError::KindMismatch {
                uid: self.uid,
                expected: data.kind(),
                actual: self.kind(),
            });
        }
        data.validate()?;
        Primitive { data, ..self }.merge(options)
    }

    /// Like [`update`](Self::update) for untyped data, parsed as this
    /// primitive's kind.
    pub fn update_value(self, raw: &Value, options: Options) -> Result<Self, SceneError> {
        let data = self.kind().parse(raw)?;
        Primitive { data, ..self }.merge(options)
    }

    /// Merges styles and transforms key by key (new values win), replaces
    /// the id when one is given and adds tags.
    pub fn merge(mut self, options: Options) -> Result<Self, SceneError> {
        let Options { styles, transforms, id, tags } = options;
        transforms.validate()?;
        self.styles = self.styles.merged(&styles);
        self.transforms = self.transforms.merged(transforms);
        if id.is_some() {
            self.id = id;
        }
        self.tags.extend(tags);
        Ok(self)
    }

    /// Explicit styles restricted to the ones this type honors.
    pub fn filtered_styles(&self) -> Styles {
        self.data.filter_styles(&self.styles)
    }

    /// `p` is in this primitive's local coordinates.
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        self.data.contains_point(p)
    }

    #[inline]
    pub fn local_matrix(&self) -> Matrix {
        self.transforms.local_matrix()
    }

    /// Moves this primitive and its child references by `offset`.
    pub(crate) fn renumbered(mut self, offset: i64) -> Self {
        self.uid = self.uid.wrapping_offset(offset);
        if let Data::Group(group) = &self.data {
            self.data = Data::Group(group.increment(offset));
        }
        self
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct PrimitiveWire {
    uid: Uid,
    #[serde(flatten)]
    data: Data,
    #[serde(default, skip_serializing_if = "Styles::is_empty")]
    styles: Styles,
    #[serde(default, skip_serializing_if = "Transforms::is_empty")]
    transforms: Transforms,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<Id>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    tags: BTreeSet<Tag>,
}

impl From<Primitive> for PrimitiveWire {
    fn from(p: Primitive) -> Self {
        let Primitive { uid, data, styles, transforms, id, tags } = p;
        PrimitiveWire { uid, data, styles, transforms, id, tags }
    }
}

impl TryFrom<PrimitiveWire> for Primitive {
    type Error = SceneError;

    fn try_from(w: PrimitiveWire) -> Result<Self, Self::Error> {
        w.transforms.validate()?;
        Ok(Primitive {
            uid: w.uid,
            data: w.data,
            styles: w.styles,
            transforms: w.transforms,
            id: w.id,
            tags: w.tags,
        })
    }
}
