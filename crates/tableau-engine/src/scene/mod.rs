//! Scene graph model.
//!
//! Responsibilities:
//! - the primitive type registry ([`Kind`], [`Shape`] and one struct per type under `shapes`)
//! - primitives: uid-addressed nodes carrying typed data, styles and transforms
//! - the graph arena, its group context and structural checks
//! - deterministic serialization (JSON, CBOR, blake3 digest)

mod data;
mod error;
mod graph;
mod kind;
mod options;
mod primitive;
mod style;
mod transform;
mod uid;

pub mod shapes;

pub use data::Data;
pub use error::{InvalidData, SceneError};
pub use graph::{Graph, Selector};
pub use kind::Kind;
pub use options::{opts, Options};
pub use primitive::Primitive;
pub use shapes::Shape;
pub use shapes::{
    arc::Arc,
    circle::Circle,
    ellipse::Ellipse,
    group::Group,
    line::Line,
    path::{Path, PathCmd},
    quad::Quad,
    rect::Rectangle,
    rounded_rect::RoundedRectangle,
    scene_ref::SceneRef,
    sector::Sector,
    text::Text,
    triangle::Triangle,
};
pub use style::{StyleKey, StyleSet, StyleValue, Styles};
pub use transform::{TransformStack, Transforms};
pub use uid::{Id, Tag, Uid};
