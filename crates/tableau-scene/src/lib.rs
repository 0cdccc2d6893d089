//! Tableau scene: pipeline construction, traversal and hit testing on top
//! of `tableau-engine`.
//!
//! # Quick start
//!
//! ```rust
//! use tableau_scene::prelude::*;
//!
//! # fn main() -> Result<(), SceneError> {
//! let graph = Graph::build()
//!     .rect((100.0, 200.0), opts().fill(Color::BLUE))?
//!     .text("Hello", opts().id("hello").translate(10.0, 10.0))?
//!     .group(|g| g.line(((0.0, 0.0), (10.0, 10.0)), opts()), opts().translate(5.0, 5.0))?;
//!
//! assert_eq!(graph.find_id("hello"), Some(Uid::new(2)));
//! assert_eq!(hit_test(&graph, Vec2::new(50.0, 50.0), &HitConfig::default())?, Some(Uid::new(1)));
//! # Ok(())
//! # }
//! ```
//!
//! # Rendering
//!
//! A renderer receives a finished [`Graph`](tableau_engine::scene::Graph)
//! and drives [`walk::walk`]: every visit carries the accumulated matrix
//! and the effective styles for that primitive.

pub mod builder;
pub mod hit;
pub mod walk;

/// Everything needed to build and inspect scenes.
pub mod prelude {
    pub use crate::builder::{Builder, GraphBuilder};
    pub use crate::hit::{hit_test, hits, HitConfig};
    pub use crate::walk::{visits, walk, Flow, Visit};

    pub use tableau_engine::coords::{CornerRadii, Matrix, Rect, Vec2};
    pub use tableau_engine::paint::{Color, Paint};
    pub use tableau_engine::scene::{
        opts, Arc, Circle, Data, Ellipse, Graph, Group, Id, Kind, Line, Options, Path, Primitive,
        Quad, Rectangle, RoundedRectangle, SceneError, SceneRef, Sector, Selector, StyleKey,
        StyleValue, Tag, Text, Triangle, Uid,
    };
}
