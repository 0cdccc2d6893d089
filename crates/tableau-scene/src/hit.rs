use tableau_engine::coords::Vec2;
use tableau_engine::scene::{Graph, Line, SceneError, Uid};

use crate::walk::{walk, Flow};

/// Hit-testing configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitConfig {
    /// Distance in local units within which a line counts as hit.
    pub line_tolerance: f64,
    /// Test hidden primitives (and the subtrees of hidden groups) too.
    pub include_hidden: bool,
}

impl Default for HitConfig {
    fn default() -> Self {
        Self { line_tolerance: Line::HIT_TOLERANCE, include_hidden: false }
    }
}

impl HitConfig {
    pub fn with_line_tolerance(mut self, tolerance: f64) -> Self {
        self.line_tolerance = tolerance;
        self
    }

    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }
}

/// Every primitive containing the global `point`, topmost first.
///
/// The point is mapped into each primitive's local space through the
/// inverse of its accumulated matrix. Primitives whose matrix cannot be
/// inverted are skipped.
pub fn hits(graph: &Graph, point: Vec2, config: &HitConfig) -> Result<Vec<Uid>, SceneError> {
    let mut found = Vec::new();
    walk(graph, |visit| {
        if !config.include_hidden && visit.styles.is_hidden() {
            return Flow::SkipChildren;
        }
        let Some(inverse) = visit.matrix.inverse() else {
            log::warn!("skipping {} in hit test: singular transform", visit.uid());
            return Flow::Continue;
        };
        let local = inverse.apply(point);
        if visit.primitive.data().contains_point_with(local, config.line_tolerance) {
            found.push(visit.uid());
        }
        Flow::Continue
    })?;
    // later in paint order draws on top
    found.reverse();
    Ok(found)
}

/// Topmost primitive containing the global `point`.
pub fn hit_test(graph: &Graph, point: Vec2, config: &HitConfig) -> Result<Option<Uid>, SceneError> {
    Ok(hits(graph, point, config)?.into_iter().next())
}
