use std::collections::BTreeSet;

use tableau_engine::coords::Matrix;
use tableau_engine::scene::{Graph, Primitive, SceneError, Styles, TransformStack, Uid};

/// One node as seen during a [`walk`].
#[derive(Debug, Clone)]
pub struct Visit<'g> {
    pub primitive: &'g Primitive,
    /// Local-to-global matrix: every ancestor's local matrix and the node's own.
    pub matrix: Matrix,
    /// Inherited styles merged with the node's own, restricted to the ones
    /// its type honors.
    pub styles: Styles,
    /// 0 for the root.
    pub depth: usize,
}

impl Visit<'_> {
    #[inline]
    pub fn uid(&self) -> Uid {
        self.primitive.uid()
    }
}

/// What the walk does after a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Do not descend into this node's children.
    SkipChildren,
    /// End the walk.
    Stop,
}

/// Depth-first traversal from the root in paint order (parents before
/// children, earlier siblings before later ones).
///
/// Transforms accumulate through a [`TransformStack`]; styles inherit
/// through a parallel stack of effective style sets. A child uid that is
/// missing or reached twice aborts the walk with
/// [`SceneError::Structural`].
pub fn walk<'g, F>(graph: &'g Graph, visit: F) -> Result<(), SceneError>
where
    F: FnMut(&Visit<'g>) -> Flow,
{
    log::trace!("walk {} primitives", graph.len());
    let mut walker = Walker {
        graph,
        transforms: TransformStack::default(),
        styles: vec![Styles::new()],
        seen: BTreeSet::new(),
        visit,
    };
    walker.node(Uid::ROOT, 0).map(|_| ())
}

/// Every visit in paint order.
pub fn visits(graph: &Graph) -> Result<Vec<Visit<'_>>, SceneError> {
    let mut out = Vec::with_capacity(graph.len());
    walk(graph, |v| {
        out.push(v.clone());
        Flow::Continue
    })?;
    Ok(out)
}

struct Walker<'g, F> {
    graph: &'g Graph,
    transforms: TransformStack,
    styles: Vec<Styles>,
    seen: BTreeSet<Uid>,
    visit: F,
}

impl<'g, F> Walker<'g, F>
where
    F: FnMut(&Visit<'g>) -> Flow,
{
    fn node(&mut self, uid: Uid, depth: usize) -> Result<Flow, SceneError> {
        let primitive = self
            .graph
            .get(uid)
            .ok_or_else(|| SceneError::Structural(format!("walk reached missing {uid}")))?;
        if !self.seen.insert(uid) {
            return Err(SceneError::Structural(format!("walk reached {uid} twice")));
        }

        let inherited = self.styles.last().cloned().unwrap_or_default().merged(primitive.styles());
        let matrix = self.transforms.push(primitive.local_matrix());
        let visit = Visit { primitive, matrix, styles: primitive.data().filter_styles(&inherited), depth };
        log::trace!("visit {uid} {} at depth {depth}", primitive.kind());

        let mut flow = (self.visit)(&visit);
        if flow == Flow::Continue {
            self.styles.push(inherited);
            for &child in primitive.children() {
                match self.node(child, depth + 1) {
                    Ok(Flow::Stop) => {
                        flow = Flow::Stop;
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => return Err(e),
                }
            }
            self.styles.pop();
        }
        self.transforms.pop();
        Ok(flow)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tableau_engine::coords::Vec2;
    use tableau_engine::paint::Color;
    use tableau_engine::scene::{opts, StyleKey, StyleValue};

    use super::*;
    use crate::builder::{Builder, GraphBuilder};

    fn nested() -> Graph {
        Graph::build_with(opts().font_size(12.0))
            .unwrap()
            .group(
                |g| {
                    g.text("inner", opts().fill(Color::RED))?
                        .line(((0.0, 0.0), (1.0, 0.0)), opts().translate(0.0, 3.0))
                },
                opts().translate(10.0, 0.0).scale(2.0, 2.0).fill(Color::BLUE),
            )
            .unwrap()
            .circle(1.0, opts())
            .unwrap()
    }

    #[test]
    fn paint_order_is_depth_first() {
        let g = nested();
        let order: Vec<(Uid, usize)> = visits(&g).unwrap().iter().map(|v| (v.uid(), v.depth)).collect();
        assert_eq!(order, vec![(Uid(0), 0), (Uid(1), 1), (Uid(2), 2), (Uid(3), 2), (Uid(4), 1)]);
    }

    #[test]
    fn transforms_accumulate() {
        let g = nested();
        let all = visits(&g).unwrap();
        // group: scale then translate
        assert_eq!(all[1].matrix.apply(Vec2::new(1.0, 1.0)), Vec2::new(12.0, 2.0));
        // line adds its own translate inside the group
        assert_eq!(all[3].matrix.apply(Vec2::zero()), Vec2::new(10.0, 6.0));
        // sibling of the group is untouched by it
        assert_eq!(all[4].matrix, Matrix::IDENTITY);
    }

    #[test]
    fn styles_inherit_and_filter() {
        let g = nested();
        let all = visits(&g).unwrap();
        let text = &all[2].styles;
        assert_eq!(text.get(StyleKey::Fill), Some(&StyleValue::Paint(Color::RED.into())));
        assert_eq!(text.get(StyleKey::FontSize), Some(&StyleValue::Number(12.0)));
        // lines honor neither fill nor font size
        assert!(all[3].styles.is_empty());
        // the circle sits outside the blue group
        assert_eq!(all[4].styles.get(StyleKey::Fill), None);
    }

    #[test]
    fn skip_and_stop() {
        let g = nested();
        let mut seen = Vec::new();
        walk(&g, |v| {
            seen.push(v.uid());
            if v.uid() == Uid(1) { Flow::SkipChildren } else { Flow::Continue }
        })
        .unwrap();
        assert_eq!(seen, vec![Uid(0), Uid(1), Uid(4)]);

        let mut count = 0;
        walk(&g, |_| {
            count += 1;
            if count == 3 { Flow::Stop } else { Flow::Continue }
        })
        .unwrap();
        assert_eq!(count, 3);
    }
}
