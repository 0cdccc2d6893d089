use serde_json::Value;

use crate::coords::{contain, Vec2};
use crate::scene::style::PATH_STYLES;
use crate::scene::{InvalidData, Kind, StyleSet};

use super::{invalid, items, num, numbers, Shape};

/// Segments used when flattening curves for hit testing.
const CURVE_STEPS: usize = 16;

/// One path drawing command.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PathCmd {
    Begin,
    Close,
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadraticTo { control: Vec2, to: Vec2 },
    BezierTo { c1: Vec2, c2: Vec2, to: Vec2 },
}

impl PathCmd {
    fn parse(v: &Value) -> Option<Self> {
        if let Some(word) = v.as_str() {
            return match word {
                "begin" => Some(PathCmd::Begin),
                "close" => Some(PathCmd::Close),
                _ => None,
            };
        }
        let (op, args) = items(v)?.split_first()?;
        let p = |[x, y]: [f64; 2]| Vec2::new(x, y);
        match op.as_str()? {
            "move_to" => numbers::<2>(args).map(|a| PathCmd::MoveTo(p(a))),
            "line_to" => numbers::<2>(args).map(|a| PathCmd::LineTo(p(a))),
            "quadratic_to" => numbers::<4>(args).map(|[cx, cy, x, y]| PathCmd::QuadraticTo {
                control: Vec2::new(cx, cy),
                to: Vec2::new(x, y),
            }),
            "bezier_to" => numbers::<6>(args).map(|[ax, ay, bx, by, x, y]| PathCmd::BezierTo {
                c1: Vec2::new(ax, ay),
                c2: Vec2::new(bx, by),
                to: Vec2::new(x, y),
            }),
            _ => None,
        }
    }

    fn to_value(self) -> Value {
        let tagged = |op: &str, ns: &[f64]| {
            let mut out = vec![Value::from(op)];
            out.extend(ns.iter().copied().map(num));
            Value::Array(out)
        };
        match self {
            PathCmd::Begin => Value::from("begin"),
            PathCmd::Close => Value::from("close"),
            PathCmd::MoveTo(p) => tagged("move_to", &[p.x, p.y]),
            PathCmd::LineTo(p) => tagged("line_to", &[p.x, p.y]),
            PathCmd::QuadraticTo { control, to } => {
                tagged("quadratic_to", &[control.x, control.y, to.x, to.y])
            }
            PathCmd::BezierTo { c1, c2, to } => {
                tagged("bezier_to", &[c1.x, c1.y, c2.x, c2.y, to.x, to.y])
            }
        }
    }

    fn is_finite(self) -> bool {
        match self {
            PathCmd::Begin | PathCmd::Close => true,
            PathCmd::MoveTo(p) | PathCmd::LineTo(p) => p.is_finite(),
            PathCmd::QuadraticTo { control, to } => control.is_finite() && to.is_finite(),
            PathCmd::BezierTo { c1, c2, to } => c1.is_finite() && c2.is_finite() && to.is_finite(),
        }
    }
}

/// Free-form path payload.
///
/// ```
/// use tableau_engine::scene::Path;
///
/// let tri = Path::new().move_to(0.0, 0.0).line_to(10.0, 0.0).line_to(0.0, 10.0).close();
/// assert_eq!(tri.cmds.len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    pub cmds: Vec<PathCmd>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(mut self) -> Self {
        self.cmds.push(PathCmd::Begin);
        self
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.cmds.push(PathCmd::MoveTo(Vec2::new(x, y)));
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.cmds.push(PathCmd::LineTo(Vec2::new(x, y)));
        self
    }

    pub fn quadratic_to(mut self, cx: f64, cy: f64, x: f64, y: f64) -> Self {
        self.cmds.push(PathCmd::QuadraticTo { control: Vec2::new(cx, cy), to: Vec2::new(x, y) });
        self
    }

    pub fn bezier_to(mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) -> Self {
        self.cmds.push(PathCmd::BezierTo {
            c1: Vec2::new(c1x, c1y),
            c2: Vec2::new(c2x, c2y),
            to: Vec2::new(x, y),
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.cmds.push(PathCmd::Close);
        self
    }

    /// Flattens the path into polygons, one per subpath.
    pub fn subpaths(&self) -> Vec<Vec<Vec2>> {
        let mut done = Vec::new();
        let mut current: Vec<Vec2> = Vec::new();
        let mut cursor = Vec2::zero();
        let mut start = Vec2::zero();

        for cmd in &self.cmds {
            match *cmd {
                PathCmd::Begin => {
                    if current.len() > 1 {
                        done.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    cursor = Vec2::zero();
                    start = cursor;
                }
                PathCmd::MoveTo(p) => {
                    if current.len() > 1 {
                        done.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(p);
                    cursor = p;
                    start = p;
                }
                PathCmd::LineTo(p) => {
                    if current.is_empty() {
                        current.push(cursor);
                    }
                    current.push(p);
                    cursor = p;
                }
                PathCmd::QuadraticTo { control, to } => {
                    if current.is_empty() {
                        current.push(cursor);
                    }
                    let from = cursor;
                    current.extend((1..=CURVE_STEPS).map(|i| {
                        let t = i as f64 / CURVE_STEPS as f64;
                        let u = 1.0 - t;
                        from * (u * u) + control * (2.0 * u * t) + to * (t * t)
                    }));
                    cursor = to;
                }
                PathCmd::BezierTo { c1, c2, to } => {
                    if current.is_empty() {
                        current.push(cursor);
                    }
                    let from = cursor;
                    current.extend((1..=CURVE_STEPS).map(|i| {
                        let t = i as f64 / CURVE_STEPS as f64;
                        let u = 1.0 - t;
                        from * (u * u * u) + c1 * (3.0 * u * u * t) + c2 * (3.0 * u * t * t) + to * (t * t * t)
                    }));
                    cursor = to;
                }
                PathCmd::Close => {
                    if current.len() > 1 {
                        done.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    cursor = start;
                }
            }
        }
        if current.len() > 1 {
            done.push(current);
        }
        done
    }
}

impl Shape for Path {
    const KIND: Kind = Kind::Path;
    const EXPECTED: &'static str = r#"["begin" | "close" | ["move_to", x, y] | ["line_to", x, y] | ["quadratic_to", cx, cy, x, y] | ["bezier_to", c1x, c1y, c2x, c2y, x, y], ...]"#;

    fn parse(raw: &Value) -> Result<Self, InvalidData> {
        let cmds = items(raw).ok_or_else(|| invalid::<Self>(raw, "not a list of commands"))?;
        cmds.iter()
            .enumerate()
            .map(|(i, c)| {
                PathCmd::parse(c).ok_or_else(|| invalid::<Self>(raw, format!("command {i} is malformed: {c}")))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|cmds| Path { cmds })
    }

    fn to_value(&self) -> Value {
        Value::Array(self.cmds.iter().map(|c| c.to_value()).collect())
    }

    fn validate(&self) -> Result<(), InvalidData> {
        if self.cmds.iter().all(|c| c.is_finite()) {
            Ok(())
        } else {
            Err(self.reject("coordinates must be finite"))
        }
    }

    fn valid_styles() -> StyleSet {
        StyleSet::Only(PATH_STYLES)
    }

    /// Even-odd fill test over every subpath; open subpaths are closed implicitly.
    fn contains_point(&self, p: Vec2) -> bool {
        self.subpaths().iter().filter(|poly| contain::polygon(poly, p)).count() % 2 == 1
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_all_commands() {
        let raw = json!([
            "begin",
            ["move_to", 0, 0],
            ["line_to", 10, 0],
            ["quadratic_to", 15, 5, 10, 10],
            ["bezier_to", 8, 12, 2, 12, 0, 10],
            "close"
        ]);
        let path = Path::from_value(&raw).unwrap();
        assert_eq!(path.cmds.len(), 6);
        assert_eq!(Path::normalize(&path.to_value()).unwrap(), path.to_value());
    }

    #[test]
    fn malformed_command_reports_index() {
        let err = Path::verify(&json!([["move_to", 0], "close"])).unwrap_err();
        assert!(err.reason.contains("command 0"), "{}", err.reason);
        assert!(Path::verify(&json!(["fly_to"])).is_err());
    }

    #[test]
    fn hole_via_even_odd() {
        let ring = Path::new()
            .move_to(0.0, 0.0).line_to(20.0, 0.0).line_to(20.0, 20.0).line_to(0.0, 20.0).close()
            .move_to(5.0, 5.0).line_to(15.0, 5.0).line_to(15.0, 15.0).line_to(5.0, 15.0).close();
        assert!(ring.contains_point(Vec2::new(2.0, 2.0)));
        assert!(!ring.contains_point(Vec2::new(10.0, 10.0)));
        assert!(!ring.contains_point(Vec2::new(25.0, 10.0)));
    }

    #[test]
    fn begin_keeps_the_pending_subpath() {
        let two = Path::new()
            .move_to(0.0, 0.0).line_to(10.0, 0.0).line_to(10.0, 10.0).line_to(0.0, 10.0)
            .begin()
            .move_to(20.0, 0.0).line_to(30.0, 0.0).line_to(30.0, 10.0).close();
        assert_eq!(two.subpaths().len(), 2);
        assert!(two.contains_point(Vec2::new(2.0, 8.0)));
        assert!(two.contains_point(Vec2::new(28.0, 2.0)));
    }

    #[test]
    fn curve_is_flattened() {
        let bump = Path::new().move_to(0.0, 0.0).quadratic_to(10.0, 20.0, 20.0, 0.0).close();
        assert!(bump.contains_point(Vec2::new(10.0, 8.0)));
        assert!(!bump.contains_point(Vec2::new(10.0, 12.0)));
    }
}
