//! Point-containment predicates for primitive geometry.
//!
//! Every predicate takes the point in the shape's local coordinate space.
//! Boundaries count as inside.

use core::f64::consts::TAU;

use super::{CornerRadii, Rect, Vec2};

#[inline]
pub fn circle(center: Vec2, radius: f64, p: Vec2) -> bool {
    (p - center).length_squared() <= radius * radius
}

pub fn ellipse(center: Vec2, rx: f64, ry: f64, p: Vec2) -> bool {
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let d = p - center;
    (d.x / rx).powi(2) + (d.y / ry).powi(2) <= 1.0
}

#[inline]
pub fn rect(r: Rect, p: Vec2) -> bool {
    r.contains(p)
}

/// Rectangle test with circular corner cut-outs.
pub fn rounded_rect(r: Rect, radii: CornerRadii, p: Vec2) -> bool {
    let r = r.normalized();
    if !r.contains(p) {
        return false;
    }
    let radii = radii.clamped(r.size.x.min(r.size.y) * 0.5);
    let (lo, hi) = (r.min(), r.max());

    let corners = [
        (radii.top_left, Vec2::new(lo.x + radii.top_left, lo.y + radii.top_left)),
        (radii.top_right, Vec2::new(hi.x - radii.top_right, lo.y + radii.top_right)),
        (radii.bottom_right, Vec2::new(hi.x - radii.bottom_right, hi.y - radii.bottom_right)),
        (radii.bottom_left, Vec2::new(lo.x + radii.bottom_left, hi.y - radii.bottom_left)),
    ];

    for (i, (radius, c)) in corners.into_iter().enumerate() {
        if radius <= 0.0 {
            continue;
        }
        let in_corner_box = match i {
            0 => p.x < c.x && p.y < c.y,
            1 => p.x > c.x && p.y < c.y,
            2 => p.x > c.x && p.y > c.y,
            _ => p.x < c.x && p.y > c.y,
        };
        if in_corner_box {
            return circle(c, radius, p);
        }
    }
    true
}

/// Sign-of-cross-product test. Works for either winding; degenerate
/// triangles only contain points on their collapsed segment.
pub fn triangle(a: Vec2, b: Vec2, c: Vec2, p: Vec2) -> bool {
    let d1 = (b - a).cross(p - a);
    let d2 = (c - b).cross(p - b);
    let d3 = (a - c).cross(p - c);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Pie slice centered on the origin.
///
/// The angular span runs from `start` to `finish`; a reversed span
/// (`finish < start`) describes the same slice. Spans of a full turn or
/// more cover the whole disc.
pub fn sector(radius: f64, start: f64, finish: f64, p: Vec2) -> bool {
    if p.length_squared() > radius * radius {
        return false;
    }
    let (lo, hi) = if finish < start { (finish, start) } else { (start, finish) };
    let span = hi - lo;
    if span >= TAU || p.length_squared() == 0.0 {
        return true;
    }
    let rel = (p.y.atan2(p.x) - lo).rem_euclid(TAU);
    rel <= span
}

/// Curved band of a pie slice: inside the sector but outside the chord
/// triangle formed by the origin and the two radius endpoints.
pub fn arc(radius: f64, start: f64, finish: f64, p: Vec2) -> bool {
    if !sector(radius, start, finish, p) {
        return false;
    }
    let p1 = Vec2::polar(radius, start);
    let p2 = Vec2::polar(radius, finish);
    !triangle(Vec2::zero(), p1, p2, p)
}

/// Even-odd ray cast. Polygons with fewer than three vertices contain nothing.
pub fn polygon(points: &[Vec2], p: Vec2) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Shortest distance from `p` to the segment `a..b`.
pub fn segment_distance(a: Vec2, b: Vec2, p: Vec2) -> f64 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 == 0.0 {
        return (p - a).length();
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).length()
}

#[inline]
pub fn segment(a: Vec2, b: Vec2, tolerance: f64, p: Vec2) -> bool {
    segment_distance(a, b, p) <= tolerance
}

#[cfg(test)]
mod tests {
    use core::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    use super::*;

    fn v(x: f64, y: f64) -> Vec2 { Vec2::new(x, y) }

    // ── circle / ellipse ──────────────────────────────────────────────────

    #[test]
    fn circle_boundary_is_inside() {
        assert!(circle(v(0.0, 0.0), 5.0, v(5.0, 0.0)));
        assert!(!circle(v(0.0, 0.0), 5.0, v(4.0, 4.0)));
    }

    #[test]
    fn ellipse_uses_both_radii() {
        assert!(ellipse(v(0.0, 0.0), 10.0, 2.0, v(9.0, 0.0)));
        assert!(!ellipse(v(0.0, 0.0), 10.0, 2.0, v(0.0, 3.0)));
        assert!(!ellipse(v(0.0, 0.0), 0.0, 2.0, v(0.0, 0.0)));
    }

    // ── rounded rect ──────────────────────────────────────────────────────

    #[test]
    fn rounded_rect_cuts_corners() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0);
        let radii = CornerRadii::all(10.0);
        assert!(rounded_rect(r, radii, v(50.0, 25.0)));
        assert!(rounded_rect(r, radii, v(5.0, 25.0)));
        assert!(!rounded_rect(r, radii, v(0.5, 0.5)));
        assert!(!rounded_rect(r, radii, v(99.5, 49.5)));
        assert!(rounded_rect(r, CornerRadii::zero(), v(0.5, 0.5)));
    }

    // ── triangle ──────────────────────────────────────────────────────────

    #[test]
    fn triangle_either_winding() {
        let (a, b, c) = (v(0.0, 0.0), v(10.0, 0.0), v(0.0, 10.0));
        assert!(triangle(a, b, c, v(2.0, 2.0)));
        assert!(triangle(a, c, b, v(2.0, 2.0)));
        assert!(!triangle(a, b, c, v(7.0, 7.0)));
    }

    // ── sector / arc ──────────────────────────────────────────────────────

    #[test]
    fn sector_checks_radius_and_span() {
        assert!(sector(10.0, 0.0, FRAC_PI_2, v(3.0, 3.0)));
        assert!(!sector(10.0, 0.0, FRAC_PI_2, v(-3.0, 3.0)));
        assert!(!sector(10.0, 0.0, FRAC_PI_2, v(8.0, 8.0)));
    }

    #[test]
    fn sector_reversed_span_is_same_slice() {
        assert!(sector(10.0, FRAC_PI_2, 0.0, v(3.0, 3.0)));
        assert!(!sector(10.0, FRAC_PI_2, 0.0, v(3.0, -3.0)));
    }

    #[test]
    fn sector_span_crossing_zero() {
        // -45° .. 45°
        assert!(sector(10.0, -FRAC_PI_4, FRAC_PI_4, v(5.0, -1.0)));
        assert!(!sector(10.0, -FRAC_PI_4, FRAC_PI_4, v(-5.0, 0.0)));
    }

    #[test]
    fn sector_full_turn_is_disc() {
        assert!(sector(10.0, 0.0, 2.0 * PI, v(-5.0, -5.0)));
    }

    #[test]
    fn arc_hits_only_curved_band() {
        // inside the chord triangle (0,0)-(10,0)-(0,10)
        assert!(!arc(10.0, 0.0, FRAC_PI_2, v(3.0, 3.0)));
        // between the chord and the circle
        assert!(arc(10.0, 0.0, FRAC_PI_2, v(7.0, 7.0)));
        // just outside the radius along the 45° ray
        let outside = Vec2::polar(10.0, FRAC_PI_4) * 1.01;
        assert!(!arc(10.0, 0.0, FRAC_PI_2, outside));
        // just inside the radius along the 45° ray
        let inside = Vec2::polar(10.0, FRAC_PI_4) * 0.99;
        assert!(arc(10.0, 0.0, FRAC_PI_2, inside));
    }

    // ── polygon / segment ─────────────────────────────────────────────────

    #[test]
    fn polygon_concave() {
        // "L" shape
        let pts = [v(0.0, 0.0), v(10.0, 0.0), v(10.0, 4.0), v(4.0, 4.0), v(4.0, 10.0), v(0.0, 10.0)];
        assert!(polygon(&pts, v(2.0, 8.0)));
        assert!(polygon(&pts, v(8.0, 2.0)));
        assert!(!polygon(&pts, v(8.0, 8.0)));
        assert!(!polygon(&pts[..2], v(1.0, 0.0)));
    }

    #[test]
    fn segment_tolerance() {
        assert!(segment(v(0.0, 0.0), v(10.0, 0.0), 1.0, v(5.0, 0.8)));
        assert!(!segment(v(0.0, 0.0), v(10.0, 0.0), 1.0, v(5.0, 1.2)));
        assert!(!segment(v(0.0, 0.0), v(10.0, 0.0), 1.0, v(12.0, 0.0)));
        assert_eq!(segment_distance(v(0.0, 0.0), v(0.0, 0.0), v(3.0, 4.0)), 5.0);
    }
}
