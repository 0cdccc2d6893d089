use serde::{Deserialize, Serialize};

/// Per-corner radii for a rounded rectangle.
///
/// Corners follow CSS convention: top-left, top-right, bottom-right, bottom-left.
/// Serializes as `[tl, tr, br, bl]`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct CornerRadii {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

impl CornerRadii {
    #[inline]
    pub const fn new(top_left: f64, top_right: f64, bottom_right: f64, bottom_left: f64) -> Self {
        Self { top_left, top_right, bottom_right, bottom_left }
    }

    /// Uniform radius on all four corners.
    #[inline]
    pub const fn all(r: f64) -> Self {
        Self { top_left: r, top_right: r, bottom_right: r, bottom_left: r }
    }

    /// No rounding.
    #[inline]
    pub const fn zero() -> Self {
        Self::all(0.0)
    }

    #[inline]
    pub fn as_array(self) -> [f64; 4] {
        [self.top_left, self.top_right, self.bottom_right, self.bottom_left]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.as_array().iter().all(|r| r.is_finite())
    }

    /// Clamps every radius to `[0, max]`.
    #[inline]
    pub fn clamped(self, max: f64) -> Self {
        let [tl, tr, br, bl] = self.as_array().map(|r| r.clamp(0.0, max.max(0.0)));
        Self::new(tl, tr, br, bl)
    }
}

impl From<[f64; 4]> for CornerRadii {
    #[inline]
    fn from([tl, tr, br, bl]: [f64; 4]) -> Self {
        CornerRadii::new(tl, tr, br, bl)
    }
}

impl From<CornerRadii> for [f64; 4] {
    #[inline]
    fn from(r: CornerRadii) -> Self {
        r.as_array()
    }
}
