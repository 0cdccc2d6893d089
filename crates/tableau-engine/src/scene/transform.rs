use serde::{Deserialize, Serialize};

use crate::coords::{Matrix, Vec2};

use super::SceneError;

/// Explicit transforms of one primitive, keyed by kind.
///
/// The local matrix is either `matrix` verbatim or, when absent,
/// `translate · pin · rotate · scale · pin⁻¹` (rotation and scale happen
/// around `pin`, then the result is translated).
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transforms {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translate: Option<Vec2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Vec2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<Vec2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix: Option<Matrix>,
}

impl Transforms {
    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Field-wise merge; fields set in `overrides` win.
    pub fn merged(self, overrides: Transforms) -> Transforms {
        Transforms {
            translate: overrides.translate.or(self.translate),
            rotate: overrides.rotate.or(self.rotate),
            scale: overrides.scale.or(self.scale),
            pin: overrides.pin.or(self.pin),
            matrix: overrides.matrix.or(self.matrix),
        }
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        let finite = self.translate.is_none_or(Vec2::is_finite)
            && self.rotate.is_none_or(f64::is_finite)
            && self.scale.is_none_or(Vec2::is_finite)
            && self.pin.is_none_or(Vec2::is_finite)
            && self.matrix.is_none_or(Matrix::is_finite);
        if finite {
            Ok(())
        } else {
            Err(SceneError::InvalidTransform(format!("non-finite component in {self:?}")))
        }
    }

    /// Matrix mapping this primitive's local space into its parent's space.
    pub fn local_matrix(&self) -> Matrix {
        if let Some(m) = self.matrix {
            return m;
        }
        if self.is_empty() {
            return Matrix::IDENTITY;
        }
        let pin = self.pin.unwrap_or_default();
        let mut m = Matrix::translate(self.translate.unwrap_or_default()) * Matrix::translate(pin);
        if let Some(theta) = self.rotate {
            m = m * Matrix::rotate(theta);
        }
        if let Some(s) = self.scale {
            m = m * Matrix::scale(s);
        }
        m * Matrix::translate(-pin)
    }
}

/// Accumulated transform during a depth-first walk.
///
/// `push` composes the node's local matrix onto the current top before
/// descending; `pop` restores the parent's on return. The top is always the
/// full ancestor product.
#[derive(Debug, Clone)]
pub struct TransformStack {
    stack: Vec<Matrix>,
}

impl TransformStack {
    #[inline]
    pub fn new(base: Matrix) -> Self {
        Self { stack: vec![base] }
    }

    #[inline]
    pub fn current(&self) -> Matrix {
        self.stack.last().copied().unwrap_or_default()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Pushes `current * local` and returns it.
    #[inline]
    pub fn push(&mut self, local: Matrix) -> Matrix {
        let m = self.current() * local;
        self.stack.push(m);
        m
    }

    /// # Panics
    /// Panics (debug only) when popping the base matrix.
    #[inline]
    pub fn pop(&mut self) {
        debug_assert!(self.stack.len() > 1, "TransformStack::pop without matching push");
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new(Matrix::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::FRAC_PI_2;

    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn empty_is_identity() {
        assert_eq!(Transforms::default().local_matrix(), Matrix::IDENTITY);
    }

    #[test]
    fn rotate_around_pin_then_translate() {
        let t = Transforms {
            translate: Some(Vec2::new(100.0, 0.0)),
            rotate: Some(FRAC_PI_2),
            pin: Some(Vec2::new(10.0, 10.0)),
            ..Transforms::default()
        };
        let m = t.local_matrix();
        // the pin is a fixed point of the rotation
        assert!(close(m.apply(Vec2::new(10.0, 10.0)), Vec2::new(110.0, 10.0)));
        assert!(close(m.apply(Vec2::new(20.0, 10.0)), Vec2::new(110.0, 20.0)));
    }

    #[test]
    fn explicit_matrix_wins() {
        let t = Transforms {
            translate: Some(Vec2::new(5.0, 5.0)),
            matrix: Some(Matrix::scale(Vec2::new(2.0, 2.0))),
            ..Transforms::default()
        };
        assert_eq!(t.local_matrix(), Matrix::scale(Vec2::new(2.0, 2.0)));
    }

    #[test]
    fn merged_keeps_unset_fields() {
        let a = Transforms { translate: Some(Vec2::new(1.0, 1.0)), rotate: Some(0.5), ..Default::default() };
        let b = Transforms { rotate: Some(1.0), ..Default::default() };
        let m = a.merged(b);
        assert_eq!(m.translate, Some(Vec2::new(1.0, 1.0)));
        assert_eq!(m.rotate, Some(1.0));
    }

    #[test]
    fn non_finite_rejected() {
        let t = Transforms { rotate: Some(f64::NAN), ..Default::default() };
        assert!(t.validate().is_err());
    }

    #[test]
    fn stack_accumulates_and_restores() {
        let mut stack = TransformStack::default();
        stack.push(Matrix::translate(Vec2::new(10.0, 0.0)));
        let m = stack.push(Matrix::scale(Vec2::new(2.0, 2.0)));
        assert_eq!(m.apply(Vec2::new(1.0, 1.0)), Vec2::new(12.0, 2.0));
        assert_eq!(stack.depth(), 2);
        stack.pop();
        assert_eq!(stack.current().apply(Vec2::new(1.0, 1.0)), Vec2::new(11.0, 1.0));
    }
}
