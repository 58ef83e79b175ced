//! Interpolation through anchor points.
//!
//! ## Purpose
//!
//! This module turns an ordered set of points into a continuous function.
//! It is used for the rolling-maximum envelopes of the penalty map and for
//! the final continuum through the surviving anchors.
//!
//! ## Design notes
//!
//! * **Bounds-checked**: Evaluating outside `[x_first, x_last]` returns NaN;
//!   nothing is extrapolated.
//! * **Linear**: `y = y_0 + (x - x_0) · slope` on the enclosing segment.
//! * **Cubic**: Not-a-knot spline. Two points reduce to a line, three to the
//!   parabola through them.
//! * **Single anchor**: The continuum is the constant anchor value.
//!
//! ## Invariants
//!
//! * Knots are strictly increasing and finite.
//! * Interpolants reproduce their knot values exactly.
//!
//! ## Non-goals
//!
//! * This module does not sort or deduplicate knots.

// External dependencies
use core::fmt::{Display, Formatter};
use core::str::FromStr;
use num_traits::Float;

// Internal dependencies
use crate::math::lit;
use crate::primitives::anchors::{unzip, Anchor};
use crate::primitives::errors::SntError;

// ============================================================================
// Interpolation Kind
// ============================================================================

/// Shape of the continuum between anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationKind {
    /// Piecewise-linear.
    #[default]
    Linear,

    /// Not-a-knot cubic spline.
    Cubic,
}

impl InterpolationKind {
    /// Configuration name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Cubic => "cubic",
        }
    }
}

impl FromStr for InterpolationKind {
    type Err = SntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Self::Linear),
            "cubic" => Ok(Self::Cubic),
            other => Err(SntError::UnsupportedInterpolation(other.to_string())),
        }
    }
}

impl Display for InterpolationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Knot Validation
// ============================================================================

fn check_knots<T: Float>(x: &[T], y: &[T]) -> Result<(), SntError> {
    if x.is_empty() {
        return Err(SntError::EmptyInput);
    }
    if x.len() != y.len() {
        return Err(SntError::MismatchedInputs {
            wavelength_len: x.len(),
            flux_len: y.len(),
        });
    }
    if let Some(i) = x.windows(2).position(|w| !(w[0] < w[1])) {
        return Err(SntError::InvalidInput(format!(
            "interpolation knots must be strictly increasing (at index {})",
            i + 1
        )));
    }
    Ok(())
}

// Index of the segment containing `x`, or `None` outside the knot range.
#[inline]
fn segment<T: Float>(knots: &[T], x: T) -> Option<usize> {
    let n = knots.len();
    if x.is_nan() || x < knots[0] || x > knots[n - 1] {
        return None;
    }
    let pos = knots.partition_point(|&k| k <= x);
    Some(pos.saturating_sub(1).min(n.saturating_sub(2)))
}

// ============================================================================
// Linear Interpolation
// ============================================================================

/// Piecewise-linear interpolant.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearInterpolant<T> {
    x: Vec<T>,
    y: Vec<T>,
}

impl<T: Float> LinearInterpolant<T> {
    /// Build from strictly increasing knots.
    pub fn new(x: Vec<T>, y: Vec<T>) -> Result<Self, SntError> {
        check_knots(&x, &y)?;
        Ok(Self { x, y })
    }

    /// Knot positions.
    pub fn x(&self) -> &[T] {
        &self.x
    }

    /// Knot values.
    pub fn y(&self) -> &[T] {
        &self.y
    }

    /// Evaluate at `x`; NaN outside the knot range.
    pub fn eval(&self, x: T) -> T {
        if self.x.len() == 1 {
            return if x == self.x[0] { self.y[0] } else { T::nan() };
        }
        let Some(i) = segment(&self.x, x) else {
            return T::nan();
        };

        let (x0, x1) = (self.x[i], self.x[i + 1]);
        let (y0, y1) = (self.y[i], self.y[i + 1]);
        if x == x1 {
            return y1;
        }
        y0 + (x - x0) * (y1 - y0) / (x1 - x0)
    }
}

// ============================================================================
// Cubic Spline
// ============================================================================

/// Not-a-knot cubic spline.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline<T> {
    x: Vec<T>,
    y: Vec<T>,
    /// Second derivatives at the knots.
    m: Vec<T>,
}

impl<T: Float> CubicSpline<T> {
    /// Build from at least two strictly increasing knots.
    pub fn new(x: Vec<T>, y: Vec<T>) -> Result<Self, SntError> {
        check_knots(&x, &y)?;
        let n = x.len();
        if n < 2 {
            return Err(SntError::TooFewPoints { got: n, min: 2 });
        }

        let m = match n {
            2 => vec![T::zero(); 2],
            3 => {
                // Parabola: constant second derivative
                let h0 = x[1] - x[0];
                let h1 = x[2] - x[1];
                let dd = ((y[2] - y[1]) / h1 - (y[1] - y[0]) / h0) / (h0 + h1);
                vec![lit::<T>(2.0) * dd; 3]
            }
            _ => not_a_knot_moments(&x, &y)?,
        };

        Ok(Self { x, y, m })
    }

    /// Evaluate at `x`; NaN outside the knot range.
    pub fn eval(&self, x: T) -> T {
        let Some(i) = segment(&self.x, x) else {
            return T::nan();
        };

        let six = lit::<T>(6.0);
        let h = self.x[i + 1] - self.x[i];
        let a = self.x[i + 1] - x;
        let b = x - self.x[i];
        let (m0, m1) = (self.m[i], self.m[i + 1]);

        m0 * a * a * a / (six * h)
            + m1 * b * b * b / (six * h)
            + (self.y[i] / h - m0 * h / six) * a
            + (self.y[i + 1] / h - m1 * h / six) * b
    }
}

// Second derivatives for n >= 4 knots under not-a-knot end conditions.
//
// The end conditions (continuous third derivative at x[1] and x[n-2]) are
// substituted into the first and last interior equations, which keeps the
// system tridiagonal in M[1..n-1].
fn not_a_knot_moments<T: Float>(x: &[T], y: &[T]) -> Result<Vec<T>, SntError> {
    let n = x.len();
    let k = n - 2;
    let two = lit::<T>(2.0);
    let six = lit::<T>(6.0);

    let h: Vec<T> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let s: Vec<T> = (0..n - 1).map(|i| (y[i + 1] - y[i]) / h[i]).collect();

    let mut sub = vec![T::zero(); k];
    let mut diag = vec![T::zero(); k];
    let mut sup = vec![T::zero(); k];
    let mut rhs = vec![T::zero(); k];

    for r in 0..k {
        let i = r + 1;
        sub[r] = h[i - 1];
        diag[r] = two * (h[i - 1] + h[i]);
        sup[r] = h[i];
        rhs[r] = six * (s[i] - s[i - 1]);
    }

    // Left end: M0 = M1 (1 + h0/h1) - (h0/h1) M2
    let (h0, h1) = (h[0], h[1]);
    diag[0] = (h0 + h1) * (h0 + two * h1) / h1;
    sup[0] = (h1 * h1 - h0 * h0) / h1;

    // Right end: M[n-1] = M[n-2] (1 + b/a) - (b/a) M[n-3]
    let (a, b) = (h[n - 3], h[n - 2]);
    diag[k - 1] = (two * a + b) * (a + b) / a;
    sub[k - 1] = (a * a - b * b) / a;

    let inner = solve_tridiagonal(&sub, &diag, &sup, &rhs)?;

    let mut m = Vec::with_capacity(n);
    m.push(inner[0] * (T::one() + h0 / h1) - (h0 / h1) * inner[1]);
    m.extend_from_slice(&inner);
    m.push(inner[k - 1] * (T::one() + b / a) - (b / a) * inner[k - 2]);

    Ok(m)
}

// Thomas algorithm.
fn solve_tridiagonal<T: Float>(sub: &[T], diag: &[T], sup: &[T], rhs: &[T]) -> Result<Vec<T>, SntError> {
    let k = diag.len();
    let mut c = vec![T::zero(); k];
    let mut d = vec![T::zero(); k];

    let singular = || SntError::DegenerateInput("singular spline system".into());

    if diag[0] == T::zero() {
        return Err(singular());
    }
    c[0] = sup[0] / diag[0];
    d[0] = rhs[0] / diag[0];
    for r in 1..k {
        let pivot = diag[r] - sub[r] * c[r - 1];
        if pivot == T::zero() || !pivot.is_finite() {
            return Err(singular());
        }
        c[r] = sup[r] / pivot;
        d[r] = (rhs[r] - sub[r] * d[r - 1]) / pivot;
    }

    let mut out = d;
    for r in (0..k - 1).rev() {
        out[r] = out[r] - c[r] * out[r + 1];
    }
    Ok(out)
}

// ============================================================================
// Continuum Function
// ============================================================================

/// Continuous function through the final anchors.
#[derive(Debug, Clone, PartialEq)]
pub enum Continuum<T> {
    /// Exactly one anchor: constant value.
    Constant(T),

    /// Piecewise-linear through the anchors.
    Linear(LinearInterpolant<T>),

    /// Not-a-knot cubic spline through the anchors.
    Cubic(CubicSpline<T>),
}

impl<T: Float> Continuum<T> {
    /// Build the continuum of the requested kind through `anchors`.
    pub fn build(anchors: &[Anchor<T>], kind: InterpolationKind) -> Result<Self, SntError> {
        match anchors {
            [] => Err(SntError::DegenerateInput(
                "cannot interpolate without anchors".into(),
            )),
            [only] => Ok(Self::Constant(only.y)),
            _ => {
                let (x, y) = unzip(anchors);
                match kind {
                    InterpolationKind::Linear => Ok(Self::Linear(LinearInterpolant::new(x, y)?)),
                    InterpolationKind::Cubic => Ok(Self::Cubic(CubicSpline::new(x, y)?)),
                }
            }
        }
    }

    /// Evaluate at one wavelength.
    pub fn eval(&self, x: T) -> T {
        match self {
            Self::Constant(y) => {
                if x.is_nan() {
                    T::nan()
                } else {
                    *y
                }
            }
            Self::Linear(f) => f.eval(x),
            Self::Cubic(f) => f.eval(x),
        }
    }

    /// Evaluate at every wavelength.
    pub fn eval_many(&self, xs: &[T]) -> Vec<T> {
        xs.iter().map(|&x| self.eval(x)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linear_is_bounds_checked() {
        let f = LinearInterpolant::new(vec![1.0f64, 2.0, 4.0], vec![0.0, 2.0, 6.0]).unwrap();
        assert_relative_eq!(f.eval(1.5), 1.0);
        assert_relative_eq!(f.eval(3.0), 4.0);
        assert_relative_eq!(f.eval(4.0), 6.0);
        assert!(f.eval(0.9).is_nan());
        assert!(f.eval(4.1).is_nan());
    }

    #[test]
    fn cubic_reproduces_cubic_polynomials() {
        let poly = |x: f64| 0.3 * x * x * x - 2.0 * x * x + x - 4.0;
        let x = vec![0.0f64, 0.7, 1.5, 2.0, 3.2, 4.0, 5.5];
        let y: Vec<f64> = x.iter().map(|&v| poly(v)).collect();
        let s = CubicSpline::new(x, y).unwrap();
        for t in [0.1, 1.0, 2.5, 3.9, 5.4] {
            assert_relative_eq!(s.eval(t), poly(t), epsilon = 1e-9);
        }
        assert!(s.eval(-0.01).is_nan());
    }

    #[test]
    fn cubic_with_three_knots_is_a_parabola() {
        let s = CubicSpline::new(vec![0.0f64, 1.0, 3.0], vec![0.0, 1.0, 9.0]).unwrap();
        assert_relative_eq!(s.eval(2.0), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert_eq!(
            "quadratic".parse::<InterpolationKind>(),
            Err(SntError::UnsupportedInterpolation("quadratic".into()))
        );
        assert_eq!("cubic".parse(), Ok(InterpolationKind::Cubic));
    }

    #[test]
    fn single_anchor_is_constant() {
        let c = Continuum::build(&[Anchor::new(3.0f64, 2.5, 3)], InterpolationKind::Cubic).unwrap();
        assert_eq!(c.eval_many(&[0.0, 3.0, 10.0]), vec![2.5, 2.5, 2.5]);
    }
}
