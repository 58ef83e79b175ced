//! Piecewise-constant lookup table.
//!
//! The penalty map is stored as ordered `(x, y)` break points. A lookup
//! returns the value of the last break point at or before the query.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::SntError;

/// Step function defined by ordered break points.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepFunction<T> {
    /// Break point positions, strictly increasing.
    pub x: Vec<T>,

    /// Values in `[0, 1]`, one per break point.
    pub y: Vec<T>,
}

impl<T: Float> StepFunction<T> {
    /// Create a step function from break points.
    pub fn new(x: Vec<T>, y: Vec<T>) -> Self {
        debug_assert_eq!(x.len(), y.len());
        Self { x, y }
    }

    /// Step function that is zero at every given position.
    pub fn zeros(x: Vec<T>) -> Self {
        let y = vec![T::zero(); x.len()];
        Self { x, y }
    }

    /// Number of break points.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether there are no break points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Value at or before `x` (binary search).
    pub fn lookup(&self, x: T) -> Result<T, SntError> {
        // Number of break points <= x
        let pos = self.x.partition_point(|&bp| bp <= x);
        if pos == 0 {
            return Err(SntError::OutOfRange {
                x: x.to_f64().unwrap_or(f64::NAN),
                start: self
                    .x
                    .first()
                    .and_then(|s| s.to_f64())
                    .unwrap_or(f64::NAN),
            });
        }
        Ok(self.y[pos - 1])
    }
}
