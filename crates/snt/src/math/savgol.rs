//! Savitzky-Golay polynomial smoothing.
//!
//! ## Purpose
//!
//! Reduces point-to-point noise before peak detection by replacing every
//! sample with the value of a least-squares polynomial fitted to its window.
//!
//! ## Design notes
//!
//! * **Hat matrix**: Row `k` of `V (VᵀV)⁻¹ Vᵀ` holds the weights that evaluate
//!   the fitted polynomial at window position `k`.
//! * **Edges**: The first and last `window / 2` samples use the polynomial
//!   fitted to the first or last full window, evaluated at their own offsets.
//! * **Conditioning**: Window positions are scaled to `[-1, 1]`.
//!
//! ## Invariants
//!
//! * `window` is odd and greater than `order`.
//! * Output length equals input length.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::SntError;

/// Window length used by the pre-filter.
pub const WINDOW: usize = 11;

/// Polynomial order used by the pre-filter.
pub const ORDER: usize = 3;

/// Least-squares smoothing weights for every position of a window.
pub fn hat_matrix<T: Float>(window: usize, order: usize) -> Result<Vec<Vec<T>>, SntError> {
    if window % 2 == 0 || order >= window {
        return Err(SntError::InvalidInput(format!(
            "savgol window {window} must be odd and larger than order {order}"
        )));
    }

    let half = window / 2;
    let scale = T::from(half.max(1)).unwrap_or(T::one());
    let cols = order + 1;

    // Vandermonde matrix on scaled positions
    let v: Vec<Vec<T>> = (0..window)
        .map(|j| {
            let t = (T::from(j).unwrap_or(T::zero()) - T::from(half).unwrap_or(T::zero())) / scale;
            let mut row = Vec::with_capacity(cols);
            let mut p = T::one();
            for _ in 0..cols {
                row.push(p);
                p = p * t;
            }
            row
        })
        .collect();

    // Normal matrix VᵀV
    let mut normal = vec![vec![T::zero(); cols]; cols];
    for (a, row_a) in normal.iter_mut().enumerate() {
        for (b, cell) in row_a.iter_mut().enumerate() {
            *cell = v.iter().fold(T::zero(), |acc, row| acc + row[a] * row[b]);
        }
    }
    let inv = invert(normal)?;

    // H = V inv Vᵀ
    let mut hat = vec![vec![T::zero(); window]; window];
    for k in 0..window {
        // w = V[k] · inv
        let w: Vec<T> = (0..cols)
            .map(|b| (0..cols).fold(T::zero(), |acc, a| acc + v[k][a] * inv[a][b]))
            .collect();
        for j in 0..window {
            hat[k][j] = (0..cols).fold(T::zero(), |acc, b| acc + w[b] * v[j][b]);
        }
    }

    Ok(hat)
}

/// Smooth `values` with a Savitzky-Golay filter.
pub fn savgol_filter<T: Float>(values: &[T], window: usize, order: usize) -> Result<Vec<T>, SntError> {
    let n = values.len();
    if n < window {
        return Err(SntError::TooFewPoints { got: n, min: window });
    }

    let hat = hat_matrix::<T>(window, order)?;
    let half = window / 2;
    let apply = |row: &[T], start: usize| {
        row.iter()
            .zip(&values[start..start + window])
            .fold(T::zero(), |acc, (&w, &y)| acc + w * y)
    };

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let value = if i < half {
            apply(hat[i].as_slice(), 0)
        } else if i >= n - half {
            apply(hat[i - (n - window)].as_slice(), n - window)
        } else {
            apply(hat[half].as_slice(), i - half)
        };
        out.push(value);
    }

    Ok(out)
}

// Gauss-Jordan inversion with partial pivoting.
fn invert<T: Float>(mut a: Vec<Vec<T>>) -> Result<Vec<Vec<T>>, SntError> {
    let n = a.len();
    let mut inv: Vec<Vec<T>> = (0..n)
        .map(|i| (0..n).map(|j| if i == j { T::one() } else { T::zero() }).collect())
        .collect();

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| {
                a[i][col]
                    .abs()
                    .partial_cmp(&a[j][col].abs())
                    .unwrap_or(core::cmp::Ordering::Equal)
            })
            .unwrap_or(col);
        if a[pivot][col].abs() <= T::epsilon() {
            return Err(SntError::DegenerateInput(
                "singular normal matrix in smoothing filter".into(),
            ));
        }
        a.swap(col, pivot);
        inv.swap(col, pivot);

        let d = a[col][col];
        for j in 0..n {
            a[col][j] = a[col][j] / d;
            inv[col][j] = inv[col][j] / d;
        }
        for i in 0..n {
            if i == col {
                continue;
            }
            let f = a[i][col];
            if f == T::zero() {
                continue;
            }
            for j in 0..n {
                a[i][j] = a[i][j] - f * a[col][j];
                inv[i][j] = inv[i][j] - f * inv[col][j];
            }
        }
    }

    Ok(inv)
}
