//! Finite differences of tabulated samples.

use serde::Serialize;

use crate::differentiation::{check_step, DifferenceFormulas};
use crate::error::{MathError, MathResult};

/// Derivative estimates at one sample point.
///
/// An estimate is `None` when the neighbour it needs does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointDifferences {
    /// Sample abscissa.
    pub x: f64,
    /// (y[i+1] - y[i]) / h, if a next point exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward: Option<f64>,
    /// (y[i] - y[i-1]) / h, if a previous point exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backward: Option<f64>,
    /// (y[i+1] - y[i-1]) / (2h), if both neighbours exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub central: Option<f64>,
}

/// Estimates for every sample point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleDifferences {
    /// Step size used.
    pub h: f64,
    /// One entry per sample, in input order.
    pub results: Vec<PointDifferences>,
    /// The difference formulas.
    pub formulas: DifferenceFormulas,
}

/// Computes forward, backward and central differences at every sample.
///
/// `h` defaults to `x_values[1] - x_values[0]`, or 1.0 with fewer than two
/// points. The abscissae are only used for `h` and for labelling; the
/// samples are assumed equally spaced.
///
/// # Errors
///
/// - `LengthMismatch` when the arrays differ in length
/// - `InvalidInput` when the step size is zero or not finite
///
/// # Example
///
/// ```rust
/// use numerik_math::differentiation::sample_differences;
///
/// let d = sample_differences(&[0.0, 1.0, 2.0], &[0.0, 1.0, 4.0], None).unwrap();
///
/// assert_eq!(d.results[0].backward, None);
/// assert_eq!(d.results[1].central, Some(2.0));
/// ```
pub fn sample_differences(
    x_values: &[f64],
    y_values: &[f64],
    h: Option<f64>,
) -> MathResult<SampleDifferences> {
    if x_values.len() != y_values.len() {
        return Err(MathError::length_mismatch(x_values.len(), y_values.len()));
    }

    let h = h.unwrap_or_else(|| match x_values {
        [x0, x1, ..] => x1 - x0,
        _ => 1.0,
    });
    check_step(h)?;

    let n = y_values.len();
    let results = x_values
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let next = (i + 1 < n).then(|| y_values[i + 1]);
            let prev = (i > 0).then(|| y_values[i - 1]);
            PointDifferences {
                x,
                forward: next.map(|y_next| (y_next - y_values[i]) / h),
                backward: prev.map(|y_prev| (y_values[i] - y_prev) / h),
                central: next
                    .zip(prev)
                    .map(|(y_next, y_prev)| (y_next - y_prev) / (2.0 * h)),
            }
        })
        .collect();

    Ok(SampleDifferences {
        h,
        results,
        formulas: DifferenceFormulas::default(),
    })
}
