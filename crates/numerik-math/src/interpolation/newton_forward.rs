//! Newton's forward-difference interpolation.

use serde::Serialize;

use crate::error::{MathError, MathResult};
use crate::interpolation::{DifferenceTable, TableRow};

/// Relative tolerance for the equal-spacing check.
const SPACING_RTOL: f64 = 1e-5;

/// Absolute tolerance for the equal-spacing check.
const SPACING_ATOL: f64 = 1e-8;

/// Formula strings reported with [`NewtonForwardResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InterpolationFormulas {
    /// Interpolating polynomial.
    pub interpolation: &'static str,
    /// First derivative series.
    pub first_derivative: &'static str,
    /// Second derivative series.
    pub second_derivative: &'static str,
}

impl Default for InterpolationFormulas {
    fn default() -> Self {
        Self {
            interpolation: "f(x) = f(x₀) + uΔf(x₀) + u(u-1)/2! Δ²f(x₀) + ...",
            first_derivative: "f'(x) = (1/h)[Δf₀ + (2u-1)/2 Δ²f₀ + ...]",
            second_derivative: "f''(x) = (1/h²)[Δ²f₀ + (u-1) Δ³f₀ + ...]",
        }
    }
}

/// Newton forward-difference interpolator over equally spaced samples.
///
/// The value uses every available difference order. The derivative
/// estimates are truncated series: orders 1–3 for f' and 2–4 for f''.
///
/// # Example
///
/// ```rust
/// use numerik_math::interpolation::NewtonForward;
///
/// // y = x^2 + 1
/// let interp = NewtonForward::new(vec![0.0, 1.0, 2.0, 3.0], vec![1.0, 2.0, 5.0, 10.0]).unwrap();
///
/// assert!((interp.interpolate(1.5) - 3.25).abs() < 1e-12);
/// assert!((interp.first_derivative(1.5) - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonForward {
    xs: Vec<f64>,
    h: f64,
    table: DifferenceTable,
}

impl NewtonForward {
    /// Creates a Newton forward-difference interpolator.
    ///
    /// # Arguments
    ///
    /// * `xs` - X coordinates, equally spaced
    /// * `ys` - Y coordinates
    ///
    /// # Errors
    ///
    /// - `LengthMismatch` if the lengths differ
    /// - `InsufficientData` with fewer than 2 points
    /// - `UnequalSpacing` if any consecutive spacing differs from `xs[1] - xs[0]`
    /// - `InvalidInput` if the spacing is zero
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        if xs.len() != ys.len() {
            return Err(MathError::length_mismatch(xs.len(), ys.len()));
        }
        if xs.len() < 2 {
            return Err(MathError::insufficient_data(2, xs.len()));
        }

        let h = xs[1] - xs[0];
        for (index, pair) in xs.windows(2).enumerate() {
            let spacing = pair[1] - pair[0];
            // NaN spacing fails this comparison too
            if !((spacing - h).abs() <= SPACING_ATOL + SPACING_RTOL * h.abs()) {
                return Err(MathError::UnequalSpacing {
                    h,
                    found: spacing,
                    index,
                });
            }
        }
        if h == 0.0 {
            return Err(MathError::invalid_input("x values must be distinct"));
        }

        let table = DifferenceTable::build(&ys);

        Ok(Self { xs, h, table })
    }

    /// The sample spacing.
    pub fn h(&self) -> f64 {
        self.h
    }

    /// The forward-difference table.
    pub fn table(&self) -> &DifferenceTable {
        &self.table
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always false; construction requires two points.
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Normalized distance from the first sample, `(x - x0) / h`.
    pub fn u(&self, x: f64) -> f64 {
        (x - self.xs[0]) / self.h
    }

    /// Interpolated value at parameter `u`.
    pub fn value_at(&self, u: f64) -> f64 {
        let mut result = self.table.leading(0);
        let mut u_term = 1.0;

        for k in 1..self.len() {
            u_term *= (u - (k - 1) as f64) / k as f64;
            result += u_term * self.table.leading(k);
        }

        result
    }

    /// First derivative estimate at parameter `u`.
    ///
    /// `(1/h)[Δy0 + (2u-1)/2 Δ²y0 + (3u²-6u+2)/6 Δ³y0]`, each term present
    /// only when the table has that order.
    pub fn first_derivative_at(&self, u: f64) -> f64 {
        let n = self.len();
        if n <= 1 {
            return 0.0;
        }

        let mut sum = self.table.leading(1);
        if n > 2 {
            sum += (2.0 * u - 1.0) / 2.0 * self.table.leading(2);
        }
        if n > 3 {
            sum += (3.0 * u * u - 6.0 * u + 2.0) / 6.0 * self.table.leading(3);
        }
        sum / self.h
    }

    /// Second derivative estimate at parameter `u`.
    ///
    /// `(1/h²)[Δ²y0 + (u-1) Δ³y0 + (12u²-36u+22)/12 Δ⁴y0]`, each term present
    /// only when the table has that order.
    pub fn second_derivative_at(&self, u: f64) -> f64 {
        let n = self.len();
        if n <= 2 {
            return 0.0;
        }

        let mut sum = self.table.leading(2);
        if n > 3 {
            sum += (u - 1.0) * self.table.leading(3);
        }
        if n > 4 {
            sum += (12.0 * u * u - 36.0 * u + 22.0) / 12.0 * self.table.leading(4);
        }
        sum / (self.h * self.h)
    }

    /// Interpolated value at `x`.
    pub fn interpolate(&self, x: f64) -> f64 {
        self.value_at(self.u(x))
    }

    /// First derivative estimate at `x`.
    pub fn first_derivative(&self, x: f64) -> f64 {
        self.first_derivative_at(self.u(x))
    }

    /// Second derivative estimate at `x`.
    pub fn second_derivative(&self, x: f64) -> f64 {
        self.second_derivative_at(self.u(x))
    }

    /// Value, both derivative estimates and the labelled table at `x_target`.
    pub fn evaluate(&self, x_target: f64) -> NewtonForwardResult {
        let u = self.u(x_target);
        NewtonForwardResult {
            interpolated_value: self.value_at(u),
            first_derivative: self.first_derivative_at(u),
            second_derivative: self.second_derivative_at(u),
            x_target,
            u,
            h: self.h,
            difference_table: self.table.labelled_rows(&self.xs),
            formulas: InterpolationFormulas::default(),
        }
    }
}

/// Output of a Newton forward-difference evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewtonForwardResult {
    /// P(x_target).
    pub interpolated_value: f64,
    /// Truncated-series estimate of f'(x_target).
    pub first_derivative: f64,
    /// Truncated-series estimate of f''(x_target).
    pub second_derivative: f64,
    /// The evaluation point.
    pub x_target: f64,
    /// (x_target - x0) / h.
    pub u: f64,
    /// Sample spacing.
    pub h: f64,
    /// Rows of the forward-difference table.
    pub difference_table: Vec<TableRow>,
    /// Formula strings.
    pub formulas: InterpolationFormulas,
}

/// Builds the interpolator and evaluates it at `x_target`.
///
/// # Example
///
/// ```rust
/// use numerik_math::interpolation::newton_forward_difference;
///
/// let r = newton_forward_difference(&[0.0, 1.0, 2.0, 3.0], &[1.0, 2.0, 5.0, 10.0], 1.5).unwrap();
/// assert!((r.interpolated_value - 3.25).abs() < 1e-12);
/// assert_eq!(r.u, 1.5);
/// ```
pub fn newton_forward_difference(
    x_values: &[f64],
    y_values: &[f64],
    x_target: f64,
) -> MathResult<NewtonForwardResult> {
    let interp = NewtonForward::new(x_values.to_vec(), y_values.to_vec())?;
    log::debug!(
        "newton forward: {} points, h = {}, x_target = {}",
        interp.len(),
        interp.h(),
        x_target
    );
    Ok(interp.evaluate(x_target))
}
