//! Finite differences of a symbolic function.

use serde::Serialize;

use crate::differentiation::{check_step, BACKWARD_FORMULA, CENTRAL_FORMULA, FORWARD_FORMULA};
use crate::error::{finite_at, MathResult};
use crate::expression::DifferentiableFunction;

/// Default step size for function mode.
pub const DEFAULT_STEP: f64 = 0.1;

/// A single finite-difference estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifferenceEstimate {
    /// Estimated derivative.
    pub value: f64,
    /// Absolute error against the exact derivative.
    pub error: f64,
    /// Formula used.
    pub formula: &'static str,
}

impl DifferenceEstimate {
    fn new(value: f64, exact: f64, formula: &'static str) -> Self {
        Self {
            value,
            error: (exact - value).abs(),
            formula,
        }
    }
}

/// Forward, backward and central estimates at a point, with the exact value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDifferences {
    /// The function text.
    pub function: String,
    /// Evaluation point.
    pub x: f64,
    /// Step size.
    pub h: f64,
    /// f'(x) from the symbolic derivative.
    pub true_derivative: f64,
    /// The symbolic derivative as text.
    pub derivative_expression: String,
    /// (f(x+h) - f(x)) / h.
    pub forward: DifferenceEstimate,
    /// (f(x) - f(x-h)) / h.
    pub backward: DifferenceEstimate,
    /// (f(x+h) - f(x-h)) / (2h).
    pub central: DifferenceEstimate,
}

/// Estimates f'(x) with forward, backward and central differences.
///
/// # Errors
///
/// - `InvalidInput` when `h` is zero or not finite
/// - `NonFiniteValue` when f or f' is undefined at a sample point
///
/// # Example
///
/// ```rust
/// use numerik_math::differentiation::function_differences;
/// use numerik_math::expression::DifferentiableFunction;
///
/// let f = DifferentiableFunction::parse("x^2").unwrap();
/// let d = function_differences(&f, 2.0, 0.01).unwrap();
///
/// assert!((d.forward.value - 4.01).abs() < 1e-9);
/// assert_eq!(d.true_derivative, 4.0);
/// ```
pub fn function_differences(
    f: &DifferentiableFunction,
    x: f64,
    h: f64,
) -> MathResult<FunctionDifferences> {
    check_step(h)?;

    let eval = f.as_fn();
    let f_plus = finite_at(&eval, x + h)?;
    let f_x = finite_at(&eval, x)?;
    let f_minus = finite_at(&eval, x - h)?;
    let exact = finite_at(&f.derivative_fn(), x)?;

    let forward = (f_plus - f_x) / h;
    let backward = (f_x - f_minus) / h;
    let central = (f_plus - f_minus) / (2.0 * h);

    Ok(FunctionDifferences {
        function: f.source().to_string(),
        x,
        h,
        true_derivative: exact,
        derivative_expression: f.derivative_expression(),
        forward: DifferenceEstimate::new(forward, exact, FORWARD_FORMULA),
        backward: DifferenceEstimate::new(backward, exact, BACKWARD_FORMULA),
        central: DifferenceEstimate::new(central, exact, CENTRAL_FORMULA),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MathError;
    use approx::assert_relative_eq;

    #[test]
    fn test_square_at_two() {
        let f = DifferentiableFunction::parse("x^2").unwrap();

        let d = function_differences(&f, 2.0, 0.01).unwrap();

        assert_relative_eq!(d.true_derivative, 4.0);
        assert_relative_eq!(d.forward.value, 4.01, epsilon = 1e-9);
        assert_relative_eq!(d.backward.value, 3.99, epsilon = 1e-9);
        assert_relative_eq!(d.central.value, 4.0, epsilon = 1e-9);
        assert_relative_eq!(d.forward.error, 0.01, epsilon = 1e-9);
        assert_relative_eq!(d.backward.error, 0.01, epsilon = 1e-9);
        assert!(d.central.error < 1e-9);
    }

    #[test]
    fn test_formulas_and_echo() {
        let f = DifferentiableFunction::parse("sin(x)").unwrap();

        let d = function_differences(&f, 1.0, DEFAULT_STEP).unwrap();

        assert_eq!(d.function, "sin(x)");
        assert_relative_eq!(d.h, 0.1);
        assert_eq!(d.forward.formula, FORWARD_FORMULA);
        assert_eq!(d.backward.formula, BACKWARD_FORMULA);
        assert_eq!(d.central.formula, CENTRAL_FORMULA);
        assert_eq!(d.derivative_expression, "cos(x)");
        // central difference is second-order accurate
        assert!(d.central.error < d.forward.error);
        assert!(d.central.error < d.backward.error);
    }

    #[test]
    fn test_undefined_sample_point() {
        let f = DifferentiableFunction::parse("ln(x)").unwrap();

        let result = function_differences(&f, 0.05, 0.1);

        assert!(matches!(result, Err(MathError::NonFiniteValue { .. })));
    }

    #[test]
    fn test_zero_step_rejected() {
        let f = DifferentiableFunction::parse("x").unwrap();

        assert!(matches!(
            function_differences(&f, 1.0, 0.0),
            Err(MathError::InvalidInput { .. })
        ));
    }
}
