//! Error types for numerical methods.

use thiserror::Error;

/// A specialized Result type for numerical methods.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur while running a numerical method.
///
/// Every variant is a client-correctable input problem; none of them
/// indicates a fault in the library itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// The expression text could not be compiled into a function of `x`.
    #[error("Invalid function: {reason}")]
    InvalidExpression {
        /// What went wrong while parsing.
        reason: String,
    },

    /// Bisection precondition failed.
    #[error("f(a) and f(b) must have opposite signs: f({a}) = {fa:.6e}, f({b}) = {fb:.6e}")]
    SignConditionViolated {
        /// Left bound.
        a: f64,
        /// Right bound.
        b: f64,
        /// Function value at a.
        fa: f64,
        /// Function value at b.
        fb: f64,
    },

    /// Newton-Raphson hit a near-zero derivative.
    #[error("Derivative too small, method fails: f'({x}) = {derivative:.2e}")]
    DerivativeTooSmall {
        /// Iterate at which the derivative vanished.
        x: f64,
        /// The derivative value.
        derivative: f64,
    },

    /// Iterative method did not converge within the iteration cap.
    #[error("Maximum iterations reached: no convergence after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted.
        iterations: u32,
    },

    /// Paired sample arrays differ in length.
    #[error("x and y arrays must have same length: {x_len} vs {y_len}")]
    LengthMismatch {
        /// Number of x values.
        x_len: usize,
        /// Number of y values.
        y_len: usize,
    },

    /// Sample abscissae are not on a uniform grid.
    #[error(
        "Points must be equally spaced for Newton's forward difference: \
         spacing {found} at index {index} differs from h = {h}"
    )]
    UnequalSpacing {
        /// Expected spacing (x1 - x0).
        h: f64,
        /// Offending spacing.
        found: f64,
        /// Index of the first point of the offending pair.
        index: usize,
    },

    /// A scalar input could not be read as a real number.
    #[error("Could not convert {field} to a number: {value:?}")]
    TypeCoercionFailed {
        /// Name of the input field.
        field: String,
        /// The raw value supplied.
        value: String,
    },

    /// Differentiation inputs select neither (or both) modes.
    #[error("{reason}")]
    AmbiguousMode {
        /// Description of the conflict.
        reason: String,
    },

    /// A field required by the selected mode is absent.
    #[error("{field} required when using {mode} mode")]
    MissingInput {
        /// Name of the missing field.
        field: String,
        /// The selected mode.
        mode: String,
    },

    /// Insufficient data points for operation.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },

    /// The function evaluated to NaN or an infinity.
    #[error("Function is not finite at x = {x}: got {value}")]
    NonFiniteValue {
        /// Evaluation point.
        x: f64,
        /// The offending value.
        value: f64,
    },
}

impl MathError {
    /// Creates an invalid expression error.
    #[must_use]
    pub fn invalid_expression(reason: impl Into<String>) -> Self {
        Self::InvalidExpression {
            reason: reason.into(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Creates a type coercion error.
    #[must_use]
    pub fn type_coercion(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::TypeCoercionFailed {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates a length mismatch error.
    #[must_use]
    pub fn length_mismatch(x_len: usize, y_len: usize) -> Self {
        Self::LengthMismatch { x_len, y_len }
    }
}

/// Evaluates `f` at `x`, rejecting NaN and infinite results.
pub(crate) fn finite_at<F>(f: &F, x: f64) -> MathResult<f64>
where
    F: Fn(f64) -> f64,
{
    let value = f(x);
    if value.is_finite() {
        Ok(value)
    } else {
        log::warn!("non-finite function value {} at x = {}", value, x);
        Err(MathError::NonFiniteValue { x, value })
    }
}

/// Rejects tolerances that can never be met.
pub(crate) fn check_tolerance(tolerance: f64) -> MathResult<()> {
    if tolerance.is_finite() && tolerance > 0.0 {
        Ok(())
    } else {
        Err(MathError::invalid_input(format!(
            "tolerance must be a positive number, got {tolerance}"
        )))
    }
}
