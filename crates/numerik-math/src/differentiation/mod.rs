//! Finite-difference derivative estimation.
//!
//! Two modes are available:
//!
//! - **Function mode** ([`function_differences`]): a symbolic function is
//!   sampled around a point and the three estimates are compared against the
//!   exact symbolic derivative.
//! - **Data mode** ([`sample_differences`]): estimates are computed directly
//!   from tabulated samples; boundary points get only the one-sided estimate
//!   their neighbours allow.
//!
//! [`DifferentiationRequest`] selects exactly one of the two.

mod function;
mod samples;

pub use function::{function_differences, DifferenceEstimate, FunctionDifferences, DEFAULT_STEP};
pub use samples::{sample_differences, PointDifferences, SampleDifferences};

use serde::Serialize;

use crate::error::{MathError, MathResult};
use crate::expression::DifferentiableFunction;

/// Forward difference formula.
pub const FORWARD_FORMULA: &str = "f'(x) ≈ (f(x+h) - f(x)) / h";

/// Backward difference formula.
pub const BACKWARD_FORMULA: &str = "f'(x) ≈ (f(x) - f(x-h)) / h";

/// Central difference formula.
pub const CENTRAL_FORMULA: &str = "f'(x) ≈ (f(x+h) - f(x-h)) / (2h)";

/// The three difference formulas, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DifferenceFormulas {
    /// Forward difference.
    pub forward: &'static str,
    /// Backward difference.
    pub backward: &'static str,
    /// Central difference.
    pub central: &'static str,
}

impl Default for DifferenceFormulas {
    fn default() -> Self {
        Self {
            forward: FORWARD_FORMULA,
            backward: BACKWARD_FORMULA,
            central: CENTRAL_FORMULA,
        }
    }
}

/// Inputs for differentiating a symbolic function at a point.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionMode {
    /// Formula text in `x`.
    pub function: String,
    /// Point at which to differentiate.
    pub x: f64,
    /// Step size.
    pub h: f64,
}

/// Inputs for differentiating tabulated samples.
#[derive(Debug, Clone, PartialEq)]
pub struct DataMode {
    /// Sample abscissae.
    pub x_values: Vec<f64>,
    /// Sample ordinates.
    pub y_values: Vec<f64>,
    /// Step size; derived from the first two abscissae when absent.
    pub h: Option<f64>,
}

/// A finite-difference problem in exactly one mode.
#[derive(Debug, Clone, PartialEq)]
pub enum DifferentiationRequest {
    /// Symbolic function mode.
    Function(FunctionMode),
    /// Discrete sample mode.
    Data(DataMode),
}

/// Result of a finite-difference computation, shaped by the mode used.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Differentiation {
    /// Function-mode result.
    Function(FunctionDifferences),
    /// Data-mode result.
    Data(SampleDifferences),
}

impl DifferentiationRequest {
    /// Runs the selected mode.
    pub fn evaluate(&self) -> MathResult<Differentiation> {
        match self {
            Self::Function(mode) => {
                let f = DifferentiableFunction::parse(&mode.function)?;
                function_differences(&f, mode.x, mode.h).map(Differentiation::Function)
            }
            Self::Data(mode) => sample_differences(&mode.x_values, &mode.y_values, mode.h)
                .map(Differentiation::Data),
        }
    }
}

/// Rejects step sizes that would divide by zero or propagate NaN.
pub(crate) fn check_step(h: f64) -> MathResult<()> {
    if h.is_finite() && h != 0.0 {
        Ok(())
    } else {
        Err(MathError::invalid_input(format!(
            "step size h must be a non-zero finite number, got {h}"
        )))
    }
}
