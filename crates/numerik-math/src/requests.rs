//! Request and response shapes for the five operations.
//!
//! Each request deserializes from loosely typed JSON (numbers may arrive as
//! numeric strings), validates and coerces its fields, runs the method and
//! wraps the result in an [`Outcome`].
//!
//! # Example
//!
//! ```rust
//! use numerik_math::requests::{BisectionRequest, Outcome};
//!
//! let request: BisectionRequest = serde_json::from_str(
//!     r#"{"function": "x^2 - 4", "a": 0, "b": "5", "tolerance": 1e-8}"#,
//! ).unwrap();
//!
//! match request.run(100) {
//!     Outcome::Success(result) => assert!((result.root - 2.0).abs() < 1e-6),
//!     Outcome::Failure { error } => panic!("{error}"),
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::differentiation::{
    DataMode, Differentiation, DifferentiationRequest, FunctionMode, DEFAULT_STEP,
};
use crate::error::{MathError, MathResult};
use crate::error_analysis::{calculate_error, ErrorMetrics};
use crate::expression::DifferentiableFunction;
use crate::interpolation::{newton_forward_difference, NewtonForwardResult};
use crate::solvers::{
    bisection, newton_raphson, BisectionResult, NewtonResult, SolverConfig, DEFAULT_TOLERANCE,
};

/// A scalar as supplied by a client: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RealInput {
    /// A JSON number.
    Number(f64),
    /// A string expected to hold a number.
    Text(String),
    /// Anything else; always fails coercion.
    Other(serde_json::Value),
}

impl RealInput {
    /// Reads the value as `f64`, naming `field` on failure.
    pub fn to_f64(&self, field: &str) -> MathResult<f64> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| MathError::type_coercion(field, text.as_str())),
            Self::Other(value) => Err(MathError::type_coercion(field, value.to_string())),
        }
    }
}

impl From<f64> for RealInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

fn real_or(input: Option<&RealInput>, field: &str, default: f64) -> MathResult<f64> {
    input.map_or(Ok(default), |value| value.to_f64(field))
}

fn reals(values: &[RealInput], field: &str) -> MathResult<Vec<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| value.to_f64(&format!("{field}[{i}]")))
        .collect()
}

/// Data-mode step: zero or blank counts as absent, so the spacing of the
/// first two abscissae is used instead.
fn sample_step(input: Option<&RealInput>) -> MathResult<Option<f64>> {
    match input {
        Some(RealInput::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(value) => value.to_f64("h").map(|h| (h != 0.0).then_some(h)),
        None => Ok(None),
    }
}

/// Either a result or a single error message.
///
/// Serializes as the result itself, or as `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome<T> {
    /// The operation succeeded.
    Success(T),
    /// The operation failed.
    Failure {
        /// Human-readable description.
        error: String,
    },
}

impl<T> Outcome<T> {
    /// True for [`Outcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Converts into a `Result` carrying the message on failure.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure { error } => Err(error),
        }
    }
}

impl<T> From<MathResult<T>> for Outcome<T> {
    fn from(result: MathResult<T>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(err) => {
                log::debug!("operation failed: {err}");
                Self::Failure {
                    error: err.to_string(),
                }
            }
        }
    }
}

fn solver_config(tolerance: Option<&RealInput>, max_iterations: u32) -> MathResult<SolverConfig> {
    let tolerance = real_or(tolerance, "tolerance", DEFAULT_TOLERANCE)?;
    Ok(SolverConfig::new(tolerance, max_iterations))
}

/// Bisection on `[a, b]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BisectionRequest {
    /// Formula text in `x`.
    pub function: String,
    /// Left bound.
    pub a: RealInput,
    /// Right bound.
    pub b: RealInput,
    /// Convergence tolerance; 1e-6 when absent.
    #[serde(default)]
    pub tolerance: Option<RealInput>,
}

impl BisectionRequest {
    fn solve(&self, max_iterations: u32) -> MathResult<BisectionResult> {
        let f = DifferentiableFunction::parse(&self.function)?;
        let a = self.a.to_f64("a")?;
        let b = self.b.to_f64("b")?;
        let config = solver_config(self.tolerance.as_ref(), max_iterations)?;

        bisection(f.as_fn(), a, b, &config)
    }

    /// Runs bisection with the given iteration cap.
    pub fn run(&self, max_iterations: u32) -> Outcome<BisectionResult> {
        self.solve(max_iterations).into()
    }
}

/// Newton-Raphson from `x0`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewtonRaphsonRequest {
    /// Formula text in `x`.
    pub function: String,
    /// Initial guess.
    pub x0: RealInput,
    /// Convergence tolerance; 1e-6 when absent.
    #[serde(default)]
    pub tolerance: Option<RealInput>,
}

/// Newton-Raphson trace together with the derivative that drove it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewtonRaphsonResponse {
    /// Root, iteration count, trace and formula.
    #[serde(flatten)]
    pub result: NewtonResult,
    /// The symbolic derivative as text.
    pub derivative: String,
}

impl NewtonRaphsonRequest {
    fn solve(&self, max_iterations: u32) -> MathResult<NewtonRaphsonResponse> {
        let f = DifferentiableFunction::parse(&self.function)?;
        let x0 = self.x0.to_f64("x0")?;
        let config = solver_config(self.tolerance.as_ref(), max_iterations)?;

        let result = newton_raphson(f.as_fn(), f.derivative_fn(), x0, &config)?;
        Ok(NewtonRaphsonResponse {
            result,
            derivative: f.derivative_expression(),
        })
    }

    /// Runs Newton-Raphson with the given iteration cap.
    pub fn run(&self, max_iterations: u32) -> Outcome<NewtonRaphsonResponse> {
        self.solve(max_iterations).into()
    }
}

/// Finite differences in function mode or data mode.
///
/// A non-empty `function` selects function mode; otherwise both sample
/// arrays must be present.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FiniteDifferencesRequest {
    /// Formula text in `x` (function mode).
    #[serde(default)]
    pub function: Option<String>,
    /// Evaluation point (function mode).
    #[serde(default)]
    pub x_value: Option<RealInput>,
    /// Step size; 0.1 in function mode, derived in data mode.
    #[serde(default)]
    pub h: Option<RealInput>,
    /// Sample abscissae (data mode).
    #[serde(default)]
    pub x_values: Option<Vec<RealInput>>,
    /// Sample ordinates (data mode).
    #[serde(default)]
    pub y_values: Option<Vec<RealInput>>,
}

impl TryFrom<&FiniteDifferencesRequest> for DifferentiationRequest {
    type Error = MathError;

    fn try_from(request: &FiniteDifferencesRequest) -> MathResult<Self> {
        let function = request
            .function
            .as_deref()
            .filter(|text| !text.trim().is_empty());

        if let Some(function) = function {
            let x = request
                .x_value
                .as_ref()
                .ok_or_else(|| MathError::MissingInput {
                    field: "x_value".to_string(),
                    mode: "function".to_string(),
                })?
                .to_f64("x_value")?;
            let h = real_or(request.h.as_ref(), "h", DEFAULT_STEP)?;

            return Ok(Self::Function(FunctionMode {
                function: function.to_string(),
                x,
                h,
            }));
        }

        match (&request.x_values, &request.y_values) {
            (Some(xs), Some(ys)) => Ok(Self::Data(DataMode {
                x_values: reals(xs, "x_values")?,
                y_values: reals(ys, "y_values")?,
                h: sample_step(request.h.as_ref())?,
            })),
            _ => Err(MathError::AmbiguousMode {
                reason: "Must provide either function OR (x_values and y_values)".to_string(),
            }),
        }
    }
}

impl FiniteDifferencesRequest {
    /// Selects the mode and computes the differences.
    pub fn run(&self) -> Outcome<Differentiation> {
        DifferentiationRequest::try_from(self)
            .and_then(|request| request.evaluate())
            .into()
    }
}

/// Error of an approximation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorCalculationRequest {
    /// Reference value.
    pub true_value: RealInput,
    /// Approximation.
    pub approximate_value: RealInput,
}

impl ErrorCalculationRequest {
    fn solve(&self) -> MathResult<ErrorMetrics> {
        let true_value = self.true_value.to_f64("true_value")?;
        let approximate_value = self.approximate_value.to_f64("approximate_value")?;
        Ok(calculate_error(true_value, approximate_value))
    }

    /// Computes absolute, relative and percentage error.
    pub fn run(&self) -> Outcome<ErrorMetrics> {
        self.solve().into()
    }
}

/// Newton forward-difference interpolation at `x_target`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewtonForwardRequest {
    /// Equally spaced abscissae.
    pub x_values: Vec<RealInput>,
    /// Ordinates.
    pub y_values: Vec<RealInput>,
    /// Evaluation point.
    pub x_target: RealInput,
}

impl NewtonForwardRequest {
    fn solve(&self) -> MathResult<NewtonForwardResult> {
        let xs = reals(&self.x_values, "x_values")?;
        let ys = reals(&self.y_values, "y_values")?;
        let x_target = self.x_target.to_f64("x_target")?;
        newton_forward_difference(&xs, &ys, x_target)
    }

    /// Interpolates and estimates both derivatives.
    pub fn run(&self) -> Outcome<NewtonForwardResult> {
        self.solve().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn parse<T: for<'de> Deserialize<'de>>(value: serde_json::Value) -> T {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_real_input_coercion() {
        assert_eq!(RealInput::Number(2.5).to_f64("a").unwrap(), 2.5);
        assert_eq!(RealInput::Text(" 1e-3 ".into()).to_f64("a").unwrap(), 1e-3);

        let err = RealInput::Text("abc".into()).to_f64("a").unwrap_err();
        assert_eq!(err, MathError::type_coercion("a", "abc"));

        let input: RealInput = parse(json!(true));
        assert!(matches!(
            input.to_f64("flag"),
            Err(MathError::TypeCoercionFailed { ref field, .. }) if field == "flag"
        ));
    }

    #[test]
    fn test_integers_deserialize_as_numbers() {
        let input: RealInput = parse(json!(3));
        assert_eq!(input, RealInput::Number(3.0));
    }

    #[test]
    fn test_bisection_request() {
        let request: BisectionRequest = parse(json!({"function": "x^2 - 4", "a": 0, "b": 5}));
        let result = request.run(100).into_result().unwrap();

        assert_relative_eq!(result.root, 2.0, epsilon = 1e-5);
        assert_eq!(result.steps.len() as u32, result.iterations);
    }

    #[test]
    fn test_bisection_sign_failure_message() {
        let request: BisectionRequest = parse(json!({"function": "x^2 + 1", "a": -1, "b": 1}));
        let error = request.run(100).into_result().unwrap_err();

        assert!(error.starts_with("f(a) and f(b) must have opposite signs"));
    }

    #[test]
    fn test_bisection_bad_bound() {
        let request: BisectionRequest = parse(json!({"function": "x", "a": "left", "b": 1}));
        let error = request.run(100).into_result().unwrap_err();

        assert_eq!(error, "Could not convert a to a number: \"left\"");
    }

    #[test]
    fn test_iteration_cap_is_applied() {
        let request: BisectionRequest = parse(json!({
            "function": "x - 0.3", "a": 0, "b": 1, "tolerance": 1e-12
        }));

        let outcome = request.run(3);
        assert_eq!(
            outcome.into_result().unwrap_err(),
            MathError::MaxIterationsExceeded { iterations: 3 }.to_string()
        );
    }

    #[test]
    fn test_newton_request_reports_derivative() {
        let request: NewtonRaphsonRequest = parse(json!({"function": "x^3 - 2*x - 5", "x0": "2"}));
        let response = request.run(100).into_result().unwrap();

        assert_relative_eq!(response.result.root, 2.0945514815, epsilon = 1e-6);
        assert_eq!(response.derivative, "((3 * (x^2)) - 2)");

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("root").is_some());
        assert!(json["steps"].is_array());
        assert_eq!(json["derivative"], "((3 * (x^2)) - 2)");
    }

    #[test]
    fn test_newton_request_zero_derivative() {
        let request: NewtonRaphsonRequest = parse(json!({"function": "x^2 + 1", "x0": 0}));
        let error = request.run(100).into_result().unwrap_err();

        assert!(error.starts_with("Derivative too small"));
    }

    #[test]
    fn test_invalid_tolerance() {
        let request: NewtonRaphsonRequest = parse(json!({
            "function": "x", "x0": 1, "tolerance": -1
        }));

        assert!(!request.run(100).is_success());
    }

    #[test]
    fn test_finite_differences_function_mode() {
        let request: FiniteDifferencesRequest = parse(json!({
            "function": "x^2", "x_value": 2, "h": 0.01
        }));

        match request.run().into_result().unwrap() {
            Differentiation::Function(result) => {
                assert_relative_eq!(result.forward.value, 4.01, epsilon = 1e-9);
                assert_relative_eq!(result.backward.value, 3.99, epsilon = 1e-9);
                assert_relative_eq!(result.central.value, 4.0, epsilon = 1e-9);
            }
            other => panic!("expected function result, got {other:?}"),
        }
    }

    #[test]
    fn test_finite_differences_default_step() {
        let request: FiniteDifferencesRequest = parse(json!({"function": "x", "x_value": 1}));

        match DifferentiationRequest::try_from(&request).unwrap() {
            DifferentiationRequest::Function(mode) => assert_relative_eq!(mode.h, 0.1),
            other => panic!("expected function mode, got {other:?}"),
        }
    }

    #[test]
    fn test_finite_differences_data_mode() {
        let request: FiniteDifferencesRequest = parse(json!({
            "x_values": [0, 1, 2], "y_values": ["0", "1", "4"]
        }));

        match request.run().into_result().unwrap() {
            Differentiation::Data(result) => {
                assert_eq!(result.results[1].central, Some(2.0));
                assert_eq!(result.results[0].backward, None);
            }
            other => panic!("expected data result, got {other:?}"),
        }
    }

    #[test]
    fn test_function_takes_precedence_over_samples() {
        let request: FiniteDifferencesRequest = parse(json!({
            "function": "x", "x_value": 0, "x_values": [0, 1], "y_values": [0, 1]
        }));

        assert!(matches!(
            DifferentiationRequest::try_from(&request),
            Ok(DifferentiationRequest::Function(_))
        ));
    }

    #[test]
    fn test_zero_step_in_data_mode_is_derived() {
        for h in [json!(0), json!(0.0), json!(""), json!(null)] {
            let request: FiniteDifferencesRequest = parse(json!({
                "x_values": [0, 0.5, 1], "y_values": [0, 1, 2], "h": h
            }));

            match request.run().into_result().unwrap() {
                Differentiation::Data(result) => {
                    assert_relative_eq!(result.h, 0.5);
                    assert_eq!(result.results[1].central, Some(2.0));
                }
                other => panic!("expected data result, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_zero_step_in_function_mode_is_rejected() {
        let request: FiniteDifferencesRequest = parse(json!({
            "function": "x^2", "x_value": 1, "h": 0
        }));

        assert!(request
            .run()
            .into_result()
            .unwrap_err()
            .starts_with("Invalid input"));
    }

    #[test]
    fn test_empty_function_falls_back_to_data() {
        let request: FiniteDifferencesRequest = parse(json!({
            "function": "", "x_values": [0, 1], "y_values": [0, 1]
        }));

        assert!(matches!(
            DifferentiationRequest::try_from(&request),
            Ok(DifferentiationRequest::Data(_))
        ));
    }

    #[test]
    fn test_missing_x_value() {
        let request: FiniteDifferencesRequest = parse(json!({"function": "x^2"}));
        let error = request.run().into_result().unwrap_err();

        assert_eq!(error, "x_value required when using function mode");
    }

    #[test]
    fn test_ambiguous_mode() {
        let request = FiniteDifferencesRequest::default();
        let error = request.run().into_result().unwrap_err();
        assert_eq!(error, "Must provide either function OR (x_values and y_values)");

        let request: FiniteDifferencesRequest = parse(json!({"x_values": [0, 1]}));
        assert!(!request.run().is_success());
    }

    #[test]
    fn test_array_element_named_on_failure() {
        let request: FiniteDifferencesRequest = parse(json!({
            "x_values": [0, "one"], "y_values": [0, 1]
        }));
        let error = request.run().into_result().unwrap_err();

        assert!(error.contains("x_values[1]"));
    }

    #[test]
    fn test_error_calculation_request() {
        let request: ErrorCalculationRequest = parse(json!({
            "true_value": 0, "approximate_value": "5"
        }));
        let outcome = request.run();

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["absolute_error"], 5.0);
        assert_eq!(json["relative_error"], "Infinity");
    }

    #[test]
    fn test_newton_forward_request() {
        let request: NewtonForwardRequest = parse(json!({
            "x_values": [0, 1, 2, 3], "y_values": [1, 2, 5, 10], "x_target": 1.5
        }));
        let result = request.run().into_result().unwrap();

        assert_relative_eq!(result.interpolated_value, 3.25, epsilon = 1e-12);
    }

    #[test]
    fn test_newton_forward_unequal_spacing() {
        let request: NewtonForwardRequest = parse(json!({
            "x_values": [0, 1, 3], "y_values": [1, 2, 5], "x_target": 1.5
        }));
        let error = request.run().into_result().unwrap_err();

        assert!(error.starts_with("Points must be equally spaced"));
    }

    #[test]
    fn test_failure_serialization() {
        let outcome: Outcome<f64> = Err(MathError::invalid_input("bad")).into();
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json, json!({"error": "Invalid input: bad"}));
    }
}
