//! Absolute, relative and percentage error.

use serde::{Serialize, Serializer};

/// True values at or below this magnitude are treated as zero.
pub const ZERO_THRESHOLD: f64 = 1e-10;

/// Formula strings reported with [`ErrorMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ErrorFormulas {
    /// Absolute error.
    pub absolute: &'static str,
    /// Relative error.
    pub relative: &'static str,
    /// Percentage error.
    pub percentage: &'static str,
}

impl Default for ErrorFormulas {
    fn default() -> Self {
        Self {
            absolute: "|true - approximate|",
            relative: "|true - approximate| / |true|",
            percentage: "relative_error × 100%",
        }
    }
}

/// Error of an approximation against a reference value.
///
/// When the true value is indistinguishable from zero the relative and
/// percentage errors are `f64::INFINITY`; they serialize as `"Infinity"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ErrorMetrics {
    /// |true - approximate|.
    pub absolute_error: f64,
    /// absolute_error / |true|.
    #[serde(serialize_with = "serialize_unbounded")]
    pub relative_error: f64,
    /// relative_error × 100.
    #[serde(serialize_with = "serialize_unbounded")]
    pub percentage_error: f64,
    /// Formula strings.
    pub formulas: ErrorFormulas,
}

/// Computes the error of `approximate_value` against `true_value`.
///
/// # Example
///
/// ```rust
/// use numerik_math::error_analysis::calculate_error;
///
/// let e = calculate_error(3.14159, 3.14);
/// assert!((e.absolute_error - 0.00159).abs() < 1e-12);
///
/// let e = calculate_error(0.0, 5.0);
/// assert!(e.relative_error.is_infinite());
/// ```
pub fn calculate_error(true_value: f64, approximate_value: f64) -> ErrorMetrics {
    let absolute_error = (true_value - approximate_value).abs();

    let (relative_error, percentage_error) = if true_value.abs() > ZERO_THRESHOLD {
        let relative = absolute_error / true_value.abs();
        (relative, relative * 100.0)
    } else {
        (f64::INFINITY, f64::INFINITY)
    };

    ErrorMetrics {
        absolute_error,
        relative_error,
        percentage_error,
        formulas: ErrorFormulas::default(),
    }
}

/// JSON has no infinity literal; write non-finite ratios as strings.
fn serialize_unbounded<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else if value.is_nan() {
        serializer.serialize_str("NaN")
    } else if *value > 0.0 {
        serializer.serialize_str("Infinity")
    } else {
        serializer.serialize_str("-Infinity")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_basic_errors() {
        let e = calculate_error(100.0, 98.0);

        assert_relative_eq!(e.absolute_error, 2.0);
        assert_relative_eq!(e.relative_error, 0.02);
        assert_relative_eq!(e.percentage_error, 2.0);
    }

    #[test]
    fn test_negative_true_value() {
        let e = calculate_error(-4.0, -5.0);

        assert_relative_eq!(e.absolute_error, 1.0);
        assert_relative_eq!(e.relative_error, 0.25);
        assert_relative_eq!(e.percentage_error, 25.0);
    }

    #[test]
    fn test_zero_true_value() {
        let e = calculate_error(0.0, 5.0);

        assert_relative_eq!(e.absolute_error, 5.0);
        assert_eq!(e.relative_error, f64::INFINITY);
        assert_eq!(e.percentage_error, f64::INFINITY);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let e = calculate_error(1e-10, 0.0);
        assert!(e.relative_error.is_infinite());

        let e = calculate_error(2e-10, 0.0);
        assert_relative_eq!(e.relative_error, 1.0);
    }

    #[test]
    fn test_exact_approximation() {
        let e = calculate_error(2.5, 2.5);

        assert_eq!(e.absolute_error, 0.0);
        assert_eq!(e.relative_error, 0.0);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_value(calculate_error(0.0, 5.0)).unwrap();

        assert_eq!(json["absolute_error"], 5.0);
        assert_eq!(json["relative_error"], "Infinity");
        assert_eq!(json["percentage_error"], "Infinity");
        assert_eq!(json["formulas"]["absolute"], "|true - approximate|");

        let json = serde_json::to_value(calculate_error(2.0, 1.0)).unwrap();
        assert_eq!(json["relative_error"], 0.5);
    }
}
