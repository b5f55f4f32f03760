//! Bisection root-finding algorithm.

use serde::Serialize;

use crate::error::{check_tolerance, finite_at, MathError, MathResult};
use crate::solvers::{BisectionResult, RootResult, SolverConfig};

/// Update rule reported with bisection results.
pub const BISECTION_FORMULA: &str = "c = (a + b) / 2";

/// One bisection iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BisectionStep {
    /// 1-based iteration index.
    pub iteration: u32,
    /// Left bound at the start of the iteration.
    pub a: f64,
    /// Right bound at the start of the iteration.
    pub b: f64,
    /// Midpoint.
    pub c: f64,
    /// f(c).
    pub f_c: f64,
    /// Half-width of the interval, |b - a| / 2.
    pub error: f64,
}

/// Bisection root-finding algorithm.
///
/// A simple and reliable bracketing method that works by repeatedly
/// halving the interval and selecting the subinterval containing the root.
///
/// Requires: `f(a) * f(b) <= 0` (opposite signs at endpoints). The bounds are
/// used in the order given.
///
/// Stops as soon as `|f(c)| < tolerance` **or** the half-width drops below
/// `tolerance`, whichever comes first.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `a` - First bound of the bracket
/// * `b` - Second bound of the bracket
/// * `config` - Solver configuration
///
/// # Returns
///
/// The root with the full iteration trace, or an error if the bracket is
/// invalid or the iteration cap is reached.
///
/// # Example
///
/// ```rust
/// use numerik_math::solvers::{bisection, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-5);
/// assert_eq!(result.steps[0].c, 1.5);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<BisectionResult>
where
    F: Fn(f64) -> f64,
{
    check_tolerance(config.tolerance)?;

    let mut a = a;
    let mut b = b;

    let fa = finite_at(&f, a)?;
    let fb = finite_at(&f, b)?;

    // Check that root is bracketed
    if fa * fb > 0.0 {
        return Err(MathError::SignConditionViolated { a, b, fa, fb });
    }

    // Handle case where endpoint is the root
    if fa == 0.0 || fb == 0.0 {
        let root = if fa == 0.0 { a } else { b };
        log::debug!("bisection: endpoint {} is an exact root", root);
        return Ok(RootResult {
            root,
            iterations: 0,
            steps: Vec::new(),
            formula: BISECTION_FORMULA.to_string(),
        });
    }

    let mut steps = Vec::new();

    for iteration in 1..=config.max_iterations {
        let c = (a + b) / 2.0;
        let fc = finite_at(&f, c)?;
        let half_width = (b - a).abs() / 2.0;

        steps.push(BisectionStep {
            iteration,
            a,
            b,
            c,
            f_c: fc,
            error: half_width,
        });

        // Check for convergence
        if fc.abs() < config.tolerance || half_width < config.tolerance {
            log::debug!(
                "bisection converged to {} after {} iterations",
                c,
                iteration
            );
            return Ok(RootResult {
                root: c,
                iterations: iteration,
                steps,
                formula: BISECTION_FORMULA.to_string(),
            });
        }

        // Update bracket; f(a) is re-evaluated since `a` may have moved
        if f(a) * fc < 0.0 {
            b = c;
        } else {
            a = c;
        }
    }

    log::warn!(
        "bisection did not converge within {} iterations",
        config.max_iterations
    );
    Err(MathError::MaxIterationsExceeded {
        iterations: config.max_iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;

        let result = bisection(f, 1.0, 2.0, &SolverConfig::new(1e-10, 100)).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-9);
        assert_eq!(result.formula, "c = (a + b) / 2");
    }

    #[test]
    fn test_trace_shape() {
        let f = |x: f64| x * x - 2.0;

        let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        assert_eq!(result.steps.len(), result.iterations as usize);
        let first = result.steps[0];
        assert_eq!(first.iteration, 1);
        assert_relative_eq!(first.a, 1.0);
        assert_relative_eq!(first.b, 2.0);
        assert_relative_eq!(first.c, 1.5);
        assert_relative_eq!(first.f_c, 0.25);
        assert_relative_eq!(first.error, 0.5);

        // f(1.5) > 0 so the root is in [1, 1.5]
        let second = result.steps[1];
        assert_relative_eq!(second.a, 1.0);
        assert_relative_eq!(second.b, 1.5);

        for (i, step) in result.steps.iter().enumerate() {
            assert_eq!(step.iteration, i as u32 + 1);
        }
        let last = result.steps.last().unwrap();
        assert_relative_eq!(result.root, last.c);
    }

    #[test]
    fn test_reversed_bracket() {
        let f = |x: f64| x * x - 2.0;

        // Reversed bracket should still work
        let result = bisection(f, 2.0, 1.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-5);
    }

    #[test]
    fn test_invalid_bracket() {
        let f = |x: f64| x * x - 2.0;

        // Both endpoints have same sign
        let result = bisection(f, 2.0, 3.0, &SolverConfig::default());

        match result {
            Err(MathError::SignConditionViolated { fa, fb, .. }) => {
                assert_relative_eq!(fa, 2.0);
                assert_relative_eq!(fb, 7.0);
            }
            other => panic!("Expected SignConditionViolated, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_bracket_never_iterates() {
        let calls = std::cell::Cell::new(0);
        let f = |x: f64| {
            calls.set(calls.get() + 1);
            x * x + 1.0
        };

        assert!(bisection(f, -1.0, 1.0, &SolverConfig::default()).is_err());
        // only f(a) and f(b)
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_root_at_endpoint() {
        let f = |x: f64| x;

        let result = bisection(f, 0.0, 1.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 0.0);
        assert_eq!(result.iterations, 0);
        assert!(result.steps.is_empty());
    }

    #[test]
    fn test_negative_root() {
        let f = |x: f64| x + 1.0;

        let result = bisection(f, -2.0, 0.5, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_max_iterations() {
        let f = |x: f64| x * x * x - 2.0 * x - 5.0;

        let result = bisection(f, 2.0, 3.0, &SolverConfig::new(1e-12, 5));

        assert_eq!(
            result.unwrap_err(),
            MathError::MaxIterationsExceeded { iterations: 5 }
        );
    }

    #[test]
    fn test_value_stopping_rule() {
        // f(c) hits zero exactly at the first midpoint
        let f = |x: f64| x - 1.0;

        let result = bisection(f, 0.5, 1.5, &SolverConfig::default()).unwrap();

        assert_eq!(result.iterations, 1);
        assert_relative_eq!(result.root, 1.0);
    }

    #[test]
    fn test_non_finite_endpoint() {
        let f = |x: f64| x.ln();

        let result = bisection(f, -1.0, 2.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::NonFiniteValue { .. })));
    }

    #[test]
    fn test_rejects_non_positive_tolerance() {
        let f = |x: f64| x - 1.0;

        let result = bisection(f, 0.0, 3.0, &SolverConfig::new(0.0, 100));

        assert!(matches!(result, Err(MathError::InvalidInput { .. })));
    }

    proptest! {
        #[test]
        fn prop_half_width_halves_and_brackets_root(
            root in -50.0f64..50.0,
            left in 0.1f64..20.0,
            right in 0.1f64..20.0,
        ) {
            let f = |x: f64| x - root;
            let result = bisection(f, root - left, root + right, &SolverConfig::default()).unwrap();

            for pair in result.steps.windows(2) {
                prop_assert!((pair[1].error - pair[0].error / 2.0).abs() <= 1e-12 * pair[0].error.max(1.0));
            }
            for step in &result.steps {
                let (lo, hi) = (step.a.min(step.b), step.a.max(step.b));
                prop_assert!(lo <= root && root <= hi);
            }
        }
    }
}
