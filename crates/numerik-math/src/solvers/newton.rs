//! Newton-Raphson root-finding algorithm.

use serde::Serialize;

use crate::error::{check_tolerance, finite_at, MathError, MathResult};
use crate::solvers::{NewtonResult, RootResult, SolverConfig};

/// Update rule reported with Newton-Raphson results.
pub const NEWTON_FORMULA: &str = "x_{n+1} = x_n - f(x_n) / f'(x_n)";

/// Derivatives smaller than this in magnitude abort the iteration.
pub const MIN_DERIVATIVE: f64 = 1e-10;

/// One Newton-Raphson iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NewtonStep {
    /// 1-based iteration index.
    pub iteration: u32,
    /// Current iterate.
    pub x_n: f64,
    /// f(x_n).
    pub f_x: f64,
    /// f'(x_n).
    pub df_x: f64,
    /// Next iterate.
    pub x_next: f64,
    /// Step size, |x_next - x_n|.
    pub error: f64,
}

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration:
/// `x_{n+1} = x_n - f(x_n) / f'(x_n)`
///
/// This method has quadratic convergence near the root but requires
/// the derivative of the function. Converges when the step size drops
/// below the tolerance; the root reported is the last `x_{n+1}`.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `df` - The derivative of the function
/// * `initial_guess` - Starting point for the iteration
/// * `config` - Solver configuration
///
/// # Errors
///
/// * [`MathError::DerivativeTooSmall`] if `|f'(x_n)| < 1e-10` at any iterate
/// * [`MathError::MaxIterationsExceeded`] if the cap is reached
///
/// # Example
///
/// ```rust
/// use numerik_math::solvers::{newton_raphson, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<NewtonResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    check_tolerance(config.tolerance)?;

    let mut x = initial_guess;
    let mut steps = Vec::new();

    for iteration in 1..=config.max_iterations {
        let fx = finite_at(&f, x)?;
        let dfx = finite_at(&df, x)?;

        // Check for near-zero derivative
        if dfx.abs() < MIN_DERIVATIVE {
            log::warn!("newton-raphson: derivative {:e} at x = {}", dfx, x);
            return Err(MathError::DerivativeTooSmall {
                x,
                derivative: dfx,
            });
        }

        let x_next = x - fx / dfx;
        let step = (x_next - x).abs();

        steps.push(NewtonStep {
            iteration,
            x_n: x,
            f_x: fx,
            df_x: dfx,
            x_next,
            error: step,
        });

        // Check for step convergence
        if step < config.tolerance {
            log::debug!(
                "newton-raphson converged to {} after {} iterations",
                x_next,
                iteration
            );
            return Ok(RootResult {
                root: x_next,
                iterations: iteration,
                steps,
                formula: NEWTON_FORMULA.to_string(),
            });
        }

        x = x_next;
    }

    log::warn!(
        "newton-raphson did not converge within {} iterations",
        config.max_iterations
    );
    Err(MathError::MaxIterationsExceeded {
        iterations: config.max_iterations,
    })
}
