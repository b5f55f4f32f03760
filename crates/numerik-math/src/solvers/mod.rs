//! Root-finding algorithms.
//!
//! This module provides numerical solvers for finding roots of equations:
//!
//! - [`bisection`]: Bracketing method, halves an interval known to contain a sign change
//! - [`newton_raphson`]: Open method using the derivative, quadratic convergence near the root
//!
//! Both solvers record every iteration in a trace, so a caller can show how
//! the estimate evolved and not just where it ended up.
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Newton-Raphson | Fastest (quadratic) | May diverge | Derivative |
//! | Bisection | Slow (linear) | Guaranteed | Bracket |
//!
//! # Example
//!
//! ```rust
//! use numerik_math::solvers::{bisection, SolverConfig};
//!
//! let f = |x: f64| x * x - 2.0;
//! let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
//!
//! assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-5);
//! assert_eq!(result.steps.len() as u32, result.iterations);
//! ```

mod bisection;
mod newton;

pub use bisection::{bisection, BisectionStep, BISECTION_FORMULA};
pub use newton::{newton_raphson, NewtonStep, MIN_DERIVATIVE, NEWTON_FORMULA};

use serde::Serialize;

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations. A hard cap.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a converged root search.
///
/// `steps` holds one record per iteration, in order, with 1-based
/// iteration indices; `iterations == steps.len()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RootResult<S> {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Iteration trace.
    pub steps: Vec<S>,
    /// The update rule, for display.
    pub formula: String,
}

/// Trace of a bisection search.
pub type BisectionResult = RootResult<BisectionStep>;

/// Trace of a Newton-Raphson search.
pub type NewtonResult = RootResult<NewtonStep>;
