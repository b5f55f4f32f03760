//! Symbolic expressions of one real variable.
//!
//! [`DifferentiableFunction`] compiles formula text such as `"x^3 - 2*x - 5"`
//! into an evaluable function and exposes its first symbolic derivative.
//!
//! # Grammar
//!
//! | Element | Accepted forms |
//! |---------|----------------|
//! | Variable | `x` |
//! | Constants | `pi`, `e`, numeric literals |
//! | Operators | `+ - * / ^` (`**` is an alias for `^`), unary `-`, parentheses |
//! | Functions | `sin cos tan asin acos atan sinh cosh tanh exp ln log log10 sqrt abs` |
//!
//! `log` is the natural logarithm.
//!
//! # Example
//!
//! ```rust
//! use numerik_math::expression::DifferentiableFunction;
//!
//! let f = DifferentiableFunction::parse("x**2 - 2").unwrap();
//! assert_eq!(f.evaluate(3.0), 7.0);
//! assert_eq!(f.derivative(3.0), 6.0);
//! ```

mod convert;
mod expr;

pub use convert::VARIABLE;
pub use expr::{Expr, Function};

use evalexpr::{build_operator_tree, DefaultNumericTypes};
use once_cell::sync::OnceCell;

use crate::error::{MathError, MathResult};

/// A parsed function of `x` with a lazily derived symbolic derivative.
#[derive(Debug, Clone)]
pub struct DifferentiableFunction {
    source: String,
    expr: Expr,
    derivative: OnceCell<Expr>,
}

impl DifferentiableFunction {
    /// Parses formula text into a function of `x`.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::InvalidExpression`] for malformed syntax, symbols
    /// other than `x`/`pi`/`e`, unknown functions and non-arithmetic operators.
    pub fn parse(text: &str) -> MathResult<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(MathError::invalid_expression("empty expression"));
        }

        let normalized = trimmed.replace("**", "^");
        let node = build_operator_tree::<DefaultNumericTypes>(&normalized)
            .map_err(|e| MathError::invalid_expression(e.to_string()))?;
        let expr = convert::build_expr(&node)?;

        log::debug!("parsed expression '{}' as {}", trimmed, expr);

        Ok(Self {
            source: trimmed.to_string(),
            expr,
            derivative: OnceCell::new(),
        })
    }

    /// The formula text this function was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed expression tree.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Evaluates f(x).
    pub fn evaluate(&self, x: f64) -> f64 {
        self.expr.eval(x)
    }

    /// Evaluates f'(x) from the symbolic derivative.
    pub fn derivative(&self, x: f64) -> f64 {
        self.derivative_expr().eval(x)
    }

    /// The simplified symbolic derivative, built on first use.
    pub fn derivative_expr(&self) -> &Expr {
        self.derivative
            .get_or_init(|| self.expr.derivative().simplify())
    }

    /// The derivative rendered as text.
    pub fn derivative_expression(&self) -> String {
        self.derivative_expr().to_string()
    }

    /// Borrows the function as a closure.
    pub fn as_fn(&self) -> impl Fn(f64) -> f64 + '_ {
        move |x| self.evaluate(x)
    }

    /// Borrows the derivative as a closure.
    pub fn derivative_fn(&self) -> impl Fn(f64) -> f64 + '_ {
        let d = self.derivative_expr();
        move |x| d.eval(x)
    }
}

impl std::str::FromStr for DifferentiableFunction {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
