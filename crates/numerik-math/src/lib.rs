//! # Numerik Math
//!
//! Introductory numerical methods with full iteration traces.
//!
//! This crate provides:
//!
//! - **Expressions**: Formula text compiled into a function of `x` with a symbolic derivative
//! - **Solvers**: Root finding by bisection and Newton-Raphson
//! - **Differentiation**: Forward, backward and central finite differences
//! - **Error Analysis**: Absolute, relative and percentage error
//! - **Interpolation**: Newton's forward-difference formula with derivative estimates
//!
//! ## Design Philosophy
//!
//! - **Traceable**: Every iterative method returns the steps it took, not just the answer
//! - **Total**: Every failure is a [`MathError`]; nothing panics on bad input
//! - **Stateless**: Each call is independent and pure

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::uninlined_format_args)]

pub mod differentiation;
pub mod error;
pub mod error_analysis;
pub mod expression;
pub mod interpolation;
pub mod requests;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::differentiation::{
        function_differences, sample_differences, Differentiation, DifferentiationRequest,
    };
    pub use crate::error::{MathError, MathResult};
    pub use crate::error_analysis::{calculate_error, ErrorMetrics};
    pub use crate::expression::DifferentiableFunction;
    pub use crate::interpolation::{newton_forward_difference, DifferenceTable, NewtonForward};
    pub use crate::requests::Outcome;
    pub use crate::solvers::{bisection, newton_raphson, RootResult, SolverConfig};
}

pub use error::{MathError, MathResult};
