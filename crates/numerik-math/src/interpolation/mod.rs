//! Polynomial interpolation on equally spaced samples.
//!
//! # Available Methods
//!
//! - [`NewtonForward`]: Newton's forward-difference formula, with truncated
//!   series estimates of the first and second derivative
//!
//! The forward-difference table itself is exposed as [`DifferenceTable`].

mod difference_table;
mod newton_forward;

pub use difference_table::{DifferenceTable, TableRow};
pub use newton_forward::{
    newton_forward_difference, InterpolationFormulas, NewtonForward, NewtonForwardResult,
};
