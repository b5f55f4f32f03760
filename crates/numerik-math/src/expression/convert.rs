//! Conversion of evalexpr operator trees into [`Expr`].
//!
//! evalexpr does the tokenizing and precedence parsing; this module walks the
//! resulting tree and maps variables, operators and function calls onto the
//! single-variable expression type. Anything outside the supported grammar is
//! reported as [`MathError::InvalidExpression`].

use evalexpr::{Node, Operator, Value};

use crate::error::{MathError, MathResult};
use crate::expression::expr::{Expr, Function};

/// Name of the free variable.
pub const VARIABLE: &str = "x";

/// Converts an evalexpr node into an [`Expr`].
///
/// Supported:
/// * arithmetic: `+`, `-`, `*`, `/`, `^`, unary minus
/// * the variable `x` and the constants `pi`, `e`
/// * one-argument functions known to [`Function::from_name`]
pub fn build_expr(node: &Node) -> MathResult<Expr> {
    let children = node.children();
    match node.operator() {
        Operator::RootNode => match children {
            [child] => build_expr(child),
            [] => Err(MathError::invalid_expression("empty expression")),
            _ => Err(MathError::invalid_expression(
                "expected a single expression",
            )),
        },

        Operator::Add => fold_binary(children, |l, r| Expr::Add(Box::new(l), Box::new(r))),
        Operator::Mul => fold_binary(children, |l, r| Expr::Mul(Box::new(l), Box::new(r))),
        Operator::Sub => binary(children, |l, r| Expr::Sub(Box::new(l), Box::new(r))),
        Operator::Div => binary(children, |l, r| Expr::Div(Box::new(l), Box::new(r))),
        Operator::Exp => binary(children, |l, r| Expr::Pow(Box::new(l), Box::new(r))),

        Operator::Neg => match children {
            [child] => Ok(Expr::Neg(Box::new(build_expr(child)?))),
            _ => Err(MathError::invalid_expression("malformed negation")),
        },

        Operator::Const { value } => match value {
            Value::Float(f) => Ok(Expr::Const(*f)),
            Value::Int(i) => Ok(Expr::Const(*i as f64)),
            other => Err(MathError::invalid_expression(format!(
                "expected numeric constant, got {other:?}"
            ))),
        },

        Operator::VariableIdentifierRead { identifier } => match identifier.as_str() {
            VARIABLE => Ok(Expr::Var),
            "pi" | "PI" => Ok(Expr::Const(std::f64::consts::PI)),
            "e" | "E" => Ok(Expr::Const(std::f64::consts::E)),
            other => Err(MathError::invalid_expression(format!(
                "undefined symbol '{other}', only '{VARIABLE}' is allowed"
            ))),
        },

        Operator::FunctionIdentifier { identifier } => {
            let function = Function::from_name(identifier).ok_or_else(|| {
                MathError::invalid_expression(format!("unsupported function '{identifier}'"))
            })?;
            match children {
                [arg] => {
                    if matches!(arg.operator(), Operator::Tuple) {
                        return Err(MathError::invalid_expression(format!(
                            "function '{identifier}' takes exactly one argument"
                        )));
                    }
                    Ok(Expr::Call(function, Box::new(build_expr(arg)?)))
                }
                _ => Err(MathError::invalid_expression(format!(
                    "function '{identifier}' takes exactly one argument"
                ))),
            }
        }

        other => Err(MathError::invalid_expression(format!(
            "unsupported operator {other:?}"
        ))),
    }
}

fn binary<F>(children: &[Node], combine: F) -> MathResult<Expr>
where
    F: Fn(Expr, Expr) -> Expr,
{
    match children {
        [l, r] => Ok(combine(build_expr(l)?, build_expr(r)?)),
        _ => Err(MathError::invalid_expression("operator expects two operands")),
    }
}

fn fold_binary<F>(children: &[Node], combine: F) -> MathResult<Expr>
where
    F: Fn(Expr, Expr) -> Expr,
{
    let (first, rest) = match children {
        [first, rest @ ..] if !rest.is_empty() => (first, rest),
        _ => return Err(MathError::invalid_expression("operator expects two operands")),
    };
    rest.iter()
        .try_fold(build_expr(first)?, |acc, child| Ok(combine(acc, build_expr(child)?)))
}
