//! Expression tree for real functions of a single variable.
//!
//! The tree supports three things:
//! - direct evaluation at a point
//! - symbolic differentiation with respect to `x`
//! - algebraic simplification (constant folding and identity rules)
//!
//! # Symbolic Differentiation
//! The derivative method applies the usual calculus rules recursively:
//! sum, product, quotient, power and chain rules, plus the derivatives of
//! the supported elementary functions.

use std::fmt;

/// Elementary functions of one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    /// Sine.
    Sin,
    /// Cosine.
    Cos,
    /// Tangent.
    Tan,
    /// Inverse sine.
    Asin,
    /// Inverse cosine.
    Acos,
    /// Inverse tangent.
    Atan,
    /// Hyperbolic sine.
    Sinh,
    /// Hyperbolic cosine.
    Cosh,
    /// Hyperbolic tangent.
    Tanh,
    /// Natural exponential.
    Exp,
    /// Natural logarithm.
    Ln,
    /// Base-10 logarithm.
    Log10,
    /// Square root.
    Sqrt,
    /// Absolute value.
    Abs,
    /// Sign function, 0 at 0. Only produced by differentiating `abs`.
    Sign,
}

impl Function {
    /// Looks up a function by the name used in expression text.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.strip_prefix("math::").unwrap_or(name);
        let function = match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "exp" => Self::Exp,
            "ln" | "log" => Self::Ln,
            "log10" => Self::Log10,
            "sqrt" => Self::Sqrt,
            "abs" => Self::Abs,
            "sign" => Self::Sign,
            _ => return None,
        };
        Some(function)
    }

    /// Name used when printing.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Exp => "exp",
            Self::Ln => "ln",
            Self::Log10 => "log10",
            Self::Sqrt => "sqrt",
            Self::Abs => "abs",
            Self::Sign => "sign",
        }
    }

    fn apply(self, v: f64) -> f64 {
        match self {
            Self::Sin => v.sin(),
            Self::Cos => v.cos(),
            Self::Tan => v.tan(),
            Self::Asin => v.asin(),
            Self::Acos => v.acos(),
            Self::Atan => v.atan(),
            Self::Sinh => v.sinh(),
            Self::Cosh => v.cosh(),
            Self::Tanh => v.tanh(),
            Self::Exp => v.exp(),
            Self::Ln => v.ln(),
            Self::Log10 => v.log10(),
            Self::Sqrt => v.sqrt(),
            Self::Abs => v.abs(),
            Self::Sign => {
                if v.is_nan() || v == 0.0 {
                    v
                } else {
                    v.signum()
                }
            }
        }
    }

    /// Derivative of the outer function, evaluated at `arg`.
    fn outer_derivative(self, arg: &Expr) -> Expr {
        let u = || Box::new(arg.clone());
        let one = || Box::new(Expr::Const(1.0));
        match self {
            Self::Sin => Expr::Call(Self::Cos, u()),
            Self::Cos => Expr::Neg(Box::new(Expr::Call(Self::Sin, u()))),
            // 1 / cos(u)^2
            Self::Tan => Expr::Div(
                one(),
                Box::new(Expr::Pow(
                    Box::new(Expr::Call(Self::Cos, u())),
                    Box::new(Expr::Const(2.0)),
                )),
            ),
            // 1 / sqrt(1 - u^2)
            Self::Asin | Self::Acos => {
                let d = Expr::Div(
                    one(),
                    Box::new(Expr::Call(
                        Self::Sqrt,
                        Box::new(Expr::Sub(
                            one(),
                            Box::new(Expr::Pow(u(), Box::new(Expr::Const(2.0)))),
                        )),
                    )),
                );
                if self == Self::Acos {
                    Expr::Neg(Box::new(d))
                } else {
                    d
                }
            }
            // 1 / (1 + u^2)
            Self::Atan => Expr::Div(
                one(),
                Box::new(Expr::Add(
                    one(),
                    Box::new(Expr::Pow(u(), Box::new(Expr::Const(2.0)))),
                )),
            ),
            Self::Sinh => Expr::Call(Self::Cosh, u()),
            Self::Cosh => Expr::Call(Self::Sinh, u()),
            // 1 - tanh(u)^2
            Self::Tanh => Expr::Sub(
                one(),
                Box::new(Expr::Pow(
                    Box::new(Expr::Call(Self::Tanh, u())),
                    Box::new(Expr::Const(2.0)),
                )),
            ),
            Self::Exp => Expr::Call(Self::Exp, u()),
            Self::Ln => Expr::Div(one(), u()),
            Self::Log10 => Expr::Div(
                one(),
                Box::new(Expr::Mul(u(), Box::new(Expr::Const(std::f64::consts::LN_10)))),
            ),
            // 1 / (2 sqrt(u))
            Self::Sqrt => Expr::Div(
                one(),
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(2.0)),
                    Box::new(Expr::Call(Self::Sqrt, u())),
                )),
            ),
            Self::Abs => Expr::Call(Self::Sign, u()),
            Self::Sign => Expr::Const(0.0),
        }
    }
}

/// An expression tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric constant.
    Const(f64),
    /// The free variable `x`.
    Var,
    /// Addition of two expressions.
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction of two expressions.
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication of two expressions.
    Mul(Box<Expr>, Box<Expr>),
    /// Division of two expressions.
    Div(Box<Expr>, Box<Expr>),
    /// Exponentiation, `base ^ exponent`.
    Pow(Box<Expr>, Box<Expr>),
    /// Negation.
    Neg(Box<Expr>),
    /// Elementary function applied to an argument.
    Call(Function, Box<Expr>),
}

impl Expr {
    /// Evaluates the expression at `x`.
    ///
    /// Domain errors surface as NaN or infinities, as with the `f64` methods.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Expr::Const(c) => *c,
            Expr::Var => x,
            Expr::Add(l, r) => l.eval(x) + r.eval(x),
            Expr::Sub(l, r) => l.eval(x) - r.eval(x),
            Expr::Mul(l, r) => l.eval(x) * r.eval(x),
            Expr::Div(l, r) => l.eval(x) / r.eval(x),
            Expr::Pow(base, exponent) => {
                let b = base.eval(x);
                match exponent.as_ref() {
                    Expr::Const(n) if n.fract() == 0.0 && n.abs() <= f64::from(i32::MAX) => {
                        b.powi(*n as i32)
                    }
                    other => b.powf(other.eval(x)),
                }
            }
            Expr::Neg(e) => -e.eval(x),
            Expr::Call(function, arg) => function.apply(arg.eval(x)),
        }
    }

    /// Returns true if the expression does not reference `x`.
    pub fn is_constant(&self) -> bool {
        match self {
            Expr::Const(_) => true,
            Expr::Var => false,
            Expr::Add(l, r) | Expr::Sub(l, r) | Expr::Mul(l, r) | Expr::Div(l, r) | Expr::Pow(l, r) => {
                l.is_constant() && r.is_constant()
            }
            Expr::Neg(e) | Expr::Call(_, e) => e.is_constant(),
        }
    }

    /// Computes the symbolic derivative with respect to `x`.
    ///
    /// The result is not simplified; call [`Expr::simplify`] for display.
    pub fn derivative(&self) -> Expr {
        match self {
            Expr::Const(_) => Expr::Const(0.0),
            Expr::Var => Expr::Const(1.0),

            // d/dx(f + g) = df/dx + dg/dx
            Expr::Add(l, r) => Expr::Add(Box::new(l.derivative()), Box::new(r.derivative())),

            // d/dx(f - g) = df/dx - dg/dx
            Expr::Sub(l, r) => Expr::Sub(Box::new(l.derivative()), Box::new(r.derivative())),

            // d/dx(f * g) = f * dg/dx + g * df/dx
            Expr::Mul(l, r) => Expr::Add(
                Box::new(Expr::Mul(l.clone(), Box::new(r.derivative()))),
                Box::new(Expr::Mul(r.clone(), Box::new(l.derivative()))),
            ),

            // d/dx(f / g) = (g * df/dx - f * dg/dx) / g^2
            Expr::Div(l, r) => Expr::Div(
                Box::new(Expr::Sub(
                    Box::new(Expr::Mul(r.clone(), Box::new(l.derivative()))),
                    Box::new(Expr::Mul(l.clone(), Box::new(r.derivative()))),
                )),
                Box::new(Expr::Pow(r.clone(), Box::new(Expr::Const(2.0)))),
            ),

            Expr::Pow(base, exponent) => {
                if exponent.is_constant() {
                    // d/dx(f^c) = c * f^(c-1) * df/dx
                    Expr::Mul(
                        Box::new(Expr::Mul(
                            exponent.clone(),
                            Box::new(Expr::Pow(
                                base.clone(),
                                Box::new(Expr::Sub(exponent.clone(), Box::new(Expr::Const(1.0)))),
                            )),
                        )),
                        Box::new(base.derivative()),
                    )
                } else {
                    // d/dx(f^g) = f^g * (g' * ln(f) + g * f'/f)
                    Expr::Mul(
                        Box::new(self.clone()),
                        Box::new(Expr::Add(
                            Box::new(Expr::Mul(
                                Box::new(exponent.derivative()),
                                Box::new(Expr::Call(Function::Ln, base.clone())),
                            )),
                            Box::new(Expr::Mul(
                                exponent.clone(),
                                Box::new(Expr::Div(Box::new(base.derivative()), base.clone())),
                            )),
                        )),
                    )
                }
            }

            // d/dx(-f) = -(df/dx)
            Expr::Neg(e) => Expr::Neg(Box::new(e.derivative())),

            // chain rule: d/dx(g(f)) = g'(f) * df/dx
            Expr::Call(function, arg) => Expr::Mul(
                Box::new(function.outer_derivative(arg)),
                Box::new(arg.derivative()),
            ),
        }
    }

    /// Simplifies the expression by folding constants and applying identity rules.
    ///
    /// - constant subtrees are evaluated: `2 + 3 -> 5`
    /// - `x + 0 -> x`, `x * 1 -> x`, `x * 0 -> 0`, `x / 1 -> x`
    /// - `x^1 -> x`, `x^0 -> 1`
    /// - `-(-x) -> x`
    pub fn simplify(&self) -> Expr {
        match self {
            Expr::Const(_) | Expr::Var => self.clone(),

            Expr::Add(l, r) => match (l.simplify(), r.simplify()) {
                (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b),
                (e, Expr::Const(z)) | (Expr::Const(z), e) if z == 0.0 => e,
                (a, Expr::Neg(b)) => Expr::Sub(Box::new(a), b).simplify(),
                (a, b) => Expr::Add(Box::new(a), Box::new(b)),
            },

            Expr::Sub(l, r) => match (l.simplify(), r.simplify()) {
                (Expr::Const(a), Expr::Const(b)) => Expr::Const(a - b),
                (e, Expr::Const(z)) if z == 0.0 => e,
                (Expr::Const(z), e) if z == 0.0 => Expr::Neg(Box::new(e)).simplify(),
                (a, b) if a == b => Expr::Const(0.0),
                (a, b) => Expr::Sub(Box::new(a), Box::new(b)),
            },

            Expr::Mul(l, r) => match (l.simplify(), r.simplify()) {
                (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b),
                (Expr::Const(z), _) | (_, Expr::Const(z)) if z == 0.0 => Expr::Const(0.0),
                (e, Expr::Const(o)) | (Expr::Const(o), e) if o == 1.0 => e,
                (e, Expr::Const(m)) | (Expr::Const(m), e) if m == -1.0 => {
                    Expr::Neg(Box::new(e)).simplify()
                }
                // keep constants on the left: x * 3 -> 3 * x
                (e, Expr::Const(c)) => Expr::Mul(Box::new(Expr::Const(c)), Box::new(e)),
                // c1 * (c2 * e) -> (c1 * c2) * e
                (Expr::Const(a), Expr::Mul(inner_l, inner_r)) => match *inner_l {
                    Expr::Const(b) => Expr::Mul(Box::new(Expr::Const(a * b)), inner_r),
                    other => Expr::Mul(
                        Box::new(Expr::Const(a)),
                        Box::new(Expr::Mul(Box::new(other), inner_r)),
                    ),
                },
                (a, b) => Expr::Mul(Box::new(a), Box::new(b)),
            },

            Expr::Div(l, r) => match (l.simplify(), r.simplify()) {
                (Expr::Const(a), Expr::Const(b)) if b != 0.0 => Expr::Const(a / b),
                (Expr::Const(z), _) if z == 0.0 => Expr::Const(0.0),
                (e, Expr::Const(o)) if o == 1.0 => e,
                (a, b) => Expr::Div(Box::new(a), Box::new(b)),
            },

            Expr::Pow(base, exponent) => match (base.simplify(), exponent.simplify()) {
                (Expr::Const(a), Expr::Const(b)) => Expr::Const(a.powf(b)),
                (_, Expr::Const(z)) if z == 0.0 => Expr::Const(1.0),
                (e, Expr::Const(o)) if o == 1.0 => e,
                (a, b) => Expr::Pow(Box::new(a), Box::new(b)),
            },

            Expr::Neg(e) => match e.simplify() {
                Expr::Const(c) => Expr::Const(-c),
                Expr::Neg(inner) => *inner,
                other => Expr::Neg(Box::new(other)),
            },

            Expr::Call(function, arg) => match arg.simplify() {
                Expr::Const(c) => Expr::Const(function.apply(c)),
                other => Expr::Call(*function, Box::new(other)),
            },
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(val) => write!(f, "{val}"),
            Expr::Var => write!(f, "x"),
            Expr::Add(l, r) => write!(f, "({l} + {r})"),
            Expr::Sub(l, r) => write!(f, "({l} - {r})"),
            Expr::Mul(l, r) => write!(f, "({l} * {r})"),
            Expr::Div(l, r) => write!(f, "({l} / {r})"),
            Expr::Pow(base, exponent) => write!(f, "({base}^{exponent})"),
            Expr::Neg(e) => write!(f, "-({e})"),
            Expr::Call(function, arg) => write!(f, "{}({arg})", function.name()),
        }
    }
}
