//! Expression tree definitions and helpers.

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

pub type Rational = BigRational;

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Expr {
    Variable(String),
    Constant(Rational),
    Pi,
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Neg(Box<Expr>),
    Sin(Box<Expr>),
    Cos(Box<Expr>),
    Tan(Box<Expr>),
    Sec(Box<Expr>),
    Csc(Box<Expr>),
    Cot(Box<Expr>),
    Atan(Box<Expr>),
    Asin(Box<Expr>),
    Acos(Box<Expr>),
    Asec(Box<Expr>),
    Acsc(Box<Expr>),
    Acot(Box<Expr>),
    Sinh(Box<Expr>),
    Cosh(Box<Expr>),
    Tanh(Box<Expr>),
    Sech(Box<Expr>),
    Csch(Box<Expr>),
    Coth(Box<Expr>),
    Asinh(Box<Expr>),
    Acosh(Box<Expr>),
    Atanh(Box<Expr>),
    Exp(Box<Expr>),
    Log(Box<Expr>),
    Abs(Box<Expr>),
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    pub fn constant(num: impl Into<BigInt>, den: impl Into<BigInt>) -> Self {
        Expr::Constant(Rational::new(num.into(), den.into()))
    }

    pub fn integer(value: impl Into<BigInt>) -> Self {
        Expr::Constant(Rational::from_integer(value.into()))
    }

    /// Euler's number, kept symbolic as `exp(1)`.
    pub fn euler() -> Self {
        Expr::Exp(one().boxed())
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Constant(r) if r.is_zero())
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Constant(r) if r.is_one())
    }

    pub fn is_euler(&self) -> bool {
        matches!(self, Expr::Exp(inner) if inner.is_one())
    }

    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Direct subexpressions, left to right.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Variable(_) | Expr::Constant(_) | Expr::Pi => Vec::new(),
            Expr::Add(a, b)
            | Expr::Sub(a, b)
            | Expr::Mul(a, b)
            | Expr::Div(a, b)
            | Expr::Pow(a, b) => vec![&**a, &**b],
            Expr::Neg(a)
            | Expr::Sin(a)
            | Expr::Cos(a)
            | Expr::Tan(a)
            | Expr::Sec(a)
            | Expr::Csc(a)
            | Expr::Cot(a)
            | Expr::Atan(a)
            | Expr::Asin(a)
            | Expr::Acos(a)
            | Expr::Asec(a)
            | Expr::Acsc(a)
            | Expr::Acot(a)
            | Expr::Sinh(a)
            | Expr::Cosh(a)
            | Expr::Tanh(a)
            | Expr::Sech(a)
            | Expr::Csch(a)
            | Expr::Coth(a)
            | Expr::Asinh(a)
            | Expr::Acosh(a)
            | Expr::Atanh(a)
            | Expr::Exp(a)
            | Expr::Log(a)
            | Expr::Abs(a) => vec![&**a],
        }
    }

    /// Rebuild this node with `f` applied to every direct child.
    pub fn map_children<F>(&self, mut f: F) -> Expr
    where
        F: FnMut(&Expr) -> Expr,
    {
        match self {
            Expr::Variable(_) | Expr::Constant(_) | Expr::Pi => self.clone(),
            Expr::Add(a, b) => Expr::Add(f(a).boxed(), f(b).boxed()),
            Expr::Sub(a, b) => Expr::Sub(f(a).boxed(), f(b).boxed()),
            Expr::Mul(a, b) => Expr::Mul(f(a).boxed(), f(b).boxed()),
            Expr::Div(a, b) => Expr::Div(f(a).boxed(), f(b).boxed()),
            Expr::Pow(a, b) => Expr::Pow(f(a).boxed(), f(b).boxed()),
            Expr::Neg(a) => Expr::Neg(f(a).boxed()),
            Expr::Sin(a) => Expr::Sin(f(a).boxed()),
            Expr::Cos(a) => Expr::Cos(f(a).boxed()),
            Expr::Tan(a) => Expr::Tan(f(a).boxed()),
            Expr::Sec(a) => Expr::Sec(f(a).boxed()),
            Expr::Csc(a) => Expr::Csc(f(a).boxed()),
            Expr::Cot(a) => Expr::Cot(f(a).boxed()),
            Expr::Atan(a) => Expr::Atan(f(a).boxed()),
            Expr::Asin(a) => Expr::Asin(f(a).boxed()),
            Expr::Acos(a) => Expr::Acos(f(a).boxed()),
            Expr::Asec(a) => Expr::Asec(f(a).boxed()),
            Expr::Acsc(a) => Expr::Acsc(f(a).boxed()),
            Expr::Acot(a) => Expr::Acot(f(a).boxed()),
            Expr::Sinh(a) => Expr::Sinh(f(a).boxed()),
            Expr::Cosh(a) => Expr::Cosh(f(a).boxed()),
            Expr::Tanh(a) => Expr::Tanh(f(a).boxed()),
            Expr::Sech(a) => Expr::Sech(f(a).boxed()),
            Expr::Csch(a) => Expr::Csch(f(a).boxed()),
            Expr::Coth(a) => Expr::Coth(f(a).boxed()),
            Expr::Asinh(a) => Expr::Asinh(f(a).boxed()),
            Expr::Acosh(a) => Expr::Acosh(f(a).boxed()),
            Expr::Atanh(a) => Expr::Atanh(f(a).boxed()),
            Expr::Exp(a) => Expr::Exp(f(a).boxed()),
            Expr::Log(a) => Expr::Log(f(a).boxed()),
            Expr::Abs(a) => Expr::Abs(f(a).boxed()),
        }
    }

    pub fn depends_on(&self, var: &str) -> bool {
        match self {
            Expr::Variable(name) => name == var,
            other => other.children().into_iter().any(|c| c.depends_on(var)),
        }
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        1 + self.children().into_iter().map(Expr::size).sum::<usize>()
    }

    /// Length of the longest root-to-leaf path, counting both ends.
    pub fn depth(&self) -> usize {
        1 + self.children().into_iter().map(Expr::depth).max().unwrap_or(0)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::format::pretty(self))
    }
}

pub fn zero() -> Expr {
    Expr::Constant(Rational::zero())
}

pub fn one() -> Expr {
    Expr::Constant(Rational::one())
}

pub fn two() -> Expr {
    Expr::integer(2)
}

pub fn half() -> Expr {
    Expr::constant(1, 2)
}

pub fn rational(num: i64, den: i64) -> Rational {
    Rational::new(num.into(), den.into())
}

pub fn pow(base: Expr, exp: Expr) -> Expr {
    Expr::Pow(base.boxed(), exp.boxed())
}

pub fn add(a: Expr, b: Expr) -> Expr {
    Expr::Add(a.boxed(), b.boxed())
}

pub fn sub(a: Expr, b: Expr) -> Expr {
    Expr::Sub(a.boxed(), b.boxed())
}

pub fn mul(a: Expr, b: Expr) -> Expr {
    Expr::Mul(a.boxed(), b.boxed())
}

pub fn div(a: Expr, b: Expr) -> Expr {
    Expr::Div(a.boxed(), b.boxed())
}

pub fn neg(a: Expr) -> Expr {
    Expr::Neg(a.boxed())
}
