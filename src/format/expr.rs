use crate::expr::Expr;
use num_rational::BigRational;
use num_traits::{One, Signed};

fn collect_mul_factors(expr: &Expr, out: &mut Vec<Expr>) {
    match expr {
        Expr::Mul(a, b) => {
            collect_mul_factors(a, out);
            collect_mul_factors(b, out);
        }
        other => out.push(other.clone()),
    }
}

fn rebuild_mul_factors(factors: Vec<Expr>) -> Expr {
    let mut iter = factors.into_iter();
    let Some(first) = iter.next() else {
        return Expr::Constant(BigRational::one());
    };
    iter.fold(first, |acc, item| Expr::Mul(acc.boxed(), item.boxed()))
}

/// Infix rendering that `parse_expr` reads back.
///
/// Inverse functions print with the `a` prefix (`atan`), the natural log as
/// `log`, square roots as `sqrt(..)` and `exp(1)` as `e`.
pub fn pretty(expr: &Expr) -> String {
    fn pp(ctx: u8, expr: &Expr) -> String {
        match expr {
            Expr::Variable(v) => v.clone(),
            Expr::Constant(r) => show_rational(ctx, r),
            Expr::Pi => "pi".to_string(),

            Expr::Add(a, b) => {
                let s_a = pp(1, a);
                let (neg_b, b_inner) = split_neg(b);
                let s_b = pp(2, &b_inner);
                let body = format!("{s_a}{}{}", if neg_b { "-" } else { "+" }, s_b);
                bracket(ctx, 1, body)
            }

            Expr::Sub(a, b) => {
                let s_a = pp(1, a);
                let (neg_b, b_inner) = split_neg(b);
                let s_b = pp(2, &b_inner);
                let body = format!("{s_a}{}{}", if neg_b { "+" } else { "-" }, s_b);
                bracket(ctx, 1, body)
            }

            Expr::Mul(_, _) => {
                let mut factors = Vec::new();
                collect_mul_factors(expr, &mut factors);
                let mut neg = false;
                let mut parts = Vec::with_capacity(factors.len());
                for factor in factors {
                    let (is_neg, inner) = split_neg(&factor);
                    neg ^= is_neg;
                    parts.push(pp(2, &inner));
                }
                let body = parts.join("*");
                if neg {
                    bracket(ctx, 2, format!("-{body}"))
                } else {
                    bracket(ctx, 2, body)
                }
            }

            Expr::Div(a, b) => {
                let (na, a_inner) = split_neg(a);
                let (nb, b_inner) = split_neg(b);
                let body = format!("{}/{}", pp(2, &a_inner), pp(3, &b_inner));
                if na ^ nb {
                    bracket(ctx, 2, format!("-{body}"))
                } else {
                    bracket(ctx, 2, body)
                }
            }

            Expr::Pow(a, b) if is_half(b) => format!("sqrt({})", pp(0, a)),
            Expr::Pow(a, b) => bracket(ctx, 3, format!("{}^{}", pp(4, a), pp(3, b))),

            Expr::Neg(a) => {
                let (is_neg, inner) = split_neg(a);
                if is_neg {
                    pp(ctx, &inner)
                } else {
                    bracket(ctx, 2, format!("-{}", pp(2, &inner)))
                }
            }

            e if e.is_euler() => "e".to_string(),
            Expr::Exp(a) => format!("exp({})", pp(0, a)),
            other => {
                let arg = other.children().into_iter().next().map(|a| pp(0, a));
                format!("{}({})", function_name(other), arg.unwrap_or_default())
            }
        }
    }

    pp(0, expr)
}

/// Name of a one-argument function node as the parser spells it.
pub(crate) fn function_name(expr: &Expr) -> &'static str {
    match expr {
        Expr::Sin(_) => "sin",
        Expr::Cos(_) => "cos",
        Expr::Tan(_) => "tan",
        Expr::Sec(_) => "sec",
        Expr::Csc(_) => "csc",
        Expr::Cot(_) => "cot",
        Expr::Atan(_) => "atan",
        Expr::Asin(_) => "asin",
        Expr::Acos(_) => "acos",
        Expr::Asec(_) => "asec",
        Expr::Acsc(_) => "acsc",
        Expr::Acot(_) => "acot",
        Expr::Sinh(_) => "sinh",
        Expr::Cosh(_) => "cosh",
        Expr::Tanh(_) => "tanh",
        Expr::Sech(_) => "sech",
        Expr::Csch(_) => "csch",
        Expr::Coth(_) => "coth",
        Expr::Asinh(_) => "asinh",
        Expr::Acosh(_) => "acosh",
        Expr::Atanh(_) => "atanh",
        Expr::Exp(_) => "exp",
        Expr::Log(_) => "log",
        Expr::Abs(_) => "abs",
        _ => "",
    }
}

pub(crate) fn is_half(expr: &Expr) -> bool {
    matches!(expr, Expr::Constant(r) if r == &BigRational::new(1.into(), 2.into()))
}

pub(crate) fn split_neg(expr: &Expr) -> (bool, Expr) {
    match expr {
        Expr::Neg(inner) => (true, *inner.clone()),
        Expr::Constant(r) if r.is_negative() => (true, Expr::Constant(-r)),
        Expr::Mul(_, _) => {
            let mut factors = Vec::new();
            collect_mul_factors(expr, &mut factors);
            let mut neg = false;
            let mut cleaned = Vec::with_capacity(factors.len());
            for factor in factors {
                let (is_neg, inner) = split_neg(&factor);
                neg ^= is_neg;
                cleaned.push(inner);
            }
            if neg {
                (true, rebuild_mul_factors(cleaned))
            } else {
                (false, expr.clone())
            }
        }
        other => (false, other.clone()),
    }
}

fn bracket(ctx: u8, prec: u8, body: String) -> String {
    if prec < ctx {
        format!("({body})")
    } else {
        body
    }
}

fn show_rational(ctx: u8, r: &BigRational) -> String {
    let n = r.numer().clone();
    let d = r.denom().clone();
    if d == 1.into() {
        bracket(ctx, if n < 0.into() { 2 } else { 4 }, format!("{n}"))
    } else {
        bracket(ctx, 2, format!("{n}/{d}"))
    }
}
