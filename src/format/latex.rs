use crate::expr::Expr;
use crate::format::expr::{function_name, is_half, split_neg};
use num_rational::BigRational;
use num_traits::Signed;

/// LaTeX rendering in the shape a typical CAS emits.
///
/// Inverse functions come out as `\operatorname{atan}` and the natural log as
/// `\log`; the tutor's display layer rewrites both for learners.
pub fn latex(expr: &Expr) -> String {
    fn tex(ctx: u8, expr: &Expr) -> String {
        match expr {
            Expr::Variable(v) => v.clone(),
            Expr::Constant(r) => tex_rational(ctx, r),
            Expr::Pi => "\\pi".to_string(),

            Expr::Add(a, b) | Expr::Sub(a, b) => {
                let (neg_b, b_inner) = split_neg(b);
                let minus = neg_b ^ matches!(expr, Expr::Sub(_, _));
                let body = format!(
                    "{} {} {}",
                    tex(1, a),
                    if minus { "-" } else { "+" },
                    tex(2, &b_inner)
                );
                paren(ctx, 1, body)
            }

            Expr::Mul(a, b) => {
                let (na, a_inner) = split_neg(a);
                let (nb, b_inner) = split_neg(b);
                let sep = if is_numeric(&b_inner) { " \\cdot " } else { " " };
                let body = format!("{}{sep}{}", tex(2, &a_inner), tex(2, &b_inner));
                if na ^ nb {
                    paren(ctx, 2, format!("- {body}"))
                } else {
                    paren(ctx, 2, body)
                }
            }

            Expr::Div(a, b) => {
                let (na, a_inner) = split_neg(a);
                let (nb, b_inner) = split_neg(b);
                let body = format!("\\frac{{{}}}{{{}}}", tex(0, &a_inner), tex(0, &b_inner));
                if na ^ nb {
                    paren(ctx, 2, format!("- {body}"))
                } else {
                    body
                }
            }

            Expr::Pow(a, b) if is_half(b) => format!("\\sqrt{{{}}}", tex(0, a)),
            Expr::Pow(a, b) => {
                let base = match &**a {
                    Expr::Variable(_) | Expr::Pi => tex(4, a),
                    Expr::Constant(r) if r.is_integer() && !r.is_negative() => tex(4, a),
                    e if e.is_euler() => tex(4, a),
                    other => format!("\\left({}\\right)", tex(0, other)),
                };
                format!("{base}^{{{}}}", tex(0, b))
            }

            Expr::Neg(a) => {
                let (is_neg, inner) = split_neg(a);
                if is_neg {
                    tex(ctx, &inner)
                } else {
                    paren(ctx, 2, format!("- {}", tex(2, &inner)))
                }
            }

            e if e.is_euler() => "e".to_string(),
            Expr::Exp(a) => format!("e^{{{}}}", tex(0, a)),
            Expr::Abs(a) => format!("\\left|{{{}}}\\right|", tex(0, a)),
            other => {
                let arg = other
                    .children()
                    .into_iter()
                    .next()
                    .map(|a| tex(0, a))
                    .unwrap_or_default();
                format!("{}{{\\left({arg} \\right)}}", tex_function(other))
            }
        }
    }

    tex(0, expr)
}

fn tex_function(expr: &Expr) -> String {
    match expr {
        Expr::Sin(_)
        | Expr::Cos(_)
        | Expr::Tan(_)
        | Expr::Sec(_)
        | Expr::Csc(_)
        | Expr::Cot(_)
        | Expr::Sinh(_)
        | Expr::Cosh(_)
        | Expr::Tanh(_)
        | Expr::Coth(_)
        | Expr::Log(_) => format!("\\{}", function_name(expr)),
        other => format!("\\operatorname{{{}}}", function_name(other)),
    }
}

fn is_numeric(expr: &Expr) -> bool {
    matches!(expr, Expr::Constant(_))
}

fn paren(ctx: u8, prec: u8, body: String) -> String {
    if prec < ctx {
        format!("\\left({body}\\right)")
    } else {
        body
    }
}

fn tex_rational(ctx: u8, r: &BigRational) -> String {
    let n = r.numer().clone();
    let d = r.denom().clone();
    if d == 1.into() {
        paren(ctx, if n < 0.into() { 2 } else { 4 }, format!("{n}"))
    } else if n < 0.into() {
        paren(ctx, 2, format!("- \\frac{{{}}}{{{d}}}", -n))
    } else {
        format!("\\frac{{{n}}}{{{d}}}")
    }
}
