//! Floating-point evaluation of closed expressions.

use crate::error::{Result, TutorError};
use crate::expr::{Expr, Rational};
use crate::simplify::substitute;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive};

/// Values closer to zero than this are treated as round-off and print as zero.
const NOISE_FLOOR: f64 = 1e-12;

/// Evaluate `expr` after replacing `var` with the integer `point`.
pub fn evaluate_at(expr: &Expr, var: &str, point: i64) -> Result<f64> {
    evaluate(&substitute(expr, var, &Expr::integer(point)))
}

/// Evaluate an expression with no free variables over the reals.
///
/// Anything outside the real domain (poles, logs of non-positive values,
/// even roots of negatives) is reported as [`TutorError::Domain`].
pub fn evaluate(expr: &Expr) -> Result<f64> {
    let value = match expr {
        Expr::Variable(name) => {
            return Err(TutorError::Domain(format!("unbound symbol `{name}`")));
        }
        Expr::Constant(r) => rational_to_f64(r)?,
        Expr::Pi => std::f64::consts::PI,

        Expr::Add(a, b) => evaluate(a)? + evaluate(b)?,
        Expr::Sub(a, b) => evaluate(a)? - evaluate(b)?,
        Expr::Mul(a, b) => evaluate(a)? * evaluate(b)?,
        Expr::Div(a, b) => {
            let den = evaluate(b)?;
            if den == 0.0 {
                return Err(TutorError::Domain("division by zero".to_string()));
            }
            evaluate(a)? / den
        }
        Expr::Pow(a, b) => power(evaluate(a)?, b)?,
        Expr::Neg(a) => -evaluate(a)?,

        Expr::Sin(a) => evaluate(a)?.sin(),
        Expr::Cos(a) => evaluate(a)?.cos(),
        Expr::Tan(a) => evaluate(a)?.tan(),
        Expr::Sec(a) => reciprocal(evaluate(a)?.cos(), "sec")?,
        Expr::Csc(a) => reciprocal(evaluate(a)?.sin(), "csc")?,
        Expr::Cot(a) => reciprocal(evaluate(a)?.tan(), "cot")?,
        Expr::Asin(a) => evaluate(a)?.asin(),
        Expr::Acos(a) => evaluate(a)?.acos(),
        Expr::Atan(a) => evaluate(a)?.atan(),
        Expr::Asec(a) => reciprocal(evaluate(a)?, "asec")?.acos(),
        Expr::Acsc(a) => reciprocal(evaluate(a)?, "acsc")?.asin(),
        Expr::Acot(a) => {
            // Principal branch in (-pi/2, pi/2], matching atan(1/u).
            let u = evaluate(a)?;
            if u == 0.0 {
                std::f64::consts::FRAC_PI_2
            } else {
                (1.0 / u).atan()
            }
        }

        Expr::Sinh(a) => evaluate(a)?.sinh(),
        Expr::Cosh(a) => evaluate(a)?.cosh(),
        Expr::Tanh(a) => evaluate(a)?.tanh(),
        Expr::Sech(a) => reciprocal(evaluate(a)?.cosh(), "sech")?,
        Expr::Csch(a) => reciprocal(evaluate(a)?.sinh(), "csch")?,
        Expr::Coth(a) => reciprocal(evaluate(a)?.tanh(), "coth")?,
        Expr::Asinh(a) => evaluate(a)?.asinh(),
        Expr::Acosh(a) => evaluate(a)?.acosh(),
        Expr::Atanh(a) => evaluate(a)?.atanh(),

        Expr::Exp(a) => evaluate(a)?.exp(),
        Expr::Log(a) => {
            let u = evaluate(a)?;
            if u <= 0.0 {
                return Err(TutorError::Domain(format!("log of non-positive value {u}")));
            }
            u.ln()
        }
        Expr::Abs(a) => evaluate(a)?.abs(),
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(TutorError::Domain(format!("`{expr}` is undefined")))
    }
}

fn rational_to_f64(r: &Rational) -> Result<f64> {
    r.to_f64()
        .ok_or_else(|| TutorError::Domain(format!("constant {r} out of range")))
}

fn reciprocal(value: f64, name: &str) -> Result<f64> {
    if value == 0.0 {
        Err(TutorError::Domain(format!("{name} has a pole here")))
    } else {
        Ok(1.0 / value)
    }
}

/// Real power. Negative bases take real odd roots (`cbrt(-8) = -2`); any
/// other non-integer power of a negative base is outside the real domain.
fn power(base: f64, exp: &Expr) -> Result<f64> {
    if let Expr::Constant(r) = exp {
        if base < 0.0 && !r.is_integer() {
            if r.denom().is_odd() {
                let magnitude = base.abs().powf(rational_to_f64(&r.abs())?);
                let signed = if r.numer().is_odd() { -magnitude } else { magnitude };
                return Ok(if r.is_negative() { 1.0 / signed } else { signed });
            }
            return Err(TutorError::Domain(format!("even root of negative value {base}")));
        }
    }
    let e = evaluate(exp)?;
    if base == 0.0 && e < 0.0 {
        return Err(TutorError::Domain("zero raised to a negative power".to_string()));
    }
    Ok(base.powf(e))
}

/// Render `value` with `digits` significant figures in `d.ddde±n` form.
///
/// The value is first rounded to 12 significant figures so that two
/// computations of the same number that differ only in the last few bits
/// render identically.
pub fn to_significant(value: f64, digits: usize) -> String {
    let digits = digits.clamp(1, 15);
    let cleaned = format!("{value:.11e}").parse::<f64>().unwrap_or(value);
    let cleaned = if cleaned.abs() < NOISE_FLOOR { 0.0 } else { cleaned };
    format!("{:.*e}", digits - 1, cleaned)
}
