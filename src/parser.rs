//! Infix expression parser.
//!
//! Precedence, loosest first: `+ -`, `* /`, unary sign, `^`/`**` (right
//! associative), then primaries. Decimal literals become exact rationals.

use crate::error::{Result, TutorError};
use crate::expr::{Expr, Rational, div, half, pow, rational};
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{alpha1, alphanumeric0, char, digit0, digit1, multispace0};
use nom::combinator::{all_consuming, map, map_res, opt, recognize};
use nom::error::{ErrorKind, ParseError, VerboseError};
use nom::multi::{fold_many0, separated_list1};
use nom::sequence::{delimited, pair, preceded};
use num_bigint::BigInt;
use num_traits::Num;

type PResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

pub fn parse_expr(input: &str) -> Result<Expr> {
    match all_consuming(ws(parse_add_sub))(input) {
        Ok((_, expr)) => Ok(expr),
        Err(e) => Err(TutorError::Parse(format!("{e:?}"))),
    }
}

fn parse_add_sub(input: &str) -> PResult<'_, Expr> {
    let (rest, init) = parse_mul_div(input)?;
    fold_many0(
        pair(ws(alt((char('+'), char('-')))), parse_mul_div),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '+' => Expr::Add(acc.boxed(), rhs.boxed()),
            '-' => Expr::Sub(acc.boxed(), rhs.boxed()),
            _ => unreachable!(),
        },
    )(rest)
}

fn parse_mul_div(input: &str) -> PResult<'_, Expr> {
    let (rest, init) = parse_unary(input)?;
    fold_many0(
        pair(ws(alt((char('*'), char('/')))), parse_unary),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '*' => Expr::Mul(acc.boxed(), rhs.boxed()),
            '/' => Expr::Div(acc.boxed(), rhs.boxed()),
            _ => unreachable!(),
        },
    )(rest)
}

fn parse_unary(input: &str) -> PResult<'_, Expr> {
    if let Ok((rest, expr)) = preceded(ws(char('-')), parse_unary)(input) {
        Ok((rest, Expr::Neg(expr.boxed())))
    } else if let Ok((rest, expr)) = preceded(ws(char('+')), parse_unary)(input) {
        Ok((rest, expr))
    } else {
        parse_pow(input)
    }
}

fn parse_pow(input: &str) -> PResult<'_, Expr> {
    let (rest, base) = parse_primary(input)?;
    if let Ok((next, exp)) = preceded(ws(alt((tag("**"), tag("^")))), parse_unary)(rest) {
        Ok((next, Expr::Pow(base.boxed(), exp.boxed())))
    } else {
        Ok((rest, base))
    }
}

fn parse_primary(input: &str) -> PResult<'_, Expr> {
    alt((parse_parens, parse_number, parse_function, parse_identifier))(input)
}

fn parse_parens(input: &str) -> PResult<'_, Expr> {
    delimited(ws(char('(')), parse_add_sub, ws(char(')')))(input)
}

fn parse_number(input: &str) -> PResult<'_, Expr> {
    map_res(
        ws(alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        ))),
        |s: &str| decimal_to_rational(s).map(Expr::Constant),
    )(input)
}

fn decimal_to_rational(literal: &str) -> std::result::Result<Rational, num_bigint::ParseBigIntError> {
    let (whole, frac) = literal.split_once('.').unwrap_or((literal, ""));
    let digits = format!("{whole}{frac}");
    let numer = if digits.is_empty() {
        BigInt::from(0)
    } else {
        BigInt::from_str_radix(&digits, 10)?
    };
    let denom = num_traits::pow(BigInt::from(10), frac.len());
    Ok(Rational::new(numer, denom))
}

fn parse_identifier(input: &str) -> PResult<'_, Expr> {
    map(ws(recognize(pair(alpha1, alphanumeric0))), |s: &str| match s {
        "e" | "E" => Expr::euler(),
        "pi" => Expr::Pi,
        other => Expr::Variable(other.to_string()),
    })(input)
}

fn parse_function(input: &str) -> PResult<'_, Expr> {
    let (rest, (name, mut args)) = pair(
        ws(parse_function_name),
        alt((
            delimited(
                ws(char('(')),
                separated_list1(ws(char(',')), parse_add_sub),
                ws(char(')')),
            ),
            map(parse_pow, |arg| vec![arg]),
        )),
    )(input)?;

    let arity_ok = match name {
        "log" => matches!(args.len(), 1 | 2),
        _ => args.len() == 1,
    };
    if !arity_ok {
        return Err(nom::Err::Error(VerboseError::from_error_kind(
            input,
            ErrorKind::Verify,
        )));
    }

    if args.len() == 2 {
        let base = args.pop().map(|b| Expr::Log(b.boxed()));
        let value = args.pop().map(|v| Expr::Log(v.boxed()));
        if let (Some(value), Some(base)) = (value, base) {
            return Ok((rest, div(value, base)));
        }
    }
    let Some(arg) = args.pop() else {
        return Err(nom::Err::Error(VerboseError::from_error_kind(
            input,
            ErrorKind::Verify,
        )));
    };

    let expr = match name {
        "sin" => Expr::Sin(arg.boxed()),
        "cos" => Expr::Cos(arg.boxed()),
        "tan" => Expr::Tan(arg.boxed()),
        "sec" => Expr::Sec(arg.boxed()),
        "csc" => Expr::Csc(arg.boxed()),
        "cot" => Expr::Cot(arg.boxed()),
        "arctan" | "atan" => Expr::Atan(arg.boxed()),
        "arcsin" | "asin" => Expr::Asin(arg.boxed()),
        "arccos" | "acos" => Expr::Acos(arg.boxed()),
        "arcsec" | "asec" => Expr::Asec(arg.boxed()),
        "arccsc" | "acsc" => Expr::Acsc(arg.boxed()),
        "arccot" | "acot" => Expr::Acot(arg.boxed()),
        "sinh" => Expr::Sinh(arg.boxed()),
        "cosh" => Expr::Cosh(arg.boxed()),
        "tanh" => Expr::Tanh(arg.boxed()),
        "sech" => Expr::Sech(arg.boxed()),
        "csch" => Expr::Csch(arg.boxed()),
        "coth" => Expr::Coth(arg.boxed()),
        "arcsinh" | "asinh" => Expr::Asinh(arg.boxed()),
        "arccosh" | "acosh" => Expr::Acosh(arg.boxed()),
        "arctanh" | "atanh" => Expr::Atanh(arg.boxed()),
        "exp" => Expr::Exp(arg.boxed()),
        "log" | "ln" => Expr::Log(arg.boxed()),
        "abs" | "Abs" => Expr::Abs(arg.boxed()),
        "sqrt" => pow(arg, half()),
        "cbrt" => pow(arg, Expr::Constant(rational(1, 3))),
        _ => unreachable!(),
    };

    Ok((rest, expr))
}

fn parse_function_name(input: &str) -> PResult<'_, &str> {
    alt((
        alt((
            tag("arccosh"),
            tag("arcsinh"),
            tag("arctanh"),
            tag("arccos"),
            tag("arcsin"),
            tag("arctan"),
            tag("arcsec"),
            tag("arccsc"),
            tag("arccot"),
        )),
        alt((
            tag("acosh"),
            tag("asinh"),
            tag("atanh"),
            tag("acos"),
            tag("asin"),
            tag("atan"),
            tag("asec"),
            tag("acsc"),
            tag("acot"),
        )),
        alt((
            tag("cosh"),
            tag("sinh"),
            tag("tanh"),
            tag("sech"),
            tag("csch"),
            tag("coth"),
            tag("cos"),
            tag("sin"),
            tag("tan"),
            tag("sec"),
            tag("csc"),
            tag("cot"),
        )),
        alt((
            tag("exp"),
            tag("log"),
            tag("ln"),
            tag("abs"),
            tag("Abs"),
            tag("sqrt"),
            tag("cbrt"),
        )),
    ))(input)
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> PResult<'a, O>
where
    F: FnMut(&'a str) -> PResult<'a, O>,
{
    delimited(multispace0, inner, multispace0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimals_are_exact() {
        assert_eq!(parse_expr("0.25").unwrap(), Expr::constant(1, 4));
        assert_eq!(parse_expr("2.").unwrap(), Expr::integer(2));
        assert_eq!(parse_expr(".5").unwrap(), Expr::constant(1, 2));
    }

    #[test]
    fn both_power_spellings() {
        assert_eq!(parse_expr("x**2").unwrap(), parse_expr("x^2").unwrap());
    }

    #[test]
    fn unary_minus_binds_looser_than_power() {
        let expr = parse_expr("-x^2").unwrap();
        assert_eq!(
            expr,
            Expr::Neg(pow(Expr::var("x"), Expr::integer(2)).boxed())
        );
    }

    #[test]
    fn two_argument_log_is_change_of_base() {
        let expr = parse_expr("log(x, 2)").unwrap();
        assert_eq!(
            expr,
            div(
                Expr::Log(Expr::var("x").boxed()),
                Expr::Log(Expr::integer(2).boxed())
            )
        );
        assert!(parse_expr("sin(x, 2)").is_err());
    }

    #[test]
    fn named_constants() {
        assert_eq!(parse_expr("e").unwrap(), Expr::euler());
        assert_eq!(parse_expr("pi").unwrap(), Expr::Pi);
        assert_eq!(parse_expr("exp(x)").unwrap(), Expr::Exp(Expr::var("x").boxed()));
    }
}
