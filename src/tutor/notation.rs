//! Rewrites informally typed calculus notation into `parse_expr` syntax.
//!
//! The rewrite is a fixed cascade of narrow regex passes. Order matters:
//! each pass assumes the shape left by the ones before it. Patterns outside
//! what a learner is expected to type (nested `|..|`, multi-character
//! implicit arguments such as `sinx^2`) are left alone and usually fail to
//! parse later, which the checker reports as invalid input.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::trace;

/// Normalize raw learner input. Total and deterministic.
pub fn normalize(raw: &str) -> String {
    let out = strip_whitespace(raw);
    let out = rewrite_arc_prefix(&out);
    let out = rewrite_abs_bars(&out);
    let out = multiply_digit_letter(&out);
    let out = parenthesize_function_args(&out);
    let out = multiply_after_variable(&out);
    let out = multiply_before_paren(&out);
    trace!(raw, normalized = %out, "normalized input");
    out
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// `arctan` -> `atan`, `arcsinh` -> `asinh`.
fn rewrite_arc_prefix(s: &str) -> String {
    s.replace("arc", "a")
}

/// `|u|` -> `(abs(u))` for the shortest bar-free run between two bars.
fn rewrite_abs_bars(s: &str) -> String {
    static BARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\|([^|]+)\|").unwrap());
    BARS.replace_all(s, "(abs($1))").into_owned()
}

/// `6x` -> `6*x`.
fn multiply_digit_letter(s: &str) -> String {
    static DIGIT_LETTER: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(\d)([a-zA-Z])").unwrap());
    DIGIT_LETTER.replace_all(s, "$1*$2").into_owned()
}

/// `sin2*x` -> `sin(2*x)`, `lnx` -> `ln(x)`, `cosh3` -> `cosh(3)`.
///
/// Only a single trailing letter or digit (with an optional one-digit
/// coefficient) is captured.
fn parenthesize_function_args(s: &str) -> String {
    static LETTER_ARG: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(sin|cos|tan|csc|sec|cot|sqrt|cbrt|ln|log)(h?)(\d\*)?([a-zA-Z])").unwrap()
    });
    static DIGIT_ARG: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(sin|cos|tan|csc|sec|cot|sqrt|cbrt|ln|log)(h?)(\d)").unwrap()
    });

    let out = LETTER_ARG.replace_all(s, |caps: &Captures| {
        let name = &caps[1];
        let hyperbolic = &caps[2];
        let coefficient = caps.get(3).map_or("", |m| m.as_str());
        let arg = &caps[4];
        // `cosh(` must not become `cos(h)(`.
        if hyperbolic.is_empty() && coefficient.is_empty() && arg == "h" {
            return caps[0].to_string();
        }
        format!("{name}{hyperbolic}({coefficient}{arg})")
    });
    DIGIT_ARG.replace_all(&out, "$1$2($3)").into_owned()
}

/// `xsin(x)` -> `x*sin(x)`, `(x+1)x` -> `(x+1)*x`.
///
/// Repeats until stable so that runs such as `xxx` are fully split.
fn multiply_after_variable(s: &str) -> String {
    static AFTER_X: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(x|\))([a-zA-Z])").unwrap());

    let mut current = s.to_string();
    loop {
        let haystack = current.as_str();
        let next = AFTER_X
            .replace_all(haystack, |caps: &Captures| {
                let start = caps.get(0).map_or(0, |m| m.start());
                // The `x` of `exp` is part of the name.
                let inside_exp =
                    &caps[1] == "x" && &caps[2] == "p" && haystack[..start].ends_with('e');
                if inside_exp {
                    caps[0].to_string()
                } else {
                    format!("{}*{}", &caps[1], &caps[2])
                }
            })
            .into_owned();
        if next == current {
            return next;
        }
        current = next;
    }
}

/// `2(x+1)` -> `2*(x+1)`, `(x)(x)` -> `(x)*(x)`.
fn multiply_before_paren(s: &str) -> String {
    static BEFORE_PAREN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d|\))(\()").unwrap());
    BEFORE_PAREN.replace_all(s, "$1*$2").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arc_prefix_drops_to_a() {
        assert_eq!(rewrite_arc_prefix("arctan(x)"), "atan(x)");
        assert_eq!(rewrite_arc_prefix("arcsinh(x)+arccos(x)"), "asinh(x)+acos(x)");
    }

    #[test]
    fn abs_bars_become_calls() {
        assert_eq!(rewrite_abs_bars("|x-1|"), "(abs(x-1))");
        assert_eq!(rewrite_abs_bars("ln(|x|)+|x+1|"), "ln((abs(x)))+(abs(x+1))");
        // Nested bars are not understood.
        assert_eq!(rewrite_abs_bars("||x|-1|"), "|(abs(x))-1|");
    }

    #[test]
    fn digit_letter_gets_star() {
        assert_eq!(multiply_digit_letter("6x"), "6*x");
        assert_eq!(multiply_digit_letter("x^2+12y"), "x^2+12*y");
        assert_eq!(multiply_digit_letter("x2"), "x2");
    }

    #[test]
    fn function_args_are_parenthesized() {
        assert_eq!(parenthesize_function_args("sin2*x"), "sin(2*x)");
        assert_eq!(parenthesize_function_args("lnx"), "ln(x)");
        assert_eq!(parenthesize_function_args("cosh3"), "cosh(3)");
        assert_eq!(parenthesize_function_args("tanhx"), "tanh(x)");
        assert_eq!(parenthesize_function_args("sqrt(x-1)"), "sqrt(x-1)");
    }

    #[test]
    fn hyperbolic_names_are_not_split() {
        assert_eq!(parenthesize_function_args("cosh(x)"), "cosh(x)");
        assert_eq!(parenthesize_function_args("sinh(2*x)"), "sinh(2*x)");
    }

    #[test]
    fn variable_then_letter_gets_star() {
        assert_eq!(multiply_after_variable("xsin(x)"), "x*sin(x)");
        assert_eq!(multiply_after_variable("(x+1)x"), "(x+1)*x");
        assert_eq!(multiply_after_variable("xxx"), "x*x*x");
        assert_eq!(multiply_after_variable("exp(x)"), "exp(x)");
        assert_eq!(multiply_after_variable("xexp(x)"), "x*exp(x)");
    }

    #[test]
    fn paren_after_digit_or_paren_gets_star() {
        assert_eq!(multiply_before_paren("2(x+1)"), "2*(x+1)");
        assert_eq!(multiply_before_paren("(x+1)(x-1)"), "(x+1)*(x-1)");
        assert_eq!(multiply_before_paren("sin(x)"), "sin(x)");
    }

    #[test]
    fn whitespace_is_removed_first() {
        assert_eq!(normalize(" 2 x + 1 "), "2*x+1");
    }
}
