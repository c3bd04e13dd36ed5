//! Learner-facing rendering of parsed answers.
//!
//! The expression printers use CAS spellings (`atan`, `log`). Learners are
//! shown `tan^-1` and `ln` instead. Output is display-only and is never fed
//! back to the parser.

use std::sync::LazyLock;

use regex::Regex;

use crate::expr::Expr;
use crate::format::{latex, pretty};

/// Plain-text rendering: `x*atan(x)` shows as `x*tan^-1(x)`.
pub fn render(expr: &Expr) -> String {
    static INVERSE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\ba(sin|cos|tan|csc|sec|cot)(h?)\(").unwrap());
    static NATURAL_LOG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\blog\(").unwrap());

    let out = pretty(expr);
    let out = INVERSE.replace_all(&out, "$1$2^-1(");
    NATURAL_LOG.replace_all(&out, "ln(").into_owned()
}

/// LaTeX rendering with the same conventions, for a math widget.
pub fn render_latex(expr: &Expr) -> String {
    static INVERSE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"\\operatorname\{a(sin|cos|tan|csc|sec|cot)(h?)\}").unwrap()
    });
    static NATURAL_LOG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\log\b").unwrap());

    let out = latex(expr);
    let out = INVERSE.replace_all(&out, r"\$1$2^{-1}");
    NATURAL_LOG.replace_all(&out, r"\ln").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expr;

    fn shown(input: &str) -> String {
        render(&parse_expr(input).expect("parse input"))
    }

    #[test]
    fn inverse_functions_use_superscript() {
        assert_eq!(shown("x*atan(x)"), "x*tan^-1(x)");
        assert_eq!(shown("asinh(x)"), "sinh^-1(x)");
        assert_eq!(shown("acos(2*x)"), "cos^-1(2*x)");
    }

    #[test]
    fn natural_log_is_ln() {
        assert_eq!(shown("log(x)"), "ln(x)");
        assert_eq!(shown("x^2*ln(x)"), "x^2*ln(x)");
    }

    #[test]
    fn plain_functions_untouched() {
        assert_eq!(shown("sin(2*x)"), "sin(2*x)");
        assert_eq!(shown("tanh(x)"), "tanh(x)");
    }

    #[test]
    fn latex_uses_same_conventions() {
        let expr = parse_expr("atan(x)").expect("parse input");
        assert_eq!(render_latex(&expr), r"\tan^{-1}{\left(x \right)}");
        let expr = parse_expr("log(x)").expect("parse input");
        assert_eq!(render_latex(&expr), r"\ln{\left(x \right)}");
    }
}
