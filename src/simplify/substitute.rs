use crate::expr::Expr;

/// Substitute variable `var` with `replacement` throughout `expr`.
pub fn substitute(expr: &Expr, var: &str, replacement: &Expr) -> Expr {
    match expr {
        Expr::Variable(name) if name == var => replacement.clone(),
        other => other.map_children(|child| substitute(child, var, replacement)),
    }
}

/// Drop every `abs` wrapper, keeping the enclosed expression.
///
/// `d/dx |u|` is piecewise; the checker differentiates `u` instead, which is
/// only sound when the sign of `u` does not change over the sample points.
pub fn strip_abs(expr: &Expr) -> Expr {
    match expr {
        Expr::Abs(inner) => strip_abs(inner),
        other => other.map_children(strip_abs),
    }
}
