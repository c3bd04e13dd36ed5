use calctutor::{Expr, differentiate, evaluate_at, parse_expr, simplify_fully, to_significant};

fn derivative(var: &str, input: &str) -> Expr {
    let expr = parse_expr(input).expect("parse input");
    simplify_fully(differentiate(var, &expr))
}

fn assert_diff_eq(var: &str, input: &str, expected: &str) {
    let got = derivative(var, input);
    let expected_expr = parse_expr(expected).expect("parse expected");
    for point in 1..=5 {
        let lhs = evaluate_at(&got, var, point).expect("evaluate derivative");
        let rhs = evaluate_at(&expected_expr, var, point).expect("evaluate expected");
        assert_eq!(
            to_significant(lhs, 10),
            to_significant(rhs, 10),
            "d/d{var} {input} at {point}, got {got}"
        );
    }
}

#[test]
fn basic_vars_and_constants() {
    assert_eq!(derivative("x", "x"), Expr::integer(1));
    assert_eq!(derivative("x", "y"), Expr::integer(0));
    assert_eq!(derivative("x", "5"), Expr::integer(0));
    assert_eq!(derivative("x", "pi*e"), Expr::integer(0));
}

#[test]
fn polynomials_and_products() {
    assert_diff_eq("x", "x^3", "3*x^2");
    assert_diff_eq("x", "2*x^2+3*x", "4*x+3");
    assert_diff_eq("x", "(x+1)*(x-1)", "2*x");
    assert_diff_eq("x", "x/(x+1)", "1/(x+1)^2");
}

#[test]
fn trig_and_exponentials() {
    assert_diff_eq("x", "sin(x)", "cos(x)");
    assert_diff_eq("x", "cos(x)", "-sin(x)");
    assert_diff_eq("x", "tan(x)", "1/cos(x)^2");
    assert_diff_eq("x", "cot(x)", "-1/sin(x)^2");
    assert_diff_eq("x", "exp(x^2)", "2*x*exp(x^2)");
    assert_diff_eq("x", "e^(3*x)", "3*e^(3*x)");
}

#[test]
fn inverse_and_hyperbolic() {
    assert_diff_eq("x", "atan(x)", "1/(1+x^2)");
    assert_diff_eq("x", "asin(x/10)", "1/sqrt(100-x^2)");
    assert_diff_eq("x", "sinh(x)", "cosh(x)");
    assert_diff_eq("x", "tanh(x)", "1/cosh(x)^2");
    assert_diff_eq("x", "asinh(x)", "1/sqrt(x^2+1)");
}

#[test]
fn general_power_rule() {
    assert_diff_eq("x", "x^x", "x^x*(log(x)+1)");
    assert_diff_eq("x", "log(x)", "1/x");
    assert_diff_eq("x", "2^(x^2)", "2*x*2^(x^2)*log(2)");
    assert_diff_eq("x", "sqrt(x)", "1/(2*sqrt(x))");
    assert_diff_eq("x", "log(x, 2)", "1/(x*log(2))");
}
