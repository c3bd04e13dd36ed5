use calctutor::{normalize, parse_expr};

const LEARNER_INPUTS: &[&str] = &[
    "2x",
    "sin2x",
    "arctanx",
    "|x-1|",
    "xsinx",
    "x^2sin2x",
    "2(x+1)",
    "(x+1)(x-1)",
    "cosh3x",
    "e^(2x)",
    "ln|x|",
    "x^3ln(x)/3-x^3/9",
    "(x^2+1)/2*arctanx-x/2",
    "xexp(x)",
    "sqrtx",
    "2^(x^2)/(2ln2)",
];

fn assert_normalizes(raw: &str, expected: &str) {
    assert_eq!(normalize(raw), expected, "normalize({raw:?})");
}

#[test]
fn documented_examples() {
    assert_normalizes("2x", "2*x");
    assert_normalizes("sin2x", "sin(2*x)");
    assert!(normalize("arctanx").starts_with("atan"));
    assert_normalizes("|x-1|", "(abs(x-1))");
}

#[test]
fn implicit_multiplication() {
    assert_normalizes("xsinx", "x*sin(x)");
    assert_normalizes("x^2sin2x", "x^2*sin(2*x)");
    assert_normalizes("2(x+1)", "2*(x+1)");
    assert_normalizes("(x+1)(x-1)", "(x+1)*(x-1)");
    assert_normalizes("sin(x)cos(x)", "sin(x)*cos(x)");
}

#[test]
fn function_shorthand() {
    assert_normalizes("cosh3x", "cosh(3*x)");
    assert_normalizes("ln|x|", "ln(abs(x))");
    assert_normalizes("sqrtx", "sqrt(x)");
    assert_normalizes("2^(x^2)/(2ln2)", "2^(x^2)/(2*ln(2))");
    assert_normalizes("arcsin x", "asin(x)");
}

#[test]
fn exp_survives() {
    assert_normalizes("xexp(x)", "x*exp(x)");
    assert_normalizes("exp(2x)", "exp(2*x)");
}

#[test]
fn idempotent_on_normalized_input() {
    for raw in LEARNER_INPUTS {
        let once = normalize(raw);
        assert_eq!(normalize(&once), once, "normalize is not idempotent on {raw:?}");
    }
}

#[test]
fn learner_inputs_parse_after_normalizing() {
    for raw in LEARNER_INPUTS {
        let normalized = normalize(raw);
        parse_expr(&normalized)
            .unwrap_or_else(|e| panic!("{raw:?} -> {normalized:?} did not parse: {e}"));
    }
}

#[test]
fn known_gaps_are_left_alone() {
    // Nested bars are not understood.
    assert_normalizes("||x|-1|", "|(abs(x))-1|");
    assert!(parse_expr(&normalize("||x|-1|")).is_err());
}
