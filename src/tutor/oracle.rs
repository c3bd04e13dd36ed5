//! Decides whether a candidate antiderivative is correct by differentiating
//! it and comparing against the integrand at a handful of sample points.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::calculus::differentiate;
use crate::config::OracleConfig;
use crate::eval::{evaluate_at, to_significant};
use crate::expr::Expr;
use crate::parser::parse_expr;
use crate::simplify::{simplify_fully, strip_abs};
use crate::tutor::notation::normalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Correct,
    Incorrect,
    InvalidInput,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Verdict::Correct => "correct",
            Verdict::Incorrect => "incorrect",
            Verdict::InvalidInput => "invalid input",
        };
        f.write_str(label)
    }
}

/// Why a verdict came out the way it did. For logs, never for learners.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("syntax: {0}")]
    Syntax(String),
    #[error("undefined at sample point {point}: {reason}")]
    Domain { point: i64, reason: String },
    #[error("mismatch at sample point {point}: expected {expected}, got {actual}")]
    Mismatch {
        point: i64,
        expected: String,
        actual: String,
    },
    #[error("input is {len} characters, limit is {max}")]
    TooLong { len: usize, max: usize },
    #[error("{measure} is {value}, limit is {max}")]
    TooComplex {
        measure: &'static str,
        value: usize,
        max: usize,
    },
}

/// Outcome of one verification cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Verification {
    pub verdict: Verdict,
    /// The parsed answer, kept for redisplay. `None` when it did not parse.
    pub candidate: Option<Expr>,
    pub diagnostic: Option<Diagnostic>,
}

impl Verification {
    fn invalid(candidate: Option<Expr>, diagnostic: Diagnostic) -> Self {
        Self {
            verdict: Verdict::InvalidInput,
            candidate,
            diagnostic: Some(diagnostic),
        }
    }

    pub fn is_correct(&self) -> bool {
        self.verdict == Verdict::Correct
    }
}

/// Sampling equivalence checker. Holds only configuration, so one instance
/// can serve any number of sessions.
#[derive(Debug, Clone, Default)]
pub struct Oracle {
    config: OracleConfig,
}

impl Oracle {
    pub fn new(config: OracleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    /// Normalize raw learner text, then verify it.
    pub fn check(&self, raw: &str, reference: &str) -> Verification {
        self.verify(&normalize(raw), reference)
    }

    /// Verify an already normalized candidate against `reference`, the
    /// integrand, at the configured sample points.
    pub fn verify(&self, normalized: &str, reference: &str) -> Verification {
        self.verify_with_points(normalized, reference, &self.config.sample_points)
    }

    /// Like [`Oracle::verify`] but sampling at `points`. An empty slice
    /// falls back to the configured points.
    pub fn verify_with_points(
        &self,
        normalized: &str,
        reference: &str,
        points: &[i64],
    ) -> Verification {
        let points = if points.is_empty() {
            self.config.sample_points.as_slice()
        } else {
            points
        };
        let verification = self.run(normalized, reference, points);
        debug!(
            candidate = normalized,
            reference,
            verdict = %verification.verdict,
            diagnostic = ?verification.diagnostic,
            "verified answer"
        );
        verification
    }

    fn run(&self, normalized: &str, reference: &str, points: &[i64]) -> Verification {
        let max = self.config.max_input_len;
        if normalized.len() > max {
            return Verification::invalid(
                None,
                Diagnostic::TooLong {
                    len: normalized.len(),
                    max,
                },
            );
        }

        let candidate = match parse_expr(normalized) {
            Ok(expr) => expr,
            Err(e) => return Verification::invalid(None, Diagnostic::Syntax(e.to_string())),
        };

        if let Some(diagnostic) = self.too_complex(&candidate) {
            return Verification::invalid(Some(candidate), diagnostic);
        }

        // |u| is differentiated as u; the wrapper stays on the displayed answer.
        let smooth = simplify_fully(strip_abs(&candidate));
        let derivative = differentiate(&self.config.variable, &smooth);
        let max = self.config.max_derivative_size;
        if derivative.size() > max {
            return Verification::invalid(
                Some(candidate),
                Diagnostic::TooComplex {
                    measure: "derivative size",
                    value: derivative.size(),
                    max,
                },
            );
        }

        let integrand = match parse_expr(reference) {
            Ok(expr) => expr,
            Err(e) => {
                return Verification::invalid(
                    Some(candidate),
                    Diagnostic::Syntax(format!("reference `{reference}`: {e}")),
                );
            }
        };

        let samples = match self.sample_both(&integrand, &derivative, points) {
            Ok(samples) => samples,
            Err(diagnostic) => return Verification::invalid(Some(candidate), diagnostic),
        };

        let mismatch = samples
            .into_iter()
            .find(|(_, expected, actual)| expected != actual);
        match mismatch {
            None => Verification {
                verdict: Verdict::Correct,
                candidate: Some(candidate),
                diagnostic: None,
            },
            Some((point, expected, actual)) => Verification {
                verdict: Verdict::Incorrect,
                candidate: Some(candidate),
                diagnostic: Some(Diagnostic::Mismatch {
                    point,
                    expected,
                    actual,
                }),
            },
        }
    }

    /// Differentiation and simplification are super-linear in tree size, so
    /// oversized or deeply nested answers are refused up front.
    fn too_complex(&self, candidate: &Expr) -> Option<Diagnostic> {
        let checks = [
            ("answer size", candidate.size(), self.config.max_expr_size),
            ("answer depth", candidate.depth(), self.config.max_expr_depth),
        ];
        checks
            .into_iter()
            .find(|&(_, value, max)| value > max)
            .map(|(measure, value, max)| Diagnostic::TooComplex {
                measure,
                value,
                max,
            })
    }

    /// Every point is evaluated before anything is compared, so a domain
    /// error anywhere wins over a mismatch.
    fn sample_both(
        &self,
        integrand: &Expr,
        derivative: &Expr,
        points: &[i64],
    ) -> Result<Vec<(i64, String, String)>, Diagnostic> {
        points
            .iter()
            .map(|&point| {
                let expected = self.sample(integrand, point)?;
                let actual = self.sample(derivative, point)?;
                Ok((point, expected, actual))
            })
            .collect()
    }

    fn sample(&self, expr: &Expr, point: i64) -> Result<String, Diagnostic> {
        evaluate_at(expr, &self.config.variable, point)
            .map(|value| to_significant(value, self.config.significant_figures))
            .map_err(|e| Diagnostic::Domain {
                point,
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_long_input_is_rejected_before_parsing() {
        let oracle = Oracle::new(OracleConfig {
            max_input_len: 8,
            ..OracleConfig::default()
        });
        let v = oracle.verify("sin(x)+cos(x)", "cos(x)-sin(x)");
        assert_eq!(v.verdict, Verdict::InvalidInput);
        assert_eq!(v.candidate, None);
        assert_eq!(v.diagnostic, Some(Diagnostic::TooLong { len: 13, max: 8 }));
    }

    #[test]
    fn oversized_answer_is_not_differentiated() {
        let oracle = Oracle::new(OracleConfig {
            max_expr_size: 5,
            ..OracleConfig::default()
        });
        // sin(x) + x^2 has six nodes.
        let v = oracle.verify("sin(x)+x^2", "cos(x)+2*x");
        assert_eq!(v.verdict, Verdict::InvalidInput);
        assert!(v.candidate.is_some());
        assert_eq!(
            v.diagnostic,
            Some(Diagnostic::TooComplex {
                measure: "answer size",
                value: 6,
                max: 5,
            })
        );
    }

    #[test]
    fn deeply_nested_answer_is_not_differentiated() {
        let oracle = Oracle::new(OracleConfig {
            max_expr_depth: 3,
            ..OracleConfig::default()
        });
        let v = oracle.verify("sin(sin(sin(x)))", "1");
        assert_eq!(
            v.diagnostic,
            Some(Diagnostic::TooComplex {
                measure: "answer depth",
                value: 4,
                max: 3,
            })
        );
    }

    #[test]
    fn oversized_derivative_is_not_evaluated() {
        let oracle = Oracle::new(OracleConfig {
            max_derivative_size: 3,
            ..OracleConfig::default()
        });
        let v = oracle.verify("x*sin(x)", "sin(x)+x*cos(x)");
        assert_eq!(v.verdict, Verdict::InvalidInput);
        assert!(matches!(
            v.diagnostic,
            Some(Diagnostic::TooComplex {
                measure: "derivative size",
                max: 3,
                ..
            })
        ));
    }

    #[test]
    fn domain_error_wins_over_mismatch() {
        // Wrong at x = 1 and undefined at x = 3.
        let v = Oracle::default().verify_with_points("log(3-x)", "1", &[1, 3]);
        assert_eq!(v.verdict, Verdict::InvalidInput);
        assert!(matches!(v.diagnostic, Some(Diagnostic::Domain { point: 3, .. })));
    }

    #[test]
    fn empty_point_slice_uses_configured_points() {
        let v = Oracle::default().verify_with_points("x^2", "2*x", &[]);
        assert!(v.is_correct());
    }

    #[test]
    fn broken_reference_is_invalid_not_a_panic() {
        let v = Oracle::default().verify("x", "1+");
        assert_eq!(v.verdict, Verdict::InvalidInput);
        assert!(v.candidate.is_some());
        assert!(matches!(v.diagnostic, Some(Diagnostic::Syntax(_))));
    }

    #[test]
    fn mismatch_reports_first_differing_point() {
        let v = Oracle::default().verify("x^2", "x");
        assert_eq!(v.verdict, Verdict::Incorrect);
        assert_eq!(
            v.diagnostic,
            Some(Diagnostic::Mismatch {
                point: 1,
                expected: "1.0000e0".to_string(),
                actual: "2.0000e0".to_string(),
            })
        );
    }
}
