//! Answer verification core for an integration tutor, with the small
//! computer algebra layer it runs on: parsing, differentiation,
//! simplification, numeric evaluation and printing of single-variable
//! elementary expressions.

pub mod calculus;
pub mod config;
pub mod error;
pub mod eval;
pub mod expr;
pub mod format;
pub mod logging;
pub mod parser;
pub mod simplify;
pub mod tutor;

pub use calculus::differentiate;
pub use config::{OracleConfig, TutorConfig, load_config};
pub use error::{Result, TutorError};
pub use eval::{evaluate, evaluate_at, to_significant};
pub use expr::{Expr, Rational, add, div, mul, neg, one, pow, rational, sub, zero};
pub use format::{latex, pretty};
pub use parser::parse_expr;
pub use simplify::{simplify, simplify_fully, simplify_with_limit, strip_abs, substitute};
pub use tutor::{
    Catalog, Diagnostic, Event, Exercise, Oracle, Screen, Session, Topic, Verdict, Verification,
    normalize, render, render_latex,
};
