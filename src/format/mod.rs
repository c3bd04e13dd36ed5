//! Formatting helpers for rendering expressions.

pub mod expr;
pub mod latex;

pub use expr::pretty;
pub use latex::latex;
