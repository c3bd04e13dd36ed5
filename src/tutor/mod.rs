//! Answer checking and quiz progression for an integration tutor.
//!
//! Raw learner text flows through [`normalize`], then [`Oracle`] differentiates
//! the parsed answer and compares it with the exercise's integrand by
//! sampling. [`render`] turns an accepted answer back into learner notation
//! and [`Session`] drives progression through a [`Catalog`].

pub mod catalog;
pub mod display;
pub mod notation;
pub mod oracle;
pub mod session;

pub use catalog::{Catalog, Exercise, Topic};
pub use display::{render, render_latex};
pub use notation::normalize;
pub use oracle::{Diagnostic, Oracle, Verdict, Verification};
pub use session::{Event, Screen, Session};
