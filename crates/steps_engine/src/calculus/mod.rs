//! Term-by-term symbolic differentiation and integration.
//!
//! The engine works over the restricted grammar of [`steps_ast::Term`]:
//! polynomial monomials, the sin/cos/tan family, e^x, ln/log, and the
//! reciprocal shapes. Every applied rule appends a justification step to
//! the caller's log.

mod differentiate;
mod handlers;
mod integrate;

pub use differentiate::differentiate_expression;
pub use handlers::{solve_differentiation, solve_integration};
pub use integrate::{definite_integral, integrate_expression};

use crate::error::SolveError;
use crate::eval::evaluate;

/// True when `var` occurs in `text` as a standalone identifier (so
/// `sin(30)` does not count as containing `s`, `i`, or `n`).
pub(crate) fn contains_variable(text: &str, var: &str) -> bool {
    let mut word = String::new();
    for c in text.chars().chain(std::iter::once(' ')) {
        if c.is_ascii_alphabetic() {
            word.push(c);
        } else if !word.is_empty() {
            if word == var {
                return true;
            }
            word.clear();
        }
    }
    false
}

/// Join rendered terms with `+`, folding `+ -t` into `- t`.
pub(crate) fn join_terms(parts: &[String]) -> String {
    if parts.is_empty() {
        return "0".to_string();
    }
    parts.join(" + ").replace("+ -", "- ")
}

/// Substitute a numeric value for every standalone occurrence of `var`,
/// then evaluate. Used for definite-integral bound evaluation.
pub(crate) fn evaluate_at(expr_text: &str, var: &str, value: f64) -> Result<f64, SolveError> {
    // ln|x| renders with bars the parser does not know; turn it into abs().
    let text = expr_text.replace(
        &format!("ln|{}|", var),
        &format!("ln(abs({}))", var),
    );

    // Identifiers are alphabetic runs; digits flush straight through so a
    // scaled argument like 2x still gets its x replaced (the normalizer
    // restores the implicit multiplication afterwards).
    let mut out = String::with_capacity(text.len() + 8);
    let mut word = String::new();
    for c in text.chars().chain(std::iter::once('\u{0}')) {
        if c.is_ascii_alphabetic() {
            word.push(c);
        } else {
            if !word.is_empty() {
                if word == var {
                    out.push_str(&format!("({})", value));
                } else {
                    out.push_str(&word);
                }
                word.clear();
            }
            if c != '\u{0}' {
                out.push(c);
            }
        }
    }

    let normalized = steps_parser::normalize(&out);
    let parsed = steps_parser::parse(&normalized)?;
    evaluate(&parsed)
}
