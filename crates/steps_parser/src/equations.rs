//! Coefficient extraction for the standard-form algebraic solvers.
//!
//! Both sides of the `=` contribute: left-hand terms as written, right-hand
//! terms negated, so every equation lands in `sum(c_i * x^i) = 0` form.

use crate::error::ParseError;
use crate::terms::{parse_term, split_terms};
use steps_ast::Term;

/// Collect polynomial coefficients up to `max_degree`. Index `i` holds the
/// coefficient of `var^i`.
pub fn poly_coefficients(
    equation: &str,
    var: &str,
    max_degree: usize,
) -> Result<Vec<f64>, ParseError> {
    let (lhs, rhs) = equation.split_once('=').ok_or(ParseError::MissingEquals)?;
    let mut coeffs = vec![0.0; max_degree + 1];
    accumulate(lhs, var, 1.0, &mut coeffs)?;
    accumulate(rhs, var, -1.0, &mut coeffs)?;
    Ok(coeffs)
}

fn accumulate(side: &str, var: &str, sign: f64, coeffs: &mut [f64]) -> Result<(), ParseError> {
    for t in split_terms(side) {
        let term = parse_term(&t, var).ok_or_else(|| ParseError::NonPolynomial(t.clone()))?;
        match term {
            Term::Constant(c) => coeffs[0] += sign * c,
            Term::Monomial { coef, exponent } => {
                if exponent < 0.0 || exponent.fract() != 0.0 {
                    return Err(ParseError::NonPolynomial(t));
                }
                let degree = exponent as usize;
                if degree >= coeffs.len() {
                    return Err(ParseError::NonPolynomial(t));
                }
                coeffs[degree] += sign * coef;
            }
            Term::Func { .. } => return Err(ParseError::NonPolynomial(t)),
        }
    }
    Ok(())
}

/// `ax + b = 0` form: returns `(a, b)`.
pub fn linear_coefficients(equation: &str, var: &str) -> Result<(f64, f64), ParseError> {
    let c = poly_coefficients(equation, var, 1)?;
    Ok((c[1], c[0]))
}

/// `ax^2 + bx + c = 0` form: returns `(a, b, c)`.
pub fn quadratic_coefficients(equation: &str, var: &str) -> Result<(f64, f64, f64), ParseError> {
    let c = poly_coefficients(equation, var, 2)?;
    Ok((c[2], c[1], c[0]))
}

/// `ax^3 + bx^2 + cx + d = 0` form: returns `(a, b, c, d)`.
pub fn cubic_coefficients(equation: &str, var: &str) -> Result<(f64, f64, f64, f64), ParseError> {
    let c = poly_coefficients(equation, var, 3)?;
    Ok((c[3], c[2], c[1], c[0]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_both_sides() {
        // 2x + 3 = 7  ->  2x - 4 = 0
        let (a, b) = linear_coefficients("2x + 3 = 7", "x").unwrap();
        assert_eq!(a, 2.0);
        assert_eq!(b, -4.0);
    }

    #[test]
    fn test_linear_variable_on_both_sides() {
        // 5x - 1 = 2x + 8  ->  3x - 9 = 0
        let (a, b) = linear_coefficients("5x - 1 = 2x + 8", "x").unwrap();
        assert_eq!(a, 3.0);
        assert_eq!(b, -9.0);
    }

    #[test]
    fn test_quadratic_standard_form() {
        let (a, b, c) = quadratic_coefficients("x^2 - 5x + 6 = 0", "x").unwrap();
        assert_eq!((a, b, c), (1.0, -5.0, 6.0));
    }

    #[test]
    fn test_cubic() {
        let (a, b, c, d) = cubic_coefficients("x^3 - 6x^2 + 11x - 6 = 0", "x").unwrap();
        assert_eq!((a, b, c, d), (1.0, -6.0, 11.0, -6.0));
    }

    #[test]
    fn test_missing_equals() {
        assert!(matches!(
            linear_coefficients("2x + 3", "x"),
            Err(ParseError::MissingEquals)
        ));
    }

    #[test]
    fn test_non_polynomial_term() {
        assert!(matches!(
            quadratic_coefficients("sin(x) + 1 = 0", "x"),
            Err(ParseError::NonPolynomial(_))
        ));
    }

    #[test]
    fn test_degree_overflow_rejected() {
        assert!(matches!(
            quadratic_coefficients("x^4 + 1 = 0", "x"),
            Err(ParseError::NonPolynomial(_))
        ));
    }
}
