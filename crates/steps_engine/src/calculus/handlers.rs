use super::{definite_integral, differentiate_expression, integrate_expression};
use crate::error::SolveError;
use crate::extract::{extract_bounds, extract_expression};
use crate::record::SolutionRecord;
use steps_parser::detect_variable;

/// Route handler for differentiation requests.
pub fn solve_differentiation(problem: &str, index: usize) -> Result<SolutionRecord, SolveError> {
    let cleaned = problem.to_lowercase().replace("dy/dx", " ").replace("d/dx", " ");
    let expression = extract_expression(&cleaned)
        .ok_or_else(|| SolveError::Unsupported("no expression to differentiate".into()))?;
    let var = detect_variable(&expression).unwrap_or_else(|| "x".to_string());

    let mut rec = SolutionRecord::new(index, problem, "Calculus - Differentiation");
    rec.push_step("Extract the expression", &expression);

    let derivative = differentiate_expression(&expression, &var, &mut rec.steps)?;
    rec.answer = format!("f'({}) = {}", var, derivative);
    Ok(rec)
}

/// Route handler for integration requests, definite when bounds are given
/// ("from 0 to 3"), indefinite with "+ C" otherwise.
pub fn solve_integration(problem: &str, index: usize) -> Result<SolutionRecord, SolveError> {
    let cleaned = problem.to_lowercase().replace('∫', " ");
    let bounds = extract_bounds(&cleaned);
    let body = bounds
        .as_ref()
        .map(|(_, rest)| rest.clone())
        .unwrap_or(cleaned);

    let expression = extract_expression(&body)
        .ok_or_else(|| SolveError::Unsupported("no expression to integrate".into()))?;
    let var = detect_variable(&expression).unwrap_or_else(|| "x".to_string());

    let mut rec = SolutionRecord::new(index, problem, "Calculus - Integration");
    rec.push_step("Extract the integrand", &expression);

    match bounds {
        Some(((lower, upper), _)) => {
            rec.answer = definite_integral(&expression, &var, lower, upper, &mut rec.steps)?;
        }
        None => {
            let antiderivative = integrate_expression(&expression, &var, &mut rec.steps)?;
            rec.answer = format!("{} + C", antiderivative);
        }
    }
    Ok(rec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_differentiation_request() {
        let rec = solve_differentiation("Find the derivative of 3x^2 + 2x + 1", 1).unwrap();
        assert_eq!(rec.answer, "f'(x) = 6x + 2");
    }

    #[test]
    fn test_differentiation_with_notation() {
        let rec = solve_differentiation("d/dx x^2", 1).unwrap();
        assert_eq!(rec.answer, "f'(x) = 2x");
    }

    #[test]
    fn test_indefinite_integration() {
        let rec = solve_integration("Integrate x^2", 1).unwrap();
        assert_eq!(rec.answer, "x^3/3 + C");
    }

    #[test]
    fn test_definite_integration() {
        let rec = solve_integration("Integrate x^2 from 0 to 3", 1).unwrap();
        assert_eq!(rec.answer, "9");
    }

    #[test]
    fn test_no_expression_is_error() {
        assert!(solve_differentiation("differentiate", 1).is_err());
    }
}
