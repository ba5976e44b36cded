use super::signed;
use crate::error::SolveError;
use crate::extract::extract_equation;
use crate::record::{SolutionRecord, Step};
use steps_ast::format_number;
use steps_parser::{detect_variable, linear_coefficients, ParseError};

/// Solve `ax + b = c` by collecting coefficient and constant contributions
/// from both sides of the equals sign.
pub fn solve_linear(problem: &str, index: usize) -> Result<SolutionRecord, SolveError> {
    let equation = extract_equation(problem).ok_or(ParseError::MissingEquals)?;
    let var = detect_variable(&equation).unwrap_or_else(|| "x".to_string());

    let mut rec = SolutionRecord::new(index, problem, "Linear Equation");
    rec.push_step("Extract the equation", &equation);
    rec.answer = linear_steps(&equation, &var, &mut rec.steps)?;
    Ok(rec)
}

/// Worker shared with the compound path and the fallback chain.
pub(crate) fn linear_steps(
    equation: &str,
    var: &str,
    steps: &mut Vec<Step>,
) -> Result<String, SolveError> {
    let (a, b) = linear_coefficients(equation, var)?;
    if a == 0.0 {
        // No variable left after collection: the equation is degenerate.
        return Err(SolveError::DegenerateLinear(var.to_string()));
    }

    steps.push(Step::new(
        "Collect terms into standard form",
        format!("{}{} {} = 0", format_number(a), var, signed(b)),
    ));

    let solution = -b / a;
    steps.push(Step::new(
        "Isolate the variable",
        format!(
            "{} = {} / {}",
            var,
            format_number(-b),
            format_number(a)
        ),
    ));

    let answer = format!("{} = {}", var, format_number(solution));
    steps.push(Step::new("State the solution", &answer));
    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_linear() {
        let rec = solve_linear("Solve 2x + 3 = 7", 1).unwrap();
        assert_eq!(rec.answer, "x = 2");
        assert!(rec.error.is_none());
        assert!(rec.steps.len() >= 3);
    }

    #[test]
    fn test_variable_on_both_sides() {
        let rec = solve_linear("5x - 1 = 2x + 8", 1).unwrap();
        assert_eq!(rec.answer, "x = 3");
    }

    #[test]
    fn test_other_variable_name() {
        let rec = solve_linear("3t = 12", 1).unwrap();
        assert_eq!(rec.answer, "t = 4");
    }

    #[test]
    fn test_degenerate_is_error() {
        assert!(matches!(
            solve_linear("3 = 3", 1),
            Err(SolveError::DegenerateLinear(_))
        ));
    }

    #[test]
    fn test_missing_equals_is_error() {
        assert!(matches!(
            solve_linear("2x + 3", 1),
            Err(SolveError::Parse(ParseError::MissingEquals))
        ));
    }
}
