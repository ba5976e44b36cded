use crate::error::SolveError;
use crate::eval::evaluate;
use crate::extract::extract_expression;
use crate::record::SolutionRecord;
use regex::Regex;
use std::sync::LazyLock;
use steps_ast::format_number;
use steps_parser::{normalize, parse};

/// Trig calls with a bare numeric argument are read in degrees; that is
/// how these problems are written ("sin(30) + cos(60)").
static DEGREE_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(sin|cos|tan|sec|csc|cot)\(\s*(-?\d+(?:\.\d+)?)\s*\)")
        .expect("valid regex literal")
});

/// Evaluate a trigonometric expression, interpreting plain numeric angles
/// as degrees.
pub fn solve_trigonometry(problem: &str, index: usize) -> Result<SolutionRecord, SolveError> {
    let expression = extract_expression(problem)
        .ok_or_else(|| SolveError::Unsupported("no trigonometric expression found".into()))?;

    let mut rec = SolutionRecord::new(index, problem, "Trigonometry");
    rec.push_step("Extract the expression", &expression);

    let in_radians = DEGREE_CALL
        .replace_all(&expression, "$1($2 * pi / 180)")
        .into_owned();
    if in_radians != expression {
        rec.push_step(
            "Interpret plain angles as degrees and convert to radians",
            &in_radians,
        );
    }

    let parsed = parse(&normalize(&in_radians))?;
    let value = evaluate(&parsed)?;
    let answer = format_number(round_noise(value));
    rec.push_step("Evaluate", format!("{} = {}", expression, answer));
    rec.answer = answer;
    Ok(rec)
}

/// sin(30°) should print 0.5, not 0.49999999999999994.
fn round_noise(v: f64) -> f64 {
    (v * 1e9).round() / 1e9
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_evaluation() {
        let rec = solve_trigonometry("sin(30) + cos(60)", 1).unwrap();
        assert_eq!(rec.answer, "1");
    }

    #[test]
    fn test_single_call() {
        let rec = solve_trigonometry("Evaluate tan(45)", 1).unwrap();
        assert_eq!(rec.answer, "1");
    }

    #[test]
    fn test_sin_30() {
        let rec = solve_trigonometry("what is sin(30)", 1).unwrap();
        assert_eq!(rec.answer, "0.5");
    }

    #[test]
    fn test_no_expression_is_error() {
        assert!(solve_trigonometry("trigonometry", 1).is_err());
    }
}
