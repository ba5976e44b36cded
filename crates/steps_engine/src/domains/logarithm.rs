use crate::error::SolveError;
use crate::eval::evaluate;
use crate::extract::extract_expression;
use crate::record::SolutionRecord;
use steps_ast::format_number;
use steps_parser::{normalize, parse};

/// Evaluate logarithmic expressions: `log` is base 10, `ln` is natural.
pub fn solve_logarithm(problem: &str, index: usize) -> Result<SolutionRecord, SolveError> {
    let expression = extract_expression(problem)
        .ok_or_else(|| SolveError::Unsupported("no logarithmic expression found".into()))?;

    let mut rec = SolutionRecord::new(index, problem, "Logarithms");
    rec.push_step("Extract the expression", &expression);
    rec.push_step(
        "Logarithm conventions",
        "log(x) is base 10; ln(x) is base e",
    );

    let parsed = parse(&normalize(&expression))?;
    let value = evaluate(&parsed)?;
    let answer = format_number(round_noise(value));
    rec.push_step("Evaluate", format!("{} = {}", expression, answer));
    rec.answer = answer;
    Ok(rec)
}

fn round_noise(v: f64) -> f64 {
    (v * 1e9).round() / 1e9
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_base_10() {
        let rec = solve_logarithm("log(100)", 1).unwrap();
        assert_eq!(rec.answer, "2");
    }

    #[test]
    fn test_natural_log() {
        let rec = solve_logarithm("Evaluate ln(e)", 1).unwrap();
        assert_eq!(rec.answer, "1");
    }

    #[test]
    fn test_sum_of_logs() {
        let rec = solve_logarithm("log(10) + log(1000)", 1).unwrap();
        assert_eq!(rec.answer, "4");
    }

    #[test]
    fn test_log_of_zero_is_error() {
        assert!(solve_logarithm("log(0)", 1).is_err());
    }
}
