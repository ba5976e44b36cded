//! The tail of the dispatch chain: direct evaluation, then symbolic
//! simplification, then give up (the caller routes to the fallback chain).

use crate::error::SolveError;
use crate::eval::evaluate;
use crate::extract::extract_expression;
use crate::record::SolutionRecord;
use crate::simplify::Simplifier;
use steps_ast::format_number;
use steps_parser::{normalize, parse};

/// Arithmetic route: fold constants with the rewrite engine so the trace
/// shows the work, then evaluate.
pub fn solve_arithmetic(problem: &str, index: usize) -> Result<SolutionRecord, SolveError> {
    let expression = extract_expression(problem)
        .ok_or_else(|| SolveError::Unsupported("no arithmetic expression found".into()))?;
    let parsed = parse(&normalize(&expression))?;

    let mut rec = SolutionRecord::new(index, problem, "Arithmetic");
    rec.push_step("Extract the expression", &expression);

    let (folded, steps) = Simplifier::with_default_rules().simplify(parsed.clone());
    rec.steps.extend(steps);

    let value = evaluate(&folded).or_else(|_| evaluate(&parsed))?;
    rec.answer = format_number(value);
    rec.push_step("State the result", rec.answer.clone());
    Ok(rec)
}

/// Generic solver for problems no predicate claimed: try to evaluate, then
/// to simplify; error out if neither moves.
pub fn solve_generic(problem: &str, index: usize) -> Result<SolutionRecord, SolveError> {
    let expression = extract_expression(problem)
        .ok_or_else(|| SolveError::Unsupported("no mathematical content found".into()))?;

    let mut rec = SolutionRecord::new(index, problem, "General Mathematics");
    rec.push_step("Extract the expression", &expression);

    let parsed = parse(&normalize(&expression))?;

    if let Ok(value) = evaluate(&parsed) {
        rec.push_step(
            "Evaluate directly",
            format!("{} = {}", expression, format_number(value)),
        );
        rec.answer = format_number(value);
        return Ok(rec);
    }

    let (simplified, steps) = Simplifier::with_default_rules().simplify(parsed);
    if !steps.is_empty() {
        rec.steps.extend(steps);
        rec.answer = format!("{}", simplified);
        rec.push_step("State the simplified form", rec.answer.clone());
        return Ok(rec);
    }

    Err(SolveError::Unsupported(
        "the expression could be neither evaluated nor simplified".into(),
    ))
}
