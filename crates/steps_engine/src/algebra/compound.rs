use super::{linear_steps, quadratic_steps};
use crate::error::SolveError;
use crate::extract::extract_equation;
use crate::record::{SolutionRecord, VisualizationHint};
use steps_parser::{detect_variable, ParseError};

/// Combined solve-then-describe path for compound requests like
/// "solve x^2 - 4 = 0 and graph it". The algebraic answer comes first; a
/// graph-description step and a visualization hint are appended, while
/// actual plotting stays with an external collaborator.
pub fn solve_and_graph(problem: &str, index: usize) -> Result<SolutionRecord, SolveError> {
    let equation = extract_equation(problem).ok_or(ParseError::MissingEquals)?;
    let var = detect_variable(&equation).unwrap_or_else(|| "x".to_string());

    let mut rec = SolutionRecord::new(index, problem, "Algebra & Graphing");
    rec.push_step("Extract the equation", &equation);

    let quadratic_shaped = equation.contains("^2") || equation.contains('²');
    rec.answer = if quadratic_shaped {
        quadratic_steps(&equation, &var, &mut rec.steps)?
    } else {
        linear_steps(&equation, &var, &mut rec.steps)?
    };

    let curve = if quadratic_shaped { "parabola" } else { "straight line" };
    rec.push_step(
        "Describe the graph",
        format!(
            "The graph of {} is a {}; the solutions above are its {}-intercepts",
            equation, curve, var
        ),
    );
    rec.visualization = Some(VisualizationHint {
        expression: equation.clone(),
    });
    Ok(rec)
}
