use super::signed;
use crate::error::SolveError;
use crate::extract::extract_equation;
use crate::record::{SolutionRecord, Step};
use steps_ast::format_number;
use steps_parser::{detect_variable, quadratic_coefficients, ParseError};

/// Solve `ax^2 + bx + c = 0` via the discriminant, with one branch per
/// root multiplicity.
pub fn solve_quadratic(problem: &str, index: usize) -> Result<SolutionRecord, SolveError> {
    let equation = extract_equation(problem).ok_or(ParseError::MissingEquals)?;
    let var = detect_variable(&equation).unwrap_or_else(|| "x".to_string());

    let mut rec = SolutionRecord::new(index, problem, "Quadratic Equation");
    rec.push_step("Extract the equation", &equation);
    rec.answer = quadratic_steps(&equation, &var, &mut rec.steps)?;
    Ok(rec)
}

/// Worker shared with the compound path and the fallback chain.
pub(crate) fn quadratic_steps(
    equation: &str,
    var: &str,
    steps: &mut Vec<Step>,
) -> Result<String, SolveError> {
    let (a, b, c) = quadratic_coefficients(equation, var)?;
    if a == 0.0 {
        // Leading coefficient vanished: solve b*x + c = 0 directly.
        if b == 0.0 {
            return Err(SolveError::DegenerateLinear(var.to_string()));
        }
        steps.push(Step::new(
            "The squared terms cancel; the equation is linear",
            format!("{}{} {} = 0", format_number(b), var, signed(c)),
        ));
        let solution = -c / b;
        let answer = format!("{} = {}", var, format_number(solution));
        steps.push(Step::new("Isolate the variable", &answer));
        return Ok(answer);
    }

    steps.push(Step::new(
        "Write in standard form",
        format!(
            "{}{}^2 {}{} {} = 0",
            format_number(a),
            var,
            signed(b),
            var,
            signed(c)
        ),
    ));
    steps.push(Step::new(
        "Identify the coefficients",
        format!(
            "a = {}, b = {}, c = {}",
            format_number(a),
            format_number(b),
            format_number(c)
        ),
    ));

    let discriminant = b * b - 4.0 * a * c;
    steps.push(Step::new(
        "Compute the discriminant",
        format!(
            "Δ = b^2 - 4ac = {} - {} = {}",
            format_number(b * b),
            format_number(4.0 * a * c),
            format_number(discriminant)
        ),
    ));

    let answer = if discriminant > 0.0 {
        let sqrt_d = discriminant.sqrt();
        let x1 = (-b + sqrt_d) / (2.0 * a);
        let x2 = (-b - sqrt_d) / (2.0 * a);
        steps.push(Step::new(
            "Δ > 0: two distinct real roots via the quadratic formula",
            format!("{} = (-b ± √Δ) / 2a", var),
        ));
        steps.push(Step::new(
            "Evaluate both roots",
            format!(
                "{v} = ({nb} + {sd}) / {ta} or {v} = ({nb} - {sd}) / {ta}",
                v = var,
                nb = format_number(-b),
                sd = format_number(sqrt_d),
                ta = format_number(2.0 * a)
            ),
        ));
        format!(
            "{v} = {} or {v} = {}",
            format_number(x1),
            format_number(x2),
            v = var
        )
    } else if discriminant == 0.0 {
        let x = -b / (2.0 * a);
        steps.push(Step::new(
            "Δ = 0: one repeated real root",
            format!("{} = -b / 2a = {}", var, format_number(x)),
        ));
        format!("{} = {} (double root)", var, format_number(x))
    } else {
        let real = -b / (2.0 * a);
        let imag = (-discriminant).sqrt() / (2.0 * a);
        steps.push(Step::new(
            "Δ < 0: a complex conjugate pair",
            format!(
                "{} = -b/2a ± (√|Δ|/2a)i = {} ± {}i",
                var,
                format_number(real),
                format_number(imag)
            ),
        ));
        format!(
            "{v} = {r} + {i}i or {v} = {r} - {i}i",
            v = var,
            r = format_number(real),
            i = format_number(imag)
        )
    };

    steps.push(Step::new("State the solution", &answer));
    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_real_roots() {
        let rec = solve_quadratic("x^2 - 5x + 6 = 0", 1).unwrap();
        assert_eq!(rec.answer, "x = 3 or x = 2");
        // The discriminant of x^2 - 5x + 6 is 1.
        assert!(rec
            .steps
            .iter()
            .any(|s| s.description.contains("discriminant") && s.math.ends_with("= 1")));
    }

    #[test]
    fn test_repeated_root() {
        let rec = solve_quadratic("x^2 - 4x + 4 = 0", 1).unwrap();
        assert_eq!(rec.answer, "x = 2 (double root)");
    }

    #[test]
    fn test_complex_roots() {
        let rec = solve_quadratic("x^2 + 1 = 0", 1).unwrap();
        assert_eq!(rec.answer, "x = 0 + 1i or x = 0 - 1i");
    }

    #[test]
    fn test_degrades_to_linear() {
        // ^2 terms cancel entirely.
        let rec = solve_quadratic("x^2 + 2x = x^2 + 6", 1).unwrap();
        assert_eq!(rec.answer, "x = 3");
    }
}
