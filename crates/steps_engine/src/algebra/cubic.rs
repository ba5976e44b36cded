use super::{signed, solve_quadratic};
use crate::error::SolveError;
use crate::extract::extract_equation;
use crate::record::{SolutionRecord, Step};
use steps_ast::format_number;
use steps_parser::{cubic_coefficients, detect_variable, ParseError};

/// Solve `ax^3 + bx^2 + cx + d = 0` by depressing the cubic and branching
/// on the cubic discriminant. A zero leading coefficient degrades to the
/// quadratic solver instead of dividing by zero.
pub fn solve_cubic(problem: &str, index: usize) -> Result<SolutionRecord, SolveError> {
    let equation = extract_equation(problem).ok_or(ParseError::MissingEquals)?;
    let var = detect_variable(&equation).unwrap_or_else(|| "x".to_string());

    let (a, b, c, d) = cubic_coefficients(&equation, &var)?;
    if a == 0.0 {
        return solve_quadratic(problem, index);
    }

    let mut rec = SolutionRecord::new(index, problem, "Cubic Equation");
    rec.push_step("Extract the equation", &equation);
    rec.push_step(
        "Write in standard form",
        format!(
            "{}{v}^3 {}{v}^2 {}{v} {} = 0",
            format_number(a),
            signed(b),
            signed(c),
            signed(d),
            v = var
        ),
    );

    rec.answer = cubic_steps(&var, a, b, c, d, &mut rec.steps);
    Ok(rec)
}

fn cubic_steps(var: &str, a: f64, b: f64, c: f64, d: f64, steps: &mut Vec<Step>) -> String {
    // Depress with x = t - b/3a: t^3 + pt + q = 0.
    let shift = b / (3.0 * a);
    let p = (3.0 * a * c - b * b) / (3.0 * a * a);
    let q = (2.0 * b * b * b - 9.0 * a * b * c + 27.0 * a * a * d) / (27.0 * a * a * a);
    steps.push(Step::new(
        "Depress the cubic with the substitution x = t - b/3a",
        format!(
            "t^3 + pt + q = 0 with p = {}, q = {}",
            format_number(p),
            format_number(q)
        ),
    ));

    let discriminant = q * q / 4.0 + p * p * p / 27.0;
    steps.push(Step::new(
        "Compute the cubic discriminant",
        format!("Δ = q^2/4 + p^3/27 = {}", format_number(discriminant)),
    ));

    let roots: Vec<f64> = if discriminant > 0.0 {
        let sqrt_d = discriminant.sqrt();
        let t = (-q / 2.0 + sqrt_d).cbrt() + (-q / 2.0 - sqrt_d).cbrt();
        steps.push(Step::new(
            "Δ > 0: one real root by Cardano's formula",
            format!(
                "t = ∛(-q/2 + √Δ) + ∛(-q/2 - √Δ) = {}",
                format_number(t)
            ),
        ));
        vec![t - shift]
    } else if discriminant == 0.0 {
        if p == 0.0 {
            steps.push(Step::new(
                "Δ = 0 with p = 0: a triple root at t = 0",
                "t = 0",
            ));
            vec![-shift]
        } else {
            let t1 = 3.0 * q / p;
            let t2 = -3.0 * q / (2.0 * p);
            steps.push(Step::new(
                "Δ = 0: one single and one double root",
                format!("t₁ = 3q/p = {}, t₂ = -3q/2p = {}", format_number(t1), format_number(t2)),
            ));
            vec![t1 - shift, t2 - shift]
        }
    } else {
        // Casus irreducibilis: three real roots via the trigonometric method.
        let m = 2.0 * (-p / 3.0).sqrt();
        let theta = (3.0 * q / (2.0 * p) * (-3.0 / p).sqrt()).acos() / 3.0;
        steps.push(Step::new(
            "Δ < 0: three real roots via the trigonometric method",
            "t_k = 2√(-p/3) · cos(θ - 2πk/3), θ = arccos(3q/2p · √(-3/p))/3, k = 0, 1, 2",
        ));
        (0..3)
            .map(|k| m * (theta - 2.0 * std::f64::consts::PI * k as f64 / 3.0).cos() - shift)
            .collect()
    };

    let rendered: Vec<String> = roots
        .iter()
        .map(|r| format!("{} = {}", var, format_number(clean(*r))))
        .collect();
    let answer = rendered.join(", ");
    steps.push(Step::new(
        "Undo the substitution to recover x",
        format!("x = t - b/3a = t - {}", format_number(shift)),
    ));
    steps.push(Step::new("State the solution", &answer));
    answer
}

/// Round away the floating noise the trigonometric branch accumulates.
fn clean(v: f64) -> f64 {
    let rounded = (v * 1e9).round() / 1e9;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roots_of(rec: &SolutionRecord) -> Vec<f64> {
        rec.answer
            .split(", ")
            .map(|part| {
                part.split('=')
                    .nth(1)
                    .expect("root format")
                    .trim()
                    .parse::<f64>()
                    .expect("numeric root")
            })
            .collect()
    }

    #[test]
    fn test_three_real_roots() {
        // (x-1)(x-2)(x-3) = x^3 - 6x^2 + 11x - 6
        let rec = solve_cubic("x^3 - 6x^2 + 11x - 6 = 0", 1).unwrap();
        let mut roots = roots_of(&rec);
        roots.sort_by(|a, b| a.partial_cmp(b).expect("comparable"));
        assert_eq!(roots.len(), 3);
        for (root, expected) in roots.iter().zip([1.0, 2.0, 3.0]) {
            assert!((root - expected).abs() < 1e-6, "root {} != {}", root, expected);
        }
    }

    #[test]
    fn test_single_real_root() {
        // x^3 + x + 1 has one real root near -0.6823
        let rec = solve_cubic("x^3 + x + 1 = 0", 1).unwrap();
        let roots = roots_of(&rec);
        assert_eq!(roots.len(), 1);
        assert!((roots[0] + 0.682328).abs() < 1e-4);
    }

    #[test]
    fn test_triple_root() {
        // (x-1)^3 = x^3 - 3x^2 + 3x - 1
        let rec = solve_cubic("x^3 - 3x^2 + 3x - 1 = 0", 1).unwrap();
        let roots = roots_of(&rec);
        assert_eq!(roots.len(), 1);
        assert!((roots[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_leading_coefficient_degrades() {
        let rec = solve_cubic("x^2 - 5x + 6 = 0", 1).unwrap();
        assert_eq!(rec.problem_type, "Quadratic Equation");
    }

    #[test]
    fn test_discriminant_step_present() {
        let rec = solve_cubic("x^3 - 6x^2 + 11x - 6 = 0", 1).unwrap();
        assert!(rec
            .steps
            .iter()
            .any(|s| s.math.starts_with("Δ = q^2/4 + p^3/27")));
    }
}
