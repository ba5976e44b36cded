use crate::error::SolveError;
use crate::extract::extract_tuples;
use crate::record::SolutionRecord;
use steps_ast::format_number;

/// Dot product, cross product, magnitude, and angle over coordinate
/// tuples. The operation is picked by keyword; two vectors default to the
/// dot product, one vector to its magnitude.
pub fn solve_vector(problem: &str, index: usize) -> Result<SolutionRecord, SolveError> {
    let lower = problem.to_lowercase();
    let vectors = extract_tuples(problem);

    let mut rec = SolutionRecord::new(index, problem, "Vector");

    match vectors.as_slice() {
        [a, b] if a.len() == b.len() => {
            rec.push_step(
                "Read the vectors",
                format!("A = {}, B = {}", render(a), render(b)),
            );
            if lower.contains("cross") {
                if a.len() != 3 {
                    return Err(SolveError::Unsupported(
                        "cross product needs 3-dimensional vectors".into(),
                    ));
                }
                let c = [
                    a[1] * b[2] - a[2] * b[1],
                    a[2] * b[0] - a[0] * b[2],
                    a[0] * b[1] - a[1] * b[0],
                ];
                rec.push_step(
                    "Cross product formula",
                    "A × B = (a₂b₃ - a₃b₂, a₃b₁ - a₁b₃, a₁b₂ - a₂b₁)",
                );
                rec.answer = render(&c);
            } else if lower.contains("angle") {
                let dot = dot(a, b);
                let denom = magnitude(a) * magnitude(b);
                if denom == 0.0 {
                    return Err(SolveError::Eval("angle with a zero vector".into()));
                }
                rec.push_step(
                    "Angle formula",
                    format!(
                        "cos θ = (A·B)/(|A||B|) = {} / {}",
                        format_number(dot),
                        format_number(denom)
                    ),
                );
                let degrees = (dot / denom).clamp(-1.0, 1.0).acos().to_degrees();
                rec.answer = format!("θ = {}°", format_number(degrees));
            } else {
                let value = dot(a, b);
                rec.push_step(
                    "Dot product: multiply matching components and add",
                    dot_expansion(a, b),
                );
                rec.answer = format_number(value);
            }
        }
        [a] => {
            rec.push_step("Read the vector", format!("A = {}", render(a)));
            rec.push_step(
                "Magnitude: square root of the sum of squared components",
                format!("|A| = √({})", sum_of_squares_text(a)),
            );
            rec.answer = format_number(magnitude(a));
        }
        _ => {
            return Err(SolveError::Unsupported(
                "expected one or two coordinate tuples".into(),
            ))
        }
    }

    Ok(rec)
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn magnitude(a: &[f64]) -> f64 {
    a.iter().map(|x| x * x).sum::<f64>().sqrt()
}

fn render(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format_number(*x)).collect();
    format!("({})", parts.join(", "))
}

fn dot_expansion(a: &[f64], b: &[f64]) -> String {
    let parts: Vec<String> = a
        .iter()
        .zip(b)
        .map(|(x, y)| format!("{}·{}", format_number(*x), format_number(*y)))
        .collect();
    parts.join(" + ")
}

fn sum_of_squares_text(a: &[f64]) -> String {
    let parts: Vec<String> = a.iter().map(|x| format!("{}²", format_number(*x))).collect();
    parts.join(" + ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_product_default() {
        let rec = solve_vector("dot product of (1, 2, 3) and (4, 5, 6)", 1).unwrap();
        assert_eq!(rec.answer, "32");
    }

    #[test]
    fn test_cross_product() {
        let rec = solve_vector("cross product of (1, 0, 0) and (0, 1, 0)", 1).unwrap();
        assert_eq!(rec.answer, "(0, 0, 1)");
    }

    #[test]
    fn test_magnitude() {
        let rec = solve_vector("magnitude of (3, 4)", 1).unwrap();
        assert_eq!(rec.answer, "5");
    }

    #[test]
    fn test_angle() {
        let rec = solve_vector("angle between (1, 0, 0) and (0, 1, 0)", 1).unwrap();
        assert_eq!(rec.answer, "θ = 90°");
    }

    #[test]
    fn test_missing_vectors_is_error() {
        assert!(solve_vector("find the vector", 1).is_err());
    }
}
