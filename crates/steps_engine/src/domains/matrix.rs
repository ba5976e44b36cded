use crate::error::SolveError;
use crate::extract::extract_matrices;
use crate::record::SolutionRecord;
use steps_ast::format_number;

/// Determinants (2×2 and 3×3), addition, and multiplication over bracketed
/// matrices. Keyword picks the operation; one matrix defaults to its
/// determinant.
pub fn solve_matrix(problem: &str, index: usize) -> Result<SolutionRecord, SolveError> {
    let lower = problem.to_lowercase();
    let matrices = extract_matrices(problem);

    let mut rec = SolutionRecord::new(index, problem, "Matrix");

    match matrices.as_slice() {
        [m] => {
            rec.push_step("Read the matrix", render(m));
            rec.answer = determinant_with_steps(m, &mut rec)?;
        }
        [a, b] if lower.contains("add") || lower.contains('+') => {
            if a.len() != b.len() || a[0].len() != b[0].len() {
                return Err(SolveError::Unsupported(
                    "matrix addition needs equal dimensions".into(),
                ));
            }
            rec.push_step("Read the matrices", format!("{} and {}", render(a), render(b)));
            rec.push_step("Add element by element", "C[i][j] = A[i][j] + B[i][j]");
            let sum: Vec<Vec<f64>> = a
                .iter()
                .zip(b)
                .map(|(ra, rb)| ra.iter().zip(rb).map(|(x, y)| x + y).collect())
                .collect();
            rec.answer = render(&sum);
        }
        [a, b] if lower.contains("multipl") || lower.contains("product") => {
            if a[0].len() != b.len() {
                return Err(SolveError::Unsupported(
                    "inner dimensions must agree for multiplication".into(),
                ));
            }
            rec.push_step("Read the matrices", format!("{} and {}", render(a), render(b)));
            rec.push_step(
                "Multiply rows into columns",
                "C[i][j] = Σ A[i][k] · B[k][j]",
            );
            let mut product = vec![vec![0.0; b[0].len()]; a.len()];
            for i in 0..a.len() {
                for j in 0..b[0].len() {
                    for (k, row_b) in b.iter().enumerate() {
                        product[i][j] += a[i][k] * row_b[j];
                    }
                }
            }
            rec.answer = render(&product);
        }
        [m, _] => {
            // Two matrices but no recognized operation: report on the first.
            rec.push_step("Read the matrix", render(m));
            rec.answer = determinant_with_steps(m, &mut rec)?;
        }
        _ => {
            return Err(SolveError::Unsupported(
                "expected a bracketed matrix like [[1, 2], [3, 4]]".into(),
            ))
        }
    }

    Ok(rec)
}

fn determinant_with_steps(
    m: &[Vec<f64>],
    rec: &mut SolutionRecord,
) -> Result<String, SolveError> {
    match (m.len(), m[0].len()) {
        (2, 2) => {
            rec.push_step("2×2 determinant", "det = ad - bc");
            let det = m[0][0] * m[1][1] - m[0][1] * m[1][0];
            rec.push_step(
                "Substitute the entries",
                format!(
                    "det = {}·{} - {}·{} = {}",
                    format_number(m[0][0]),
                    format_number(m[1][1]),
                    format_number(m[0][1]),
                    format_number(m[1][0]),
                    format_number(det)
                ),
            );
            Ok(format_number(det))
        }
        (3, 3) => {
            rec.push_step(
                "3×3 determinant by cofactor expansion along the first row",
                "det = a(ei - fh) - b(di - fg) + c(dh - eg)",
            );
            let det = m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
                - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
                + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0]);
            rec.push_step("Evaluate the cofactors", format!("det = {}", format_number(det)));
            Ok(format_number(det))
        }
        (r, c) => Err(SolveError::Unsupported(format!(
            "determinant only implemented for 2×2 and 3×3, got {}×{}",
            r, c
        ))),
    }
}

fn render(m: &[Vec<f64>]) -> String {
    let rows: Vec<String> = m
        .iter()
        .map(|r| {
            let cells: Vec<String> = r.iter().map(|x| format_number(*x)).collect();
            format!("[{}]", cells.join(", "))
        })
        .collect();
    format!("[{}]", rows.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinant_2x2() {
        let rec = solve_matrix("determinant of [[1, 2], [3, 4]]", 1).unwrap();
        assert_eq!(rec.answer, "-2");
    }

    #[test]
    fn test_determinant_3x3() {
        let rec = solve_matrix("determinant of [[2, 0, 0], [0, 3, 0], [0, 0, 4]]", 1).unwrap();
        assert_eq!(rec.answer, "24");
    }

    #[test]
    fn test_addition() {
        let rec = solve_matrix("add [[1, 2], [3, 4]] and [[5, 6], [7, 8]]", 1).unwrap();
        assert_eq!(rec.answer, "[[6, 8], [10, 12]]");
    }

    #[test]
    fn test_multiplication() {
        let rec = solve_matrix("multiply [[1, 0], [0, 1]] and [[5, 6], [7, 8]]", 1).unwrap();
        assert_eq!(rec.answer, "[[5, 6], [7, 8]]");
    }

    #[test]
    fn test_no_matrix_is_error() {
        assert!(solve_matrix("find the matrix", 1).is_err());
    }
}
