//! Pulling math out of prose. Solvers receive whole problem sentences
//! ("Find the derivative of 3x^2 + 2x"); these helpers strip the English
//! and keep the math.

use regex::Regex;
use std::sync::LazyLock;

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("valid regex literal"));

static TUPLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\s*(-?\d+(?:\.\d+)?(?:\s*,\s*-?\d+(?:\.\d+)?)+)\s*\)")
        .expect("valid regex literal")
});

static MATRIX_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]+)\]").expect("valid regex literal"));

static BOUNDS_FROM_TO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"from\s+(-?\d+(?:\.\d+)?)\s+to\s+(-?\d+(?:\.\d+)?)").expect("valid regex literal")
});

static BOUNDS_BETWEEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"between\s+(-?\d+(?:\.\d+)?)\s+and\s+(-?\d+(?:\.\d+)?)")
        .expect("valid regex literal")
});

/// Function words that survive token filtering even though they are plain
/// alphabetic.
const MATH_WORDS: &[&str] = &[
    "sin", "cos", "tan", "sec", "csc", "cot", "arcsin", "arccos", "arctan", "ln", "log", "exp",
    "sqrt", "abs", "pi", "e",
];

fn is_math_token(token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    if token
        .chars()
        .any(|c| c.is_ascii_digit() || "+-*/^=()[]{}²³√|∫".contains(c))
    {
        return true;
    }
    let lower = token.to_lowercase();
    if MATH_WORDS.contains(&lower.as_str()) {
        return true;
    }
    token.len() == 1 && token.chars().all(|c| c.is_ascii_alphabetic())
}

/// Keep only math-looking tokens, joined back with single spaces.
fn filter_math_tokens(text: &str) -> String {
    let kept: Vec<&str> = text
        .split_whitespace()
        .map(|t| t.trim_end_matches(['.', '?', '!', ';', ':', ',']))
        .filter(|t| is_math_token(t))
        .collect();
    kept.join(" ")
}

/// The math expression buried in a sentence, lower-cased. `None` when
/// nothing math-like remains.
pub fn extract_expression(text: &str) -> Option<String> {
    let filtered = filter_math_tokens(&text.to_lowercase());
    if filtered.is_empty() {
        None
    } else {
        Some(filtered)
    }
}

/// Like [`extract_expression`] but the result must contain an `=`.
pub fn extract_equation(text: &str) -> Option<String> {
    extract_expression(text).filter(|s| s.contains('='))
}

/// All plain numbers in order of appearance.
pub fn extract_numbers(text: &str) -> Vec<f64> {
    NUMBER
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// Comma-separated coordinate tuples like `(1, 2, 3)`.
pub fn extract_tuples(text: &str) -> Vec<Vec<f64>> {
    TUPLE
        .captures_iter(text)
        .map(|cap| extract_numbers(&cap[1]))
        .collect()
}

/// Bracketed matrices like `[[1, 2], [3, 4]]`, row-major.
pub fn extract_matrices(text: &str) -> Vec<Vec<Vec<f64>>> {
    let mut matrices = Vec::new();
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut depth = 0usize;
    let mut row_start = None;

    // A matrix is a maximal run of depth-2 rows inside one outer bracket.
    let bytes: Vec<char> = text.chars().collect();
    for (i, &c) in bytes.iter().enumerate() {
        match c {
            '[' => {
                depth += 1;
                if depth == 2 {
                    row_start = Some(i + 1);
                }
            }
            ']' => {
                if depth == 2 {
                    if let Some(start) = row_start.take() {
                        let row_text: String = bytes[start..i].iter().collect();
                        let row = extract_numbers(&row_text);
                        if !row.is_empty() {
                            rows.push(row);
                        }
                    }
                }
                if depth == 1 && !rows.is_empty() {
                    let width = rows[0].len();
                    if rows.iter().all(|r| r.len() == width) {
                        matrices.push(std::mem::take(&mut rows));
                    } else {
                        rows.clear();
                    }
                }
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
    }
    matrices
}

/// Definite-integral bounds: "from a to b" or "between a and b". Returns
/// `(lower, upper)` and the text with the bound phrase removed.
pub fn extract_bounds(text: &str) -> Option<((f64, f64), String)> {
    for re in [&*BOUNDS_FROM_TO, &*BOUNDS_BETWEEN] {
        if let Some(cap) = re.captures(text) {
            let lower = cap[1].parse().ok()?;
            let upper = cap[2].parse().ok()?;
            let without = re.replace(text, "").into_owned();
            return Some(((lower, upper), without));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_expression_strips_words() {
        assert_eq!(
            extract_expression("Find the derivative of 3x^2 + 2x + 1").as_deref(),
            Some("3x^2 + 2x + 1")
        );
        assert_eq!(
            extract_expression("Evaluate sin(30) + cos(60)").as_deref(),
            Some("sin(30) + cos(60)")
        );
        assert_eq!(extract_expression("no math here at all"), None);
    }

    #[test]
    fn test_extract_equation() {
        assert_eq!(
            extract_equation("Solve 2x + 3 = 7").as_deref(),
            Some("2x + 3 = 7")
        );
        assert_eq!(extract_equation("Solve 2x + 3"), None);
    }

    #[test]
    fn test_extract_numbers_and_tuples() {
        assert_eq!(extract_numbers("add 3 and -4.5"), vec![3.0, -4.5]);
        assert_eq!(
            extract_tuples("(1, 2, 3) and (4, 5, 6)"),
            vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]
        );
    }

    #[test]
    fn test_extract_matrices() {
        let ms = extract_matrices("determinant of [[1, 2], [3, 4]]");
        assert_eq!(ms, vec![vec![vec![1.0, 2.0], vec![3.0, 4.0]]]);
    }

    #[test]
    fn test_extract_bounds() {
        let ((lo, hi), rest) = extract_bounds("integrate x^2 from 0 to 3").unwrap();
        assert_eq!((lo, hi), (0.0, 3.0));
        assert!(!rest.contains("from"));
    }
}
