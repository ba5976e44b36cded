//! The universal fallback chain.
//!
//! A ranked list of generic strategies, each returning an optional result;
//! the loop takes the first present one. When every strategy declines, the
//! caller still gets a usable record: a diagnostic breakdown carrying the
//! original error for observability. Nothing here ever raises.

use crate::algebra::{linear_steps, quadratic_steps};
use crate::error::SolveError;
use crate::eval::evaluate;
use crate::extract::{extract_equation, extract_expression};
use crate::record::{SolutionRecord, Step};
use crate::simplify::Simplifier;
use regex::Regex;
use std::sync::LazyLock;
use steps_ast::format_number;
use steps_parser::{detect_variable, normalize, parse};
use tracing::debug;

trait Strategy {
    fn name(&self) -> &'static str;
    /// `None` on any failure; failures here are expected and silent.
    fn attempt(&self, problem: &str) -> Option<(Vec<Step>, String)>;
}

/// Re-solve as a polynomial equation, quadratic first, then linear.
struct EquationStrategy;

impl Strategy for EquationStrategy {
    fn name(&self) -> &'static str {
        "symbolic equation solve"
    }

    fn attempt(&self, problem: &str) -> Option<(Vec<Step>, String)> {
        let equation = extract_equation(problem)?;
        let var = detect_variable(&equation).unwrap_or_else(|| "x".to_string());

        let mut steps = vec![Step::new("Extract the equation", &equation)];
        if let Ok(answer) = quadratic_steps(&equation, &var, &mut steps) {
            return Some((steps, answer));
        }
        let mut steps = vec![Step::new("Extract the equation", &equation)];
        let answer = linear_steps(&equation, &var, &mut steps).ok()?;
        Some((steps, answer))
    }
}

/// Symbolic evaluation: parse the whole input and fold it to an exact
/// constant with the rewrite engine. Prose makes the parse fail, which is
/// the point — only genuinely mathematical input qualifies.
struct EvaluateStrategy;

impl Strategy for EvaluateStrategy {
    fn name(&self) -> &'static str {
        "symbolic evaluation"
    }

    fn attempt(&self, problem: &str) -> Option<(Vec<Step>, String)> {
        let parsed = parse(normalize(problem).trim()).ok()?;
        let (folded, steps) = Simplifier::with_default_rules().simplify(parsed);
        match &*folded {
            steps_ast::Expr::Number(n) => Some((steps, format!("{}", n))),
            _ => None,
        }
    }
}

/// Evaluate the raw problem text as-is, with no word filtering.
struct DirectNumericStrategy;

impl Strategy for DirectNumericStrategy {
    fn name(&self) -> &'static str {
        "direct numeric evaluation"
    }

    fn attempt(&self, problem: &str) -> Option<(Vec<Step>, String)> {
        let parsed = parse(normalize(problem).trim()).ok()?;
        let value = evaluate(&parsed).ok()?;
        let answer = format_number(value);
        let steps = vec![Step::new(
            "Evaluate the input directly",
            format!("{} = {}", problem.trim(), answer),
        )];
        Some((steps, answer))
    }
}

/// Run the rewrite engine and accept any strict improvement.
struct SimplifyStrategy;

impl Strategy for SimplifyStrategy {
    fn name(&self) -> &'static str {
        "symbolic simplification"
    }

    fn attempt(&self, problem: &str) -> Option<(Vec<Step>, String)> {
        let expression = extract_expression(problem)?;
        let parsed = parse(&normalize(&expression)).ok()?;
        let (simplified, steps) = Simplifier::with_default_rules().simplify(parsed);
        if steps.is_empty() {
            return None;
        }
        Some((steps, format!("{}", simplified)))
    }
}

static PERCENT_OF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*%\s*of\s*(\d+(?:\.\d+)?)").expect("valid regex literal")
});
static FACTORIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)!").expect("valid regex literal"));
static RATIO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*:\s*(\d+)").expect("valid regex literal"));
static CHOOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d+)\s*(?:choose|c)\s*(\d+)\b").expect("valid regex literal")
});
static PERMUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d+)\s*p\s*(\d+)\b").expect("valid regex literal"));
static PRIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:is\s+)?(\d+)\s+(?:a\s+)?prime").expect("valid regex literal"));

/// Closed-set pattern matching: percentage, factorial, ratio, primality.
struct PatternStrategy;

impl Strategy for PatternStrategy {
    fn name(&self) -> &'static str {
        "closed-set patterns"
    }

    fn attempt(&self, problem: &str) -> Option<(Vec<Step>, String)> {
        let lower = problem.to_lowercase();

        if let Some(cap) = PERCENT_OF.captures(&lower) {
            let p: f64 = cap[1].parse().ok()?;
            let n: f64 = cap[2].parse().ok()?;
            let value = p / 100.0 * n;
            let steps = vec![Step::new(
                "Percentage: p% of n = (p/100)·n",
                format!("{}% of {} = {}", cap[1].to_string(), cap[2].to_string(), format_number(value)),
            )];
            return Some((steps, format_number(value)));
        }

        if let Some(cap) = PRIME.captures(&lower) {
            let n: u64 = cap[1].parse().ok()?;
            let (is_prime, witness) = trial_division(n);
            let verdict = if is_prime {
                format!("{} is prime", n)
            } else {
                match witness {
                    Some(d) => format!("{} is not prime (divisible by {})", n, d),
                    None => format!("{} is not prime", n),
                }
            };
            let steps = vec![Step::new(
                "Primality by trial division up to √n",
                verdict.clone(),
            )];
            return Some((steps, verdict));
        }

        if let Some(cap) = FACTORIAL.captures(&lower) {
            let n: u64 = cap[1].parse().ok()?;
            if n > 20 {
                return None;
            }
            let value = factorial(n);
            let steps = vec![Step::new(
                "Factorial: n! = n·(n-1)···1",
                format!("{}! = {}", n, value),
            )];
            return Some((steps, value.to_string()));
        }

        if let Some(cap) = CHOOSE.captures(&lower) {
            let n: u64 = cap[1].parse().ok()?;
            let r: u64 = cap[2].parse().ok()?;
            if r > n || n > 20 {
                return None;
            }
            let value = factorial(n) / (factorial(r) * factorial(n - r));
            let steps = vec![Step::new(
                "Combinations: nCr = n! / (r!(n-r)!)",
                format!("{}C{} = {}", n, r, value),
            )];
            return Some((steps, value.to_string()));
        }

        if let Some(cap) = PERMUTE.captures(&lower) {
            let n: u64 = cap[1].parse().ok()?;
            let r: u64 = cap[2].parse().ok()?;
            if r > n || n > 20 {
                return None;
            }
            let value = factorial(n) / factorial(n - r);
            let steps = vec![Step::new(
                "Permutations: nPr = n! / (n-r)!",
                format!("{}P{} = {}", n, r, value),
            )];
            return Some((steps, value.to_string()));
        }

        if let Some(cap) = RATIO.captures(&lower) {
            let a: u64 = cap[1].parse().ok()?;
            let b: u64 = cap[2].parse().ok()?;
            if a == 0 || b == 0 {
                return None;
            }
            let g = gcd(a, b);
            let answer = format!("{}:{}", a / g, b / g);
            let steps = vec![Step::new(
                "Reduce the ratio by the greatest common divisor",
                format!("gcd({}, {}) = {}, so {}:{} = {}", a, b, g, a, b, answer),
            )];
            return Some((steps, answer));
        }

        None
    }
}

fn factorial(n: u64) -> u64 {
    (1..=n.max(1)).product()
}

fn trial_division(n: u64) -> (bool, Option<u64>) {
    if n < 2 {
        return (false, None);
    }
    let mut d = 2;
    while d * d <= n {
        if n % d == 0 {
            return (false, Some(d));
        }
        d += 1;
    }
    (true, None)
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Build the best record the generic strategies can manage. Guaranteed to
/// return; a totally unsolvable problem yields a diagnostic record with
/// `error` set, not an exception.
pub fn fallback(problem: &str, index: usize, original: &SolveError) -> SolutionRecord {
    let strategies: [&dyn Strategy; 5] = [
        &EquationStrategy,
        &EvaluateStrategy,
        &DirectNumericStrategy,
        &SimplifyStrategy,
        &PatternStrategy,
    ];

    for strategy in strategies {
        debug!(strategy = strategy.name(), "fallback attempt");
        if let Some((steps, answer)) = strategy.attempt(problem) {
            // The literal failure strings some evaluators produce are not
            // answers.
            if answer.is_empty() || answer == "undefined" || answer == "NaN" {
                continue;
            }
            let mut rec = SolutionRecord::new(index, problem, "General Mathematics");
            rec.push_step(
                "The primary solver could not finish; a generic strategy applies",
                strategy.name(),
            );
            rec.steps.extend(steps);
            rec.answer = answer;
            return rec;
        }
    }

    diagnostic_record(problem, index, original)
}

fn diagnostic_record(problem: &str, index: usize, original: &SolveError) -> SolutionRecord {
    let mut rec = SolutionRecord::new(index, problem, "General Mathematics");

    let variables = detected_variables(problem);
    rec.push_step(
        "Detected variables",
        if variables.is_empty() {
            "none".to_string()
        } else {
            variables.join(", ")
        },
    );

    let operators = detected_operators(problem);
    rec.push_step(
        "Detected operators",
        if operators.is_empty() {
            "none".to_string()
        } else {
            operators.join(", ")
        },
    );

    rec.answer = "This problem requires manual analysis".to_string();
    rec.error = Some(original.to_string());
    rec
}

/// Standalone single letters are the variable candidates.
fn detected_variables(problem: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut word = String::new();
    for c in problem.chars().chain(std::iter::once(' ')) {
        if c.is_ascii_alphabetic() {
            word.push(c);
        } else if !word.is_empty() {
            let w = std::mem::take(&mut word);
            if w.len() == 1 {
                let lower = w.to_lowercase();
                if !found.contains(&lower) {
                    found.push(lower);
                }
            }
        }
    }
    found.sort();
    found
}

fn detected_operators(problem: &str) -> Vec<String> {
    ['+', '-', '*', '/', '^', '√', '=']
        .iter()
        .filter(|op| problem.contains(**op))
        .map(|op| op.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_error() -> SolveError {
        SolveError::Unsupported("primary path declined".into())
    }

    #[test]
    fn test_equation_strategy() {
        let rec = fallback("mystery: 2x + 1 = 5", 1, &dummy_error());
        assert!(rec.error.is_none());
        assert_eq!(rec.answer, "x = 2");
    }

    #[test]
    fn test_percentage_pattern() {
        let rec = fallback("what is 20% of 150", 1, &dummy_error());
        assert_eq!(rec.answer, "30");
    }

    #[test]
    fn test_primality_pattern() {
        let rec = fallback("is 17 prime", 1, &dummy_error());
        assert!(rec.answer.contains("17 is prime"));

        let rec = fallback("is 15 prime", 1, &dummy_error());
        assert!(rec.answer.contains("not prime"));
    }

    #[test]
    fn test_combination_pattern() {
        let rec = fallback("how many ways: 5 choose 2", 1, &dummy_error());
        assert_eq!(rec.answer, "10");
    }

    #[test]
    fn test_ratio_pattern() {
        let rec = fallback("simplify the ratio 6:9", 1, &dummy_error());
        assert_eq!(rec.answer, "2:3");
    }

    #[test]
    fn test_diagnostic_never_raises() {
        let rec = fallback("", 1, &dummy_error());
        assert!(rec.error.is_some());
        assert_eq!(rec.answer, "This problem requires manual analysis");

        let rec = fallback("?!...", 2, &dummy_error());
        assert!(rec.error.is_some());
    }

    #[test]
    fn test_diagnostic_lists_variables_and_operators() {
        let rec = fallback("p -> q & r", 1, &dummy_error());
        assert!(rec.error.is_some());
        let joined: String = rec
            .steps
            .iter()
            .map(|s| format!("{}: {}", s.description, s.math))
            .collect::<Vec<_>>()
            .join("\n");
        assert!(joined.contains("p, q, r"));
        assert!(joined.contains("-"));
    }
}
