//! Advisory topic classification.
//!
//! Each category owns a set of keywords weighted by their character length,
//! so longer, more specific keywords dominate short generic ones. A few
//! structural cues add fixed bonuses. The classifier never gates dispatch;
//! it labels records and reports.

use regex::Regex;
use rustc_hash::FxHashMap;
use std::sync::LazyLock;

pub const GENERAL_LABEL: &str = "General Mathematics";

/// Categories in insertion order; ties keep the earlier entry.
static CATEGORIES: LazyLock<Vec<(&'static str, Vec<&'static str>)>> = LazyLock::new(|| {
    vec![
        (
            "Algebra",
            vec![
                "solve", "equation", "variable", "simplify", "factor", "expand", "polynomial",
                "quadratic", "linear", "roots",
            ],
        ),
        (
            "Calculus",
            vec![
                "derivative", "derivative of", "differentiate", "integral", "integral of",
                "integrate", "limit", "antiderivative", "rate of change",
            ],
        ),
        (
            "Geometry",
            vec![
                "area", "perimeter", "volume", "circle", "triangle", "rectangle", "radius",
                "diameter", "circumference", "sphere", "polygon",
            ],
        ),
        (
            "Trigonometry",
            vec![
                "sin", "cos", "tan", "sine", "cosine", "tangent", "angle", "degrees", "radians",
            ],
        ),
        (
            "Vector",
            vec![
                "vector", "dot product", "cross product", "magnitude", "unit vector",
                "component",
            ],
        ),
        (
            "Matrix",
            vec!["matrix", "matrices", "determinant", "transpose", "inverse matrix"],
        ),
        (
            "Statistics",
            vec![
                "mean", "median", "mode", "average", "variance", "standard deviation",
                "probability",
            ],
        ),
        (
            "Number Theory",
            vec!["prime", "divisible", "gcd", "lcm", "remainder", "modulo"],
        ),
        (
            "Complex Numbers",
            vec!["complex", "imaginary", "real part", "conjugate"],
        ),
        (
            "Logarithms",
            vec!["log", "ln", "logarithm", "natural log"],
        ),
        (
            "Sequences",
            vec![
                "sequence", "series", "arithmetic sequence", "geometric sequence", "fibonacci",
                "nth term",
            ],
        ),
        (
            "Combinatorics",
            vec!["permutation", "combination", "factorial", "choose", "arrangements"],
        ),
        (
            "Graphing",
            vec!["graph", "plot", "sketch", "slope", "intercept", "axis"],
        ),
        (
            "Arithmetic",
            vec![
                "add", "subtract", "multiply", "divide", "sum", "difference", "product",
                "quotient", "percent",
            ],
        ),
    ]
});

static EXPONENT_CUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\^|²|³").expect("valid regex literal"));
static CALCULUS_CUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"∫|d/dx|dy/dx").expect("valid regex literal"));
static TRIPLE_CUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\s*-?\d+(?:\.\d+)?\s*,\s*-?\d+(?:\.\d+)?\s*,\s*-?\d+(?:\.\d+)?\s*\)")
        .expect("valid regex literal")
});
static MATRIX_CUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\s*\[").expect("valid regex literal"));
static TRIG_CUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:sin|cos|tan)\b").expect("valid regex literal"));
static LOG_CUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:log|ln)\b").expect("valid regex literal"));
static ARITHMETIC_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s+\-*/^().!%]+$").expect("valid regex literal"));

/// Classify one problem. Total and deterministic; zero evidence maps to
/// the general label.
pub fn classify(problem: &str) -> String {
    let lower = problem.to_lowercase();
    let mut scores: FxHashMap<&'static str, usize> = FxHashMap::default();

    for (category, keywords) in CATEGORIES.iter() {
        let mut score = 0;
        for kw in keywords {
            if lower.contains(kw) {
                score += kw.len();
            }
        }
        scores.insert(category, score);
    }

    apply_pattern_bonuses(&lower, &mut scores);

    // Trigonometry yields to geometry wording: "angle" inside an area or
    // perimeter problem is not a trig problem.
    if lower.contains("area") || lower.contains("perimeter") {
        scores.insert("Trigonometry", 0);
    }

    let mut best: Option<(&str, usize)> = None;
    for (category, _) in CATEGORIES.iter() {
        let score = scores.get(category).copied().unwrap_or(0);
        // Strict comparison keeps the first-seen category on ties.
        if score > 0 && best.map_or(true, |(_, s)| score > s) {
            best = Some((category, score));
        }
    }

    best.map(|(c, _)| c.to_string())
        .unwrap_or_else(|| GENERAL_LABEL.to_string())
}

fn apply_pattern_bonuses(lower: &str, scores: &mut FxHashMap<&'static str, usize>) {
    let mut bonus = |category: &'static str, points: usize| {
        *scores.entry(category).or_insert(0) += points;
    };

    if EXPONENT_CUE.is_match(lower) {
        bonus("Algebra", 10);
    }
    if CALCULUS_CUE.is_match(lower) {
        bonus("Calculus", 15);
    }
    if TRIPLE_CUE.is_match(lower) {
        bonus("Vector", 12);
    }
    if MATRIX_CUE.is_match(lower) {
        bonus("Matrix", 12);
    }
    if TRIG_CUE.is_match(lower) {
        bonus("Trigonometry", 8);
    }
    if LOG_CUE.is_match(lower) {
        bonus("Logarithms", 8);
    }
    if ARITHMETIC_ONLY.is_match(lower.trim()) {
        bonus("Arithmetic", 25);
    }
}
