//! Ordered-predicate dispatch.
//!
//! A fixed sequence of `(predicate, handler)` routes is evaluated against
//! the lower-cased problem text; the first match wins. The order is the
//! overlap-resolution policy: compound requests are recognized before
//! anything else, vectors before geometry (coordinate-heavy problems often
//! mention "plane" or "area"), cubic before quadratic (a cubic equation
//! contains `^2` terms too), and trigonometry excludes area/perimeter
//! wording so geometry keeps those.
//!
//! Known limitation, kept on purpose: quadratic/cubic detection keys off
//! the literal `^2`/`²`/`^3`/`³` substrings rather than a computed degree,
//! so `x^2 + x^4 = 0` is claimed by the quadratic route and ends in the
//! fallback chain.

use crate::algebra::{solve_and_graph, solve_cubic, solve_linear, solve_quadratic};
use crate::calculus::{solve_differentiation, solve_integration};
use crate::domains::{
    solve_geometry, solve_logarithm, solve_matrix, solve_statistics, solve_trigonometry,
    solve_vector,
};
use crate::error::SolveError;
use crate::generic::{solve_arithmetic, solve_generic};
use crate::record::SolutionRecord;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

pub struct Route {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub solve: fn(&str, usize) -> Result<SolutionRecord, SolveError>,
}

static GRAPH_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:graph|plot|sketch|draw)\b").expect("valid regex literal"));
static TRIG_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:sin|cos|tan)\b").expect("valid regex literal"));
static LOG_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:log|ln)\b").expect("valid regex literal"));
static TRIPLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\s*-?\d+(?:\.\d+)?\s*,\s*-?\d+(?:\.\d+)?\s*,\s*-?\d+(?:\.\d+)?\s*\)")
        .expect("valid regex literal")
});
static ARITHMETIC_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s+\-*/^().!%]+$").expect("valid regex literal"));

fn is_compound(p: &str) -> bool {
    (p.contains("solve") || p.contains('=')) && GRAPH_WORD.is_match(p)
}

fn is_differentiation(p: &str) -> bool {
    p.contains("differentiate") || p.contains("derivative") || p.contains("d/dx") || p.contains("dy/dx")
}

fn is_integration(p: &str) -> bool {
    p.contains("integra") || p.contains("antiderivative") || p.contains('∫')
}

fn is_vector(p: &str) -> bool {
    p.contains("vector")
        || p.contains("dot product")
        || p.contains("cross product")
        || p.contains("magnitude")
        || TRIPLE.is_match(p)
}

fn is_matrix(p: &str) -> bool {
    p.contains("matrix") || p.contains("determinant") || p.contains("[[")
}

fn is_cubic(p: &str) -> bool {
    ((p.contains("^3") || p.contains('³')) && p.contains('=')) || p.contains("cubic")
}

fn is_quadratic(p: &str) -> bool {
    ((p.contains("^2") || p.contains('²')) && p.contains('=')) || p.contains("quadratic")
}

fn is_trigonometry(p: &str) -> bool {
    TRIG_WORD.is_match(p) && !p.contains("area") && !p.contains("perimeter")
}

fn is_logarithm(p: &str) -> bool {
    LOG_WORD.is_match(p) || p.contains("logarithm")
}

fn is_geometry(p: &str) -> bool {
    [
        "area",
        "perimeter",
        "circumference",
        "volume",
        "triangle",
        "circle",
        "rectangle",
        "sphere",
        "distance",
    ]
    .iter()
    .any(|kw| p.contains(kw))
}

fn is_statistics(p: &str) -> bool {
    ["mean", "median", "mode", "average", "variance", "standard deviation"]
        .iter()
        .any(|kw| p.contains(kw))
}

fn is_linear(p: &str) -> bool {
    p.contains('=') && p.chars().any(|c| c.is_ascii_alphabetic())
}

fn is_arithmetic(p: &str) -> bool {
    ARITHMETIC_ONLY.is_match(p.trim())
}

/// The dispatch table, in precedence order.
static ROUTES: [Route; 13] = [
    Route { name: "compound solve-and-graph", matches: is_compound, solve: solve_and_graph },
    Route { name: "differentiation", matches: is_differentiation, solve: solve_differentiation },
    Route { name: "integration", matches: is_integration, solve: solve_integration },
    Route { name: "vector", matches: is_vector, solve: solve_vector },
    Route { name: "matrix", matches: is_matrix, solve: solve_matrix },
    Route { name: "cubic equation", matches: is_cubic, solve: solve_cubic },
    Route { name: "quadratic equation", matches: is_quadratic, solve: solve_quadratic },
    Route { name: "trigonometry", matches: is_trigonometry, solve: solve_trigonometry },
    Route { name: "logarithms", matches: is_logarithm, solve: solve_logarithm },
    Route { name: "geometry", matches: is_geometry, solve: solve_geometry },
    Route { name: "statistics", matches: is_statistics, solve: solve_statistics },
    Route { name: "linear equation", matches: is_linear, solve: solve_linear },
    Route { name: "arithmetic", matches: is_arithmetic, solve: solve_arithmetic },
];

/// The route table, exposed so precedence is auditable and testable
/// independently of the handlers.
pub fn routes() -> &'static [Route] {
    &ROUTES
}

/// Dispatch one problem to the first matching route; problems nothing
/// claims go to the generic solver.
pub fn solve_problem(problem: &str, index: usize) -> Result<SolutionRecord, SolveError> {
    let lower = problem.to_lowercase();
    for route in routes() {
        if (route.matches)(&lower) {
            debug!(route = route.name, "dispatching");
            return (route.solve)(problem, index);
        }
    }
    debug!("no route matched; trying the generic solver");
    solve_generic(problem, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route_for(problem: &str) -> Option<&'static str> {
        let lower = problem.to_lowercase();
        routes()
            .iter()
            .find(|r| (r.matches)(&lower))
            .map(|r| r.name)
    }

    #[test]
    fn test_precedence_compound_first() {
        assert_eq!(
            route_for("solve x^2 - 4 = 0 and graph it"),
            Some("compound solve-and-graph")
        );
    }

    #[test]
    fn test_cubic_before_quadratic() {
        assert_eq!(
            route_for("x^3 - 6x^2 + 11x - 6 = 0"),
            Some("cubic equation")
        );
    }

    #[test]
    fn test_vector_before_geometry() {
        // Coordinate-heavy problems often mention "plane"; the tuple cue
        // keeps them on the vector route.
        assert_eq!(
            route_for("find the magnitude of (1, 2, 3) in the plane"),
            Some("vector")
        );
    }

    #[test]
    fn test_trig_excludes_area() {
        assert_eq!(
            route_for("area of the triangle using sin(30)"),
            Some("geometry")
        );
        assert_eq!(route_for("sin(30) + cos(60)"), Some("trigonometry"));
    }

    #[test]
    fn test_quadratic_literal_substring_limitation() {
        // Documented limitation: ^2 claims it even though the degree is 4.
        assert_eq!(route_for("x^2 + x^4 = 0"), Some("quadratic equation"));
    }

    #[test]
    fn test_linear_and_arithmetic() {
        assert_eq!(route_for("solve 2x + 3 = 7"), Some("linear equation"));
        assert_eq!(route_for("2 + 3 * 4"), Some("arithmetic"));
    }

    #[test]
    fn test_unclaimed_problem_has_no_route() {
        assert_eq!(route_for("what is the meaning of life"), None);
    }

    #[test]
    fn test_dispatch_end_to_end() {
        let rec = solve_problem("Solve 2x + 3 = 7", 1).unwrap();
        assert_eq!(rec.answer, "x = 2");
        assert_eq!(rec.problem_type, "Linear Equation");
    }
}
