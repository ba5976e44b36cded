use super::{contains_variable, join_terms};
use crate::error::SolveError;
use crate::record::Step;
use steps_ast::{coef_prefix, format_number, FuncKind, Term};
use steps_parser::{parse_term, split_terms};

/// Differentiate an expression term by term. Returns the combined
/// derivative; justification steps are appended to `steps`.
pub fn differentiate_expression(
    expr: &str,
    var: &str,
    steps: &mut Vec<Step>,
) -> Result<String, SolveError> {
    let terms = split_terms(expr);
    if terms.is_empty() {
        return Err(SolveError::Unsupported("nothing to differentiate".into()));
    }

    let mut parts = Vec::new();
    for term in &terms {
        if let Some(derived) = differentiate_term(term, var, steps)? {
            parts.push(derived);
        }
    }

    let result = join_terms(&parts);
    if terms.len() > 1 {
        steps.push(Step::new(
            "Combine the differentiated terms",
            format!("d/d{}[{}] = {}", var, expr, result),
        ));
    }
    Ok(result)
}

/// One term through the fixed rule priority. `None` means the derivative
/// vanished (constant term).
fn differentiate_term(
    term: &str,
    var: &str,
    steps: &mut Vec<Step>,
) -> Result<Option<String>, SolveError> {
    // Rule 1: no occurrence of the variable means a constant.
    if !contains_variable(term, var) {
        steps.push(Step::new(
            "Constant rule: the derivative of a constant is 0",
            format!("d/d{}[{}] = 0", var, term),
        ));
        return Ok(None);
    }

    let parsed = parse_term(term, var).ok_or_else(|| {
        SolveError::Unsupported(format!("no differentiation rule for '{}'", term))
    })?;

    let (result, rule) = match parsed {
        Term::Constant(_) => {
            steps.push(Step::new(
                "Constant rule: the derivative of a constant is 0",
                format!("d/d{}[{}] = 0", var, term),
            ));
            return Ok(None);
        }
        Term::Func { kind, coef } => match kind {
            FuncKind::Sin => (
                Term::Func { kind: FuncKind::Cos, coef }.render(var),
                "Sine rule: d/dx[sin(x)] = cos(x)",
            ),
            FuncKind::Cos => (
                Term::Func { kind: FuncKind::Sin, coef: -coef }.render(var),
                "Cosine rule: d/dx[cos(x)] = -sin(x)",
            ),
            FuncKind::Tan => (
                Term::Func { kind: FuncKind::SecSquared, coef }.render(var),
                "Tangent rule: d/dx[tan(x)] = sec^2(x)",
            ),
            FuncKind::Exp => (
                Term::Func { kind: FuncKind::Exp, coef }.render(var),
                "Exponential rule: e^x is its own derivative",
            ),
            FuncKind::ExpScaled(a) => (
                Term::Func { kind: FuncKind::ExpScaled(a), coef: coef * a }.render(var),
                "Chain rule: d/dx[e^(ax)] = a*e^(ax)",
            ),
            FuncKind::Ln | FuncKind::Log => (
                Term::Monomial { coef, exponent: -1.0 }.render(var),
                "Logarithm rule: d/dx[ln(x)] = 1/x",
            ),
            FuncKind::Sqrt => (
                format!("{}/(2sqrt({}))", format_number(coef), var),
                "Square-root rule: d/dx[sqrt(x)] = 1/(2*sqrt(x))",
            ),
            other => {
                return Err(SolveError::Unsupported(format!(
                    "no differentiation rule for '{}' ({:?})",
                    term, other
                )))
            }
        },
        Term::Monomial { coef, exponent } => {
            if exponent == 0.0 {
                steps.push(Step::new(
                    "Constant rule: the derivative of a constant is 0",
                    format!("d/d{}[{}] = 0", var, term),
                ));
                return Ok(None);
            }
            let new_coef = coef * exponent;
            let new_exp = exponent - 1.0;
            let rendered = render_power_result(new_coef, new_exp, var);
            (
                rendered,
                "Power rule: multiply by the exponent, then reduce it by one",
            )
        }
    };

    steps.push(Step::new(
        rule,
        format!("d/d{}[{}] = {}", var, term, result),
    ));
    Ok(Some(result))
}

/// Render `coef * x^exp` with the documented simplifications for the
/// exponents 0, 1, -1 and 0.5.
fn render_power_result(coef: f64, exp: f64, var: &str) -> String {
    if exp == 0.5 {
        format!("{}sqrt({})", coef_prefix(coef), var)
    } else {
        Term::Monomial { coef, exponent: exp }.render(var)
    }
}
