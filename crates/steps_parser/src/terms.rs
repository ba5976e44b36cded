//! Additive-term splitting and single-term recognition.
//!
//! The symbolic term engine works term by term: subtraction is normalized
//! into addition of a negative term, the expression is split on top-level
//! `+`, and each piece is recognized into a [`Term`] variant the rule
//! tables can match on structurally.

use steps_ast::{FuncKind, Term};

/// Function words that must not be mistaken for variables.
const FUNCTION_WORDS: &[&str] = &[
    "sin", "cos", "tan", "sec", "csc", "cot", "arcsin", "arccos", "arctan", "ln", "log", "exp",
    "sqrt", "abs", "e", "pi", "dx", "dy", "dt", "d",
];

/// Split an expression into its additive terms, each sign-prefixed.
///
/// A `-` at parenthesis depth zero starts a new term unless it is a unary
/// minus (expression start, or right after `*`, `/`, `^`, `(` or `,`).
pub fn split_terms(expr: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0;

    for c in expr.chars() {
        match c {
            '(' | '[' => {
                depth += 1;
                current.push(c);
            }
            ')' | ']' => {
                depth -= 1;
                current.push(c);
            }
            '+' if depth == 0 => {
                push_term(&mut terms, &mut current);
            }
            '-' if depth == 0 && !is_unary_position(&current) => {
                push_term(&mut terms, &mut current);
                current.push('-');
            }
            _ => current.push(c),
        }
    }
    push_term(&mut terms, &mut current);
    terms
}

fn push_term(terms: &mut Vec<String>, current: &mut String) {
    let t = current.trim();
    if !t.is_empty() {
        terms.push(t.to_string());
    }
    current.clear();
}

/// A minus is unary (part of the current term) when nothing precedes it or
/// the previous non-space character is an operator or opening bracket.
fn is_unary_position(current: &str) -> bool {
    match current.trim_end().chars().last() {
        None => true,
        Some(c) => matches!(c, '*' | '/' | '^' | '(' | '[' | ','),
    }
}

/// Pick the variable a problem is written in: `x` when present, otherwise
/// the first identifier that is not a function word.
pub fn detect_variable(expr: &str) -> Option<String> {
    let mut candidates = Vec::new();
    let mut word = String::new();
    for c in expr.chars().chain(std::iter::once(' ')) {
        if c.is_ascii_alphabetic() {
            word.push(c);
        } else if !word.is_empty() {
            let w = std::mem::take(&mut word);
            let lower = w.to_lowercase();
            if !FUNCTION_WORDS.contains(&lower.as_str()) && !candidates.contains(&lower) {
                candidates.push(lower);
            }
        }
    }
    if candidates.iter().any(|c| c == "x") {
        return Some("x".to_string());
    }
    candidates.into_iter().next()
}

/// Recognize one sign-prefixed additive term against `var`.
///
/// Returns `None` when the text matches none of the supported shapes; the
/// caller decides whether to defer or fall back.
pub fn parse_term(term: &str, var: &str) -> Option<Term> {
    let s = desugar(term);
    let s = s.trim();

    // Leading signs, then an optional numeric coefficient.
    let (sign, rest) = take_sign(s);
    let (coef_digits, rest) = take_number(rest);
    let rest = rest.strip_prefix('*').unwrap_or(rest).trim();

    let magnitude = match coef_digits {
        Some(d) => d.parse::<f64>().ok()?,
        None => 1.0,
    };
    let coef = sign * magnitude;

    if rest.is_empty() {
        // A bare number needs explicit digits; a bare sign is not a term.
        return coef_digits.map(|_| Term::Constant(coef));
    }

    // Reciprocal shapes: the numeric prefix was the numerator.
    if let Some(body) = rest.strip_prefix('/') {
        return parse_reciprocal(body.trim(), coef, var);
    }

    if let Some(kind) = parse_func_body(rest, var) {
        return Some(Term::Func { kind, coef });
    }

    if let Some(exponent) = parse_power_of_var(rest, var) {
        return Some(Term::Monomial { coef, exponent });
    }

    // Antiderivative shape c*x^n/k, the power rule's own output.
    if let Some((head, tail)) = rest.rsplit_once('/') {
        let exponent = parse_power_of_var(head.trim(), var)?;
        let divisor: f64 = tail.trim().parse().ok()?;
        if divisor != 0.0 {
            return Some(Term::Monomial {
                coef: coef / divisor,
                exponent,
            });
        }
    }

    None
}

/// Rewrite unicode sugar so the matchers below only see ASCII:
/// `²`/`³` become `^2`/`^3` and `√…` becomes `sqrt(…)`.
fn desugar(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    let mut chars = term.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '²' => out.push_str("^2"),
            '³' => out.push_str("^3"),
            '√' => {
                if chars.peek() == Some(&'(') {
                    out.push_str("sqrt");
                } else {
                    // √x -> sqrt(x): wrap the following identifier run
                    let mut arg = String::new();
                    while let Some(&n) = chars.peek() {
                        if n.is_ascii_alphanumeric() {
                            arg.push(n);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    out.push_str("sqrt(");
                    out.push_str(&arg);
                    out.push(')');
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn take_sign(s: &str) -> (f64, &str) {
    let mut sign = 1.0;
    let mut rest = s;
    loop {
        rest = rest.trim_start();
        if let Some(r) = rest.strip_prefix('-') {
            sign = -sign;
            rest = r;
        } else if let Some(r) = rest.strip_prefix('+') {
            rest = r;
        } else {
            return (sign, rest);
        }
    }
}

fn take_number(s: &str) -> (Option<&str>, &str) {
    let mut end = 0;
    let mut seen_dot = false;
    for c in s.chars() {
        if c.is_ascii_digit() {
            end += 1;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
            end += 1;
        } else {
            break;
        }
    }
    if end == 0 {
        (None, s)
    } else {
        (Some(&s[..end]), &s[end..])
    }
}

fn parse_reciprocal(body: &str, coef: f64, var: &str) -> Option<Term> {
    // c/x and c/x^n
    if let Some(exp) = parse_power_of_var(body, var) {
        return Some(Term::Monomial {
            coef,
            exponent: -exp,
        });
    }
    // c/(1+x^2) in either summand order
    let one_plus_sq = format!("(1+{v}^2)", v = var);
    let sq_plus_one = format!("({v}^2+1)", v = var);
    let flat = body.replace(' ', "");
    if flat == one_plus_sq || flat == sq_plus_one {
        return Some(Term::Func {
            kind: FuncKind::RecipOnePlusSquare,
            coef,
        });
    }
    // c/sqrt(1-x^2)
    let sqrt_form = format!("sqrt(1-{v}^2)", v = var);
    if flat == sqrt_form {
        return Some(Term::Func {
            kind: FuncKind::RecipSqrtOneMinusSquare,
            coef,
        });
    }
    None
}

fn parse_func_body(body: &str, var: &str) -> Option<FuncKind> {
    let flat = body.replace(' ', "");
    let arg = format!("({})", var);

    // Composite trig products first: sec(x)tan(x), sec(x)*tan(x)
    let sec = format!("sec{}", arg);
    let tan = format!("tan{}", arg);
    let csc = format!("csc{}", arg);
    let cot = format!("cot{}", arg);
    if flat == format!("{}{}", sec, tan) || flat == format!("{}*{}", sec, tan) {
        return Some(FuncKind::SecTan);
    }
    if flat == format!("{}{}", csc, cot) || flat == format!("{}*{}", csc, cot) {
        return Some(FuncKind::CscCot);
    }

    if flat == format!("sec^2{}", arg) {
        return Some(FuncKind::SecSquared);
    }
    if flat == format!("csc^2{}", arg) {
        return Some(FuncKind::CscSquared);
    }

    if flat == format!("sin{}", arg) {
        return Some(FuncKind::Sin);
    }
    if flat == format!("cos{}", arg) {
        return Some(FuncKind::Cos);
    }
    if flat == format!("tan{}", arg) {
        return Some(FuncKind::Tan);
    }
    if flat == format!("ln{}", arg) {
        return Some(FuncKind::Ln);
    }
    if flat == format!("log{}", arg) {
        return Some(FuncKind::Log);
    }
    if flat == format!("sqrt{}", arg) {
        return Some(FuncKind::Sqrt);
    }

    // e^x, exp(x), e^(a x)
    if flat == format!("e^{}", var) || flat == format!("exp{}", arg) {
        return Some(FuncKind::Exp);
    }
    if let Some(inner) = flat
        .strip_prefix("e^(")
        .and_then(|r| r.strip_suffix(')'))
    {
        if let Some(scale) = parse_scaled_arg(inner, var) {
            if scale == 1.0 {
                return Some(FuncKind::Exp);
            }
            return Some(FuncKind::ExpScaled(scale));
        }
    }

    None
}

/// `3x` -> 3, `-x` -> -1, `x` -> 1; anything else is not a linear argument.
fn parse_scaled_arg(inner: &str, var: &str) -> Option<f64> {
    let (sign, rest) = take_sign(inner);
    let (digits, rest) = take_number(rest);
    let rest = rest.strip_prefix('*').unwrap_or(rest);
    if rest != var {
        return None;
    }
    let magnitude = match digits {
        Some(d) => d.parse::<f64>().ok()?,
        None => 1.0,
    };
    Some(sign * magnitude)
}

/// Recognize `x`, `x^n`, `x^-n`, `x^(n)`, `x^0.5`. Returns the exponent.
fn parse_power_of_var(body: &str, var: &str) -> Option<f64> {
    let flat = body.replace(' ', "");
    if flat == var {
        return Some(1.0);
    }
    let after = flat.strip_prefix(var)?;
    let exp_text = after.strip_prefix('^')?;
    let exp_text = exp_text
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .unwrap_or(exp_text);
    exp_text.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple() {
        assert_eq!(split_terms("3x^2 + 2x + 1"), vec!["3x^2", "2x", "1"]);
    }

    #[test]
    fn test_split_subtraction_becomes_negative_term() {
        assert_eq!(split_terms("x^2 - 5x + 6"), vec!["x^2", "-5x", "6"]);
    }

    #[test]
    fn test_split_keeps_unary_minus() {
        assert_eq!(split_terms("-x + 2"), vec!["-x", "2"]);
        assert_eq!(split_terms("2*-x + 1"), vec!["2*-x", "1"]);
    }

    #[test]
    fn test_split_respects_parens() {
        assert_eq!(split_terms("sin(a+b) + 2"), vec!["sin(a+b)", "2"]);
    }

    #[test]
    fn test_parse_monomials() {
        assert_eq!(
            parse_term("3x^2", "x"),
            Some(Term::Monomial { coef: 3.0, exponent: 2.0 })
        );
        assert_eq!(
            parse_term("x", "x"),
            Some(Term::Monomial { coef: 1.0, exponent: 1.0 })
        );
        assert_eq!(
            parse_term("-x^3", "x"),
            Some(Term::Monomial { coef: -1.0, exponent: 3.0 })
        );
        assert_eq!(
            parse_term("x^-1", "x"),
            Some(Term::Monomial { coef: 1.0, exponent: -1.0 })
        );
        assert_eq!(
            parse_term("x^0.5", "x"),
            Some(Term::Monomial { coef: 1.0, exponent: 0.5 })
        );
    }

    #[test]
    fn test_parse_constant() {
        assert_eq!(parse_term("7", "x"), Some(Term::Constant(7.0)));
        assert_eq!(parse_term("-2.5", "x"), Some(Term::Constant(-2.5)));
    }

    #[test]
    fn test_parse_divided_monomial() {
        assert_eq!(
            parse_term("x^3/3", "x"),
            Some(Term::Monomial { coef: 1.0 / 3.0, exponent: 3.0 })
        );
        assert_eq!(
            parse_term("2x^3/3", "x"),
            Some(Term::Monomial { coef: 2.0 / 3.0, exponent: 3.0 })
        );
        assert_eq!(
            parse_term("x/2", "x"),
            Some(Term::Monomial { coef: 0.5, exponent: 1.0 })
        );
    }

    #[test]
    fn test_parse_reciprocals() {
        assert_eq!(
            parse_term("4/x", "x"),
            Some(Term::Monomial { coef: 4.0, exponent: -1.0 })
        );
        assert_eq!(
            parse_term("1/x^2", "x"),
            Some(Term::Monomial { coef: 1.0, exponent: -2.0 })
        );
        assert_eq!(
            parse_term("1/(1+x^2)", "x"),
            Some(Term::Func { kind: FuncKind::RecipOnePlusSquare, coef: 1.0 })
        );
        assert_eq!(
            parse_term("1/sqrt(1-x^2)", "x"),
            Some(Term::Func { kind: FuncKind::RecipSqrtOneMinusSquare, coef: 1.0 })
        );
    }

    #[test]
    fn test_parse_functions() {
        assert_eq!(
            parse_term("2sin(x)", "x"),
            Some(Term::Func { kind: FuncKind::Sin, coef: 2.0 })
        );
        assert_eq!(
            parse_term("-cos(x)", "x"),
            Some(Term::Func { kind: FuncKind::Cos, coef: -1.0 })
        );
        assert_eq!(
            parse_term("sec^2(x)", "x"),
            Some(Term::Func { kind: FuncKind::SecSquared, coef: 1.0 })
        );
        assert_eq!(
            parse_term("sec(x)tan(x)", "x"),
            Some(Term::Func { kind: FuncKind::SecTan, coef: 1.0 })
        );
        assert_eq!(
            parse_term("e^x", "x"),
            Some(Term::Func { kind: FuncKind::Exp, coef: 1.0 })
        );
        assert_eq!(
            parse_term("e^(3x)", "x"),
            Some(Term::Func { kind: FuncKind::ExpScaled(3.0), coef: 1.0 })
        );
        assert_eq!(
            parse_term("√x", "x"),
            Some(Term::Func { kind: FuncKind::Sqrt, coef: 1.0 })
        );
        assert_eq!(
            parse_term("sin²(x)", "x"),
            None,
            "squared sine has no single-term rule"
        );
    }

    #[test]
    fn test_detect_variable() {
        assert_eq!(detect_variable("3x^2 + 2x"), Some("x".to_string()));
        assert_eq!(detect_variable("2t + 1"), Some("t".to_string()));
        assert_eq!(detect_variable("sin(y) + y"), Some("y".to_string()));
        assert_eq!(detect_variable("2 + 3"), None);
    }
}
