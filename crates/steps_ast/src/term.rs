use std::fmt;

/// Format an f64 the way a person writes it in a worked solution: integers
/// without a decimal point, everything else in plain decimal notation.
pub fn format_number(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        let s = format!("{:.6}", v);
        let s = s.trim_end_matches('0').trim_end_matches('.');
        s.to_string()
    }
}

/// A named special function applied to the variable, together with the
/// composite integrand shapes the integration rules match on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FuncKind {
    Sin,
    Cos,
    Tan,
    /// e^x (self-derivative)
    Exp,
    /// e^(a*x)
    ExpScaled(f64),
    Ln,
    Log,
    Sqrt,
    SecSquared,
    CscSquared,
    SecTan,
    CscCot,
    /// 1/(1+x^2)
    RecipOnePlusSquare,
    /// 1/sqrt(1-x^2)
    RecipSqrtOneMinusSquare,
}

/// One additive component of a normalized expression. Terms are derived
/// transiently while differentiating or integrating; they are not persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// A bare number.
    Constant(f64),
    /// coef * x^exponent. A missing exponent parses as 1.
    Monomial { coef: f64, exponent: f64 },
    /// coef * f(x).
    Func { kind: FuncKind, coef: f64 },
}

impl Term {
    pub fn coef(&self) -> f64 {
        match self {
            Term::Constant(c) => *c,
            Term::Monomial { coef, .. } => *coef,
            Term::Func { coef, .. } => *coef,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.coef() == 0.0
    }

    /// Render this term against a variable name, e.g. `3x^2` or `-sin(x)`.
    pub fn render(&self, var: &str) -> String {
        match self {
            Term::Constant(c) => format_number(*c),
            Term::Monomial { coef, exponent } => render_monomial(*coef, *exponent, var),
            Term::Func { kind, coef } => render_func(*kind, *coef, var),
        }
    }
}

fn render_monomial(coef: f64, exponent: f64, var: &str) -> String {
    if exponent == 0.0 {
        return format_number(coef);
    }
    let head = coef_prefix(coef);
    if exponent == 1.0 {
        format!("{}{}", head, var)
    } else if exponent == -1.0 {
        format!("{}/{}", format_number(coef), var)
    } else {
        format!("{}{}^{}", head, var, format_number(exponent))
    }
}

fn render_func(kind: FuncKind, coef: f64, var: &str) -> String {
    // Reciprocal shapes carry the coefficient in the numerator.
    match kind {
        FuncKind::RecipOnePlusSquare => {
            return format!("{}/(1+{}^2)", format_number(coef), var);
        }
        FuncKind::RecipSqrtOneMinusSquare => {
            return format!("{}/sqrt(1-{}^2)", format_number(coef), var);
        }
        _ => {}
    }
    let head = coef_prefix(coef);
    let body = match kind {
        FuncKind::Sin => format!("sin({})", var),
        FuncKind::Cos => format!("cos({})", var),
        FuncKind::Tan => format!("tan({})", var),
        FuncKind::Exp => format!("e^{}", var),
        FuncKind::ExpScaled(a) => format!("e^({}{})", format_number(a), var),
        FuncKind::Ln => format!("ln({})", var),
        FuncKind::Log => format!("log({})", var),
        FuncKind::Sqrt => format!("sqrt({})", var),
        FuncKind::SecSquared => format!("sec^2({})", var),
        FuncKind::CscSquared => format!("csc^2({})", var),
        FuncKind::SecTan => format!("sec({})tan({})", var, var),
        FuncKind::CscCot => format!("csc({})cot({})", var, var),
        FuncKind::RecipOnePlusSquare | FuncKind::RecipSqrtOneMinusSquare => unreachable!(),
    };
    format!("{}{}", head, body)
}

/// Coefficient as a multiplicative prefix: 1 vanishes, -1 becomes a sign.
pub fn coef_prefix(coef: f64) -> String {
    if coef == 1.0 {
        String::new()
    } else if coef == -1.0 {
        "-".to_string()
    } else {
        format_number(coef)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render("x"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-2.0), "-2");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(1.0 / 3.0), "0.333333");
    }

    #[test]
    fn test_render_monomial() {
        let t = Term::Monomial { coef: 3.0, exponent: 2.0 };
        assert_eq!(t.render("x"), "3x^2");

        let t = Term::Monomial { coef: 1.0, exponent: 1.0 };
        assert_eq!(t.render("x"), "x");

        let t = Term::Monomial { coef: -1.0, exponent: 1.0 };
        assert_eq!(t.render("x"), "-x");

        let t = Term::Monomial { coef: 4.0, exponent: -1.0 };
        assert_eq!(t.render("x"), "4/x");
    }

    #[test]
    fn test_render_funcs() {
        let t = Term::Func { kind: FuncKind::Sin, coef: 2.0 };
        assert_eq!(t.render("x"), "2sin(x)");

        let t = Term::Func { kind: FuncKind::Cos, coef: -1.0 };
        assert_eq!(t.render("x"), "-cos(x)");

        let t = Term::Func { kind: FuncKind::ExpScaled(3.0), coef: 1.0 };
        assert_eq!(t.render("x"), "e^(3x)");

        let t = Term::Func { kind: FuncKind::RecipOnePlusSquare, coef: 1.0 };
        assert_eq!(t.render("x"), "1/(1+x^2)");
    }
}
