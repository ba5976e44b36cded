use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::ToPrimitive;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

/// Named mathematical constants recognized by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    Pi,
    E,
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Pi => write!(f, "pi"),
            Constant::E => write!(f, "e"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(BigRational),
    Constant(Constant),
    Variable(String),
    Add(Rc<Expr>, Rc<Expr>),
    Sub(Rc<Expr>, Rc<Expr>),
    Mul(Rc<Expr>, Rc<Expr>),
    Div(Rc<Expr>, Rc<Expr>),
    Pow(Rc<Expr>, Rc<Expr>),
    Neg(Rc<Expr>),
    Function(String, Vec<Rc<Expr>>), // e.g., sin(x), log(x, 10)
}

impl Expr {
    // Helper constructors for cleaner code
    pub fn num(n: i64) -> Rc<Self> {
        Rc::new(Expr::Number(BigRational::from_integer(BigInt::from(n))))
    }

    pub fn rational(r: BigRational) -> Rc<Self> {
        Rc::new(Expr::Number(r))
    }

    pub fn var(name: &str) -> Rc<Self> {
        Rc::new(Expr::Variable(name.to_string()))
    }

    pub fn constant(c: Constant) -> Rc<Self> {
        Rc::new(Expr::Constant(c))
    }

    pub fn add(lhs: Rc<Expr>, rhs: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Add(lhs, rhs))
    }

    pub fn sub(lhs: Rc<Expr>, rhs: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Sub(lhs, rhs))
    }

    pub fn mul(lhs: Rc<Expr>, rhs: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Mul(lhs, rhs))
    }

    pub fn div(lhs: Rc<Expr>, rhs: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Div(lhs, rhs))
    }

    pub fn pow(base: Rc<Expr>, exp: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Pow(base, exp))
    }

    pub fn neg(expr: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Neg(expr))
    }

    pub fn func(name: &str, args: Vec<Rc<Expr>>) -> Rc<Self> {
        Rc::new(Expr::Function(name.to_string(), args))
    }

    /// Numeric value if this node is a literal, `None` otherwise.
    pub fn as_number(&self) -> Option<&BigRational> {
        match self {
            Expr::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Literal converted to f64, handling a leading negation.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Expr::Number(n) => n.to_f64(),
            Expr::Neg(inner) => inner.as_f64().map(|v| -v),
            _ => None,
        }
    }

    /// Collect every distinct variable name in the tree, sorted.
    pub fn variables(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables(&self, out: &mut BTreeSet<String>) {
        match self {
            Expr::Number(_) | Expr::Constant(_) => {}
            Expr::Variable(v) => {
                out.insert(v.clone());
            }
            Expr::Add(l, r)
            | Expr::Sub(l, r)
            | Expr::Mul(l, r)
            | Expr::Div(l, r)
            | Expr::Pow(l, r) => {
                l.collect_variables(out);
                r.collect_variables(out);
            }
            Expr::Neg(e) => e.collect_variables(out),
            Expr::Function(_, args) => {
                for a in args {
                    a.collect_variables(out);
                }
            }
        }
    }
}

impl Expr {
    fn precedence(&self) -> u8 {
        match self {
            Expr::Add(_, _) | Expr::Sub(_, _) => 1,
            Expr::Mul(_, _) | Expr::Div(_, _) => 2,
            Expr::Pow(_, _) => 3,
            Expr::Neg(_) => 4,
            Expr::Function(_, _) | Expr::Number(_) | Expr::Variable(_) | Expr::Constant(_) => 5,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{}", n),
            Expr::Constant(c) => write!(f, "{}", c),
            Expr::Variable(s) => write!(f, "{}", s),
            Expr::Add(l, r) => {
                let my_prec = self.precedence();
                if l.precedence() < my_prec {
                    write!(f, "({})", l)?
                } else {
                    write!(f, "{}", l)?
                }
                write!(f, " + ")?;
                if r.precedence() < my_prec {
                    write!(f, "({})", r)
                } else {
                    write!(f, "{}", r)
                }
            }
            Expr::Sub(l, r) => {
                let my_prec = self.precedence();
                if l.precedence() < my_prec {
                    write!(f, "({})", l)?
                } else {
                    write!(f, "{}", l)?
                }
                write!(f, " - ")?;
                // Subtraction is left-associative: a - (b - c) needs parens on the right
                if r.precedence() <= my_prec {
                    write!(f, "({})", r)
                } else {
                    write!(f, "{}", r)
                }
            }
            Expr::Mul(l, r) => {
                let my_prec = self.precedence();
                if l.precedence() < my_prec {
                    write!(f, "({})", l)?
                } else {
                    write!(f, "{}", l)?
                }
                write!(f, " * ")?;
                if r.precedence() < my_prec {
                    write!(f, "({})", r)
                } else {
                    write!(f, "{}", r)
                }
            }
            Expr::Div(l, r) => {
                let my_prec = self.precedence();
                if l.precedence() < my_prec {
                    write!(f, "({})", l)?
                } else {
                    write!(f, "{}", l)?
                }
                write!(f, " / ")?;
                if r.precedence() <= my_prec {
                    write!(f, "({})", r)
                } else {
                    write!(f, "{}", r)
                }
            }
            Expr::Pow(b, e) => {
                let my_prec = self.precedence();
                if b.precedence() < my_prec {
                    write!(f, "({})", b)?
                } else {
                    write!(f, "{}", b)?
                }
                if e.precedence() < my_prec {
                    write!(f, "^({})", e)
                } else {
                    write!(f, "^{}", e)
                }
            }
            Expr::Neg(e) => {
                write!(f, "-")?;
                if e.precedence() < self.precedence() {
                    write!(f, "({})", e)
                } else {
                    write!(f, "{}", e)
                }
            }
            Expr::Function(name, args) => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A relation `lhs = rhs`. The solvers only handle equality.
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    pub lhs: Rc<Expr>,
    pub rhs: Rc<Expr>,
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_precedence() {
        let e = Expr::add(Expr::num(1), Expr::mul(Expr::var("x"), Expr::num(2)));
        assert_eq!(format!("{}", e), "1 + x * 2");

        let e = Expr::mul(Expr::add(Expr::num(1), Expr::var("x")), Expr::num(2));
        assert_eq!(format!("{}", e), "(1 + x) * 2");
    }

    #[test]
    fn test_display_sub_right_parens() {
        let e = Expr::sub(Expr::var("a"), Expr::sub(Expr::var("b"), Expr::var("c")));
        assert_eq!(format!("{}", e), "a - (b - c)");
    }

    #[test]
    fn test_display_function() {
        let e = Expr::func("sin", vec![Expr::var("x")]);
        assert_eq!(format!("{}", e), "sin(x)");
    }

    #[test]
    fn test_variables_sorted_unique() {
        let e = Expr::add(
            Expr::mul(Expr::var("y"), Expr::var("x")),
            Expr::var("x"),
        );
        let vars: Vec<String> = e.variables().into_iter().collect();
        assert_eq!(vars, vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_as_f64_negated() {
        let e = Expr::neg(Expr::num(3));
        assert_eq!(e.as_f64(), Some(-3.0));
    }
}
