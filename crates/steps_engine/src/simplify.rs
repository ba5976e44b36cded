//! A small rewrite engine used by the generic solver and the fallback
//! chain. Rules are objects producing described rewrites; the driver walks
//! the tree bottom-up and iterates to a fixpoint, logging one step per
//! applied rule.

use crate::record::Step;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};
use std::rc::Rc;
use steps_ast::Expr;

/// Result of a rule application: the new (sub)expression and what happened.
pub struct Rewrite {
    pub new_expr: Rc<Expr>,
    pub description: String,
}

pub trait Rule {
    fn name(&self) -> &'static str;
    /// Attempt a rewrite at this node only; the driver handles recursion.
    fn apply(&self, expr: &Rc<Expr>) -> Option<Rewrite>;
}

fn is_num(expr: &Expr, value: i64) -> bool {
    matches!(expr, Expr::Number(n) if *n == BigRational::from_integer(value.into()))
}

pub struct CombineConstantsRule;

impl Rule for CombineConstantsRule {
    fn name(&self) -> &'static str {
        "Combine Constants"
    }

    fn apply(&self, expr: &Rc<Expr>) -> Option<Rewrite> {
        let fold = |l: &Expr, r: &Expr, f: fn(&BigRational, &BigRational) -> Option<BigRational>| {
            match (l, r) {
                (Expr::Number(a), Expr::Number(b)) => f(a, b),
                _ => None,
            }
        };

        let result = match &**expr {
            Expr::Add(l, r) => fold(l, r, |a, b| Some(a + b)),
            Expr::Sub(l, r) => fold(l, r, |a, b| Some(a - b)),
            Expr::Mul(l, r) => fold(l, r, |a, b| Some(a * b)),
            Expr::Div(l, r) => fold(l, r, |a, b| {
                if b.is_zero() {
                    None
                } else {
                    Some(a / b)
                }
            }),
            Expr::Pow(b, e) => match (&**b, &**e) {
                (Expr::Number(base), Expr::Number(exp)) => rational_pow(base, exp),
                _ => None,
            },
            Expr::Neg(inner) => match &**inner {
                Expr::Number(n) => Some(-n.clone()),
                _ => None,
            },
            _ => None,
        }?;

        Some(Rewrite {
            new_expr: Expr::rational(result.clone()),
            description: format!("{} = {}", expr, result),
        })
    }
}

/// Exact power for integer exponents of reasonable size.
fn rational_pow(base: &BigRational, exp: &BigRational) -> Option<BigRational> {
    if !exp.is_integer() {
        return None;
    }
    let e = exp.to_integer().to_i64()?;
    if e.abs() > 64 {
        return None;
    }
    let mut acc = BigRational::from_integer(1.into());
    for _ in 0..e.abs() {
        acc *= base;
    }
    if e < 0 {
        if acc.is_zero() {
            return None;
        }
        acc = acc.recip();
    }
    Some(acc)
}

pub struct AddZeroRule;

impl Rule for AddZeroRule {
    fn name(&self) -> &'static str {
        "Identity Property of Addition"
    }

    fn apply(&self, expr: &Rc<Expr>) -> Option<Rewrite> {
        let kept = match &**expr {
            Expr::Add(l, r) if is_num(r, 0) => l.clone(),
            Expr::Add(l, r) if is_num(l, 0) => r.clone(),
            Expr::Sub(l, r) if is_num(r, 0) => l.clone(),
            _ => return None,
        };
        Some(Rewrite {
            description: format!("{} = {}", expr, kept),
            new_expr: kept,
        })
    }
}

pub struct MulOneRule;

impl Rule for MulOneRule {
    fn name(&self) -> &'static str {
        "Identity Property of Multiplication"
    }

    fn apply(&self, expr: &Rc<Expr>) -> Option<Rewrite> {
        let kept = match &**expr {
            Expr::Mul(l, r) if is_num(r, 1) => l.clone(),
            Expr::Mul(l, r) if is_num(l, 1) => r.clone(),
            Expr::Div(l, r) if is_num(r, 1) => l.clone(),
            _ => return None,
        };
        Some(Rewrite {
            description: format!("{} = {}", expr, kept),
            new_expr: kept,
        })
    }
}

pub struct MulZeroRule;

impl Rule for MulZeroRule {
    fn name(&self) -> &'static str {
        "Multiplication by Zero"
    }

    fn apply(&self, expr: &Rc<Expr>) -> Option<Rewrite> {
        match &**expr {
            Expr::Mul(l, r) if is_num(l, 0) || is_num(r, 0) => Some(Rewrite {
                description: format!("{} = 0", expr),
                new_expr: Expr::num(0),
            }),
            _ => None,
        }
    }
}

pub struct IdentityPowerRule;

impl Rule for IdentityPowerRule {
    fn name(&self) -> &'static str {
        "Identity Power"
    }

    fn apply(&self, expr: &Rc<Expr>) -> Option<Rewrite> {
        match &**expr {
            Expr::Pow(b, e) if is_num(e, 1) => Some(Rewrite {
                description: format!("{} = {}", expr, b),
                new_expr: b.clone(),
            }),
            Expr::Pow(_, e) if is_num(e, 0) => Some(Rewrite {
                description: format!("{} = 1", expr),
                new_expr: Expr::num(1),
            }),
            _ => None,
        }
    }
}

pub struct Simplifier {
    rules: Vec<Box<dyn Rule>>,
}

impl Simplifier {
    pub fn new() -> Self {
        Simplifier { rules: Vec::new() }
    }

    pub fn add_rule(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn with_default_rules() -> Self {
        let mut s = Simplifier::new();
        s.add_rule(Box::new(CombineConstantsRule));
        s.add_rule(Box::new(MulZeroRule));
        s.add_rule(Box::new(MulOneRule));
        s.add_rule(Box::new(AddZeroRule));
        s.add_rule(Box::new(IdentityPowerRule));
        s
    }

    /// Apply rules to a fixpoint, one rewrite per pass so every step shows
    /// the whole expression after the change.
    pub fn simplify(&self, expr: Rc<Expr>) -> (Rc<Expr>, Vec<Step>) {
        let mut steps = Vec::new();
        let mut current = expr;
        // Bounded so a cyclic rule set cannot spin forever.
        for _ in 0..100 {
            match self.rewrite_once(&current) {
                Some((next, description, rule_name)) => {
                    steps.push(Step::new(
                        format!("{} [{}]", description, rule_name),
                        format!("{}", next),
                    ));
                    current = next;
                }
                None => break,
            }
        }
        (current, steps)
    }

    /// Find the first rule application anywhere in the tree, innermost first.
    fn rewrite_once(&self, expr: &Rc<Expr>) -> Option<(Rc<Expr>, String, &'static str)> {
        // Children first so constants fold from the leaves up.
        let rebuilt = match &**expr {
            Expr::Add(l, r) => self
                .rewrite_child(l, r)
                .map(|(l2, r2, d, n)| (Expr::add(l2, r2), d, n)),
            Expr::Sub(l, r) => self
                .rewrite_child(l, r)
                .map(|(l2, r2, d, n)| (Expr::sub(l2, r2), d, n)),
            Expr::Mul(l, r) => self
                .rewrite_child(l, r)
                .map(|(l2, r2, d, n)| (Expr::mul(l2, r2), d, n)),
            Expr::Div(l, r) => self
                .rewrite_child(l, r)
                .map(|(l2, r2, d, n)| (Expr::div(l2, r2), d, n)),
            Expr::Pow(l, r) => self
                .rewrite_child(l, r)
                .map(|(l2, r2, d, n)| (Expr::pow(l2, r2), d, n)),
            Expr::Neg(inner) => self
                .rewrite_once(inner)
                .map(|(e, d, n)| (Expr::neg(e), d, n)),
            Expr::Function(name, args) => {
                let mut found = None;
                for (i, a) in args.iter().enumerate() {
                    if let Some((e, d, n)) = self.rewrite_once(a) {
                        found = Some((i, e, d, n));
                        break;
                    }
                }
                found.map(|(i, e, d, n)| {
                    let mut new_args = args.clone();
                    new_args[i] = e;
                    (Expr::func(name, new_args), d, n)
                })
            }
            _ => None,
        };
        if rebuilt.is_some() {
            return rebuilt;
        }

        for rule in &self.rules {
            if let Some(rw) = rule.apply(expr) {
                return Some((rw.new_expr, rw.description, rule.name()));
            }
        }
        None
    }

    fn rewrite_child(
        &self,
        l: &Rc<Expr>,
        r: &Rc<Expr>,
    ) -> Option<(Rc<Expr>, Rc<Expr>, String, &'static str)> {
        if let Some((l2, d, n)) = self.rewrite_once(l) {
            return Some((l2, r.clone(), d, n));
        }
        if let Some((r2, d, n)) = self.rewrite_once(r) {
            return Some((l.clone(), r2, d, n));
        }
        None
    }
}

impl Default for Simplifier {
    fn default() -> Self {
        Simplifier::with_default_rules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use steps_parser::parse;

    fn simplify_str(input: &str) -> (String, usize) {
        let s = Simplifier::with_default_rules();
        let (result, steps) = s.simplify(parse(input).expect("parse failed"));
        (format!("{}", result), steps.len())
    }

    #[test]
    fn test_combine_constants() {
        let (result, steps) = simplify_str("2 * 3 + 0");
        assert_eq!(result, "6");
        assert_eq!(steps, 2);
    }

    #[test]
    fn test_nested() {
        let (result, _) = simplify_str("(1 + 2) * (3 + 4)");
        assert_eq!(result, "21");
    }

    #[test]
    fn test_identity_rules() {
        assert_eq!(simplify_str("x * 1").0, "x");
        assert_eq!(simplify_str("x + 0").0, "x");
        assert_eq!(simplify_str("x * 0").0, "0");
        assert_eq!(simplify_str("x^1").0, "x");
    }

    #[test]
    fn test_power_fold() {
        assert_eq!(simplify_str("2^10").0, "1024");
    }

    #[test]
    fn test_symbolic_left_alone() {
        assert_eq!(simplify_str("x + y").0, "x + y");
    }
}
