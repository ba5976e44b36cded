//! Numeric evaluation of parsed expressions.

use crate::error::SolveError;
use num_traits::ToPrimitive;
use steps_ast::{Constant, Expr};

/// Evaluate an expression tree to a finite f64. Free variables, unknown
/// functions, and out-of-domain arguments are evaluation errors, not
/// panics.
pub fn evaluate(expr: &Expr) -> Result<f64, SolveError> {
    let v = eval_inner(expr)?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(SolveError::Eval("result is not a finite number".into()))
    }
}

fn eval_inner(expr: &Expr) -> Result<f64, SolveError> {
    match expr {
        Expr::Number(n) => n
            .to_f64()
            .ok_or_else(|| SolveError::Eval("number out of f64 range".into())),
        Expr::Constant(Constant::Pi) => Ok(std::f64::consts::PI),
        Expr::Constant(Constant::E) => Ok(std::f64::consts::E),
        Expr::Variable(v) => Err(SolveError::Eval(format!("free variable '{}'", v))),
        Expr::Add(l, r) => Ok(eval_inner(l)? + eval_inner(r)?),
        Expr::Sub(l, r) => Ok(eval_inner(l)? - eval_inner(r)?),
        Expr::Mul(l, r) => Ok(eval_inner(l)? * eval_inner(r)?),
        Expr::Div(l, r) => {
            let denom = eval_inner(r)?;
            if denom == 0.0 {
                return Err(SolveError::Eval("division by zero".into()));
            }
            Ok(eval_inner(l)? / denom)
        }
        Expr::Pow(b, e) => Ok(eval_inner(b)?.powf(eval_inner(e)?)),
        Expr::Neg(e) => Ok(-eval_inner(e)?),
        Expr::Function(name, args) => eval_function(name, args),
    }
}

fn eval_function(name: &str, args: &[std::rc::Rc<Expr>]) -> Result<f64, SolveError> {
    let unary = |args: &[std::rc::Rc<Expr>]| -> Result<f64, SolveError> {
        if args.len() != 1 {
            return Err(SolveError::Eval(format!(
                "{} expects exactly one argument",
                name
            )));
        }
        eval_inner(&args[0])
    };

    match name {
        "sin" => Ok(unary(args)?.sin()),
        "cos" => Ok(unary(args)?.cos()),
        "tan" => Ok(unary(args)?.tan()),
        "sec" => Ok(1.0 / unary(args)?.cos()),
        "csc" => Ok(1.0 / unary(args)?.sin()),
        "cot" => Ok(1.0 / unary(args)?.tan()),
        "arcsin" | "asin" => Ok(unary(args)?.asin()),
        "arccos" | "acos" => Ok(unary(args)?.acos()),
        "arctan" | "atan" => Ok(unary(args)?.atan()),
        "exp" => Ok(unary(args)?.exp()),
        "abs" => Ok(unary(args)?.abs()),
        "ln" => {
            let v = unary(args)?;
            if v <= 0.0 {
                return Err(SolveError::Eval("ln of a non-positive number".into()));
            }
            Ok(v.ln())
        }
        "log" => {
            let v = unary(args)?;
            if v <= 0.0 {
                return Err(SolveError::Eval("log of a non-positive number".into()));
            }
            Ok(v.log10())
        }
        "sqrt" => {
            let v = unary(args)?;
            if v < 0.0 {
                return Err(SolveError::Eval("square root of a negative number".into()));
            }
            Ok(v.sqrt())
        }
        "fact" => {
            let v = unary(args)?;
            if v < 0.0 || v.fract() != 0.0 || v > 170.0 {
                return Err(SolveError::Eval(
                    "factorial needs a small non-negative integer".into(),
                ));
            }
            let mut acc = 1.0;
            let mut k = 2.0;
            while k <= v {
                acc *= k;
                k += 1.0;
            }
            Ok(acc)
        }
        other => Err(SolveError::Eval(format!("unknown function '{}'", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use steps_parser::parse;

    fn eval_str(s: &str) -> Result<f64, SolveError> {
        evaluate(&parse(s).expect("parse failed"))
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval_str("2 + 3 * 4").unwrap(), 14.0);
        assert_eq!(eval_str("2^10").unwrap(), 1024.0);
    }

    #[test]
    fn test_functions() {
        assert!((eval_str("sin(0)").unwrap()).abs() < 1e-12);
        assert!((eval_str("sqrt(16)").unwrap() - 4.0).abs() < 1e-12);
        assert_eq!(eval_str("5!").unwrap(), 120.0);
    }

    #[test]
    fn test_constants() {
        assert!((eval_str("2pi").unwrap() - 2.0 * std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_errors() {
        assert!(eval_str("1/0").is_err());
        assert!(eval_str("x + 1").is_err());
        assert!(eval_str("ln(0)").is_err());
    }
}
