pub mod expression;
pub mod term;

pub use expression::{Constant, Equation, Expr};
pub use term::{coef_prefix, format_number, FuncKind, Term};
