use steps_parser::ParseError;
use thiserror::Error;

/// Errors raised by the specific solvers. The dispatch layer catches every
/// one of these and routes the problem to the universal fallback; nothing
/// here reaches the end user as a raw error.
#[derive(Error, Debug)]
pub enum SolveError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Unsolvable linear form: the coefficient of '{0}' is zero")]
    DegenerateLinear(String),
    #[error("Could not evaluate: {0}")]
    Eval(String),
    #[error("No solving strategy matched: {0}")]
    Unsupported(String),
}
