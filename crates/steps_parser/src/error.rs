use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Parse error: {0}")]
    NomError(String),
    #[error("Unconsumed input: {0}")]
    UnconsumedInput(String),
    #[error("Equation is missing '='")]
    MissingEquals,
    #[error("Not a polynomial term: {0}")]
    NonPolynomial(String),
}
