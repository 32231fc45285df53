use thiserror::Error;

/// Errors produced when parsing authored CSS-like values.
///
/// Runtime paths never surface these; they log and fall back instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unknown transform function: {0}")]
    UnknownFunction(String),
    #[error("Malformed transform: {0}")]
    Malformed(String),
    #[error("Expected {expected} arguments for {function}, got {got}")]
    Arity {
        function: String,
        expected: usize,
        got: usize,
    },
    #[error("Invalid number: {0}")]
    Number(String),
    #[error("Invalid transform origin: {0}")]
    Origin(String),
}

pub type Result<T> = std::result::Result<T, ParseError>;
