use std::fmt::{self, Display};

/// Why an expression could not be evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum MathError {
    UnexpectedChar(char),
    UnexpectedToken(String),
    UnexpectedEnd,
    UnknownSymbol(String),
    WrongArity {
        function: &'static str,
        found: usize,
    },
    DivisionByZero,
    /// Argument outside the real domain of the named operation
    Domain(&'static str),
    Overflow,
    /// Nesting beyond what the parser accepts
    TooDeep,
}

impl Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathError::UnexpectedChar(c) => write!(f, "unexpected character {c:?}"),
            MathError::UnexpectedToken(t) => write!(f, "unexpected {t}"),
            MathError::UnexpectedEnd => write!(f, "unexpected end of expression"),
            MathError::UnknownSymbol(s) => write!(f, "unknown symbol {s:?}"),
            MathError::WrongArity { function, found } => {
                write!(f, "{function}() does not take {found} argument(s)")
            }
            MathError::DivisionByZero => write!(f, "division by zero"),
            MathError::Domain(op) => write!(f, "{op} is undefined for this argument"),
            MathError::Overflow => write!(f, "result is too large"),
            MathError::TooDeep => write!(f, "expression is nested too deeply"),
        }
    }
}

impl std::error::Error for MathError {}
