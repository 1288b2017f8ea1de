//! Expression evaluator behind the notes auto-calculation.

mod error;
mod functions;
mod lexer;
mod number;
mod parser;

pub use error::MathError;
pub use number::Number;
pub use parser::parse;

/// Parse and evaluate `input`.
pub fn evaluate(input: &str) -> Result<Number, MathError> {
    parse(input)?.eval()
}

#[cfg(test)]
mod tests;
