//! Recursive-descent parser producing an expression tree.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! sum     := product (('+' | '-') product)*
//! product := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := postfix ('^' unary)?
//! postfix := primary ('!' | '!!')?
//! primary := number | constant | function '(' sum (',' sum)* ')' | '(' sum ')'
//! ```
//!
//! Sums and products are kept as flat chains so long inputs like
//! `1+1+...+1` neither parse nor evaluate recursively. Everything that does
//! nest (signs, powers, parentheses, calls) is bounded by `MAX_DEPTH`.

use super::error::MathError;
use super::functions::{double_factorial, Constant, Function};
use super::lexer::{tokenize, Token};
use super::number::Number;

/// Deepest nesting of signs, powers, parentheses and calls accepted
const MAX_DEPTH: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    fn apply(self, lhs: Number, rhs: Number) -> Result<Number, MathError> {
        match self {
            BinaryOp::Add => lhs.add(rhs),
            BinaryOp::Sub => lhs.sub(rhs),
            BinaryOp::Mul => lhs.mul(rhs),
            BinaryOp::Div => lhs.div(rhs),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(Number),
    Constant(Constant),
    Neg(Box<Expr>),
    Factorial(Box<Expr>),
    DoubleFactorial(Box<Expr>),
    /// `first op rest[0].1 op rest[1].1 ...`, folded left to right
    Chain {
        first: Box<Expr>,
        rest: Vec<(BinaryOp, Expr)>,
    },
    Power {
        base: Box<Expr>,
        exponent: Box<Expr>,
    },
    Call {
        function: Function,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn eval(&self) -> Result<Number, MathError> {
        match self {
            Expr::Number(n) => Ok(*n),
            Expr::Constant(c) => Ok(c.value()),
            Expr::Neg(inner) => inner.eval()?.neg(),
            Expr::Factorial(inner) => Function::Factorial.call(&[inner.eval()?]),
            Expr::DoubleFactorial(inner) => double_factorial(inner.eval()?),
            Expr::Chain { first, rest } => rest
                .iter()
                .try_fold(first.eval()?, |acc, (op, rhs)| op.apply(acc, rhs.eval()?)),
            Expr::Power { base, exponent } => base.eval()?.pow(exponent.eval()?),
            Expr::Call { function, args } => {
                let values = args.iter().map(Expr::eval).collect::<Result<Vec<_>, _>>()?;
                function.call(&values)
            }
        }
    }
}

pub fn parse(input: &str) -> Result<Expr, MathError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.sum()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(MathError::UnexpectedToken(token.to_string())),
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<(), MathError> {
        match self.next() {
            Some(ref token) if token == expected => Ok(()),
            Some(token) => Err(MathError::UnexpectedToken(token.to_string())),
            None => Err(MathError::UnexpectedEnd),
        }
    }

    /// Run `parse` one nesting level deeper, failing past `MAX_DEPTH`.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, MathError>,
    ) -> Result<T, MathError> {
        if self.depth >= MAX_DEPTH {
            return Err(MathError::TooDeep);
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn sum(&mut self) -> Result<Expr, MathError> {
        self.chain(Self::product, |token| match token {
            Token::Plus => Some(BinaryOp::Add),
            Token::Minus => Some(BinaryOp::Sub),
            _ => None,
        })
    }

    fn product(&mut self) -> Result<Expr, MathError> {
        self.chain(Self::unary, |token| match token {
            Token::Star => Some(BinaryOp::Mul),
            Token::Slash => Some(BinaryOp::Div),
            _ => None,
        })
    }

    fn chain(
        &mut self,
        operand: fn(&mut Self) -> Result<Expr, MathError>,
        operator: fn(&Token) -> Option<BinaryOp>,
    ) -> Result<Expr, MathError> {
        let first = operand(self)?;
        let mut rest = Vec::new();
        while let Some(op) = self.peek().and_then(operator) {
            self.pos += 1;
            rest.push((op, operand(self)?));
        }
        if rest.is_empty() {
            return Ok(first);
        }
        Ok(Expr::Chain {
            first: Box::new(first),
            rest,
        })
    }

    fn unary(&mut self) -> Result<Expr, MathError> {
        if self.eat(&Token::Minus) {
            let inner = self.nested(Self::unary)?;
            return Ok(Expr::Neg(Box::new(inner)));
        }
        if self.eat(&Token::Plus) {
            return self.nested(Self::unary);
        }
        self.power()
    }

    fn power(&mut self) -> Result<Expr, MathError> {
        let base = self.postfix()?;
        if self.eat(&Token::Caret) {
            // Right-associative: the exponent may itself be a power
            let exponent = self.nested(Self::unary)?;
            return Ok(Expr::Power {
                base: Box::new(base),
                exponent: Box::new(exponent),
            });
        }
        Ok(base)
    }

    /// `n!` or the double factorial `n!!`; a third `!` is a syntax error.
    fn postfix(&mut self) -> Result<Expr, MathError> {
        let expr = self.primary()?;
        if !self.eat(&Token::Bang) {
            return Ok(expr);
        }
        if !self.eat(&Token::Bang) {
            return Ok(Expr::Factorial(Box::new(expr)));
        }
        if self.peek() == Some(&Token::Bang) {
            return Err(MathError::UnexpectedToken(Token::Bang.to_string()));
        }
        Ok(Expr::DoubleFactorial(Box::new(expr)))
    }

    fn primary(&mut self) -> Result<Expr, MathError> {
        match self.next() {
            Some(Token::Number(n)) => Ok(Expr::Number(n)),
            Some(Token::LParen) => {
                let inner = self.nested(Self::sum)?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            Some(Token::Ident(name)) => {
                if let Some(function) = Function::lookup(&name)
                    && self.eat(&Token::LParen)
                {
                    let args = self.nested(Self::arguments)?;
                    return Ok(Expr::Call { function, args });
                }
                Constant::lookup(&name)
                    .map(Expr::Constant)
                    .ok_or(MathError::UnknownSymbol(name))
            }
            Some(token) => Err(MathError::UnexpectedToken(token.to_string())),
            None => Err(MathError::UnexpectedEnd),
        }
    }

    fn arguments(&mut self) -> Result<Vec<Expr>, MathError> {
        let mut args = vec![self.sum()?];
        while self.eat(&Token::Comma) {
            args.push(self.sum()?);
        }
        self.expect(&Token::RParen)?;
        Ok(args)
    }
}
