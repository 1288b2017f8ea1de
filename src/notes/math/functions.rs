//! Named constants and functions available in expressions.

use super::error::MathError;
use super::number::Number;

/// Trig results this close to an integer are treated as exact,
/// so `sin(pi)` prints `0` instead of a rounding residue.
const TRIG_SNAP_TOLERANCE: f64 = 1e-12;

/// Largest argument `factorial` accepts before the result leaves f64 range
const MAX_FACTORIAL: i128 = 170;

/// Largest n whose double factorial still fits in an f64
const MAX_DOUBLE_FACTORIAL: i128 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "pi" => Some(Constant::Pi),
            "E" => Some(Constant::E),
            _ => None,
        }
    }

    pub fn value(self) -> Number {
        match self {
            Constant::Pi => Number::Real(std::f64::consts::PI),
            Constant::E => Number::Real(std::f64::consts::E),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Sqrt,
    Exp,
    Log,
    Abs,
    Floor,
    Ceiling,
    Factorial,
    Min,
    Max,
}

impl Function {
    pub fn lookup(name: &str) -> Option<Self> {
        let function = match name {
            "sin" => Function::Sin,
            "cos" => Function::Cos,
            "tan" => Function::Tan,
            "asin" => Function::Asin,
            "acos" => Function::Acos,
            "atan" => Function::Atan,
            "sinh" => Function::Sinh,
            "cosh" => Function::Cosh,
            "tanh" => Function::Tanh,
            "sqrt" => Function::Sqrt,
            "exp" => Function::Exp,
            "log" | "ln" => Function::Log,
            "abs" | "Abs" => Function::Abs,
            "floor" => Function::Floor,
            "ceiling" | "ceil" => Function::Ceiling,
            "factorial" => Function::Factorial,
            "min" | "Min" => Function::Min,
            "max" | "Max" => Function::Max,
            _ => return None,
        };
        Some(function)
    }

    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Sinh => "sinh",
            Function::Cosh => "cosh",
            Function::Tanh => "tanh",
            Function::Sqrt => "sqrt",
            Function::Exp => "exp",
            Function::Log => "log",
            Function::Abs => "abs",
            Function::Floor => "floor",
            Function::Ceiling => "ceiling",
            Function::Factorial => "factorial",
            Function::Min => "min",
            Function::Max => "max",
        }
    }

    fn accepts(self, count: usize) -> bool {
        match self {
            Function::Log => (1..=2).contains(&count),
            Function::Min | Function::Max => count >= 1,
            _ => count == 1,
        }
    }

    pub fn call(self, args: &[Number]) -> Result<Number, MathError> {
        if !self.accepts(args.len()) {
            return Err(MathError::WrongArity {
                function: self.name(),
                found: args.len(),
            });
        }
        let x = args[0];

        match self {
            Function::Sin => trig(x.to_f64().sin()),
            Function::Cos => trig(x.to_f64().cos()),
            Function::Tan => {
                let cos = x.to_f64().cos();
                if cos.abs() < TRIG_SNAP_TOLERANCE {
                    return Err(MathError::Domain("tan"));
                }
                trig(x.to_f64().tan())
            }
            Function::Asin => inverse_trig(x, f64::asin, "asin"),
            Function::Acos => inverse_trig(x, f64::acos, "acos"),
            Function::Atan => trig(x.to_f64().atan()),
            Function::Sinh => real_unless_zero(x, f64::sinh),
            Function::Cosh => {
                if x.is_zero() {
                    return Ok(Number::ONE);
                }
                Number::real(x.to_f64().cosh())
            }
            Function::Tanh => real_unless_zero(x, f64::tanh),
            Function::Sqrt => {
                if x.is_negative() {
                    return Err(MathError::Domain("sqrt"));
                }
                x.pow(Number::rational(1, 2)?)
            }
            Function::Exp => {
                if x.is_zero() {
                    return Ok(Number::ONE);
                }
                Number::real(x.to_f64().exp())
            }
            Function::Log => log(x, args.get(1).copied()),
            Function::Abs => {
                if x.is_negative() {
                    x.neg()
                } else {
                    Ok(x)
                }
            }
            Function::Floor => round_with(x, f64::floor, i128::div_euclid),
            Function::Ceiling => round_with(x, f64::ceil, |num, den| {
                num.div_euclid(den) + i128::from(num.rem_euclid(den) != 0)
            }),
            Function::Factorial => factorial(x),
            Function::Min => extreme(args, |candidate, best| candidate < best),
            Function::Max => extreme(args, |candidate, best| candidate > best),
        }
    }
}

fn trig(value: f64) -> Result<Number, MathError> {
    Number::real_snapped(value, TRIG_SNAP_TOLERANCE)
}

fn inverse_trig(x: Number, f: fn(f64) -> f64, name: &'static str) -> Result<Number, MathError> {
    let value = x.to_f64();
    if !(-1.0..=1.0).contains(&value) {
        return Err(MathError::Domain(name));
    }
    trig(f(value))
}

fn real_unless_zero(x: Number, f: fn(f64) -> f64) -> Result<Number, MathError> {
    if x.is_zero() {
        return Ok(Number::ZERO);
    }
    Number::real(f(x.to_f64()))
}

fn log(x: Number, base: Option<Number>) -> Result<Number, MathError> {
    if x.is_zero() || x.is_negative() {
        return Err(MathError::Domain("log"));
    }
    if x == Number::ONE {
        return Ok(Number::ZERO);
    }
    let natural = x.to_f64().ln();
    match base {
        None => Number::real(natural),
        Some(base) => {
            if base.is_zero() || base.is_negative() || base == Number::ONE {
                return Err(MathError::Domain("log"));
            }
            Number::real(natural / base.to_f64().ln())
        }
    }
}

fn round_with(
    x: Number,
    real: fn(f64) -> f64,
    exact: fn(i128, i128) -> i128,
) -> Result<Number, MathError> {
    match x {
        Number::Rational { num, den } => Ok(Number::integer(exact(num, den))),
        Number::Real(value) => Number::real_snapped(real(value), 0.0),
    }
}

fn factorial(x: Number) -> Result<Number, MathError> {
    let Some(n) = x.as_integer() else {
        return Err(MathError::Domain("factorial"));
    };
    if n < 0 {
        return Err(MathError::Domain("factorial"));
    }
    if n > MAX_FACTORIAL {
        return Err(MathError::Overflow);
    }

    let mut result = Number::ONE;
    for k in 2..=n {
        result = result.mul(Number::integer(k))?;
    }
    Ok(result)
}

/// `n!!`: the product of n, n-2, ... down to 1 or 2
pub fn double_factorial(x: Number) -> Result<Number, MathError> {
    let Some(n) = x.as_integer() else {
        return Err(MathError::Domain("double factorial"));
    };
    if n < 0 {
        return Err(MathError::Domain("double factorial"));
    }
    if n > MAX_DOUBLE_FACTORIAL {
        return Err(MathError::Overflow);
    }

    let mut result = Number::ONE;
    let mut k = n;
    while k > 1 {
        result = result.mul(Number::integer(k))?;
        k -= 2;
    }
    Ok(result)
}

fn extreme(args: &[Number], better: fn(f64, f64) -> bool) -> Result<Number, MathError> {
    let mut best = args[0];
    for candidate in &args[1..] {
        if better(candidate.to_f64(), best.to_f64()) {
            best = *candidate;
        }
    }
    Ok(best)
}
