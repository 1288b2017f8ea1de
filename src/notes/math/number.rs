//! Numbers that stay exact while the arithmetic allows it.
//!
//! Integer and rational arithmetic is exact (`1/3` stays `1/3`). Decimal
//! literals, irrational results and anything that overflows `i128` become
//! `Real`.

use std::fmt::{self, Display};

use super::error::MathError;

/// Significant digits printed for real results
const REAL_DIGITS: i32 = 15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Reduced fraction with a positive denominator
    Rational { num: i128, den: i128 },
    Real(f64),
}

fn gcd(a: i128, b: i128) -> i128 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    i128::try_from(a).unwrap_or(1)
}

impl Number {
    pub const ZERO: Number = Number::Rational { num: 0, den: 1 };
    pub const ONE: Number = Number::Rational { num: 1, den: 1 };

    pub fn integer(value: i128) -> Self {
        Number::Rational { num: value, den: 1 }
    }

    pub fn rational(num: i128, den: i128) -> Result<Self, MathError> {
        if den == 0 {
            return Err(MathError::DivisionByZero);
        }
        let divisor = gcd(num, den);
        let (mut num, mut den) = (num / divisor, den / divisor);
        if den < 0 {
            num = num.checked_neg().ok_or(MathError::Overflow)?;
            den = den.checked_neg().ok_or(MathError::Overflow)?;
        }
        Ok(Number::Rational { num, den })
    }

    pub fn real(value: f64) -> Result<Self, MathError> {
        if value.is_finite() {
            Ok(Number::Real(value))
        } else if value.is_nan() {
            Err(MathError::Domain("arithmetic"))
        } else {
            Err(MathError::Overflow)
        }
    }

    /// Real result that snaps to an integer when within `tolerance` of one.
    pub fn real_snapped(value: f64, tolerance: f64) -> Result<Self, MathError> {
        let rounded = value.round();
        if (value - rounded).abs() <= tolerance && rounded.abs() < 1e15 {
            Ok(Number::integer(rounded as i128))
        } else {
            Number::real(value)
        }
    }

    pub fn to_f64(self) -> f64 {
        match self {
            Number::Rational { num, den } => num as f64 / den as f64,
            Number::Real(value) => value,
        }
    }

    pub fn is_exact(self) -> bool {
        matches!(self, Number::Rational { .. })
    }

    pub fn as_integer(self) -> Option<i128> {
        match self {
            Number::Rational { num, den: 1 } => Some(num),
            _ => None,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Rational { num, .. } => num == 0,
            Number::Real(value) => value == 0.0,
        }
    }

    pub fn is_negative(self) -> bool {
        match self {
            Number::Rational { num, .. } => num < 0,
            Number::Real(value) => value < 0.0,
        }
    }

    pub fn neg(self) -> Result<Self, MathError> {
        match self {
            Number::Rational { num, den } => match num.checked_neg() {
                Some(num) => Ok(Number::Rational { num, den }),
                None => Number::real(-self.to_f64()),
            },
            Number::Real(value) => Ok(Number::Real(-value)),
        }
    }

    pub fn add(self, other: Number) -> Result<Self, MathError> {
        if let (Number::Rational { num: a, den: b }, Number::Rational { num: c, den: d }) =
            (self, other)
        {
            let exact = a
                .checked_mul(d)
                .zip(c.checked_mul(b))
                .and_then(|(ad, cb)| ad.checked_add(cb))
                .zip(b.checked_mul(d));
            if let Some((num, den)) = exact {
                return Number::rational(num, den);
            }
        }
        Number::real(self.to_f64() + other.to_f64())
    }

    pub fn sub(self, other: Number) -> Result<Self, MathError> {
        self.add(other.neg()?)
    }

    pub fn mul(self, other: Number) -> Result<Self, MathError> {
        if let (Number::Rational { num: a, den: b }, Number::Rational { num: c, den: d }) =
            (self, other)
        {
            if let Some((num, den)) = a.checked_mul(c).zip(b.checked_mul(d)) {
                return Number::rational(num, den);
            }
        }
        Number::real(self.to_f64() * other.to_f64())
    }

    pub fn div(self, other: Number) -> Result<Self, MathError> {
        if other.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        self.mul(other.recip()?)
    }

    pub fn recip(self) -> Result<Self, MathError> {
        match self {
            Number::Rational { num, den } => Number::rational(den, num),
            Number::Real(value) if value == 0.0 => Err(MathError::DivisionByZero),
            Number::Real(value) => Number::real(1.0 / value),
        }
    }

    pub fn pow(self, exponent: Number) -> Result<Self, MathError> {
        if self.is_zero() && exponent.is_negative() {
            return Err(MathError::DivisionByZero);
        }

        if let Some(power) = exponent.as_integer()
            && self.is_exact()
            && let Some(result) = self.checked_integer_pow(power)
        {
            return Ok(result);
        }

        if let (Number::Rational { num, den }, Number::Rational { num: p, den: q }) =
            (self, exponent)
            && num >= 0
            && let Some(root) = exact_root(num, den, q)
            && let Some(result) = root.checked_integer_pow(p)
        {
            return Ok(result);
        }

        let base = self.to_f64();
        let power = exponent.to_f64();
        if base < 0.0 && power.fract() != 0.0 {
            return Err(MathError::Domain("power"));
        }
        Number::real(base.powf(power))
    }

    /// Exact power for rational bases; `None` when `i128` overflows.
    fn checked_integer_pow(self, power: i128) -> Option<Number> {
        let Number::Rational { num, den } = self else {
            return None;
        };
        let exp = u32::try_from(power.unsigned_abs()).ok()?;
        let (num, den) = (num.checked_pow(exp)?, den.checked_pow(exp)?);
        let result = if power < 0 {
            Number::rational(den, num).ok()?
        } else {
            Number::rational(num, den).ok()?
        };
        Some(result)
    }
}

/// `(num/den)^(1/degree)` when both parts are perfect powers.
fn exact_root(num: i128, den: i128, degree: i128) -> Option<Number> {
    let degree = u32::try_from(degree).ok()?;
    let num_root = integer_root(num, degree)?;
    let den_root = integer_root(den, degree)?;
    Number::rational(num_root, den_root).ok()
}

fn integer_root(value: i128, degree: u32) -> Option<i128> {
    if value < 0 || degree == 0 {
        return None;
    }
    let estimate = (value as f64).powf(1.0 / degree as f64).round() as i128;
    (estimate.saturating_sub(1)..=estimate.saturating_add(1))
        .filter(|candidate| *candidate >= 0)
        .find(|candidate| candidate.checked_pow(degree) == Some(value))
}

impl Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Rational { num, den: 1 } => write!(f, "{num}"),
            Number::Rational { num, den } => write!(f, "{num}/{den}"),
            Number::Real(value) => f.write_str(&format_real(value)),
        }
    }
}

/// Print with at most 15 significant digits, keeping a decimal point so
/// reals stay distinguishable from exact integers.
pub fn format_real(value: f64) -> String {
    if value == 0.0 {
        return "0.0".to_string();
    }

    let exponent = value.abs().log10().floor() as i32;
    if (-5..REAL_DIGITS).contains(&exponent) {
        let decimals = (REAL_DIGITS - 1 - exponent).max(0) as usize;
        let mut text = trim_fraction(format!("{value:.decimals$}"));
        if !text.contains('.') {
            text.push_str(".0");
        }
        text
    } else {
        let formatted = format!("{:.*e}", (REAL_DIGITS - 1) as usize, value);
        match formatted.split_once('e') {
            Some((mantissa, exp)) => format!("{}e{}", trim_fraction(mantissa.to_string()), exp),
            None => formatted,
        }
    }
}

fn trim_fraction(mut text: String) -> String {
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.push('0');
        }
    }
    text
}
