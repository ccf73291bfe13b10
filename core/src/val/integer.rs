use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_integer::Integer as _;
use num_traits::{One, Signed, Zero};

use crate::error::{NumericError, Result};
use crate::typ::NumericKind;

use super::{Number, Ordered, Rational};

/// Arbitrary-precision integer.
///
/// Integers are exact unless they come out of a lossy operation such as the
/// floor square root of a non-square.
#[derive(Clone, Debug)]
pub struct Integer {
    value: BigInt,
    exact: bool,
}

impl Integer {
    pub fn new(value: impl Into<BigInt>) -> Self {
        Integer {
            value: value.into(),
            exact: true,
        }
    }

    pub(crate) fn with_exactness(self, exact: bool) -> Self {
        Integer { exact, ..self }
    }

    pub fn value(&self) -> &BigInt {
        &self.value
    }

    pub fn is_exact(&self) -> bool {
        self.exact
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.value.is_negative()
    }

    /// Decimal digits of the magnitude. Zero has one digit.
    pub fn number_of_digits(&self) -> usize {
        self.value.magnitude().to_str_radix(10).len()
    }

    /// Decimal digit at position `index`, counting from the units digit.
    pub fn digit_at(&self, index: usize) -> Option<u8> {
        let digits = self.value.magnitude().to_str_radix(10);
        let bytes = digits.as_bytes();
        if index >= bytes.len() {
            return None;
        }
        Some(bytes[bytes.len() - 1 - index] - b'0')
    }

    fn derived(&self, value: BigInt, other: &Integer) -> Integer {
        Integer {
            value,
            exact: self.exact && other.exact,
        }
    }

    pub fn add(&self, other: &Integer) -> Integer {
        self.derived(&self.value + &other.value, other)
    }

    pub fn subtract(&self, other: &Integer) -> Integer {
        self.derived(&self.value - &other.value, other)
    }

    pub fn multiply(&self, other: &Integer) -> Integer {
        self.derived(&self.value * &other.value, other)
    }

    /// Integer quotient when `other` divides `self`, otherwise the reduced
    /// Rational.
    pub fn divide(&self, other: &Integer) -> Result<Number> {
        if other.is_zero() {
            return Err(NumericError::division_by_zero());
        }
        let (q, r) = self.value.div_rem(&other.value);
        if r.is_zero() {
            return Ok(Number::Integer(self.derived(q, other)));
        }
        let ratio = Rational::new(self.value.clone(), other.value.clone())?;
        Ok(Number::Rational(ratio.with_exactness(self.exact && other.exact)))
    }

    /// Non-negative exponents stay Integer, negative ones produce a Rational.
    pub fn pow(&self, exponent: i64) -> Result<Number> {
        if exponent >= 0 {
            let exp = u32::try_from(exponent)
                .map_err(|_| NumericError::domain(format!("exponent {exponent} is too large")))?;
            return Ok(Number::Integer(Integer {
                value: self.value.pow(exp),
                exact: self.exact,
            }));
        }
        let base = Rational::from_integer(self);
        Ok(Number::Rational(base.pow(exponent)?))
    }

    /// Floor of the square root, exact only for perfect squares.
    pub fn sqrt(&self) -> Result<Integer> {
        if self.is_negative() {
            return Err(NumericError::domain(format!("integer square root of negative value {self}")));
        }
        let root = self.value.sqrt();
        let perfect = &root * &root == self.value;
        Ok(Integer {
            value: root,
            exact: self.exact && perfect,
        })
    }

    pub fn inverse(&self) -> Result<Rational> {
        if self.is_zero() {
            return Err(NumericError::division_by_zero());
        }
        Ok(Rational::new(BigInt::one(), self.value.clone())?.with_exactness(self.exact))
    }

    pub fn negate(&self) -> Integer {
        Integer {
            value: -&self.value,
            exact: self.exact,
        }
    }

    pub fn abs(&self) -> Integer {
        Integer {
            value: self.value.abs(),
            exact: self.exact,
        }
    }
}

impl Ordered for Integer {
    fn compare(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }

    fn zero_like(&self) -> Self {
        Integer::new(0)
    }
}

/// Numeric equality; exactness does not take part.
impl PartialEq for Integer {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl From<i64> for Integer {
    fn from(n: i64) -> Self {
        Integer::new(n)
    }
}

impl From<BigInt> for Integer {
    fn from(n: BigInt) -> Self {
        Integer::new(n)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

pub(crate) fn parse_big(text: &str, expected: NumericKind) -> Result<BigInt> {
    let (negative, digits) = split_sign(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NumericError::parse(text, expected, "expected an optionally signed run of decimal digits"));
    }
    let magnitude = digits
        .parse::<BigInt>()
        .map_err(|err| NumericError::parse(text, expected, err.to_string()))?;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Splits one leading sign off `text`.
pub(crate) fn split_sign(text: &str) -> (bool, &str) {
    match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    }
}

impl FromStr for Integer {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self> {
        parse_big(s.trim(), NumericKind::Integer).map(Integer::new)
    }
}
