use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_integer::Integer as _;
use num_traits::{One, Signed, Zero};

use crate::config;
use crate::error::{NumericError, Result};
use crate::typ::NumericKind;

use super::integer::parse_big;
use super::{Integer, Number, Ordered, Real};

/// Reduced fraction with a positive denominator. Zero is `0/1`.
#[derive(Clone, Debug)]
pub struct Rational {
    num: BigInt,
    den: BigInt,
    exact: bool,
}

impl Rational {
    pub fn new(num: impl Into<BigInt>, den: impl Into<BigInt>) -> Result<Self> {
        let (num, den) = (num.into(), den.into());
        if den.is_zero() {
            return Err(NumericError::division_by_zero());
        }
        Ok(Self::reduced(num, den, true))
    }

    fn reduced(num: BigInt, den: BigInt, exact: bool) -> Self {
        if num.is_zero() {
            return Rational {
                num,
                den: BigInt::one(),
                exact,
            };
        }
        let g = num.gcd(&den);
        let (mut num, mut den) = (num / &g, den / &g);
        if den.is_negative() {
            num = -num;
            den = -den;
        }
        Rational { num, den, exact }
    }

    pub fn from_integer(n: &Integer) -> Self {
        Rational {
            num: n.value().clone(),
            den: BigInt::one(),
            exact: n.is_exact(),
        }
    }

    pub(crate) fn with_exactness(self, exact: bool) -> Self {
        Rational { exact, ..self }
    }

    pub fn numerator(&self) -> &BigInt {
        &self.num
    }

    pub fn denominator(&self) -> &BigInt {
        &self.den
    }

    pub fn is_exact(&self) -> bool {
        self.exact
    }

    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.num.is_negative()
    }

    pub fn is_integral(&self) -> bool {
        self.den.is_one()
    }

    fn derived(&self, num: BigInt, den: BigInt, other: &Rational) -> Rational {
        Self::reduced(num, den, self.exact && other.exact)
    }

    pub fn add(&self, other: &Rational) -> Rational {
        let num = &self.num * &other.den + &other.num * &self.den;
        self.derived(num, &self.den * &other.den, other)
    }

    pub fn subtract(&self, other: &Rational) -> Rational {
        let num = &self.num * &other.den - &other.num * &self.den;
        self.derived(num, &self.den * &other.den, other)
    }

    pub fn multiply(&self, other: &Rational) -> Rational {
        self.derived(&self.num * &other.num, &self.den * &other.den, other)
    }

    pub fn divide(&self, other: &Rational) -> Result<Rational> {
        if other.is_zero() {
            return Err(NumericError::division_by_zero());
        }
        Ok(self.derived(&self.num * &other.den, &self.den * &other.num, other))
    }

    pub fn pow(&self, exponent: i64) -> Result<Rational> {
        let base = if exponent < 0 { self.inverse()? } else { self.clone() };
        let exp = u32::try_from(exponent.unsigned_abs())
            .map_err(|_| NumericError::domain(format!("exponent {exponent} is too large")))?;
        Ok(Rational {
            num: base.num.pow(exp),
            den: base.den.pow(exp),
            exact: base.exact,
        })
    }

    pub fn inverse(&self) -> Result<Rational> {
        if self.is_zero() {
            return Err(NumericError::division_by_zero());
        }
        Ok(Self::reduced(self.den.clone(), self.num.clone(), self.exact))
    }

    pub fn negate(&self) -> Rational {
        Rational {
            num: -&self.num,
            den: self.den.clone(),
            exact: self.exact,
        }
    }

    pub fn abs(&self) -> Rational {
        Rational {
            num: self.num.abs(),
            den: self.den.clone(),
            exact: self.exact,
        }
    }

    /// Exact Rational root when both parts are perfect squares, otherwise an
    /// inexact Real at the default context.
    pub fn sqrt(&self) -> Result<Number> {
        if self.is_negative() {
            return Err(NumericError::domain(format!("square root of negative value {self}")));
        }
        let (n, d) = (self.num.sqrt(), self.den.sqrt());
        if &n * &n == self.num && &d * &d == self.den {
            return Ok(Number::Rational(Rational {
                num: n,
                den: d,
                exact: self.exact,
            }));
        }
        let ctx = config::current().default_context();
        Ok(Number::Real(Real::sqrt_of_ratio(&self.num, &self.den, ctx)?))
    }
}

impl Ordered for Rational {
    fn compare(&self, other: &Self) -> Ordering {
        (&self.num * &other.den).cmp(&(&other.num * &self.den))
    }

    fn zero_like(&self) -> Self {
        Self::reduced(BigInt::zero(), BigInt::one(), true)
    }
}

impl PartialEq for Rational {
    fn eq(&self, other: &Self) -> bool {
        self.num == other.num && self.den == other.den
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl FromStr for Rational {
    type Err = NumericError;

    /// `n/d` or a bare integer.
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        match text.split_once('/') {
            Some((num, den)) => {
                let num = parse_big(num.trim(), NumericKind::Rational)?;
                let den = parse_big(den.trim(), NumericKind::Rational)?;
                if den.is_zero() {
                    return Err(NumericError::parse(s, NumericKind::Rational, "zero denominator"));
                }
                Rational::new(num, den)
            }
            None => Ok(Rational::from_integer(&Integer::new(parse_big(text, NumericKind::Rational)?))),
        }
    }
}
