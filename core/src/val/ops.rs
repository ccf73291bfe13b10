use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Neg, Sub};

use tracing::trace;

use crate::config::{self, NegativeSqrtPolicy};
use crate::error::{ArithmeticError, NumericError, Result};
use crate::typ::NumericKind;

use super::coerce::{find_common_type, promote};
use super::{Number, Ordered, Sign};

/// Operands promoted to their common supertype under the combined context.
fn promote_pair(a: &Number, b: &Number, op: &'static str) -> Result<(Number, Number)> {
    let target = find_common_type(a.kind(), b.kind()).ok_or_else(|| {
        NumericError::coercion(b, b.kind(), a.kind(), "no common supertype")
    })?;
    let ctx = a.precision().combine(b.precision());
    trace!(target: "numeris::dispatch", op, lhs = %a.kind(), rhs = %b.kind(), common = %target, ctx = %ctx, "dispatch");
    Ok((promote(a, target, ctx)?, promote(b, target, ctx)?))
}

fn mismatch(a: &Number, b: &Number) -> NumericError {
    NumericError::coercion(b, b.kind(), a.kind(), "operands were not promoted to one kind")
}

impl Number {
    pub fn add(&self, other: &Number) -> Result<Number> {
        match promote_pair(self, other, "add")? {
            (Number::Integer(a), Number::Integer(b)) => Ok(Number::Integer(a.add(&b))),
            (Number::Rational(a), Number::Rational(b)) => Ok(Number::Rational(a.add(&b))),
            (Number::Real(a), Number::Real(b)) => Ok(Number::Real(a.add(&b)?)),
            (Number::Complex(a), Number::Complex(b)) => Ok(Number::Complex(a.add(&b)?)),
            (a, b) => Err(mismatch(&a, &b)),
        }
    }

    pub fn subtract(&self, other: &Number) -> Result<Number> {
        match promote_pair(self, other, "subtract")? {
            (Number::Integer(a), Number::Integer(b)) => Ok(Number::Integer(a.subtract(&b))),
            (Number::Rational(a), Number::Rational(b)) => Ok(Number::Rational(a.subtract(&b))),
            (Number::Real(a), Number::Real(b)) => Ok(Number::Real(a.subtract(&b)?)),
            (Number::Complex(a), Number::Complex(b)) => Ok(Number::Complex(a.subtract(&b)?)),
            (a, b) => Err(mismatch(&a, &b)),
        }
    }

    pub fn multiply(&self, other: &Number) -> Result<Number> {
        match promote_pair(self, other, "multiply")? {
            (Number::Integer(a), Number::Integer(b)) => Ok(Number::Integer(a.multiply(&b))),
            (Number::Rational(a), Number::Rational(b)) => Ok(Number::Rational(a.multiply(&b))),
            (Number::Real(a), Number::Real(b)) => Ok(Number::Real(a.multiply(&b)?)),
            (Number::Complex(a), Number::Complex(b)) => Ok(Number::Complex(a.multiply(&b)?)),
            (a, b) => Err(mismatch(&a, &b)),
        }
    }

    /// Integer division narrows to Integer when exact, otherwise gives the
    /// reduced Rational.
    pub fn divide(&self, other: &Number) -> Result<Number> {
        match promote_pair(self, other, "divide")? {
            (Number::Integer(a), Number::Integer(b)) => a.divide(&b),
            (Number::Rational(a), Number::Rational(b)) => Ok(Number::Rational(a.divide(&b)?)),
            (Number::Real(a), Number::Real(b)) => Ok(Number::Real(a.divide(&b)?)),
            (Number::Complex(a), Number::Complex(b)) => Ok(Number::Complex(a.divide(&b)?)),
            (a, b) => Err(mismatch(&a, &b)),
        }
    }

    pub fn pow(&self, exponent: i64) -> Result<Number> {
        if exponent < 0 && self.is_zero() {
            return Err(NumericError::division_by_zero());
        }
        match self {
            Number::Integer(n) => n.pow(exponent),
            Number::Rational(q) => Ok(Number::Rational(q.pow(exponent)?)),
            Number::Real(x) => Ok(Number::Real(x.pow(exponent)?)),
            Number::Complex(z) => Ok(Number::Complex(z.pow(exponent)?)),
        }
    }

    /// Square root. Integers give the floor root; negative non-Complex values
    /// follow the configured [`NegativeSqrtPolicy`].
    pub fn sqrt(&self) -> Result<Number> {
        let negative = match self {
            Number::Integer(n) => n.is_negative(),
            Number::Rational(q) => q.is_negative(),
            Number::Real(x) => x.is_negative(),
            Number::Complex(_) => false,
        };
        if negative {
            return self.negative_sqrt();
        }
        match self {
            Number::Integer(n) => Ok(Number::Integer(n.sqrt()?)),
            Number::Rational(q) => q.sqrt(),
            Number::Real(x) => Ok(Number::Real(x.sqrt()?)),
            Number::Complex(z) => Ok(Number::Complex(z.sqrt()?)),
        }
    }

    fn negative_sqrt(&self) -> Result<Number> {
        let config = config::current();
        match config.negative_sqrt {
            NegativeSqrtPolicy::Reject => Err(NumericError::domain(format!("square root of negative value {self}"))),
            NegativeSqrtPolicy::Promote => {
                let ctx = self.precision().or(config.default_context());
                trace!(target: "numeris::dispatch", value = %self, "promoting negative square root to Complex");
                match promote(self, NumericKind::Complex, ctx)? {
                    Number::Complex(z) => Ok(Number::Complex(z.sqrt()?)),
                    other => Err(NumericError::coercion(&other, other.kind(), NumericKind::Complex, "promotion did not reach Complex")),
                }
            }
        }
    }

    /// Integer inverses are Rationals.
    pub fn inverse(&self) -> Result<Number> {
        match self {
            Number::Integer(n) => Ok(Number::Rational(n.inverse()?)),
            Number::Rational(q) => Ok(Number::Rational(q.inverse()?)),
            Number::Real(x) => Ok(Number::Real(x.inverse()?)),
            Number::Complex(z) => Ok(Number::Complex(z.inverse()?)),
        }
    }

    pub fn negate(&self) -> Result<Number> {
        match self {
            Number::Integer(n) => Ok(Number::Integer(n.negate())),
            Number::Rational(q) => Ok(Number::Rational(q.negate())),
            Number::Real(x) => Ok(Number::Real(x.negate())),
            Number::Complex(z) => Ok(Number::Complex(z.negate()?)),
        }
    }

    /// Absolute value; Complex magnitudes are Reals.
    pub fn magnitude(&self) -> Result<Number> {
        match self {
            Number::Integer(n) => Ok(Number::Integer(n.abs())),
            Number::Rational(q) => Ok(Number::Rational(q.abs())),
            Number::Real(x) => Ok(Number::Real(x.abs())),
            Number::Complex(z) => Ok(Number::Real(z.magnitude()?)),
        }
    }

    pub fn sign(&self) -> Result<Sign> {
        match self {
            Number::Integer(n) => Ok(n.sign()),
            Number::Rational(q) => Ok(q.sign()),
            Number::Real(x) => Ok(x.sign()),
            Number::Complex(_) => Err(ArithmeticError::UndefinedSign.into()),
        }
    }

    /// Total order across the non-Complex kinds.
    pub fn compare(&self, other: &Number) -> Result<Ordering> {
        if self.kind() == NumericKind::Complex || other.kind() == NumericKind::Complex {
            return Err(ArithmeticError::UndefinedSign.into());
        }
        match promote_pair(self, other, "compare")? {
            (Number::Integer(a), Number::Integer(b)) => Ok(a.compare(&b)),
            (Number::Rational(a), Number::Rational(b)) => Ok(a.compare(&b)),
            (Number::Real(a), Number::Real(b)) => Ok(a.compare(&b)),
            (a, b) => Err(mismatch(&a, &b)),
        }
    }

    /// Numeric equality across kinds.
    pub fn num_eq(&self, other: &Number) -> Result<bool> {
        let (a, b) = promote_pair(self, other, "num_eq")?;
        Ok(a == b)
    }
}

impl Add for &Number {
    type Output = Result<Number>;

    fn add(self, other: Self) -> Self::Output {
        Number::add(self, other)
    }
}

impl Sub for &Number {
    type Output = Result<Number>;

    fn sub(self, other: Self) -> Self::Output {
        self.subtract(other)
    }
}

impl Mul for &Number {
    type Output = Result<Number>;

    fn mul(self, other: Self) -> Self::Output {
        self.multiply(other)
    }
}

impl Div for &Number {
    type Output = Result<Number>;

    fn div(self, other: Self) -> Self::Output {
        self.divide(other)
    }
}

impl Neg for &Number {
    type Output = Result<Number>;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}
