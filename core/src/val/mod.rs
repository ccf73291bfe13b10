use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::ctx::PrecisionContext;
use crate::error::NumericError;
use crate::typ::NumericKind;

mod coerce;
mod complex;
mod construct;
mod integer;
mod ops;
mod rational;
mod real;
mod reduce;

#[cfg(test)]
mod complex_test;
#[cfg(test)]
mod construct_test;
#[cfg(test)]
mod ops_test;
#[cfg(test)]
mod reduce_test;

pub use coerce::{find_common_type, promote};
pub use complex::Complex;
pub use construct::{from_f64_as, from_i64_as, parse, parse_as};
pub use integer::Integer;
pub use rational::Rational;
pub use real::Real;
pub use reduce::{par_sum, product, sum};

/// Three-valued sign of an ordered value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl From<Ordering> for Sign {
    fn from(ord: Ordering) -> Self {
        match ord {
            Ordering::Less => Sign::Negative,
            Ordering::Equal => Sign::Zero,
            Ordering::Greater => Sign::Positive,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Sign::Negative => "negative",
            Sign::Zero => "zero",
            Sign::Positive => "positive",
        };
        f.write_str(name)
    }
}

/// Totally ordered numeric kinds. `sign` falls out of comparing against the
/// additive identity.
pub trait Ordered {
    fn compare(&self, other: &Self) -> Ordering;

    fn zero_like(&self) -> Self
    where
        Self: Sized;

    fn sign(&self) -> Sign
    where
        Self: Sized,
    {
        Sign::from(self.compare(&self.zero_like()))
    }
}

/// A value of the numeric tower.
#[derive(Clone, Debug)]
pub enum Number {
    Integer(Integer),
    Rational(Rational),
    Real(Real),
    Complex(Complex),
}

impl Number {
    pub fn kind(&self) -> NumericKind {
        match self {
            Number::Integer(_) => NumericKind::Integer,
            Number::Rational(_) => NumericKind::Rational,
            Number::Real(_) => NumericKind::Real,
            Number::Complex(_) => NumericKind::Complex,
        }
    }

    pub fn is_exact(&self) -> bool {
        match self {
            Number::Integer(n) => n.is_exact(),
            Number::Rational(q) => q.is_exact(),
            Number::Real(x) => x.is_exact(),
            Number::Complex(z) => z.is_exact(),
        }
    }

    /// Precision context the value was computed under. Integers and
    /// Rationals are unlimited.
    pub fn precision(&self) -> PrecisionContext {
        match self {
            Number::Integer(_) | Number::Rational(_) => PrecisionContext::UNLIMITED,
            Number::Real(x) => x.context(),
            Number::Complex(z) => z.context(),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Number::Integer(n) => n.is_zero(),
            Number::Rational(q) => q.is_zero(),
            Number::Real(x) => x.is_zero(),
            Number::Complex(z) => z.is_zero(),
        }
    }

    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Number::Integer(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_rational(&self) -> Option<&Rational> {
        match self {
            Number::Rational(q) => Some(q),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<&Real> {
        match self {
            Number::Real(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_complex(&self) -> Option<&Complex> {
        match self {
            Number::Complex(z) => Some(z),
            _ => None,
        }
    }
}

/// Same-kind numeric equality. Values of different kinds are never equal
/// here; `num_eq` compares across kinds.
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            (Number::Rational(a), Number::Rational(b)) => a == b,
            (Number::Real(a), Number::Real(b)) => a == b,
            (Number::Complex(a), Number::Complex(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => fmt::Display::fmt(n, f),
            Number::Rational(q) => fmt::Display::fmt(q, f),
            Number::Real(x) => fmt::Display::fmt(x, f),
            Number::Complex(z) => fmt::Display::fmt(z, f),
        }
    }
}

impl FromStr for Number {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Number", 4)?;
        state.serialize_field("kind", &self.kind())?;
        state.serialize_field("text", &self.to_string())?;
        state.serialize_field("exact", &self.is_exact())?;
        state.serialize_field("precision", &self.precision().to_string())?;
        state.end()
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Integer(Integer::from(n))
    }
}

impl From<Integer> for Number {
    fn from(n: Integer) -> Self {
        Number::Integer(n)
    }
}

impl From<Rational> for Number {
    fn from(q: Rational) -> Self {
        Number::Rational(q)
    }
}

impl From<Real> for Number {
    fn from(x: Real) -> Self {
        Number::Real(x)
    }
}

impl From<Complex> for Number {
    fn from(z: Complex) -> Self {
        Number::Complex(z)
    }
}
