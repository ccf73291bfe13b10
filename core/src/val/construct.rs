//! Building values from text and primitives, keyed by kind.

use tracing::trace;

use crate::error::{NumericError, Result};
use crate::typ::NumericKind;

use super::{Complex, Integer, Number, Rational, Real};

type TextConstructor = fn(&str) -> Result<Number>;

// Indexed by `NumericKind` discriminant.
static CONSTRUCTORS: [TextConstructor; 4] = [
    |text| text.parse::<Integer>().map(Number::Integer),
    |text| text.parse::<Rational>().map(Number::Rational),
    |text| text.parse::<Real>().map(Number::Real),
    |text| text.parse::<Complex>().map(Number::Complex),
];

/// Strict parse of `text` as `kind`.
pub fn parse_as(kind: NumericKind, text: &str) -> Result<Number> {
    CONSTRUCTORS[kind as usize](text)
}

fn detect(text: &str) -> NumericKind {
    if text.contains(['i', '∠', '@']) {
        NumericKind::Complex
    } else if text.contains('/') {
        NumericKind::Rational
    } else if text.contains(['.', 'e', 'E']) {
        NumericKind::Real
    } else {
        NumericKind::Integer
    }
}

/// Parses `text`, picking the kind from its shape.
pub fn parse(text: &str) -> Result<Number> {
    let kind = detect(text.trim());
    trace!(target: "numeris::construct", text, kind = %kind, "detected kind");
    parse_as(kind, text)
}

pub fn from_i64_as(kind: NumericKind, n: i64) -> Result<Number> {
    Number::from(n).coerce_to(kind)
}

/// Builds from the shortest decimal that round-trips `x`.
pub fn from_f64_as(kind: NumericKind, x: f64) -> Result<Number> {
    if !x.is_finite() {
        return Err(NumericError::coercion(x, NumericKind::Real, kind, "value is not finite"));
    }
    let decimal: Real = format!("{x}").parse()?;
    Number::Real(decimal).coerce_to(kind)
}
