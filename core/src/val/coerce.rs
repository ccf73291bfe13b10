use tracing::debug;

use crate::ctx::{MAX_SCALE, PrecisionContext, pow10};
use crate::error::{NumericError, Result};
use crate::typ::{NumericHierarchy, NumericKind};

use super::real::terminating_scale;
use super::{Complex, Integer, Number, Rational, Real};

/// Least general kind both kinds widen into.
pub fn find_common_type(a: NumericKind, b: NumericKind) -> Option<NumericKind> {
    NumericHierarchy::common_supertype(a, b)
}

fn rational_to_real(q: &Rational) -> std::result::Result<Real, &'static str> {
    let scale = terminating_scale(q.denominator()).ok_or("decimal expansion does not terminate")?;
    if scale > MAX_SCALE {
        return Err("decimal expansion is too long");
    }
    let unscaled = q.numerator() * pow10(scale as u32) / q.denominator();
    Ok(Real::new(unscaled, scale).with_exactness(q.is_exact()))
}

fn real_to_rational(x: &Real) -> std::result::Result<Rational, &'static str> {
    if !x.is_exact() {
        return Err("value is inexact");
    }
    let (num, den) = x.to_ratio().map_err(|_| "scale is out of range")?;
    Rational::new(num, den).map_err(|_| "zero denominator")
}

fn rational_to_integer(q: &Rational) -> std::result::Result<Integer, &'static str> {
    if !q.is_exact() {
        return Err("value is inexact");
    }
    if !q.is_integral() {
        return Err("value is not integral");
    }
    Ok(Integer::new(q.numerator().clone()))
}

fn complex_to_real(z: &Complex) -> std::result::Result<Real, &'static str> {
    z.exact_real().ok_or("imaginary part is not an exact zero")
}

/// Pure conversion shared by `coerce_to` and `is_coercible_to`.
fn convert(value: &Number, target: NumericKind) -> std::result::Result<Number, &'static str> {
    use NumericKind as K;
    match (value, target) {
        (_, t) if t == value.kind() => Ok(value.clone()),

        (Number::Integer(n), K::Rational) => Ok(Number::Rational(Rational::from_integer(n))),
        (Number::Integer(n), K::Real) => Ok(Number::Real(Real::from_integer(n.value()).with_exactness(n.is_exact()))),
        (Number::Integer(n), K::Complex) => {
            let re = Real::from_integer(n.value()).with_exactness(n.is_exact());
            Ok(Number::Complex(Complex::from_real(re)))
        }

        (Number::Rational(q), K::Integer) => rational_to_integer(q).map(Number::Integer),
        (Number::Rational(q), K::Real) => rational_to_real(q).map(Number::Real),
        (Number::Rational(q), K::Complex) => rational_to_real(q).map(|re| Number::Complex(Complex::from_real(re))),

        (Number::Real(x), K::Integer) => {
            if !x.is_integral() {
                return Err("value is not integral");
            }
            real_to_rational(x).and_then(|q| rational_to_integer(&q)).map(Number::Integer)
        }
        (Number::Real(x), K::Rational) => real_to_rational(x).map(Number::Rational),
        (Number::Real(x), K::Complex) => Ok(Number::Complex(Complex::from_real(x.clone()))),

        (Number::Complex(z), K::Real) => complex_to_real(z).map(Number::Real),
        (Number::Complex(z), narrower) => {
            let re = complex_to_real(z)?;
            convert(&Number::Real(re), narrower)
        }

        _ => Err("no conversion between these kinds"),
    }
}

impl Number {
    /// Converts to `target`. Widening always succeeds except Rational to Real
    /// with a non-terminating expansion. Narrowing needs an exact value that
    /// is representable in `target`.
    pub fn coerce_to(&self, target: NumericKind) -> Result<Number> {
        convert(self, target).map_err(|reason| {
            debug!(target: "numeris::coerce", value = %self, from = %self.kind(), to = %target, reason, "coercion failed");
            NumericError::coercion(self, self.kind(), target, reason)
        })
    }

    /// Whether `coerce_to(target)` would succeed.
    pub fn is_coercible_to(&self, target: NumericKind) -> bool {
        convert(self, target).is_ok()
    }

    /// Narrows to the least general kind that holds the value exactly.
    pub fn simplify(&self) -> Number {
        let mut current = self.clone();
        for kind in NumericKind::ALL.into_iter().rev() {
            if kind >= current.kind() {
                continue;
            }
            match convert(&current, kind) {
                Ok(narrower) => current = narrower,
                Err(_) => break,
            }
        }
        current
    }
}

/// Widening used by arithmetic. Unlike `coerce_to`, a non-terminating
/// Rational promoted under a limited `ctx` becomes an inexact Real rounded to
/// that context.
pub fn promote(value: &Number, target: NumericKind, ctx: PrecisionContext) -> Result<Number> {
    if let Number::Rational(q) = value
        && target >= NumericKind::Real
        && !ctx.is_unlimited()
        && terminating_scale(q.denominator()).is_none()
    {
        let re = Real::from_ratio(q.numerator(), q.denominator(), ctx)?.with_exactness(false);
        debug!(target: "numeris::coerce", value = %q, ctx = %ctx, "rational rounded while promoting");
        return Ok(match target {
            NumericKind::Complex => Number::Complex(Complex::from_real(re)),
            _ => Number::Real(re),
        });
    }
    value.coerce_to(target)
}
