use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_integer::Integer as _;
use num_traits::{One, Signed, Zero};
use tracing::debug;

use crate::config;
use crate::ctx::{
    MAX_SCALE, PrecisionContext, Rounded, check_scale, checked_pow10, decimal_digits, fit_quotient, pow10, round_enclosure,
    round_to_digits,
};
use crate::error::{NumericError, Result};
use crate::math::fixed;
use crate::typ::NumericKind;

use super::Ordered;
use super::integer::split_sign;

/// Guard digits for transcendental evaluation and square roots.
const GUARD: u32 = 16;
const RETRIES: usize = 4;
/// Largest `|x|` accepted by `exp`.
const EXP_LIMIT: i64 = 10_000;
/// Largest decimal exponent of an angle that still gets reduced modulo `2 pi`.
const ANGLE_EXPONENT_LIMIT: i64 = 1_000;

/// Arbitrary-precision decimal `unscaled * 10^-scale`.
///
/// Every Real carries the precision context it was computed under. Results of
/// arithmetic are rounded to the combined context of the operands; a Real is
/// exact only while no rounding has discarded non-zero digits.
#[derive(Clone, Debug)]
pub struct Real {
    unscaled: BigInt,
    scale: i64,
    context: PrecisionContext,
    exact: bool,
}

/// Scale of the terminating decimal expansion of `1 / den`, if there is one.
pub(crate) fn terminating_scale(den: &BigInt) -> Option<i64> {
    let mut d = den.abs();
    if d.is_zero() {
        return None;
    }
    let (mut twos, mut fives) = (0i64, 0i64);
    while d.is_even() {
        d /= 2u32;
        twos += 1;
    }
    while (&d % 5u32).is_zero() {
        d /= 5u32;
        fives += 1;
    }
    d.is_one().then_some(twos.max(fives))
}

impl Real {
    /// Exact decimal under the unlimited context. Arithmetic on a value whose
    /// scale lies outside `[-MAX_SCALE, MAX_SCALE]` fails with a domain error.
    pub fn new(unscaled: impl Into<BigInt>, scale: i64) -> Self {
        Real {
            unscaled: unscaled.into(),
            scale,
            context: PrecisionContext::UNLIMITED,
            exact: true,
        }
    }

    pub fn from_integer(n: &BigInt) -> Self {
        Real::new(n.clone(), 0)
    }

    /// Exact zero carrying `ctx`.
    pub fn zero(ctx: PrecisionContext) -> Self {
        Real {
            unscaled: BigInt::zero(),
            scale: 0,
            context: ctx,
            exact: true,
        }
    }

    pub fn one(ctx: PrecisionContext) -> Self {
        Real {
            unscaled: BigInt::one(),
            scale: 0,
            context: ctx,
            exact: true,
        }
    }

    /// `unscaled * 10^-scale` rounded to `ctx`.
    pub fn with_context(unscaled: impl Into<BigInt>, scale: i64, ctx: PrecisionContext) -> Result<Self> {
        Real::rounded(unscaled.into(), scale, ctx, true)
    }

    pub(crate) fn from_rounded(rounded: Rounded, ctx: PrecisionContext, exact: bool) -> Result<Self> {
        Ok(Real {
            scale: check_scale(rounded.scale)?,
            unscaled: rounded.unscaled,
            context: ctx,
            exact: exact && !rounded.inexact,
        })
    }

    pub(crate) fn with_exactness(self, exact: bool) -> Self {
        Real { exact, ..self }
    }

    fn rounded(unscaled: BigInt, scale: i64, ctx: PrecisionContext, exact: bool) -> Result<Self> {
        let r = round_to_digits(&unscaled, scale, ctx)?;
        Real::from_rounded(r, ctx, exact)
    }

    /// `num / den` as a Real. Terminating quotients stay exact (subject to
    /// rounding under a limited `ctx`); others are rounded to `ctx`, or to the
    /// default context when `ctx` is unlimited.
    pub fn from_ratio(num: &BigInt, den: &BigInt, ctx: PrecisionContext) -> Result<Self> {
        if den.is_zero() {
            return Err(NumericError::division_by_zero());
        }
        let g = num.gcd(den);
        let (mut num, mut den) = (num / &g, den / &g);
        if den.is_negative() {
            num = -num;
            den = -den;
        }
        if let Some(scale) = terminating_scale(&den) {
            let unscaled = num * checked_pow10(scale)? / den;
            return Real::rounded(unscaled, scale, ctx, true);
        }
        let ctx = ctx.or(config::current().default_context());
        let Some(digits) = ctx.digits() else {
            return Err(NumericError::domain("default precision context must be limited"));
        };
        let fitted = fit_quotient(&num, &den, digits, ctx.rounding())?;
        Real::from_rounded(fitted, ctx, false)
    }

    /// Square root of `num / den` (`den > 0`), correctly rounded to `ctx` (or
    /// the default context when unlimited and the root is irrational).
    pub(crate) fn sqrt_of_ratio(num: &BigInt, den: &BigInt, ctx: PrecisionContext) -> Result<Self> {
        if num.is_negative() {
            return Err(NumericError::domain("square root of a negative value"));
        }
        if num.is_zero() {
            return Ok(Real::zero(ctx));
        }
        let g = num.gcd(den);
        let (num, den) = (num / &g, den / &g);
        let (rn, rd) = (num.sqrt(), den.sqrt());
        if &rn * &rn == num && &rd * &rd == den {
            return Real::from_ratio(&rn, &rd, ctx);
        }

        let ctx = ctx.or(config::current().default_context());
        let Some(digits) = ctx.digits() else {
            return Err(NumericError::domain("default precision context must be limited"));
        };
        let magnitude = (decimal_digits(&num) as i64 - decimal_digits(&den) as i64) / 2;
        let mut guard = GUARD;
        let mut last = None;
        for _ in 0..RETRIES {
            let q = (digits + guard) as i64 - magnitude;
            let (lo, hi, unit) = root_enclosure(&num, &den, q)?;
            if let Some(r) = round_enclosure(&lo, &hi, &unit, ctx)? {
                return Real::from_rounded(r, ctx, false);
            }
            debug!(target: "numeris::real", digits, guard, "square root rounding undecided, widening");
            last = Some((lo + hi, unit * 2u32));
            guard *= 2;
        }
        let (mid, unit) = last.unwrap_or_else(|| (BigInt::zero(), BigInt::one()));
        Real::from_rounded(fit_quotient(&mid, &unit, digits, ctx.rounding())?, ctx, false)
    }

    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    pub fn scale(&self) -> i64 {
        self.scale
    }

    pub fn context(&self) -> PrecisionContext {
        self.context
    }

    pub fn is_exact(&self) -> bool {
        self.exact
    }

    pub fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.unscaled.is_negative()
    }

    /// Significant digits of the unscaled value.
    pub fn precision(&self) -> u64 {
        decimal_digits(&self.unscaled)
    }

    /// Same value re-rounded to `ctx`, which becomes its context.
    pub fn round_to(&self, ctx: PrecisionContext) -> Result<Real> {
        Real::rounded(self.unscaled.clone(), self.scale, ctx, self.exact)
    }

    pub fn is_integral(&self) -> bool {
        if self.scale <= 0 || self.unscaled.is_zero() {
            return true;
        }
        // a non-zero value with fewer digits than its scale has a fraction
        if self.scale >= decimal_digits(&self.unscaled) as i64 {
            return false;
        }
        (&self.unscaled % pow10(self.scale as u32)).is_zero()
    }

    /// Decimal exponent of the leading digit (`0` for `1.5`, `-3` for `0.00125`).
    fn adjusted_exponent(&self) -> i64 {
        decimal_digits(&self.unscaled) as i64 - 1 - self.scale
    }

    /// Reduced `(numerator, denominator)` of the decimal value.
    pub fn to_ratio(&self) -> Result<(BigInt, BigInt)> {
        if self.scale <= 0 {
            return Ok((&self.unscaled * checked_pow10(-self.scale)?, BigInt::one()));
        }
        let den = checked_pow10(self.scale)?;
        let g = self.unscaled.gcd(&den);
        Ok((&self.unscaled / &g, den / g))
    }

    fn aligned(&self, other: &Real) -> Result<(BigInt, BigInt, i64)> {
        let scale = self.scale.max(other.scale);
        let a = &self.unscaled * checked_pow10(scale - self.scale)?;
        let b = &other.unscaled * checked_pow10(scale - other.scale)?;
        Ok((a, b, scale))
    }

    pub fn add(&self, other: &Real) -> Result<Real> {
        let (a, b, scale) = self.aligned(other)?;
        Real::rounded(a + b, scale, self.context.combine(other.context), self.exact && other.exact)
    }

    pub fn subtract(&self, other: &Real) -> Result<Real> {
        let (a, b, scale) = self.aligned(other)?;
        Real::rounded(a - b, scale, self.context.combine(other.context), self.exact && other.exact)
    }

    pub fn multiply(&self, other: &Real) -> Result<Real> {
        self.product(other, self.context.combine(other.context))
    }

    fn product(&self, other: &Real, ctx: PrecisionContext) -> Result<Real> {
        Real::rounded(
            &self.unscaled * &other.unscaled,
            self.scale + other.scale,
            ctx,
            self.exact && other.exact,
        )
    }

    pub fn divide(&self, other: &Real) -> Result<Real> {
        self.quotient(other, self.context.combine(other.context))
    }

    fn quotient(&self, other: &Real, ctx: PrecisionContext) -> Result<Real> {
        if other.is_zero() {
            return Err(NumericError::division_by_zero());
        }
        // (ua / 10^sa) / (ub / 10^sb) = ua 10^sb / (ub 10^sa)
        let shift = other.scale - self.scale;
        let (num, den) = if shift >= 0 {
            (&self.unscaled * checked_pow10(shift)?, other.unscaled.clone())
        } else {
            (self.unscaled.clone(), &other.unscaled * checked_pow10(-shift)?)
        };
        let q = Real::from_ratio(&num, &den, ctx)?;
        let exact = q.exact && self.exact && other.exact;
        Ok(q.with_exactness(exact))
    }

    pub fn pow(&self, exponent: i64) -> Result<Real> {
        if exponent < 0 && self.is_zero() {
            return Err(NumericError::division_by_zero());
        }
        let mut exp = u32::try_from(exponent.unsigned_abs())
            .map_err(|_| NumericError::domain(format!("exponent {exponent} is too large")))?;
        let work = self.context.widened(GUARD);
        let mut result = Real::one(work).with_exactness(self.exact);
        let mut base = self.clone();
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.product(&base, work)?;
            }
            exp >>= 1;
            if exp > 0 {
                base = base.product(&base, work)?;
            }
        }
        if exponent < 0 {
            result = Real::one(work).quotient(&result, work)?;
        }
        result.round_to(self.context.or(result.context))
    }

    pub fn sqrt(&self) -> Result<Real> {
        if self.is_negative() {
            return Err(NumericError::domain(format!("square root of negative value {self}")));
        }
        let (num, den) = self.to_ratio()?;
        let root = Real::sqrt_of_ratio(&num, &den, self.context)?;
        let exact = root.exact && self.exact;
        Ok(root.with_exactness(exact))
    }

    pub fn inverse(&self) -> Result<Real> {
        Real::one(self.context).with_exactness(self.exact).divide(self)
    }

    pub fn negate(&self) -> Real {
        Real {
            unscaled: -&self.unscaled,
            ..self.clone()
        }
    }

    pub fn abs(&self) -> Real {
        Real {
            unscaled: self.unscaled.abs(),
            ..self.clone()
        }
    }

    fn working_context(&self) -> Result<(PrecisionContext, u32)> {
        check_scale(self.scale)?;
        working(self.context)
    }

    pub fn exp(&self) -> Result<Real> {
        if self.is_zero() {
            return Ok(Real::one(self.context).with_exactness(self.exact));
        }
        if self.abs().compare(&Real::new(EXP_LIMIT, 0)) == Ordering::Greater {
            return Err(NumericError::domain(format!("exp argument {self} is out of range")));
        }
        let (ctx, digits) = self.working_context()?;
        let q = digits + GUARD;
        let value = fixed::exp(&fixed::to_fixed(&self.unscaled.abs(), self.scale, q), q);
        // e^-x = 1 / e^x keeps full relative precision
        let fitted = if self.is_negative() {
            fit_quotient(&pow10(q), &value, digits, ctx.rounding())?
        } else {
            fit_quotient(&value, &pow10(q), digits, ctx.rounding())?
        };
        Real::from_rounded(fitted, ctx, false)
    }

    pub fn ln(&self) -> Result<Real> {
        if !self.unscaled.is_positive() {
            return Err(NumericError::domain(format!("logarithm of non-positive value {self}")));
        }
        let (num, den) = self.to_ratio()?;
        if num == den {
            return Ok(Real::zero(self.context).with_exactness(self.exact));
        }
        let (ctx, digits) = self.working_context()?;
        evaluate(ctx, digits, "ln", |scale| fixed::ln(&num, &den, scale))
    }

    fn check_angle_range(&self) -> Result<()> {
        if self.adjusted_exponent() > ANGLE_EXPONENT_LIMIT {
            return Err(NumericError::domain(format!("angle {self} is too large to reduce")));
        }
        Ok(())
    }

    /// The same angle moved into `[-pi, pi)` by a multiple of `2 pi`. Angles
    /// of magnitude at most 3 come back unchanged and keep their exactness.
    pub fn principal_angle(&self) -> Result<Real> {
        if self.abs().compare(&Real::new(3, 0)) != Ordering::Greater {
            return Ok(self.clone());
        }
        self.check_angle_range()?;
        let (ctx, digits) = self.working_context()?;
        evaluate(ctx, digits, "principal_angle", |scale| {
            fixed::principal_angle(&fixed::to_fixed(&self.unscaled, self.scale, scale), scale)
        })
    }

    pub fn sin(&self) -> Result<Real> {
        if self.is_zero() {
            return Ok(Real::zero(self.context).with_exactness(self.exact));
        }
        self.check_angle_range()?;
        let (ctx, digits) = self.working_context()?;
        evaluate(ctx, digits, "sin", |scale| fixed::sin(&fixed::to_fixed(&self.unscaled, self.scale, scale), scale))
    }

    pub fn cos(&self) -> Result<Real> {
        if self.is_zero() {
            return Ok(Real::one(self.context).with_exactness(self.exact));
        }
        self.check_angle_range()?;
        let (ctx, digits) = self.working_context()?;
        evaluate(ctx, digits, "cos", |scale| fixed::cos(&fixed::to_fixed(&self.unscaled, self.scale, scale), scale))
    }

    pub fn atan(&self) -> Result<Real> {
        if self.is_zero() {
            return Ok(Real::zero(self.context).with_exactness(self.exact));
        }
        let (ctx, digits) = self.working_context()?;
        evaluate(ctx, digits, "atan", |scale| fixed::atan(&fixed::to_fixed(&self.unscaled, self.scale, scale), scale))
    }

    /// Angle of the point `(x, y)`, in `(-pi, pi]`. The origin and the
    /// positive real axis give an exact zero.
    pub fn atan2(y: &Real, x: &Real) -> Result<Real> {
        let combined = y.context.combine(x.context);
        if y.is_zero() && !x.is_negative() {
            return Ok(Real::zero(combined).with_exactness(y.exact && x.exact));
        }
        check_scale(y.scale)?;
        check_scale(x.scale)?;
        let (ctx, digits) = working(combined)?;
        evaluate(ctx, digits, "atan2", |scale| {
            fixed::atan2(
                &fixed::to_fixed(&y.unscaled, y.scale, scale),
                &fixed::to_fixed(&x.unscaled, x.scale, scale),
                scale,
            )
        })
    }
}

fn working(ctx: PrecisionContext) -> Result<(PrecisionContext, u32)> {
    let ctx = ctx.or(config::current().default_context());
    match ctx.digits() {
        Some(digits) => Ok((ctx, digits)),
        None => Err(NumericError::domain("default precision context must be limited")),
    }
}

/// Runs a fixed-point kernel, widening the working scale until the result
/// carries enough significant digits, then rounds it to `ctx`.
fn evaluate<F>(ctx: PrecisionContext, digits: u32, name: &str, kernel: F) -> Result<Real>
where
    F: Fn(u32) -> BigInt,
{
    let wanted = digits as u64 + 2;
    let mut scale = digits + GUARD;
    let mut value = kernel(scale);
    for _ in 0..RETRIES {
        let have = if value.is_zero() { 0 } else { decimal_digits(&value) };
        if have >= wanted {
            break;
        }
        let grow = if have == 0 { scale } else { (wanted - have) as u32 + GUARD };
        scale = scale.saturating_add(grow);
        debug!(target: "numeris::real", function = name, scale, "result lost significance, widening");
        value = kernel(scale);
    }
    let fitted = fit_quotient(&value, &pow10(scale), digits, ctx.rounding())?;
    Real::from_rounded(fitted, ctx, false)
}

/// Floor root `r` of `num / den * 10^(2q)` as the enclosure `[r, r + 1] / unit`.
fn root_enclosure(num: &BigInt, den: &BigInt, q: i64) -> Result<(BigInt, BigInt, BigInt)> {
    if q >= 0 {
        let shift = checked_pow10(2 * q)?;
        let r = (num * shift / den).sqrt();
        let hi = &r + 1u32;
        Ok((r, hi, checked_pow10(q)?))
    } else {
        let shift = checked_pow10(-2 * q)?;
        let r = (num / (den * shift)).sqrt();
        let unit = checked_pow10(-q)?;
        let hi = (&r + 1u32) * &unit;
        Ok((r * unit, hi, BigInt::one()))
    }
}

impl Ordered for Real {
    /// Orders by sign, then by leading-digit exponent, then digit by digit, so
    /// no operand is ever rescaled.
    fn compare(&self, other: &Self) -> Ordering {
        let by_sign = self.unscaled.sign().cmp(&other.unscaled.sign());
        if by_sign != Ordering::Equal || self.is_zero() {
            return by_sign;
        }
        let magnitude = self.adjusted_exponent().cmp(&other.adjusted_exponent()).then_with(|| {
            let a = self.unscaled.magnitude().to_str_radix(10);
            let b = other.unscaled.magnitude().to_str_radix(10);
            a.trim_end_matches('0').cmp(b.trim_end_matches('0'))
        });
        if self.is_negative() { magnitude.reverse() } else { magnitude }
    }

    fn zero_like(&self) -> Self {
        Real::zero(self.context)
    }
}

/// Numeric equality: scale, context and exactness do not take part.
impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Real {
    /// Plain notation for integral values, as used inside Complex text where
    /// the kind is already fixed.
    pub(crate) fn as_component(&self) -> Component<'_> {
        Component(self)
    }

    fn write_decimal(&self, f: &mut fmt::Formatter<'_>, plain_integers: bool) -> fmt::Result {
        let digits = self.unscaled.magnitude().to_str_radix(10);
        let sign = if self.unscaled.is_negative() { "-" } else { "" };
        let len = digits.len() as i64;
        let adjusted = len - 1 - self.scale;
        // scale 0 prints as `7E+0` so the text does not read back as an Integer
        let plain = if self.scale == 0 { plain_integers } else { self.scale > 0 && adjusted >= -6 };
        if plain {
            if self.scale == 0 {
                write!(f, "{sign}{digits}")
            } else if len > self.scale {
                let point = (len - self.scale) as usize;
                write!(f, "{sign}{}.{}", &digits[..point], &digits[point..])
            } else {
                let zeros = "0".repeat((self.scale - len) as usize);
                write!(f, "{sign}0.{zeros}{digits}")
            }
        } else {
            let (head, tail) = digits.split_at(1);
            write!(f, "{sign}{head}")?;
            if !tail.is_empty() {
                write!(f, ".{tail}")?;
            }
            let exp_sign = if adjusted >= 0 { '+' } else { '-' };
            write!(f, "E{exp_sign}{}", adjusted.unsigned_abs())
        }
    }
}

pub(crate) struct Component<'a>(&'a Real);

impl fmt::Display for Component<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write_decimal(f, true)
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_decimal(f, false)
    }
}

impl FromStr for Real {
    type Err = NumericError;

    /// Plain (`-12.50`) or scientific (`1.5E+10`) decimal notation.
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let fail = |reason: &str| NumericError::parse(s, NumericKind::Real, reason);
        let (mantissa, exponent) = match text.find(['e', 'E']) {
            Some(at) => (&text[..at], Some(&text[at + 1..])),
            None => (text, None),
        };
        let exponent = match exponent {
            Some(e) => e.parse::<i64>().map_err(|_| fail("malformed exponent"))?,
            None => 0,
        };
        let (negative, body) = split_sign(mantissa);
        let (int, frac) = body.split_once('.').unwrap_or((body, ""));
        if int.is_empty() && frac.is_empty() {
            return Err(fail("missing digits"));
        }
        if !int.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(fail("unexpected character in decimal"));
        }
        let magnitude: BigInt = format!("{int}{frac}").parse().map_err(|_| fail("missing digits"))?;
        let scale = (frac.len() as i64)
            .checked_sub(exponent)
            .filter(|scale| scale.unsigned_abs() <= MAX_SCALE as u64)
            .ok_or_else(|| fail("exponent out of range"))?;
        Ok(Real::new(if negative { -magnitude } else { magnitude }, scale))
    }
}
