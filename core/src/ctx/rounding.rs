use num_bigint::BigInt;
use num_integer::Integer as _;
use num_traits::{One, Signed, Zero};

use crate::error::{ArithmeticError, NumericError, Result};

use super::{PrecisionContext, RoundingMode};

/// A decimal `unscaled * 10^-scale` produced by a rounding step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Rounded {
    pub unscaled: BigInt,
    pub scale: i64,
    pub inexact: bool,
}

pub(crate) fn pow10(exp: u32) -> BigInt {
    BigInt::from(10u32).pow(exp)
}

/// Decimal digits of the magnitude of `n`; zero has one digit.
pub(crate) fn decimal_digits(n: &BigInt) -> u64 {
    if n.is_zero() {
        return 1;
    }
    n.magnitude().to_str_radix(10).len() as u64
}

/// Bound on the magnitude of a Real's scale, and so of any decimal exponent
/// the library accepts.
pub const MAX_SCALE: i64 = 1_000_000;

/// Largest power of ten an alignment or rounding step may build.
const MAX_POW10: i64 = 4 * MAX_SCALE;

/// `10^exp` for an exponent inside the supported range.
pub(crate) fn checked_pow10(exp: i64) -> Result<BigInt> {
    if !(0..=MAX_POW10).contains(&exp) {
        return Err(NumericError::domain(format!("decimal exponent {exp} is out of range")));
    }
    Ok(pow10(exp as u32))
}

/// Rejects scales outside `[-MAX_SCALE, MAX_SCALE]`.
pub(crate) fn check_scale(scale: i64) -> Result<i64> {
    if scale.unsigned_abs() > MAX_SCALE as u64 {
        return Err(NumericError::domain(format!("scale {scale} is out of range")));
    }
    Ok(scale)
}

/// Rounds `num / den` to an integer. Returns the integer and whether any
/// non-zero remainder was discarded.
pub(crate) fn round_quotient(num: &BigInt, den: &BigInt, mode: RoundingMode) -> Result<(BigInt, bool)> {
    let (num, den) = if den.is_negative() { (-num, -den) } else { (num.clone(), den.clone()) };
    let (mut q, r) = num.div_rem(&den);
    if r.is_zero() {
        return Ok((q, false));
    }
    let positive = num.is_positive();
    let away = match mode {
        RoundingMode::Up => true,
        RoundingMode::Down => false,
        RoundingMode::Ceiling => positive,
        RoundingMode::Floor => !positive,
        RoundingMode::HalfUp | RoundingMode::HalfDown | RoundingMode::HalfEven => {
            let twice = r.abs() * 2u32;
            match twice.cmp(&den) {
                std::cmp::Ordering::Greater => true,
                std::cmp::Ordering::Less => false,
                std::cmp::Ordering::Equal => match mode {
                    RoundingMode::HalfUp => true,
                    RoundingMode::HalfDown => false,
                    _ => q.is_odd(),
                },
            }
        }
        RoundingMode::Unnecessary => return Err(ArithmeticError::RoundingNecessary.into()),
    };
    if away {
        if positive {
            q += 1u32;
        } else {
            q -= 1u32;
        }
    }
    Ok((q, true))
}

fn scaled_quotient(num: &BigInt, den: &BigInt, scale: i64, mode: RoundingMode) -> Result<(BigInt, bool)> {
    if scale >= 0 {
        round_quotient(&(num * checked_pow10(scale)?), den, mode)
    } else {
        round_quotient(num, &(den * checked_pow10(-scale)?), mode)
    }
}

/// Fits the exact rational `num / den` (`den > 0`) to `digits` significant
/// digits.
pub(crate) fn fit_quotient(num: &BigInt, den: &BigInt, digits: u32, mode: RoundingMode) -> Result<Rounded> {
    if num.is_zero() {
        return Ok(Rounded {
            unscaled: BigInt::zero(),
            scale: 0,
            inexact: false,
        });
    }
    let estimate = decimal_digits(num) as i64 - decimal_digits(den) as i64;
    let mut scale = digits as i64 - estimate;
    let (truncated, _) = scaled_quotient(num, den, scale, RoundingMode::Down)?;
    if decimal_digits(&truncated) > digits as u64 {
        scale -= 1;
    }
    let (mut q, inexact) = scaled_quotient(num, den, scale, mode)?;
    if decimal_digits(&q) > digits as u64 {
        // carry turned 99..9 into 10..0
        q /= 10u32;
        scale -= 1;
    }
    Ok(Rounded {
        unscaled: q,
        scale,
        inexact,
    })
}

/// Re-rounds `unscaled * 10^-scale` to the context. Values that already fit
/// come back untouched.
pub(crate) fn round_to_digits(unscaled: &BigInt, scale: i64, ctx: PrecisionContext) -> Result<Rounded> {
    match ctx.digits() {
        Some(digits) if decimal_digits(unscaled) > digits as u64 => {
            let fitted = fit_quotient(unscaled, &BigInt::one(), digits, ctx.rounding())?;
            Ok(Rounded {
                unscaled: fitted.unscaled,
                scale: scale + fitted.scale,
                inexact: fitted.inexact,
            })
        }
        _ => Ok(Rounded {
            unscaled: unscaled.clone(),
            scale,
            inexact: false,
        }),
    }
}

/// Rounds a value known to lie in `[lo / den, hi / den]`. Succeeds only when
/// both ends round to the same decimal, which is then the correctly rounded
/// value of anything inside the interval.
pub(crate) fn round_enclosure(lo: &BigInt, hi: &BigInt, den: &BigInt, ctx: PrecisionContext) -> Result<Option<Rounded>> {
    let Some(digits) = ctx.digits() else {
        return Ok(None);
    };
    if lo.is_negative() != hi.is_negative() || lo.is_zero() || hi.is_zero() {
        return Ok(None);
    }
    let low = fit_quotient(lo, den, digits, ctx.rounding())?;
    let high = fit_quotient(hi, den, digits, ctx.rounding())?;
    if low.unscaled == high.unscaled && low.scale == high.scale {
        Ok(Some(Rounded { inexact: true, ..low }))
    } else {
        Ok(None)
    }
}
