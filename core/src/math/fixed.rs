use num_bigint::BigInt;
use num_integer::Integer as _;
use num_traits::{One, Signed, Zero};

use crate::ctx::{decimal_digits, pow10};

/// An approximation `value / den` whose distance to the true value is at most
/// `err / den`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Approx {
    pub value: BigInt,
    pub den: BigInt,
    pub err: u64,
}

impl Approx {
    pub fn at_scale(value: BigInt, scale: u32, err: u64) -> Self {
        Approx {
            value,
            den: pow10(scale),
            err,
        }
    }

    pub fn negate(self) -> Self {
        Approx {
            value: -self.value,
            ..self
        }
    }

    /// Numerators of the interval ends over `den`.
    pub fn bounds(&self) -> (BigInt, BigInt) {
        (&self.value - self.err, &self.value + self.err)
    }
}

/// Sum of `1 / ((2k + 1) x^(2k + 1))` at unit `one`, with alternating signs
/// when `alternate` is set. Returns the sum and the number of terms used.
fn inverse_series(x: u64, one: &BigInt, alternate: bool) -> (BigInt, u64) {
    let x = BigInt::from(x);
    let x2 = &x * &x;
    let mut power = one / &x;
    let mut sum = BigInt::zero();
    let mut k = 0u64;
    loop {
        let term = &power / (2 * k + 1);
        if term.is_zero() {
            break;
        }
        if alternate && k % 2 == 1 {
            sum -= term;
        } else {
            sum += term;
        }
        power /= &x2;
        k += 1;
    }
    (sum, k)
}

// Each term carries under three ulps of truncation, plus the tail.
fn series_err(terms: u64) -> u64 {
    3 * terms + 4
}

/// Machin: pi = 16 atan(1/5) - 4 atan(1/239).
pub fn pi(scale: u32) -> Approx {
    let one = pow10(scale);
    let (a, n) = inverse_series(5, &one, true);
    let (b, m) = inverse_series(239, &one, true);
    Approx::at_scale(a * 16u32 - b * 4u32, scale, 16 * series_err(n) + 4 * series_err(m))
}

pub fn tau(scale: u32) -> Approx {
    let half = pi(scale);
    Approx {
        value: half.value * 2u32,
        den: half.den,
        err: half.err * 2,
    }
}

/// Sum of `1 / k!`.
pub fn e(scale: u32) -> Approx {
    let mut term = pow10(scale);
    let mut sum = BigInt::zero();
    let mut k = 0u64;
    while !term.is_zero() {
        sum += &term;
        k += 1;
        term /= k;
    }
    Approx::at_scale(sum, scale, 2 * k + 4)
}

/// ln 2 = 2 atanh(1/3).
pub fn ln2(scale: u32) -> Approx {
    let (a, n) = inverse_series(3, &pow10(scale), false);
    Approx::at_scale(a * 2u32, scale, 2 * series_err(n))
}

/// ln 10 = 3 ln 2 + ln(5/4) = 3 ln 2 + 2 atanh(1/9).
pub fn ln10(scale: u32) -> Approx {
    let two = ln2(scale);
    let (b, m) = inverse_series(9, &pow10(scale), false);
    Approx::at_scale(two.value * 3u32 + b * 2u32, scale, 3 * two.err + 2 * series_err(m))
}

/// `floor(sqrt(num / den) * 10^scale)` for a non-negative ratio.
pub fn sqrt_floor(num: &BigInt, den: &BigInt, scale: u32) -> BigInt {
    let radicand = num * pow10(scale) * pow10(scale) / den;
    if radicand.is_positive() { radicand.sqrt() } else { BigInt::zero() }
}

/// Enclosure of `sqrt(num / den)`: the root lies in `[r, r + 1] / 10^scale`.
pub fn sqrt(num: &BigInt, den: &BigInt, scale: u32) -> Approx {
    let r = sqrt_floor(num, den, scale);
    Approx {
        value: r * 2u32 + 1u32,
        den: pow10(scale) * 2u32,
        err: 1,
    }
}

/// Golden ratio branches `(1 + sqrt 5) / 2` and `(1 - sqrt 5) / 2`.
pub fn phi(scale: u32, negative: bool) -> Approx {
    let one = pow10(scale);
    let s = sqrt_floor(&BigInt::from(5u32), &BigInt::one(), scale);
    // sqrt 5 lies in [s, s + 1] / one
    let value = if negative { (&one - &s) * 2u32 - 1u32 } else { (&one + &s) * 2u32 + 1u32 };
    Approx {
        value,
        den: one * 4u32,
        err: 1,
    }
}

/// Rescales a decimal `unscaled * 10^-scale` to fixed point at `target`,
/// truncating.
pub fn to_fixed(unscaled: &BigInt, scale: i64, target: u32) -> BigInt {
    let shift = target as i64 - scale;
    if shift >= 0 {
        unscaled * pow10(shift as u32)
    } else {
        unscaled / pow10(shift.unsigned_abs() as u32)
    }
}

/// `exp(x)` for `x >= 0` at `scale`.
pub fn exp(x: &BigInt, scale: u32) -> BigInt {
    let halvings = (x / pow10(scale)).bits() + 8;
    let extra = halvings as u32 + 10;
    let work = scale + extra;
    let one = pow10(work);
    let r = (x * pow10(extra)) >> halvings;
    let mut sum = one.clone();
    let mut term = one.clone();
    let mut k = 0u64;
    loop {
        k += 1;
        term = &term * &r / &one / k;
        if term.is_zero() {
            break;
        }
        sum += &term;
    }
    for _ in 0..halvings {
        sum = &sum * &sum / &one;
    }
    sum / pow10(extra)
}

/// `ln(num / den)` for a positive ratio, at `scale`.
pub fn ln(num: &BigInt, den: &BigInt, scale: u32) -> BigInt {
    let work = scale + 10;
    let one = pow10(work);
    // num / (den 2^k) lies in (1/2, 2)
    let k = num.bits() as i64 - den.bits() as i64;
    let (n, d) = if k >= 0 {
        (num.clone(), den << (k as usize))
    } else {
        (num << (k.unsigned_abs() as usize), den.clone())
    };
    let z = (&n - &d) * &one / (&n + &d);
    let z2 = &z * &z / &one;
    let mut power = z;
    let mut sum = BigInt::zero();
    let mut j = 0u64;
    loop {
        let term = &power / (2 * j + 1);
        if term.is_zero() {
            break;
        }
        sum += term;
        power = power * &z2 / &one;
        j += 1;
    }
    let total = sum * 2u32 + ln2(work).value * k;
    total / pow10(10)
}

fn reduce_angle(x: &BigInt, scale: u32) -> (BigInt, u32) {
    let int_digits = decimal_digits(&(x / pow10(scale))) as u32;
    let work = scale + int_digits + 10;
    let xw = x * pow10(work - scale);
    let full = tau(work).value;
    // nearest multiple of 2 pi
    let k = (&xw * 2u32 + &full).div_floor(&(&full * 2u32));
    (xw - k * full, work)
}

fn trig_series(r: &BigInt, one: &BigInt, start: BigInt, mut n: u64) -> BigInt {
    let r2 = r * r / one;
    let mut term = start.clone();
    let mut sum = start;
    loop {
        term = -(&term * &r2 / one) / ((n + 1) * (n + 2));
        if term.is_zero() {
            break;
        }
        sum += &term;
        n += 2;
    }
    sum
}

/// `x` minus the nearest multiple of `2 pi`, in `[-pi, pi)`.
pub fn principal_angle(x: &BigInt, scale: u32) -> BigInt {
    let (r, work) = reduce_angle(x, scale);
    r / pow10(work - scale)
}

pub fn sin(x: &BigInt, scale: u32) -> BigInt {
    let (r, work) = reduce_angle(x, scale);
    let one = pow10(work);
    trig_series(&r, &one, r.clone(), 1) / pow10(work - scale)
}

pub fn cos(x: &BigInt, scale: u32) -> BigInt {
    let (r, work) = reduce_angle(x, scale);
    let one = pow10(work);
    trig_series(&r, &one, one.clone(), 0) / pow10(work - scale)
}

const ATAN_HALVINGS: usize = 4;

fn atan_small(x: &BigInt, one: &BigInt) -> BigInt {
    // atan(x) = 2 atan(x / (1 + sqrt(1 + x^2)))
    let mut x = x.clone();
    for _ in 0..ATAN_HALVINGS {
        let root = (one * one + &x * &x).sqrt();
        x = &x * one / (one + root);
    }
    let x2 = &x * &x / one;
    let mut power = x;
    let mut sum = BigInt::zero();
    let mut j = 0u64;
    loop {
        let term = &power / (2 * j + 1);
        if term.is_zero() {
            break;
        }
        if j % 2 == 1 {
            sum -= term;
        } else {
            sum += term;
        }
        power = power * &x2 / one;
        j += 1;
    }
    sum << ATAN_HALVINGS
}

fn atan_fixed(x: &BigInt, one: &BigInt, work: u32) -> BigInt {
    if x.abs() <= *one {
        return atan_small(x, one);
    }
    let half_pi = pi(work).value / 2u32;
    let reduced = atan_small(&(one * one / x), one);
    if x.is_positive() { half_pi - reduced } else { -half_pi - reduced }
}

pub fn atan(x: &BigInt, scale: u32) -> BigInt {
    let work = scale + 10;
    let one = pow10(work);
    atan_fixed(&(x * pow10(10)), &one, work) / pow10(10)
}

/// Angle of the point `(x, y)` in `(-pi, pi]`; zero at the origin.
pub fn atan2(y: &BigInt, x: &BigInt, scale: u32) -> BigInt {
    let work = scale + 10;
    let one = pow10(work);
    let pi = pi(work).value;
    let angle = if x.is_zero() {
        if y.is_zero() {
            BigInt::zero()
        } else if y.is_positive() {
            pi / 2u32
        } else {
            -(pi / 2u32)
        }
    } else {
        let base = atan_fixed(&(y * &one / x), &one, work);
        if x.is_positive() {
            base
        } else if y.is_negative() {
            base - pi
        } else {
            base + pi
        }
    };
    angle / pow10(10)
}
