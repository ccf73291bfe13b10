use std::fmt;
use std::str::FromStr;

use crate::ctx::PrecisionContext;
use crate::error::{NumericError, Result};
use crate::typ::NumericKind;

use super::{Ordered, Real, Sign};

/// Complex number with Real components, kept in the form it was built in.
///
/// Products, quotients, powers and roots of polar values stay polar, with
/// their arguments brought back into `[-pi, pi)`; every other operation goes
/// through the rectangular form.
#[derive(Clone, Debug)]
pub enum Complex {
    Rectangular { re: Real, im: Real },
    Polar { modulus: Real, argument: Real },
}

fn two() -> Real {
    Real::new(2, 0)
}

impl Complex {
    pub fn new(re: Real, im: Real) -> Self {
        Complex::Rectangular { re, im }
    }

    pub fn polar(modulus: Real, argument: Real) -> Result<Self> {
        if modulus.is_negative() {
            return Err(NumericError::domain(format!("polar modulus {modulus} is negative")));
        }
        Ok(Complex::Polar { modulus, argument })
    }

    /// `re + 0i`, the zero sharing the context of `re`.
    pub fn from_real(re: Real) -> Self {
        let im = Real::zero(re.context());
        Complex::Rectangular { re, im }
    }

    /// `i` or `-i`, exact.
    pub fn unit(sign: Sign) -> Self {
        let im = if sign == Sign::Negative { -1 } else { 1 };
        Complex::new(Real::new(0, 0), Real::new(im, 0))
    }

    pub fn is_polar(&self) -> bool {
        matches!(self, Complex::Polar { .. })
    }

    fn components(&self) -> (&Real, &Real) {
        match self {
            Complex::Rectangular { re, im } => (re, im),
            Complex::Polar { modulus, argument } => (modulus, argument),
        }
    }

    pub fn is_exact(&self) -> bool {
        let (a, b) = self.components();
        a.is_exact() && b.is_exact()
    }

    pub fn context(&self) -> PrecisionContext {
        let (a, b) = self.components();
        a.context().combine(b.context())
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Complex::Rectangular { re, im } => re.is_zero() && im.is_zero(),
            Complex::Polar { modulus, .. } => modulus.is_zero(),
        }
    }

    /// The value as a Real when its imaginary part is an exact zero.
    pub(crate) fn exact_real(&self) -> Option<Real> {
        match self {
            Complex::Rectangular { re, im } if im.is_zero() && im.is_exact() => Some(re.clone()),
            Complex::Polar { modulus, .. } if modulus.is_zero() && modulus.is_exact() => {
                Some(Real::zero(modulus.context()))
            }
            Complex::Polar { modulus, argument } if argument.is_zero() && argument.is_exact() => Some(modulus.clone()),
            _ => None,
        }
    }

    fn rectangular_parts(&self) -> Result<(Real, Real)> {
        match self {
            Complex::Rectangular { re, im } => Ok((re.clone(), im.clone())),
            Complex::Polar { modulus, argument } => {
                if modulus.is_zero() || argument.is_zero() {
                    let exact = if modulus.is_zero() { modulus.is_exact() } else { argument.is_exact() };
                    return Ok((modulus.clone(), Real::zero(self.context()).with_exactness(exact)));
                }
                let re = modulus.multiply(&argument.cos()?)?;
                let im = modulus.multiply(&argument.sin()?)?;
                Ok((re, im))
            }
        }
    }

    fn polar_parts(&self) -> Result<(Real, Real)> {
        match self {
            Complex::Polar { modulus, argument } => Ok((modulus.clone(), argument.clone())),
            Complex::Rectangular { re, im } => Ok((self.magnitude()?, Real::atan2(im, re)?)),
        }
    }

    pub fn real(&self) -> Result<Real> {
        Ok(self.rectangular_parts()?.0)
    }

    pub fn imaginary(&self) -> Result<Real> {
        Ok(self.rectangular_parts()?.1)
    }

    /// `|z|`, exact whenever the components make it so (`3+4i` gives `5`).
    pub fn magnitude(&self) -> Result<Real> {
        match self {
            Complex::Polar { modulus, .. } => Ok(modulus.clone()),
            Complex::Rectangular { re, im } => re.multiply(re)?.add(&im.multiply(im)?)?.sqrt(),
        }
    }

    pub fn argument(&self) -> Result<Real> {
        Ok(self.polar_parts()?.1)
    }

    pub fn to_rectangular(&self) -> Result<Complex> {
        let (re, im) = self.rectangular_parts()?;
        Ok(Complex::Rectangular { re, im })
    }

    pub fn to_polar(&self) -> Result<Complex> {
        let (modulus, argument) = self.polar_parts()?;
        Ok(Complex::Polar { modulus, argument })
    }

    pub fn conjugate(&self) -> Complex {
        match self {
            Complex::Rectangular { re, im } => Complex::Rectangular {
                re: re.clone(),
                im: im.negate(),
            },
            Complex::Polar { modulus, argument } => Complex::Polar {
                modulus: modulus.clone(),
                argument: argument.negate(),
            },
        }
    }

    pub fn add(&self, other: &Complex) -> Result<Complex> {
        let ((a, b), (c, d)) = (self.rectangular_parts()?, other.rectangular_parts()?);
        Ok(Complex::new(a.add(&c)?, b.add(&d)?))
    }

    pub fn subtract(&self, other: &Complex) -> Result<Complex> {
        let ((a, b), (c, d)) = (self.rectangular_parts()?, other.rectangular_parts()?);
        Ok(Complex::new(a.subtract(&c)?, b.subtract(&d)?))
    }

    pub fn multiply(&self, other: &Complex) -> Result<Complex> {
        if let (Complex::Polar { modulus: r1, argument: t1 }, Complex::Polar { modulus: r2, argument: t2 }) = (self, other) {
            return Ok(Complex::Polar {
                modulus: r1.multiply(r2)?,
                argument: t1.add(t2)?.principal_angle()?,
            });
        }
        let ((a, b), (c, d)) = (self.rectangular_parts()?, other.rectangular_parts()?);
        let re = a.multiply(&c)?.subtract(&b.multiply(&d)?)?;
        let im = a.multiply(&d)?.add(&b.multiply(&c)?)?;
        Ok(Complex::new(re, im))
    }

    pub fn divide(&self, other: &Complex) -> Result<Complex> {
        if other.is_zero() {
            return Err(NumericError::division_by_zero());
        }
        if let (Complex::Polar { modulus: r1, argument: t1 }, Complex::Polar { modulus: r2, argument: t2 }) = (self, other) {
            return Ok(Complex::Polar {
                modulus: r1.divide(r2)?,
                argument: t1.subtract(t2)?.principal_angle()?,
            });
        }
        let ((a, b), (c, d)) = (self.rectangular_parts()?, other.rectangular_parts()?);
        let den = c.multiply(&c)?.add(&d.multiply(&d)?)?;
        let re = a.multiply(&c)?.add(&b.multiply(&d)?)?.divide(&den)?;
        let im = b.multiply(&c)?.subtract(&a.multiply(&d)?)?.divide(&den)?;
        Ok(Complex::new(re, im))
    }

    pub fn pow(&self, exponent: i64) -> Result<Complex> {
        if exponent < 0 && self.is_zero() {
            return Err(NumericError::division_by_zero());
        }
        if let Complex::Polar { modulus, argument } = self {
            return Ok(Complex::Polar {
                modulus: modulus.pow(exponent)?,
                argument: argument.multiply(&Real::new(exponent, 0))?.principal_angle()?,
            });
        }
        let ctx = self.context();
        let mut result = Complex::new(Real::one(ctx), Real::zero(ctx));
        let mut base = self.clone();
        let mut exp = exponent.unsigned_abs();
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.multiply(&base)?;
            }
            exp >>= 1;
            if exp > 0 {
                base = base.multiply(&base)?;
            }
        }
        if exponent < 0 { result.inverse() } else { Ok(result) }
    }

    /// Principal square root: the root with a non-negative real part.
    pub fn sqrt(&self) -> Result<Complex> {
        match self {
            Complex::Polar { modulus, argument } => Ok(Complex::Polar {
                modulus: modulus.sqrt()?,
                argument: argument.principal_angle()?.divide(&two())?,
            }),
            Complex::Rectangular { re, im } if im.is_zero() => {
                let zero = Real::zero(self.context()).with_exactness(im.is_exact());
                if re.is_negative() {
                    Ok(Complex::new(zero, re.negate().sqrt()?))
                } else {
                    Ok(Complex::new(re.sqrt()?, zero))
                }
            }
            Complex::Rectangular { re, im } => {
                let m = self.magnitude()?;
                let a = m.add(re)?.divide(&two())?.sqrt()?;
                let b = m.subtract(re)?.divide(&two())?.sqrt()?;
                let b = if im.is_negative() { b.negate() } else { b };
                Ok(Complex::new(a, b))
            }
        }
    }

    pub fn inverse(&self) -> Result<Complex> {
        let ctx = self.context();
        let one = match self {
            Complex::Polar { .. } => Complex::Polar {
                modulus: Real::one(ctx),
                argument: Real::zero(ctx),
            },
            Complex::Rectangular { .. } => Complex::from_real(Real::one(ctx)),
        };
        one.divide(self)
    }

    pub fn negate(&self) -> Result<Complex> {
        let (re, im) = self.rectangular_parts()?;
        Ok(Complex::new(re.negate(), im.negate()))
    }
}

/// Same-form values compare componentwise; mixed forms compare rectangularly.
impl PartialEq for Complex {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Complex::Rectangular { re: a, im: b }, Complex::Rectangular { re: c, im: d })
            | (Complex::Polar { modulus: a, argument: b }, Complex::Polar { modulus: c, argument: d }) => {
                a.compare(c).is_eq() && b.compare(d).is_eq()
            }
            _ => match (self.rectangular_parts(), other.rectangular_parts()) {
                (Ok((a, b)), Ok((c, d))) => a == c && b == d,
                _ => false,
            },
        }
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Complex::Rectangular { re, im } if im.is_negative() => {
                let magnitude = im.negate();
                write!(f, "{}-{}i", re.as_component(), magnitude.as_component())
            }
            Complex::Rectangular { re, im } => write!(f, "{}+{}i", re.as_component(), im.as_component()),
            Complex::Polar { modulus, argument } => {
                write!(f, "{}∠{}", modulus.as_component(), argument.as_component())
            }
        }
    }
}

fn component(text: &str, whole: &str) -> Result<Real> {
    text.parse::<Real>()
        .map_err(|_| NumericError::parse(whole, NumericKind::Complex, format!("bad component {text:?}")))
}

/// Coefficient of `i`: empty or a bare sign means one.
fn imaginary_component(text: &str, whole: &str) -> Result<Real> {
    match text {
        "" | "+" => Ok(Real::new(1, 0)),
        "-" => Ok(Real::new(-1, 0)),
        _ => component(text, whole),
    }
}

/// Byte offset of the sign separating the real and imaginary parts.
fn split_point(body: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    (1..bytes.len())
        .rev()
        .find(|&at| matches!(bytes[at], b'+' | b'-') && !matches!(bytes[at - 1], b'e' | b'E'))
}

impl FromStr for Complex {
    type Err = NumericError;

    /// Rectangular (`2+3i`, `-1.5i`, `i`), polar (`2∠0.5`, `2@0.5`) or a
    /// bare real literal.
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        if let Some((modulus, argument)) = text.split_once('∠').or_else(|| text.split_once('@')) {
            return Complex::polar(component(modulus.trim(), s)?, component(argument.trim(), s)?);
        }
        let Some(body) = text.strip_suffix('i') else {
            return Ok(Complex::from_real(component(text, s)?));
        };
        match split_point(body) {
            Some(at) => Ok(Complex::new(component(&body[..at], s)?, imaginary_component(&body[at..], s)?)),
            None => Ok(Complex::new(Real::new(0, 0), imaginary_component(body, s)?)),
        }
    }
}
