//! Calculator operations shared by the subcommands and the REPL.

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, anyhow, bail};
use clap::ValueEnum;
use serde::Serialize;

use numeris_core::config;
use numeris_core::val::{parse, promote};
use numeris_core::{Number, NumericKind, PrecisionContext, Real, RoundingMode, Sign};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl FromStr for BinaryOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" => Ok(BinaryOp::Add),
            "-" => Ok(BinaryOp::Sub),
            "*" | "x" => Ok(BinaryOp::Mul),
            "/" => Ok(BinaryOp::Div),
            "^" | "**" => Ok(BinaryOp::Pow),
            other => Err(format!("unknown operator {other:?}, expected one of + - * / ^")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum UnaryOp {
    Sqrt,
    Inverse,
    Negate,
    Magnitude,
    Sign,
    Exp,
    Ln,
    Sin,
    Cos,
}

impl FromStr for UnaryOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <UnaryOp as ValueEnum>::from_str(s, true)
    }
}

/// What an operation produced.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub(crate) enum Outcome {
    Value(Number),
    Sign { sign: Sign },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Value(n) => write!(f, "{n}"),
            Outcome::Sign { sign } => write!(f, "{sign}"),
        }
    }
}

pub(crate) fn value(text: &str) -> anyhow::Result<Number> {
    parse(text).with_context(|| format!("invalid number {text:?}"))
}

pub(crate) fn binary(lhs: &Number, op: BinaryOp, rhs: &Number) -> anyhow::Result<Number> {
    let result = match op {
        BinaryOp::Add => lhs.add(rhs),
        BinaryOp::Sub => lhs.subtract(rhs),
        BinaryOp::Mul => lhs.multiply(rhs),
        BinaryOp::Div => lhs.divide(rhs),
        BinaryOp::Pow => lhs.pow(exponent(rhs)?),
    };
    Ok(result?)
}

fn exponent(n: &Number) -> anyhow::Result<i64> {
    let Some(int) = n.as_integer() else {
        bail!("exponent must be an Integer, got {} {n}", n.kind());
    };
    i64::try_from(int.value()).map_err(|_| anyhow!("exponent {n} is out of range"))
}

/// Transcendental functions run on Reals; exact Rationals are rounded to the
/// default context first when they have no terminating expansion.
fn as_real(n: &Number) -> anyhow::Result<Real> {
    let ctx = n.precision().or(config::current().default_context());
    match promote(n, NumericKind::Real, ctx)? {
        Number::Real(x) => Ok(x),
        other => bail!("{other} is not a Real"),
    }
}

pub(crate) fn unary(op: UnaryOp, n: &Number) -> anyhow::Result<Outcome> {
    let value = match op {
        UnaryOp::Sqrt => n.sqrt()?,
        UnaryOp::Inverse => n.inverse()?,
        UnaryOp::Negate => n.negate()?,
        UnaryOp::Magnitude => n.magnitude()?,
        UnaryOp::Sign => return Ok(Outcome::Sign { sign: n.sign()? }),
        UnaryOp::Exp => Number::Real(as_real(n)?.exp()?),
        UnaryOp::Ln => Number::Real(as_real(n)?.ln()?),
        UnaryOp::Sin => Number::Real(as_real(n)?.sin()?),
        UnaryOp::Cos => Number::Real(as_real(n)?.cos()?),
    };
    Ok(Outcome::Value(value))
}

pub(crate) fn constant(name: &str, digits: u32, rounding: RoundingMode, negative: bool) -> anyhow::Result<Number> {
    let sign = if negative { Sign::Negative } else { Sign::Positive };
    let ctx = PrecisionContext::new(digits, rounding);
    Ok(numeris_core::instantiate_constant_signed(name, ctx, sign)?)
}

/// Everything worth knowing about a single value.
#[derive(Debug, Serialize)]
pub(crate) struct Info {
    value: Number,
    simplified: Number,
    coercible_to: Vec<NumericKind>,
}

pub(crate) fn info(n: &Number) -> Info {
    Info {
        value: n.clone(),
        simplified: n.simplify(),
        coercible_to: NumericKind::ALL.into_iter().filter(|k| n.is_coercible_to(*k)).collect(),
    }
}

impl fmt::Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<String> = self.coercible_to.iter().map(ToString::to_string).collect();
        writeln!(f, "value:        {}", self.value)?;
        writeln!(f, "kind:         {}", self.value.kind())?;
        writeln!(f, "exact:        {}", self.value.is_exact())?;
        writeln!(f, "precision:    {}", self.value.precision())?;
        writeln!(f, "simplified:   {} ({})", self.simplified, self.simplified.kind())?;
        write!(f, "coercible to: {}", kinds.join(", "))
    }
}

/// Evaluates one line of calculator input: `VALUE`, `OP VALUE` or
/// `LHS OP RHS`, tokens separated by whitespace.
pub(crate) fn evaluate_line(line: &str) -> anyhow::Result<Outcome> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [single] => Ok(Outcome::Value(value(single)?)),
        [op, operand] => {
            let op: UnaryOp = op.parse().map_err(|err: String| anyhow!(err))?;
            unary(op, &value(operand)?)
        }
        [lhs, op, rhs] => {
            let op: BinaryOp = op.parse().map_err(|err: String| anyhow!(err))?;
            Ok(Outcome::Value(binary(&value(lhs)?, op, &value(rhs)?)?))
        }
        _ => bail!("expected `VALUE`, `OP VALUE` or `LHS OP RHS` separated by spaces"),
    }
}
