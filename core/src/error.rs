use std::fmt;

use thiserror::Error;

use crate::typ::NumericKind;
use crate::val::Sign;

pub type Result<T> = std::result::Result<T, NumericError>;

/// Mathematically undefined operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArithmeticError {
    DivisionByZero,
    /// Sign or ordering requested on a kind without a total order.
    UndefinedSign,
    /// `RoundingMode::Unnecessary` met a result that needs rounding.
    RoundingNecessary,
    Domain(String),
}

impl fmt::Display for ArithmeticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArithmeticError::DivisionByZero => write!(f, "division by zero"),
            ArithmeticError::UndefinedSign => write!(f, "complex numbers have no sign or ordering"),
            ArithmeticError::RoundingNecessary => write!(f, "rounding necessary but forbidden by context"),
            ArithmeticError::Domain(msg) => write!(f, "{msg}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumericError {
    #[error("cannot coerce {value} from {from} to {to}: {reason}")]
    Coercion {
        value: String,
        from: NumericKind,
        to: NumericKind,
        reason: String,
    },
    #[error("arithmetic error: {0}")]
    Arithmetic(ArithmeticError),
    #[error("cannot parse {input:?} as {expected}: {reason}")]
    Parse {
        input: String,
        expected: String,
        reason: String,
    },
    #[error("no constant named {0:?}")]
    NotFound(String),
    #[error("constant {name:?} is not available at {requested}: {reason}")]
    UnsupportedPrecision {
        name: String,
        requested: String,
        reason: String,
    },
    #[error("constant {name:?} has no {sign} branch")]
    UnsupportedBranch { name: String, sign: Sign },
}

impl NumericError {
    pub(crate) fn parse(input: &str, expected: impl fmt::Display, reason: impl Into<String>) -> Self {
        NumericError::Parse {
            input: input.to_string(),
            expected: expected.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn coercion(value: impl fmt::Display, from: NumericKind, to: NumericKind, reason: impl Into<String>) -> Self {
        NumericError::Coercion {
            value: value.to_string(),
            from,
            to,
            reason: reason.into(),
        }
    }

    pub(crate) fn division_by_zero() -> Self {
        NumericError::Arithmetic(ArithmeticError::DivisionByZero)
    }

    pub(crate) fn domain(msg: impl Into<String>) -> Self {
        NumericError::Arithmetic(ArithmeticError::Domain(msg.into()))
    }

    pub fn is_coercion(&self) -> bool {
        matches!(self, NumericError::Coercion { .. })
    }

    pub fn is_arithmetic(&self) -> bool {
        matches!(self, NumericError::Arithmetic(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, NumericError::Parse { .. })
    }
}

impl From<ArithmeticError> for NumericError {
    fn from(err: ArithmeticError) -> Self {
        NumericError::Arithmetic(err)
    }
}
