//! Precision contexts: significant digits plus a rounding rule.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NumericError;

mod rounding;


pub use rounding::MAX_SCALE;
pub(crate) use rounding::{
    Rounded, check_scale, checked_pow10, decimal_digits, fit_quotient, pow10, round_enclosure, round_to_digits,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingMode {
    /// Away from zero.
    Up,
    /// Towards zero.
    Down,
    Ceiling,
    Floor,
    HalfUp,
    HalfDown,
    HalfEven,
    /// Any rounding is an error.
    Unnecessary,
}

impl RoundingMode {
    pub const ALL: [RoundingMode; 8] = [
        RoundingMode::Up,
        RoundingMode::Down,
        RoundingMode::Ceiling,
        RoundingMode::Floor,
        RoundingMode::HalfUp,
        RoundingMode::HalfDown,
        RoundingMode::HalfEven,
        RoundingMode::Unnecessary,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RoundingMode::Up => "up",
            RoundingMode::Down => "down",
            RoundingMode::Ceiling => "ceiling",
            RoundingMode::Floor => "floor",
            RoundingMode::HalfUp => "half-up",
            RoundingMode::HalfDown => "half-down",
            RoundingMode::HalfEven => "half-even",
            RoundingMode::Unnecessary => "unnecessary",
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RoundingMode {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        RoundingMode::ALL
            .into_iter()
            .find(|mode| mode.name() == normalized)
            .ok_or_else(|| NumericError::parse(s, "rounding mode", "expected one of up, down, ceiling, floor, half-up, half-down, half-even, unnecessary"))
    }
}

/// Significant digits and rounding rule governing inexact arithmetic.
///
/// `digits == 0` is the unlimited context: arithmetic stays exact and no
/// rounding ever happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PrecisionContext {
    digits: u32,
    rounding: RoundingMode,
}

impl PrecisionContext {
    pub const UNLIMITED: PrecisionContext = PrecisionContext {
        digits: 0,
        rounding: RoundingMode::HalfUp,
    };
    pub const DECIMAL32: PrecisionContext = PrecisionContext {
        digits: 7,
        rounding: RoundingMode::HalfEven,
    };
    pub const DECIMAL64: PrecisionContext = PrecisionContext {
        digits: 16,
        rounding: RoundingMode::HalfEven,
    };
    pub const DECIMAL128: PrecisionContext = PrecisionContext {
        digits: 34,
        rounding: RoundingMode::HalfEven,
    };

    pub const fn new(digits: u32, rounding: RoundingMode) -> Self {
        Self { digits, rounding }
    }

    /// `digits` significant digits, rounding half-up.
    pub const fn with_digits(digits: u32) -> Self {
        Self {
            digits,
            rounding: RoundingMode::HalfUp,
        }
    }

    pub fn digits(&self) -> Option<u32> {
        if self.digits == 0 { None } else { Some(self.digits) }
    }

    pub fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    pub fn is_unlimited(&self) -> bool {
        self.digits == 0
    }

    /// Context of a result computed from operands carrying `self` and `other`.
    ///
    /// A chain of computation is only as precise as its least precise input:
    /// the context with fewer digits wins, unlimited contexts impose nothing,
    /// and on a tie the left operand's rounding rule is kept.
    pub fn combine(self, other: PrecisionContext) -> PrecisionContext {
        match (self.digits(), other.digits()) {
            (None, _) => other,
            (_, None) => self,
            (Some(a), Some(b)) if b < a => other,
            _ => self,
        }
    }

    /// Same rounding rule with `extra` guard digits. Unlimited stays unlimited.
    pub fn widened(self, extra: u32) -> PrecisionContext {
        if self.is_unlimited() {
            self
        } else {
            PrecisionContext::new(self.digits.saturating_add(extra), self.rounding)
        }
    }

    /// `self` when limited, otherwise `fallback`.
    pub fn or(self, fallback: PrecisionContext) -> PrecisionContext {
        if self.is_unlimited() { fallback } else { self }
    }
}

impl Default for PrecisionContext {
    fn default() -> Self {
        PrecisionContext::UNLIMITED
    }
}

impl fmt::Display for PrecisionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.digits() {
            None => write!(f, "unlimited"),
            Some(d) => write!(f, "{d} digits ({})", self.rounding),
        }
    }
}
