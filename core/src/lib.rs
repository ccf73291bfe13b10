pub mod config;
pub mod constants;
pub mod ctx;
pub mod error;
mod math;
pub mod typ;
pub mod val;


pub use ctx::{PrecisionContext, RoundingMode};
pub use error::{ArithmeticError, NumericError, Result};
pub use typ::{NumericHierarchy, NumericKind};
pub use val::{Complex, Integer, Number, Ordered, Rational, Real, Sign};

/// Named constant from the global registry, positive branch.
pub fn instantiate_constant(name: &str, ctx: PrecisionContext) -> Result<Number> {
    constants::global().instantiate(name, ctx)
}

pub fn instantiate_constant_signed(name: &str, ctx: PrecisionContext, sign: Sign) -> Result<Number> {
    constants::global().instantiate_signed(name, ctx, sign)
}

/// Canonical names of the built-in constants.
pub fn constant_names() -> Vec<&'static str> {
    constants::global().names()
}
