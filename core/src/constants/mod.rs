//! Named mathematical constants generated to any finite precision.

mod catalog;
mod registry;


pub use crate::math::Approx;
pub use registry::{ConstantDef, ConstantRegistry, Generator, global};
