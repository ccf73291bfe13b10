mod hierarchy;

#[cfg(test)]
mod hierarchy_test;

pub use hierarchy::{NumericHierarchy, NumericKind};
