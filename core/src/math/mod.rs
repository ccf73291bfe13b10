//! Fixed-point kernels. A fixed-point value `v` at scale `p` stands for
//! `v / 10^p`.

pub(crate) mod fixed;

#[cfg(test)]
mod fixed_test;

pub use fixed::Approx;
