//! Alternative schedulers for the dense `matmul` grid.
//!
//! `matmul` is a pure function over a grid index (`spec.md` §9): the
//! sequential reference kernel in [`crate::kernels::matmul`], the
//! `rayon`-backed [`parallel::matmul_parallel`], and the
//! [`device::DeviceBackend`] trait are three ways to visit the same
//! `m x n` grid without changing the per-element numerical contract.

#[cfg(feature = "parallel")]
pub mod parallel;

pub mod device;

#[cfg(feature = "parallel")]
pub use parallel::matmul_parallel;
