//! Wide-accumulation kernels over P8 vectors and matrices.
//!
//! Every kernel here accumulates in `f64` and quantizes to P8 only at
//! the sink (`spec.md` §4.4): decoding every P8-sourced term once,
//! reducing in binary64, and encoding the final result exactly once
//! per output element. This sidesteps the double-rounding that would
//! occur if intermediate products were re-encoded to P8 on every step.
//!
//! Matrices and vectors are flat, row-major, caller-owned `&[u8]`
//! slices with no header and no dope vector; dimensions are supplied
//! alongside the data and validated before any write.

mod dot;
pub(crate) mod matmul;
mod vector;

pub use dot::{dot_product, dot_product_p8};
pub use matmul::matmul;
pub use vector::add_vector;
