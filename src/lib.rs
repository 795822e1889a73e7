//! Arithmetic for P8: the 8-bit tapered (posit) floating-point format
//! with exponent-size parameter 1.
//!
//! This crate provides a bit-exact codec between a P8 octet and IEEE-754
//! `f64`, the four standard arithmetic operations plus negation,
//! absolute value, reciprocal and total ordering, and wide-accumulating
//! vector/matrix kernels that decode through `f64`, accumulate there,
//! and quantize back to P8 only at the sink.
//!
//! # Layout
//!
//! - [`codec`] — bit-level `decode`/`encode`, the hard part of the crate.
//! - [`tables`] — the 256- and 65,536-entry lookup tables built from the
//!   codec, lazily initialized once per process.
//! - [`ops`] — `O(1)` scalar operations backed by those tables.
//! - [`kernels`] — `add_vector`, `dot_product`, and dense `matmul`,
//!   accumulating in binary64.
//! - [`backend`] — alternative schedulers for the `matmul` grid: a
//!   `rayon`-backed data-parallel path (`parallel` feature) and a
//!   device back end contract (`device` feature).
//! - [`error`] — the out-of-band `PositError` type for dimension
//!   mismatches and device failures; in-band NaR propagation never
//!   raises a Rust-level error.
//!
//! # Quick start
//!
//! ```
//! use posit8::{codec, ops};
//!
//! let one = codec::encode(1.0);
//! let two = codec::encode(2.0);
//! assert_eq!(ops::add(one, one), two);
//! assert_eq!(codec::decode(two), 2.0);
//! ```
//!
//! # Non-goals
//!
//! No dynamic precision widths (P8 is fixed at 8 bits, exponent size
//! 1), no alternate exponent sizes, no subnormals or signed zero on the
//! P8 side, no exception flags, no user-selectable rounding modes.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod codec;
pub mod error;
pub mod kernels;
pub mod ops;
pub mod tables;

pub use codec::{decode, encode, NAR, ZERO};
pub use error::{PositError, Result};
pub use kernels::{add_vector, dot_product, dot_product_p8, matmul};
pub use ops::{abs, add, compare, div, mul, neg, recip, sub};

#[cfg(feature = "parallel")]
pub use backend::matmul_parallel;

/// Type alias for a P8 octet. Not a newtype: `spec.md` §6 is explicit
/// that the bare octet layout is the sole, normative wire format, and a
/// wrapper type would obscure that rather than express it.
pub type P8 = u8;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn public_api_matches_spec_scenarios() {
        assert_eq!(encode(0.0), ZERO);
        assert_eq!(encode(f64::NAN), NAR);
        assert_eq!(encode(f64::INFINITY), NAR);
        assert_eq!(encode(f64::NEG_INFINITY), NAR);

        let one = encode(1.0);
        let two = encode(2.0);
        let three = encode(3.0);
        let five = encode(5.0);
        let six = encode(6.0);
        let ten = encode(10.0);

        assert_eq!(add(one, one), two);
        assert_eq!(mul(two, three), six);
        assert_eq!(div(ten, two), five);
        assert_eq!(div(ten, ZERO), NAR);
    }

    #[test]
    fn dot_product_example() {
        let a: Vec<u8> = [1.0, 2.0, 3.0, 4.0, 5.0].iter().map(|x| encode(*x)).collect();
        let b: Vec<u8> = [2.0, 2.0, 2.0, 2.0, 2.0].iter().map(|x| encode(*x)).collect();
        assert_eq!(dot_product(&a, &b).unwrap(), 30.0);
    }

    #[test]
    fn matmul_example() {
        let a: Vec<u8> = [1.0, 2.0, 3.0, 4.0].iter().map(|x| encode(*x)).collect();
        let id: Vec<u8> = [1.0, 0.0, 0.0, 1.0].iter().map(|x| encode(*x)).collect();
        let mut c = vec![0u8; 4];
        matmul(&a, &id, &mut c, 2, 2, 2).unwrap();
        assert_eq!(c, a);

        let scale2: Vec<u8> = [2.0, 0.0, 0.0, 2.0].iter().map(|x| encode(*x)).collect();
        let mut c2 = vec![0u8; 4];
        matmul(&a, &scale2, &mut c2, 2, 2, 2).unwrap();
        let expected: Vec<u8> = [2.0, 4.0, 6.0, 8.0].iter().map(|x| encode(*x)).collect();
        assert_eq!(c2, expected);
    }
}
