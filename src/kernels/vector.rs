//! Elementwise vector addition.

use crate::error::{PositError, Result};
use crate::ops;

/// Elementwise `out[i] = add(a[i], b[i])`.
///
/// `a`, `b`, and `out` must all have the same length; otherwise this
/// fails with [`PositError::DimensionMismatch`] and `out` is left
/// untouched.
pub fn add_vector(a: &[u8], b: &[u8], out: &mut [u8]) -> Result<()> {
    if a.len() != b.len() {
        return Err(PositError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    if out.len() != a.len() {
        return Err(PositError::DimensionMismatch {
            expected: a.len(),
            actual: out.len(),
        });
    }

    for ((x, y), o) in a.iter().zip(b.iter()).zip(out.iter_mut()) {
        *o = ops::add(*x, *y);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode;
    use pretty_assertions::assert_eq;

    #[test]
    fn adds_elementwise() {
        let a = [encode(1.0), encode(2.0), encode(3.0)];
        let b = [encode(10.0), encode(20.0), encode(30.0)];
        let mut out = [0u8; 3];
        add_vector(&a, &b, &mut out).unwrap();
        assert_eq!(out, [encode(11.0), encode(22.0), encode(33.0)]);
    }

    #[test]
    fn rejects_length_mismatch() {
        let a = [encode(1.0), encode(2.0)];
        let b = [encode(1.0)];
        let mut out = [0u8; 2];
        let err = add_vector(&a, &b, &mut out).unwrap_err();
        assert_eq!(
            err,
            PositError::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn rejects_output_length_mismatch() {
        let a = [encode(1.0), encode(2.0)];
        let b = [encode(1.0), encode(2.0)];
        let mut out = [0u8; 1];
        assert!(add_vector(&a, &b, &mut out).is_err());
    }
}
