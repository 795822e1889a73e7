//! Dense matrix multiply, sequential reference implementation.

use crate::error::{PositError, Result};
use crate::tables::tables;

/// Validate that `a`, `b`, and `c` have the lengths implied by `m x k
/// times k x n = m x n`. Fails before any write happens.
pub(crate) fn validate_dims(a_len: usize, b_len: usize, c_len: usize, m: usize, k: usize, n: usize) -> Result<()> {
    let expected_a = m * k;
    if a_len != expected_a {
        return Err(PositError::DimensionMismatch {
            expected: expected_a,
            actual: a_len,
        });
    }
    let expected_b = k * n;
    if b_len != expected_b {
        return Err(PositError::DimensionMismatch {
            expected: expected_b,
            actual: b_len,
        });
    }
    let expected_c = m * n;
    if c_len != expected_c {
        return Err(PositError::DimensionMismatch {
            expected: expected_c,
            actual: c_len,
        });
    }
    Ok(())
}

/// Compute one output element `C[i,j] = encode(Σ_t decode(A[i,t]) *
/// decode(B[t,j]))`, accumulating in `f64` with a fixed, deterministic
/// summation order (`t` ascending).
pub(crate) fn element(a: &[u8], b: &[u8], i: usize, j: usize, k: usize, n: usize) -> u8 {
    let to_double = &tables().to_double;
    let mut acc = 0.0f64;
    for t in 0..k {
        let av = to_double[a[i * k + t] as usize];
        let bv = to_double[b[t * n + j] as usize];
        acc += av * bv;
    }
    crate::codec::encode(acc)
}

/// Dense matrix multiply: `A` is `m x k`, `B` is `k x n`, `C` is `m x n`,
/// all flat row-major P8 byte buffers. All `k` multiply-adds for a
/// given output element accumulate in binary64; exactly one `encode`
/// call happens per output element.
///
/// Dimensions are validated against all three buffer lengths before any
/// write to `c`, so a [`PositError::DimensionMismatch`] never leaves a
/// partially-written output.
pub fn matmul(a: &[u8], b: &[u8], c: &mut [u8], m: usize, k: usize, n: usize) -> Result<()> {
    validate_dims(a.len(), b.len(), c.len(), m, k, n)?;

    for i in 0..m {
        for j in 0..n {
            c[i * n + j] = element(a, b, i, j, k, n);
        }
    }
    Ok(())
}
