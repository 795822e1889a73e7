//! Data-parallel dense matrix multiply.
//!
//! Same numerical contract as [`crate::kernels::matmul`], fanned across
//! a `rayon` thread pool by output row. The only shared state is the
//! immutable `to_double` table (safe for unsynchronized concurrent
//! reads once built) and the three caller-owned buffers: `a` and `b`
//! are read-only, `c` is partitioned into disjoint per-row slices so no
//! two lanes ever write the same element. The call blocks until every
//! lane has joined.

use crate::error::Result;
use crate::kernels::matmul::{element, validate_dims};
use rayon::prelude::*;

/// Identical contract to [`crate::kernels::matmul::matmul`], computed
/// with one `rayon` task per output row.
pub fn matmul_parallel(a: &[u8], b: &[u8], c: &mut [u8], m: usize, k: usize, n: usize) -> Result<()> {
    validate_dims(a.len(), b.len(), c.len(), m, k, n)?;

    tracing::debug!(m, k, n, "launching parallel matmul across rayon lanes");

    c.par_chunks_mut(n).enumerate().for_each(|(i, row)| {
        for (j, out) in row.iter_mut().enumerate() {
            *out = element(a, b, i, j, k, n);
        }
    });

    Ok(())
}
