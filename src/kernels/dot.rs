//! Dot product over two P8 vectors.

use crate::error::{PositError, Result};
use crate::ops;
use crate::tables::tables;

/// Dot product of two same-length P8 vectors, accumulated in `f64`.
///
/// Each pair is decoded through `to_double` and the products are
/// summed sequentially in binary64; no intermediate re-encoding to P8
/// occurs, so the result is exact for the given summation order
/// (`spec.md` §4.4, §8.9).
pub fn dot_product(a: &[u8], b: &[u8]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(PositError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let to_double = &tables().to_double;
    let mut acc = 0.0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        acc += to_double[x as usize] * to_double[y as usize];
    }
    Ok(acc)
}

/// Lower-accuracy dot product that stays entirely inside the P8
/// domain, using the `mul`/`add` tables instead of a binary64
/// accumulator.
///
/// `spec.md` §4.4 permits this as a peak-throughput alternative to
/// [`dot_product`]; it re-quantizes after every multiply-add, so it is
/// strictly lower-accuracy and is not used by [`super::matmul::matmul`].
pub fn dot_product_p8(a: &[u8], b: &[u8]) -> Result<u8> {
    if a.len() != b.len() {
        return Err(PositError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let mut acc = 0x00u8; // P8 zero
    for (&x, &y) in a.iter().zip(b.iter()) {
        acc = ops::add(acc, ops::mul(x, y));
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode;
    use pretty_assertions::assert_eq;

    #[test]
    fn example_from_spec() {
        let a: Vec<u8> = [1.0, 2.0, 3.0, 4.0, 5.0].iter().map(|x| encode(*x)).collect();
        let b: Vec<u8> = [2.0, 2.0, 2.0, 2.0, 2.0].iter().map(|x| encode(*x)).collect();
        let result = dot_product(&a, &b).unwrap();
        assert_eq!(result, 30.0);
    }

    #[test]
    fn exact_given_summation_order() {
        let a: Vec<u8> = (1..=8).map(|i| encode(i as f64)).collect();
        let b: Vec<u8> = (1..=8).map(|_| encode(1.0)).collect();
        let expected: f64 = a.iter().map(|&p| crate::codec::decode(p)).sum();
        assert_eq!(dot_product(&a, &b).unwrap(), expected);
    }

    #[test]
    fn rejects_length_mismatch() {
        let a = [encode(1.0)];
        let b = [encode(1.0), encode(2.0)];
        assert!(dot_product(&a, &b).is_err());
        assert!(dot_product_p8(&a, &b).is_err());
    }

    #[test]
    fn p8_variant_is_self_consistent() {
        let a = [encode(1.0), encode(2.0)];
        let b = [encode(3.0), encode(4.0)];
        let result = dot_product_p8(&a, &b).unwrap();
        assert_eq!(result, encode(11.0));
    }

    proptest::proptest! {
        #[test]
        fn prop_exact_for_any_length_and_order(a in proptest::collection::vec(0u8..=255, 0..16)) {
            let b: Vec<u8> = a.iter().map(|_| encode(1.0)).collect();
            let expected: f64 = a.iter().map(|&p| crate::codec::decode(p)).sum();
            let result = dot_product(&a, &b).unwrap();
            if expected.is_nan() {
                proptest::prop_assert!(result.is_nan());
            } else {
                proptest::prop_assert_eq!(result, expected);
            }
        }

        #[test]
        fn prop_rejects_any_length_mismatch(
            a in proptest::collection::vec(0u8..=255, 0..8),
            extra in proptest::collection::vec(0u8..=255, 1..8),
        ) {
            let mut b = a.clone();
            b.extend(extra);
            proptest::prop_assert!(dot_product(&a, &b).is_err());
            proptest::prop_assert!(dot_product_p8(&a, &b).is_err());
        }
    }
}
