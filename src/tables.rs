//! Lazily-initialized, process-lifetime-immutable lookup tables.
//!
//! Every table here is a direct corollary of [`crate::codec::decode`] and
//! [`crate::codec::encode`]: none of the sentinel rules in `spec.md` §3
//! need special-casing at build time, because NaR decodes to `f64::NAN`
//! and IEEE-754 already propagates `NaN`/`±∞` the way the P8 sentinel
//! rules require — `encode` then folds that back to [`crate::codec::NAR`].
//! Building the tables is therefore just running the codec 256 (or
//! 65,536) times and caching the result.

use crate::codec::{decode, encode, NAR, ZERO};
use std::sync::OnceLock;

/// Number of bytes occupied by all tables together: `256*8 + 3*256 + 4*65536`.
pub const FOOTPRINT_BYTES: usize = 256 * 8 + 3 * 256 + 4 * 65536;

/// The complete set of precomputed P8 lookup tables.
pub struct Tables {
    /// `to_double[p] == decode(p)`, with `to_double[NAR]` a quiet NaN.
    pub to_double: [f64; 256],
    /// Negation via two's complement.
    pub neg: [u8; 256],
    /// Absolute value.
    pub abs: [u8; 256],
    /// Reciprocal; `recip[ZERO] == recip[NAR] == NAR`.
    pub recip: [u8; 256],
    /// `add[a][b] == encode(decode(a) + decode(b))`.
    pub add: Box<[[u8; 256]; 256]>,
    /// `sub[a][b] == encode(decode(a) - decode(b))`.
    pub sub: Box<[[u8; 256]; 256]>,
    /// `mul[a][b] == encode(decode(a) * decode(b))`.
    pub mul: Box<[[u8; 256]; 256]>,
    /// `div[a][b] == encode(decode(a) / decode(b))`.
    pub div: Box<[[u8; 256]; 256]>,
}

static TABLES: OnceLock<Tables> = OnceLock::new();

/// Return the process-wide table set, building it on first use.
///
/// Concurrent first-use is safe: [`OnceLock`] guarantees exactly one
/// build runs and every caller observes the same, fully-initialized
/// tables — no torn reads are possible.
pub fn tables() -> &'static Tables {
    TABLES.get_or_init(build)
}

fn build() -> Tables {
    let mut to_double = [0.0f64; 256];
    for (p, slot) in to_double.iter_mut().enumerate() {
        *slot = decode(p as u8);
    }

    let mut neg = [0u8; 256];
    let mut abs = [0u8; 256];
    let mut recip = [0u8; 256];
    for p in 0u16..256 {
        let p = p as u8;
        neg[p as usize] = crate::codec::negate_octet(p);
        abs[p as usize] = if p & 0x80 != 0 {
            crate::codec::negate_octet(p)
        } else {
            p
        };
        recip[p as usize] = encode(1.0 / to_double[p as usize]);
    }

    let mut add = Box::new([[0u8; 256]; 256]);
    let mut sub = Box::new([[0u8; 256]; 256]);
    let mut mul = Box::new([[0u8; 256]; 256]);
    let mut div = Box::new([[0u8; 256]; 256]);
    for a in 0u16..256 {
        for b in 0u16..256 {
            let (a, b) = (a as u8, b as u8);
            let (da, db) = (to_double[a as usize], to_double[b as usize]);
            add[a as usize][b as usize] = encode(da + db);
            sub[a as usize][b as usize] = encode(da - db);
            mul[a as usize][b as usize] = encode(da * db);
            div[a as usize][b as usize] = encode(da / db);
        }
    }

    tracing::debug!(
        footprint_bytes = FOOTPRINT_BYTES,
        "built P8 lookup tables (decode, neg/abs/recip, add/sub/mul/div)"
    );

    Tables {
        to_double,
        neg,
        abs,
        recip,
        add,
        sub,
        mul,
        div,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn to_double_matches_decode() {
        let t = tables();
        for p in 0u16..256 {
            let p = p as u8;
            if p == NAR {
                assert!(t.to_double[p as usize].is_nan());
            } else {
                assert_eq!(t.to_double[p as usize], decode(p));
            }
        }
    }

    #[test]
    fn sentinel_rules() {
        let t = tables();
        assert_eq!(t.neg[ZERO as usize], ZERO);
        assert_eq!(t.neg[NAR as usize], NAR);
        assert_eq!(t.abs[NAR as usize], NAR);
        assert_eq!(t.recip[ZERO as usize], NAR);
        assert_eq!(t.recip[NAR as usize], NAR);

        for p in 0u16..256 {
            let p = p as u8;
            assert_eq!(t.add[NAR as usize][p as usize], NAR);
            assert_eq!(t.add[p as usize][NAR as usize], NAR);
            assert_eq!(t.mul[NAR as usize][p as usize], NAR);
            assert_eq!(t.div[p as usize][ZERO as usize], NAR);
        }
    }

    #[test]
    fn identity_and_annihilator() {
        let t = tables();
        for p in 0u16..256 {
            let p = p as u8;
            if p != NAR {
                assert_eq!(t.add[p as usize][ZERO as usize], p);
                assert_eq!(t.mul[p as usize][ZERO as usize], ZERO);
            }
        }
    }

    #[test]
    fn footprint_matches_spec() {
        assert_eq!(FOOTPRINT_BYTES, 264_960);
    }
}
