//! Type aliases for the `crypto_bigint` backend.
//!
//! All field elements and scalars are fixed-width 256-bit integers, which
//! bounds the supported moduli at 256 bits. Montgomery representations are
//! used for modular multiplication; their parameters are precomputed once
//! per modulus in [`crate::field::Modulus`].

use crypto_bigint::{
    modular::{MontyForm, MontyParams},
    nlimbs, U256,
};

/// An unsigned integer in `[0, n)` for the active field modulus `n`.
pub type Scalar = U256;

pub(crate) type ScalarMod = MontyForm<{ nlimbs!(256) }>;
pub(crate) type ScalarMontyParams = MontyParams<{ nlimbs!(256) }>;
