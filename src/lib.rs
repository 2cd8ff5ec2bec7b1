#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    missing_docs,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused_qualifications
)]
#![cfg_attr(not(test), warn(clippy::unwrap_used, clippy::indexing_slicing))]

extern crate alloc;

mod curve;
mod ecdsa;
mod field;
mod tools;
mod uint;

#[cfg(any(test, feature = "dev"))]
pub mod dev;

// Some re-exports to avoid the need for version-matching
pub use crypto_bigint;
pub use signature;

pub use curve::{Curve, CurveError, CurveForm, Group, GroupError, Point};
pub use ecdsa::{sign, verify, KeyPair, Signature, SigningError, SigningKey, VerifyingKey};
pub use field::{FieldError, Modulus};
pub use uint::Scalar;
