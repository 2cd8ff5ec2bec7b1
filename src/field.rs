//! Arithmetic over the prime field `Z/nZ`.
//!
//! Elements are canonical representatives in `[0, n)`. Multiplicative
//! operations go through the backend's Montgomery representation, with the
//! per-modulus parameters precomputed once at construction. Inversion is the
//! backend's sub-quadratic Bézout-style algorithm, shared with the rest of
//! the numeric tooling; it is never a linear search.

use crypto_bigint::{Integer, Invert, NonZero, Odd, RandomMod};
use rand_core::CryptoRngCore;

use crate::uint::{Scalar, ScalarMod, ScalarMontyParams};

/// Errors of arithmetic over the prime field.
#[derive(displaydoc::Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// the modulus cannot define a prime field
    InvalidModulus,
    /// the element is not invertible modulo the field modulus
    NoInverse,
}

/// A field modulus with precomputed Montgomery parameters.
///
/// The modulus is assumed to be prime. Primality is a precondition and is
/// not verified; what is checked at construction is that the modulus is odd
/// (the Montgomery representation requires it, and every odd prime
/// qualifies) and greater than one.
#[derive(Clone, Copy, Debug)]
pub struct Modulus {
    modulus: Odd<Scalar>,
    monty: ScalarMontyParams,
}

impl PartialEq for Modulus {
    fn eq(&self, other: &Self) -> bool {
        self.modulus == other.modulus
    }
}

impl Eq for Modulus {}

impl Modulus {
    /// Wraps a modulus, rejecting values that cannot define a prime field.
    pub fn new(modulus: Scalar) -> Result<Self, FieldError> {
        if !bool::from(modulus.is_odd()) || modulus == Scalar::ONE {
            return Err(FieldError::InvalidModulus);
        }
        let modulus = Odd::new(modulus).expect("checked to be odd");
        let monty = ScalarMontyParams::new_vartime(modulus);
        Ok(Self { modulus, monty })
    }

    /// The modulus value.
    pub fn get(&self) -> &Scalar {
        self.modulus.as_ref()
    }

    fn as_nz(&self) -> &NonZero<Scalar> {
        self.modulus.as_nz_ref()
    }

    fn to_monty(&self, x: &Scalar) -> ScalarMod {
        ScalarMod::new(x, self.monty)
    }

    /// The canonical representative of `x` in `[0, n)`.
    pub fn reduce(&self, x: &Scalar) -> Scalar {
        x.rem(self.as_nz())
    }

    /// `x + y mod n`. Operands must be reduced.
    pub fn add(&self, x: &Scalar, y: &Scalar) -> Scalar {
        x.add_mod(y, self.get())
    }

    /// `x - y mod n`. Operands must be reduced.
    pub fn sub(&self, x: &Scalar, y: &Scalar) -> Scalar {
        x.sub_mod(y, self.get())
    }

    /// `-x mod n`. The operand must be reduced.
    pub fn neg(&self, x: &Scalar) -> Scalar {
        x.neg_mod(self.get())
    }

    /// `x * y mod n`. Operands must be reduced.
    pub fn mul(&self, x: &Scalar, y: &Scalar) -> Scalar {
        (self.to_monty(x) * self.to_monty(y)).retrieve()
    }

    /// `x² mod n`. The operand must be reduced.
    pub fn square(&self, x: &Scalar) -> Scalar {
        self.to_monty(x).square().retrieve()
    }

    /// The unique `y` with `x * y ≡ 1 (mod n)`.
    ///
    /// Fails when `gcd(x, n) ≠ 1`; for a prime modulus that means `x ≡ 0`.
    pub fn invert(&self, x: &Scalar) -> Result<Scalar, FieldError> {
        Option::<ScalarMod>::from(self.to_monty(x).invert())
            .map(|inv| inv.retrieve())
            .ok_or(FieldError::NoInverse)
    }

    /// A uniformly random element of `[0, n)`.
    pub fn random(&self, rng: &mut impl CryptoRngCore) -> Scalar {
        Scalar::random_mod(rng, self.as_nz())
    }

    /// A uniformly random element of `[lower, n)`.
    ///
    /// `lower` must be less than the modulus.
    pub fn random_from(&self, rng: &mut impl CryptoRngCore, lower: u64) -> Scalar {
        let lower = Scalar::from_u64(lower);
        let span = NonZero::new(self.get().wrapping_sub(&lower))
            .expect("the sampling lower bound is below the modulus");
        Scalar::random_mod(rng, &span).wrapping_add(&lower)
    }
}
