//! ECDSA key generation, signing, and verification over a [`Group`].
//!
//! The hash is an external collaborator: any [`Digest`] implementation with
//! a 256-bit output (for example `sha2::Sha256`). Its output is reduced
//! modulo the field modulus before entering the signature equations.

use core::marker::PhantomData;

use digest::{consts::U32, Digest};
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};
use signature::{Error as SignatureError, RandomizedSigner, Verifier};

use crate::{
    curve::{CurveError, Group, Point},
    field::{FieldError, Modulus},
    tools::Secret,
    uint::Scalar,
};

/// Attempts at producing non-degenerate signature components before giving
/// up. Each attempt fails with probability about `2/n`, so the cap exists to
/// make the retry loop provably finite, not because exhaustion is reachable
/// with a sane modulus.
const MAX_SIGNING_ATTEMPTS: usize = 8;

/// Errors of signing.
#[derive(displaydoc::Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningError {
    /// every attempted nonce produced a degenerate signature component
    DegenerateSignature,
    /// curve arithmetic failed: {0}
    Arithmetic(CurveError),
}

impl From<CurveError> for SigningError {
    fn from(source: CurveError) -> Self {
        Self::Arithmetic(source)
    }
}

impl From<FieldError> for SigningError {
    fn from(source: FieldError) -> Self {
        Self::Arithmetic(CurveError::Field(source))
    }
}

/// An ECDSA signature.
///
/// Both components of a valid signature are non-zero; [`verify`] rejects
/// anything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    r: Scalar,
    s: Scalar,
}

impl Signature {
    /// Assembles a signature from its components, without validation.
    pub fn from_scalars(r: Scalar, s: Scalar) -> Self {
        Self { r, s }
    }

    /// The `r` component.
    pub fn r(&self) -> &Scalar {
        &self.r
    }

    /// The `s` component.
    pub fn s(&self) -> &Scalar {
        &self.s
    }
}

/// A secret scalar together with the public point derived from it.
#[derive(Clone, Debug)]
pub struct KeyPair {
    secret: Secret<Scalar>,
    public: Point,
}

impl KeyPair {
    /// Generates a key pair on `group`: the secret is drawn uniformly from
    /// `[2, n-1]`, the public point is the secret multiple of the generator.
    pub fn generate(rng: &mut impl CryptoRngCore, group: &Group) -> Result<Self, CurveError> {
        let secret = Secret::init_with(|| group.curve().field().random_from(rng, 2));
        let public = group.scalar_mult_base(secret.expose_secret())?;
        Ok(Self { secret, public })
    }

    /// Builds a key pair from an existing secret scalar, which must lie in
    /// `[2, n-1]`.
    pub fn from_secret(secret: Scalar, group: &Group) -> Result<Self, CurveError> {
        if secret < Scalar::from_u64(2) || &secret >= group.curve().modulus() {
            return Err(CurveError::ScalarOutOfRange);
        }
        let public = group.scalar_mult_base(&secret)?;
        Ok(Self {
            secret: Secret::init_with(|| secret),
            public,
        })
    }

    /// The public point.
    pub fn public(&self) -> &Point {
        &self.public
    }

    pub(crate) fn expose_secret(&self) -> &Scalar {
        self.secret.expose_secret()
    }
}

fn message_scalar<D>(message: &[u8], field: &Modulus) -> Scalar
where
    D: Digest<OutputSize = U32>,
{
    let digest = D::new().chain_update(message).finalize();
    field.reduce(&Scalar::from_be_slice(digest.as_slice()))
}

/// Signs `message` with `key` over `group`.
///
/// Each attempt draws a fresh ephemeral nonce from `rng`; nothing caches or
/// reuses nonces, since a repeated nonce under the same secret lets anyone
/// recover that secret from two signatures. Attempts that produce a zero
/// `r` or `s` are discarded and retried up to an internal cap.
pub fn sign<D>(
    rng: &mut impl CryptoRngCore,
    message: &[u8],
    key: &KeyPair,
    group: &Group,
) -> Result<Signature, SigningError>
where
    D: Digest<OutputSize = U32>,
{
    let field = group.curve().field();
    let h = message_scalar::<D>(message, field);
    for attempt in 0..MAX_SIGNING_ATTEMPTS {
        let nonce = Secret::init_with(|| field.random_from(rng, 1));
        match sign_with_nonce(&h, nonce.expose_secret(), key, group)? {
            Some(signature) => return Ok(signature),
            None => tracing::debug!(attempt, "degenerate signature component, retrying"),
        }
    }
    Err(SigningError::DegenerateSignature)
}

/// One signing attempt with an explicit nonce. Returns `None` when either
/// signature component degenerates to zero.
pub(crate) fn sign_with_nonce(
    h: &Scalar,
    nonce: &Scalar,
    key: &KeyPair,
    group: &Group,
) -> Result<Option<Signature>, SigningError> {
    let field = group.curve().field();
    let r = match group.scalar_mult_base(nonce)? {
        Point::Identity => return Ok(None),
        Point::Affine { x, .. } => x,
    };
    if r == Scalar::ZERO {
        return Ok(None);
    }
    let nonce_inv = field.invert(nonce)?;
    let s = field.mul(
        &nonce_inv,
        &field.add(h, &field.mul(&r, key.expose_secret())),
    );
    if s == Scalar::ZERO {
        return Ok(None);
    }
    Ok(Some(Signature { r, s }))
}

/// Verifies `signature` over `message` against a public point.
///
/// Total: returns `false` for every structurally well-formed but invalid
/// input, including out-of-range components and a public point off the
/// curve's group.
pub fn verify<D>(message: &[u8], signature: &Signature, public_key: &Point, group: &Group) -> bool
where
    D: Digest<OutputSize = U32>,
{
    let curve = group.curve();
    let field = curve.field();
    let n = field.get();
    let (r, s) = (&signature.r, &signature.s);
    if r == &Scalar::ZERO || s == &Scalar::ZERO || r >= n || s >= n {
        return false;
    }
    let h = message_scalar::<D>(message, field);
    let c = match field.invert(s) {
        Ok(c) => c,
        Err(_) => return false,
    };
    let u1 = field.mul(&h, &c);
    let u2 = field.mul(r, &c);
    let lhs = match group.scalar_mult_base(&u1) {
        Ok(point) => point,
        Err(_) => return false,
    };
    let rhs = match curve.scalar_mult(&u2, public_key) {
        Ok(point) => point,
        Err(_) => return false,
    };
    match curve.add(&lhs, &rhs) {
        Ok(Point::Affine { x, .. }) => &x == r,
        _ => false,
    }
}

/// The signing half of a key pair, bound to its group and digest.
#[derive(Clone, Debug)]
pub struct SigningKey<D> {
    key: KeyPair,
    group: Group,
    _digest: PhantomData<fn() -> D>,
}

impl<D> SigningKey<D>
where
    D: Digest<OutputSize = U32>,
{
    /// Binds an existing key pair to `group`.
    pub fn new(key: KeyPair, group: Group) -> Self {
        Self {
            key,
            group,
            _digest: PhantomData,
        }
    }

    /// Generates a fresh key pair on `group`.
    pub fn random(rng: &mut impl CryptoRngCore, group: Group) -> Result<Self, CurveError> {
        Ok(Self::new(KeyPair::generate(rng, &group)?, group))
    }

    /// The key pair.
    pub fn as_key_pair(&self) -> &KeyPair {
        &self.key
    }

    /// The corresponding verifying half.
    pub fn verifying_key(&self) -> VerifyingKey<D> {
        VerifyingKey {
            public: *self.key.public(),
            group: self.group,
            _digest: PhantomData,
        }
    }
}

impl<D> RandomizedSigner<Signature> for SigningKey<D>
where
    D: Digest<OutputSize = U32>,
{
    fn try_sign_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        msg: &[u8],
    ) -> Result<Signature, SignatureError> {
        sign::<D>(rng, msg, &self.key, &self.group).map_err(|_| SignatureError::new())
    }
}

/// The verifying half: a public point bound to its group and digest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifyingKey<D> {
    public: Point,
    group: Group,
    _digest: PhantomData<fn() -> D>,
}

impl<D> VerifyingKey<D>
where
    D: Digest<OutputSize = U32>,
{
    /// Binds a public point to `group`, rejecting points off the curve and
    /// the identity.
    pub fn new(public: Point, group: Group) -> Result<Self, CurveError> {
        if public.is_identity() || !group.curve().is_on_curve(&public) {
            return Err(CurveError::NotOnCurve);
        }
        Ok(Self {
            public,
            group,
            _digest: PhantomData,
        })
    }

    /// The public point.
    pub fn public(&self) -> &Point {
        &self.public
    }
}

impl<D> Verifier<Signature> for VerifyingKey<D>
where
    D: Digest<OutputSize = U32>,
{
    fn verify(&self, msg: &[u8], signature: &Signature) -> Result<(), SignatureError> {
        if verify::<D>(msg, signature, &self.public, &self.group) {
            Ok(())
        } else {
            Err(SignatureError::new())
        }
    }
}
