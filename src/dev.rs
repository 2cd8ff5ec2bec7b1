//! Curve parameters intended for testing, scaled down to small fields.
//!
//! Nothing here provides any security. The moduli are small enough for the
//! brute-force point scans to be practical and for signatures to be checked
//! by hand.

use crate::{
    curve::{Curve, CurveForm, Group, Point},
    uint::Scalar,
};

/// Weierstrass curve `y² = x³ + 2x + 3 (mod 97)` **for testing purposes
/// only**. It has 99 finite points; the group order is 100.
pub fn weierstrass_97() -> Curve {
    Curve::new(
        CurveForm::Weierstrass {
            a: Scalar::from_u64(2),
            b: Scalar::from_u64(3),
        },
        Scalar::from_u64(97),
    )
    .expect("the modulus is odd")
}

/// Montgomery curve `7y² = x³ + 6x² + x (mod 97)` **for testing purposes
/// only**. It has 115 finite points, among them the two-torsion point
/// `(0, 0)`.
pub fn montgomery_97() -> Curve {
    Curve::new(
        CurveForm::Montgomery {
            a: Scalar::from_u64(6),
            b: Scalar::from_u64(7),
        },
        Scalar::from_u64(97),
    )
    .expect("the modulus is odd")
}

/// Anomalous Weierstrass curve `y² = x³ + 4x + 2 (mod 1031)` **for testing
/// purposes only**.
///
/// Its group order equals the field modulus, so every finite point generates
/// the whole group and scalar arithmetic modulo the modulus is consistent
/// with the group structure. Signatures produced over this curve verify for
/// every nonce, which makes it the fixture for end-to-end signing tests.
pub fn anomalous_1031() -> Curve {
    Curve::new(
        CurveForm::Weierstrass {
            a: Scalar::from_u64(4),
            b: Scalar::from_u64(2),
        },
        Scalar::from_u64(1031),
    )
    .expect("the modulus is odd")
}

/// The anomalous curve with the generator `(0, 473)` **for testing purposes
/// only**.
pub fn signing_group() -> Group {
    Group::new(
        anomalous_1031(),
        Point::affine(Scalar::from_u64(0), Scalar::from_u64(473)),
    )
    .expect("the generator lies on the curve")
}
