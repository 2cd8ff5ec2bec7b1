//! Point arithmetic for curves in Weierstrass and Montgomery form.

use alloc::{vec, vec::Vec};

use serde::{Deserialize, Serialize};

use crate::{
    field::{FieldError, Modulus},
    uint::Scalar,
};

/// Errors of point arithmetic.
#[derive(displaydoc::Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveError {
    /// the point does not satisfy the curve equation
    NotOnCurve,
    /// the scalar is not reduced modulo the field modulus
    ScalarOutOfRange,
    /// field arithmetic failed: {0}
    Field(FieldError),
}

impl From<FieldError> for CurveError {
    fn from(source: FieldError) -> Self {
        Self::Field(source)
    }
}

/// A point of the elliptic curve group.
///
/// The identity (the "point at infinity") is its own variant; it is never
/// encoded as a coordinate pair, so no numeric value is overloaded with two
/// meanings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Point {
    /// The group identity.
    Identity,
    /// A finite point with both coordinates in `[0, n)`.
    Affine {
        /// The `x` coordinate.
        x: Scalar,
        /// The `y` coordinate.
        y: Scalar,
    },
}

impl Point {
    /// A finite point with the given coordinates.
    pub fn affine(x: Scalar, y: Scalar) -> Self {
        Self::Affine { x, y }
    }

    /// Whether this is the group identity.
    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Identity)
    }

    /// The `x` coordinate of a finite point.
    pub fn x_coordinate(&self) -> Option<&Scalar> {
        match self {
            Self::Identity => None,
            Self::Affine { x, .. } => Some(x),
        }
    }

    /// The `y` coordinate of a finite point.
    pub fn y_coordinate(&self) -> Option<&Scalar> {
        match self {
            Self::Identity => None,
            Self::Affine { y, .. } => Some(y),
        }
    }
}

/// The algebraic form of a curve and its coefficients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveForm {
    /// `y² = x³ + a·x + b`
    Weierstrass {
        /// The linear coefficient.
        a: Scalar,
        /// The constant coefficient.
        b: Scalar,
    },
    /// `b·y² = x³ + a·x² + x`
    Montgomery {
        /// The quadratic coefficient.
        a: Scalar,
        /// The scaling coefficient of `y²`.
        b: Scalar,
    },
}

/// An elliptic curve over a prime field.
///
/// The modulus is assumed to be prime and the curve non-singular; both are
/// preconditions of construction and are not verified. The coefficients are
/// reduced on construction, and the form is fixed for the lifetime of the
/// value — the two group laws are never mixed within a computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Curve {
    form: CurveForm,
    field: Modulus,
}

impl Curve {
    /// Builds a curve from its form and field modulus, reducing the
    /// coefficients.
    pub fn new(form: CurveForm, modulus: Scalar) -> Result<Self, FieldError> {
        let field = Modulus::new(modulus)?;
        let form = match form {
            CurveForm::Weierstrass { a, b } => CurveForm::Weierstrass {
                a: field.reduce(&a),
                b: field.reduce(&b),
            },
            CurveForm::Montgomery { a, b } => CurveForm::Montgomery {
                a: field.reduce(&a),
                b: field.reduce(&b),
            },
        };
        Ok(Self { form, field })
    }

    /// The curve form and reduced coefficients.
    pub fn form(&self) -> &CurveForm {
        &self.form
    }

    /// The underlying field.
    pub fn field(&self) -> &Modulus {
        &self.field
    }

    /// The field modulus.
    pub fn modulus(&self) -> &Scalar {
        self.field.get()
    }

    /// The right-hand side of the curve equation at `x`, which must be
    /// reduced.
    pub fn rhs(&self, x: &Scalar) -> Scalar {
        let f = &self.field;
        let x_cubed = f.mul(&f.square(x), x);
        match &self.form {
            CurveForm::Weierstrass { a, b } => f.add(&f.add(&x_cubed, &f.mul(a, x)), b),
            CurveForm::Montgomery { a, .. } => f.add(&f.add(&x_cubed, &f.mul(a, &f.square(x))), x),
        }
    }

    fn lhs(&self, y: &Scalar) -> Scalar {
        let f = &self.field;
        match &self.form {
            CurveForm::Weierstrass { .. } => f.square(y),
            CurveForm::Montgomery { b, .. } => f.mul(b, &f.square(y)),
        }
    }

    /// Whether `point` satisfies the curve equation. The identity is always
    /// on the curve; a finite point with an unreduced coordinate is not.
    pub fn is_on_curve(&self, point: &Point) -> bool {
        match point {
            Point::Identity => true,
            Point::Affine { x, y } => {
                let n = self.field.get();
                x < n && y < n && self.lhs(y) == self.rhs(x)
            }
        }
    }

    /// The inverse of `point` with respect to group addition.
    pub fn negate(&self, point: &Point) -> Point {
        match point {
            Point::Identity => Point::Identity,
            Point::Affine { x, y } => Point::Affine {
                x: *x,
                y: self.field.neg(y),
            },
        }
    }

    /// Group addition.
    ///
    /// Operands are assumed to lie on the curve (see [`Self::checked_add`]
    /// for the validating variant). A field error can only surface for
    /// operands violating that assumption or a composite modulus.
    pub fn add(&self, p: &Point, q: &Point) -> Result<Point, CurveError> {
        let (x1, y1) = match p {
            Point::Identity => return Ok(*q),
            Point::Affine { x, y } => (x, y),
        };
        let (x2, y2) = match q {
            Point::Identity => return Ok(*p),
            Point::Affine { x, y } => (x, y),
        };
        if x1 == x2 && *y1 == self.field.neg(y2) {
            return Ok(Point::Identity);
        }
        if x1 == x2 && y1 == y2 {
            self.double_affine(x1, y1)
        } else {
            self.chord(x1, y1, x2, y2)
        }
    }

    /// Group addition with both operands validated against the curve
    /// equation first.
    pub fn checked_add(&self, p: &Point, q: &Point) -> Result<Point, CurveError> {
        if !self.is_on_curve(p) || !self.is_on_curve(q) {
            return Err(CurveError::NotOnCurve);
        }
        self.add(p, q)
    }

    /// Doubles `point`.
    pub fn double(&self, point: &Point) -> Result<Point, CurveError> {
        self.add(point, point)
    }

    // Tangent case. The vertical tangent (`y == 0`) is handled by the
    // inverse rule in `add` before this is reached.
    fn double_affine(&self, x: &Scalar, y: &Scalar) -> Result<Point, CurveError> {
        let f = &self.field;
        match &self.form {
            CurveForm::Weierstrass { a, .. } => {
                let x_sq = f.square(x);
                let three_x_sq = f.add(&f.add(&x_sq, &x_sq), &x_sq);
                let lambda = f.mul(&f.add(&three_x_sq, a), &f.invert(&f.add(y, y))?);
                let x3 = f.sub(&f.sub(&f.square(&lambda), x), x);
                let y3 = f.sub(&f.mul(&lambda, &f.sub(x, &x3)), y);
                Ok(Point::Affine { x: x3, y: y3 })
            }
            CurveForm::Montgomery { a, b } => {
                let x_sq = f.square(x);
                let three_x_sq = f.add(&f.add(&x_sq, &x_sq), &x_sq);
                let ax = f.mul(a, x);
                // 3x² + 2a·x + 1
                let numerator = f.add(&f.add(&three_x_sq, &f.add(&ax, &ax)), &Scalar::ONE);
                let denominator = f.invert(&f.mul(b, &f.add(y, y)))?;
                let lambda = f.mul(&numerator, &denominator);
                let b_lambda_sq = f.mul(b, &f.square(&lambda));
                let x3 = f.sub(&f.sub(&b_lambda_sq, a), &f.add(x, x));
                let three_x = f.add(&f.add(x, x), x);
                // (3x + a)·λ - b·λ³ - y
                let y3 = f.sub(
                    &f.sub(
                        &f.mul(&f.add(&three_x, a), &lambda),
                        &f.mul(&b_lambda_sq, &lambda),
                    ),
                    y,
                );
                Ok(Point::Affine { x: x3, y: y3 })
            }
        }
    }

    // Chord case, `x1 != x2` for operands on the curve.
    fn chord(
        &self,
        x1: &Scalar,
        y1: &Scalar,
        x2: &Scalar,
        y2: &Scalar,
    ) -> Result<Point, CurveError> {
        let f = &self.field;
        let lambda = f.mul(&f.sub(y2, y1), &f.invert(&f.sub(x2, x1))?);
        match &self.form {
            CurveForm::Weierstrass { .. } => {
                let x3 = f.sub(&f.sub(&f.square(&lambda), x1), x2);
                let y3 = f.sub(&f.mul(&lambda, &f.sub(x1, &x3)), y1);
                Ok(Point::Affine { x: x3, y: y3 })
            }
            CurveForm::Montgomery { a, b } => {
                let b_lambda_sq = f.mul(b, &f.square(&lambda));
                let x3 = f.sub(&f.sub(&f.sub(&b_lambda_sq, a), x1), x2);
                // λ(2x₁ + x₂ + a) - b·λ³ - y₁
                let y3 = f.sub(
                    &f.sub(
                        &f.mul(&lambda, &f.add(&f.add(x1, x1), &f.add(x2, a))),
                        &f.mul(&b_lambda_sq, &lambda),
                    ),
                    y1,
                );
                Ok(Point::Affine { x: x3, y: y3 })
            }
        }
    }

    /// `k` times `point`, by iterative double-and-add over the bits of `k`
    /// from the most significant down.
    ///
    /// `scalar_mult(0, p)` is the identity. The scalar must be reduced
    /// modulo the field modulus. Variable-time.
    pub fn scalar_mult(&self, k: &Scalar, point: &Point) -> Result<Point, CurveError> {
        if k >= self.field.get() {
            return Err(CurveError::ScalarOutOfRange);
        }
        let mut acc = Point::Identity;
        for i in (0..k.bits_vartime()).rev() {
            acc = self.add(&acc, &acc)?;
            if k.bit_vartime(i) {
                acc = self.add(&acc, point)?;
            }
        }
        Ok(acc)
    }

    /// All points of the curve, the identity first, then finite points in
    /// ascending `(x, y)` order.
    ///
    /// Scans every coordinate pair: `O(n²)` field operations. Usable on
    /// small test moduli only.
    pub fn points(&self) -> Vec<Point> {
        let n = *self.field.get();
        let mut points = vec![Point::Identity];
        let mut x = Scalar::ZERO;
        while x < n {
            let rhs = self.rhs(&x);
            let mut y = Scalar::ZERO;
            while y < n {
                if self.lhs(&y) == rhs {
                    points.push(Point::Affine { x, y });
                }
                y = y.wrapping_add(&Scalar::ONE);
            }
            x = x.wrapping_add(&Scalar::ONE);
        }
        points
    }

    /// Up to `count` finite points with `x` in `[lower, upper)` (the upper
    /// bound defaults to the modulus), in ascending `(x, y)` order.
    ///
    /// Same brute-force scan as [`Self::points`]; small test moduli only.
    pub fn find_points(&self, count: usize, lower: &Scalar, upper: Option<&Scalar>) -> Vec<Point> {
        let n = self.field.get();
        let upper = match upper {
            Some(upper) if upper < n => *upper,
            _ => *n,
        };
        let mut found = Vec::new();
        let mut x = *lower;
        'columns: while x < upper {
            let rhs = self.rhs(&x);
            let mut y = Scalar::ZERO;
            while &y < n {
                if self.lhs(&y) == rhs {
                    found.push(Point::Affine { x, y });
                    if found.len() == count {
                        break 'columns;
                    }
                }
                y = y.wrapping_add(&Scalar::ONE);
            }
            x = x.wrapping_add(&Scalar::ONE);
        }
        found
    }

    // The first point in the column at `x`, if the column has any.
    pub(crate) fn point_in_column(&self, x: &Scalar) -> Option<Point> {
        let n = self.field.get();
        let rhs = self.rhs(x);
        let mut y = Scalar::ZERO;
        while &y < n {
            if self.lhs(&y) == rhs {
                return Some(Point::Affine { x: *x, y });
            }
            y = y.wrapping_add(&Scalar::ONE);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{CurveError, Point};
    use crate::{
        dev,
        field::FieldError,
        uint::Scalar,
    };

    fn p(x: u64, y: u64) -> Point {
        Point::affine(Scalar::from_u64(x), Scalar::from_u64(y))
    }

    #[test]
    fn coordinate_accessors() {
        let point = p(3, 91);
        assert_eq!(point.x_coordinate(), Some(&Scalar::from_u64(3)));
        assert_eq!(point.y_coordinate(), Some(&Scalar::from_u64(91)));
        assert!(!point.is_identity());
        assert_eq!(Point::Identity.x_coordinate(), None);
        assert_eq!(Point::Identity.y_coordinate(), None);
        assert!(Point::Identity.is_identity());
    }

    #[test]
    fn point_serialization_round_trip() {
        for point in [Point::Identity, p(0, 10)] {
            let serialized = serde_json::to_string(&point).unwrap();
            let deserialized: Point = serde_json::from_str(&serialized).unwrap();
            assert_eq!(point, deserialized);
        }
    }

    #[test]
    fn weierstrass_on_curve() {
        let curve = dev::weierstrass_97();
        assert!(curve.is_on_curve(&Point::Identity));
        assert!(curve.is_on_curve(&p(0, 10)));
        assert!(curve.is_on_curve(&p(3, 91)));
        assert!(!curve.is_on_curve(&p(1, 2)));
        // Unreduced coordinates never satisfy the equation.
        assert!(!curve.is_on_curve(&p(97, 10)));
    }

    #[test]
    fn weierstrass_addition() {
        let curve = dev::weierstrass_97();
        let base = p(0, 10);
        assert_eq!(curve.add(&base, &p(3, 91)).unwrap(), p(47, 79));
        assert_eq!(curve.double(&base).unwrap(), p(65, 32));
        assert_eq!(curve.add(&base, &Point::Identity).unwrap(), base);
        assert_eq!(curve.add(&Point::Identity, &base).unwrap(), base);
        assert_eq!(
            curve.add(&Point::Identity, &Point::Identity).unwrap(),
            Point::Identity
        );
    }

    #[test]
    fn weierstrass_inverse_rule() {
        let curve = dev::weierstrass_97();
        let base = p(0, 10);
        let neg = curve.negate(&base);
        assert_eq!(neg, p(0, 87));
        assert_eq!(curve.add(&base, &neg).unwrap(), Point::Identity);
        assert_eq!(curve.negate(&Point::Identity), Point::Identity);
    }

    #[test]
    fn weierstrass_scalar_mult() {
        let curve = dev::weierstrass_97();
        let base = p(0, 10);
        assert_eq!(
            curve.scalar_mult(&Scalar::ZERO, &base).unwrap(),
            Point::Identity
        );
        assert_eq!(curve.scalar_mult(&Scalar::ONE, &base).unwrap(), base);
        assert_eq!(curve.scalar_mult(&Scalar::from_u64(5), &base).unwrap(), p(88, 56));
        assert_eq!(
            curve.scalar_mult(&Scalar::from_u64(46), &base).unwrap(),
            p(52, 29)
        );
        // (0, 10) has order 50.
        assert_eq!(
            curve.scalar_mult(&Scalar::from_u64(50), &base).unwrap(),
            Point::Identity
        );
    }

    #[test]
    fn scalar_out_of_range() {
        let curve = dev::weierstrass_97();
        assert_eq!(
            curve.scalar_mult(&Scalar::from_u64(97), &p(0, 10)),
            Err(CurveError::ScalarOutOfRange)
        );
    }

    #[test]
    fn linearity() {
        let curve = dev::weierstrass_97();
        let base = p(0, 10);
        let k3 = curve.scalar_mult(&Scalar::from_u64(3), &base).unwrap();
        let k4 = curve.scalar_mult(&Scalar::from_u64(4), &base).unwrap();
        let k7 = curve.scalar_mult(&Scalar::from_u64(7), &base).unwrap();
        assert_eq!(curve.add(&k3, &k4).unwrap(), k7);
    }

    #[test]
    fn multiples_stay_on_curve() {
        let curve = dev::weierstrass_97();
        let base = p(0, 10);
        let mut k = Scalar::ZERO;
        while k < Scalar::from_u64(97) {
            let point = curve.scalar_mult(&k, &base).unwrap();
            assert!(curve.is_on_curve(&point));
            k = k.wrapping_add(&Scalar::ONE);
        }
    }

    #[test]
    fn checked_add_validates() {
        let curve = dev::weierstrass_97();
        assert_eq!(
            curve.checked_add(&p(0, 10), &p(1, 2)),
            Err(CurveError::NotOnCurve)
        );
        assert_eq!(curve.checked_add(&p(0, 10), &p(3, 91)).unwrap(), p(47, 79));
    }

    #[test]
    fn point_enumeration() {
        let curve = dev::weierstrass_97();
        let points = curve.points();
        // 99 finite points plus the identity.
        assert_eq!(points.len(), 100);
        assert_eq!(points[0], Point::Identity);
        assert_eq!(points[1], p(0, 10));
        assert!(points.iter().all(|point| curve.is_on_curve(point)));
    }

    #[test]
    fn bounded_point_search() {
        let curve = dev::weierstrass_97();
        assert_eq!(
            curve.find_points(3, &Scalar::ZERO, None),
            alloc::vec![p(0, 10), p(0, 87), p(1, 43)]
        );
        // The column at x = 2 is empty.
        assert_eq!(
            curve.find_points(10, &Scalar::from_u64(2), Some(&Scalar::from_u64(3))),
            alloc::vec![]
        );
    }

    #[test]
    fn montgomery_on_curve() {
        let curve = dev::montgomery_97();
        assert!(curve.is_on_curve(&Point::Identity));
        assert!(curve.is_on_curve(&p(0, 0)));
        assert!(curve.is_on_curve(&p(9, 8)));
        assert!(!curve.is_on_curve(&p(1, 1)));
    }

    #[test]
    fn montgomery_addition() {
        let curve = dev::montgomery_97();
        let q = p(9, 8);
        assert_eq!(curve.double(&q).unwrap(), p(59, 15));
        assert_eq!(curve.add(&q, &p(54, 49)).unwrap(), p(74, 19));
        assert_eq!(curve.add(&q, &Point::Identity).unwrap(), q);
        assert_eq!(curve.negate(&q), p(9, 89));
        assert_eq!(curve.add(&q, &p(9, 89)).unwrap(), Point::Identity);
    }

    #[test]
    fn montgomery_scalar_mult() {
        let curve = dev::montgomery_97();
        let q = p(9, 8);
        assert_eq!(curve.scalar_mult(&Scalar::from_u64(5), &q).unwrap(), p(86, 3));
        assert_eq!(curve.scalar_mult(&Scalar::from_u64(7), &q).unwrap(), p(36, 61));
        let k3 = curve.scalar_mult(&Scalar::from_u64(3), &q).unwrap();
        let k4 = curve.scalar_mult(&Scalar::from_u64(4), &q).unwrap();
        assert_eq!(curve.add(&k3, &k4).unwrap(), p(36, 61));
    }

    #[test]
    fn montgomery_two_torsion() {
        let curve = dev::montgomery_97();
        // (0, 0) is its own inverse.
        assert_eq!(curve.double(&p(0, 0)).unwrap(), Point::Identity);
    }

    #[test]
    fn montgomery_closure() {
        let curve = dev::montgomery_97();
        let points = curve.find_points(12, &Scalar::ZERO, None);
        for lhs in &points {
            for rhs in &points {
                let sum = curve.add(lhs, rhs).unwrap();
                assert!(curve.is_on_curve(&sum));
            }
        }
    }

    #[test]
    fn degenerate_operands_surface_field_errors() {
        let curve = dev::weierstrass_97();
        // Two distinct off-curve points sharing a column make the chord
        // slope denominator vanish.
        assert_eq!(
            curve.add(&p(5, 1), &p(5, 2)),
            Err(CurveError::Field(FieldError::NoInverse))
        );
    }
}
