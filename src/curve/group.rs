//! Selection of a base point, fixing the cyclic group used for signing.

use super::arithmetic::{Curve, CurveError, Point};
use crate::uint::Scalar;

/// Errors of base point selection.
#[derive(displaydoc::Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupError {
    /// the base point is the identity or does not satisfy the curve equation
    InvalidBasePoint,
    /// no base point was found within the searched range
    NoBasePointFound,
}

/// A curve together with a fixed generator.
///
/// Both are immutable once constructed, so a `Group` can be shared freely
/// across concurrent signing and verification.
///
/// The generator is only known to lie on the curve; its subgroup order is
/// not computed here. Callers that need a generator of a specific order must
/// verify it externally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Group {
    curve: Curve,
    generator: Point,
}

impl Group {
    /// Fixes `base` as the generator, rejecting the identity and points off
    /// the curve.
    pub fn new(curve: Curve, base: Point) -> Result<Self, GroupError> {
        if base.is_identity() || !curve.is_on_curve(&base) {
            return Err(GroupError::InvalidBasePoint);
        }
        Ok(Self {
            curve,
            generator: base,
        })
    }

    /// Accepts `candidate` if it is a usable base point, otherwise searches
    /// the curve for one starting from the column at zero.
    pub fn select(curve: Curve, candidate: Option<Point>) -> Result<Self, GroupError> {
        if let Some(base) = candidate {
            if let Ok(group) = Self::new(curve, base) {
                return Ok(group);
            }
            tracing::debug!("discarding unusable base point candidate");
        }
        Self::search_from(curve, &Scalar::ZERO)
    }

    /// Searches for a base point by scanning ascending `x` columns starting
    /// at `start`, wrapping around modulo `n`.
    ///
    /// The number of visited columns is tracked so the scan terminates after
    /// one full pass even though it wraps. Brute force over the column's `y`
    /// candidates; usable on small test moduli only.
    pub fn search_from(curve: Curve, start: &Scalar) -> Result<Self, GroupError> {
        let n = *curve.modulus();
        let mut x = curve.field().reduce(start);
        let mut visited = Scalar::ZERO;
        while visited < n {
            if let Some(point) = curve.point_in_column(&x) {
                tracing::debug!(columns = ?visited, "base point search succeeded");
                return Self::new(curve, point).map_err(|_| GroupError::NoBasePointFound);
            }
            x = x.wrapping_add(&Scalar::ONE);
            if x == n {
                x = Scalar::ZERO;
            }
            visited = visited.wrapping_add(&Scalar::ONE);
        }
        Err(GroupError::NoBasePointFound)
    }

    /// The curve.
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// The generator.
    pub fn generator(&self) -> &Point {
        &self.generator
    }

    /// `k` times the generator.
    pub fn scalar_mult_base(&self, k: &Scalar) -> Result<Point, CurveError> {
        self.curve.scalar_mult(k, &self.generator)
    }
}
