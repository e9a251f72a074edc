// -*- mode: rust; -*-
//
// This file is part of nistp256.
// Copyright (c) 2016-2021 isis agora lovecruft
// Copyright (c) 2016-2020 Henry de Valence
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>
// - Henry de Valence <hdevalence@hdevalence.ca>

//! Group operations on the short Weierstraß curve P-256 in Jacobian
//! coordinates.
//!
//! A [`JacobianPoint`] \\((X, Y, Z)\\) with \\(Z \neq 0\\) represents
//! the affine point \\((X/Z^2, Y/Z^3)\\) on
//! $$
//! y^2 = x^3 - 3x + b;
//! $$
//! \\(Z = 0\\) represents the point at infinity, and the group law
//! never canonicalizes, so distinct triples may name the same point
//! (equality compares the underlying affine points).
//!
//! An [`AffinePoint`] is a pair of Montgomery-domain coordinates, used
//! for precomputed generator multiples; it encodes the identity as
//! \\((0, 0)\\), which is not on the curve and therefore unambiguous.
//!
//! All operations here are complete and constant-time: the exceptional
//! cases of the addition law (either operand at infinity, both operands
//! equal) are computed alongside the generic formula and resolved with
//! masked selection, never with branches on coordinate values.

#![allow(non_snake_case)]

use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

#[cfg(feature = "alloc")]
use core::borrow::Borrow;

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::constants;
use crate::errors::{CurveError, InternalError};
use crate::field::FieldElement;
use crate::scalar::Scalar;
use crate::scalar_mul::windowed::windowed_mul;
use crate::traits::{Identity, ValidityCheck};
use crate::window::LookupTable;

#[cfg(feature = "alloc")]
use crate::traits::MultiscalarMul;

/// The largest number of scalar/point terms accepted by a single call
/// to [`JacobianPoint::linear_combination`], chosen so that the table
/// allocation arithmetic cannot overflow.
const MAX_LINEAR_COMBINATION_TERMS: usize = 1 << 24;

// ------------------------------------------------------------------------
// Affine points
// ------------------------------------------------------------------------

/// An affine point on the P-256 curve, with coordinates in the
/// Montgomery domain.
///
/// The identity is encoded as \\((0, 0)\\); every other representable
/// value names an ordinary point.
#[derive(Copy, Clone)]
pub struct AffinePoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
}

impl Identity for AffinePoint {
    fn identity() -> AffinePoint {
        AffinePoint {
            x: FieldElement::ZERO,
            y: FieldElement::ZERO,
        }
    }
}

impl Default for AffinePoint {
    fn default() -> AffinePoint {
        AffinePoint::identity()
    }
}

impl ConstantTimeEq for AffinePoint {
    fn ct_eq(&self, other: &AffinePoint) -> Choice {
        self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y)
    }
}

impl Eq for AffinePoint {}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &AffinePoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl ConditionallySelectable for AffinePoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        AffinePoint {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
        }
    }
}

impl<'a> Neg for &'a AffinePoint {
    type Output = AffinePoint;
    fn neg(self) -> AffinePoint {
        AffinePoint {
            x: self.x,
            y: -&self.y,
        }
    }
}

impl Neg for AffinePoint {
    type Output = AffinePoint;
    fn neg(self) -> AffinePoint {
        -&self
    }
}

impl fmt::Debug for AffinePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AffinePoint{{\n\tx: {:?},\n\ty: {:?}\n}}", &self.x, &self.y)
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for AffinePoint {
    fn zeroize(&mut self) {
        self.x.zeroize();
        self.y.zeroize();
    }
}

impl AffinePoint {
    /// Attempt to construct a point from canonical little-endian
    /// coordinate encodings.
    ///
    /// Only the range of the encodings is checked, not curve
    /// membership; the coordinates are carried into the Montgomery
    /// domain.
    pub fn from_bytes(x: &[u8; 32], y: &[u8; 32]) -> Result<AffinePoint, CurveError> {
        let x: Option<FieldElement> = FieldElement::from_bytes(x).into();
        let y: Option<FieldElement> = FieldElement::from_bytes(y).into();
        match (x, y) {
            (Some(x), Some(y)) => Ok(AffinePoint { x, y }),
            _ => Err(CurveError(InternalError::CoordinatesOutOfRange)),
        }
    }

    /// The canonical little-endian encoding of the x coordinate,
    /// decoded out of the Montgomery domain.
    pub fn x_bytes(&self) -> [u8; 32] {
        self.x.to_bytes()
    }

    /// The canonical little-endian encoding of the y coordinate,
    /// decoded out of the Montgomery domain.
    pub fn y_bytes(&self) -> [u8; 32] {
        self.y.to_bytes()
    }

    /// Constant-time identity test against the \\((0, 0)\\) encoding.
    pub(crate) fn ct_is_identity(&self) -> Choice {
        self.x.is_zero() & self.y.is_zero()
    }

    /// Lift into Jacobian coordinates.
    ///
    /// The two representations encode infinity differently ((0, 0)
    /// affine versus Z = 0 Jacobian), so Z is the Montgomery one
    /// masked down to zero for the identity, rather than unconditionally
    /// one.  Table selections with Booth digit zero rely on this.
    pub(crate) fn to_jacobian(&self) -> JacobianPoint {
        let mut Z = FieldElement::ONE;
        Z.conditional_assign(&FieldElement::ZERO, self.ct_is_identity());
        JacobianPoint {
            X: self.x,
            Y: self.y,
            Z,
        }
    }
}

// ------------------------------------------------------------------------
// Jacobian points
// ------------------------------------------------------------------------

/// A point on the P-256 curve in Jacobian coordinates, with all three
/// coordinates in the Montgomery domain.
#[derive(Copy, Clone)]
pub struct JacobianPoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
}

impl Identity for JacobianPoint {
    fn identity() -> JacobianPoint {
        JacobianPoint {
            X: FieldElement::ZERO,
            Y: FieldElement::ZERO,
            Z: FieldElement::ZERO,
        }
    }
}

impl Default for JacobianPoint {
    fn default() -> JacobianPoint {
        JacobianPoint::identity()
    }
}

impl ConstantTimeEq for JacobianPoint {
    /// Test equality of the represented affine points by
    /// cross-multiplying the projections, so that distinct Jacobian
    /// triples for the same point compare equal.
    fn ct_eq(&self, other: &JacobianPoint) -> Choice {
        let z1z1 = self.Z.square();
        let z2z2 = other.Z.square();
        let x1 = &self.X * &z2z2;
        let x2 = &other.X * &z1z1;
        let y1 = &(&self.Y * &other.Z) * &z2z2;
        let y2 = &(&other.Y * &self.Z) * &z1z1;

        let self_is_identity = self.Z.is_zero();
        let other_is_identity = other.Z.is_zero();

        (self_is_identity & other_is_identity)
            | (x1.ct_eq(&x2) & y1.ct_eq(&y2) & !self_is_identity & !other_is_identity)
    }
}

impl Eq for JacobianPoint {}

impl PartialEq for JacobianPoint {
    fn eq(&self, other: &JacobianPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl ConditionallySelectable for JacobianPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        JacobianPoint {
            X: FieldElement::conditional_select(&a.X, &b.X, choice),
            Y: FieldElement::conditional_select(&a.Y, &b.Y, choice),
            Z: FieldElement::conditional_select(&a.Z, &b.Z, choice),
        }
    }
}

impl fmt::Debug for JacobianPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "JacobianPoint{{\n\tX: {:?},\n\tY: {:?},\n\tZ: {:?}\n}}",
            &self.X, &self.Y, &self.Z
        )
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for JacobianPoint {
    fn zeroize(&mut self) {
        self.X.zeroize();
        self.Y.zeroize();
        self.Z.zeroize();
    }
}

impl ValidityCheck for JacobianPoint {
    fn is_valid(&self) -> bool {
        // Y^2 = X^3 - 3XZ^4 + bZ^6; the all-zero identity encoding
        // satisfies the degenerate form.
        let yy = self.Y.square();
        let xxx = &self.X.square() * &self.X;
        let zz = self.Z.square();
        let z4 = zz.square();
        let z6 = &z4 * &zz;
        let rhs = &(&xxx - &(&self.X * &z4).mul3()) + &(&constants::curve_b() * &z6);
        yy == rhs
    }
}

// ------------------------------------------------------------------------
// Doubling and addition
// ------------------------------------------------------------------------

impl JacobianPoint {
    /// Compute the doubled point.
    ///
    /// Because the curve has \\(a = -3\\), the slope numerator
    /// \\(3X^2 + aZ^4\\) factors as \\(3(X - Z^2)(X + Z^2)\\).  For
    /// the identity the formula yields \\(Z_3 = 2YZ = 0\\), so no
    /// corrective step is needed.
    pub fn double(&self) -> JacobianPoint {
        let s = self.Y.mul2();
        let zz = self.Z.square();
        let s = s.square(); // 4Y^2
        let Z3 = (&self.Y * &self.Z).mul2();
        let m = &(&self.X + &zz) * &(&self.X - &zz);
        let m = m.mul3(); // 3(X^2 - Z^4)
        let y4 = s.square().half(); // 8Y^4
        let s = &s * &self.X; // 4XY^2
        let X3 = &m.square() - &s.mul2();
        let Y3 = &(&m * &(&s - &X3)) - &y4;

        JacobianPoint { X: X3, Y: Y3, Z: Z3 }
    }

    /// Compute `2^k * self` by successive doublings.  Requires `k > 0`.
    pub(crate) fn mult_by_pow_2(&self, k: u32) -> JacobianPoint {
        debug_assert!(k > 0);
        let mut r = *self;
        for _ in 0..k {
            r = r.double();
        }
        r
    }
}

impl<'a, 'b> Add<&'b JacobianPoint> for &'a JacobianPoint {
    type Output = JacobianPoint;

    /// Complete, constant-time point addition.
    fn add(self, other: &'b JacobianPoint) -> JacobianPoint {
        let z1z1 = self.Z.square();
        let z2z2 = other.Z.square();
        let u1 = &self.X * &z2z2;
        let u2 = &other.X * &z1z1;
        let s1 = &(&self.Y * &other.Z) * &z2z2; // Y1 Z2^3
        let s2 = &(&other.Y * &self.Z) * &z1z1; // Y2 Z1^3
        let h = &u2 - &u1;
        let r = &s2 - &s1;

        let hh = h.square();
        let hhh = &hh * &h;
        let rr = r.square();
        let v = &u1 * &hh;
        let X3 = &(&rr - &hhh) - &v.mul2();
        let Y3 = &(&r * &(&v - &X3)) - &(&s1 * &hhh);
        let Z3 = &(&self.Z * &other.Z) * &h;
        let mut sum = JacobianPoint { X: X3, Y: Y3, Z: Z3 };

        // The generic formula collapses to (0,0,0) when both inputs
        // project to the same point, so the doubled result is computed
        // alongside and masked in; an infinite operand passes the other
        // operand through.  P = -Q needs no attention: H = 0 with
        // R != 0 already lands on Z = 0.
        let self_is_identity = self.Z.is_zero();
        let other_is_identity = other.Z.is_zero();
        let is_doubling =
            u1.ct_eq(&u2) & s1.ct_eq(&s2) & !self_is_identity & !other_is_identity;

        sum.conditional_assign(&self.double(), is_doubling);
        sum.conditional_assign(other, self_is_identity);
        sum.conditional_assign(self, other_is_identity);
        sum
    }
}

impl<'a, 'b> Add<&'b AffinePoint> for &'a JacobianPoint {
    type Output = JacobianPoint;

    /// Mixed addition with an affine addend (implicit \\(Z_2 = 1\\)),
    /// saving a squaring and several multiplications over the general
    /// formula.  Same exceptional-case handling, with the affine
    /// identity recognized by its \\((0, 0)\\) encoding.
    fn add(self, other: &'b AffinePoint) -> JacobianPoint {
        let z1z1 = self.Z.square();
        let u2 = &other.x * &z1z1;
        let s2 = &(&other.y * &self.Z) * &z1z1;
        let h = &u2 - &self.X;
        let r = &s2 - &self.Y;

        let hh = h.square();
        let hhh = &hh * &h;
        let rr = r.square();
        let v = &self.X * &hh;
        let X3 = &(&rr - &hhh) - &v.mul2();
        let Y3 = &(&r * &(&v - &X3)) - &(&self.Y * &hhh);
        let Z3 = &self.Z * &h;
        let mut sum = JacobianPoint { X: X3, Y: Y3, Z: Z3 };

        let self_is_identity = self.Z.is_zero();
        let other_is_identity = other.ct_is_identity();
        let is_doubling = h.is_zero() & r.is_zero() & !self_is_identity & !other_is_identity;

        sum.conditional_assign(&self.double(), is_doubling);
        sum.conditional_assign(&other.to_jacobian(), self_is_identity);
        sum.conditional_assign(self, other_is_identity);
        sum
    }
}

impl<'b> AddAssign<&'b JacobianPoint> for JacobianPoint {
    fn add_assign(&mut self, rhs: &'b JacobianPoint) {
        *self = (self as &JacobianPoint) + rhs;
    }
}

impl<'b> AddAssign<&'b AffinePoint> for JacobianPoint {
    fn add_assign(&mut self, rhs: &'b AffinePoint) {
        *self = (self as &JacobianPoint) + rhs;
    }
}

define_add_variants!(
    LHS = JacobianPoint,
    RHS = JacobianPoint,
    Output = JacobianPoint
);
define_add_variants!(
    LHS = JacobianPoint,
    RHS = AffinePoint,
    Output = JacobianPoint
);
define_add_assign_variants!(LHS = JacobianPoint, RHS = JacobianPoint);
define_add_assign_variants!(LHS = JacobianPoint, RHS = AffinePoint);

impl<'a, 'b> Sub<&'b JacobianPoint> for &'a JacobianPoint {
    type Output = JacobianPoint;
    fn sub(self, other: &'b JacobianPoint) -> JacobianPoint {
        self + &(-other)
    }
}

impl<'b> SubAssign<&'b JacobianPoint> for JacobianPoint {
    fn sub_assign(&mut self, rhs: &'b JacobianPoint) {
        *self = (self as &JacobianPoint) - rhs;
    }
}

define_sub_variants!(
    LHS = JacobianPoint,
    RHS = JacobianPoint,
    Output = JacobianPoint
);
define_sub_assign_variants!(LHS = JacobianPoint, RHS = JacobianPoint);

impl<'a> Neg for &'a JacobianPoint {
    type Output = JacobianPoint;
    fn neg(self) -> JacobianPoint {
        JacobianPoint {
            X: self.X,
            Y: -&self.Y,
            Z: self.Z,
        }
    }
}

impl Neg for JacobianPoint {
    type Output = JacobianPoint;
    fn neg(self) -> JacobianPoint {
        -&self
    }
}

// ------------------------------------------------------------------------
// Scalar multiplication
// ------------------------------------------------------------------------

impl<'a, 'b> Mul<&'b Scalar> for &'a JacobianPoint {
    type Output = JacobianPoint;

    /// Scalar multiplication: compute `scalar * self`.
    ///
    /// For scalar multiplication of the generator,
    /// [`JacobianPoint::mul_base`] is substantially faster.
    #[cfg_attr(not(feature = "zeroize"), allow(unused_mut))]
    fn mul(self, scalar: &'b Scalar) -> JacobianPoint {
        let mut tables = [LookupTable::from(self)];
        let mut strings = [scalar.window_bytes()];
        let result = windowed_mul(&tables, &strings);

        #[cfg(feature = "zeroize")]
        {
            tables.zeroize();
            strings.zeroize();
        }

        result
    }
}

impl<'a, 'b> Mul<&'b JacobianPoint> for &'a Scalar {
    type Output = JacobianPoint;

    /// Scalar multiplication: compute `self * point`.
    fn mul(self, point: &'b JacobianPoint) -> JacobianPoint {
        point * self
    }
}

impl<'b> MulAssign<&'b Scalar> for JacobianPoint {
    fn mul_assign(&mut self, scalar: &'b Scalar) {
        *self = (self as &JacobianPoint) * scalar;
    }
}

define_mul_variants!(LHS = JacobianPoint, RHS = Scalar, Output = JacobianPoint);
define_mul_variants!(LHS = Scalar, RHS = JacobianPoint, Output = JacobianPoint);
define_mul_assign_variants!(LHS = JacobianPoint, RHS = Scalar);

impl JacobianPoint {
    /// The standard P-256 generator.
    pub fn generator() -> JacobianPoint {
        constants::GENERATOR.to_jacobian()
    }

    /// Lift an affine point into Jacobian coordinates.
    pub fn from_affine(point: &AffinePoint) -> JacobianPoint {
        point.to_jacobian()
    }

    /// Fixed-base scalar multiplication: compute `scalar * G` where `G`
    /// is the standard generator.
    ///
    /// With the `precomputed-tables` feature this runs the w=7 comb
    /// over the process-wide generator table; otherwise it falls back
    /// to the variable-base ladder.
    pub fn mul_base(scalar: &Scalar) -> JacobianPoint {
        #[cfg(feature = "precomputed-tables")]
        {
            constants::basepoint_table().mul_base(scalar)
        }
        #[cfg(not(feature = "precomputed-tables"))]
        {
            &Self::generator() * scalar
        }
    }

    /// Constant-time comparison against the generator the precomputed
    /// table was built for: the Montgomery-domain coordinates must match
    /// and Z must be exactly one.
    pub(crate) fn is_standard_generator(&self) -> Choice {
        self.X.ct_eq(&constants::GENERATOR.x)
            & self.Y.ct_eq(&constants::GENERATOR.y)
            & self.Z.ct_eq(&FieldElement::ONE)
    }

    /// Convert to an affine point.
    ///
    /// # Errors
    ///
    /// Returns an error if this is the point at infinity, which has no
    /// affine coordinates.
    pub fn to_affine(&self) -> Result<AffinePoint, CurveError> {
        if bool::from(self.Z.is_zero()) {
            return Err(CurveError(InternalError::PointAtInfinity));
        }

        let z_inv = self.Z.invert();
        let z_inv2 = z_inv.square();
        let x = &self.X * &z_inv2;
        let z_inv3 = &z_inv2 * &z_inv;
        let y = &self.Y * &z_inv3;

        Ok(AffinePoint { x, y })
    }

    /// Compute the linear combination
    /// $$
    /// Q = k G + k\_1 P\_1 + \cdots + k\_n P\_n
    /// $$
    /// where `G` is the supplied generator.
    ///
    /// When the generator equals the standard one by value, its term
    /// runs through the fixed-base comb; otherwise it is folded into
    /// the variable-base terms and handled like any other point.  The
    /// result is returned in Jacobian form without normalization.
    ///
    /// # Errors
    ///
    /// Returns an error when a generator scalar is supplied without a
    /// generator, or when more than 2^24 terms are requested.
    #[cfg(feature = "alloc")]
    #[cfg_attr(not(feature = "precomputed-tables"), allow(unused_mut))]
    pub fn linear_combination(
        g_scalar: Option<&Scalar>,
        generator: Option<&JacobianPoint>,
        scalars: &[Scalar],
        points: &[JacobianPoint],
    ) -> Result<JacobianPoint, CurveError> {
        debug_assert_eq!(scalars.len(), points.len());

        if g_scalar.is_none() && scalars.is_empty() {
            return Ok(JacobianPoint::identity());
        }
        if scalars.len() > MAX_LINEAR_COMBINATION_TERMS {
            return Err(CurveError(InternalError::CapacityExceeded));
        }

        let mut fixed_term: Option<JacobianPoint> = None;
        let mut appended: Option<(Scalar, JacobianPoint)> = None;

        if let Some(k) = g_scalar {
            let g = generator.ok_or(CurveError(InternalError::UndefinedGenerator))?;

            #[cfg(feature = "precomputed-tables")]
            {
                if bool::from(g.is_standard_generator()) {
                    fixed_term = Some(constants::basepoint_table().mul_base(k));
                } else {
                    // Without a precomputed table for this generator, it
                    // has to be handled like a normal point.
                    appended = Some((*k, *g));
                }
            }
            #[cfg(not(feature = "precomputed-tables"))]
            {
                appended = Some((*k, *g));
            }
        }

        let num = scalars.len() + usize::from(appended.is_some());
        let variable_term = if num > 0 {
            let mut tables: Vec<LookupTable<JacobianPoint, 16>> = Vec::with_capacity(num);
            let mut strings: Vec<[u8; 33]> = Vec::with_capacity(num);
            for (s, p) in scalars.iter().zip(points.iter()) {
                tables.push(LookupTable::from(p));
                strings.push(s.window_bytes());
            }
            if let Some((s, p)) = appended.as_ref() {
                tables.push(LookupTable::from(p));
                strings.push(s.window_bytes());
            }

            let r = windowed_mul(&tables, &strings);

            #[cfg(feature = "zeroize")]
            {
                tables.zeroize();
                strings.zeroize();
            }

            Some(r)
        } else {
            None
        };

        Ok(match (fixed_term, variable_term) {
            (Some(g), Some(v)) => &g + &v,
            (Some(g), None) => g,
            (None, Some(v)) => v,
            (None, None) => JacobianPoint::identity(),
        })
    }
}

#[cfg(feature = "alloc")]
impl MultiscalarMul for JacobianPoint {
    type Point = JacobianPoint;

    #[cfg_attr(not(feature = "zeroize"), allow(unused_mut))]
    fn multiscalar_mul<I, J>(scalars: I, points: J) -> JacobianPoint
    where
        I: IntoIterator,
        I::Item: Borrow<Scalar>,
        J: IntoIterator,
        J::Item: Borrow<JacobianPoint>,
    {
        let mut tables: Vec<LookupTable<JacobianPoint, 16>> = points
            .into_iter()
            .map(|P| LookupTable::from(P.borrow()))
            .collect();
        let mut strings: Vec<[u8; 33]> = scalars
            .into_iter()
            .map(|s| s.borrow().window_bytes())
            .collect();

        if tables.is_empty() && strings.is_empty() {
            return JacobianPoint::identity();
        }
        let result = windowed_mul(&tables, &strings);

        #[cfg(feature = "zeroize")]
        {
            tables.zeroize();
            strings.zeroize();
        }

        result
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
