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

//! Field arithmetic modulo \\(p = 2^{256} - 2^{224} + 2^{192} + 2^{96} - 1\\),
//! using 64-bit limbs with 128-bit products.
//!
//! Elements are kept in the Montgomery domain with \\(R = 2^{256}\\):
//! a residue \\(a\\) is stored as \\(aR \bmod p\\), and the product of
//! two stored values is computed as \\(aR \cdot bR \cdot R^{-1} = abR\\)
//! by a word-by-word Montgomery reduction.  Two properties of the prime
//! make the reduction cheap:
//!
//! * \\(-p^{-1} \equiv 1 \pmod{2^{64}}\\), so the reduction multiplier
//!   for each word is the word itself;
//! * the lowest limb of \\(p\\) is \\(2^{64} - 1\\) and the third limb is
//!   zero, so two of the four partial products per word collapse into
//!   carry propagation.
//!
//! Every operation keeps its result fully reduced in `[0, p)` and runs
//! in time independent of the operand values: reductions are performed
//! by trial subtraction with the borrow spread into an all-ones mask.

use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use subtle::{Choice, ConditionallySelectable, CtOption};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::backend::serial::u64::constants::{MODULUS, RR, ZERO};
use crate::backend::serial::u64::{adc, mac, sbb};

/// A `FieldElement4` represents an element of the field
/// \\(\mathbb Z / (2^{256} - 2^{224} + 2^{192} + 2^{96} - 1)\\).
///
/// The value is held as four little-endian 64-bit limbs, in Montgomery
/// form, fully reduced.
#[derive(Copy, Clone)]
pub struct FieldElement4(pub(crate) [u64; 4]);

impl fmt::Debug for FieldElement4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement4({:?})", &self.0[..])
    }
}

impl ConditionallySelectable for FieldElement4 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        FieldElement4([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
        ])
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for FieldElement4 {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<'a, 'b> Add<&'b FieldElement4> for &'a FieldElement4 {
    type Output = FieldElement4;
    fn add(self, rhs: &'b FieldElement4) -> FieldElement4 {
        let a = &self.0;
        let b = &rhs.0;

        // Bit 256 of p is set, so the sum can occupy five words.
        let (w0, carry) = adc(a[0], b[0], 0);
        let (w1, carry) = adc(a[1], b[1], carry);
        let (w2, carry) = adc(a[2], b[2], carry);
        let (w3, w4) = adc(a[3], b[3], carry);

        FieldElement4(sub_inner(
            [w0, w1, w2, w3, w4],
            [MODULUS[0], MODULUS[1], MODULUS[2], MODULUS[3], 0],
        ))
    }
}

impl<'b> AddAssign<&'b FieldElement4> for FieldElement4 {
    fn add_assign(&mut self, rhs: &'b FieldElement4) {
        *self = (self as &FieldElement4) + rhs;
    }
}

impl<'a, 'b> Sub<&'b FieldElement4> for &'a FieldElement4 {
    type Output = FieldElement4;
    fn sub(self, rhs: &'b FieldElement4) -> FieldElement4 {
        FieldElement4(sub_inner(
            [self.0[0], self.0[1], self.0[2], self.0[3], 0],
            [rhs.0[0], rhs.0[1], rhs.0[2], rhs.0[3], 0],
        ))
    }
}

impl<'b> SubAssign<&'b FieldElement4> for FieldElement4 {
    fn sub_assign(&mut self, rhs: &'b FieldElement4) {
        *self = (self as &FieldElement4) - rhs;
    }
}

impl<'a, 'b> Mul<&'b FieldElement4> for &'a FieldElement4 {
    type Output = FieldElement4;
    fn mul(self, rhs: &'b FieldElement4) -> FieldElement4 {
        let a = &self.0;
        let b = &rhs.0;

        // Schoolbook 4x4 multiplication into eight limbs.
        let (r0, carry) = mac(0, a[0], b[0], 0);
        let (r1, carry) = mac(0, a[0], b[1], carry);
        let (r2, carry) = mac(0, a[0], b[2], carry);
        let (r3, r4) = mac(0, a[0], b[3], carry);

        let (r1, carry) = mac(r1, a[1], b[0], 0);
        let (r2, carry) = mac(r2, a[1], b[1], carry);
        let (r3, carry) = mac(r3, a[1], b[2], carry);
        let (r4, r5) = mac(r4, a[1], b[3], carry);

        let (r2, carry) = mac(r2, a[2], b[0], 0);
        let (r3, carry) = mac(r3, a[2], b[1], carry);
        let (r4, carry) = mac(r4, a[2], b[2], carry);
        let (r5, r6) = mac(r5, a[2], b[3], carry);

        let (r3, carry) = mac(r3, a[3], b[0], 0);
        let (r4, carry) = mac(r4, a[3], b[1], carry);
        let (r5, carry) = mac(r5, a[3], b[2], carry);
        let (r6, r7) = mac(r6, a[3], b[3], carry);

        FieldElement4::montgomery_reduce([r0, r1, r2, r3, r4, r5, r6, r7])
    }
}

impl<'b> MulAssign<&'b FieldElement4> for FieldElement4 {
    fn mul_assign(&mut self, rhs: &'b FieldElement4) {
        *self = (self as &FieldElement4) * rhs;
    }
}

impl<'a> Neg for &'a FieldElement4 {
    type Output = FieldElement4;
    fn neg(self) -> FieldElement4 {
        &ZERO - self
    }
}

impl Neg for FieldElement4 {
    type Output = FieldElement4;
    fn neg(self) -> FieldElement4 {
        -&self
    }
}

define_add_variants!(
    LHS = FieldElement4,
    RHS = FieldElement4,
    Output = FieldElement4
);
define_sub_variants!(
    LHS = FieldElement4,
    RHS = FieldElement4,
    Output = FieldElement4
);
define_mul_variants!(
    LHS = FieldElement4,
    RHS = FieldElement4,
    Output = FieldElement4
);
define_add_assign_variants!(LHS = FieldElement4, RHS = FieldElement4);
define_sub_assign_variants!(LHS = FieldElement4, RHS = FieldElement4);
define_mul_assign_variants!(LHS = FieldElement4, RHS = FieldElement4);

impl FieldElement4 {
    /// Compute `2 * self`.
    pub fn mul2(&self) -> FieldElement4 {
        self + self
    }

    /// Compute `3 * self`.
    pub fn mul3(&self) -> FieldElement4 {
        &self.mul2() + self
    }

    /// Compute `self / 2`, i.e. the unique element that doubles to `self`.
    ///
    /// Odd representatives pick up a copy of `p` before the shift so the
    /// division is exact; the selection mask is the low bit of the value.
    pub fn half(&self) -> FieldElement4 {
        let mask = 0u64.wrapping_sub(self.0[0] & 1);

        let (w0, carry) = adc(self.0[0], MODULUS[0] & mask, 0);
        let (w1, carry) = adc(self.0[1], MODULUS[1] & mask, carry);
        let (w2, carry) = adc(self.0[2], MODULUS[2] & mask, carry);
        let (w3, w4) = adc(self.0[3], MODULUS[3] & mask, carry);

        FieldElement4([
            (w0 >> 1) | (w1 << 63),
            (w1 >> 1) | (w2 << 63),
            (w2 >> 1) | (w3 << 63),
            (w3 >> 1) | (w4 << 63),
        ])
    }

    /// Compute `self^2`.
    pub fn square(&self) -> FieldElement4 {
        self * self
    }

    /// Compute `self^(2^k)` by `k` successive squarings.  Requires `k > 0`.
    pub(crate) fn pow2k(&self, k: u32) -> FieldElement4 {
        debug_assert!(k > 0);
        let mut z = self.square();
        for _ in 1..k {
            z = z.square();
        }
        z
    }

    /// Montgomery reduction: given an eight-limb value `t < p * 2^256`,
    /// compute `t * R^{-1} mod p`, fully reduced.
    fn montgomery_reduce(t: [u64; 8]) -> FieldElement4 {
        let [a0, a1, a2, a3, a4, a5, a6, a7] = t;

        // Each round folds one low word into the running value by adding
        // word * p * 2^{64*i}.  The multiplier is the word itself since
        // -p^{-1} = 1 mod 2^64, and the word * (2^64 - 1) contribution of
        // the lowest limb of p reduces to seeding the carry chain with
        // the word.
        let (a1, carry) = mac(a1, a0, MODULUS[1], a0);
        let (a2, carry) = adc(a2, 0, carry);
        let (a3, carry) = mac(a3, a0, MODULUS[3], carry);
        let (a4, carry2) = adc(a4, 0, carry);

        let (a2, carry) = mac(a2, a1, MODULUS[1], a1);
        let (a3, carry) = adc(a3, 0, carry);
        let (a4, carry) = mac(a4, a1, MODULUS[3], carry);
        let (a5, carry2) = adc(a5, carry2, carry);

        let (a3, carry) = mac(a3, a2, MODULUS[1], a2);
        let (a4, carry) = adc(a4, 0, carry);
        let (a5, carry) = mac(a5, a2, MODULUS[3], carry);
        let (a6, carry2) = adc(a6, carry2, carry);

        let (a4, carry) = mac(a4, a3, MODULUS[1], a3);
        let (a5, carry) = adc(a5, 0, carry);
        let (a6, carry) = mac(a6, a3, MODULUS[3], carry);
        let (a7, a8) = adc(a7, carry2, carry);

        FieldElement4(sub_inner(
            [a4, a5, a6, a7, a8],
            [MODULUS[0], MODULUS[1], MODULUS[2], MODULUS[3], 0],
        ))
    }

    /// Attempt to parse a canonical little-endian encoding of a field
    /// element, carrying it into the Montgomery domain.
    ///
    /// The result is `None` when the encoded value is not fully reduced,
    /// i.e. not below `p`.
    pub fn from_bytes(bytes: &[u8; 32]) -> CtOption<FieldElement4> {
        let mut w = [0u64; 4];
        for (i, chunk) in bytes.chunks_exact(8).enumerate() {
            let mut limb = [0u8; 8];
            limb.copy_from_slice(chunk);
            w[i] = u64::from_le_bytes(limb);
        }

        // The encoding is canonical iff subtracting p underflows.
        let (_, borrow) = sbb(w[0], MODULUS[0], 0);
        let (_, borrow) = sbb(w[1], MODULUS[1], borrow);
        let (_, borrow) = sbb(w[2], MODULUS[2], borrow);
        let (_, borrow) = sbb(w[3], MODULUS[3], borrow);
        let is_canonical = Choice::from((borrow >> 63) as u8);

        CtOption::new(&FieldElement4(w) * &RR, is_canonical)
    }

    /// Encode the element as canonical little-endian bytes, leaving the
    /// Montgomery domain.
    pub fn to_bytes(&self) -> [u8; 32] {
        // Reducing (self, 0) Montgomery-multiplies by an implicit 1.
        let plain =
            FieldElement4::montgomery_reduce([self.0[0], self.0[1], self.0[2], self.0[3], 0, 0, 0, 0]);

        let mut bytes = [0u8; 32];
        for (i, limb) in plain.0.iter().enumerate() {
            bytes[i * 8..(i + 1) * 8].copy_from_slice(&limb.to_le_bytes());
        }
        bytes
    }
}

/// Subtract the five-limb value `r` from the five-limb value `l`,
/// adding `p` back when the difference underflows, and return the low
/// four limbs.  This is the shared reduction tail of addition,
/// subtraction, and Montgomery reduction.
#[inline]
fn sub_inner(l: [u64; 5], r: [u64; 5]) -> [u64; 4] {
    let (w0, borrow) = sbb(l[0], r[0], 0);
    let (w1, borrow) = sbb(l[1], r[1], borrow);
    let (w2, borrow) = sbb(l[2], r[2], borrow);
    let (w3, borrow) = sbb(l[3], r[3], borrow);
    let (_, borrow) = sbb(l[4], r[4], borrow);

    // `borrow` is all-ones iff l < r; use it to select a corrective +p.
    let (w0, carry) = adc(w0, MODULUS[0] & borrow, 0);
    let (w1, carry) = adc(w1, MODULUS[1] & borrow, carry);
    let (w2, carry) = adc(w2, MODULUS[2] & borrow, carry);
    let (w3, _) = adc(w3, MODULUS[3] & borrow, carry);

    [w0, w1, w2, w3]
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::backend::serial::u64::constants::ONE;

    fn fe(bytes: &[u8; 32]) -> FieldElement4 {
        FieldElement4::from_bytes(bytes).unwrap()
    }

    /// An arbitrary reduced element for algebraic identities.
    static A_BYTES: [u8; 32] = [
        0x04, 0xfe, 0xdc, 0xba, 0x98, 0x76, 0x54, 0x32, 0x10, 0xef, 0xcd, 0xab, 0x89, 0x67, 0x45,
        0x23, 0x01, 0x22, 0x44, 0x66, 0x88, 0xaa, 0xcc, 0xee, 0x11, 0x33, 0x55, 0x77, 0x99, 0xbb,
        0xdd, 0x0f,
    ];

    /// Another arbitrary reduced element.
    static B_BYTES: [u8; 32] = [
        0x13, 0x57, 0x9b, 0xdf, 0x24, 0x68, 0xac, 0xe0, 0x0f, 0x1e, 0x2d, 0x3c, 0x4b, 0x5a, 0x69,
        0x78, 0x87, 0x96, 0xa5, 0xb4, 0xc3, 0xd2, 0xe1, 0xf0, 0x01, 0x12, 0x23, 0x34, 0x45, 0x56,
        0x67, 0x08,
    ];

    #[test]
    fn one_in_montgomery_form() {
        // from_bytes multiplies by R^2, so the encoding of 1 must land on
        // the R mod p constant; this pins RR against ONE.
        let mut one_bytes = [0u8; 32];
        one_bytes[0] = 1;
        assert_eq!(fe(&one_bytes).0, ONE.0);
        assert_eq!(ONE.to_bytes(), one_bytes);
    }

    #[test]
    fn bytes_round_trip() {
        assert_eq!(fe(&A_BYTES).to_bytes(), A_BYTES);
        assert_eq!(fe(&B_BYTES).to_bytes(), B_BYTES);
    }

    #[test]
    fn non_canonical_encodings_rejected() {
        let mut p_bytes = [0u8; 32];
        for (i, limb) in MODULUS.iter().enumerate() {
            p_bytes[i * 8..(i + 1) * 8].copy_from_slice(&limb.to_le_bytes());
        }
        assert!(bool::from(FieldElement4::from_bytes(&p_bytes).is_none()));

        let ff_bytes = [0xffu8; 32];
        assert!(bool::from(FieldElement4::from_bytes(&ff_bytes).is_none()));

        // p - 1 is the largest canonical encoding.
        p_bytes[0] -= 1;
        assert!(bool::from(FieldElement4::from_bytes(&p_bytes).is_some()));
    }

    #[test]
    fn add_neg_is_zero() {
        let a = fe(&A_BYTES);
        assert_eq!((&a + &(-&a)).to_bytes(), [0u8; 32]);
    }

    #[test]
    fn add_then_sub_round_trips() {
        let a = fe(&A_BYTES);
        let b = fe(&B_BYTES);
        assert_eq!((&(&a + &b) - &b).to_bytes(), A_BYTES);
        assert_eq!((&a + &(&b - &a)).to_bytes(), B_BYTES);
    }

    #[test]
    fn mul_by_montgomery_one_is_identity() {
        let a = fe(&A_BYTES);
        assert_eq!((&a * &ONE).to_bytes(), A_BYTES);
    }

    #[test]
    fn mul_commutes_and_associates() {
        let a = fe(&A_BYTES);
        let b = fe(&B_BYTES);
        assert_eq!((&a * &b).to_bytes(), (&b * &a).to_bytes());

        let ab_a = &(&a * &b) * &a;
        let a_ba = &a * &(&b * &a);
        assert_eq!(ab_a.to_bytes(), a_ba.to_bytes());
    }

    #[test]
    fn mul_distributes_over_add() {
        let a = fe(&A_BYTES);
        let b = fe(&B_BYTES);
        let lhs = &a * &(&a + &b);
        let rhs = &(&a * &a) + &(&a * &b);
        assert_eq!(lhs.to_bytes(), rhs.to_bytes());
    }

    #[test]
    fn square_matches_mul() {
        let a = fe(&A_BYTES);
        assert_eq!(a.square().to_bytes(), (&a * &a).to_bytes());
        assert_eq!(a.pow2k(3).to_bytes(), a.square().square().square().to_bytes());
    }

    #[test]
    fn small_multiples() {
        let a = fe(&A_BYTES);
        assert_eq!(a.mul2().to_bytes(), (&a + &a).to_bytes());
        assert_eq!(a.mul3().to_bytes(), (&(&a + &a) + &a).to_bytes());
    }

    #[test]
    fn half_inverts_doubling() {
        let a = fe(&A_BYTES);
        assert_eq!(a.mul2().half().to_bytes(), A_BYTES);
        assert_eq!(a.half().mul2().to_bytes(), A_BYTES);
        // An odd value exercises the corrective +p path.
        let mut odd = [0u8; 32];
        odd[0] = 0x0b;
        let o = fe(&odd);
        assert_eq!(o.half().mul2().to_bytes(), odd);
    }
}
