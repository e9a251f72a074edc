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

//! Precomputed fixed-base scalar multiplication, window width 7.

#![allow(non_snake_case)]

use core::ops::Mul;

use subtle::{Choice, ConditionallyNegatable};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

#[cfg(feature = "alloc")]
use crate::field::FieldElement;
use crate::scalar::Scalar;
use crate::weierstrass::{AffinePoint, JacobianPoint};
use crate::window::{booth_recode_w7, LookupTable, W7_MASK};

/// A precomputed table of multiples of a basepoint, for accelerating
/// fixed-base scalar multiplication.  One table, for the standard
/// generator, is provided in the `constants` module.
///
/// Row \\(i\\) holds the multiples \\(d \cdot 2^{7i} B\\) for
/// \\(d = 1, \ldots, 64\\) in affine form, one row per 7-bit Booth
/// window position of a 256-bit scalar (37 rows in all), so a window's
/// recoded digit indexes its row directly.  Because each row is
/// already shifted, the comb never doubles between windows, which is
/// what makes it substantially faster than the variable-base ladder.
///
/// The table is around 148 KB and read in place by the masked row
/// scans; no row is ever copied out whole.
#[derive(Clone)]
pub struct BasepointTable(pub(crate) [LookupTable<AffinePoint, 64>; 37]);

impl BasepointTable {
    /// Create a table of precomputed multiples of `basepoint`.
    #[cfg(feature = "alloc")]
    pub fn create(basepoint: &AffinePoint) -> BasepointTable {
        let mut table = BasepointTable([LookupTable::default(); 37]);

        // base = 2^(7i) * B for the current row.
        let mut base = basepoint.to_jacobian();
        for i in 0..37 {
            let mut row = [base; 64];
            for k in 1..64 {
                row[k] = &row[k - 1] + &base;
            }

            // One shared inversion converts the whole row to affine.
            // No entry is the identity: the multiples d * 2^(7i) with
            // d <= 64 are nonzero mod the (prime) group order.
            let mut z_invs: Vec<FieldElement> = row.iter().map(|p| p.Z).collect();
            FieldElement::batch_invert(&mut z_invs);
            for (k, point) in row.iter().enumerate() {
                let z_inv2 = z_invs[k].square();
                let x = &point.X * &z_inv2;
                let y = &point.Y * &(&z_inv2 * &z_invs[k]);
                table.0[i].0[k] = AffinePoint { x, y };
            }

            base = base.mult_by_pow_2(7);
        }
        table
    }

    /// Get the basepoint for this table.
    pub fn basepoint(&self) -> AffinePoint {
        // Row 0, entry 0 is 1 * 2^0 * B.
        self.0[0].0[0]
    }

    /// The w=7 comb: walk the scalar in 37 Booth windows, selecting the
    /// signed multiple from each precomputed row and accumulating with
    /// mixed additions only.
    #[cfg_attr(not(feature = "zeroize"), allow(unused_mut))]
    fn basepoint_mul(&self, scalar: &Scalar) -> JacobianPoint {
        let mut p_str = scalar.window_bytes();

        // First window: a synthetic zero carry-in below bit 0.
        let wvalue = booth_recode_w7(((p_str[0] as u32) << 1) & W7_MASK);
        let mut t = self.0[0].select(wvalue >> 1);
        t.conditional_negate(Choice::from((wvalue & 1) as u8));
        // The lift masks Z to zero when the selection was the (0,0)
        // identity row, harmonizing the affine and Jacobian encodings
        // of infinity.
        let mut acc = JacobianPoint::from_affine(&t);

        let mut index = 7usize;
        for i in 1..37 {
            let off = (index - 1) / 8;
            let wvalue = (p_str[off] as u32) | ((p_str[off + 1] as u32) << 8);
            let wvalue = booth_recode_w7((wvalue >> ((index - 1) % 8)) & W7_MASK);
            index += 7;

            let mut t = self.0[i].select(wvalue >> 1);
            t.conditional_negate(Choice::from((wvalue & 1) as u8));
            acc = &acc + &t;
        }

        #[cfg(feature = "zeroize")]
        p_str.zeroize();

        acc
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a BasepointTable {
    type Output = JacobianPoint;

    /// Construct a `JacobianPoint` from a `Scalar` \\(k\\) by computing
    /// the multiple \\(kB\\) of this basepoint \\(B\\).
    fn mul(self, scalar: &'b Scalar) -> JacobianPoint {
        // delegate to a private function so that its documentation appears in internal docs
        self.basepoint_mul(scalar)
    }
}

impl<'a, 'b> Mul<&'a BasepointTable> for &'b Scalar {
    type Output = JacobianPoint;

    /// Construct a `JacobianPoint` from a `Scalar` \\(k\\) by computing
    /// the multiple \\(kB\\) of this basepoint \\(B\\).
    fn mul(self, basepoint_table: &'a BasepointTable) -> JacobianPoint {
        basepoint_table * self
    }
}

impl BasepointTable {
    /// Fixed-base scalar multiplication by this table's basepoint.
    pub fn mul_base(&self, scalar: &Scalar) -> JacobianPoint {
        self * scalar
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants;
    use crate::traits::IsIdentity;

    #[test]
    #[cfg(feature = "alloc")]
    fn table_rows_hold_shifted_multiples() {
        let table = BasepointTable::create(&constants::GENERATOR);
        let G = JacobianPoint::generator();

        assert_eq!(table.basepoint(), constants::GENERATOR);

        // Row 0, entry k is (k+1) * G.
        let mut expected = G;
        for k in 0..8 {
            assert_eq!(JacobianPoint::from_affine(&table.0[0].0[k]), expected);
            expected = &expected + &G;
        }

        // Row 1, entry 0 is 2^7 * G, and entry 63 is 64 * 2^7 * G,
        // which is also row 0's last entry shifted.
        let shifted = G.mult_by_pow_2(7);
        assert_eq!(JacobianPoint::from_affine(&table.0[1].0[0]), shifted);
        assert_eq!(
            JacobianPoint::from_affine(&table.0[1].0[63]),
            JacobianPoint::from_affine(&table.0[0].0[63]).mult_by_pow_2(7)
        );
    }

    #[test]
    #[cfg(feature = "alloc")]
    fn comb_matches_the_variable_base_ladder() {
        let table = BasepointTable::create(&constants::GENERATOR);
        let G = JacobianPoint::generator();

        // Structured scalars, including ones whose low windows are all
        // zero (Booth digit 0 in the first window) and the extremes.
        let mut cases = [Scalar::ZERO; 9];
        cases[0] = Scalar::ZERO;
        cases[1] = Scalar::ONE;
        cases[2] = Scalar::from(2u64);
        cases[3] = Scalar::from(128u64);
        cases[4] = Scalar::from(0x80_0000u64);
        cases[5] = Scalar::from(u64::MAX);
        cases[6] = Scalar::from_bytes_mod_order([0x55u8; 32]);
        cases[7] = Scalar::from_bytes_mod_order({
            let mut b = [0u8; 32];
            b[31] = 0xff;
            b
        });
        cases[8] = {
            // The largest valid scalar, n - 1.
            let mut b = [0u8; 32];
            for (i, limb) in constants::ORDER.iter().enumerate() {
                b[i * 8..(i + 1) * 8].copy_from_slice(&limb.to_le_bytes());
            }
            b[0] -= 1;
            Scalar::from_bytes_mod_order(b)
        };

        for k in cases.iter() {
            assert_eq!(table.mul_base(k), &G * k, "mismatch for k = {:?}", k);
        }
    }

    #[test]
    #[cfg(feature = "alloc")]
    fn comb_of_zero_is_the_identity() {
        let table = BasepointTable::create(&constants::GENERATOR);
        assert!(table.mul_base(&Scalar::ZERO).is_identity());
    }

    #[test]
    #[cfg(all(feature = "precomputed-tables", feature = "rand_core"))]
    fn ladders_agree_on_random_scalars() {
        use rand::rngs::OsRng;

        let G = JacobianPoint::generator();
        for _ in 0..16 {
            let k = Scalar::random(&mut OsRng);
            assert_eq!(JacobianPoint::mul_base(&k), &G * &k, "mismatch for k = {:?}", k);
        }
    }

    #[test]
    #[cfg(feature = "precomputed-tables")]
    fn process_wide_table_matches_a_fresh_one() {
        let fresh = BasepointTable::create(&constants::GENERATOR);
        let shared = constants::basepoint_table();
        let k = Scalar::from(0xdead_beef_cafe_f00du64);
        assert_eq!(shared.mul_base(&k), fresh.mul_base(&k));
        assert_eq!(shared.basepoint(), constants::GENERATOR);
    }
}
