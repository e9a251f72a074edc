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

//! Code for Booth signed-digit recoding and constant-time table lookup.
//!
//! Both scalar-multiplication ladders walk the scalar in fixed-width
//! windows.  Recoding each window into a signed digit halves the table
//! size for a given width: a window value `v` with carry-in `c` becomes
//! a digit in \\([-2^{w-1}, 2^{w-1}]\\) plus a carry into the next
//! window, and the table only needs the non-negative multiples because
//! negation of a point is cheap and constant-time.

#![allow(non_snake_case)]

use core::fmt::Debug;

use subtle::{ConditionallySelectable, ConstantTimeEq};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::weierstrass::JacobianPoint;

/// Mask for a w=5 Booth window: five scalar bits plus the carry-in bit.
pub(crate) const W5_MASK: u32 = (1 << 6) - 1;

/// Mask for a w=7 Booth window: seven scalar bits plus the carry-in bit.
pub(crate) const W7_MASK: u32 = (1 << 8) - 1;

/// Booth-recode a 6-bit window value (carry-in in the low bit, the next
/// window's low bit as MSB) for window width 5.
///
/// The result packs the digit magnitude in the high bits and the sign
/// in bit zero; the digit lies in `[0, 16]`.  The recoding is a fixed
/// sequence of arithmetic on the window value, so it is trivially
/// constant-time.
pub(crate) fn booth_recode_w5(input: u32) -> u32 {
    let s = !((input >> 5).wrapping_sub(1));
    let d = (1 << 6) - input - 1;
    let d = (d & s) | (input & !s);
    let d = (d >> 1) + (d & 1);

    (d << 1) + (s & 1)
}

/// Booth-recode an 8-bit window value for window width 7; the digit
/// lies in `[0, 64]`.
pub(crate) fn booth_recode_w7(input: u32) -> u32 {
    let s = !((input >> 7).wrapping_sub(1));
    let d = (1 << 8) - input - 1;
    let d = (d & s) | (input & !s);
    let d = (d >> 1) + (d & 1);

    (d << 1) + (s & 1)
}

/// A lookup table of precomputed multiples of a point \\(P\\), used to
/// select \\(xP\\) for \\(0 \leq x \leq N\\) in constant time.
///
/// Row zero, the identity, is never materialized: it is encoded as
/// all-zero coordinates, which is exactly what an untouched accumulator
/// holds, so stored rows are offset by one.  `select` scans the whole
/// table and masks each row in or out, so neither the access pattern
/// nor the running time depends on the index.
#[derive(Copy, Clone)]
#[repr(align(64))]
pub(crate) struct LookupTable<T, const N: usize>(pub(crate) [T; N]);

impl<T, const N: usize> LookupTable<T, N>
where
    T: ConditionallySelectable + Default,
{
    /// Given \\(0 \leq x \leq N\\), return \\(xP\\) in constant time,
    /// with index 0 yielding the identity encoding.
    pub fn select(&self, index: u32) -> T {
        debug_assert!(index as usize <= N);

        let mut t = T::default();
        for j in 1..=N {
            let c = (j as u32).ct_eq(&index);
            t.conditional_assign(&self.0[j - 1], c);
        }
        t
    }
}

impl<T: Copy + Default, const N: usize> Default for LookupTable<T, N> {
    fn default() -> LookupTable<T, N> {
        LookupTable([T::default(); N])
    }
}

impl<T: Debug, const N: usize> Debug for LookupTable<T, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "LookupTable({:?})", &self.0[..])
    }
}

impl<'a> From<&'a JacobianPoint> for LookupTable<JacobianPoint, 16> {
    /// Build the table `[P, 2P, ..., 16P]` used by the w=5 ladder.
    ///
    /// The schedule below (seven doublings, eight additions) computes
    /// every entry from entries that are already present.
    fn from(P: &'a JacobianPoint) -> Self {
        let mut row = [*P; 16];
        row[1] = row[0].double();
        row[2] = &row[1] + &row[0];
        row[3] = row[1].double();
        row[5] = row[2].double();
        row[7] = row[3].double();
        row[11] = row[5].double();
        row[4] = &row[3] + &row[0];
        row[6] = &row[5] + &row[0];
        row[8] = &row[7] + &row[0];
        row[12] = &row[11] + &row[0];
        row[13] = row[6].double();
        row[9] = row[4].double();
        row[14] = &row[13] + &row[0];
        row[10] = &row[9] + &row[0];
        row[15] = &row[14] + &row[0];
        LookupTable(row)
    }
}

#[cfg(feature = "zeroize")]
impl<T, const N: usize> Zeroize for LookupTable<T, N>
where
    T: Copy + Default + Zeroize,
{
    fn zeroize(&mut self) {
        self.0.iter_mut().for_each(Zeroize::zeroize);
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::traits::Identity;

    /// The signed value a Booth-recoded window contributes at its own
    /// position: the window's five (or seven) value bits plus the
    /// carry-in, minus 2^w if the top bit carries out.
    fn booth_reference(input: u32, w: u32) -> i32 {
        ((input >> 1) + (input & 1)) as i32 - (((input >> w) & 1) << w) as i32
    }

    fn unpack(recoded: u32) -> i32 {
        let magnitude = (recoded >> 1) as i32;
        if recoded & 1 == 1 {
            -magnitude
        } else {
            magnitude
        }
    }

    #[test]
    fn booth_w5_matches_reference() {
        for input in 0..(1u32 << 6) {
            let recoded = booth_recode_w5(input);
            assert_eq!(unpack(recoded), booth_reference(input, 5));
            assert!((recoded >> 1) <= 16);
        }
    }

    #[test]
    fn booth_w7_matches_reference() {
        for input in 0..(1u32 << 8) {
            let recoded = booth_recode_w7(input);
            assert_eq!(unpack(recoded), booth_reference(input, 7));
            assert!((recoded >> 1) <= 64);
        }
    }

    #[test]
    fn select_returns_the_indexed_multiple() {
        let G = JacobianPoint::generator();
        let table = LookupTable::<JacobianPoint, 16>::from(&G);

        // Entry j holds (j+1) * G.
        let mut expected = G;
        for j in 1..=16u32 {
            assert_eq!(table.select(j), expected);
            expected = &expected + &G;
        }
    }

    #[test]
    fn select_zero_is_the_identity() {
        let G = JacobianPoint::generator();
        let table = LookupTable::<JacobianPoint, 16>::from(&G);
        assert_eq!(table.select(0), JacobianPoint::identity());
    }

    #[test]
    fn table_entries_stay_consistent_under_doubling() {
        let G = JacobianPoint::generator();
        let table = LookupTable::<JacobianPoint, 16>::from(&G);
        for j in 1..=8u32 {
            assert_eq!(table.select(j).double(), table.select(2 * j));
        }
    }
}
