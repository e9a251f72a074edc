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

//! The variable-base interleaved ladder, window width 5.

#![allow(non_snake_case)]

use subtle::{Choice, ConditionallyNegatable};

use crate::weierstrass::JacobianPoint;
use crate::window::{booth_recode_w5, LookupTable, W5_MASK};

/// Compute `Σ kᵢ·Pᵢ` over one or more pairs of a precomputed
/// `{1..16}·Pᵢ` table and a 33-byte little-endian scalar string.
///
/// All pairs share one accumulator: each 5-bit window position is
/// processed for every pair before the five doublings that shift the
/// accumulator, so the doubling cost is paid once rather than per
/// pair.  The run is constant-time in the scalar contents: window
/// extraction is plain indexing arithmetic on public positions, and
/// the digit only ever feeds the masked table scan and a conditional
/// negation.
pub(crate) fn windowed_mul(
    tables: &[LookupTable<JacobianPoint, 16>],
    strings: &[[u8; 33]],
) -> JacobianPoint {
    assert_eq!(tables.len(), strings.len());
    debug_assert!(!tables.is_empty());

    // Seed the accumulator from pair zero's topmost window.  Bits 256
    // and above of the string are zero, so this window's Booth sign is
    // always clear and no negation is needed; the remaining pairs join
    // at the same window position in the loop below.
    let mut index: usize = 255;
    let wvalue = ((strings[0][(index - 1) / 8] as u32) >> ((index - 1) % 8)) & W5_MASK;
    let mut acc = tables[0].select(booth_recode_w5(wvalue) >> 1);

    while index >= 5 {
        let first_pair = if index == 255 { 1 } else { 0 };
        for i in first_pair..tables.len() {
            let off = (index - 1) / 8;
            let wvalue = (strings[i][off] as u32) | ((strings[i][off + 1] as u32) << 8);
            let wvalue = booth_recode_w5((wvalue >> ((index - 1) % 8)) & W5_MASK);

            let mut h = tables[i].select(wvalue >> 1);
            h.conditional_negate(Choice::from((wvalue & 1) as u8));
            acc = &acc + &h;
        }

        index -= 5;
        acc = acc.mult_by_pow_2(5);
    }

    // The lowest window covers bits 0..4; shifting the low byte left
    // keeps its Booth carry-in clear.
    for i in 0..tables.len() {
        let wvalue = booth_recode_w5(((strings[i][0] as u32) << 1) & W5_MASK);

        let mut h = tables[i].select(wvalue >> 1);
        h.conditional_negate(Choice::from((wvalue & 1) as u8));
        acc = &acc + &h;
    }

    acc
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::scalar::Scalar;
    use crate::traits::{Identity, IsIdentity};

    fn mul_one(point: &JacobianPoint, scalar: &Scalar) -> JacobianPoint {
        let tables = [LookupTable::from(point)];
        let strings = [scalar.window_bytes()];
        windowed_mul(&tables, &strings)
    }

    /// Repeated addition, the slow but obviously correct reference.
    fn additive_reference(point: &JacobianPoint, k: u64) -> JacobianPoint {
        let mut acc = JacobianPoint::identity();
        for _ in 0..k {
            acc = &acc + point;
        }
        acc
    }

    #[test]
    fn small_scalars_match_repeated_addition() {
        let G = JacobianPoint::generator();
        for k in 0..48u64 {
            assert_eq!(
                mul_one(&G, &Scalar::from(k)),
                additive_reference(&G, k),
                "mismatch at k = {}",
                k
            );
        }
    }

    #[test]
    fn scalars_straddling_window_boundaries() {
        // Values with all-zero low windows stress the Booth carry
        // handling and the identity-row selection.
        let G = JacobianPoint::generator();
        for k in [32u64, 64, 128, 1 << 20, (1 << 35) - 32, u64::MAX] {
            let expected = {
                // Double-and-add reference over the bits of k.
                let mut acc = JacobianPoint::identity();
                for bit in (0..64).rev() {
                    acc = acc.double();
                    if (k >> bit) & 1 == 1 {
                        acc = &acc + &G;
                    }
                }
                acc
            };
            assert_eq!(mul_one(&G, &Scalar::from(k)), expected, "mismatch at k = {}", k);
        }
    }

    #[test]
    fn high_bits_reach_the_seed_window() {
        // A scalar with only its topmost bits set exercises the
        // accumulator-seeding path at index 255.
        let G = JacobianPoint::generator();
        let mut bytes = [0u8; 32];
        bytes[31] = 0xc0; // bits 254 and 255
        let k = Scalar::from_bytes_mod_order(bytes);

        let two_to_254 = {
            let mut acc = G;
            for _ in 0..254 {
                acc = acc.double();
            }
            acc
        };
        assert_eq!(mul_one(&G, &k), &two_to_254.double() + &two_to_254);
    }

    #[test]
    fn zero_scalar_gives_the_identity() {
        let G = JacobianPoint::generator();
        assert!(mul_one(&G, &Scalar::ZERO).is_identity());
    }

    #[test]
    fn multiplying_the_identity_gives_the_identity() {
        let id = JacobianPoint::identity();
        assert!(mul_one(&id, &Scalar::from(12345u64)).is_identity());
    }

    #[test]
    fn two_pairs_interleave_correctly() {
        let G = JacobianPoint::generator();
        let P = additive_reference(&G, 7);

        let tables = [LookupTable::from(&G), LookupTable::from(&P)];
        let strings = [
            Scalar::from(31u64).window_bytes(),
            Scalar::from(29u64).window_bytes(),
        ];
        // 31*G + 29*7G = 234*G.
        assert_eq!(windowed_mul(&tables, &strings), additive_reference(&G, 234));
    }
}
