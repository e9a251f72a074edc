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

//! Various constants, such as the standard generator and the group
//! order.
//!
//! Field-level constants live with the arithmetic backend; this module
//! holds the curve-level values, all little-endian and, where they are
//! field elements, in the Montgomery domain.

#![allow(non_snake_case)]

use crate::backend::serial::u64::constants::RR;
use crate::backend::serial::u64::field::FieldElement4;
use crate::field::FieldElement;
use crate::weierstrass::AffinePoint;

#[cfg(feature = "precomputed-tables")]
use std::sync::OnceLock;

#[cfg(feature = "precomputed-tables")]
use crate::scalar_mul::fixed_base::BasepointTable;

/// The order of the P-256 group, the 256-bit prime
/// `n = ffffffff 00000000 ffffffff ffffffff bce6faad a7179e84 f3b9cac2 fc632551`.
pub(crate) const ORDER: [u64; 4] = [
    0xf3b9_cac2_fc63_2551,
    0xbce6_faad_a717_9e84,
    0xffff_ffff_ffff_ffff,
    0xffff_ffff_0000_0000,
];

/// The curve coefficient
/// `b = 5ac635d8 aa3a93e7 b3ebbd55 769886bc 651d06b0 cc53b0f6 3bce3c3e 27d2604b`,
/// as plain little-endian limbs.
const CURVE_B: [u64; 4] = [
    0x3bce_3c3e_27d2_604b,
    0x651d_06b0_cc53_b0f6,
    0xb3eb_bd55_7698_86bc,
    0x5ac6_35d8_aa3a_93e7,
];

/// The standard P-256 generator, with coordinates in the Montgomery
/// domain.
///
/// These are the values the fixed-base path compares a caller-supplied
/// generator against; a generator that fails the comparison is handled
/// as an ordinary point.
pub const GENERATOR: AffinePoint = AffinePoint {
    x: FieldElement4([
        0x79e7_30d4_18a9_143c,
        0x75ba_95fc_5fed_b601,
        0x79fb_732b_7762_2510,
        0x1890_5f76_a537_55c6,
    ]),
    y: FieldElement4([
        0xddf2_5357_ce95_560a,
        0x8b4a_b8e4_ba19_e45c,
        0xd2e8_8688_dd21_f325,
        0x8571_ff18_2588_5d85,
    ]),
};

/// The curve coefficient `b`, carried into the Montgomery domain.
pub(crate) fn curve_b() -> FieldElement {
    &FieldElement4(CURVE_B) * &RR
}

/// The process-wide precomputed table for the standard generator.
///
/// The table contents are fixed data (row `i` holds the multiples
/// \\(d \cdot 2^{7i} G\\) for \\(d = 1, \ldots, 64\\)) and are
/// materialized once, on first use.  Selection reads the table in
/// place.
#[cfg(feature = "precomputed-tables")]
pub fn basepoint_table() -> &'static BasepointTable {
    static TABLE: OnceLock<BasepointTable> = OnceLock::new();
    TABLE.get_or_init(|| BasepointTable::create(&GENERATOR))
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::traits::ValidityCheck;
    use crate::weierstrass::JacobianPoint;

    /// Plain little-endian encoding of the generator's x coordinate.
    static GEN_X_BYTES: [u8; 32] = [
        0x96, 0xc2, 0x98, 0xd8, 0x45, 0x39, 0xa1, 0xf4, 0xa0, 0x33, 0xeb, 0x2d, 0x81, 0x7d, 0x03,
        0x77, 0xf2, 0x40, 0xa4, 0x63, 0xe5, 0xe6, 0xbc, 0xf8, 0x47, 0x42, 0x2c, 0xe1, 0xf2, 0xd1,
        0x17, 0x6b,
    ];

    /// Plain little-endian encoding of the generator's y coordinate.
    static GEN_Y_BYTES: [u8; 32] = [
        0xf5, 0x51, 0xbf, 0x37, 0x68, 0x40, 0xb6, 0xcb, 0xce, 0x5e, 0x31, 0x6b, 0x57, 0x33, 0xce,
        0x2b, 0x16, 0x9e, 0x0f, 0x7c, 0x4a, 0xeb, 0xe7, 0x8e, 0x9b, 0x7f, 0x1a, 0xfe, 0xe2, 0x42,
        0xe3, 0x4f,
    ];

    #[test]
    fn generator_constants_match_plain_coordinates() {
        // The Montgomery-domain constants must agree with carrying the
        // published plain coordinates into the domain.
        let x = FieldElement::from_bytes(&GEN_X_BYTES).unwrap();
        let y = FieldElement::from_bytes(&GEN_Y_BYTES).unwrap();
        assert_eq!(x, GENERATOR.x);
        assert_eq!(y, GENERATOR.y);
    }

    #[test]
    fn generator_satisfies_the_curve_equation() {
        assert!(JacobianPoint::generator().is_valid());

        // Directly: y^2 = x^3 - 3x + b.
        let x = GENERATOR.x;
        let y = GENERATOR.y;
        let lhs = y.square();
        let rhs = &(&(&x.square() * &x) - &x.mul3()) + &curve_b();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn order_times_generator_is_the_identity() {
        use crate::scalar::Scalar;
        use crate::traits::IsIdentity;

        // n reduces to zero, so n * G must be the identity.
        let mut n_bytes = [0u8; 32];
        for (i, limb) in ORDER.iter().enumerate() {
            n_bytes[i * 8..(i + 1) * 8].copy_from_slice(&limb.to_le_bytes());
        }
        let n = Scalar::from_bytes_mod_order(n_bytes);
        assert!((&JacobianPoint::generator() * &n).is_identity());
    }

    #[test]
    fn order_minus_one_negates_the_generator() {
        use crate::scalar::Scalar;

        let mut bytes = [0u8; 32];
        for (i, limb) in ORDER.iter().enumerate() {
            bytes[i * 8..(i + 1) * 8].copy_from_slice(&limb.to_le_bytes());
        }
        bytes[0] -= 1;
        let n_minus_one = Scalar::from_bytes_mod_order(bytes);

        let G = JacobianPoint::generator();
        assert_eq!(&G * &n_minus_one, -&G);
    }

    #[test]
    #[cfg(feature = "precomputed-tables")]
    fn basepoint_table_is_built_for_the_generator() {
        assert_eq!(basepoint_table().basepoint(), GENERATOR);
    }

    #[test]
    #[cfg(feature = "precomputed-tables")]
    fn fixed_base_known_multiples() {
        use crate::scalar::Scalar;
        use crate::traits::IsIdentity;

        let G = JacobianPoint::generator();

        // k = 1 gives the generator itself.
        let one_G = JacobianPoint::mul_base(&Scalar::ONE).to_affine().unwrap();
        assert_eq!(one_G.x_bytes(), GEN_X_BYTES);
        assert_eq!(one_G.y_bytes(), GEN_Y_BYTES);

        // k = 2 matches the point layer's doubling.
        assert_eq!(JacobianPoint::mul_base(&Scalar::from(2u64)), G.double());

        // k = n - 1 gives -G: same x, negated y.
        let mut bytes = [0u8; 32];
        for (i, limb) in ORDER.iter().enumerate() {
            bytes[i * 8..(i + 1) * 8].copy_from_slice(&limb.to_le_bytes());
        }
        bytes[0] -= 1;
        let minus_G = JacobianPoint::mul_base(&Scalar::from_bytes_mod_order(bytes));
        assert_eq!(minus_G, -&G);

        // k = n reduces to zero and gives the identity.
        bytes[0] += 1;
        let n = Scalar::from_bytes_mod_order(bytes);
        assert!(JacobianPoint::mul_base(&n).is_identity());

        // 7*G via the comb equals 7*G via the variable-base ladder.
        let seven = Scalar::from(7u64);
        assert_eq!(JacobianPoint::mul_base(&seven), &G * &seven);
    }
}
