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
//! the NIST P-256 base field prime.
//!
//! The `nistp256::field` module provides a type alias
//! `nistp256::field::FieldElement` to a field element type defined in
//! the `backend` module.
//!
//! Field operations defined in terms of machine operations, such as
//! field multiplication or squaring, are defined in the backend
//! implementation.
//!
//! Field operations defined in terms of other field operations, such as
//! field inversion, are defined here.

use core::cmp::{Eq, PartialEq};

use subtle::{Choice, ConstantTimeEq};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::backend;

pub use crate::backend::serial::u64::field::*;

/// A `FieldElement` represents an element of the field
/// \\(\mathbb Z / (2^{256} - 2^{224} + 2^{192} + 2^{96} - 1)\\).
///
/// The `FieldElement` type is an alias for the platform-specific
/// implementation; the value is always held in the Montgomery domain.
pub type FieldElement = backend::serial::u64::field::FieldElement4;

impl Eq for FieldElement {}

impl PartialEq for FieldElement {
    fn eq(&self, other: &FieldElement) -> bool {
        self.ct_eq(other).into()
    }
}

impl ConstantTimeEq for FieldElement {
    /// Test equality between two `FieldElement`s.
    ///
    /// The internal representation is canonical, so the limbs can be
    /// compared directly.
    fn ct_eq(&self, other: &FieldElement) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl FieldElement {
    /// The additive identity, in any domain.
    pub const ZERO: FieldElement = backend::serial::u64::constants::ZERO;

    /// The multiplicative identity, in the Montgomery domain
    /// (i.e. `R mod p`).
    pub const ONE: FieldElement = backend::serial::u64::constants::ONE;

    /// Determine if this `FieldElement` is zero.
    ///
    /// # Return
    ///
    /// If zero, return `Choice(1)`.  Otherwise, return `Choice(0)`.
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&FieldElement::ZERO)
    }

    /// Given a nonzero field element, compute its inverse.
    ///
    /// The inverse is computed as `self^(p-2)`, since `x^(p-2) * x = x^(p-1) = 1
    /// (mod p)` by Fermat's little theorem.  The hexadecimal structure of
    /// `p - 2 = ffffffff 00000001 00000000 00000000 00000000 ffffffff
    /// ffffffff fffffffd` admits a short fixed addition chain: precompute
    /// `self^(2^k - 1)` for `k` in {2, 4, 8, 16, 32} (31 squarings and 5
    /// multiplications), then stitch the windows together with runs of
    /// squarings.  255 squarings and 13 multiplications in total, with no
    /// dependence on the value.
    ///
    /// This function returns zero on zero input; the caller is expected
    /// to have excluded the point at infinity beforehand.
    pub fn invert(&self) -> FieldElement {
        let p2 = &self.square() * self;
        let p4 = &p2.pow2k(2) * &p2;
        let p8 = &p4.pow2k(4) * &p4;
        let p16 = &p8.pow2k(8) * &p8;
        let p32 = &p16.pow2k(16) * &p16;

        let r = &p32.pow2k(32) * self;
        let r = &r.pow2k(128) * &p32;
        let r = &r.pow2k(32) * &p32;
        let r = &r.pow2k(16) * &p16;
        let r = &r.pow2k(8) * &p8;
        let r = &r.pow2k(4) * &p4;
        let r = &r.pow2k(2) * &p2;
        &r.pow2k(2) * self
    }

    /// Given a slice of nonzero public `FieldElement`s, replace each with
    /// its inverse at the cost of a single field inversion.
    ///
    /// All input `FieldElement`s **MUST** be nonzero.
    #[cfg(feature = "alloc")]
    pub fn batch_invert(inputs: &mut [FieldElement]) {
        // Montgomery's Trick and Fast Implementation of Masked AES
        // Genelle, Prouff and Quisquater
        // Section 3.2
        let n = inputs.len();
        let mut scratch = Vec::new();
        scratch.resize(n, FieldElement::ONE);

        // Keep an accumulator of all of the previous products,
        // recording them in the scratch space.
        let mut acc = FieldElement::ONE;
        for (input, scratch) in inputs.iter().zip(scratch.iter_mut()) {
            *scratch = acc;
            acc = &acc * input;
        }

        // acc is nonzero iff all inputs are nonzero
        assert!(bool::from(!acc.is_zero()));

        // Compute the inverse of all products
        acc = acc.invert();

        // Pass through the vector backwards to compute the inverses
        // in place
        for (input, scratch) in inputs.iter_mut().rev().zip(scratch.into_iter().rev()) {
            let tmp = &acc * &*input;
            *input = &acc * &scratch;
            acc = tmp;
        }
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    /// An arbitrary reduced element.
    static A_BYTES: [u8; 32] = [
        0x2f, 0x9a, 0x11, 0xc8, 0x33, 0x7d, 0x60, 0x55, 0x1e, 0x40, 0x9c, 0x2b, 0x87, 0x61, 0xf0,
        0x3a, 0x5c, 0x0d, 0xee, 0x72, 0x84, 0x19, 0xa6, 0xbf, 0x3d, 0xc4, 0x58, 0x07, 0x99, 0x26,
        0xe5, 0x31,
    ];

    fn a() -> FieldElement {
        FieldElement::from_bytes(&A_BYTES).unwrap()
    }

    #[test]
    fn invert_times_self_is_one() {
        let a = a();
        assert_eq!(&a.invert() * &a, FieldElement::ONE);
    }

    #[test]
    fn invert_is_an_involution() {
        let a = a();
        assert_eq!(a.invert().invert(), a);
    }

    #[test]
    fn invert_one_is_one() {
        assert_eq!(FieldElement::ONE.invert(), FieldElement::ONE);
    }

    #[test]
    fn invert_zero_is_zero() {
        assert_eq!(FieldElement::ZERO.invert(), FieldElement::ZERO);
    }

    #[test]
    fn is_zero_discriminates() {
        assert!(bool::from(FieldElement::ZERO.is_zero()));
        assert!(!bool::from(FieldElement::ONE.is_zero()));
        assert!(!bool::from(a().is_zero()));
    }

    #[test]
    #[cfg(feature = "alloc")]
    fn batch_invert_matches_invert() {
        let a = a();
        let b = &a * &a;
        let c = &b * &a;
        let mut elements = [a, b, c];
        FieldElement::batch_invert(&mut elements);
        assert_eq!(elements[0], a.invert());
        assert_eq!(elements[1], b.invert());
        assert_eq!(elements[2], c.invert());
    }
}
