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

//! Field constants for the `u64` backend.
//!
//! All values are little-endian limb arrays.  Elements of the field
//! itself are stored in the Montgomery domain with `R = 2^256`.

use crate::backend::serial::u64::field::FieldElement4;

/// The field prime, `p = 2^256 - 2^224 + 2^192 + 2^96 - 1`.
///
/// This is a raw limb array rather than a `FieldElement4` because the
/// prime is not itself an element of `[0, p)`.
pub(crate) const MODULUS: [u64; 4] = [
    0xffff_ffff_ffff_ffff,
    0x0000_0000_ffff_ffff,
    0x0000_0000_0000_0000,
    0xffff_ffff_0000_0001,
];

/// Zero, in any domain.
pub const ZERO: FieldElement4 = FieldElement4([0, 0, 0, 0]);

/// One in the Montgomery domain, i.e. `R mod p`.
pub const ONE: FieldElement4 = FieldElement4([
    0x0000_0000_0000_0001,
    0xffff_ffff_0000_0000,
    0xffff_ffff_ffff_ffff,
    0x0000_0000_ffff_fffe,
]);

/// `R^2 mod p`, the factor that carries a plain residue into the
/// Montgomery domain through a single Montgomery multiplication.
pub(crate) const RR: FieldElement4 = FieldElement4([
    0x0000_0000_0000_0003,
    0xffff_fffb_ffff_ffff,
    0xffff_ffff_ffff_fffe,
    0x0000_0004_ffff_fffd,
]);
