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

//! Arithmetic on scalars (integers mod the group order).
//!
//! Both of this crate's scalar-multiplication ladders consume a
//! [`Scalar`]: a 256-bit integer held as 32 little-endian bytes,
//! canonically reduced modulo the group order
//!
//! ```text
//! n = ffffffff 00000000 ffffffff ffffffff bce6faad a7179e84 f3b9cac2 fc632551,
//! ```
//!
//! the (prime) number of points on the P-256 curve.  Canonicality is an
//! invariant of the type: every constructor either reduces its input
//! (`from_bytes_mod_order`) or refuses non-canonical encodings
//! (`from_canonical_bytes`), so the ladders never see an oversized
//! value.

use core::fmt;
use core::ops::{Add, AddAssign};

use subtle::{Choice, ConstantTimeEq, CtOption};

#[cfg(feature = "rand_core")]
use rand_core::{CryptoRng, RngCore};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::backend::serial::u64::{adc, sbb};
use crate::constants::ORDER;

/// The `Scalar` struct holds an integer \\(s < n \\), where \\(n\\) is
/// the order of the P-256 group.
#[derive(Copy, Clone, Hash)]
pub struct Scalar {
    /// `bytes` is a little-endian byte encoding of an integer
    /// representing a scalar modulo the group order, held fully reduced.
    pub(crate) bytes: [u8; 32],
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar{{\n\tbytes: {:?},\n}}", &self.bytes)
    }
}

impl Eq for Scalar {}

impl PartialEq for Scalar {
    fn eq(&self, other: &Scalar) -> bool {
        self.ct_eq(other).into()
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Scalar) -> Choice {
        self.bytes.ct_eq(&other.bytes)
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

impl From<u64> for Scalar {
    fn from(x: u64) -> Scalar {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&x.to_le_bytes());
        Scalar { bytes }
    }
}

impl<'a, 'b> Add<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn add(self, rhs: &'b Scalar) -> Scalar {
        let a = to_limbs(&self.bytes);
        let b = to_limbs(&rhs.bytes);

        // Both inputs are below n, so the five-limb sum is below 2n and
        // a single conditional subtraction reduces it.
        let (w0, carry) = adc(a[0], b[0], 0);
        let (w1, carry) = adc(a[1], b[1], carry);
        let (w2, carry) = adc(a[2], b[2], carry);
        let (w3, w4) = adc(a[3], b[3], carry);

        Scalar {
            bytes: from_limbs(&sub_order([w0, w1, w2, w3, w4])),
        }
    }
}

impl<'b> AddAssign<&'b Scalar> for Scalar {
    fn add_assign(&mut self, rhs: &'b Scalar) {
        *self = (self as &Scalar) + rhs;
    }
}

define_add_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);
define_add_assign_variants!(LHS = Scalar, RHS = Scalar);

impl Scalar {
    /// The scalar zero.
    pub const ZERO: Scalar = Scalar { bytes: [0u8; 32] };

    /// The scalar one.
    pub const ONE: Scalar = Scalar {
        bytes: [
            1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0,
        ],
    };

    /// Construct a `Scalar` by reducing a 256-bit little-endian integer
    /// modulo the group order \\(n\\).
    ///
    /// Since \\(n > 2^{255}\\), any 256-bit value is below \\(2n\\) and a
    /// single constant-time conditional subtraction fully reduces it.
    pub fn from_bytes_mod_order(bytes: [u8; 32]) -> Scalar {
        let w = to_limbs(&bytes);
        Scalar {
            bytes: from_limbs(&sub_order([w[0], w[1], w[2], w[3], 0])),
        }
    }

    /// Attempt to construct a `Scalar` from a canonical byte
    /// representation.
    ///
    /// # Return
    ///
    /// - `Some(s)`, where `s` is the `Scalar` corresponding to `bytes`,
    ///   if `bytes` is a canonical little-endian encoding of a value
    ///   below the group order;
    /// - `None` if `bytes` is not a canonical encoding.
    pub fn from_canonical_bytes(bytes: [u8; 32]) -> CtOption<Scalar> {
        let w = to_limbs(&bytes);

        // Canonical iff subtracting the order underflows.
        let (_, borrow) = sbb(w[0], ORDER[0], 0);
        let (_, borrow) = sbb(w[1], ORDER[1], borrow);
        let (_, borrow) = sbb(w[2], ORDER[2], borrow);
        let (_, borrow) = sbb(w[3], ORDER[3], borrow);
        let is_canonical = Choice::from((borrow >> 63) as u8);

        CtOption::new(Scalar { bytes }, is_canonical)
    }

    /// Generate a uniformly random `Scalar` by rejection sampling.
    ///
    /// The number of rounds leaks only how many candidates were
    /// discarded, which is independent of the accepted value.
    #[cfg(feature = "rand_core")]
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Scalar {
        loop {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes);
            let candidate: Option<Scalar> = Scalar::from_canonical_bytes(bytes).into();
            if let Some(scalar) = candidate {
                return scalar;
            }
        }
    }

    /// View this `Scalar` as a sequence of bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Convert this `Scalar` to its underlying sequence of bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.bytes
    }

    /// Serialize the scalar for the windowed ladders: the 32 value bytes
    /// followed by a zero byte, so that a two-byte window read at any
    /// 5-bit boundary up to bit 255 stays in bounds.
    pub(crate) fn window_bytes(&self) -> [u8; 33] {
        let mut s = [0u8; 33];
        s[..32].copy_from_slice(&self.bytes);
        s
    }
}

#[inline]
fn to_limbs(bytes: &[u8; 32]) -> [u64; 4] {
    let mut w = [0u64; 4];
    for (i, chunk) in bytes.chunks_exact(8).enumerate() {
        let mut limb = [0u8; 8];
        limb.copy_from_slice(chunk);
        w[i] = u64::from_le_bytes(limb);
    }
    w
}

#[inline]
fn from_limbs(w: &[u64; 4]) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for (i, limb) in w.iter().enumerate() {
        bytes[i * 8..(i + 1) * 8].copy_from_slice(&limb.to_le_bytes());
    }
    bytes
}

/// Subtract the group order from a five-limb value, adding it back when
/// the difference underflows, and return the low four limbs.
#[inline]
fn sub_order(l: [u64; 5]) -> [u64; 4] {
    let (w0, borrow) = sbb(l[0], ORDER[0], 0);
    let (w1, borrow) = sbb(l[1], ORDER[1], borrow);
    let (w2, borrow) = sbb(l[2], ORDER[2], borrow);
    let (w3, borrow) = sbb(l[3], ORDER[3], borrow);
    let (_, borrow) = sbb(l[4], 0, borrow);

    let (w0, carry) = adc(w0, ORDER[0] & borrow, 0);
    let (w1, carry) = adc(w1, ORDER[1] & borrow, carry);
    let (w2, carry) = adc(w2, ORDER[2] & borrow, carry);
    let (w3, _) = adc(w3, ORDER[3] & borrow, carry);

    [w0, w1, w2, w3]
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
