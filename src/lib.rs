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

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)] // refuse to compile if documentation is missing

//! # nistp256
//!
//! **A pure-Rust implementation of constant-time scalar multiplication
//! on the NIST P-256 curve (also known as secp256r1 and prime256v1).**
//!
//! This crate provides the two operations higher-level protocols such
//! as ECDSA and ECDH are built from:
//!
//! * fixed-base multiplication `k * G` of the standard generator, via a
//!   precomputed 37-row comb ([`weierstrass::JacobianPoint::mul_base`]);
//! * linear combinations `k * G + k_1 * P_1 + ... + k_n * P_n` over
//!   arbitrary points, via an interleaved windowed ladder
//!   ([`weierstrass::JacobianPoint::linear_combination`]).
//!
//! Both are constant-time with respect to the scalars: windowed digits
//! are Booth-recoded with branch-free arithmetic, table rows are
//! selected by masked scans over the whole table, and the group law
//! resolves its exceptional cases (infinity, doubling) with masked
//! selection rather than branches.
//!
//! Field elements are held in the Montgomery domain throughout and only
//! leave it at the explicit byte boundaries.  The arithmetic is the
//! portable 64-bit implementation in [`backend`]; it serves 32-bit
//! targets as well, where the compiler lowers the 128-bit products.
//!
//! # Organization
//!
//! * [`field`]: arithmetic modulo the field prime, including the fixed
//!   addition-chain inversion.
//! * [`scalar`]: integers modulo the group order, canonical by
//!   construction.
//! * [`weierstrass`]: affine and Jacobian points, the complete group
//!   law, conversion, and the top-level multiplication surface.
//! * [`constants`]: the generator, the group order, and the
//!   process-wide basepoint table.
//! * [`traits`]: identity and multiscalar-multiplication traits.
//! * [`errors`]: the error type for fallible operations.

#[cfg(feature = "alloc")]
extern crate alloc;

// Internal macros for the repetitive pass-by-value operator impls.

#[macro_use]
mod macros;

// Modules for low-level operations directly on field elements and curve
// points.

pub mod backend;
pub mod field;
pub mod scalar;
pub mod weierstrass;

// Scalar-multiplication strategies, and the constant-time machinery
// (Booth recoding, masked table scans) they share.

mod scalar_mul;
pub(crate) mod window;

pub use crate::scalar_mul::fixed_base::BasepointTable;

// Traits, error reporting, and other miscellaneous utilities.

pub mod errors;
pub mod traits;

// Low-level curve and point constants, as well as the precomputed
// generator table.

pub mod constants;
