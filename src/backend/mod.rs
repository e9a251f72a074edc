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

//! Pluggable implementations for different architectures.
//!
//! The backend code is split into two parts: a serial backend, and
//! (eventually) vectorized backends.  Serial code performs field
//! arithmetic on one element at a time; this crate currently ships a
//! single portable serial implementation, built on 64-bit limbs with
//! 128-bit intermediate products.

pub mod serial;
