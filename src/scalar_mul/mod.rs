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

//! Implementations of the scalar-multiplication ladders.
//!
//! Two strategies are provided: a variable-base interleaved ladder that
//! builds a sixteen-entry table per input point and walks all scalars
//! in 5-bit Booth windows, and a fixed-base comb for the generator that
//! selects from precomputed affine rows in 7-bit Booth windows with no
//! doublings between windows.

pub mod fixed_base;
pub(crate) mod windowed;
