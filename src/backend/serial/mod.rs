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

//! Serial implementations of field arithmetic.

pub mod u64;
