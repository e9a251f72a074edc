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

//! Errors which may occur while operating on curve points.

use core::fmt;
use core::fmt::Display;

/// Internal errors.  Most application-level developers will likely not
/// need to pay any attention to these.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) enum InternalError {
    /// An affine conversion was requested for the point at infinity,
    /// which has no affine coordinates.
    PointAtInfinity,
    /// A caller-supplied coordinate encoding is not a fully reduced
    /// residue modulo the field prime.
    CoordinatesOutOfRange,
    /// A linear combination was requested over more terms than the
    /// per-call table allocation supports.
    CapacityExceeded,
    /// A generator term was requested but no generator was supplied.
    UndefinedGenerator,
}

impl Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            InternalError::PointAtInfinity => {
                write!(f, "Cannot convert the point at infinity to affine form")
            }
            InternalError::CoordinatesOutOfRange => {
                write!(f, "Coordinate is not a canonical field element encoding")
            }
            InternalError::CapacityExceeded => {
                write!(f, "Too many scalar/point terms in one linear combination")
            }
            InternalError::UndefinedGenerator => {
                write!(f, "A generator scalar was supplied without a generator")
            }
        }
    }
}

/// Errors which may occur while multiplying or converting curve points.
///
/// This error may arise due to:
///
/// * Requesting the affine coordinates of the point at infinity.
///
/// * Being given bytes which are not the canonical encoding of a field
///   element.
///
/// * Passing more than 2^24 scalar/point pairs to a single linear
///   combination.
///
/// * Requesting a generator term from a context that has no generator.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct CurveError(pub(crate) InternalError);

impl Display for CurveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CurveError {}
