//! Error taxonomy (ambient component A1).
//!
//! One small `Copy` enum per fallible surface, with hand-written `Display`
//! impls and a `std::error::Error` impl gated behind `std` — matching the
//! reference crate's convention rather than reaching for a derive-macro
//! error crate.

use core::fmt::{self, Display};

/// Errors from parsing a 14-byte header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeaderError {
    /// The first four bytes were not `b"qoif"`.
    BadMagic,
}

impl Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderError::BadMagic => f.write_str("stream does not start with the QOI magic bytes"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HeaderError {}

/// Errors that may occur while encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EncodeError {
    /// The caller's raw pixel buffer is shorter than `width*height*channels`.
    NotEnoughPixelData,

    /// The caller's destination buffer cannot hold the worst-case stream.
    OutputIsTooSmall,
}

impl Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::NotEnoughPixelData => {
                f.write_str("pixel buffer is too small for the described image")
            }
            EncodeError::OutputIsTooSmall => {
                f.write_str("output buffer is too small to fit the encoded image")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}

/// Errors that may occur while decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecodeError {
    /// The encoded buffer is shorter than the 14-byte header.
    HeaderTooShort,

    /// The header's magic bytes did not match.
    BadMagic,

    /// The caller's destination buffer is too small to hold the decoded image.
    OutputIsTooSmall,
}

impl From<HeaderError> for DecodeError {
    fn from(err: HeaderError) -> Self {
        match err {
            HeaderError::BadMagic => DecodeError::BadMagic,
        }
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::HeaderTooShort => {
                f.write_str("buffer does not contain enough data for a QOI header")
            }
            DecodeError::BadMagic => f.write_str("stream does not start with the QOI magic bytes"),
            DecodeError::OutputIsTooSmall => {
                f.write_str("output buffer is too small to fit the decoded image")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}
