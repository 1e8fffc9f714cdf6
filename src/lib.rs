//! A streaming encoder and decoder for the Quite OK Image Format (QOI), v1.0.
//!
//! <https://qoiformat.org>
//!
//! QOI is a lossless, single-pass, byte-aligned format for 24-bit RGB and
//! 32-bit RGBA raster images. A QOI stream is a 14-byte header, followed by
//! any number of variable-length opcodes ("chunks"), followed by an 8-byte
//! end marker:
//!
//! ```text
//! [ 14-byte header ] [ chunk ]* [ 8-byte end marker ]
//! ```
//!
//! Images are encoded top to bottom, left to right. The encoder and decoder
//! both start with `{r: 0, g: 0, b: 0, a: 255}` as the previous-pixel
//! register. A running, zero-initialized array of 64 previously seen pixel
//! values is maintained by both sides and addressed by a hash of the pixel's
//! four channels; a pixel found at its hash slot can be referenced by a
//! single-byte `QOI_OP_INDEX` chunk instead of being written out again.
//!
//! Each chunk starts with a 2- or 8-bit tag. The 8-bit tags (`QOI_OP_RGB`,
//! `QOI_OP_RGBA`) take precedence: a decoder checks for them before falling
//! back to the 2-bit tag dispatch (`QOI_OP_INDEX`, `QOI_OP_DIFF`,
//! `QOI_OP_LUMA`, `QOI_OP_RUN`).
//!
//! ```text
//! .- QOI_OP_INDEX ----------.   2-bit tag 0b00, 6-bit index 0..=63
//! |  0  0 |     index       |
//! `-------------------------`
//! .- QOI_OP_DIFF -----------.   2-bit tag 0b01, three 2-bit deltas biased by +2
//! |  0  1 |  dr |  dg |  db |
//! `-------------------------`
//! .- QOI_OP_LUMA -----------------------------.   2-bit tag 0b10
//! |  1  0 |  green diff (6b)| dr-dg(4b)|db-dg(4b) |
//! `--------------------------------------------`
//! .- QOI_OP_RUN ------------.   2-bit tag 0b11, 6-bit run length, biased by -1
//! |  1  1 |       run       |
//! `-------------------------`
//! .- QOI_OP_RGB / QOI_OP_RGBA -------------.   8-bit tag 0xFE / 0xFF
//! | tag | red | green | blue | (alpha)     |
//! `-----------------------------------------`
//! ```
//!
//! This crate exposes that state machine two ways:
//!
//! - the chunked [`Encoder`]/[`Decoder`] types, which consume/produce one
//!   pixel at a time into/from caller-owned buffers and allocate nothing;
//! - (with the `alloc`/`std` features) the [`encode`]/[`decode`] and
//!   [`encode_alloc`]/[`decode_alloc`] convenience wrappers, which drive the
//!   chunked types over a whole image at once.
#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod decoder;
mod descriptor;
mod encoder;
mod error;
mod pixel;

#[cfg(feature = "alloc")]
mod alloc_api;

#[cfg(feature = "io")]
mod io_api;

pub use decoder::Decoder;
pub use descriptor::{Descriptor, END_MARKER, HEADER_SIZE, QOI_MAGIC};
pub use encoder::Encoder;
pub use error::{DecodeError, EncodeError, HeaderError};
pub use pixel::{Pixel, PixelIndex};

#[cfg(feature = "alloc")]
pub use alloc_api::{decode, decode_alloc, decoded_size, encode, encode_alloc, encoded_size_limit};

#[cfg(feature = "io")]
pub use io_api::{decode_from_reader, encode_to_writer};

/// Opcode tag bytes, shared by the encoder and decoder.
pub(crate) const QOI_OP_INDEX: u8 = 0x00; // 00xxxxxx
pub(crate) const QOI_OP_DIFF: u8 = 0x40; // 01xxxxxx
pub(crate) const QOI_OP_LUMA: u8 = 0x80; // 10xxxxxx
pub(crate) const QOI_OP_RUN: u8 = 0xc0; // 11xxxxxx
pub(crate) const QOI_OP_RGB: u8 = 0xfe; // 11111110
pub(crate) const QOI_OP_RGBA: u8 = 0xff; // 11111111

pub(crate) const TAG_MASK: u8 = 0xc0;
