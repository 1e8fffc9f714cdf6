//! `std::io` convenience layer (ambient component A3).
//!
//! The reference crate declares an `io` feature but never wires anything up
//! to it; this fills that gap with `Read`/`Write`-based entry points for
//! callers who have a stream rather than an in-memory buffer.

use std::io::{self, Read, Write};

use crate::alloc_api;
use crate::descriptor::HEADER_SIZE;
use crate::{DecodeError, Descriptor, EncodeError};

/// Encodes `pixels` and writes the full stream (header, opcodes, end marker)
/// to `writer`.
pub fn encode_to_writer<W: Write>(
    desc: &Descriptor,
    pixels: &[u8],
    writer: &mut W,
) -> io::Result<()> {
    let encoded = alloc_api::encode_alloc(desc, pixels).map_err(encode_error_to_io)?;
    writer.write_all(&encoded)
}

/// Reads an entire QOI stream from `reader` and decodes it.
///
/// Unlike [`crate::decode_alloc`], this has no length to check in advance:
/// it reads `reader` to exhaustion first, then parses the header and decodes.
pub fn decode_from_reader<R: Read>(reader: &mut R) -> io::Result<(Descriptor, Vec<u8>)> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    if bytes.len() < HEADER_SIZE {
        return Err(decode_error_to_io(DecodeError::HeaderTooShort));
    }
    alloc_api::decode_alloc(&bytes).map_err(decode_error_to_io)
}

fn encode_error_to_io(err: EncodeError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, err)
}

fn decode_error_to_io(err: DecodeError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_a_vec_writer_and_slice_reader() {
        let desc = Descriptor {
            width: 2,
            height: 2,
            channels: 3,
            colorspace: 0,
        };
        let pixels = [0u8, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3];

        let mut buf = Vec::new();
        encode_to_writer(&desc, &pixels, &mut buf).unwrap();

        let (decoded_desc, decoded_pixels) = decode_from_reader(&mut &buf[..]).unwrap();
        assert_eq!(decoded_desc, desc);
        assert_eq!(decoded_pixels, pixels);
    }

    #[test]
    fn decode_from_reader_rejects_truncated_input() {
        let mut short = &[0x71, 0x6Fu8][..];
        let err = decode_from_reader(&mut short).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
