//! Allocation convenience layer (ambient component A2): one-shot wrappers
//! over the chunked [`crate::Encoder`]/[`crate::Decoder`] for callers who
//! have a whole image and a `Vec<u8>` allocator, not a chunked pipeline.

use alloc::vec;
use alloc::vec::Vec;

use crate::descriptor::{Descriptor, HEADER_SIZE};
use crate::error::{DecodeError, EncodeError};
use crate::{Decoder, Encoder};

/// Worst-case size of `encode`'s output for an image matching `desc`: every
/// pixel as a 4- or 5-byte explicit opcode, plus header and end marker.
#[inline]
pub fn encoded_size_limit(desc: &Descriptor) -> usize {
    desc.pixel_count() * (desc.channels as usize + 1) + HEADER_SIZE + 8
}

/// Exact size of the raw pixel buffer `decode` will produce for `desc`.
#[inline]
pub fn decoded_size(desc: &Descriptor) -> usize {
    desc.raw_size()
}

/// Encodes `pixels` (raster-order `[R,G,B]` or `[R,G,B,A]` tuples, per
/// `desc.channels`) into `output`, returning the number of bytes written.
///
/// `output` must be at least [`encoded_size_limit`] bytes; `pixels` must
/// hold at least `desc.raw_size()` bytes.
pub fn encode(desc: &Descriptor, pixels: &[u8], output: &mut [u8]) -> Result<usize, EncodeError> {
    let needed = desc.raw_size();
    if pixels.len() < needed {
        return Err(EncodeError::NotEnoughPixelData);
    }
    if output.len() < encoded_size_limit(desc) {
        return Err(EncodeError::OutputIsTooSmall);
    }

    desc.write_header(output);

    let mut enc = Encoder::new(desc, output);
    for pixel_bytes in pixels[..needed].chunks_exact(desc.channels as usize) {
        enc.encode_chunk(pixel_bytes);
    }
    Ok(enc.finish())
}

/// Like [`encode`], but allocates a `Vec<u8>` sized via [`encoded_size_limit`]
/// and truncates it to the actual encoded length.
pub fn encode_alloc(desc: &Descriptor, pixels: &[u8]) -> Result<Vec<u8>, EncodeError> {
    let mut output = vec![0u8; encoded_size_limit(desc)];
    let size = encode(desc, pixels, &mut output)?;
    output.truncate(size);
    Ok(output)
}

/// Parses the header from `bytes` and decodes the described image into
/// `output` (raster-order `[R,G,B]` or `[R,G,B,A]` tuples, per the parsed
/// descriptor's `channels`).
pub fn decode(bytes: &[u8], output: &mut [u8]) -> Result<Descriptor, DecodeError> {
    if bytes.len() < HEADER_SIZE {
        return Err(DecodeError::HeaderTooShort);
    }
    let desc = Descriptor::read_header(bytes)?;

    let needed = desc.raw_size();
    if output.len() < needed {
        return Err(DecodeError::OutputIsTooSmall);
    }

    let mut dec = Decoder::new(&desc, bytes);
    for pixel_bytes in output[..needed].chunks_exact_mut(desc.channels as usize) {
        if dec.done() {
            break;
        }
        dec.decode_chunk().write(pixel_bytes, desc.channels);
    }
    Ok(desc)
}

/// Like [`decode`], but allocates the output `Vec<u8>` itself.
pub fn decode_alloc(bytes: &[u8]) -> Result<(Descriptor, Vec<u8>), DecodeError> {
    if bytes.len() < HEADER_SIZE {
        return Err(DecodeError::HeaderTooShort);
    }
    let desc = Descriptor::read_header(bytes)?;
    let mut output = vec![0u8; desc.raw_size()];
    decode(bytes, &mut output)?;
    Ok((desc, output))
}
