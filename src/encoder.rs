//! The streaming encoder state machine (component C3).

use crate::descriptor::{Descriptor, END_MARKER, HEADER_SIZE};
use crate::pixel::{Pixel, PixelIndex};
use crate::{QOI_OP_DIFF, QOI_OP_INDEX, QOI_OP_LUMA, QOI_OP_RGB, QOI_OP_RGBA, QOI_OP_RUN};

/// Drives a stateful, single-pass walk over raw pixels, emitting the
/// smallest legal QOI opcode for each one and coalescing equal runs.
///
/// `dst` is the *full* output buffer, header included: [`Encoder::new`]
/// leaves the first [`HEADER_SIZE`] bytes untouched (the caller writes the
/// header separately via [`Descriptor::write_header`]) and starts appending
/// opcodes right after it. A caller-supplied `dst` shorter than what a given
/// image needs is a caller bug — bounds are plain slice indexing, which
/// panics, matching the core's "no dynamic allocation, no bounds checks
/// beyond what the implementer adds" contract.
pub struct Encoder<'a> {
    dst: &'a mut [u8],
    write_cursor: usize,
    index: PixelIndex,
    prev: Pixel,
    run_count: u8,
    channels: u8,
    total_pixels: usize,
    pixel_cursor: usize,
    finished: bool,
}

impl<'a> Encoder<'a> {
    /// Initializes a new encoder for the image described by `desc`,
    /// writing opcodes into `dst` starting at offset [`HEADER_SIZE`].
    pub fn new(desc: &Descriptor, dst: &'a mut [u8]) -> Self {
        Encoder {
            dst,
            write_cursor: HEADER_SIZE,
            index: PixelIndex::new(),
            prev: Pixel::initial_prev(),
            run_count: 0,
            channels: desc.channels,
            total_pixels: desc.pixel_count(),
            pixel_cursor: 0,
            finished: false,
        }
    }

    /// `true` once every pixel has been consumed and the end marker written.
    #[inline(always)]
    pub fn done(&self) -> bool {
        self.finished
    }

    /// Total bytes written so far, header included.
    #[inline(always)]
    pub fn bytes_written(&self) -> usize {
        self.write_cursor
    }

    #[inline(always)]
    fn push(&mut self, bytes: &[u8]) {
        let end = self.write_cursor + bytes.len();
        self.dst[self.write_cursor..end].copy_from_slice(bytes);
        self.write_cursor = end;
    }

    #[inline(always)]
    fn flush_run(&mut self) {
        self.push(&[QOI_OP_RUN | (self.run_count - 1)]);
        self.run_count = 0;
    }

    /// Encodes one pixel, read from `pixel_bytes` as `[R,G,B]` or
    /// `[R,G,B,A]` depending on `desc.channels`.
    ///
    /// Pixels must be fed in raster order, one per call. Once the pixel
    /// count from the descriptor has been reached, the end marker is
    /// appended automatically and [`Encoder::done`] returns `true`.
    pub fn encode_chunk(&mut self, pixel_bytes: &[u8]) {
        debug_assert!(!self.finished, "encode_chunk called after the encoder finished");

        let cur = Pixel::read(pixel_bytes, self.channels);
        let is_last_pixel = self.pixel_cursor + 1 == self.total_pixels;

        if cur.eq_for_channels(&self.prev, self.channels) {
            self.run_count += 1;
            if self.run_count == 62 || is_last_pixel {
                self.flush_run();
            }
        } else {
            if self.run_count > 0 {
                self.flush_run();
            }

            let hash = cur.hash();
            if self.index.lookup(hash) == cur {
                self.push(&[QOI_OP_INDEX | hash]);
            } else {
                self.index.store(cur);

                if self.channels == 4 && cur.a != self.prev.a {
                    self.push(&[QOI_OP_RGBA, cur.r, cur.g, cur.b, cur.a]);
                } else {
                    let (dr, dg, db) = cur.wrapping_diff_rgb(&self.prev);

                    if let Some(byte) = diff_opcode(dr, dg, db) {
                        self.push(&[byte]);
                    } else if let Some(bytes) = luma_opcode(dr, dg, db) {
                        self.push(&bytes);
                    } else {
                        self.push(&[QOI_OP_RGB, cur.r, cur.g, cur.b]);
                    }
                }
            }
        }

        self.prev = cur;
        self.pixel_cursor += 1;

        if is_last_pixel {
            self.push(&END_MARKER);
            self.finished = true;
        }
    }

    /// Flushes any accumulated run and writes the end marker if it hasn't
    /// been written yet. Needed for the zero-pixel image edge case, where
    /// `encode_chunk` is never called; idempotent otherwise.
    pub fn finish(&mut self) -> usize {
        if !self.finished {
            if self.run_count > 0 {
                self.flush_run();
            }
            self.push(&END_MARKER);
            self.finished = true;
        }
        self.write_cursor
    }
}

/// `QOI_OP_DIFF`: three 2-bit deltas in `[-2, 1]`, biased by +2.
#[inline(always)]
fn diff_opcode(dr: u8, dg: u8, db: u8) -> Option<u8> {
    let r = dr.wrapping_add(2);
    let g = dg.wrapping_add(2);
    let b = db.wrapping_add(2);
    if (r | g | b) & !0x03 == 0 {
        Some(QOI_OP_DIFF | (r << 4) | (g << 2) | b)
    } else {
        None
    }
}

/// `QOI_OP_LUMA`: a 6-bit green delta in `[-32, 31]` plus two 4-bit
/// red/blue-minus-green residuals in `[-8, 7]`.
#[inline(always)]
fn luma_opcode(dr: u8, dg: u8, db: u8) -> Option<[u8; 2]> {
    let dr_dg = dr.wrapping_sub(dg).wrapping_add(8);
    let green = dg.wrapping_add(32);
    let db_dg = db.wrapping_sub(dg).wrapping_add(8);

    if (dr_dg | db_dg) & !0x0f == 0 && green & !0x3f == 0 {
        Some([QOI_OP_LUMA | green, (dr_dg << 4) | db_dg])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_all(desc: &Descriptor, pixels: &[u8]) -> alloc_or_vec::Buf {
        let limit = desc.pixel_count() * (desc.channels as usize + 1) + HEADER_SIZE + 8;
        let mut out = alloc_or_vec::Buf::zeroed(limit);
        desc.write_header(out.as_mut());
        let mut enc = Encoder::new(desc, out.as_mut());
        for px in pixels.chunks_exact(desc.channels as usize) {
            enc.encode_chunk(px);
        }
        enc.finish();
        out.truncate(enc.bytes_written());
        out
    }

    // A tiny no_std-friendly fixed-capacity buffer so these unit tests don't
    // need the `alloc` feature enabled.
    mod alloc_or_vec {
        pub struct Buf {
            data: [u8; 4096],
            len: usize,
        }

        impl Buf {
            pub fn zeroed(len: usize) -> Self {
                assert!(len <= 4096);
                Buf { data: [0; 4096], len }
            }

            pub fn as_mut(&mut self) -> &mut [u8] {
                &mut self.data[..self.len]
            }

            pub fn truncate(&mut self, len: usize) {
                self.len = len;
            }
        }

        impl core::ops::Deref for Buf {
            type Target = [u8];
            fn deref(&self) -> &[u8] {
                &self.data[..self.len]
            }
        }
    }

    #[test]
    fn single_black_opaque_pixel_rgb_1x1() {
        // A single opaque-black pixel, the minimal non-empty image.
        let desc = Descriptor {
            width: 1,
            height: 1,
            channels: 3,
            colorspace: 0,
        };
        let out = encode_all(&desc, &[0x00, 0x00, 0x00]);
        assert_eq!(
            &out[..],
            &[
                0x71, 0x6F, 0x69, 0x66, 0, 0, 0, 1, 0, 0, 0, 1, 3, 0, // header
                0xC0, // RUN of 1
                0, 0, 0, 0, 0, 0, 0, 1, // end marker
            ]
        );
    }

    #[test]
    fn two_distinct_rgb_pixels_2x1() {
        // Two pixels, the same color: no RGB literal for the second, just an index hit.
        let desc = Descriptor {
            width: 2,
            height: 1,
            channels: 3,
            colorspace: 0,
        };
        let out = encode_all(&desc, &[0x10, 0x20, 0x30, 0x10, 0x20, 0x30]);
        assert_eq!(
            &out[HEADER_SIZE..],
            &[0xFE, 0x10, 0x20, 0x30, 0xC0, 0, 0, 0, 0, 0, 0, 0, 1]
        );
    }

    #[test]
    fn run_of_63_black_pixels_splits_into_two_runs() {
        // 63 would overflow a single run's 6-bit length field; it must split in two.
        let desc = Descriptor {
            width: 63,
            height: 1,
            channels: 3,
            colorspace: 0,
        };
        let pixels = [0u8; 63 * 3];
        let out = encode_all(&desc, &pixels);
        let body = &out[HEADER_SIZE..out.len() - 8];
        assert_eq!(body, &[0xFD, 0xC0]);
    }

    #[test]
    fn rgba_alpha_change_1x1() {
        // An alpha change forces QOI_OP_RGBA even though r/g/b alone would fit QOI_OP_DIFF.
        let desc = Descriptor {
            width: 1,
            height: 1,
            channels: 4,
            colorspace: 0,
        };
        let out = encode_all(&desc, &[0xFF, 0x00, 0x00, 0x80]);
        assert_eq!(
            &out[HEADER_SIZE..],
            &[0xFF, 0xFF, 0x00, 0x00, 0x80, 0, 0, 0, 0, 0, 0, 0, 1]
        );
    }

    #[test]
    fn index_hit_rgb_3x1() {
        // A repeated color separated by another pixel: an index hit, not a run.
        let desc = Descriptor {
            width: 3,
            height: 1,
            channels: 3,
            colorspace: 0,
        };
        let pixels = [0x10, 0x20, 0x30, 0x00, 0x00, 0x00, 0x10, 0x20, 0x30];
        let out = encode_all(&desc, &pixels);
        let body = &out[HEADER_SIZE..out.len() - 8];

        let hash = Pixel {
            r: 0x10,
            g: 0x20,
            b: 0x30,
            a: 0xFF,
        }
        .hash();

        assert_eq!(body, &[0xFE, 0x10, 0x20, 0x30, 0xC0, QOI_OP_INDEX | hash]);
    }

    #[test]
    fn no_run_opcode_collides_with_rgb_rgba_tags() {
        let desc = Descriptor {
            width: 200,
            height: 1,
            channels: 3,
            colorspace: 0,
        };
        let pixels = [0u8; 200 * 3];
        let out = encode_all(&desc, &pixels);
        for byte in &out[HEADER_SIZE..out.len() - 8] {
            if byte & 0xC0 == QOI_OP_RUN {
                assert_ne!(*byte, 0xFE);
                assert_ne!(*byte, 0xFF);
            }
        }
    }

    #[test]
    fn diff_opcode_boundary_values() {
        assert!(diff_opcode(0u8.wrapping_sub(2), 0, 1).is_some());
        assert!(diff_opcode(2, 0, 0).is_none());
    }

    #[test]
    fn luma_opcode_boundary_values() {
        // dg=31 (max), dr-dg=7 (max), db-dg=-8 (min): still in range.
        let dg = 31u8;
        let dr = dg.wrapping_add(7);
        let db = dg.wrapping_sub(8);
        assert!(luma_opcode(dr, dg, db).is_some());

        // dg=32 is one past the max green delta (31): out of range.
        assert!(luma_opcode(0, 32, 0).is_none());
    }
}
