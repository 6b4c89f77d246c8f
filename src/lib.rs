//! QOI — the "Quite OK Image" format for fast, lossless image compression.
//!
//! <https://qoiformat.org>
//!
//! QOI encodes and decodes images in a lossless format built around a
//! 14-byte header, a stream of six variable-length opcodes, and an 8-byte
//! end marker. Compared to PNG, a QOI encoder/decoder pair is dramatically
//! simpler while staying competitive on compression ratio for typical
//! graphical (non-photographic) content.
//!
//! # Data format
//!
//! ```text
//! .- qoi header -------------.
//! | magic   "qoif"    4 bytes |
//! | width   (BE)      4 bytes |
//! | height  (BE)      4 bytes |
//! | channels          1 byte  |  3 = RGB, 4 = RGBA
//! | colorspace        1 byte  |  0 = sRGB + linear alpha, 1 = all linear
//! `----------------------------`
//! ```
//!
//! Images are stored top to bottom, left to right. Both encoder and decoder
//! start with `{r: 0, g: 0, b: 0, a: 255}` as the "previous pixel" and a
//! 64-entry running index of previously seen pixels, keyed by
//! `(r*3 + g*5 + b*7 + a*11) mod 64`, seeded to all-zero (including alpha,
//! unlike the previous-pixel default — see [`encode`] module docs). Each
//! pixel is coded as a run of the previous pixel, a hit in the running
//! index, a small difference from the previous pixel, or a full RGB/RGBA
//! literal. The bytestream ends with the 8 bytes `00 00 00 00 00 00 00 01`.
//!
//! # Crate layout
//!
//! - [`mod@header`] — the 14-byte header codec ([`Descriptor`], [`Channels`],
//!   [`Colorspace`], [`parse_descriptor`]).
//! - [`mod@pixel`] — the [`Pixel`] primitive and its index hash.
//! - [`mod@encode`] — the encoder state machine and its entry points.
//! - [`mod@decode`] — the decoder state machine, entry points, and
//!   [`is_qoi`].
//! - [`mod@sink`] — the append-only sink abstraction the encoder writes
//!   through, shared by the slice, `Vec`, and (`io` feature) `Write`-backed
//!   entry points.
//!
//! # Features
//!
//! - `alloc` — allocating entry points (`encode_alloc`, `decode_alloc`)
//!   that return an owned `Vec<u8>`.
//! - `std` (default, implies `alloc`) — `std::error::Error` impls for the
//!   error enums.
//! - `io` (implies `std`) — streaming entry points over `std::io::Write`
//!   and `std::io::Read`.
//!
//! Without any feature, the crate is `no_std` and exposes only the
//! slice-in/slice-out entry points ([`encode::encode_to_slice`],
//! [`decode::decode_to_slice`]), suitable for embedded or allocation-free
//! callers.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

use core::fmt::{self, Display};

pub mod decode;
pub mod encode;
pub mod header;
pub mod pixel;
pub mod sink;

pub use decode::{decode_to_slice, is_qoi};
pub use encode::encode_to_slice;
pub use header::{parse_descriptor, Channels, Colorspace, Descriptor, HeaderError};
pub use pixel::Pixel;

#[cfg(feature = "alloc")]
pub use decode::decode_alloc as decode;
#[cfg(feature = "alloc")]
pub use encode::encode_alloc as encode;

#[cfg(feature = "io")]
pub use decode::decode_reader;
#[cfg(feature = "io")]
pub use encode::encode_writer;

/// Hard cap on `width * height`, guarding against integer overflow and
/// unbounded allocation from a maliciously or accidentally huge header.
pub const MAX_PIXELS: u64 = 400_000_000;

/// Errors that can occur while encoding a pixel buffer into a QOI
/// bytestream.
///
/// I/O failures carry an [`std::io::ErrorKind`] rather than the full
/// `std::io::Error`, so the enum stays `Copy`/`Eq`/`Hash` like the rest of
/// the crate's error types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EncodeError {
    /// The pixel buffer was empty, or its length did not equal
    /// `width * height * channels`.
    EmptyPixelBuffer,
    /// `width * height == 0`.
    ZeroPixelCount,
    /// `width * height` exceeds [`MAX_PIXELS`].
    ImageTooLarge,
    /// The output slice could not hold the encoded bytestream. Only
    /// reachable from [`encode::encode_to_slice`]; the allocating entry
    /// points size their own buffer and never return this.
    OutputTooSmall,
    /// Writing to the destination `std::io::Write` failed.
    #[cfg(feature = "io")]
    WriteFailed(std::io::ErrorKind),
}

impl Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::EmptyPixelBuffer => {
                f.write_str("pixel buffer is empty or does not match width*height*channels")
            }
            EncodeError::ZeroPixelCount => f.write_str("width or height is zero"),
            EncodeError::ImageTooLarge => f.write_str("width*height exceeds the maximum pixel count"),
            EncodeError::OutputTooSmall => f.write_str("output buffer is too small for the encoded image"),
            #[cfg(feature = "io")]
            EncodeError::WriteFailed(kind) => write!(f, "failed writing encoded image: {kind}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}

#[cfg(feature = "io")]
impl From<std::io::Error> for EncodeError {
    fn from(err: std::io::Error) -> Self {
        EncodeError::WriteFailed(err.kind())
    }
}

/// Errors that can occur while decoding a QOI bytestream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecodeError {
    /// Malformed framing: see [`HeaderError`] for the specific cause.
    /// Kept separate from [`DecodeError::InvalidEncoding`] so a caller can
    /// tell "this isn't even a QOI file" from "this QOI file is corrupt".
    Header(HeaderError),
    /// `width * height` (as declared by the header) exceeds
    /// [`MAX_PIXELS`].
    ImageTooLarge,
    /// Allocating the output pixel buffer failed.
    OutOfMemory,
    /// The opcode stream ended before `width * height` pixels were
    /// produced, or a tag byte dispatched to a structurally impossible
    /// case. Reserved for forward compatibility: the current opcode set
    /// is exhaustive, so in practice this means truncated input.
    InvalidEncoding,
    /// The output slice could not hold the decoded image. Only reachable
    /// from [`decode::decode_to_slice`].
    OutputTooSmall,
    /// Reading the source `std::io::Read` failed.
    #[cfg(feature = "io")]
    ReadFailed(std::io::ErrorKind),
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Header(err) => write!(f, "malformed QOI header: {err}"),
            DecodeError::ImageTooLarge => f.write_str("width*height exceeds the maximum pixel count"),
            DecodeError::OutOfMemory => f.write_str("failed to allocate the decoded pixel buffer"),
            DecodeError::InvalidEncoding => f.write_str("opcode stream ended before the image was fully decoded"),
            DecodeError::OutputTooSmall => f.write_str("output buffer is too small for the decoded image"),
            #[cfg(feature = "io")]
            DecodeError::ReadFailed(kind) => write!(f, "failed reading encoded image: {kind}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

#[cfg(feature = "io")]
impl From<std::io::Error> for DecodeError {
    fn from(err: std::io::Error) -> Self {
        DecodeError::ReadFailed(err.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use header::{Channels, Colorspace};

    #[test]
    fn public_api_round_trips() {
        let pixels = [10u8, 20, 30, 255, 40, 50, 60, 255];
        let descriptor = Descriptor {
            width: 2,
            height: 1,
            channels: Channels::Rgba,
            colorspace: Colorspace::Srgb,
        };

        let encoded = encode(&pixels, &descriptor).unwrap();
        assert!(is_qoi(&encoded));
        assert_eq!(parse_descriptor(&encoded).unwrap(), descriptor);

        let (decoded_descriptor, decoded_pixels) = decode(&encoded).unwrap();
        assert_eq!(decoded_descriptor, descriptor);
        assert_eq!(decoded_pixels, pixels);
    }
}
