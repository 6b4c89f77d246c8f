use core::fmt::{self, Display};

pub const QOI_MAGIC: [u8; 4] = *b"qoif";
pub const HEADER_SIZE: usize = 14;

/// Number of color channels stored per pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channels {
    Rgb = 3,
    Rgba = 4,
}

impl Channels {
    #[inline(always)]
    pub const fn count(self) -> usize {
        self as usize
    }

    #[inline(always)]
    pub const fn has_alpha(self) -> bool {
        matches!(self, Channels::Rgba)
    }

    #[inline(always)]
    const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            3 => Some(Channels::Rgb),
            4 => Some(Channels::Rgba),
            _ => None,
        }
    }
}

/// Interpretation of the color channels. QOI treats this as uninterpreted
/// metadata: neither encoder nor decoder perform any color-space conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Colorspace {
    /// sRGB color channels with linear alpha.
    Srgb = 0,
    /// All channels (including alpha, if present) are linear.
    Linear = 1,
}

impl Colorspace {
    #[inline(always)]
    const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Colorspace::Srgb),
            1 => Some(Colorspace::Linear),
            _ => None,
        }
    }
}

/// The metadata carried by a QOI image's 14-byte header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Descriptor {
    pub width: u32,
    pub height: u32,
    pub channels: Channels,
    pub colorspace: Colorspace,
}

impl Descriptor {
    /// Total pixel count, widened to `u64` so `width * height` cannot
    /// overflow even at the maximum representable dimensions.
    #[inline(always)]
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    #[inline(always)]
    pub fn byte_len(&self) -> u64 {
        self.pixel_count() * self.channels.count() as u64
    }

    fn write_into(&self, out: &mut [u8; HEADER_SIZE]) {
        out[0..4].copy_from_slice(&QOI_MAGIC);
        out[4..8].copy_from_slice(&self.width.to_be_bytes());
        out[8..12].copy_from_slice(&self.height.to_be_bytes());
        out[12] = self.channels as u8;
        out[13] = self.colorspace as u8;
    }
}

/// Errors returned while parsing the 14-byte QOI header.
///
/// These are distinct from [`crate::DecodeError::InvalidEncoding`] so callers
/// can tell malformed framing (wrong magic, bad dimensions) apart from a
/// malformed opcode stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeaderError {
    /// Fewer than 14 bytes were available.
    TooSmall,
    /// The first four bytes were not `b"qoif"`.
    MissingSignature,
    /// Width or height was zero.
    ZeroDimension,
    /// The channels byte was neither 3 nor 4.
    InvalidChannel,
    /// The colorspace byte was neither 0 nor 1.
    InvalidColorspace,
}

impl Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderError::TooSmall => f.write_str("buffer is smaller than the 14-byte QOI header"),
            HeaderError::MissingSignature => f.write_str("header is missing the 'qoif' signature"),
            HeaderError::ZeroDimension => f.write_str("width or height is zero"),
            HeaderError::InvalidChannel => f.write_str("channels byte is neither 3 nor 4"),
            HeaderError::InvalidColorspace => {
                f.write_str("colorspace byte is neither 0 nor 1")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HeaderError {}

/// Parses the 14-byte QOI header from the start of `bytes`.
///
/// `bytes` may contain more than the header (the rest of the bytestream);
/// only the first 14 bytes are inspected.
pub fn parse_descriptor(bytes: &[u8]) -> Result<Descriptor, HeaderError> {
    if bytes.len() < HEADER_SIZE {
        return Err(HeaderError::TooSmall);
    }

    if bytes[0..4] != QOI_MAGIC {
        return Err(HeaderError::MissingSignature);
    }

    let width = u32::from_be_bytes(bytes[4..8].try_into().unwrap());
    let height = u32::from_be_bytes(bytes[8..12].try_into().unwrap());
    if width == 0 || height == 0 {
        return Err(HeaderError::ZeroDimension);
    }

    let channels = Channels::from_byte(bytes[12]).ok_or(HeaderError::InvalidChannel)?;
    let colorspace = Colorspace::from_byte(bytes[13]).ok_or(HeaderError::InvalidColorspace)?;

    Ok(Descriptor { width, height, channels, colorspace })
}

/// Writes the 14-byte QOI header for `descriptor` into `out`.
pub fn write_descriptor(descriptor: &Descriptor, out: &mut [u8; HEADER_SIZE]) {
    descriptor.write_into(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> Descriptor {
        Descriptor {
            width: 4,
            height: 2,
            channels: Channels::Rgba,
            colorspace: Colorspace::Srgb,
        }
    }

    #[test]
    fn header_round_trips() {
        let mut buf = [0u8; HEADER_SIZE];
        write_descriptor(&descriptor(), &mut buf);
        assert_eq!(parse_descriptor(&buf).unwrap(), descriptor());
    }

    #[test]
    fn rejects_short_buffers() {
        assert_eq!(parse_descriptor(&[0u8; 13]), Err(HeaderError::TooSmall));
    }

    #[test]
    fn rejects_bad_magic() {
        let mut buf = [0u8; HEADER_SIZE];
        write_descriptor(&descriptor(), &mut buf);
        buf[0] = b'x';
        assert_eq!(parse_descriptor(&buf), Err(HeaderError::MissingSignature));
    }

    #[test]
    fn rejects_zero_dimension() {
        let mut d = descriptor();
        d.width = 0;
        let mut buf = [0u8; HEADER_SIZE];
        write_descriptor(&d, &mut buf);
        assert_eq!(parse_descriptor(&buf), Err(HeaderError::ZeroDimension));
    }

    #[test]
    fn rejects_invalid_channels() {
        let mut buf = [0u8; HEADER_SIZE];
        write_descriptor(&descriptor(), &mut buf);
        buf[12] = 2;
        assert_eq!(parse_descriptor(&buf), Err(HeaderError::InvalidChannel));
    }

    #[test]
    fn rejects_invalid_colorspace() {
        let mut buf = [0u8; HEADER_SIZE];
        write_descriptor(&descriptor(), &mut buf);
        buf[13] = 7;
        assert_eq!(parse_descriptor(&buf), Err(HeaderError::InvalidColorspace));
    }
}
