use crate::header::{write_descriptor, Channels, Descriptor, HEADER_SIZE};
use crate::pixel::Pixel;
use crate::sink::{Sink, SliceSink};
use crate::{EncodeError, MAX_PIXELS};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

const QOI_OP_INDEX: u8 = 0x00;
const QOI_OP_DIFF: u8 = 0x40;
const QOI_OP_LUMA: u8 = 0x80;
const QOI_OP_RUN: u8 = 0xc0;
const QOI_OP_RGB: u8 = 0xfe;
const QOI_OP_RGBA: u8 = 0xff;

const EPILOGUE: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];

/// Upper bound on the encoded size of an image matching `descriptor`,
/// assuming every pixel takes the worst-case RGBA opcode. Safe to use as an
/// allocation cap; not a recommended initial allocation size (see
/// [`encode_alloc`]).
pub fn encoded_size_limit(descriptor: &Descriptor) -> u64 {
    descriptor.pixel_count() * (descriptor.channels.count() as u64 + 1) + HEADER_SIZE as u64 + 8
}

fn validate(pixels: &[u8], descriptor: &Descriptor) -> Result<(), EncodeError> {
    if descriptor.pixel_count() == 0 {
        return Err(EncodeError::ZeroPixelCount);
    }
    if descriptor.pixel_count() > MAX_PIXELS {
        return Err(EncodeError::ImageTooLarge);
    }
    let expected = descriptor.byte_len();
    if pixels.is_empty() || pixels.len() as u64 != expected {
        return Err(EncodeError::EmptyPixelBuffer);
    }
    Ok(())
}

/// Runs the QOI opcode-selection state machine over `pixels` and writes the
/// resulting chunk stream (no header, no epilogue) to `sink`.
fn encode_body<S: Sink>(pixels: &[u8], channels: Channels, sink: &mut S) -> Result<(), EncodeError> {
    let stride = channels.count();
    let has_alpha = channels.has_alpha();

    let mut index = [Pixel::ZERO; 64];
    let mut prev = Pixel::default();
    let mut run: u8 = 0;

    let mut chunks = pixels.chunks_exact(stride).peekable();

    while let Some(chunk) = chunks.next() {
        let curr = Pixel::new(
            chunk[0],
            chunk[1],
            chunk[2],
            if has_alpha { chunk[3] } else { 255 },
        );
        let is_last = chunks.peek().is_none();

        if curr == prev {
            run += 1;
            if run == 62 || is_last {
                sink.push(QOI_OP_RUN | (run - 1))?;
                run = 0;
            }
            prev = curr;
            continue;
        }

        if run > 0 {
            sink.push(QOI_OP_RUN | (run - 1))?;
            run = 0;
        }

        let hash = curr.hash();
        if index[hash as usize] == curr {
            sink.push(QOI_OP_INDEX | hash)?;
            prev = curr;
            continue;
        }
        index[hash as usize] = curr;

        if curr.a == prev.a {
            let dr = curr.r.wrapping_sub(prev.r);
            let dg = curr.g.wrapping_sub(prev.g);
            let db = curr.b.wrapping_sub(prev.b);

            let br = dr.wrapping_add(2);
            let bg = dg.wrapping_add(2);
            let bb = db.wrapping_add(2);

            if br < 4 && bg < 4 && bb < 4 {
                sink.push(QOI_OP_DIFF | (br << 4) | (bg << 2) | bb)?;
            } else {
                let lg = dg.wrapping_add(32);
                let lr = dr.wrapping_sub(dg).wrapping_add(8);
                let lb = db.wrapping_sub(dg).wrapping_add(8);

                if lg < 64 && lr < 16 && lb < 16 {
                    sink.push(QOI_OP_LUMA | lg)?;
                    sink.push((lr << 4) | lb)?;
                } else {
                    sink.push(QOI_OP_RGB)?;
                    sink.push_slice(&[curr.r, curr.g, curr.b])?;
                }
            }
        } else {
            sink.push(QOI_OP_RGBA)?;
            sink.push_slice(curr.as_bytes())?;
        }

        prev = curr;
    }

    Ok(())
}

/// Encodes `pixels` (exactly `width * height * channels` bytes, top to
/// bottom, left to right) into `output`, which must start with room for the
/// 14-byte header. Returns the number of bytes written.
pub fn encode_to_slice(
    pixels: &[u8],
    descriptor: &Descriptor,
    output: &mut [u8],
) -> Result<usize, EncodeError> {
    validate(pixels, descriptor)?;

    let header = output.get_mut(..HEADER_SIZE).ok_or(EncodeError::OutputTooSmall)?;
    write_descriptor(descriptor, header.try_into().unwrap());

    let mut sink = SliceSink::new(&mut output[HEADER_SIZE..]);
    encode_body(pixels, descriptor.channels, &mut sink)?;
    sink.push_slice(&EPILOGUE)?;

    Ok(HEADER_SIZE + sink.written())
}

/// Encodes `pixels` into a freshly allocated `Vec<u8>`.
///
/// The output buffer starts small (about 32% of the raw pixel data, or a
/// 512-byte floor for tiny images) and grows on demand as `Vec` does,
/// rather than pre-allocating [`encoded_size_limit`] up front — that bound
/// is only ever hit by pathological, high-entropy images.
#[cfg(feature = "alloc")]
pub fn encode_alloc(pixels: &[u8], descriptor: &Descriptor) -> Result<Vec<u8>, EncodeError> {
    validate(pixels, descriptor)?;

    let estimate = (pixels.len() * 32 / 100).max(512);
    let mut output = Vec::with_capacity(HEADER_SIZE + estimate);

    let mut header = [0u8; HEADER_SIZE];
    write_descriptor(descriptor, &mut header);
    output.extend_from_slice(&header);

    encode_body(pixels, descriptor.channels, &mut output)?;
    output.extend_from_slice(&EPILOGUE);

    Ok(output)
}

/// Streams the encoded bytestream directly to `writer` without building an
/// intermediate buffer.
#[cfg(feature = "io")]
pub fn encode_writer<W: std::io::Write>(
    pixels: &[u8],
    descriptor: &Descriptor,
    writer: W,
) -> Result<usize, EncodeError> {
    use crate::sink::WriteSink;

    validate(pixels, descriptor)?;

    let mut sink = WriteSink::new(writer);
    let mut header = [0u8; HEADER_SIZE];
    write_descriptor(descriptor, &mut header);
    sink.push_slice(&header)?;

    encode_body(pixels, descriptor.channels, &mut sink)?;
    sink.push_slice(&EPILOGUE)?;

    Ok(sink.written())
}
