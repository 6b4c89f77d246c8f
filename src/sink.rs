//! The encoder writes its opcode stream to an append-only sink. Slices,
//! `Vec<u8>` and (with the `io` feature) any `std::io::Write` all implement
//! it, so the same opcode-selection loop in `encode` drives a `no_std`
//! slice-writer, an allocating `Vec` builder, and a true streaming encoder
//! without duplicating the state machine three times.

use crate::EncodeError;

pub trait Sink {
    fn push(&mut self, byte: u8) -> Result<(), EncodeError>;

    fn push_slice(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        for &byte in bytes {
            self.push(byte)?;
        }
        Ok(())
    }
}

/// Writes into a fixed, caller-owned buffer. Used by the `no_std` slice API.
pub struct SliceSink<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceSink<'a> {
    #[inline]
    pub fn new(buf: &'a mut [u8]) -> Self {
        SliceSink { buf, pos: 0 }
    }

    #[inline]
    pub fn written(&self) -> usize {
        self.pos
    }
}

impl Sink for SliceSink<'_> {
    #[inline]
    fn push(&mut self, byte: u8) -> Result<(), EncodeError> {
        let slot = self.buf.get_mut(self.pos).ok_or(EncodeError::OutputTooSmall)?;
        *slot = byte;
        self.pos += 1;
        Ok(())
    }

    #[inline]
    fn push_slice(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        let end = self.pos.checked_add(bytes.len()).ok_or(EncodeError::OutputTooSmall)?;
        let dst = self.buf.get_mut(self.pos..end).ok_or(EncodeError::OutputTooSmall)?;
        dst.copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }
}

#[cfg(feature = "alloc")]
impl Sink for alloc::vec::Vec<u8> {
    #[inline]
    fn push(&mut self, byte: u8) -> Result<(), EncodeError> {
        alloc::vec::Vec::push(self, byte);
        Ok(())
    }

    #[inline]
    fn push_slice(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

#[cfg(feature = "io")]
pub struct WriteSink<W> {
    writer: W,
    written: usize,
}

#[cfg(feature = "io")]
impl<W: std::io::Write> WriteSink<W> {
    #[inline]
    pub fn new(writer: W) -> Self {
        WriteSink { writer, written: 0 }
    }

    #[inline]
    pub fn written(&self) -> usize {
        self.written
    }
}

#[cfg(feature = "io")]
impl<W: std::io::Write> Sink for WriteSink<W> {
    #[inline]
    fn push(&mut self, byte: u8) -> Result<(), EncodeError> {
        self.push_slice(&[byte])
    }

    #[inline]
    fn push_slice(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        self.writer.write_all(bytes)?;
        self.written += bytes.len();
        Ok(())
    }
}
