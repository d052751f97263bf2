//! Bit-granularity streams over byte sinks and sources.
//!
//! Bits are packed most significant bit first. Neither side knows where meaningful data ends:
//! the writer pads the last byte with zeros and the reader happily returns those zeros, so
//! callers must track how many bits or symbols they expect.

use std::io::{self, Read, Write};

const BYTE_BITS: u8 = u8::BITS as u8;

/// Buffers single bits and writes them to `W` one full byte at a time.
pub struct BitWriter<W: Write> {
    inner: W,
    buf: u8,
    filled: u8,
    bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    pub const fn new(inner: W) -> Self {
        Self {
            inner,
            buf: 0,
            filled: 0,
            bits_written: 0,
        }
    }

    pub fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        self.buf = (self.buf << 1) | bit as u8;
        self.filled += 1;
        self.bits_written += 1;

        if self.filled == BYTE_BITS {
            self.inner.write_all(&[self.buf])?;
            self.buf = 0;
            self.filled = 0;
        }

        Ok(())
    }

    /// Writes all 8 bits of `byte` through the bit path, so it may straddle a byte boundary.
    pub fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        for shift in (0..BYTE_BITS).rev() {
            self.write_bit((byte >> shift) & 1 == 1)?;
        }
        Ok(())
    }

    /// Total number of bits handed to the writer, not counting padding.
    pub const fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Pads a partial trailing byte with zero bits, writes it, and flushes the sink.
    ///
    /// The writer stays usable afterward, continuing at the next byte boundary.
    pub fn flush(&mut self) -> io::Result<()> {
        if self.filled > 0 {
            let padded = self.buf << (BYTE_BITS - self.filled);
            self.inner.write_all(&[padded])?;
            self.buf = 0;
            self.filled = 0;
        }
        self.inner.flush()
    }

    /// Flushes any pending bits and hands back the sink.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.flush()?;
        Ok(self.inner)
    }
}

/// Pulls single bits out of `R`, reading one byte whenever the buffer runs dry.
pub struct BitReader<R: Read> {
    inner: R,
    buf: u8,
    remaining: u8,
}

impl<R: Read> BitReader<R> {
    pub const fn new(inner: R) -> Self {
        Self {
            inner,
            buf: 0,
            remaining: 0,
        }
    }

    /// Reads the next bit.
    ///
    /// # Errors
    ///
    /// Fails with [`io::ErrorKind::UnexpectedEof`] once the source is exhausted.
    pub fn read_bit(&mut self) -> io::Result<bool> {
        if self.remaining == 0 {
            let mut byte = [0u8; 1];
            self.inner.read_exact(&mut byte)?;
            self.buf = byte[0];
            self.remaining = BYTE_BITS;
        }

        self.remaining -= 1;
        Ok((self.buf >> self.remaining) & 1 == 1)
    }

    /// Reads 8 bits through the bit path.
    pub fn read_byte(&mut self) -> io::Result<u8> {
        let mut byte = 0u8;
        for _ in 0..BYTE_BITS {
            byte = (byte << 1) | self.read_bit()? as u8;
        }
        Ok(byte)
    }
}
