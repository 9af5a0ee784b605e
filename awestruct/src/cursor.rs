//! Read and write cursors over a byte buffer
//!
//! A cursor is the mutable half of a decode or encode pass: the buffer, the
//! current offset and the configuration of the pass. The offset only ever
//! moves forward, by exactly the number of bytes each type consumes. Every
//! access is bounds-checked and reports [`StructError::OutOfBounds`] instead
//! of panicking.

use crate::config::CodecConfig;
use crate::error::{Result, StructError};

/// Cursor for decoding
#[derive(Debug)]
pub struct ReadCursor<'a> {
    buf: &'a [u8],
    offset: usize,
    config: &'a CodecConfig,
}

impl<'a> ReadCursor<'a> {
    /// Start reading at offset 0 with the default configuration.
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_config(buf, CodecConfig::default_ref())
    }

    pub fn with_config(buf: &'a [u8], config: &'a CodecConfig) -> Self {
        Self {
            buf,
            offset: 0,
            config,
        }
    }

    /// Start reading at `offset`.
    pub fn at(buf: &'a [u8], offset: usize) -> Self {
        Self {
            buf,
            offset,
            config: CodecConfig::default_ref(),
        }
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.offset)
    }

    pub fn config(&self) -> &'a CodecConfig {
        self.config
    }

    /// Consume the next `n` bytes.
    #[inline]
    pub fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.end_of(n)?;
        let bytes = &self.buf[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }

    /// Consume the next `N` bytes as an array.
    #[inline]
    pub fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Advance past `n` bytes without looking at them.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.offset = self.end_of(n)?;
        Ok(())
    }

    fn end_of(&self, n: usize) -> Result<usize> {
        self.offset
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or(StructError::OutOfBounds {
                offset: self.offset,
                needed: n,
                len: self.buf.len(),
            })
    }
}

/// Cursor for encoding into a pre-sized buffer
#[derive(Debug)]
pub struct WriteCursor<'a> {
    buf: &'a mut [u8],
    offset: usize,
    config: &'a CodecConfig,
}

impl<'a> WriteCursor<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self::with_config(buf, CodecConfig::default_ref())
    }

    pub fn with_config(buf: &'a mut [u8], config: &'a CodecConfig) -> Self {
        Self {
            buf,
            offset: 0,
            config,
        }
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.offset)
    }

    pub fn config(&self) -> &'a CodecConfig {
        self.config
    }

    /// Reserve the next `n` bytes for writing and advance past them.
    #[inline]
    pub fn slot(&mut self, n: usize) -> Result<&mut [u8]> {
        let start = self.offset;
        let end = start
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or(StructError::OutOfBounds {
                offset: start,
                needed: n,
                len: self.buf.len(),
            })?;
        self.offset = end;
        Ok(&mut self.buf[start..end])
    }

    /// Copy `bytes` at the current offset.
    pub fn put(&mut self, bytes: &[u8]) -> Result<()> {
        self.slot(bytes.len())?.copy_from_slice(bytes);
        Ok(())
    }

    /// Advance past `n` bytes, leaving their contents untouched.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.slot(n).map(|_| ())
    }
}
