// rutokens/src/protocol/tlv.rs

//! Flat TLV scanning (one-byte tag, one-byte length, no nesting) and a small
//! writer used to rebuild ISO structures.

use crate::{Error, Result};

/// Linear scanner over `(tag, len, value)` triples.
#[derive(Debug, Clone, Copy)]
pub struct TagReader<'a> {
    data: &'a [u8],
}

impl<'a> TagReader<'a> {
    /// Scan `data`, which holds TLV entries back to back.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Return the value of the first entry carrying `tag`.
    ///
    /// Any entry whose declared length runs past the buffer, up to and
    /// including the match, fails the whole scan. A single trailing byte
    /// that cannot hold a tag and length is ignored.
    pub fn find(&self, tag: u8) -> Result<&'a [u8]> {
        let mut i = 0usize;
        while i + 2 <= self.data.len() {
            let t = self.data[i];
            let len = self.data[i + 1] as usize;
            i += 2;
            if i + len > self.data.len() {
                return Err(Error::MalformedTlv { tag });
            }
            if t == tag {
                return Ok(&self.data[i..i + len]);
            }
            i += len;
        }
        Err(Error::TagNotFound { tag })
    }

    /// Like `find` but the value must be exactly `expected` bytes long.
    pub fn find_exact(&self, tag: u8, expected: usize) -> Result<&'a [u8]> {
        let value = self.find(tag)?;
        if value.len() != expected {
            return Err(Error::TagLengthMismatch {
                tag,
                expected,
                actual: value.len(),
            });
        }
        Ok(value)
    }

    /// Fixed-size variant of `find_exact`.
    pub fn find_array<const N: usize>(&self, tag: u8) -> Result<[u8; N]> {
        let value = self.find_exact(tag, N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(value);
        Ok(out)
    }

    /// Optional lookup. Any failure (absent tag, wrong length, or a broken
    /// entry hit while scanning) yields `None`.
    pub fn find_optional<const N: usize>(&self, tag: u8) -> Option<[u8; N]> {
        match self.find_array::<N>(tag) {
            Ok(v) => Some(v),
            Err(Error::TagNotFound { .. }) => None,
            Err(e) => {
                log::debug!("optional tag {:#04x} ignored: {}", tag, e);
                None
            }
        }
    }
}

/// Append-only TLV builder.
#[derive(Debug, Default, Clone)]
pub struct TlvWriter {
    buf: Vec<u8>,
}

impl TlvWriter {
    /// Empty writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty writer with room for `cap` bytes
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            buf: Vec::with_capacity(cap),
        }
    }

    /// Append one entry. Values longer than 255 bytes cannot be expressed
    /// with a one-byte length.
    pub fn push(&mut self, tag: u8, value: &[u8]) -> Result<&mut Self> {
        if value.len() > 0xFF {
            return Err(Error::InvalidLength {
                expected: 0xFF,
                actual: value.len(),
            });
        }
        self.buf.push(tag);
        self.buf.push(value.len() as u8);
        self.buf.extend_from_slice(value);
        Ok(self)
    }

    /// Bytes written so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Nothing written yet
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Wrap the accumulated entries in an outer template tag.
    pub fn into_template(self, tag: u8) -> Result<Vec<u8>> {
        let mut outer = TlvWriter::with_capacity(self.buf.len() + 2);
        outer.push(tag, &self.buf)?;
        Ok(outer.into_inner())
    }

    /// The bare entries, without a template
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}
