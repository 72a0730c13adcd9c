//! Record stream decoder for IPS patches
//!
//! [`RecordReader`] walks a patch buffer record by record without touching
//! any target. Every field read is checked against the remaining patch bytes
//! first, so decoding never reads out of bounds.

use crate::error::{IpsError, Result};
use crate::types::{
    EOF_MARKER, LENGTH_SIZE, OFFSET_MASK, OFFSET_SIZE, PATCH_MAGIC, RLE_BODY_SIZE, Record,
    RecordPayload,
};

/// Decode a big-endian 24-bit unsigned integer
///
/// # Examples
///
/// ```
/// use ips_patch::parser::read_u24_be;
///
/// assert_eq!(read_u24_be(&[0x01, 0x02, 0x03]), 0x010203);
/// ```
pub fn read_u24_be(bytes: &[u8; 3]) -> u32 {
    ((u32::from(bytes[0]) << 16) | (u32::from(bytes[1]) << 8) | u32::from(bytes[2])) & OFFSET_MASK
}

/// Decode a big-endian 16-bit unsigned integer
pub fn read_u16_be(bytes: &[u8; 2]) -> u16 {
    u16::from_be_bytes(*bytes)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReaderState {
    Records,
    Done,
    Failed,
}

/// Iterator over the records of an IPS patch
///
/// Construction checks the `PATCH` magic. Iteration yields one
/// `Result<Record>` per record and stops after the `EOF` sentinel or after
/// the first error.
///
/// # Examples
///
/// ```
/// use ips_patch::parser::RecordReader;
/// use ips_patch::types::RecordPayload;
///
/// let patch = b"PATCH\x00\x00\x10\x00\x02\xAB\xCDEOF";
/// let records = RecordReader::new(patch)?.collect::<Result<Vec<_>, _>>()?;
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].offset, 0x10);
/// assert_eq!(records[0].payload, RecordPayload::Literal(&[0xAB, 0xCD]));
/// # Ok::<(), ips_patch::IpsError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RecordReader<'a> {
    patch: &'a [u8],
    cursor: usize,
    state: ReaderState,
}

impl<'a> RecordReader<'a> {
    /// Create a reader positioned at the first record
    pub fn new(patch: &'a [u8]) -> Result<Self> {
        if !patch.starts_with(&PATCH_MAGIC) {
            return Err(IpsError::InvalidMagic {
                found: patch.iter().take(PATCH_MAGIC.len()).copied().collect(),
            });
        }

        Ok(Self {
            patch,
            cursor: PATCH_MAGIC.len(),
            state: ReaderState::Records,
        })
    }

    /// Current cursor position within the patch
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Whether the `EOF` sentinel has been consumed
    pub fn is_finished(&self) -> bool {
        self.state == ReaderState::Done
    }

    /// Bytes after the sentinel, once it has been reached
    pub fn trailing_bytes(&self) -> Option<usize> {
        self.is_finished().then(|| self.remaining())
    }

    fn remaining(&self) -> usize {
        self.patch.len() - self.cursor
    }

    fn take_array<const N: usize>(&mut self, field: &'static str) -> Result<&'a [u8; N]> {
        let patch: &'a [u8] = self.patch;
        let bytes = patch[self.cursor..]
            .first_chunk::<N>()
            .ok_or_else(|| IpsError::truncated(self.cursor, field, N, self.remaining()))?;
        self.cursor += N;
        Ok(bytes)
    }

    fn take_slice(&mut self, len: usize, field: &'static str) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(IpsError::truncated(self.cursor, field, len, self.remaining()));
        }
        let patch: &'a [u8] = self.patch;
        let bytes = &patch[self.cursor..self.cursor + len];
        self.cursor += len;
        Ok(bytes)
    }

    /// Decode the next record, `Ok(None)` once the sentinel is reached
    pub fn next_record(&mut self) -> Result<Option<Record<'a>>> {
        if self.state != ReaderState::Records {
            return Ok(None);
        }

        let position = self.cursor;
        if self.remaining() < OFFSET_SIZE {
            return Err(IpsError::MissingTerminator {
                position,
                available: self.remaining(),
            });
        }

        let offset_bytes = self.take_array::<OFFSET_SIZE>("offset")?;
        if *offset_bytes == EOF_MARKER {
            self.state = ReaderState::Done;
            log::debug!(
                "Reached EOF marker at position {} ({} trailing bytes)",
                position,
                self.remaining()
            );
            if self.remaining() > 0 {
                log::warn!("Ignoring {} bytes after EOF marker", self.remaining());
            }
            return Ok(None);
        }
        let offset = read_u24_be(offset_bytes);

        let length = read_u16_be(self.take_array::<LENGTH_SIZE>("length")?);

        let payload = if length == 0 {
            let body = self.take_array::<RLE_BODY_SIZE>("rle body")?;
            RecordPayload::Rle {
                run_length: read_u16_be(&[body[0], body[1]]),
                fill: body[2],
            }
        } else {
            RecordPayload::Literal(self.take_slice(length as usize, "literal data")?)
        };

        Ok(Some(Record {
            position,
            offset,
            payload,
        }))
    }
}

impl<'a> Iterator for RecordReader<'a> {
    type Item = Result<Record<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_record() {
            Ok(record) => record.map(Ok),
            Err(e) => {
                self.state = ReaderState::Failed;
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for RecordReader<'_> {}
