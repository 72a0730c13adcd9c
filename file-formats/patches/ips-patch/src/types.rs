//! Core types for the IPS patch format

use std::fmt;
use std::ops::Range;

/// Magic bytes at the start of every IPS patch
pub const PATCH_MAGIC: [u8; 5] = *b"PATCH";
/// Sentinel that takes the place of an offset to end the record stream
pub const EOF_MARKER: [u8; 3] = *b"EOF";

/// Size of the offset field
pub const OFFSET_SIZE: usize = 3;
/// Size of the length and run length fields
pub const LENGTH_SIZE: usize = 2;
/// Size of an RLE body: run length plus fill byte
pub const RLE_BODY_SIZE: usize = LENGTH_SIZE + 1;

/// Mask applied to decoded offsets
pub const OFFSET_MASK: u32 = 0x00FF_FFFF;

/// Payload of a single IPS record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordPayload<'a> {
    /// Bytes copied verbatim into the target
    Literal(&'a [u8]),
    /// A single byte repeated `run_length` times
    Rle {
        /// Number of copies to write
        run_length: u16,
        /// The repeated byte
        fill: u8,
    },
}

/// A decoded record, borrowing literal data from the patch buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    /// Position of the record header within the patch
    pub position: usize,
    /// Target offset (24 bits)
    pub offset: u32,
    /// What to write at `offset`
    pub payload: RecordPayload<'a>,
}

impl Record<'_> {
    /// Number of bytes this record writes
    pub fn len(&self) -> usize {
        match self.payload {
            RecordPayload::Literal(data) => data.len(),
            RecordPayload::Rle { run_length, .. } => run_length as usize,
        }
    }

    /// Whether the record writes nothing (only possible for RLE)
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this is a run-length encoded record
    pub fn is_rle(&self) -> bool {
        matches!(self.payload, RecordPayload::Rle { .. })
    }

    /// Target range written by this record, `None` if the end overflows
    pub fn target_range(&self) -> Option<Range<usize>> {
        let start = self.offset as usize;
        start.checked_add(self.len()).map(|end| start..end)
    }

    /// Patch bytes consumed by this record, header included
    pub fn encoded_len(&self) -> usize {
        let body = match self.payload {
            RecordPayload::Literal(data) => data.len(),
            RecordPayload::Rle { .. } => RLE_BODY_SIZE,
        };
        OFFSET_SIZE + LENGTH_SIZE + body
    }
}

impl fmt::Display for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.payload {
            RecordPayload::Literal(data) => {
                write!(f, "literal 0x{:06X} +{}", self.offset, data.len())
            }
            RecordPayload::Rle { run_length, fill } => write!(
                f,
                "rle 0x{:06X} +{} fill 0x{:02X}",
                self.offset, run_length, fill
            ),
        }
    }
}

/// Statistics gathered while applying or validating a patch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchSummary {
    /// Number of literal records
    pub literal_records: usize,
    /// Number of RLE records
    pub rle_records: usize,
    /// Total bytes written to the target, overlaps counted twice
    pub bytes_written: usize,
    /// One past the highest target byte touched
    pub max_target_end: usize,
    /// Bytes following the `EOF` sentinel, which are ignored
    pub trailing_bytes: usize,
}

impl PatchSummary {
    /// Total number of records
    pub fn record_count(&self) -> usize {
        self.literal_records + self.rle_records
    }

    pub(crate) fn record(&mut self, record: &Record<'_>, end: usize) {
        if record.is_rle() {
            self.rle_records += 1;
        } else {
            self.literal_records += 1;
        }
        self.bytes_written += record.len();
        self.max_target_end = self.max_target_end.max(end);
    }
}

impl fmt::Display for PatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records ({} literal, {} RLE), {} bytes written",
            self.record_count(),
            self.literal_records,
            self.rle_records,
            self.bytes_written
        )
    }
}
