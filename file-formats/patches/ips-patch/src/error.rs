//! Error types for IPS patch application

use std::fmt;
use thiserror::Error;

/// Result type alias for IPS operations
pub type Result<T> = std::result::Result<T, IpsError>;

/// Which input buffer a size check was applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    /// The IPS patch stream
    Patch,
    /// The image being patched
    Target,
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Patch => write!(f, "patch"),
            Self::Target => write!(f, "target"),
        }
    }
}

/// Fieldless classification of [`IpsError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A buffer length violates the configured limits
    SizeOutOfBounds,
    /// The patch does not start with `PATCH`
    InvalidMagic,
    /// A record needs more bytes than the patch holds
    TruncatedStream,
    /// A record writes past the end of the target
    OffsetOutOfRange,
    /// The patch ended where an offset or `EOF` was expected
    MissingTerminator,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SizeOutOfBounds => "SizeOutOfBounds",
            Self::InvalidMagic => "InvalidMagic",
            Self::TruncatedStream => "TruncatedStream",
            Self::OffsetOutOfRange => "OffsetOutOfRange",
            Self::MissingTerminator => "MissingTerminator",
        };
        f.write_str(name)
    }
}

/// Main error type for IPS operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IpsError {
    /// A buffer is smaller than the minimum or not below the maximum size
    #[error("{buffer} size {size} bytes is out of bounds (allowed: {min} <= size < {max})")]
    SizeOutOfBounds {
        /// The buffer that failed the check
        buffer: BufferKind,
        /// The actual buffer length
        size: usize,
        /// Inclusive lower bound
        min: usize,
        /// Exclusive upper bound
        max: usize,
    },

    /// The patch header is not `PATCH`
    #[error("Invalid magic value: expected 'PATCH', found '{}'", String::from_utf8_lossy(.found))]
    InvalidMagic {
        /// The first bytes of the patch
        found: Vec<u8>,
    },

    /// A record field or payload runs past the end of the patch
    #[error(
        "Truncated IPS stream at position {position}: {field} needs {needed} bytes, {available} available"
    )]
    TruncatedStream {
        /// Cursor position where the read was attempted
        position: usize,
        /// Name of the field being read
        field: &'static str,
        /// Bytes required by the field
        needed: usize,
        /// Bytes left in the patch
        available: usize,
    },

    /// A record's write range does not fit inside the target
    #[error(
        "Record at position {position} writes {length} bytes at offset 0x{offset:06X}, past the end of the {target_len} byte target"
    )]
    OffsetOutOfRange {
        /// Patch position of the offending record header
        position: usize,
        /// Target offset of the record
        offset: u32,
        /// Effective write length of the record
        length: usize,
        /// Length of the target buffer
        target_len: usize,
    },

    /// The patch ran out before the `EOF` sentinel
    #[error("Missing EOF terminator: patch ends at position {position} with {available} of 3 bytes")]
    MissingTerminator {
        /// Cursor position where the offset or sentinel was expected
        position: usize,
        /// Bytes left in the patch
        available: usize,
    },
}

impl IpsError {
    /// Create a new TruncatedStream error
    pub fn truncated(position: usize, field: &'static str, needed: usize, available: usize) -> Self {
        Self::TruncatedStream {
            position,
            field,
            needed,
            available,
        }
    }

    /// The taxonomy entry this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SizeOutOfBounds { .. } => ErrorKind::SizeOutOfBounds,
            Self::InvalidMagic { .. } => ErrorKind::InvalidMagic,
            Self::TruncatedStream { .. } => ErrorKind::TruncatedStream,
            Self::OffsetOutOfRange { .. } => ErrorKind::OffsetOutOfRange,
            Self::MissingTerminator { .. } => ErrorKind::MissingTerminator,
        }
    }

    /// Check if the patch stream ended early
    ///
    /// A missing terminator is a truncation where the next token is an
    /// offset or the sentinel, so both kinds report `true`.
    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            Self::TruncatedStream { .. } | Self::MissingTerminator { .. }
        )
    }

    /// Check if this error indicates a malformed patch
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::InvalidMagic { .. } | Self::TruncatedStream { .. } | Self::MissingTerminator { .. }
        )
    }
}
