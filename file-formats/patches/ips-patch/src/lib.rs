//! Decoder and applicator for IPS (International Patching System) patches.
//!
//! An IPS patch is the ASCII magic `PATCH`, a stream of records and the
//! `EOF` sentinel. Each record names a 24-bit big-endian target offset and
//! either carries literal bytes or a run-length encoded fill byte. This
//! crate decodes that stream from an in-memory buffer and applies it to an
//! in-memory target image; loading and saving files is left to the caller.
//!
//! # Examples
//!
//! ```
//! use ips_patch::{IpsPatcher, PatchLimits};
//!
//! // Write 0xDEAD at offset 0x10 of a 32 byte image
//! let patch = b"PATCH\x00\x00\x10\x00\x02\xDE\xADEOF";
//! let target = vec![0u8; 32];
//!
//! let patcher = IpsPatcher::with_limits(PatchLimits::default());
//! let patched = patcher.apply(patch, &target)?;
//!
//! assert_eq!(patched.len(), target.len());
//! assert_eq!(&patched[0x10..0x12], &[0xDE, 0xAD]);
//! # Ok::<(), ips_patch::IpsError>(())
//! ```

#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub mod limits;
pub mod parser;
pub mod patcher;
pub mod types;
pub mod validation;

pub use error::{BufferKind, ErrorKind, IpsError, Result};
pub use limits::PatchLimits;
pub use parser::{RecordReader, read_u16_be, read_u24_be};
pub use patcher::{IpsPatcher, apply, apply_in_place};
pub use types::{PatchSummary, Record, RecordPayload};
pub use validation::validate_patch;
