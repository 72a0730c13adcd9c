//! Patch application
//!
//! The [`IpsPatcher`] struct is the primary entry point for applying IPS
//! patches. It checks the configured size limits, decodes records with a
//! [`RecordReader`] and writes each record only after its whole target
//! range has been validated.

use crate::error::{IpsError, Result};
use crate::limits::PatchLimits;
use crate::parser::RecordReader;
use crate::types::{PatchSummary, Record, RecordPayload};

/// Applies IPS patches to in-memory images
///
/// # Examples
///
/// ```
/// use ips_patch::IpsPatcher;
///
/// let patch = b"PATCH\x00\x00\x02\x00\x00\x00\x03\xFFEOF";
/// let target = vec![0u8; 8];
///
/// let patched = IpsPatcher::new().apply(patch, &target)?;
/// assert_eq!(patched, [0, 0, 0xFF, 0xFF, 0xFF, 0, 0, 0]);
/// # Ok::<(), ips_patch::IpsError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct IpsPatcher {
    limits: PatchLimits,
}

impl IpsPatcher {
    /// Create a patcher with the default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a patcher with custom limits
    pub fn with_limits(limits: PatchLimits) -> Self {
        Self { limits }
    }

    /// The limits this patcher enforces
    pub fn limits(&self) -> &PatchLimits {
        &self.limits
    }

    /// Apply `patch` to a private copy of `target`
    ///
    /// The caller's buffer is never modified, so a failure leaves it intact.
    pub fn apply(&self, patch: &[u8], target: &[u8]) -> Result<Vec<u8>> {
        self.check_sizes(patch, target.len())?;

        let mut output = target.to_vec();
        self.apply_unchecked_sizes(patch, &mut output)?;
        Ok(output)
    }

    /// Apply `patch` directly to `target`
    ///
    /// On error, records decoded before the failing one have already been
    /// written; callers that need all-or-nothing behaviour should use
    /// [`IpsPatcher::apply`].
    pub fn apply_in_place(&self, patch: &[u8], target: &mut [u8]) -> Result<PatchSummary> {
        self.check_sizes(patch, target.len())?;
        self.apply_unchecked_sizes(patch, target)
    }

    fn check_sizes(&self, patch: &[u8], target_len: usize) -> Result<()> {
        self.limits.validate_patch_size(patch.len())?;
        self.limits.validate_target_size(target_len)?;
        Ok(())
    }

    fn apply_unchecked_sizes(&self, patch: &[u8], target: &mut [u8]) -> Result<PatchSummary> {
        log::debug!(
            "Applying {} byte patch to {} byte target",
            patch.len(),
            target.len()
        );

        let mut reader = RecordReader::new(patch)?;
        let mut summary = PatchSummary::default();

        while let Some(record) = reader.next_record()? {
            let end = write_record(&record, target)?;
            summary.record(&record, end);
        }

        summary.trailing_bytes = reader.trailing_bytes().unwrap_or(0);
        log::debug!("Patch applied: {}", summary);
        Ok(summary)
    }
}

/// Check a record's range against a target of `target_len` bytes
///
/// Returns one past the last byte the record writes.
pub(crate) fn check_record_range(record: &Record<'_>, target_len: usize) -> Result<usize> {
    record
        .target_range()
        .map(|range| range.end)
        .filter(|&end| end <= target_len)
        .ok_or_else(|| IpsError::OffsetOutOfRange {
            position: record.position,
            offset: record.offset,
            length: record.len(),
            target_len,
        })
}

fn write_record(record: &Record<'_>, target: &mut [u8]) -> Result<usize> {
    let end = check_record_range(record, target.len())?;
    let start = record.offset as usize;

    log::trace!("Record at position {}: {}", record.position, record);

    match record.payload {
        RecordPayload::Literal(data) => target[start..end].copy_from_slice(data),
        RecordPayload::Rle { fill, .. } => target[start..end].fill(fill),
    }

    Ok(end)
}

/// Apply `patch` to a copy of `target` using the default limits
pub fn apply(patch: &[u8], target: &[u8]) -> Result<Vec<u8>> {
    IpsPatcher::new().apply(patch, target)
}

/// Apply `patch` to `target` in place using the default limits
pub fn apply_in_place(patch: &[u8], target: &mut [u8]) -> Result<PatchSummary> {
    IpsPatcher::new().apply_in_place(patch, target)
}
