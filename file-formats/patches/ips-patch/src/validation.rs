//! Dry-run validation of IPS patches

use crate::error::Result;
use crate::limits::PatchLimits;
use crate::parser::RecordReader;
use crate::patcher::check_record_range;
use crate::types::PatchSummary;

/// Decode and check a whole patch without writing anything
///
/// Performs the same size, framing and truncation checks as applying the
/// patch. When `target_len` is given, every record's write range is also
/// checked against it and the target size limit is enforced.
///
/// # Examples
///
/// ```
/// use ips_patch::{PatchLimits, validate_patch};
///
/// let patch = b"PATCH\x00\x00\x04\x00\x00\x00\x02\x00EOF";
///
/// let summary = validate_patch(patch, &PatchLimits::default(), Some(16))?;
/// assert_eq!(summary.rle_records, 1);
/// assert_eq!(summary.max_target_end, 6);
///
/// assert!(validate_patch(patch, &PatchLimits::default(), Some(5)).is_err());
/// # Ok::<(), ips_patch::IpsError>(())
/// ```
pub fn validate_patch(
    patch: &[u8],
    limits: &PatchLimits,
    target_len: Option<usize>,
) -> Result<PatchSummary> {
    limits.validate_patch_size(patch.len())?;
    if let Some(len) = target_len {
        limits.validate_target_size(len)?;
    }

    let mut reader = RecordReader::new(patch)?;
    let mut summary = PatchSummary::default();

    while let Some(record) = reader.next_record()? {
        let end = match target_len {
            Some(len) => check_record_range(&record, len)?,
            None => record.offset as usize + record.len(),
        };
        summary.record(&record, end);
    }

    summary.trailing_bytes = reader.trailing_bytes().unwrap_or(0);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const TWO_RECORDS: &[u8] = b"PATCH\x00\x00\x00\x00\x02\x01\x02\x00\x00\x10\x00\x00\x00\x08\xFFEOF";

    #[test]
    fn test_validate_without_target() {
        let summary = validate_patch(TWO_RECORDS, &PatchLimits::default(), None).unwrap();

        assert_eq!(summary.literal_records, 1);
        assert_eq!(summary.rle_records, 1);
        assert_eq!(summary.bytes_written, 10);
        assert_eq!(summary.max_target_end, 0x18);
        assert_eq!(summary.trailing_bytes, 0);
    }

    #[test]
    fn test_validate_against_target_length() {
        let limits = PatchLimits::default();

        assert!(validate_patch(TWO_RECORDS, &limits, Some(0x18)).is_ok());

        let err = validate_patch(TWO_RECORDS, &limits, Some(0x17)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OffsetOutOfRange);
    }

    #[test]
    fn test_validate_reports_framing_errors() {
        let limits = PatchLimits::default();

        let err = validate_patch(b"PATCH\x00\x00\x00\x00\x01\x00", &limits, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingTerminator);

        let err = validate_patch(b"IPS32\x00\x00\x00EEOF", &limits, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMagic);

        let err = validate_patch(b"PATCH", &limits, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SizeOutOfBounds);
    }
}
