//! Integration tests for IPS patch application

use ips_patch::{
    ErrorKind, IpsError, IpsPatcher, PatchLimits, RecordPayload, RecordReader, apply,
    apply_in_place, validate_patch,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// Assembles patch bytes record by record
#[derive(Default)]
struct PatchBuilder {
    body: Vec<u8>,
}

impl PatchBuilder {
    fn literal(mut self, offset: u32, data: &[u8]) -> Self {
        self.body.extend(&offset.to_be_bytes()[1..]);
        self.body.extend((data.len() as u16).to_be_bytes());
        self.body.extend(data);
        self
    }

    fn rle(mut self, offset: u32, run_length: u16, fill: u8) -> Self {
        self.body.extend(&offset.to_be_bytes()[1..]);
        self.body.extend([0, 0]);
        self.body.extend(run_length.to_be_bytes());
        self.body.push(fill);
        self
    }

    fn unterminated(self) -> Vec<u8> {
        let mut patch = b"PATCH".to_vec();
        patch.extend(self.body);
        patch
    }

    fn build(self) -> Vec<u8> {
        let mut patch = self.unterminated();
        patch.extend(b"EOF");
        patch
    }
}

#[test]
fn test_literal_at_offset_16() {
    let patch = PatchBuilder::default()
        .literal(0x000010, &[0xDE, 0xAD, 0xBE, 0xEF])
        .build();
    let target = vec![0u8; 32];

    let patched = apply(&patch, &target).unwrap();

    assert_eq!(patched.len(), 32);
    assert_eq!(&patched[16..20], &[0xDE, 0xAD, 0xBE, 0xEF]);
    assert!(patched[..16].iter().all(|&b| b == 0));
    assert!(patched[20..].iter().all(|&b| b == 0));
}

#[test]
fn test_mixed_records() {
    let patch = PatchBuilder::default()
        .rle(0, 4, 0x20)
        .literal(4, b"HERO")
        .rle(8, 0, 0x99)
        .literal(12, &[0x01])
        .build();
    let target = vec![0xEEu8; 16];

    let mut in_place = target.clone();
    let summary = apply_in_place(&patch, &mut in_place).unwrap();

    assert_eq!(
        in_place,
        b"    HERO\xEE\xEE\xEE\xEE\x01\xEE\xEE\xEE".to_vec()
    );
    assert_eq!(summary.literal_records, 2);
    assert_eq!(summary.rle_records, 2);
    assert_eq!(summary.bytes_written, 9);
    assert_eq!(apply(&patch, &target).unwrap(), in_place);
}

#[test]
fn test_short_patch_rejected() {
    let err = apply(b"PATC", &[0u8; 32]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SizeOutOfBounds);
}

#[test]
fn test_wrong_magic_rejected() {
    let mut patch = PatchBuilder::default().literal(0, &[1, 2]).build();
    patch[..5].copy_from_slice(b"XATCH");

    let err = apply(&patch, &[0u8; 32]).unwrap_err();
    assert_eq!(
        err,
        IpsError::InvalidMagic {
            found: b"XATCH".to_vec()
        }
    );
}

#[test]
fn test_out_of_range_record_rejected() {
    let target = vec![0x55u8; 64];
    let patch = PatchBuilder::default().literal(63, &[0; 10]).build();

    let err = apply(&patch, &target).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::OffsetOutOfRange);
    assert!(target.iter().all(|&b| b == 0x55));
}

#[test]
fn test_missing_eof_rejected() {
    let patch = PatchBuilder::default().literal(0, &[1, 2, 3]).unterminated();

    let err = apply(&patch, &[0u8; 8]).unwrap_err();

    assert!(err.is_truncation());
    assert_eq!(err.kind(), ErrorKind::MissingTerminator);
}

#[test]
fn test_truncated_literal_rejected() {
    let mut patch = PatchBuilder::default().literal(0, &[1, 2, 3, 4]).unterminated();
    patch.truncate(patch.len() - 2);

    let err = apply(&patch, &[0u8; 8]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TruncatedStream);
}

#[test]
fn test_custom_limits() {
    let patch = PatchBuilder::default().rle(0, 2, 1).build();
    let patcher = IpsPatcher::with_limits(PatchLimits::default().with_max_patch_size(patch.len()));

    let err = patcher.apply(&patch, &[0u8; 4]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SizeOutOfBounds);
}

#[test]
fn test_reader_and_validation_agree() {
    let patch = PatchBuilder::default()
        .literal(0x100, &[1; 300])
        .rle(0x10, 0x20, 0)
        .build();

    let records: Vec<_> = RecordReader::new(&patch)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(records.len(), 2);
    assert!(matches!(records[0].payload, RecordPayload::Literal(data) if data.len() == 300));
    assert_eq!(records[1].position, 5 + 5 + 300);

    let summary = validate_patch(&patch, &PatchLimits::default(), None).unwrap();
    assert_eq!(summary.record_count(), records.len());
    assert_eq!(summary.max_target_end, 0x100 + 300);
}

/// Literal records as (offset, data), kept inside a 1 KiB target
fn literal_records() -> impl Strategy<Value = Vec<(u32, Vec<u8>)>> {
    prop::collection::vec(
        (0u32..1000).prop_flat_map(|offset| {
            let max = (1024 - offset) as usize;
            (Just(offset), prop::collection::vec(any::<u8>(), 1..=max.min(24)))
        }),
        0..16,
    )
}

proptest! {
    #[test]
    fn prop_length_is_preserved(
        records in literal_records(),
        target in prop::collection::vec(any::<u8>(), 1024),
    ) {
        let patch = records
            .iter()
            .fold(PatchBuilder::default(), |b, (offset, data)| b.literal(*offset, data))
            .build();

        let patched = apply(&patch, &target).unwrap();
        prop_assert_eq!(patched.len(), target.len());
    }

    #[test]
    fn prop_single_literal_lands_exactly(
        (offset, data) in (0u32..200).prop_flat_map(|o| (Just(o), prop::collection::vec(any::<u8>(), 1..56))),
        target in prop::collection::vec(any::<u8>(), 256),
    ) {
        let patch = PatchBuilder::default().literal(offset, &data).build();
        let patched = apply(&patch, &target).unwrap();

        let start = offset as usize;
        let end = start + data.len();
        prop_assert_eq!(&patched[start..end], &data[..]);
        prop_assert_eq!(&patched[..start], &target[..start]);
        prop_assert_eq!(&patched[end..], &target[end..]);
    }

    #[test]
    fn prop_rle_fills_run(offset in 0u32..128, run_length in 0u16..128, fill in any::<u8>()) {
        let target = vec![0u8; 256];
        let patch = PatchBuilder::default().rle(offset, run_length, fill).build();

        let patched = apply(&patch, &target).unwrap();

        let start = offset as usize;
        let end = start + run_length as usize;
        prop_assert!(patched[start..end].iter().all(|&b| b == fill));
        prop_assert_eq!(&patched[..start], &target[..start]);
        prop_assert_eq!(&patched[end..], &target[end..]);
    }

    #[test]
    fn prop_application_is_deterministic(
        records in literal_records(),
        target in prop::collection::vec(any::<u8>(), 1024),
    ) {
        let patch = records
            .iter()
            .fold(PatchBuilder::default().rle(0, 64, 0xCC), |b, (offset, data)| b.literal(*offset, data))
            .build();

        let first = apply(&patch, &target).unwrap();
        let second = apply(&patch, &target).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_arbitrary_bytes_never_panic(
        body in prop::collection::vec(any::<u8>(), 0..128),
        target_len in 0usize..64,
    ) {
        let mut patch = b"PATCH".to_vec();
        patch.extend(body);
        let mut target = vec![0u8; target_len];

        if let Ok(summary) = apply_in_place(&patch, &mut target) {
            prop_assert!(summary.max_target_end <= target_len);
        }
        prop_assert_eq!(target.len(), target_len);
    }
}
