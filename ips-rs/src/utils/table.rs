//! Record table rendering

use ips_patch::{Record, RecordPayload};
use prettytable::{Cell, Row, Table};

use crate::utils::format::{format_hex_preview, format_offset};

/// Bytes of literal data shown per row
const PREVIEW_BYTES: usize = 8;

/// Create an empty record listing with bold headers
pub fn create_record_table() -> Table {
    let mut table = Table::new();
    table.set_format(*prettytable::format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

    let header_cells: Vec<Cell> = ["#", "Position", "Kind", "Offset", "Length", "Data"]
        .into_iter()
        .map(|h| Cell::new(h).style_spec("b"))
        .collect();
    table.set_titles(Row::new(header_cells));

    table
}

/// Append one record to a listing
pub fn add_record_row(table: &mut Table, index: usize, record: &Record<'_>) {
    let (kind, data) = match record.payload {
        RecordPayload::Literal(bytes) => ("literal", format_hex_preview(bytes, PREVIEW_BYTES)),
        RecordPayload::Rle { fill, .. } => ("rle", format!("fill {fill:02X}")),
    };

    let cells = [
        index.to_string(),
        format!("0x{:X}", record.position),
        kind.to_string(),
        format_offset(record.offset),
        record.len().to_string(),
        data,
    ];
    table.add_row(Row::new(cells.iter().map(|s| Cell::new(s)).collect()));
}
