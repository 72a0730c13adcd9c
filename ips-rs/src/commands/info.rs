//! Patch inspection command

use anyhow::Result;
use console::style;
use ips_patch::{PatchLimits, RecordReader, validate_patch};
use std::path::Path;

use super::patch_error;
use crate::utils::{add_record_row, create_record_table, format_bytes, input_len, read_input};

pub fn execute(path: &Path, list_records: bool, limits: PatchLimits) -> Result<()> {
    limits
        .validate_patch_size(input_len(path, "patch")?)
        .map_err(|e| patch_error(e, "read patch", path))?;
    let data = read_input(path, "patch")?;

    let summary = validate_patch(&data, &limits, None)
        .map_err(|e| patch_error(e, "read patch", path))?;

    println!("\n{}", style("IPS Patch Information").bold().underlined());
    println!("File: {}", style(path.display()).cyan());
    println!("Size: {}", style(format_bytes(data.len() as u64)).green());
    println!(
        "Records: {} ({} literal, {} RLE)",
        style(summary.record_count()).green(),
        summary.literal_records,
        summary.rle_records
    );
    println!("Bytes written: {}", style(summary.bytes_written).green());
    println!(
        "Minimum target size: {}",
        style(format_bytes(summary.max_target_end as u64)).yellow()
    );
    if summary.trailing_bytes > 0 {
        println!(
            "Trailing bytes after EOF: {}",
            style(summary.trailing_bytes).red()
        );
    }

    if list_records && summary.record_count() > 0 {
        println!("\n{}", style("Records").bold());
        let mut table = create_record_table();
        let reader = RecordReader::new(&data).map_err(|e| patch_error(e, "read patch", path))?;
        for (index, record) in reader.enumerate() {
            let record = record.map_err(|e| patch_error(e, "read patch", path))?;
            add_record_row(&mut table, index, &record);
        }
        table.printstd();
    }

    Ok(())
}
