//! Formatting utilities

use humansize::{DECIMAL, format_size};

/// Format file size in human-readable format
pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes, DECIMAL)
}

/// Format a target offset the way IPS tools print them
pub fn format_offset(offset: u32) -> String {
    format!("0x{offset:06X}")
}

/// Hex preview of the first `max` bytes, with an ellipsis when cut short
pub fn format_hex_preview(data: &[u8], max: usize) -> String {
    let shown: Vec<String> = data.iter().take(max).map(|b| format!("{b:02X}")).collect();
    let mut preview = shown.join(" ");
    if data.len() > max {
        preview.push_str(" ...");
    }
    preview
}
