//! Patch application command

use anyhow::Result;
use console::style;
use ips_patch::{IpsPatcher, PatchLimits};
use std::path::{Path, PathBuf};

use super::patch_error;
use crate::utils::{
    default_output_path, format_bytes, input_len, read_input, with_spinner, write_atomically,
};

pub fn execute(
    target: &Path,
    patch: &Path,
    output: Option<PathBuf>,
    force: bool,
    limits: PatchLimits,
) -> Result<()> {
    let output = output.unwrap_or_else(|| default_output_path(target));
    if output.exists() && !force {
        anyhow::bail!(
            "Output file already exists: {} (use --force to overwrite)",
            output.display()
        );
    }

    // Reject oversized inputs before allocating buffers for them
    limits
        .validate_patch_size(input_len(patch, "patch")?)
        .map_err(|e| patch_error(e, "apply patch", patch))?;
    limits
        .validate_target_size(input_len(target, "target")?)
        .map_err(|e| patch_error(e, "apply patch", patch))?;

    let patch_data = read_input(patch, "patch")?;
    // The loaded copy is patched; the target file itself is never opened for writing
    let mut patched = read_input(target, "target")?;

    let patcher = IpsPatcher::with_limits(limits);
    let summary = with_spinner("Applying patch", patch_data.len(), || {
        patcher.apply_in_place(&patch_data, &mut patched)
    })
    .map_err(|e| patch_error(e, "apply patch", patch))?;

    log::info!("{}", summary);
    write_atomically(&output, &patched, force)?;

    println!(
        "✓ Applied {} ({}) to {}",
        style(patch.display()).cyan(),
        summary,
        style(target.display()).cyan()
    );
    println!(
        "  Wrote {} to {}",
        style(format_bytes(patched.len() as u64)).green(),
        style(output.display()).yellow()
    );

    Ok(())
}
