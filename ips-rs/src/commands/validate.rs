//! Patch validation command

use anyhow::Result;
use console::style;
use ips_patch::{PatchLimits, validate_patch};
use std::path::Path;

use super::patch_error;
use crate::utils::{input_len, read_input};

pub fn execute(path: &Path, target: Option<&Path>, limits: PatchLimits) -> Result<()> {
    limits
        .validate_patch_size(input_len(path, "patch")?)
        .map_err(|e| patch_error(e, "validate patch", path))?;
    let data = read_input(path, "patch")?;

    // Only the target's length matters for a dry run
    let target_len = target
        .map(|target| input_len(target, "target"))
        .transpose()?;

    let summary = validate_patch(&data, &limits, target_len)
        .map_err(|e| patch_error(e, "validate patch", path))?;

    match target {
        Some(target) => println!(
            "✓ IPS patch '{}' is valid for '{}' ({})",
            style(path.display()).cyan(),
            style(target.display()).cyan(),
            summary
        ),
        None => println!(
            "✓ IPS patch '{}' is valid ({})",
            style(path.display()).cyan(),
            summary
        ),
    }

    Ok(())
}
