//! Command implementations

use anyhow::Error;
use ips_patch::IpsError;
use std::path::Path;

pub mod apply;
pub mod info;
pub mod validate;

/// Wrap a patch error so the diagnostic leads with its kind
fn patch_error(err: IpsError, action: &str, path: &Path) -> Error {
    let kind = err.kind();
    Error::new(err).context(format!("{kind}: failed to {action} {}", path.display()))
}
