//! Size limits enforced before a patch is decoded

use crate::error::{BufferKind, IpsError, Result};

/// Smallest well-formed patch: `PATCH` followed directly by `EOF`
pub const DEFAULT_MIN_PATCH_SIZE: usize = 8;
/// Patches must be strictly smaller than 16 MiB
pub const DEFAULT_MAX_PATCH_SIZE: usize = 16 * 1024 * 1024;
/// Targets must be strictly smaller than 512 MiB
pub const DEFAULT_MAX_TARGET_SIZE: usize = 512 * 1024 * 1024;

/// Bounds on the input buffers of an application
///
/// Lengths below `min_patch_size`, or at or above one of the maximums, are
/// rejected with [`IpsError::SizeOutOfBounds`] before any record is read.
///
/// # Examples
///
/// ```
/// use ips_patch::PatchLimits;
///
/// let limits = PatchLimits::default().with_max_target_size(4 * 1024 * 1024);
/// assert!(limits.validate_target_size(1024).is_ok());
/// assert!(limits.validate_target_size(4 * 1024 * 1024).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchLimits {
    /// Inclusive lower bound on the patch length
    pub min_patch_size: usize,
    /// Exclusive upper bound on the patch length
    pub max_patch_size: usize,
    /// Exclusive upper bound on the target length
    pub max_target_size: usize,
}

impl Default for PatchLimits {
    fn default() -> Self {
        Self {
            min_patch_size: DEFAULT_MIN_PATCH_SIZE,
            max_patch_size: DEFAULT_MAX_PATCH_SIZE,
            max_target_size: DEFAULT_MAX_TARGET_SIZE,
        }
    }
}

impl PatchLimits {
    /// Set the minimum patch size
    pub fn with_min_patch_size(mut self, size: usize) -> Self {
        self.min_patch_size = size;
        self
    }

    /// Set the maximum (exclusive) patch size
    pub fn with_max_patch_size(mut self, size: usize) -> Self {
        self.max_patch_size = size;
        self
    }

    /// Set the maximum (exclusive) target size
    pub fn with_max_target_size(mut self, size: usize) -> Self {
        self.max_target_size = size;
        self
    }

    /// Check a patch length against the configured bounds
    pub fn validate_patch_size(&self, size: usize) -> Result<()> {
        if size < self.min_patch_size || size >= self.max_patch_size {
            return Err(IpsError::SizeOutOfBounds {
                buffer: BufferKind::Patch,
                size,
                min: self.min_patch_size,
                max: self.max_patch_size,
            });
        }
        Ok(())
    }

    /// Check a target length against the configured bounds
    pub fn validate_target_size(&self, size: usize) -> Result<()> {
        if size >= self.max_target_size {
            return Err(IpsError::SizeOutOfBounds {
                buffer: BufferKind::Target,
                size,
                min: 0,
                max: self.max_target_size,
            });
        }
        Ok(())
    }
}
