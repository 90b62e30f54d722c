//! Arena configuration parameters.

use crate::error::ArenaError;

/// How the object arena grows when an insertion does not fit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GrowthPolicy {
    /// Grow to exactly the required size on every insertion that does
    /// not fit. Every such insertion relocates the buffer.
    Exact,
    /// Grow to at least twice the current capacity, bounding the number
    /// of relocations to `O(log n)`.
    #[default]
    Doubling,
}

/// Configuration for a scene's stores.
///
/// Validated at construction; all values are immutable after creation.
#[derive(Clone, Debug)]
pub struct ArenaConfig {
    /// Growth strategy for the object arena. Default: [`GrowthPolicy::Doubling`].
    pub growth: GrowthPolicy,

    /// Bytes reserved for the object arena on first growth.
    ///
    /// Default: 4096. Ignored by [`GrowthPolicy::Exact`].
    pub initial_object_bytes: usize,

    /// Upper bound on the object arena size in bytes.
    ///
    /// Default: 1 GiB. Insertions that would exceed it fail with
    /// [`ArenaError::OutOfMemory`].
    pub max_object_bytes: usize,

    /// Upper bound on the number of light entries. Default: 2^20.
    pub max_lights: usize,

    /// Upper bound on the number of materials. Default: 2^20.
    ///
    /// Must fit a `u32` handle.
    pub max_materials: usize,
}

impl ArenaConfig {
    /// Default initial arena reservation.
    pub const DEFAULT_INITIAL_OBJECT_BYTES: usize = 4096;

    /// Default arena limit: 1 GiB.
    pub const DEFAULT_MAX_OBJECT_BYTES: usize = 1 << 30;

    /// Default light and material limit.
    pub const DEFAULT_MAX_ENTRIES: usize = 1 << 20;

    /// Create a config with the given growth policy and default limits.
    pub fn new(growth: GrowthPolicy) -> Self {
        Self {
            growth,
            initial_object_bytes: Self::DEFAULT_INITIAL_OBJECT_BYTES,
            max_object_bytes: Self::DEFAULT_MAX_OBJECT_BYTES,
            max_lights: Self::DEFAULT_MAX_ENTRIES,
            max_materials: Self::DEFAULT_MAX_ENTRIES,
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.max_object_bytes == 0 {
            return Err(ArenaError::InvalidConfig {
                reason: "max_object_bytes must be non-zero".to_string(),
            });
        }
        if self.initial_object_bytes > self.max_object_bytes {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "initial_object_bytes ({}) exceeds max_object_bytes ({})",
                    self.initial_object_bytes, self.max_object_bytes,
                ),
            });
        }
        if self.max_materials > u32::MAX as usize {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "max_materials ({}) does not fit a u32 handle",
                    self.max_materials
                ),
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(GrowthPolicy::default())
    }
}
