//! Errors from device memory and scene transfer.

use std::error::Error;
use std::fmt;

/// Errors reported by a [`DeviceMemory`](crate::DeviceMemory) implementation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeviceError {
    /// The device could not allocate the buffer.
    OutOfMemory {
        /// Buffer being uploaded.
        label: String,
        /// Bytes requested.
        requested: usize,
        /// Bytes still available on the device.
        available: usize,
    },
    /// The copy into device memory failed.
    CopyFailed {
        /// Buffer being uploaded.
        label: String,
        /// Human-readable reason.
        reason: String,
    },
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory {
                label,
                requested,
                available,
            } => {
                write!(
                    f,
                    "device out of memory uploading '{label}': requested {requested} bytes, {available} available"
                )
            }
            Self::CopyFailed { label, reason } => {
                write!(f, "device copy of '{label}' failed: {reason}")
            }
        }
    }
}

impl Error for DeviceError {}

/// Errors from [`upload_scene`](crate::upload_scene).
///
/// Any transfer error is fatal for the render invocation; there is no
/// partial-scene fallback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransferError {
    /// The device rejected an upload.
    Device(DeviceError),
    /// A device buffer does not have the length of its source.
    SizeMismatch {
        /// Buffer that mismatched.
        label: &'static str,
        /// Source length in bytes.
        expected: usize,
        /// Device length in bytes.
        actual: usize,
    },
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device(e) => write!(f, "scene transfer failed: {e}"),
            Self::SizeMismatch {
                label,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "device buffer '{label}' has {actual} bytes, expected {expected}"
                )
            }
        }
    }
}

impl Error for TransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Device(e) => Some(e),
            Self::SizeMismatch { .. } => None,
        }
    }
}

impl From<DeviceError> for TransferError {
    fn from(e: DeviceError) -> Self {
        Self::Device(e)
    }
}
