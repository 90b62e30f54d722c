//! [`DeviceMemory`] doubles for exercising transfer failure paths.

use prism_scene::{DeviceError, DeviceMemory, HostBuffer, HostDevice};

/// Device that accepts `remaining` uploads and then runs out of memory.
pub struct FailingDevice {
    inner: HostDevice,
    remaining: usize,
}

impl FailingDevice {
    pub fn after(uploads: usize) -> Self {
        Self {
            inner: HostDevice::new(),
            remaining: uploads,
        }
    }
}

impl DeviceMemory for FailingDevice {
    type Buffer = HostBuffer;

    fn upload(&mut self, label: &str, bytes: &[u8]) -> Result<HostBuffer, DeviceError> {
        if self.remaining == 0 {
            return Err(DeviceError::OutOfMemory {
                label: label.to_string(),
                requested: bytes.len(),
                available: 0,
            });
        }
        self.remaining -= 1;
        self.inner.upload(label, bytes)
    }
}

/// Device whose uploads silently drop the last byte of non-empty buffers.
#[derive(Default)]
pub struct TruncatingDevice {
    inner: HostDevice,
}

impl DeviceMemory for TruncatingDevice {
    type Buffer = HostBuffer;

    fn upload(&mut self, label: &str, bytes: &[u8]) -> Result<HostBuffer, DeviceError> {
        let keep = bytes.len().saturating_sub(1);
        self.inner.upload(label, &bytes[..keep])
    }
}
