//! Parallel, read-only traversal of a device-resident scene.
//!
//! A [`Kernel`] runs once per worker thread against a shared
//! [`DeviceView`]. Nothing mutates the scene after the freeze point, so
//! workers read without locking. Per-thread outputs are returned over a
//! crossbeam channel and reordered by thread index.

use prism_arena::ArenaError;

use crate::device::{DeviceBuffer, DeviceScene, DeviceView};

/// Position of one worker within a launch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThreadIndex {
    /// This worker's index, `0..count`.
    pub index: usize,
    /// Number of workers in the launch.
    pub count: usize,
}

impl ThreadIndex {
    /// The indices in `0..len` this worker owns, using a grid-stride loop.
    pub fn stride(self, len: usize) -> impl Iterator<Item = usize> {
        (self.index..len).step_by(self.count.max(1))
    }
}

/// Work executed by every thread of a launch.
pub trait Kernel: Sync {
    /// Per-thread result.
    type Output: Send;

    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Run this kernel for one worker.
    fn run(&self, view: &DeviceView<'_>, thread: ThreadIndex) -> Self::Output;
}

/// Launch parameters.
#[derive(Clone, Debug, Default)]
pub struct LaunchConfig {
    /// Number of worker threads. `None` = auto-detect
    /// (`available_parallelism`, clamped to `[1, 64]`).
    pub threads: Option<usize>,
}

impl LaunchConfig {
    /// A launch with exactly `threads` workers (clamped to `[1, 1024]`).
    pub fn with_threads(threads: usize) -> Self {
        Self {
            threads: Some(threads),
        }
    }

    /// Resolve the worker count, applying auto-detection if `None`.
    pub fn resolved_threads(&self) -> usize {
        match self.threads {
            Some(n) => n.clamp(1, 1024),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
                .clamp(1, 64),
        }
    }
}

/// Run `kernel` on every worker and collect outputs in thread order.
///
/// Fails before spawning anything if the device buffers cannot be viewed
/// as typed arrays.
pub fn launch<B, K>(
    scene: &DeviceScene<B>,
    kernel: &K,
    config: &LaunchConfig,
) -> Result<Vec<K::Output>, ArenaError>
where
    B: DeviceBuffer,
    K: Kernel,
{
    let view = scene.view()?;
    let threads = config.resolved_threads();
    log::info!("launching kernel '{}' on {threads} threads", kernel.name());

    let (tx, rx) = crossbeam_channel::bounded(threads);
    std::thread::scope(|s| {
        for index in 0..threads {
            let tx = tx.clone();
            let view = &view;
            s.spawn(move || {
                let output = kernel.run(view, ThreadIndex { index, count: threads });
                // The receiver outlives the scope.
                let _ = tx.send((index, output));
            });
        }
    });
    drop(tx);

    let mut outputs: Vec<(usize, K::Output)> = rx.try_iter().collect();
    outputs.sort_by_key(|(index, _)| *index);
    Ok(outputs.into_iter().map(|(_, output)| output).collect())
}
