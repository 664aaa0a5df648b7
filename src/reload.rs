//! Reload notification capability.
//!
//! The watcher signals the host dev server through this trait instead of
//! depending on one directly, so generation cycles can be tested with a
//! recording implementation and wired to any reload transport in production.

use std::path::Path;
use tracing::info;

/// Injected capability invoked after a generation cycle actually changed the
/// route table on disk. Implementations typically invalidate the generated
/// module and broadcast a full page reload.
pub trait Reloader: Send + Sync {
    fn notify_reload(&self, changed: &Path);
}

/// Discards reload notifications. Useful for one-shot build passes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReloader;

impl Reloader for NoopReloader {
    fn notify_reload(&self, _changed: &Path) {}
}

/// Logs reload notifications. The default for the CLI watch command, where
/// the consuming dev server tails the log or watches the output file itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReloader;

impl Reloader for LogReloader {
    fn notify_reload(&self, changed: &Path) {
        info!(changed = ?changed, "route table updated, reload required");
    }
}
