//! # Watcher Module
//!
//! Watches the page roots for changes and regenerates the route table.
//!
//! ## Overview
//!
//! A [`RouteWatcher`] owns three cooperating pieces:
//!
//! - a native filesystem watcher (`notify`) registered recursively on every
//!   existing page root;
//! - a coordinator thread that debounces qualifying events so bursts within
//!   the debounce window collapse into a single generation cycle;
//! - a polling thread that periodically diffs a serialized snapshot of the
//!   qualifying folder names, as a correctness backstop for watch backends
//!   that miss events (network filesystems, editor atomic-save patterns).
//!
//! The coordinator cycles `Idle → Debouncing → Generating → Idle`. Generation
//! runs inline on the coordinator thread, so at most one cycle is ever in
//! flight; events arriving mid-cycle queue on the channel and coalesce into
//! the next window. A new-folder event marks the cycle for scaffolding and
//! delays it briefly so the folder creation can settle.
//!
//! ## Error discipline
//!
//! Nothing here is fatal to the host process. Failed generation cycles and
//! polling ticks are logged and counted on [`WatchStats`]; the watcher
//! degrades to "routes stop updating" rather than crashing a long-lived dev
//! process.

use crate::config::Config;
use crate::generator::{generate, WriteOutcome};
use crate::reload::Reloader;
use crate::scanner::{is_immediate_child, snapshot};
use notify::{Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsStr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Counters exposed for observability and tests.
#[derive(Debug, Default)]
pub struct WatchStats {
    /// Completed generation cycles, including the initial pass.
    pub cycles: AtomicU64,
    /// Generation cycles that ended in an error.
    pub failed_cycles: AtomicU64,
    /// Polling ticks that failed to read the tree.
    pub poll_errors: AtomicU64,
}

enum WatchSignal {
    Change { reason: String, scaffold: bool },
    Shutdown,
}

/// A running watch session. Dropping it (or calling
/// [`RouteWatcher::shutdown`]) detaches the filesystem watcher, stops both
/// threads and clears all timers.
pub struct RouteWatcher {
    tx: Sender<WatchSignal>,
    stop: Arc<AtomicBool>,
    stats: Arc<WatchStats>,
    watcher: Option<RecommendedWatcher>,
    coordinator: Option<JoinHandle<()>>,
    poller: Option<JoinHandle<()>>,
}

impl RouteWatcher {
    /// Run an initial generation pass, then watch the page roots and
    /// regenerate on change, notifying `reloader` whenever the route table
    /// content actually changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the native
    /// watcher cannot be created. Roots that do not exist yet are skipped
    /// with a warning (the polling fallback still covers them once created).
    pub fn spawn(config: Config, reloader: Arc<dyn Reloader>) -> anyhow::Result<Self> {
        config.validate()?;
        let stats = Arc::new(WatchStats::default());
        let stop = Arc::new(AtomicBool::new(false));

        // Initial pass, scaffolding empty folders when configured to.
        run_cycle(&config, config.auto_scaffold, reloader.as_ref(), &stats);

        let (tx, rx) = mpsc::channel::<WatchSignal>();

        // Canonicalized roots for event classification: notify reports
        // absolute paths while configured roots may be relative.
        let watch_roots: Vec<PathBuf> = config
            .roots
            .iter()
            .filter_map(|root| match std::fs::canonicalize(&root.dir) {
                Ok(dir) => Some(dir),
                Err(err) => {
                    warn!(dir = ?root.dir, %err, "page root not watchable, relying on polling");
                    None
                }
            })
            .collect();

        let mut watcher = {
            let tx = tx.clone();
            let config = config.clone();
            let roots = watch_roots.clone();
            RecommendedWatcher::new(
                move |res: Result<Event, notify::Error>| match res {
                    Ok(event) => {
                        if let Some((reason, scaffold)) = classify(&config, &roots, &event) {
                            let _ = tx.send(WatchSignal::Change { reason, scaffold });
                        }
                    }
                    Err(err) => warn!(%err, "watch error"),
                },
                NotifyConfig::default(),
            )?
        };
        for dir in &watch_roots {
            watcher.watch(dir, RecursiveMode::Recursive)?;
            info!(dir = ?dir, "watching page root");
        }

        let coordinator = {
            let config = config.clone();
            let reloader = Arc::clone(&reloader);
            let stats = Arc::clone(&stats);
            std::thread::spawn(move || coordinator_loop(&config, &rx, reloader.as_ref(), &stats))
        };

        let poller = {
            let config = config.clone();
            let tx = tx.clone();
            let stop = Arc::clone(&stop);
            let stats = Arc::clone(&stats);
            // Baseline reflects the tree as of the initial pass; anything
            // that changes afterwards must trigger, even before the first
            // tick.
            let baseline = snapshot(&config).ok();
            std::thread::spawn(move || poll_loop(&config, baseline, &tx, &stop, &stats))
        };

        Ok(Self {
            tx,
            stop,
            stats,
            watcher: Some(watcher),
            coordinator: Some(coordinator),
            poller: Some(poller),
        })
    }

    /// Shared counters for this session.
    pub fn stats(&self) -> Arc<WatchStats> {
        Arc::clone(&self.stats)
    }

    /// Stop both threads and detach the filesystem watcher. Idempotent.
    pub fn shutdown(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        let _ = self.tx.send(WatchSignal::Shutdown);
        // Dropping the notify watcher detaches all registered paths.
        drop(self.watcher.take());
        if let Some(handle) = self.coordinator.take() {
            let _ = handle.join();
        }
        if let Some(handle) = self.poller.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RouteWatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Decide whether an event should trigger regeneration. Qualifying paths are
/// the entry file anywhere under a root, or an immediate child of a root
/// other than the generated barrel file (folder adds and removes). A created
/// directory additionally requests scaffolding.
fn classify(config: &Config, roots: &[PathBuf], event: &Event) -> Option<(String, bool)> {
    if !matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) {
        return None;
    }
    let entry_name = OsStr::new(&config.entry_file);
    let barrel_name = OsStr::new(&config.barrel_file);
    let mut hit = None;
    let mut scaffold = false;
    for path in &event.paths {
        for root in roots {
            if !path.starts_with(root) || path == root {
                continue;
            }
            let name = path.file_name();
            // Our own atomic-write temp files are dotfiles inside the roots;
            // ignore hidden names so a generation cycle cannot re-trigger
            // itself.
            if name
                .and_then(OsStr::to_str)
                .is_some_and(|n| n.starts_with('.'))
            {
                continue;
            }
            let entry_match = name == Some(entry_name);
            let root_child = is_immediate_child(root, path) && name != Some(barrel_name);
            if !entry_match && !root_child {
                continue;
            }
            if root_child && matches!(event.kind, EventKind::Create(_)) && path.is_dir() {
                scaffold = true;
            }
            hit = Some(format!(
                "{:?} {}",
                event.kind,
                name.map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
            ));
        }
    }
    hit.map(|reason| (reason, scaffold))
}

/// Debounce-and-generate loop: `Idle` on `recv`, `Debouncing` while events
/// keep arriving within the window, `Generating` inline once it goes quiet.
fn coordinator_loop(
    config: &Config,
    rx: &mpsc::Receiver<WatchSignal>,
    reloader: &dyn Reloader,
    stats: &WatchStats,
) {
    let debounce = Duration::from_millis(config.debounce_ms);
    while let Ok(signal) = rx.recv() {
        let (mut reason, mut scaffold) = match signal {
            WatchSignal::Shutdown => return,
            WatchSignal::Change { reason, scaffold } => (reason, scaffold),
        };
        loop {
            match rx.recv_timeout(debounce) {
                Ok(WatchSignal::Shutdown) => return,
                Ok(WatchSignal::Change { reason: r, scaffold: s }) => {
                    reason = r;
                    scaffold |= s;
                }
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => return,
            }
        }
        scaffold &= config.auto_scaffold;
        if scaffold {
            // Let the folder creation fully settle before writing into it.
            std::thread::sleep(Duration::from_millis(config.scaffold_grace_ms));
        }
        debug!(%reason, scaffold, "change detected, regenerating routes");
        run_cycle(config, scaffold, reloader, stats);
    }
}

/// Snapshot-diff fallback for watch backends that miss events. Feeds the
/// same debounced entry point as native events, never the generator
/// directly.
fn poll_loop(
    config: &Config,
    baseline: Option<String>,
    tx: &Sender<WatchSignal>,
    stop: &AtomicBool,
    stats: &WatchStats,
) {
    let interval = Duration::from_millis(config.poll_interval_ms);
    let mut last: Option<String> = baseline;
    let mut next_tick = Instant::now() + interval;
    while !stop.load(Ordering::SeqCst) {
        std::thread::sleep(Duration::from_millis(50));
        if Instant::now() < next_tick {
            continue;
        }
        next_tick = Instant::now() + interval;
        let current = match snapshot(config) {
            Ok(current) => current,
            Err(err) => {
                stats.poll_errors.fetch_add(1, Ordering::SeqCst);
                debug!(%err, "polling tick failed, skipping");
                continue;
            }
        };
        match &last {
            None => last = Some(current),
            Some(previous) if *previous != current => {
                last = Some(current);
                let _ = tx.send(WatchSignal::Change {
                    reason: "polling detected changes".to_string(),
                    scaffold: false,
                });
            }
            Some(_) => {}
        }
    }
}

/// One generation cycle. Errors are logged and counted, never propagated:
/// the previous artifacts stay valid and the watcher keeps running.
fn run_cycle(config: &Config, scaffold: bool, reloader: &dyn Reloader, stats: &WatchStats) {
    match generate(config, scaffold) {
        Ok(summary) => {
            stats.cycles.fetch_add(1, Ordering::SeqCst);
            info!(
                routes = summary.route_count,
                scaffolded = summary.scaffolded.len(),
                changed = matches!(summary.outcome, WriteOutcome::Written),
                "routes regenerated"
            );
            if summary.outcome == WriteOutcome::Written {
                reloader.notify_reload(&summary.routes_file);
            }
        }
        Err(err) => {
            stats.failed_cycles.fetch_add(1, Ordering::SeqCst);
            warn!(err = %format!("{err:#}"), "route generation failed, previous artifacts remain");
        }
    }
}
