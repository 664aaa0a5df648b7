//! # autoroutes
//!
//! **autoroutes** is a file-system route generator for page-folder frontends:
//! it scans configured page roots, emits a deterministic route-table source
//! file plus per-group barrel files, scaffolds boilerplate entry files for
//! empty page folders, and in watch mode regenerates everything on change.
//!
//! ## Architecture
//!
//! The library is organized into a few small modules:
//!
//! - **[`config`]** - YAML-backed configuration: page roots, entry file name,
//!   output paths, route-path overrides and watch tunables
//! - **[`scanner`]** - best-effort directory scan producing the page set
//! - **[`generator`]** - Askama-templated code generation with atomic writes
//! - **[`watcher`]** - debounced filesystem watching with a polling fallback
//! - **[`reload`]** - injected reload-notification capability
//! - **[`cli`]** - `autoroutes-gen` command-line interface
//!
//! ### Generation Flow
//!
//! ```text
//! page roots → Scanner → PageEntry set → template data → Askama rendering
//!            → atomic write (skip when unchanged) → reload notification
//! ```
//!
//! A subdirectory of a page root is a page iff it contains the configured
//! entry file. Generated output is a pure function of the discovered page
//! set: rescanning an unchanged tree produces byte-identical files, and
//! unchanged files are never rewritten, so a host dev server sees no
//! spurious reloads.
//!
//! ### Watch Flow
//!
//! ```text
//! notify events ─┐
//!                ├→ debounce window → scaffold? → generate → notify reload
//! polling diff ──┘
//! ```
//!
//! Bursts of filesystem events collapse into one generation cycle. The
//! polling thread diffs a sorted snapshot of qualifying folder names as a
//! backstop for watch backends that miss events. No failure in either path
//! is fatal: the watcher degrades to stale routes, never to a crashed dev
//! process.
//!
//! ## Quick Start
//!
//! ```no_run
//! use autoroutes::{generate, Config};
//!
//! let config = Config::default();
//! let summary = generate(&config, false).expect("generation failed");
//! println!("{} routes written to {:?}", summary.route_count, summary.routes_file);
//! ```
//!
//! Watch mode:
//!
//! ```no_run
//! use autoroutes::{Config, LogReloader, RouteWatcher};
//! use std::sync::Arc;
//!
//! let watcher = RouteWatcher::spawn(Config::default(), Arc::new(LogReloader))
//!     .expect("failed to start watcher");
//! // ... keep the watcher alive for the lifetime of the dev session
//! drop(watcher);
//! ```

pub mod cli;
pub mod config;
pub mod generator;
pub mod naming;
pub mod reload;
pub mod scanner;
pub mod watcher;

pub use config::{Config, PageRoot};
pub use generator::{generate, Summary, WriteOutcome};
pub use naming::{component_name, const_name, display_name, route_path};
pub use reload::{LogReloader, NoopReloader, Reloader};
pub use scanner::{scan_all, scan_root, snapshot, PageEntry, PageGroup};
pub use watcher::{RouteWatcher, WatchStats};
