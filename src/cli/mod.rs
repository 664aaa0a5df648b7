//! # CLI Module
//!
//! Command-line interface for the route generator.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Run one generation pass and exit. Intended as a build-start hook so a
//! production build always has current routes without a running watcher:
//!
//! ```bash
//! autoroutes-gen generate --config autoroutes.yaml
//! ```
//!
//! ### `watch`
//!
//! Run an initial pass, then watch the page roots and regenerate on change
//! until interrupted:
//!
//! ```bash
//! autoroutes-gen watch --config autoroutes.yaml
//! ```

mod commands;


pub use commands::{run_cli, Cli, Commands};
