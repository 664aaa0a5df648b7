use crate::config::Config;
use crate::generator::generate;
use crate::reload::LogReloader;
use crate::watcher::RouteWatcher;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Command-line interface for the route generator.
#[derive(Parser)]
#[command(name = "autoroutes-gen")]
#[command(about = "Autoroutes CLI", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run one generation pass (build-start hook)
    Generate {
        /// Path to the YAML config file (defaults to built-in layout)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Also scaffold entry files for empty page folders
        #[arg(long, default_value_t = false)]
        scaffold: bool,

        /// Suppress the per-group summary output
        #[arg(short, long, default_value_t = false)]
        quiet: bool,
    },
    /// Generate once, then watch the page roots and regenerate on change
    Watch {
        /// Path to the YAML config file (defaults to built-in layout)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Disable template scaffolding for newly created folders
        #[arg(long, default_value_t = false)]
        no_scaffold: bool,
    },
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, a generation pass fails,
/// or the watcher cannot be started.
pub fn run_cli() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Generate {
            config,
            scaffold,
            quiet,
        } => {
            let config = load_config(config.as_deref())?;
            let summary = generate(&config, *scaffold)?;
            if !quiet {
                println!("✅ Generated routes → {:?}", summary.routes_file);
                for (kind, count) in &summary.group_counts {
                    println!("   📝 {kind}: {count} routes");
                }
                if !summary.scaffolded.is_empty() {
                    println!("   ✨ Scaffolded: {}", summary.scaffolded.join(", "));
                }
            }
            Ok(())
        }
        Commands::Watch { config, no_scaffold } => {
            let mut config = load_config(config.as_deref())?;
            if *no_scaffold {
                config.auto_scaffold = false;
            }
            let mut watcher = RouteWatcher::spawn(config, Arc::new(LogReloader))?;
            println!("👀 Watching page roots for changes (Ctrl+C to stop)...");
            wait_for_interrupt()?;
            watcher.shutdown();
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::from_yaml_file(path),
        None => Ok(Config::default()),
    }
}

#[cfg(unix)]
fn wait_for_interrupt() -> Result<(), Box<dyn std::error::Error>> {
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    if let Some(signal) = signals.forever().next() {
        info!(signal, "received shutdown signal");
    }
    Ok(())
}

#[cfg(not(unix))]
fn wait_for_interrupt() -> Result<(), Box<dyn std::error::Error>> {
    loop {
        std::thread::sleep(std::time::Duration::from_secs(60));
    }
}
