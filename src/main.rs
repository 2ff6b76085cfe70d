use clap::Parser;
use sanitree::commands::sanitize;
use sanitree::config::Cli;
use sanitree::Config;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Convert CLI args to Config - this validates immediately
    let config = Config::try_from(cli)?;

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = Arc::clone(&shutdown);
    if let Err(e) = ctrlc::set_handler(move || {
        eprintln!("\nStopping after the current file...");
        shutdown_clone.store(true, Ordering::Relaxed);
    }) {
        eprintln!("Warning: Failed to install signal handler: {}", e);
    }

    sanitize::run_with_cancel(config, &shutdown)
        .map_err(|e| anyhow::anyhow!(sanitize::format_error(&e)))?;

    Ok(())
}
