//! Serve command - open the upload page in a local browser.

use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use scorecard::{Scorecard, ScorecardConfig};
use tokio::sync::Notify;

use crate::server::lifecycle::Watchdog;
use crate::server::{app, state::AppState};

/// How often the watchdog checks the heartbeat.
const WATCHDOG_POLL: Duration = Duration::from_secs(1);

pub fn run(
    port: u16,
    no_open: bool,
    idle_timeout: u64,
    group_fraction: f64,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = ScorecardConfig::default().with_group_fraction(group_fraction);
    let state = AppState::new(Scorecard::with_config(config)?);

    // Print server info
    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Starting scorecard server at".cyan().bold(),
        url.white().bold()
    );
    println!();
    if verbose {
        println!("  Group fraction: {}", group_fraction);
        if idle_timeout > 0 {
            println!("  Idle timeout: {}s after the last browser tab closes", idle_timeout);
        }
        println!();
    }
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    // Open browser if requested
    if !no_open {
        if let Err(e) = open::that(&url) {
            eprintln!("{} Could not open browser: {}", "Warning:".yellow(), e);
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let expired = Arc::new(Notify::new());
        let watchdog = (idle_timeout > 0).then(|| {
            Watchdog::start(
                state.heartbeat.clone(),
                Duration::from_secs(idle_timeout),
                WATCHDOG_POLL,
                expired.clone(),
            )
        });

        let shutdown = {
            let expired = expired.clone();
            async move {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = expired.notified() => {
                        println!("{}", "Browser closed.".dimmed());
                    }
                }
                println!("{}", "Shutting down...".yellow());
            }
        };

        let result = app::run_server(state, port, shutdown).await;

        if let Some(watchdog) = watchdog {
            watchdog.stop().await;
        }

        result
    })
}
