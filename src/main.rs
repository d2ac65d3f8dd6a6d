//! Recency Cache console
//!
//! Reads cache commands from stdin and writes JSON replies to stdout.

use anyhow::Context;
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recency_cache::console::run_session;
use recency_cache::models::Reply;
use recency_cache::{Config, SharedCache};

/// Main entry point for the cache console.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load configuration from environment variables
/// 3. Create the shared cache with the configured capacity
/// 4. Answer commands until EOF, Ctrl+C or SIGTERM
/// 5. Optionally print a final stats reply
/// 6. On a signal, exit without waiting for the blocked stdin reader
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recency_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting recency cache console");

    let config = Config::from_env();
    info!(
        "Configuration loaded: capacity={}, report_stats={}",
        config.capacity, config.report_stats
    );

    let cache: SharedCache<String, String> =
        SharedCache::from_config(&config).context("failed to create cache")?;
    info!("Cache initialized");

    let stdin = BufReader::new(tokio::io::stdin());
    let interrupted = tokio::select! {
        result = run_session(&cache, stdin, tokio::io::stdout()) => {
            let answered = result.context("console session failed")?;
            info!("Input closed after {} commands", answered);
            false
        }
        _ = shutdown_signal() => true,
    };

    let report = if config.report_stats {
        write_final_stats(&cache).await
    } else {
        Ok(())
    };

    info!("Console shutdown complete");
    if interrupted {
        // A pending stdin read blocks runtime shutdown and cannot be cancelled
        if let Err(err) = &report {
            error!("{:#}", err);
            std::process::exit(1);
        }
        std::process::exit(0);
    }
    report
}

/// Prints the final stats reply on stdout.
async fn write_final_stats(cache: &SharedCache<String, String>) -> anyhow::Result<()> {
    let mut line = Reply::stats(cache.stats().await).to_json_line();
    line.push('\n');
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(line.as_bytes())
        .await
        .context("failed to write final stats")?;
    stdout.flush().await.context("failed to flush stdout")?;
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
