// SPDX-License-Identifier: Apache-2.0
//! `memoryd` — the multi-tenant agent memory service binary. Loads config,
//! opens the store pool, runs migrations, starts the capsule expiry
//! sweeper and telemetry flush loop as background tasks, and serves the
//! HTTP wire surface (§6) until `SIGINT`/`SIGTERM`.
use std::time::Duration;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tokio::sync::watch;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use memoryd_capsules::{run_periodic_sweep, DEFAULT_SWEEP_INTERVAL_SECS};
use memoryd_telemetry::{run_periodic_flush, TelemetrySink, DEFAULT_FLUSH_INTERVAL_SECS};

#[derive(Parser, Debug)]
#[command(name = "memoryd", about = "Multi-tenant agent memory service")]
struct Cli {
    /// Explicit config file path. Overrides the built-in search path.
    #[arg(long, global = true)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the fully merged configuration and exit.
    ShowConfig,
    /// Run pending store migrations and exit, without starting the server.
    Migrate,
    /// Start the HTTP server (the default when no subcommand is given).
    Serve,
    /// Print a shell completion script for `shell` and exit.
    Completions { shell: Shell },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();

    if let Some(Command::Completions { shell }) = cli.command {
        generate(shell, &mut Cli::command(), "memoryd", &mut std::io::stdout());
        return Ok(());
    }

    let config = memoryd_config::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::ShowConfig => {
            println!("{}", serde_yaml::to_string(&config)?);
            Ok(())
        }
        Command::Migrate => {
            let pool = memoryd_store::connect(
                &config.store.dsn,
                config.store.pool_size,
                config.store.statement_timeout_secs,
            )
            .await
            .context("connecting to store")?;
            memoryd_store::migrate(&pool).await.context("running migrations")?;
            tracing::info!("migrations applied");
            Ok(())
        }
        Command::Serve => serve(config).await,
        Command::Completions { .. } => unreachable!("handled before config load"),
    }
}

async fn serve(config: memoryd_config::Config) -> anyhow::Result<()> {
    let pool = memoryd_store::connect(
        &config.store.dsn,
        config.store.pool_size,
        config.store.statement_timeout_secs,
    )
    .await
    .context("connecting to store")?;
    memoryd_store::migrate(&pool).await.context("running migrations")?;

    let telemetry = TelemetrySink::with_sample_rate(
        None,
        memoryd_telemetry::DEFAULT_BUFFER_CAPACITY,
        config.telemetry.sample_rate,
    );
    let rate_limit = memoryd_service::rate_limit::RateLimitConfig {
        events_per_minute: config.rate_limit.events_per_minute,
        acb_builds_per_minute: config.rate_limit.acb_builds_per_minute,
    };
    let state = memoryd_service::AppState::with_config(
        pool.clone(),
        telemetry.clone(),
        rate_limit,
        config.privacy.secret_scanning_enabled,
        config.acb.default_max_tokens,
    );
    let app = memoryd_service::router(state);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sweeper = tokio::spawn(run_periodic_sweep(
        pool,
        Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
        shutdown_rx.clone(),
    ));
    let flusher = tokio::spawn(run_periodic_flush(
        telemetry,
        Duration::from_secs(DEFAULT_FLUSH_INTERVAL_SECS),
        shutdown_rx,
    ));

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.server.bind_addr))?;
    tracing::info!(addr = %config.server.bind_addr, "memoryd listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .with_graceful_shutdown(wait_for_shutdown_signal())
    .await
    .context("serving HTTP")?;

    let _ = shutdown_tx.send(true);
    let _ = tokio::join!(sweeper, flusher);
    Ok(())
}

async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received, draining background tasks");
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .try_init();
}

