// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use swarmer::config::{load_config, validate_config, Config, RuntimeBuilder};
use tokio_util::sync::CancellationToken;

/// Run a load test described by a YAML file
#[derive(Parser, Debug)]
#[command(name = "swarmer")]
#[command(about = "Load test runner with virtual users and transaction timing")]
struct Cli {
    /// Path to the run configuration
    config: PathBuf,

    /// Base URL of the system under test
    #[arg(long)]
    host: Option<String>,

    /// Number of concurrent users
    #[arg(short, long)]
    users: Option<usize>,

    /// Users started per second
    #[arg(short = 'r', long)]
    spawn_rate: Option<f64>,

    /// Stop after this many seconds
    #[arg(short = 't', long)]
    run_time: Option<u64>,

    /// Do not serve plugin routes
    #[arg(long)]
    headless: bool,

    /// Address for plugin routes
    #[arg(long)]
    web_bind: Option<String>,

    /// Write completed transactions to a CSV file
    #[arg(long)]
    log_transactions_in_file: bool,

    /// Directory for the transactions CSV file
    #[arg(long)]
    transactions_dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(host) = &self.host {
            cfg.host = host.clone();
        }
        if let Some(users) = self.users {
            cfg.users = users;
        }
        if let Some(spawn_rate) = self.spawn_rate {
            cfg.spawn_rate = spawn_rate;
        }
        if let Some(run_time) = self.run_time {
            cfg.run_time_seconds = Some(run_time);
        }
        if self.headless {
            cfg.web.enabled = false;
        }
        if let Some(bind) = &self.web_bind {
            cfg.web.bind = Some(bind.clone());
        }
        if self.log_transactions_in_file {
            cfg.transactions.log_in_file = true;
        }
        if let Some(dir) = &self.transactions_dir {
            cfg.transactions.output_dir = Some(dir.clone());
        }
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let mut cfg = load_config(&cli.config)
        .map_err(|e| anyhow::anyhow!("failed to load {}: {}", cli.config.display(), e))?;
    cli.apply_overrides(&mut cfg);

    if let Err(errors) = validate_config(&cfg) {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        anyhow::bail!("Configuration validation failed:\n{}", messages.join("\n"));
    }

    let runtime = RuntimeBuilder::from_config(&cfg)?;

    let shutdown = CancellationToken::new();
    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let summary = runtime.run(shutdown).await?;
    println!(
        "Run finished: {} users, {} requests, {} failures in {:.1}s",
        summary.users_spawned,
        summary.request_count,
        summary.failure_count,
        summary.duration.as_secs_f64()
    );
    Ok(())
}
