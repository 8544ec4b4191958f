use anyhow::Context;
use clap::Parser;
use sift_indexer::cli::{Cli, Commands};
use sift_indexer::{Indexer, init_logger};
use sift_kernel::config::load_config;
use sift_kernel::domain::config::SiftConfig;
use std::io::{self, Write};
use tokio::sync::watch;
use tracing::warn;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg: SiftConfig =
        load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;
    let _log = init_logger("sift", &cfg.logger)?;

    let mut builder = Indexer::builder().config(cfg);
    if let Commands::Sync { page_size: Some(page_size), .. } = &cli.command {
        builder = builder.page_size(*page_size);
    }
    let indexer = builder.build().await?;

    match cli.command {
        Commands::List { api_only } => {
            let mut out = io::stdout().lock();
            for content_type in indexer.list(api_only) {
                writeln!(out, "{}\t{}", content_type.uid, content_type.name)?;
            }
        },
        Commands::Count { uids } => {
            let report = indexer.count(&uids).await?;
            let mut out = io::stdout().lock();
            for (label, count) in &report.per_type {
                match count {
                    Some(count) => writeln!(out, "{label}\t{count}")?,
                    None => writeln!(out, "{label}\tunknown")?,
                }
            }
            writeln!(out, "total\t{}", report.total)?;
        },
        Commands::Sync { uids, .. } => {
            let (cancel_tx, cancel) = watch::channel(false);
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupted, stopping after the current batch");
                    cancel_tx.send_replace(true);
                }
            });

            let reports = indexer.sync(&uids, cancel).await?;
            let mut out = io::stdout().lock();
            for report in &reports {
                let status = if report.cancelled { "cancelled" } else { "done" };
                writeln!(
                    out,
                    "{}\t{} documents in {} batches\t{status}",
                    report.uid, report.documents, report.batches
                )?;
            }
        },
    }

    Ok(())
}
