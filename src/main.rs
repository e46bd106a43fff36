use chrono::Local;
use qsa_extract::{info_time, process::process_batch, Config, Result};
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qsa_extract=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let start_time = Local::now();
    let summary = process_batch(&Config::default())
        .await
        .inspect_err(|e| error!("{e}"))?;
    info_time!(
        start_time,
        "Full program time: {} CNPJs, {} rows, {} failed lookups",
        summary.identifiers,
        summary.rows,
        summary.failed_lookups
    );

    Ok(())
}
