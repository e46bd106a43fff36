use chrono::Local;
use tracing::{info, warn};

use crate::input::load_identifiers;
use crate::output::{write_detailed, write_rows};
use crate::parse::{rows_for, DetailedRow, OutputRow};
use crate::rate_limit::RateLimiter;
use crate::request::RegistryClient;
use crate::{info_time, Config, Result};

/// What a finished run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub identifiers: usize,
    pub rows: usize,
    pub failed_lookups: usize,
}

/// Runs the whole job: load CNPJs, look each one up in order, write both reports.
/// Only unreadable input or an unwritable output aborts the run; failed lookups
/// turn into `N/A` rows.
pub async fn process_batch(config: &Config) -> Result<Summary> {
    let start_time = Local::now();

    let cnpjs = load_identifiers(&config.input_path).await?;
    let client = RegistryClient::new(&config.base_url, config.request_timeout)?;
    let mut limiter = RateLimiter::new(config.min_interval);

    info_time!("Started processing {} CNPJs", cnpjs.len());

    // At least one row per CNPJ.
    let mut rows: Vec<OutputRow> = Vec::with_capacity(cnpjs.len());
    let mut detailed: Vec<DetailedRow> = Vec::with_capacity(cnpjs.len());
    let mut failed_lookups = 0;

    for (idx, cnpj) in cnpjs.iter().enumerate() {
        info!("Processing CNPJ {}/{}: {cnpj}", idx + 1, cnpjs.len());

        limiter.acquire().await;
        let lookup = client.lookup(cnpj).await;

        let cnpj_rows = rows_for(cnpj, &lookup);
        match &lookup {
            Ok(company) if !company.has_partners() => {
                info!("[{cnpj}] No QSA information found");
            }
            Ok(company) => {
                info!(
                    "[{cnpj}] {}: {} partner(s)",
                    company.nome.as_deref().unwrap_or("?"),
                    cnpj_rows.len()
                );
            }
            Err(e) => {
                failed_lookups += 1;
                warn!("[{cnpj}] Lookup failed: {e}");
            }
        }
        detailed.push(DetailedRow::new(cnpj, &lookup, &cnpj_rows));
        rows.extend(cnpj_rows);
    }
    info_time!(start_time, "Finished looking up all CNPJs.");

    let local_now = Local::now();
    write_rows(&config.output_path, &rows).await?;
    info_time!(
        local_now,
        "Wrote {} rows to file: {}",
        rows.len(),
        config.output_path.display()
    );

    let local_now = Local::now();
    write_detailed(&config.detailed_output_path, &detailed).await?;
    info_time!(
        local_now,
        "Wrote {} company details to file: {}",
        detailed.len(),
        config.detailed_output_path.display()
    );

    Ok(Summary {
        identifiers: cnpjs.len(),
        rows: rows.len(),
        failed_lookups,
    })
}
