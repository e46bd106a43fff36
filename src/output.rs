use std::path::Path;

use csv::WriterBuilder;
use serde::Serialize;
use tokio::fs;

use crate::parse::{DetailedRow, OutputRow};
use crate::{Error, Result};

const HEADER: [&str; 3] = ["identifier", "partner_name", "partner_role"];
const DETAILED_HEADER: [&str; 7] = [
    "identifier",
    "company_name",
    "status",
    "city",
    "state",
    "owners",
    "phone",
];

/// Writes all rows to `path` in one go, overwriting whatever was there.
/// The header is always written, even with no rows.
pub async fn write_rows(path: &Path, rows: &[OutputRow]) -> Result<()> {
    let bytes = encode(&HEADER, rows)?;
    fs::write(path, bytes).await?;
    Ok(())
}

/// Same as [`write_rows`] for the one-row-per-company details report.
pub async fn write_detailed(path: &Path, rows: &[DetailedRow]) -> Result<()> {
    let bytes = encode(&DETAILED_HEADER, rows)?;
    fs::write(path, bytes).await?;
    Ok(())
}

fn encode<T: Serialize>(header: &[&str], rows: &[T]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::with_capacity(rows.len() * 64));

    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.into_inner().map_err(|e| Error::Io(e.into_error()))
}
