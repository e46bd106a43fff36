//! QSA EXTRACTOR
//! Reads CNPJs from a CSV file, asks ReceitaWS for each company's partners
//! (Quadro de Sócios e Administradores) and writes them out as a flat CSV report.

use std::path::PathBuf;
use std::time::Duration;

mod error;
pub mod input;
mod macros;
pub mod output;
pub mod parse;
pub mod process;
pub mod rate_limit;
pub mod request;

pub use error::{Error, Result};

const INPUT_FILE: &str = "cnpj.csv";
const OUTPUT_FILE: &str = "qsa_resultados.csv";
const DETAILED_OUTPUT_FILE: &str = "cnpj_detalhado.csv";
const RECEITAWS_BASE_URL: &str = "https://www.receitaws.com.br/v1/cnpj/";
/// The free ReceitaWS tier allows 3 requests per minute.
const MIN_INTERVAL_BETWEEN_REQUESTS: Duration = Duration::from_secs(20);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Placeholder written for partner fields when there is nothing to report.
pub const NOT_AVAILABLE: &str = "N/A";

/// Everything a run needs. `Config::default()` is what the binary uses.
#[derive(Debug, Clone)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// One row per company: name, status, city, state, owners, phone.
    pub detailed_output_path: PathBuf,
    /// Must end with `/`, the CNPJ is appended as the last path segment.
    pub base_url: String,
    pub min_interval: Duration,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: INPUT_FILE.into(),
            output_path: OUTPUT_FILE.into(),
            detailed_output_path: DETAILED_OUTPUT_FILE.into(),
            base_url: RECEITAWS_BASE_URL.into(),
            min_interval: MIN_INTERVAL_BETWEEN_REQUESTS,
            request_timeout: REQUEST_TIMEOUT,
        }
    }
}
