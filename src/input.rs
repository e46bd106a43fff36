use std::path::Path;

use tracing::info;

use crate::{Error, Result};

const CNPJ_DIGITS: usize = 14;

/// Reads the input file and returns the normalized CNPJs in file order.
/// Lines without any digit are skipped. An input with no CNPJs at all is an error.
pub async fn load_identifiers(path: &Path) -> Result<Vec<String>> {
    let contents = tokio::fs::read_to_string(path).await?;

    let cnpjs = contents
        .lines()
        .filter_map(normalize_identifier)
        .collect::<Vec<_>>();

    if cnpjs.is_empty() {
        return Err(Error::EmptyInput(path.display().to_string()));
    }
    info!("{} CNPJs loaded from '{}'", cnpjs.len(), path.display());
    Ok(cnpjs)
}

/// Strips everything but digits and left-pads with zeros to 14 digits,
/// so `"11.222.333/0001-81"` and `"11222333000181"` end up the same.
pub fn normalize_identifier(line: &str) -> Option<String> {
    let digits = line
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>();
    if digits.is_empty() {
        return None;
    }
    Some(format!("{:0>width$}", digits, width = CNPJ_DIGITS))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn normalize_strips_punctuation() {
        assert_eq!(
            normalize_identifier("11.222.333/0001-81").as_deref(),
            Some("11222333000181")
        );
    }

    #[test]
    fn normalize_pads_short_numbers() {
        // Spreadsheets tend to drop leading zeros.
        assert_eq!(
            normalize_identifier(" 191000100 ").as_deref(),
            Some("00000191000100")
        );
    }

    #[test]
    fn normalize_skips_lines_without_digits() {
        assert_eq!(normalize_identifier(""), None);
        assert_eq!(normalize_identifier("   "), None);
        assert_eq!(normalize_identifier("cnpj"), None);
    }

    #[tokio::test]
    async fn load_keeps_file_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "99888777000100\n\n11.222.333/0001-81\r\n").unwrap();

        let cnpjs = load_identifiers(file.path()).await.unwrap();
        assert_eq!(cnpjs, vec!["99888777000100", "11222333000181"]);
    }

    #[tokio::test]
    async fn load_rejects_empty_input() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = load_identifiers(file.path()).await.unwrap_err();
        assert!(matches!(err, Error::EmptyInput(_)));
    }

    #[tokio::test]
    async fn load_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_identifiers(&dir.path().join("nope.csv"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
